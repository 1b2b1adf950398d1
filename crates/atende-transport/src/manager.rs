//! Connection lifecycle — the state machine driving the transport.
//!
//! Owns the connect/reconnect sequence: credentials are loaded from the
//! session store, the protocol version is discovered, and the transport's
//! event stream is consumed until the connection dies. Transient closures
//! reconnect after a fixed delay, forever; an explicit sign-out parks the
//! connection until the operator re-pairs.

use atende_core::{
    error::AtendeError,
    event::{ConnectionState, TransportEvent},
    message::{Envelope, Outbound},
    traits::Transport,
};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{mpsc, watch};
use tracing::{error, info, warn};

use crate::qr;
use crate::session::SessionStore;

/// How one connection session ended.
enum SessionEnd {
    /// Explicit sign-out; never reconnected.
    Terminal,
    /// Anything else; reconnect after the fixed delay.
    Transient,
    /// The dispatcher went away; nothing left to serve.
    Shutdown,
}

/// Drives the transport through its lifecycle and forwards received
/// envelopes to the dispatcher.
pub struct ConnectionManager {
    transport: Arc<dyn Transport>,
    store: SessionStore,
    reconnect_delay: Duration,
    state_tx: watch::Sender<ConnectionState>,
}

impl ConnectionManager {
    pub fn new(
        transport: Arc<dyn Transport>,
        store: SessionStore,
        reconnect_delay: Duration,
    ) -> Self {
        let (state_tx, _) = watch::channel(ConnectionState::Disconnected);
        Self {
            transport,
            store,
            reconnect_delay,
            state_tx,
        }
    }

    /// Current connection state.
    pub fn state(&self) -> ConnectionState {
        *self.state_tx.borrow()
    }

    /// Sending handle for the dispatch layer. Sends are refused while the
    /// connection is not open.
    pub fn handle(&self) -> TransportHandle {
        TransportHandle {
            transport: self.transport.clone(),
            state: self.state_tx.subscribe(),
        }
    }

    /// Run the first connect sequence, then keep the connection alive in a
    /// background task. Returns the envelope stream for the dispatcher.
    ///
    /// Only the very first attempt fails hard — a broken config or an
    /// unreachable server at boot should be visible, not silently retried.
    pub async fn start(self: Arc<Self>) -> Result<mpsc::Receiver<Envelope>, AtendeError> {
        let (tx, rx) = mpsc::channel(256);

        let mut events = self.open_session().await?;

        tokio::spawn(async move {
            loop {
                let end = self.drive(&mut events, &tx).await;
                self.state_tx.send_replace(ConnectionState::Closed);

                match end {
                    SessionEnd::Shutdown => return,
                    SessionEnd::Terminal => {
                        warn!(
                            "signed out — session invalidated; delete {} and restart to pair again",
                            self.store.dir().display()
                        );
                        // The connection stays closed but the process stays up.
                        std::future::pending::<()>().await;
                    }
                    SessionEnd::Transient => {}
                }

                info!("reconnecting in {}s", self.reconnect_delay.as_secs());
                loop {
                    tokio::time::sleep(self.reconnect_delay).await;
                    match self.open_session().await {
                        Ok(stream) => {
                            events = stream;
                            break;
                        }
                        Err(e) => error!("reconnect attempt failed: {e}"),
                    }
                }
            }
        });

        Ok(rx)
    }

    /// One full connect sequence: re-load credentials, discover the
    /// protocol version, and open the transport.
    async fn open_session(&self) -> Result<mpsc::Receiver<TransportEvent>, AtendeError> {
        let credentials = self.store.load().await?;
        if credentials.is_none() {
            info!("no stored session — pairing will be required");
        }

        let version = self.transport.discover_version().await?;
        info!("transport protocol v{version} (latest: {})", version.is_latest);

        self.state_tx.send_replace(ConnectionState::Connecting);
        self.transport.connect(credentials).await
    }

    /// Consume one connection's event stream until it closes.
    async fn drive(
        &self,
        events: &mut mpsc::Receiver<TransportEvent>,
        envelopes: &mpsc::Sender<Envelope>,
    ) -> SessionEnd {
        while let Some(event) = events.recv().await {
            match event {
                TransportEvent::Qr(code) => {
                    info!("pairing required — scan with the phone's linked-devices screen:");
                    match qr::render_terminal(&code) {
                        Ok(rendered) => println!("{rendered}"),
                        Err(e) => error!("failed to render pairing QR: {e}"),
                    }
                }
                TransportEvent::Opened => {
                    self.state_tx.send_replace(ConnectionState::Open);
                    info!("connection open");
                }
                TransportEvent::Closed(cause) => {
                    if cause.is_terminal() {
                        return SessionEnd::Terminal;
                    }
                    warn!("connection closed: {cause:?}");
                    return SessionEnd::Transient;
                }
                TransportEvent::CredentialsRotated(credentials) => {
                    // Non-fatal: the live connection keeps its keys; the
                    // risk is a forced re-pairing on the next restart.
                    if let Err(e) = self.store.persist(&credentials).await {
                        warn!("failed to persist rotated credentials: {e}");
                    }
                }
                TransportEvent::Messages(batch) => {
                    for envelope in batch {
                        if envelopes.send(envelope).await.is_err() {
                            warn!("dispatcher gone, abandoning connection");
                            return SessionEnd::Shutdown;
                        }
                    }
                }
            }
        }

        warn!("transport event stream ended without a close notification");
        SessionEnd::Transient
    }
}

/// Cloneable sending side handed to the dispatcher.
#[derive(Clone)]
pub struct TransportHandle {
    transport: Arc<dyn Transport>,
    state: watch::Receiver<ConnectionState>,
}

impl TransportHandle {
    pub fn state(&self) -> ConnectionState {
        *self.state.borrow()
    }

    /// Send outbound content, refusing while the connection is not open.
    pub async fn send(&self, recipient: &str, content: Outbound) -> Result<(), AtendeError> {
        if *self.state.borrow() != ConnectionState::Open {
            return Err(AtendeError::Transport("not connected".into()));
        }
        self.transport.send(recipient, content).await
    }
}
