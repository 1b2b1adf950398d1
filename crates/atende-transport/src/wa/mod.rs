//! Production transport over the WhatsApp Web protocol (`whatsapp-rust`).
//!
//! The wire client handles the Noise handshake, Signal encryption, and
//! device pairing; this module maps its events and message types onto the
//! transport contract.

mod events;
mod send;


use atende_core::{
    error::AtendeError,
    event::{Credentials, TransportEvent, VersionInfo},
    message::Outbound,
    traits::Transport,
};
use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::{mpsc, Mutex};
use tracing::info;
use wacore_binary::jid::Jid;
use whatsapp_rust::bot::Bot;
use whatsapp_rust_sqlite_storage::SqliteStore;
use whatsapp_rust_tokio_transport::TokioWebSocketTransportFactory;
use whatsapp_rust_ureq_http_client::UreqHttpClient;

use crate::version;

/// WhatsApp transport. One instance outlives reconnects; each `connect`
/// builds a fresh wire client against the same session directory.
pub struct WhatsAppTransport {
    session_dir: String,
    device_name: String,
    http: reqwest::Client,
    /// Wire client handle for sending — set once the connection opens.
    client: Arc<Mutex<Option<Arc<whatsapp_rust::client::Client>>>>,
}

impl WhatsAppTransport {
    pub fn new(session_dir: &str, device_name: &str) -> Self {
        Self {
            session_dir: session_dir.to_string(),
            device_name: device_name.to_string(),
            http: reqwest::Client::new(),
            client: Arc::new(Mutex::new(None)),
        }
    }

    fn protocol_db_path(&self) -> String {
        format!("{}/wa.db", self.session_dir)
    }
}

#[async_trait]
impl Transport for WhatsAppTransport {
    async fn discover_version(&self) -> Result<VersionInfo, AtendeError> {
        version::fetch_latest(&self.http).await
    }

    async fn connect(
        &self,
        _credentials: Option<Credentials>,
    ) -> Result<mpsc::Receiver<TransportEvent>, AtendeError> {
        // The wire library keeps its Signal/Noise key material in its own
        // store inside the session directory; the caller's blob is not
        // consulted here.
        std::fs::create_dir_all(&self.session_dir)?;
        let db_path = self.protocol_db_path();

        info!("building WhatsApp client (protocol store: {db_path})");

        let backend = Arc::new(
            SqliteStore::new(&db_path)
                .await
                .map_err(|e| AtendeError::Transport(format!("protocol store init failed: {e}")))?,
        );

        let (tx, rx) = mpsc::channel(64);
        let client_handle = self.client.clone();

        let mut bot = Bot::builder()
            .with_backend(backend)
            .with_transport_factory(TokioWebSocketTransportFactory::new())
            .with_http_client(UreqHttpClient::new())
            .with_device_props(
                Some(self.device_name.clone()),
                None,
                Some(waproto::whatsapp::device_props::PlatformType::Desktop),
            )
            .on_event(move |event, client| {
                let tx = tx.clone();
                let client_store = client_handle.clone();
                async move {
                    events::forward_event(event, client, &tx, &client_store).await;
                }
            })
            .build()
            .await
            .map_err(|e| AtendeError::Transport(format!("client build failed: {e}")))?;

        // Store the client handle immediately if a session already exists.
        *self.client.lock().await = Some(bot.client());

        let _handle = bot
            .run()
            .await
            .map_err(|e| AtendeError::Transport(format!("client run failed: {e}")))?;

        info!("WhatsApp client started");
        Ok(rx)
    }

    async fn send(&self, recipient: &str, content: Outbound) -> Result<(), AtendeError> {
        let client_guard = self.client.lock().await;
        let client = client_guard
            .as_ref()
            .ok_or_else(|| AtendeError::Transport("client not connected".into()))?;

        let jid: Jid = recipient
            .parse()
            .map_err(|e| AtendeError::Transport(format!("invalid JID '{recipient}': {e}")))?;

        let message = send::build_message(content);
        send::retry_send(client, &jid, message).await?;
        Ok(())
    }
}
