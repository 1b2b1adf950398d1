//! Dispatch — classification, routing, and the reply loop.

mod classify;
mod control;
mod router;

#[cfg(test)]
mod tests;

pub use classify::{classify, Intent};
pub use control::BotSwitch;
pub use router::{Action, Router};

use atende_core::config::Catalog;
use atende_core::message::{Envelope, Outbound};
use atende_transport::TransportHandle;
use tokio::sync::mpsc;
use tracing::{error, info, warn};

/// Consumes envelopes one at a time and acts on them.
///
/// The single-consumer loop is what serializes reads and writes of the
/// pause switch: a dispatch finishes (including its awaited sends) before
/// the next envelope is picked up.
pub struct Dispatcher {
    handle: TransportHandle,
    router: Router,
    switch: BotSwitch,
}

impl Dispatcher {
    pub fn new(handle: TransportHandle, catalog: Catalog) -> Self {
        Self {
            handle,
            router: Router::new(catalog),
            switch: BotSwitch::default(),
        }
    }

    /// Run until the envelope stream ends.
    pub async fn run(&self, mut envelopes: mpsc::Receiver<Envelope>) {
        while let Some(envelope) = envelopes.recv().await {
            self.handle_envelope(envelope).await;
        }
        info!("envelope stream ended, dispatcher stopping");
    }

    async fn handle_envelope(&self, envelope: Envelope) {
        let intent = classify(&envelope);

        // Nothing recognizable in the payload.
        if intent.text.is_empty() && intent.selected_option.is_none() {
            return;
        }

        info!(
            "message from {} ({}): \"{}\"{}",
            envelope.sender_name,
            envelope.sender,
            intent.text,
            intent
                .selected_option
                .as_deref()
                .map(|id| format!(" (option: {id})"))
                .unwrap_or_default()
        );

        let action = self
            .router
            .route(&intent, envelope.from_self, self.switch.is_active());
        self.apply(&envelope, action).await;
    }

    async fn apply(&self, envelope: &Envelope, action: Action) {
        match action {
            Action::ReplyMenu => {
                let menu = self.router.catalog().menu.clone();
                self.send(envelope, Outbound::Menu(menu)).await;
                info!("menu sent to {}", envelope.sender);
            }
            Action::ReplyText {
                text,
                handoff_alert,
            } => {
                self.send(envelope, Outbound::Text(text)).await;
                if handoff_alert {
                    // Internal alert only — the customer already got the
                    // canned reply.
                    warn!(
                        "*** {} ({}) asked for a human attendant ***",
                        envelope.sender_name, envelope.sender
                    );
                }
            }
            Action::SetActive { active, ack } => {
                self.switch.set_active(active);
                info!(
                    "bot {} by owner",
                    if active { "resumed" } else { "paused" }
                );
                self.send(envelope, Outbound::Text(ack)).await;
            }
            Action::Acknowledge(text) => {
                self.send(envelope, Outbound::Text(text)).await;
            }
            Action::Noop => {}
        }
    }

    /// Send, logging failures. A rejected send ends this dispatch and
    /// nothing else — no retry here, no effect on the connection.
    async fn send(&self, envelope: &Envelope, content: Outbound) {
        if let Err(e) = self.handle.send(&envelope.sender, content).await {
            error!("failed to send reply to {}: {e}", envelope.sender);
        }
    }
}
