//! Mapping wire-client events onto the transport contract.

use atende_core::{
    event::{CloseCause, TransportEvent},
    message::{Envelope, Payload},
};
use std::sync::Arc;
use tokio::sync::{mpsc, Mutex};
use tracing::{debug, info, warn};
use wacore::types::events::Event;
use whatsapp_rust::client::Client;

/// Translate one wire event into transport events and client-handle updates.
pub(super) async fn forward_event(
    event: Event,
    client: Arc<Client>,
    tx: &mpsc::Sender<TransportEvent>,
    client_store: &Arc<Mutex<Option<Arc<Client>>>>,
) {
    match event {
        Event::PairingQrCode { code, .. } => {
            info!("pairing QR code received");
            let _ = tx.send(TransportEvent::Qr(code)).await;
        }
        Event::PairSuccess(_) => {
            info!("pairing successful");
        }
        Event::Connected(_) => {
            *client_store.lock().await = Some(client);
            let _ = tx.send(TransportEvent::Opened).await;
        }
        Event::Disconnected(_) => {
            *client_store.lock().await = None;
            let _ = tx
                .send(TransportEvent::Closed(CloseCause::ConnectionLost(
                    "disconnected by server".into(),
                )))
                .await;
        }
        Event::LoggedOut(_) => {
            warn!("logged out — session invalidated");
            *client_store.lock().await = None;
            let _ = tx.send(TransportEvent::Closed(CloseCause::LoggedOut)).await;
        }
        Event::Message(msg, info) => {
            let envelope = extract_envelope(&msg, &info);
            let _ = tx.send(TransportEvent::Messages(vec![envelope])).await;
        }
        _ => {}
    }
}

/// Build an envelope from a received wire message.
///
/// Unwraps the nesting layers WhatsApp adds (device-sent, ephemeral,
/// view-once) and keeps exactly one payload variant.
fn extract_envelope(
    msg: &waproto::whatsapp::Message,
    info: &wacore::types::message::MessageInfo,
) -> Envelope {
    let inner = msg
        .device_sent_message
        .as_ref()
        .and_then(|d| d.message.as_deref())
        .or_else(|| {
            msg.ephemeral_message
                .as_ref()
                .and_then(|e| e.message.as_deref())
        })
        .or_else(|| {
            msg.view_once_message
                .as_ref()
                .and_then(|v| v.message.as_deref())
        })
        .unwrap_or(msg);

    let payload = if let Some(text) = inner.conversation.clone() {
        Payload::Conversation(text)
    } else if let Some(text) = inner
        .extended_text_message
        .as_ref()
        .and_then(|e| e.text.clone())
    {
        Payload::ExtendedText(text)
    } else if let Some(img) = inner.image_message.as_ref() {
        Payload::ImageCaption(img.caption.clone().unwrap_or_default())
    } else if let Some(vid) = inner.video_message.as_ref() {
        Payload::VideoCaption(vid.caption.clone().unwrap_or_default())
    } else if let Some(reply) = inner.template_button_reply_message.as_ref() {
        let id = reply.selected_id.clone().unwrap_or_default();
        let label = reply.selected_display_text.clone().unwrap_or_default();
        debug!("button reply: id={id}, label={label}");
        Payload::ButtonReply { id, label }
    } else {
        Payload::Unsupported
    };

    Envelope {
        // Replies go back to the chat, which for direct messages doubles as
        // the sender identity.
        sender: info.source.chat.to_string(),
        sender_name: info.push_name.clone(),
        from_self: info.source.is_from_me,
        payload,
    }
}
