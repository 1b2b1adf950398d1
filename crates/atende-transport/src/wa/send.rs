//! Outbound message construction and send retry.

use atende_core::{error::AtendeError, message::Outbound};
use tracing::{error, warn};
use wacore_binary::jid::Jid;
use whatsapp_rust::client::Client;

/// Retry delays for exponential backoff: 500ms, 1s, 2s.
pub(super) const RETRY_DELAYS_MS: [u64; 3] = [500, 1000, 2000];

/// Send a message with retry and exponential backoff.
///
/// Attempts up to 3 times; a message that still fails is reported to the
/// caller, which logs and moves on — the connection itself is untouched.
pub(super) async fn retry_send(
    client: &Client,
    jid: &Jid,
    msg: waproto::whatsapp::Message,
) -> Result<String, AtendeError> {
    let mut last_err = None;

    for (attempt, delay_ms) in RETRY_DELAYS_MS.iter().enumerate() {
        match client.send_message(jid.clone(), msg.clone()).await {
            Ok(msg_id) => return Ok(msg_id),
            Err(e) => {
                let attempt_num = attempt + 1;
                if attempt_num < RETRY_DELAYS_MS.len() {
                    warn!(
                        "send attempt {attempt_num}/{} failed: {e}, retrying in {delay_ms}ms",
                        RETRY_DELAYS_MS.len()
                    );
                    tokio::time::sleep(std::time::Duration::from_millis(*delay_ms)).await;
                } else {
                    error!(
                        "send attempt {attempt_num}/{} failed: {e}, giving up",
                        RETRY_DELAYS_MS.len()
                    );
                }
                last_err = Some(e);
            }
        }
    }

    Err(AtendeError::Transport(format!(
        "send failed after {} attempts: {}",
        RETRY_DELAYS_MS.len(),
        last_err.map(|e| e.to_string()).unwrap_or_default()
    )))
}

/// Build the wire message for outbound content.
pub(super) fn build_message(content: Outbound) -> waproto::whatsapp::Message {
    match content {
        Outbound::Text(text) => waproto::whatsapp::Message {
            conversation: Some(text),
            ..Default::default()
        },
        Outbound::Menu(menu) => {
            let buttons = menu
                .options
                .into_iter()
                .map(|option| waproto::whatsapp::message::buttons_message::Button {
                    button_id: Some(option.id),
                    button_text: Some(
                        waproto::whatsapp::message::buttons_message::button::ButtonText {
                            display_text: Some(option.label),
                        },
                    ),
                    // RESPONSE button type.
                    r#type: Some(1),
                    ..Default::default()
                })
                .collect();

            waproto::whatsapp::Message {
                buttons_message: Some(Box::new(
                    waproto::whatsapp::message::ButtonsMessage {
                        content_text: Some(menu.header),
                        footer_text: Some(menu.footer),
                        buttons,
                        // EMPTY header — text only.
                        header_type: Some(1),
                        ..Default::default()
                    },
                )),
                ..Default::default()
            }
        }
    }
}
