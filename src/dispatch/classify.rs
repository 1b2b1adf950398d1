//! Envelope → normalized intent.

use atende_core::message::{Envelope, Payload};

/// Normalized intent extracted from one envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Intent {
    /// Lowercased message text; empty when the payload carries none.
    pub text: String,
    /// Selected menu option id, when the payload is a button reply.
    pub selected_option: Option<String>,
}

/// Extract the normalized intent from an envelope.
///
/// Text is lowercased for case-insensitive matching but not trimmed;
/// keyword comparison downstream is exact. A button reply contributes both
/// its option id and its display label (as the text).
pub fn classify(envelope: &Envelope) -> Intent {
    match &envelope.payload {
        Payload::Conversation(text)
        | Payload::ExtendedText(text)
        | Payload::ImageCaption(text)
        | Payload::VideoCaption(text) => Intent {
            text: text.to_lowercase(),
            selected_option: None,
        },
        Payload::ButtonReply { id, label } => Intent {
            text: label.to_lowercase(),
            selected_option: Some(id.clone()),
        },
        Payload::Unsupported => Intent {
            text: String::new(),
            selected_option: None,
        },
    }
}
