use crate::config::MenuDefinition;

/// One received message event. Lives only for the duration of one dispatch.
#[derive(Debug, Clone)]
pub struct Envelope {
    /// Opaque chat identifier the reply goes back to.
    pub sender: String,
    /// Display name the sender advertises.
    pub sender_name: String,
    /// True if the message originated from the controlling account itself
    /// (e.g. typed on a linked device).
    pub from_self: bool,
    pub payload: Payload,
}

/// The single content variant carried by an envelope.
#[derive(Debug, Clone)]
pub enum Payload {
    /// Plain conversation text.
    Conversation(String),
    /// Extended text (links, quotes).
    ExtendedText(String),
    /// Caption attached to an image.
    ImageCaption(String),
    /// Caption attached to a video.
    VideoCaption(String),
    /// A tapped menu button: stable id plus the label shown to the user.
    ButtonReply { id: String, label: String },
    /// Anything the classifier has no use for (stickers, reactions, ...).
    Unsupported,
}

/// Outbound content handed to the transport for delivery.
#[derive(Debug, Clone)]
pub enum Outbound {
    Text(String),
    Menu(MenuDefinition),
}
