use crate::{
    error::AtendeError,
    event::{Credentials, TransportEvent, VersionInfo},
    message::Outbound,
};
use async_trait::async_trait;

/// Chat transport trait — the wire.
///
/// The protocol client (frame encoding, encryption handshake, device
/// pairing) lives behind this seam. atende consumes it as an opaque source
/// of [`TransportEvent`]s plus a send operation.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Fetch protocol version metadata. Called once at startup.
    async fn discover_version(&self) -> Result<VersionInfo, AtendeError>;

    /// Open a connection, negotiating with the given credentials (or
    /// starting a fresh pairing when `None`). Returns the event stream for
    /// this connection attempt; the stream ends when the connection dies.
    async fn connect(
        &self,
        credentials: Option<Credentials>,
    ) -> Result<tokio::sync::mpsc::Receiver<TransportEvent>, AtendeError>;

    /// Deliver outbound content to a recipient.
    async fn send(&self, recipient: &str, content: Outbound) -> Result<(), AtendeError>;
}
