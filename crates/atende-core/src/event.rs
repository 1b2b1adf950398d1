use crate::message::Envelope;

/// Opaque authentication material for the transport.
///
/// The transport hands these out on rotation and accepts them back when
/// connecting; nothing in atende looks inside the bytes. At most one copy is
/// live in memory per process — the session store owns it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials(pub Vec<u8>);

impl Credentials {
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

/// Connection lifecycle state. Transitions are driven exclusively by
/// transport notifications, never by application logic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionState {
    Disconnected,
    Connecting,
    Open,
    Closed,
}

/// Why the transport closed the connection.
#[derive(Debug, Clone)]
pub enum CloseCause {
    /// Explicit sign-out from the phone. Never reconnected; the operator
    /// must re-pair.
    LoggedOut,
    /// Network drop, server restart — anything recoverable.
    ConnectionLost(String),
    /// Protocol-level stream failure. Recoverable.
    StreamError(String),
}

impl CloseCause {
    /// Terminal closures do not reconnect; everything else does.
    pub fn is_terminal(&self) -> bool {
        matches!(self, CloseCause::LoggedOut)
    }
}

/// Typed notifications emitted by a connected transport.
#[derive(Debug, Clone)]
pub enum TransportEvent {
    /// A pairing challenge to show the operator. Emitted while connecting
    /// without valid credentials; rotates periodically until scanned.
    Qr(String),
    /// The connection reached the open state.
    Opened,
    /// The connection closed.
    Closed(CloseCause),
    /// The transport rotated its credential material; the new blob must be
    /// persisted before the next restart to avoid re-pairing.
    CredentialsRotated(Credentials),
    /// A batch of received messages, in arrival order.
    Messages(Vec<Envelope>),
}

/// Transport protocol version metadata, fetched once at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionInfo {
    pub version: [u32; 3],
    pub is_latest: bool,
}

impl std::fmt::Display for VersionInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{}.{}", self.version[0], self.version[1], self.version[2])
    }
}
