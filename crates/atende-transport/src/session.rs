//! Directory-backed persistence for the transport's credential blob.
//!
//! The session directory also hosts whatever key material the wire library
//! keeps for itself; deleting the whole directory forces a fresh pairing.

use atende_core::{error::AtendeError, event::Credentials};
use std::path::{Path, PathBuf};
use tracing::debug;

const CREDS_FILE: &str = "creds.json";

/// Stores and restores the opaque session credentials.
///
/// `persist` is last-write-wins: the blob is written to a scratch file and
/// renamed over the live one, so repeated or overlapping writes never leave
/// a half-written credential file behind.
pub struct SessionStore {
    dir: PathBuf,
}

impl SessionStore {
    /// Open (creating if absent) the session directory.
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self, AtendeError> {
        let dir = dir.into();
        std::fs::create_dir_all(&dir)
            .map_err(|e| AtendeError::Session(format!("cannot create {}: {e}", dir.display())))?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Whether a credential blob is on disk (i.e. a previous pairing exists).
    pub fn has_credentials(&self) -> bool {
        self.dir.join(CREDS_FILE).exists()
    }

    /// Load the stored credentials, or `None` when no pairing has happened
    /// yet (the caller should expect a QR challenge).
    pub async fn load(&self) -> Result<Option<Credentials>, AtendeError> {
        let path = self.dir.join(CREDS_FILE);
        match tokio::fs::read(&path).await {
            Ok(bytes) => {
                debug!("loaded session credentials ({} bytes)", bytes.len());
                Ok(Some(Credentials(bytes)))
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(AtendeError::Session(format!(
                "cannot read {}: {e}",
                path.display()
            ))),
        }
    }

    /// Persist rotated credentials. Failure is reported to the caller and
    /// must not take the connection down; the cost of a lost write is a
    /// re-pairing on the next restart.
    pub async fn persist(&self, credentials: &Credentials) -> Result<(), AtendeError> {
        let path = self.dir.join(CREDS_FILE);
        let scratch = self.dir.join(format!("{CREDS_FILE}.tmp"));
        tokio::fs::write(&scratch, credentials.as_bytes())
            .await
            .map_err(|e| AtendeError::Session(format!("cannot write {}: {e}", scratch.display())))?;
        tokio::fs::rename(&scratch, &path)
            .await
            .map_err(|e| AtendeError::Session(format!("cannot replace {}: {e}", path.display())))?;
        debug!("persisted session credentials ({} bytes)", credentials.as_bytes().len());
        Ok(())
    }
}
