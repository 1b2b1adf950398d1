//! The process-wide pause switch.

use std::sync::atomic::{AtomicBool, Ordering};

/// Whether the bot answers customers. Defaults to active; not persisted,
/// so every restart comes up active.
///
/// Only the dispatcher task mutates it, one message at a time; the atomic
/// covers the multi-threaded runtime underneath.
pub struct BotSwitch {
    active: AtomicBool,
}

impl Default for BotSwitch {
    fn default() -> Self {
        Self {
            active: AtomicBool::new(true),
        }
    }
}

impl BotSwitch {
    pub fn is_active(&self) -> bool {
        self.active.load(Ordering::SeqCst)
    }

    pub fn set_active(&self, active: bool) {
        self.active.store(active, Ordering::SeqCst);
    }
}
