use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::defaults::*;

/// All customer-facing content: menu, canned replies, trigger keywords,
/// and owner-control acknowledgements. Loaded once at startup, immutable
/// thereafter; edit the TOML, not the code.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Catalog {
    /// Exact-match greeting keywords that bring up the menu. Matched
    /// against the lowercased message text, nothing fuzzy.
    #[serde(default = "default_triggers")]
    pub triggers: Vec<String>,
    /// The menu option that hands the conversation to a human. Selecting it
    /// raises an internal alert in the logs.
    #[serde(default = "default_attendant_option")]
    pub attendant_option: String,
    #[serde(default)]
    pub menu: MenuDefinition,
    /// Option id → reply text. Keys unique.
    #[serde(default = "default_replies")]
    pub replies: HashMap<String, String>,
    #[serde(default)]
    pub control: ControlReplies,
}

impl Default for Catalog {
    fn default() -> Self {
        Self {
            triggers: default_triggers(),
            attendant_option: default_attendant_option(),
            menu: MenuDefinition::default(),
            replies: default_replies(),
            control: ControlReplies::default(),
        }
    }
}

impl Catalog {
    /// Whether `text` (already lowercased by the classifier) is one of the
    /// menu trigger keywords.
    pub fn is_trigger(&self, text: &str) -> bool {
        self.triggers.iter().any(|t| t == text)
    }

    /// Canned reply for a menu option id, if the id is known.
    pub fn reply_for(&self, option_id: &str) -> Option<&str> {
        self.replies.get(option_id).map(String::as_str)
    }
}

/// The button menu: header, footer, ordered options.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MenuDefinition {
    #[serde(default = "default_menu_header")]
    pub header: String,
    #[serde(default = "default_menu_footer")]
    pub footer: String,
    #[serde(default = "default_menu_options")]
    pub options: Vec<MenuOption>,
}

impl Default for MenuDefinition {
    fn default() -> Self {
        Self {
            header: default_menu_header(),
            footer: default_menu_footer(),
            options: default_menu_options(),
        }
    }
}

/// One menu button: stable id plus display label.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MenuOption {
    pub id: String,
    pub label: String,
}

/// Acknowledgement texts for the owner's pause/resume commands.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ControlReplies {
    #[serde(default = "default_paused")]
    pub paused: String,
    #[serde(default = "default_already_paused")]
    pub already_paused: String,
    #[serde(default = "default_resumed")]
    pub resumed: String,
    #[serde(default = "default_already_active")]
    pub already_active: String,
}

impl Default for ControlReplies {
    fn default() -> Self {
        Self {
            paused: default_paused(),
            already_paused: default_already_paused(),
            resumed: default_resumed(),
            already_active: default_already_active(),
        }
    }
}
