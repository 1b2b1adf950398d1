//! Routing rules for classified messages.

use super::classify::Intent;
use atende_core::config::Catalog;

/// Owner control commands. Exact lowercase matches only, and only from the
/// controlling account's own messages.
const CMD_PAUSE: &str = "/pausar";
const CMD_RESUME: &str = "/retomar";

/// What the dispatcher should do with one classified message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Send the button menu.
    ReplyMenu,
    /// Send a canned reply; `handoff_alert` marks the human-handoff option,
    /// which additionally raises an internal alert in the logs.
    ReplyText { text: String, handoff_alert: bool },
    /// Flip the global switch and acknowledge to the owner.
    SetActive { active: bool, ack: String },
    /// Acknowledge without a state change.
    Acknowledge(String),
    /// Nothing to do.
    Noop,
}

/// Pure decision function over one intent. Holds only immutable catalog
/// data; sender identity and the current switch value come in as arguments.
pub struct Router {
    catalog: Catalog,
}

impl Router {
    pub fn new(catalog: Catalog) -> Self {
        Self { catalog }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Rules in strict order: owner control commands, then the pause gate,
    /// then menu triggers, then button lookups. The gate comes after the
    /// owner commands so a paused bot can always be resumed.
    pub fn route(&self, intent: &Intent, from_owner: bool, active: bool) -> Action {
        let control = &self.catalog.control;

        if from_owner {
            return match intent.text.as_str() {
                CMD_PAUSE => {
                    if active {
                        Action::SetActive {
                            active: false,
                            ack: control.paused.clone(),
                        }
                    } else {
                        Action::Acknowledge(control.already_paused.clone())
                    }
                }
                CMD_RESUME => {
                    if !active {
                        Action::SetActive {
                            active: true,
                            ack: control.resumed.clone(),
                        }
                    } else {
                        Action::Acknowledge(control.already_active.clone())
                    }
                }
                // Self-sent chatter is never answered.
                _ => Action::Noop,
            };
        }

        if !active {
            return Action::Noop;
        }

        if self.catalog.is_trigger(&intent.text) {
            return Action::ReplyMenu;
        }

        if let Some(option_id) = &intent.selected_option {
            if let Some(reply) = self.catalog.reply_for(option_id) {
                return Action::ReplyText {
                    text: reply.to_string(),
                    handoff_alert: option_id == &self.catalog.attendant_option,
                };
            }
        }

        Action::Noop
    }
}
