//!
//! All roles used within application
//!

use strum::AsRefStr;

#[derive(Debug, Clone, Copy, AsRefStr)]
pub enum Role {
    /// Role of the services that own users, posts and comments
    /// and report what happened to them
    #[strum(serialize = "nakama_notifier_produce_events")]
    ProduceEvents,
}
