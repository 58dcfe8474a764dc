//!
//! Module with all dtos that are passed between server and its clients
//!

pub mod input;
pub mod output;

mod notification_verb;

pub use notification_verb::NotificationVerb;
