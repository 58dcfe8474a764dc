mod inserted_notification;
mod notification;
mod notifications_repository_config;

pub use inserted_notification::*;
pub use notification::*;
pub use notifications_repository_config::*;
