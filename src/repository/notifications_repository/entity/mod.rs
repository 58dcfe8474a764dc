mod inserted_notification_entity;
mod notification_find_entity;

pub use inserted_notification_entity::*;
pub use notification_find_entity::*;
