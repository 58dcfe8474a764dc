use serde::{Deserialize, Serialize};
use strum::{AsRefStr, EnumString};

///
/// Kind of event the notification was created for.
/// String representation is shared by JSON and the database.
///
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, AsRefStr, EnumString)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum NotificationVerb {
    Follow,
    Comment,
    PostMention,
    CommentMention,
}
