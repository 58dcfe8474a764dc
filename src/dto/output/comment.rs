use crate::dto::input;
use serde::Serialize;
use time::OffsetDateTime;
use uuid::Uuid;

///
/// Comment pushed to clients watching a post
///
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: Uuid,
    pub post_id: Uuid,
    pub content: String,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    pub username: String,
}

impl From<input::Comment> for Comment {
    fn from(value: input::Comment) -> Self {
        Self {
            id: value.id,
            post_id: value.post_id,
            content: value.content,
            created_at: value.created_at,
            username: value.username,
        }
    }
}
