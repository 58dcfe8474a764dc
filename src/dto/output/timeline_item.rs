use serde::Serialize;
use time::OffsetDateTime;
use uuid::Uuid;

///
/// Entry of user's feed pushed when someone they follow publishes a post
///
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TimelineItem {
    pub id: Uuid,
    #[serde(skip)]
    pub user_id: Uuid,
    pub post: TimelinePost,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TimelinePost {
    pub id: Uuid,
    pub content: String,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    pub username: String,
}
