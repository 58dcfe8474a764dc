use serde::Deserialize;
use time::OffsetDateTime;
use uuid::Uuid;

///
/// Event reported by the services owning users, posts and comments.
/// Every event is fanned out to notifications and live streams.
///
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DomainEvent {
    Follow { follower: Actor, followee_id: Uuid },
    Comment { comment: Comment },
    Post { post: Post },
}

#[derive(Debug, Clone, Deserialize)]
pub struct Actor {
    pub id: Uuid,
    pub username: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Comment {
    pub id: Uuid,
    pub post_id: Uuid,
    pub user_id: Uuid,
    pub username: String,
    pub content: String,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Post {
    pub id: Uuid,
    pub user_id: Uuid,
    pub username: String,
    pub content: String,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}
