use super::InsertedTimelineItem;
use crate::repository::Error;
use axum::async_trait;
use uuid::Uuid;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TimelineRepository: Send + Sync {
    ///
    /// Inserts timeline item with the post
    /// for every follower of the author, in one statement.
    ///
    async fn insert_for_followers(
        &self,
        post_id: Uuid,
        author_id: Uuid,
    ) -> Result<Vec<InsertedTimelineItem>, Error>;
}
