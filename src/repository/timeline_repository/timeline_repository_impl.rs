use super::{entity::InsertedTimelineItemEntity, InsertedTimelineItem, TimelineRepository};
use crate::repository::Error;
use axum::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

pub struct TimelineRepositoryImpl {
    pool: PgPool,
}

impl TimelineRepositoryImpl {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TimelineRepository for TimelineRepositoryImpl {
    async fn insert_for_followers(
        &self,
        post_id: Uuid,
        author_id: Uuid,
    ) -> Result<Vec<InsertedTimelineItem>, Error> {
        let inserted = sqlx::query_as::<_, InsertedTimelineItemEntity>(
            r#"
            INSERT INTO timeline (user_id, post_id)
            SELECT follower_id, $1
            FROM follows
            WHERE followee_id = $2
            RETURNING id, user_id
            "#,
        )
        .bind(post_id)
        .bind(author_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(inserted.into_iter().map(InsertedTimelineItem::from).collect())
    }
}
