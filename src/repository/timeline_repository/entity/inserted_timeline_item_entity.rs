use uuid::Uuid;

#[derive(sqlx::FromRow)]
pub struct InsertedTimelineItemEntity {
    pub id: Uuid,
    pub user_id: Uuid,
}
