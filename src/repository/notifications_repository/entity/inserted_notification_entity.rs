use time::OffsetDateTime;
use uuid::Uuid;

#[derive(sqlx::FromRow)]
pub struct InsertedNotificationEntity {
    pub id: Uuid,
    pub user_id: Uuid,
    pub issued_at: OffsetDateTime,
}
