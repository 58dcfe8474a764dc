use time::OffsetDateTime;
use uuid::Uuid;

#[derive(sqlx::FromRow)]
pub struct NotificationFindEntity {
    pub id: Uuid,
    pub user_id: Uuid,
    pub actor_id: Uuid,
    pub actor_username: String,
    pub verb: String,
    pub object_id: Option<Uuid>,
    pub target_id: Option<Uuid>,
    pub issued_at: OffsetDateTime,
    pub read: bool,
}
