use crate::repository::notifications_repository::entity::InsertedNotificationEntity;
use time::OffsetDateTime;
use uuid::Uuid;

///
/// Row created by one of the notification inserts.
/// Remaining fields are known by the caller.
///
#[derive(Debug, Clone, PartialEq)]
pub struct InsertedNotification {
    pub id: Uuid,
    pub user_id: Uuid,
    pub issued_at: OffsetDateTime,
}

impl From<InsertedNotificationEntity> for InsertedNotification {
    fn from(value: InsertedNotificationEntity) -> Self {
        Self {
            id: value.id,
            user_id: value.user_id,
            issued_at: value.issued_at,
        }
    }
}
