use crate::repository::timeline_repository::entity::InsertedTimelineItemEntity;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq)]
pub struct InsertedTimelineItem {
    pub id: Uuid,
    pub user_id: Uuid,
}

impl From<InsertedTimelineItemEntity> for InsertedTimelineItem {
    fn from(value: InsertedTimelineItemEntity) -> Self {
        Self {
            id: value.id,
            user_id: value.user_id,
        }
    }
}
