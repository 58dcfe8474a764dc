use crate::{
    dto::NotificationVerb,
    repository::{notifications_repository::entity::NotificationFindEntity, Error},
};
use std::str::FromStr;
use time::OffsetDateTime;
use uuid::Uuid;

#[derive(Debug, Clone)]
pub struct Notification {
    pub id: Uuid,
    pub user_id: Uuid,
    pub actor_id: Uuid,
    pub actor_username: String,
    pub verb: NotificationVerb,
    pub object_id: Option<Uuid>,
    pub target_id: Option<Uuid>,
    pub issued_at: OffsetDateTime,
    pub read: bool,
}

impl TryFrom<NotificationFindEntity> for Notification {
    type Error = Error;

    fn try_from(value: NotificationFindEntity) -> Result<Self, Self::Error> {
        let verb = NotificationVerb::from_str(&value.verb)
            .map_err(|_| Error::UnknownVerb(value.verb.clone()))?;

        Ok(Self {
            id: value.id,
            user_id: value.user_id,
            actor_id: value.actor_id,
            actor_username: value.actor_username,
            verb,
            object_id: value.object_id,
            target_id: value.target_id,
            issued_at: value.issued_at,
            read: value.read,
        })
    }
}
