use crate::{dto::NotificationVerb, repository};
use serde::Serialize;
use time::OffsetDateTime;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub id: Uuid,
    #[serde(skip)]
    pub user_id: Uuid,
    #[serde(skip)]
    pub actor_id: Uuid,
    pub verb: NotificationVerb,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub object_id: Option<Uuid>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_id: Option<Uuid>,
    #[serde(with = "time::serde::rfc3339")]
    pub issued_at: OffsetDateTime,
    pub read: bool,
    pub actor_username: String,
}

impl From<repository::Notification> for Notification {
    fn from(value: repository::Notification) -> Self {
        Self {
            id: value.id,
            user_id: value.user_id,
            actor_id: value.actor_id,
            verb: value.verb,
            object_id: value.object_id,
            target_id: value.target_id,
            issued_at: value.issued_at,
            read: value.read,
            actor_username: value.actor_username,
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use serde_json::{json, Value};
    use time::macros::datetime;

    #[test]
    fn notification_json_serialize_hides_internal_ids() {
        let notification = Notification {
            id: Uuid::from_u128(1),
            user_id: Uuid::from_u128(2),
            actor_id: Uuid::from_u128(3),
            verb: NotificationVerb::Follow,
            object_id: None,
            target_id: None,
            issued_at: datetime!(2024-08-01 10:00:00 UTC),
            read: false,
            actor_username: "alice".to_string(),
        };

        let json = serde_json::to_value(&notification).unwrap();

        assert_eq!(
            json,
            json!({
                "id": "00000000-0000-0000-0000-000000000001",
                "verb": "follow",
                "issuedAt": "2024-08-01T10:00:00Z",
                "read": false,
                "actorUsername": "alice",
            })
        );
    }

    #[test]
    fn notification_json_serialize_references() {
        let notification = Notification {
            id: Uuid::from_u128(1),
            user_id: Uuid::from_u128(2),
            actor_id: Uuid::from_u128(3),
            verb: NotificationVerb::Comment,
            object_id: Some(Uuid::from_u128(4)),
            target_id: Some(Uuid::from_u128(5)),
            issued_at: datetime!(2024-08-01 10:00:00 UTC),
            read: true,
            actor_username: "bob".to_string(),
        };

        let json = serde_json::to_value(&notification).unwrap();

        let object = json.as_object().unwrap();
        assert_eq!(
            object.get("objectId"),
            Some(&Value::from("00000000-0000-0000-0000-000000000004"))
        );
        assert_eq!(
            object.get("targetId"),
            Some(&Value::from("00000000-0000-0000-0000-000000000005"))
        );
        assert!(object.get("userId").is_none());
        assert!(object.get("actorId").is_none());
    }
}
