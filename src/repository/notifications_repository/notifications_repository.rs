use super::{InsertedNotification, Notification};
use crate::{dto::NotificationVerb, repository::Error};
use axum::async_trait;
use uuid::Uuid;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait NotificationsRepository: Send + Sync {
    ///
    /// Inserts `follow` notification unless the same actor
    /// already produced one for the user.
    /// Check and insert run in a single serializable transaction.
    ///
    /// ### Returns
    /// - `Some` with inserted notification
    /// - `None` when notification already existed
    ///
    async fn insert_follow_if_absent(
        &self,
        user_id: Uuid,
        actor_id: Uuid,
    ) -> Result<Option<InsertedNotification>, Error>;

    ///
    /// Inserts `comment` notification for every subscriber of the post
    /// except the comment author, in one statement.
    ///
    async fn insert_for_post_subscribers(
        &self,
        actor_id: Uuid,
        comment_id: Uuid,
        post_id: Uuid,
    ) -> Result<Vec<InsertedNotification>, Error>;

    ///
    /// Inserts notification for every existing user
    /// whose username is in `usernames`, except the actor.
    /// Usernames that do not exist are skipped.
    ///
    async fn insert_for_mentioned_users(
        &self,
        actor_id: Uuid,
        verb: NotificationVerb,
        usernames: &[String],
        object_id: Uuid,
        target_id: Option<Uuid>,
    ) -> Result<Vec<InsertedNotification>, Error>;

    ///
    /// Finds all notifications of the user.
    /// Notifications are sorted descending by issue date.
    ///
    async fn find_many(&self, user_id: Uuid) -> Result<Vec<Notification>, Error>;

    ///
    /// Checks whether the most recent notification
    /// was issued after the user has last seen notifications.
    /// User without notifications has nothing unread.
    ///
    async fn has_unread(&self, user_id: Uuid) -> Result<bool, Error>;

    ///
    /// Moves user's notifications seen watermark to the current database time
    ///
    async fn update_seen_at(&self, user_id: Uuid) -> Result<(), Error>;
}
