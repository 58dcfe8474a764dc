use crate::{dto::output, error::Error};
use axum::async_trait;
use uuid::Uuid;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait NotificationsService: Send + Sync {
    ///
    /// Find all notifications that belong to the user, newest first.
    /// Every notification tells whether the user has seen it.
    ///
    /// ### Errors
    /// - [Error::Database] when database query fails
    ///
    async fn find_notifications(&self, user_id: Uuid) -> Result<Vec<output::Notification>, Error>;

    ///
    /// Checks whether user received a notification since
    /// notifications were last seen.
    ///
    /// ### Errors
    /// - [Error::Database] when database query fails
    ///
    async fn has_unread_notifications(&self, user_id: Uuid) -> Result<bool, Error>;

    ///
    /// Marks every notification of the user issued until now as seen.
    ///
    /// ### Errors
    /// - [Error::Database] when database query fails
    ///
    async fn mark_notifications_seen(&self, user_id: Uuid) -> Result<(), Error>;
}
