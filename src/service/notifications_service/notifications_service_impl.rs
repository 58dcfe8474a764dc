use super::NotificationsService;
use crate::{dto::output, error::Error, repository::NotificationsRepository};
use axum::async_trait;
use std::sync::Arc;
use uuid::Uuid;

pub struct NotificationsServiceImpl {
    repository: Arc<dyn NotificationsRepository>,
}

impl NotificationsServiceImpl {
    pub fn new(repository: Arc<dyn NotificationsRepository>) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl NotificationsService for NotificationsServiceImpl {
    async fn find_notifications(&self, user_id: Uuid) -> Result<Vec<output::Notification>, Error> {
        tracing::info!("finding notifications");

        let notifications = self.repository.find_many(user_id).await?;
        tracing::info!(count = notifications.len(), "found notifications");

        let notifications = notifications
            .into_iter()
            .map(output::Notification::from)
            .collect();

        Ok(notifications)
    }

    async fn has_unread_notifications(&self, user_id: Uuid) -> Result<bool, Error> {
        tracing::info!("checking unread notifications");

        let has_unread = self.repository.has_unread(user_id).await?;
        tracing::info!(has_unread, "checked unread notifications");

        Ok(has_unread)
    }

    async fn mark_notifications_seen(&self, user_id: Uuid) -> Result<(), Error> {
        tracing::info!("updating notifications seen at");

        self.repository.update_seen_at(user_id).await?;
        tracing::info!("updated notifications seen at");

        Ok(())
    }
}
