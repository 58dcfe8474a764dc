use super::{
    entity::{InsertedNotificationEntity, NotificationFindEntity},
    InsertedNotification, Notification, NotificationsRepository, NotificationsRepositoryConfig,
};
use crate::{dto::NotificationVerb, repository::Error};
use axum::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

pub struct NotificationsRepositoryImpl {
    config: NotificationsRepositoryConfig,
    pool: PgPool,
}

impl NotificationsRepositoryImpl {
    pub fn new(config: NotificationsRepositoryConfig, pool: PgPool) -> Self {
        Self { config, pool }
    }

    async fn try_insert_follow_if_absent(
        &self,
        user_id: Uuid,
        actor_id: Uuid,
    ) -> Result<Option<InsertedNotification>, Error> {
        let mut transaction = self.pool.begin().await?;

        sqlx::query("SET TRANSACTION ISOLATION LEVEL SERIALIZABLE")
            .execute(&mut *transaction)
            .await
            .map_err(Error::from_transaction)?;

        let exists = sqlx::query_scalar::<_, bool>(
            r#"
            SELECT EXISTS (
                SELECT 1 FROM notifications
                WHERE user_id = $1
                    AND actor_id = $2
                    AND verb = $3
            )
            "#,
        )
        .bind(user_id)
        .bind(actor_id)
        .bind(NotificationVerb::Follow.as_ref())
        .fetch_one(&mut *transaction)
        .await
        .map_err(Error::from_transaction)?;

        if exists {
            transaction
                .commit()
                .await
                .map_err(Error::from_transaction)?;
            return Ok(None);
        }

        let inserted = sqlx::query_as::<_, InsertedNotificationEntity>(
            r#"
            INSERT INTO notifications (user_id, actor_id, verb)
            VALUES ($1, $2, $3)
            RETURNING id, user_id, issued_at
            "#,
        )
        .bind(user_id)
        .bind(actor_id)
        .bind(NotificationVerb::Follow.as_ref())
        .fetch_one(&mut *transaction)
        .await
        .map_err(Error::from_transaction)?;

        transaction
            .commit()
            .await
            .map_err(Error::from_transaction)?;

        Ok(Some(inserted.into()))
    }
}

#[async_trait]
impl NotificationsRepository for NotificationsRepositoryImpl {
    async fn insert_follow_if_absent(
        &self,
        user_id: Uuid,
        actor_id: Uuid,
    ) -> Result<Option<InsertedNotification>, Error> {
        let mut attempt = 1;
        loop {
            match self.try_insert_follow_if_absent(user_id, actor_id).await {
                Err(Error::SerializationFailure) if attempt < self.config.follow_tx_max_attempts => {
                    tracing::debug!(attempt, "follow notification transaction conflict, retrying");
                    attempt += 1;
                }
                // Concurrent insert won the race against unique index
                Err(err) if err.is_unique_violation() => return Ok(None),
                result => return result,
            }
        }
    }

    async fn insert_for_post_subscribers(
        &self,
        actor_id: Uuid,
        comment_id: Uuid,
        post_id: Uuid,
    ) -> Result<Vec<InsertedNotification>, Error> {
        let inserted = sqlx::query_as::<_, InsertedNotificationEntity>(
            r#"
            INSERT INTO notifications (user_id, actor_id, verb, object_id, target_id)
            SELECT user_id, $1, $2, $3, $4
            FROM subscriptions
            WHERE user_id != $1
                AND post_id = $4
            RETURNING id, user_id, issued_at
            "#,
        )
        .bind(actor_id)
        .bind(NotificationVerb::Comment.as_ref())
        .bind(comment_id)
        .bind(post_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(inserted.into_iter().map(InsertedNotification::from).collect())
    }

    async fn insert_for_mentioned_users(
        &self,
        actor_id: Uuid,
        verb: NotificationVerb,
        usernames: &[String],
        object_id: Uuid,
        target_id: Option<Uuid>,
    ) -> Result<Vec<InsertedNotification>, Error> {
        let inserted = sqlx::query_as::<_, InsertedNotificationEntity>(
            r#"
            INSERT INTO notifications (user_id, actor_id, verb, object_id, target_id)
            SELECT id, $1, $2, $3, $4
            FROM users
            WHERE id != $1
                AND username = ANY($5)
            RETURNING id, user_id, issued_at
            "#,
        )
        .bind(actor_id)
        .bind(verb.as_ref())
        .bind(object_id)
        .bind(target_id)
        .bind(usernames)
        .fetch_all(&self.pool)
        .await?;

        Ok(inserted.into_iter().map(InsertedNotification::from).collect())
    }

    async fn find_many(&self, user_id: Uuid) -> Result<Vec<Notification>, Error> {
        let entities = sqlx::query_as::<_, NotificationFindEntity>(
            r#"
            SELECT
                notifications.id,
                notifications.user_id,
                notifications.actor_id,
                actors.username AS actor_username,
                notifications.verb,
                notifications.object_id,
                notifications.target_id,
                notifications.issued_at,
                COALESCE(notifications.issued_at <= users.notifications_seen_at, false) AS read
            FROM notifications
            INNER JOIN users AS actors ON notifications.actor_id = actors.id
            INNER JOIN users ON notifications.user_id = users.id
            WHERE notifications.user_id = $1
            ORDER BY notifications.issued_at DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        entities.into_iter().map(Notification::try_from).collect()
    }

    async fn has_unread(&self, user_id: Uuid) -> Result<bool, Error> {
        let unread = sqlx::query_scalar::<_, bool>(
            r#"
            SELECT COALESCE(notifications.issued_at > users.notifications_seen_at, true) AS unread
            FROM notifications
            INNER JOIN users ON notifications.user_id = users.id
            WHERE notifications.user_id = $1
            ORDER BY notifications.issued_at DESC
            LIMIT 1
            "#,
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(unread.unwrap_or(false))
    }

    async fn update_seen_at(&self, user_id: Uuid) -> Result<(), Error> {
        sqlx::query(
            r#"
            UPDATE users SET
                notifications_seen_at = now()
            WHERE id = $1
            "#,
        )
        .bind(user_id)
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}
