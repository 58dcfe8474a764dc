use super::{collect_mentions, FanoutService};
use crate::{
    dto::{input, output, NotificationVerb},
    error::Error,
    repository::{InsertedNotification, NotificationsRepository, TimelineRepository},
    service::broker::Brokers,
};
use axum::async_trait;
use std::sync::Arc;
use uuid::Uuid;

/// Part of the notification shared by every recipient
struct NotificationOrigin<'a> {
    actor_id: Uuid,
    actor_username: &'a str,
    verb: NotificationVerb,
    object_id: Option<Uuid>,
    target_id: Option<Uuid>,
}

pub struct FanoutServiceImpl {
    notifications_repository: Arc<dyn NotificationsRepository>,
    timeline_repository: Arc<dyn TimelineRepository>,
    brokers: Brokers,
}

impl FanoutServiceImpl {
    pub fn new(
        notifications_repository: Arc<dyn NotificationsRepository>,
        timeline_repository: Arc<dyn TimelineRepository>,
        brokers: Brokers,
    ) -> Self {
        Self {
            notifications_repository,
            timeline_repository,
            brokers,
        }
    }

    fn publish_notifications(
        &self,
        inserted_notifications: Vec<InsertedNotification>,
        origin: NotificationOrigin<'_>,
    ) {
        for inserted_notification in inserted_notifications {
            let user_id = inserted_notification.user_id;
            let notification = output::Notification {
                id: inserted_notification.id,
                user_id,
                actor_id: origin.actor_id,
                verb: origin.verb,
                object_id: origin.object_id,
                target_id: origin.target_id,
                issued_at: inserted_notification.issued_at,
                read: false,
                actor_username: origin.actor_username.to_string(),
            };

            self.brokers.notifications.publish(&user_id, notification);
        }
    }

    async fn mention_fanout(
        &self,
        content: &str,
        object_id: Uuid,
        origin: NotificationOrigin<'_>,
    ) -> Result<(), Error> {
        let usernames = collect_mentions(content);
        if usernames.is_empty() {
            tracing::debug!("no mentions");
            return Ok(());
        }

        tracing::info!(?usernames, "creating mention notifications");
        let inserted_notifications = self
            .notifications_repository
            .insert_for_mentioned_users(
                origin.actor_id,
                origin.verb,
                &usernames,
                object_id,
                origin.target_id,
            )
            .await?;
        tracing::info!(
            count = inserted_notifications.len(),
            "created mention notifications"
        );

        self.publish_notifications(inserted_notifications, origin);

        Ok(())
    }
}

#[async_trait]
impl FanoutService for FanoutServiceImpl {
    #[tracing::instrument(
        name = "Follow fanout",
        skip_all,
        fields(follower_id = %follower.id, followee_id = %followee_id)
    )]
    async fn follow_fanout(
        &self,
        follower: &input::Actor,
        followee_id: Uuid,
    ) -> Result<(), Error> {
        tracing::info!("creating follow notification");

        let inserted_notification = self
            .notifications_repository
            .insert_follow_if_absent(followee_id, follower.id)
            .await?;

        let Some(inserted_notification) = inserted_notification else {
            tracing::info!("follow notification already exists");
            return Ok(());
        };
        tracing::info!(id = %inserted_notification.id, "created follow notification");

        let origin = NotificationOrigin {
            actor_id: follower.id,
            actor_username: &follower.username,
            verb: NotificationVerb::Follow,
            object_id: None,
            target_id: None,
        };
        self.publish_notifications(vec![inserted_notification], origin);

        Ok(())
    }

    #[tracing::instrument(
        name = "Comment fanout",
        skip_all,
        fields(comment_id = %comment.id, post_id = %comment.post_id)
    )]
    async fn comment_fanout(&self, comment: &input::Comment) -> Result<(), Error> {
        tracing::info!("creating comment notifications");

        let inserted_notifications = self
            .notifications_repository
            .insert_for_post_subscribers(comment.user_id, comment.id, comment.post_id)
            .await?;
        tracing::info!(
            count = inserted_notifications.len(),
            "created comment notifications"
        );

        let origin = NotificationOrigin {
            actor_id: comment.user_id,
            actor_username: &comment.username,
            verb: NotificationVerb::Comment,
            object_id: Some(comment.id),
            target_id: Some(comment.post_id),
        };
        self.publish_notifications(inserted_notifications, origin);

        Ok(())
    }

    #[tracing::instrument(
        name = "Comment mention fanout",
        skip_all,
        fields(comment_id = %comment.id, post_id = %comment.post_id)
    )]
    async fn comment_mention_fanout(&self, comment: &input::Comment) -> Result<(), Error> {
        let origin = NotificationOrigin {
            actor_id: comment.user_id,
            actor_username: &comment.username,
            verb: NotificationVerb::CommentMention,
            object_id: Some(comment.id),
            target_id: Some(comment.post_id),
        };

        self.mention_fanout(&comment.content, comment.id, origin).await
    }

    #[tracing::instrument(name = "Post mention fanout", skip_all, fields(post_id = %post.id))]
    async fn post_mention_fanout(&self, post: &input::Post) -> Result<(), Error> {
        let origin = NotificationOrigin {
            actor_id: post.user_id,
            actor_username: &post.username,
            verb: NotificationVerb::PostMention,
            object_id: Some(post.id),
            target_id: None,
        };

        self.mention_fanout(&post.content, post.id, origin).await
    }

    #[tracing::instrument(name = "Feed fanout", skip_all, fields(post_id = %post.id))]
    async fn feed_fanout(&self, post: &input::Post) -> Result<(), Error> {
        tracing::info!("creating timeline items");

        let inserted_items = self
            .timeline_repository
            .insert_for_followers(post.id, post.user_id)
            .await?;
        tracing::info!(count = inserted_items.len(), "created timeline items");

        for inserted_item in inserted_items {
            let user_id = inserted_item.user_id;
            let timeline_item = output::TimelineItem {
                id: inserted_item.id,
                user_id,
                post: output::TimelinePost {
                    id: post.id,
                    content: post.content.clone(),
                    created_at: post.created_at,
                    username: post.username.clone(),
                },
            };

            self.brokers.feed.publish(&user_id, timeline_item);
        }

        Ok(())
    }

    fn broadcast_comment(&self, comment: &input::Comment) {
        let watchers = self
            .brokers
            .comments
            .publish(&comment.post_id, output::Comment::from(comment.clone()));

        tracing::debug!(comment_id = %comment.id, watchers, "broadcasted comment");
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{
        repository::{
            self, InsertedTimelineItem, MockNotificationsRepository, MockTimelineRepository,
        },
        service::broker::{BrokerConfig, Subscription},
    };
    use std::time::Duration;
    use time::{macros::datetime, OffsetDateTime};

    const ALICE: Uuid = Uuid::from_u128(1);
    const BOB: Uuid = Uuid::from_u128(2);
    const CAROL: Uuid = Uuid::from_u128(3);
    const POST: Uuid = Uuid::from_u128(10);
    const COMMENT: Uuid = Uuid::from_u128(20);

    #[tokio::test]
    async fn follow_fanout_inserted_notification_published() {
        let mut notifications_repository = MockNotificationsRepository::new();
        notifications_repository
            .expect_insert_follow_if_absent()
            .withf(|user_id, actor_id| *user_id == BOB && *actor_id == ALICE)
            .times(1)
            .returning(|user_id, _| Ok(Some(inserted_notification(100, user_id))));
        let brokers = create_brokers();
        let mut subscription = brokers.notifications.subscribe(BOB);
        let service = create_service(
            notifications_repository,
            MockTimelineRepository::new(),
            &brokers,
        );

        let result = service.follow_fanout(&actor(ALICE, "alice"), BOB).await;

        assert!(result.is_ok());
        let notification = receive(&mut subscription).await.unwrap();
        assert_eq!(notification.id, Uuid::from_u128(100));
        assert_eq!(notification.user_id, BOB);
        assert_eq!(notification.actor_id, ALICE);
        assert_eq!(notification.actor_username, "alice");
        assert_eq!(notification.verb, NotificationVerb::Follow);
        assert_eq!(notification.object_id, None);
        assert_eq!(notification.target_id, None);
        assert!(!notification.read);
    }

    #[tokio::test]
    async fn follow_fanout_existing_notification_not_published() {
        let mut notifications_repository = MockNotificationsRepository::new();
        notifications_repository
            .expect_insert_follow_if_absent()
            .times(1)
            .returning(|_, _| Ok(None));
        let brokers = create_brokers();
        let mut subscription = brokers.notifications.subscribe(BOB);
        let service = create_service(
            notifications_repository,
            MockTimelineRepository::new(),
            &brokers,
        );

        let result = service.follow_fanout(&actor(ALICE, "alice"), BOB).await;

        assert!(result.is_ok());
        assert!(receive(&mut subscription).await.is_none());
    }

    #[tokio::test]
    async fn follow_fanout_database_error_returned() {
        let mut notifications_repository = MockNotificationsRepository::new();
        notifications_repository
            .expect_insert_follow_if_absent()
            .returning(|_, _| Err(repository::Error::SerializationFailure));
        let brokers = create_brokers();
        let service = create_service(
            notifications_repository,
            MockTimelineRepository::new(),
            &brokers,
        );

        let result = service.follow_fanout(&actor(ALICE, "alice"), BOB).await;

        assert!(matches!(result, Err(Error::Database(_))));
    }

    #[tokio::test]
    async fn comment_fanout_every_inserted_notification_published() {
        let mut notifications_repository = MockNotificationsRepository::new();
        notifications_repository
            .expect_insert_for_post_subscribers()
            .withf(|actor_id, comment_id, post_id| {
                *actor_id == ALICE && *comment_id == COMMENT && *post_id == POST
            })
            .times(1)
            .returning(|_, _, _| {
                Ok(vec![
                    inserted_notification(100, BOB),
                    inserted_notification(101, CAROL),
                ])
            });
        let brokers = create_brokers();
        let mut bob_subscription = brokers.notifications.subscribe(BOB);
        let mut carol_subscription = brokers.notifications.subscribe(CAROL);
        let mut alice_subscription = brokers.notifications.subscribe(ALICE);
        let service = create_service(
            notifications_repository,
            MockTimelineRepository::new(),
            &brokers,
        );

        let result = service.comment_fanout(&comment("nice post")).await;

        assert!(result.is_ok());
        let subscriptions = [(&mut bob_subscription, 100), (&mut carol_subscription, 101)];
        for (subscription, id) in subscriptions {
            let notification = receive(subscription).await.unwrap();
            assert_eq!(notification.id, Uuid::from_u128(id));
            assert_eq!(notification.verb, NotificationVerb::Comment);
            assert_eq!(notification.actor_id, ALICE);
            assert_eq!(notification.object_id, Some(COMMENT));
            assert_eq!(notification.target_id, Some(POST));
        }
        assert!(receive(&mut alice_subscription).await.is_none());
    }

    #[tokio::test]
    async fn post_mention_fanout_no_mentions_database_not_called() {
        let mut notifications_repository = MockNotificationsRepository::new();
        notifications_repository
            .expect_insert_for_mentioned_users()
            .never();
        let brokers = create_brokers();
        let service = create_service(
            notifications_repository,
            MockTimelineRepository::new(),
            &brokers,
        );

        let result = service
            .post_mention_fanout(&post("no mentions, just e@mail.com"))
            .await;

        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn post_mention_fanout_existing_users_published() {
        let mut notifications_repository = MockNotificationsRepository::new();
        notifications_repository
            .expect_insert_for_mentioned_users()
            .withf(|actor_id, verb, usernames, object_id, target_id| {
                *actor_id == CAROL
                    && *verb == NotificationVerb::PostMention
                    && usernames.to_vec() == vec!["alice".to_string(), "bob".to_string()]
                    && *object_id == POST
                    && target_id.is_none()
            })
            .times(1)
            .returning(|_, _, _, _, _| Ok(vec![inserted_notification(100, ALICE)]));
        let brokers = create_brokers();
        let mut alice_subscription = brokers.notifications.subscribe(ALICE);
        let service = create_service(
            notifications_repository,
            MockTimelineRepository::new(),
            &brokers,
        );

        let result = service.post_mention_fanout(&post("hello @alice and @bob!")).await;

        assert!(result.is_ok());
        let notification = receive(&mut alice_subscription).await.unwrap();
        assert_eq!(notification.verb, NotificationVerb::PostMention);
        assert_eq!(notification.actor_username, "carol");
        assert_eq!(notification.object_id, Some(POST));
        assert_eq!(notification.target_id, None);
    }

    #[tokio::test]
    async fn comment_mention_fanout_target_is_post() {
        let mut notifications_repository = MockNotificationsRepository::new();
        notifications_repository
            .expect_insert_for_mentioned_users()
            .withf(|actor_id, verb, usernames, object_id, target_id| {
                *actor_id == ALICE
                    && *verb == NotificationVerb::CommentMention
                    && usernames.to_vec() == vec!["bob".to_string()]
                    && *object_id == COMMENT
                    && *target_id == Some(POST)
            })
            .times(1)
            .returning(|_, _, _, _, _| Ok(vec![inserted_notification(100, BOB)]));
        let brokers = create_brokers();
        let mut bob_subscription = brokers.notifications.subscribe(BOB);
        let service = create_service(
            notifications_repository,
            MockTimelineRepository::new(),
            &brokers,
        );

        let result = service.comment_mention_fanout(&comment("@bob look")).await;

        assert!(result.is_ok());
        let notification = receive(&mut bob_subscription).await.unwrap();
        assert_eq!(notification.verb, NotificationVerb::CommentMention);
        assert_eq!(notification.object_id, Some(COMMENT));
        assert_eq!(notification.target_id, Some(POST));
    }

    #[tokio::test]
    async fn feed_fanout_followers_received_timeline_item() {
        let mut timeline_repository = MockTimelineRepository::new();
        timeline_repository
            .expect_insert_for_followers()
            .withf(|post_id, author_id| *post_id == POST && *author_id == CAROL)
            .times(1)
            .returning(|_, _| {
                Ok(vec![
                    InsertedTimelineItem {
                        id: Uuid::from_u128(200),
                        user_id: ALICE,
                    },
                    InsertedTimelineItem {
                        id: Uuid::from_u128(201),
                        user_id: BOB,
                    },
                ])
            });
        let brokers = create_brokers();
        let mut alice_subscription = brokers.feed.subscribe(ALICE);
        let mut bob_subscription = brokers.feed.subscribe(BOB);
        let service = create_service(
            MockNotificationsRepository::new(),
            timeline_repository,
            &brokers,
        );

        let result = service.feed_fanout(&post("my first post")).await;

        assert!(result.is_ok());
        let item = receive(&mut alice_subscription).await.unwrap();
        assert_eq!(item.id, Uuid::from_u128(200));
        assert_eq!(item.post.id, POST);
        assert_eq!(item.post.username, "carol");
        assert_eq!(item.post.content, "my first post");
        let item = receive(&mut bob_subscription).await.unwrap();
        assert_eq!(item.id, Uuid::from_u128(201));
    }

    #[tokio::test]
    async fn broadcast_comment_post_watchers_received_comment() {
        let brokers = create_brokers();
        let mut watcher = brokers.comments.subscribe(POST);
        let mut other_post_watcher = brokers.comments.subscribe(Uuid::from_u128(11));
        let service = create_service(
            MockNotificationsRepository::new(),
            MockTimelineRepository::new(),
            &brokers,
        );

        service.broadcast_comment(&comment("first"));

        let comment = receive(&mut watcher).await.unwrap();
        assert_eq!(comment.id, COMMENT);
        assert_eq!(comment.content, "first");
        assert_eq!(comment.username, "alice");
        assert!(receive(&mut other_post_watcher).await.is_none());
    }

    fn create_brokers() -> Brokers {
        Brokers::new(BrokerConfig {
            channel_capacity: 16,
        })
    }

    fn create_service(
        notifications_repository: MockNotificationsRepository,
        timeline_repository: MockTimelineRepository,
        brokers: &Brokers,
    ) -> FanoutServiceImpl {
        FanoutServiceImpl::new(
            Arc::new(notifications_repository),
            Arc::new(timeline_repository),
            brokers.clone(),
        )
    }

    fn inserted_notification(id: u128, user_id: Uuid) -> InsertedNotification {
        InsertedNotification {
            id: Uuid::from_u128(id),
            user_id,
            issued_at: OffsetDateTime::now_utc(),
        }
    }

    fn actor(id: Uuid, username: &str) -> input::Actor {
        input::Actor {
            id,
            username: username.to_string(),
        }
    }

    fn comment(content: &str) -> input::Comment {
        input::Comment {
            id: COMMENT,
            post_id: POST,
            user_id: ALICE,
            username: "alice".to_string(),
            content: content.to_string(),
            created_at: datetime!(2024-08-01 10:00:00 UTC),
        }
    }

    fn post(content: &str) -> input::Post {
        input::Post {
            id: POST,
            user_id: CAROL,
            username: "carol".to_string(),
            content: content.to_string(),
            created_at: datetime!(2024-08-01 10:00:00 UTC),
        }
    }

    async fn receive<T>(subscription: &mut Subscription<Uuid, T>) -> Option<Arc<T>> {
        tokio::time::timeout(Duration::from_millis(50), subscription.recv())
            .await
            .ok()
            .flatten()
    }
}
