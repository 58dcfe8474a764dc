use super::FanoutService;
use crate::{dto::input, service::background_tasks::BackgroundTasks};
use std::sync::Arc;

///
/// Schedules every fanout the event requires as separate background tasks,
/// so one failing pathway does not stop the others.
///
pub fn dispatch_event(
    fanout_service: &Arc<dyn FanoutService>,
    background_tasks: &BackgroundTasks,
    event: input::DomainEvent,
) {
    match event {
        input::DomainEvent::Follow {
            follower,
            followee_id,
        } => {
            tracing::info!(follower_id = %follower.id, %followee_id, "received follow event");

            let fanout_service = fanout_service.clone();
            background_tasks.spawn("follow_fanout", async move {
                fanout_service.follow_fanout(&follower, followee_id).await
            });
        }
        input::DomainEvent::Comment { comment } => {
            tracing::info!(
                comment_id = %comment.id,
                post_id = %comment.post_id,
                "received comment event"
            );

            fanout_service.broadcast_comment(&comment);

            let comment = Arc::new(comment);

            let service = fanout_service.clone();
            let comment_clone = comment.clone();
            background_tasks.spawn("comment_fanout", async move {
                service.comment_fanout(&comment_clone).await
            });

            let service = fanout_service.clone();
            background_tasks.spawn("comment_mention_fanout", async move {
                service.comment_mention_fanout(&comment).await
            });
        }
        input::DomainEvent::Post { post } => {
            tracing::info!(post_id = %post.id, "received post event");

            let post = Arc::new(post);

            let service = fanout_service.clone();
            let post_clone = post.clone();
            background_tasks.spawn("post_mention_fanout", async move {
                service.post_mention_fanout(&post_clone).await
            });

            let service = fanout_service.clone();
            background_tasks.spawn("feed_fanout", async move {
                service.feed_fanout(&post).await
            });
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{error::Error, repository, service::fanout_service::MockFanoutService};
    use std::time::Duration;
    use time::macros::datetime;
    use uuid::Uuid;

    #[tokio::test]
    async fn dispatch_event_follow_fanout_scheduled() {
        let mut fanout_service = MockFanoutService::new();
        fanout_service
            .expect_follow_fanout()
            .withf(|follower, followee_id| {
                follower.id == Uuid::from_u128(1) && *followee_id == Uuid::from_u128(2)
            })
            .times(1)
            .returning(|_, _| Ok(()));
        let fanout_service: Arc<dyn FanoutService> = Arc::new(fanout_service);
        let background_tasks = BackgroundTasks::new();

        dispatch_event(
            &fanout_service,
            &background_tasks,
            input::DomainEvent::Follow {
                follower: input::Actor {
                    id: Uuid::from_u128(1),
                    username: "alice".to_string(),
                },
                followee_id: Uuid::from_u128(2),
            },
        );
        background_tasks.close(Duration::from_secs(1)).await;
    }

    #[tokio::test]
    async fn dispatch_event_comment_every_pathway_scheduled() {
        let mut fanout_service = MockFanoutService::new();
        fanout_service
            .expect_broadcast_comment()
            .times(1)
            .return_const(());
        fanout_service
            .expect_comment_fanout()
            .times(1)
            .returning(|_| Err(Error::Database(repository::Error::SerializationFailure)));
        fanout_service
            .expect_comment_mention_fanout()
            .times(1)
            .returning(|_| Ok(()));
        let fanout_service: Arc<dyn FanoutService> = Arc::new(fanout_service);
        let background_tasks = BackgroundTasks::new();

        dispatch_event(
            &fanout_service,
            &background_tasks,
            input::DomainEvent::Comment {
                comment: input::Comment {
                    id: Uuid::from_u128(20),
                    post_id: Uuid::from_u128(10),
                    user_id: Uuid::from_u128(1),
                    username: "alice".to_string(),
                    content: "@bob hi".to_string(),
                    created_at: datetime!(2024-08-01 10:00:00 UTC),
                },
            },
        );
        background_tasks.close(Duration::from_secs(1)).await;
    }

    #[tokio::test]
    async fn dispatch_event_post_mentions_and_feed_scheduled() {
        let mut fanout_service = MockFanoutService::new();
        fanout_service
            .expect_post_mention_fanout()
            .times(1)
            .returning(|_| Ok(()));
        fanout_service
            .expect_feed_fanout()
            .times(1)
            .returning(|_| Ok(()));
        fanout_service.expect_broadcast_comment().never();
        let fanout_service: Arc<dyn FanoutService> = Arc::new(fanout_service);
        let background_tasks = BackgroundTasks::new();

        dispatch_event(
            &fanout_service,
            &background_tasks,
            input::DomainEvent::Post {
                post: input::Post {
                    id: Uuid::from_u128(10),
                    user_id: Uuid::from_u128(1),
                    username: "alice".to_string(),
                    content: "hello".to_string(),
                    created_at: datetime!(2024-08-01 10:00:00 UTC),
                },
            },
        );
        background_tasks.close(Duration::from_secs(1)).await;
    }
}
