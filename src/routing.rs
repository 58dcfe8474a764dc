use crate::{
    application::{ApplicationMiddleware, ApplicationState},
    auth::{self, Role, User},
    dto::{input, output},
    error::Error,
    service::{
        background_tasks::BackgroundTasks,
        broker::Brokers,
        fanout_service::{self, FanoutService},
        notifications_service::NotificationsService,
    },
    streaming::{self, EventStreamConfig},
};
use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Extension, Json, Router,
};
use std::sync::Arc;
use uuid::Uuid;

pub fn routing(application_middleware: &ApplicationMiddleware) -> Router<ApplicationState> {
    Router::new()
        .route("/api/v1/notifications", get(get_notifications))
        .route("/api/v1/notifications/unread", get(has_unread_notifications))
        .route("/api/v1/feed", get(stream_feed))
        .route("/api/v1/posts/:post_id/comments", get(stream_comments))
        .route(
            "/api/v1/events",
            post(post_event).layer(application_middleware.body_limit.clone()),
        )
        .route_layer(application_middleware.auth.clone())
}

async fn get_notifications(
    State(notifications_service): State<Arc<dyn NotificationsService>>,
    State(brokers): State<Brokers>,
    State(background_tasks): State<BackgroundTasks>,
    State(event_stream_config): State<EventStreamConfig>,
    Extension(user): Extension<User>,
    headers: HeaderMap,
) -> Result<Response, Error> {
    if streaming::accepts_event_stream(&headers) {
        let subscription = brokers.notifications.subscribe(user.id);
        return Ok(streaming::event_stream_response(
            subscription,
            event_stream_config,
        ));
    }

    let notifications: Vec<output::Notification> =
        notifications_service.find_notifications(user.id).await?;

    let user_id = user.id;
    background_tasks.spawn("mark_notifications_seen", async move {
        notifications_service.mark_notifications_seen(user_id).await
    });

    Ok(Json(notifications).into_response())
}

async fn has_unread_notifications(
    State(notifications_service): State<Arc<dyn NotificationsService>>,
    Extension(user): Extension<User>,
) -> Result<Json<bool>, Error> {
    let has_unread = notifications_service
        .has_unread_notifications(user.id)
        .await?;

    Ok(Json(has_unread))
}

async fn stream_feed(
    State(brokers): State<Brokers>,
    State(event_stream_config): State<EventStreamConfig>,
    Extension(user): Extension<User>,
    headers: HeaderMap,
) -> Result<Response, Error> {
    if !streaming::accepts_event_stream(&headers) {
        return Err(Error::StreamingNotAccepted);
    }

    let subscription = brokers.feed.subscribe(user.id);

    Ok(streaming::event_stream_response(
        subscription,
        event_stream_config,
    ))
}

async fn stream_comments(
    State(brokers): State<Brokers>,
    State(event_stream_config): State<EventStreamConfig>,
    Path(post_id): Path<Uuid>,
    headers: HeaderMap,
) -> Result<Response, Error> {
    if !streaming::accepts_event_stream(&headers) {
        return Err(Error::StreamingNotAccepted);
    }

    let subscription = brokers.comments.subscribe(post_id);

    Ok(streaming::event_stream_response(
        subscription,
        event_stream_config,
    ))
}

async fn post_event(
    State(fanout_service): State<Arc<dyn FanoutService>>,
    State(background_tasks): State<BackgroundTasks>,
    Extension(user): Extension<User>,
    Json(event): Json<input::DomainEvent>,
) -> Result<StatusCode, Error> {
    auth::require_all_roles(&user, &[Role::ProduceEvents])?;

    fanout_service::dispatch_event(&fanout_service, &background_tasks, event);

    Ok(StatusCode::ACCEPTED)
}
