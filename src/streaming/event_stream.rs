use super::StreamFrame;
use crate::service::broker::Subscription;
use axum::{
    body::Body,
    http::{
        header::{ACCEPT, CACHE_CONTROL, CONTENT_TYPE},
        HeaderMap, HeaderValue,
    },
    response::{IntoResponse, Response},
};
use futures::{stream, Stream, StreamExt};
use serde::Serialize;
use std::{convert::Infallible, fmt::Display, hash::Hash, time::Duration};
use tracing::Instrument;

pub const EVENT_STREAM_CONTENT_TYPE: &str = "text/event-stream";

#[derive(Debug, Clone, Copy)]
pub struct EventStreamConfig {
    /// Idle time after which ping frame is written
    pub ping_interval: Duration,
}

///
/// Checks whether any `Accept` header asks for an event stream
///
pub fn accepts_event_stream(headers: &HeaderMap) -> bool {
    headers
        .get_all(ACCEPT)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .any(|value| value.contains(EVENT_STREAM_CONTENT_TYPE))
}

///
/// Frames written for the subscription.
///
/// Every delivered event becomes a data frame and `Ping` is produced when
/// nothing was delivered for `ping_interval`. Finishes when the broker closes.
///
pub fn event_frames<K, T>(
    subscription: Subscription<K, T>,
    ping_interval: Duration,
) -> impl Stream<Item = StreamFrame>
where
    K: Eq + Hash + Display,
    T: Serialize,
{
    let span = tracing::info_span!("Event stream", key = %subscription.key());

    stream::unfold(subscription, move |mut subscription| {
        let next_frame = async move {
            let frame = match tokio::time::timeout(ping_interval, subscription.recv()).await {
                Ok(Some(event)) => StreamFrame::from_event(event.as_ref()),
                Ok(None) => {
                    tracing::info!("subscription closed");
                    subscription.unsubscribe();
                    return None;
                }
                Err(_) => {
                    tracing::trace!("ping");
                    StreamFrame::Ping
                }
            };

            Some((frame, subscription))
        };

        next_frame.instrument(span.clone())
    })
}

///
/// Streaming response writing every frame as a separate chunk.
/// Subscription is released when client disconnects and the body is dropped.
///
pub fn event_stream_response<K, T>(
    subscription: Subscription<K, T>,
    config: EventStreamConfig,
) -> Response
where
    K: Eq + Hash + Display + Send + 'static,
    T: Serialize + Send + Sync + 'static,
{
    tracing::info!(key = %subscription.key(), "stream opened");

    let frames = event_frames(subscription, config.ping_interval)
        .map(|frame| Ok::<_, Infallible>(frame.encode()));

    (
        [
            (CONTENT_TYPE, HeaderValue::from_static(EVENT_STREAM_CONTENT_TYPE)),
            (CACHE_CONTROL, HeaderValue::from_static("no-cache")),
        ],
        Body::from_stream(frames),
    )
        .into_response()
}
