use super::ApplicationEnv;
use crate::{
    repository::{
        NotificationsRepositoryConfig, NotificationsRepositoryImpl, TimelineRepositoryImpl,
    },
    service::{
        background_tasks::BackgroundTasks,
        broker::{BrokerConfig, Brokers},
        fanout_service::{FanoutService, FanoutServiceImpl},
        notifications_service::{NotificationsService, NotificationsServiceImpl},
    },
    streaming::EventStreamConfig,
};
use axum::extract::FromRef;
use sqlx::{postgres::PgPoolOptions, PgPool};
use std::sync::Arc;

#[derive(Clone, FromRef)]
pub struct ApplicationState {
    pub notifications_service: Arc<dyn NotificationsService>,
    pub fanout_service: Arc<dyn FanoutService>,
    pub brokers: Brokers,
    pub background_tasks: BackgroundTasks,
    pub event_stream_config: EventStreamConfig,
}

pub struct ApplicationStateToClose {
    pub db_pool: PgPool,
    pub brokers: Brokers,
    pub background_tasks: BackgroundTasks,
}

pub async fn create_state(
    env: &ApplicationEnv,
) -> anyhow::Result<(ApplicationState, ApplicationStateToClose)> {
    tracing::info!("connecting to database");
    let db_pool = PgPoolOptions::new()
        .max_connections(env.db_max_connections)
        .connect(&env.db_connection_string)
        .await?;

    tracing::info!("creating repositories");
    let config = NotificationsRepositoryConfig {
        follow_tx_max_attempts: env.follow_tx_max_attempts,
    };
    let notifications_repository = NotificationsRepositoryImpl::new(config, db_pool.clone());
    let notifications_repository = Arc::new(notifications_repository);

    let timeline_repository = TimelineRepositoryImpl::new(db_pool.clone());
    let timeline_repository = Arc::new(timeline_repository);

    tracing::info!("creating brokers");
    let config = BrokerConfig {
        channel_capacity: env.broker_channel_capacity,
    };
    let brokers = Brokers::new(config);

    tracing::info!("creating services");
    let notifications_service = NotificationsServiceImpl::new(notifications_repository.clone());
    let notifications_service = Arc::new(notifications_service);

    let fanout_service = FanoutServiceImpl::new(
        notifications_repository,
        timeline_repository,
        brokers.clone(),
    );
    let fanout_service = Arc::new(fanout_service);

    let background_tasks = BackgroundTasks::new();

    let event_stream_config = EventStreamConfig {
        ping_interval: env.stream_ping_interval,
    };

    let state = ApplicationState {
        notifications_service,
        fanout_service,
        brokers: brokers.clone(),
        background_tasks: background_tasks.clone(),
        event_stream_config,
    };
    let state_to_close = ApplicationStateToClose {
        db_pool,
        brokers,
        background_tasks,
    };

    Ok((state, state_to_close))
}
