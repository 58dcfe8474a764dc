mod application;
mod auth;
mod dto;
mod error;
mod repository;
mod routing;
mod service;
mod streaming;

use application::ApplicationEnv;
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    #[cfg(debug_assertions)]
    {
        // Ignore error because .env file is not required
        // as long as env variables are set.
        let _ = dotenvy::dotenv();
    }

    let env = ApplicationEnv::parse()?;

    application::setup_tracing(&env)?;

    let (state, state_to_close) = application::create_state(&env).await?;
    let middleware = application::create_middleware(&env);
    let app = application::create_application(state, middleware);

    tracing::info!(address = %env.bind_address, "starting server");
    let listener = TcpListener::bind(env.bind_address).await?;
    let result = axum::serve(listener, app)
        .with_graceful_shutdown(application::shutdown_signal(state_to_close.brokers.clone()))
        .await;
    if let Err(err) = &result {
        tracing::error!(%err, "server failed");
    }

    application::close(state_to_close, env.shutdown_timeout).await;
    tracing::info!("server stopped");

    result?;

    Ok(())
}
