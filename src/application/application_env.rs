use crate::auth::util::{parse_jwt_algorithms, parse_jwt_key};
use anyhow::anyhow;
use jsonwebtoken::{Algorithm, DecodingKey};
use std::{net::SocketAddr, str::FromStr, time::Duration};

pub struct ApplicationEnv {
    pub log_directory: String,
    pub log_filename: String,

    pub bind_address: SocketAddr,

    pub db_connection_string: String,
    pub db_max_connections: u32,

    pub max_http_content_len: usize,

    /// Algorithms must belong to the same family
    pub jwt_algorithms: Vec<Algorithm>,
    pub jwt_key: DecodingKey,

    pub broker_channel_capacity: usize,
    pub stream_ping_interval: Duration,

    pub follow_tx_max_attempts: u32,

    pub shutdown_timeout: Duration,
}

impl ApplicationEnv {
    pub fn parse() -> anyhow::Result<Self> {
        let log_directory = Self::env_var("NAKAMA_NOTIFIER_LOG_DIRECTORY")?;
        let log_filename = Self::env_var("NAKAMA_NOTIFIER_LOG_FILENAME")?;
        let bind_address = Self::parsed_env_var("NAKAMA_NOTIFIER_BIND_ADDRESS")?;
        let db_connection_string = Self::env_var("NAKAMA_NOTIFIER_DB_CONNECTION_STRING")?;
        let db_max_connections = Self::parsed_env_var("NAKAMA_NOTIFIER_DB_MAX_CONNECTIONS")?;
        let max_http_content_len = Self::parsed_env_var("NAKAMA_NOTIFIER_MAX_HTTP_CONTENT_LEN")?;
        let jwt_algorithms =
            parse_jwt_algorithms(&Self::env_var("NAKAMA_NOTIFIER_JWT_ALGORITHMS")?)?;
        let jwt_algorithm = jwt_algorithms.first().ok_or(anyhow!(
            "NAKAMA_NOTIFIER_JWT_ALGORITHMS need to contain at least one algorithm"
        ))?;
        let jwt_key = parse_jwt_key(jwt_algorithm, &Self::env_var("NAKAMA_NOTIFIER_JWT_KEY")?)?;
        let broker_channel_capacity =
            Self::parsed_env_var("NAKAMA_NOTIFIER_BROKER_CHANNEL_CAPACITY")?;
        if broker_channel_capacity == 0 {
            return Err(anyhow!(
                "NAKAMA_NOTIFIER_BROKER_CHANNEL_CAPACITY must be greater than 0"
            ));
        }
        let stream_ping_interval =
            Self::parsed_env_var("NAKAMA_NOTIFIER_STREAM_PING_INTERVAL")?;
        let stream_ping_interval = Duration::from_secs(stream_ping_interval);
        let follow_tx_max_attempts =
            Self::parsed_env_var("NAKAMA_NOTIFIER_FOLLOW_TX_MAX_ATTEMPTS")?;
        let shutdown_timeout = Self::parsed_env_var("NAKAMA_NOTIFIER_SHUTDOWN_TIMEOUT")?;
        let shutdown_timeout = Duration::from_secs(shutdown_timeout);

        Ok(Self {
            log_directory,
            log_filename,
            bind_address,
            db_connection_string,
            db_max_connections,
            max_http_content_len,
            jwt_algorithms,
            jwt_key,
            broker_channel_capacity,
            stream_ping_interval,
            follow_tx_max_attempts,
            shutdown_timeout,
        })
    }

    fn env_var(name: &'static str) -> anyhow::Result<String> {
        std::env::var(name).map_err(|_| anyhow!("environment variable {name} not set"))
    }

    fn parsed_env_var<T>(name: &'static str) -> anyhow::Result<T>
    where
        T: FromStr,
        T::Err: std::fmt::Display,
    {
        Self::env_var(name)?
            .parse()
            .map_err(|err| anyhow!("environment variable {name} is invalid: {err}"))
    }
}
