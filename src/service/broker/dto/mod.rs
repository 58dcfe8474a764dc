mod broker_config;

pub use broker_config::*;
