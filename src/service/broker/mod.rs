mod broker;
mod brokers;
mod dto;
mod subscription;

pub use broker::*;
pub use brokers::*;
pub use dto::BrokerConfig;
pub use subscription::*;
