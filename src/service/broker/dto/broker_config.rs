#[derive(Debug, Clone, Copy)]
pub struct BrokerConfig {
    /// How many events can wait for a single subscriber.
    /// Events published to a full subscription are dropped.
    pub channel_capacity: usize,
}
