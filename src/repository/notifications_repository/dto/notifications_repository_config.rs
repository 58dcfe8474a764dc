pub struct NotificationsRepositoryConfig {
    /// How many times follow transaction is attempted
    /// when it fails with serialization failure
    pub follow_tx_max_attempts: u32,
}
