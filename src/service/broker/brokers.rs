use super::{Broker, BrokerConfig};
use crate::dto::output;
use std::sync::Arc;
use uuid::Uuid;

///
/// All brokers of the application
///
#[derive(Clone)]
pub struct Brokers {
    /// keyed by recipient id
    pub notifications: Arc<Broker<Uuid, output::Notification>>,

    /// keyed by post id
    pub comments: Arc<Broker<Uuid, output::Comment>>,

    /// keyed by timeline owner id
    pub feed: Arc<Broker<Uuid, output::TimelineItem>>,
}

impl Brokers {
    pub fn new(config: BrokerConfig) -> Self {
        Self {
            notifications: Arc::new(Broker::new("notifications", config)),
            comments: Arc::new(Broker::new("comments", config)),
            feed: Arc::new(Broker::new("feed", config)),
        }
    }

    pub fn close(&self) {
        self.notifications.close();
        self.comments.close();
        self.feed.close();
    }
}
