use super::broker::BrokerState;
use parking_lot::Mutex;
use std::{
    fmt::Display,
    hash::Hash,
    sync::{Arc, Weak},
};
use tokio::sync::mpsc;

///
/// Channel registered in a [Broker](super::Broker) under a key.
///
/// Dropping the subscription deregisters its channel,
/// and removes the key once no other channel uses it.
///
pub struct Subscription<K, T>
where
    K: Eq + Hash + Display,
{
    broker: &'static str,
    key: K,
    id: u64,
    rx: mpsc::Receiver<Arc<T>>,
    state: Weak<Mutex<BrokerState<K, T>>>,
}

impl<K, T> Subscription<K, T>
where
    K: Eq + Hash + Display,
{
    pub(super) fn new(
        broker: &'static str,
        key: K,
        id: u64,
        rx: mpsc::Receiver<Arc<T>>,
        state: Weak<Mutex<BrokerState<K, T>>>,
    ) -> Self {
        Self {
            broker,
            key,
            id,
            rx,
            state,
        }
    }

    pub fn key(&self) -> &K {
        &self.key
    }

    ///
    /// Waits for the next event.
    ///
    /// ### Returns
    /// `None` when broker was closed
    ///
    pub async fn recv(&mut self) -> Option<Arc<T>> {
        self.rx.recv().await
    }

    pub fn unsubscribe(self) {}
}

impl<K, T> Drop for Subscription<K, T>
where
    K: Eq + Hash + Display,
{
    fn drop(&mut self) {
        let Some(state) = self.state.upgrade() else {
            return;
        };

        let subscribers = {
            let mut state = state.lock();
            match state.channels.get_mut(&self.key) {
                Some(channels) => {
                    channels.remove(&self.id);
                    let subscribers = channels.len();
                    if subscribers == 0 {
                        state.channels.remove(&self.key);
                    }
                    subscribers
                }
                None => 0,
            }
        };

        tracing::debug!(broker = self.broker, key = %self.key, subscribers, "unsubscribed");
    }
}
