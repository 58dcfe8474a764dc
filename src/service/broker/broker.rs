use super::{BrokerConfig, Subscription};
use parking_lot::Mutex;
use std::{
    collections::HashMap,
    fmt::Display,
    hash::Hash,
    sync::{
        atomic::{AtomicU64, Ordering},
        Arc,
    },
};
use tokio::sync::mpsc::{self, error::TrySendError};

pub(super) struct BrokerState<K, T> {
    pub closed: bool,
    pub channels: HashMap<K, HashMap<u64, mpsc::Sender<Arc<T>>>>,
}

///
/// In-memory publish/subscribe registry.
///
/// Every [Subscription] owns a bounded channel registered under a key.
/// Publishing never waits: when a subscriber's channel is full
/// the event is dropped for that subscriber only.
///
pub struct Broker<K, T> {
    name: &'static str,
    config: BrokerConfig,
    state: Arc<Mutex<BrokerState<K, T>>>,
    next_subscription_id: AtomicU64,
}

impl<K, T> Broker<K, T>
where
    K: Eq + Hash + Clone + Display,
{
    pub fn new(name: &'static str, config: BrokerConfig) -> Self {
        let state = BrokerState {
            closed: false,
            channels: HashMap::new(),
        };

        Self {
            name,
            config,
            state: Arc::new(Mutex::new(state)),
            next_subscription_id: AtomicU64::new(0),
        }
    }

    ///
    /// Registers new channel under the key.
    /// Channel is deregistered when returned [Subscription] is dropped.
    ///
    /// Subscription created after [Broker::close] receives nothing.
    ///
    pub fn subscribe(&self, key: K) -> Subscription<K, T> {
        let (tx, rx) = mpsc::channel(self.config.channel_capacity.max(1));
        let id = self.next_subscription_id.fetch_add(1, Ordering::Relaxed);

        let subscribers = {
            let mut state = self.state.lock();
            match state.closed {
                true => None,
                false => {
                    let channels = state.channels.entry(key.clone()).or_default();
                    channels.insert(id, tx);
                    Some(channels.len())
                }
            }
        };

        match subscribers {
            Some(subscribers) => {
                tracing::debug!(broker = self.name, %key, subscribers, "subscribed");
            }
            None => tracing::debug!(broker = self.name, %key, "subscribed to closed broker"),
        }

        Subscription::new(self.name, key, id, rx, Arc::downgrade(&self.state))
    }

    ///
    /// Queues event on every channel registered under the key.
    ///
    /// ### Returns
    /// number of subscriptions the event was queued for
    ///
    pub fn publish(&self, key: &K, event: T) -> usize {
        // Senders are cloned so no lock is held while sending
        let senders = {
            let state = self.state.lock();
            state
                .channels
                .get(key)
                .map(|channels| channels.values().cloned().collect::<Vec<_>>())
                .unwrap_or_default()
        };

        if senders.is_empty() {
            tracing::trace!(broker = self.name, %key, "no subscribers");
            return 0;
        }

        let event = Arc::new(event);
        let mut queued = 0;
        for sender in senders {
            match sender.try_send(event.clone()) {
                Ok(()) => queued += 1,
                Err(TrySendError::Full(_)) => {
                    tracing::warn!(broker = self.name, %key, "subscriber lagging, event dropped");
                }
                Err(TrySendError::Closed(_)) => {
                    tracing::trace!(broker = self.name, %key, "subscriber already gone");
                }
            }
        }

        tracing::debug!(broker = self.name, %key, queued, "published event");

        queued
    }

    ///
    /// Number of channels registered under the key
    ///
    pub fn subscribers(&self, key: &K) -> usize {
        let state = self.state.lock();
        state.channels.get(key).map(HashMap::len).unwrap_or(0)
    }

    ///
    /// Number of keys with at least one registered channel
    ///
    #[cfg(test)]
    pub fn keys(&self) -> usize {
        self.state.lock().channels.len()
    }

    ///
    /// Drops every registered channel, so all subscriptions finish.
    ///
    pub fn close(&self) {
        let keys = {
            let mut state = self.state.lock();
            state.closed = true;
            let keys = state.channels.len();
            state.channels.clear();
            keys
        };

        tracing::info!(broker = self.name, keys, "broker closed");
    }
}
