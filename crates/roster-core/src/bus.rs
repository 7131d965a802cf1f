//! Sync channel between the control context and display replicas.
//!
//! One named topic, many subscribers, FIFO per publisher. Subscribers that
//! attach late first receive a replay of the state built so far.

use std::collections::VecDeque;
use std::sync::Mutex;

use roster_types::SyncMessage;
use tokio::sync::broadcast;
use tracing::{debug, trace};

use crate::{ReplicaState, Result, RosterError};

/// Default topic name shared by control and display contexts.
pub const DEFAULT_TOPIC: &str = "sav_personnel_sync";

/// Default number of in-flight messages a slow subscriber may fall behind.
pub const DEFAULT_CHANNEL_CAPACITY: usize = 256;

/// Publish/subscribe bus for sync messages.
pub trait SyncBus: Send + Sync {
    /// Topic this bus is scoped to.
    fn topic(&self) -> &str;

    /// Broadcast a message to every current subscriber.
    fn publish(&self, message: SyncMessage);

    /// Start receiving messages. Dropping the subscription releases it.
    fn subscribe(&self) -> Subscription;
}

/// In-process bus backed by a tokio broadcast channel.
pub struct LocalBus {
    topic: String,
    tx: broadcast::Sender<SyncMessage>,
    /// Fold of everything published, used to replay state to late subscribers.
    /// Held across send so that no message falls between replay and stream.
    retained: Mutex<ReplicaState>,
}

impl LocalBus {
    pub fn new(topic: impl Into<String>, capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity.max(1));
        Self {
            topic: topic.into(),
            tx,
            retained: Mutex::new(ReplicaState::default()),
        }
    }

    /// Number of live subscriptions.
    pub fn subscriber_count(&self) -> usize {
        self.tx.receiver_count()
    }

    fn retained(&self) -> std::sync::MutexGuard<'_, ReplicaState> {
        // State is rebuilt from messages, so a poisoned guard is still usable
        self.retained.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl Default for LocalBus {
    fn default() -> Self {
        Self::new(DEFAULT_TOPIC, DEFAULT_CHANNEL_CAPACITY)
    }
}

impl SyncBus for LocalBus {
    fn topic(&self) -> &str {
        &self.topic
    }

    fn publish(&self, message: SyncMessage) {
        let mut retained = self.retained();
        retained.apply(&message);

        let kind = message.kind();
        match self.tx.send(message) {
            Ok(receivers) => {
                debug!(target: "roster::sync", "Published {} on '{}' to {} subscribers", kind, self.topic, receivers)
            }
            Err(_) => {
                trace!(target: "roster::sync", "Published {} on '{}' with no subscribers", kind, self.topic)
            }
        }
    }

    fn subscribe(&self) -> Subscription {
        let retained = self.retained();
        let backlog = retained.replay();
        let rx = self.tx.subscribe();
        debug!(
            target: "roster::sync",
            "New subscriber on '{}' with {} replayed messages",
            self.topic,
            backlog.len()
        );
        Subscription {
            topic: self.topic.clone(),
            backlog: backlog.into(),
            rx,
        }
    }
}

/// A live subscription: replayed backlog first, then the broadcast stream.
pub struct Subscription {
    topic: String,
    backlog: VecDeque<SyncMessage>,
    rx: broadcast::Receiver<SyncMessage>,
}

impl Subscription {
    /// Wait for the next message.
    pub async fn recv(&mut self) -> Result<SyncMessage> {
        if let Some(message) = self.backlog.pop_front() {
            return Ok(message);
        }
        self.rx.recv().await.map_err(|e| match e {
            broadcast::error::RecvError::Closed => RosterError::ChannelClosed,
            broadcast::error::RecvError::Lagged(n) => RosterError::Lagged(n),
        })
    }

    /// Next message if one is ready.
    pub fn try_recv(&mut self) -> Result<Option<SyncMessage>> {
        if let Some(message) = self.backlog.pop_front() {
            return Ok(Some(message));
        }
        match self.rx.try_recv() {
            Ok(message) => Ok(Some(message)),
            Err(broadcast::error::TryRecvError::Empty) => Ok(None),
            Err(broadcast::error::TryRecvError::Closed) => Err(RosterError::ChannelClosed),
            Err(broadcast::error::TryRecvError::Lagged(n)) => Err(RosterError::Lagged(n)),
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        trace!(target: "roster::sync", "Released subscription on '{}'", self.topic);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use roster_types::{Directory, Employee};

    fn employee(serial: &str) -> Employee {
        Employee {
            unit: "A".into(),
            serial: serial.into(),
            full_name: format!("Person {serial}"),
            job_title: String::new(),
        }
    }

    #[tokio::test]
    async fn test_messages_arrive_in_publish_order() {
        let bus = LocalBus::new("order", 16);
        let mut sub = bus.subscribe();

        bus.publish(SyncMessage::UpdateResult(Some(employee("1"))));
        bus.publish(SyncMessage::UpdateResult(None));
        bus.publish(SyncMessage::Reset);

        assert_eq!(sub.recv().await.unwrap(), SyncMessage::UpdateResult(Some(employee("1"))));
        assert_eq!(sub.recv().await.unwrap(), SyncMessage::UpdateResult(None));
        assert_eq!(sub.recv().await.unwrap(), SyncMessage::Reset);
        assert!(sub.try_recv().unwrap().is_none());
    }

    #[tokio::test]
    async fn test_every_subscriber_gets_every_message() {
        let bus = LocalBus::default();
        let mut first = bus.subscribe();
        let mut second = bus.subscribe();
        assert_eq!(bus.subscriber_count(), 2);

        bus.publish(SyncMessage::Reset);
        assert_eq!(first.recv().await.unwrap(), SyncMessage::Reset);
        assert_eq!(second.recv().await.unwrap(), SyncMessage::Reset);
    }

    #[test]
    fn test_late_subscriber_gets_replay_before_stream() {
        let bus = LocalBus::default();
        let directory = Directory {
            units: vec!["A".into()],
            employees: vec![employee("1")],
        };
        bus.publish(SyncMessage::SyncData(directory.clone()));

        let mut late = bus.subscribe();
        bus.publish(SyncMessage::UpdateResult(None));

        assert_eq!(late.try_recv().unwrap(), Some(SyncMessage::SyncData(directory)));
        assert_eq!(late.try_recv().unwrap(), Some(SyncMessage::UpdateResult(None)));
        assert_eq!(late.try_recv().unwrap(), None);
    }

    #[test]
    fn test_dropping_subscription_releases_it() {
        let bus = LocalBus::default();
        let sub = bus.subscribe();
        assert_eq!(bus.subscriber_count(), 1);
        drop(sub);
        assert_eq!(bus.subscriber_count(), 0);
    }

    #[test]
    fn test_publish_without_subscribers_is_retained() {
        let bus = LocalBus::default();
        bus.publish(SyncMessage::UpdateResult(None));
        let mut sub = bus.subscribe();
        assert_eq!(sub.try_recv().unwrap(), Some(SyncMessage::UpdateResult(None)));
    }

    #[test]
    fn test_lag_is_reported() {
        let bus = LocalBus::new("lag", 1);
        let mut sub = bus.subscribe();
        bus.publish(SyncMessage::Reset);
        bus.publish(SyncMessage::Reset);
        assert!(matches!(sub.try_recv(), Err(RosterError::Lagged(1))));
    }
}
