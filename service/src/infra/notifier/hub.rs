//! In-process publish/subscribe [`Hub`].

use std::{collections::HashMap, sync::Arc};

use common::operations::Publish;
use derive_more::{Display, Error as StdError};
use tokio::sync::{broadcast, RwLock};
use tracerr::Traced;
use tracing as log;

use crate::{
    domain::{notification::Topic, Notification},
    infra::notifier::{self, Notifier},
};

/// In-process [`Notifier`] broadcasting [`Notification`]s to the subscribers
/// of their [`Topic`].
///
/// Delivery is best-effort: publishing to a [`Topic`] nobody listens to is
/// not an error, and lagging subscribers lose the oldest values.
#[derive(Clone, Debug)]
pub struct Hub {
    /// Capacity of every [`Topic`] channel.
    capacity: usize,

    /// Shared state of this [`Hub`].
    state: Arc<RwLock<State>>,
}

/// Shared state of a [`Hub`].
#[derive(Debug, Default)]
struct State {
    /// Indicator whether the [`Hub`] is closed.
    closed: bool,

    /// Channels of the [`Topic`]s having at least one subscriber.
    topics: HashMap<Topic, broadcast::Sender<Notification>>,
}

impl State {
    /// Drops the channels of the [`Topic`]s nobody listens to anymore.
    fn prune(&mut self) {
        self.topics.retain(|_, tx| tx.receiver_count() > 0);
    }
}

impl Hub {
    /// Creates a new [`Hub`] buffering up to `capacity` values per
    /// subscriber.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity: capacity.max(1),
            state: Arc::default(),
        }
    }

    /// Subscribes to the provided [`Topic`].
    ///
    /// # Errors
    ///
    /// If this [`Hub`] is closed.
    pub async fn subscribe(
        &self,
        topic: &Topic,
    ) -> Result<broadcast::Receiver<Notification>, Traced<notifier::Error>>
    {
        let mut state = self.state.write().await;
        if state.closed {
            return Err(tracerr::new!(notifier::Error::from(Error::Closed)));
        }

        state.prune();
        let capacity = self.capacity;
        Ok(state
            .topics
            .entry(*topic)
            .or_insert_with(|| broadcast::channel(capacity).0)
            .subscribe())
    }

    /// Closes this [`Hub`], ending all the existing subscriptions.
    pub async fn close(&self) {
        let mut state = self.state.write().await;
        state.closed = true;
        state.topics.clear();
    }
}

impl Notifier<Publish<Notification>> for Hub {
    /// Number of subscribers the [`Notification`] was delivered to.
    type Ok = usize;
    type Err = Traced<notifier::Error>;

    async fn execute(
        &self,
        Publish(notification): Publish<Notification>,
    ) -> Result<Self::Ok, Self::Err> {
        let topic = notification.topic();
        {
            let state = self.state.read().await;
            if state.closed {
                return Err(tracerr::new!(notifier::Error::from(
                    Error::Closed
                )));
            }

            let Some(sender) = state.topics.get(&topic) else {
                log::trace!("no subscribers on `{topic}`");
                return Ok(0);
            };
            // Sending fails only when every receiver is gone.
            if let Ok(n) = sender.send(notification) {
                return Ok(n);
            }
        }

        log::trace!("all subscribers of `{topic}` are gone");
        self.state.write().await.prune();
        Ok(0)
    }
}

/// [`Hub`] error.
#[derive(Clone, Copy, Debug, Display, Eq, PartialEq, StdError)]
pub enum Error {
    /// [`Hub`] is closed.
    #[display("hub is closed")]
    Closed,
}

#[cfg(test)]
mod spec {
    use common::operations::Publish;

    use crate::{
        domain::{
            notification::{self, Topic},
            user, Notification,
        },
        infra::Notifier as _,
    };

    use super::Hub;

    fn notification(recipient: user::Id) -> Notification {
        Notification::new(
            recipient,
            notification::Kind::Message,
            "Hello".into(),
        )
    }

    #[tokio::test]
    async fn delivers_to_topic_subscribers() {
        let hub = Hub::new(8);
        let alice = user::Id::new();
        let bob = user::Id::new();

        let mut alice_rx = hub.subscribe(&alice.into()).await.unwrap();
        let mut bob_rx = hub.subscribe(&bob.into()).await.unwrap();

        let sent = notification(alice);
        let delivered = hub.execute(Publish(sent.clone())).await.unwrap();

        assert_eq!(delivered, 1);
        assert_eq!(alice_rx.recv().await.unwrap().id, sent.id);
        assert!(bob_rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn publishing_without_subscribers_is_ok() {
        let hub = Hub::new(8);

        let delivered = hub
            .execute(Publish(notification(user::Id::new())))
            .await
            .unwrap();

        assert_eq!(delivered, 0);
    }

    #[tokio::test]
    async fn abandoned_topics_are_dropped() {
        let hub = Hub::new(8);
        let alice = user::Id::new();
        let bob = user::Id::new();

        drop(hub.subscribe(&alice.into()).await.unwrap());
        let _bob_rx = hub.subscribe(&bob.into()).await.unwrap();
        assert_eq!(hub.state.read().await.topics.len(), 1);

        let alice_rx = hub.subscribe(&alice.into()).await.unwrap();
        drop(alice_rx);
        let delivered =
            hub.execute(Publish(notification(alice))).await.unwrap();

        assert_eq!(delivered, 0);
        let state = hub.state.read().await;
        assert_eq!(state.topics.len(), 1);
        assert!(state.topics.contains_key(&Topic::from(bob)));
    }

    #[tokio::test]
    async fn closed_hub_rejects() {
        let hub = Hub::new(8);
        let alice = user::Id::new();
        let mut rx = hub.subscribe(&alice.into()).await.unwrap();

        hub.close().await;

        assert!(rx.recv().await.is_err());
        assert!(hub.subscribe(&alice.into()).await.is_err());
        assert!(hub.execute(Publish(notification(alice))).await.is_err());
    }
}
