use crate::modules::health::domain::{
    AuthorizationRequest, DataCategory, QuantitySample, SampleFilter, SampleQuery,
};
use crate::shared::errors::MonitorResult;
use async_trait::async_trait;
use futures::Stream;
use std::pin::Pin;
use std::task::{Context, Poll};
use tokio::sync::mpsc;
use uuid::Uuid;

/// Port onto the device's health data store.
///
/// The live implementation talks to platform services; tests and the
/// simulator swap in in-memory stores. All methods are cheap to call from
/// async context and never block the caller's thread.
#[async_trait]
pub trait HealthStore: Send + Sync {
    /// Ask the user for permission to share and read the given categories.
    /// `Ok(())` means the prompt flow completed, not that access was granted;
    /// a denied category surfaces later as empty query results.
    async fn request_authorization(&self, request: AuthorizationRequest) -> MonitorResult<()>;

    /// Subscribe to change notifications for `category`.
    ///
    /// Events are hints that the store's contents changed, not data
    /// carriers; consumers re-query for actual samples. The subscription
    /// stays registered until the returned stream is dropped.
    async fn observe(
        &self,
        category: DataCategory,
        filter: Option<SampleFilter>,
    ) -> MonitorResult<ObservationStream>;

    /// Samples matching `query`, sorted and truncated as the query asks
    async fn samples(&self, query: SampleQuery) -> MonitorResult<Vec<QuantitySample>>;
}

/// Notification delivered to an observer
#[derive(Debug, Clone, PartialEq)]
pub enum ObserverEvent {
    /// Something changed for the watched category; query the store to see what
    Updated { category: DataCategory },
    /// The store failed to service the subscription for one delivery
    Error(String),
}

/// Sending half of an observer channel, held by the store
pub type ObserverSender = mpsc::UnboundedSender<ObserverEvent>;

/// Receiving half of an observer subscription.
///
/// Dropping the stream is the unsubscribe: the store notices the closed
/// channel and prunes its registration on the next delivery attempt.
#[derive(Debug)]
pub struct ObservationStream {
    id: Uuid,
    category: DataCategory,
    rx: mpsc::UnboundedReceiver<ObserverEvent>,
}

impl ObservationStream {
    /// Build a connected sender/stream pair for `category`
    pub fn channel(category: DataCategory) -> (ObserverSender, Self) {
        let (tx, rx) = mpsc::unbounded_channel();
        let stream = Self {
            id: Uuid::new_v4(),
            category,
            rx,
        };
        (tx, stream)
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn category(&self) -> DataCategory {
        self.category
    }

    /// Next event, or `None` once the store side has gone away
    pub async fn recv(&mut self) -> Option<ObserverEvent> {
        self.rx.recv().await
    }
}

impl Stream for ObservationStream {
    type Item = ObserverEvent;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        self.rx.poll_recv(cx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::StreamExt;

    #[tokio::test]
    async fn test_events_arrive_in_order() {
        let (tx, mut stream) = ObservationStream::channel(DataCategory::HeartRate);

        tx.send(ObserverEvent::Updated {
            category: DataCategory::HeartRate,
        })
        .unwrap();
        tx.send(ObserverEvent::Error("store offline".to_string()))
            .unwrap();

        assert_eq!(
            stream.recv().await,
            Some(ObserverEvent::Updated {
                category: DataCategory::HeartRate
            })
        );
        assert_eq!(
            stream.recv().await,
            Some(ObserverEvent::Error("store offline".to_string()))
        );
    }

    #[tokio::test]
    async fn test_stream_ends_when_sender_dropped() {
        let (tx, mut stream) = ObservationStream::channel(DataCategory::HeartRate);
        drop(tx);

        assert_eq!(stream.next().await, None);
    }

    #[tokio::test]
    async fn test_dropping_stream_closes_sender() {
        let (tx, stream) = ObservationStream::channel(DataCategory::HeartRate);
        drop(stream);

        assert!(tx.is_closed());
    }
}
