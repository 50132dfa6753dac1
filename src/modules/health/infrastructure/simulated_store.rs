//! In-memory health store backing the simulator and the test suite
//!
//! Behaves like the device store as seen through the `HealthStore` port:
//! ingested samples become queryable immediately and registered observers
//! get an `Updated` hint for every sample that lands in their window.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use dashmap::{DashMap, DashSet};
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::{Mutex, RwLock};
use uuid::Uuid;

use crate::modules::health::domain::{
    AuthorizationRequest, DataCategory, QuantitySample, SampleFilter, SampleQuery, SortOrder,
};
use crate::modules::health::traits::{
    HealthStore, ObservationStream, ObserverEvent, ObserverSender,
};
use crate::shared::errors::{MonitorError, MonitorResult};

/// A registered observer: where to send hints plus its optional time window
struct ObserverRegistration {
    id: Uuid,
    tx: ObserverSender,
    filter: Option<SampleFilter>,
}

/// In-memory `HealthStore` with fault-injection hooks for tests.
///
/// Closed observer channels are pruned lazily on the next delivery
/// attempt, so dropping an `ObservationStream` is all an unsubscribe takes.
pub struct SimulatedHealthStore {
    samples: DashMap<DataCategory, Vec<QuantitySample>>,
    observers: DashMap<DataCategory, Vec<ObserverRegistration>>,
    authorizations: RwLock<Vec<AuthorizationRequest>>,
    unavailable: DashSet<DataCategory>,
    deny_authorization: AtomicBool,
    next_query_failure: Mutex<Option<String>>,
}

impl SimulatedHealthStore {
    pub fn new() -> Self {
        Self {
            samples: DashMap::new(),
            observers: DashMap::new(),
            authorizations: RwLock::new(Vec::new()),
            unavailable: DashSet::new(),
            deny_authorization: AtomicBool::new(false),
            next_query_failure: Mutex::new(None),
        }
    }

    /// Record a sample and notify every observer whose window covers it
    pub fn ingest(&self, sample: QuantitySample) {
        let category = sample.category;
        let recorded_at = sample.recorded_at;

        log::debug!(
            "Ingesting sample: {:.1} {} for {}",
            sample.value,
            sample.unit,
            category
        );
        self.samples.entry(category).or_default().push(sample);
        self.notify(category, recorded_at);
    }

    /// Number of samples currently stored for `category`
    pub fn sample_count(&self, category: DataCategory) -> usize {
        self.samples
            .get(&category)
            .map(|entry| entry.len())
            .unwrap_or(0)
    }

    /// Live observers registered for `category`
    pub fn observer_count(&self, category: DataCategory) -> usize {
        self.observers
            .get(&category)
            .map(|entry| {
                entry
                    .iter()
                    .filter(|observer| !observer.tx.is_closed())
                    .count()
            })
            .unwrap_or(0)
    }

    /// Mark a category as present or missing on this device
    pub fn set_category_available(&self, category: DataCategory, available: bool) {
        if available {
            self.unavailable.remove(&category);
        } else {
            self.unavailable.insert(category);
        }
    }

    /// Make future authorization requests fail as if the user declined
    pub fn set_authorization_denied(&self, denied: bool) {
        self.deny_authorization.store(denied, Ordering::Relaxed);
    }

    /// Fail the next `samples` call with the given message, then recover
    pub async fn fail_next_query(&self, message: &str) {
        *self.next_query_failure.lock().await = Some(message.to_string());
    }

    /// Push a subscription-level error to every observer of `category`
    pub fn emit_observer_error(&self, category: DataCategory, message: &str) {
        if let Some(mut entry) = self.observers.get_mut(&category) {
            entry.retain(|observer| {
                observer
                    .tx
                    .send(ObserverEvent::Error(message.to_string()))
                    .is_ok()
            });
        }
    }

    /// Every authorization request the store has received, in arrival order
    pub async fn recorded_authorizations(&self) -> Vec<AuthorizationRequest> {
        self.authorizations.read().await.clone()
    }

    fn notify(&self, category: DataCategory, recorded_at: DateTime<Utc>) {
        if let Some(mut entry) = self.observers.get_mut(&category) {
            entry.retain(|observer| {
                if observer.tx.is_closed() {
                    log::debug!("Pruning observer {} for {}", observer.id, category);
                    return false;
                }
                let in_window = observer
                    .filter
                    .map_or(true, |filter| filter.matches(recorded_at));
                if in_window {
                    observer.tx.send(ObserverEvent::Updated { category }).is_ok()
                } else {
                    true
                }
            });
        }
    }
}

#[async_trait]
impl HealthStore for SimulatedHealthStore {
    async fn request_authorization(&self, request: AuthorizationRequest) -> MonitorResult<()> {
        log::debug!(
            "Authorization requested: share={:?} read={:?}",
            request.share,
            request.read
        );
        self.authorizations.write().await.push(request);

        if self.deny_authorization.load(Ordering::Relaxed) {
            return Err(MonitorError::Authorization(
                "authorization denied by user".to_string(),
            ));
        }
        Ok(())
    }

    async fn observe(
        &self,
        category: DataCategory,
        filter: Option<SampleFilter>,
    ) -> MonitorResult<ObservationStream> {
        if self.unavailable.contains(&category) {
            return Err(MonitorError::CategoryUnavailable(category));
        }

        let (tx, stream) = ObservationStream::channel(category);
        self.observers
            .entry(category)
            .or_default()
            .push(ObserverRegistration {
                id: stream.id(),
                tx,
                filter,
            });
        log::debug!("Observer {} registered for {}", stream.id(), category);
        Ok(stream)
    }

    async fn samples(&self, query: SampleQuery) -> MonitorResult<Vec<QuantitySample>> {
        if let Some(message) = self.next_query_failure.lock().await.take() {
            return Err(MonitorError::Query(message));
        }
        if self.unavailable.contains(&query.category) {
            return Err(MonitorError::CategoryUnavailable(query.category));
        }

        let mut results: Vec<QuantitySample> = self
            .samples
            .get(&query.category)
            .map(|entry| entry.value().clone())
            .unwrap_or_default();

        if let Some(filter) = query.filter {
            results.retain(|sample| filter.matches(sample.recorded_at));
        }
        match query.sort {
            SortOrder::Ascending => results.sort_by(|a, b| a.recorded_at.cmp(&b.recorded_at)),
            SortOrder::Descending => results.sort_by(|a, b| b.recorded_at.cmp(&a.recorded_at)),
        }
        if let Some(limit) = query.limit {
            results.truncate(limit);
        }
        Ok(results)
    }
}

impl Default for SimulatedHealthStore {
    fn default() -> Self {
        Self::new()
    }
}
