//! Heart rate monitoring pipeline
//!
//! Authorize, subscribe, fetch, display: the monitor registers one observer
//! with the health store, answers each change notification with exactly one
//! query, and hands the reduced value to the UI loop. The store behind it is
//! injected, so the same pipeline runs against the simulator, a mock, or a
//! real device backend.

use futures::StreamExt;
use std::sync::Arc;
use tokio::sync::RwLock;
use tokio_util::sync::CancellationToken;

use crate::modules::display::{UiHandle, UiMessage};
use crate::modules::health::domain::{
    AuthorizationRequest, DataCategory, SampleFilter, SampleQuery, SortOrder, Unit,
};
use crate::modules::health::traits::{HealthStore, ObserverEvent};
use crate::shared::errors::{MonitorError, MonitorResult};
use crate::shared::utils::TimedOperation;
use crate::{log_debug, log_error, log_info, log_warn};

use super::observation::ObservationHandle;

/// Lifecycle phase the monitor is in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MonitorPhase {
    Idle,
    Authorizing,
    Subscribed,
    Fetching,
}

impl std::fmt::Display for MonitorPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MonitorPhase::Idle => write!(f, "idle"),
            MonitorPhase::Authorizing => write!(f, "authorizing"),
            MonitorPhase::Subscribed => write!(f, "subscribed"),
            MonitorPhase::Fetching => write!(f, "fetching"),
        }
    }
}

/// What one fetch produced
#[derive(Debug)]
pub enum FetchOutcome {
    /// A value to display, in beats per minute
    Reading(f64),
    /// The category does not exist on this device
    Unavailable,
    /// The query failed; the label keeps whatever it showed before
    Failed(MonitorError),
}

impl FetchOutcome {
    /// Value the label should show, if any.
    ///
    /// `Unavailable` keeps the long-standing `0` sentinel on the label, so
    /// a missing category and an empty store look the same there. Callers
    /// holding the outcome itself can still tell them apart.
    pub fn display_value(&self) -> Option<f64> {
        match self {
            FetchOutcome::Reading(value) => Some(*value),
            FetchOutcome::Unavailable => Some(0.0),
            FetchOutcome::Failed(_) => None,
        }
    }
}

/// Watches one data category and keeps the display label current
#[derive(Clone)]
pub struct HeartRateMonitor {
    store: Arc<dyn HealthStore>,
    ui: UiHandle,
    phase: Arc<RwLock<MonitorPhase>>,
}

impl HeartRateMonitor {
    /// Category this monitor watches
    pub const CATEGORY: DataCategory = DataCategory::HeartRate;
    /// Unit the label displays
    pub const DISPLAY_UNIT: Unit = Unit::CountPerMinute;

    pub fn new(store: Arc<dyn HealthStore>, ui: UiHandle) -> Self {
        Self {
            store,
            ui,
            phase: Arc::new(RwLock::new(MonitorPhase::Idle)),
        }
    }

    /// Current lifecycle phase
    pub async fn phase(&self) -> MonitorPhase {
        *self.phase.read().await
    }

    async fn set_phase(&self, phase: MonitorPhase) {
        *self.phase.write().await = phase;
    }

    /// Ask for permission to share and read heart rate data.
    ///
    /// Only success is reported. A denied or failed request is swallowed
    /// whole: no retry, no user-visible message, later queries just come
    /// back empty and the label never moves off its initial text.
    pub async fn authorize(&self) {
        self.set_phase(MonitorPhase::Authorizing).await;
        let request =
            AuthorizationRequest::share_and_read(vec![Self::CATEGORY], vec![Self::CATEGORY]);

        match self.store.request_authorization(request).await {
            Ok(()) => log_info!("heart rate authorization succeeded"),
            // Deliberately ignored, see above
            Err(_) => {}
        }
    }

    /// Register the observer and start the notification loop.
    ///
    /// A registration the host refuses comes back as
    /// [`MonitorError::Subscription`]. Host error events on an established
    /// subscription are logged and skipped; the subscription stays active.
    /// Each `Updated` event triggers exactly one fetch and at most one
    /// display post. The loop stops when the returned handle shuts it down
    /// or the host ends the stream.
    pub async fn subscribe_to_changes(&self) -> MonitorResult<ObservationHandle> {
        let mut stream = self
            .store
            .observe(Self::CATEGORY, None)
            .await
            .map_err(|e| MonitorError::Subscription(e.to_string()))?;
        self.set_phase(MonitorPhase::Subscribed).await;
        log_info!("Observer registered for {}", Self::CATEGORY);

        let monitor = self.clone();
        let token = CancellationToken::new();
        let loop_token = token.clone();

        let task = tokio::spawn(async move {
            loop {
                tokio::select! {
                    _ = loop_token.cancelled() => {
                        log_debug!("Notification loop cancelled");
                        break;
                    }
                    event = stream.next() => match event {
                        Some(ObserverEvent::Updated { category }) => {
                            log_debug!("Change notification for {}", category);
                            monitor.handle_update().await;
                        }
                        Some(ObserverEvent::Error(message)) => {
                            // Skip this delivery; the registration is intact
                            log_error!("Observer error: {}", message);
                        }
                        None => {
                            log_warn!("Observer stream ended by the host");
                            break;
                        }
                    }
                }
            }
            monitor.set_phase(MonitorPhase::Idle).await;
        });

        Ok(ObservationHandle::new(Self::CATEGORY, token, task))
    }

    /// One notification end to end: fetch once, display if a value came back
    async fn handle_update(&self) {
        self.set_phase(MonitorPhase::Fetching).await;
        let outcome = self.fetch_latest_sample().await;
        if let Some(value) = outcome.display_value() {
            self.on_sample_ready(value);
        }
        self.set_phase(MonitorPhase::Subscribed).await;
    }

    /// Query the full heart rate history and reduce it to a single value.
    ///
    /// Asks for newest-first ordering with no limit, then walks the whole
    /// result set letting the final assignment win. An empty result set
    /// produces 0.0.
    pub async fn fetch_latest_sample(&self) -> FetchOutcome {
        let query = SampleQuery::new(Self::CATEGORY)
            .with_filter(SampleFilter::up_to(chrono::Utc::now()))
            .with_sort(SortOrder::Descending);

        let timer = TimedOperation::new("heart rate query");
        let samples = match self.store.samples(query).await {
            Ok(samples) => samples,
            Err(MonitorError::CategoryUnavailable(category)) => {
                log_warn!("Category {} unavailable on this device", category);
                return FetchOutcome::Unavailable;
            }
            Err(e) => {
                log_error!("Sample query failed: {}", e);
                return FetchOutcome::Failed(e);
            }
        };
        timer.finish();

        // Newest-first ordering plus an overwrite loop: the last row wins,
        // so the surviving value belongs to the chronologically EARLIEST
        // sample. Almost certainly a bug, but it is the label behavior
        // users have today, so it stays.
        let mut last_heart_rate = 0.0;
        for sample in &samples {
            last_heart_rate = sample.value_in(Self::DISPLAY_UNIT);
        }

        log_debug!(
            "Fetched {} samples, produced {:.1} bpm",
            samples.len(),
            last_heart_rate
        );
        FetchOutcome::Reading(last_heart_rate)
    }

    /// Hand a value to the display, truncated toward zero.
    ///
    /// `72.9` renders as `"72"`, `-0.5` as `"0"`. The label itself is only
    /// ever touched by the UI thread; this merely queues the update.
    pub fn on_sample_ready(&self, heart_rate: f64) {
        let text = Self::format_bpm(heart_rate);
        log_info!("Heart rate updated: {} bpm", text);
        if let Err(e) = self.ui.post(UiMessage::SetLabelText(text)) {
            log_warn!("Dropped display update: {}", e);
        }
    }

    // `as` casts saturate, so non-finite values cannot panic here
    fn format_bpm(value: f64) -> String {
        (value as i64).to_string()
    }
}
