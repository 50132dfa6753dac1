/// Heart rate monitoring module
///
/// The observe-then-fetch pipeline: one observer registration per session,
/// one store query per change notification, one display hand-off per query
/// that produces a value.
pub mod observation;
pub mod service;

// Re-exports for easy access
pub use observation::ObservationHandle;
pub use service::{FetchOutcome, HeartRateMonitor, MonitorPhase};
