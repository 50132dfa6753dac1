/// Health data module
///
/// Models the device's health store as seen by the rest of the app:
/// - Domain: samples, categories, units, queries, authorization requests
/// - Traits: the `HealthStore` port and observer plumbing
/// - Infrastructure: in-memory store and the synthetic pulse feed
pub mod domain;
pub mod infrastructure;
pub mod traits;

// Re-exports for easy access
pub use domain::{
    AuthorizationRequest, DataCategory, QuantitySample, SampleFilter, SampleQuery, SortOrder, Unit,
};
pub use infrastructure::{PulseSimulator, SimulatedHealthStore, SimulationConfig};
pub use traits::{HealthStore, ObservationStream, ObserverEvent, ObserverSender};
