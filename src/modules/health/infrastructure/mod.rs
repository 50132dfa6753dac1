pub mod simulated_store;
pub mod simulation;

pub use simulated_store::SimulatedHealthStore;
pub use simulation::{PulseSimulator, SimulationConfig};
