// Shared Kernel - cross-cutting concerns used by every module

pub mod errors; // Shared error types
pub mod utils; // Logging and timing helpers

// Re-exports for convenience
pub use errors::{MonitorError, MonitorResult};
