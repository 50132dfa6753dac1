mod monitor_error;

pub use monitor_error::{MonitorError, MonitorResult};
