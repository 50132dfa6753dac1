use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use crate::log_warn;
use crate::modules::health::domain::DataCategory;

/// Scoped handle to a running observer subscription.
///
/// The subscription lives exactly as long as this handle: `shutdown` tears
/// it down deterministically, and plain `drop` cancels the notification
/// loop, so a subscription can never outlive its owner.
pub struct ObservationHandle {
    category: DataCategory,
    token: CancellationToken,
    task: Option<JoinHandle<()>>,
}

impl ObservationHandle {
    pub(crate) fn new(
        category: DataCategory,
        token: CancellationToken,
        task: JoinHandle<()>,
    ) -> Self {
        Self {
            category,
            token,
            task: Some(task),
        }
    }

    /// Category the underlying observer watches
    pub fn category(&self) -> DataCategory {
        self.category
    }

    /// Whether the notification loop is still running
    pub fn is_active(&self) -> bool {
        self.task
            .as_ref()
            .map_or(false, |task| !task.is_finished())
    }

    /// Cancel the subscription and wait for the loop to wind down
    pub async fn shutdown(mut self) {
        self.token.cancel();
        if let Some(task) = self.task.take() {
            if task.await.is_err() {
                log_warn!("Notification loop for {} ended abnormally", self.category);
            }
        }
    }
}

impl Drop for ObservationHandle {
    fn drop(&mut self) {
        // The loop notices on its next select pass; no join here
        self.token.cancel();
    }
}
