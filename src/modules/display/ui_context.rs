//! Single-threaded UI run loop
//!
//! All display mutation funnels through one dedicated OS thread. The label
//! is moved into the loop at spawn time, so no other thread can touch it;
//! the rest of the app talks to the loop through a cloneable `UiHandle`.

use std::thread::{self, ThreadId};
use tokio::sync::mpsc;

use crate::log_warn;
use crate::shared::errors::{MonitorError, MonitorResult};

use super::label::DisplayLabel;

/// Message the UI loop consumes
#[derive(Debug, Clone, PartialEq)]
pub enum UiMessage {
    SetLabelText(String),
    Shutdown,
}

/// Cloneable poster onto the UI loop
#[derive(Clone)]
pub struct UiHandle {
    tx: mpsc::UnboundedSender<UiMessage>,
}

impl UiHandle {
    /// Queue a message for the UI thread. Fails only once the loop is gone.
    pub fn post(&self, message: UiMessage) -> MonitorResult<()> {
        self.tx
            .send(message)
            .map_err(|_| MonitorError::Display("UI loop is no longer running".to_string()))
    }
}

/// Owner of the UI thread and its message queue
pub struct UiContext {
    tx: mpsc::UnboundedSender<UiMessage>,
    thread_id: ThreadId,
    thread: Option<thread::JoinHandle<()>>,
}

impl UiContext {
    /// Spawn the run loop with `label` moved into it
    pub fn spawn(label: Box<dyn DisplayLabel>) -> MonitorResult<Self> {
        let (tx, mut rx) = mpsc::unbounded_channel::<UiMessage>();

        let thread = thread::Builder::new()
            .name("pulsewatch-ui".to_string())
            .spawn(move || {
                let mut label = label;
                // Queue order is delivery order; a Shutdown behind pending
                // updates lets those updates render first
                while let Some(message) = rx.blocking_recv() {
                    match message {
                        UiMessage::SetLabelText(text) => label.set_text(&text),
                        UiMessage::Shutdown => break,
                    }
                }
                log::debug!("UI loop exited");
            })
            .map_err(|e| MonitorError::Display(format!("failed to spawn UI thread: {}", e)))?;

        let thread_id = thread.thread().id();
        Ok(Self {
            tx,
            thread_id,
            thread: Some(thread),
        })
    }

    /// Identity of the thread all label mutation happens on
    pub fn thread_id(&self) -> ThreadId {
        self.thread_id
    }

    pub fn handle(&self) -> UiHandle {
        UiHandle {
            tx: self.tx.clone(),
        }
    }

    /// Drain already-posted messages, then stop and join the loop
    pub fn shutdown(mut self) {
        if self.tx.send(UiMessage::Shutdown).is_err() {
            log_warn!("UI loop already gone at shutdown");
        }
        if let Some(thread) = self.thread.take() {
            if thread.join().is_err() {
                log_warn!("UI thread panicked before shutdown");
            }
        }
    }
}

impl Drop for UiContext {
    fn drop(&mut self) {
        // Covers the paths that skip `shutdown`
        if let Some(thread) = self.thread.take() {
            let _ = self.tx.send(UiMessage::Shutdown);
            if thread.join().is_err() {
                log_warn!("UI thread panicked during teardown");
            }
        }
    }
}
