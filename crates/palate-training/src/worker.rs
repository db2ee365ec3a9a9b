//! Background retraining on a tokio blocking thread.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use tokio::runtime::Handle;
use tokio::sync::mpsc::{self, error::TrySendError};
use tokio::task::JoinHandle;

use palate_core::errors::{PalateError, PalateResult};
use palate_core::traits::{IModelStorage, IPreferenceStorage};

use crate::Retrainer;

/// Runs [`Retrainer::retrain`] off the caller's thread.
///
/// The request channel holds one pending slot. A request arriving while one
/// is already pending is folded into it, since the pending run will see
/// every row the new request would have.
pub struct RetrainWorker {
    sender: Option<mpsc::Sender<()>>,
    task: Option<JoinHandle<()>>,
    coalesced: Arc<AtomicU64>,
}

impl RetrainWorker {
    pub fn spawn<S>(retrainer: Arc<Retrainer<S>>, runtime: &Handle) -> Self
    where
        S: IPreferenceStorage + IModelStorage + ?Sized + 'static,
    {
        let (sender, mut receiver) = mpsc::channel::<()>(1);
        let task = runtime.spawn_blocking(move || {
            while receiver.blocking_recv().is_some() {
                // Failures are already logged and counted by the retrainer.
                if let Ok(outcome) = retrainer.retrain() {
                    tracing::debug!(%outcome, "background retrain finished");
                }
            }
            tracing::debug!("retrain worker stopped");
        });

        Self {
            sender: Some(sender),
            task: Some(task),
            coalesced: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Queue a retrain. `Ok(false)` means it merged with a pending request.
    pub fn request(&self) -> PalateResult<bool> {
        let sender = self
            .sender
            .as_ref()
            .ok_or_else(|| PalateError::Worker("retrain worker is shut down".to_string()))?;
        match sender.try_send(()) {
            Ok(()) => Ok(true),
            Err(TrySendError::Full(())) => {
                self.coalesced.fetch_add(1, Ordering::Relaxed);
                Ok(false)
            }
            Err(TrySendError::Closed(())) => {
                Err(PalateError::Worker("retrain worker exited".to_string()))
            }
        }
    }

    /// Requests merged into an already pending one.
    pub fn coalesced(&self) -> u64 {
        self.coalesced.load(Ordering::Relaxed)
    }

    /// Close the queue, let the pending request (if any) finish, and wait.
    pub async fn shutdown(mut self) -> PalateResult<()> {
        drop(self.sender.take());
        if let Some(task) = self.task.take() {
            task.await
                .map_err(|e| PalateError::Worker(format!("retrain worker panicked: {e}")))?;
        }
        Ok(())
    }
}
