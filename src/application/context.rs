//! Per-operation deadline and cancellation
//!
//! Every `DocumentStore` call receives an [`OperationContext`]. Handlers derive
//! one from the server's shutdown token so that a slow backend cannot stall a
//! request past its deadline, and shutdown can abort whatever is still running.

use std::future::Future;
use std::time::Duration;

use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

use crate::application::ports::StoreError;

#[derive(Debug, Clone)]
pub struct OperationContext {
    deadline: Option<Instant>,
    cancellation: CancellationToken,
}

impl OperationContext {
    /// Context with no deadline that is never cancelled from outside
    pub fn background() -> Self {
        Self {
            deadline: None,
            cancellation: CancellationToken::new(),
        }
    }

    /// Context that expires after `timeout`
    pub fn with_timeout(timeout: Duration) -> Self {
        Self::background().timeout(timeout)
    }

    /// Context cancelled together with `parent`, optionally bounded by `timeout`
    pub fn child_of(parent: &CancellationToken, timeout: Option<Duration>) -> Self {
        let ctx = Self {
            deadline: None,
            cancellation: parent.child_token(),
        };
        match timeout {
            Some(t) => ctx.timeout(t),
            None => ctx,
        }
    }

    fn timeout(mut self, timeout: Duration) -> Self {
        self.deadline = Some(Instant::now() + timeout);
        self
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    pub fn cancel(&self) {
        self.cancellation.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancellation.is_cancelled()
    }

    /// Fail fast if the context is already cancelled or past its deadline
    pub fn check(&self) -> Result<(), StoreError> {
        if self.cancellation.is_cancelled() {
            return Err(StoreError::Cancelled);
        }
        if let Some(deadline) = self.deadline {
            if Instant::now() >= deadline {
                return Err(StoreError::DeadlineExceeded);
            }
        }
        Ok(())
    }

    /// Drive `operation` until it finishes, the deadline passes, or the
    /// context is cancelled. The losing future is dropped.
    pub async fn run<T, F>(&self, operation: F) -> Result<T, StoreError>
    where
        F: Future<Output = Result<T, StoreError>>,
    {
        self.check()?;

        tokio::select! {
            biased;
            _ = self.cancellation.cancelled() => Err(StoreError::Cancelled),
            _ = sleep_until_deadline(self.deadline) => Err(StoreError::DeadlineExceeded),
            result = operation => result,
        }
    }
}

impl Default for OperationContext {
    fn default() -> Self {
        Self::background()
    }
}

async fn sleep_until_deadline(deadline: Option<Instant>) {
    match deadline {
        Some(deadline) => tokio::time::sleep_until(deadline).await,
        None => std::future::pending::<()>().await,
    }
}
