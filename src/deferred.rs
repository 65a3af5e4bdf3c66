//! Deferred results for in-flight remote calls
//!
//! A [`Deferred`] is returned by every facade operation. The call itself runs
//! on a background tokio task; the caller decides when to wait for it, and
//! for how long, with [`Deferred::retrieve`].
//!
//! Timing out aborts the local task only. The request may already have
//! reached the server, so a timed out call must be treated as "outcome
//! unknown", never as failed or rolled back.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::time::Duration;
use tokio::runtime::Handle;
use tokio::task::AbortHandle;
use tokio::time::timeout;
use crate::error::{Result, SdkError, TransportError};
use crate::response::{AnyResponse, ServerResponse};
use crate::target::ConnectionTarget;

type CallFuture<T> = Pin<Box<dyn Future<Output = std::result::Result<T, TransportError>> + Send>>;

enum State<T> {
    Pending { call: CallFuture<T>, task: AbortHandle },
    Resolved(Result<T>),
}

/// Handle to the eventual outcome of one remote call
///
/// Resolved at most once. Later retrievals return the cached outcome, which
/// includes a cached timeout.
pub struct Deferred<T> {
    target: ConnectionTarget,
    operation: &'static str,
    state: State<T>,
}

impl<T: Send + 'static> Deferred<T> {
    /// Dispatches `call` onto the current tokio runtime without blocking
    ///
    /// Fails with a configuration error when no runtime is available.
    ///
    /// # Example
    ///
    /// ```rust
    /// use chronos_client::{ConnectionTarget, Deferred, TransportError};
    /// use std::time::Duration;
    ///
    /// # #[tokio::main]
    /// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// let target = ConnectionTarget::new("localhost", 4400, false)?;
    /// let mut answer = Deferred::spawn(target, "answer", async { Ok::<_, TransportError>(42) })?;
    /// assert_eq!(answer.retrieve(Duration::from_secs(1)).await?, 42);
    /// # Ok(())
    /// # }
    /// ```
    pub fn spawn<F>(target: ConnectionTarget, operation: &'static str, call: F) -> Result<Self>
    where
        F: Future<Output = std::result::Result<T, TransportError>> + Send + 'static,
    {
        let runtime = Handle::try_current().map_err(|_| {
            SdkError::config(format!("{} must be invoked from within a tokio runtime", operation))
        })?;

        log::debug!("Dispatching {} to <{}>", operation, target);
        let handle = runtime.spawn(call);
        let task = handle.abort_handle();
        let call: CallFuture<T> = Box::pin(async move {
            match handle.await {
                Ok(outcome) => outcome,
                Err(e) if e.is_cancelled() => Err(TransportError::Aborted("task cancelled".to_string())),
                Err(e) => Err(TransportError::Aborted(e.to_string())),
            }
        });

        Ok(Self {
            target,
            operation,
            state: State::Pending { call, task },
        })
    }

    /// An already resolved handle, useful for local steps in a harness run
    pub fn resolved(target: ConnectionTarget, operation: &'static str, value: T) -> Self {
        Self {
            target,
            operation,
            state: State::Resolved(Ok(value)),
        }
    }

    /// Transforms the eventual value without waiting for it
    pub fn map<U, F>(self, f: F) -> Deferred<U>
    where
        U: Send + 'static,
        F: FnOnce(T) -> U + Send + 'static,
    {
        let state = match self.state {
            State::Pending { call, task } => State::Pending {
                call: Box::pin(async move { call.await.map(f) }),
                task,
            },
            State::Resolved(outcome) => State::Resolved(outcome.map(f)),
        };
        Deferred {
            target: self.target,
            operation: self.operation,
            state,
        }
    }

    /// Erases the response type so different kinds can share one harness run
    pub fn erased(self) -> Deferred<AnyResponse>
    where
        T: ServerResponse + Sync,
    {
        self.map(|value| Arc::new(value) as AnyResponse)
    }
}

impl<T> Deferred<T> {
    pub fn target(&self) -> &ConnectionTarget {
        &self.target
    }

    pub fn operation(&self) -> &'static str {
        self.operation
    }

    /// Non-blocking check for diagnostics. Never poll on this; use `retrieve`.
    pub fn is_resolved(&self) -> bool {
        match &self.state {
            State::Pending { task, .. } => task.is_finished(),
            State::Resolved(_) => true,
        }
    }

    /// Waits up to `bound` for the call to resolve
    ///
    /// Returns the value, a [`SdkError::RemoteCall`] wrapping the transport
    /// cause and target, or [`SdkError::Timeout`]. On timeout the background
    /// task is aborted; whatever the server already did stays done.
    pub async fn retrieve(&mut self, bound: Duration) -> Result<T>
    where
        T: Clone,
    {
        let outcome = match &mut self.state {
            State::Resolved(outcome) => return outcome.clone(),
            State::Pending { call, task } => match timeout(bound, call.as_mut()).await {
                Ok(Ok(value)) => Ok(value),
                Ok(Err(cause)) => {
                    log::debug!("{} to <{}> failed: {}", self.operation, self.target, cause);
                    Err(SdkError::RemoteCall {
                        target: self.target.clone(),
                        operation: self.operation,
                        cause: Arc::new(cause),
                    })
                }
                Err(_) => {
                    task.abort();
                    log::warn!(
                        "{} to <{}> did not resolve within {:?}; abandoning wait, remote outcome unknown",
                        self.operation,
                        self.target,
                        bound
                    );
                    Err(SdkError::Timeout {
                        operation: self.operation,
                        after: bound,
                    })
                }
            },
        };

        self.state = State::Resolved(outcome.clone());
        outcome
    }
}
