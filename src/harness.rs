//! Ordered execution of deferred calls
//!
//! A [`Harness`] runs a list of [`Step`]s strictly one after another: a step's
//! call is only produced once the previous step has resolved, so later steps
//! can rely on state the earlier ones set up on the server. Each step gets the
//! same bound. The first step that cannot be retrieved (remote failure or
//! timeout) aborts the rest of the run.
//!
//! The harness only cares about retrieval. Whether a retrieved response
//! counts as a success is decided afterwards by [`all_success`].
//!
//! [`all_success`]: crate::evaluate::all_success

use std::fmt;
use std::time::Duration;
use thiserror::Error;
use crate::config::ClientDefaults;
use crate::deferred::Deferred;
use crate::error::{Result, SdkError};
use crate::evaluate::{all_success, SuccessEvaluationError};
use crate::response::ServerResponse;
use crate::target::ConnectionTarget;

/// Default bound applied to every step
pub const DEFAULT_STEP_TIMEOUT: Duration = Duration::from_secs(4);

type Action<T> = Box<dyn FnOnce() -> Result<Deferred<T>> + Send>;

/// One lazily produced call plus whether its outcome is checked
pub struct Step<T> {
    care: bool,
    action: Action<T>,
}

impl<T> Step<T> {
    pub fn new<F>(care: bool, action: F) -> Self
    where
        F: FnOnce() -> Result<Deferred<T>> + Send + 'static,
    {
        Self {
            care,
            action: Box::new(action),
        }
    }

    /// A step whose response must report success
    pub fn check<F>(action: F) -> Self
    where
        F: FnOnce() -> Result<Deferred<T>> + Send + 'static,
    {
        Self::new(true, action)
    }

    /// A setup or cleanup step: executed and kept, but never judged
    pub fn do_not_check<F>(action: F) -> Self
    where
        F: FnOnce() -> Result<Deferred<T>> + Send + 'static,
    {
        Self::new(false, action)
    }

    pub fn care(&self) -> bool {
        self.care
    }
}

impl<T> fmt::Debug for Step<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Step").field("care", &self.care).finish_non_exhaustive()
    }
}

/// A retrieved step value, in the same position as its step
#[derive(Debug, Clone)]
pub struct Checked<T> {
    pub care: bool,
    pub target: ConnectionTarget,
    pub operation: &'static str,
    pub value: T,
}

/// A step could not be retrieved, so the run stopped there
#[derive(Error, Debug)]
#[error(
    "Sequence aborted at step {step}{} [care: {care}] after {} completed step(s): {cause}",
    operation_suffix(.operation),
    .completed.len()
)]
pub struct SequenceAborted<T> {
    /// 1-based position of the failing step
    pub step: usize,
    pub care: bool,
    /// Unknown when the step failed before producing its call
    pub operation: Option<&'static str>,
    #[source]
    pub cause: SdkError,
    /// Results of the steps before `step`
    pub completed: Vec<Checked<T>>,
}

fn operation_suffix(operation: &Option<&'static str>) -> String {
    operation.map(|op| format!(" ({})", op)).unwrap_or_default()
}

/// Failure of [`Harness::run_and_evaluate`]
#[derive(Error, Debug)]
pub enum HarnessError<T> {
    /// A step could not be retrieved
    #[error(transparent)]
    Aborted(#[from] SequenceAborted<T>),
    /// Every step was retrieved but a checked response reported failure
    #[error("{error}")]
    Evaluation {
        #[source]
        error: SuccessEvaluationError,
        results: Vec<Checked<T>>,
    },
}

/// Runs steps in order with one fixed bound per step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Harness {
    step_timeout: Duration,
}

impl Default for Harness {
    fn default() -> Self {
        Self::new(DEFAULT_STEP_TIMEOUT)
    }
}

impl Harness {
    pub fn new(step_timeout: Duration) -> Self {
        Self { step_timeout }
    }

    pub fn from_defaults(defaults: &ClientDefaults) -> Self {
        Self::new(defaults.step_timeout)
    }

    pub fn step_timeout(&self) -> Duration {
        self.step_timeout
    }

    /// Produces and retrieves each step in turn
    ///
    /// Returns one [`Checked`] per step, in step order. The first step whose
    /// call fails, times out, or cannot even be produced stops the run; no
    /// later step is produced.
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// use chronos_client::{chronos, all_success, Harness, Step};
    ///
    /// # #[tokio::main]
    /// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// let client = chronos::global()?;
    /// let results = Harness::default()
    ///     .run(vec![Step::check(move || client.debug.ping("localhost", 4400, false))])
    ///     .await?;
    /// all_success(&results)?;
    /// # Ok(())
    /// # }
    /// ```
    pub async fn run<T>(&self, steps: Vec<Step<T>>) -> std::result::Result<Vec<Checked<T>>, SequenceAborted<T>>
    where
        T: Clone + Send + 'static,
    {
        let total = steps.len();
        let mut completed = Vec::with_capacity(total);

        for (index, step) in steps.into_iter().enumerate() {
            let number = index + 1;
            let care = step.care;

            let mut deferred = match (step.action)() {
                Ok(deferred) => deferred,
                Err(cause) => {
                    log::error!("Step {}/{} could not be dispatched: {}", number, total, cause);
                    return Err(SequenceAborted {
                        step: number,
                        care,
                        operation: None,
                        cause,
                        completed,
                    });
                }
            };

            let operation = deferred.operation();
            log::debug!("Step {}/{}: {} on <{}> (care: {})", number, total, operation, deferred.target(), care);

            match deferred.retrieve(self.step_timeout).await {
                Ok(value) => completed.push(Checked {
                    care,
                    target: deferred.target().clone(),
                    operation,
                    value,
                }),
                Err(cause) => {
                    log::error!("Step {}/{} ({}) failed: {}", number, total, operation, cause);
                    return Err(SequenceAborted {
                        step: number,
                        care,
                        operation: Some(operation),
                        cause,
                        completed,
                    });
                }
            }
        }

        Ok(completed)
    }

    /// [`run`](Self::run) followed by [`all_success`]
    pub async fn run_and_evaluate<T>(&self, steps: Vec<Step<T>>) -> std::result::Result<Vec<Checked<T>>, HarnessError<T>>
    where
        T: ServerResponse + Clone + Send + 'static,
    {
        let results = self.run(steps).await?;
        match all_success(&results) {
            Ok(()) => Ok(results),
            Err(error) => Err(HarnessError::Evaluation { error, results }),
        }
    }
}
