//! Success evaluation of harness results

use thiserror::Error;
use crate::harness::Checked;
use crate::response::ServerResponse;
use crate::target::ConnectionTarget;

/// A checked step reported failure
///
/// Earlier steps may have changed server state that nothing rolls back, so
/// the message asks for manual cleanup.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("[CLEANUP REQUIRED] Unable to fully process step {step} ({operation}) on <{target}> for {response}")]
pub struct SuccessEvaluationError {
    /// 1-based position of the offending step
    pub step: usize,
    pub operation: &'static str,
    pub target: ConnectionTarget,
    /// `describe()` of the offending response
    pub response: String,
}

/// Passes when every checked result reports success
///
/// Unchecked results are skipped. Stops at the first checked failure, which
/// is the one reported.
pub fn all_success<T: ServerResponse>(results: &[Checked<T>]) -> Result<(), SuccessEvaluationError> {
    let offending = results
        .iter()
        .enumerate()
        .find(|(_, result)| result.care && !result.value.is_success());

    match offending {
        None => Ok(()),
        Some((index, result)) => {
            let error = SuccessEvaluationError {
                step: index + 1,
                operation: result.operation,
                target: result.target.clone(),
                response: result.value.describe(),
            };
            log::error!("{}", error);
            Err(error)
        }
    }
}
