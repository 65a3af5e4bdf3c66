//! Success capability shared by every response kind

use std::fmt;
use std::sync::Arc;

/// A resolved response that can be judged for success
///
/// Implemented by every value the facade resolves to, so the evaluator can
/// check mixed response kinds through one static interface.
pub trait ServerResponse {
    /// Whether the server reported the operation as successful
    fn is_success(&self) -> bool;

    /// Short human readable rendering used in diagnostics
    fn describe(&self) -> String;
}

/// Type-erased response, for harness runs that mix response kinds
pub type AnyResponse = Arc<dyn ServerResponse + Send + Sync>;

impl fmt::Debug for dyn ServerResponse + Send + Sync {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ServerResponse").field(&self.describe()).finish()
    }
}

impl ServerResponse for bool {
    fn is_success(&self) -> bool {
        *self
    }

    fn describe(&self) -> String {
        self.to_string()
    }
}

impl<R: ServerResponse + ?Sized> ServerResponse for Arc<R> {
    fn is_success(&self) -> bool {
        (**self).is_success()
    }

    fn describe(&self) -> String {
        (**self).describe()
    }
}
