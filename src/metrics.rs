//! Operational metrics

use crate::deferred::Deferred;
use crate::error::{Result, SdkError};
use crate::model::{JobStat, ServerMetrics};
use crate::target::ConnectionTarget;
use crate::transport::Transport;

/// Percentiles the stats endpoint understands
pub const PERCENTILES: [&str; 6] = ["median", "75thPercentile", "95thPercentile", "98thPercentile", "99thPercentile", "999thPercentile"];

/// Stateless dispatcher for metrics endpoints
#[derive(Clone, Debug)]
pub struct MetricsApi {
    transport: Transport,
}

impl MetricsApi {
    pub(crate) fn new(transport: Transport) -> Self {
        Self { transport }
    }

    /// Full server metrics registry
    pub fn full(&self, host: &str, port: u16, secure: bool) -> Result<Deferred<ServerMetrics>> {
        let target = ConnectionTarget::new(host, port, secure)?;
        self.transport.get_json(target, "metrics.full", &["metrics"], Vec::new())
    }

    /// Per-job run time at one of [`PERCENTILES`]
    pub fn summary(&self, host: &str, port: u16, secure: bool, percentile: &str) -> Result<Deferred<Vec<JobStat>>> {
        if !PERCENTILES.contains(&percentile) {
            return Err(SdkError::config(format!(
                "unknown percentile '{}', expected one of {}",
                percentile,
                PERCENTILES.join(", ")
            )));
        }
        let target = ConnectionTarget::new(host, port, secure)?;
        self.transport.get_json(
            target,
            "metrics.summary",
            &["scheduler", "stats", percentile],
            Vec::new(),
        )
    }
}
