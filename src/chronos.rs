//! Entry point grouping every facade

use std::sync::OnceLock;
use crate::config::ClientDefaults;
use crate::debug::DebugApi;
use crate::error::Result;
use crate::metrics::MetricsApi;
use crate::scheduler::Scheduler;
use crate::transport::Transport;

/// Root of the client surface
///
/// Holds no mutable state: every group is a dispatcher over one shared HTTP
/// client, so a `Chronos` can be cloned or shared freely across tasks.
///
/// # Example
///
/// ```rust,no_run
/// use chronos_client::{Chronos, ClientDefaults};
/// use std::time::Duration;
///
/// # #[tokio::main]
/// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let chronos = Chronos::new(&ClientDefaults::default())?;
/// let mut ping = chronos.debug.ping("localhost", 4400, false)?;
/// println!("alive: {}", ping.retrieve(Duration::from_secs(4)).await?);
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug)]
pub struct Chronos {
    pub scheduler: Scheduler,
    pub metrics: MetricsApi,
    pub debug: DebugApi,
}

impl Chronos {
    /// Builds the facades around a fresh HTTP client
    pub fn new(defaults: &ClientDefaults) -> Result<Self> {
        Ok(Self::from_transport(Transport::new(defaults.request_timeout)?))
    }

    /// Builds the facades around a caller-configured HTTP client
    pub fn with_http_client(http_client: reqwest::Client) -> Self {
        Self::from_transport(Transport::with_client(http_client))
    }

    fn from_transport(transport: Transport) -> Self {
        Self {
            scheduler: Scheduler::new(transport.clone()),
            metrics: MetricsApi::new(transport.clone()),
            debug: DebugApi::new(transport),
        }
    }
}

/// The process-wide instance, built on first use with default settings
///
/// A failure to build the HTTP client is returned rather than cached, so a
/// later call retries the construction.
pub fn global() -> Result<&'static Chronos> {
    static GLOBAL: OnceLock<Chronos> = OnceLock::new();
    if let Some(chronos) = GLOBAL.get() {
        return Ok(chronos);
    }
    let chronos = Chronos::new(&ClientDefaults::default())?;
    Ok(GLOBAL.get_or_init(|| chronos))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SdkError;

    #[test]
    fn test_global_is_shared() {
        let first = global().unwrap();
        assert!(std::ptr::eq(first, global().unwrap()));
    }

    #[test]
    fn test_malformed_target_fails_before_dispatch() {
        // No runtime here: a configuration error must win over dispatch
        let chronos = Chronos::new(&ClientDefaults::default()).unwrap();
        assert!(matches!(
            chronos.scheduler.jobs.list("", 4400, false),
            Err(SdkError::Configuration(ref m)) if m.contains("host")
        ));
        assert!(matches!(
            chronos.debug.ping("localhost", 0, false),
            Err(SdkError::Configuration(ref m)) if m.contains("port")
        ));
    }
}
