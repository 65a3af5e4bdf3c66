//! Default connection parameters

use std::env;
use std::str::FromStr;
use std::time::Duration;
use crate::error::{Result, SdkError};
use crate::target::ConnectionTarget;

pub const ENV_HOST: &str = "CHRONOS_HOST";
pub const ENV_PORT: &str = "CHRONOS_PORT";
pub const ENV_SECURE: &str = "CHRONOS_SECURE";
pub const ENV_STEP_TIMEOUT_SECS: &str = "CHRONOS_STEP_TIMEOUT_SECS";

/// Process-wide defaults for reaching a Chronos server
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientDefaults {
    /// Scheduler host name or address
    pub host: String,
    /// Scheduler HTTP port
    pub port: u16,
    /// Use HTTPS instead of HTTP
    pub secure: bool,
    /// Bound applied to each harness step
    pub step_timeout: Duration,
    /// Transport-level timeout for a single HTTP request
    pub request_timeout: Duration,
}

impl Default for ClientDefaults {
    fn default() -> Self {
        Self {
            host: "localhost".to_string(),
            port: 4400,
            secure: false,
            step_timeout: Duration::from_secs(4),
            request_timeout: Duration::from_secs(30),
        }
    }
}

impl ClientDefaults {
    /// Builds defaults, overlaying any `CHRONOS_*` environment variables
    ///
    /// Unparsable values are reported rather than silently ignored.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut defaults = Self::default();
        if let Some(host) = lookup(ENV_HOST) {
            defaults.host = host;
        }
        if let Some(port) = lookup(ENV_PORT) {
            defaults.port = parse_var(ENV_PORT, &port)?;
        }
        if let Some(secure) = lookup(ENV_SECURE) {
            defaults.secure = parse_bool(&secure)
                .ok_or_else(|| SdkError::config(format!("{} must be a boolean, got '{}'", ENV_SECURE, secure)))?;
        }
        if let Some(secs) = lookup(ENV_STEP_TIMEOUT_SECS) {
            defaults.step_timeout = Duration::from_secs(parse_var(ENV_STEP_TIMEOUT_SECS, &secs)?);
        }
        Ok(defaults)
    }

    /// The default endpoint as a validated target
    pub fn target(&self) -> Result<ConnectionTarget> {
        ConnectionTarget::new(self.host.clone(), self.port, self.secure)
    }
}

fn parse_var<T: FromStr>(key: &str, raw: &str) -> Result<T>
where
    T::Err: std::fmt::Display,
{
    raw.trim()
        .parse()
        .map_err(|e| SdkError::config(format!("{} has invalid value '{}': {}", key, raw, e)))
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
