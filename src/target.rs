//! Remote endpoint addressing

use std::fmt;
use url::{Host, Url};
use crate::error::{Result, SdkError};

/// Identifies the Chronos endpoint a single call is sent to
///
/// Targets are immutable and validated on construction, so every facade
/// call can address a different server within the same harness run.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ConnectionTarget {
    host: String,
    port: u16,
    secure: bool,
    base: Url,
}

impl ConnectionTarget {
    /// Validates and builds a target
    ///
    /// # Example
    ///
    /// ```rust
    /// use chronos_client::ConnectionTarget;
    ///
    /// let target = ConnectionTarget::new("localhost", 4400, false).unwrap();
    /// assert_eq!(target.base_url().as_str(), "http://localhost:4400/");
    /// assert!(ConnectionTarget::new("", 4400, false).is_err());
    /// ```
    pub fn new(host: impl Into<String>, port: u16, secure: bool) -> Result<Self> {
        let host = host.into();
        let trimmed = host.trim();
        if trimmed.is_empty() {
            return Err(SdkError::config("host must not be empty"));
        }
        if trimmed.contains("://") || trimmed.contains(['/', '?', '#', '@', '\\']) || trimmed.contains(char::is_whitespace) {
            return Err(SdkError::config(format!(
                "host '{}' must be a bare hostname or address",
                host
            )));
        }
        if port == 0 {
            return Err(SdkError::config("port must be between 1 and 65535"));
        }

        let literal = host_literal(trimmed);
        let expected = Host::parse(&literal)
            .map_err(|e| SdkError::config(format!("invalid host '{}': {}", host, e)))?;
        let scheme = if secure { "https" } else { "http" };
        let base = Url::parse(&format!("{}://{}:{}/", scheme, literal, port))?;

        // Host and port must come out of the URL exactly as given
        if base.host().map(|h| h.to_owned()) != Some(expected) || base.port_or_known_default() != Some(port) {
            return Err(SdkError::config(format!("invalid host '{}'", host)));
        }

        Ok(Self {
            host: trimmed.to_string(),
            port,
            secure,
            base,
        })
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub fn secure(&self) -> bool {
        self.secure
    }

    /// Base URL of the endpoint, with a trailing slash
    pub fn base_url(&self) -> &Url {
        &self.base
    }

    /// URL of `segments` under the endpoint root, each segment percent-encoded
    pub fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.base.clone();
        url.path_segments_mut()
            .map_err(|_| SdkError::config(format!("<{}> cannot carry a path", self)))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }
}

fn host_literal(host: &str) -> String {
    if host.contains(':') && !host.starts_with('[') {
        // Bare IPv6 literal
        format!("[{}]", host)
    } else {
        host.to_string()
    }
}

impl fmt::Display for ConnectionTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.host, self.port)
    }
}
