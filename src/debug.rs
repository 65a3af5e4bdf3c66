//! Liveness checks

use crate::deferred::Deferred;
use crate::error::Result;
use crate::target::ConnectionTarget;
use crate::transport::Transport;

/// Stateless dispatcher for the `/ping` endpoint
#[derive(Clone, Debug)]
pub struct DebugApi {
    transport: Transport,
}

impl DebugApi {
    pub(crate) fn new(transport: Transport) -> Self {
        Self { transport }
    }

    /// Resolves to `true` when the server answers `pong`
    pub fn ping(&self, host: &str, port: u16, secure: bool) -> Result<Deferred<bool>> {
        let target = ConnectionTarget::new(host, port, secure)?;
        let body = self.transport.get_text(target, "debug.ping", &["ping"])?;
        Ok(body.map(|body| is_pong(&body)))
    }
}

fn is_pong(body: &str) -> bool {
    body.trim().eq_ignore_ascii_case("pong")
}
