//! Dependency graph rendering

use crate::deferred::Deferred;
use crate::error::Result;
use crate::model::{DependencyGraph, GraphFormat};
use crate::target::ConnectionTarget;
use crate::transport::Transport;

/// Stateless dispatcher for `/scheduler/graph/*` endpoints
#[derive(Clone, Debug)]
pub struct GraphsApi {
    transport: Transport,
}

impl GraphsApi {
    pub(crate) fn new(transport: Transport) -> Self {
        Self { transport }
    }

    /// The job dependency graph in Graphviz DOT format
    pub fn dot(&self, host: &str, port: u16, secure: bool) -> Result<Deferred<DependencyGraph>> {
        self.render(host, port, secure, GraphFormat::Dot, "graphs.dot")
    }

    /// The job dependency graph as `parent,child` rows
    pub fn csv(&self, host: &str, port: u16, secure: bool) -> Result<Deferred<DependencyGraph>> {
        self.render(host, port, secure, GraphFormat::Csv, "graphs.csv")
    }

    fn render(
        &self,
        host: &str,
        port: u16,
        secure: bool,
        format: GraphFormat,
        operation: &'static str,
    ) -> Result<Deferred<DependencyGraph>> {
        let target = ConnectionTarget::new(host, port, secure)?;
        let body = self.transport.get_text(target, operation, format.path())?;
        Ok(body.map(move |body| DependencyGraph { format, body }))
    }
}
