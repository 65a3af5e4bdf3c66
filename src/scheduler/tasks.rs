//! Task control calls

use reqwest::Method;
use serde::Serialize;
use crate::deferred::Deferred;
use crate::error::Result;
use crate::model::Acknowledgement;
use crate::target::ConnectionTarget;
use crate::transport::Transport;

#[derive(Serialize, Debug)]
struct TaskUpdate {
    #[serde(rename = "statusCode")]
    status_code: i32,
}

/// Stateless dispatcher for `/scheduler/task*` endpoints
#[derive(Clone, Debug)]
pub struct TasksApi {
    transport: Transport,
}

impl TasksApi {
    pub(crate) fn new(transport: Transport) -> Self {
        Self { transport }
    }

    /// Kills every running task of a job
    pub fn kill_all(&self, host: &str, port: u16, secure: bool, job_name: &str) -> Result<Deferred<Acknowledgement>> {
        let target = ConnectionTarget::new(host, port, secure)?;
        self.transport.acknowledge(
            target,
            "tasks.kill_all",
            Method::DELETE,
            &["scheduler", "task", "kill", job_name],
            None::<&()>,
        )
    }

    /// Reports an asynchronous task as finished; `0` marks success
    pub fn complete(
        &self,
        host: &str,
        port: u16,
        secure: bool,
        task_id: &str,
        status_code: i32,
    ) -> Result<Deferred<Acknowledgement>> {
        let target = ConnectionTarget::new(host, port, secure)?;
        self.transport.acknowledge(
            target,
            "tasks.complete",
            Method::POST,
            &["scheduler", "task", task_id],
            Some(&TaskUpdate { status_code }),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_task_update_serialization() {
        let serialized = serde_json::to_string(&TaskUpdate { status_code: 1 }).unwrap();
        assert_eq!(serialized, r#"{"statusCode":1}"#);
    }
}
