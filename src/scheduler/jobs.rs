//! Job listing, submission and lifecycle calls

use reqwest::Method;
use crate::deferred::Deferred;
use crate::error::Result;
use crate::model::{Acknowledgement, Job};
use crate::target::ConnectionTarget;
use crate::transport::Transport;

/// Stateless dispatcher for `/scheduler/job*` endpoints
#[derive(Clone, Debug)]
pub struct JobsApi {
    transport: Transport,
}

impl JobsApi {
    pub(crate) fn new(transport: Transport) -> Self {
        Self { transport }
    }

    /// Lists every job known to the scheduler
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// use chronos_client::chronos;
    /// use std::time::Duration;
    ///
    /// # #[tokio::main]
    /// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// let mut jobs = chronos::global()?.scheduler.jobs.list("localhost", 4400, false)?;
    /// for job in jobs.retrieve(Duration::from_secs(4)).await? {
    ///     println!("{}", job);
    /// }
    /// # Ok(())
    /// # }
    /// ```
    pub fn list(&self, host: &str, port: u16, secure: bool) -> Result<Deferred<Vec<Job>>> {
        let target = ConnectionTarget::new(host, port, secure)?;
        self.transport
            .get_json(target, "jobs.list", &["scheduler", "jobs"], Vec::new())
    }

    /// Lists jobs whose name matches `name`
    pub fn search(&self, host: &str, port: u16, secure: bool, name: &str) -> Result<Deferred<Vec<Job>>> {
        let target = ConnectionTarget::new(host, port, secure)?;
        self.transport.get_json(
            target,
            "jobs.search",
            &["scheduler", "jobs", "search"],
            vec![("name", name.to_string())],
        )
    }

    /// Submits (or replaces) a job run on an ISO 8601 schedule
    pub fn submit_scheduled(&self, host: &str, port: u16, secure: bool, job: &Job) -> Result<Deferred<Acknowledgement>> {
        let target = ConnectionTarget::new(host, port, secure)?;
        self.transport.acknowledge(
            target,
            "jobs.submit_scheduled",
            Method::POST,
            &["scheduler", "iso8601"],
            Some(job),
        )
    }

    /// Submits (or replaces) a job triggered by its parents
    pub fn submit_dependent(&self, host: &str, port: u16, secure: bool, job: &Job) -> Result<Deferred<Acknowledgement>> {
        let target = ConnectionTarget::new(host, port, secure)?;
        self.transport.acknowledge(
            target,
            "jobs.submit_dependent",
            Method::POST,
            &["scheduler", "dependency"],
            Some(job),
        )
    }

    /// Submits through the endpoint matching the job's kind
    pub fn submit(&self, host: &str, port: u16, secure: bool, job: &Job) -> Result<Deferred<Acknowledgement>> {
        if job.is_dependent() {
            self.submit_dependent(host, port, secure, job)
        } else {
            self.submit_scheduled(host, port, secure, job)
        }
    }

    /// Starts a job immediately, outside its schedule
    pub fn start(&self, host: &str, port: u16, secure: bool, name: &str) -> Result<Deferred<Acknowledgement>> {
        let target = ConnectionTarget::new(host, port, secure)?;
        self.transport.acknowledge(
            target,
            "jobs.start",
            Method::PUT,
            &["scheduler", "job", name],
            None::<&()>,
        )
    }

    /// Deletes a job
    pub fn delete(&self, host: &str, port: u16, secure: bool, name: &str) -> Result<Deferred<Acknowledgement>> {
        let target = ConnectionTarget::new(host, port, secure)?;
        self.transport.acknowledge(
            target,
            "jobs.delete",
            Method::DELETE,
            &["scheduler", "job", name],
            None::<&()>,
        )
    }
}
