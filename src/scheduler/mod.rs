//! Scheduler facade: jobs, tasks and dependency graphs

mod graphs;
mod jobs;
mod tasks;

pub use graphs::GraphsApi;
pub use jobs::JobsApi;
pub use tasks::TasksApi;

use crate::transport::Transport;

/// Groups the `/scheduler` endpoints
#[derive(Clone, Debug)]
pub struct Scheduler {
    pub jobs: JobsApi,
    pub tasks: TasksApi,
    pub graphs: GraphsApi,
}

impl Scheduler {
    pub(crate) fn new(transport: Transport) -> Self {
        Self {
            jobs: JobsApi::new(transport.clone()),
            tasks: TasksApi::new(transport.clone()),
            graphs: GraphsApi::new(transport),
        }
    }
}
