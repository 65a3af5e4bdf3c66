//! Chronos domain objects

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;
use crate::response::ServerResponse;

/// Environment variable passed to a job's command
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct EnvironmentVariable {
    pub name: String,
    pub value: String,
}

/// A named unit of scheduled work tracked by Chronos
///
/// Either `schedule` (an ISO 8601 repeating interval) or `parents` is set,
/// depending on whether the job is time-scheduled or dependency-triggered.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct Job {
    pub name: String,
    pub command: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schedule: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schedule_time_zone: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub parents: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub epsilon: Option<String>,
    pub owner: String,
    #[serde(rename = "async")]
    pub asynchronous: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cpus: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mem: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub disk: Option<f64>,
    pub disabled: bool,
    pub retries: u32,
    #[serde(skip_serializing)]
    pub success_count: u64,
    #[serde(skip_serializing)]
    pub error_count: u64,
    #[serde(skip_serializing)]
    pub last_success: String,
    #[serde(skip_serializing)]
    pub last_error: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub uris: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub environment_variables: Vec<EnvironmentVariable>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub arguments: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shell: Option<bool>,
}

impl Job {
    /// A job run on an ISO 8601 repeating schedule, e.g. `R/2014-01-01T00:00:00Z/PT1H`
    pub fn scheduled(name: impl Into<String>, command: impl Into<String>, schedule: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            command: command.into(),
            schedule: Some(schedule.into()),
            ..Default::default()
        }
    }

    /// A job triggered once all of its parents succeed
    pub fn dependent(name: impl Into<String>, command: impl Into<String>, parents: Vec<String>) -> Self {
        Self {
            name: name.into(),
            command: command.into(),
            parents,
            ..Default::default()
        }
    }

    pub fn is_dependent(&self) -> bool {
        !self.parents.is_empty()
    }
}

impl fmt::Display for Job {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Job {}", self.name)?;
        if let Some(schedule) = &self.schedule {
            write!(f, " (schedule: {})", schedule)?;
        } else if self.is_dependent() {
            write!(f, " (parents: {})", self.parents.join(", "))?;
        }
        Ok(())
    }
}

/// A listing is a successful response even when empty
impl ServerResponse for Vec<Job> {
    fn is_success(&self) -> bool {
        true
    }

    fn describe(&self) -> String {
        let names: Vec<&str> = self.iter().map(|job| job.name.as_str()).collect();
        format!("{} job(s) [{}]", self.len(), names.join(", "))
    }
}

/// Server metrics as exposed by the `/metrics` endpoint
#[derive(Deserialize, Debug, Clone, PartialEq, Default)]
#[serde(default)]
pub struct ServerMetrics {
    pub version: String,
    pub gauges: BTreeMap<String, Value>,
    pub counters: BTreeMap<String, Value>,
    pub histograms: BTreeMap<String, Value>,
    pub meters: BTreeMap<String, Value>,
    pub timers: BTreeMap<String, Value>,
}

impl ServerResponse for ServerMetrics {
    fn is_success(&self) -> bool {
        !self.version.is_empty()
    }

    fn describe(&self) -> String {
        format!(
            "metrics v{} ({} gauges, {} counters, {} timers)",
            self.version,
            self.gauges.len(),
            self.counters.len(),
            self.timers.len()
        )
    }
}

/// Per-job run time at a given percentile
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct JobStat {
    #[serde(rename = "jobNameLabel")]
    pub job_name: String,
    pub time: f64,
}

impl ServerResponse for Vec<JobStat> {
    fn is_success(&self) -> bool {
        true
    }

    fn describe(&self) -> String {
        format!("{} job stat(s)", self.len())
    }
}

/// Rendering format of the job dependency graph
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GraphFormat {
    Dot,
    Csv,
}

impl GraphFormat {
    pub fn path(self) -> &'static [&'static str] {
        match self {
            GraphFormat::Dot => &["scheduler", "graph", "dot"],
            GraphFormat::Csv => &["scheduler", "graph", "csv"],
        }
    }
}

/// The job dependency graph as rendered by the server
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DependencyGraph {
    pub format: GraphFormat,
    pub body: String,
}

impl DependencyGraph {
    /// Parent/child edges of a CSV rendering, skipping malformed rows
    pub fn csv_edges(&self) -> Vec<(&str, &str)> {
        if self.format != GraphFormat::Csv {
            return Vec::new();
        }
        self.body
            .lines()
            .filter_map(|line| {
                let mut cols = line.split(',').map(str::trim);
                match (cols.next(), cols.next()) {
                    (Some(a), Some(b)) if !a.is_empty() && !b.is_empty() => Some((a, b)),
                    _ => None,
                }
            })
            .collect()
    }
}

impl ServerResponse for DependencyGraph {
    fn is_success(&self) -> bool {
        true
    }

    fn describe(&self) -> String {
        format!("{:?} graph ({} bytes)", self.format, self.body.len())
    }
}

/// Outcome of a mutating call (submit, start, delete, kill, task update)
///
/// Non-2xx statuses are a domain-level failure carried in the value, not a
/// transport error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Acknowledgement {
    pub operation: &'static str,
    pub status: u16,
    pub body: String,
}

impl ServerResponse for Acknowledgement {
    fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    fn describe(&self) -> String {
        if self.body.is_empty() {
            format!("{} -> HTTP {}", self.operation, self.status)
        } else {
            format!("{} -> HTTP {}: {}", self.operation, self.status, self.body)
        }
    }
}
