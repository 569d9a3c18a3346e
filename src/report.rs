use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::providers::Job;

#[derive(Debug, Serialize)]
pub struct Report {
    pub generated_at: DateTime<Utc>,
    pub max_builds: usize,
    pub max_history: usize,
    pub instances: Vec<InstanceReport>,
}

/// The jobs found for one configured instance, in discovery order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InstanceReport {
    pub name: String,
    pub jobs: Vec<JobReport>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JobReport {
    #[serde(flatten)]
    pub job: Job,
    /// Rendered sparkline markup for the trailing history window
    pub history: String,
}
