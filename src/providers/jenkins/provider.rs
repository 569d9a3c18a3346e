use chrono::Utc;
use log::{info, warn};

use crate::error::Result;
use crate::report::{InstanceReport, JobReport, Report};

use super::client::JenkinsClient;
use super::jobs::fetch_jobs;
use super::progress_bar::PhaseProgress;
use super::scheduler::fetch_all_details;
use super::types::{Instance, Job};

/// Jenkins history report provider.
///
/// Scans the folders of every configured instance for freestyle jobs,
/// fetches the details of their most recent builds concurrently and renders
/// each job's history as a sparkline.
pub struct JenkinsProvider {
    pub client: JenkinsClient,
}

impl JenkinsProvider {
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be constructed.
    pub fn new() -> Result<Self> {
        Ok(Self {
            client: JenkinsClient::new()?,
        })
    }

    /// Scans every instance in order and keeps the `max_builds` most recent
    /// builds of each job. Builds are still stubs afterwards.
    pub async fn scan(&self, instances: &[Instance], max_builds: usize) -> Vec<Vec<Job>> {
        let mut scanned = Vec::with_capacity(instances.len());

        for instance in instances {
            let mut jobs = fetch_jobs(&self.client, instance).await;
            for job in &mut jobs {
                job.retain_latest(max_builds);
            }

            if jobs.is_empty() {
                warn!("No jobs found for instance: {}", instance.name);
            }
            scanned.push(jobs);
        }

        scanned
    }

    /// Collects the full report.
    ///
    /// Progress is displayed in three phases:
    /// 1. Scanning folders and job listings (sequential)
    /// 2. Fetching build details (up to `workers` requests in flight)
    /// 3. Rendering the history of each job
    ///
    /// Only the HTTP client setup can fail; unreachable folders, jobs and
    /// builds just contribute less data.
    pub async fn collect_report(
        &self,
        instances: &[Instance],
        max_builds: usize,
        max_history: usize,
        workers: usize,
        show_progress: bool,
    ) -> Report {
        info!("Starting report collection for {} instances", instances.len());

        // Phase 1: Scanning
        let progress = PhaseProgress::start_phase_1(instances.len(), show_progress);

        let mut scanned = self.scan(instances, max_builds).await;

        let job_count: usize = scanned.iter().map(Vec::len).sum();
        let build_count: usize = scanned
            .iter()
            .flatten()
            .map(|job| job.builds.len())
            .sum();

        info!("Found {job_count} jobs with {build_count} builds to fetch");

        // Phase 2: Details
        let progress = progress.finish_phase_1_start_phase_2(job_count, build_count);

        let builds = scanned
            .iter_mut()
            .flatten()
            .flat_map(|job| job.builds.iter_mut());
        let summary = fetch_all_details(&self.client, builds, workers, progress.bar()).await;

        // Phase 3: Rendering
        let progress = progress.finish_phase_2_start_phase_3(summary.filled);

        let instances = instances
            .iter()
            .zip(scanned)
            .map(|(instance, jobs)| InstanceReport {
                name: instance.name.clone(),
                jobs: jobs
                    .into_iter()
                    .map(|job| JobReport {
                        history: job.render_history(max_history),
                        job,
                    })
                    .collect(),
            })
            .collect();

        progress.finish_phase_3();

        Report {
            generated_at: Utc::now(),
            max_builds,
            max_history,
            instances,
        }
    }
}
