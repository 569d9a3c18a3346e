use chrono::{DateTime, Utc};
use regex::Regex;
use serde::Serialize;
use url::Url;

/// A configured Jenkins server (or part of one) scanned for jobs.
///
/// Built once from configuration and never modified afterwards.
#[derive(Debug, Clone)]
pub struct Instance {
    /// Configuration key, used as the report heading
    pub name: String,
    /// Folder listing endpoints (already suffixed with `api/json`)
    pub folders: Vec<Url>,
    /// Jobs whose name matches any of these are skipped entirely
    pub exclude: Vec<Regex>,
}

impl Instance {
    pub fn is_excluded(&self, job_name: &str) -> bool {
        self.exclude.iter().any(|re| re.is_match(job_name))
    }
}

/// A Jenkins job and its build history.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Job {
    pub name: String,
    pub url: String,
    /// Ascending by build id
    pub builds: Vec<Build>,
}

impl Job {
    /// Creates a job, sorting `builds` by id since listings are not
    /// guaranteed to be ordered.
    pub fn new(name: String, url: String, mut builds: Vec<Build>) -> Self {
        builds.sort_by_key(|build| build.id);
        Self { name, url, builds }
    }

    /// Keeps only the `max_builds` most recent (highest id) builds.
    pub fn retain_latest(&mut self, max_builds: usize) {
        if self.builds.len() > max_builds {
            let excess = self.builds.len() - max_builds;
            self.builds.drain(..excess);
        }
    }
}

/// A single execution of a job.
///
/// Starts as a stub holding only `id` and `url`; the detail fetch fills in
/// the rest. A stub whose fetch failed keeps `complete == false`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Build {
    /// Build number
    pub id: i64,
    /// Build page URL
    pub url: String,
    /// Start time, known once details are fetched
    pub timestamp: Option<DateTime<Utc>>,
    /// `0` passed, `> 0` failing tests, [`Build::UNTRACKED_FAILURE`] failed
    /// without a test count
    pub failures: i64,
    /// False while running or when details could not be fetched
    pub complete: bool,
}

impl Build {
    /// Marks a failed build that has no per-test failure count.
    pub const UNTRACKED_FAILURE: i64 = -1;

    pub fn stub(id: i64, url: String) -> Self {
        Self {
            id,
            url,
            timestamp: None,
            failures: 0,
            complete: false,
        }
    }
}
