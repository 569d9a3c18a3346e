use std::future::Future;

use futures::stream::{self, StreamExt};
use indicatif::ProgressBar;
use log::{debug, info};

use crate::error::Result;

use super::client::JenkinsClient;
use super::details::fetch_details;
use super::types::Build;

/// Maximum number of detail requests in flight at once.
pub const DEFAULT_WORKERS: usize = 100;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FetchSummary {
    pub attempted: usize,
    pub filled: usize,
}

/// Fetches details for every build, with at most `workers` requests in flight.
///
/// Each build is attempted exactly once and the call only returns once all
/// attempts have finished. A failed fetch is logged and leaves that build as
/// a stub. Every future owns the only borrow of its build, so no locking is
/// involved.
pub async fn fetch_all_details<'a, I>(
    client: &JenkinsClient,
    builds: I,
    workers: usize,
    progress: &ProgressBar,
) -> FetchSummary
where
    I: IntoIterator<Item = &'a mut Build>,
{
    let summary = fetch_bounded(builds, workers, progress, |build| {
        fetch_details(client, build)
    })
    .await;

    info!(
        "Fetched details for {}/{} builds",
        summary.filled, summary.attempted
    );

    summary
}

async fn fetch_bounded<'a, I, F, Fut>(
    builds: I,
    workers: usize,
    progress: &ProgressBar,
    fetch: F,
) -> FetchSummary
where
    I: IntoIterator<Item = &'a mut Build>,
    F: Fn(&'a mut Build) -> Fut,
    Fut: Future<Output = Result<()>>,
{
    let outcomes: Vec<bool> = stream::iter(builds)
        .map(|build| {
            let url = build.url.clone();
            let attempt = fetch(build);
            async move {
                let result = attempt.await;
                if let Err(e) = &result {
                    debug!("Discarding details for {url}: {e}");
                }
                progress.inc(1);
                result.is_ok()
            }
        })
        .buffer_unordered(workers.max(1))
        .collect()
        .await;

    FetchSummary {
        attempted: outcomes.len(),
        filled: outcomes.iter().filter(|filled| **filled).count(),
    }
}
