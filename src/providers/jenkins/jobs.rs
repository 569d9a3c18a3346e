use log::{debug, info, warn};
use serde_json::Value;
use url::Url;

use crate::error::{JitdashError, Result};

use super::client::JenkinsClient;
use super::instance::api_url;
use super::json::{as_object, JsonObject};
use super::types::{Build, Instance, Job};

pub const FOLDER_CLASS: &str = "com.cloudbees.hudson.plugins.folder.Folder";
pub const JOB_CLASS: &str = "hudson.model.FreeStyleProject";
pub const BUILD_CLASS: &str = "hudson.model.FreeStyleBuild";

/// Collects the jobs of every folder of `instance`, in folder order.
///
/// A folder that cannot be fetched or decoded contributes no jobs; the scan
/// carries on with the next one.
pub async fn fetch_jobs(client: &JenkinsClient, instance: &Instance) -> Vec<Job> {
    info!("Fetching jobs for instance {}", instance.name);

    let mut jobs = Vec::new();
    for folder_url in &instance.folders {
        info!("Fetching folder {folder_url}");

        match fetch_folder(client, instance, folder_url).await {
            Ok(folder_jobs) => jobs.extend(folder_jobs),
            Err(e) => warn!("Skipping folder {folder_url}: {e}"),
        }
    }

    jobs
}

async fn fetch_folder(
    client: &JenkinsClient,
    instance: &Instance,
    folder_url: &Url,
) -> Result<Vec<Job>> {
    let listing = client.get_object(folder_url).await?;
    let folder = JsonObject::new(&listing);

    if !folder.has_class(FOLDER_CLASS) {
        debug!("{folder_url} is not a folder listing, ignoring");
        return Ok(Vec::new());
    }

    let Some(entries) = folder.get_array("jobs") else {
        return Ok(Vec::new());
    };

    let mut jobs = Vec::new();
    for entry in entries {
        match process_job(client, instance, entry).await {
            Ok(Some(job)) => jobs.push(job),
            Ok(None) => {}
            Err(e) => warn!("Skipping job in {folder_url}: {e}"),
        }
    }

    Ok(jobs)
}

/// Turns one `jobs` entry into a [`Job`] with stub builds.
///
/// Returns `Ok(None)` for entries that are not freestyle jobs, lack a name
/// or url, or are excluded. Excluded jobs are never fetched.
async fn process_job(
    client: &JenkinsClient,
    instance: &Instance,
    entry: &Value,
) -> Result<Option<Job>> {
    let Some(job) = as_object(entry) else {
        return Ok(None);
    };

    if !job.has_class(JOB_CLASS) {
        return Ok(None);
    }

    let Some(name) = job.get_string("name") else {
        return Ok(None);
    };

    if instance.is_excluded(name) {
        debug!("Excluded job {name}");
        return Ok(None);
    }

    let Some(url) = job.get_string("url") else {
        return Ok(None);
    };

    let listing_url = api_url(url)
        .map_err(|e| JitdashError::Shape(format!("job {name} has bad url {url}: {e}")))?;
    let listing = client.get_object(&listing_url).await?;

    let entries = JsonObject::new(&listing)
        .get_array("builds")
        .ok_or_else(|| JitdashError::Shape(format!("job {name} lists no builds")))?;

    info!("Processing builds for job {name}");

    let builds = entries.iter().filter_map(process_build).collect();

    Ok(Some(Job::new(name.to_string(), url.to_string(), builds)))
}

/// Reads a build stub from a job listing entry.
pub fn process_build(entry: &Value) -> Option<Build> {
    let build = as_object(entry)?;

    if !build.has_class(BUILD_CLASS) {
        return None;
    }

    let id = build.get_integer("number")?;
    let url = build.get_string("url")?;

    Some(Build::stub(id, url.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_process_build() {
        let entry = json!({
            "_class": BUILD_CLASS,
            "number": 42,
            "url": "http://ci/job/a/42/",
        });

        let build = process_build(&entry).unwrap();
        assert_eq!(build, Build::stub(42, "http://ci/job/a/42/".into()));
    }

    #[test]
    fn test_process_build_accepts_float_number() {
        let entry = json!({"_class": BUILD_CLASS, "number": 42.0, "url": "http://ci/job/a/42/"});
        assert_eq!(process_build(&entry).unwrap().id, 42);
    }

    #[test]
    fn test_process_build_rejects_other_classes() {
        let entry = json!({
            "_class": "org.jenkinsci.plugins.workflow.job.WorkflowRun",
            "number": 42,
            "url": "http://ci/job/a/42/",
        });
        assert!(process_build(&entry).is_none());
        assert!(process_build(&json!({"number": 42, "url": "u"})).is_none());
    }

    #[test]
    fn test_process_build_requires_number_and_url() {
        assert!(process_build(&json!({"_class": BUILD_CLASS, "url": "u"})).is_none());
        assert!(process_build(&json!({"_class": BUILD_CLASS, "number": 1})).is_none());
        let quoted_number = json!({"_class": BUILD_CLASS, "number": "1", "url": "u"});
        assert!(process_build(&quoted_number).is_none());
        assert!(process_build(&json!("not an object")).is_none());
    }
}
