use chrono::{DateTime, Utc};
use serde_json::Value;

use crate::error::{JitdashError, Result};

use super::client::JenkinsClient;
use super::instance::api_url;
use super::json::{as_object, JsonObject};
use super::types::Build;

pub const TEST_RESULT_CLASS: &str = "hudson.tasks.junit.TestResultAction";

const FAILURE_RESULT: &str = "FAILURE";

/// The fields of a build detail page that the report needs.
#[derive(Debug, Clone, PartialEq)]
pub struct BuildDetails {
    pub timestamp: DateTime<Utc>,
    pub failures: i64,
    pub complete: bool,
}

impl BuildDetails {
    /// Parses a build detail page.
    ///
    /// `result` is `null` while Jenkins is still running the build, which
    /// reads as an empty result. A missing `building` flag is inferred from
    /// the result being empty.
    pub fn from_json(details: JsonObject<'_>) -> Result<Self> {
        let result = match details.get("result") {
            Some(Value::String(result)) => result.as_str(),
            Some(Value::Null) => "",
            _ => return Err(JitdashError::MissingResult),
        };

        let millis = details
            .get_integer("timestamp")
            .ok_or(JitdashError::MissingTimestamp)?;
        let timestamp =
            DateTime::<Utc>::from_timestamp_millis(millis).ok_or(JitdashError::MissingTimestamp)?;

        let building = details.get_bool("building").unwrap_or(result.is_empty());

        // The last test result action wins.
        let mut failures = details
            .get_array("actions")
            .unwrap_or_default()
            .iter()
            .filter_map(as_object)
            .filter(|action| action.has_class(TEST_RESULT_CLASS))
            .last()
            .map_or(0, |action| action.get_integer("failCount").unwrap_or(0))
            .max(0);

        if failures == 0 && result == FAILURE_RESULT {
            failures = Build::UNTRACKED_FAILURE;
        }

        Ok(Self {
            timestamp,
            failures,
            complete: !building,
        })
    }

    pub fn apply(self, build: &mut Build) {
        build.timestamp = Some(self.timestamp);
        build.failures = self.failures;
        build.complete = self.complete;
    }
}

/// Fetches the detail page of `build` and fills it in.
///
/// On error `build` is left untouched.
pub async fn fetch_details(client: &JenkinsClient, build: &mut Build) -> Result<()> {
    let url = api_url(&build.url)
        .map_err(|e| JitdashError::Shape(format!("build has bad url {}: {e}", build.url)))?;

    let page = client.get_object(&url).await?;
    BuildDetails::from_json(JsonObject::new(&page))?.apply(build);

    Ok(())
}
