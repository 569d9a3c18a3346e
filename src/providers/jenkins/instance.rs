use regex::Regex;
use serde_json::Value;
use url::Url;

use crate::error::{JitdashError, Result};

use super::json::as_object;
use super::types::Instance;

/// Suffix that turns a Jenkins page URL into its JSON API endpoint.
pub const API_SUFFIX: &str = "api/json";

/// Appends [`API_SUFFIX`] to a Jenkins page URL, inserting the trailing
/// slash when it is missing.
pub fn api_url(page: &str) -> std::result::Result<Url, url::ParseError> {
    let mut base = Url::parse(page)?;
    if !base.path().ends_with('/') {
        let path = format!("{}/", base.path());
        base.set_path(&path);
    }
    base.join(API_SUFFIX)
}

/// Builds an [`Instance`] from the configuration entry `name`.
///
/// Folder URLs are validated and exclude patterns compiled up front, so a
/// bad entry fails before any request is made.
pub fn process_instance(name: &str, value: &Value) -> Result<Instance> {
    let object = as_object(value)
        .ok_or_else(|| JitdashError::Config(format!("Instance {name} is not an object")))?;

    let folder_values = object
        .get_array("folders")
        .ok_or_else(|| JitdashError::Config(format!("Instance {name} specifies no folders")))?;

    let folders = folder_values
        .iter()
        .map(|folder| {
            let folder = folder.as_str().ok_or_else(|| {
                JitdashError::Config(format!(
                    "Instance {name} contains an invalid folder: {folder}"
                ))
            })?;
            api_url(folder).map_err(|e| {
                JitdashError::Config(format!(
                    "Instance {name} contains an invalid folder {folder}: {e}"
                ))
            })
        })
        .collect::<Result<Vec<_>>>()?;

    let exclude_values = match object.get("exclude") {
        None => &[][..],
        Some(Value::Array(patterns)) => patterns.as_slice(),
        Some(other) => {
            return Err(JitdashError::Config(format!(
                "Instance {name} exclude must be a list, got {other}"
            )));
        }
    };

    let exclude = exclude_values
        .iter()
        .map(|pattern| {
            let pattern = pattern.as_str().ok_or_else(|| {
                JitdashError::Config(format!(
                    "Instance {name} contains an invalid exclude: {pattern}"
                ))
            })?;
            Regex::new(pattern).map_err(|e| {
                JitdashError::Config(format!(
                    "Instance {name} contains an invalid exclude {pattern}: {e}"
                ))
            })
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(Instance {
        name: name.to_string(),
        folders,
        exclude,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn config_error(result: Result<Instance>) -> String {
        match result {
            Err(JitdashError::Config(message)) => message,
            other => panic!("expected config error, got {other:?}"),
        }
    }

    #[test]
    fn test_api_url_appends_suffix() {
        assert_eq!(
            api_url("http://ci.example.com/job/tools/").unwrap().as_str(),
            "http://ci.example.com/job/tools/api/json"
        );
        assert_eq!(
            api_url("http://ci.example.com/job/tools").unwrap().as_str(),
            "http://ci.example.com/job/tools/api/json"
        );
        assert!(api_url("not a url").is_err());
    }

    #[test]
    fn test_process_instance() {
        let value = json!({
            "folders": ["http://ci/job/a/", "http://ci/job/b/"],
            "exclude": ["^tmp-", "sandbox"],
        });

        let instance = process_instance("main", &value).unwrap();

        assert_eq!(instance.name, "main");
        assert_eq!(instance.folders.len(), 2);
        assert_eq!(instance.folders[0].as_str(), "http://ci/job/a/api/json");
        assert_eq!(instance.folders[1].as_str(), "http://ci/job/b/api/json");
        assert_eq!(instance.exclude.len(), 2);
        assert!(instance.is_excluded("tmp-build"));
        assert!(instance.is_excluded("my-sandbox-job"));
        assert!(!instance.is_excluded("release"));
    }

    #[test]
    fn test_process_instance_without_exclude() {
        let instance = process_instance("main", &json!({"folders": []})).unwrap();
        assert!(instance.folders.is_empty());
        assert!(instance.exclude.is_empty());
    }

    #[test]
    fn test_process_instance_not_an_object() {
        let message = config_error(process_instance("main", &json!(["http://ci/"])));
        assert!(message.contains("not an object"));
    }

    #[test]
    fn test_process_instance_missing_folders() {
        let message = config_error(process_instance("main", &json!({"exclude": []})));
        assert!(message.contains("no folders"));

        let message = config_error(process_instance("main", &json!({"folders": "http://ci/"})));
        assert!(message.contains("no folders"));
    }

    #[test]
    fn test_process_instance_invalid_folder() {
        let message = config_error(process_instance("main", &json!({"folders": [42]})));
        assert!(message.contains("invalid folder"));

        let message = config_error(process_instance(
            "main",
            &json!({"folders": ["relative/path"]}),
        ));
        assert!(message.contains("invalid folder"));
    }

    #[test]
    fn test_process_instance_invalid_exclude() {
        let message = config_error(process_instance(
            "main",
            &json!({"folders": [], "exclude": [true]}),
        ));
        assert!(message.contains("invalid exclude"));

        let message = config_error(process_instance(
            "main",
            &json!({"folders": [], "exclude": ["(unclosed"]}),
        ));
        assert!(message.contains("invalid exclude (unclosed"));
    }

    #[test]
    fn test_process_instance_scalar_exclude_is_rejected() {
        let message = config_error(process_instance(
            "main",
            &json!({"folders": [], "exclude": "^scratch-"}),
        ));
        assert!(message.contains("exclude must be a list"));
    }
}
