use anyhow::{Context, Result};
use serde_json::Value;
use std::io::Read;
use std::path::Path;

use crate::error::JitdashError;
use crate::providers::{as_object, process_instance, Instance, DEFAULT_WORKERS};

const DEFAULT_MAX_BUILDS: usize = 10;
const DEFAULT_MAX_HISTORY: usize = 10;

/// Validated report configuration.
///
/// The document looks like
///
/// ```json
/// {
///   "maxBuilds": 10,
///   "maxHistory": 10,
///   "workers": 100,
///   "instances": {
///     "main": { "folders": ["https://ci.example.com/job/tools/"], "exclude": ["^tmp-"] }
///   }
/// }
/// ```
///
/// and may also be written as TOML or YAML. Instances keep their document order.
#[derive(Debug, Clone)]
pub struct Config {
    /// Builds kept per job before details are fetched
    pub max_builds: usize,
    /// Builds visualized per job, never more than `max_builds`
    pub max_history: usize,
    /// Detail requests in flight at once
    pub workers: usize,
    pub instances: Vec<Instance>,
}

impl Config {
    /// Load configuration from `path`, or from stdin when `path` is `None`
    /// or `-`.
    ///
    /// The format follows the file extension (`json`, `toml`, `yaml`/`yml`);
    /// other files are tried as TOML, then JSON, then YAML. Stdin is JSON.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let document = match path {
            Some(path) if path != Path::new("-") => Self::read_file(path)?,
            _ => {
                let mut contents = String::new();
                std::io::stdin()
                    .read_to_string(&mut contents)
                    .context("Failed to read config from stdin")?;
                serde_json::from_str(&contents).context("Failed to parse JSON config from stdin")?
            }
        };

        Ok(Self::from_value(&document)?)
    }

    fn read_file(path: &Path) -> Result<Value> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let extension = path.extension()
            .and_then(|ext| ext.to_str())
            .unwrap_or("");

        match extension {
            "toml" => {
                toml::from_str(&contents)
                    .with_context(|| format!("Failed to parse TOML config: {}", path.display()))
            }
            "json" => {
                serde_json::from_str(&contents)
                    .with_context(|| format!("Failed to parse JSON config: {}", path.display()))
            }
            "yaml" | "yml" => {
                serde_yaml::from_str(&contents)
                    .with_context(|| format!("Failed to parse YAML config: {}", path.display()))
            }
            _ => {
                toml::from_str(&contents)
                    .or_else(|_| serde_json::from_str(&contents))
                    .or_else(|_| serde_yaml::from_str(&contents))
                    .with_context(|| format!("Failed to parse config file: {}", path.display()))
            }
        }
    }

    /// Validates a decoded configuration document.
    ///
    /// Missing or non-integer limits fall back to their defaults. Every
    /// instance is processed eagerly, so the first invalid one fails the
    /// whole configuration.
    pub fn from_value(document: &Value) -> std::result::Result<Self, JitdashError> {
        let config = as_object(document)
            .ok_or_else(|| JitdashError::Config("configuration is not an object".into()))?;

        let max_builds = limit(config.get_integer("maxBuilds"), "maxBuilds", DEFAULT_MAX_BUILDS)?;
        let max_history =
            limit(config.get_integer("maxHistory"), "maxHistory", DEFAULT_MAX_HISTORY)?;
        let workers = limit(config.get_integer("workers"), "workers", DEFAULT_WORKERS)?;
        if workers == 0 {
            return Err(JitdashError::Config("workers must be at least 1".into()));
        }

        let instances = config
            .get_object("instances")
            .ok_or_else(|| JitdashError::Config("no instances".into()))?
            .iter()
            .map(|(name, value)| process_instance(name, value))
            .collect::<std::result::Result<Vec<_>, _>>()?;

        let mut config = Self {
            max_builds,
            max_history,
            workers,
            instances,
        };
        config.clamp_history();

        Ok(config)
    }

    /// Applies command-line overrides on top of the loaded document.
    pub fn apply_overrides(
        &mut self,
        max_builds: Option<usize>,
        max_history: Option<usize>,
        workers: Option<usize>,
    ) {
        if let Some(max_builds) = max_builds {
            self.max_builds = max_builds;
        }
        if let Some(max_history) = max_history {
            self.max_history = max_history;
        }
        if let Some(workers) = workers {
            self.workers = workers.max(1);
        }
        self.clamp_history();
    }

    fn clamp_history(&mut self) {
        self.max_history = self.max_history.min(self.max_builds);
    }
}

fn limit(
    value: Option<i64>,
    key: &str,
    default: usize,
) -> std::result::Result<usize, JitdashError> {
    match value {
        None => Ok(default),
        Some(v) => usize::try_from(v)
            .map_err(|_| JitdashError::Config(format!("{key} must not be negative, got {v}"))),
    }
}
