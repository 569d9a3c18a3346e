use reqwest::Client;
use serde_json::{Map, Value};
use url::Url;

use crate::error::{JitdashError, Result};

pub struct JenkinsClient {
    client: Client,
}

impl JenkinsClient {
    pub fn new() -> Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("jitdash/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self { client })
    }

    /// Fetches `url` and decodes the body as a JSON object.
    ///
    /// Non-success statuses and non-object bodies are errors; callers decide
    /// whether that drops the folder, the job or only leaves a build unfilled.
    pub async fn get_object(&self, url: &Url) -> Result<Map<String, Value>> {
        let response = self.client.get(url.clone()).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(JitdashError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        match response.json::<Value>().await? {
            Value::Object(map) => Ok(map),
            other => Err(JitdashError::Shape(format!(
                "expected an object from {url}, got {}",
                json_type(&other)
            ))),
        }
    }
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
