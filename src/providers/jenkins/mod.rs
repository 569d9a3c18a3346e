mod client;
mod details;
mod instance;
mod jobs;
mod json;
mod progress_bar;
mod provider;
mod scheduler;
mod sparkline;
mod types;


pub use instance::process_instance;
pub use json::as_object;
pub use provider::JenkinsProvider;
pub use scheduler::DEFAULT_WORKERS;
pub use types::{Build, Instance, Job};
