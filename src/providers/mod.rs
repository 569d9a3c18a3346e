mod jenkins;

pub use jenkins::{as_object, process_instance, Instance, JenkinsProvider, Job, DEFAULT_WORKERS};

#[cfg(test)]
pub use jenkins::Build;
