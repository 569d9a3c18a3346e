use anyhow::Result;
use clap::Parser;
use log::info;
use std::io::Write;
use std::path::PathBuf;

use crate::config::Config;
use crate::output::{export_report, OutputFormat};
use crate::providers::JenkinsProvider;

#[derive(Parser)]
#[command(name = "jitdash")]
#[command(author, version, about = "Jenkins build history dashboard", long_about = None)]
pub struct Cli {
    /// Configuration file (JSON, TOML or YAML); `-` or unset reads JSON from stdin
    #[arg(short, long, env = "JITDASH_CONFIG")]
    config: Option<PathBuf>,

    /// Write the report here instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    #[arg(short, long, value_enum, default_value_t = OutputFormat::Html)]
    format: OutputFormat,

    /// Pretty-print JSON output
    #[arg(short, long, default_value_t = false)]
    pretty: bool,

    /// Override `maxBuilds`: builds kept per job
    #[arg(long)]
    max_builds: Option<usize>,

    /// Override `maxHistory`: builds shown per job
    #[arg(long)]
    max_history: Option<usize>,

    /// Override `workers`: detail requests in flight
    #[arg(short, long)]
    workers: Option<usize>,

    /// Hide the banner and progress output
    #[arg(short, long, default_value_t = false)]
    quiet: bool,
}

impl Cli {
    pub fn quiet(&self) -> bool {
        self.quiet
    }

    pub async fn execute(&self) -> Result<()> {
        let mut config = Config::load(self.config.as_deref())?;
        config.apply_overrides(self.max_builds, self.max_history, self.workers);

        info!(
            "Loaded {} instances (maxBuilds={}, maxHistory={}, workers={})",
            config.instances.len(),
            config.max_builds,
            config.max_history,
            config.workers
        );

        let provider = JenkinsProvider::new()?;

        let report = provider
            .collect_report(
                &config.instances,
                config.max_builds,
                config.max_history,
                config.workers,
                !self.quiet,
            )
            .await;

        if let Some(output_path) = &self.output {
            let mut file = std::fs::File::create(output_path)?;
            export_report(&report, self.format, self.pretty, &mut file)?;
            info!("Report written to: {}", output_path.display());
        } else {
            let stdout = std::io::stdout();
            let mut handle = stdout.lock();
            export_report(&report, self.format, self.pretty, &mut handle)?;
            handle.flush()?;
        }

        Ok(())
    }
}
