mod exports;
mod styling;

pub use exports::{escape_html, export_report, OutputFormat};
pub use styling::{dim, magenta_bold};

/// Prints the `jitdash` banner to stderr.
///
/// Displays the tool name, version, and description at the start of execution.
pub fn print_banner() {
    eprintln!(
        r"
{} {}
  {}
",
        magenta_bold("▁▃▇ jitdash"),
        dim(env!("CARGO_PKG_VERSION")),
        dim("Jenkins build history at a glance")
    );
}
