use anyhow::Result;
use clap::ValueEnum;
use std::io::Write;

use crate::report::Report;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Self-contained HTML status page
    #[default]
    Html,
    /// The collected report as JSON
    Json,
}

/// Writes `report` in the requested format.
pub fn export_report(
    report: &Report,
    format: OutputFormat,
    pretty: bool,
    output: &mut dyn Write,
) -> Result<()> {
    match format {
        OutputFormat::Html => export_html(report, output),
        OutputFormat::Json => export_json(report, pretty, output),
    }
}

fn export_json(report: &Report, pretty: bool, output: &mut dyn Write) -> Result<()> {
    let json = if pretty {
        serde_json::to_string_pretty(report)?
    } else {
        serde_json::to_string(report)?
    };
    writeln!(output, "{}", json)?;
    Ok(())
}

fn export_html(report: &Report, output: &mut dyn Write) -> Result<()> {
    writeln!(output, "<!DOCTYPE html>")?;
    writeln!(output, "<html lang=\"en\">")?;
    writeln!(output, "<head>")?;
    writeln!(output, "    <meta charset=\"UTF-8\">")?;
    writeln!(output, "    <title>Build status</title>")?;
    writeln!(output, "    <style>")?;
    writeln!(
        output,
        "        td.sparkline {{ font-family: Consolas, \"Liberation Mono\", \
         Menlo, Courier, monospace; font-size: 12px; }}"
    )?;
    writeln!(output, "        td.sparkline a {{ text-decoration: none; color: inherit; }}")?;
    writeln!(output, "    </style>")?;
    writeln!(output, "</head>")?;
    writeln!(output, "<body>")?;

    for instance in &report.instances {
        writeln!(output, "<h2>{}</h2>", escape_html(&instance.name))?;
        writeln!(output, "<table>")?;
        writeln!(output, "    <tr><th>Job</th><th>History</th></tr>")?;
        for job in &instance.jobs {
            writeln!(
                output,
                "    <tr><td><a href=\"{}\">{}</a></td><td class=\"sparkline\">{}</td></tr>",
                escape_html(&job.job.url),
                escape_html(&job.job.name),
                job.history
            )?;
        }
        writeln!(output, "</table>")?;
        writeln!(output, "<br />")?;
    }

    writeln!(
        output,
        "<footer><p>Generated by jitdash v{} on {}</p></footer>",
        env!("CARGO_PKG_VERSION"),
        report.generated_at.format("%Y-%m-%d %H:%M UTC")
    )?;
    writeln!(output, "</body>")?;
    writeln!(output, "</html>")?;

    Ok(())
}

/// Escapes text for use in HTML content and double-quoted attributes.
pub fn escape_html(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '"' => escaped.push_str("&quot;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            c => escaped.push(c),
        }
    }
    escaped
}
