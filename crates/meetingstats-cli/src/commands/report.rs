//! The default command: analyze a calendar export and print the report.

use std::path::Path;

use tracing::{debug, info};

use meetingstats_core::{ReportFormatter, process_events};
use meetingstats_ics::decode_calendar_lossy;

use crate::config::AppConfig;
use crate::error::CliResult;

/// Builds the report text for an export.
///
/// An unreadable export is reported as an empty calendar rather than an
/// error. With `json` set the full statistics are serialized instead of the
/// text report.
pub fn build_report(ics: &str, config: &AppConfig, json: bool) -> CliResult<String> {
    let pipeline = config.pipeline_config()?;
    let options = config.decode_options()?;

    let events = decode_calendar_lossy(ics, &options);
    debug!(events = events.len(), "decoded calendar");

    let stats = process_events(&events, &pipeline);

    if json {
        Ok(serde_json::to_string_pretty(&stats)?)
    } else {
        Ok(ReportFormatter::new(config.report.clone()).render(&stats))
    }
}

/// Reads `file`, builds the report and prints it to stdout.
pub fn run(file: &Path, config: &AppConfig, json: bool) -> CliResult<()> {
    info!(file = %file.display(), "reading calendar export");
    let ics = std::fs::read_to_string(file)?;
    println!("{}", build_report(&ics, config, json)?);
    Ok(())
}
