//! Output formatting and display for exhibiter.
//!
//! This module handles all user-facing output including:
//! - Assembly progress, exhibit by exhibit
//! - Error and warning display
//! - Summary reports
//! - Quiet and verbose modes
//!
//! # Examples
//!
//! ```no_run
//! use exhibiter::output::OutputFormatter;
//! use exhibiter::config::Config;
//!
//! # fn example(config: Config) {
//! let formatter = OutputFormatter::from_config(&config);
//! formatter.info("Assembling exhibits");
//! formatter.success("Exhibits assembled");
//! # }
//! ```

pub mod formatter;

pub use formatter::{MessageLevel, OutputFormatter};

use crate::assemble::Assembly;
use crate::config::Config;
use crate::io::{ListWriteStatistics, WriteStatistics};

/// Create an output formatter from configuration.
pub fn create_formatter(config: &Config) -> OutputFormatter {
    OutputFormatter::from_config(config)
}

/// One-line summary of an assembly run.
pub fn assembly_summary(assembly: &Assembly) -> String {
    let exhibits = assembly.exhibits.len();
    let documents = assembly.document_count();
    let pages = assembly.page_count();

    format!(
        "Assembled {exhibits} exhibit{} ({documents} document{}, {pages} page{})",
        plural(exhibits),
        plural(documents),
        plural(pages)
    )
}

/// Display the assembly summary to the user.
pub fn display_assembly_summary(formatter: &OutputFormatter, assembly: &Assembly) {
    formatter.info(&assembly_summary(assembly));
    formatter.detail("List rows", &assembly.list.len().to_string());
}

/// Display PDF write statistics to the user.
pub fn display_write_statistics(formatter: &OutputFormatter, stats: &WriteStatistics) {
    formatter.success(&format!(
        "Wrote {} ({})",
        stats.output_path.display(),
        stats.format_file_size()
    ));
    formatter.detail("Write time", &format!("{:.2}s", stats.write_time.as_secs_f64()));
    formatter.detail("Compression", &format!("{:?}", stats.compression));
}

/// Display exhibit list write statistics to the user.
pub fn display_list_statistics(formatter: &OutputFormatter, stats: &ListWriteStatistics) {
    formatter.success(&format!(
        "Wrote {} ({})",
        stats.output_path.display(),
        stats.format_file_size()
    ));
}

fn plural(count: usize) -> &'static str {
    if count == 1 { "" } else { "s" }
}
