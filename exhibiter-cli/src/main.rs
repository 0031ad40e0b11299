//! exhibiter - Assemble litigation exhibits into a filing.
//!
//! Builds an evidence PDF and an exhibit list from a folder of exhibits.

mod cli;

use clap::Parser;
use std::path::Path;
use std::process;

use crate::cli::Cli;
use exhibiter::assemble::{Assembly, OutputAggregator};
use exhibiter::config::{Config, OverwriteMode};
use exhibiter::error::ExhibitError;
use exhibiter::io::{self, ListWriter, PdfWriter};
use exhibiter::merge::DocumentInfo;
use exhibiter::output::{
    OutputFormatter, display_assembly_summary, display_list_statistics, display_write_statistics,
};
use exhibiter::render::LopdfRenderer;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if let Err(err) = run(cli).await {
        eprintln!("Error: {err}");
        process::exit(err.exit_code());
    }
}

/// Main application logic.
async fn run(cli: Cli) -> Result<(), ExhibitError> {
    let config = cli.to_config()?;
    let formatter = OutputFormatter::from_config(&config);

    if formatter.should_print() {
        formatter.section(&format!("{} v{}", exhibiter::NAME, exhibiter::VERSION));
        formatter.blank_line();
    }

    // Output paths are checked before any exhibit is read
    for output in outputs(&config) {
        io::can_write(output).await?;
        if !config.dry_run {
            handle_output_overwrite(output, config.overwrite_mode, &formatter).await?;
        }
    }

    formatter.info(&format!("Assembling exhibits in {}", config.input.display()));
    formatter.blank_line();

    let assembly = assemble(&config, formatter.clone()).await?;

    if formatter.should_print() {
        formatter.blank_line();
        display_assembly_summary(&formatter, &assembly);
    }

    if config.dry_run {
        formatter.blank_line();
        formatter.success("Dry run completed successfully");
        for output in outputs(&config) {
            formatter.info(&format!("  Would write: {}", output.display()));
        }
        return Ok(());
    }

    write_outputs(&config, assembly, &formatter).await
}

/// Run the synchronous assembly engine off the async runtime.
async fn assemble(config: &Config, formatter: OutputFormatter) -> Result<Assembly, ExhibitError> {
    let input = config.input.clone();
    let run_options = config.run.clone();
    let list_options = config.list.clone();

    tokio::task::spawn_blocking(move || {
        let renderer = LopdfRenderer::new();
        OutputAggregator::new(&renderer, &run_options, &list_options)
            .run_with_progress(&input, |event| formatter.event(event))
    })
    .await
    .map_err(|e| ExhibitError::other(format!("Assembly task failed: {e}")))?
}

/// Write the PDF and the exhibit list, whichever are enabled.
async fn write_outputs(
    config: &Config,
    assembly: Assembly,
    formatter: &OutputFormatter,
) -> Result<(), ExhibitError> {
    let list = match &config.list_output {
        Some(_) => Some(assembly.list.render(config.list_format)?),
        None => None,
    };

    if let (Some(path), Some(pages)) = (&config.pdf_output, assembly.pages) {
        formatter.blank_line();
        formatter.info(&format!("Writing to: {}", path.display()));

        let info = DocumentInfo::new(format!("{} Exhibits", config.list.party.label()));
        let document = pages.finish(&info, config.bookmarks)?;
        let stats = PdfWriter::with_compression(config.compression)
            .save(document, path)
            .await?;
        display_write_statistics(formatter, &stats);
    }

    if let (Some(path), Some(contents)) = (&config.list_output, list) {
        formatter.info(&format!("Writing to: {}", path.display()));
        let stats = ListWriter::new().save(&contents, path).await?;
        display_list_statistics(formatter, &stats);
    }

    Ok(())
}

fn outputs(config: &Config) -> impl Iterator<Item = &Path> {
    config
        .pdf_output
        .as_deref()
        .into_iter()
        .chain(config.list_output.as_deref())
}

/// Handle output file overwrite scenarios.
async fn handle_output_overwrite(
    path: &Path,
    mode: OverwriteMode,
    formatter: &OutputFormatter,
) -> Result<(), ExhibitError> {
    if !io::exists(path).await {
        return Ok(());
    }

    match mode {
        OverwriteMode::Force => Ok(()),
        OverwriteMode::NoClobber => Err(ExhibitError::output_exists(path.to_path_buf())),
        OverwriteMode::Prompt => {
            // In quiet mode, treat as no-clobber
            if formatter.is_quiet() {
                return Err(ExhibitError::output_exists(path.to_path_buf()));
            }

            formatter.warning(&format!("Output file already exists: {}", path.display()));

            use std::io::{self, Write};
            print!("Overwrite? [y/N]: ");
            io::stdout().flush().ok();

            let mut response = String::new();
            io::stdin()
                .read_line(&mut response)
                .map_err(|err| ExhibitError::other(format!("Failed to read input: {err}")))?;

            let response = response.trim().to_lowercase();
            if response == "y" || response == "yes" {
                Ok(())
            } else {
                Err(ExhibitError::Cancelled)
            }
        }
    }
}
