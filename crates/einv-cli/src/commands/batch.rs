//! Batch command - report on many record files.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use clap::Args;
use console::style;
use glob::glob;
use tracing::{error, warn};

use einv_core::{EinvConfig, InvoiceFieldExtractor, InvoiceRecord};

use super::load_config;
use super::report::{format_report, OutputFormat};

/// Arguments for the batch command.
#[derive(Args)]
pub struct BatchArgs {
    /// Glob pattern matching record files
    #[arg(required = true)]
    input: String,

    /// Output directory (default: print to stdout)
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Output format for each record
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Continue on error
    #[arg(long)]
    continue_on_error: bool,
}

pub fn run(args: BatchArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();
    let config = load_config(config_path)?;

    let files: Vec<PathBuf> = glob(&args.input)?
        .filter_map(|r| r.ok())
        .filter(|p| p.extension().and_then(|e| e.to_str()) == Some("json"))
        .collect();

    if files.is_empty() {
        anyhow::bail!("No matching files found for pattern: {}", args.input);
    }

    eprintln!("{} Found {} records to process", style("ℹ").blue(), files.len());

    if let Some(ref output_dir) = args.output_dir {
        fs::create_dir_all(output_dir)?;
    }

    let extractor = InvoiceFieldExtractor::with_config(config.extraction.clone());
    let mut used_names = HashSet::new();
    let mut failed = 0usize;

    for path in &files {
        if let Err(e) = process_record(path, &args, &config, &extractor, &mut used_names) {
            if args.continue_on_error {
                warn!("Failed to process {}: {}", path.display(), e);
                failed += 1;
            } else {
                error!("Failed to process {}: {}", path.display(), e);
                anyhow::bail!("Processing failed for {}: {}", path.display(), e);
            }
        }
    }

    eprintln!(
        "{} Processed {} records ({} failed) in {:.2}s",
        style("✓").green(),
        files.len() - failed,
        failed,
        start.elapsed().as_secs_f64()
    );

    Ok(())
}

fn process_record(
    path: &Path,
    args: &BatchArgs,
    config: &EinvConfig,
    extractor: &InvoiceFieldExtractor,
    used_names: &mut HashSet<String>,
) -> anyhow::Result<()> {
    let record = InvoiceRecord::from_file(path)?;
    let output = format_report(&record.report(extractor, &config.report), args.format)?;

    match &args.output_dir {
        Some(dir) => {
            let stem = record
                .report_filename(&config.report)
                .or_else(|| path.file_stem().map(|s| s.to_string_lossy().into_owned()))
                .unwrap_or_else(|| record.id.clone());
            let name = unique_name(&sanitize_file_name(&stem), used_names);
            fs::write(dir.join(format!("{}.{}", name, args.format.extension())), output)?;
        }
        None => println!("{}", output),
    }

    Ok(())
}

/// Replace characters that cannot appear in a file name on common platforms.
fn sanitize_file_name(name: &str) -> String {
    let cleaned: String = name
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect();

    match cleaned.trim() {
        "" | "." | ".." => "record".to_string(),
        trimmed => trimmed.to_string(),
    }
}

/// `name`, or `name (2)`, `name (3)`, ... when already taken in this run.
fn unique_name(name: &str, used: &mut HashSet<String>) -> String {
    let mut candidate = name.to_string();
    let mut n = 2;
    while !used.insert(candidate.clone()) {
        candidate = format!("{} ({})", name, n);
        n += 1;
    }
    candidate
}
