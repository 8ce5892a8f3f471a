//! Report command - print every term a rendered invoice needs.

use std::fs;
use std::path::PathBuf;

use clap::Args;
use console::style;
use tracing::info;

use einv_core::{InvoiceFieldExtractor, InvoiceReport};

use super::{load_config, load_record};

/// Arguments for the report command.
#[derive(Args)]
pub struct ReportArgs {
    /// Record file (JSON)
    #[arg(required = true)]
    input: PathBuf,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output
    Json,
    /// CSV output, one row per line
    Csv,
    /// Plain text summary
    Text,
    /// XML output
    Xml,
}

impl OutputFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Json => "json",
            OutputFormat::Csv => "csv",
            OutputFormat::Text => "txt",
            OutputFormat::Xml => "xml",
        }
    }
}

pub fn run(args: ReportArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let config = load_config(config_path)?;
    let record = load_record(&args.input, false)?;

    info!("Building report for record {}", record.id);

    let extractor = InvoiceFieldExtractor::with_config(config.extraction.clone());
    let report = record.report(&extractor, &config.report);
    let output = format_report(&report, args.format)?;

    if let Some(output_path) = &args.output {
        fs::write(output_path, &output)?;
        eprintln!(
            "{} Report written to {}",
            style("✓").green(),
            output_path.display()
        );
    } else {
        println!("{}", output);
    }

    Ok(())
}

pub fn format_report(report: &InvoiceReport, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(report)?),
        OutputFormat::Csv => format_csv(report),
        OutputFormat::Text => Ok(format_text(report)),
        OutputFormat::Xml => Ok(quick_xml::se::to_string(report)?),
    }
}

fn format_csv(report: &InvoiceReport) -> anyhow::Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);

    wtr.write_record([
        "invoice_id",
        "line_id",
        "BT-131",
        "BT-136",
        "KSA-11",
        "KSA-12",
        "currency",
    ])?;

    for line in &report.lines {
        wtr.write_record([
            &report.id,
            &line.id,
            &line.line_extension_amount,
            &line.allowance_amount,
            &line.tax_amount,
            &line.rounding_amount,
            &report.currency,
        ])?;
    }

    Ok(String::from_utf8(wtr.into_inner()?)?)
}

fn format_text(report: &InvoiceReport) -> String {
    let mut output = String::new();

    output.push_str(&format!("Invoice: {}\n", report.id));
    if let Some(filename) = &report.filename {
        output.push_str(&format!("File: {}\n", filename));
    }
    output.push_str(&format!("Type code: {}\n", report.invoice_type_code));
    if !report.exemption_reason.is_empty() {
        output.push_str(&format!("Exemption reason: {}\n", report.exemption_reason));
    }
    output.push('\n');

    for line in &report.lines {
        output.push_str(&format!("Line {}:\n", line.id));
        output.push_str(&format!("  Net (BT-131):       {}\n", line.line_extension_amount));
        output.push_str(&format!("  Allowance (BT-136): {}\n", line.allowance_amount));
        output.push_str(&format!("  VAT (KSA-11):       {}\n", line.tax_amount));
        output.push_str(&format!("  Total (KSA-12):     {}\n", line.rounding_amount));
    }

    match report.tax_amount {
        Some(total) => output.push_str(&format!("\nVAT total: {} {}\n", total, report.currency)),
        None => output.push_str("\nVAT total: out of range\n"),
    }
    output
}
