//! Field and type-code commands - print a single term.

use std::path::PathBuf;

use clap::Args;
use tracing::info;

use einv_core::{InvoiceFieldExtractor, LineTerm};

use super::{load_config, load_record};

/// Arguments for the field command.
#[derive(Args)]
pub struct FieldArgs {
    /// Record file (JSON), or a base64 payload with --raw
    #[arg(required = true)]
    input: PathBuf,

    /// Line identifier (text of the line's cbc:ID)
    #[arg(long)]
    id: String,

    /// Business term: BT-131, BT-136, KSA-11 or KSA-12
    #[arg(short, long)]
    term: LineTerm,

    /// Input holds only the base64 payload
    #[arg(long)]
    raw: bool,
}

/// Arguments for the type-code command.
#[derive(Args)]
pub struct TypeCodeArgs {
    /// Record file (JSON), or a base64 payload with --raw
    #[arg(required = true)]
    input: PathBuf,

    /// Input holds only the base64 payload
    #[arg(long)]
    raw: bool,
}

pub fn run_field(args: FieldArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let config = load_config(config_path)?;
    let record = load_record(&args.input, args.raw)?;

    info!("Reading {} for line {} from {}", args.term, args.id, args.input.display());

    let extractor = InvoiceFieldExtractor::with_config(config.extraction);
    println!("{}", extractor.line_term_text(record.encoded(), &args.id, args.term));

    Ok(())
}

pub fn run_type_code(args: TypeCodeArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let config = load_config(config_path)?;
    let record = load_record(&args.input, args.raw)?;

    let extractor = InvoiceFieldExtractor::with_config(config.extraction);
    println!("{}", extractor.invoice_type_code_text(record.encoded()));

    Ok(())
}
