//! Subcommands and the helpers they share.

pub mod batch;
pub mod config;
pub mod field;
pub mod report;

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use einv_core::{EinvConfig, InvoiceRecord};

/// Default location of the configuration file.
pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("einv")
        .join("config.json")
}

/// `--config` when given, the default location otherwise.
pub fn config_file_path(config_path: Option<&str>) -> PathBuf {
    config_path.map(PathBuf::from).unwrap_or_else(default_config_path)
}

/// Load the configuration. An explicit path must exist; the default one may not.
pub fn load_config(config_path: Option<&str>) -> anyhow::Result<EinvConfig> {
    match config_path {
        Some(path) => Ok(EinvConfig::from_file(Path::new(path))?),
        None => {
            let path = default_config_path();
            if path.exists() {
                debug!("Loading config from {}", path.display());
                Ok(EinvConfig::from_file(&path)?)
            } else {
                Ok(EinvConfig::default())
            }
        }
    }
}

/// Read a JSON record, or with `raw` a file holding only the base64 payload.
pub fn load_record(path: &Path, raw: bool) -> anyhow::Result<InvoiceRecord> {
    if !path.exists() {
        anyhow::bail!("Input file not found: {}", path.display());
    }

    if raw {
        let payload = fs::read_to_string(path)?;
        return Ok(InvoiceRecord {
            encoded_invoice: Some(payload),
            ..InvoiceRecord::default()
        });
    }

    Ok(InvoiceRecord::from_file(path)?)
}
