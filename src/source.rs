use crate::allocation::Allocation;
use crate::validation::validate_allocations;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
    #[error("unsupported allocation file format '{0}' (expected json or csv)")]
    UnsupportedFormat(String),
}

pub type SourceResult<T> = Result<T, SourceError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFormat {
    Json,
    Csv,
}

impl SourceFormat {
    pub fn from_name(name: &str) -> SourceResult<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "json" => Ok(SourceFormat::Json),
            "csv" => Ok(SourceFormat::Csv),
            other => Err(SourceError::UnsupportedFormat(other.to_string())),
        }
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> SourceResult<Self> {
        let extension = path
            .as_ref()
            .extension()
            .and_then(|ext| ext.to_str())
            .unwrap_or_default();
        Self::from_name(extension)
    }
}

/// Reads a JSON array of allocation records.
pub fn load_allocations_from_json<P: AsRef<Path>>(path: P) -> SourceResult<Vec<Allocation>> {
    let file = File::open(path.as_ref())?;
    let allocations: Vec<Allocation> = serde_json::from_reader(file)?;
    Ok(report(path.as_ref(), allocations))
}

/// Reads a headered CSV; an empty `allocation_percentage` cell counts as zero.
pub fn load_allocations_from_csv<P: AsRef<Path>>(path: P) -> SourceResult<Vec<Allocation>> {
    let file = File::open(path.as_ref())?;
    let allocations = read_allocations_csv(file)?;
    Ok(report(path.as_ref(), allocations))
}

pub fn read_allocations_csv<R: Read>(reader: R) -> SourceResult<Vec<Allocation>> {
    let mut reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
    let mut allocations = Vec::new();
    for record in reader.deserialize() {
        allocations.push(record?);
    }
    Ok(allocations)
}

pub fn load_allocations<P: AsRef<Path>>(
    path: P,
    format: SourceFormat,
) -> SourceResult<Vec<Allocation>> {
    match format {
        SourceFormat::Json => load_allocations_from_json(path),
        SourceFormat::Csv => load_allocations_from_csv(path),
    }
}

fn report(path: &Path, allocations: Vec<Allocation>) -> Vec<Allocation> {
    for issue in validate_allocations(&allocations) {
        log::warn!("{}: {}", path.display(), issue);
    }
    log::info!("loaded {} allocations from {}", allocations.len(), path.display());
    allocations
}
