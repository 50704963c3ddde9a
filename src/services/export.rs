use crate::scrapers::types::slugify;
use anyhow::{Context, Result};
use serde::Serialize;
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};
use tracing::{error, info};

/// Writes scraped records somewhere. Failures are logged, never returned.
pub trait RecordExporter: Send + Sync {
    fn export<T: Serialize>(&self, records: &[T], name: &str);
}

/// Exports records to `<data_dir>/<slug>.csv`
#[derive(Debug, Clone)]
pub struct CsvExporter {
    data_dir: PathBuf,
    separator: u8,
}

impl CsvExporter {
    pub fn new(data_dir: impl Into<PathBuf>, separator: u8) -> Self {
        Self {
            data_dir: data_dir.into(),
            separator,
        }
    }

    pub fn path_for(&self, name: &str) -> PathBuf {
        self.data_dir.join(format!("{}.csv", slugify(name)))
    }

    /// Columns are the union of every record's keys, in first-seen order.
    pub fn write_csv<T: Serialize>(&self, records: &[T], name: &str) -> Result<PathBuf> {
        if !self.data_dir.exists() {
            std::fs::create_dir_all(&self.data_dir).with_context(|| {
                format!("Failed to create data directory {}", self.data_dir.display())
            })?;
            info!("Created data directory {}", self.data_dir.display());
        }

        let rows = records
            .iter()
            .map(to_row)
            .collect::<Result<Vec<_>>>()?;

        let mut columns: Vec<String> = Vec::new();
        for row in &rows {
            for key in row.keys() {
                if !columns.contains(key) {
                    columns.push(key.clone());
                }
            }
        }

        let path = self.path_for(name);
        write_rows(&path, self.separator, &columns, &rows)?;
        Ok(path)
    }
}

impl RecordExporter for CsvExporter {
    fn export<T: Serialize>(&self, records: &[T], name: &str) {
        info!("Exporting {} records for '{}'", records.len(), name);
        match self.write_csv(records, name) {
            Ok(path) => info!("💾 Exported data to {}", path.display()),
            Err(e) => error!("Error exporting data to CSV: {:#}", e),
        }
    }
}

fn to_row<T: Serialize>(record: &T) -> Result<Map<String, Value>> {
    match serde_json::to_value(record).context("Failed to serialize record")? {
        Value::Object(map) => Ok(map),
        other => anyhow::bail!("Expected a record object, got {}", other),
    }
}

fn write_rows(
    path: &Path,
    separator: u8,
    columns: &[String],
    rows: &[Map<String, Value>],
) -> Result<()> {
    let mut writer = csv::WriterBuilder::new()
        .delimiter(separator)
        .from_path(path)
        .with_context(|| format!("Failed to open {}", path.display()))?;

    writer.write_record(columns)?;
    for row in rows {
        writer.write_record(columns.iter().map(|column| cell(row.get(column))))?;
    }
    writer.flush()?;
    Ok(())
}

fn cell(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}
