//! Category record sources.
//!
//! The chart consumes plain `category,subcategory,value` rows. Where they come
//! from is up to the [`RecordSource`]; a CSV reader and an in-memory source
//! are provided.

use csv::{ReaderBuilder, StringRecord};
use indexmap::IndexMap;
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};

use crate::error::{WaffleError, WaffleResult};

const CATEGORY_HEADER: &str = "category";
const SUBCATEGORY_HEADER: &str = "subcategory";
const VALUE_HEADER: &str = "value";

/// One input row: how many of 100 people in `category` fall in `subcategory`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryRecord {
    pub category: String,
    pub subcategory: String,
    pub value: f64,
}

impl CategoryRecord {
    pub fn new(category: impl Into<String>, subcategory: impl Into<String>, value: f64) -> Self {
        CategoryRecord {
            category: category.into(),
            subcategory: subcategory.into(),
            value,
        }
    }
}

/// Something that yields category records.
pub trait RecordSource {
    fn records(&mut self) -> WaffleResult<Vec<CategoryRecord>>;
}

/// Records already held in memory.
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    records: Vec<CategoryRecord>,
}

impl MemorySource {
    pub fn new(records: Vec<CategoryRecord>) -> Self {
        MemorySource { records }
    }
}

impl RecordSource for MemorySource {
    fn records(&mut self) -> WaffleResult<Vec<CategoryRecord>> {
        Ok(self.records.clone())
    }
}

/// Records read from a CSV file with a `category,subcategory,value` header.
#[derive(Debug, Clone)]
pub struct CsvSource {
    path: PathBuf,
}

impl CsvSource {
    pub fn new(path: impl AsRef<Path>) -> Self {
        CsvSource {
            path: path.as_ref().to_path_buf(),
        }
    }
}

impl RecordSource for CsvSource {
    fn records(&mut self) -> WaffleResult<Vec<CategoryRecord>> {
        let file = File::open(&self.path).map_err(|e| {
            WaffleError::Io(std::io::Error::other(format!(
                "Error opening data file {}: {}",
                self.path.display(),
                e
            )))
        })?;
        let records = read_records_from_reader(BufReader::new(file))?;
        info!("Loaded {} records from {}", records.len(), self.path.display());
        Ok(records)
    }
}

fn column_index(headers: &StringRecord, name: &str) -> WaffleResult<usize> {
    headers
        .iter()
        .position(|h| h.eq_ignore_ascii_case(name))
        .ok_or_else(|| WaffleError::InvalidData(format!("missing '{}' column in header", name)))
}

fn field(row: &StringRecord, idx: usize) -> &str {
    row.get(idx).unwrap_or("")
}

/// Parse CSV records from any reader. Columns may appear in any order;
/// extra columns are ignored.
pub fn read_records_from_reader<R: Read>(reader: R) -> WaffleResult<Vec<CategoryRecord>> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = rdr.headers()?.clone();
    let category_idx = column_index(&headers, CATEGORY_HEADER)?;
    let subcategory_idx = column_index(&headers, SUBCATEGORY_HEADER)?;
    let value_idx = column_index(&headers, VALUE_HEADER)?;

    let mut records = Vec::new();
    for (i, row) in rdr.records().enumerate() {
        let row = row?;
        // Header is line 1.
        let line = row.position().map(|p| p.line()).unwrap_or(i as u64 + 2);
        if row.iter().all(str::is_empty) {
            continue;
        }
        let raw_value = field(&row, value_idx);
        let value: f64 = raw_value.parse().map_err(|_| {
            WaffleError::InvalidData(format!("Invalid value '{}' at line {}", raw_value, line))
        })?;
        let category = field(&row, category_idx);
        if category.is_empty() {
            return Err(WaffleError::InvalidData(format!("Empty category at line {}", line)));
        }

        records.push(CategoryRecord::new(category, field(&row, subcategory_idx), value));
    }
    debug!("parsed {} CSV records", records.len());
    Ok(records)
}

/// Group records by category, keeping categories in order of first
/// appearance and records in input order.
pub fn group_by_category(records: Vec<CategoryRecord>) -> IndexMap<String, Vec<CategoryRecord>> {
    let mut grouped: IndexMap<String, Vec<CategoryRecord>> = IndexMap::new();
    for record in records {
        grouped
            .entry(record.category.clone())
            .or_default()
            .push(record);
    }
    grouped
}
