//! Transaction file loaders (JSON and CSV)

use std::collections::{HashMap, HashSet};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use csv::{ReaderBuilder, StringRecord};
use tracing::debug;

use crate::error::{Error, Result};
use crate::models::{RawId, RawTransaction, Transaction};

/// Supported transaction file formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFormat {
    Json,
    Csv,
}

impl FileFormat {
    /// Detect format from a file extension
    pub fn from_path(path: &Path) -> Result<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase());

        match ext.as_deref() {
            Some("json") => Ok(FileFormat::Json),
            Some("csv") => Ok(FileFormat::Csv),
            _ => Err(Error::UnsupportedFormat(format!(
                "{} (expected .json or .csv)",
                path.display()
            ))),
        }
    }
}

/// Load and validate transactions from a file
pub fn load_file(path: &Path) -> Result<Vec<Transaction>> {
    let format = FileFormat::from_path(path)?;
    let reader = BufReader::new(File::open(path)?);

    let transactions = match format {
        FileFormat::Json => parse_json(reader)?,
        FileFormat::Csv => parse_csv(reader)?,
    };

    debug!(
        path = %path.display(),
        count = transactions.len(),
        "Loaded transactions"
    );
    Ok(transactions)
}

/// Parse a JSON array of transaction records
pub fn parse_json<R: Read>(reader: R) -> Result<Vec<Transaction>> {
    let raw: Vec<RawTransaction> = serde_json::from_reader(reader)?;
    validate_all(raw)
}

/// Validate raw records and reject duplicate ids
pub fn validate_all(raw: Vec<RawTransaction>) -> Result<Vec<Transaction>> {
    let mut seen = HashSet::with_capacity(raw.len());
    let mut transactions = Vec::with_capacity(raw.len());

    for (row, record) in raw.into_iter().enumerate() {
        let tx = record.validate(row)?;
        if !seen.insert(tx.id.clone()) {
            return Err(Error::InvalidData(format!(
                "row {}: duplicate transaction id '{}'",
                row, tx.id
            )));
        }
        transactions.push(tx);
    }

    Ok(transactions)
}

/// Parse CSV with a header row
///
/// Required columns: `date`, `amount`, `category`, `merchant`. An `id` column
/// is optional. Header names are case-insensitive and may appear in any order.
pub fn parse_csv<R: Read>(reader: R) -> Result<Vec<Transaction>> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let columns = Columns::from_headers(rdr.headers()?)?;
    let mut raw = Vec::new();

    for (row, result) in rdr.records().enumerate() {
        let record = result?;
        raw.push(columns.raw_transaction(&record, row)?);
    }

    debug!("Parsed {} CSV transactions", raw.len());
    validate_all(raw)
}

/// Column positions resolved from the header row
struct Columns {
    id: Option<usize>,
    date: usize,
    amount: usize,
    category: usize,
    merchant: usize,
}

impl Columns {
    fn from_headers(headers: &StringRecord) -> Result<Self> {
        let index: HashMap<String, usize> = headers
            .iter()
            .enumerate()
            .map(|(i, h)| (h.trim().to_lowercase(), i))
            .collect();

        let required = |name: &str| {
            index
                .get(name)
                .copied()
                .ok_or_else(|| Error::InvalidData(format!("CSV is missing a '{}' column", name)))
        };

        Ok(Self {
            id: index.get("id").copied(),
            date: required("date")?,
            amount: required("amount")?,
            category: required("category")?,
            merchant: required("merchant")?,
        })
    }

    fn raw_transaction(&self, record: &StringRecord, row: usize) -> Result<RawTransaction> {
        let field = |i: usize| record.get(i).unwrap_or("").to_string();

        let amount_str = field(self.amount);
        let amount = parse_amount(&amount_str).ok_or_else(|| {
            Error::InvalidData(format!("row {}: unable to parse amount '{}'", row, amount_str))
        })?;

        Ok(RawTransaction {
            id: self
                .id
                .map(field)
                .filter(|s| !s.is_empty())
                .map(RawId::Text),
            amount,
            category: field(self.category),
            date: field(self.date),
            merchant: field(self.merchant),
        })
    }
}

/// Parse an amount like "$1,234.50" or "(12.00)"
fn parse_amount(s: &str) -> Option<f64> {
    let cleaned: String = s
        .trim()
        .replace(['$', ',', ' '], "")
        .replace('(', "-")
        .replace(')', "");

    cleaned.parse::<f64>().ok()
}
