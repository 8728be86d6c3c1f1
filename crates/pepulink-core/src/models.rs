//! Domain models for PEPULink

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::error::{Error, Result};

/// A single purchase in the wallet history
///
/// Records are immutable once built. Construct them through
/// [`RawTransaction::validate`] when the data comes from outside the process.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: String,
    /// Always positive
    pub amount: f64,
    pub category: String,
    /// Local wall-clock time of the purchase (midnight when only a date is known)
    pub date: NaiveDateTime,
    pub merchant: String,
}

impl Transaction {
    pub fn new(
        id: impl Into<String>,
        amount: f64,
        category: impl Into<String>,
        date: NaiveDateTime,
        merchant: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            amount,
            category: category.into(),
            date,
            merchant: merchant.into(),
        }
    }

    /// Weekday index with Sunday = 0 through Saturday = 6
    pub fn weekday(&self) -> u32 {
        self.date.weekday().num_days_from_sunday()
    }

    /// Hour of day, 0-23
    pub fn hour(&self) -> u32 {
        self.date.hour()
    }

    pub fn day(&self) -> NaiveDate {
        self.date.date()
    }
}

/// Transaction id as it appears in imported data (JSON files use both forms)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawId {
    Number(u64),
    Text(String),
}

impl RawId {
    fn into_string(self) -> String {
        match self {
            RawId::Number(n) => n.to_string(),
            RawId::Text(s) => s.trim().to_string(),
        }
    }
}

/// Unvalidated transaction record from an import source
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawTransaction {
    #[serde(default)]
    pub id: Option<RawId>,
    pub amount: f64,
    #[serde(default)]
    pub category: String,
    pub date: String,
    #[serde(default)]
    pub merchant: String,
}

impl RawTransaction {
    /// Check the record shape and convert it into a [`Transaction`]
    ///
    /// `row` is the zero-based position of the record in its source and is used
    /// in error messages and when deriving a missing id.
    pub fn validate(self, row: usize) -> Result<Transaction> {
        if !self.amount.is_finite() || self.amount <= 0.0 {
            return Err(Error::InvalidData(format!(
                "row {}: amount must be a positive number, got {}",
                row, self.amount
            )));
        }

        let category = self.category.trim();
        if category.is_empty() {
            return Err(Error::InvalidData(format!(
                "row {}: category is required",
                row
            )));
        }

        let merchant = self.merchant.trim();
        if merchant.is_empty() {
            return Err(Error::InvalidData(format!(
                "row {}: merchant is required",
                row
            )));
        }

        let date = parse_timestamp(&self.date).ok_or_else(|| {
            Error::InvalidData(format!("row {}: unrecognized date '{}'", row, self.date))
        })?;

        let id = match self.id.map(RawId::into_string) {
            Some(id) if !id.is_empty() => id,
            _ => derived_id(&date, merchant, self.amount, row),
        };

        Ok(Transaction {
            id,
            amount: self.amount,
            category: category.to_string(),
            date,
            merchant: merchant.to_string(),
        })
    }
}

/// Parse the date formats accepted in import files
///
/// Date-only values resolve to midnight. RFC 3339 values keep the wall-clock
/// time as written and drop the offset.
pub fn parse_timestamp(s: &str) -> Option<NaiveDateTime> {
    let s = s.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.naive_local());
    }

    for fmt in ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt);
        }
    }

    for fmt in ["%Y-%m-%d", "%m/%d/%Y"] {
        if let Ok(d) = NaiveDate::parse_from_str(s, fmt) {
            return d.and_hms_opt(0, 0, 0);
        }
    }

    None
}

/// Stable id for records imported without one
fn derived_id(date: &NaiveDateTime, merchant: &str, amount: f64, row: usize) -> String {
    let mut hasher = Sha256::new();
    hasher.update(date.to_string().as_bytes());
    hasher.update(merchant.as_bytes());
    hasher.update(amount.to_be_bytes());
    hasher.update((row as u64).to_be_bytes());
    let digest = hex::encode(hasher.finalize());
    digest[..16].to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(amount: f64, category: &str, date: &str, merchant: &str) -> RawTransaction {
        RawTransaction {
            id: None,
            amount,
            category: category.to_string(),
            date: date.to_string(),
            merchant: merchant.to_string(),
        }
    }

    #[test]
    fn test_parse_timestamp_formats() {
        let midnight = parse_timestamp("2024-01-15").unwrap();
        assert_eq!(midnight.hour(), 0);
        assert_eq!(midnight.day(), 15);

        let with_time = parse_timestamp("2024-01-15T18:45:00").unwrap();
        assert_eq!(with_time.hour(), 18);

        let spaced = parse_timestamp("2024-01-15 09:30:00").unwrap();
        assert_eq!(spaced.hour(), 9);

        let rfc = parse_timestamp("2024-01-15T12:10:00-05:00").unwrap();
        assert_eq!(rfc.hour(), 12);

        let us = parse_timestamp("01/15/2024").unwrap();
        assert_eq!(us.date(), NaiveDate::from_ymd_opt(2024, 1, 15).unwrap());

        assert!(parse_timestamp("yesterday").is_none());
    }

    #[test]
    fn test_weekday_is_sunday_based() {
        // 2024-01-14 was a Sunday
        let tx = Transaction::new(
            "1",
            10.0,
            "Dining",
            parse_timestamp("2024-01-14T08:00:00").unwrap(),
            "Cafe",
        );
        assert_eq!(tx.weekday(), 0);
        assert_eq!(tx.hour(), 8);
    }

    #[test]
    fn test_validate_trims_and_keeps_id() {
        let mut r = raw(12.5, "  Dining ", "2024-01-15", " Blue Bottle ");
        r.id = Some(RawId::Number(42));
        let tx = r.validate(0).unwrap();
        assert_eq!(tx.id, "42");
        assert_eq!(tx.category, "Dining");
        assert_eq!(tx.merchant, "Blue Bottle");
    }

    #[test]
    fn test_validate_rejects_bad_amounts() {
        for amount in [0.0, -5.0, f64::NAN, f64::INFINITY] {
            let err = raw(amount, "Dining", "2024-01-15", "Cafe")
                .validate(3)
                .unwrap_err();
            assert!(err.to_string().contains("row 3"));
        }
    }

    #[test]
    fn test_validate_rejects_missing_fields() {
        assert!(raw(5.0, " ", "2024-01-15", "Cafe").validate(0).is_err());
        assert!(raw(5.0, "Dining", "2024-01-15", "").validate(0).is_err());
        assert!(raw(5.0, "Dining", "not a date", "Cafe").validate(0).is_err());
    }

    #[test]
    fn test_derived_id_is_stable_per_row() {
        let a = raw(5.0, "Dining", "2024-01-15", "Cafe").validate(0).unwrap();
        let b = raw(5.0, "Dining", "2024-01-15", "Cafe").validate(0).unwrap();
        let c = raw(5.0, "Dining", "2024-01-15", "Cafe").validate(1).unwrap();
        assert_eq!(a.id, b.id);
        assert_ne!(a.id, c.id);
        assert_eq!(a.id.len(), 16);
    }

    #[test]
    fn test_raw_id_accepts_string_or_number() {
        let from_num: RawTransaction = serde_json::from_str(
            r#"{"id": 7, "amount": 1.5, "category": "Dining", "date": "2024-01-01", "merchant": "A"}"#,
        )
        .unwrap();
        assert_eq!(from_num.id, Some(RawId::Number(7)));

        let from_str: RawTransaction = serde_json::from_str(
            r#"{"id": "tx-7", "amount": 1.5, "category": "Dining", "date": "2024-01-01", "merchant": "A"}"#,
        )
        .unwrap();
        assert_eq!(from_str.id, Some(RawId::Text("tx-7".to_string())));
    }
}
