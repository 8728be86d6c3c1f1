//! Built-in demo transactions
//!
//! Used when no data file is supplied so the CLI and server have something to
//! analyze out of the box.

use chrono::{Duration, NaiveDate};
use tracing::error;

use crate::import::parse_json;
use crate::models::Transaction;

const SAMPLE_JSON: &str = include_str!("../../../data/sample_transactions.json");

/// The demo dataset with its original dates
pub fn transactions() -> Vec<Transaction> {
    match parse_json(SAMPLE_JSON.as_bytes()) {
        Ok(txs) => txs,
        Err(e) => {
            error!("Embedded sample data is invalid: {}", e);
            Vec::new()
        }
    }
}

/// The demo dataset shifted so the most recent purchase lands on `end`
///
/// Times of day and the gaps between purchases are preserved.
pub fn transactions_ending(end: NaiveDate) -> Vec<Transaction> {
    let mut txs = transactions();
    let Some(latest) = txs.iter().map(Transaction::day).max() else {
        return txs;
    };

    let shift = Duration::days((end - latest).num_days());
    for tx in &mut txs {
        tx.date += shift;
    }
    txs
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_parses() {
        let txs = transactions();
        assert_eq!(txs.len(), 24);
        assert!(txs.iter().all(|t| t.amount > 0.0));
        assert!(txs.iter().any(|t| t.merchant == "Best Buy"));
    }

    #[test]
    fn test_transactions_ending_rebases_dates() {
        let end = NaiveDate::from_ymd_opt(2024, 6, 20).unwrap();
        let original = transactions();
        let shifted = transactions_ending(end);

        let latest = shifted.iter().map(Transaction::day).max().unwrap();
        assert_eq!(latest, end);

        // Ordering, spacing and hours survive the shift
        for (a, b) in original.iter().zip(&shifted) {
            assert_eq!(a.id, b.id);
            assert_eq!(a.hour(), b.hour());
            assert_eq!(
                (original[0].date - a.date).num_days(),
                (shifted[0].date - b.date).num_days()
            );
        }
    }
}
