//! Transaction command implementations

use anyhow::Result;
use pepulink_core::Transaction;

use super::{truncate, Session};

pub fn cmd_transactions(session: &Session, limit: usize, category: Option<&str>) -> Result<()> {
    let transactions = recent_transactions(&session.transactions, limit, category);

    if transactions.is_empty() {
        println!("No transactions found.");
        return Ok(());
    }

    println!();
    println!("📝 Recent Transactions");
    println!("   ─────────────────────────────────────────────────────────────");

    for tx in transactions {
        println!(
            "   {} │ {:>10} │ {:<12} │ {}",
            tx.date.format("%Y-%m-%d %H:%M"),
            format!("${:.2}", tx.amount),
            truncate(&tx.category, 12),
            truncate(&tx.merchant, 30)
        );
    }

    Ok(())
}

/// Newest first, optionally limited to one category (case-insensitive)
pub fn recent_transactions<'a>(
    transactions: &'a [Transaction],
    limit: usize,
    category: Option<&str>,
) -> Vec<&'a Transaction> {
    let mut selected: Vec<&Transaction> = transactions
        .iter()
        .filter(|t| category.map_or(true, |c| t.category.eq_ignore_ascii_case(c)))
        .collect();
    selected.sort_by(|a, b| b.date.cmp(&a.date));
    selected.truncate(limit);
    selected
}
