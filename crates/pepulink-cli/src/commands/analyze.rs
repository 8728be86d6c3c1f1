//! Spending analysis report

use anyhow::Result;
use pepulink_core::analytics::{weekday_name, SpendingAnalysis};

use super::Session;

/// Width of the category share bars
const BAR_WIDTH: usize = 20;

pub fn cmd_analyze(session: &Session, json: bool) -> Result<()> {
    let analysis = session.analysis();

    if json {
        println!("{}", serde_json::to_string_pretty(&analysis)?);
        return Ok(());
    }

    if analysis.is_empty() {
        println!("No transactions to analyze.");
        return Ok(());
    }

    print_report(&analysis, session);
    Ok(())
}

fn print_report(analysis: &SpendingAnalysis, session: &Session) {
    println!();
    println!("📊 Spending Analysis (as of {})", session.as_of);
    println!("   ─────────────────────────────────────────────");
    println!(
        "   {} transactions totaling ${:.2}",
        analysis.transaction_count, analysis.total_amount
    );

    println!();
    println!("🏷️  Categories");
    for c in &analysis.category_preferences {
        println!(
            "   {:<14} {:>10} {:>5.1}% {}  ({}× avg ${:.2})",
            c.category,
            format!("${:.2}", c.amount),
            c.percentage,
            share_bar(c.percentage),
            c.frequency,
            c.avg_transaction
        );
    }

    let trends = &analysis.time_based_trends;
    println!();
    println!("🕐 When you spend");
    if let Some(day) = trends.peak_weekday {
        println!(
            "   Busiest day:  {} (${:.2})",
            weekday_name(day),
            trends.weekday_totals.get(&day).copied().unwrap_or(0.0)
        );
    }
    if let Some(hour) = trends.peak_hour {
        println!(
            "   Busiest hour: {:02}:00 (${:.2})",
            hour,
            trends.hourly_totals.get(&hour).copied().unwrap_or(0.0)
        );
    }
    println!("   Seasonality:  {}", analysis.seasonality);

    let anomalies = &analysis.anomalies;
    println!();
    println!(
        "🔎 Unusual transactions (usual range {})",
        anomalies.usual_range()
    );
    if anomalies.anomalous_transactions.is_empty() {
        println!("   None");
    }
    for tx in &anomalies.anomalous_transactions {
        println!(
            "   {} │ ${:>9.2} │ {} ({})",
            tx.date.format("%Y-%m-%d"),
            tx.amount,
            tx.merchant,
            tx.category
        );
    }

    let p = &analysis.prediction;
    println!();
    println!("🔮 Outlook");
    println!(
        "   Trend: {} by ${:.2}",
        p.trend_direction, p.trend_magnitude
    );
    println!(
        "   Month to date: ${:.2}, projected ${:.2} ({:.0}% confidence)",
        p.month_to_date_spending, p.projected_monthly_spending, p.confidence_level
    );
}

/// Text bar proportional to a percentage
pub fn share_bar(percentage: f64) -> String {
    let filled = ((percentage / 100.0) * BAR_WIDTH as f64).round() as usize;
    let filled = filled.min(BAR_WIDTH);
    format!("{}{}", "█".repeat(filled), "░".repeat(BAR_WIDTH - filled))
}
