//! Insight findings command

use anyhow::Result;
use pepulink_core::{AnalysisContext, InsightEngine, Severity};

use super::Session;

pub fn cmd_insights(session: &Session, json: bool, limit: Option<usize>) -> Result<()> {
    let analysis = session.analysis();
    let ctx = AnalysisContext::new(&analysis, &session.config.insights, session.as_of);
    let mut findings = InsightEngine::new().analyze_all(&ctx);
    if let Some(limit) = limit {
        findings.truncate(limit);
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&findings)?);
        return Ok(());
    }

    if findings.is_empty() {
        println!("✅ No insights right now. Your spending looks steady!");
        return Ok(());
    }

    println!();
    println!("💡 Insights");
    println!("   ─────────────────────────────────────────────");
    for f in &findings {
        println!("   {} {}", severity_icon(f.severity), f.title);
        println!("      {}", f.summary);
        if let Some(detail) = &f.detail {
            println!("      {}", detail);
        }
    }

    Ok(())
}

pub fn severity_icon(severity: Severity) -> &'static str {
    match severity {
        Severity::Info => "ℹ️ ",
        Severity::Attention => "⚠️ ",
        Severity::Warning => "🚨",
    }
}
