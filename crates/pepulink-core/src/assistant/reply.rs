//! Structured assistant replies and their text rendering
//!
//! Building a [`Reply`] only reads the [`SpendingAnalysis`]; turning it into
//! text is a separate step so front ends can render replies their own way.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::analytics::{
    stats::round_to, usual_range, CategorySummary, SpendingAnalysis, TrendDirection,
};
use crate::config::AssistantConfig;

use super::intent::Intent;

/// Number of unusual transactions listed in an anomaly reply
const MAX_FLAGGED: usize = 3;

/// An unusual transaction as shown to the user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlaggedTransaction {
    pub merchant: String,
    pub category: String,
    pub amount: f64,
    pub date: String,
}

/// A category worth trimming and what trimming it would save
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavingsCandidate {
    pub category: String,
    pub amount: f64,
    pub percentage: f64,
    pub potential_saving: f64,
}

/// Assistant reply content, one variant per intent
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Reply {
    Tips {
        top_category: String,
        top_amount: f64,
        top_percentage: f64,
        reduction_percent: f64,
        suggested_cut: f64,
        peak_weekday: Option<String>,
    },
    Prediction {
        trend_direction: TrendDirection,
        trend_magnitude: f64,
        month_to_date_spending: f64,
        projected_monthly_spending: f64,
        confidence_level: f64,
    },
    Anomaly {
        count: usize,
        mean: f64,
        threshold: f64,
        lower_threshold: f64,
        /// Largest unusual transactions first
        flagged: Vec<FlaggedTransaction>,
    },
    Optimization {
        reduction_percent: f64,
        candidates: Vec<SavingsCandidate>,
        total_potential_saving: f64,
    },
    Analysis {
        transaction_count: usize,
        total_amount: f64,
        category_count: usize,
        top_category: CategorySummary,
        peak_weekday: Option<String>,
        peak_hour: Option<u32>,
    },
    /// The intent needs data and there are no transactions
    NoData { intent: Intent },
    /// Nothing matched; list what the assistant can do
    Help,
}

impl Reply {
    /// Build the reply for an intent from an analysis
    pub fn build(intent: Intent, analysis: &SpendingAnalysis, config: &AssistantConfig) -> Self {
        if intent == Intent::Default {
            return Reply::Help;
        }

        let Some(top) = analysis.top_category() else {
            return Reply::NoData { intent };
        };

        match intent {
            Intent::Tips => Reply::Tips {
                top_category: top.category.clone(),
                top_amount: top.amount,
                top_percentage: top.percentage,
                reduction_percent: config.tips_reduction_percent,
                suggested_cut: round_to(top.amount * config.tips_reduction_percent / 100.0, 2),
                peak_weekday: analysis
                    .time_based_trends
                    .peak_weekday_name()
                    .map(str::to_string),
            },
            Intent::Prediction => {
                let p = &analysis.prediction;
                Reply::Prediction {
                    trend_direction: p.trend_direction,
                    trend_magnitude: p.trend_magnitude,
                    month_to_date_spending: p.month_to_date_spending,
                    projected_monthly_spending: p.projected_monthly_spending,
                    confidence_level: p.confidence_level,
                }
            }
            Intent::Anomaly => {
                let a = &analysis.anomalies;
                let mut flagged: Vec<FlaggedTransaction> = a
                    .anomalous_transactions
                    .iter()
                    .map(|t| FlaggedTransaction {
                        merchant: t.merchant.clone(),
                        category: t.category.clone(),
                        amount: t.amount,
                        date: t.date.format("%Y-%m-%d").to_string(),
                    })
                    .collect();
                flagged.sort_by(|x, y| {
                    y.amount
                        .partial_cmp(&x.amount)
                        .unwrap_or(std::cmp::Ordering::Equal)
                });
                flagged.truncate(MAX_FLAGGED);

                Reply::Anomaly {
                    count: a.anomalous_transactions.len(),
                    mean: round_to(a.mean, 2),
                    threshold: round_to(a.threshold, 2),
                    lower_threshold: round_to(a.lower_threshold, 2),
                    flagged,
                }
            }
            Intent::Optimization => optimization(analysis, top, config),
            Intent::Analysis => Reply::Analysis {
                transaction_count: analysis.transaction_count,
                total_amount: analysis.total_amount,
                category_count: analysis.category_preferences.len(),
                top_category: top.clone(),
                peak_weekday: analysis
                    .time_based_trends
                    .peak_weekday_name()
                    .map(str::to_string),
                peak_hour: analysis.time_based_trends.peak_hour,
            },
            Intent::Default => Reply::Help,
        }
    }

    /// Human-readable text for chat bubbles and the CLI
    pub fn render(&self) -> String {
        self.to_string()
    }
}

fn optimization(
    analysis: &SpendingAnalysis,
    top: &CategorySummary,
    config: &AssistantConfig,
) -> Reply {
    let mut heavy: Vec<&CategorySummary> = analysis
        .category_preferences
        .iter()
        .filter(|c| c.percentage >= config.optimization_share_threshold)
        .collect();
    if heavy.is_empty() {
        heavy.push(top);
    }

    let candidates: Vec<SavingsCandidate> = heavy
        .into_iter()
        .map(|c| SavingsCandidate {
            category: c.category.clone(),
            amount: c.amount,
            percentage: c.percentage,
            potential_saving: round_to(c.amount * config.optimization_reduction_percent / 100.0, 2),
        })
        .collect();

    let total_potential_saving = round_to(candidates.iter().map(|c| c.potential_saving).sum(), 2);

    Reply::Optimization {
        reduction_percent: config.optimization_reduction_percent,
        candidates,
        total_potential_saving,
    }
}

/// "6 PM" style hour label
fn hour_label(hour: u32) -> String {
    match hour {
        0 => "12 AM".to_string(),
        1..=11 => format!("{} AM", hour),
        12 => "12 PM".to_string(),
        _ => format!("{} PM", hour - 12),
    }
}

impl fmt::Display for Reply {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reply::Tips {
                top_category,
                top_amount,
                top_percentage,
                reduction_percent,
                suggested_cut,
                peak_weekday,
            } => {
                write!(
                    f,
                    "Your biggest spending category is {} at ${:.2} ({:.1}% of your spending). \
                     Trimming it by {:.0}% would free up about ${:.2}.",
                    top_category, top_amount, top_percentage, reduction_percent, suggested_cut
                )?;
                if let Some(day) = peak_weekday {
                    write!(
                        f,
                        " You spend the most on {}s, so planning those days ahead can help.",
                        day
                    )?;
                }
                Ok(())
            }
            Reply::Prediction {
                trend_direction,
                trend_magnitude,
                month_to_date_spending,
                projected_monthly_spending,
                confidence_level,
            } => {
                let comparison = match trend_direction {
                    TrendDirection::Increasing => "more",
                    TrendDirection::Decreasing => "less",
                };
                write!(
                    f,
                    "Your recent spending is {} (${:.2} {} than the previous period). \
                     You've spent ${:.2} so far this month, which projects to about ${:.2} \
                     for the full month ({:.0}% confidence).",
                    trend_direction,
                    trend_magnitude,
                    comparison,
                    month_to_date_spending,
                    projected_monthly_spending,
                    confidence_level
                )
            }
            Reply::Anomaly {
                count,
                mean,
                threshold,
                lower_threshold,
                flagged,
            } => {
                if *count == 0 {
                    return write!(
                        f,
                        "Nothing unusual here. All of your transactions are close to your \
                         typical amount of ${:.2}.",
                        mean
                    );
                }
                write!(
                    f,
                    "I found {} unusual transaction{} outside the usual range (typical amount \
                     ${:.2}, usual range {}):",
                    count,
                    if *count == 1 { "" } else { "s" },
                    mean,
                    usual_range(*lower_threshold, *threshold)
                )?;
                for t in flagged {
                    write!(
                        f,
                        "\n- {} ({}) ${:.2} on {}",
                        t.merchant, t.category, t.amount, t.date
                    )?;
                }
                Ok(())
            }
            Reply::Optimization {
                reduction_percent,
                candidates,
                total_potential_saving,
            } => {
                write!(
                    f,
                    "Cutting {:.0}% from your heaviest categories could save about ${:.2}:",
                    reduction_percent, total_potential_saving
                )?;
                for c in candidates {
                    write!(
                        f,
                        "\n- {}: ${:.2} ({:.1}% of spending), save ${:.2}",
                        c.category, c.amount, c.percentage, c.potential_saving
                    )?;
                }
                Ok(())
            }
            Reply::Analysis {
                transaction_count,
                total_amount,
                category_count,
                top_category,
                peak_weekday,
                peak_hour,
            } => {
                write!(
                    f,
                    "You made {} transaction{} totaling ${:.2} across {} categor{}. \
                     {} leads at ${:.2} ({:.1}%), averaging ${:.2} per purchase.",
                    transaction_count,
                    if *transaction_count == 1 { "" } else { "s" },
                    total_amount,
                    category_count,
                    if *category_count == 1 { "y" } else { "ies" },
                    top_category.category,
                    top_category.amount,
                    top_category.percentage,
                    top_category.avg_transaction
                )?;
                match (peak_weekday, peak_hour) {
                    (Some(day), Some(hour)) => write!(
                        f,
                        " You spend the most on {}s, usually around {}.",
                        day,
                        hour_label(*hour)
                    ),
                    (Some(day), None) => write!(f, " You spend the most on {}s.", day),
                    _ => Ok(()),
                }
            }
            Reply::NoData { .. } => write!(
                f,
                "I don't have any transactions to look at yet. Once you make a few payments \
                 I can analyze your spending."
            ),
            Reply::Help => write!(
                f,
                "I can analyze your spending patterns, predict this month's spending, spot \
                 unusual transactions, find ways to save, or share budgeting tips. \
                 What would you like to know?"
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analytics::SpendingAnalyzer;
    use crate::models::{parse_timestamp, Transaction};
    use chrono::NaiveDate;

    fn tx(id: &str, amount: f64, category: &str, date: &str, merchant: &str) -> Transaction {
        Transaction::new(id, amount, category, parse_timestamp(date).unwrap(), merchant)
    }

    fn sample_analysis() -> SpendingAnalysis {
        let txs = vec![
            tx("1", 45.50, "Dining", "2024-01-15T19:00:00", "Olive Garden"),
            tx("2", 120.0, "Shopping", "2024-01-13T14:00:00", "Target"),
            tx("3", 28.75, "Transport", "2024-01-16T08:00:00", "Uber"),
        ];
        SpendingAnalyzer::new().analyze_as_of(&txs, NaiveDate::from_ymd_opt(2024, 1, 16).unwrap())
    }

    fn empty_analysis() -> SpendingAnalysis {
        SpendingAnalyzer::new().analyze_as_of(&[], NaiveDate::from_ymd_opt(2024, 1, 16).unwrap())
    }

    #[test]
    fn test_tips_reply() {
        let reply = Reply::build(Intent::Tips, &sample_analysis(), &AssistantConfig::default());
        match &reply {
            Reply::Tips {
                top_category,
                suggested_cut,
                peak_weekday,
                ..
            } => {
                assert_eq!(top_category, "Shopping");
                assert_eq!(*suggested_cut, 24.0);
                // 2024-01-13 was a Saturday
                assert_eq!(peak_weekday.as_deref(), Some("Saturday"));
            }
            other => panic!("unexpected reply: {:?}", other),
        }
        assert!(reply.render().contains("Shopping"));
    }

    #[test]
    fn test_analysis_reply() {
        let reply = Reply::build(Intent::Analysis, &sample_analysis(), &AssistantConfig::default());
        let Reply::Analysis {
            transaction_count,
            top_category,
            peak_hour,
            ..
        } = &reply
        else {
            panic!("expected analysis reply");
        };
        assert_eq!(*transaction_count, 3);
        assert_eq!(top_category.percentage, 61.8);
        assert_eq!(*peak_hour, Some(14));

        let text = reply.render();
        assert!(text.contains("$194.25"));
        assert!(text.contains("2 PM"));
    }

    #[test]
    fn test_optimization_reply_uses_share_threshold() {
        let reply = Reply::build(
            Intent::Optimization,
            &sample_analysis(),
            &AssistantConfig::default(),
        );
        let Reply::Optimization {
            candidates,
            total_potential_saving,
            ..
        } = reply
        else {
            panic!("expected optimization reply");
        };
        // Only Shopping (61.8%) is over the 25% threshold
        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].category, "Shopping");
        assert_eq!(total_potential_saving, 18.0);
    }

    #[test]
    fn test_optimization_falls_back_to_top_category() {
        let config = AssistantConfig {
            optimization_share_threshold: 99.0,
            ..Default::default()
        };
        let reply = Reply::build(Intent::Optimization, &sample_analysis(), &config);
        let Reply::Optimization { candidates, .. } = reply else {
            panic!("expected optimization reply");
        };
        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].category, "Shopping");
    }

    #[test]
    fn test_anomaly_reply_without_anomalies() {
        let reply = Reply::build(Intent::Anomaly, &sample_analysis(), &AssistantConfig::default());
        let Reply::Anomaly { count, .. } = &reply else {
            panic!("expected anomaly reply");
        };
        assert_eq!(*count, 0);
        assert!(reply.render().starts_with("Nothing unusual"));
    }

    #[test]
    fn test_anomaly_reply_for_small_outlier() {
        let mut txs: Vec<Transaction> = (0..10)
            .map(|i| tx(&i.to_string(), 100.0, "Groceries", "2024-01-10", "Market"))
            .collect();
        txs.push(tx("tiny", 1.0, "Dining", "2024-01-11", "Tiny"));
        let analysis =
            SpendingAnalyzer::new().analyze_as_of(&txs, NaiveDate::from_ymd_opt(2024, 1, 16).unwrap());

        let reply = Reply::build(Intent::Anomaly, &analysis, &AssistantConfig::default());
        let Reply::Anomaly {
            count,
            lower_threshold,
            flagged,
            ..
        } = &reply
        else {
            panic!("expected anomaly reply");
        };
        assert_eq!(*count, 1);
        assert_eq!(*lower_threshold, 34.08);
        assert_eq!(flagged[0].merchant, "Tiny");

        let text = reply.render();
        assert!(text.contains("outside the usual range"));
        assert!(text.contains("$34.08 to $147.92"));
        assert!(!text.contains("above"));
    }

    #[test]
    fn test_prediction_reply_text() {
        let reply = Reply::build(
            Intent::Prediction,
            &sample_analysis(),
            &AssistantConfig::default(),
        );
        assert!(matches!(reply, Reply::Prediction { .. }));
        assert!(reply.render().contains("confidence"));
    }

    #[test]
    fn test_empty_data_replies() {
        let empty = empty_analysis();
        for intent in Intent::PRIORITY {
            let reply = Reply::build(intent, &empty, &AssistantConfig::default());
            assert_eq!(reply, Reply::NoData { intent });
        }
        assert_eq!(
            Reply::build(Intent::Default, &empty, &AssistantConfig::default()),
            Reply::Help
        );
    }

    #[test]
    fn test_hour_label() {
        assert_eq!(hour_label(0), "12 AM");
        assert_eq!(hour_label(9), "9 AM");
        assert_eq!(hour_label(12), "12 PM");
        assert_eq!(hour_label(23), "11 PM");
    }

    #[test]
    fn test_reply_serializes_with_kind_tag() {
        let json = serde_json::to_value(Reply::Help).unwrap();
        assert_eq!(json["kind"], "help");
    }
}
