//! CLI command tests

use chrono::NaiveDate;
use clap::Parser;
use pepulink_core::{sample, Config};

use crate::cli::{Cli, Commands};
use crate::commands::{self, truncate, Session};

fn as_of() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, 20).unwrap()
}

fn demo_session() -> Session {
    Session {
        transactions: sample::transactions_ending(as_of()),
        config: Config::default(),
        as_of: as_of(),
        pinned_as_of: Some(as_of()),
    }
}

fn empty_session() -> Session {
    Session {
        transactions: vec![],
        config: Config::default(),
        as_of: as_of(),
        pinned_as_of: None,
    }
}

// ========== Argument Parsing ==========

#[test]
fn test_parse_ask_with_globals() {
    let cli = Cli::try_parse_from([
        "pepulink",
        "ask",
        "any",
        "tips?",
        "--as-of",
        "2024-06-20",
        "--data",
        "wallet.csv",
    ])
    .unwrap();

    assert_eq!(cli.as_of, Some(as_of()));
    assert_eq!(cli.data.as_deref(), Some(std::path::Path::new("wallet.csv")));
    match cli.command {
        Commands::Ask { message, json } => {
            assert_eq!(message.join(" "), "any tips?");
            assert!(!json);
        }
        _ => panic!("expected ask"),
    }
}

#[test]
fn test_parse_rejects_bad_date() {
    assert!(Cli::try_parse_from(["pepulink", "--as-of", "June 20", "analyze"]).is_err());
}

#[test]
fn test_parse_serve_defaults() {
    let cli = Cli::try_parse_from(["pepulink", "serve"]).unwrap();
    match cli.command {
        Commands::Serve {
            port,
            host,
            allow_origins,
        } => {
            assert_eq!(port, 3000);
            assert_eq!(host, "127.0.0.1");
            assert!(allow_origins.is_empty());
        }
        _ => panic!("expected serve"),
    }
}

// ========== Session ==========

#[test]
fn test_session_from_files() {
    let dir = tempfile::tempdir().unwrap();

    let data = dir.path().join("wallet.csv");
    std::fs::write(
        &data,
        "date,amount,category,merchant\n\
         2024-06-01,12.50,Dining,Cafe\n\
         2024-06-02,40.00,Groceries,Market\n",
    )
    .unwrap();

    let config = dir.path().join("pepulink.toml");
    std::fs::write(&config, "[insights]\nmonthly_budget = 300.0\n").unwrap();

    let session = Session::open(Some(&data), Some(&config), Some(as_of())).unwrap();
    assert_eq!(session.transactions.len(), 2);
    assert_eq!(session.config.insights.monthly_budget, Some(300.0));
    assert_eq!(session.pinned_as_of, Some(as_of()));

    let analysis = session.analysis();
    assert_eq!(analysis.total_amount, 52.5);
    assert_eq!(analysis.prediction.month_to_date_spending, 52.5);
}

#[test]
fn test_session_missing_config_fails() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("nope.toml");
    assert!(Session::open(None, Some(&missing), Some(as_of())).is_err());
}

#[test]
fn test_session_bad_data_fails() {
    let dir = tempfile::tempdir().unwrap();
    let data = dir.path().join("wallet.txt");
    std::fs::write(&data, "whatever").unwrap();
    let config = dir.path().join("pepulink.toml");
    std::fs::write(&config, "").unwrap();

    let err = Session::open(Some(&data), Some(&config), Some(as_of()))
        .err()
        .unwrap();
    assert!(format!("{:#}", err).contains("Failed to load transactions"));
}

// ========== Commands ==========

#[test]
fn test_cmd_analyze() {
    let session = demo_session();
    assert!(commands::cmd_analyze(&session, false).is_ok());
    assert!(commands::cmd_analyze(&session, true).is_ok());
    assert!(commands::cmd_analyze(&empty_session(), false).is_ok());
}

#[test]
fn test_cmd_insights() {
    let session = demo_session();
    assert!(commands::cmd_insights(&session, false, None).is_ok());
    assert!(commands::cmd_insights(&session, true, Some(1)).is_ok());
    assert!(commands::cmd_insights(&empty_session(), false, None).is_ok());
}

#[test]
fn test_cmd_ask() {
    let session = demo_session();
    assert!(commands::cmd_ask(&session, "Analyze my spending patterns", false).is_ok());
    assert!(commands::cmd_ask(&session, "anything unusual?", true).is_ok());
    assert!(commands::cmd_ask(&empty_session(), "predict next month", false).is_ok());
}

#[test]
fn test_cmd_transactions() {
    let session = demo_session();
    assert!(commands::cmd_transactions(&session, 5, None).is_ok());
    assert!(commands::cmd_transactions(&session, 5, Some("dining")).is_ok());
    assert!(commands::cmd_transactions(&empty_session(), 5, None).is_ok());
}

#[test]
fn test_recent_transactions() {
    let session = demo_session();

    let recent = commands::recent_transactions(&session.transactions, 3, None);
    assert_eq!(recent.len(), 3);
    assert_eq!(recent[0].day(), as_of());
    assert!(recent[0].date >= recent[1].date);
    assert!(recent[1].date >= recent[2].date);

    let dining = commands::recent_transactions(&session.transactions, 100, Some("DINING"));
    assert!(!dining.is_empty());
    assert!(dining.iter().all(|t| t.category == "Dining"));
}

#[test]
fn test_config_source_explicit() {
    let path = std::path::Path::new("/tmp/custom.toml");
    assert_eq!(commands::config_source(Some(path)), "/tmp/custom.toml");
}

#[tokio::test]
async fn test_chat_loop_stops_at_quit() {
    let session = demo_session();
    let input: &[u8] = b"any tips?\n\n   \nshow me a breakdown\nquit\nthis is never read\n";

    let replies = commands::chat_loop(&session, input, 0).await.unwrap();
    assert_eq!(replies, 2);
}

#[tokio::test]
async fn test_chat_loop_ends_at_eof() {
    let session = demo_session();
    let input: &[u8] = b"hello";

    let replies = commands::chat_loop(&session, input, 1).await.unwrap();
    assert_eq!(replies, 1);
}

// ========== Helpers ==========

#[test]
fn test_truncate() {
    assert_eq!(truncate("Starbucks", 20), "Starbucks");
    assert_eq!(truncate("Whole Foods Market #123", 10), "Whole F...");
}

#[test]
fn test_share_bar() {
    assert_eq!(commands::share_bar(0.0), "░".repeat(20));
    assert_eq!(commands::share_bar(100.0), "█".repeat(20));
    assert_eq!(
        commands::share_bar(50.0),
        format!("{}{}", "█".repeat(10), "░".repeat(10))
    );
}
