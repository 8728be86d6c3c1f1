//! Server command implementation

use anyhow::Result;
use pepulink_server::{Dataset, ServerConfig};

use super::Session;

pub async fn cmd_serve(
    session: Session,
    host: &str,
    port: u16,
    allowed_origins: Vec<String>,
) -> Result<()> {
    println!("🚀 Starting PEPULink insights server...");
    println!("   Transactions: {}", session.transactions.len());
    println!("   Listening: http://{}:{}", host, port);
    if let Some(as_of) = session.pinned_as_of {
        println!("   As of: {}", as_of);
    }
    if !allowed_origins.is_empty() {
        println!("   CORS origins: {}", allowed_origins.join(", "));
    }
    println!();
    println!("   Press Ctrl+C to stop");

    let dataset = Dataset {
        transactions: session.transactions,
        config: session.config,
        as_of: session.pinned_as_of,
    };
    let config = ServerConfig { allowed_origins };

    pepulink_server::serve(dataset, host, port, config).await?;

    Ok(())
}
