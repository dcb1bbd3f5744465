//! Demo 3: Account Balances
//!
//! Showcases: signed requests, available/frozen balance split
//!
//! Run: TOKENOMY_TOKEN=... TOKENOMY_SECRET=... cargo run --bin account_balances

use chrono::{TimeZone, Utc};
use colored::*;
use tokenomy_rest::TokenomyClient;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("{}", "═".repeat(60).cyan());
    println!("{}", "  ACCOUNT BALANCES".cyan().bold());
    println!("{}", "  Tokenomy REST Demo - getInfo".cyan());
    println!("{}", "═".repeat(60).cyan());
    println!();

    let client = TokenomyClient::from_env()?;

    if !client.has_credentials() {
        println!(
            "{} Set TOKENOMY_TOKEN and TOKENOMY_SECRET to run this demo",
            "✗".red()
        );
        return Ok(());
    }

    let info = client.get_user_info().await?;

    if let Some(name) = &info.name {
        println!("{} Signed in as {}", "✓".green(), name.yellow());
    }
    if let Some(time) = info
        .server_time
        .and_then(|t| Utc.timestamp_opt(t, 0).single())
    {
        println!("{} Server time {}", "✓".green(), time);
    }
    println!();

    println!(
        "  {:<8}  {:>16}  {:>16}  {:>16}",
        "ASSET".white().bold(),
        "AVAILABLE".white().bold(),
        "FROZEN".white().bold(),
        "TOTAL".white().bold()
    );
    println!("  {}", "─".repeat(62));

    let assets = &info.assets;
    for asset in assets.non_zero_assets() {
        println!(
            "  {:<8}  {:>16}  {:>16}  {:>16}",
            asset.yellow(),
            assets.available(asset).to_string(),
            assets.frozen(asset).to_string().dimmed(),
            assets.total(asset).to_string().bold()
        );
    }

    println!("\n{} Demo complete.", "✓".green());
    Ok(())
}
