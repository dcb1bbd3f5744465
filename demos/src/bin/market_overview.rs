//! Demo 1: Market Overview
//!
//! Showcases: public summaries endpoint, exact decimal arithmetic
//!
//! Run: cargo run --bin market_overview

use colored::*;
use tokenomy_rest::{Environment, TokenomyClient};
use tokenomy_types::DecimalValue;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("{}", "═".repeat(70).cyan());
    println!("{}", "  MARKET OVERVIEW".cyan().bold());
    println!("{}", "  Tokenomy REST Demo - 24h Summaries".cyan());
    println!("{}", "═".repeat(70).cyan());
    println!();

    let client = TokenomyClient::new(Environment::public())?;
    let summaries = client.get_market_summaries().await?;

    println!("{} Fetched {} markets\n", "✓".green(), summaries.tickers.len());

    println!(
        "  {:<12}  {:>16}  {:>16}  {:>10}",
        "PAIR".white().bold(),
        "LAST".white().bold(),
        "SPREAD".white().bold(),
        "24H".white().bold()
    );
    println!("  {}", "─".repeat(62));

    let hundred = DecimalValue::from(100i64);

    for (pair, ticker) in &summaries.tickers {
        // prices_24h is keyed by the pair id without its separator
        let change = summaries
            .prices_24h
            .get(&pair.replace('_', ""))
            .filter(|prev| !prev.is_zero())
            .and_then(|prev| (&ticker.last - prev).checked_div(prev))
            .map(|ratio| (&ratio * &hundred).round_dp(2));

        let change = match change {
            Some(c) if c.is_negative() => format!("{}%", c).red(),
            Some(c) => format!("+{}%", c).green(),
            None => "n/a".dimmed(),
        };

        println!(
            "  {:<12}  {:>16}  {:>16}  {:>10}",
            pair.yellow(),
            ticker.last.to_string(),
            ticker.spread().to_string(),
            change
        );
    }

    println!("\n{} Demo complete.", "✓".green());
    Ok(())
}
