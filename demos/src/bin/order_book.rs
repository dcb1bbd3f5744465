//! Demo 2: Order Book Snapshot
//!
//! Showcases: pair validation, depth endpoint
//!
//! Run: cargo run --bin order_book -- ten_btc

use colored::*;
use tokenomy_rest::{Environment, RestError, TokenomyClient};
use tokenomy_types::pairs;
use tracing_subscriber::EnvFilter;

const LEVELS: usize = 10;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let pair = std::env::args()
        .nth(1)
        .unwrap_or_else(|| pairs::TEN_BTC.to_string());

    println!("{}", "═".repeat(50).cyan());
    println!("{}", "  ORDER BOOK".cyan().bold());
    println!("{}", format!("  Tokenomy REST Demo - {}", pair).cyan());
    println!("{}", "═".repeat(50).cyan());
    println!();

    let client = TokenomyClient::new(Environment::public())?;

    let book = match client.get_order_book(&pair).await {
        Ok(book) => book,
        Err(RestError::InvalidPairName(p)) => {
            println!("{} Unknown pair {:?}. Supported pairs:", "✗".red(), p);
            let mut ids: Vec<_> = client.registry().iter().map(|p| p.id()).collect();
            ids.sort_unstable();
            println!("  {}", ids.join(", "));
            return Ok(());
        }
        Err(e) => return Err(e.into()),
    };

    println!(
        "  {:>18}  {:>18}",
        "PRICE".white().bold(),
        "AMOUNT".white().bold()
    );
    println!("  {}", "─".repeat(40));

    for level in book.sell.iter().take(LEVELS).rev() {
        println!(
            "  {:>18}  {:>18}",
            level.price.to_string().red(),
            level.amount.to_string()
        );
    }

    match book.spread() {
        Some(spread) => println!("  {}", format!("── spread {} ──", spread).dimmed()),
        None => println!("  {}", "── one side empty ──".dimmed()),
    }

    for level in book.buy.iter().take(LEVELS) {
        println!(
            "  {:>18}  {:>18}",
            level.price.to_string().green(),
            level.amount.to_string()
        );
    }

    println!("\n{} Demo complete.", "✓".green());
    Ok(())
}
