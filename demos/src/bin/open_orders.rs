//! Demo 4: Open Orders and Recent Fills
//!
//! Showcases: openOrders and tradeHistory, asset-keyed amounts
//!
//! Run: TOKENOMY_TOKEN=... TOKENOMY_SECRET=... cargo run --bin open_orders -- ten_btc

use colored::*;
use tokenomy_rest::{TokenomyClient, TradeHistoryQuery};
use tokenomy_types::{pairs, SortOrder, TradeType};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let pair = std::env::args()
        .nth(1)
        .unwrap_or_else(|| pairs::TEN_BTC.to_string());

    println!("{}", "═".repeat(60).cyan());
    println!("{}", "  OPEN ORDERS".cyan().bold());
    println!("{}", format!("  Tokenomy REST Demo - {}", pair).cyan());
    println!("{}", "═".repeat(60).cyan());
    println!();

    let client = TokenomyClient::from_env()?;
    let market = client
        .registry()
        .get(&pair)
        .ok_or_else(|| format!("unknown pair {:?}", pair))?
        .clone();

    let orders = client.list_open_orders(&pair).await?;
    let open = orders.get(market.id()).map(Vec::as_slice).unwrap_or_default();

    println!("{} {} open orders\n", "✓".green(), open.len());

    for order in open {
        let side = match order.trade_type {
            TradeType::Buy => "BUY ".green(),
            TradeType::Sell => "SELL".red(),
        };
        let remaining = order
            .remaining
            .get(market.base())
            .map(ToString::to_string)
            .unwrap_or_else(|| "?".to_string());

        println!(
            "  #{:<10} {} {:>14} {} @ {}",
            order.order_id,
            side,
            remaining,
            market.base(),
            order.price
        );
    }

    let query = TradeHistoryQuery::new()
        .with_count(10)
        .with_order(SortOrder::Desc);
    let history = client.list_trade_history(&pair, &query).await?;

    println!("\n{} Last {} fills\n", "✓".green(), history.trades.len());

    for trade in &history.trades {
        let amount = trade
            .amounts
            .get(market.base())
            .map(ToString::to_string)
            .unwrap_or_default();

        println!(
            "  {:<5} {:>14} {} @ {}  {}",
            trade.trade_type.to_string().yellow(),
            amount,
            market.base(),
            trade.price,
            format!("fee {}", trade.fee.clone().unwrap_or_default()).dimmed()
        );
    }

    println!("\n{} Demo complete.", "✓".green());
    Ok(())
}
