//! Public market data walkthrough
//!
//! Fetches pair rules, the ticker, a two-level order book and the last two
//! trades for ETH/BTC.
//!
//! Run: RUST_LOG=wex_rest=debug cargo run -p wex-rest --example public_market

use tracing_subscriber::EnvFilter;
use wex_rest::WexClient;

const PAIR: &str = "eth_btc";

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let client = WexClient::new()?;

    let info = client.info().await?;
    println!("server time: {}", info.server_time);
    if let Some(rules) = info.pairs.get(PAIR) {
        println!(
            "{}: min price {}, max price {}, min amount {}, fee {}%",
            PAIR, rules.min_price, rules.max_price, rules.min_amount, rules.fee
        );
    }

    let market = client.ticker(PAIR).await?;
    println!(
        "ticker: last {} buy {} sell {} vol {} (updated {})",
        market.last, market.buy, market.sell, market.volume, market.updated
    );

    let book = client.depth(PAIR, Some(2)).await?;
    for ask in book.asks.iter().rev() {
        println!("  ask {:>14} x {:<14} = {}", ask.rate, ask.amount, ask.total);
    }
    println!("  ---- spread {:?}", book.spread());
    for bid in &book.bids {
        println!("  bid {:>14} x {:<14} = {}", bid.rate, bid.amount, bid.total);
    }

    let trades = client.trades(PAIR, Some(2)).await?;
    for trade in &trades {
        println!(
            "trade #{} {} {} @ {} at {}",
            trade.id, trade.trade_type, trade.amount, trade.rate, trade.timestamp
        );
    }

    Ok(())
}
