//! Query basic state from a running node. Addresses passed as arguments get
//! their balances printed.
//!
//! NODE_REST_URL, NODE_WS_URL, and CHAIN_ID override the local defaults.

use anyhow::Result;
use neutron::{BlockWaiter, ChainClient, NEUTRON_DENOM};

fn env_or(name: &str, fallback: &str) -> String {
    std::env::var(name).unwrap_or_else(|_| fallback.to_owned())
}

#[tokio::main]
async fn main() -> Result<()> {
    let rest = env_or("NODE_REST_URL", "http://localhost:1317");
    let ws = env_or("NODE_WS_URL", "ws://localhost:26657/websocket");
    let chain_id = env_or("CHAIN_ID", "test-1");

    let chain = ChainClient::new(rest, chain_id, BlockWaiter::new(ws), NEUTRON_DENOM.clone())?;

    let channels = chain.list_ibc_channels().await?;
    println!("{} IBC channel(s)", channels.channels.len());
    for channel in &channels.channels {
        println!(
            "  {} / {} -> {} ({})",
            channel.port_id, channel.channel_id, channel.counterparty.channel_id, channel.state
        );
    }

    for address in std::env::args().skip(1) {
        let balances = chain.query_balances(&address).await?;
        println!("{address}:");
        for coin in balances.balances {
            println!("  {}{}", coin.amount, coin.denom);
        }
    }

    Ok(())
}
