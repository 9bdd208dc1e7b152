mod config;
mod input;
mod output;

use labelled_multicall::{labelled_group_multicall, CallCodec, Multicall3Transport};

use alloy::providers::ProviderBuilder;

use eyre::{Result, WrapErr};
use std::{fs, str::FromStr};
use tracing::{info, instrument};
use tracing_subscriber::EnvFilter;

#[tokio::main]
#[instrument]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_str(&config::RUST_LOG).unwrap_or_default())
        .with_span_events(config::TRACING_SPAN_EVENTS.clone())
        .with_writer(std::io::stderr)
        .init();

    info!(
        rust_log = config::RUST_LOG.as_str(),
        block_id = config::BLOCK_ID.to_string(),
        multicall_address = config::MULTICALL3_ADDRESS.to_string(),
        abi_path = config::ABI_PATH.as_str(),
        groups_path = config::GROUPS_PATH.as_str(),
        "start"
    );

    let codec = fs::read_to_string(&*config::ABI_PATH)
        .wrap_err_with(|| format!("failed to read {}", *config::ABI_PATH))
        .and_then(|json| CallCodec::from_json(&json).wrap_err("failed to parse abi"))?;

    let groups = fs::read_to_string(&*config::GROUPS_PATH)
        .wrap_err_with(|| format!("failed to read {}", *config::GROUPS_PATH))
        .and_then(|json| input::parse_groups(&json, &codec))?;

    let transport = Multicall3Transport::with_address(
        ProviderBuilder::new().connect_http(config::RPC_URL.clone()),
        *config::MULTICALL3_ADDRESS,
    )
    .at_block(*config::BLOCK_ID);

    let result_set = labelled_group_multicall(&transport, &codec, &groups)
        .await
        .wrap_err("labelled group multicall failed")?;

    println!(
        "{}",
        serde_json::to_string_pretty(&output::result_set_to_json(&groups, &result_set))?
    );

    info!(groups_count = result_set.len(), "complete");

    Ok(())
}
