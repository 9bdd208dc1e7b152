use labelled_multicall::{abi::multicall3, BlockId};

use alloy::primitives::Address;

use eyre::{Context, Result};
use lazy_static::lazy_static;
use std::{env, ffi::OsStr, sync::Once};
use tracing_subscriber::fmt::format::FmtSpan;

static DOTENV_INIT: Once = Once::new();

fn get_env_var<K: AsRef<OsStr>>(k: K) -> std::result::Result<String, env::VarError> {
    if cfg!(test) || cfg!(feature = "local") {
        DOTENV_INIT.call_once(|| {
            let manifest_dir = env!("CARGO_MANIFEST_DIR");

            // Load the .env relative to the crate root, if there is one
            dotenvy::from_path(format!("{manifest_dir}/.env")).ok();
        });
    }

    env::var(k)
}

// Falls back to the canonical Multicall3 deployment when unset.
fn parse_multicall3_address(value: Option<String>) -> Result<Address> {
    value
        .map(|a| {
            a.to_lowercase()
                .parse::<Address>()
                .wrap_err("Failed to parse MULTICALL3_ADDRESS")
        })
        .transpose()
        .map(|address| address.unwrap_or(multicall3::MULTICALL3_ADDRESS))
}

lazy_static! {
    pub static ref RUST_LOG: String =
        get_env_var("RUST_LOG").unwrap_or_else(|_| "info".to_string());
    pub static ref TRACING_SPAN_EVENTS: FmtSpan = if get_env_var("TRACING_SPAN_EVENTS")
        .unwrap_or_else(|_| "false".to_string())
        .parse()
        .unwrap_or(false)
    {
        FmtSpan::CLOSE
    } else {
        FmtSpan::NONE
    };
    pub static ref RPC_URL: url::Url = get_env_var("RPC_URL")
        .wrap_err("Failed to read RPC_URL from env")
        .and_then(|u| url::Url::parse(u.as_str()).wrap_err("Failed to parse RPC_URL"))
        .unwrap();
    pub static ref MULTICALL3_ADDRESS: Address =
        parse_multicall3_address(get_env_var("MULTICALL3_ADDRESS").ok()).unwrap();
    pub static ref BLOCK_ID: BlockId = get_env_var("BLOCK_ID")
        .wrap_err("Failed to read BLOCK_ID from env")
        .and_then(|id| id.parse::<BlockId>().wrap_err("Failed to parse BLOCK_ID"))
        .unwrap_or(BlockId::Latest);
    pub static ref ABI_PATH: String = get_env_var("ABI_PATH")
        .wrap_err("Failed to read ABI_PATH from env")
        .unwrap();
    pub static ref GROUPS_PATH: String = get_env_var("GROUPS_PATH")
        .wrap_err("Failed to read GROUPS_PATH from env")
        .unwrap();
}
