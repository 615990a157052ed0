//! Environment-driven defaults used across test runs.

use std::path::PathBuf;

use anyhow::Result;
use once_cell::sync::Lazy;

fn env_or(name: &str, fallback: &str) -> String {
    std::env::var(name).unwrap_or_else(|_| fallback.to_owned())
}

/// The chain's fee denom.
pub static NEUTRON_DENOM: Lazy<String> = Lazy::new(|| env_or("NEUTRON_DENOM", "untrn"));

/// IBC-transferred ATOM test denom.
pub static IBC_ATOM_DENOM: Lazy<String> = Lazy::new(|| env_or("IBC_ATOM_DENOM", "uibcatom"));

/// IBC-transferred USDC test denom.
pub static IBC_USDC_DENOM: Lazy<String> = Lazy::new(|| env_or("IBC_USDC_DENOM", "uibcusdc"));

/// Fee denom on the counterparty hub chain.
pub static COSMOS_DENOM: Lazy<String> = Lazy::new(|| env_or("COSMOS_DENOM", "uatom"));

/// Directory holding compiled contract artifacts.
pub static CONTRACTS_PATH: Lazy<PathBuf> =
    Lazy::new(|| env_or("CONTRACTS_PATH", "contracts/artifacts").into());

/// Full path of a contract artifact by file name.
pub fn contract_path(file_name: &str) -> PathBuf {
    CONTRACTS_PATH.join(file_name)
}

/// Load a contract artifact by file name.
pub fn contract_binary(file_name: &str) -> Result<Vec<u8>> {
    Ok(fs_err::read(contract_path(file_name))?)
}
