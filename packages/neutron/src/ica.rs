//! Interchain account lookup.

use anyhow::Result;
use serde::Deserialize;

use crate::{ChainClient, HasAddress};

/// The registered interchain account, as the controlling contract reports it.
#[derive(Deserialize, Clone, Debug)]
pub struct IcaAddressResponse {
    pub interchain_account_address: String,
}

/// Poll a contract for the interchain account it registered, once per new
/// block. Registration completes asynchronously over IBC, so the query fails
/// until the counterparty confirms.
pub async fn get_ica(
    chain: &ChainClient,
    contract: impl HasAddress,
    ica_id: &str,
    connection_id: &str,
    num_attempts: usize,
) -> Result<IcaAddressResponse> {
    let address = contract.get_address_string();
    let query = serde_json::json!({
        "interchain_account_address": {
            "interchain_account_id": ica_id,
            "connection_id": connection_id,
        }
    });
    chain
        .get_with_attempts(
            || {
                let address = address.clone();
                let query = query.clone();
                async move {
                    Ok(chain
                        .query_contract::<IcaAddressResponse>(address, &query)
                        .await?)
                }
            },
            |_: &IcaAddressResponse| async { true },
            num_attempts,
        )
        .await
}
