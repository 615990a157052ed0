use std::future::Future;
use std::time::Duration;

use anyhow::{Context, Result};
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::QueryError;
use crate::types::{
    AccountInfo, AccountResponse, AckFailuresResponse, AdminsResponse, BalancesResponse,
    BroadcastResponse, ChannelsList, CodeInfoResponse, Coin, ContractInfoResponse,
    CurrentPlanResponse, DelegationsResponse, DenomTraceResponse, DenomTraceWrapper,
    GetTxResponse, IcaHostParamsResponse, PageRequest, PauseInfoResponse, PinnedCodesResponse,
    ScheduleResponse, SmartQueryResponse, TotalBurnedNeutronsAmountResponse,
    TotalSupplyByDenomResponse, TxResponse,
};
use crate::wait::{self, BlockWaiter};
use crate::{BroadcastMode, SignedTx};

/// Attempt budgets and timeouts for a [ChainClient].
#[derive(Clone, Debug)]
pub struct ClientConfig {
    /// Deadline for a single REST request.
    pub query_timeout: Duration,

    /// How many blocks to poll for a broadcast transaction before giving up.
    pub tx_confirm_attempts: usize,

    /// How many blocks to poll a contract query before giving up.
    pub contract_wait_attempts: usize,
}

impl Default for ClientConfig {
    fn default() -> Self {
        ClientConfig {
            query_timeout: Duration::from_secs(10),
            tx_confirm_attempts: 10,
            contract_wait_attempts: 20,
        }
    }
}

/// Read access to a node's REST API, plus the block waiter used to pace
/// retries. Cheap to clone.
#[derive(Clone)]
pub struct ChainClient {
    base_url: String,
    chain_id: String,
    http: reqwest::Client,
    waiter: BlockWaiter,
    denom: String,
    config: ClientConfig,
}

impl ChainClient {
    pub fn new(
        base_url: impl Into<String>,
        chain_id: impl Into<String>,
        waiter: BlockWaiter,
        denom: impl Into<String>,
    ) -> Result<Self> {
        Self::new_with_config(base_url, chain_id, waiter, denom, ClientConfig::default())
    }

    pub fn new_with_config(
        base_url: impl Into<String>,
        chain_id: impl Into<String>,
        waiter: BlockWaiter,
        denom: impl Into<String>,
        config: ClientConfig,
    ) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.query_timeout)
            .build()
            .context("Could not build the HTTP client")?;
        Ok(ChainClient {
            base_url: base_url.into().trim_end_matches('/').to_owned(),
            chain_id: chain_id.into(),
            http,
            waiter,
            denom: denom.into(),
            config,
        })
    }

    pub fn chain_id(&self) -> &str {
        &self.chain_id
    }

    /// The chain's fee denom.
    pub fn denom(&self) -> &str {
        &self.denom
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn block_waiter(&self) -> &BlockWaiter {
        &self.waiter
    }

    fn url_for(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn invalid(&self, path: &str, message: String) -> QueryError {
        QueryError::InvalidResponse {
            url: self.url_for(path),
            message,
        }
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&str, String)],
    ) -> Result<T, QueryError> {
        let url = self.url_for(path);
        let res = self
            .http
            .get(&url)
            .query(params)
            .send()
            .await
            .map_err(|source| QueryError::Transport {
                url: url.clone(),
                source,
            })?;
        Self::read_json(url, res).await
    }

    async fn post_json<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, QueryError> {
        let url = self.url_for(path);
        let res = self
            .http
            .post(&url)
            .json(body)
            .send()
            .await
            .map_err(|source| QueryError::Transport {
                url: url.clone(),
                source,
            })?;
        Self::read_json(url, res).await
    }

    async fn read_json<T: DeserializeOwned>(
        url: String,
        res: reqwest::Response,
    ) -> Result<T, QueryError> {
        let status = res.status();
        if !status.is_success() {
            let body = res.text().await.unwrap_or_default();
            // Prefer the node's own error message over the raw body.
            let message = serde_json::from_str::<crate::types::ErrorBody>(&body)
                .map(|body| body.message)
                .unwrap_or(body);
            return Err(QueryError::Upstream {
                url,
                status,
                message,
            });
        }
        res.json()
            .await
            .map_err(|source| QueryError::Transport { url, source })
    }

    /// Account number and current sequence for an address.
    pub async fn query_account(
        &self,
        address: impl Into<String>,
    ) -> Result<AccountInfo, QueryError> {
        const BASE_ACCOUNT: &str = "/cosmos.auth.v1beta1.BaseAccount";
        let address = address.into();
        let path = format!("/cosmos/auth/v1beta1/accounts/{address}");
        let res: AccountResponse = self.get_json(&path, &[]).await?;
        if res.account.type_url != BASE_ACCOUNT {
            return Err(self.invalid(
                &path,
                format!("expected a base account, got {:?}", res.account.type_url),
            ));
        }
        let account_number = res
            .account
            .account_number
            .parse()
            .map_err(|_| self.invalid(&path, format!("bad account number: {}", res.account.account_number)))?;
        let sequence = res
            .account
            .sequence
            .parse()
            .map_err(|_| self.invalid(&path, format!("bad sequence: {}", res.account.sequence)))?;
        Ok(AccountInfo {
            account_number,
            sequence,
        })
    }

    /// Current transaction sequence number for an address.
    pub async fn query_sequence(&self, address: impl Into<String>) -> Result<u64, QueryError> {
        Ok(self.query_account(address).await?.sequence)
    }

    pub async fn query_balances(
        &self,
        address: impl Into<String>,
    ) -> Result<BalancesResponse, QueryError> {
        self.get_json(
            &format!("/cosmos/bank/v1beta1/balances/{}", address.into()),
            &[],
        )
        .await
    }

    /// Balance of one denom, zero when the address holds none of it.
    pub async fn query_denom_balance(
        &self,
        address: impl Into<String>,
        denom: &str,
    ) -> Result<u128, QueryError> {
        let address = address.into();
        let path = format!("/cosmos/bank/v1beta1/balances/{address}");
        let res: BalancesResponse = self.get_json(&path, &[]).await?;
        denom_amount(&res.balances, denom)
            .map_err(|err| self.invalid(&path, format!("bad balance amount: {err}")))
    }

    pub async fn query_total_supply_by_denom(
        &self,
        denom: &str,
    ) -> Result<TotalSupplyByDenomResponse, QueryError> {
        self.get_json(&format!("/cosmos/bank/v1beta1/supply/{denom}"), &[])
            .await
    }

    /// Smart-query a contract. The query is JSON-rendered and base64-embedded
    /// in the URL; the response comes back base64-encoded.
    pub async fn query_contract<T: DeserializeOwned>(
        &self,
        contract: impl Into<String>,
        query: &impl Serialize,
    ) -> Result<T, QueryError> {
        let contract = contract.into();
        let encoded = serde_json::to_vec(query)?;
        let path = smart_query_path(&contract, &encoded);
        let res: SmartQueryResponse = self
            .get_json(&path, &[("encoding", "base64".to_owned())])
            .await?;
        let decoded = STANDARD
            .decode(&res.result.smart)
            .map_err(|err| self.invalid(&path, format!("result is not base64: {err}")))?;
        serde_json::from_slice(&decoded)
            .map_err(|err| self.invalid(&path, format!("unexpected result JSON: {err}")))
    }

    /// Like [ChainClient::query_contract], but treats any failure as "not
    /// ready yet" and retries once per new block.
    pub async fn query_contract_with_wait<T: DeserializeOwned>(
        &self,
        contract: impl Into<String>,
        query: &impl Serialize,
    ) -> Result<T> {
        self.query_contract_with_attempts(contract, query, self.config.contract_wait_attempts)
            .await
    }

    pub async fn query_contract_with_attempts<T: DeserializeOwned>(
        &self,
        contract: impl Into<String>,
        query: &impl Serialize,
        num_attempts: usize,
    ) -> Result<T> {
        let contract = contract.into();
        for attempt in 1..=num_attempts {
            match self.query_contract(&*contract, query).await {
                Ok(res) => return Ok(res),
                Err(err) => {
                    log::debug!(
                        "Contract {contract} not ready, attempt {attempt}/{num_attempts}: {err}"
                    );
                }
            }
            self.waiter.wait_blocks(1).await?;
        }
        Err(anyhow::anyhow!("Failed to query contract {contract}"))
    }

    pub async fn query_contract_info(
        &self,
        contract: impl Into<String>,
    ) -> Result<ContractInfoResponse, QueryError> {
        self.get_json(
            &format!("/cosmwasm/wasm/v1/contract/{}", contract.into()),
            &[],
        )
        .await
    }

    pub async fn query_contract_admin(
        &self,
        contract: impl Into<String>,
    ) -> Result<String, QueryError> {
        Ok(self.query_contract_info(contract).await?.contract_info.admin)
    }

    pub async fn query_code_data_hash(&self, code_id: u64) -> Result<String, QueryError> {
        let res: CodeInfoResponse = self
            .get_json(&format!("/cosmwasm/wasm/v1/code/{code_id}"), &[])
            .await?;
        Ok(res.code_info.data_hash)
    }

    pub async fn query_pinned_codes(&self) -> Result<PinnedCodesResponse, QueryError> {
        self.get_json("/cosmwasm/wasm/v1/codes/pinned", &[]).await
    }

    pub async fn query_denom_trace(
        &self,
        ibc_denom: impl Into<String>,
    ) -> Result<DenomTraceResponse, QueryError> {
        let res: DenomTraceWrapper = self
            .get_json(
                &format!("/ibc/apps/transfer/v1/denom_traces/{}", ibc_denom.into()),
                &[],
            )
            .await?;
        Ok(res.denom_trace)
    }

    pub async fn list_ibc_channels(&self) -> Result<ChannelsList, QueryError> {
        self.get_json("/ibc/core/channel/v1/channels", &[]).await
    }

    /// Whether the ICA host module accepts interchain account registrations.
    pub async fn query_ica_host_enabled(&self) -> Result<bool, QueryError> {
        let res: IcaHostParamsResponse = self
            .get_json("/ibc/apps/interchain_accounts/host/v1/params", &[])
            .await?;
        Ok(res.params.host_enabled)
    }

    pub async fn query_schedules(
        &self,
        pagination: Option<&PageRequest>,
    ) -> Result<ScheduleResponse, QueryError> {
        self.get_json("/neutron/cron/schedule", &page_params(pagination))
            .await
    }

    pub async fn query_ack_failures(
        &self,
        address: impl Into<String>,
        pagination: Option<&PageRequest>,
    ) -> Result<AckFailuresResponse, QueryError> {
        self.get_json(
            &format!("/neutron/contractmanager/failures/{}", address.into()),
            &page_params(pagination),
        )
        .await
    }

    pub async fn query_total_burned(
        &self,
    ) -> Result<TotalBurnedNeutronsAmountResponse, QueryError> {
        self.get_json("/neutron/feeburner/total_burned_neutrons_amount", &[])
            .await
    }

    pub async fn query_interchainqueries_params(&self) -> Result<serde_json::Value, QueryError> {
        self.get_json("/neutron/interchainqueries/params", &[]).await
    }

    pub async fn query_current_upgrade_plan(&self) -> Result<CurrentPlanResponse, QueryError> {
        self.get_json("/cosmos/upgrade/v1beta1/current_plan", &[])
            .await
    }

    pub async fn query_chain_admins(&self) -> Result<Vec<String>, QueryError> {
        let res: AdminsResponse = self
            .get_json("/cosmos/adminmodule/adminmodule/admins", &[])
            .await?;
        Ok(res.admins)
    }

    pub async fn query_delegations(
        &self,
        delegator: impl Into<String>,
    ) -> Result<DelegationsResponse, QueryError> {
        self.get_json(
            &format!("/cosmos/staking/v1beta1/delegations/{}", delegator.into()),
            &[],
        )
        .await
    }

    /// Pause status of a pausable DAO contract.
    pub async fn query_paused_info(
        &self,
        contract: impl Into<String>,
    ) -> Result<PauseInfoResponse, QueryError> {
        self.query_contract(contract, &serde_json::json!({ "pause_info": {} }))
            .await
    }

    /// Look up a transaction by hash, failing immediately when not found.
    pub async fn get_tx(&self, txhash: &str) -> Result<GetTxResponse, QueryError> {
        self.get_json(&format!("/cosmos/tx/v1beta1/txs/{txhash}"), &[])
            .await
    }

    pub(crate) async fn broadcast(
        &self,
        signed: &SignedTx,
        mode: BroadcastMode,
    ) -> Result<TxResponse, QueryError> {
        let body = serde_json::json!({
            "tx_bytes": signed.to_base64(),
            "mode": mode.as_str(),
        });
        let res: BroadcastResponse = self.post_json("/cosmos/tx/v1beta1/txs", &body).await?;
        Ok(res.tx_response)
    }

    /// Retry `get` once per new block until `ready` accepts its result.
    pub async fn get_with_attempts<T, Get, GetFut, Ready, ReadyFut>(
        &self,
        get: Get,
        ready: Ready,
        num_attempts: usize,
    ) -> Result<T>
    where
        T: std::fmt::Debug,
        Get: Fn() -> GetFut,
        GetFut: Future<Output = Result<T>>,
        Ready: Fn(&T) -> ReadyFut,
        ReadyFut: Future<Output = bool>,
    {
        wait::get_with_attempts(&self.waiter, get, ready, num_attempts).await
    }

    /// Pace on new blocks via the underlying [BlockWaiter].
    pub async fn wait_blocks(&self, count: usize) -> Result<()> {
        self.waiter.wait_blocks(count).await?;
        Ok(())
    }
}

fn page_params(pagination: Option<&PageRequest>) -> Vec<(&'static str, String)> {
    pagination.map(PageRequest::to_params).unwrap_or_default()
}

fn smart_query_path(contract: &str, query_json: &[u8]) -> String {
    format!(
        "/wasm/contract/{contract}/smart/{}",
        STANDARD.encode(query_json)
    )
}

fn denom_amount(balances: &[Coin], denom: &str) -> Result<u128, std::num::ParseIntError> {
    balances
        .iter()
        .find(|coin| coin.denom == denom)
        .map_or(Ok(0), |coin| coin.amount.parse())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_denom_defaults_to_zero() {
        let balances = vec![Coin {
            denom: "untrn".to_owned(),
            amount: "250".to_owned(),
        }];
        assert_eq!(denom_amount(&balances, "untrn").unwrap(), 250);
        assert_eq!(denom_amount(&balances, "uatom").unwrap(), 0);
        assert_eq!(denom_amount(&[], "untrn").unwrap(), 0);
    }

    #[test]
    fn smart_query_is_base64_in_the_path() {
        let path = smart_query_path("neutron1contract", br#"{"pause_info":{}}"#);
        assert_eq!(
            path,
            "/wasm/contract/neutron1contract/smart/eyJwYXVzZV9pbmZvIjp7fX0="
        );
    }
}
