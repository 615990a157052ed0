//! Typed response shapes for the node's REST API.
//!
//! The LCD renders protobuf integers as JSON strings; fields keep that
//! rendering and callers parse where they need numbers.

use serde::{Deserialize, Serialize};

/// A denom/amount pair as the REST API renders it.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct Coin {
    pub denom: String,
    pub amount: String,
}

#[derive(Deserialize, Clone, Debug, Default)]
pub struct Pagination {
    #[serde(default)]
    pub next_key: Option<String>,
    #[serde(default)]
    pub total: Option<String>,
}

/// Pagination parameters accepted by list endpoints.
#[derive(Clone, Debug, Default)]
pub struct PageRequest {
    pub key: Option<String>,
    pub offset: Option<u64>,
    pub limit: Option<u64>,
    pub count_total: Option<bool>,
    pub reverse: Option<bool>,
}

impl PageRequest {
    pub(crate) fn to_params(&self) -> Vec<(&'static str, String)> {
        let mut params = Vec::new();
        if let Some(key) = &self.key {
            params.push(("pagination.key", key.clone()));
        }
        if let Some(offset) = self.offset {
            params.push(("pagination.offset", offset.to_string()));
        }
        if let Some(limit) = self.limit {
            params.push(("pagination.limit", limit.to_string()));
        }
        if let Some(count_total) = self.count_total {
            params.push(("pagination.count_total", count_total.to_string()));
        }
        if let Some(reverse) = self.reverse {
            params.push(("pagination.reverse", reverse.to_string()));
        }
        params
    }
}

/// Response model for the bank balances query.
#[derive(Deserialize, Clone, Debug, Default)]
pub struct BalancesResponse {
    pub balances: Vec<Coin>,
    #[serde(default)]
    pub pagination: Option<Pagination>,
}

/// Response model for the IBC transfer denom trace query.
#[derive(Deserialize, Clone, Debug, Default)]
pub struct DenomTraceResponse {
    #[serde(default)]
    pub path: Option<String>,
    #[serde(default)]
    pub base_denom: Option<String>,
}

#[derive(Deserialize, Clone, Debug)]
pub(crate) struct DenomTraceWrapper {
    pub denom_trace: DenomTraceResponse,
}

#[derive(Deserialize, Clone, Debug, Default)]
pub struct ChannelCounterparty {
    #[serde(default)]
    pub port_id: String,
    #[serde(default)]
    pub channel_id: String,
}

#[derive(Deserialize, Clone, Debug, Default)]
pub struct IbcChannel {
    #[serde(default)]
    pub state: String,
    #[serde(default)]
    pub ordering: String,
    #[serde(default)]
    pub counterparty: ChannelCounterparty,
    #[serde(default)]
    pub connection_hops: Vec<String>,
    #[serde(default)]
    pub version: String,
    #[serde(default)]
    pub port_id: String,
    #[serde(default)]
    pub channel_id: String,
}

#[derive(Deserialize, Clone, Debug, Default)]
pub struct ChannelsList {
    pub channels: Vec<IbcChannel>,
    #[serde(default)]
    pub pagination: Option<Pagination>,
}

/// A failed acknowledgement registered by the contract manager.
#[derive(Deserialize, Clone, Debug, Default)]
pub struct Failure {
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub sequence_id: String,
    #[serde(default)]
    pub ack_type: String,
}

#[derive(Deserialize, Clone, Debug, Default)]
pub struct AckFailuresResponse {
    pub failures: Vec<Failure>,
    #[serde(default)]
    pub pagination: Option<Pagination>,
}

#[derive(Deserialize, Clone, Debug, Default)]
pub struct ScheduleMsg {
    #[serde(default)]
    pub contract: String,
    #[serde(default)]
    pub msg: String,
}

/// A cron module schedule.
#[derive(Deserialize, Clone, Debug, Default)]
pub struct Schedule {
    pub name: String,
    #[serde(default)]
    pub period: String,
    #[serde(default)]
    pub msgs: Vec<ScheduleMsg>,
    #[serde(default)]
    pub last_execute_height: String,
}

#[derive(Deserialize, Clone, Debug, Default)]
pub struct ScheduleResponse {
    pub schedules: Vec<Schedule>,
    #[serde(default)]
    pub pagination: Option<Pagination>,
}

#[derive(Deserialize, Clone, Debug, Default)]
pub struct UpgradePlan {
    pub name: String,
    #[serde(default)]
    pub height: String,
    #[serde(default)]
    pub info: String,
}

#[derive(Deserialize, Clone, Debug, Default)]
pub struct CurrentPlanResponse {
    #[serde(default)]
    pub plan: Option<UpgradePlan>,
}

#[derive(Deserialize, Clone, Debug, Default)]
pub struct PinnedCodesResponse {
    pub code_ids: Vec<String>,
    #[serde(default)]
    pub pagination: Option<Pagination>,
}

#[derive(Deserialize, Clone, Debug, Default)]
pub struct IcaHostParams {
    #[serde(default)]
    pub host_enabled: bool,
    #[serde(default)]
    pub allow_messages: Vec<String>,
}

#[derive(Deserialize, Clone, Debug, Default)]
pub struct IcaHostParamsResponse {
    pub params: IcaHostParams,
}

#[derive(Deserialize, Clone, Debug, Default)]
pub(crate) struct AdminsResponse {
    pub admins: Vec<String>,
}

/// Response model for the bank total-supply-by-denom query.
#[derive(Deserialize, Clone, Debug, Default)]
pub struct TotalSupplyByDenomResponse {
    pub amount: Coin,
}

#[derive(Deserialize, Clone, Debug, Default)]
pub struct TotalBurnedNeutrons {
    pub coin: Coin,
}

/// Response model for the feeburner's total-burned-neutrons query.
#[derive(Deserialize, Clone, Debug, Default)]
pub struct TotalBurnedNeutronsAmountResponse {
    pub total_burned_neutrons_amount: TotalBurnedNeutrons,
}

/// Pause status reported by pausable DAO contracts.
#[derive(Deserialize, Clone, Debug, PartialEq, Eq)]
pub enum PauseInfoResponse {
    #[serde(rename = "paused")]
    Paused { until_height: u64 },
    #[serde(rename = "unpaused")]
    Unpaused {},
}

#[derive(Deserialize, Clone, Debug, Default)]
pub struct ContractInfo {
    #[serde(default)]
    pub code_id: String,
    #[serde(default)]
    pub creator: String,
    #[serde(default)]
    pub admin: String,
    #[serde(default)]
    pub label: String,
}

#[derive(Deserialize, Clone, Debug, Default)]
pub struct ContractInfoResponse {
    #[serde(default)]
    pub address: String,
    pub contract_info: ContractInfo,
}

#[derive(Deserialize, Clone, Debug, Default)]
pub struct CodeInfo {
    #[serde(default)]
    pub code_id: String,
    #[serde(default)]
    pub creator: String,
    pub data_hash: String,
}

#[derive(Deserialize, Clone, Debug, Default)]
pub(crate) struct CodeInfoResponse {
    pub code_info: CodeInfo,
}

#[derive(Deserialize, Clone, Debug, Default)]
pub struct Delegation {
    #[serde(default)]
    pub delegator_address: String,
    #[serde(default)]
    pub validator_address: String,
    #[serde(default)]
    pub shares: String,
}

#[derive(Deserialize, Clone, Debug, Default)]
pub struct DelegationResponse {
    pub delegation: Delegation,
    #[serde(default)]
    pub balance: Coin,
}

#[derive(Deserialize, Clone, Debug, Default)]
pub struct DelegationsResponse {
    pub delegation_responses: Vec<DelegationResponse>,
    #[serde(default)]
    pub pagination: Option<Pagination>,
}

#[derive(Deserialize, Clone, Debug, Default)]
pub(crate) struct AccountJson {
    #[serde(rename = "@type", default)]
    pub type_url: String,
    #[serde(default)]
    pub account_number: String,
    #[serde(default)]
    pub sequence: String,
}

#[derive(Deserialize, Clone, Debug, Default)]
pub(crate) struct AccountResponse {
    pub account: AccountJson,
}

/// Signer identity of an on-chain account.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct AccountInfo {
    pub account_number: u64,
    pub sequence: u64,
}

/// One attribute of a transaction event.
#[derive(Serialize, Deserialize, Clone, Debug, Default)]
pub struct TxEventAttribute {
    #[serde(default)]
    pub key: String,
    #[serde(default)]
    pub value: String,
}

/// One event group from a transaction.
#[derive(Serialize, Deserialize, Clone, Debug, Default)]
pub struct TxEvent {
    #[serde(rename = "type", default)]
    pub event_type: String,
    #[serde(default)]
    pub attributes: Vec<TxEventAttribute>,
}

/// A transaction result as the REST API renders it.
#[derive(Deserialize, Clone, Debug, Default)]
pub struct TxResponse {
    #[serde(default)]
    pub height: String,
    #[serde(default)]
    pub txhash: String,
    #[serde(default)]
    pub codespace: String,
    #[serde(default)]
    pub code: u32,
    #[serde(default)]
    pub data: String,
    #[serde(default)]
    pub raw_log: String,
    #[serde(default)]
    pub logs: Vec<serde_json::Value>,
    #[serde(default)]
    pub gas_wanted: String,
    #[serde(default)]
    pub gas_used: String,
    #[serde(default)]
    pub timestamp: String,
    #[serde(default)]
    pub events: Vec<TxEvent>,
}

/// Response model for transaction-by-hash lookups.
#[derive(Deserialize, Clone, Debug, Default)]
pub struct GetTxResponse {
    pub tx_response: TxResponse,
}

#[derive(Deserialize, Clone, Debug, Default)]
pub(crate) struct BroadcastResponse {
    pub tx_response: TxResponse,
}

#[derive(Deserialize, Clone, Debug)]
pub(crate) struct SmartQueryResult {
    pub smart: String,
}

#[derive(Deserialize, Clone, Debug)]
pub(crate) struct SmartQueryResponse {
    pub result: SmartQueryResult,
}

#[derive(Deserialize, Clone, Debug)]
pub(crate) struct ErrorBody {
    pub message: String,
}
