//! Signing, broadcasting, and confirming transactions for one wallet.

use std::collections::BTreeMap;

use anyhow::{Context, Result};
use cosmos_sdk_proto::cosmos::bank::v1beta1::MsgSend;
use cosmos_sdk_proto::cosmos::base::v1beta1::Coin;
use cosmos_sdk_proto::cosmos::staking::v1beta1::MsgDelegate;
use cosmos_sdk_proto::cosmos::tx::v1beta1::Fee;
use cosmos_sdk_proto::cosmwasm::wasm::v1::{
    MsgExecuteContract, MsgInstantiateContract, MsgMigrateContract,
};
use ibc_proto::ibc::applications::transfer::v1::MsgTransfer;
use neutron_proto::interchainqueries::MsgRemoveInterchainQueryRequest;
use serde::Serialize;

use crate::contract::ContractAdmin;
use crate::env;
use crate::error::BroadcastError;
use crate::events::get_event_attributes_from_tx;
use crate::messages::{MsgStoreCodeHelper, ParamChangeProposalHelper};
use crate::txbuilder::{new_fee, SignedTx, TxBuilder};
use crate::types::{BalancesResponse, TxResponse};
use crate::{ChainClient, HasAddress, QueryError, TxMessage, Wallet};

/// Timeout height for IBC transfers.
pub type IbcHeight = ibc_proto::ibc::core::client::v1::Height;

/// How long a broadcast call blocks before answering.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum BroadcastMode {
    /// Return after the mempool check.
    #[default]
    Sync,
    /// Fire and forget.
    Async,
    /// Wait for the transaction to land in a block.
    Block,
}

impl BroadcastMode {
    pub fn as_str(self) -> &'static str {
        match self {
            BroadcastMode::Sync => "BROADCAST_MODE_SYNC",
            BroadcastMode::Async => "BROADCAST_MODE_ASYNC",
            BroadcastMode::Block => "BROADCAST_MODE_BLOCK",
        }
    }
}

/// A [Wallet] paired with a [ChainClient] and the signer bookkeeping for it.
///
/// The sequence counter is optimistic: it advances by one on every accepted
/// broadcast, before the transaction is confirmed, and is never re-read from
/// the chain unless [WalletClient::refresh_sequence] is called. Broadcasting
/// takes `&mut self`; callers sending concurrently from one wallet must
/// serialize those sends themselves.
pub struct WalletClient {
    chain: ChainClient,
    wallet: Wallet,
    account_number: u64,
    sequence: u64,
}

impl WalletClient {
    /// Pair a wallet with a chain, reading account number and sequence from
    /// the chain.
    pub async fn connect(chain: ChainClient, wallet: Wallet) -> Result<Self> {
        let account = chain
            .query_account(wallet.get_address_string())
            .await
            .with_context(|| format!("Could not look up account for {wallet}"))?;
        Ok(WalletClient {
            chain,
            wallet,
            account_number: account.account_number,
            sequence: account.sequence,
        })
    }

    /// Pair a wallet with a chain using known signer numbers, skipping the
    /// account lookup.
    pub fn with_account(
        chain: ChainClient,
        wallet: Wallet,
        account_number: u64,
        sequence: u64,
    ) -> Self {
        WalletClient {
            chain,
            wallet,
            account_number,
            sequence,
        }
    }

    pub fn chain(&self) -> &ChainClient {
        &self.chain
    }

    pub fn wallet(&self) -> &Wallet {
        &self.wallet
    }

    pub fn account_number(&self) -> u64 {
        self.account_number
    }

    pub fn sequence(&self) -> u64 {
        self.sequence
    }

    /// Re-read the sequence from the chain, reconciling after a failed send.
    pub async fn refresh_sequence(&mut self) -> Result<()> {
        self.sequence = self
            .chain
            .query_sequence(self.wallet.get_address_string())
            .await?;
        Ok(())
    }

    pub async fn query_balances(&self) -> Result<BalancesResponse, QueryError> {
        self.chain
            .query_balances(self.wallet.get_address_string())
            .await
    }

    pub async fn query_denom_balance(&self, denom: &str) -> Result<u128, QueryError> {
        self.chain
            .query_denom_balance(self.wallet.get_address_string(), denom)
            .await
    }

    /// Sign the messages against the wallet's current signer numbers.
    pub fn build_tx(
        &self,
        fee: Fee,
        messages: Vec<TxMessage>,
        sequence: Option<u64>,
        timeout_height: Option<u64>,
    ) -> SignedTx {
        let mut builder = TxBuilder::default();
        for msg in messages {
            builder.add_message(msg);
        }
        if let Some(timeout_height) = timeout_height {
            builder.set_timeout_height(timeout_height);
        }
        builder.sign(
            &self.wallet,
            self.chain.chain_id(),
            self.account_number,
            sequence.unwrap_or(self.sequence),
            fee,
        )
    }

    /// Submit a signed transaction and check the immediate response code.
    ///
    /// An accepted broadcast advances the local sequence; a rejected one
    /// surfaces as [BroadcastError] and leaves the sequence untouched.
    pub async fn broadcast_tx(&mut self, signed: &SignedTx, mode: BroadcastMode) -> Result<String> {
        let res = self.chain.broadcast(signed, mode).await?;
        Ok(self.accept_broadcast(res)?)
    }

    fn accept_broadcast(&mut self, res: TxResponse) -> Result<String, BroadcastError> {
        if res.code != 0 {
            return Err(BroadcastError {
                code: res.code,
                raw_log: res.raw_log,
            });
        }
        log::debug!(
            "Broadcast accepted: {}, sequence {} -> {}",
            res.txhash,
            self.sequence,
            self.sequence + 1
        );
        self.sequence += 1;
        Ok(res.txhash)
    }

    /// Broadcast messages and poll for the transaction result.
    pub async fn exec_tx(&mut self, fee: Fee, messages: Vec<TxMessage>) -> Result<TxResponse> {
        self.exec_tx_with(fee, messages, BroadcastMode::Sync, None, None)
            .await
    }

    /// Broadcast messages and poll for the transaction result, with explicit
    /// broadcast mode, sequence, and timeout height.
    ///
    /// The confirmation loop waits one block, then queries the transaction by
    /// hash, up to the configured attempt budget. The returned response is
    /// whatever landed on chain; callers inspect its code.
    pub async fn exec_tx_with(
        &mut self,
        fee: Fee,
        messages: Vec<TxMessage>,
        mode: BroadcastMode,
        sequence: Option<u64>,
        timeout_height: Option<u64>,
    ) -> Result<TxResponse> {
        let signed = self.build_tx(fee, messages, sequence, timeout_height);
        let txhash = self.broadcast_tx(&signed, mode).await?;
        self.wait_for_tx(&txhash).await
    }

    async fn wait_for_tx(&self, txhash: &str) -> Result<TxResponse> {
        let num_attempts = self.chain.config().tx_confirm_attempts;
        let mut last_error = None;
        for attempt in 1..=num_attempts {
            self.chain.block_waiter().wait_blocks(1).await?;
            match self.chain.get_tx(txhash).await {
                Ok(found) => {
                    log::debug!(
                        "Transaction {txhash} found with code {}",
                        found.tx_response.code
                    );
                    return Ok(found.tx_response);
                }
                Err(err) => {
                    log::debug!("Transaction {txhash} not ready, attempt {attempt}/{num_attempts}");
                    last_error = Some(err);
                }
            }
        }
        Err(match last_error {
            Some(err) => anyhow::Error::from(err),
            None => anyhow::anyhow!("Failed to confirm transaction {txhash}"),
        })
    }

    /// Send coins from this wallet, fire-and-forget.
    pub async fn send_tokens(&mut self, to: impl HasAddress, amount: u128) -> Result<TxResponse> {
        let denom = self.chain.denom().to_owned();
        let fee = new_fee(200_000, 1_000, &denom);
        self.send_tokens_with(to, amount, denom, fee, BroadcastMode::Async, None)
            .await
    }

    pub async fn send_tokens_with(
        &mut self,
        to: impl HasAddress,
        amount: u128,
        denom: impl Into<String>,
        fee: Fee,
        mode: BroadcastMode,
        sequence: Option<u64>,
    ) -> Result<TxResponse> {
        let msg = MsgSend {
            from_address: self.wallet.get_address_string(),
            to_address: to.get_address_string(),
            amount: vec![Coin {
                denom: denom.into(),
                amount: amount.to_string(),
            }],
        };
        self.exec_tx_with(fee, vec![msg.into()], mode, sequence, None)
            .await
    }

    /// Upload a contract artifact by file name and return its code ID.
    pub async fn store_wasm(&mut self, file_name: &str) -> Result<u64> {
        let wasm_byte_code = env::contract_binary(file_name)?;
        let msg = MsgStoreCodeHelper {
            sender: self.wallet.get_address(),
            wasm_byte_code,
            source: Some(env::contract_path(file_name)),
        };
        let fee = new_fee(60_000_000, 250_000, self.chain.denom());
        let res = self.exec_tx(fee, vec![msg.into()]).await?;
        if res.code != 0 {
            anyhow::bail!("Upload failed with code {}. Raw log: {}", res.code, res.raw_log);
        }
        let attributes = get_event_attributes_from_tx(&res, "store_code", &["code_id"])?;
        let code_id = attributes
            .first()
            .and_then(|record| record.get("code_id"))
            .context("No code_id attribute in store_code event")?;
        code_id
            .parse()
            .with_context(|| format!("Invalid code ID: {code_id}"))
    }

    /// Instantiate a contract and return the attribute records of every
    /// instantiation in the transaction.
    pub async fn instantiate_contract(
        &mut self,
        code_id: u64,
        msg: &impl Serialize,
        label: impl Into<String>,
        admin: ContractAdmin,
    ) -> Result<Vec<BTreeMap<String, String>>> {
        self.instantiate_contract_rendered(code_id, serde_json::to_string(msg)?, label, admin)
            .await
    }

    /// Same as [WalletClient::instantiate_contract] but the message is
    /// already rendered to text.
    pub async fn instantiate_contract_rendered(
        &mut self,
        code_id: u64,
        msg: impl Into<String>,
        label: impl Into<String>,
        admin: ContractAdmin,
    ) -> Result<Vec<BTreeMap<String, String>>> {
        let msg = MsgInstantiateContract {
            sender: self.wallet.get_address_string(),
            admin: match admin {
                ContractAdmin::NoAdmin => String::new(),
                ContractAdmin::Sender => self.wallet.get_address_string(),
                ContractAdmin::Addr(addr) => addr.get_address_string(),
            },
            code_id,
            label: label.into(),
            msg: msg.into().into_bytes(),
            funds: vec![],
        };
        let fee = new_fee(600_000_000, 2_000_000, self.chain.denom());
        let res = self
            .exec_tx_with(fee, vec![msg.into()], BroadcastMode::Async, None, None)
            .await?;
        if res.code != 0 {
            anyhow::bail!(
                "Instantiate failed with code {}. Raw log: {}",
                res.code,
                res.raw_log
            );
        }
        get_event_attributes_from_tx(&res, "instantiate", &["_contract_address", "code_id"])
    }

    /// Migrate a contract to a new code ID.
    pub async fn migrate_contract(
        &mut self,
        contract: impl HasAddress,
        code_id: u64,
        msg: &impl Serialize,
    ) -> Result<TxResponse> {
        let msg = MsgMigrateContract {
            sender: self.wallet.get_address_string(),
            contract: contract.get_address_string(),
            code_id,
            msg: serde_json::to_vec(msg)?,
        };
        let fee = new_fee(5_000_000, 20_000, self.chain.denom());
        let res = self.exec_tx(fee, vec![msg.into()]).await?;
        if res.code != 0 {
            anyhow::bail!("{}\nFailed tx hash: {}", res.raw_log, res.txhash);
        }
        Ok(res)
    }

    /// Execute a contract with the default fee.
    pub async fn execute_contract(
        &mut self,
        contract: impl HasAddress,
        msg: &impl Serialize,
        funds: Vec<Coin>,
    ) -> Result<TxResponse> {
        let fee = new_fee(4_000_000, 10_000, self.chain.denom());
        self.execute_contract_with_fee(contract, msg, funds, fee)
            .await
    }

    pub async fn execute_contract_with_fee(
        &mut self,
        contract: impl HasAddress,
        msg: &impl Serialize,
        funds: Vec<Coin>,
        fee: Fee,
    ) -> Result<TxResponse> {
        let msg = MsgExecuteContract {
            sender: self.wallet.get_address_string(),
            contract: contract.get_address_string(),
            msg: serde_json::to_vec(msg)?,
            funds,
        };
        let res = self.exec_tx(fee, vec![msg.into()]).await?;
        if res.code != 0 {
            anyhow::bail!("{}\nFailed tx hash: {}", res.raw_log, res.txhash);
        }
        Ok(res)
    }

    /// Submit a parameter change through the admin module.
    pub async fn submit_param_change_proposal(
        &mut self,
        subspace: impl Into<String>,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> Result<TxResponse> {
        let msg = ParamChangeProposalHelper {
            proposer: self.wallet.get_address(),
            subspace: subspace.into(),
            key: key.into(),
            value: value.into(),
        };
        let fee = new_fee(200_000, 1_000, self.chain.denom());
        self.exec_tx_with(fee, vec![msg.into()], BroadcastMode::Async, None, None)
            .await
    }

    /// Remove an interchain query owned by this wallet.
    pub async fn remove_interchain_query(&mut self, query_id: u64) -> Result<TxResponse> {
        let msg = MsgRemoveInterchainQueryRequest {
            query_id,
            sender: self.wallet.get_address_string(),
        };
        let fee = new_fee(200_000, 1_000, self.chain.denom());
        self.exec_tx(fee, vec![msg.into()]).await
    }

    /// Transfer a token over IBC.
    pub async fn ibc_transfer(
        &mut self,
        source_port: impl Into<String>,
        source_channel: impl Into<String>,
        token: crate::types::Coin,
        receiver: impl Into<String>,
        timeout_height: IbcHeight,
        memo: Option<String>,
    ) -> Result<TxResponse> {
        let msg = MsgTransfer {
            source_port: source_port.into(),
            source_channel: source_channel.into(),
            token: Some(ibc_proto::cosmos::base::v1beta1::Coin {
                denom: token.denom,
                amount: token.amount,
            }),
            sender: self.wallet.get_address_string(),
            receiver: receiver.into(),
            timeout_height: Some(timeout_height),
            timeout_timestamp: 0,
            memo: memo.unwrap_or_default(),
        };
        let fee = new_fee(200_000, 1_000, self.chain.denom());
        self.exec_tx(fee, vec![msg.into()]).await
    }

    /// Delegate the chain's fee denom to a validator.
    pub async fn delegate(
        &mut self,
        validator: impl Into<String>,
        amount: u128,
    ) -> Result<TxResponse> {
        let msg = MsgDelegate {
            delegator_address: self.wallet.get_address_string(),
            validator_address: validator.into(),
            amount: Some(Coin {
                denom: self.chain.denom().to_owned(),
                amount: amount.to_string(),
            }),
        };
        let fee = new_fee(200_000, 1_000, self.chain.denom());
        self.exec_tx(fee, vec![msg.into()]).await
    }

    /// Burn fees by sending one token to ourselves with an inflated fee.
    pub async fn simulate_fee_burning(&mut self, amount: u128) -> Result<TxResponse> {
        let denom = self.chain.denom().to_owned();
        let msg = MsgSend {
            from_address: self.wallet.get_address_string(),
            to_address: self.wallet.get_address_string(),
            amount: vec![Coin {
                denom: denom.clone(),
                amount: "1".to_owned(),
            }],
        };
        // 75% of fees get burned
        let fee = new_fee(200_000, (1_000 * amount + 749) / 750, denom);
        self.exec_tx(fee, vec![msg.into()]).await
    }
}

#[cfg(test)]
mod tests {
    use crate::{AddressType, BlockWaiter, ClientConfig};

    use super::*;

    const PHRASE: &str = "clip hire initial neck maid actor venue client foam budget lock catalog sweet steak waste crater broccoli pipe steak sister coyote moment obvious choose";

    fn test_wallet_client() -> WalletClient {
        let chain = ChainClient::new_with_config(
            "http://localhost:1317",
            "test-1",
            BlockWaiter::new("ws://localhost:26657/websocket"),
            "untrn",
            ClientConfig::default(),
        )
        .unwrap();
        let wallet = Wallet::from_phrase(PHRASE, AddressType::Neutron).unwrap();
        WalletClient::with_account(chain, wallet, 4, 11)
    }

    #[test]
    fn accepted_broadcast_advances_sequence() {
        let mut client = test_wallet_client();
        let txhash = client
            .accept_broadcast(TxResponse {
                code: 0,
                txhash: "CAFEBABE".to_owned(),
                ..TxResponse::default()
            })
            .unwrap();
        assert_eq!(txhash, "CAFEBABE");
        assert_eq!(client.sequence(), 12);

        // a second accepted broadcast advances again
        client
            .accept_broadcast(TxResponse {
                code: 0,
                ..TxResponse::default()
            })
            .unwrap();
        assert_eq!(client.sequence(), 13);
    }

    #[test]
    fn rejected_broadcast_keeps_sequence() {
        let mut client = test_wallet_client();
        let err = client
            .accept_broadcast(TxResponse {
                code: 5,
                raw_log: "insufficient funds".to_owned(),
                ..TxResponse::default()
            })
            .unwrap_err();
        assert_eq!(err.code, 5);
        assert!(err.to_string().contains("insufficient funds"));
        assert_eq!(client.sequence(), 11);
    }

    #[test]
    fn explicit_sequence_overrides_counter() {
        use cosmos_sdk_proto::cosmos::tx::v1beta1::{AuthInfo, TxRaw};
        use prost::Message;

        let client = test_wallet_client();
        let msg = MsgSend {
            from_address: client.wallet().to_string(),
            to_address: client.wallet().to_string(),
            amount: vec![],
        };
        let fee = new_fee(200_000, 1_000, "untrn");
        let signed = client.build_tx(fee, vec![msg.into()], Some(42), None);

        let raw = TxRaw::decode(signed.tx_bytes()).unwrap();
        let auth_info = AuthInfo::decode(raw.auth_info_bytes.as_slice()).unwrap();
        assert_eq!(auth_info.signer_infos[0].sequence, 42);
    }
}
