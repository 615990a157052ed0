//! Message types packed into transactions, including their type URL strings.

use std::fmt::Display;
use std::io::Write;
use std::path::PathBuf;

use anyhow::Result;
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use cosmos_sdk_proto::cosmos::bank::v1beta1::MsgSend;
use cosmos_sdk_proto::cosmos::base::v1beta1::Coin;
use cosmos_sdk_proto::cosmos::params::v1beta1::{ParamChange, ParameterChangeProposal};
use cosmos_sdk_proto::cosmos::staking::v1beta1::MsgDelegate;
use cosmos_sdk_proto::cosmwasm::wasm::v1::{
    MsgExecuteContract, MsgInstantiateContract, MsgMigrateContract, MsgStoreCode,
};
use flate2::{write::GzEncoder, Compression};
use ibc_proto::ibc::applications::transfer::v1::MsgTransfer;
use neutron_proto::adminmodule::MsgSubmitProposal;
use neutron_proto::interchainqueries::MsgRemoveInterchainQueryRequest;
use neutron_proto::slinky::marketmap::v1::MsgParams;
use prost::Message;
use prost_types::Any;

use crate::{Address, HasAddress};

/// A message to include in a transaction, including the type URL string and a
/// human description for error output.
#[derive(Clone, Debug)]
pub struct TxMessage {
    type_url: String,
    value: Vec<u8>,
    description: String,
}

impl TxMessage {
    pub fn new(type_url: impl Into<String>, value: Vec<u8>, description: impl Into<String>) -> Self {
        TxMessage {
            type_url: type_url.into(),
            value,
            description: description.into(),
        }
    }

    pub fn type_url(&self) -> &str {
        &self.type_url
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub(crate) fn to_any(&self) -> Any {
        Any {
            type_url: self.type_url.clone(),
            value: self.value.clone(),
        }
    }
}

impl Display for TxMessage {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.write_str(&self.description)
    }
}

/// Base64-render a contract message, as submessage payloads expect.
pub fn wrap_msg(msg: &impl serde::Serialize) -> Result<String> {
    Ok(STANDARD.encode(serde_json::to_vec(msg)?))
}

/// A wasm bank-send payload for contracts that forward funds.
pub fn bank_send_msg(to: impl HasAddress, amount: u128, denom: &str) -> serde_json::Value {
    serde_json::json!({
        "bank": {
            "send": {
                "to_address": to.get_address_string(),
                "amount": [{ "denom": denom, "amount": amount.to_string() }],
            }
        }
    })
}

/// A helper for [MsgStoreCode] that provides source path information.
pub struct MsgStoreCodeHelper {
    /// See [MsgStoreCode::sender]
    pub sender: Address,
    /// See [MsgStoreCode::wasm_byte_code]
    pub wasm_byte_code: Vec<u8>,
    /// File path this came from, if known
    pub source: Option<PathBuf>,
}

impl From<MsgStoreCodeHelper> for TxMessage {
    fn from(
        MsgStoreCodeHelper {
            sender,
            wasm_byte_code,
            source,
        }: MsgStoreCodeHelper,
    ) -> Self {
        let mut encoder = GzEncoder::new(Vec::new(), Compression::new(9));
        encoder.write_all(&wasm_byte_code).unwrap();
        let compressed = encoder.finish().unwrap();
        TxMessage::new(
            "/cosmwasm.wasm.v1.MsgStoreCode",
            MsgStoreCode {
                sender: sender.get_address_string(),
                wasm_byte_code: compressed,
                instantiate_permission: None,
            }
            .encode_to_vec(),
            match source {
                Some(path) => format!("Storing WASM code loaded from {}", path.display()),
                None => "Storing WASM code from unknown location".to_owned(),
            },
        )
    }
}

/// An admin-module proposal carrying a single parameter change.
pub struct ParamChangeProposalHelper {
    pub proposer: Address,
    pub subspace: String,
    pub key: String,
    pub value: String,
}

impl From<ParamChangeProposalHelper> for TxMessage {
    fn from(
        ParamChangeProposalHelper {
            proposer,
            subspace,
            key,
            value,
        }: ParamChangeProposalHelper,
    ) -> Self {
        let desc = format!("{proposer} proposing param change {subspace}/{key}");
        let proposal = ParameterChangeProposal {
            title: "mock".to_owned(),
            description: "mock".to_owned(),
            changes: vec![ParamChange {
                subspace,
                key,
                value,
            }],
        };
        let msg = MsgSubmitProposal {
            content: Some(Any {
                type_url: "/cosmos.params.v1beta1.ParameterChangeProposal".to_owned(),
                value: proposal.encode_to_vec(),
            }),
            proposer: proposer.get_address_string(),
        };
        TxMessage::new(
            "/cosmos.adminmodule.adminmodule.MsgSubmitProposal",
            msg.encode_to_vec(),
            desc,
        )
    }
}

impl From<MsgInstantiateContract> for TxMessage {
    fn from(msg: MsgInstantiateContract) -> Self {
        TxMessage::new(
            "/cosmwasm.wasm.v1.MsgInstantiateContract",
            msg.encode_to_vec(),
            format!(
                "{} instantiating code ID {} with label {} and message: {}",
                msg.sender,
                msg.code_id,
                msg.label,
                StringOrBytes(msg.msg)
            ),
        )
    }
}

impl From<MsgMigrateContract> for TxMessage {
    fn from(msg: MsgMigrateContract) -> Self {
        TxMessage::new(
            "/cosmwasm.wasm.v1.MsgMigrateContract",
            msg.encode_to_vec(),
            format!(
                "{} migrating contract {} to code ID {} with message: {}",
                msg.sender,
                msg.contract,
                msg.code_id,
                StringOrBytes(msg.msg)
            ),
        )
    }
}

impl From<MsgExecuteContract> for TxMessage {
    fn from(msg: MsgExecuteContract) -> Self {
        TxMessage::new(
            "/cosmwasm.wasm.v1.MsgExecuteContract",
            msg.encode_to_vec(),
            format!(
                "{} executing contract {} with message: {}",
                msg.sender,
                msg.contract,
                StringOrBytes(msg.msg)
            ),
        )
    }
}

impl From<MsgSend> for TxMessage {
    fn from(msg: MsgSend) -> Self {
        TxMessage::new(
            "/cosmos.bank.v1beta1.MsgSend",
            msg.encode_to_vec(),
            format!(
                "{} sending {} to {}",
                msg.from_address,
                PrettyCoins(msg.amount.as_slice()),
                msg.to_address,
            ),
        )
    }
}

impl From<MsgDelegate> for TxMessage {
    fn from(msg: MsgDelegate) -> Self {
        TxMessage::new(
            "/cosmos.staking.v1beta1.MsgDelegate",
            msg.encode_to_vec(),
            format!(
                "{} delegating to {}",
                msg.delegator_address, msg.validator_address
            ),
        )
    }
}

impl From<MsgTransfer> for TxMessage {
    fn from(msg: MsgTransfer) -> Self {
        TxMessage::new(
            "/ibc.applications.transfer.v1.MsgTransfer",
            msg.encode_to_vec(),
            format!(
                "{} transferring to {} over {}/{}",
                msg.sender, msg.receiver, msg.source_port, msg.source_channel
            ),
        )
    }
}

impl From<MsgRemoveInterchainQueryRequest> for TxMessage {
    fn from(msg: MsgRemoveInterchainQueryRequest) -> Self {
        TxMessage::new(
            "/neutron.interchainqueries.MsgRemoveInterchainQueryRequest",
            msg.encode_to_vec(),
            format!("{} removing interchain query {}", msg.sender, msg.query_id),
        )
    }
}

impl From<MsgParams> for TxMessage {
    fn from(msg: MsgParams) -> Self {
        TxMessage::new(
            "/slinky.marketmap.v1.MsgParams",
            msg.encode_to_vec(),
            format!("{} updating marketmap params", msg.authority),
        )
    }
}

pub(crate) struct StringOrBytes(pub Vec<u8>);

impl Display for StringOrBytes {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match std::str::from_utf8(&self.0) {
            Ok(s) => f.write_str(s),
            Err(_) => write!(f, "{:?}", self.0),
        }
    }
}

struct PrettyCoins<'a>(&'a [Coin]);

impl Display for PrettyCoins<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        for (idx, Coin { denom, amount }) in self.0.iter().enumerate() {
            if idx > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{amount}{denom}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use neutron_proto::slinky::marketmap::v1::Params;

    use crate::{AddressType, Wallet};

    use super::*;

    fn test_address() -> Address {
        "neutron1mjk79fjjgpplak5wq838w0yd982gzkyf8fxu8u"
            .parse()
            .unwrap()
    }

    #[test]
    fn store_code_is_gzipped() {
        let msg: TxMessage = MsgStoreCodeHelper {
            sender: test_address(),
            wasm_byte_code: b"\0asm contract bytes".to_vec(),
            source: None,
        }
        .into();
        assert_eq!(msg.type_url(), "/cosmwasm.wasm.v1.MsgStoreCode");
        let decoded = MsgStoreCode::decode(msg.to_any().value.as_slice()).unwrap();
        // gzip magic
        assert_eq!(&decoded.wasm_byte_code[..2], &[0x1f, 0x8b]);
    }

    #[test]
    fn param_change_proposal_wraps_content() {
        let msg: TxMessage = ParamChangeProposalHelper {
            proposer: test_address(),
            subspace: "tokenfactory".to_owned(),
            key: "DenomCreationFee".to_owned(),
            value: r#"[{"denom":"untrn","amount":"1000"}]"#.to_owned(),
        }
        .into();
        assert_eq!(
            msg.type_url(),
            "/cosmos.adminmodule.adminmodule.MsgSubmitProposal"
        );
        let submit = MsgSubmitProposal::decode(msg.to_any().value.as_slice()).unwrap();
        assert_eq!(submit.proposer, test_address().to_string());
        let content = submit.content.unwrap();
        assert_eq!(
            content.type_url,
            "/cosmos.params.v1beta1.ParameterChangeProposal"
        );
        let proposal = ParameterChangeProposal::decode(content.value.as_slice()).unwrap();
        assert_eq!(proposal.changes.len(), 1);
        assert_eq!(proposal.changes[0].subspace, "tokenfactory");
    }

    #[test]
    fn oracle_params_update_packs() {
        let msg: TxMessage = MsgParams {
            params: Some(Params {
                market_authority: test_address().to_string(),
                version: 2,
            }),
            authority: test_address().to_string(),
        }
        .into();
        assert_eq!(msg.type_url(), "/slinky.marketmap.v1.MsgParams");
        let decoded = MsgParams::decode(msg.to_any().value.as_slice()).unwrap();
        assert_eq!(decoded.params.unwrap().version, 2);
    }

    #[test]
    fn wrapped_msg_is_base64_json() {
        let wallet = Wallet::generate(AddressType::Neutron).unwrap();
        let wrapped = wrap_msg(&bank_send_msg(wallet.address(), 100, "untrn")).unwrap();
        let decoded = STANDARD.decode(wrapped).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&decoded).unwrap();
        assert_eq!(value["bank"]["send"]["amount"][0]["amount"], "100");
    }
}
