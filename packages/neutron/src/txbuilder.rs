use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use cosmos_sdk_proto::cosmos::base::v1beta1::Coin;
use cosmos_sdk_proto::cosmos::tx::signing::v1beta1::SignMode;
use cosmos_sdk_proto::cosmos::tx::v1beta1::{
    mode_info, AuthInfo, Fee, ModeInfo, SignDoc, SignerInfo, TxBody, TxRaw,
};
use prost::Message;
use prost_types::Any;

use crate::{TxMessage, Wallet};

/// A fee paying a single coin amount for the given gas limit.
pub fn new_fee(gas_limit: u64, amount: u128, denom: impl Into<String>) -> Fee {
    Fee {
        amount: vec![Coin {
            denom: denom.into(),
            amount: amount.to_string(),
        }],
        gas_limit,
        payer: String::new(),
        granter: String::new(),
    }
}

/// Transaction builder
///
/// Collects messages and body options, then signs them into an immutable
/// [SignedTx].
#[derive(Default, Clone, Debug)]
pub struct TxBuilder {
    messages: Vec<TxMessage>,
    memo: Option<String>,
    timeout_height: Option<u64>,
}

impl TxBuilder {
    /// Add a message to this transaction.
    pub fn add_message(&mut self, msg: impl Into<TxMessage>) -> &mut Self {
        self.messages.push(msg.into());
        self
    }

    /// Set the memo field.
    pub fn set_memo(&mut self, memo: impl Into<String>) -> &mut Self {
        self.memo = Some(memo.into());
        self
    }

    /// Reject the transaction if it is not committed by this block height.
    pub fn set_timeout_height(&mut self, timeout_height: u64) -> &mut Self {
        self.timeout_height = Some(timeout_height);
        self
    }

    fn make_tx_body(&self) -> TxBody {
        TxBody {
            messages: self.messages.iter().map(TxMessage::to_any).collect(),
            memo: self.memo.as_deref().unwrap_or_default().to_owned(),
            timeout_height: self.timeout_height.unwrap_or_default(),
            extension_options: vec![],
            non_critical_extension_options: vec![],
        }
    }

    /// Sign the collected messages with a single direct-mode signature.
    pub fn sign(
        &self,
        wallet: &Wallet,
        chain_id: impl Into<String>,
        account_number: u64,
        sequence: u64,
        fee: Fee,
    ) -> SignedTx {
        let body = self.make_tx_body();
        let auth_info = AuthInfo {
            signer_infos: vec![make_signer_info(wallet, sequence)],
            fee: Some(fee),
            tip: None,
        };

        let body_bytes = body.encode_to_vec();
        let auth_info_bytes = auth_info.encode_to_vec();
        let sign_doc = SignDoc {
            body_bytes: body_bytes.clone(),
            auth_info_bytes: auth_info_bytes.clone(),
            chain_id: chain_id.into(),
            account_number,
        };
        let signature = wallet.sign_bytes(&sign_doc.encode_to_vec());

        let tx = TxRaw {
            body_bytes,
            auth_info_bytes,
            signatures: vec![signature.serialize_compact().to_vec()],
        };
        SignedTx {
            tx_bytes: tx.encode_to_vec(),
        }
    }
}

fn make_signer_info(wallet: &Wallet, sequence: u64) -> SignerInfo {
    SignerInfo {
        public_key: Some(Any {
            type_url: "/cosmos.crypto.secp256k1.PubKey".to_owned(),
            value: cosmos_sdk_proto::cosmos::crypto::secp256k1::PubKey {
                key: wallet.public_key_bytes().to_vec(),
            }
            .encode_to_vec(),
        }),
        mode_info: Some(ModeInfo {
            sum: Some(mode_info::Sum::Single(mode_info::Single {
                mode: SignMode::Direct as i32,
            })),
        }),
        sequence,
    }
}

/// A signed transaction artifact. The signature is attached at build time and
/// the bytes never change afterwards.
#[derive(Clone, Debug)]
pub struct SignedTx {
    tx_bytes: Vec<u8>,
}

impl SignedTx {
    pub fn tx_bytes(&self) -> &[u8] {
        &self.tx_bytes
    }

    pub fn to_base64(&self) -> String {
        STANDARD.encode(&self.tx_bytes)
    }
}

#[cfg(test)]
mod tests {
    use cosmos_sdk_proto::cosmos::bank::v1beta1::MsgSend;

    use crate::AddressType;

    use super::*;

    const PHRASE: &str = "clip hire initial neck maid actor venue client foam budget lock catalog sweet steak waste crater broccoli pipe steak sister coyote moment obvious choose";

    #[test]
    fn signed_tx_carries_signer_metadata() {
        let wallet = Wallet::from_phrase(PHRASE, AddressType::Neutron).unwrap();
        let mut builder = TxBuilder::default();
        builder.add_message(MsgSend {
            from_address: wallet.to_string(),
            to_address: wallet.to_string(),
            amount: vec![Coin {
                denom: "untrn".to_owned(),
                amount: "1000".to_owned(),
            }],
        });
        builder.set_timeout_height(1234);
        let signed = builder.sign(&wallet, "test-1", 3, 7, new_fee(200_000, 1_000, "untrn"));

        let raw = TxRaw::decode(signed.tx_bytes()).unwrap();
        assert_eq!(raw.signatures.len(), 1);
        assert_eq!(raw.signatures[0].len(), 64);

        let body = TxBody::decode(raw.body_bytes.as_slice()).unwrap();
        assert_eq!(body.timeout_height, 1234);
        assert_eq!(body.messages.len(), 1);
        assert_eq!(body.messages[0].type_url, "/cosmos.bank.v1beta1.MsgSend");

        let auth_info = AuthInfo::decode(raw.auth_info_bytes.as_slice()).unwrap();
        assert_eq!(auth_info.signer_infos.len(), 1);
        let signer = &auth_info.signer_infos[0];
        assert_eq!(signer.sequence, 7);
        assert_eq!(
            signer.public_key.as_ref().unwrap().type_url,
            "/cosmos.crypto.secp256k1.PubKey"
        );
        assert_eq!(auth_info.fee.as_ref().unwrap().gas_limit, 200_000);
    }

    #[test]
    fn same_inputs_same_bytes() {
        let wallet = Wallet::from_phrase(PHRASE, AddressType::Neutron).unwrap();
        let mut builder = TxBuilder::default();
        builder.add_message(MsgSend {
            from_address: wallet.to_string(),
            to_address: wallet.to_string(),
            amount: vec![],
        });
        let a = builder.sign(&wallet, "test-1", 0, 0, new_fee(100, 1, "untrn"));
        let b = builder.sign(&wallet, "test-1", 0, 0, new_fee(100, 1, "untrn"));
        assert_eq!(a.tx_bytes(), b.tx_bytes());
        assert_eq!(a.to_base64(), b.to_base64());
    }
}
