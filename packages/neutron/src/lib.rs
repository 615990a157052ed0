//! Test-support client for a Neutron chain.
//!
//! Wraps a node's REST and websocket endpoints to build, sign, broadcast, and
//! confirm transactions, query chain and contract state, and pace polling
//! loops on new blocks.

pub use address::{parse_raw_address, Address, AddressType, HasAddress, RawAddress};
pub use broadcast::{BroadcastMode, IbcHeight, WalletClient};
pub use client::{ChainClient, ClientConfig};
pub use contract::{CodeId, Contract, ContractAdmin};
pub use cosmos_sdk_proto as proto;
pub use cosmos_sdk_proto::cosmos::base::v1beta1::Coin;
pub use env::{
    contract_binary, contract_path, COSMOS_DENOM, IBC_ATOM_DENOM, IBC_USDC_DENOM, NEUTRON_DENOM,
};
pub use error::{BroadcastError, QueryError, WaitError};
pub use events::{
    get_event_attribute, get_event_attributes_from_tx, get_packet_sequence, TxResponseExt,
};
pub use ibc::{filter_ibc_denoms, get_ibc_denom};
pub use ica::{get_ica, IcaAddressResponse};
pub use messages::{
    bank_send_msg, wrap_msg, MsgStoreCodeHelper, ParamChangeProposalHelper, TxMessage,
};
pub use txbuilder::{new_fee, SignedTx, TxBuilder};
pub use wait::{get_with_attempts, BlockWaiter, Pacer};
pub use wallet::{SeedPhrase, Wallet};

mod address;
mod broadcast;
mod client;
mod contract;
mod env;
mod error;
mod events;
mod ibc;
mod ica;
mod messages;
mod txbuilder;
pub mod types;
mod wait;
mod wallet;
