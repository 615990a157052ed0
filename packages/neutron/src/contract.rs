use std::fmt::Display;

use anyhow::{Context, Result};
use cosmos_sdk_proto::cosmos::base::v1beta1::Coin;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::types::{ContractInfoResponse, TxResponse};
use crate::{Address, ChainClient, HasAddress, QueryError, WalletClient};

/// A smart contract on a specific chain connection.
#[derive(Clone)]
pub struct Contract {
    address: Address,
    client: ChainClient,
}

impl ChainClient {
    /// Make a new [Contract] for the given smart contract address.
    pub fn make_contract(&self, address: Address) -> Contract {
        Contract {
            address,
            client: self.clone(),
        }
    }

    /// Make a new [CodeId] for the given numeric ID.
    pub fn make_code_id(&self, code_id: u64) -> CodeId {
        CodeId {
            code_id,
            client: self.clone(),
        }
    }
}

impl Contract {
    /// Perform a smart contract query and parse the response as JSON.
    pub async fn query<T: DeserializeOwned>(&self, msg: &impl Serialize) -> Result<T, QueryError> {
        self.client.query_contract(self.address.to_string(), msg).await
    }

    /// Like [Contract::query], but retries once per new block until the
    /// contract answers.
    pub async fn query_with_wait<T: DeserializeOwned>(&self, msg: &impl Serialize) -> Result<T> {
        self.client
            .query_contract_with_wait(self.address.to_string(), msg)
            .await
    }

    /// Execute a message against the smart contract.
    pub async fn execute(
        &self,
        sender: &mut WalletClient,
        msg: &impl Serialize,
        funds: Vec<Coin>,
    ) -> Result<TxResponse> {
        sender.execute_contract(self.address, msg, funds).await
    }

    /// Perform a contract migration with the given message.
    pub async fn migrate(
        &self,
        sender: &mut WalletClient,
        code_id: u64,
        msg: &impl Serialize,
    ) -> Result<TxResponse> {
        sender.migrate_contract(self.address, code_id, msg).await
    }

    /// Get the contract info metadata.
    pub async fn info(&self) -> Result<ContractInfoResponse, QueryError> {
        self.client.query_contract_info(self.address.to_string()).await
    }

    /// Current admin of the contract, empty when there is none.
    pub async fn admin(&self) -> Result<String, QueryError> {
        self.client
            .query_contract_admin(self.address.to_string())
            .await
    }
}

impl Display for Contract {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.address)
    }
}

impl HasAddress for Contract {
    fn get_address(&self) -> Address {
        self.address
    }
}

/// Represents the uploaded code on a specific chain connection.
#[derive(Clone)]
pub struct CodeId {
    code_id: u64,
    client: ChainClient,
}

impl CodeId {
    /// Get the underlying numeric code ID.
    pub fn get_code_id(&self) -> u64 {
        self.code_id
    }

    /// Checksum of the stored code.
    pub async fn data_hash(&self) -> Result<String, QueryError> {
        self.client.query_code_data_hash(self.code_id).await
    }

    /// Instantiate a new contract with the given parameters.
    pub async fn instantiate(
        &self,
        sender: &mut WalletClient,
        msg: &impl Serialize,
        label: impl Into<String>,
        admin: ContractAdmin,
    ) -> Result<Contract> {
        let records = sender
            .instantiate_contract(self.code_id, msg, label, admin)
            .await?;
        let address = records
            .first()
            .and_then(|record| record.get("_contract_address"))
            .context("No instantiated contract address in events")?;
        Ok(self.client.make_contract(address.parse()?))
    }
}

impl Display for CodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.code_id)
    }
}

/// The on-chain admin for a contract set during instantiation
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum ContractAdmin {
    /// No admin set, the contract will never be able to be migrated
    NoAdmin,
    /// Set the admin to the sender of the instantiate message
    Sender,
    /// Set the admin to the given address
    Addr(Address),
}
