use std::fmt::Display;
use std::str::FromStr;

use anyhow::{Context, Result};
use bitcoin::hashes::{ripemd160, sha256, Hash};
use bitcoin::secp256k1::ecdsa::Signature;
use bitcoin::secp256k1::{All, Message, Secp256k1};
use bitcoin::util::bip32::{DerivationPath, ExtendedPrivKey, ExtendedPubKey};
use hkd32::mnemonic::Phrase;
use once_cell::sync::{Lazy, OnceCell};
use rand::Rng;

use crate::address::RawAddress;
use crate::{Address, AddressType, HasAddress};

/// A seed phrase for a wallet
#[derive(Clone)]
pub struct SeedPhrase {
    mnemonic: bip39::Mnemonic,
}

impl SeedPhrase {
    fn random() -> SeedPhrase {
        let mut rng = rand::thread_rng();
        let mut entropy: [u8; 32] = [0; 32];
        for b in &mut entropy {
            *b = rng.gen();
        }
        SeedPhrase {
            mnemonic: bip39::Mnemonic::from_entropy(&entropy).unwrap(),
        }
    }
}

impl From<bip39::Mnemonic> for SeedPhrase {
    fn from(mnemonic: bip39::Mnemonic) -> Self {
        SeedPhrase { mnemonic }
    }
}

impl FromStr for SeedPhrase {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mnemonic = s
            .parse()
            .ok()
            .context("Unable to parse mnemonic from phrase")?;
        Ok(SeedPhrase { mnemonic })
    }
}

/// Standard Cosmos derivation path, used when the phrase does not carry its own.
fn default_derivation_path() -> &'static DerivationPath {
    static PATH: Lazy<DerivationPath> = Lazy::new(|| {
        "m/44'/118'/0'/0/0"
            .parse()
            .expect("Invalid default derivation path")
    });
    &PATH
}

fn global_secp() -> &'static Secp256k1<All> {
    static CELL: OnceCell<Secp256k1<All>> = OnceCell::new();
    CELL.get_or_init(Secp256k1::new)
}

/// A wallet capable of signing on a specific blockchain
#[derive(Clone)]
// Not deriving Copy since this is a pretty large data structure.
pub struct Wallet {
    address: Address,
    privkey: ExtendedPrivKey,
    public_key_bytes: [u8; 33],
}

impl Wallet {
    /// Derive a wallet from a seed phrase.
    ///
    /// The phrase may carry a derivation path prefix ("m/44'/..."), otherwise
    /// the standard Cosmos path is used.
    pub fn from_phrase(phrase: &str, type_: AddressType) -> Result<Wallet> {
        let (derivation_path, phrase) = if phrase.starts_with("m/44") {
            match phrase.split_once(' ') {
                Some((path, phrase)) => (Some(path.parse()?), phrase),
                None => (None, phrase),
            }
        } else {
            (None, phrase)
        };
        Wallet::from_seed_phrase(&SeedPhrase::from_str(phrase)?, derivation_path, type_)
    }

    fn from_seed_phrase(
        seed_phrase: &SeedPhrase,
        derivation_path: Option<DerivationPath>,
        type_: AddressType,
    ) -> Result<Wallet> {
        let secp = global_secp();
        let derivation_path =
            derivation_path.unwrap_or_else(|| default_derivation_path().clone());

        let root_private_key = ExtendedPrivKey::new_master(
            bitcoin::Network::Bitcoin,
            &seed_phrase.mnemonic.to_seed(""),
        )?;
        let privkey = root_private_key.derive_priv(secp, &derivation_path)?;
        let public_key = ExtendedPubKey::from_priv(secp, &privkey);

        let public_key_bytes = public_key.public_key.serialize();
        let raw_address = address_from_public_key(&public_key_bytes);
        let address = RawAddress::from(raw_address).for_chain(type_);

        Ok(Wallet {
            address,
            privkey,
            public_key_bytes,
        })
    }

    pub fn address(&self) -> &Address {
        &self.address
    }

    /// Generate a random mnemonic phrase
    pub fn generate_phrase() -> String {
        let mut rng = rand::thread_rng();
        Phrase::random(&mut rng, Default::default())
            .phrase()
            .to_owned()
    }

    /// Generate a random wallet
    pub fn generate(type_: AddressType) -> Result<Self> {
        Wallet::from_seed_phrase(&SeedPhrase::random(), None, type_)
    }

    pub fn public_key_bytes(&self) -> &[u8] {
        &self.public_key_bytes
    }

    /// Hash and sign arbitrary bytes with this wallet's key.
    pub fn sign_bytes(&self, msg: &[u8]) -> Signature {
        let msg = sha256::Hash::hash(msg);
        let msg = Message::from_slice(msg.as_ref()).unwrap();
        global_secp().sign_ecdsa(&msg, &self.privkey.private_key)
    }
}

fn address_from_public_key(public_key: &[u8]) -> [u8; 20] {
    let sha = sha256::Hash::hash(public_key);
    ripemd160::Hash::hash(sha.as_ref()).into_inner()
}

impl Display for Wallet {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.address)
    }
}

impl HasAddress for Wallet {
    fn get_address(&self) -> Address {
        self.address
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PHRASE: &str = "clip hire initial neck maid actor venue client foam budget lock catalog sweet steak waste crater broccoli pipe steak sister coyote moment obvious choose";

    #[test]
    fn derivation_is_deterministic() {
        let wallet1 = Wallet::from_phrase(PHRASE, AddressType::Neutron).unwrap();
        let wallet2 = Wallet::from_phrase(PHRASE, AddressType::Neutron).unwrap();
        assert_eq!(wallet1.address(), wallet2.address());
        assert_eq!(wallet1.public_key_bytes(), wallet2.public_key_bytes());
        assert!(wallet1.to_string().starts_with("neutron1"));
    }

    #[test]
    fn different_phrases_differ() {
        let wallet1 = Wallet::generate(AddressType::Neutron).unwrap();
        let wallet2 = Wallet::generate(AddressType::Neutron).unwrap();
        assert_ne!(wallet1.address(), wallet2.address());
    }

    #[test]
    fn generated_phrase_parses() {
        let phrase = Wallet::generate_phrase();
        Wallet::from_phrase(&phrase, AddressType::Cosmos).unwrap();
    }

    #[test]
    fn signature_is_compact() {
        let wallet = Wallet::from_phrase(PHRASE, AddressType::Neutron).unwrap();
        let sig = wallet.sign_bytes(b"payload");
        assert_eq!(sig.serialize_compact().len(), 64);
    }
}
