//! IBC denom helpers.

use sha2::{Digest, Sha256};

use crate::env::{IBC_ATOM_DENOM, IBC_USDC_DENOM};
use crate::types::Coin;

/// The `ibc/...` denom a token gets after transfer over the given port and
/// channel.
pub fn get_ibc_denom(port: &str, channel: &str, denom: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(format!("{port}/{channel}/{denom}"));
    format!("ibc/{}", hex::encode_upper(hasher.finalize()))
}

/// Drop the configured IBC test denoms from a coin list.
pub fn filter_ibc_denoms(coins: Vec<Coin>) -> Vec<Coin> {
    coins
        .into_iter()
        .filter(|coin| {
            coin.denom != IBC_ATOM_DENOM.as_str() && coin.denom != IBC_USDC_DENOM.as_str()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ibc_denom_matches_known_hash() {
        assert_eq!(
            get_ibc_denom("transfer", "channel-0", "uatom"),
            "ibc/27394FB092D2ECCD56123C74F36E4C1F926001CEADA9CA97EA622B25F41E5EB2"
        );
    }

    #[test]
    fn ibc_test_denoms_are_filtered() {
        let coins = vec![
            Coin {
                denom: "untrn".to_owned(),
                amount: "100".to_owned(),
            },
            Coin {
                denom: "uibcatom".to_owned(),
                amount: "5".to_owned(),
            },
            Coin {
                denom: "uibcusdc".to_owned(),
                amount: "7".to_owned(),
            },
        ];
        let filtered = filter_ibc_denoms(coins);
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].denom, "untrn");
    }
}
