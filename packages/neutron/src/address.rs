use std::{
    convert::TryFrom,
    fmt::{Debug, Display},
    str::FromStr,
};

use anyhow::{Context, Result};
use bech32::{FromBase32, ToBase32};
use serde::de::Visitor;

/// A raw address value not tagged with a chain. You usually want [Address].
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash)]
pub enum RawAddress {
    Twenty { raw_address: [u8; 20] },
    ThirtyTwo { raw_address: [u8; 32] },
}

/// Parse a raw address and its HRP from a string.
pub fn parse_raw_address(s: &str) -> Result<(String, RawAddress)> {
    let (hrp, data, variant) = bech32::decode(s).context("Invalid bech32 data")?;
    match variant {
        bech32::Variant::Bech32 => (),
        bech32::Variant::Bech32m => anyhow::bail!("Must use Bech32 variant"),
    }
    let data = Vec::<u8>::from_base32(&data)?;
    let raw_address = data
        .as_slice()
        .try_into()
        .with_context(|| format!("Total bytes found: {}", data.len()))?;
    Ok((hrp, raw_address))
}

/// Note that using this instance throws away the Human Readable Part (HRP) of the address!
impl FromStr for RawAddress {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_raw_address(s).map(|x| x.1)
    }
}

impl AsRef<[u8]> for RawAddress {
    fn as_ref(&self) -> &[u8] {
        match self {
            RawAddress::Twenty { raw_address } => raw_address,
            RawAddress::ThirtyTwo { raw_address } => raw_address,
        }
    }
}

impl From<[u8; 20]> for RawAddress {
    fn from(raw_address: [u8; 20]) -> Self {
        RawAddress::Twenty { raw_address }
    }
}

impl From<[u8; 32]> for RawAddress {
    fn from(raw_address: [u8; 32]) -> Self {
        RawAddress::ThirtyTwo { raw_address }
    }
}

impl TryFrom<&[u8]> for RawAddress {
    type Error = anyhow::Error;

    fn try_from(value: &[u8]) -> Result<Self, Self::Error> {
        match value.try_into().ok() {
            Some(raw_address) => Ok(RawAddress::Twenty { raw_address }),
            None => value
                .try_into()
                .map(|raw_address| RawAddress::ThirtyTwo { raw_address })
                .context("Invalid data size for a RawAddress, need either 20 or 32 bytes"),
        }
    }
}

impl RawAddress {
    pub fn for_chain(self, type_: AddressType) -> Address {
        Address {
            raw_address: self,
            type_,
        }
    }
}

/// An address on one of the chains a test run talks to.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Address {
    raw_address: RawAddress,
    type_: AddressType,
}

impl Address {
    pub fn raw(&self) -> &RawAddress {
        &self.raw_address
    }

    pub fn get_address_type(&self) -> AddressType {
        self.type_
    }
}

/// Which chain an address belongs to.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash)]
pub enum AddressType {
    Neutron,
    Cosmos,
}

impl AddressType {
    pub fn all() -> [AddressType; 2] {
        [AddressType::Neutron, AddressType::Cosmos]
    }

    /// The bech32 prefix for this chain.
    pub fn hrp(self) -> &'static str {
        match self {
            AddressType::Neutron => "neutron",
            AddressType::Cosmos => "cosmos",
        }
    }
}

impl FromStr for AddressType {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "neutron" => Ok(AddressType::Neutron),
            "cosmos" => Ok(AddressType::Cosmos),
            _ => Err(anyhow::anyhow!("Unknown address prefix: {s}")),
        }
    }
}

impl Display for Address {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let s = bech32::encode(
            self.type_.hrp(),
            self.raw_address.as_ref().to_base32(),
            bech32::Variant::Bech32,
        )
        .map_err(|_| std::fmt::Error)?;
        f.write_str(&s)
    }
}

impl Debug for Address {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "\"{self}\"")
    }
}

impl FromStr for Address {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (hrp, raw_address) = parse_raw_address(s)?;
        let type_ = hrp.parse()?;
        Ok(Address { raw_address, type_ })
    }
}

impl serde::Serialize for Address {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> serde::Deserialize<'de> for Address {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        deserializer.deserialize_str(AddressVisitor)
    }
}

struct AddressVisitor;

impl<'de> Visitor<'de> for AddressVisitor {
    type Value = Address;

    fn expecting(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
        formatter.write_str("Cosmos address")
    }

    fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
    where
        E: serde::de::Error,
    {
        v.parse().map_err(|e| E::custom(e))
    }
}

/// Trait for any type which contains an address.
pub trait HasAddress {
    fn get_address(&self) -> Address;

    fn get_address_string(&self) -> String {
        self.get_address().to_string()
    }
}

impl HasAddress for Address {
    fn get_address(&self) -> Address {
        *self
    }
}

impl<T: HasAddress> HasAddress for &T {
    fn get_address(&self) -> Address {
        HasAddress::get_address(*self)
    }
}

#[cfg(test)]
mod tests {
    use quickcheck::Arbitrary;

    use super::*;

    impl Arbitrary for AddressType {
        fn arbitrary(g: &mut quickcheck::Gen) -> Self {
            *g.choose(&AddressType::all()).unwrap()
        }
    }

    impl Arbitrary for RawAddress {
        fn arbitrary(g: &mut quickcheck::Gen) -> Self {
            if bool::arbitrary(g) {
                let mut raw_address = [0; 20];
                for byte in &mut raw_address {
                    *byte = u8::arbitrary(g);
                }
                RawAddress::Twenty { raw_address }
            } else {
                let mut raw_address = [0; 32];
                for byte in &mut raw_address {
                    *byte = u8::arbitrary(g);
                }
                RawAddress::ThirtyTwo { raw_address }
            }
        }
    }

    quickcheck::quickcheck! {
        fn roundtrip_address(address_type: AddressType, raw_address: RawAddress) -> bool {
            let address1 = raw_address.for_chain(address_type);
            let s1 = address1.to_string();
            let address2: Address = s1.parse().unwrap();
            let s2 = address2.to_string();
            assert_eq!(s1, s2);
            assert_eq!(address1, address2);
            true
        }
    }

    #[test]
    fn spot_roundtrip_neutron() {
        const S: &str = "neutron1mjk79fjjgpplak5wq838w0yd982gzkyf8fxu8u";
        let address: Address = S.parse().unwrap();
        assert_eq!(S, &address.to_string());
        assert_eq!(address.get_address_type(), AddressType::Neutron);
    }

    #[test]
    fn rejects_unknown_prefix() {
        const S: &str = "juno168gdk6r58jdwfv49kuesq2rs747jawnnt2584c";
        assert!(S.parse::<Address>().is_err());
    }
}
