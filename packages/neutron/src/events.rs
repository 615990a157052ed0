//! Extraction helpers for transaction event logs.

use std::collections::BTreeMap;

use anyhow::{Context, Result};
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::types::{TxEvent, TxResponse};

#[derive(Deserialize)]
struct RawLogEntry {
    #[serde(default)]
    events: Vec<TxEvent>,
}

fn parse_raw_log(raw_log: &str) -> Result<Vec<RawLogEntry>> {
    serde_json::from_str(raw_log)
        .with_context(|| format!("Raw log is not a JSON event log: {raw_log}"))
}

/// Collect attribute records for every occurrence of an event type.
///
/// Attributes are grouped into one record per complete set of requested keys;
/// a repeated event (e.g. several instantiations in one transaction) yields
/// one record per repetition.
pub fn get_event_attributes_from_tx(
    tx: &TxResponse,
    event_type: &str,
    keys: &[&str],
) -> Result<Vec<BTreeMap<String, String>>> {
    let entries = parse_raw_log(&tx.raw_log)?;
    let events = entries
        .first()
        .map(|entry| entry.events.as_slice())
        .unwrap_or_default();
    let mut records = Vec::new();
    for event in events.iter().filter(|e| e.event_type == event_type) {
        let mut record = BTreeMap::new();
        for attr in &event.attributes {
            if keys.contains(&attr.key.as_str()) {
                record.insert(attr.key.clone(), attr.value.clone());
            }
            if record.len() == keys.len() {
                records.push(std::mem::take(&mut record));
            }
        }
    }
    Ok(records)
}

/// Look up a single attribute in the typed event list of a transaction
/// result, where keys and values arrive base64-encoded.
pub fn get_event_attribute(events: &[TxEvent], event_type: &str, attribute: &str) -> Result<String> {
    let encoded_key = STANDARD.encode(attribute);
    let value = events
        .iter()
        .filter(|event| event.event_type == event_type)
        .flat_map(|event| &event.attributes)
        .find(|attr| attr.key == encoded_key)
        .map(|attr| attr.value.clone())
        .with_context(|| format!("Attribute {attribute} not found"))?;
    let decoded = STANDARD
        .decode(&value)
        .with_context(|| format!("Attribute {attribute} is not base64: {value}"))?;
    String::from_utf8(decoded).with_context(|| format!("Attribute {attribute} is not UTF-8"))
}

/// The IBC packet sequence recorded by a `send_packet` event.
pub fn get_packet_sequence(raw_log: &str) -> Result<u64> {
    let entries = parse_raw_log(raw_log)?;
    let events = entries
        .first()
        .map(|entry| entry.events.as_slice())
        .unwrap_or_default();
    let sequence = events
        .iter()
        .find(|event| event.event_type == "send_packet")
        .and_then(|event| {
            event
                .attributes
                .iter()
                .find(|attr| attr.key == "packet_sequence")
        })
        .context("No send_packet.packet_sequence attribute in raw log")?;
    sequence
        .value
        .parse()
        .with_context(|| format!("Invalid packet sequence: {}", sequence.value))
}

pub trait TxResponseExt {
    /// Parse the timestamp of this transaction.
    fn parse_timestamp(&self) -> Result<DateTime<Utc>>;

    /// Return the addresses of all instantiated contracts in this transaction.
    fn parse_instantiated_contracts(&self) -> Result<Vec<String>>;
}

impl TxResponseExt for TxResponse {
    fn parse_timestamp(&self) -> Result<DateTime<Utc>> {
        self.timestamp.parse().with_context(|| {
            format!("Could not parse timestamp from tx response: {}", self.timestamp)
        })
    }

    fn parse_instantiated_contracts(&self) -> Result<Vec<String>> {
        let records = get_event_attributes_from_tx(self, "instantiate", &["_contract_address"])?;
        Ok(records
            .into_iter()
            .filter_map(|mut record| record.remove("_contract_address"))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tx_with_raw_log(raw_log: &str) -> TxResponse {
        TxResponse {
            raw_log: raw_log.to_owned(),
            ..TxResponse::default()
        }
    }

    const TWO_INSTANTIATES: &str = r#"[{"events":[{"type":"instantiate","attributes":[{"key":"_contract_address","value":"neutron1first"},{"key":"code_id","value":"7"},{"key":"_contract_address","value":"neutron1second"},{"key":"code_id","value":"8"}]}]}]"#;

    #[test]
    fn repeated_events_give_separate_records() {
        let tx = tx_with_raw_log(TWO_INSTANTIATES);
        let records =
            get_event_attributes_from_tx(&tx, "instantiate", &["_contract_address", "code_id"])
                .unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0]["_contract_address"], "neutron1first");
        assert_eq!(records[0]["code_id"], "7");
        assert_eq!(records[1]["_contract_address"], "neutron1second");
        assert_eq!(records[1]["code_id"], "8");
    }

    #[test]
    fn incomplete_record_is_dropped() {
        let raw_log = r#"[{"events":[{"type":"instantiate","attributes":[{"key":"_contract_address","value":"neutron1first"},{"key":"code_id","value":"7"},{"key":"_contract_address","value":"neutron1second"}]}]}]"#;
        let tx = tx_with_raw_log(raw_log);
        let records =
            get_event_attributes_from_tx(&tx, "instantiate", &["_contract_address", "code_id"])
                .unwrap();
        assert_eq!(records.len(), 1);
    }

    #[test]
    fn missing_event_type_gives_no_records() {
        let tx = tx_with_raw_log(TWO_INSTANTIATES);
        let records = get_event_attributes_from_tx(&tx, "store_code", &["code_id"]).unwrap();
        assert!(records.is_empty());
    }

    #[test]
    fn typed_event_attributes_are_base64() {
        let events = vec![TxEvent {
            event_type: "wasm".to_owned(),
            attributes: vec![crate::types::TxEventAttribute {
                key: STANDARD.encode("action"),
                value: STANDARD.encode("transfer"),
            }],
        }];
        assert_eq!(get_event_attribute(&events, "wasm", "action").unwrap(), "transfer");
        assert!(get_event_attribute(&events, "wasm", "missing").is_err());
    }

    #[test]
    fn packet_sequence_is_parsed() {
        let raw_log = r#"[{"events":[{"type":"send_packet","attributes":[{"key":"packet_sequence","value":"13"}]}]}]"#;
        assert_eq!(get_packet_sequence(raw_log).unwrap(), 13);
    }
}
