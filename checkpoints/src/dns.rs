use std::collections::HashMap;
use std::str::FromStr;

use crate::error::{Error, Result};

/// Resolves DNS TXT records carrying checkpoints
///
/// Each record is expected to look like `<height>:<hex hash>`, but sources return the raw
/// strings and leave parsing to the loader. Implementations own their timeouts; resolution
/// only ever happens while loading, never while validating blocks.
pub trait DnsRecordSource {
    /// Gets the union of the TXT records published under each of `domains`
    ///
    /// # Errors
    /// Any error is treated as "no records" by the loader
    fn load_txt_records(&self, domains: &[&str]) -> Result<Vec<String>>;
}

/// A resolver that never has any records
#[derive(Clone, Copy, Debug, Default)]
pub struct NoDnsRecords;

impl DnsRecordSource for NoDnsRecords {
    fn load_txt_records(&self, _domains: &[&str]) -> Result<Vec<String>> {
        Err(Error::ResourceUnavailable("no DNS resolver configured".to_string()))
    }
}

/// A resolver answering from a fixed table of domain → TXT records
#[derive(Clone, Debug, Default)]
pub struct StaticTxtRecords {
    records: HashMap<String, Vec<String>>,
}

impl StaticTxtRecords {
    /// Creates an empty table
    pub fn new() -> Self {
        StaticTxtRecords {
            records: HashMap::new(),
        }
    }

    /// Adds a record under `domain`
    pub fn with_record(mut self, domain: &str, record: &str) -> Self {
        self.records
            .entry(domain.to_string())
            .or_insert_with(Vec::new)
            .push(record.to_string());
        self
    }
}

impl From<&[TxtRecordPin]> for StaticTxtRecords {
    fn from(pins: &[TxtRecordPin]) -> Self {
        pins.iter()
            .fold(StaticTxtRecords::new(), |records, pin| records.with_record(&pin.domain, &pin.record))
    }
}

/// A TXT answer pinned by the operator, given as `<domain>=<record>`
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TxtRecordPin {
    /// Domain the record is published under
    pub domain: String,
    /// Raw TXT record, e.g. `1400:<hex hash>`
    pub record: String,
}

impl FromStr for TxtRecordPin {
    type Err = String;
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let separator = s
            .find('=')
            .ok_or_else(|| format!("Expected <domain>=<record>, got \"{}\"", s))?;
        let (domain, record) = (&s[..separator], &s[separator + 1..]);
        if domain.is_empty() || record.is_empty() {
            return Err(format!("Expected <domain>=<record>, got \"{}\"", s));
        }
        Ok(TxtRecordPin {
            domain: domain.to_string(),
            record: record.to_string(),
        })
    }
}

impl DnsRecordSource for StaticTxtRecords {
    fn load_txt_records(&self, domains: &[&str]) -> Result<Vec<String>> {
        let records: Vec<String> = domains
            .iter()
            .filter_map(|domain| self.records.get(*domain))
            .flatten()
            .cloned()
            .collect();
        if records.is_empty() {
            return Err(Error::ResourceUnavailable(format!("no TXT records for {:?}", domains)));
        }
        Ok(records)
    }
}
