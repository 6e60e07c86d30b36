use std::collections::HashMap;

use formats::{BUNDLED_TAX_RATES, TaxRecord, TaxRow, parse_tax_rows};
use tracing::debug;

use super::normalize::normalize;
use super::resolve::resolve_in;

/// Rate records keyed by normalized country name.
///
/// Keys iterate in first-insertion order (source row order). A later row with
/// the same key replaces the record but keeps the original position, so the
/// substring tie-break in [`resolve_in`] depends only on where a country first
/// appears in the source.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TaxTable {
    entries: Vec<(String, TaxRecord)>,
    index: HashMap<String, usize>,
}

impl TaxTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses rate-table text. Malformed input yields an empty table.
    pub fn parse(text: &str) -> Self {
        Self::from_rows(parse_tax_rows(text))
    }

    pub fn bundled() -> Self {
        Self::parse(BUNDLED_TAX_RATES)
    }

    /// Rows whose name normalizes to nothing are dropped: an empty key would
    /// be a substring of every boundary name.
    pub fn from_rows(rows: impl IntoIterator<Item = TaxRow>) -> Self {
        let mut table = Self::new();
        for row in rows {
            let key = normalize(&row.country);
            if key.is_empty() {
                debug!("dropping rate row {:?}: empty matching key", row.country);
                continue;
            }
            table.insert(key, row.record);
        }
        table
    }

    /// Returns the replaced record, if any.
    pub fn insert(&mut self, key: String, record: TaxRecord) -> Option<TaxRecord> {
        if let Some(&i) = self.index.get(&key) {
            return Some(std::mem::replace(&mut self.entries[i].1, record));
        }
        self.index.insert(key.clone(), self.entries.len());
        self.entries.push((key, record));
        None
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, key: &str) -> Option<&TaxRecord> {
        self.index.get(key).map(|&i| &self.entries[i].1)
    }

    pub fn get_key_value(&self, key: &str) -> Option<(&str, &TaxRecord)> {
        self.index.get(key).map(|&i| {
            let (k, r) = &self.entries[i];
            (k.as_str(), r)
        })
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.index.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> + Clone + '_ {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &TaxRecord)> + '_ {
        self.entries.iter().map(|(k, r)| (k.as_str(), r))
    }

    /// Resolves a raw boundary name to the table's key and record.
    pub fn resolve(&self, boundary_name: &str) -> Option<(&str, &TaxRecord)> {
        let key = resolve_in(&normalize(boundary_name), self)?;
        self.get_key_value(key)
    }
}
