use formats::{BoundaryCollection, BoundaryFeature, TaxRecord, feature_collection};
use serde_json::{Value, json};
use tracing::debug;

use super::aggregate::aggregate;
use super::normalize::normalize;
use super::resolve::{MatchKind, resolve_match_in};
use super::table::TaxTable;
use crate::analysis::{Framing, frame};

/// A boundary feature joined with its resolved rates.
#[derive(Debug, Clone, PartialEq)]
pub struct EnrichedFeature {
    pub feature: BoundaryFeature,
    /// Table key the feature resolved to, and by which rule.
    pub matched: Option<(String, MatchKind)>,
    rates: TaxRecord,
}

impl EnrichedFeature {
    pub fn new(feature: BoundaryFeature, matched: Option<(String, MatchKind)>, rates: TaxRecord) -> Self {
        Self {
            feature,
            matched,
            rates,
        }
    }

    pub fn name(&self) -> &str {
        self.feature.display_name()
    }

    pub fn rates(&self) -> &TaxRecord {
        &self.rates
    }

    /// Aggregate rate, derived from the current fields on every call.
    pub fn tax_rate(&self) -> Option<f64> {
        aggregate(&self.rates)
    }

    pub fn framing(&self) -> Framing {
        frame(self.feature.geometry.as_ref())
    }

    /// The source feature with `corporateTax`, `incomeTax`, `vat` and
    /// `taxRate` merged into its properties (`null` when absent).
    pub fn to_geojson_value(&self) -> Value {
        let mut properties = self.feature.properties.clone();
        properties.insert("corporateTax".to_string(), json!(self.rates.corporate_tax));
        properties.insert("incomeTax".to_string(), json!(self.rates.income_tax));
        properties.insert("vat".to_string(), json!(self.rates.vat));
        properties.insert("taxRate".to_string(), json!(self.tax_rate()));
        self.feature.to_geojson_value_with(properties)
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct EnrichedCollection {
    pub features: Vec<EnrichedFeature>,
}

impl EnrichedCollection {
    /// Joins every boundary feature to at most one table record. Features
    /// that resolve to nothing carry all-absent rates. An empty table or
    /// empty collection is fine and simply yields no matches.
    pub fn enrich(boundaries: &BoundaryCollection, table: &TaxTable) -> Self {
        let features: Vec<EnrichedFeature> = boundaries
            .features
            .iter()
            .map(|feature| {
                let name = normalize(feature.display_name());
                match resolve_match_in(&name, table) {
                    Some(r) => {
                        let rates = table.get(r.key).copied().unwrap_or_default();
                        EnrichedFeature::new(feature.clone(), Some((r.key.to_string(), r.kind)), rates)
                    }
                    None => EnrichedFeature::new(feature.clone(), None, TaxRecord::ABSENT),
                }
            })
            .collect();

        let matched = features.iter().filter(|f| f.matched.is_some()).count();
        debug!(
            "enriched {} boundary features, {} matched a rate record",
            features.len(),
            matched
        );
        Self { features }
    }

    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    /// Feature whose display name equals `name`, else the first whose
    /// normalized display name equals `normalize(name)`.
    pub fn find_by_name(&self, name: &str) -> Option<&EnrichedFeature> {
        self.position_by_name(name).map(|i| &self.features[i])
    }

    /// Index of the feature [`Self::find_by_name`] would return.
    pub fn position_by_name(&self, name: &str) -> Option<usize> {
        if let Some(i) = self.features.iter().position(|f| f.name() == name) {
            return Some(i);
        }
        let key = normalize(name);
        if key.is_empty() {
            return None;
        }
        self.features.iter().position(|f| normalize(f.name()) == key)
    }

    pub fn unmatched(&self) -> impl Iterator<Item = &EnrichedFeature> + '_ {
        self.features.iter().filter(|f| f.matched.is_none())
    }

    pub fn to_geojson_value(&self) -> Value {
        feature_collection(self.features.iter().map(EnrichedFeature::to_geojson_value).collect())
    }
}
