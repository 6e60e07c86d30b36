use compute::{EnrichedCollection, EnrichedFeature, TrendSeries};
use formats::TrendRecord;
use serde::Serialize;

use crate::camera::PointOfView;
use crate::selection::GlobeState;

const NOT_AVAILABLE: &str = "N/A";

/// Text shown in the country card for the current selection.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PopupSummary {
    pub name: String,
    pub iso_a2: Option<String>,
    pub flag_url: Option<String>,
    pub corporate_tax: String,
    pub income_tax: String,
    pub vat: String,
    pub average: String,
    pub has_trend: bool,
}

impl PopupSummary {
    pub fn new(feature: &EnrichedFeature, flag_url: Option<&str>, trend: &TrendSeries) -> Self {
        let rates = feature.rates();
        Self {
            name: feature.name().to_string(),
            iso_a2: feature.feature.iso_a2().map(str::to_string),
            flag_url: flag_url.map(str::to_string),
            corporate_tax: format_rate(rates.corporate_tax),
            income_tax: format_rate(rates.income_tax),
            vat: format_rate(rates.vat),
            average: format_average(feature.tax_rate()),
            has_trend: !trend.is_empty(),
        }
    }
}

pub fn format_rate(rate: Option<f64>) -> String {
    match rate {
        Some(v) => format!("{v}%"),
        None => NOT_AVAILABLE.to_string(),
    }
}

pub fn format_average(rate: Option<f64>) -> String {
    match rate {
        Some(v) => format!("{v:.2}%"),
        None => NOT_AVAILABLE.to_string(),
    }
}

/// Everything an overlay needs to redraw after an interaction.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewSnapshot {
    pub hovered: Option<String>,
    pub selected: Option<PopupSummary>,
    pub zoomed: bool,
    pub pov: PointOfView,
}

impl ViewSnapshot {
    /// Indices that no longer exist in `countries` are reported as nothing
    /// hovered / nothing selected.
    pub fn capture(state: &GlobeState, countries: &EnrichedCollection, trends: &[TrendRecord]) -> Self {
        let hovered = state
            .hovered()
            .and_then(|i| countries.features.get(i))
            .map(|f| f.name().to_string());
        let selected = state.selected().and_then(|i| countries.features.get(i)).map(|f| {
            let trend = TrendSeries::select(f.name(), trends);
            PopupSummary::new(f, state.flag_url(), &trend)
        });
        Self {
            hovered,
            selected,
            zoomed: state.is_zoomed(),
            pov: state.pov(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{PopupSummary, ViewSnapshot, format_average, format_rate};
    use crate::selection::GlobeState;
    use compute::{EnrichedCollection, TaxTable, TrendSeries};
    use formats::{BoundaryCollection, TrendRecord};
    use pretty_assertions::assert_eq;
    use serde_json::json;

    const WORLD: &str = r#"{"type":"FeatureCollection","features":[
        {"type":"Feature","properties":{"name":"Hungary","ISO_A2":"HU"},
         "geometry":{"type":"Polygon","coordinates":[[[16,46],[22,46],[22,48],[16,48],[16,46]]]}},
        {"type":"Feature","properties":{"name":"Atlantis"},"geometry":null}]}"#;

    const TAXES: &str = "Country,Personal Income Tax Rate (%),Corporate Tax Rate (%),Sales Tax Rate (%)
Hungary,15.0,9.0,27.0
";

    fn countries() -> EnrichedCollection {
        let boundaries = BoundaryCollection::from_geojson_str(WORLD).unwrap();
        EnrichedCollection::enrich(&boundaries, &TaxTable::parse(TAXES))
    }

    #[test]
    fn rate_text() {
        assert_eq!(format_rate(Some(27.0)), "27%");
        assert_eq!(format_rate(Some(12.5)), "12.5%");
        assert_eq!(format_rate(None), "N/A");
        assert_eq!(format_average(Some(17.0)), "17.00%");
        assert_eq!(format_average(Some(2.0 / 3.0)), "0.67%");
        assert_eq!(format_average(None), "N/A");
    }

    #[test]
    fn summary_for_matched_country() {
        let countries = countries();
        let trends = vec![TrendRecord {
            country: "hungary".to_string(),
            year: 2000,
            rate: 18.0,
        }];
        let trend = TrendSeries::select("Hungary", &trends);
        let summary = PopupSummary::new(&countries.features[0], Some("hu.svg"), &trend);
        assert_eq!(
            summary,
            PopupSummary {
                name: "Hungary".to_string(),
                iso_a2: Some("HU".to_string()),
                flag_url: Some("hu.svg".to_string()),
                corporate_tax: "9%".to_string(),
                income_tax: "15%".to_string(),
                vat: "27%".to_string(),
                average: "17.00%".to_string(),
                has_trend: true,
            }
        );
    }

    #[test]
    fn summary_for_unmatched_country() {
        let countries = countries();
        let summary = PopupSummary::new(&countries.features[1], None, &TrendSeries::default());
        assert_eq!(summary.average, "N/A");
        assert_eq!(summary.vat, "N/A");
        assert_eq!(summary.iso_a2, None);
        assert!(!summary.has_trend);
    }

    #[test]
    fn snapshot_serializes_camel_case() {
        let countries = countries();
        let mut state = GlobeState::new();
        state.click(0, &countries.features[0]);
        state.set_flag(0, Some("hu.svg".to_string()));

        let value = serde_json::to_value(ViewSnapshot::capture(&state, &countries, &[])).unwrap();
        assert_eq!(value["zoomed"], json!(true));
        assert_eq!(value["hovered"], json!(null));
        let lat = value["pov"]["lat"].as_f64().unwrap();
        assert!((lat - 46.8).abs() < 1e-9);
        let selected = &value["selected"];
        assert_eq!(selected["isoA2"], json!("HU"));
        assert_eq!(selected["flagUrl"], json!("hu.svg"));
        assert_eq!(selected["corporateTax"], json!("9%"));
        assert_eq!(selected["incomeTax"], json!("15%"));
        assert_eq!(selected["hasTrend"], json!(false));
    }

    #[test]
    fn snapshot_follows_state() {
        let countries = countries();
        let mut state = GlobeState::new();
        state.hover(1);
        state.click(0, &countries.features[0]);

        let snap = ViewSnapshot::capture(&state, &countries, &[]);
        assert_eq!(snap.hovered.as_deref(), Some("Atlantis"));
        assert_eq!(snap.selected.map(|s| s.name), Some("Hungary".to_string()));
        assert!(snap.zoomed);

        state.hover(99);
        let snap = ViewSnapshot::capture(&state, &countries, &[]);
        assert_eq!(snap.hovered, None);
    }
}
