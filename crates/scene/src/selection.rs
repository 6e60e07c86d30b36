use compute::EnrichedFeature;
use layers::PolygonStyle;

use crate::camera::{CameraMove, PointOfView};

/// Position of a feature within the enriched collection the state was built
/// against. The state never dereferences it on its own.
pub type FeatureIndex = usize;

/// Interaction state shared between the globe and its overlays.
///
/// Invariants:
/// - `flag_url` only ever belongs to the current selection; any change of
///   selection clears it.
/// - `zoomed` implies a selection.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GlobeState {
    hovered: Option<FeatureIndex>,
    selected: Option<FeatureIndex>,
    zoomed: bool,
    flag_url: Option<String>,
    pov: PointOfView,
}

impl GlobeState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn hovered(&self) -> Option<FeatureIndex> {
        self.hovered
    }

    pub fn selected(&self) -> Option<FeatureIndex> {
        self.selected
    }

    pub fn is_zoomed(&self) -> bool {
        self.zoomed
    }

    pub fn flag_url(&self) -> Option<&str> {
        self.flag_url.as_deref()
    }

    /// Where the camera is, or is heading after the last move.
    pub fn pov(&self) -> PointOfView {
        self.pov
    }

    /// Returns `true` if the selection changed.
    pub fn select(&mut self, index: FeatureIndex) -> bool {
        if self.selected == Some(index) {
            return false;
        }
        self.selected = Some(index);
        self.flag_url = None;
        true
    }

    /// Returns `true` if something was selected.
    pub fn deselect(&mut self) -> bool {
        let had = self.selected.take().is_some();
        self.flag_url = None;
        self.zoomed = false;
        had
    }

    pub fn hover(&mut self, index: FeatureIndex) {
        self.hovered = Some(index);
    }

    pub fn clear_hover(&mut self) {
        self.hovered = None;
    }

    /// Clicking the selected country while zoomed in dismisses it and flies
    /// back to the overview. Any other click selects the feature and frames
    /// it.
    pub fn click(&mut self, index: FeatureIndex, feature: &EnrichedFeature) -> CameraMove {
        if self.zoomed && self.selected == Some(index) {
            return self.dismiss();
        }
        self.select(index);
        self.zoomed = true;
        let mv = CameraMove::focus(feature.framing());
        self.pov = mv.pov;
        mv
    }

    /// Same as clicking the selected country. `None` when nothing is
    /// selected.
    pub fn close(&mut self) -> Option<CameraMove> {
        self.selected?;
        Some(self.dismiss())
    }

    /// Records a flag for `index`. Ignored if the selection moved on while
    /// the lookup was in flight.
    pub fn set_flag(&mut self, index: FeatureIndex, url: Option<String>) -> bool {
        if self.selected != Some(index) {
            return false;
        }
        self.flag_url = url;
        true
    }

    pub fn style_for(&self, index: FeatureIndex, feature: &EnrichedFeature) -> PolygonStyle {
        PolygonStyle::for_rate(feature.tax_rate(), self.hovered == Some(index))
    }

    fn dismiss(&mut self) -> CameraMove {
        self.deselect();
        let mv = CameraMove::reset();
        self.pov = mv.pov;
        mv
    }
}

#[cfg(test)]
mod tests {
    use super::GlobeState;
    use crate::camera::PointOfView;
    use compute::{EnrichedFeature, MatchKind};
    use formats::{BoundaryCollection, TaxRecord};
    use layers::{BUCKET_COLORS, emphasize};

    fn feature() -> EnrichedFeature {
        let geo = r#"{"type":"FeatureCollection","features":[{"type":"Feature",
            "properties":{"name":"Hungary","ISO_A2":"HU"},
            "geometry":{"type":"Polygon","coordinates":[[[16,46],[22,46],[22,48],[16,48],[16,46]]]}}]}"#;
        let mut boundaries = BoundaryCollection::from_geojson_str(geo).unwrap();
        EnrichedFeature::new(
            boundaries.features.remove(0),
            Some(("hungary".to_string(), MatchKind::Exact)),
            TaxRecord::new(Some(9.0), Some(15.0), Some(27.0)),
        )
    }

    #[test]
    fn first_click_selects_and_frames() {
        let f = feature();
        let mut state = GlobeState::new();
        let mv = state.click(3, &f);
        assert_eq!(state.selected(), Some(3));
        assert!(state.is_zoomed());
        assert_eq!(mv.duration_ms, 900);
        assert_eq!(state.pov(), mv.pov);
        assert!(mv.pov.altitude < PointOfView::OVERVIEW.altitude);
    }

    #[test]
    fn second_click_on_selection_resets() {
        let f = feature();
        let mut state = GlobeState::new();
        state.click(3, &f);
        state.set_flag(3, Some("https://flags/hu.svg".to_string()));

        let mv = state.click(3, &f);
        assert_eq!(mv.pov, PointOfView::OVERVIEW);
        assert_eq!(mv.duration_ms, 800);
        assert_eq!(state.selected(), None);
        assert!(!state.is_zoomed());
        assert_eq!(state.flag_url(), None);
    }

    #[test]
    fn click_elsewhere_moves_selection_and_drops_flag() {
        let f = feature();
        let mut state = GlobeState::new();
        state.click(1, &f);
        state.set_flag(1, Some("a.svg".to_string()));
        let mv = state.click(2, &f);
        assert_eq!(mv.duration_ms, 900);
        assert_eq!(state.selected(), Some(2));
        assert_eq!(state.flag_url(), None);
    }

    #[test]
    fn selected_but_not_zoomed_click_frames() {
        let f = feature();
        let mut state = GlobeState::new();
        state.select(4);
        let mv = state.click(4, &f);
        assert_eq!(mv.duration_ms, 900);
        assert!(state.is_zoomed());
    }

    #[test]
    fn close_matches_clicking_selection() {
        let f = feature();
        let mut state = GlobeState::new();
        assert_eq!(state.close(), None);
        state.click(0, &f);
        let mv = state.close().unwrap();
        assert_eq!(mv.pov, PointOfView::OVERVIEW);
        assert_eq!(state.selected(), None);
    }

    #[test]
    fn stale_flag_is_ignored() {
        let mut state = GlobeState::new();
        state.select(1);
        state.select(2);
        assert!(!state.set_flag(1, Some("old.svg".to_string())));
        assert_eq!(state.flag_url(), None);
        assert!(state.set_flag(2, Some("new.svg".to_string())));
        assert_eq!(state.flag_url(), Some("new.svg"));
    }

    #[test]
    fn hover_changes_style_only_for_hovered() {
        let f = feature();
        let mut state = GlobeState::new();
        state.hover(0);
        assert_eq!(state.style_for(0, &f).cap_color, emphasize(BUCKET_COLORS[2]));
        assert_eq!(state.style_for(1, &f).cap_color, BUCKET_COLORS[2]);
        state.clear_hover();
        assert_eq!(state.hovered(), None);
        assert_eq!(state.style_for(0, &f).cap_color, BUCKET_COLORS[2]);
    }

    #[test]
    fn deselect_reports_change() {
        let mut state = GlobeState::new();
        assert!(!state.deselect());
        assert!(state.select(0));
        assert!(!state.select(0));
        assert!(state.deselect());
    }
}
