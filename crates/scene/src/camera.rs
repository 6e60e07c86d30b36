use compute::Framing;
use foundation::LatLng;
use serde::Serialize;

/// Camera placement over the globe. `altitude` is in globe radii above the
/// surface.
#[derive(Debug, Copy, Clone, PartialEq, Serialize)]
pub struct PointOfView {
    pub lat: f64,
    pub lng: f64,
    pub altitude: f64,
}

impl PointOfView {
    /// Whole-globe view the camera returns to when a selection is dismissed.
    pub const OVERVIEW: PointOfView = PointOfView {
        lat: 0.0,
        lng: 0.0,
        altitude: 2.0,
    };

    pub fn center(&self) -> LatLng {
        LatLng::new(self.lat, self.lng)
    }
}

impl Default for PointOfView {
    fn default() -> Self {
        Self::OVERVIEW
    }
}

impl From<Framing> for PointOfView {
    fn from(framing: Framing) -> Self {
        Self {
            lat: framing.lat,
            lng: framing.lng,
            altitude: framing.altitude(),
        }
    }
}

pub const FOCUS_DURATION_MS: u32 = 900;
pub const RESET_DURATION_MS: u32 = 800;

/// Animated transition the renderer should perform.
#[derive(Debug, Copy, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CameraMove {
    pub pov: PointOfView,
    pub duration_ms: u32,
}

impl CameraMove {
    pub fn focus(framing: Framing) -> Self {
        Self {
            pov: framing.into(),
            duration_ms: FOCUS_DURATION_MS,
        }
    }

    pub fn reset() -> Self {
        Self {
            pov: PointOfView::OVERVIEW,
            duration_ms: RESET_DURATION_MS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{CameraMove, PointOfView};
    use compute::Framing;

    #[test]
    fn focus_uses_framing_center_and_altitude() {
        let framing = Framing {
            lat: 47.0,
            lng: 19.0,
            lat_span: 3.0,
            lng_span: 7.0,
        };
        let mv = CameraMove::focus(framing);
        assert_eq!(mv.duration_ms, 900);
        assert_eq!(mv.pov.lat, 47.0);
        assert_eq!(mv.pov.lng, 19.0);
        assert!((mv.pov.altitude - 1.25).abs() < 1e-12);
    }

    #[test]
    fn reset_returns_to_overview() {
        let mv = CameraMove::reset();
        assert_eq!(mv.pov, PointOfView::OVERVIEW);
        assert_eq!(mv.duration_ms, 800);
        assert_eq!(PointOfView::default().altitude, 2.0);
    }
}
