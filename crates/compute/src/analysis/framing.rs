//! Camera framing for a country outline.
//!
//! The center is the plain mean of the outer ring's vertices, not an
//! area-weighted centroid, and the span is the ring's lon/lat extent.

use formats::BoundaryGeometry;
use foundation::{GeoPoint, LatLng, LonLatBounds};
use serde::Serialize;

pub const MIN_ALTITUDE: f64 = 0.45;
pub const MAX_ALTITUDE: f64 = 2.5;
const BASE_ALTITUDE: f64 = 0.9;
/// Degrees of span that add one unit of altitude.
const DEGREES_PER_ALTITUDE: f64 = 20.0;
/// Spans below this (including zero and NaN) count as this, so point-like
/// shapes do not zoom in without bound.
const MIN_SPAN: f64 = 0.1;

#[derive(Debug, Copy, Clone, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Framing {
    pub lat: f64,
    pub lng: f64,
    pub lat_span: f64,
    pub lng_span: f64,
}

impl Framing {
    pub const DEGENERATE: Framing = Framing {
        lat: 0.0,
        lng: 0.0,
        lat_span: 0.0,
        lng_span: 0.0,
    };

    pub fn center(&self) -> LatLng {
        LatLng::new(self.lat, self.lng)
    }

    pub fn altitude(&self) -> f64 {
        zoom_altitude(self.lat_span, self.lng_span)
    }
}

/// Frames the outer ring of `geometry`. Missing geometry or an empty ring
/// gives [`Framing::DEGENERATE`].
pub fn frame(geometry: Option<&BoundaryGeometry>) -> Framing {
    geometry
        .and_then(BoundaryGeometry::outer_ring)
        .map(frame_ring)
        .unwrap_or(Framing::DEGENERATE)
}

pub fn frame_ring(ring: &[GeoPoint]) -> Framing {
    let Some(bounds) = LonLatBounds::from_points(ring) else {
        return Framing::DEGENERATE;
    };

    let mut sum_lat = 0.0;
    let mut sum_lng = 0.0;
    for p in ring {
        sum_lat += p.lat_deg;
        sum_lng += p.lon_deg;
    }
    let n = ring.len() as f64;

    Framing {
        lat: sum_lat / n,
        lng: sum_lng / n,
        lat_span: bounds.lat_span(),
        lng_span: bounds.lon_span(),
    }
}

/// Camera altitude (in globe radii) that fits a shape of the given spans,
/// clamped to `[MIN_ALTITUDE, MAX_ALTITUDE]`. Non-decreasing in both spans.
pub fn zoom_altitude(lat_span: f64, lng_span: f64) -> f64 {
    let max_span = lat_span.max(MIN_SPAN).max(lng_span.max(MIN_SPAN));
    (BASE_ALTITUDE + max_span / DEGREES_PER_ALTITUDE).clamp(MIN_ALTITUDE, MAX_ALTITUDE)
}
