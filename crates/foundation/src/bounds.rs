use crate::geo::GeoPoint;

/// Axis-aligned bounds in longitude/latitude degrees.
///
/// No antimeridian handling: a ring crossing 180° yields a span close to 360°.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct LonLatBounds {
    pub min_lon: f64,
    pub min_lat: f64,
    pub max_lon: f64,
    pub max_lat: f64,
}

impl LonLatBounds {
    pub fn new(min_lon: f64, min_lat: f64, max_lon: f64, max_lat: f64) -> Self {
        LonLatBounds {
            min_lon,
            min_lat,
            max_lon,
            max_lat,
        }
    }

    /// Returns `None` for an empty slice.
    pub fn from_points(points: &[GeoPoint]) -> Option<Self> {
        let first = points.first()?;
        let mut b = Self::new(first.lon_deg, first.lat_deg, first.lon_deg, first.lat_deg);
        for p in points.iter().skip(1) {
            b.min_lon = b.min_lon.min(p.lon_deg);
            b.min_lat = b.min_lat.min(p.lat_deg);
            b.max_lon = b.max_lon.max(p.lon_deg);
            b.max_lat = b.max_lat.max(p.lat_deg);
        }
        Some(b)
    }

    pub fn lat_span(&self) -> f64 {
        self.max_lat - self.min_lat
    }

    pub fn lon_span(&self) -> f64 {
        self.max_lon - self.min_lon
    }
}
