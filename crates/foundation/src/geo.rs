/// A boundary vertex as stored in GeoJSON: `[longitude, latitude]` in degrees.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct GeoPoint {
    pub lon_deg: f64,
    pub lat_deg: f64,
}

impl GeoPoint {
    pub fn new(lon_deg: f64, lat_deg: f64) -> Self {
        Self { lon_deg, lat_deg }
    }
}

/// Latitude-first position, the order camera targets are expressed in.
#[derive(Debug, Copy, Clone, PartialEq, Default)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl LatLng {
    pub const ORIGIN: LatLng = LatLng { lat: 0.0, lng: 0.0 };

    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

impl From<GeoPoint> for LatLng {
    fn from(p: GeoPoint) -> Self {
        LatLng::new(p.lat_deg, p.lon_deg)
    }
}

/// A closed (or not) sequence of vertices. The first ring of a polygon is its outer ring.
pub type Ring = Vec<GeoPoint>;

#[cfg(test)]
mod tests {
    use super::{GeoPoint, LatLng};

    #[test]
    fn lat_lng_swaps_geojson_order() {
        let ll = LatLng::from(GeoPoint::new(19.0, 47.5));
        assert_eq!(ll, LatLng::new(47.5, 19.0));
    }
}
