//! Country boundary collections in GeoJSON form.
//!
//! Only areal geometry is kept. Features with missing or unsupported geometry
//! stay in the collection with `geometry: None` so that every named country
//! can still be matched and colored.

use foundation::{GeoPoint, Ring};
use serde_json::{Map, Value};
use tracing::debug;

/// Property keys checked, in order, for a feature's display name.
pub const NAME_KEYS: [&str; 3] = ["name", "ADMIN", "NAME"];

#[derive(Debug, Clone, PartialEq)]
pub enum BoundaryGeometry {
    Polygon(Vec<Ring>),
    MultiPolygon(Vec<Vec<Ring>>),
}

impl BoundaryGeometry {
    /// Outer ring of the polygon, or of the first polygon of a multipolygon.
    /// Holes and further polygons are not considered.
    pub fn outer_ring(&self) -> Option<&[GeoPoint]> {
        match self {
            BoundaryGeometry::Polygon(rings) => rings.first().map(Vec::as_slice),
            BoundaryGeometry::MultiPolygon(polys) => {
                polys.first()?.first().map(Vec::as_slice)
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BoundaryFeature {
    pub id: Option<String>,
    pub properties: Map<String, Value>,
    pub geometry: Option<BoundaryGeometry>,
}

impl BoundaryFeature {
    /// First non-empty string among `name`, `ADMIN`, `NAME`; empty if none.
    pub fn display_name(&self) -> &str {
        NAME_KEYS
            .iter()
            .filter_map(|k| self.properties.get(*k).and_then(Value::as_str))
            .find(|s| !s.is_empty())
            .unwrap_or("")
    }

    pub fn iso_a2(&self) -> Option<&str> {
        self.properties
            .get("ISO_A2")
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
    }

    pub fn to_geojson_value(&self) -> Value {
        self.to_geojson_value_with(self.properties.clone())
    }

    /// Same feature, emitted with a caller-supplied property map.
    pub fn to_geojson_value_with(&self, properties: Map<String, Value>) -> Value {
        let mut fobj = Map::new();
        fobj.insert("type".to_string(), Value::String("Feature".to_string()));
        if let Some(id) = &self.id {
            fobj.insert("id".to_string(), Value::String(id.clone()));
        }
        fobj.insert("properties".to_string(), Value::Object(properties));
        fobj.insert(
            "geometry".to_string(),
            self.geometry
                .as_ref()
                .map(geometry_to_geojson_value)
                .unwrap_or(Value::Null),
        );
        Value::Object(fobj)
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct BoundaryCollection {
    pub features: Vec<BoundaryFeature>,
}

#[derive(Debug)]
pub enum BoundaryError {
    Json(serde_json::Error),
    NotAFeatureCollection,
}

impl std::fmt::Display for BoundaryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BoundaryError::Json(e) => write!(f, "JSON parse error: {e}"),
            BoundaryError::NotAFeatureCollection => {
                write!(f, "expected GeoJSON FeatureCollection")
            }
        }
    }
}

impl std::error::Error for BoundaryError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            BoundaryError::Json(e) => Some(e),
            BoundaryError::NotAFeatureCollection => None,
        }
    }
}

impl BoundaryCollection {
    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    pub fn from_geojson_str(payload: &str) -> Result<Self, BoundaryError> {
        let value: Value = serde_json::from_str(payload).map_err(BoundaryError::Json)?;
        Self::from_geojson_value(&value)
    }

    /// Only the document shape can fail; individual bad features are skipped.
    pub fn from_geojson_value(value: &Value) -> Result<Self, BoundaryError> {
        let obj = value
            .as_object()
            .ok_or(BoundaryError::NotAFeatureCollection)?;
        if obj.get("type").and_then(Value::as_str) != Some("FeatureCollection") {
            return Err(BoundaryError::NotAFeatureCollection);
        }
        let features_val = obj
            .get("features")
            .and_then(Value::as_array)
            .ok_or(BoundaryError::NotAFeatureCollection)?;

        let mut features = Vec::with_capacity(features_val.len());
        for (index, feat_val) in features_val.iter().enumerate() {
            match parse_feature(feat_val) {
                Ok(f) => features.push(f),
                Err(reason) => debug!("skipping feature {index}: {reason}"),
            }
        }
        Ok(Self { features })
    }

    pub fn to_geojson_value(&self) -> Value {
        feature_collection(self.features.iter().map(BoundaryFeature::to_geojson_value).collect())
    }
}

/// Wraps already-built feature values in a FeatureCollection.
pub fn feature_collection(features: Vec<Value>) -> Value {
    let mut root = Map::new();
    root.insert(
        "type".to_string(),
        Value::String("FeatureCollection".to_string()),
    );
    root.insert("features".to_string(), Value::Array(features));
    Value::Object(root)
}

fn parse_feature(value: &Value) -> Result<BoundaryFeature, String> {
    let feat_obj = value
        .as_object()
        .ok_or("feature must be an object".to_string())?;
    match feat_obj.get("type").and_then(Value::as_str) {
        Some("Feature") => {}
        Some(other) => debug!("reading {other:?} member as a feature"),
        None => debug!("reading untyped member as a feature"),
    }

    let id = match feat_obj.get("id") {
        Some(Value::String(s)) => Some(s.clone()),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    };

    let properties = feat_obj
        .get("properties")
        .and_then(Value::as_object)
        .cloned()
        .unwrap_or_default();

    let geometry = match feat_obj.get("geometry") {
        None | Some(Value::Null) => None,
        Some(g) => match parse_geometry(g) {
            Ok(geometry) => geometry,
            Err(reason) => {
                debug!("feature geometry dropped: {reason}");
                None
            }
        },
    };

    Ok(BoundaryFeature {
        id,
        properties,
        geometry,
    })
}

/// `Ok(None)` for geometry types that carry no area.
fn parse_geometry(value: &Value) -> Result<Option<BoundaryGeometry>, String> {
    let obj = value
        .as_object()
        .ok_or("geometry must be an object".to_string())?;
    let ty = obj
        .get("type")
        .and_then(Value::as_str)
        .ok_or("geometry missing type".to_string())?;

    let coords = || {
        obj.get("coordinates")
            .ok_or("geometry missing coordinates".to_string())
    };

    match ty {
        "Polygon" => Ok(Some(BoundaryGeometry::Polygon(parse_polygon(coords()?)?))),
        "MultiPolygon" => Ok(Some(BoundaryGeometry::MultiPolygon(parse_multi_polygon(
            coords()?,
        )?))),
        _ => Ok(None),
    }
}

fn parse_point(coords: &Value) -> Result<GeoPoint, String> {
    let arr = coords
        .as_array()
        .ok_or("position must be an array".to_string())?;
    if arr.len() < 2 {
        return Err("position must have [lon, lat]".to_string());
    }
    let lon = arr[0].as_f64().ok_or("lon must be a number".to_string())?;
    let lat = arr[1].as_f64().ok_or("lat must be a number".to_string())?;
    Ok(GeoPoint::new(lon, lat))
}

fn parse_ring(coords: &Value) -> Result<Ring, String> {
    let arr = coords
        .as_array()
        .ok_or("ring must be an array".to_string())?;
    arr.iter().map(parse_point).collect()
}

fn parse_polygon(coords: &Value) -> Result<Vec<Ring>, String> {
    let rings = coords
        .as_array()
        .ok_or("Polygon coordinates must be an array of rings".to_string())?;
    rings.iter().map(parse_ring).collect()
}

fn parse_multi_polygon(coords: &Value) -> Result<Vec<Vec<Ring>>, String> {
    let polys = coords
        .as_array()
        .ok_or("MultiPolygon coordinates must be an array of polygons".to_string())?;
    polys.iter().map(parse_polygon).collect()
}

fn geometry_to_geojson_value(geom: &BoundaryGeometry) -> Value {
    let (ty, coords) = match geom {
        BoundaryGeometry::Polygon(rings) => ("Polygon", polygon_coords(rings)),
        BoundaryGeometry::MultiPolygon(polys) => (
            "MultiPolygon",
            Value::Array(polys.iter().map(|p| polygon_coords(p)).collect()),
        ),
    };
    let mut obj = Map::new();
    obj.insert("type".to_string(), Value::String(ty.to_string()));
    obj.insert("coordinates".to_string(), coords);
    Value::Object(obj)
}

fn polygon_coords(rings: &[Ring]) -> Value {
    Value::Array(
        rings
            .iter()
            .map(|ring| Value::Array(ring.iter().map(point_coords).collect()))
            .collect(),
    )
}

fn point_coords(p: &GeoPoint) -> Value {
    Value::Array(vec![Value::from(p.lon_deg), Value::from(p.lat_deg)])
}
