use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use crate::viewport::LatLng;

pub const PRIORITY_TIER: &str = "priority_tier";
pub const PRIORITY_SCORE: &str = "priority_score";
pub const DISTANCE_TO_NEAREST: &str = "distance_to_nearest";
pub const POPULATION_DENSITY: &str = "population_density";
pub const TRAFFIC_SCORE: &str = "traffic_score";

/// GeoJSON geometry as delivered by the hosted service. Only points carry a
/// usable center; anything else is kept opaque.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Geometry {
    Point {
        /// `[longitude, latitude, ..]`; an altitude or anything past it is ignored.
        coordinates: Vec<f64>,
    },
    #[serde(other)]
    Other,
}

impl Geometry {
    pub fn point(&self) -> Option<LatLng> {
        match self {
            Geometry::Point { coordinates } => match coordinates.as_slice() {
                [longitude, latitude, ..] => Some(LatLng {
                    latitude: *latitude,
                    longitude: *longitude,
                }),
                _ => None,
            },
            Geometry::Other => None,
        }
    }
}

/// Attribute mapping of a feature. Values keep their JSON shape because the
/// hosted service does not guarantee types.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Properties(pub Map<String, Value>);

// `null` or any non-object decodes as an empty mapping.
impl<'de> Deserialize<'de> for Properties {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match Value::deserialize(deserializer)? {
            Value::Object(map) => Ok(Properties(map)),
            _ => Ok(Properties::default()),
        }
    }
}

impl Properties {
    /// Value of `key` if present and truthy (not null, false, 0 or "").
    pub fn present(&self, key: &str) -> Option<&Value> {
        self.0.get(key).filter(|value| is_truthy(value))
    }

    pub fn tier_name(&self) -> Option<String> {
        self.present(PRIORITY_TIER).map(display_value)
    }

    pub fn number(&self, key: &str) -> Option<f64> {
        self.present(key).and_then(as_number)
    }
}

impl<const N: usize> From<[(&str, Value); N]> for Properties {
    fn from(entries: [(&str, Value); N]) -> Self {
        Properties(
            entries
                .into_iter()
                .map(|(key, value)| (key.to_string(), value))
                .collect(),
        )
    }
}

/// A charging-site candidate owned by the hosted mapping service.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Feature {
    #[serde(default, deserialize_with = "lenient_geometry")]
    pub geometry: Option<Geometry>,
    #[serde(default)]
    pub properties: Properties,
}

impl Feature {
    pub fn center(&self) -> Option<LatLng> {
        self.geometry.as_ref().and_then(Geometry::point)
    }
}

/// Geometry the wire types can't read is treated as absent rather than
/// failing the whole feature.
fn lenient_geometry<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<Geometry>, D::Error> {
    let raw = Option::<Value>::deserialize(deserializer)?;
    Ok(raw.and_then(|value| serde_json::from_value(value).ok()))
}

/// Decode a feature list element by element. Entries that still fail (not
/// objects at all) are dropped; the rest keep their order.
pub fn lenient_features<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Vec<Feature>, D::Error> {
    let raw = Option::<Vec<Value>>::deserialize(deserializer)?;
    Ok(raw
        .unwrap_or_default()
        .into_iter()
        .filter_map(|value| serde_json::from_value(value).ok())
        .collect())
}

pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Numeric reading of a value; numeric strings are accepted.
pub fn as_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
    .filter(|f| f.is_finite())
}

/// Plain-text rendering of a property value.
pub fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => match (n.as_i64(), n.as_f64()) {
            (Some(i), _) => i.to_string(),
            (None, Some(f)) => f.to_string(),
            _ => n.to_string(),
        },
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn truthiness_follows_falsy_values() {
        assert!(!is_truthy(&json!(null)));
        assert!(!is_truthy(&json!(false)));
        assert!(!is_truthy(&json!(0)));
        assert!(!is_truthy(&json!(0.0)));
        assert!(!is_truthy(&json!("")));
        assert!(is_truthy(&json!("0")));
        assert!(is_truthy(&json!(0.5)));
        assert!(is_truthy(&json!([])));
    }

    #[test]
    fn decodes_point_feature() {
        let feature: Feature = serde_json::from_value(json!({
            "geometry": { "type": "Point", "coordinates": [-73.99, 40.75] },
            "properties": { "priority_tier": "High Priority", "priority_score": 0.92 }
        }))
        .unwrap();
        let center = feature.center().unwrap();
        assert_eq!(center.latitude, 40.75);
        assert_eq!(center.longitude, -73.99);
        assert_eq!(feature.properties.tier_name().as_deref(), Some("High Priority"));
    }

    #[test]
    fn null_or_non_point_geometry_has_no_center() {
        let null_geometry: Feature =
            serde_json::from_value(json!({ "geometry": null, "properties": {} })).unwrap();
        assert_eq!(null_geometry.center(), None);

        let polygon: Feature = serde_json::from_value(json!({
            "geometry": { "type": "Polygon", "coordinates": [[[0, 0], [1, 0], [1, 1], [0, 0]]] }
        }))
        .unwrap();
        assert_eq!(polygon.geometry, Some(Geometry::Other));
        assert_eq!(polygon.center(), None);
    }

    #[test]
    fn point_with_altitude_uses_first_two_positions() {
        let feature: Feature = serde_json::from_value(json!({
            "geometry": { "type": "Point", "coordinates": [-122.33, 47.6, 12.0] },
            "properties": { "priority_tier": "Low Priority" }
        }))
        .unwrap();
        assert_eq!(
            feature.center(),
            Some(LatLng {
                latitude: 47.6,
                longitude: -122.33
            })
        );
    }

    #[test]
    fn short_or_malformed_point_has_no_center() {
        let short: Feature = serde_json::from_value(json!({
            "geometry": { "type": "Point", "coordinates": [-122.33] }
        }))
        .unwrap();
        assert_eq!(short.center(), None);

        let garbled: Feature = serde_json::from_value(json!({
            "geometry": { "type": "Point", "coordinates": "nowhere" },
            "properties": { "priority_score": 64 }
        }))
        .unwrap();
        assert_eq!(garbled.geometry, None);
        assert_eq!(garbled.properties.number(PRIORITY_SCORE), Some(64.0));
    }

    #[test]
    fn null_properties_decode_as_empty() {
        let feature: Feature = serde_json::from_value(json!({
            "geometry": { "type": "Point", "coordinates": [-122.33, 47.6] },
            "properties": null
        }))
        .unwrap();
        assert!(feature.properties.0.is_empty());
        assert!(feature.center().is_some());
    }

    #[test]
    fn display_value_prints_integers_without_fraction() {
        assert_eq!(display_value(&json!(1200)), "1200");
        assert_eq!(display_value(&json!(87.5)), "87.5");
        assert_eq!(display_value(&json!("High Priority")), "High Priority");
    }

    #[test]
    fn numeric_strings_are_numbers() {
        assert_eq!(as_number(&json!("1500")), Some(1500.0));
        assert_eq!(as_number(&json!("far")), None);
        assert_eq!(as_number(&json!(true)), None);
    }
}
