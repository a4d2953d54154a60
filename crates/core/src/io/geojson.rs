//! GeoJSON reading/writing for feature tables
//!
//! Hand-decoded over `serde_json` values: Polygon, MultiPolygon and
//! LineString geometries, scalar properties, and the legacy `crs` member
//! for EPSG codes (GeoJSON itself is silent on CRS, but survey exports
//! commonly carry the old member and losing it would make every length
//! meaningless downstream).

use crate::crs::SpatialRef;
use crate::error::{Error, Result};
use crate::vector::{AttributeValue, Feature, FeatureTable, FieldType, GeometryType};
use geo_types::{Coord, Geometry, LineString, MultiPolygon, Polygon};
use serde_json::{json, Map, Value};
use std::fs;
use std::path::Path;

/// Read a GeoJSON FeatureCollection into a feature table.
///
/// The table name is taken from the document's `name` member, falling
/// back to the file stem. Fields are declared from the first occurrence
/// of each property; integer values are widened to `Double` fields on
/// later rows when needed.
pub fn read_feature_table<P: AsRef<Path>>(path: P) -> Result<FeatureTable> {
    let path = path.as_ref();
    let text = fs::read_to_string(path)?;
    let fallback = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("features");
    from_geojson_str(&text, fallback)
}

/// Write a feature table as a GeoJSON FeatureCollection.
pub fn write_feature_table<P: AsRef<Path>>(table: &FeatureTable, path: P) -> Result<()> {
    fs::write(path, to_geojson_string(table)?)?;
    Ok(())
}

/// Parse a GeoJSON FeatureCollection document.
pub fn from_geojson_str(text: &str, fallback_name: &str) -> Result<FeatureTable> {
    let doc: Value =
        serde_json::from_str(text).map_err(|e| Error::Format(format!("GeoJSON parse: {}", e)))?;

    if doc["type"].as_str() != Some("FeatureCollection") {
        return Err(Error::Format("expected a FeatureCollection".to_string()));
    }

    let name = doc["name"].as_str().unwrap_or(fallback_name).to_string();
    let spatial_ref = parse_crs(&doc);

    let features = doc["features"]
        .as_array()
        .ok_or_else(|| Error::Format("missing 'features' array".to_string()))?;

    let geometry_type = features
        .iter()
        .find_map(|f| match f["geometry"]["type"].as_str() {
            Some("LineString") | Some("MultiLineString") => Some(GeometryType::Polyline),
            Some(_) => Some(GeometryType::Polygon),
            None => None,
        })
        .unwrap_or(GeometryType::Polygon);

    let mut table = FeatureTable::create(name, geometry_type, spatial_ref);

    for raw in features {
        let geometry = match &raw["geometry"] {
            Value::Null => None,
            g => Some(parse_geometry(g)?),
        };

        let mut feature = match geometry {
            Some(g) => Feature::new(g),
            None => Feature::empty(),
        };

        if let Some(props) = raw["properties"].as_object() {
            for (key, value) in props {
                let value = parse_attribute(value)?;
                declare_field(&mut table, key, &value)?;
                // Reader-level leniency: integers fit Double fields
                let value = match (table.field(key).map(|f| f.ty), value) {
                    (Some(FieldType::Double), AttributeValue::Int(v)) => {
                        AttributeValue::Float(v as f64)
                    }
                    (_, v) => v,
                };
                feature.attributes.insert(key.clone(), value);
            }
        }

        table.append(feature)?;
    }

    Ok(table)
}

/// Serialize a feature table as a GeoJSON FeatureCollection string.
pub fn to_geojson_string(table: &FeatureTable) -> Result<String> {
    let features: Vec<Value> = table
        .iter()
        .map(|f| {
            json!({
                "type": "Feature",
                "geometry": f.geometry.as_ref().map(encode_geometry).unwrap_or(Value::Null),
                "properties": encode_attributes(f),
            })
        })
        .collect();

    let mut doc = Map::new();
    doc.insert("type".to_string(), json!("FeatureCollection"));
    doc.insert("name".to_string(), json!(table.name()));
    if let Some(code) = table.spatial_ref().epsg() {
        doc.insert(
            "crs".to_string(),
            json!({
                "type": "name",
                "properties": { "name": format!("urn:ogc:def:crs:EPSG::{}", code) }
            }),
        );
    }
    doc.insert("features".to_string(), Value::Array(features));

    serde_json::to_string_pretty(&Value::Object(doc))
        .map_err(|e| Error::Format(format!("GeoJSON encode: {}", e)))
}

fn parse_crs(doc: &Value) -> SpatialRef {
    doc["crs"]["properties"]["name"]
        .as_str()
        .and_then(parse_epsg_name)
        .map(SpatialRef::from_epsg)
        .unwrap_or_else(SpatialRef::unknown)
}

/// Accepts `EPSG:32633` and `urn:ogc:def:crs:EPSG::32633` spellings.
fn parse_epsg_name(name: &str) -> Option<u32> {
    name.rsplit(':').next()?.parse().ok()
}

fn parse_geometry(value: &Value) -> Result<Geometry<f64>> {
    let kind = value["type"]
        .as_str()
        .ok_or_else(|| Error::Format("geometry without 'type'".to_string()))?;
    let coords = &value["coordinates"];

    match kind {
        "Polygon" => Ok(Geometry::Polygon(parse_polygon(coords)?)),
        "MultiPolygon" => {
            let polys = coords
                .as_array()
                .ok_or_else(|| Error::Format("MultiPolygon without coordinates".to_string()))?
                .iter()
                .map(parse_polygon)
                .collect::<Result<Vec<_>>>()?;
            Ok(Geometry::MultiPolygon(MultiPolygon::new(polys)))
        }
        "LineString" => Ok(Geometry::LineString(parse_line(coords)?)),
        other => Err(Error::Format(format!("unsupported geometry type '{}'", other))),
    }
}

fn parse_polygon(value: &Value) -> Result<Polygon<f64>> {
    let rings = value
        .as_array()
        .ok_or_else(|| Error::Format("Polygon without ring array".to_string()))?
        .iter()
        .map(parse_line)
        .collect::<Result<Vec<_>>>()?;

    let mut rings = rings.into_iter();
    let exterior = rings
        .next()
        .ok_or_else(|| Error::Format("Polygon with zero rings".to_string()))?;
    Ok(Polygon::new(exterior, rings.collect()))
}

fn parse_line(value: &Value) -> Result<LineString<f64>> {
    let coords = value
        .as_array()
        .ok_or_else(|| Error::Format("expected coordinate array".to_string()))?
        .iter()
        .map(parse_position)
        .collect::<Result<Vec<_>>>()?;
    Ok(LineString::new(coords))
}

fn parse_position(value: &Value) -> Result<Coord<f64>> {
    let pair = value
        .as_array()
        .filter(|a| a.len() >= 2)
        .ok_or_else(|| Error::Format("position must be [x, y]".to_string()))?;
    let x = pair[0]
        .as_f64()
        .ok_or_else(|| Error::Format("non-numeric x coordinate".to_string()))?;
    let y = pair[1]
        .as_f64()
        .ok_or_else(|| Error::Format("non-numeric y coordinate".to_string()))?;
    Ok(Coord { x, y })
}

fn parse_attribute(value: &Value) -> Result<AttributeValue> {
    match value {
        Value::Null => Ok(AttributeValue::Null),
        Value::Bool(b) => Ok(AttributeValue::Int(*b as i64)),
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Ok(AttributeValue::Int(i))
            } else if let Some(f) = n.as_f64() {
                Ok(AttributeValue::Float(f))
            } else {
                Err(Error::Format(format!("unrepresentable number {}", n)))
            }
        }
        Value::String(s) => Ok(AttributeValue::String(s.clone())),
        other => Err(Error::Format(format!("unsupported property value {}", other))),
    }
}

/// Declare the field for a property on first sight; widen Long to Double
/// when a float shows up later under the same name.
fn declare_field(table: &mut FeatureTable, key: &str, value: &AttributeValue) -> Result<()> {
    let wanted = match value {
        AttributeValue::Float(_) => FieldType::Double,
        AttributeValue::Int(_) => FieldType::Long,
        AttributeValue::String(_) => FieldType::Text,
        AttributeValue::Null => return Ok(()),
    };

    match table.field(key).map(|f| f.ty) {
        None => table.add_field(key.to_string(), wanted),
        Some(FieldType::Long) if wanted == FieldType::Double => {
            widen_field(table, key)
        }
        Some(_) => Ok(()),
    }
}

fn widen_field(table: &mut FeatureTable, key: &str) -> Result<()> {
    // Tables have no schema mutation beyond add_field; rebuild with the
    // widened field and re-append the rows read so far.
    let mut rebuilt = FeatureTable::create(
        table.name().to_string(),
        table.geometry_type(),
        table.spatial_ref().clone(),
    );
    for field in table.fields() {
        let ty = if field.name == key { FieldType::Double } else { field.ty };
        rebuilt.add_field(field.name.clone(), ty)?;
    }
    for feature in table.iter() {
        let mut feature = feature.clone();
        if let Some(AttributeValue::Int(v)) = feature.attributes.get(key) {
            let v = *v;
            feature
                .attributes
                .insert(key.to_string(), AttributeValue::Float(v as f64));
        }
        rebuilt.append(feature)?;
    }
    *table = rebuilt;
    Ok(())
}

fn encode_geometry(geometry: &Geometry<f64>) -> Value {
    match geometry {
        Geometry::Polygon(p) => json!({
            "type": "Polygon",
            "coordinates": encode_polygon(p),
        }),
        Geometry::MultiPolygon(mp) => json!({
            "type": "MultiPolygon",
            "coordinates": mp.0.iter().map(encode_polygon).collect::<Vec<_>>(),
        }),
        Geometry::LineString(ls) => json!({
            "type": "LineString",
            "coordinates": encode_line(ls),
        }),
        // The feature model only stores the three kinds above
        _ => Value::Null,
    }
}

fn encode_polygon(polygon: &Polygon<f64>) -> Value {
    let mut rings = vec![encode_line(polygon.exterior())];
    rings.extend(polygon.interiors().iter().map(encode_line));
    Value::Array(rings)
}

fn encode_line(line: &LineString<f64>) -> Value {
    Value::Array(line.0.iter().map(|c| json!([c.x, c.y])).collect())
}

fn encode_attributes(feature: &Feature) -> Value {
    let mut props = Map::new();
    let mut keys: Vec<&String> = feature.attributes.keys().collect();
    keys.sort();
    for key in keys {
        let value = match &feature.attributes[key] {
            AttributeValue::Null => Value::Null,
            AttributeValue::Int(v) => json!(v),
            AttributeValue::Float(v) => json!(v),
            AttributeValue::String(v) => json!(v),
        };
        props.insert(key.clone(), value);
    }
    Value::Object(props)
}
