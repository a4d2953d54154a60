//! Vector feature model
//!
//! Append-only feature tables with a declared attribute schema. A table
//! owns its geometry type and spatial reference; rows are validated
//! against the schema on append, and schema violations are storage
//! errors with no partial insert.

use crate::crs::SpatialRef;
use crate::error::{Error, Result};
use crate::geometry::RawGeometry;
use geo_types::Geometry;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Attribute value types
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum AttributeValue {
    Null,
    Int(i64),
    Float(f64),
    String(String),
}

impl AttributeValue {
    /// Numeric view, if any
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            AttributeValue::Int(v) => Some(*v as f64),
            AttributeValue::Float(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            AttributeValue::Int(v) => Some(*v),
            _ => None,
        }
    }
}

/// Declared type of an attribute field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FieldType {
    Double,
    Long,
    Text,
}

impl FieldType {
    /// Whether a value may be stored in a field of this type.
    /// `Null` is storable everywhere.
    pub fn accepts(&self, value: &AttributeValue) -> bool {
        matches!(
            (self, value),
            (_, AttributeValue::Null)
                | (FieldType::Double, AttributeValue::Float(_))
                | (FieldType::Long, AttributeValue::Int(_))
                | (FieldType::Text, AttributeValue::String(_))
        )
    }
}

/// A named, typed attribute field
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    pub name: String,
    pub ty: FieldType,
}

/// Geometry type of a feature table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeometryType {
    Polygon,
    Polyline,
}

/// A feature: optional geometry plus attributes
#[derive(Debug, Clone)]
pub struct Feature {
    /// Feature geometry
    pub geometry: Option<Geometry<f64>>,
    /// Feature attributes
    pub attributes: HashMap<String, AttributeValue>,
}

impl Feature {
    /// Create a new feature with geometry
    pub fn new(geometry: Geometry<f64>) -> Self {
        Self {
            geometry: Some(geometry),
            attributes: HashMap::new(),
        }
    }

    /// Create a feature with no geometry
    pub fn empty() -> Self {
        Self {
            geometry: None,
            attributes: HashMap::new(),
        }
    }

    /// Set an attribute (builder style)
    pub fn with_attribute(mut self, key: impl Into<String>, value: AttributeValue) -> Self {
        self.attributes.insert(key.into(), value);
        self
    }

    /// Get an attribute
    pub fn attribute(&self, key: &str) -> Option<&AttributeValue> {
        self.attributes.get(key)
    }
}

/// Schema-validated, append-only collection of features
#[derive(Debug, Clone)]
pub struct FeatureTable {
    name: String,
    geometry_type: GeometryType,
    spatial_ref: SpatialRef,
    fields: Vec<Field>,
    features: Vec<Feature>,
}

impl FeatureTable {
    /// Create an empty feature table
    pub fn create(
        name: impl Into<String>,
        geometry_type: GeometryType,
        spatial_ref: SpatialRef,
    ) -> Self {
        Self {
            name: name.into(),
            geometry_type,
            spatial_ref,
            fields: Vec::new(),
            features: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn geometry_type(&self) -> GeometryType {
        self.geometry_type
    }

    pub fn spatial_ref(&self) -> &SpatialRef {
        &self.spatial_ref
    }

    /// Declare a new attribute field. Duplicate names are rejected.
    pub fn add_field(&mut self, name: impl Into<String>, ty: FieldType) -> Result<()> {
        let name = name.into();
        if self.fields.iter().any(|f| f.name == name) {
            return Err(self.storage_error(format!("field '{}' already exists", name)));
        }
        self.fields.push(Field { name, ty });
        Ok(())
    }

    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Append a feature, validating its attributes against the schema.
    /// Returns the id (row index) assigned to the feature.
    pub fn append(&mut self, feature: Feature) -> Result<usize> {
        for (key, value) in &feature.attributes {
            let field = self
                .field(key)
                .ok_or_else(|| self.storage_error(format!("no such field '{}'", key)))?;
            if !field.ty.accepts(value) {
                return Err(self.storage_error(format!(
                    "value {:?} does not fit field '{}' ({:?})",
                    value, key, field.ty
                )));
            }
        }
        self.features.push(feature);
        Ok(self.features.len() - 1)
    }

    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    pub fn feature(&self, id: usize) -> Option<&Feature> {
        self.features.get(id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Feature> {
        self.features.iter()
    }

    /// Boundary geometry of one feature in wire form: ordered parts with
    /// `None` ring separators. `None` when the feature is missing, has no
    /// geometry, or carries a geometry kind the store does not hand out.
    pub fn read_geometry(&self, id: usize) -> Option<RawGeometry> {
        match self.features.get(id)?.geometry.as_ref()? {
            Geometry::Polygon(p) => Some(RawGeometry::from_polygon(p)),
            Geometry::MultiPolygon(mp) => Some(RawGeometry::from_multi_polygon(mp)),
            Geometry::LineString(ls) => Some(RawGeometry::from_line_string(ls)),
            _ => None,
        }
    }

    fn storage_error(&self, reason: String) -> Error {
        Error::Storage {
            table: self.name.clone(),
            reason,
        }
    }
}

impl IntoIterator for FeatureTable {
    type Item = Feature;
    type IntoIter = std::vec::IntoIter<Feature>;

    fn into_iter(self) -> Self::IntoIter {
        self.features.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo_types::{polygon, Coord};

    fn table() -> FeatureTable {
        FeatureTable::create("buildings", GeometryType::Polygon, SpatialRef::from_epsg(32633))
    }

    fn square() -> Geometry<f64> {
        Geometry::Polygon(polygon![
            (x: 0.0, y: 0.0),
            (x: 10.0, y: 0.0),
            (x: 10.0, y: 10.0),
            (x: 0.0, y: 10.0),
            (x: 0.0, y: 0.0),
        ])
    }

    #[test]
    fn test_append_assigns_sequential_ids() {
        let mut t = table();
        assert_eq!(t.append(Feature::new(square())).unwrap(), 0);
        assert_eq!(t.append(Feature::new(square())).unwrap(), 1);
        assert_eq!(t.len(), 2);
    }

    #[test]
    fn test_duplicate_field_is_storage_error() {
        let mut t = table();
        t.add_field("RIGHT_ID", FieldType::Long).unwrap();
        let err = t.add_field("RIGHT_ID", FieldType::Long).unwrap_err();
        assert!(matches!(err, Error::Storage { .. }));
    }

    #[test]
    fn test_undeclared_attribute_is_storage_error() {
        let mut t = table();
        let feature = Feature::new(square()).with_attribute("Angle", AttributeValue::Float(90.0));
        assert!(matches!(t.append(feature), Err(Error::Storage { .. })));
    }

    #[test]
    fn test_type_mismatch_is_storage_error() {
        let mut t = table();
        t.add_field("RIGHT_ID", FieldType::Long).unwrap();
        let feature =
            Feature::new(square()).with_attribute("RIGHT_ID", AttributeValue::String("x".into()));
        assert!(matches!(t.append(feature), Err(Error::Storage { .. })));
    }

    #[test]
    fn test_null_fits_any_field() {
        let mut t = table();
        t.add_field("Angle", FieldType::Double).unwrap();
        let feature = Feature::new(square()).with_attribute("Angle", AttributeValue::Null);
        assert!(t.append(feature).is_ok());
    }

    #[test]
    fn test_read_geometry_wire_form() {
        let mut t = table();
        t.append(Feature::new(square())).unwrap();

        let raw = t.read_geometry(0).unwrap();
        assert_eq!(raw.part_count(), 1);
        assert_eq!(raw.parts[0][0], Some(Coord { x: 0.0, y: 0.0 }));

        assert!(t.read_geometry(7).is_none());
    }

    #[test]
    fn test_read_geometry_rejects_points() {
        let mut t = table();
        t.append(Feature::new(Geometry::Point(geo_types::Point::new(1.0, 2.0))))
            .unwrap();
        assert!(t.read_geometry(0).is_none());
    }
}
