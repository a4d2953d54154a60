//! Vector I/O
//!
//! GeoJSON is the interchange format: hand-decoded FeatureCollections
//! with the legacy `crs` member for EPSG passthrough.

mod geojson;

pub use geojson::{
    from_geojson_str, read_feature_table, to_geojson_string, write_feature_table,
};
