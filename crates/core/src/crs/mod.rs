//! Spatial reference handling
//!
//! Footprint measurements are only meaningful in projected units. The
//! reference metadata is carried through from the input dataset to every
//! output dataset unmodified; `looks_geographic` lets callers warn before
//! measuring in degrees.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Spatial reference carried by a feature table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct SpatialRef {
    /// WKT representation
    wkt: Option<String>,
    /// EPSG code if known
    epsg: Option<u32>,
    /// PROJ string if available
    proj: Option<String>,
}

impl SpatialRef {
    /// An unknown spatial reference
    pub fn unknown() -> Self {
        Self::default()
    }

    /// Create a spatial reference from an EPSG code
    pub fn from_epsg(code: u32) -> Self {
        Self {
            epsg: Some(code),
            ..Self::default()
        }
    }

    /// Create a spatial reference from a WKT string
    pub fn from_wkt(wkt: impl Into<String>) -> Self {
        Self {
            wkt: Some(wkt.into()),
            ..Self::default()
        }
    }

    /// Create a spatial reference from a PROJ string
    pub fn from_proj(proj: impl Into<String>) -> Self {
        Self {
            proj: Some(proj.into()),
            ..Self::default()
        }
    }

    /// WGS84 / UTM zone (EPSG:326xx north, 327xx south)
    pub fn from_utm_zone(zone: u32, north: bool) -> Self {
        let base = if north { 32600 } else { 32700 };
        Self::from_epsg(base + zone)
    }

    /// Get EPSG code if known
    pub fn epsg(&self) -> Option<u32> {
        self.epsg
    }

    /// Get WKT representation
    pub fn wkt(&self) -> Option<&str> {
        self.wkt.as_deref()
    }

    /// Get PROJ string
    pub fn proj(&self) -> Option<&str> {
        self.proj.as_deref()
    }

    /// Whether anything at all is known about this reference
    pub fn is_known(&self) -> bool {
        self.epsg.is_some() || self.wkt.is_some() || self.proj.is_some()
    }

    /// Check if two spatial references are equivalent
    pub fn is_equivalent(&self, other: &SpatialRef) -> bool {
        if let (Some(a), Some(b)) = (self.epsg, other.epsg) {
            return a == b;
        }
        if let (Some(a), Some(b)) = (&self.wkt, &other.wkt) {
            return a == b;
        }
        if let (Some(a), Some(b)) = (&self.proj, &other.proj) {
            return a == b;
        }
        false
    }

    /// Heuristic: does this look like a geographic (lat/lon) reference?
    ///
    /// Lengths and angles computed in geographic coordinates are
    /// meaningless for footprint correction. Unknown references return
    /// `false`; the caller cannot be warned about what is not declared.
    pub fn looks_geographic(&self) -> bool {
        if let Some(code) = self.epsg {
            // Common geographic codes: WGS84, NAD83, ETRS89, NAD27
            if matches!(code, 4326 | 4269 | 4258 | 4267) {
                return true;
            }
        }
        if let Some(wkt) = &self.wkt {
            let head = wkt.trim_start();
            if head.starts_with("GEOGCS") || head.starts_with("GEOGCRS") {
                return true;
            }
        }
        if let Some(proj) = &self.proj {
            if proj.contains("+proj=longlat") {
                return true;
            }
        }
        false
    }

    /// Get a string identifier for this spatial reference
    pub fn identifier(&self) -> String {
        if let Some(code) = self.epsg {
            return format!("EPSG:{}", code);
        }
        if let Some(proj) = &self.proj {
            return proj.clone();
        }
        if let Some(wkt) = &self.wkt {
            return format!("WKT:{}", &wkt[..wkt.len().min(50)]);
        }
        "Unknown".to_string()
    }
}

impl fmt::Display for SpatialRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.identifier())
    }
}
