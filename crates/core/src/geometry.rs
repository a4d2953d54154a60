//! Raw geometry interchange
//!
//! The feature store hands out boundary geometry as an ordered list of
//! parts, each part a point sequence in which `None` separates interior
//! rings from the ring before them. This is the wire form consumed by the
//! vertex extractor; everything downstream works on clean coordinate
//! arrays.

use geo_types::{Coord, LineString, MultiPolygon, Polygon};

/// One part of a raw geometry: points with `None` ring separators
pub type RawPart = Vec<Option<Coord<f64>>>;

/// Multi-part, null-separated point sequences for one feature
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RawGeometry {
    pub parts: Vec<RawPart>,
}

impl RawGeometry {
    pub fn new(parts: Vec<RawPart>) -> Self {
        Self { parts }
    }

    /// One part: the exterior ring, then each interior ring preceded by
    /// a `None` separator.
    pub fn from_polygon(polygon: &Polygon<f64>) -> Self {
        let mut part: RawPart = polygon.exterior().0.iter().map(|c| Some(*c)).collect();
        for ring in polygon.interiors() {
            part.push(None);
            part.extend(ring.0.iter().map(|c| Some(*c)));
        }
        Self { parts: vec![part] }
    }

    /// One part per member polygon
    pub fn from_multi_polygon(mp: &MultiPolygon<f64>) -> Self {
        let mut parts = Vec::with_capacity(mp.0.len());
        for polygon in &mp.0 {
            parts.extend(Self::from_polygon(polygon).parts);
        }
        Self { parts }
    }

    /// A single separator-free part
    pub fn from_line_string(line: &LineString<f64>) -> Self {
        Self {
            parts: vec![line.0.iter().map(|c| Some(*c)).collect()],
        }
    }

    pub fn part_count(&self) -> usize {
        self.parts.len()
    }

    /// True when no part carries a single usable point
    pub fn is_empty(&self) -> bool {
        self.parts
            .iter()
            .all(|part| part.iter().all(|p| p.is_none()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo_types::polygon;

    #[test]
    fn test_from_polygon_simple() {
        let poly = polygon![
            (x: 0.0, y: 0.0),
            (x: 10.0, y: 0.0),
            (x: 10.0, y: 5.0),
            (x: 0.0, y: 5.0),
            (x: 0.0, y: 0.0),
        ];
        let raw = RawGeometry::from_polygon(&poly);

        assert_eq!(raw.part_count(), 1);
        assert_eq!(raw.parts[0].len(), 5);
        assert!(raw.parts[0].iter().all(|p| p.is_some()));
    }

    #[test]
    fn test_from_polygon_with_hole() {
        let poly = Polygon::new(
            LineString::from(vec![(0.0, 0.0), (10.0, 0.0), (10.0, 10.0), (0.0, 10.0), (0.0, 0.0)]),
            vec![LineString::from(vec![
                (2.0, 2.0),
                (8.0, 2.0),
                (8.0, 8.0),
                (2.0, 8.0),
                (2.0, 2.0),
            ])],
        );
        let raw = RawGeometry::from_polygon(&poly);

        assert_eq!(raw.part_count(), 1);
        // 5 exterior + separator + 5 interior
        assert_eq!(raw.parts[0].len(), 11);
        assert_eq!(raw.parts[0][5], None);
    }

    #[test]
    fn test_from_line_string() {
        let line = LineString::from(vec![(0.0, 0.0), (3.0, 4.0)]);
        let raw = RawGeometry::from_line_string(&line);

        assert_eq!(raw.part_count(), 1);
        assert_eq!(raw.parts[0], vec![
            Some(Coord { x: 0.0, y: 0.0 }),
            Some(Coord { x: 3.0, y: 4.0 }),
        ]);
    }

    #[test]
    fn test_is_empty() {
        assert!(RawGeometry::default().is_empty());
        assert!(RawGeometry::new(vec![vec![None, None]]).is_empty());
        assert!(!RawGeometry::new(vec![vec![None, Some(Coord { x: 0.0, y: 0.0 })]]).is_empty());
    }
}
