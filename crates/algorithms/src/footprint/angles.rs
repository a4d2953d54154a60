//! Vertex angle measurement
//!
//! Computes the angle at every vertex of a closed ring from the cross
//! and dot products of the incoming and outgoing edge vectors. Interior
//! angles of a clockwise exterior ring sum to (n - 2) * 180 degrees.

use std::f64::consts::FRAC_PI_2;

use geo_types::Coord;
use orthofoot_core::error::{Error, Result};

/// Tolerance for detecting a duplicated closing vertex
const CLOSE_EPS: f64 = 1e-8;

/// Which angle convention to measure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AngleConvention {
    /// Interior angles: negative raw turns are mapped to angle + 2π
    #[default]
    Interior,
    /// Complementary convention: positive raw turns are mapped to 2π - angle
    Exterior,
}

/// Units for angle output
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AngleUnits {
    /// Degrees (0-360)
    #[default]
    Degrees,
    /// Radians (0-2π)
    Radians,
}

/// Parameters for angle measurement
#[derive(Debug, Clone, Copy, Default)]
pub struct AngleParams {
    pub convention: AngleConvention,
    pub units: AngleUnits,
}

/// Measure the angle at every vertex of a closed ring, in ring order.
///
/// A duplicated closing vertex is dropped before measuring. For vertex
/// `v[i]`, the incoming vector is `v[i] - v[i-1]` and the outgoing
/// vector `v[i] - v[i+1]`, indices wrapping; the signed turn is
/// `atan2(cross, dot)` and the convention maps it into 0-2π.
///
/// Rings with fewer than three distinct vertices are degenerate.
pub fn vertex_angles(ring: &[Coord<f64>], params: &AngleParams) -> Result<Vec<f64>> {
    let mut pts = ring;
    if pts.len() >= 2 && coords_close(pts[0], pts[pts.len() - 1]) {
        pts = &pts[..pts.len() - 1];
    }

    let n = pts.len();
    if n < 3 {
        return Err(Error::InputGeometry {
            reason: format!("ring has {} distinct vertices, need at least 3", n),
        });
    }

    let angles = (0..n)
        .map(|i| {
            let prev = pts[(i + n - 1) % n];
            let next = pts[(i + 1) % n];
            let ba = Coord {
                x: pts[i].x - prev.x,
                y: pts[i].y - prev.y,
            };
            let bc = Coord {
                x: pts[i].x - next.x,
                y: pts[i].y - next.y,
            };

            let cross = ba.x * bc.y - ba.y * bc.x;
            let dot = ba.x * bc.x + ba.y * bc.y;
            let raw = cross.atan2(dot);

            let wrapped = match params.convention {
                AngleConvention::Interior if raw < 0.0 => raw + std::f64::consts::TAU,
                AngleConvention::Exterior if raw > 0.0 => std::f64::consts::TAU - raw,
                _ => raw,
            };

            match params.units {
                AngleUnits::Degrees => wrapped.to_degrees(),
                AngleUnits::Radians => wrapped,
            }
        })
        .collect();

    Ok(angles)
}

/// Deviation of each vertex angle from a right angle: `90 - angle`
/// (or `π/2 - angle` for radian input).
pub fn vertex_errors(angles: &[f64], units: AngleUnits) -> Vec<f64> {
    let right = match units {
        AngleUnits::Degrees => 90.0,
        AngleUnits::Radians => FRAC_PI_2,
    };
    angles.iter().map(|a| right - a).collect()
}

fn coords_close(a: Coord<f64>, b: Coord<f64>) -> bool {
    (a.x - b.x).abs() < CLOSE_EPS && (a.y - b.y).abs() < CLOSE_EPS
}
