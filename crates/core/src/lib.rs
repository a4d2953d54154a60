//! # Orthofoot Core
//!
//! Core types, traits and I/O for the orthofoot building-footprint
//! regularization library.
//!
//! This crate provides:
//! - `FeatureTable`: schema-validated, append-only feature storage
//! - `RawGeometry`: multi-part, null-separated boundary interchange
//! - `SpatialRef`: coordinate reference passthrough
//! - Algorithm trait for consistent API
//! - GeoJSON I/O

pub mod crs;
pub mod error;
pub mod geometry;
pub mod io;
pub mod vector;

pub use crs::SpatialRef;
pub use error::{Error, Result};
pub use geometry::RawGeometry;
pub use vector::{AttributeValue, Feature, FeatureTable, Field, FieldType, GeometryType};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::crs::SpatialRef;
    pub use crate::error::{Error, Result};
    pub use crate::geometry::RawGeometry;
    pub use crate::vector::{
        AttributeValue, Feature, FeatureTable, Field, FieldType, GeometryType,
    };
    pub use crate::Algorithm;
}

/// Core trait for all algorithms in orthofoot.
///
/// Algorithms are pure functions that transform input data according to parameters.
pub trait Algorithm {
    /// Input type for the algorithm
    type Input;
    /// Output type for the algorithm
    type Output;
    /// Parameters controlling algorithm behavior
    type Params: Default;
    /// Error type for algorithm execution
    type Error: std::error::Error;

    /// Returns the algorithm name
    fn name(&self) -> &'static str;

    /// Returns a description of what the algorithm does
    fn description(&self) -> &'static str;

    /// Execute the algorithm
    fn execute(
        &self,
        input: Self::Input,
        params: Self::Params,
    ) -> std::result::Result<Self::Output, Self::Error>;

    /// Execute with default parameters
    fn execute_default(&self, input: Self::Input) -> std::result::Result<Self::Output, Self::Error> {
        self.execute(input, Self::Params::default())
    }
}
