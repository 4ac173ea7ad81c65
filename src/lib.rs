//! Site Subdivision - parametric layout of plots, roads and open space
//!
//! Takes a closed site boundary and metric planning parameters and derives a
//! ring road, edge-aligned plot rows, recursively bifurcated inner blocks,
//! green and amenity allocation and filleted connector roads. The engine is
//! a pure function; [`SubdivisionPlugin`] wires it into a Bevy app.

pub mod error;
pub mod geometry;
pub mod subdivision;

pub use error::ParameterError;
pub use subdivision::layout::{generate_layout, generate_variants, LayoutParams, LayoutSolution};
pub use subdivision::plugin::{
    GenerateLayoutEvent, GenerateVariantsEvent, GeneratedLayout, LayoutVariants, SiteBoundary,
    SubdivisionPlugin,
};
