use thiserror::Error;

/// Layout parameters rejected before any geometry runs.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParameterError {
    #[error("Scale must be positive, got {0}")]
    NonPositiveScale(f32),

    /// Plot width or depth.
    #[error("Plot {name} must be positive, got {value}")]
    NonPositiveDimension { name: &'static str, value: f32 },

    #[error("Road {name} width must be finite and non-negative, got {value}")]
    InvalidRoadWidth { name: &'static str, value: f32 },

    #[error("Target {name} percentage {value} is outside 0..=100")]
    PercentageOutOfRange { name: &'static str, value: f32 },

    #[error("Green ({green}%) and amenity ({amenity}%) targets exceed 100% together")]
    OpenSpaceOverCommitted { green: f32, amenity: f32 },

    #[error("Turning radius must be non-negative, got {0}")]
    NegativeTurningRadius(f32),

    #[error("Garden depth must be finite and non-negative, got {0}")]
    InvalidGarden(f32),

    /// Fewer than three distinct vertices.
    #[error("Site boundary needs at least 3 distinct vertices, got {0}")]
    DegenerateBoundary(usize),

    #[error("Site boundary encloses no area (its {0} vertices are collinear)")]
    ZeroAreaBoundary(usize),
}
