//! Error types shared across the generator

use thiserror::Error;

/// A configuration value that would produce degenerate or undefined geometry
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// Random yaw bounds are reversed
    #[error("minimum angle {min} is greater than maximum angle {max}")]
    AngleRange { min: f32, max: f32 },

    /// Step length must be a positive, finite distance
    #[error("step length must be positive and finite, got {0}")]
    StepLength(f32),

    /// Ring needs at least three vertices to enclose an area
    #[error("ring segments must be at least 3, got {0}")]
    RingSegments(usize),

    /// Longitudinal sampling needs both segment ends
    #[error("curve segments must be at least 2, got {0}")]
    CurveSegments(usize),

    #[error("tube radius must be non-negative and finite, got {0}")]
    Radius(f32),

    #[error("leaf size must be non-negative and finite, got {0}")]
    LeafSize(f32),

    #[error("at least one growth path is required")]
    NoPaths,

    /// An explicit seed direction has no length
    #[error("seed direction {index} is zero or not finite")]
    SeedDirection { index: usize },

    #[error("radius profile has no keyframes")]
    EmptyProfile,

    #[error("radius profile keyframes are not sorted by time")]
    UnsortedProfile,

    /// A profile multiplier would flip or poison the tube radius
    #[error("radius profile values must be non-negative and finite, got {0}")]
    ProfileValue(f32),

    /// Host scale components are divided out of every vertex
    #[error("host transform scale must be non-zero on every axis, got {0:?}")]
    HostScale([f32; 3]),

    #[error("grow cycle period must be positive and finite, got {0}")]
    GrowPeriod(f32),

    #[error("fixed grow value must lie in [0, 1], got {0}")]
    GrowValue(f32),

    /// A spline needs at least its origin anchor
    #[error("growth path is empty")]
    EmptyGrowthPath,
}

/// Errors raised while loading a configuration or regenerating geometry
#[derive(Error, Debug)]
pub enum VineError {
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// The host collision query failed; the regeneration is abandoned
    #[error("ray cast failed: {0}")]
    RayCast(String),
}

pub type Result<T> = std::result::Result<T, VineError>;
