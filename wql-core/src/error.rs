/// Error types for the core data model
use thiserror::Error;

/// Main error type for core operations
#[derive(Error, Debug, PartialEq, Eq, Clone)]
pub enum CoreError {
    /// Location label is not one of the monitored locations
    #[error("Unknown location {0:?} (expected one of: Power Plant, Plant Garage, Drain A, Drain B, Drain C)")]
    UnknownLocation(String),
}

/// Type alias for Results using CoreError
pub type Result<T> = std::result::Result<T, CoreError>;
