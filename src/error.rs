use thiserror::Error;

#[derive(Error, Debug, Copy, Clone, PartialEq)]
pub enum FieldError {
    #[error("grid radius must be non-negative, got {0}")]
    InvalidRadius(i32),
    #[error("trap density must be within [0, 1], got {0}")]
    InvalidDensity(f32),
    #[error("mineral cluster weights must be finite, non-negative, and not all zero")]
    InvalidClusterWeights,
}

pub type Result<T> = core::result::Result<T, FieldError>;
