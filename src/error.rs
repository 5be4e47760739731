//! Construction-time validation errors.
//!
//! The placement core never returns these: per the error handling design,
//! capacity exhaustion and unfittable items are outcomes recorded on the
//! result, not errors. These variants only guard the narrow boundary where a
//! caller builds a [`crate::item::Item`] or bin spec directly against the
//! library, outside of any JSON parsing layer.

use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum Error {
    #[error("dimension must be positive, got {0}")]
    NonPositiveDimension(f64),

    #[error("weight must be non-negative, got {0}")]
    NegativeWeight(f64),

    #[error("gravity strength must be within [0, 100], got {0}")]
    GravityOutOfRange(f64),

    #[error("unknown rotation digit '{0}' in allowedRotations")]
    UnknownRotationDigit(char),

    #[error("allowedRotations must not be empty")]
    EmptyAllowedRotations,
}
