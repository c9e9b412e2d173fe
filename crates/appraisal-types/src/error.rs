//! Error taxonomy for the valuation engine.
//!
//! Only invalid caller input surfaces as an error. Recoverable lookup
//! misses never appear here; they degrade to the neutral coefficient and
//! are recorded in the audit breakdown instead.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValuationError {
    /// A non-positive price cannot be salvaged by a neutral multiplier.
    #[error("base price must be positive and finite, got {value}")]
    InvalidBasePrice { value: f64 },

    #[error("area must be positive and finite, got {value}")]
    InvalidArea { value: f64 },

    #[error("manual correction coefficient must be finite, got {value}")]
    InvalidCoefficient { value: f64 },

    #[error("at least one comparable is required")]
    NoComparables,

    #[error("reference book {name:?} is not loaded")]
    UnknownBook { name: String },
}
