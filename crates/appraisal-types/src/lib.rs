pub mod catalog;
pub mod error;
pub mod result;

pub use catalog::{BucketValue, Catalog, CoefficientMatrix, CorrectionDefinition, ReferenceBook, RegionBucket};
pub use error::ValuationError;
pub use result::{
    AdjustedValuation, CoefficientQuery, CorrectionLine, CorrectionResult, LookupMiss,
    NEUTRAL_COEFFICIENT,
};
