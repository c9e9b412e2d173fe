//! Valuation correction engine for comparable-sales appraisal.
//!
//! Resolves adjustment coefficients from hierarchical methodology tables
//! (region, property-class bucket, target/analogue matrix) and composes
//! them into a cumulative multiplier over a base analogue price, with a
//! per-dimension audit breakdown.

pub mod calculator;
pub mod comparison;
pub mod resolver;
pub mod store;
pub mod vocabulary;

// Re-export the shared shapes so callers need one import.
pub use appraisal_types::{
    AdjustedValuation, BucketValue, Catalog, CoefficientMatrix, CoefficientQuery, CorrectionLine,
    CorrectionResult, LookupMiss, ReferenceBook, ValuationError, NEUTRAL_COEFFICIENT,
};

use std::sync::Arc;

use comparison::{Comparable, ComparisonOutcome};

/// Engine entry point bound to one reference-book snapshot.
///
/// The snapshot is immutable; a store swap never changes what an existing
/// engine sees. Engines are cheap to clone and safe to share across
/// threads.
#[derive(Debug, Clone)]
pub struct CorrectionEngine {
    book: Arc<ReferenceBook>,
}

impl CorrectionEngine {
    pub fn new(book: ReferenceBook) -> Self {
        Self {
            book: Arc::new(book),
        }
    }

    pub fn with_snapshot(book: Arc<ReferenceBook>) -> Self {
        Self { book }
    }

    /// Bind to the current snapshot of a book in the global store.
    pub fn from_store(name: &str) -> Result<Self, ValuationError> {
        store::CATALOG
            .get(name)
            .map(Self::with_snapshot)
            .ok_or_else(|| ValuationError::UnknownBook {
                name: name.to_string(),
            })
    }

    pub fn book(&self) -> &ReferenceBook {
        &self.book
    }

    /// Resolve one correction coefficient. Never errors; misses degrade to
    /// the neutral coefficient with the reason recorded.
    pub fn resolve_coefficient(&self, query: &CoefficientQuery) -> CorrectionResult {
        resolver::resolve_coefficient(&self.book, query)
    }

    /// Apply an ordered chain of correction dimensions to a base price.
    pub fn apply_corrections(
        &self,
        base_price: f64,
        dimensions: &[CoefficientQuery],
    ) -> Result<AdjustedValuation, ValuationError> {
        calculator::apply_corrections(&self.book, base_price, dimensions)
    }

    /// Appraise a subject property from its weighted comparables.
    pub fn appraise(
        &self,
        subject_area: f64,
        comparables: &[Comparable],
    ) -> Result<ComparisonOutcome, ValuationError> {
        comparison::appraise(&self.book, subject_area, comparables)
    }
}
