//! Coefficient resolution over one reference book.
//!
//! The resolver is failure-opaque: every miss, including structurally
//! malformed table data, degrades to the neutral coefficient with the miss
//! reason recorded. An appraisal run must always produce a number; a data
//! gap costs precision, not the computation.

use appraisal_types::{CoefficientQuery, CorrectionResult, LookupMiss, ReferenceBook};
use tracing::debug;

/// Resolve a single correction coefficient.
///
/// Lookup chain, short-circuiting to the fallback at the first miss:
/// 1. correction name, exact;
/// 2. region, exact;
/// 3. fund bucket key, substring containment, first match in declared order;
/// 4. target attribute value, exact;
/// 5. analogue attribute value, exact.
///
/// Pure function of (query, book); never panics, never errors.
pub fn resolve_coefficient(book: &ReferenceBook, query: &CoefficientQuery) -> CorrectionResult {
    let Some(correction) = book.correction(&query.correction) else {
        return miss(query, LookupMiss::UnknownCorrection);
    };
    let Some(bucket) = correction.region(&query.region) else {
        return miss(query, LookupMiss::UnknownRegion);
    };
    let Some((_, value)) = bucket.match_fund_label(&query.fund) else {
        return miss(query, LookupMiss::NoFundMatch);
    };
    let Some(matrix) = value.matrix() else {
        return miss(query, LookupMiss::MalformedMatrix);
    };
    let Some(row) = matrix.row(&query.target) else {
        return miss(query, LookupMiss::UnknownTarget);
    };
    match row.get(query.analogue.as_str()) {
        // A cell sourced from JSON is always finite; builder-constructed
        // tables are guarded the same way as any other malformed data.
        Some(cell) if cell.is_finite() => CorrectionResult::hit(*cell),
        Some(_) => miss(query, LookupMiss::MalformedMatrix),
        None => miss(query, LookupMiss::UnknownAnalogue),
    }
}

fn miss(query: &CoefficientQuery, reason: LookupMiss) -> CorrectionResult {
    debug!(
        correction = %query.correction,
        region = %query.region,
        fund = %query.fund,
        ?reason,
        "coefficient lookup fell back to neutral"
    );
    CorrectionResult::fallback(reason)
}
