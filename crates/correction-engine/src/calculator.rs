//! Applies an ordered chain of correction dimensions to a base price.

use appraisal_types::{
    AdjustedValuation, CoefficientQuery, CorrectionLine, ReferenceBook, ValuationError,
};

use crate::resolver;

/// Apply every correction dimension to `base_price`, in input order.
///
/// The one rejected input is a non-positive or non-finite base price; no
/// multiplicative fallback can make such a price meaningful. Everything
/// else degrades through the resolver's fallback policy and is visible in
/// the breakdown.
pub fn apply_corrections(
    book: &ReferenceBook,
    base_price: f64,
    dimensions: &[CoefficientQuery],
) -> Result<AdjustedValuation, ValuationError> {
    if !base_price.is_finite() || base_price <= 0.0 {
        return Err(ValuationError::InvalidBasePrice { value: base_price });
    }

    let mut breakdown = Vec::with_capacity(dimensions.len());
    let mut cumulative = 1.0;
    for dimension in dimensions {
        let result = resolver::resolve_coefficient(book, dimension);
        cumulative *= result.coefficient;
        breakdown.push(CorrectionLine::from_result(&dimension.correction, &result));
    }

    Ok(AdjustedValuation {
        base_price,
        adjusted_price: base_price * cumulative,
        breakdown,
    })
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// The adjusted price always equals the base price times the
        /// product of the breakdown coefficients.
        #[test]
        fn adjusted_equals_base_times_breakdown_product(
            base in 1.0f64..1e9,
            count in 0usize..8,
        ) {
            let book: ReferenceBook = serde_json::from_value(serde_json::json!({
                "corrections": {
                    "торг": { "regions": { "р": { "ф": { "т": { "а": 0.923 } } } } }
                }
            })).unwrap();
            let dims: Vec<CoefficientQuery> = (0..count)
                .map(|_| CoefficientQuery::new("торг", "р", "ф", "т", "а"))
                .collect();

            let valuation = apply_corrections(&book, base, &dims).unwrap();
            let expected = base * valuation.cumulative_coefficient();
            prop_assert!((valuation.adjusted_price - expected).abs() <= expected.abs() * 1e-12);
            prop_assert_eq!(valuation.breakdown.len(), count);
        }
    }
}
