//! Weighted comparable-sales grid.
//!
//! Mirrors the expert worksheet: each analogue's offer price is reduced to
//! a per-square-meter cost, run through its ordered correction chain,
//! weighted by its declared unit count, and the weighted average cost is
//! scaled by the subject's area.

use appraisal_types::{
    AdjustedValuation, CoefficientQuery, CorrectionLine, CorrectionResult, ReferenceBook,
    ValuationError,
};
use serde::{Deserialize, Serialize};

use crate::resolver;
use crate::vocabulary::CorrectionKind;

/// One step of an analogue's adjustment chain.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "source", rename_all = "snake_case")]
pub enum CorrectionStep {
    /// Expert-entered coefficient (bargaining discount, sale date, ...).
    Manual { kind: CorrectionKind, coefficient: f64 },
    /// Coefficient resolved from the reference book.
    Tabular { kind: CorrectionKind, query: CoefficientQuery },
}

impl CorrectionStep {
    pub fn kind(&self) -> CorrectionKind {
        match self {
            CorrectionStep::Manual { kind, .. } => *kind,
            CorrectionStep::Tabular { kind, .. } => *kind,
        }
    }
}

/// One comparable offer. Prices are in the worksheet's native unit
/// (thousand roubles), areas in square meters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comparable {
    pub offer_price: f64,
    pub area: f64,
    pub steps: Vec<CorrectionStep>,
    /// Basis for the analogue's weight in the final average.
    pub units: u32,
}

/// Per-analogue outcome.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparableLine {
    /// Offer price divided by area, before corrections.
    pub initial_sqm_cost: f64,
    /// Per-square-meter cost after the full correction chain.
    pub corrected_sqm_cost: f64,
    /// Normalized weight assigned to this analogue.
    pub weight: f64,
    /// Full audit trail of the chain applied to the per-m² cost.
    pub valuation: AdjustedValuation,
}

/// The appraisal produced from the whole grid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonOutcome {
    pub lines: Vec<ComparableLine>,
    /// Weighted average corrected cost per square meter.
    pub average_sqm_cost: f64,
    /// Average cost scaled by the subject's area.
    pub appraised_value: f64,
}

/// Appraise a subject property of `subject_area` m² from its comparables.
///
/// Weights are proportional to declared unit counts; when every count is
/// zero the analogues are weighted uniformly.
pub fn appraise(
    book: &ReferenceBook,
    subject_area: f64,
    comparables: &[Comparable],
) -> Result<ComparisonOutcome, ValuationError> {
    if !subject_area.is_finite() || subject_area <= 0.0 {
        return Err(ValuationError::InvalidArea { value: subject_area });
    }
    if comparables.is_empty() {
        return Err(ValuationError::NoComparables);
    }

    let total_units: u32 = comparables.iter().map(|c| c.units).sum();
    let uniform_weight = 1.0 / comparables.len() as f64;

    let mut lines = Vec::with_capacity(comparables.len());
    for comparable in comparables {
        if !comparable.offer_price.is_finite() || comparable.offer_price <= 0.0 {
            return Err(ValuationError::InvalidBasePrice {
                value: comparable.offer_price,
            });
        }
        if !comparable.area.is_finite() || comparable.area <= 0.0 {
            return Err(ValuationError::InvalidArea {
                value: comparable.area,
            });
        }

        let initial_sqm_cost = comparable.offer_price / comparable.area;
        let valuation = apply_chain(book, initial_sqm_cost, &comparable.steps)?;
        let weight = if total_units == 0 {
            uniform_weight
        } else {
            f64::from(comparable.units) / f64::from(total_units)
        };

        lines.push(ComparableLine {
            initial_sqm_cost,
            corrected_sqm_cost: valuation.adjusted_price,
            weight,
            valuation,
        });
    }

    let average_sqm_cost = lines
        .iter()
        .map(|line| line.weight * line.corrected_sqm_cost)
        .sum();

    Ok(ComparisonOutcome {
        lines,
        average_sqm_cost,
        appraised_value: average_sqm_cost * subject_area,
    })
}

fn apply_chain(
    book: &ReferenceBook,
    base: f64,
    steps: &[CorrectionStep],
) -> Result<AdjustedValuation, ValuationError> {
    let mut breakdown = Vec::with_capacity(steps.len());
    let mut cumulative = 1.0;
    for step in steps {
        let result = match step {
            CorrectionStep::Manual { coefficient, .. } => {
                if !coefficient.is_finite() {
                    return Err(ValuationError::InvalidCoefficient { value: *coefficient });
                }
                // A manual coefficient is a deliberate expert entry, not a
                // fallback.
                CorrectionResult::hit(*coefficient)
            }
            CorrectionStep::Tabular { query, .. } => resolver::resolve_coefficient(book, query),
        };
        cumulative *= result.coefficient;
        breakdown.push(CorrectionLine::from_result(step.kind().label(), &result));
    }

    Ok(AdjustedValuation {
        base_price: base,
        adjusted_price: base * cumulative,
        breakdown,
    })
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Weights always normalize to 1 and the appraised value scales
        /// linearly with the subject area.
        #[test]
        fn weights_normalize_and_value_scales(
            prices in prop::collection::vec(1.0f64..1e6, 1..6),
            units in prop::collection::vec(0u32..20, 6),
            area in 1.0f64..500.0,
        ) {
            let book = ReferenceBook::default();
            let comparables: Vec<Comparable> = prices
                .iter()
                .zip(units.iter())
                .map(|(price, n)| Comparable {
                    offer_price: *price,
                    area: 1.0,
                    steps: Vec::new(),
                    units: *n,
                })
                .collect();

            let outcome = appraise(&book, area, &comparables).unwrap();

            let weight_sum: f64 = outcome.lines.iter().map(|l| l.weight).sum();
            prop_assert!((weight_sum - 1.0).abs() < 1e-9);
            prop_assert!(
                (outcome.appraised_value - outcome.average_sqm_cost * area).abs()
                    <= outcome.average_sqm_cost.abs() * area * 1e-12
            );
        }
    }
}
