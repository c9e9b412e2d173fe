//! Query and result shapes, including the per-dimension audit breakdown.

use serde::{Deserialize, Serialize};

/// The fallback multiplier: no adjustment.
pub const NEUTRAL_COEFFICIENT: f64 = 1.0;

/// Key tuple for one coefficient lookup. Ephemeral; never stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoefficientQuery {
    /// Correction name as it appears in the reference book.
    pub correction: String,
    /// Region name, matched exactly.
    pub region: String,
    /// Fund (property-class) label, matched by substring containment
    /// against bucket keys in declared order.
    pub fund: String,
    /// Attribute value of the subject property, matched exactly.
    pub target: String,
    /// Attribute value of the comparable, matched exactly.
    pub analogue: String,
}

impl CoefficientQuery {
    pub fn new(
        correction: impl Into<String>,
        region: impl Into<String>,
        fund: impl Into<String>,
        target: impl Into<String>,
        analogue: impl Into<String>,
    ) -> Self {
        Self {
            correction: correction.into(),
            region: region.into(),
            fund: fund.into(),
            target: target.into(),
            analogue: analogue.into(),
        }
    }
}

/// Why a lookup fell back to the neutral coefficient.
///
/// The reason lets an audit distinguish a legitimately neutral adjustment
/// from a reference-data gap; the numeric fallback is the same either way.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LookupMiss {
    UnknownCorrection,
    UnknownRegion,
    NoFundMatch,
    UnknownTarget,
    UnknownAnalogue,
    MalformedMatrix,
}

impl LookupMiss {
    pub fn describe(&self) -> &'static str {
        match self {
            LookupMiss::UnknownCorrection => "correction name not present in the reference book",
            LookupMiss::UnknownRegion => "region not present in the correction table",
            LookupMiss::NoFundMatch => "no bucket key contains the fund label",
            LookupMiss::UnknownTarget => "target attribute value not present in the matrix",
            LookupMiss::UnknownAnalogue => "analogue attribute value not present in the matrix row",
            LookupMiss::MalformedMatrix => "bucket entry does not hold a usable matrix",
        }
    }
}

/// Outcome of one coefficient lookup.
///
/// `resolved == false` means the neutral fallback was used and `miss` names
/// the reason. A resolved result always carries the exact stored cell value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CorrectionResult {
    pub coefficient: f64,
    pub resolved: bool,
    pub miss: Option<LookupMiss>,
}

impl CorrectionResult {
    pub fn hit(coefficient: f64) -> Self {
        Self {
            coefficient,
            resolved: true,
            miss: None,
        }
    }

    pub fn fallback(miss: LookupMiss) -> Self {
        Self {
            coefficient: NEUTRAL_COEFFICIENT,
            resolved: false,
            miss: Some(miss),
        }
    }
}

/// One row of the audit breakdown.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CorrectionLine {
    pub correction: String,
    pub coefficient: f64,
    pub resolved: bool,
    pub miss: Option<LookupMiss>,
}

impl CorrectionLine {
    pub fn from_result(correction: impl Into<String>, result: &CorrectionResult) -> Self {
        Self {
            correction: correction.into(),
            coefficient: result.coefficient,
            resolved: result.resolved,
            miss: result.miss,
        }
    }
}

/// An adjusted valuation with its mandatory breakdown.
///
/// The breakdown is output, not telemetry: in a forensic appraisal the
/// adjustment chain must be reproducible by an opposing expert, so every
/// dimension is listed in input order with its provenance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdjustedValuation {
    pub base_price: f64,
    pub adjusted_price: f64,
    pub breakdown: Vec<CorrectionLine>,
}

impl AdjustedValuation {
    /// Product of every applied coefficient.
    pub fn cumulative_coefficient(&self) -> f64 {
        self.breakdown.iter().map(|line| line.coefficient).product()
    }

    /// Count of dimensions that fell back to the neutral coefficient.
    pub fn unresolved_count(&self) -> usize {
        self.breakdown.iter().filter(|line| !line.resolved).count()
    }
}
