//! Reference catalog shapes for correction methodology tables.
//!
//! One catalog holds every methodology edition loaded into the process
//! (e.g. "Лейфер 2024 Квартиры"). The engine consumes these as pre-parsed,
//! strongly-shaped nested records; deserialization is the ingestion boundary
//! and nothing in this crate performs I/O.

use std::collections::HashMap;
use std::fmt;

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Every methodology edition available to the process, keyed by edition name.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Catalog {
    pub reference_books: HashMap<String, ReferenceBook>,
}

impl Catalog {
    /// Look up one edition by name.
    pub fn book(&self, name: &str) -> Option<&ReferenceBook> {
        self.reference_books.get(name)
    }

    pub fn book_names(&self) -> impl Iterator<Item = &str> {
        self.reference_books.keys().map(String::as_str)
    }
}

/// One edition of a correction methodology.
///
/// Immutable after load and shared read-only across concurrent resolutions.
/// A correction name with no entry is a valid, expected condition; not every
/// methodology defines every correction.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReferenceBook {
    pub corrections: HashMap<String, CorrectionDefinition>,
}

impl ReferenceBook {
    pub fn correction(&self, name: &str) -> Option<&CorrectionDefinition> {
        self.corrections.get(name)
    }
}

/// One adjustable attribute (floor position, wall material, ...), keyed by
/// region name.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CorrectionDefinition {
    pub regions: HashMap<String, RegionBucket>,
}

impl CorrectionDefinition {
    pub fn region(&self, name: &str) -> Option<&RegionBucket> {
        self.regions.get(name)
    }
}

/// Property-class buckets for one region, kept in source-table order.
///
/// Bucket keys in the source tables do not reliably match UI-facing fund
/// labels, so resolution scans keys in declared order and takes the first
/// key containing the caller's label as a substring. A hash map would lose
/// that order; the JSON object is kept as a vector of entries instead.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RegionBucket {
    entries: Vec<(String, BucketValue)>,
}

impl RegionBucket {
    pub fn new(entries: Vec<(String, BucketValue)>) -> Self {
        Self { entries }
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    pub fn get(&self, key: &str) -> Option<&BucketValue> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    /// First entry, in declared order, whose key contains `fund` as a
    /// substring. An empty fund label matches the first entry.
    pub fn match_fund_label(&self, fund: &str) -> Option<(&str, &BucketValue)> {
        self.entries
            .iter()
            .find(|(key, _)| key.contains(fund))
            .map(|(key, value)| (key.as_str(), value))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Serialize for RegionBucket {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, value) in &self.entries {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for RegionBucket {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct BucketVisitor;

        impl<'de> Visitor<'de> for BucketVisitor {
            type Value = RegionBucket;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of property-class bucket keys to coefficient matrices")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut entries = Vec::with_capacity(access.size_hint().unwrap_or(0));
                while let Some((key, value)) = access.next_entry::<String, BucketValue>()? {
                    entries.push((key, value));
                }
                Ok(RegionBucket { entries })
            }
        }

        deserializer.deserialize_map(BucketVisitor)
    }
}

/// One bucket entry, which in a well-formed table is a coefficient matrix.
///
/// Source tables occasionally carry notes or truncated rows where a matrix
/// is expected. Those deserialize as `Malformed` and resolve as a miss
/// instead of failing the whole catalog load.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum BucketValue {
    Matrix(CoefficientMatrix),
    Malformed(serde_json::Value),
}

impl BucketValue {
    pub fn matrix(&self) -> Option<&CoefficientMatrix> {
        match self {
            BucketValue::Matrix(m) => Some(m),
            BucketValue::Malformed(_) => None,
        }
    }
}

impl From<CoefficientMatrix> for BucketValue {
    fn from(matrix: CoefficientMatrix) -> Self {
        BucketValue::Matrix(matrix)
    }
}

/// Two-dimensional coefficient table: target attribute value to a row of
/// analogue attribute values.
///
/// A cell of exactly 1.0 is the semantic identity (no adjustment). Tables
/// are roughly symmetric in intent (target == analogue gives 1.0) but that
/// is a property of the data, not enforced here.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CoefficientMatrix {
    rows: HashMap<String, HashMap<String, f64>>,
}

impl CoefficientMatrix {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn row(&self, target: &str) -> Option<&HashMap<String, f64>> {
        self.rows.get(target)
    }

    pub fn cell(&self, target: &str, analogue: &str) -> Option<f64> {
        self.rows.get(target).and_then(|row| row.get(analogue)).copied()
    }

    pub fn set(&mut self, target: impl Into<String>, analogue: impl Into<String>, coefficient: f64) {
        self.rows
            .entry(target.into())
            .or_default()
            .insert(analogue.into(), coefficient);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn bucket_from_json(value: serde_json::Value) -> RegionBucket {
        serde_json::from_value(value).expect("bucket fixture")
    }

    #[test]
    fn test_bucket_preserves_declared_key_order() {
        let bucket = bucket_from_json(json!({
            "2. Массовое жилье советской постройки": {},
            "1. Старый фонд": {},
            "3. Массовое современное жилье": {},
        }));

        let keys: Vec<&str> = bucket.keys().collect();
        assert_eq!(
            keys,
            vec![
                "2. Массовое жилье советской постройки",
                "1. Старый фонд",
                "3. Массовое современное жилье",
            ]
        );
    }

    #[test]
    fn test_fund_match_is_substring_and_first_in_order() {
        let bucket = bucket_from_json(json!({
            "1. Старый фонд": {},
            "11. Особый фонд": {},
        }));

        let (key, _) = bucket.match_fund_label("1").expect("some key contains '1'");
        assert_eq!(key, "1. Старый фонд");

        let (key, _) = bucket.match_fund_label("Особый").expect("substring hit");
        assert_eq!(key, "11. Особый фонд");

        assert!(bucket.match_fund_label("4. Жилье повышенной комфортности").is_none());
    }

    #[test]
    fn test_malformed_bucket_entry_deserializes_without_failing_load() {
        let bucket = bucket_from_json(json!({
            "1. Старый фонд": "см. примечание к таблице",
            "2. Массовое жилье советской постройки": {
                "первый этаж": { "средний этаж": 0.93 }
            },
        }));

        assert!(bucket.get("1. Старый фонд").unwrap().matrix().is_none());
        let matrix = bucket
            .get("2. Массовое жилье советской постройки")
            .unwrap()
            .matrix()
            .expect("well-formed matrix");
        assert_eq!(matrix.cell("первый этаж", "средний этаж"), Some(0.93));
    }

    #[test]
    fn test_catalog_round_trip() {
        let raw = json!({
            "reference_books": {
                "Лейфер 2024 Квартиры": {
                    "corrections": {
                        "этажность": {
                            "regions": {
                                "Москва": {
                                    "1. Старый фонд": {
                                        "первый этаж": { "первый этаж": 1.0, "средний этаж": 0.93 }
                                    }
                                }
                            }
                        }
                    }
                }
            }
        });

        let catalog: Catalog = serde_json::from_value(raw).expect("catalog fixture");
        let book = catalog.book("Лейфер 2024 Квартиры").expect("edition present");
        let matrix = book
            .correction("этажность")
            .and_then(|c| c.region("Москва"))
            .and_then(|b| b.get("1. Старый фонд"))
            .and_then(BucketValue::matrix)
            .expect("matrix reachable");
        assert_eq!(matrix.cell("первый этаж", "средний этаж"), Some(0.93));

        // Serializing back keeps the bucket shape a plain JSON object.
        let round = serde_json::to_value(&catalog).expect("serialize");
        let restored: Catalog = serde_json::from_value(round).expect("reparse");
        assert!(restored.book("Лейфер 2024 Квартиры").is_some());
    }

    #[test]
    fn test_bucket_serializes_back_in_declared_order() {
        let bucket = RegionBucket::new(vec![
            ("3. Массовое современное жилье".to_string(), CoefficientMatrix::new().into()),
            ("1. Старый фонд".to_string(), CoefficientMatrix::new().into()),
        ]);

        let value = serde_json::to_value(&bucket).expect("serialize");
        let restored: RegionBucket = serde_json::from_value(value).expect("reparse");
        let keys: Vec<&str> = restored.keys().collect();
        assert_eq!(keys, vec!["3. Массовое современное жилье", "1. Старый фонд"]);
    }

    #[test]
    fn test_matrix_builder_and_cell_access() {
        let mut matrix = CoefficientMatrix::new();
        matrix.set("есть", "нет", 1.09);
        matrix.set("нет", "есть", 0.92);

        assert_eq!(matrix.cell("есть", "нет"), Some(1.09));
        assert_eq!(matrix.cell("нет", "есть"), Some(0.92));
        assert_eq!(matrix.cell("есть", "есть"), None);
        assert!(matrix.row("лоджия").is_none());
    }
}
