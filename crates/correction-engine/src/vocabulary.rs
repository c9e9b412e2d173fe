//! Fixed domain vocabularies used to build coefficient queries.
//!
//! These are the value sets the appraisal UI exposes. The labels are the
//! canonical lookup keys of the methodology tables; the numbered fund
//! labels are the reason the resolver matches bucket keys by substring
//! containment rather than equality.

use serde::{Deserialize, Serialize};

/// Regions carrying their own correction tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Region {
    Moscow,
    SaintPetersburg,
    ResortRegions,
    CitiesOverMillion,
    CitiesHalfToOneMillion,
    CitiesUnderHalfMillion,
    MoscowOblast,
    RussiaAverage,
}

impl Region {
    pub fn label(&self) -> &'static str {
        match self {
            Region::Moscow => "Москва",
            Region::SaintPetersburg => "Санкт-Петербург",
            Region::ResortRegions => "Курортные регионы",
            Region::CitiesOverMillion => {
                "Города с населением более 1 млн. чел. (кроме г. Москва и г. Санкт-Петербург)"
            }
            Region::CitiesHalfToOneMillion => "Города с населением 500-1000 тыс. чел.",
            Region::CitiesUnderHalfMillion => "Города с населением до 500 тыс. чел.",
            Region::MoscowOblast => "Московская область",
            Region::RussiaAverage => "Усреднённые по России",
        }
    }

    pub fn all() -> &'static [Region] {
        &[
            Region::Moscow,
            Region::SaintPetersburg,
            Region::ResortRegions,
            Region::CitiesOverMillion,
            Region::CitiesHalfToOneMillion,
            Region::CitiesUnderHalfMillion,
            Region::MoscowOblast,
            Region::RussiaAverage,
        ]
    }

    pub fn parse_label(s: &str) -> Option<Self> {
        Self::all().iter().copied().find(|r| r.label() == s.trim())
    }
}

/// Property-class (fund) tiers. Labels carry the UI numbering prefix that
/// source-table bucket keys are expected to contain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FundTier {
    OldStock,
    SovietMass,
    ModernMass,
    Comfort,
}

impl FundTier {
    pub fn label(&self) -> &'static str {
        match self {
            FundTier::OldStock => "1. Старый фонд",
            FundTier::SovietMass => "2. Массовое жилье советской постройки",
            FundTier::ModernMass => "3. Массовое современное жилье",
            FundTier::Comfort => "4. Жилье повышенной комфортности",
        }
    }

    /// Label without the numbering prefix, as some screens render it.
    pub fn bare_label(&self) -> &'static str {
        match self {
            FundTier::OldStock => "Старый фонд",
            FundTier::SovietMass => "Массовое жилье советской постройки",
            FundTier::ModernMass => "Массовое современное жилье",
            FundTier::Comfort => "Жилье повышенной комфортности",
        }
    }

    pub fn all() -> &'static [FundTier] {
        &[
            FundTier::OldStock,
            FundTier::SovietMass,
            FundTier::ModernMass,
            FundTier::Comfort,
        ]
    }

    pub fn parse_label(s: &str) -> Option<Self> {
        let s = s.trim();
        Self::all()
            .iter()
            .copied()
            .find(|f| f.label() == s || f.bare_label() == s)
    }
}

/// Wall construction materials.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WallMaterial {
    Brick,
    Monolithic,
    Panel,
    SlagBlock,
    Wooden,
}

impl WallMaterial {
    pub fn label(&self) -> &'static str {
        match self {
            WallMaterial::Brick => "кирпичные стены",
            WallMaterial::Monolithic => "монолитные стены",
            WallMaterial::Panel => "панельные стены",
            WallMaterial::SlagBlock => "шлакоблочные стены",
            WallMaterial::Wooden => "деревянные стены",
        }
    }

    pub fn all() -> &'static [WallMaterial] {
        &[
            WallMaterial::Brick,
            WallMaterial::Monolithic,
            WallMaterial::Panel,
            WallMaterial::SlagBlock,
            WallMaterial::Wooden,
        ]
    }

    pub fn parse_label(s: &str) -> Option<Self> {
        Self::all().iter().copied().find(|m| m.label() == s.trim())
    }
}

/// Floor position within the building.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FloorPosition {
    First,
    Middle,
    Top,
}

impl FloorPosition {
    pub fn label(&self) -> &'static str {
        match self {
            FloorPosition::First => "первый этаж",
            FloorPosition::Middle => "средний этаж",
            FloorPosition::Top => "последний этаж",
        }
    }

    pub fn all() -> &'static [FloorPosition] {
        &[FloorPosition::First, FloorPosition::Middle, FloorPosition::Top]
    }

    pub fn parse_label(s: &str) -> Option<Self> {
        Self::all().iter().copied().find(|f| f.label() == s.trim())
    }
}

/// Balcony or loggia presence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Balcony {
    Present,
    Absent,
}

impl Balcony {
    pub fn label(&self) -> &'static str {
        match self {
            Balcony::Present => "есть",
            Balcony::Absent => "нет",
        }
    }

    pub fn all() -> &'static [Balcony] {
        &[Balcony::Present, Balcony::Absent]
    }

    pub fn parse_label(s: &str) -> Option<Self> {
        Self::all().iter().copied().find(|b| b.label() == s.trim())
    }
}

/// Location zone within a city.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LocationZone {
    HistoricCenter,
    BusinessCenters,
    ModernResidential,
    MidAgeResidential,
    Outskirts,
}

impl LocationZone {
    pub fn label(&self) -> &'static str {
        match self {
            LocationZone::HistoricCenter => "Культурный и исторический центр",
            LocationZone::BusinessCenters => {
                "Центры деловой активности, зоны точечной застройки"
            }
            LocationZone::ModernResidential => {
                "Спальные микрорайоны современной высотной застройки, жилые кварталы"
            }
            LocationZone::MidAgeResidential => "Спальные микрорайоны среднестажной застройки",
            LocationZone::Outskirts => "Окраины городов, промзоны",
        }
    }

    pub fn all() -> &'static [LocationZone] {
        &[
            LocationZone::HistoricCenter,
            LocationZone::BusinessCenters,
            LocationZone::ModernResidential,
            LocationZone::MidAgeResidential,
            LocationZone::Outskirts,
        ]
    }

    pub fn parse_label(s: &str) -> Option<Self> {
        Self::all().iter().copied().find(|z| z.label() == s.trim())
    }
}

/// Technical condition of the building.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HouseCondition {
    Good,
    Satisfactory,
    Unsatisfactory,
    Commissioned,
    UnderConstruction,
    ExcavationStage,
}

impl HouseCondition {
    pub fn label(&self) -> &'static str {
        match self {
            HouseCondition::Good => "хорошее",
            HouseCondition::Satisfactory => "удовл.",
            HouseCondition::Unsatisfactory => "неудовл.",
            HouseCondition::Commissioned => "дом, введенный в эксплуатацию",
            HouseCondition::UnderConstruction => "дом на стадии строительства",
            HouseCondition::ExcavationStage => "дом на этапе котлована",
        }
    }

    pub fn all() -> &'static [HouseCondition] {
        &[
            HouseCondition::Good,
            HouseCondition::Satisfactory,
            HouseCondition::Unsatisfactory,
            HouseCondition::Commissioned,
            HouseCondition::UnderConstruction,
            HouseCondition::ExcavationStage,
        ]
    }

    pub fn parse_label(s: &str) -> Option<Self> {
        Self::all().iter().copied().find(|c| c.label() == s.trim())
    }
}

/// Interior condition of the apartment itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApartmentCondition {
    Premium,
    Standard,
    NeedsCosmeticRepair,
    NeedsMajorRepair,
}

impl ApartmentCondition {
    pub fn label(&self) -> &'static str {
        match self {
            ApartmentCondition::Premium => "комфортный ремонт (отделка «премиум»)",
            ApartmentCondition::Standard => "типовой ремонт (отделка «стандарт»)",
            ApartmentCondition::NeedsCosmeticRepair => {
                "требует косметического ремонта (в т.ч. под чистовую отделку)"
            }
            ApartmentCondition::NeedsMajorRepair => {
                "требует капитального ремонта (в т.ч. без отделки)"
            }
        }
    }

    pub fn all() -> &'static [ApartmentCondition] {
        &[
            ApartmentCondition::Premium,
            ApartmentCondition::Standard,
            ApartmentCondition::NeedsCosmeticRepair,
            ApartmentCondition::NeedsMajorRepair,
        ]
    }

    pub fn parse_label(s: &str) -> Option<Self> {
        Self::all().iter().copied().find(|c| c.label() == s.trim())
    }
}

/// The correction dimensions of the comparable-sales worksheet, in the
/// canonical order they are applied to an analogue's price.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CorrectionKind {
    TransferredRights,
    FinancingTerms,
    SaleDate,
    Bargaining,
    Location,
    ApartmentArea,
    WallMaterial,
    Utilities,
    HouseCondition,
    FloorPosition,
    ApartmentCondition,
    Balcony,
}

impl CorrectionKind {
    /// Worksheet caption for the dimension.
    pub fn label(&self) -> &'static str {
        match self {
            CorrectionKind::TransferredRights => "Корректировка на права, передаваемые на квартиру",
            CorrectionKind::FinancingTerms => "Корректировка на финансовые условия",
            CorrectionKind::SaleDate => "Корректировка на дату продажи",
            CorrectionKind::Bargaining => "Корректировка на торг",
            CorrectionKind::Location => "Корректировка на местоположение",
            CorrectionKind::ApartmentArea => "Корректировка на площадь квартиры",
            CorrectionKind::WallMaterial => "Корректировка на материал стен дома",
            CorrectionKind::Utilities => {
                "Корректировка на обеспечение инженерными коммуникациями"
            }
            CorrectionKind::HouseCondition => "Корректировка на техническое состояние дома",
            CorrectionKind::FloorPosition => "Корректировка на этажность",
            CorrectionKind::ApartmentCondition => {
                "Корректировка на техническое состояние квартиры"
            }
            CorrectionKind::Balcony => "Корректировка на наличие лоджии (балкона)",
        }
    }

    /// Whether this dimension's coefficient comes from the reference book.
    /// The remaining dimensions are expert-entered on the worksheet.
    pub fn is_catalog_backed(&self) -> bool {
        matches!(
            self,
            CorrectionKind::Location
                | CorrectionKind::WallMaterial
                | CorrectionKind::HouseCondition
                | CorrectionKind::FloorPosition
                | CorrectionKind::ApartmentCondition
                | CorrectionKind::Balcony
        )
    }

    /// Canonical worksheet order.
    pub fn chain() -> &'static [CorrectionKind] {
        &[
            CorrectionKind::TransferredRights,
            CorrectionKind::FinancingTerms,
            CorrectionKind::SaleDate,
            CorrectionKind::Bargaining,
            CorrectionKind::Location,
            CorrectionKind::ApartmentArea,
            CorrectionKind::WallMaterial,
            CorrectionKind::Utilities,
            CorrectionKind::HouseCondition,
            CorrectionKind::FloorPosition,
            CorrectionKind::ApartmentCondition,
            CorrectionKind::Balcony,
        ]
    }
}

macro_rules! display_as_label {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl std::fmt::Display for $ty {
                fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                    f.write_str(self.label())
                }
            }
        )+
    };
}

display_as_label!(
    Region,
    FundTier,
    WallMaterial,
    FloorPosition,
    Balcony,
    LocationZone,
    HouseCondition,
    ApartmentCondition,
    CorrectionKind,
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vocabulary_sizes() {
        assert_eq!(Region::all().len(), 8);
        assert_eq!(FundTier::all().len(), 4);
        assert_eq!(WallMaterial::all().len(), 5);
        assert_eq!(FloorPosition::all().len(), 3);
        assert_eq!(Balcony::all().len(), 2);
        assert_eq!(LocationZone::all().len(), 5);
        assert_eq!(HouseCondition::all().len(), 6);
        assert_eq!(ApartmentCondition::all().len(), 4);
        assert_eq!(CorrectionKind::chain().len(), 12);
    }

    #[test]
    fn test_labels_parse_back() {
        for region in Region::all() {
            assert_eq!(Region::parse_label(region.label()), Some(*region));
        }
        for floor in FloorPosition::all() {
            assert_eq!(FloorPosition::parse_label(floor.label()), Some(*floor));
        }
        assert_eq!(Region::parse_label("Луна"), None);
    }

    #[test]
    fn test_fund_parses_numbered_and_bare_labels() {
        assert_eq!(FundTier::parse_label("1. Старый фонд"), Some(FundTier::OldStock));
        assert_eq!(FundTier::parse_label("Старый фонд"), Some(FundTier::OldStock));
        assert_eq!(FundTier::parse_label("  3. Массовое современное жилье "), Some(FundTier::ModernMass));
    }

    #[test]
    fn test_numbered_fund_labels_are_substrings_of_themselves_with_suffixes() {
        // The table key may carry a suffix absent from the UI label; the
        // containment direction is label-inside-key.
        let table_key = "4. Жилье повышенной комфортности (элитное)";
        assert!(table_key.contains(FundTier::Comfort.label()));
    }

    #[test]
    fn test_catalog_backed_split() {
        let backed: Vec<_> = CorrectionKind::chain()
            .iter()
            .filter(|k| k.is_catalog_backed())
            .collect();
        assert_eq!(backed.len(), 6);
        assert!(!CorrectionKind::Bargaining.is_catalog_backed());
        assert!(CorrectionKind::FloorPosition.is_catalog_backed());
    }

    #[test]
    fn test_display_writes_label() {
        assert_eq!(FloorPosition::First.to_string(), "первый этаж");
        assert_eq!(CorrectionKind::Bargaining.to_string(), "Корректировка на торг");
    }
}
