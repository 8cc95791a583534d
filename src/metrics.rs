//! Metric Derivation from Free-Text Fields
//!
//! The catalog stores most figures as human-authored strings: numeric
//! ranges ("6-12 liters", "₹80,000 - ₹2,00,000") and qualitative tiers
//! ("Excellent", "Very High"). This module derives the single numeric
//! value per field that sorting, ranking, and charting work from. Values
//! are recomputed on demand; nothing here is cached.

use crate::catalog::BreedRecord;

/// Ordinal table mapping qualitative tier strings to 0-100 scores.
/// Lookup is case-sensitive and exact.
pub const TIER_SCORES: &[(&str, f64)] = &[
    ("Exceptional", 100.0),
    ("Excellent", 90.0),
    ("Very High", 85.0),
    ("Very Good", 80.0),
    ("High", 75.0),
    ("Good", 65.0),
    ("Medium", 50.0),
    ("Low", 30.0),
];

/// Score for a tier string the table does not contain. Unrecognized and
/// annotated tiers ("High (thrives on low-quality fodder)") read as
/// "Medium"; this is the documented default, not an error path.
pub const UNRATED_SCORE: f64 = 50.0;

/// Derive a representative number from a free-text range string.
///
/// Scans left to right for numeric tokens (integer or decimal) after
/// stripping comma thousands separators, and averages the first two
/// found. One token yields itself, none yields 0.0. Never panics.
///
/// `"6-12 liters"` → 9.0, `"4 liters"` → 4.0,
/// `"₹80,000 - ₹2,00,000"` → 140000.0, `""` → 0.0.
pub fn extract_range_numeric(text: &str) -> f64 {
    let mut values: Vec<f64> = Vec::with_capacity(2);
    let mut token = String::new();

    // Commas in this data are always digit grouping, never decimal marks.
    for ch in text.chars().filter(|&c| c != ',').chain(std::iter::once(' ')) {
        let extends_token = ch.is_ascii_digit() || (ch == '.' && !token.is_empty() && !token.contains('.'));
        if extends_token {
            token.push(ch);
            continue;
        }
        if !token.is_empty() {
            if let Ok(value) = token.trim_end_matches('.').parse::<f64>() {
                values.push(value);
                if values.len() == 2 {
                    break;
                }
            }
            token.clear();
        }
    }

    match values.as_slice() {
        [] => 0.0,
        [single] => *single,
        [min, max] => (min + max) / 2.0,
        _ => unreachable!("at most two tokens collected"),
    }
}

/// Look a tier string up in an explicit table. Case-sensitive exact
/// match; unmatched input scores [`UNRATED_SCORE`].
pub fn tier_score_in(table: &[(&str, f64)], tier: &str) -> f64 {
    table
        .iter()
        .find(|(name, _)| *name == tier)
        .map(|(_, score)| *score)
        .unwrap_or(UNRATED_SCORE)
}

/// Look a tier string up in the standard [`TIER_SCORES`] table.
pub fn tier_score(tier: &str) -> f64 {
    tier_score_in(TIER_SCORES, tier)
}

// ============================================================================
// Per-record derived metrics
// ============================================================================

/// The metrics tracked for sorting and winner computation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetricKey {
    MilkYield,
    CarbonScore,
    FatContent,
    Price,
}

impl MetricKey {
    pub const ALL: [MetricKey; 4] = [
        MetricKey::MilkYield,
        MetricKey::CarbonScore,
        MetricKey::FatContent,
        MetricKey::Price,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            MetricKey::MilkYield => "milkYield",
            MetricKey::CarbonScore => "carbonScore",
            MetricKey::FatContent => "fatContent",
            MetricKey::Price => "price",
        }
    }

    /// Price is the one metric where the best value is the lowest.
    pub fn lower_is_better(&self) -> bool {
        matches!(self, MetricKey::Price)
    }
}

/// Derive the numeric value of `key` for a record. Absent fields read as
/// 0.0, matching the extraction default for empty text.
pub fn derived_value(record: &BreedRecord, key: MetricKey) -> f64 {
    match key {
        MetricKey::MilkYield => text_metric(record.productivity.milk_yield_per_day.as_deref()),
        MetricKey::CarbonScore => record.sustainability.carbon_score.unwrap_or(0.0),
        MetricKey::FatContent => text_metric(record.productivity.fat_content.as_deref()),
        MetricKey::Price => text_metric(record.economic_value.purchase_cost.as_deref()),
    }
}

fn text_metric(text: Option<&str>) -> f64 {
    text.map(extract_range_numeric).unwrap_or(0.0)
}

// ============================================================================
// Sustainability axes (radar chart scores)
// ============================================================================

/// The four sustainability axes compared on the radar chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SustainabilityAxis {
    CarbonScore,
    HeatTolerance,
    DiseaseResistance,
    FeedEfficiency,
}

impl SustainabilityAxis {
    pub const ALL: [SustainabilityAxis; 4] = [
        SustainabilityAxis::CarbonScore,
        SustainabilityAxis::HeatTolerance,
        SustainabilityAxis::DiseaseResistance,
        SustainabilityAxis::FeedEfficiency,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            SustainabilityAxis::CarbonScore => "Carbon Score",
            SustainabilityAxis::HeatTolerance => "Heat Tolerance",
            SustainabilityAxis::DiseaseResistance => "Disease Resistance",
            SustainabilityAxis::FeedEfficiency => "Feed Efficiency",
        }
    }
}

/// Normalized 0-100 score for one sustainability axis. The carbon score
/// is already numeric and is used directly; the other axes map their
/// tier string through [`tier_score`], with an absent field treated as
/// "Medium".
pub fn sustainability_score(record: &BreedRecord, axis: SustainabilityAxis) -> f64 {
    let s = &record.sustainability;
    match axis {
        SustainabilityAxis::CarbonScore => s.carbon_score.unwrap_or(0.0),
        SustainabilityAxis::HeatTolerance => tier_field(s.heat_tolerance.as_deref()),
        SustainabilityAxis::DiseaseResistance => tier_field(s.disease_resistance.as_deref()),
        SustainabilityAxis::FeedEfficiency => tier_field(s.feed_efficiency.as_deref()),
    }
}

fn tier_field(tier: Option<&str>) -> f64 {
    tier_score(tier.unwrap_or("Medium"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_extract_simple_range() {
        assert_relative_eq!(extract_range_numeric("6-12 liters"), 9.0);
        assert_relative_eq!(extract_range_numeric("70-90 cm"), 80.0);
    }

    #[test]
    fn test_extract_single_value() {
        assert_relative_eq!(extract_range_numeric("4 liters"), 4.0);
        assert_relative_eq!(extract_range_numeric("300 days"), 300.0);
    }

    #[test]
    fn test_extract_no_digits() {
        assert_relative_eq!(extract_range_numeric(""), 0.0);
        assert_relative_eq!(extract_range_numeric("not a range"), 0.0);
    }

    #[test]
    fn test_extract_strips_thousands_separators() {
        // Indian digit grouping: "2,00,000" must parse as 200000, not 2.
        assert_relative_eq!(extract_range_numeric("₹80,000 - ₹2,00,000"), 140000.0);
        assert_relative_eq!(extract_range_numeric("₹1,00,000 - ₹3,00,000"), 200000.0);
    }

    #[test]
    fn test_extract_decimals() {
        assert_relative_eq!(extract_range_numeric("4.5-5.0%"), 4.75);
        assert_relative_eq!(extract_range_numeric("7.0-8.0%"), 7.5);
    }

    #[test]
    fn test_extract_ignores_tokens_past_the_first_two() {
        assert_relative_eq!(extract_range_numeric("6-12 liters (up to 18)"), 9.0);
    }

    #[test]
    fn test_tier_score_table() {
        assert_relative_eq!(tier_score("Exceptional"), 100.0);
        assert_relative_eq!(tier_score("Excellent"), 90.0);
        assert_relative_eq!(tier_score("Very High"), 85.0);
        assert_relative_eq!(tier_score("Low"), 30.0);
    }

    #[test]
    fn test_tier_score_defaults_to_medium() {
        assert_relative_eq!(tier_score("Unknown Tier"), 50.0);
        // Lookup is case-sensitive and exact by contract.
        assert_relative_eq!(tier_score("excellent"), 50.0);
        assert_relative_eq!(tier_score("High (thrives on low-quality fodder)"), 50.0);
    }

    #[test]
    fn test_derived_values() {
        let json = r#"{
            "id": "gir", "name": "Gir", "type": "cattle",
            "productivity": {"milkYieldPerDay": "6-12 liters", "fatContent": "4.5-5.0%"},
            "sustainability": {"carbonScore": 85, "heatTolerance": "Excellent"},
            "economicValue": {"purchaseCost": "₹80,000 - ₹2,00,000"}
        }"#;
        let record: crate::catalog::BreedRecord = serde_json::from_str(json).unwrap();

        assert_relative_eq!(derived_value(&record, MetricKey::MilkYield), 9.0);
        assert_relative_eq!(derived_value(&record, MetricKey::CarbonScore), 85.0);
        assert_relative_eq!(derived_value(&record, MetricKey::FatContent), 4.75);
        assert_relative_eq!(derived_value(&record, MetricKey::Price), 140000.0);

        assert_relative_eq!(
            sustainability_score(&record, SustainabilityAxis::HeatTolerance),
            90.0
        );
        // Absent tier fields read as "Medium".
        assert_relative_eq!(
            sustainability_score(&record, SustainabilityAxis::DiseaseResistance),
            50.0
        );
    }
}
