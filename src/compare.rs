//! Comparison Projection
//!
//! Builds the side-by-side comparison view from the catalog and the
//! user's selection: per-metric winners, the sustainability radar
//! series, and the milk production series. Projection is a pure read;
//! ids that no longer resolve against the catalog are silently dropped
//! so a stale persisted selection can never break the view.

use serde::Serialize;

use crate::catalog::{BreedRecord, Catalog};
use crate::metrics::{derived_value, sustainability_score, MetricKey, SustainabilityAxis};

/// Ids of the breeds achieving the best derived value per metric. Best
/// means highest, except for price where it means lowest. Ties are not
/// broken: every breed at the best value is listed.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricWinners {
    pub milk_yield: Vec<String>,
    pub carbon_score: Vec<String>,
    pub fat_content: Vec<String>,
    pub price: Vec<String>,
}

impl MetricWinners {
    pub fn for_metric(&self, key: MetricKey) -> &[String] {
        match key {
            MetricKey::MilkYield => &self.milk_yield,
            MetricKey::CarbonScore => &self.carbon_score,
            MetricKey::FatContent => &self.fat_content,
            MetricKey::Price => &self.price,
        }
    }
}

/// One breed's score on one radar axis.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SeriesScore {
    pub name: String,
    pub score: f64,
}

/// One radar axis with every selected breed's 0-100 score.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RadarPoint {
    pub metric: &'static str,
    pub scores: Vec<SeriesScore>,
}

/// One breed's milk production figures for the bar chart.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MilkPoint {
    pub name: String,
    pub milk_yield: f64,
    pub fat_content: f64,
}

/// Everything the comparison page renders from.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ComparisonView<'a> {
    /// Resolved records in selection order; unresolvable ids dropped.
    pub breeds: Vec<&'a BreedRecord>,
    pub winners: MetricWinners,
    /// Empty unless at least two breeds resolved; a one-series radar is
    /// not a comparison.
    pub radar_series: Vec<RadarPoint>,
    /// One entry per resolved breed.
    pub milk_series: Vec<MilkPoint>,
}

/// Project a selection into the comparison view. Pure read over the
/// catalog; the selection ids are not mutated or validated beyond the
/// silent drop of unknown ids.
pub fn project<'a>(catalog: &'a Catalog, ids: &[String]) -> ComparisonView<'a> {
    let breeds: Vec<&BreedRecord> = ids.iter().filter_map(|id| catalog.breed(id)).collect();

    let mut winners = MetricWinners::default();
    for key in MetricKey::ALL {
        *winners_slot(&mut winners, key) = winners_for(&breeds, key);
    }

    let radar_series = if breeds.len() >= 2 {
        SustainabilityAxis::ALL
            .iter()
            .map(|&axis| RadarPoint {
                metric: axis.label(),
                scores: breeds
                    .iter()
                    .map(|breed| SeriesScore {
                        name: breed.name.clone(),
                        score: sustainability_score(breed, axis),
                    })
                    .collect(),
            })
            .collect()
    } else {
        Vec::new()
    };

    let milk_series = breeds
        .iter()
        .map(|breed| MilkPoint {
            name: breed.name.clone(),
            milk_yield: derived_value(breed, MetricKey::MilkYield),
            fat_content: derived_value(breed, MetricKey::FatContent),
        })
        .collect();

    ComparisonView {
        breeds,
        winners,
        radar_series,
        milk_series,
    }
}

fn winners_slot(winners: &mut MetricWinners, key: MetricKey) -> &mut Vec<String> {
    match key {
        MetricKey::MilkYield => &mut winners.milk_yield,
        MetricKey::CarbonScore => &mut winners.carbon_score,
        MetricKey::FatContent => &mut winners.fat_content,
        MetricKey::Price => &mut winners.price,
    }
}

/// All breeds achieving the best derived value for `key`. Equality on
/// the derived values is exact: they come from the same computation, so
/// identical inputs produce identical floats.
fn winners_for(breeds: &[&BreedRecord], key: MetricKey) -> Vec<String> {
    let values: Vec<f64> = breeds
        .iter()
        .map(|breed| derived_value(breed, key))
        .collect();

    let best = if key.lower_is_better() {
        values.iter().cloned().fold(f64::INFINITY, f64::min)
    } else {
        values.iter().cloned().fold(f64::NEG_INFINITY, f64::max)
    };

    breeds
        .iter()
        .zip(&values)
        .filter(|(_, &value)| value == best)
        .map(|(breed, _)| breed.id.clone())
        .collect()
}

// ============================================================================
// Pairwise insight
// ============================================================================

/// Two-breed comparison summary: carbon score delta and a one-line
/// recommendation.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PairwiseInsight {
    pub carbon_score_difference: f64,
    /// Id of the breed with the strictly better carbon score; the
    /// second breed on a tie.
    pub better_carbon_score: String,
    pub same_species: bool,
    pub recommendation: String,
}

pub fn pairwise_insight(first: &BreedRecord, second: &BreedRecord) -> PairwiseInsight {
    let first_score = derived_value(first, MetricKey::CarbonScore);
    let second_score = derived_value(second, MetricKey::CarbonScore);

    let (better, better_score, other_score) = if first_score > second_score {
        (first, first_score, second_score)
    } else {
        (second, second_score, first_score)
    };

    PairwiseInsight {
        carbon_score_difference: first_score - second_score,
        better_carbon_score: better.id.clone(),
        same_species: first.species == second.species,
        recommendation: format!(
            "{} has better sustainability score ({} vs {})",
            better.name, better_score, other_score
        ),
    }
}
