//! Aggregation and percentile computations.
//!
//! Pure functions over reconstructed at-bats, raw pitch rows, and season
//! aggregate tables. Nothing here performs network calls; handlers feed
//! these from data fetched within a single request.

use std::collections::BTreeMap;

use serde::Serialize;
use statcast_api::types::PitchEvent;

use crate::atbat::AtBat;
use crate::outcome::{self, OutcomeCategory};

/// Conversion from the provider's movement unit (feet) to display inches.
pub const MOVEMENT_FEET_TO_INCHES: f64 = 12.0;

/// Rounds to one decimal place.
pub fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Rounds to two decimal places.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Rounds to three decimal places (batting-average precision).
pub fn round3(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}

fn round1_opt(value: Option<f64>) -> Option<f64> {
    value.map(round1)
}

fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        None
    } else {
        Some(values.iter().sum::<f64>() / values.len() as f64)
    }
}

fn max(values: &[f64]) -> Option<f64> {
    values.iter().copied().reduce(f64::max)
}

/// Batting average: hits over qualifying at-bats, rounded to 3 decimal
/// places. Zero when the denominator is zero.
pub fn batting_average(hits: usize, at_bats: usize) -> f64 {
    if at_bats == 0 {
        0.0
    } else {
        round3(hits as f64 / at_bats as f64)
    }
}

/// One entry of an outcome probability distribution.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OutcomeProbability {
    pub outcome: String,
    /// Share of total plate appearances, in percent, rounded to 1dp.
    pub probability: f64,
}

/// Probability distribution over outcome categories for a set of terminal
/// labels.
///
/// "Out" is derived as the remainder: plate appearances not claimed by a
/// named category. Zero-valued categories are dropped and the rest sorted
/// by probability descending (ties keep category order).
pub fn outcome_distribution(labels: &[&str]) -> Vec<OutcomeProbability> {
    let total = labels.len();
    if total == 0 {
        return Vec::new();
    }

    const NAMED: [OutcomeCategory; 6] = [
        OutcomeCategory::Strikeout,
        OutcomeCategory::Walk,
        OutcomeCategory::Single,
        OutcomeCategory::Double,
        OutcomeCategory::Triple,
        OutcomeCategory::HomeRun,
    ];

    let mut counts: Vec<(OutcomeCategory, usize)> =
        NAMED.iter().map(|c| (*c, 0usize)).collect();
    for label in labels {
        let category = outcome::classify(label);
        if let Some(slot) = counts.iter_mut().find(|(c, _)| *c == category) {
            slot.1 += 1;
        }
    }

    let named_total: usize = counts.iter().map(|(_, n)| n).sum();
    let mut entries: Vec<(&'static str, usize)> = counts
        .iter()
        .map(|(c, n)| (c.display_name(), *n))
        .collect();
    entries.push((OutcomeCategory::OtherOut.display_name(), total - named_total));

    let mut distribution: Vec<OutcomeProbability> = entries
        .into_iter()
        .filter(|(_, n)| *n > 0)
        .map(|(name, n)| OutcomeProbability {
            outcome: name.to_string(),
            probability: round1(n as f64 / total as f64 * 100.0),
        })
        .collect();
    distribution.sort_by(|a, b| b.probability.total_cmp(&a.probability));
    distribution
}

/// Summary counters over the terminal outcomes of a matchup.
#[derive(Debug, Clone, Serialize)]
pub struct OutcomeTotals {
    pub total_pa: usize,
    pub at_bats: usize,
    pub hits: usize,
    pub strikeouts: usize,
    pub walks: usize,
    pub home_runs: usize,
    pub batting_average: f64,
}

/// Computes matchup summary counters from reconstructed at-bats.
///
/// Strikeouts, walks, and home runs use the classifier's keyword
/// semantics; the at-bat denominator excludes the non-qualifying labels.
pub fn outcome_totals(at_bats: &[AtBat]) -> OutcomeTotals {
    let labels: Vec<&str> = crate::atbat::terminal_labels(at_bats);
    let total_pa = labels.len();
    let qualifying = labels
        .iter()
        .filter(|l| outcome::counts_as_at_bat(l))
        .count();
    let hits = labels.iter().filter(|l| outcome::is_hit_label(l)).count();
    let mut strikeouts = 0;
    let mut walks = 0;
    let mut home_runs = 0;
    for label in &labels {
        match outcome::classify(label) {
            OutcomeCategory::Strikeout => strikeouts += 1,
            OutcomeCategory::Walk => walks += 1,
            OutcomeCategory::HomeRun => home_runs += 1,
            _ => {}
        }
    }
    OutcomeTotals {
        total_pa,
        at_bats: qualifying,
        hits,
        strikeouts,
        walks,
        home_runs,
        batting_average: batting_average(hits, qualifying),
    }
}

/// Per-pitch-type usage and physical characteristics.
#[derive(Debug, Clone, Serialize)]
pub struct ArsenalRow {
    pub pitch_name: String,
    /// Number of pitches of this type thrown.
    pub usage: usize,
    /// Share of all typed pitches, in percent, rounded to 1dp.
    pub usage_percentage: f64,
    pub avg_speed: Option<f64>,
    pub max_speed: Option<f64>,
    pub avg_spin: Option<f64>,
    /// Mean horizontal movement in inches.
    pub avg_pfx_x: Option<f64>,
    /// Mean vertical movement in inches.
    pub avg_pfx_z: Option<f64>,
}

/// Groups raw pitch rows by pitch name and derives per-type usage and
/// averages. Rows without a pitch name are skipped. Missing measurements
/// propagate as absent, not zero. Rows come back alphabetically by name.
pub fn pitch_arsenal(rows: &[PitchEvent]) -> Vec<ArsenalRow> {
    let mut groups: BTreeMap<&str, Vec<&PitchEvent>> = BTreeMap::new();
    for row in rows {
        match row.pitch_name.as_deref() {
            Some("") | None => continue,
            Some(name) => groups.entry(name).or_default().push(row),
        }
    }

    let total: usize = groups.values().map(Vec::len).sum();
    if total == 0 {
        return Vec::new();
    }

    groups
        .into_iter()
        .map(|(name, pitches)| {
            let speeds: Vec<f64> = pitches.iter().filter_map(|p| p.release_speed).collect();
            let spins: Vec<f64> =
                pitches.iter().filter_map(|p| p.release_spin_rate).collect();
            let pfx_x: Vec<f64> = pitches.iter().filter_map(|p| p.pfx_x).collect();
            let pfx_z: Vec<f64> = pitches.iter().filter_map(|p| p.pfx_z).collect();
            ArsenalRow {
                pitch_name: name.to_string(),
                usage: pitches.len(),
                usage_percentage: round1(pitches.len() as f64 / total as f64 * 100.0),
                avg_speed: round1_opt(mean(&speeds)),
                max_speed: round1_opt(max(&speeds)),
                avg_spin: round1_opt(mean(&spins)),
                avg_pfx_x: round1_opt(mean(&pfx_x).map(|v| v * MOVEMENT_FEET_TO_INCHES)),
                avg_pfx_z: round1_opt(mean(&pfx_z).map(|v| v * MOVEMENT_FEET_TO_INCHES)),
            }
        })
        .collect()
}

/// Share of pitches per pitch-type code.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PitchShare {
    pub pitch_type: String,
    /// Percent of the segment, rounded to 1dp.
    pub percentage: f64,
}

/// Pitch-type distribution over a segment of rows, percent of segment
/// total, sorted descending (ties alphabetical). Rows without a type code
/// are skipped.
pub fn pitch_type_shares(rows: &[&PitchEvent]) -> Vec<PitchShare> {
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for row in rows {
        match row.pitch_type.as_deref() {
            Some("") | None => continue,
            Some(code) => *counts.entry(code).or_default() += 1,
        }
    }
    let total: usize = counts.values().sum();
    if total == 0 {
        return Vec::new();
    }
    let mut shares: Vec<PitchShare> = counts
        .into_iter()
        .map(|(code, n)| PitchShare {
            pitch_type: code.to_string(),
            percentage: round1(n as f64 / total as f64 * 100.0),
        })
        .collect();
    shares.sort_by(|a, b| b.percentage.total_cmp(&a.percentage));
    shares
}

/// Percentile rank of `value` within `population`: the share of the
/// population at or below it, 0-100, truncated to an integer.
///
/// An absent value or an empty population yields the zero sentinel; the
/// caller decides how to surface the degraded data.
pub fn percentile_rank(value: Option<f64>, population: &[f64]) -> i64 {
    let Some(value) = value else { return 0 };
    if population.is_empty() {
        return 0;
    }
    let at_or_below = population.iter().filter(|&&v| v <= value).count();
    (at_or_below as f64 / population.len() as f64 * 100.0) as i64
}

/// Percentile rank for "lower is better" metrics: the raw rank inverted so
/// that a higher displayed percentile always means better.
///
/// The zero sentinel for absent values/empty populations is *not*
/// inverted; degraded data stays at zero.
pub fn percentile_rank_inverted(value: Option<f64>, population: &[f64]) -> i64 {
    if value.is_none() || population.is_empty() {
        return 0;
    }
    100 - percentile_rank(value, population)
}
