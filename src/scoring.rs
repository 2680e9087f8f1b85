use tracing::debug;

use crate::attributes::Metric;
use crate::error::Result;
use crate::player::{CanonicalTable, Player};
use crate::weights::{DEFAULT_VERSION, WeightSpec, Weights};

#[derive(Debug, Clone, PartialEq)]
pub struct ScoredPlayer {
    pub player: Player,
    /// Weighted sum of the role's metrics. NaN if a weighted value is unresolved.
    pub score_raw: f64,
    /// `score_raw` rescaled to 0..=100 against this batch only.
    pub score: f64,
}

pub fn score(table: &CanonicalTable, role_key: &str, spec: &WeightSpec) -> Result<Vec<ScoredPlayer>> {
    score_with_version(table, role_key, spec, DEFAULT_VERSION)
}

pub fn score_with_version(
    table: &CanonicalTable,
    role_key: &str,
    spec: &WeightSpec,
    version: &str,
) -> Result<Vec<ScoredPlayer>> {
    let weights = spec.weights(role_key, version)?;
    let active = active_weights(table, weights);
    if active.len() < weights.len() {
        debug!(
            role = role_key,
            version,
            skipped = weights.len() - active.len(),
            "weighted metrics with no values in this table were skipped"
        );
    }

    let raw: Vec<f64> = table.iter().map(|p| raw_score(p, &active)).collect();
    let scores = normalize_scores(&raw);
    debug!(role = role_key, version, players = raw.len(), "scored batch");

    Ok(table
        .iter()
        .zip(raw)
        .zip(scores)
        .map(|((player, score_raw), score)| ScoredPlayer {
            player: player.clone(),
            score_raw,
            score,
        })
        .collect())
}

fn active_weights(table: &CanonicalTable, weights: &Weights) -> Vec<(Metric, f64)> {
    weights
        .iter()
        .filter(|(metric, _)| table.iter().any(|p| p.metric(*metric).is_some()))
        .collect()
}

pub fn raw_score(player: &Player, weights: &[(Metric, f64)]) -> f64 {
    weights
        .iter()
        .map(|(metric, weight)| player.metric(*metric).map_or(f64::NAN, |v| v * weight))
        .sum()
}

pub fn normalize_scores(raw: &[f64]) -> Vec<f64> {
    let (min, max) = raw
        .iter()
        .copied()
        .filter(|v| v.is_finite())
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
            (lo.min(v), hi.max(v))
        });
    let spread = max - min;

    raw.iter()
        .map(|&v| {
            if !v.is_finite() {
                f64::NAN
            } else if spread > 0.0 {
                ((v - min) / spread * 100.0).clamp(0.0, 100.0)
            } else {
                0.0
            }
        })
        .collect()
}
