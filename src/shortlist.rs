use std::cmp::Ordering;

use tracing::info;

use crate::error::{MoneyballError, Result};
use crate::filter::filter_by_budget;
use crate::player::CanonicalTable;
use crate::scoring::{ScoredPlayer, score_with_version};
use crate::weights::{DEFAULT_VERSION, WeightSpec};

#[derive(Debug, Clone)]
pub struct ShortlistRequest {
    pub position: String,
    pub version: String,
    /// Budget in millions; `None` keeps everyone.
    pub max_value_millions: Option<f64>,
}

impl ShortlistRequest {
    pub fn new(position: impl Into<String>) -> Self {
        Self {
            position: position.into(),
            version: DEFAULT_VERSION.to_string(),
            max_value_millions: None,
        }
    }

    pub fn version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }

    pub fn budget(mut self, max_value_millions: f64) -> Self {
        self.max_value_millions = Some(max_value_millions);
        self
    }
}

#[derive(Debug, Clone)]
pub struct Shortlist {
    pub position: String,
    pub role_key: String,
    pub version: String,
    pub candidates: usize,
    pub rows: Vec<ScoredPlayer>,
}

pub fn build_shortlist(
    table: &CanonicalTable,
    spec: &WeightSpec,
    request: &ShortlistRequest,
) -> Result<Shortlist> {
    let role_key = spec
        .role_for_position(&request.position)
        .ok_or_else(|| MoneyballError::PositionNotMapped(request.position.clone()))?
        .to_string();

    let at_position = table.with_best_pos(request.position.trim());
    let scored = score_with_version(&at_position, &role_key, spec, &request.version)?;
    let candidates = scored.len();

    let mut rows = match request.max_value_millions {
        Some(max) => filter_by_budget(scored, max),
        None => scored,
    };
    rows.sort_by(rank_order);

    info!(
        position = %request.position,
        role = %role_key,
        candidates,
        kept = rows.len(),
        "built shortlist"
    );

    Ok(Shortlist {
        position: request.position.clone(),
        role_key,
        version: request.version.clone(),
        candidates,
        rows,
    })
}

fn rank_order(a: &ScoredPlayer, b: &ScoredPlayer) -> Ordering {
    match (a.score.is_nan(), b.score.is_nan()) {
        (false, true) => Ordering::Less,
        (true, false) => Ordering::Greater,
        _ => b
            .score
            .partial_cmp(&a.score)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.player.name.cmp(&b.player.name)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::player::Player;

    fn scored(name: &str, score: f64) -> ScoredPlayer {
        ScoredPlayer {
            player: Player::new(name, "ST (C)", Some("ST")),
            score_raw: score,
            score,
        }
    }

    #[test]
    fn rank_order_puts_nan_last_and_breaks_ties_by_name() {
        let mut rows = vec![
            scored("b", 50.0),
            scored("nan", f64::NAN),
            scored("a", 50.0),
            scored("top", 100.0),
        ];
        rows.sort_by(rank_order);
        let names: Vec<_> = rows.iter().map(|r| r.player.name.as_str()).collect();
        assert_eq!(names, ["top", "a", "b", "nan"]);
    }

    #[test]
    fn request_builder_defaults_to_default_version() {
        let req = ShortlistRequest::new("ST").budget(25.0);
        assert_eq!(req.version, DEFAULT_VERSION);
        assert_eq!(req.max_value_millions, Some(25.0));
    }
}
