use crate::player::Player;
use crate::scoring::ScoredPlayer;

pub trait MarketValue {
    fn min_value(&self) -> f64;
}

impl MarketValue for Player {
    fn min_value(&self) -> f64 {
        self.min_value
    }
}

impl MarketValue for ScoredPlayer {
    fn min_value(&self) -> f64 {
        self.player.min_value
    }
}

/// Keep rows whose minimum value fits a budget given in millions.
///
/// Rows with an unknown value never fit.
pub fn filter_by_budget<T: MarketValue>(rows: Vec<T>, max_millions: f64) -> Vec<T> {
    let limit = max_millions * 1_000_000.0;
    rows.into_iter()
        .filter(|row| row.min_value() <= limit)
        .collect()
}
