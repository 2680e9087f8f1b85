use std::path::PathBuf;

use crate::weights::DEFAULT_VERSION;

pub const DEFAULT_WEIGHTS_PATH: &str = "data/weights.json";
pub const DEFAULT_MAX_VALUE_M: f64 = 50.0;
pub const MAX_BUDGET_M: f64 = 500.0;
pub const DEFAULT_TOP: usize = 25;

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub weights_path: PathBuf,
    pub weight_version: String,
    pub max_value_millions: f64,
    pub top: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            weights_path: PathBuf::from(DEFAULT_WEIGHTS_PATH),
            weight_version: DEFAULT_VERSION.to_string(),
            max_value_millions: DEFAULT_MAX_VALUE_M,
            top: DEFAULT_TOP,
        }
    }
}

impl AppConfig {
    pub fn load_dotenv() {
        let _ = dotenvy::from_filename(".env.local");
        let _ = dotenvy::from_filename(".env");
    }

    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let weights_path = non_empty("MONEYBALL_WEIGHTS")
            .map(PathBuf::from)
            .unwrap_or(defaults.weights_path);
        let weight_version = non_empty("MONEYBALL_WEIGHT_VERSION")
            .map(|v| v.trim().to_string())
            .unwrap_or(defaults.weight_version);
        let max_value_millions = non_empty("MONEYBALL_MAX_VALUE_M")
            .and_then(|v| v.trim().parse::<f64>().ok())
            .filter(|v| v.is_finite())
            .unwrap_or(defaults.max_value_millions)
            .clamp(0.0, MAX_BUDGET_M);
        let top = non_empty("MONEYBALL_TOP")
            .and_then(|v| v.trim().parse::<usize>().ok())
            .unwrap_or(defaults.top)
            .max(1);

        Self {
            weights_path,
            weight_version,
            max_value_millions,
            top,
        }
    }
}
