pub mod attributes;
pub mod cache;
pub mod cleaner;
pub mod config;
pub mod error;
pub mod export;
pub mod filter;
pub mod loader;
pub mod player;
pub mod scoring;
pub mod shortlist;
pub mod table;
pub mod value;
pub mod weights;

pub use cleaner::clean;
pub use error::{MoneyballError, Result};
pub use filter::filter_by_budget;
pub use player::{CanonicalTable, Player};
pub use scoring::{ScoredPlayer, score};
pub use shortlist::{Shortlist, ShortlistRequest, build_shortlist};
pub use table::RawTable;
pub use value::parse_value_range;
pub use weights::WeightSpec;
