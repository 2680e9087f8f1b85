use std::collections::{BTreeMap, HashSet};

use rayon::prelude::*;
use tracing::{debug, info, warn};

use crate::attributes::{ATTRIBUTE_COUNT, ATTRIBUTES, Attribute, AttributeSet, feet_score};
use crate::error::{MoneyballError, Result};
use crate::player::{CanonicalTable, Player};
use crate::table::RawTable;
use crate::value::{
    leading_number, parse_age, parse_attribute, parse_expires, parse_value_range, parse_wages,
};

pub const REQUIRED_COLUMNS: [&str; 3] = ["name", "position", "best_pos"];

const MISSING_PLACEHOLDER: &str = "-";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CleanStats {
    pub rows_in: usize,
    pub empty_rows_dropped: usize,
    pub duplicate_rows_dropped: usize,
    pub players: usize,
    pub cells_imputed: usize,
    /// Attribute cells left missing because the whole `best_pos` group lacked a value.
    pub cells_unresolved: usize,
}

pub fn clean(raw: &RawTable) -> Result<CanonicalTable> {
    clean_with_stats(raw).map(|(table, _)| table)
}

pub fn clean_with_stats(raw: &RawTable) -> Result<(CanonicalTable, CleanStats)> {
    let headers = normalize_headers(raw.headers());
    let columns = Columns::resolve(&headers)?;

    let mut stats = CleanStats {
        rows_in: raw.len(),
        ..CleanStats::default()
    };
    let rows = hygiene(raw.rows(), &mut stats);

    let mut players: Vec<Player> = rows.iter().map(|row| columns.player(row)).collect();
    let (imputed, unresolved) = impute_by_best_pos(&mut players);
    stats.cells_imputed = imputed;
    stats.cells_unresolved = unresolved;
    stats.players = players.len();

    if unresolved > 0 {
        warn!(
            cells = unresolved,
            "attribute cells left missing: no observed value in their best_pos group"
        );
    }
    info!(
        rows_in = stats.rows_in,
        players = stats.players,
        empty_dropped = stats.empty_rows_dropped,
        duplicates_dropped = stats.duplicate_rows_dropped,
        imputed = stats.cells_imputed,
        "cleaned scouting table"
    );

    Ok((CanonicalTable::new(players), stats))
}

pub fn normalize_headers(headers: &[String]) -> Vec<String> {
    let normalized: Vec<String> = headers
        .iter()
        .map(|h| h.trim().to_lowercase().replace(' ', "_"))
        .collect();
    let has_nation = normalized.iter().any(|h| h == "nation");
    let has_wages = normalized.iter().any(|h| h == "wages");

    normalized
        .into_iter()
        .map(|h| match h.as_str() {
            "nat" if !has_nation => "nation".to_string(),
            "nat.1" if !has_nation => "nat".to_string(),
            "salary" if !has_wages => "wages".to_string(),
            _ => h,
        })
        .collect()
}

fn hygiene(rows: &[Vec<Option<String>>], stats: &mut CleanStats) -> Vec<Vec<Option<String>>> {
    let mut seen: HashSet<Vec<Option<String>>> = HashSet::with_capacity(rows.len());
    let mut out = Vec::with_capacity(rows.len());
    for row in rows {
        let row: Vec<Option<String>> = row
            .iter()
            .map(|cell| {
                cell.as_ref()
                    .filter(|s| s.trim() != MISSING_PLACEHOLDER && !s.trim().is_empty())
                    .cloned()
            })
            .collect();
        if row.iter().all(Option::is_none) {
            stats.empty_rows_dropped += 1;
            continue;
        }
        if !seen.insert(row.clone()) {
            stats.duplicate_rows_dropped += 1;
            continue;
        }
        out.push(row);
    }
    out
}

struct Columns {
    name: usize,
    position: usize,
    best_pos: usize,
    age: Option<usize>,
    nation: Option<usize>,
    height: Option<usize>,
    weight: Option<usize>,
    club: Option<usize>,
    division: Option<usize>,
    style: Option<usize>,
    expires: Option<usize>,
    wages: Option<usize>,
    transfer_value: Option<usize>,
    left_foot: Option<usize>,
    right_foot: Option<usize>,
    feet: Option<usize>,
    attributes: [Option<usize>; ATTRIBUTE_COUNT],
}

impl Columns {
    fn resolve(headers: &[String]) -> Result<Self> {
        let find = |name: &str| headers.iter().position(|h| h == name);

        let missing: Vec<String> = REQUIRED_COLUMNS
            .iter()
            .filter(|c| find(**c).is_none())
            .map(|c| c.to_string())
            .collect();
        let (Some(name), Some(position), Some(best_pos)) =
            (find("name"), find("position"), find("best_pos"))
        else {
            return Err(MoneyballError::SchemaMismatch(missing));
        };

        let mut attributes = [None; ATTRIBUTE_COUNT];
        for (slot, code) in attributes.iter_mut().zip(ATTRIBUTES) {
            *slot = find(code);
        }
        let absent: Vec<&str> = ATTRIBUTES
            .iter()
            .zip(&attributes)
            .filter(|(_, idx)| idx.is_none())
            .map(|(code, _)| *code)
            .collect();
        if !absent.is_empty() {
            debug!(?absent, "attribute columns absent from export");
        }

        Ok(Self {
            name,
            position,
            best_pos,
            age: find("age"),
            nation: find("nation"),
            height: find("height"),
            weight: find("weight"),
            club: find("club"),
            division: find("division"),
            style: find("style"),
            expires: find("expires"),
            wages: find("wages"),
            transfer_value: find("transfer_value"),
            left_foot: find("left_foot"),
            right_foot: find("right_foot"),
            feet: find("feet"),
            attributes,
        })
    }

    fn player(&self, row: &[Option<String>]) -> Player {
        let cell = |idx: Option<usize>| idx.and_then(|i| row.get(i)).and_then(|c| c.as_deref());
        let text = |idx: Option<usize>| cell(idx).map(|s| s.trim().to_string());

        let (min_value, max_value) = parse_value_range(cell(self.transfer_value));

        let mut attributes = AttributeSet::default();
        for (attr, idx) in Attribute::all().zip(self.attributes) {
            attributes.set(attr, parse_attribute(cell(idx)));
        }

        Player {
            name: text(Some(self.name)).unwrap_or_default(),
            position: text(Some(self.position)).unwrap_or_default(),
            best_pos: text(Some(self.best_pos)),
            age: parse_age(cell(self.age)),
            nation: text(self.nation),
            height: leading_number(cell(self.height)),
            weight: leading_number(cell(self.weight)),
            club: text(self.club),
            division: text(self.division),
            style: text(self.style),
            expires: parse_expires(cell(self.expires)),
            wages: parse_wages(cell(self.wages)),
            transfer_value: text(self.transfer_value),
            min_value,
            max_value,
            feet: self.feet(&cell),
            attributes,
        }
    }

    fn feet<'r>(&self, cell: &impl Fn(Option<usize>) -> Option<&'r str>) -> Option<u8> {
        // Already-derived tables carry `feet` instead of the two foot columns.
        if self.left_foot.is_none() && self.right_foot.is_none() {
            if let Some(idx) = self.feet {
                return leading_number(cell(Some(idx)))
                    .and_then(|v| u8::try_from(v).ok())
                    .filter(|v| *v <= 20);
            }
        }
        feet_score(cell(self.left_foot), cell(self.right_foot))
    }
}

fn impute_by_best_pos(players: &mut [Player]) -> (usize, usize) {
    let view: &[Player] = players;
    let mut groups: BTreeMap<&str, Vec<usize>> = BTreeMap::new();
    for (idx, player) in view.iter().enumerate() {
        if let Some(pos) = player.best_pos.as_deref() {
            groups.entry(pos).or_default().push(idx);
        }
    }

    let per_attribute: Vec<(Vec<(usize, f64)>, usize)> = Attribute::all()
        .collect::<Vec<_>>()
        .par_iter()
        .map(|&attr| {
            let mut fills = Vec::new();
            let mut unresolved = 0usize;
            for members in groups.values() {
                let observed: Vec<f64> = members
                    .iter()
                    .filter_map(|&i| view[i].attributes.get(attr))
                    .collect();
                let gaps = members.len() - observed.len();
                if gaps == 0 {
                    continue;
                }
                if observed.is_empty() {
                    unresolved += gaps;
                    continue;
                }
                let mean = round2(observed.iter().sum::<f64>() / observed.len() as f64);
                fills.extend(
                    members
                        .iter()
                        .filter(|&&i| view[i].attributes.get(attr).is_none())
                        .map(|&i| (i, mean)),
                );
            }
            (fills, unresolved)
        })
        .collect();

    let mut imputed = 0usize;
    let mut unresolved = 0usize;
    for (attr, (fills, missing)) in Attribute::all().zip(per_attribute) {
        imputed += fills.len();
        unresolved += missing;
        for (idx, value) in fills {
            players[idx].attributes.set(attr, Some(value));
        }
    }
    (imputed, unresolved)
}

fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}
