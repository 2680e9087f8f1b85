use chrono::NaiveDate;

use crate::attributes::{ATTRIBUTES, AttributeSet, Metric};
use crate::table::RawTable;
use crate::value::EXPIRES_FORMAT;

pub const CANONICAL_COLUMNS: [&str; 16] = [
    "name",
    "position",
    "best_pos",
    "age",
    "nation",
    "height",
    "weight",
    "club",
    "transfer_value",
    "min_value",
    "max_value",
    "wages",
    "expires",
    "division",
    "style",
    "feet",
];

#[derive(Debug, Clone, PartialEq)]
pub struct Player {
    pub name: String,
    /// Raw multi-role label, e.g. `D (RC), DM`.
    pub position: String,
    pub best_pos: Option<String>,
    pub age: Option<u32>,
    pub nation: Option<String>,
    pub height: Option<u32>,
    pub weight: Option<u32>,
    pub club: Option<String>,
    pub division: Option<String>,
    pub style: Option<String>,
    pub expires: Option<NaiveDate>,
    pub wages: Option<f64>,
    pub transfer_value: Option<String>,
    /// NaN when the value is unknown.
    pub min_value: f64,
    pub max_value: f64,
    pub feet: Option<u8>,
    pub attributes: AttributeSet,
}

impl Player {
    pub fn new(name: &str, position: &str, best_pos: Option<&str>) -> Self {
        Self {
            name: name.to_string(),
            position: position.to_string(),
            best_pos: best_pos.map(str::to_string),
            age: None,
            nation: None,
            height: None,
            weight: None,
            club: None,
            division: None,
            style: None,
            expires: None,
            wages: None,
            transfer_value: None,
            min_value: f64::NAN,
            max_value: f64::NAN,
            feet: None,
            attributes: AttributeSet::default(),
        }
    }

    pub fn metric(&self, metric: Metric) -> Option<f64> {
        match metric {
            Metric::Attribute(attr) => self.attributes.get(attr),
            Metric::Feet => self.feet.map(f64::from),
            Metric::Height => self.height.map(f64::from),
            Metric::Weight => self.weight.map(f64::from),
            Metric::Age => self.age.map(f64::from),
        }
    }

    pub fn is_best_at(&self, label: &str) -> bool {
        self.best_pos.as_deref() == Some(label)
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct CanonicalTable {
    pub players: Vec<Player>,
}

impl CanonicalTable {
    pub fn new(players: Vec<Player>) -> Self {
        Self { players }
    }

    pub fn len(&self) -> usize {
        self.players.len()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Player> {
        self.players.iter()
    }

    pub fn with_best_pos(&self, label: &str) -> CanonicalTable {
        CanonicalTable::new(
            self.players
                .iter()
                .filter(|p| p.is_best_at(label))
                .cloned()
                .collect(),
        )
    }

    pub fn to_raw(&self) -> RawTable {
        let mut headers: Vec<String> = [
            "Name",
            "Position",
            "Best Pos",
            "Age",
            "Nat",
            "Height",
            "Weight",
            "Club",
            "Transfer Value",
            "Wages",
            "Expires",
            "Division",
            "Style",
            "Feet",
        ]
        .iter()
        .map(|h| h.to_string())
        .collect();
        headers.extend(ATTRIBUTES.iter().map(|code| display_header(code)));

        let rows = self
            .players
            .iter()
            .map(|p| {
                let mut row = vec![
                    Some(p.name.clone()),
                    Some(p.position.clone()),
                    p.best_pos.clone(),
                    p.age.map(|v| v.to_string()),
                    p.nation.clone(),
                    p.height.map(|v| v.to_string()),
                    p.weight.map(|v| v.to_string()),
                    p.club.clone(),
                    p.transfer_value.clone(),
                    p.wages.map(|v| v.to_string()),
                    p.expires.map(|d| d.format(EXPIRES_FORMAT).to_string()),
                    p.division.clone(),
                    p.style.clone(),
                    p.feet.map(|v| v.to_string()),
                ];
                row.extend(p.attributes.iter().map(|(_, v)| v.map(|v| v.to_string())));
                row.into_iter()
                    .map(|cell| cell.filter(|s| !s.trim().is_empty()))
                    .collect()
            })
            .collect();

        RawTable::new(headers, rows)
    }
}

impl<'a> IntoIterator for &'a CanonicalTable {
    type Item = &'a Player;
    type IntoIter = std::slice::Iter<'a, Player>;

    fn into_iter(self) -> Self::IntoIter {
        self.players.iter()
    }
}

fn display_header(code: &str) -> String {
    code.split('_')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
