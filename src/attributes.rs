use std::collections::HashMap;
use std::fmt;

use once_cell::sync::Lazy;

pub const ATTRIBUTES: [&str; 47] = [
    "acc", "aer", "agg", "agi", "ant", "bal", "bra", "cmd", "com", "cmp", "cnt", "cor", "cro",
    "dec", "det", "dri", "ecc", "fin", "fir", "fla", "fre", "han", "hea", "jum", "kic", "ldr",
    "lon", "l_th", "mar", "nat", "otb", "1v1", "pac", "pas", "pen", "pos", "pun", "ref", "tro",
    "sta", "str", "tck", "tea", "tec", "thr", "vis", "wor",
];

pub const ATTRIBUTE_COUNT: usize = ATTRIBUTES.len();

static ATTRIBUTE_INDEX: Lazy<HashMap<&'static str, usize>> =
    Lazy::new(|| ATTRIBUTES.iter().enumerate().map(|(i, code)| (*code, i)).collect());

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Attribute(usize);

impl Attribute {
    pub fn from_code(code: &str) -> Option<Self> {
        ATTRIBUTE_INDEX.get(code).copied().map(Attribute)
    }

    pub fn index(self) -> usize {
        self.0
    }

    pub fn code(self) -> &'static str {
        ATTRIBUTES[self.0]
    }

    pub fn all() -> impl Iterator<Item = Attribute> {
        (0..ATTRIBUTE_COUNT).map(Attribute)
    }
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Metric {
    Attribute(Attribute),
    Feet,
    Height,
    Weight,
    Age,
}

impl Metric {
    pub fn parse(name: &str) -> Option<Self> {
        let name = name.trim().to_lowercase();
        match name.as_str() {
            "feet" => Some(Metric::Feet),
            "height" => Some(Metric::Height),
            "weight" => Some(Metric::Weight),
            "age" => Some(Metric::Age),
            other => Attribute::from_code(other).map(Metric::Attribute),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Metric::Attribute(attr) => attr.code(),
            Metric::Feet => "feet",
            Metric::Height => "height",
            Metric::Weight => "weight",
            Metric::Age => "age",
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AttributeSet([Option<f64>; ATTRIBUTE_COUNT]);

impl Default for AttributeSet {
    fn default() -> Self {
        Self([None; ATTRIBUTE_COUNT])
    }
}

impl AttributeSet {
    pub fn get(&self, attr: Attribute) -> Option<f64> {
        self.0[attr.index()]
    }

    pub fn by_code(&self, code: &str) -> Option<f64> {
        Attribute::from_code(code).and_then(|attr| self.get(attr))
    }

    pub fn set(&mut self, attr: Attribute, value: Option<f64>) {
        self.0[attr.index()] = value;
    }

    pub fn iter(&self) -> impl Iterator<Item = (Attribute, Option<f64>)> + '_ {
        Attribute::all().map(|attr| (attr, self.get(attr)))
    }

    pub fn missing(&self) -> usize {
        self.0.iter().filter(|v| v.is_none()).count()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FootStrength {
    VeryWeak,
    Weak,
    Reasonable,
    Strong,
    FairlyStrong,
    VeryStrong,
}

impl FootStrength {
    pub fn parse(label: &str) -> Option<Self> {
        match label.trim().to_lowercase().as_str() {
            "very weak" => Some(FootStrength::VeryWeak),
            "weak" => Some(FootStrength::Weak),
            "reasonable" => Some(FootStrength::Reasonable),
            "strong" => Some(FootStrength::Strong),
            "fairly strong" => Some(FootStrength::FairlyStrong),
            "very strong" => Some(FootStrength::VeryStrong),
            _ => None,
        }
    }

    pub fn score(self) -> u8 {
        match self {
            FootStrength::VeryWeak => 0,
            FootStrength::Weak => 2,
            FootStrength::Reasonable => 4,
            FootStrength::Strong => 6,
            FootStrength::FairlyStrong => 8,
            FootStrength::VeryStrong => 10,
        }
    }
}

pub fn feet_score(left: Option<&str>, right: Option<&str>) -> Option<u8> {
    let side = |label: Option<&str>| match label {
        None => Some(FootStrength::VeryWeak),
        Some(label) => FootStrength::parse(label),
    };
    Some(side(left)?.score() + side(right)?.score())
}
