use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::Path;

use serde::Deserialize;
use tracing::debug;

use crate::attributes::Metric;
use crate::error::{MoneyballError, Result};

pub const DEFAULT_VERSION: &str = "Default";

/// Weight document as written on disk:
///
/// ```json
/// {
///   "ST": {
///     "Default": { "fin": 1.5, "otb": 1.2, "agg": -0.2 },
///     "Positions": ["ST (C)", "ST"]
///   }
/// }
/// ```
pub type WeightDocument = BTreeMap<String, RoleDocument>;

#[derive(Debug, Clone, Deserialize)]
pub struct RoleDocument {
    #[serde(rename = "Positions", default)]
    pub positions: Vec<String>,
    #[serde(flatten)]
    pub versions: BTreeMap<String, BTreeMap<String, f64>>,
}

/// Linear coefficients of one weight version, keyed by metric.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Weights {
    entries: BTreeMap<Metric, f64>,
}

impl Weights {
    pub fn get(&self, metric: Metric) -> Option<f64> {
        self.entries.get(&metric).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Metric, f64)> + '_ {
        self.entries.iter().map(|(m, w)| (*m, *w))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RoleWeights {
    pub key: String,
    /// Raw position labels that resolve to this role.
    pub positions: Vec<String>,
    versions: BTreeMap<String, Weights>,
}

impl RoleWeights {
    pub fn version(&self, name: &str) -> Option<&Weights> {
        self.versions.get(name)
    }

    pub fn version_names(&self) -> impl Iterator<Item = &str> {
        self.versions.keys().map(String::as_str)
    }
}

/// Validated role weights: every metric name is known and every position label
/// belongs to exactly one role.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WeightSpec {
    roles: BTreeMap<String, RoleWeights>,
    by_position: HashMap<String, String>,
}

impl WeightSpec {
    pub fn load(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)?;
        let spec = Self::from_json_str(&raw)?;
        debug!(
            path = %path.display(),
            roles = spec.roles.len(),
            "loaded weight spec"
        );
        Ok(spec)
    }

    pub fn from_json_str(raw: &str) -> Result<Self> {
        let doc: WeightDocument = serde_json::from_str(raw)?;
        Self::from_document(doc)
    }

    pub fn from_value(value: serde_json::Value) -> Result<Self> {
        let doc: WeightDocument = serde_json::from_value(value)?;
        Self::from_document(doc)
    }

    /// Validate a parsed document. All problems are reported together.
    pub fn from_document(doc: WeightDocument) -> Result<Self> {
        let mut errors = Vec::new();
        let mut roles = BTreeMap::new();
        let mut by_position: HashMap<String, String> = HashMap::new();

        for (key, role_doc) in doc {
            if role_doc.versions.is_empty() {
                errors.push(format!("{key}: no weight versions"));
            }
            if role_doc.positions.is_empty() {
                errors.push(format!("{key}.Positions: no position labels"));
            }

            let mut versions = BTreeMap::new();
            for (version, raw_weights) in role_doc.versions {
                let mut entries = BTreeMap::new();
                for (name, weight) in raw_weights {
                    let Some(metric) = Metric::parse(&name) else {
                        errors.push(format!("{key}.{version}.{name}: unknown attribute"));
                        continue;
                    };
                    if !weight.is_finite() {
                        errors.push(format!("{key}.{version}.{name}: weight must be finite"));
                        continue;
                    }
                    if entries.insert(metric, weight).is_some() {
                        errors.push(format!(
                            "{key}.{version}.{name}: duplicate weight for {metric}"
                        ));
                    }
                }
                versions.insert(version, Weights { entries });
            }

            for label in &role_doc.positions {
                let label = label.trim().to_string();
                match by_position.get(&label) {
                    Some(owner) if owner != &key => errors.push(format!(
                        "{key}.Positions: '{label}' is already mapped to role {owner}"
                    )),
                    Some(_) => {}
                    None => {
                        by_position.insert(label, key.clone());
                    }
                }
            }

            roles.insert(
                key.clone(),
                RoleWeights {
                    key,
                    positions: role_doc.positions.iter().map(|p| p.trim().to_string()).collect(),
                    versions,
                },
            );
        }

        if !errors.is_empty() {
            return Err(MoneyballError::InvalidWeightSpec(errors));
        }
        Ok(Self { roles, by_position })
    }

    pub fn role(&self, key: &str) -> Result<&RoleWeights> {
        self.roles
            .get(key)
            .ok_or_else(|| MoneyballError::RoleNotFound(key.to_string()))
    }

    /// Weights for `(role, version)`.
    pub fn weights(&self, role: &str, version: &str) -> Result<&Weights> {
        self.role(role)?
            .version(version)
            .ok_or_else(|| MoneyballError::WeightVersionNotFound {
                role: role.to_string(),
                version: version.to_string(),
            })
    }

    /// Role key whose position list contains `label`.
    pub fn role_for_position(&self, label: &str) -> Option<&str> {
        self.by_position.get(label.trim()).map(String::as_str)
    }

    /// Every position label, grouped by role key in key order.
    pub fn positions(&self) -> Vec<&str> {
        self.roles
            .values()
            .flat_map(|role| role.positions.iter().map(String::as_str))
            .collect()
    }

    pub fn role_keys(&self) -> impl Iterator<Item = &str> {
        self.roles.keys().map(String::as_str)
    }

    pub fn roles(&self) -> impl Iterator<Item = &RoleWeights> {
        self.roles.values()
    }
}
