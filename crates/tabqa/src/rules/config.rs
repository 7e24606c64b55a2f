//! Rules configuration document (YAML).

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{Result, TabqaError};

/// One declared rule: a unique human-facing name, a kind tag, and
/// kind-specific parameters kept as a raw document map. Each evaluator
/// parses the map into its own typed parameter struct.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RuleDefinition {
    /// Unique, human-facing rule name.
    pub name: String,
    /// Rule kind identifier resolved against the registry.
    #[serde(rename = "type")]
    pub kind: String,
    /// Kind-specific parameters (column, bounds, allowed values, ...).
    #[serde(flatten)]
    pub params: Map<String, Value>,
}

/// Settings consumed only by report rendering, never by evaluation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GlobalConfig {
    /// Maximum number of violating rows sampled into reports.
    #[serde(default = "default_sample_violations")]
    pub sample_violations: usize,
    /// Rule kind -> severity label for report rendering.
    #[serde(default)]
    pub severity_map: IndexMap<String, String>,
}

fn default_sample_violations() -> usize {
    5
}

impl Default for GlobalConfig {
    fn default() -> Self {
        Self {
            sample_violations: default_sample_violations(),
            severity_map: IndexMap::new(),
        }
    }
}

impl GlobalConfig {
    /// Severity label for a rule kind, defaulting to `INFO` when unmapped.
    pub fn severity_for(&self, kind: &str) -> &str {
        self.severity_map.get(kind).map(|s| s.as_str()).unwrap_or("INFO")
    }
}

/// The full rules configuration document.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RulesConfig {
    /// Rules in declaration order.
    #[serde(default)]
    pub rules: Vec<RuleDefinition>,
    /// Reporting-only settings.
    #[serde(default)]
    pub global: GlobalConfig,
}

impl RulesConfig {
    /// Load a rules configuration from a YAML file. Malformed documents
    /// are fatal here, before any evaluation begins.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| TabqaError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        let config: RulesConfig = serde_yaml::from_reader(BufReader::new(file))?;
        Ok(config)
    }
}
