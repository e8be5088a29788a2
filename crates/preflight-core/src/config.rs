use crate::error::{PreflightError, Result};
use crate::paths;
use crate::types::Severity;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

// ---------------------------------------------------------------------------
// ConfigWarning / WarnLevel
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigWarning {
    pub level: WarnLevel,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WarnLevel {
    Warning,
    Error,
}

// ---------------------------------------------------------------------------
// ChecksConfig
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChecksConfig {
    /// Check ids to skip entirely.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub disabled: Vec<String>,
    /// Per-check severity overrides (check id → severity).
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub severity: HashMap<String, Severity>,
}

impl ChecksConfig {
    pub fn is_disabled(&self, id: &str) -> bool {
        self.disabled.iter().any(|d| d == id)
    }

    pub fn severity_for(&self, id: &str, default: Severity) -> Severity {
        self.severity.get(id).copied().unwrap_or(default)
    }

    fn is_empty(&self) -> bool {
        self.disabled.is_empty() && self.severity.is_empty()
    }
}

// ---------------------------------------------------------------------------
// ProjectConfig
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectConfig {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}

// ---------------------------------------------------------------------------
// Config (top-level)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_version")]
    pub version: u32,
    pub project: ProjectConfig,
    /// Lowest accepted <apiVersion> in metadata descriptors.
    #[serde(default = "default_api_version_floor")]
    pub api_version_floor: f64,
    /// Minimum ratio of test classes to non-test classes.
    #[serde(default = "default_min_test_ratio")]
    pub min_test_ratio: f64,
    #[serde(default = "default_source_dir")]
    pub source_dir: String,
    #[serde(default = "default_manifest")]
    pub manifest: String,
    #[serde(default, skip_serializing_if = "ChecksConfig::is_empty")]
    pub checks: ChecksConfig,
}

fn default_version() -> u32 {
    1
}

fn default_api_version_floor() -> f64 {
    52.0
}

fn default_min_test_ratio() -> f64 {
    0.5
}

fn default_source_dir() -> String {
    paths::DEFAULT_SOURCE_DIR.to_string()
}

fn default_manifest() -> String {
    paths::DEFAULT_MANIFEST.to_string()
}

impl Config {
    pub fn new(project_name: impl Into<String>) -> Self {
        Self {
            version: 1,
            project: ProjectConfig {
                name: project_name.into(),
                description: None,
            },
            api_version_floor: default_api_version_floor(),
            min_test_ratio: default_min_test_ratio(),
            source_dir: default_source_dir(),
            manifest: default_manifest(),
            checks: ChecksConfig::default(),
        }
    }

    pub fn load(root: &Path) -> Result<Self> {
        let path = paths::config_path(root);
        if !path.exists() {
            return Err(PreflightError::NotInitialized);
        }
        let data = std::fs::read_to_string(&path)?;
        let cfg: Config = serde_yaml::from_str(&data)?;
        Ok(cfg)
    }

    /// Like `load`, but a missing config file yields the defaults so
    /// `preflight check` works in an unscaffolded checkout.
    pub fn load_or_default(root: &Path) -> Result<Self> {
        match Self::load(root) {
            Ok(cfg) => Ok(cfg),
            Err(PreflightError::NotInitialized) => {
                let name = root
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_else(|| "project".to_string());
                Ok(Config::new(name))
            }
            Err(e) => Err(e),
        }
    }

    pub fn save(&self, root: &Path) -> Result<()> {
        let path = paths::config_path(root);
        let data = serde_yaml::to_string(self)?;
        crate::io::atomic_write(&path, data.as_bytes())
    }

    // -----------------------------------------------------------------------
    // Validation
    // -----------------------------------------------------------------------

    pub fn validate(&self) -> Vec<ConfigWarning> {
        let mut warnings = Vec::new();

        // 1. Check ids referenced in checks.disabled must exist
        for id in &self.checks.disabled {
            if !crate::checks::is_valid_id(id) {
                warnings.push(ConfigWarning {
                    level: WarnLevel::Warning,
                    message: format!("unknown check '{id}' in checks.disabled"),
                });
            }
        }

        // 2. Check ids referenced in checks.severity must exist
        for id in self.checks.severity.keys() {
            if !crate::checks::is_valid_id(id) {
                warnings.push(ConfigWarning {
                    level: WarnLevel::Warning,
                    message: format!("unknown check '{id}' in checks.severity"),
                });
            }
        }

        // 3. API version floor sanity (Salesforce floors below 20 predate the
        //    metadata API shapes this tool understands)
        if self.api_version_floor < 20.0 || self.api_version_floor > 100.0 {
            warnings.push(ConfigWarning {
                level: WarnLevel::Warning,
                message: format!(
                    "api_version_floor={} is outside the plausible range 20.0-100.0",
                    self.api_version_floor
                ),
            });
        }

        // 4. Test ratio must be a ratio
        if !(0.0..=1.0).contains(&self.min_test_ratio) {
            warnings.push(ConfigWarning {
                level: WarnLevel::Warning,
                message: format!(
                    "min_test_ratio={} is not between 0.0 and 1.0",
                    self.min_test_ratio
                ),
            });
        }

        // 5. Empty paths cannot be scanned
        if self.source_dir.trim().is_empty() {
            warnings.push(ConfigWarning {
                level: WarnLevel::Error,
                message: "source_dir is empty".to_string(),
            });
        }
        if self.manifest.trim().is_empty() {
            warnings.push(ConfigWarning {
                level: WarnLevel::Error,
                message: "manifest path is empty".to_string(),
            });
        }

        warnings
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
