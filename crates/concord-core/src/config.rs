//! Rubric configuration for concord
//!
//! Configuration is stored in `rubric.toml` at the store root. The rubric
//! shape drives both score validation and the agreement-percentage scale
//! used by the reliability analyzer.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{ConcordError, Result};

/// Name of the rubric configuration file inside a store
pub const RUBRIC_FILE: &str = "rubric.toml";

/// Current rubric configuration format version
pub const RUBRIC_FORMAT_VERSION: u32 = 1;

/// Classification thresholds on the agreement percentage
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReliabilityThresholds {
    /// Agreement percentage at or above which a note is classified high
    pub high: f64,
    /// Agreement percentage at or above which a note is classified medium
    pub medium: f64,
}

impl Default for ReliabilityThresholds {
    fn default() -> Self {
        Self {
            high: 80.0,
            medium: 60.0,
        }
    }
}

/// Rubric configuration: the declared scoring domains and the constants
/// derived from them
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RubricConfig {
    /// Configuration format version
    pub version: u32,

    /// Scored domains: domain name to maximum point value
    pub domains: BTreeMap<String, f64>,

    /// Worst-case score variance for this rubric shape. When unset it is
    /// derived from the declared domains.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_possible_variance: Option<f64>,

    /// Reliability classification thresholds
    #[serde(default)]
    pub thresholds: ReliabilityThresholds,
}

impl Default for RubricConfig {
    fn default() -> Self {
        let mut domains = BTreeMap::new();
        for name in [
            "indication",
            "technique",
            "findings",
            "complications",
            "disposition",
        ] {
            domains.insert(name.to_string(), 5.0);
        }
        Self {
            version: RUBRIC_FORMAT_VERSION,
            domains,
            max_possible_variance: None,
            thresholds: ReliabilityThresholds::default(),
        }
    }
}

impl RubricConfig {
    /// Maximum achievable total score under this rubric
    pub fn max_total_score(&self) -> f64 {
        self.domains.values().sum()
    }

    /// Worst-case variance for the scoring scale.
    ///
    /// Explicit configuration wins; otherwise the maximum achievable total
    /// score is used (for the default rubric of five 5-point domains this
    /// yields 25, the scale agreement percentages are normalized against).
    pub fn max_possible_variance(&self) -> f64 {
        self.max_possible_variance
            .unwrap_or_else(|| self.max_total_score())
    }

    /// Maximum point value for a domain, if declared
    pub fn domain_max(&self, domain: &str) -> Option<f64> {
        self.domains.get(domain).copied()
    }

    /// Comma-separated list of declared domain names, for error messages
    pub fn declared_domains(&self) -> String {
        self.domains
            .keys()
            .cloned()
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let config: RubricConfig = toml::from_str(&content)?;

        if config.domains.is_empty() {
            return Err(ConcordError::InvalidStore {
                reason: format!("{} declares no rubric domains", path.display()),
            });
        }

        Ok(config)
    }

    /// Save configuration to a file
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| ConcordError::Other(format!("failed to serialize rubric: {}", e)))?;
        fs::write(path, content)?;
        Ok(())
    }
}
