//! Analysis configuration
//!
//! Every section has defaults, so a YAML file only needs the values it changes:
//!
//! ```yaml
//! network:
//!   order: minimum
//!   measure: betweenness
//! pathway:
//!   max_distance: 0.5
//! ```

use crate::analysis::{CentralityMeasure, DistanceMethod, Order};
use crate::error::{AnalysisError, AnalysisResult};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Thresholds used to derive a gene's direction from its DE statistics
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExpressionConfig {
    /// Minimum |log2 fold change|
    pub fold_change_threshold: f64,
    /// Maximum p-value
    pub p_value_threshold: f64,
    /// Compare the adjusted rather than the raw p-value
    pub use_adjusted: bool,
}

impl Default for ExpressionConfig {
    fn default() -> Self {
        Self {
            fold_change_threshold: 1.0,
            p_value_threshold: 0.05,
            use_adjusted: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NetworkConfig {
    pub order: Order,
    pub measure: CentralityMeasure,
    /// Percentile (0, 1) a node's score must exceed within its component to be a hub
    pub hub_percentile: f64,
    /// Keep seeds without any surviving edge as isolated nodes
    pub keep_isolated_seeds: bool,
    /// Drop interactions whose confidence is below this value
    pub min_confidence: Option<f64>,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            order: Order::First,
            measure: CentralityMeasure::Degree,
            hub_percentile: 0.9,
            keep_isolated_seeds: false,
            min_confidence: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PathwayConfig {
    pub method: DistanceMethod,
    pub max_distance: f64,
    pub min_size: usize,
    pub max_size: Option<usize>,
    pub trim: bool,
}

impl Default for PathwayConfig {
    fn default() -> Self {
        Self {
            method: DistanceMethod::Jaccard,
            max_distance: 0.7,
            min_size: 1,
            max_size: None,
            trim: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    pub trim: bool,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self { trim: true }
    }
}

/// Top-level configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    pub expression: ExpressionConfig,
    pub network: NetworkConfig,
    pub pathway: PathwayConfig,
    pub extraction: ExtractionConfig,
}

impl AnalysisConfig {
    pub fn from_yaml_str(yaml: &str) -> AnalysisResult<Self> {
        let config: AnalysisConfig = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: impl AsRef<Path>) -> AnalysisResult<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&text)
    }

    pub fn to_yaml(&self) -> AnalysisResult<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Range checks serde cannot express
    pub fn validate(&self) -> AnalysisResult<()> {
        let p = self.network.hub_percentile;
        if !(p > 0.0 && p < 1.0) {
            return Err(AnalysisError::invalid_config("network.hub_percentile", p));
        }
        let d = self.pathway.max_distance;
        if !(0.0..=1.0).contains(&d) {
            return Err(AnalysisError::invalid_config("pathway.max_distance", d));
        }
        if let Some(max) = self.pathway.max_size {
            if max < self.pathway.min_size {
                return Err(AnalysisError::invalid_config("pathway.max_size", max));
            }
        }
        let alpha = self.expression.p_value_threshold;
        if !(0.0..=1.0).contains(&alpha) {
            return Err(AnalysisError::invalid_config("expression.p_value_threshold", alpha));
        }
        if self.expression.fold_change_threshold < 0.0 {
            return Err(AnalysisError::invalid_config(
                "expression.fold_change_threshold",
                self.expression.fold_change_threshold,
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_validate() {
        let config = AnalysisConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.network.order, Order::First);
        assert_eq!(config.pathway.method, DistanceMethod::Jaccard);
    }

    #[test]
    fn test_partial_yaml() {
        let config = AnalysisConfig::from_yaml_str(
            "network:\n  order: minimum\n  measure: betweenness\npathway:\n  max_distance: 0.4\n",
        )
        .unwrap();
        assert_eq!(config.network.order, Order::Minimum);
        assert_eq!(config.network.measure, CentralityMeasure::Betweenness);
        assert_eq!(config.network.hub_percentile, 0.9);
        assert_eq!(config.pathway.max_distance, 0.4);
        assert!(config.extraction.trim);
    }

    #[test]
    fn test_unknown_order_rejected() {
        let err = AnalysisConfig::from_yaml_str("network:\n  order: second\n").unwrap_err();
        assert!(matches!(err, AnalysisError::Config(_)));
    }

    #[test]
    fn test_out_of_range_rejected() {
        let err = AnalysisConfig::from_yaml_str("pathway:\n  max_distance: 1.5\n").unwrap_err();
        assert!(matches!(err, AnalysisError::InvalidConfiguration { .. }));

        let err = AnalysisConfig::from_yaml_str("network:\n  hub_percentile: 1.0\n").unwrap_err();
        assert!(matches!(err, AnalysisError::InvalidConfiguration { .. }));
    }

    #[test]
    fn test_yaml_round_trip() {
        let config = AnalysisConfig::default();
        let text = config.to_yaml().unwrap();
        assert_eq!(AnalysisConfig::from_yaml_str(&text).unwrap(), config);
    }
}
