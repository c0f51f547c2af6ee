//! Engine configuration - search depth and heuristic weights

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::ai::{MoveBonuses, DEFAULT_DEPTH};
use crate::eval::Heuristics;

/// Tunable AI settings, loadable from JSON. Missing fields take defaults.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Plies searched below each root move
    pub depth: u32,
    pub heuristics: Heuristics,
    pub bonuses: MoveBonuses,
    /// Fixed tie-break seed; entropy when absent
    pub seed: Option<u64>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            depth: DEFAULT_DEPTH,
            heuristics: Heuristics::default(),
            bonuses: MoveBonuses::default(),
            seed: None,
        }
    }
}

impl EngineConfig {
    /// Load from JSON file
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: EngineConfig = serde_json::from_str(&content)?;
        if config.depth == 0 {
            anyhow::bail!("search depth must be at least 1");
        }
        Ok(config)
    }

    /// Save to JSON file
    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = EngineConfig::default();
        assert_eq!(config.depth, 4);
        assert_eq!(config.bonuses.promotion, 10.0);
        assert_eq!(config.bonuses.exposure_penalty, 5.0);
        assert_eq!(config.heuristics.advancement_weight, 0.8);
        assert!(config.seed.is_none());
    }

    #[test]
    fn test_partial_json() {
        let config: EngineConfig =
            serde_json::from_str(r#"{"depth": 6, "bonuses": {"promotion": 3.0}}"#).unwrap();
        assert_eq!(config.depth, 6);
        assert_eq!(config.bonuses.promotion, 3.0);
        assert_eq!(config.bonuses.exposure_penalty, 5.0);
        assert_eq!(config.heuristics, Heuristics::default());
    }

    #[test]
    fn test_save_and_load() {
        let path = std::env::temp_dir().join(format!("checkers-engine-{}.json", std::process::id()));
        let config = EngineConfig {
            depth: 5,
            seed: Some(17),
            ..EngineConfig::default()
        };
        config.save(&path).unwrap();
        let loaded = EngineConfig::load(&path).unwrap();
        std::fs::remove_file(&path).ok();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_zero_depth_rejected() {
        let path = std::env::temp_dir().join(format!("checkers-zero-{}.json", std::process::id()));
        std::fs::write(&path, r#"{"depth": 0}"#).unwrap();
        let result = EngineConfig::load(&path);
        std::fs::remove_file(&path).ok();
        assert!(result.is_err());
    }
}
