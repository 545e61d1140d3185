use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use tracing::info;

use crate::catalog::{CareerCatalog, KeywordMap};
use crate::matching::{BaselineTable, MatchPolicy};

/// Application configuration loaded from environment variables.
/// Every variable is optional; defaults reproduce the canonical matcher.
#[derive(Debug, Clone)]
pub struct Config {
    pub min_match: u8,
    pub max_results: usize,
    pub baseline: BaselineTable,
    /// Replaces the bundled catalog when set.
    pub catalog_path: Option<PathBuf>,
    pub store_path: PathBuf,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a config from any key lookup. `from_env` passes the process env.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = MatchPolicy::default();

        let min_match = match lookup("PATHWAY_MIN_MATCH") {
            Some(raw) => raw
                .trim()
                .parse::<u8>()
                .context("PATHWAY_MIN_MATCH must be an integer between 0 and 255")?,
            None => defaults.min_match,
        };
        if min_match > 100 {
            bail!("PATHWAY_MIN_MATCH must be at most 100, got {min_match}");
        }

        let max_results = match lookup("PATHWAY_MAX_RESULTS") {
            Some(raw) => raw
                .trim()
                .parse::<usize>()
                .context("PATHWAY_MAX_RESULTS must be a non-negative integer")?,
            None => defaults.max_results,
        };

        let baseline = match lookup("PATHWAY_BASELINE") {
            Some(raw) => parse_baseline(&raw)?,
            None => defaults.baseline,
        };

        Ok(Config {
            min_match,
            max_results,
            baseline,
            catalog_path: lookup("PATHWAY_CATALOG_PATH")
                .filter(|p| !p.trim().is_empty())
                .map(PathBuf::from),
            store_path: lookup("PATHWAY_STORE_PATH")
                .filter(|p| !p.trim().is_empty())
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("pathway-store.json")),
            rust_log: lookup("RUST_LOG").unwrap_or_else(|| "info".to_string()),
        })
    }

    pub fn match_policy(&self) -> MatchPolicy {
        MatchPolicy {
            min_match: self.min_match,
            max_results: self.max_results,
            baseline: self.baseline,
            ..MatchPolicy::default()
        }
    }

    /// Loads the configured catalog file, or the bundled catalog when none is set.
    pub fn load_catalog(&self) -> Result<CareerCatalog> {
        match &self.catalog_path {
            Some(path) => {
                let json = std::fs::read_to_string(path)
                    .with_context(|| format!("Failed to read catalog file {}", path.display()))?;
                let catalog =
                    CareerCatalog::from_json(&json, KeywordMap::skills(), KeywordMap::interests())
                        .with_context(|| format!("Invalid catalog file {}", path.display()))?;
                info!("Loaded catalog from {}", path.display());
                Ok(catalog)
            }
            None => CareerCatalog::standard().context("Bundled catalog is invalid"),
        }
    }
}

fn parse_baseline(raw: &str) -> Result<BaselineTable> {
    match raw.trim().to_lowercase().as_str() {
        "standard" => Ok(BaselineTable::Standard),
        "alternate" => Ok(BaselineTable::Alternate),
        other => bail!("PATHWAY_BASELINE must be 'standard' or 'alternate', got '{other}'"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> Result<Config> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults_match_canonical_policy() {
        let config = config_from(&[]).unwrap();
        assert_eq!(config.match_policy(), MatchPolicy::default());
        assert_eq!(config.store_path, PathBuf::from("pathway-store.json"));
        assert_eq!(config.catalog_path, None);
        assert_eq!(config.rust_log, "info");
    }

    #[test]
    fn test_overrides_flow_into_policy() {
        let config = config_from(&[
            ("PATHWAY_MIN_MATCH", "45"),
            ("PATHWAY_MAX_RESULTS", "3"),
            ("PATHWAY_BASELINE", "Alternate"),
        ])
        .unwrap();
        let policy = config.match_policy();
        assert_eq!(policy.min_match, 45);
        assert_eq!(policy.max_results, 3);
        assert_eq!(policy.baseline, BaselineTable::Alternate);
        assert_eq!(policy.weights, MatchPolicy::default().weights);
    }

    #[test]
    fn test_invalid_values_are_rejected() {
        assert!(config_from(&[("PATHWAY_MIN_MATCH", "thirty")]).is_err());
        assert!(config_from(&[("PATHWAY_MIN_MATCH", "101")]).is_err());
        assert!(config_from(&[("PATHWAY_MAX_RESULTS", "-1")]).is_err());
        assert!(config_from(&[("PATHWAY_BASELINE", "generous")]).is_err());
    }

    #[test]
    fn test_blank_catalog_path_means_bundled() {
        let config = config_from(&[("PATHWAY_CATALOG_PATH", "  ")]).unwrap();
        assert_eq!(config.catalog_path, None);
        assert_eq!(config.load_catalog().unwrap().len(), 13);
    }

    #[test]
    fn test_catalog_file_is_loaded() {
        let bundled = CareerCatalog::standard().unwrap();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("careers.json");
        std::fs::write(&path, serde_json::to_string(bundled.all()).unwrap()).unwrap();

        let config =
            config_from(&[("PATHWAY_CATALOG_PATH", path.to_str().unwrap())]).unwrap();
        let loaded = config.load_catalog().unwrap();
        assert_eq!(loaded.all(), bundled.all());
    }

    #[test]
    fn test_catalog_file_must_cover_keyword_targets() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("careers.json");
        std::fs::write(&path, "[]").unwrap();
        let config =
            config_from(&[("PATHWAY_CATALOG_PATH", path.to_str().unwrap())]).unwrap();
        assert!(config.load_catalog().is_err());
    }

    #[test]
    fn test_missing_catalog_file_is_an_error() {
        let config =
            config_from(&[("PATHWAY_CATALOG_PATH", "/definitely/not/here.json")]).unwrap();
        assert!(config.load_catalog().is_err());
    }
}
