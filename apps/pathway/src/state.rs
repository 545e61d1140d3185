use std::sync::Arc;

use anyhow::Result;
use chrono::Utc;
use tracing::info;

use crate::catalog::CareerCatalog;
use crate::config::Config;
use crate::errors::AppError;
use crate::matching::{CareerMatcher, KeywordMatcher, RecommendationReport};
use crate::models::AssessmentProfile;
use crate::storage::{
    AssessmentHistory, AssessmentRecord, JsonFileStore, KeyValueStore, ProgressTracker,
};

/// Shared application state handed to the calling layer.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub catalog: Arc<CareerCatalog>,
    /// Pluggable matcher. Default: KeywordMatcher with the configured policy.
    pub matcher: Arc<dyn CareerMatcher>,
    pub store: Arc<dyn KeyValueStore>,
}

impl AppState {
    /// Wires the catalog, the keyword matcher and the JSON file store from `config`.
    pub fn build(config: Config) -> Result<Self> {
        let catalog = Arc::new(config.load_catalog()?);
        let matcher: Arc<dyn CareerMatcher> = Arc::new(KeywordMatcher::new(config.match_policy()));
        let store: Arc<dyn KeyValueStore> = Arc::new(JsonFileStore::open(&config.store_path)?);
        info!(
            "Matcher '{}' ready over {} careers",
            matcher.backend(),
            catalog.len()
        );
        Ok(Self::with_parts(config, catalog, matcher, store))
    }

    pub fn with_parts(
        config: Config,
        catalog: Arc<CareerCatalog>,
        matcher: Arc<dyn CareerMatcher>,
        store: Arc<dyn KeyValueStore>,
    ) -> Self {
        Self {
            config,
            catalog,
            matcher,
            store,
        }
    }

    pub fn report(&self, profile: &AssessmentProfile) -> Result<RecommendationReport, AppError> {
        self.matcher.report(profile, &self.catalog)
    }

    /// Produces a report and appends the assessment to the history.
    pub fn assess(
        &self,
        profile: &AssessmentProfile,
    ) -> Result<(RecommendationReport, AssessmentRecord), AppError> {
        let report = self.report(profile)?;
        let record = self.history().record(profile, &report.results, Utc::now())?;
        Ok((report, record))
    }

    pub fn progress(&self) -> ProgressTracker<Arc<dyn KeyValueStore>> {
        ProgressTracker::new(Arc::clone(&self.store))
    }

    pub fn history(&self) -> AssessmentHistory<Arc<dyn KeyValueStore>> {
        AssessmentHistory::new(Arc::clone(&self.store))
    }
}
