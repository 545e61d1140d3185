//! Career catalog: the fixed table of career records plus the keyword maps that
//! bias scoring toward precise matches. Immutable once built.

pub mod keywords;

use std::collections::{BTreeSet, HashSet};

use tracing::{debug, info};

use crate::errors::AppError;
use crate::models::{normalize, CareerRecord};

pub use keywords::KeywordMap;

/// The bundled catalog table.
const STANDARD_CATALOG_JSON: &str = include_str!("../../data/careers.json");

#[derive(Debug, Clone)]
pub struct CareerCatalog {
    records: Vec<CareerRecord>,
    skill_keywords: KeywordMap,
    interest_keywords: KeywordMap,
}

impl CareerCatalog {
    /// Builds the bundled catalog with the bundled keyword maps.
    pub fn standard() -> Result<Self, AppError> {
        Self::from_json(
            STANDARD_CATALOG_JSON,
            KeywordMap::skills(),
            KeywordMap::interests(),
        )
    }

    /// Builds a catalog from a JSON array of career records.
    pub fn from_json(
        json: &str,
        skill_keywords: KeywordMap,
        interest_keywords: KeywordMap,
    ) -> Result<Self, AppError> {
        let records: Vec<CareerRecord> = serde_json::from_str(json)
            .map_err(|e| AppError::Catalog(format!("Catalog JSON is malformed: {e}")))?;
        Self::from_parts(records, skill_keywords, interest_keywords)
    }

    /// Validates and assembles a catalog. Fails fast on blank or duplicate ids,
    /// blank keywords, and keywords that point at ids absent from the catalog.
    pub fn from_parts(
        records: Vec<CareerRecord>,
        skill_keywords: KeywordMap,
        interest_keywords: KeywordMap,
    ) -> Result<Self, AppError> {
        let mut ids: HashSet<&str> = HashSet::with_capacity(records.len());
        for record in &records {
            if record.id.trim().is_empty() {
                return Err(AppError::Catalog(format!(
                    "Career '{}' has a blank id",
                    record.title
                )));
            }
            if !ids.insert(record.id.as_str()) {
                return Err(AppError::Catalog(format!(
                    "Duplicate career id '{}'",
                    record.id
                )));
            }
        }

        for (kind, map) in [("skill", &skill_keywords), ("interest", &interest_keywords)] {
            for (keyword, career_ids) in map.iter() {
                if keyword.is_empty() {
                    return Err(AppError::Catalog(format!("Blank {kind} keyword")));
                }
                if let Some(missing) = career_ids.iter().find(|id| !ids.contains(id.as_str())) {
                    return Err(AppError::Catalog(format!(
                        "{kind} keyword '{keyword}' maps to unknown career id '{missing}'"
                    )));
                }
            }
        }

        info!(
            "Career catalog loaded: {} careers, {} skill keywords, {} interest keywords",
            records.len(),
            skill_keywords.len(),
            interest_keywords.len()
        );

        Ok(Self {
            records,
            skill_keywords,
            interest_keywords,
        })
    }

    /// All careers in definition order.
    pub fn all(&self) -> &[CareerRecord] {
        &self.records
    }

    pub fn by_id(&self, id: &str) -> Result<&CareerRecord, AppError> {
        self.records
            .iter()
            .find(|r| r.id == id)
            .ok_or_else(|| AppError::NotFound(format!("career '{id}'")))
    }

    /// Career ids tied to a keyword in either keyword map; empty when the keyword is unknown.
    pub fn keyword_career_ids(&self, keyword: &str) -> BTreeSet<&str> {
        let keyword = normalize(keyword);
        let mut ids = self.skill_keywords.ids_for(&keyword);
        ids.extend(self.interest_keywords.ids_for(&keyword));
        debug!("Keyword '{keyword}' resolves to {} careers", ids.len());
        ids
    }

    pub fn skill_keywords(&self) -> &KeywordMap {
        &self.skill_keywords
    }

    pub fn interest_keywords(&self) -> &KeywordMap {
        &self.interest_keywords
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
