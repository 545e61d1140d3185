use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::{AssessmentProfile, ScoredCareer};
use crate::storage::KeyValueStore;

pub const HISTORY_KEY: &str = "career_app_history";
/// Receives an unreadable history blob before `record` replaces it.
pub const HISTORY_BACKUP_KEY: &str = "career_app_history_corrupt";
pub const MAX_HISTORY: usize = 20;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordedMatch {
    pub career_id: String,
    pub title: String,
    pub match_percentage: u8,
}

/// One completed assessment with the results it produced at the time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssessmentRecord {
    pub id: Uuid,
    pub taken_at: DateTime<Utc>,
    pub profile: AssessmentProfile,
    pub results: Vec<RecordedMatch>,
}

impl AssessmentRecord {
    pub fn top_match(&self) -> Option<&RecordedMatch> {
        self.results.first()
    }
}

enum Stored {
    Records(Vec<AssessmentRecord>),
    Unreadable(String),
}

/// Past assessments, newest first, capped at [`MAX_HISTORY`] entries.
pub struct AssessmentHistory<S: KeyValueStore> {
    store: S,
}

impl<S: KeyValueStore> AssessmentHistory<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn record(
        &self,
        profile: &AssessmentProfile,
        results: &[ScoredCareer],
        now: DateTime<Utc>,
    ) -> Result<AssessmentRecord, AppError> {
        let record = AssessmentRecord {
            id: Uuid::new_v4(),
            taken_at: now,
            profile: profile.clone(),
            results: results
                .iter()
                .map(|r| RecordedMatch {
                    career_id: r.career.id.clone(),
                    title: r.career.title.clone(),
                    match_percentage: r.match_percentage,
                })
                .collect(),
        };

        let mut records = match self.load()? {
            Stored::Records(records) => records,
            Stored::Unreadable(raw) => {
                warn!("Backing up unreadable assessment history to {HISTORY_BACKUP_KEY}");
                self.store.set(HISTORY_BACKUP_KEY, raw)?;
                Vec::new()
            }
        };
        records.insert(0, record.clone());
        records.truncate(MAX_HISTORY);
        self.store.set(HISTORY_KEY, serde_json::to_string(&records)?)?;

        info!(
            "Recorded assessment {} ({} results, {} kept)",
            record.id,
            record.results.len(),
            records.len()
        );
        Ok(record)
    }

    pub fn list(&self) -> Result<Vec<AssessmentRecord>, AppError> {
        match self.load()? {
            Stored::Records(records) => Ok(records),
            Stored::Unreadable(_) => Ok(Vec::new()),
        }
    }

    fn load(&self) -> Result<Stored, AppError> {
        let Some(raw) = self.store.get(HISTORY_KEY)? else {
            return Ok(Stored::Records(Vec::new()));
        };
        match serde_json::from_str(&raw) {
            Ok(records) => Ok(Stored::Records(records)),
            Err(e) => {
                warn!("Stored assessment history is unreadable, ignoring it: {e}");
                Ok(Stored::Unreadable(raw))
            }
        }
    }

    pub fn latest(&self) -> Result<Option<AssessmentRecord>, AppError> {
        Ok(self.list()?.into_iter().next())
    }

    pub fn get(&self, id: Uuid) -> Result<AssessmentRecord, AppError> {
        self.list()?
            .into_iter()
            .find(|r| r.id == id)
            .ok_or_else(|| AppError::NotFound(format!("Assessment {id} not found")))
    }

    pub fn clear(&self) -> Result<(), AppError> {
        self.store.remove(HISTORY_KEY)
    }
}
