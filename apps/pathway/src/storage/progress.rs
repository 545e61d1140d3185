use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::errors::AppError;
use crate::models::CareerRecord;
use crate::storage::KeyValueStore;

pub const PROGRESS_KEY: &str = "career_app_progress";
pub const DOMAIN_LOCK_KEY: &str = "career_app_domain_lock";

/// Streak lengths (in days) shown as milestones.
pub const STREAK_MILESTONES: [u32; 4] = [7, 14, 30, 100];

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserProgress {
    pub selected_domain: Option<String>,
    pub completed_steps: Vec<String>,
    pub current_step: Option<String>,
    pub progress_percentage: u8,
    pub last_activity: Option<DateTime<Utc>>,
    pub streak: u32,
    pub streak_start_date: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProgressSummary {
    pub completed: usize,
    pub remaining: usize,
    pub percentage: u8,
    pub streak: u32,
    pub encouragement: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StreakStatus {
    pub streak: u32,
    pub message: String,
    pub milestones_reached: Vec<u32>,
}

// ────────────────────────────────────────────────────────────────────────────
// Pure helpers
// ────────────────────────────────────────────────────────────────────────────

/// Rounded completion percentage. Zero total steps yields 0.
pub fn completion_percentage(completed: usize, total: usize) -> u8 {
    if total == 0 {
        return 0;
    }
    let pct = (completed as f64 / total as f64 * 100.0).round();
    pct.clamp(0.0, 100.0) as u8
}

pub fn encouragement(percentage: u8) -> &'static str {
    match percentage {
        0 => "Let's start your learning journey!",
        1..=24 => "Great start! Keep building momentum!",
        25..=49 => "You're making solid progress!",
        50..=74 => "More than halfway there! Don't stop now!",
        75..=99 => "Almost there! You're so close!",
        _ => "Congratulations! You've completed the roadmap!",
    }
}

fn streak_message(progress: &UserProgress, now: DateTime<Utc>) -> String {
    let streak = progress.streak;
    if streak == 0 {
        return "Start your learning streak today!".to_string();
    }
    let today = now.date_naive();
    if let Some(last) = progress.last_activity.map(|t| t.date_naive()) {
        if last != today {
            return if last.succ_opt() == Some(today) {
                "Complete a step today to continue your streak!".to_string()
            } else {
                "You missed yesterday. Start a new streak today!".to_string()
            };
        }
    }
    match streak {
        1 => "Great start! Come back tomorrow to build your streak!".to_string(),
        2..=6 => format!("{streak}-day streak! Keep it going!"),
        7..=29 => format!("Amazing {streak}-day streak! You're on fire!"),
        _ => format!("Incredible {streak}-day streak! You're unstoppable!"),
    }
}

/// Applies one day of activity at `now` to the streak counters.
fn advance_streak(progress: &mut UserProgress, now: DateTime<Utc>) {
    let today = now.date_naive();
    let last = progress.last_activity.map(|t| t.date_naive());

    match last {
        Some(day) if day == today && progress.streak > 0 => {}
        Some(day) if day.succ_opt() == Some(today) && progress.streak > 0 => {
            progress.streak += 1;
        }
        _ => {
            progress.streak = 1;
            progress.streak_start_date = Some(now);
        }
    }
    progress.last_activity = Some(now);
}

// ────────────────────────────────────────────────────────────────────────────
// Tracker
// ────────────────────────────────────────────────────────────────────────────

/// Learning progress, domain lock and daily streak on top of a [`KeyValueStore`].
pub struct ProgressTracker<S: KeyValueStore> {
    store: S,
}

impl<S: KeyValueStore> ProgressTracker<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Stored progress, or the default when nothing (or nothing readable) is stored.
    pub fn progress(&self) -> Result<UserProgress, AppError> {
        let Some(raw) = self.store.get(PROGRESS_KEY)? else {
            return Ok(UserProgress::default());
        };
        match serde_json::from_str(&raw) {
            Ok(progress) => Ok(progress),
            Err(e) => {
                warn!("Stored progress is unreadable, starting fresh: {e}");
                Ok(UserProgress::default())
            }
        }
    }

    fn save(&self, progress: &UserProgress) -> Result<(), AppError> {
        self.store.set(PROGRESS_KEY, serde_json::to_string(progress)?)
    }

    /// Progress is written first; a failed lock write restores it, so the lock
    /// key and `selected_domain` never disagree.
    pub fn lock_domain(&self, career_id: &str) -> Result<(), AppError> {
        let previous = self.progress()?;
        let mut progress = previous.clone();
        progress.selected_domain = Some(career_id.to_string());
        self.save(&progress)?;
        if let Err(e) = self.store.set(DOMAIN_LOCK_KEY, career_id.to_string()) {
            self.restore(&previous);
            return Err(e);
        }
        info!("Locked learning domain to {career_id}");
        Ok(())
    }

    pub fn locked_domain(&self) -> Result<Option<String>, AppError> {
        self.store.get(DOMAIN_LOCK_KEY)
    }

    pub fn is_domain_locked(&self) -> Result<bool, AppError> {
        Ok(self.locked_domain()?.is_some())
    }

    pub fn unlock_domain(&self) -> Result<(), AppError> {
        let previous = self.progress()?;
        let mut progress = previous.clone();
        progress.selected_domain = None;
        self.save(&progress)?;
        if let Err(e) = self.store.remove(DOMAIN_LOCK_KEY) {
            self.restore(&previous);
            return Err(e);
        }
        Ok(())
    }

    fn restore(&self, previous: &UserProgress) {
        if let Err(e) = self.save(previous) {
            warn!("Failed to restore progress after a domain lock error: {e}");
        }
    }

    /// Marks a step done. Returns `false` (and leaves the streak alone) when it
    /// was already completed.
    pub fn mark_step_complete(&self, step_id: &str, now: DateTime<Utc>) -> Result<bool, AppError> {
        let mut progress = self.progress()?;
        if progress.completed_steps.iter().any(|s| s == step_id) {
            return Ok(false);
        }
        progress.completed_steps.push(step_id.to_string());
        progress.current_step = Some(step_id.to_string());
        advance_streak(&mut progress, now);
        self.save(&progress)?;
        debug!(step_id, streak = progress.streak, "Step completed");
        Ok(true)
    }

    pub fn is_step_completed(&self, step_id: &str) -> Result<bool, AppError> {
        Ok(self.progress()?.completed_steps.iter().any(|s| s == step_id))
    }

    pub fn completed_steps(&self) -> Result<Vec<String>, AppError> {
        Ok(self.progress()?.completed_steps)
    }

    /// Records activity at `now` and returns the resulting streak.
    pub fn update_streak(&self, now: DateTime<Utc>) -> Result<u32, AppError> {
        let mut progress = self.progress()?;
        advance_streak(&mut progress, now);
        self.save(&progress)?;
        Ok(progress.streak)
    }

    pub fn streak_status(&self, now: DateTime<Utc>) -> Result<StreakStatus, AppError> {
        let progress = self.progress()?;
        Ok(StreakStatus {
            streak: progress.streak,
            message: streak_message(&progress, now),
            milestones_reached: STREAK_MILESTONES
                .iter()
                .copied()
                .filter(|m| progress.streak >= *m)
                .collect(),
        })
    }

    /// Summary against `total_steps`, counting every completed step.
    pub fn summary(&self, total_steps: usize) -> Result<ProgressSummary, AppError> {
        let progress = self.progress()?;
        Ok(build_summary(progress.completed_steps.len(), total_steps, progress.streak))
    }

    /// Summary restricted to the steps of one career's roadmap. Also stores the
    /// resulting percentage.
    pub fn career_summary(&self, career: &CareerRecord) -> Result<ProgressSummary, AppError> {
        let mut progress = self.progress()?;
        let steps = career.roadmap_steps();
        let completed = steps
            .iter()
            .filter(|step| progress.completed_steps.contains(&step.id))
            .count();
        let summary = build_summary(completed, steps.len(), progress.streak);
        if progress.progress_percentage != summary.percentage {
            progress.progress_percentage = summary.percentage;
            self.save(&progress)?;
        }
        Ok(summary)
    }

    pub fn clear(&self) -> Result<(), AppError> {
        self.store.remove(PROGRESS_KEY)?;
        self.store.remove(DOMAIN_LOCK_KEY)
    }
}

fn build_summary(completed: usize, total: usize, streak: u32) -> ProgressSummary {
    let percentage = completion_percentage(completed, total);
    ProgressSummary {
        completed,
        remaining: total.saturating_sub(completed),
        percentage,
        streak,
        encouragement: encouragement(percentage),
    }
}
