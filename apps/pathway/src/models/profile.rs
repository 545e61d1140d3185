use std::fmt;

use serde::{Deserialize, Serialize};

/// Self-reported experience level from the assessment form.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExperienceLevel {
    #[default]
    Beginner,
    Intermediate,
    Advanced,
}

impl ExperienceLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExperienceLevel::Beginner => "beginner",
            ExperienceLevel::Intermediate => "intermediate",
            ExperienceLevel::Advanced => "advanced",
        }
    }
}

impl fmt::Display for ExperienceLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A user's answers to the assessment.
///
/// `interests` and `skills` behave as sets: `add_interest` / `add_skill` reject
/// blanks and case-insensitive duplicates. Profiles that arrive through serde
/// may still carry duplicates, so scoring always works on the normalized views.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AssessmentProfile {
    #[serde(default)]
    pub interests: Vec<String>,
    #[serde(default, alias = "current_skills")]
    pub skills: Vec<String>,
    #[serde(default)]
    pub experience_level: ExperienceLevel,
    /// Display only.
    #[serde(default)]
    pub time_commitment: String,
    /// Display only.
    #[serde(default)]
    pub career_goals: String,
}

impl AssessmentProfile {
    pub fn new(experience_level: ExperienceLevel) -> Self {
        Self {
            experience_level,
            ..Self::default()
        }
    }

    /// Builder-style helper used by tests and callers assembling a profile in code.
    pub fn with_interests<I, S>(mut self, interests: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for interest in interests {
            self.add_interest(interest);
        }
        self
    }

    pub fn with_skills<I, S>(mut self, skills: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for skill in skills {
            self.add_skill(skill);
        }
        self
    }

    /// Adds an interest. Returns `false` when it is blank or already present.
    pub fn add_interest(&mut self, interest: impl Into<String>) -> bool {
        insert_unique(&mut self.interests, interest.into())
    }

    /// Adds a skill. Returns `false` when it is blank or already present.
    pub fn add_skill(&mut self, skill: impl Into<String>) -> bool {
        insert_unique(&mut self.skills, skill.into())
    }

    pub fn remove_interest(&mut self, interest: &str) {
        let target = normalize(interest);
        self.interests.retain(|i| normalize(i) != target);
    }

    pub fn remove_skill(&mut self, skill: &str) {
        let target = normalize(skill);
        self.skills.retain(|s| normalize(s) != target);
    }

    /// True when the profile carries at least one interest or skill.
    pub fn has_signal(&self) -> bool {
        !self.normalized_interests().is_empty() || !self.normalized_skills().is_empty()
    }

    /// Lowercased, trimmed, de-duplicated interests in insertion order.
    pub fn normalized_interests(&self) -> Vec<String> {
        normalize_set(&self.interests)
    }

    /// Lowercased, trimmed, de-duplicated skills in insertion order.
    pub fn normalized_skills(&self) -> Vec<String> {
        normalize_set(&self.skills)
    }
}

/// Lowercase + trim. The single normalization rule shared by profile and catalog.
pub fn normalize(value: &str) -> String {
    value.trim().to_lowercase()
}

fn insert_unique(values: &mut Vec<String>, value: String) -> bool {
    let value = value.trim().to_string();
    if value.is_empty() {
        return false;
    }
    let key = normalize(&value);
    if values.iter().any(|v| normalize(v) == key) {
        return false;
    }
    values.push(value);
    true
}

fn normalize_set(values: &[String]) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(values.len());
    for value in values {
        let n = normalize(value);
        if !n.is_empty() && !out.contains(&n) {
            out.push(n);
        }
    }
    out
}
