use serde::{Deserialize, Serialize};

use crate::catalog::KeywordMap;
use crate::matching::tokens::whole_word_match_normalized;
use crate::models::{normalize, AssessmentProfile, CareerRecord, ExperienceLevel};

/// Points for an interest that contains a canonical phrase mapped to the career.
pub const STRONG_INTEREST_POINTS: f64 = 3.0;
/// Points for an interest that only overlaps the career's title or description.
pub const WEAK_INTEREST_POINTS: f64 = 1.0;
/// Multiplier applied to the skill score once two or more skill hits are found.
pub const MULTI_MATCH_BONUS: f64 = 1.2;
/// The skill ratio never divides by more than this many user skills.
pub const SKILL_DIVISOR_CAP: usize = 4;
/// Minimum length of the contained string for a weak substring hit.
const MIN_CONTAINED_LEN: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoringWeights {
    pub skill: f64,
    pub interest: f64,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            skill: 0.7,
            interest: 0.3,
        }
    }
}

/// Flat skill component used when a profile lists no skills.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BaselineTable {
    /// beginner 30, intermediate 50, advanced 60
    #[default]
    Standard,
    /// beginner 20, intermediate 50, advanced 70
    Alternate,
}

impl BaselineTable {
    pub fn score(&self, level: ExperienceLevel) -> f64 {
        match (self, level) {
            (BaselineTable::Standard, ExperienceLevel::Beginner) => 30.0,
            (BaselineTable::Standard, ExperienceLevel::Intermediate) => 50.0,
            (BaselineTable::Standard, ExperienceLevel::Advanced) => 60.0,
            (BaselineTable::Alternate, ExperienceLevel::Beginner) => 20.0,
            (BaselineTable::Alternate, ExperienceLevel::Intermediate) => 50.0,
            (BaselineTable::Alternate, ExperienceLevel::Advanced) => 70.0,
        }
    }
}

/// Tunable knobs of the matcher. `MatchPolicy::default()` is the canonical behaviour.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MatchPolicy {
    pub weights: ScoringWeights,
    /// Careers scoring below this are dropped.
    pub min_match: u8,
    pub max_results: usize,
    pub baseline: BaselineTable,
}

impl Default for MatchPolicy {
    fn default() -> Self {
        Self {
            weights: ScoringWeights::default(),
            min_match: 30,
            max_results: 6,
            baseline: BaselineTable::Standard,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EvidenceKind {
    /// User skill hit a skill keyword mapped to the career.
    SkillKeyword,
    /// User skill hit one of the career's required skills.
    RequiredSkill,
    /// User interest contains a canonical interest phrase mapped to the career.
    InterestPhrase,
    /// User interest overlaps the career's title or description.
    CareerKeyword,
}

/// Why a career earned points: which input matched what.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchEvidence {
    pub input: String,
    pub matched: String,
    pub kind: EvidenceKind,
    pub points: f64,
}

/// Where the skill component came from.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "source", content = "level", rename_all = "snake_case")]
pub enum SkillSignal {
    Matched,
    Baseline(ExperienceLevel),
    Absent,
}

/// Full scoring trace for one career.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub career_id: String,
    pub skill_score: f64,
    pub skill_signal: SkillSignal,
    /// `None` when the profile lists no interests.
    pub interest_score: Option<f64>,
    pub evidence: Vec<MatchEvidence>,
    pub final_score: u8,
}

/// Skill sub-score (0–100) for one career against already-normalized user skills.
pub fn compute_skill_score(
    career: &CareerRecord,
    skills: &[String],
    skill_keywords: &KeywordMap,
) -> (f64, Vec<MatchEvidence>) {
    if skills.is_empty() {
        return (0.0, Vec::new());
    }

    let required: Vec<String> = career.required_skills.iter().map(|s| normalize(s)).collect();
    let mut evidence = Vec::new();

    for skill in skills {
        for (keyword, ids) in skill_keywords.iter() {
            if ids.iter().any(|id| *id == career.id) && whole_word_match_normalized(skill, keyword)
            {
                evidence.push(MatchEvidence {
                    input: skill.clone(),
                    matched: keyword.to_string(),
                    kind: EvidenceKind::SkillKeyword,
                    points: 1.0,
                });
            }
        }
        for (req_norm, req) in required.iter().zip(&career.required_skills) {
            if whole_word_match_normalized(req_norm, skill) {
                evidence.push(MatchEvidence {
                    input: skill.clone(),
                    matched: req.clone(),
                    kind: EvidenceKind::RequiredSkill,
                    points: 1.0,
                });
            }
        }
    }

    let match_count = evidence.len();
    if match_count == 0 {
        return (0.0, evidence);
    }

    let divisor = skills.len().min(SKILL_DIVISOR_CAP) as f64;
    let mut score = (match_count as f64 / divisor * 100.0).min(100.0);
    if match_count >= 2 {
        score = (score * MULTI_MATCH_BONUS).min(100.0);
    }
    (score, evidence)
}

/// Interest sub-score (0–100) for one career against already-normalized user interests.
///
/// Each interest earns at most one strong hit (canonical phrase) and one weak hit
/// (title/description overlap).
pub fn compute_interest_score(
    career: &CareerRecord,
    interests: &[String],
    interest_keywords: &KeywordMap,
) -> (f64, Vec<MatchEvidence>) {
    if interests.is_empty() {
        return (0.0, Vec::new());
    }

    let keywords = career_keywords(career);
    let mut accumulator = 0.0_f64;
    let mut evidence = Vec::new();

    for interest in interests {
        let strong = interest_keywords.iter().find(|(phrase, ids)| {
            interest.contains(phrase) && ids.iter().any(|id| *id == career.id)
        });
        if let Some((phrase, _)) = strong {
            accumulator += STRONG_INTEREST_POINTS;
            evidence.push(MatchEvidence {
                input: interest.clone(),
                matched: phrase.to_string(),
                kind: EvidenceKind::InterestPhrase,
                points: STRONG_INTEREST_POINTS,
            });
        }

        if let Some(keyword) = keywords.iter().find(|k| weak_match(k, interest)) {
            accumulator += WEAK_INTEREST_POINTS;
            evidence.push(MatchEvidence {
                input: interest.clone(),
                matched: keyword.clone(),
                kind: EvidenceKind::CareerKeyword,
                points: WEAK_INTEREST_POINTS,
            });
        }
    }

    let score = (accumulator / interests.len() as f64 * 100.0).min(100.0);
    (score, evidence)
}

/// Lowercased title, each title word, lowercased description.
fn career_keywords(career: &CareerRecord) -> Vec<String> {
    let title = normalize(&career.title);
    let mut keywords = vec![title.clone()];
    keywords.extend(title.split_whitespace().map(str::to_string));
    keywords.push(normalize(&career.description));
    keywords
}

fn weak_match(keyword: &str, interest: &str) -> bool {
    if whole_word_match_normalized(keyword, interest) {
        return true;
    }
    let contains = |outer: &str, inner: &str| {
        inner.chars().count() > MIN_CONTAINED_LEN && outer.contains(inner)
    };
    contains(keyword, interest) || contains(interest, keyword)
}

/// Weighted combination of the two sub-scores, rounded and clamped to 0–100.
/// A side that is `None` carried no signal and is left out of the weighting.
pub fn combine_scores(skill: Option<f64>, interest: Option<f64>, weights: &ScoringWeights) -> u8 {
    let raw = match (skill, interest) {
        (Some(s), Some(i)) => weights.skill * s + weights.interest * i,
        (Some(s), None) => s,
        (None, Some(i)) => i,
        (None, None) => 0.0,
    };
    raw.round().clamp(0.0, 100.0) as u8
}

/// Scores one career against a profile.
pub fn score_career(
    career: &CareerRecord,
    profile: &AssessmentProfile,
    skill_keywords: &KeywordMap,
    interest_keywords: &KeywordMap,
    policy: &MatchPolicy,
) -> ScoreBreakdown {
    let skills = profile.normalized_skills();
    let interests = profile.normalized_interests();
    let mut evidence = Vec::new();

    let (skill_score, skill_signal, skill_component) = if !skills.is_empty() {
        let (score, hits) = compute_skill_score(career, &skills, skill_keywords);
        evidence.extend(hits);
        (score, SkillSignal::Matched, Some(score))
    } else if !interests.is_empty() {
        // Reported for display; the interests-only branch scores on interests alone.
        let baseline = policy.baseline.score(profile.experience_level);
        (baseline, SkillSignal::Baseline(profile.experience_level), None)
    } else {
        (0.0, SkillSignal::Absent, None)
    };

    let interest_score = if interests.is_empty() {
        None
    } else {
        let (score, hits) = compute_interest_score(career, &interests, interest_keywords);
        evidence.extend(hits);
        Some(score)
    };

    let final_score = combine_scores(skill_component, interest_score, &policy.weights);

    ScoreBreakdown {
        career_id: career.id.clone(),
        skill_score,
        skill_signal,
        interest_score,
        evidence,
        final_score,
    }
}
