//! Match engine: a trait-based recommender that ranks the catalog against a profile.
//!
//! Default: `KeywordMatcher` (rule-based weighted scoring over whole-word matches,
//! deterministic and pure). Callers hold an `Arc<dyn CareerMatcher>` so the
//! backend can be swapped without touching the calling layer.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::catalog::CareerCatalog;
use crate::errors::AppError;
use crate::matching::scoring::{score_career, MatchPolicy, ScoreBreakdown};
use crate::models::{AssessmentProfile, CareerRecord, MatchTier, ScoredCareer};

// ────────────────────────────────────────────────────────────────────────────
// Report model
// ────────────────────────────────────────────────────────────────────────────

/// Ranked results plus the bookkeeping a presentation layer needs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecommendationReport {
    pub results: Vec<ScoredCareer>,
    /// Breakdowns for `results`, same order.
    pub breakdowns: Vec<ScoreBreakdown>,
    pub considered: usize,
    pub below_threshold: usize,
    pub summary: String,
    pub scorer_backend: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Trait definition
// ────────────────────────────────────────────────────────────────────────────

/// Implement this to swap the ranking backend.
pub trait CareerMatcher: Send + Sync {
    /// Ranked, filtered, capped recommendations. Fails with
    /// `AppError::InvalidProfile` when the profile has neither interests nor skills.
    fn recommend(
        &self,
        profile: &AssessmentProfile,
        catalog: &CareerCatalog,
    ) -> Result<Vec<ScoredCareer>, AppError> {
        Ok(self.report(profile, catalog)?.results)
    }

    fn report(
        &self,
        profile: &AssessmentProfile,
        catalog: &CareerCatalog,
    ) -> Result<RecommendationReport, AppError>;

    fn backend(&self) -> &'static str;
}

// ────────────────────────────────────────────────────────────────────────────
// KeywordMatcher
// ────────────────────────────────────────────────────────────────────────────

/// Rule-based matcher.
///
/// Algorithm:
/// 1. Score every career: skill sub-score from keyword and required-skill hits,
///    interest sub-score from canonical phrases and title/description overlap,
///    combined 70/30 (or either side alone when the other is empty).
/// 2. Drop careers below `policy.min_match`.
/// 3. Stable sort descending, so ties keep catalog order.
/// 4. Keep the first `policy.max_results`.
#[derive(Debug, Clone, Default)]
pub struct KeywordMatcher {
    policy: MatchPolicy,
}

impl KeywordMatcher {
    pub fn new(policy: MatchPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> &MatchPolicy {
        &self.policy
    }

    /// Breakdown for a single career. Returns a zero score for an empty profile.
    pub fn score_career(
        &self,
        career: &CareerRecord,
        profile: &AssessmentProfile,
        catalog: &CareerCatalog,
    ) -> ScoreBreakdown {
        score_career(
            career,
            profile,
            catalog.skill_keywords(),
            catalog.interest_keywords(),
            &self.policy,
        )
    }

    /// Breakdown for a catalog entry looked up by id.
    pub fn explain(
        &self,
        career_id: &str,
        profile: &AssessmentProfile,
        catalog: &CareerCatalog,
    ) -> Result<ScoreBreakdown, AppError> {
        let career = catalog.by_id(career_id)?;
        Ok(self.score_career(career, profile, catalog))
    }

    /// Unfiltered breakdowns for the whole catalog, in catalog order.
    pub fn score_all(
        &self,
        profile: &AssessmentProfile,
        catalog: &CareerCatalog,
    ) -> Vec<ScoreBreakdown> {
        catalog
            .all()
            .iter()
            .map(|career| {
                let breakdown = self.score_career(career, profile, catalog);
                debug!(
                    career = %career.id,
                    skill = breakdown.skill_score,
                    interest = ?breakdown.interest_score,
                    final_score = breakdown.final_score,
                    "Scored career"
                );
                breakdown
            })
            .collect()
    }
}

impl CareerMatcher for KeywordMatcher {
    fn report(
        &self,
        profile: &AssessmentProfile,
        catalog: &CareerCatalog,
    ) -> Result<RecommendationReport, AppError> {
        if !profile.has_signal() {
            return Err(AppError::InvalidProfile(
                "Add at least one interest or skill before requesting recommendations".to_string(),
            ));
        }

        let scored: Vec<(&CareerRecord, ScoreBreakdown)> = catalog
            .all()
            .iter()
            .zip(self.score_all(profile, catalog))
            .collect();
        let considered = scored.len();

        let mut kept: Vec<(&CareerRecord, ScoreBreakdown)> = scored
            .into_iter()
            .filter(|(_, b)| b.final_score >= self.policy.min_match)
            .collect();
        let below_threshold = considered - kept.len();

        // sort_by is stable: equal scores keep catalog order.
        kept.sort_by(|a, b| b.1.final_score.cmp(&a.1.final_score));
        kept.truncate(self.policy.max_results);

        let (results, breakdowns): (Vec<ScoredCareer>, Vec<ScoreBreakdown>) = kept
            .into_iter()
            .map(|(career, breakdown)| {
                (
                    ScoredCareer {
                        career: career.clone(),
                        match_percentage: breakdown.final_score,
                    },
                    breakdown,
                )
            })
            .unzip();

        let summary = build_summary(&results);
        debug!(
            "Recommendation pass: {} considered, {} below threshold, {} returned",
            considered,
            below_threshold,
            results.len()
        );

        Ok(RecommendationReport {
            results,
            breakdowns,
            considered,
            below_threshold,
            summary,
            scorer_backend: self.backend().to_string(),
        })
    }

    fn backend(&self) -> &'static str {
        "keyword"
    }
}

/// Human-readable one-liner for the top of a results screen.
fn build_summary(results: &[ScoredCareer]) -> String {
    let Some(top) = results.first() else {
        return "No recommendations found. Try adding more skills or broader interests."
            .to_string();
    };
    let tier = match top.tier() {
        MatchTier::Excellent => "excellent",
        MatchTier::Strong => "strong",
        MatchTier::Fair => "fair",
        MatchTier::Weak => "weak",
    };
    if results.len() == 1 {
        format!(
            "One career matches your profile: {} ({}%, {tier} fit).",
            top.career.title, top.match_percentage
        )
    } else {
        format!(
            "{} careers match your profile. Top match: {} ({}%, {tier} fit).",
            results.len(),
            top.career.title,
            top.match_percentage
        )
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::KeywordMap;
    use crate::matching::scoring::SkillSignal;
    use crate::models::{ExperienceLevel, Roadmap};

    fn career(id: &str, title: &str, skills: &[&str]) -> CareerRecord {
        CareerRecord {
            id: id.to_string(),
            title: title.to_string(),
            description: String::new(),
            required_skills: skills.iter().map(|s| s.to_string()).collect(),
            average_salary: String::new(),
            job_growth: String::new(),
            roadmap: Roadmap::default(),
        }
    }

    fn standard() -> CareerCatalog {
        CareerCatalog::standard().unwrap()
    }

    fn ids(results: &[ScoredCareer]) -> Vec<&str> {
        results.iter().map(|r| r.career.id.as_str()).collect()
    }

    #[test]
    fn test_web_profile_ranks_frontend_first() {
        let profile = AssessmentProfile::new(ExperienceLevel::Beginner)
            .with_interests(["Web Development"])
            .with_skills(["HTML", "CSS", "JavaScript"]);
        let results = KeywordMatcher::default()
            .recommend(&profile, &standard())
            .unwrap();

        assert!(!results.is_empty());
        let top = &results[0];
        assert!(
            top.career.id == "frontend-developer" || top.career.id == "full-stack-developer",
            "unexpected top career {}",
            top.career.id
        );
        assert!(top.match_percentage >= 70, "top score {}", top.match_percentage);
    }

    #[test]
    fn test_ml_skills_outrank_python_developer() {
        let profile = AssessmentProfile::new(ExperienceLevel::Advanced)
            .with_skills(["Python", "TensorFlow", "NumPy"]);
        let results = KeywordMatcher::default()
            .recommend(&profile, &standard())
            .unwrap();
        let order = ids(&results);

        let ml = order.iter().position(|id| *id == "ml-engineer").unwrap();
        let py = order.iter().position(|id| *id == "python-developer");
        assert_eq!(ml, 0, "ML career should lead, got {order:?}");
        if let Some(py) = py {
            assert!(ml < py);
        }
    }

    #[test]
    fn test_javascript_does_not_boost_java_career() {
        let catalog = CareerCatalog::from_parts(
            vec![career("java", "Java Developer", &["Java"])],
            KeywordMap::default(),
            KeywordMap::default(),
        )
        .unwrap();
        let profile = AssessmentProfile::default().with_skills(["javascript"]);
        let matcher = KeywordMatcher::default();

        let breakdown = matcher.explain("java", &profile, &catalog).unwrap();
        assert_eq!(breakdown.final_score, 0);
        assert!(matcher.recommend(&profile, &catalog).unwrap().is_empty());
    }

    #[test]
    fn test_javascript_does_not_boost_java_in_standard_catalog() {
        let catalog = standard();
        let matcher = KeywordMatcher::default();
        let base = AssessmentProfile::default().with_skills(["Rust"]);
        let with_js = AssessmentProfile::default().with_skills(["Rust", "JavaScript"]);

        let before = matcher.explain("java-developer", &base, &catalog).unwrap();
        let after = matcher.explain("java-developer", &with_js, &catalog).unwrap();
        assert!(after.final_score <= before.final_score);
    }

    #[test]
    fn test_empty_profile_is_rejected() {
        let err = KeywordMatcher::default()
            .recommend(&AssessmentProfile::default(), &standard())
            .unwrap_err();
        assert!(matches!(err, AppError::InvalidProfile(_)));
    }

    #[test]
    fn test_empty_catalog_yields_empty_list() {
        let catalog =
            CareerCatalog::from_parts(vec![], KeywordMap::default(), KeywordMap::default()).unwrap();
        let profile = AssessmentProfile::default().with_skills(["Python"]);
        let report = KeywordMatcher::default().report(&profile, &catalog).unwrap();
        assert!(report.results.is_empty());
        assert_eq!(report.considered, 0);
        assert!(report.summary.starts_with("No recommendations found"));
    }

    #[test]
    fn test_results_respect_threshold_and_cap() {
        let profile = AssessmentProfile::new(ExperienceLevel::Intermediate)
            .with_interests(["Web Development", "Cloud Computing", "Data Science"])
            .with_skills(["Python", "SQL", "Docker", "Git", "Linux", "JavaScript"]);
        let report = KeywordMatcher::default().report(&profile, &standard()).unwrap();

        assert!(report.results.len() <= 6);
        assert!(report.results.iter().all(|r| r.match_percentage >= 30));
        assert_eq!(report.breakdowns.len(), report.results.len());
        assert_eq!(report.considered, 13);
    }

    #[test]
    fn test_cap_applies_when_many_careers_qualify() {
        let records: Vec<CareerRecord> = (0..9)
            .map(|i| career(&format!("c{i}"), &format!("Career {i}"), &["Rust"]))
            .collect();
        let catalog =
            CareerCatalog::from_parts(records, KeywordMap::default(), KeywordMap::default())
                .unwrap();
        let profile = AssessmentProfile::default().with_skills(["Rust"]);
        let results = KeywordMatcher::default().recommend(&profile, &catalog).unwrap();

        assert_eq!(results.len(), 6);
        // All tie at 100, so catalog order survives.
        assert_eq!(ids(&results), vec!["c0", "c1", "c2", "c3", "c4", "c5"]);
    }

    #[test]
    fn test_ordering_descending_with_stable_ties() {
        let catalog = CareerCatalog::from_parts(
            vec![
                career("half", "Half", &["Rust"]),
                career("full-a", "Full A", &["Rust", "Golang"]),
                career("none", "None", &["Cobol"]),
                career("full-b", "Full B", &["Rust", "Golang"]),
            ],
            KeywordMap::default(),
            KeywordMap::default(),
        )
        .unwrap();
        let profile = AssessmentProfile::default().with_skills(["Rust", "Golang"]);
        let results = KeywordMatcher::default().recommend(&profile, &catalog).unwrap();

        let scores: Vec<u8> = results.iter().map(|r| r.match_percentage).collect();
        assert!(scores.windows(2).all(|w| w[0] >= w[1]), "{scores:?}");
        assert_eq!(ids(&results)[0], "full-a");
        assert_eq!(ids(&results)[1], "full-b");
        assert_eq!(ids(&results)[2], "half");
    }

    #[test]
    fn test_threshold_is_configurable() {
        let catalog = CareerCatalog::from_parts(
            vec![career("x", "X", &["Aaa"])],
            KeywordMap::default(),
            KeywordMap::default(),
        )
        .unwrap();
        // 1 hit / 4 skills = 25%
        let profile = AssessmentProfile::default().with_skills(["aaa", "bbb", "ccc", "ddd"]);

        let strict = KeywordMatcher::default();
        assert!(strict.recommend(&profile, &catalog).unwrap().is_empty());

        let lenient = KeywordMatcher::new(MatchPolicy {
            min_match: 15,
            ..MatchPolicy::default()
        });
        let results = lenient.recommend(&profile, &catalog).unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].match_percentage, 25);
    }

    #[test]
    fn test_adding_matching_skill_never_lowers_score() {
        let catalog = standard();
        let matcher = KeywordMatcher::default();
        let required = catalog.by_id("devops-engineer").unwrap().required_skills.clone();

        // Four unrelated skills so the divisor is already at its cap.
        let mut profile = AssessmentProfile::default()
            .with_interests(["Cloud Computing"])
            .with_skills(["Excel", "Figma", "Swift", "Unity"]);
        let mut last = matcher
            .explain("devops-engineer", &profile, &catalog)
            .unwrap()
            .final_score;
        for skill in required {
            profile.add_skill(skill);
            let next = matcher
                .explain("devops-engineer", &profile, &catalog)
                .unwrap()
                .final_score;
            assert!(next >= last, "score dropped from {last} to {next}");
            last = next;
        }
    }

    #[test]
    fn test_scores_are_bounded() {
        let catalog = standard();
        let profiles = [
            AssessmentProfile::default().with_skills(["HTML/CSS", "React", "Node.js", "Git"]),
            AssessmentProfile::default().with_interests(["Cybersecurity", "Game Development"]),
            AssessmentProfile::new(ExperienceLevel::Advanced)
                .with_interests(["UI/UX Design"])
                .with_skills(["Figma", "Python", "AWS", "Kubernetes", "Docker"]),
        ];
        let matcher = KeywordMatcher::default();
        for profile in &profiles {
            for b in matcher.score_all(profile, &catalog) {
                assert!(b.final_score <= 100);
                assert!((0.0..=100.0).contains(&b.skill_score));
                if let Some(i) = b.interest_score {
                    assert!((0.0..=100.0).contains(&i));
                }
            }
        }
    }

    #[test]
    fn test_recommend_is_deterministic_and_idempotent() {
        let catalog = standard();
        let matcher = KeywordMatcher::default();
        let profile = AssessmentProfile::new(ExperienceLevel::Intermediate)
            .with_interests(["Machine Learning", "Data Science"])
            .with_skills(["Python", "SQL", "Pandas"]);

        let first = matcher.recommend(&profile, &catalog).unwrap();
        let second = matcher.recommend(&profile, &catalog).unwrap();
        let third = matcher.recommend(&profile, &catalog).unwrap();
        assert_eq!(first, second);
        assert_eq!(second, third);
    }

    #[test]
    fn test_interest_only_profile_scores_on_interests() {
        let profile =
            AssessmentProfile::new(ExperienceLevel::Beginner).with_interests(["Game Development"]);
        let report = KeywordMatcher::default().report(&profile, &standard()).unwrap();
        let game = report
            .results
            .iter()
            .find(|r| r.career.id == "game-developer")
            .expect("game developer should be recommended");
        assert_eq!(game.match_percentage, 100);
        assert!(report
            .breakdowns
            .iter()
            .all(|b| b.skill_signal == SkillSignal::Baseline(ExperienceLevel::Beginner)));
    }

    #[test]
    fn test_explain_unknown_career_propagates_not_found() {
        let profile = AssessmentProfile::default().with_skills(["Python"]);
        let err = KeywordMatcher::default()
            .explain("astronaut", &profile, &standard())
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[test]
    fn test_backend_label_is_keyword() {
        let profile = AssessmentProfile::default().with_skills(["Python"]);
        let report = KeywordMatcher::default().report(&profile, &standard()).unwrap();
        assert_eq!(report.scorer_backend, "keyword");
    }

    #[test]
    fn test_summary_mentions_top_match() {
        let profile = AssessmentProfile::default().with_skills(["Figma", "Prototyping"]);
        let report = KeywordMatcher::default().report(&profile, &standard()).unwrap();
        assert!(report.summary.contains("UI/UX Designer"), "{}", report.summary);
    }
}
