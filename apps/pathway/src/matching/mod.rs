// Career matching: whole-word primitive, sub-score rules, and the ranking engine.
// Pure and synchronous; nothing here touches storage.

pub mod engine;
pub mod scoring;
pub mod tokens;

pub use engine::{CareerMatcher, KeywordMatcher, RecommendationReport};
pub use scoring::{
    BaselineTable, EvidenceKind, MatchEvidence, MatchPolicy, ScoreBreakdown, ScoringWeights,
    SkillSignal,
};
pub use tokens::whole_word_match;
