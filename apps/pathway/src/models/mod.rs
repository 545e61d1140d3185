pub mod career;
pub mod profile;

pub use career::{
    CareerRecord, CourseLink, LearningPhase, MatchTier, Roadmap, RoadmapPhase, RoadmapStep,
    ScoredCareer, StepKind,
};
pub use profile::{normalize, AssessmentProfile, ExperienceLevel};
