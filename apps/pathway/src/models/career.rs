use std::fmt;

use serde::{Deserialize, Serialize};

/// One phase of a career roadmap.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LearningPhase {
    pub skills: Vec<String>,
    pub projects: Vec<String>,
    /// Free text; most entries embed a URL, e.g. `"Flask Tutorial (YouTube - https://...)"`.
    pub courses: Vec<String>,
}

/// A course reference split into its display title and optional URL.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CourseLink {
    pub title: String,
    pub url: Option<String>,
}

impl LearningPhase {
    pub fn course_links(&self) -> Vec<CourseLink> {
        self.courses.iter().map(|c| parse_course(c)).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.skills.is_empty() && self.projects.is_empty() && self.courses.is_empty()
    }
}

fn parse_course(raw: &str) -> CourseLink {
    let title = match raw.find(" (") {
        Some(idx) => raw[..idx].trim(),
        None => raw.trim(),
    };
    let url = raw
        .find("https://")
        .or_else(|| raw.find("http://"))
        .map(|start| {
            let tail = &raw[start..];
            let end = tail
                .find(|c: char| c.is_whitespace() || c == ')')
                .unwrap_or(tail.len());
            tail[..end].to_string()
        });
    CourseLink {
        title: title.to_string(),
        url,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoadmapPhase {
    Beginner,
    Intermediate,
    Advanced,
}

impl RoadmapPhase {
    pub const ALL: [RoadmapPhase; 3] = [
        RoadmapPhase::Beginner,
        RoadmapPhase::Intermediate,
        RoadmapPhase::Advanced,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            RoadmapPhase::Beginner => "beginner",
            RoadmapPhase::Intermediate => "intermediate",
            RoadmapPhase::Advanced => "advanced",
        }
    }
}

impl fmt::Display for RoadmapPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Three-phase learning roadmap attached to every career.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Roadmap {
    pub beginner: LearningPhase,
    pub intermediate: LearningPhase,
    pub advanced: LearningPhase,
}

impl Roadmap {
    pub fn phase(&self, phase: RoadmapPhase) -> &LearningPhase {
        match phase {
            RoadmapPhase::Beginner => &self.beginner,
            RoadmapPhase::Intermediate => &self.intermediate,
            RoadmapPhase::Advanced => &self.advanced,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StepKind {
    Skill,
    Project,
    Course,
}

impl StepKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            StepKind::Skill => "skill",
            StepKind::Project => "project",
            StepKind::Course => "course",
        }
    }
}

/// A single trackable item of a roadmap. Ids are stable across runs:
/// `"{career_id}:{phase}:{kind}:{index}"`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoadmapStep {
    pub id: String,
    pub phase: RoadmapPhase,
    pub kind: StepKind,
    pub title: String,
}

/// A static catalog entry. Loaded once, never mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CareerRecord {
    pub id: String,
    pub title: String,
    pub description: String,
    pub required_skills: Vec<String>,
    /// Display only.
    pub average_salary: String,
    /// Display only.
    pub job_growth: String,
    pub roadmap: Roadmap,
}

impl CareerRecord {
    /// Flattens the roadmap into ordered steps: phase by phase, skills, then
    /// projects, then courses.
    pub fn roadmap_steps(&self) -> Vec<RoadmapStep> {
        let mut steps = Vec::new();
        for phase in RoadmapPhase::ALL {
            let content = self.roadmap.phase(phase);
            let groups = [
                (StepKind::Skill, &content.skills),
                (StepKind::Project, &content.projects),
                (StepKind::Course, &content.courses),
            ];
            for (kind, items) in groups {
                for (idx, item) in items.iter().enumerate() {
                    let title = match kind {
                        StepKind::Course => parse_course(item).title,
                        _ => item.clone(),
                    };
                    steps.push(RoadmapStep {
                        id: format!("{}:{}:{}:{}", self.id, phase, kind.as_str(), idx),
                        phase,
                        kind,
                        title,
                    });
                }
            }
        }
        steps
    }
}

/// Display band for a match percentage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchTier {
    Excellent,
    Strong,
    Fair,
    Weak,
}

impl MatchTier {
    pub fn from_percentage(percentage: u8) -> Self {
        match percentage {
            p if p >= 80 => MatchTier::Excellent,
            p if p >= 60 => MatchTier::Strong,
            p if p >= 40 => MatchTier::Fair,
            _ => MatchTier::Weak,
        }
    }
}

/// A career with its computed match percentage (0–100). Created per invocation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredCareer {
    pub career: CareerRecord,
    pub match_percentage: u8,
}

impl ScoredCareer {
    pub fn tier(&self) -> MatchTier {
        MatchTier::from_percentage(self.match_percentage)
    }
}
