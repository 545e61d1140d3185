//! Keyword tables: canonical skill and interest phrases mapped to the career ids
//! they strongly imply. Keys are stored normalized (lowercase, trimmed).

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::models::normalize;

/// Skill keyword → career ids. Matched against user skills with the whole-word rule.
pub const SKILL_KEYWORDS: &[(&str, &[&str])] = &[
    // Web
    ("html", &["frontend-developer", "full-stack-developer"]),
    ("css", &["frontend-developer", "full-stack-developer"]),
    (
        "javascript",
        &["frontend-developer", "backend-developer", "full-stack-developer"],
    ),
    ("react", &["frontend-developer", "full-stack-developer"]),
    ("next.js", &["frontend-developer", "full-stack-developer"]),
    (
        "typescript",
        &["frontend-developer", "backend-developer", "full-stack-developer"],
    ),
    ("bootstrap", &["frontend-developer", "full-stack-developer"]),
    // Backend
    ("node.js", &["backend-developer", "full-stack-developer"]),
    ("express", &["backend-developer", "full-stack-developer"]),
    ("java", &["java-developer"]),
    ("spring boot", &["java-developer"]),
    (
        "python",
        &["python-developer", "data-analyst", "ml-engineer"],
    ),
    ("flask", &["python-developer"]),
    ("django", &["python-developer"]),
    // Databases
    (
        "sql",
        &[
            "backend-developer",
            "full-stack-developer",
            "java-developer",
            "python-developer",
            "data-analyst",
        ],
    ),
    ("mongodb", &["backend-developer", "full-stack-developer"]),
    (
        "postgresql",
        &["backend-developer", "full-stack-developer", "python-developer"],
    ),
    // Data & ML
    ("pandas", &["data-analyst", "ml-engineer"]),
    ("numpy", &["ml-engineer"]),
    ("scikit-learn", &["ml-engineer"]),
    ("tensorflow", &["ml-engineer"]),
    ("pytorch", &["ml-engineer"]),
    ("excel", &["data-analyst"]),
    ("tableau", &["data-analyst"]),
    ("power bi", &["data-analyst"]),
    // DevOps & Cloud
    (
        "docker",
        &[
            "backend-developer",
            "java-developer",
            "devops-engineer",
            "cloud-engineer",
        ],
    ),
    ("kubernetes", &["devops-engineer", "cloud-engineer"]),
    ("aws", &["devops-engineer", "cloud-engineer"]),
    ("azure", &["cloud-engineer"]),
    ("terraform", &["cloud-engineer", "devops-engineer"]),
    (
        "linux",
        &["devops-engineer", "cloud-engineer", "cybersecurity-analyst"],
    ),
    (
        "git",
        &[
            "frontend-developer",
            "backend-developer",
            "full-stack-developer",
            "java-developer",
            "python-developer",
        ],
    ),
    ("ci/cd", &["devops-engineer"]),
    ("jenkins", &["devops-engineer"]),
    // Mobile
    ("kotlin", &["mobile-app-developer"]),
    ("swift", &["mobile-app-developer"]),
    ("flutter", &["mobile-app-developer"]),
    ("react native", &["mobile-app-developer"]),
    // Security
    ("networking", &["cybersecurity-analyst", "cloud-engineer"]),
    ("wireshark", &["cybersecurity-analyst"]),
    // Design
    ("figma", &["ui-ux-designer"]),
    ("wireframing", &["ui-ux-designer"]),
    ("prototyping", &["ui-ux-designer"]),
    // Games
    ("unity", &["game-developer"]),
    ("c#", &["game-developer"]),
    ("c++", &["game-developer"]),
];

/// Interest phrase → career ids. A user interest containing the phrase is a strong signal.
pub const INTEREST_KEYWORDS: &[(&str, &[&str])] = &[
    (
        "web development",
        &["frontend-developer", "backend-developer", "full-stack-developer"],
    ),
    ("frontend", &["frontend-developer", "full-stack-developer"]),
    (
        "backend",
        &["backend-developer", "java-developer", "python-developer"],
    ),
    ("full stack", &["full-stack-developer"]),
    ("mobile", &["mobile-app-developer"]),
    ("machine learning", &["ml-engineer"]),
    ("artificial intelligence", &["ml-engineer"]),
    ("deep learning", &["ml-engineer"]),
    ("data science", &["ml-engineer", "data-analyst"]),
    ("data analysis", &["data-analyst"]),
    ("analytics", &["data-analyst"]),
    ("cloud", &["cloud-engineer", "devops-engineer"]),
    ("devops", &["devops-engineer"]),
    ("automation", &["devops-engineer", "python-developer"]),
    ("cybersecurity", &["cybersecurity-analyst"]),
    ("security", &["cybersecurity-analyst"]),
    ("ui/ux", &["ui-ux-designer"]),
    ("design", &["ui-ux-designer"]),
    ("game", &["game-developer"]),
    ("enterprise", &["java-developer"]),
];

/// An ordered keyword → career-id table. Order is preserved so iteration is deterministic.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct KeywordMap {
    entries: Vec<(String, Vec<String>)>,
}

impl KeywordMap {
    pub fn from_static(table: &[(&str, &[&str])]) -> Self {
        Self::from_pairs(
            table
                .iter()
                .map(|(k, ids)| (k.to_string(), ids.iter().map(|id| id.to_string()).collect())),
        )
    }

    /// Builds a map from owned pairs. Keys are normalized; repeated keys merge their ids.
    pub fn from_pairs<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (String, Vec<String>)>,
    {
        let mut entries: Vec<(String, Vec<String>)> = Vec::new();
        for (key, ids) in pairs {
            let key = normalize(&key);
            match entries.iter_mut().find(|(k, _)| *k == key) {
                Some((_, existing)) => {
                    for id in ids {
                        if !existing.contains(&id) {
                            existing.push(id);
                        }
                    }
                }
                None => entries.push((key, ids)),
            }
        }
        Self { entries }
    }

    pub fn skills() -> Self {
        Self::from_static(SKILL_KEYWORDS)
    }

    pub fn interests() -> Self {
        Self::from_static(INTEREST_KEYWORDS)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.entries.iter().map(|(k, ids)| (k.as_str(), ids.as_slice()))
    }

    /// Career ids for an exact (normalized) keyword; empty when unknown.
    pub fn ids_for(&self, keyword: &str) -> BTreeSet<&str> {
        let keyword = normalize(keyword);
        self.entries
            .iter()
            .filter(|(k, _)| *k == keyword)
            .flat_map(|(_, ids)| ids.iter().map(String::as_str))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_static_tables_are_normalized() {
        for (key, ids) in SKILL_KEYWORDS.iter().chain(INTEREST_KEYWORDS) {
            assert_eq!(*key, normalize(key), "key '{key}' is not normalized");
            assert!(!ids.is_empty(), "key '{key}' maps to no careers");
        }
    }

    #[test]
    fn test_ids_for_is_case_insensitive() {
        let map = KeywordMap::skills();
        let ids = map.ids_for("  TensorFlow ");
        assert_eq!(ids.into_iter().collect::<Vec<_>>(), vec!["ml-engineer"]);
    }

    #[test]
    fn test_ids_for_unknown_is_empty() {
        assert!(KeywordMap::interests().ids_for("underwater basket weaving").is_empty());
    }

    #[test]
    fn test_from_pairs_merges_repeated_keys() {
        let map = KeywordMap::from_pairs(vec![
            ("Rust".to_string(), vec!["a".to_string()]),
            ("rust".to_string(), vec!["b".to_string(), "a".to_string()]),
        ]);
        assert_eq!(map.len(), 1);
        let ids: Vec<_> = map.ids_for("rust").into_iter().collect();
        assert_eq!(ids, vec!["a", "b"]);
    }

    #[test]
    fn test_iteration_preserves_definition_order() {
        let map = KeywordMap::skills();
        let first: Vec<&str> = map.iter().take(3).map(|(k, _)| k).collect();
        assert_eq!(first, vec!["html", "css", "javascript"]);
    }
}
