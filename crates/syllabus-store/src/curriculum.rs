//! Curriculum loading from per-grade JSON knowledge bases

use crate::{Result, StoreError};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use syllabus_domain::traits::CurriculumSource;
use syllabus_domain::{Activity, Concept, Curriculum};
use tracing::{info, warn};

/// Top-level knowledge-base document
#[derive(Debug, Deserialize)]
struct KnowledgeBase {
    concepts: Vec<ConceptRecord>,
    activities: Vec<ActivityRecord>,
}

/// Concept as written in the knowledge base
#[derive(Debug, Deserialize)]
struct ConceptRecord {
    concept_name: String,
    domain: String,
    strand: String,
    #[serde(default)]
    brief_explanation: Option<String>,
    #[serde(default)]
    concept_type: Option<String>,
    #[serde(default)]
    cognitive_level: Option<String>,
    #[serde(default)]
    chapter_references: Vec<String>,
    #[serde(default)]
    interconnections: Vec<String>,
}

/// Activity as written in the knowledge base
#[derive(Debug, Deserialize)]
struct ActivityRecord {
    activity_name: String,
    #[serde(default)]
    activity_type: Option<String>,
    #[serde(default)]
    learning_goal: Option<String>,
    #[serde(default)]
    parent_concept: Option<String>,
}

impl From<ConceptRecord> for Concept {
    fn from(record: ConceptRecord) -> Self {
        Concept {
            name: record.concept_name,
            domain: record.domain,
            strand: record.strand,
            brief_explanation: record.brief_explanation,
            concept_type: record.concept_type,
            cognitive_level: record.cognitive_level,
            chapter_references: record.chapter_references,
            interconnections: record.interconnections,
        }
    }
}

impl From<ActivityRecord> for Activity {
    fn from(record: ActivityRecord) -> Self {
        Activity {
            name: record.activity_name,
            activity_type: record.activity_type,
            learning_goal: record.learning_goal,
            parent_concept: record.parent_concept,
        }
    }
}

/// Parse a knowledge-base document into a curriculum
///
/// # Errors
/// Returns `DataCorrupt` if the text is not valid JSON, lacks the
/// `concepts` or `activities` arrays, has a concept missing a required
/// field, or repeats a concept name.
pub fn parse_knowledge_base(grade: &str, text: &str) -> Result<Curriculum> {
    let corrupt = |reason: String| StoreError::DataCorrupt {
        grade: grade.to_string(),
        reason,
    };

    let base: KnowledgeBase = serde_json::from_str(text).map_err(|e| corrupt(e.to_string()))?;
    let concepts = base.concepts.into_iter().map(Concept::from).collect();
    let activities = base.activities.into_iter().map(Activity::from).collect();

    Curriculum::new(grade, concepts, activities).map_err(corrupt)
}

/// File-backed source of per-grade knowledge bases
#[derive(Debug, Clone, Default)]
pub struct JsonCurriculumSource {
    grades: Vec<(String, PathBuf)>,
}

impl JsonCurriculumSource {
    /// Create a source with no grades
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a grade and its knowledge-base file
    pub fn with_grade(mut self, grade: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        self.grades.push((grade.into(), path.into()));
        self
    }

    /// File registered for `grade`
    pub fn path_for(&self, grade: &str) -> Option<&Path> {
        self.grades
            .iter()
            .find(|(g, _)| g == grade)
            .map(|(_, p)| p.as_path())
    }
}

impl CurriculumSource for JsonCurriculumSource {
    type Error = StoreError;

    fn grades(&self) -> Vec<String> {
        self.grades.iter().map(|(g, _)| g.clone()).collect()
    }

    fn load_grade(&self, grade: &str) -> Result<Curriculum> {
        let path = self
            .path_for(grade)
            .ok_or_else(|| StoreError::UnknownGrade(grade.to_string()))?;

        let text = match std::fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(StoreError::DataNotFound {
                    grade: grade.to_string(),
                    path: path.to_path_buf(),
                });
            }
            Err(e) => return Err(StoreError::Io(e)),
        };

        let curriculum = parse_knowledge_base(grade, &text)?;
        info!(
            "Loaded grade {} from {}: {} concepts, {} activities",
            grade,
            path.display(),
            curriculum.concepts().len(),
            curriculum.activities().len()
        );
        Ok(curriculum)
    }
}

/// All configured grades, each loaded independently
///
/// A grade that fails to load is served as an empty curriculum and its error
/// is kept for display; other grades are unaffected.
#[derive(Debug)]
pub struct CurriculumLibrary {
    order: Vec<String>,
    loaded: HashMap<String, Curriculum>,
    failures: HashMap<String, StoreError>,
}

impl CurriculumLibrary {
    /// Load every grade the source knows about
    pub fn load<S>(source: &S) -> Self
    where
        S: CurriculumSource<Error = StoreError>,
    {
        let order = source.grades();
        let mut loaded = HashMap::new();
        let mut failures = HashMap::new();

        for grade in &order {
            match source.load_grade(grade) {
                Ok(curriculum) => {
                    let issues = curriculum.data_issues();
                    if !issues.is_empty() {
                        warn!("Grade {} has {} data-quality issue(s)", grade, issues.len());
                    }
                    loaded.insert(grade.clone(), curriculum);
                }
                Err(e) => {
                    warn!("Grade {} unavailable: {}", grade, e);
                    loaded.insert(grade.clone(), Curriculum::empty(grade.as_str()));
                    failures.insert(grade.clone(), e);
                }
            }
        }

        Self {
            order,
            loaded,
            failures,
        }
    }

    /// Grade identifiers in configuration order
    pub fn grades(&self) -> &[String] {
        &self.order
    }

    /// Curriculum for `grade`; empty if the grade failed to load
    pub fn curriculum(&self, grade: &str) -> Option<&Curriculum> {
        self.loaded.get(grade)
    }

    /// Load error for `grade`, if any
    pub fn load_error(&self, grade: &str) -> Option<&StoreError> {
        self.failures.get(grade)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "concepts": [
            {
                "concept_name": "Photosynthesis",
                "domain": "Biology (The Living World)",
                "strand": "Plants",
                "brief_explanation": "Plants make food using sunlight.",
                "chapter_references": ["Ch 1"],
                "interconnections": ["Respiration"]
            },
            {
                "concept_name": "Respiration",
                "domain": "Biology (The Living World)",
                "strand": "Life Processes"
            }
        ],
        "activities": [
            {
                "activity_name": "Starch test",
                "activity_type": "Experiment",
                "parent_concept": "Photosynthesis"
            }
        ]
    }"#;

    #[test]
    fn test_parse_sample() {
        let c = parse_knowledge_base("7", SAMPLE).unwrap();
        assert_eq!(c.concepts().len(), 2);
        assert_eq!(c.activities().len(), 1);
        let p = c.concept("Photosynthesis").unwrap();
        assert_eq!(p.chapter_references, vec!["Ch 1"]);
        assert!(c.concept("Respiration").unwrap().interconnections.is_empty());
        assert_eq!(c.activities_for("Photosynthesis").len(), 1);
    }

    #[test]
    fn test_missing_concepts_field() {
        let err = parse_knowledge_base("7", r#"{"activities": []}"#).unwrap_err();
        match err {
            StoreError::DataCorrupt { grade, reason } => {
                assert_eq!(grade, "7");
                assert!(reason.contains("concepts"));
            }
            other => panic!("Expected DataCorrupt, got {:?}", other),
        }
    }

    #[test]
    fn test_missing_required_concept_field() {
        let text = r#"{"concepts": [{"concept_name": "A", "domain": "D"}], "activities": []}"#;
        assert!(matches!(
            parse_knowledge_base("7", text),
            Err(StoreError::DataCorrupt { .. })
        ));
    }

    #[test]
    fn test_malformed_json() {
        assert!(matches!(
            parse_knowledge_base("8", "{ not json"),
            Err(StoreError::DataCorrupt { .. })
        ));
    }

    #[test]
    fn test_duplicate_concept_is_corrupt() {
        let text = r#"{
            "concepts": [
                {"concept_name": "A", "domain": "D", "strand": "S"},
                {"concept_name": "A", "domain": "D", "strand": "S"}
            ],
            "activities": []
        }"#;
        assert!(matches!(
            parse_knowledge_base("7", text),
            Err(StoreError::DataCorrupt { .. })
        ));
    }

    #[test]
    fn test_unknown_grade() {
        let source = JsonCurriculumSource::new();
        assert!(matches!(source.load_grade("9"), Err(StoreError::UnknownGrade(_))));
    }
}
