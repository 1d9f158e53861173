//! Curriculum module - one grade's concepts, activities, and derived indexes

use crate::{Activity, Concept};
use std::collections::{BTreeSet, HashMap, HashSet};
use std::fmt;

/// A data-quality problem found in a loaded curriculum
///
/// Unresolved references are never fatal. They are dropped from the graph
/// and surfaced here instead.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DataIssue {
    /// Activity whose parent reference is missing or names no known concept
    UnlinkedActivity {
        /// Activity name
        activity: String,
        /// Parent reference as written (None when absent)
        parent: Option<String>,
    },

    /// Interconnection naming a concept that does not exist in this grade
    DanglingInterconnection {
        /// Concept declaring the interconnection
        concept: String,
        /// Unresolved target name
        target: String,
    },
}

impl fmt::Display for DataIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataIssue::UnlinkedActivity {
                activity,
                parent: Some(parent),
            } => write!(
                f,
                "activity '{}' references unknown concept '{}'",
                activity, parent
            ),
            DataIssue::UnlinkedActivity {
                activity,
                parent: None,
            } => write!(f, "activity '{}' has no parent concept", activity),
            DataIssue::DanglingInterconnection { concept, target } => write!(
                f,
                "concept '{}' links to unknown concept '{}'",
                concept, target
            ),
        }
    }
}

/// Concepts and activities of one grade with lookup indexes
///
/// Immutable after construction. A fresh `Curriculum` is built whenever the
/// backing data changes.
#[derive(Debug, Clone)]
pub struct Curriculum {
    grade: String,
    concepts: Vec<Concept>,
    activities: Vec<Activity>,
    by_name: HashMap<String, usize>,
    activities_by_parent: HashMap<String, Vec<usize>>,
}

impl Curriculum {
    /// Build a curriculum and its indexes
    ///
    /// # Errors
    /// Returns an error if a concept name is empty or appears twice, since
    /// the name is the primary key.
    pub fn new(
        grade: impl Into<String>,
        concepts: Vec<Concept>,
        activities: Vec<Activity>,
    ) -> Result<Self, String> {
        let mut by_name = HashMap::with_capacity(concepts.len());
        for (idx, concept) in concepts.iter().enumerate() {
            if concept.name.trim().is_empty() {
                return Err(format!("Concept at index {} has an empty name", idx));
            }
            if by_name.insert(concept.name.clone(), idx).is_some() {
                return Err(format!("Duplicate concept name: {}", concept.name));
            }
        }

        let mut activities_by_parent: HashMap<String, Vec<usize>> = HashMap::new();
        for (idx, activity) in activities.iter().enumerate() {
            if let Some(parent) = activity.parent() {
                if by_name.contains_key(parent) {
                    activities_by_parent
                        .entry(parent.to_string())
                        .or_default()
                        .push(idx);
                }
            }
        }

        Ok(Self {
            grade: grade.into(),
            concepts,
            activities,
            by_name,
            activities_by_parent,
        })
    }

    /// An empty curriculum, used when a grade's data could not be loaded
    pub fn empty(grade: impl Into<String>) -> Self {
        Self {
            grade: grade.into(),
            concepts: Vec::new(),
            activities: Vec::new(),
            by_name: HashMap::new(),
            activities_by_parent: HashMap::new(),
        }
    }

    /// Grade identifier
    pub fn grade(&self) -> &str {
        &self.grade
    }

    /// All concepts in load order
    pub fn concepts(&self) -> &[Concept] {
        &self.concepts
    }

    /// All activities in load order
    pub fn activities(&self) -> &[Activity] {
        &self.activities
    }

    /// True when the grade has no concepts
    pub fn is_empty(&self) -> bool {
        self.concepts.is_empty()
    }

    /// Look up a concept by name
    pub fn concept(&self, name: &str) -> Option<&Concept> {
        self.by_name.get(name).map(|&idx| &self.concepts[idx])
    }

    /// Check whether a concept name resolves in this grade
    pub fn contains(&self, name: &str) -> bool {
        self.by_name.contains_key(name)
    }

    /// Activities whose parent reference matches `name`
    pub fn activities_for(&self, name: &str) -> Vec<&Activity> {
        self.activities_by_parent
            .get(name)
            .map(|idxs| idxs.iter().map(|&i| &self.activities[i]).collect())
            .unwrap_or_default()
    }

    /// Names of concepts with at least one linked activity
    pub fn concepts_with_activities(&self) -> HashSet<&str> {
        self.activities_by_parent.keys().map(String::as_str).collect()
    }

    /// Distinct domains in order of first appearance
    pub fn domains(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        self.concepts
            .iter()
            .map(|c| c.domain.as_str())
            .filter(|d| seen.insert(*d))
            .collect()
    }

    /// Distinct `(domain, strand)` pairs in order of first appearance
    pub fn strands(&self) -> Vec<(&str, &str)> {
        let mut seen = HashSet::new();
        self.concepts
            .iter()
            .map(|c| (c.domain.as_str(), c.strand.as_str()))
            .filter(|pair| seen.insert(*pair))
            .collect()
    }

    /// Concepts belonging to `domain`
    pub fn concepts_in_domain<'a>(&'a self, domain: &'a str) -> impl Iterator<Item = &'a Concept> {
        self.concepts.iter().filter(move |c| c.domain == domain)
    }

    /// Interconnections of `name` that resolve to known concepts
    pub fn resolved_interconnections(&self, name: &str) -> Vec<&str> {
        self.concept(name)
            .map(|c| {
                c.interconnections
                    .iter()
                    .map(String::as_str)
                    .filter(|target| self.contains(target))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Every unresolved reference in the grade, each reported exactly once
    ///
    /// The result is sorted and deduplicated, so repeated calls return the
    /// same list.
    pub fn data_issues(&self) -> Vec<DataIssue> {
        let mut issues = BTreeSet::new();

        for activity in &self.activities {
            let resolved = activity.parent().is_some_and(|p| self.contains(p));
            if !resolved {
                issues.insert(DataIssue::UnlinkedActivity {
                    activity: activity.name.clone(),
                    parent: activity.parent().map(str::to_string),
                });
            }
        }

        for concept in &self.concepts {
            for target in &concept.interconnections {
                if !self.contains(target) {
                    issues.insert(DataIssue::DanglingInterconnection {
                        concept: concept.name.clone(),
                        target: target.clone(),
                    });
                }
            }
        }

        issues.into_iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Curriculum {
        let concepts = vec![
            Concept::new("Photosynthesis", "Biology", "Plants")
                .with_interconnections(["Respiration", "Chlorophyll Synthesis"]),
            Concept::new("Respiration", "Biology", "Animals"),
            Concept::new("Friction", "Physics", "Forces"),
            Concept::new("Pollination", "Biology", "Plants"),
        ];
        let activities = vec![
            Activity::new("Leaf starch test", "Photosynthesis"),
            Activity::new("Breathing rate", "Respiration"),
            Activity::new("Light and leaves", "Photosynthesis II"),
            Activity::new("Light and leaves", "Photosynthesis II"),
        ];
        Curriculum::new("7", concepts, activities).unwrap()
    }

    #[test]
    fn test_indexes() {
        let c = sample();
        assert!(c.contains("Friction"));
        assert!(!c.contains("Photosynthesis II"));
        assert_eq!(c.activities_for("Photosynthesis").len(), 1);
        assert!(c.activities_for("Friction").is_empty());
        assert!(c.activities_for("Photosynthesis II").is_empty());

        let with = c.concepts_with_activities();
        assert!(with.contains("Photosynthesis"));
        assert!(with.contains("Respiration"));
        assert_eq!(with.len(), 2);
    }

    #[test]
    fn test_domains_and_strands_first_appearance() {
        let c = sample();
        assert_eq!(c.domains(), vec!["Biology", "Physics"]);
        assert_eq!(
            c.strands(),
            vec![
                ("Biology", "Plants"),
                ("Biology", "Animals"),
                ("Physics", "Forces")
            ]
        );
        assert_eq!(c.concepts_in_domain("Biology").count(), 3);
    }

    #[test]
    fn test_resolved_interconnections() {
        let c = sample();
        assert_eq!(c.resolved_interconnections("Photosynthesis"), vec!["Respiration"]);
        assert!(c.resolved_interconnections("Unknown").is_empty());
    }

    #[test]
    fn test_unlinked_activity_reported_once() {
        let c = sample();
        let first = c.data_issues();
        let second = c.data_issues();
        assert_eq!(first, second);

        let unlinked: Vec<_> = first
            .iter()
            .filter(|i| {
                matches!(i, DataIssue::UnlinkedActivity { parent: Some(p), .. } if p == "Photosynthesis II")
            })
            .collect();
        assert_eq!(unlinked.len(), 1);

        assert!(first.contains(&DataIssue::DanglingInterconnection {
            concept: "Photosynthesis".into(),
            target: "Chlorophyll Synthesis".into(),
        }));
        assert_eq!(first.len(), 2);
    }

    #[test]
    fn test_activity_without_parent_is_unlinked() {
        let mut orphan = Activity::new("Free play", "");
        orphan.parent_concept = None;
        let c = Curriculum::new("7", vec![Concept::new("A", "D", "S")], vec![orphan]).unwrap();
        assert_eq!(
            c.data_issues(),
            vec![DataIssue::UnlinkedActivity {
                activity: "Free play".into(),
                parent: None
            }]
        );
    }

    #[test]
    fn test_duplicate_concept_rejected() {
        let concepts = vec![Concept::new("A", "D", "S"), Concept::new("A", "D", "T")];
        let result = Curriculum::new("7", concepts, Vec::new());
        assert!(result.is_err());
    }

    #[test]
    fn test_empty_curriculum() {
        let c = Curriculum::empty("8");
        assert!(c.is_empty());
        assert_eq!(c.grade(), "8");
        assert!(c.data_issues().is_empty());
    }
}
