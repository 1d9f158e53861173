//! Concept and Activity records

/// An atomic curriculum topic
///
/// The display name is the primary key within a grade. Records are created
/// once at load time and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Concept {
    /// Unique display name
    pub name: String,

    /// Top-level subject category
    pub domain: String,

    /// Sub-category within the domain
    pub strand: String,

    /// Short explanatory text
    pub brief_explanation: Option<String>,

    /// Kind of concept (e.g. "Process", "Principle")
    pub concept_type: Option<String>,

    /// Cognitive level (e.g. "Understand", "Apply")
    pub cognitive_level: Option<String>,

    /// Ordered chapter references
    pub chapter_references: Vec<String>,

    /// Names of related concepts; may be asymmetric or unresolvable
    pub interconnections: Vec<String>,
}

impl Concept {
    /// Create a concept with only the fields that place it in the tree
    pub fn new(
        name: impl Into<String>,
        domain: impl Into<String>,
        strand: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            domain: domain.into(),
            strand: strand.into(),
            brief_explanation: None,
            concept_type: None,
            cognitive_level: None,
            chapter_references: Vec::new(),
            interconnections: Vec::new(),
        }
    }

    /// Attach interconnection names
    pub fn with_interconnections<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.interconnections = names.into_iter().map(Into::into).collect();
        self
    }

    /// Attach a brief explanation
    pub fn with_explanation(mut self, text: impl Into<String>) -> Self {
        self.brief_explanation = Some(text.into());
        self
    }

    /// Attach chapter references
    pub fn with_chapters<I, S>(mut self, chapters: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.chapter_references = chapters.into_iter().map(Into::into).collect();
        self
    }
}

/// A learning exercise linked to a concept by name
///
/// The parent reference is not guaranteed to resolve. Activities whose
/// parent is missing or unknown are reported by
/// [`Curriculum::data_issues`](crate::Curriculum::data_issues).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Activity {
    /// Activity name
    pub name: String,

    /// Activity type (e.g. "Experiment", "Observation")
    pub activity_type: Option<String>,

    /// Learning goal text
    pub learning_goal: Option<String>,

    /// Name of the concept this activity belongs to
    pub parent_concept: Option<String>,
}

impl Activity {
    /// Create an activity pointing at `parent`
    pub fn new(name: impl Into<String>, parent: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            activity_type: None,
            learning_goal: None,
            parent_concept: Some(parent.into()),
        }
    }

    /// The parent reference, treating an empty string as absent
    pub fn parent(&self) -> Option<&str> {
        self.parent_concept
            .as_deref()
            .filter(|p| !p.trim().is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_concept_builder() {
        let c = Concept::new("Photosynthesis", "Biology", "Plants")
            .with_interconnections(["Respiration"])
            .with_chapters(["Ch 1"]);
        assert_eq!(c.interconnections, vec!["Respiration"]);
        assert_eq!(c.chapter_references, vec!["Ch 1"]);
        assert!(c.brief_explanation.is_none());
    }

    #[test]
    fn test_activity_blank_parent_is_absent() {
        let mut a = Activity::new("Leaf test", "  ");
        assert_eq!(a.parent(), None);
        a.parent_concept = None;
        assert_eq!(a.parent(), None);
        a.parent_concept = Some("Photosynthesis".into());
        assert_eq!(a.parent(), Some("Photosynthesis"));
    }
}
