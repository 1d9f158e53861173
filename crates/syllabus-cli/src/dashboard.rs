//! Dashboard - session state and the per-interaction render input
//!
//! Every interaction mutates [`SessionState`] or the learned-set and then
//! recomputes a fresh [`RenderInput`] from scratch. Nothing in the render
//! input is cached between interactions.

use crate::error::{CliError, Result};
use serde::Serialize;
use syllabus_domain::selection::SelectionChange;
use syllabus_domain::traits::{LearnedStore, LlmProvider};
use syllabus_domain::{Curriculum, DataIssue, LearnedSet, ProgressReport, Selection};
use syllabus_graph::{decode_click_str, GraphBuilder, GraphConfig, GraphPayload, GraphView};
use syllabus_llm::{build_prompt, AssistantTask, ConceptContext, LlmError};
use syllabus_store::{CurriculumLibrary, StoreError};
use tracing::{debug, info, warn};

/// Active grade plus the selection slot
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionState {
    /// Active grade identifier
    pub grade: String,
    /// Focused concept
    pub selection: Selection,
}

/// One linked activity as shown in the detail panel
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActivityDetail {
    /// Activity name
    pub name: String,
    /// Activity type
    pub activity_type: Option<String>,
    /// Learning goal
    pub learning_goal: Option<String>,
}

/// Everything the side panel shows for the selected concept
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConceptDetail {
    /// Concept name
    pub name: String,
    /// Domain
    pub domain: String,
    /// Strand
    pub strand: String,
    /// Brief explanation
    pub explanation: Option<String>,
    /// Concept type
    pub concept_type: Option<String>,
    /// Cognitive level
    pub cognitive_level: Option<String>,
    /// Chapter references
    pub chapters: Vec<String>,
    /// Linked activities
    pub activities: Vec<ActivityDetail>,
    /// Interconnections that resolve in this grade
    pub related: Vec<String>,
    /// Marked learned in this grade
    pub learned: bool,
}

impl ConceptDetail {
    /// Gather the detail of `name`, or `None` if the grade lacks it
    pub fn from_curriculum(
        curriculum: &Curriculum,
        learned: &LearnedSet,
        name: &str,
    ) -> Option<Self> {
        let concept = curriculum.concept(name)?;
        Some(Self {
            name: concept.name.clone(),
            domain: concept.domain.clone(),
            strand: concept.strand.clone(),
            explanation: concept.brief_explanation.clone(),
            concept_type: concept.concept_type.clone(),
            cognitive_level: concept.cognitive_level.clone(),
            chapters: concept.chapter_references.clone(),
            activities: curriculum
                .activities_for(name)
                .into_iter()
                .map(|a| ActivityDetail {
                    name: a.name.clone(),
                    activity_type: a.activity_type.clone(),
                    learning_goal: a.learning_goal.clone(),
                })
                .collect(),
            related: curriculum
                .resolved_interconnections(name)
                .into_iter()
                .map(str::to_string)
                .collect(),
            learned: learned.is_learned(curriculum.grade(), &concept.domain, &concept.name),
        })
    }
}

/// Immutable view model rebuilt on every interaction
#[derive(Debug, Clone, PartialEq)]
pub struct RenderInput {
    /// Active grade
    pub grade: String,
    /// Graph of the active grade
    pub graph: GraphView,
    /// Detail of the selected concept
    pub selected: Option<ConceptDetail>,
    /// Per-domain progress
    pub progress: ProgressReport,
    /// Data-quality warnings
    pub issues: Vec<DataIssue>,
    /// Widget configuration
    pub layout: GraphConfig,
}

impl RenderInput {
    /// Pure function of curriculum, learned-set and session state
    pub fn compute(
        builder: &GraphBuilder,
        layout: &GraphConfig,
        curriculum: &Curriculum,
        learned: &LearnedSet,
        state: &SessionState,
    ) -> Self {
        Self {
            grade: state.grade.clone(),
            graph: builder.build(curriculum),
            selected: state
                .selection
                .current()
                .and_then(|name| ConceptDetail::from_curriculum(curriculum, learned, name)),
            progress: ProgressReport::compute(curriculum, learned),
            issues: curriculum.data_issues(),
            layout: layout.clone(),
        }
    }

    /// Graph plus widget configuration, as handed to the rendering widget
    pub fn into_payload(self) -> GraphPayload {
        GraphPayload::new(self.grade, self.graph, self.layout)
    }
}

/// Result of an assistant request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssistantReply {
    /// Model output
    Answer(String),
    /// Nothing selected; informational
    NoSelection,
    /// Upstream failure rendered as a short inline message
    Failed(String),
}

/// Owns the curricula, the learned-state store and the session
pub struct Dashboard<S> {
    library: CurriculumLibrary,
    store: S,
    learned: LearnedSet,
    state: SessionState,
    builder: GraphBuilder,
    layout: GraphConfig,
    fallback: Curriculum,
}

impl<S> Dashboard<S>
where
    S: LearnedStore<Error = StoreError>,
{
    /// Open a session on `grade`, or the first configured grade
    ///
    /// # Errors
    /// `UnknownGrade` if the grade is not configured; any error reading the
    /// learned-state store.
    pub fn new(library: CurriculumLibrary, store: S, grade: Option<&str>) -> Result<Self> {
        let grade = match grade {
            Some(g) if library.grades().iter().any(|known| known == g) => g.to_string(),
            Some(g) => return Err(StoreError::UnknownGrade(g.to_string()).into()),
            None => library
                .grades()
                .first()
                .cloned()
                .ok_or_else(|| CliError::Config("No grades configured".into()))?,
        };
        let learned = store.load()?;
        info!("Session opened on grade {}", grade);

        Ok(Self {
            library,
            store,
            learned,
            fallback: Curriculum::empty(grade.as_str()),
            state: SessionState {
                grade,
                selection: Selection::new(),
            },
            builder: GraphBuilder::new(),
            layout: GraphConfig::default(),
        })
    }

    /// Configured grades
    pub fn grades(&self) -> &[String] {
        self.library.grades()
    }

    /// The library of loaded grades
    pub fn library(&self) -> &CurriculumLibrary {
        &self.library
    }

    /// Active grade
    pub fn grade(&self) -> &str {
        &self.state.grade
    }

    /// Session state
    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// Cached learned-set, in sync with the last successful write
    pub fn learned(&self) -> &LearnedSet {
        &self.learned
    }

    /// Curriculum of the active grade
    pub fn curriculum(&self) -> &Curriculum {
        self.library
            .curriculum(&self.state.grade)
            .unwrap_or(&self.fallback)
    }

    /// Load error of the active grade, if it failed
    pub fn load_error(&self) -> Option<&StoreError> {
        self.library.load_error(&self.state.grade)
    }

    /// Currently selected concept name
    pub fn selected(&self) -> Option<&str> {
        self.state.selection.current()
    }

    /// Switch the active grade and re-validate the selection
    pub fn switch_grade(&mut self, grade: &str) -> Result<SelectionChange> {
        if !self.library.grades().iter().any(|g| g == grade) {
            return Err(StoreError::UnknownGrade(grade.to_string()).into());
        }
        self.state.grade = grade.to_string();
        self.fallback = Curriculum::empty(grade);

        let curriculum = self
            .library
            .curriculum(&self.state.grade)
            .unwrap_or(&self.fallback);
        let change = self.state.selection.on_grade_switch(curriculum);
        info!("Switched to grade {} ({:?})", grade, change);
        Ok(change)
    }

    /// Apply a raw click payload from the graph widget
    pub fn handle_click(&mut self, raw: &str) -> SelectionChange {
        let click = decode_click_str(raw);
        let curriculum = self
            .library
            .curriculum(&self.state.grade)
            .unwrap_or(&self.fallback);
        let change = self.state.selection.apply_click(&click, curriculum);
        debug!("Click {:?} -> {:?}", click, change);
        change
    }

    /// Select a concept by name
    ///
    /// A name the active grade lacks clears the selection before the error
    /// is returned.
    pub fn select(&mut self, name: &str) -> Result<SelectionChange> {
        let curriculum = self
            .library
            .curriculum(&self.state.grade)
            .unwrap_or(&self.fallback);
        let change = self.state.selection.set(name, curriculum);
        if !curriculum.contains(name) {
            debug!("Unknown concept '{}' ({:?})", name, change);
            return Err(CliError::UnknownConcept {
                concept: name.to_string(),
                grade: self.state.grade.clone(),
            });
        }
        Ok(change)
    }

    /// Mark or unmark a concept of the active grade as learned
    ///
    /// The domain is taken from the concept record. The cache is updated only
    /// after the store reports a successful write, so a failed save leaves
    /// the in-memory state untouched and the call can be retried.
    pub fn mark_learned(&mut self, concept: &str, learned: bool) -> Result<bool> {
        let domain = self
            .curriculum()
            .concept(concept)
            .map(|c| c.domain.clone())
            .ok_or_else(|| CliError::UnknownConcept {
                concept: concept.to_string(),
                grade: self.state.grade.clone(),
            })?;

        let grade = self.state.grade.clone();
        match self.store.mark_learned(&grade, &domain, concept, learned) {
            Ok(changed) => {
                self.learned.set_learned(&grade, &domain, concept, learned);
                Ok(changed)
            }
            Err(e) => {
                warn!("Failed to save learned state for {}: {}", concept, e);
                Err(e.into())
            }
        }
    }

    /// Fresh render input for the current state
    pub fn render(&self) -> RenderInput {
        RenderInput::compute(
            &self.builder,
            &self.layout,
            self.curriculum(),
            &self.learned,
            &self.state,
        )
    }

    /// Run an assistant task on the selected concept
    ///
    /// Never fails: a missing selection or an upstream error is returned as
    /// a reply for inline display.
    pub fn ask<P>(&self, task: AssistantTask, provider: &P) -> AssistantReply
    where
        P: LlmProvider<Error = LlmError>,
    {
        let context = match self
            .selected()
            .and_then(|name| ConceptContext::from_curriculum(self.curriculum(), name))
        {
            Some(context) => context,
            None => return AssistantReply::NoSelection,
        };

        info!("Assistant {} on '{}' via {}", task, context.name, provider.describe());
        match provider.generate(&build_prompt(task, &context)) {
            Ok(text) => AssistantReply::Answer(text),
            Err(e) => {
                warn!("Assistant request failed: {}", e);
                AssistantReply::Failed(e.to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use syllabus_domain::{Activity, Concept};
    use syllabus_domain::traits::CurriculumSource;
    use syllabus_llm::MockProvider;
    use syllabus_store::MemoryLearnedStore;

    struct FixedSource;

    impl CurriculumSource for FixedSource {
        type Error = StoreError;

        fn grades(&self) -> Vec<String> {
            vec!["7".to_string(), "8".to_string()]
        }

        fn load_grade(&self, grade: &str) -> std::result::Result<Curriculum, StoreError> {
            let concepts = match grade {
                "7" => vec![
                    Concept::new("Cell", "Biology", "Cells").with_interconnections(["Tissue"]),
                    Concept::new("Tissue", "Biology", "Cells"),
                    Concept::new("Organ", "Biology", "Body"),
                    Concept::new("Organism", "Biology", "Body"),
                    Concept::new("Force", "Physics", "Motion"),
                ],
                _ => vec![
                    Concept::new("Cell", "Biology", "Cells"),
                    Concept::new("Atom", "Chemistry", "Matter"),
                ],
            };
            Curriculum::new(
                grade,
                concepts,
                vec![Activity::new("Onion peel", "Cell"), Activity::new("Ghost", "Mitochondria")],
            )
            .map_err(|reason| StoreError::DataCorrupt {
                grade: grade.to_string(),
                reason,
            })
        }
    }

    fn dashboard(store: MemoryLearnedStore) -> Dashboard<MemoryLearnedStore> {
        Dashboard::new(CurriculumLibrary::load(&FixedSource), store, None).unwrap()
    }

    #[test]
    fn test_defaults_to_first_grade() {
        let dash = dashboard(MemoryLearnedStore::new());
        assert_eq!(dash.grade(), "7");
        assert!(dash.selected().is_none());
    }

    #[test]
    fn test_unknown_grade_rejected() {
        let result = Dashboard::new(
            CurriculumLibrary::load(&FixedSource),
            MemoryLearnedStore::new(),
            Some("12"),
        );
        assert!(matches!(result, Err(CliError::Store(StoreError::UnknownGrade(_)))));
    }

    #[test]
    fn test_learn_unlearn_progress() {
        let mut dash = dashboard(MemoryLearnedStore::new());
        assert_eq!(dash.render().progress.percent("Biology"), Some(0.0));

        assert!(dash.mark_learned("Cell", true).unwrap());
        assert_eq!(dash.render().progress.percent("Biology"), Some(25.0));

        assert!(dash.mark_learned("Tissue", true).unwrap());
        assert_eq!(dash.render().progress.percent("Biology"), Some(50.0));

        assert!(dash.mark_learned("Tissue", false).unwrap());
        assert_eq!(dash.render().progress.percent("Biology"), Some(25.0));
        assert_eq!(dash.render().progress.percent("Physics"), Some(0.0));

        assert!(!dash.mark_learned("Cell", true).unwrap());
    }

    #[test]
    fn test_learned_is_per_grade() {
        let mut dash = dashboard(MemoryLearnedStore::new());
        dash.mark_learned("Cell", true).unwrap();
        dash.switch_grade("8").unwrap();
        assert_eq!(dash.render().progress.percent("Biology"), Some(0.0));
    }

    #[test]
    fn test_failed_save_leaves_state_unchanged() {
        let mut dash = dashboard(MemoryLearnedStore::new().failing());
        let result = dash.mark_learned("Cell", true);
        assert!(matches!(
            result,
            Err(CliError::Store(StoreError::PersistenceWriteFailure(_)))
        ));
        assert_eq!(dash.learned().count("7"), 0);
        assert_eq!(dash.render().progress.percent("Biology"), Some(0.0));
    }

    #[test]
    fn test_unknown_concept_cannot_be_learned() {
        let mut dash = dashboard(MemoryLearnedStore::new());
        assert!(matches!(
            dash.mark_learned("Mitochondria", true),
            Err(CliError::UnknownConcept { .. })
        ));
    }

    #[test]
    fn test_click_then_grade_switch() {
        let mut dash = dashboard(MemoryLearnedStore::new());
        let change = dash.handle_click(r#"{"nodes": ["concept::Organ"]}"#);
        assert_eq!(change, SelectionChange::Selected("Organ".to_string()));

        // "Organ" does not exist in grade 8
        assert_eq!(dash.switch_grade("8").unwrap(), SelectionChange::Cleared);
        assert!(dash.selected().is_none());
    }

    #[test]
    fn test_selection_survives_switch_when_concept_exists() {
        let mut dash = dashboard(MemoryLearnedStore::new());
        dash.select("Cell").unwrap();
        assert_eq!(dash.switch_grade("8").unwrap(), SelectionChange::Unchanged);
        assert_eq!(dash.selected(), Some("Cell"));
    }

    #[test]
    fn test_domain_click_keeps_selection() {
        let mut dash = dashboard(MemoryLearnedStore::new());
        dash.handle_click("concept::Cell");
        assert_eq!(dash.handle_click("domain::Biology"), SelectionChange::Unchanged);
        assert_eq!(dash.selected(), Some("Cell"));
    }

    #[test]
    fn test_unknown_name_clears_selection() {
        let mut dash = dashboard(MemoryLearnedStore::new());
        dash.select("Cell").unwrap();
        assert!(matches!(
            dash.select("Atom"),
            Err(CliError::UnknownConcept { .. })
        ));
        assert_eq!(dash.selected(), None);
        assert!(dash.render().selected.is_none());
    }

    #[test]
    fn test_malformed_click_clears_selection() {
        let mut dash = dashboard(MemoryLearnedStore::new());
        dash.select("Cell").unwrap();
        assert_eq!(dash.handle_click("null"), SelectionChange::Unchanged);
        assert_eq!(dash.selected(), Some("Cell"));

        assert_eq!(dash.handle_click(r#"{"edges": []}"#), SelectionChange::Cleared);
        assert_eq!(dash.selected(), None);

        dash.select("Cell").unwrap();
        assert_eq!(dash.handle_click("42"), SelectionChange::Cleared);
        assert_eq!(dash.selected(), None);
    }

    #[test]
    fn test_repeated_click_after_select() {
        let mut dash = dashboard(MemoryLearnedStore::new());
        dash.handle_click("concept::Cell");
        dash.select("Tissue").unwrap();
        assert_eq!(
            dash.handle_click("concept::Cell"),
            SelectionChange::Selected("Cell".to_string())
        );
    }

    #[test]
    fn test_render_payload() {
        let dash = dashboard(MemoryLearnedStore::new());
        let payload = dash.render().into_payload();
        assert_eq!(payload.grade, "7");
        assert_eq!(payload.nodes.len(), 2 + 3 + 5);
        assert_eq!(payload.config, GraphConfig::default());
    }

    #[test]
    fn test_render_input() {
        let mut dash = dashboard(MemoryLearnedStore::new());
        dash.select("Cell").unwrap();
        dash.mark_learned("Cell", true).unwrap();

        let render = dash.render();
        let detail = render.selected.as_ref().unwrap();
        assert!(detail.learned);
        assert_eq!(detail.activities.len(), 1);
        assert_eq!(detail.related, vec!["Tissue"]);
        assert_eq!(render.issues.len(), 1);
        assert_eq!(render.graph.nodes.len(), 2 + 3 + 5);
        assert_eq!(render, dash.render());
    }

    #[test]
    fn test_ask_without_selection() {
        let dash = dashboard(MemoryLearnedStore::new());
        let provider = MockProvider::new("answer");
        assert_eq!(dash.ask(AssistantTask::Explain, &provider), AssistantReply::NoSelection);
        assert_eq!(provider.call_count(), 0);
    }

    #[test]
    fn test_ask_with_selection() {
        let mut dash = dashboard(MemoryLearnedStore::new());
        dash.select("Cell").unwrap();
        let provider = MockProvider::new("A cell is the unit of life.");

        let reply = dash.ask(AssistantTask::Quiz, &provider);
        assert_eq!(reply, AssistantReply::Answer("A cell is the unit of life.".to_string()));
        let prompt = provider.last_prompt().unwrap();
        assert!(prompt.starts_with(AssistantTask::Quiz.instruction()));
        assert!(prompt.contains("Activities: Onion peel"));
    }

    #[test]
    fn test_ask_failure_is_inline() {
        let mut dash = dashboard(MemoryLearnedStore::new());
        dash.select("Force").unwrap();
        let provider = MockProvider::new("");
        assert!(matches!(
            dash.ask(AssistantTask::Explain, &provider),
            AssistantReply::Failed(_)
        ));
    }
}
