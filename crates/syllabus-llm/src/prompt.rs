//! Assistant tasks and prompt assembly

use std::fmt;
use std::str::FromStr;
use syllabus_domain::Curriculum;

/// The three fixed assistant tasks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AssistantTask {
    /// Explain the concept in simple terms
    Explain,
    /// Relate the concept to its neighbours
    Connect,
    /// Quiz the student on the concept
    Quiz,
}

impl AssistantTask {
    /// All tasks in menu order
    pub const ALL: [AssistantTask; 3] = [Self::Explain, Self::Connect, Self::Quiz];

    /// Short name used on the command line
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Explain => "explain",
            Self::Connect => "connect",
            Self::Quiz => "quiz",
        }
    }

    /// Fixed instruction sent with the context block
    pub fn instruction(&self) -> &'static str {
        match self {
            Self::Explain => {
                "Explain this concept to a middle-school student in simple words. \
                 Use one everyday example and keep it under 150 words."
            }
            Self::Connect => {
                "Describe how this concept connects to the related concepts listed. \
                 For each connection give one sentence a middle-school student can follow."
            }
            Self::Quiz => {
                "Write three short quiz questions about this concept, \
                 each with four options (A-D), then list the correct answers at the end."
            }
        }
    }
}

impl fmt::Display for AssistantTask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AssistantTask {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "explain" => Ok(Self::Explain),
            "connect" => Ok(Self::Connect),
            "quiz" => Ok(Self::Quiz),
            other => Err(format!(
                "Unknown task '{}': expected explain, connect or quiz",
                other
            )),
        }
    }
}

/// Plain-text facts about one concept
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConceptContext {
    /// Concept name
    pub name: String,
    /// Domain name
    pub domain: String,
    /// Strand name
    pub strand: String,
    /// Brief explanation
    pub explanation: Option<String>,
    /// Chapter references
    pub chapters: Vec<String>,
    /// Names of linked activities
    pub activities: Vec<String>,
    /// Interconnections that resolve within the grade
    pub related: Vec<String>,
}

impl ConceptContext {
    /// Collect the context of `name`, or `None` if the grade lacks it
    pub fn from_curriculum(curriculum: &Curriculum, name: &str) -> Option<Self> {
        let concept = curriculum.concept(name)?;
        Some(Self {
            name: concept.name.clone(),
            domain: concept.domain.clone(),
            strand: concept.strand.clone(),
            explanation: concept.brief_explanation.clone(),
            chapters: concept.chapter_references.clone(),
            activities: curriculum
                .activities_for(name)
                .into_iter()
                .map(|a| a.name.clone())
                .collect(),
            related: curriculum
                .resolved_interconnections(name)
                .into_iter()
                .map(str::to_string)
                .collect(),
        })
    }

    /// Render the context block
    pub fn render(&self) -> String {
        fn list(items: &[String]) -> String {
            if items.is_empty() {
                "none".to_string()
            } else {
                items.join(", ")
            }
        }

        format!(
            "Concept: {}\nDomain: {}\nStrand: {}\nExplanation: {}\nChapters: {}\nActivities: {}\nRelated concepts: {}",
            self.name,
            self.domain,
            self.strand,
            self.explanation.as_deref().unwrap_or("none"),
            list(&self.chapters),
            list(&self.activities),
            list(&self.related),
        )
    }
}

/// Full prompt: task instruction followed by the context block
pub fn build_prompt(task: AssistantTask, context: &ConceptContext) -> String {
    format!("{}\n\n{}", task.instruction(), context.render())
}

#[cfg(test)]
mod tests {
    use super::*;
    use syllabus_domain::{Activity, Concept};

    fn curriculum() -> Curriculum {
        Curriculum::new(
            "7",
            vec![
                Concept::new("Friction", "Physics", "Forces")
                    .with_explanation("A force that opposes motion.")
                    .with_chapters(["Ch 7"])
                    .with_interconnections(["Motion", "Heat"]),
                Concept::new("Motion", "Physics", "Forces"),
            ],
            vec![Activity::new("Rolling marbles", "Friction")],
        )
        .unwrap()
    }

    #[test]
    fn test_task_parsing() {
        assert_eq!("Quiz".parse::<AssistantTask>(), Ok(AssistantTask::Quiz));
        assert!("summarize".parse::<AssistantTask>().is_err());
        for task in AssistantTask::ALL {
            assert_eq!(task.as_str().parse::<AssistantTask>(), Ok(task));
        }
    }

    #[test]
    fn test_context_from_curriculum() {
        let ctx = ConceptContext::from_curriculum(&curriculum(), "Friction").unwrap();
        assert_eq!(ctx.activities, vec!["Rolling marbles"]);
        assert_eq!(ctx.related, vec!["Motion"]);
        assert!(ConceptContext::from_curriculum(&curriculum(), "Heat").is_none());
    }

    #[test]
    fn test_prompt_contains_instruction_and_context() {
        let ctx = ConceptContext::from_curriculum(&curriculum(), "Motion").unwrap();
        let prompt = build_prompt(AssistantTask::Connect, &ctx);
        assert!(prompt.starts_with(AssistantTask::Connect.instruction()));
        assert!(prompt.contains("Concept: Motion"));
        assert!(prompt.contains("Explanation: none"));
        assert!(prompt.contains("Activities: none"));
    }
}
