//! Trait definitions for external interactions
//!
//! These traits define the boundaries between domain logic and infrastructure.
//! Infrastructure implementations live in other crates.

use crate::{Curriculum, LearnedSet};

/// Trait for loading per-grade curriculum data
///
/// Implemented by the infrastructure layer (syllabus-store)
pub trait CurriculumSource {
    /// Error type for load operations
    type Error;

    /// Grade identifiers this source can serve
    fn grades(&self) -> Vec<String>;

    /// Load one grade; failure must not affect other grades
    fn load_grade(&self, grade: &str) -> Result<Curriculum, Self::Error>;
}

/// Trait for the persisted learned-set
///
/// Implemented by the infrastructure layer (syllabus-store)
pub trait LearnedStore {
    /// Error type for store operations
    type Error;

    /// Read the persisted learned-set; an absent store is empty, not an error
    fn load(&self) -> Result<LearnedSet, Self::Error>;

    /// Add or remove one concept and persist before returning
    ///
    /// Idempotent: returns `Ok(false)` without writing when the state already
    /// matches. On error the persisted state is unchanged.
    fn mark_learned(
        &mut self,
        grade: &str,
        domain: &str,
        concept: &str,
        learned: bool,
    ) -> Result<bool, Self::Error>;
}

/// Trait for LLM provider operations
///
/// Implemented by the infrastructure layer (syllabus-llm)
pub trait LlmProvider {
    /// Error type for LLM operations
    type Error;

    /// Generate text completion
    fn generate(&self, prompt: &str) -> Result<String, Self::Error>;

    /// Short provider description for logs and status lines
    fn describe(&self) -> String;
}
