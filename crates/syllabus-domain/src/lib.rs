//! Syllabus Domain Layer
//!
//! This crate contains the curriculum model and the session logic that every
//! other layer depends upon. It has no external dependencies and defines the
//! value objects, state machines, and trait interfaces used by storage, graph
//! building, the assistant, and the CLI.
//!
//! ## Key Concepts
//!
//! - **Concept**: an atomic curriculum topic, keyed by its display name
//! - **Activity**: a learning exercise that points at one concept by name
//! - **Curriculum**: the concepts and activities of one grade, plus indexes
//! - **Tiers**: Domain ⊃ Strand ⊃ Concept, namespaced in one identifier space
//! - **Selection**: the focused concept, always null or resolvable
//! - **LearnedSet**: per grade, per domain sets of concepts marked learned
//!
//! ## Architecture
//!
//! - No external crate dependencies
//! - No I/O; loading and persistence live in `syllabus-store`
//! - Trait definitions for all external interactions

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod click;
pub mod concept;
pub mod curriculum;
pub mod learned;
pub mod progress;
pub mod selection;
pub mod tier;
pub mod traits;

// Re-exports for convenience
pub use click::ClickEvent;
pub use concept::{Activity, Concept};
pub use curriculum::{Curriculum, DataIssue};
pub use learned::LearnedSet;
pub use progress::{DomainProgress, ProgressReport};
pub use selection::Selection;
pub use tier::{NodeId, NodeTier};
