//! Learned-set module - per grade, per domain sets of learned concepts

use std::collections::{BTreeMap, BTreeSet};

/// Concepts per domain within one grade
pub type DomainSets = BTreeMap<String, BTreeSet<String>>;

/// User-marked completion state, keyed `grade -> domain -> concepts`
///
/// Mirrors the persisted document shape `{ grade: { domain: [name, ...] } }`.
/// The set itself does not know the curriculum; callers derive `domain` from
/// the concept record so entries always belong to their domain.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LearnedSet {
    grades: BTreeMap<String, DomainSets>,
}

impl LearnedSet {
    /// Create an empty learned-set
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from the raw nested mapping
    pub fn from_map(grades: BTreeMap<String, DomainSets>) -> Self {
        Self { grades }
    }

    /// Borrow the raw nested mapping
    pub fn as_map(&self) -> &BTreeMap<String, DomainSets> {
        &self.grades
    }

    /// Domain sets recorded for `grade`
    pub fn grade(&self, grade: &str) -> Option<&DomainSets> {
        self.grades.get(grade)
    }

    /// Concepts learned in `domain` of `grade`
    pub fn learned_in(&self, grade: &str, domain: &str) -> Option<&BTreeSet<String>> {
        self.grades.get(grade).and_then(|d| d.get(domain))
    }

    /// Check whether a concept is marked learned
    pub fn is_learned(&self, grade: &str, domain: &str, concept: &str) -> bool {
        self.learned_in(grade, domain)
            .is_some_and(|set| set.contains(concept))
    }

    /// Add or remove a concept
    ///
    /// Idempotent. Returns `true` only when the state actually changed, so
    /// callers can skip redundant writes.
    pub fn set_learned(&mut self, grade: &str, domain: &str, concept: &str, learned: bool) -> bool {
        if learned {
            self.grades
                .entry(grade.to_string())
                .or_default()
                .entry(domain.to_string())
                .or_default()
                .insert(concept.to_string())
        } else {
            self.grades
                .get_mut(grade)
                .and_then(|domains| domains.get_mut(domain))
                .is_some_and(|set| set.remove(concept))
        }
    }

    /// Total number of learned entries for `grade`
    pub fn count(&self, grade: &str) -> usize {
        self.grade(grade)
            .map(|domains| domains.values().map(BTreeSet::len).sum())
            .unwrap_or(0)
    }
}
