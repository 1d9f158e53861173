//! Progress module - per-domain completion ratios
//!
//! Progress is derived, never stored. Every domain present in the grade's
//! concept set appears in the report, at 0.0 when nothing is learned.

use crate::{Curriculum, LearnedSet};

/// Completion of a single domain
#[derive(Debug, Clone, PartialEq)]
pub struct DomainProgress {
    /// Domain name
    pub domain: String,

    /// Concepts of the domain that are marked learned
    pub learned: usize,

    /// Concepts in the domain
    pub total: usize,

    /// `100 * learned / total`, rounded to one decimal place
    pub percent: f64,
}

/// Per-domain progress for one grade, in domain order of first appearance
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProgressReport {
    /// Grade identifier
    pub grade: String,

    /// One entry per domain
    pub domains: Vec<DomainProgress>,
}

impl ProgressReport {
    /// Compute the report for `curriculum` against `learned`
    ///
    /// Only learned names that are real concepts of the domain count, so a
    /// stale or misfiled entry in the persisted set cannot push a domain
    /// past 100%.
    pub fn compute(curriculum: &Curriculum, learned: &LearnedSet) -> Self {
        let grade = curriculum.grade();
        let domains = curriculum
            .domains()
            .into_iter()
            .filter_map(|domain| {
                let mut total = 0;
                let mut done = 0;
                for concept in curriculum.concepts_in_domain(domain) {
                    total += 1;
                    if learned.is_learned(grade, domain, &concept.name) {
                        done += 1;
                    }
                }
                percent(done, total).map(|percent| DomainProgress {
                    domain: domain.to_string(),
                    learned: done,
                    total,
                    percent,
                })
            })
            .collect();

        Self {
            grade: grade.to_string(),
            domains,
        }
    }

    /// Percentage for `domain`, if it exists in the grade
    pub fn percent(&self, domain: &str) -> Option<f64> {
        self.domains
            .iter()
            .find(|d| d.domain == domain)
            .map(|d| d.percent)
    }

    /// Overall completion across all domains
    pub fn overall(&self) -> Option<f64> {
        let learned = self.domains.iter().map(|d| d.learned).sum();
        let total = self.domains.iter().map(|d| d.total).sum();
        percent(learned, total)
    }
}

/// `round(100 * learned / total, 1)`; `None` when `total` is zero
pub fn percent(learned: usize, total: usize) -> Option<f64> {
    if total == 0 {
        return None;
    }
    let raw = 100.0 * learned as f64 / total as f64;
    Some((raw * 10.0).round() / 10.0)
}
