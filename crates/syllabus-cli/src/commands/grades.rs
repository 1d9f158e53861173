//! Grades command implementation.

use crate::dashboard::Dashboard;
use crate::error::Result;
use crate::output::{Formatter, GradeSummary};
use syllabus_domain::traits::LearnedStore;
use syllabus_store::StoreError;

/// List configured grades with their load status.
pub fn execute_grades<S>(dashboard: &Dashboard<S>, formatter: &Formatter) -> Result<String>
where
    S: LearnedStore<Error = StoreError>,
{
    let library = dashboard.library();
    let summaries: Vec<GradeSummary> = library
        .grades()
        .iter()
        .map(|id| {
            let (concepts, activities) = library
                .curriculum(id)
                .map(|c| (c.concepts().len(), c.activities().len()))
                .unwrap_or((0, 0));
            GradeSummary {
                id: id.clone(),
                concepts,
                activities,
                active: id == dashboard.grade(),
                error: library.load_error(id).map(ToString::to_string),
            }
        })
        .collect();
    formatter.format_grades(&summaries)
}
