//! Check command implementation.

use crate::dashboard::Dashboard;
use crate::error::Result;
use crate::output::Formatter;
use syllabus_domain::traits::LearnedStore;
use syllabus_store::StoreError;

/// Print every unresolved activity parent and interconnection target.
pub fn execute_check<S>(dashboard: &Dashboard<S>, formatter: &Formatter) -> Result<String>
where
    S: LearnedStore<Error = StoreError>,
{
    let render = dashboard.render();
    formatter.format_issues(&render.grade, &render.issues)
}
