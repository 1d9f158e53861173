//! Click command implementation.

use crate::dashboard::Dashboard;
use crate::error::Result;
use crate::output::Formatter;
use syllabus_domain::selection::SelectionChange;
use syllabus_domain::traits::LearnedStore;
use syllabus_store::StoreError;

/// Apply a raw click payload and print the resulting selection.
pub fn execute_click<S>(
    payload: &str,
    dashboard: &mut Dashboard<S>,
    formatter: &Formatter,
) -> Result<String>
where
    S: LearnedStore<Error = StoreError>,
{
    match dashboard.handle_click(payload) {
        SelectionChange::Selected(_) => match dashboard.render().selected {
            Some(detail) => formatter.format_concept(&detail),
            None => Ok(formatter.info("No concept selected.")),
        },
        SelectionChange::Cleared => Ok(formatter.info("Selection cleared.")),
        SelectionChange::Unchanged => Ok(match dashboard.selected() {
            Some(name) => formatter.info(&format!("Selection unchanged: {}", name)),
            None => formatter.info("No concept selected."),
        }),
    }
}
