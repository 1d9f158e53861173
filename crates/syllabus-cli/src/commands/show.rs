//! Show command implementation.

use crate::dashboard::Dashboard;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use syllabus_domain::traits::LearnedStore;
use syllabus_store::StoreError;

/// Select `concept` (when given) and print its detail panel.
pub fn execute_show<S>(
    concept: Option<&str>,
    dashboard: &mut Dashboard<S>,
    formatter: &Formatter,
) -> Result<String>
where
    S: LearnedStore<Error = StoreError>,
{
    if let Some(name) = concept {
        dashboard.select(name)?;
    }
    let detail = dashboard.render().selected.ok_or(CliError::NoSelection)?;
    formatter.format_concept(&detail)
}
