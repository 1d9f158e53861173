//! Progress command implementation.

use crate::commands::with_load_warning;
use crate::config::OutputFormat;
use crate::dashboard::Dashboard;
use crate::error::Result;
use crate::output::Formatter;
use syllabus_domain::traits::LearnedStore;
use syllabus_store::StoreError;

/// Print per-domain progress for the active grade.
pub fn execute_progress<S>(dashboard: &Dashboard<S>, formatter: &Formatter) -> Result<String>
where
    S: LearnedStore<Error = StoreError>,
{
    let out = formatter.format_progress(&dashboard.render().progress)?;
    if formatter.format() == OutputFormat::Json {
        return Ok(out);
    }
    Ok(with_load_warning(dashboard, formatter, out))
}
