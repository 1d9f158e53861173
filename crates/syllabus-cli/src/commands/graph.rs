//! Graph command implementation.

use crate::commands::with_load_warning;
use crate::config::OutputFormat;
use crate::dashboard::Dashboard;
use crate::error::Result;
use crate::output::Formatter;
use syllabus_domain::traits::LearnedStore;
use syllabus_store::StoreError;

/// Print the graph of the active grade.
///
/// JSON output is the exact payload handed to the rendering widget.
pub fn execute_graph<S>(dashboard: &Dashboard<S>, formatter: &Formatter) -> Result<String>
where
    S: LearnedStore<Error = StoreError>,
{
    let out = formatter.format_graph(&dashboard.render().into_payload())?;
    if formatter.format() == OutputFormat::Json {
        return Ok(out);
    }
    Ok(with_load_warning(dashboard, formatter, out))
}
