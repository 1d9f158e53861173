//! Command implementations.
//!
//! Each command runs against a [`Dashboard`](crate::dashboard::Dashboard)
//! and returns the text to print, so one-shot mode and the REPL share them.

pub mod ask;
pub mod check;
pub mod click;
pub mod grades;
pub mod graph;
pub mod learn;
pub mod progress;
pub mod show;

pub use self::ask::execute_ask;
pub use self::check::execute_check;
pub use self::click::execute_click;
pub use self::grades::execute_grades;
pub use self::graph::execute_graph;
pub use self::learn::execute_learn;
pub use self::progress::execute_progress;
pub use self::show::execute_show;

use crate::dashboard::Dashboard;
use crate::output::Formatter;
use syllabus_domain::traits::LearnedStore;
use syllabus_store::StoreError;

/// Warning line for a grade whose data failed to load.
pub(crate) fn load_warning<S>(dashboard: &Dashboard<S>, formatter: &Formatter) -> Option<String>
where
    S: LearnedStore<Error = StoreError>,
{
    dashboard.load_error().map(|e| {
        formatter.warning(&format!(
            "Grade {} has no data ({}). Showing an empty graph.",
            dashboard.grade(),
            e
        ))
    })
}

/// Prefix `body` with the load warning, if any.
pub(crate) fn with_load_warning<S>(
    dashboard: &Dashboard<S>,
    formatter: &Formatter,
    body: String,
) -> String
where
    S: LearnedStore<Error = StoreError>,
{
    match load_warning(dashboard, formatter) {
        Some(warning) => format!("{}\n{}", warning, body),
        None => body,
    }
}
