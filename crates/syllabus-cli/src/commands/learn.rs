//! Learn command implementation.

use crate::dashboard::Dashboard;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use syllabus_domain::traits::LearnedStore;
use syllabus_store::StoreError;

/// Mark `concept` (or the selected concept) as learned or not learned.
///
/// The reply includes the updated progress of the concept's domain.
pub fn execute_learn<S>(
    concept: Option<&str>,
    learned: bool,
    dashboard: &mut Dashboard<S>,
    formatter: &Formatter,
) -> Result<String>
where
    S: LearnedStore<Error = StoreError>,
{
    let name = match concept {
        Some(name) => name.to_string(),
        None => dashboard
            .selected()
            .map(str::to_string)
            .ok_or(CliError::NoSelection)?,
    };

    let changed = dashboard.mark_learned(&name, learned)?;
    let domain = dashboard
        .curriculum()
        .concept(&name)
        .map(|c| c.domain.clone())
        .unwrap_or_default();

    let message = match (changed, learned) {
        (true, true) => formatter.success(&format!("Marked '{}' as learned", name)),
        (true, false) => formatter.success(&format!("Marked '{}' as not learned", name)),
        (false, true) => formatter.info(&format!("'{}' was already learned", name)),
        (false, false) => formatter.info(&format!("'{}' was not marked as learned", name)),
    };

    Ok(match dashboard.render().progress.percent(&domain) {
        Some(percent) => format!("{}\n{}: {:.1}%", message, domain, percent),
        None => message,
    })
}
