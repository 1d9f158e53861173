//! Ask command implementation.

use crate::dashboard::{AssistantReply, Dashboard};
use crate::error::Result;
use crate::output::Formatter;
use syllabus_domain::traits::{LearnedStore, LlmProvider};
use syllabus_llm::{AssistantTask, LlmError};
use syllabus_store::StoreError;

/// Run an assistant task on `concept` (when given) or the selected concept.
///
/// Upstream failures, including a provider that could not be built, are
/// rendered inline and never returned as errors.
pub fn execute_ask<S, P>(
    task: AssistantTask,
    concept: Option<&str>,
    dashboard: &mut Dashboard<S>,
    assistant: &std::result::Result<P, LlmError>,
    formatter: &Formatter,
) -> Result<String>
where
    S: LearnedStore<Error = StoreError>,
    P: LlmProvider<Error = LlmError>,
{
    if let Some(name) = concept {
        dashboard.select(name)?;
    }
    let reply = match assistant {
        Ok(provider) => dashboard.ask(task, provider),
        Err(e) => AssistantReply::Failed(e.to_string()),
    };
    Ok(formatter.format_reply(&reply))
}
