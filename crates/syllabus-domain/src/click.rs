//! Click module - the closed set of click payload shapes
//!
//! The graph widget reports clicks in several raw shapes. They are decoded
//! once at the boundary (see `syllabus-graph`) into [`ClickEvent`] so that
//! nothing downstream branches on raw shape again.

use crate::tier;

/// A decoded click from the rendering adapter
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ClickEvent {
    /// Nothing was clicked
    NoSelection,

    /// The payload had no recognizable shape
    Invalid,

    /// A list of node identifiers; only the first one is significant
    NodeList(Vec<String>),

    /// A single node identifier
    SingleId(String),
}

impl ClickEvent {
    /// The first node identifier carried by the event
    pub fn first_id(&self) -> Option<&str> {
        match self {
            ClickEvent::NoSelection | ClickEvent::Invalid => None,
            ClickEvent::NodeList(ids) => ids.first().map(String::as_str),
            ClickEvent::SingleId(id) => Some(id.as_str()),
        }
    }

    /// Extract the concept name if the event targets a concept-tier node
    ///
    /// Total: every variant yields either a name or `None`.
    ///
    /// # Examples
    ///
    /// ```
    /// use syllabus_domain::ClickEvent;
    ///
    /// let click = ClickEvent::NodeList(vec!["concept::Friction".into()]);
    /// assert_eq!(click.concept_name(), Some("Friction"));
    ///
    /// let click = ClickEvent::SingleId("domain::Physics".into());
    /// assert_eq!(click.concept_name(), None);
    /// ```
    pub fn concept_name(&self) -> Option<&str> {
        self.first_id().and_then(tier::concept_name)
    }

    /// Normalize the event into an owned, optional concept name
    pub fn normalize(&self) -> Option<String> {
        self.concept_name().map(str::to_string)
    }
}
