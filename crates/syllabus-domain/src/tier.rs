//! Tier module - namespaced node identifiers for the three graph tiers

use std::fmt;

/// Separator between a tier prefix and the rest of an identifier
pub const TIER_SEPARATOR: &str = "::";

/// Tier of a node in the curriculum tree
///
/// Domain, strand and concept nodes share one identifier space. Every
/// identifier starts with its tier prefix so a domain and a concept never
/// collide even when they share a display name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum NodeTier {
    /// Top-level subject category
    Domain,

    /// Sub-category within a domain
    Strand,

    /// Individual concept
    Concept,
}

impl NodeTier {
    /// Get the tier prefix (without separator)
    pub fn as_str(&self) -> &'static str {
        match self {
            NodeTier::Domain => "domain",
            NodeTier::Strand => "strand",
            NodeTier::Concept => "concept",
        }
    }

    /// Parse a tier from its prefix
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "domain" => Some(NodeTier::Domain),
            "strand" => Some(NodeTier::Strand),
            "concept" => Some(NodeTier::Concept),
            _ => None,
        }
    }
}

impl std::str::FromStr for NodeTier {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("Invalid tier: {}", s))
    }
}

/// Tier-prefixed node identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(String);

impl NodeId {
    /// Identifier of a domain node: `domain::<domain>`
    pub fn domain(domain: &str) -> Self {
        Self(format!("domain{}{}", TIER_SEPARATOR, domain))
    }

    /// Identifier of a strand node: `strand::<domain>::<strand>`
    ///
    /// The domain is part of the identifier so identically named strands
    /// under different domains stay distinct.
    pub fn strand(domain: &str, strand: &str) -> Self {
        Self(format!(
            "strand{sep}{}{sep}{}",
            domain,
            strand,
            sep = TIER_SEPARATOR
        ))
    }

    /// Identifier of a concept node: `concept::<name>`
    pub fn concept(name: &str) -> Self {
        Self(format!("concept{}{}", TIER_SEPARATOR, name))
    }

    /// Get the identifier as a string
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Split a raw identifier into its tier and remainder
pub fn split_tier(raw: &str) -> Option<(NodeTier, &str)> {
    let (prefix, rest) = raw.split_once(TIER_SEPARATOR)?;
    NodeTier::parse(prefix).map(|tier| (tier, rest))
}

/// Extract the concept name from a raw identifier
///
/// Returns `None` unless `raw` carries the concept prefix and a non-empty name.
///
/// # Examples
///
/// ```
/// use syllabus_domain::tier::concept_name;
///
/// assert_eq!(concept_name("concept::Friction"), Some("Friction"));
/// assert_eq!(concept_name("domain::Physics"), None);
/// assert_eq!(concept_name("Friction"), None);
/// ```
pub fn concept_name(raw: &str) -> Option<&str> {
    match split_tier(raw) {
        Some((NodeTier::Concept, name)) if !name.is_empty() => Some(name),
        _ => None,
    }
}
