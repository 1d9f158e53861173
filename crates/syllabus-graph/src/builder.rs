//! Graph Builder - three-tier nodes, tree edges, and lateral edges

use crate::layout::GraphConfig;
use crate::style::{
    DomainPalette, Font, Shape, TierStyle, ACTIVITY_BORDER_COLOR, CONCEPT_STYLE, DOMAIN_EDGE_COLOR,
    DOMAIN_STYLE, LATERAL_EDGE_COLOR, STRAND_EDGE_COLOR, STRAND_STYLE,
};
use serde::{Serialize, Serializer};
use std::collections::HashSet;
use syllabus_domain::{Curriculum, NodeId, NodeTier};
use tracing::debug;

/// A node handed to the rendering widget
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphNode {
    /// Tier-prefixed identifier
    pub id: String,
    /// Display label
    pub label: String,
    /// Node tier
    #[serde(rename = "group", serialize_with = "serialize_tier")]
    pub tier: NodeTier,
    /// Shape hint
    pub shape: Shape,
    /// Size hint
    pub size: u32,
    /// Fill color
    pub color: String,
    /// Border color (concepts only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border_color: Option<String>,
    /// Border width (concepts only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border_width: Option<u32>,
    /// Label font
    pub font: Font,
    /// Concept has at least one linked activity
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub has_activity: bool,
}

/// Kind of edge
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EdgeKind {
    /// Domain → strand
    DomainStrand,
    /// Strand → concept
    StrandConcept,
    /// Concept → concept interconnection
    Lateral,
}

/// An edge handed to the rendering widget
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct GraphEdge {
    /// Source node identifier
    pub source: String,
    /// Target node identifier
    pub target: String,
    /// Edge kind
    pub kind: EdgeKind,
    /// Line color
    pub color: String,
}

/// Nodes and edges of one grade
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct GraphView {
    /// Domain, then strand, then concept nodes
    pub nodes: Vec<GraphNode>,
    /// Tree edges followed by lateral edges
    pub edges: Vec<GraphEdge>,
}

impl GraphView {
    /// Find a node by identifier
    pub fn node(&self, id: &str) -> Option<&GraphNode> {
        self.nodes.iter().find(|n| n.id == id)
    }

    /// Nodes of one tier
    pub fn nodes_in(&self, tier: NodeTier) -> impl Iterator<Item = &GraphNode> {
        self.nodes.iter().filter(move |n| n.tier == tier)
    }

    /// Edges of one kind
    pub fn edges_of(&self, kind: EdgeKind) -> impl Iterator<Item = &GraphEdge> {
        self.edges.iter().filter(move |e| e.kind == kind)
    }
}

/// Everything the widget needs for one render
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GraphPayload {
    /// Grade identifier
    pub grade: String,
    /// Node list
    pub nodes: Vec<GraphNode>,
    /// Edge list
    pub edges: Vec<GraphEdge>,
    /// Widget configuration
    pub config: GraphConfig,
}

impl GraphPayload {
    /// Bundle a view with its widget configuration
    pub fn new(grade: impl Into<String>, view: GraphView, config: GraphConfig) -> Self {
        Self {
            grade: grade.into(),
            nodes: view.nodes,
            edges: view.edges,
            config,
        }
    }
}

fn serialize_tier<S: Serializer>(tier: &NodeTier, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(tier.as_str())
}

/// Builds a [`GraphView`] from curriculum records
#[derive(Debug, Clone, Default)]
pub struct GraphBuilder {
    palette: DomainPalette,
}

impl GraphBuilder {
    /// Builder with the default domain palette
    pub fn new() -> Self {
        Self::default()
    }

    /// Build nodes and edges of a loaded curriculum
    ///
    /// One node per distinct domain, per distinct `(domain, strand)` pair,
    /// and per concept. Tree edges link each domain to its strands and each
    /// strand to its concepts. A lateral edge is added for every
    /// interconnection whose target is a known concept; unresolved targets
    /// are skipped without error. The activity flag is recomputed on every
    /// call.
    pub fn build(&self, curriculum: &Curriculum) -> GraphView {
        let concepts = curriculum.concepts();
        let domains = curriculum.domains();
        let strands = curriculum.strands();
        let with_activity = curriculum.concepts_with_activities();

        let mut nodes = Vec::with_capacity(domains.len() + strands.len() + concepts.len());
        let mut edges = Vec::new();

        for domain in &domains {
            nodes.push(self.tier_node(
                NodeId::domain(domain),
                domain,
                NodeTier::Domain,
                DOMAIN_STYLE,
                domain,
            ));
        }

        for (domain, strand) in &strands {
            let strand_id = NodeId::strand(domain, strand);
            nodes.push(self.tier_node(
                strand_id.clone(),
                strand,
                NodeTier::Strand,
                STRAND_STYLE,
                domain,
            ));
            edges.push(GraphEdge {
                source: NodeId::domain(domain).as_str().to_string(),
                target: strand_id.as_str().to_string(),
                kind: EdgeKind::DomainStrand,
                color: DOMAIN_EDGE_COLOR.to_string(),
            });
        }

        for concept in concepts {
            let has_activity = with_activity.contains(concept.name.as_str());
            let fill = self.palette.color_for(&concept.domain).to_string();
            let concept_id = NodeId::concept(&concept.name);

            nodes.push(GraphNode {
                id: concept_id.as_str().to_string(),
                label: concept.name.clone(),
                tier: NodeTier::Concept,
                shape: CONCEPT_STYLE.shape,
                size: CONCEPT_STYLE.size,
                border_color: Some(if has_activity {
                    ACTIVITY_BORDER_COLOR.to_string()
                } else {
                    fill.clone()
                }),
                border_width: Some(if has_activity { 3 } else { 1 }),
                color: fill,
                font: CONCEPT_STYLE.font(),
                has_activity,
            });
            edges.push(GraphEdge {
                source: NodeId::strand(&concept.domain, &concept.strand)
                    .as_str()
                    .to_string(),
                target: concept_id.as_str().to_string(),
                kind: EdgeKind::StrandConcept,
                color: STRAND_EDGE_COLOR.to_string(),
            });
        }

        let mut lateral_seen = HashSet::new();
        let mut skipped = 0usize;
        for concept in concepts {
            for target in &concept.interconnections {
                if !curriculum.contains(target) {
                    skipped += 1;
                    continue;
                }
                if !lateral_seen.insert((concept.name.as_str(), target.as_str())) {
                    continue;
                }
                edges.push(GraphEdge {
                    source: NodeId::concept(&concept.name).as_str().to_string(),
                    target: NodeId::concept(target).as_str().to_string(),
                    kind: EdgeKind::Lateral,
                    color: LATERAL_EDGE_COLOR.to_string(),
                });
            }
        }

        debug!(
            "Built graph: {} nodes, {} edges ({} unresolved interconnections skipped)",
            nodes.len(),
            edges.len(),
            skipped
        );

        GraphView { nodes, edges }
    }

    fn tier_node(
        &self,
        id: NodeId,
        label: &str,
        tier: NodeTier,
        style: TierStyle,
        domain: &str,
    ) -> GraphNode {
        GraphNode {
            id: id.as_str().to_string(),
            label: label.to_string(),
            tier,
            shape: style.shape,
            size: style.size,
            color: self.palette.color_for(domain).to_string(),
            border_color: None,
            border_width: None,
            font: style.font(),
            has_activity: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use syllabus_domain::{Activity, Concept};

    fn concepts() -> Vec<Concept> {
        vec![
            Concept::new("Photosynthesis", "Biology (The Living World)", "Plants")
                .with_interconnections(["Respiration", "Chlorophyll", "Respiration"]),
            Concept::new("Respiration", "Biology (The Living World)", "Life Processes")
                .with_interconnections(["Photosynthesis"]),
            Concept::new("Friction", "Physics (The Physical World)", "Forces"),
            // same display name as a domain and a strand
            Concept::new("Forces", "Physics (The Physical World)", "Forces"),
        ]
    }

    fn activities() -> Vec<Activity> {
        vec![
            Activity::new("Starch test", "Photosynthesis"),
            Activity::new("Light and leaves", "Photosynthesis II"),
        ]
    }

    fn curriculum(activities: Vec<Activity>) -> Curriculum {
        Curriculum::new("7", concepts(), activities).unwrap()
    }

    #[test]
    fn test_one_node_per_entity() {
        let graph = GraphBuilder::new().build(&curriculum(activities()));
        assert_eq!(graph.nodes_in(NodeTier::Domain).count(), 2);
        assert_eq!(graph.nodes_in(NodeTier::Strand).count(), 3);
        assert_eq!(graph.nodes_in(NodeTier::Concept).count(), 4);

        let ids: HashSet<&str> = graph.nodes.iter().map(|n| n.id.as_str()).collect();
        assert_eq!(ids.len(), graph.nodes.len(), "node ids must be unique");
    }

    #[test]
    fn test_each_concept_has_one_tree_edge() {
        let graph = GraphBuilder::new().build(&curriculum(activities()));
        let mut incoming: HashMap<&str, usize> = HashMap::new();
        for edge in graph.edges_of(EdgeKind::StrandConcept) {
            *incoming.entry(edge.target.as_str()).or_default() += 1;
        }
        for c in concepts() {
            let id = NodeId::concept(&c.name);
            assert_eq!(incoming.get(id.as_str()), Some(&1), "{}", c.name);
        }
        assert_eq!(graph.edges_of(EdgeKind::DomainStrand).count(), 3);
    }

    #[test]
    fn test_lateral_edges_only_for_resolved_targets() {
        let graph = GraphBuilder::new().build(&curriculum(activities()));
        let lateral: Vec<(&str, &str)> = graph
            .edges_of(EdgeKind::Lateral)
            .map(|e| (e.source.as_str(), e.target.as_str()))
            .collect();
        assert_eq!(
            lateral,
            vec![
                ("concept::Photosynthesis", "concept::Respiration"),
                ("concept::Respiration", "concept::Photosynthesis"),
            ]
        );
        assert!(graph.edges.iter().all(|e| !e.target.contains("Chlorophyll")));
    }

    #[test]
    fn test_activity_border_flag() {
        let graph = GraphBuilder::new().build(&curriculum(activities()));
        let photo = graph.node("concept::Photosynthesis").unwrap();
        assert!(photo.has_activity);
        assert_eq!(photo.border_width, Some(3));
        assert_eq!(photo.border_color.as_deref(), Some(ACTIVITY_BORDER_COLOR));

        let friction = graph.node("concept::Friction").unwrap();
        assert!(!friction.has_activity);
        assert_eq!(friction.border_width, Some(1));
        assert_eq!(friction.border_color.as_deref(), Some(friction.color.as_str()));
    }

    #[test]
    fn test_activity_flag_recomputed_per_call() {
        let builder = GraphBuilder::new();
        let first = builder.build(&curriculum(activities()));
        let second = builder.build(&curriculum(Vec::new()));
        assert!(first.node("concept::Photosynthesis").unwrap().has_activity);
        assert!(!second.node("concept::Photosynthesis").unwrap().has_activity);
    }

    #[test]
    fn test_strand_color_follows_domain() {
        let graph = GraphBuilder::new().build(&curriculum(Vec::new()));
        let strand = graph
            .node("strand::Physics (The Physical World)::Forces")
            .unwrap();
        assert_eq!(strand.color, "#1f77b4");
    }

    #[test]
    fn test_node_serialization() {
        let graph = GraphBuilder::new().build(&curriculum(activities()));
        let json = serde_json::to_value(graph.node("concept::Photosynthesis").unwrap()).unwrap();
        assert_eq!(json["group"], "concept");
        assert_eq!(json["shape"], "dot");
        assert_eq!(json["borderWidth"], 3);
        assert_eq!(json["hasActivity"], true);

        let json = serde_json::to_value(graph.node("domain::Physics (The Physical World)").unwrap())
            .unwrap();
        assert!(json.get("borderWidth").is_none());
        assert_eq!(json["font"]["bold"], true);
    }

    #[test]
    fn test_empty_input() {
        let graph = GraphBuilder::new().build(&Curriculum::empty("7"));
        assert!(graph.nodes.is_empty());
        assert!(graph.edges.is_empty());
    }
}
