//! Syllabus Graph Layer
//!
//! Everything that crosses the boundary with the graph-rendering widget.
//!
//! # Architecture
//!
//! - `builder`: pure function from a curriculum to nodes and edges
//! - `style`: domain palette and per-tier visual hints
//! - `layout`: widget configuration (size, physics solver, highlighting)
//! - `click`: decoding of raw click payloads into `ClickEvent`
//!
//! # Examples
//!
//! ```
//! use syllabus_domain::{Activity, Concept, Curriculum};
//! use syllabus_graph::GraphBuilder;
//!
//! let concepts = vec![
//!     Concept::new("Friction", "Physics", "Forces").with_interconnections(["Motion"]),
//!     Concept::new("Motion", "Physics", "Forces"),
//! ];
//! let activities = vec![Activity::new("Rolling marbles", "Friction")];
//!
//! let curriculum = Curriculum::new("7", concepts, activities).unwrap();
//!
//! let graph = GraphBuilder::new().build(&curriculum);
//! assert_eq!(graph.nodes.len(), 4);
//! assert_eq!(graph.edges.len(), 4);
//! ```

#![warn(missing_docs)]

pub mod builder;
pub mod click;
pub mod layout;
pub mod style;

pub use builder::{EdgeKind, GraphBuilder, GraphEdge, GraphNode, GraphPayload, GraphView};
pub use click::{decode_click, decode_click_str};
pub use layout::GraphConfig;
pub use style::DomainPalette;
