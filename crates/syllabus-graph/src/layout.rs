//! Widget configuration

use serde::Serialize;

/// Color applied to a node and its neighbours on hover/selection
pub const HIGHLIGHT_COLOR: &str = "#F7A7A6";

/// Force-directed solver parameters
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SolverConfig {
    /// Run the simulation at all
    pub enabled: bool,
    /// Solver name
    pub solver: String,
    /// Repulsion between nodes (negative)
    pub gravitational_constant: f64,
    /// Pull towards the center
    pub central_gravity: f64,
    /// Rest length of edges
    pub spring_length: f64,
    /// Edge stiffness
    pub spring_constant: f64,
    /// Overlap avoidance factor
    pub avoid_overlap: f64,
    /// Velocity cap
    pub max_velocity: f64,
    /// Velocity below which the layout is considered stable
    pub min_velocity: f64,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            solver: "forceAtlas2Based".to_string(),
            gravitational_constant: -150.0,
            central_gravity: 0.01,
            spring_length: 180.0,
            spring_constant: 0.05,
            avoid_overlap: 2.0,
            max_velocity: 30.0,
            min_velocity: 0.1,
        }
    }
}

/// Pre-render stabilization
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Stabilization {
    /// Run stabilization before the first paint
    pub enabled: bool,
    /// Iteration budget
    pub iterations: u32,
}

impl Default for Stabilization {
    fn default() -> Self {
        Self {
            enabled: true,
            iterations: 150,
        }
    }
}

/// Full widget configuration sent with every render
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphConfig {
    /// CSS width
    pub width: String,
    /// Height in pixels
    pub height: u32,
    /// Directed edges
    pub directed: bool,
    /// Dim everything but the clicked node and its neighbours
    pub highlight_neighbours: bool,
    /// Highlight color for the clicked node's neighbourhood
    pub highlight_color: String,
    /// Physics solver
    pub physics: SolverConfig,
    /// Stabilization pass
    pub stabilization: Stabilization,
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self {
            width: "100%".to_string(),
            height: 800,
            directed: false,
            highlight_neighbours: true,
            highlight_color: HIGHLIGHT_COLOR.to_string(),
            physics: SolverConfig::default(),
            stabilization: Stabilization::default(),
        }
    }
}

impl GraphConfig {
    /// Override the canvas height
    pub fn with_height(mut self, height: u32) -> Self {
        self.height = height;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_serialize_in_widget_shape() {
        let json = serde_json::to_value(GraphConfig::default()).unwrap();
        assert_eq!(json["width"], "100%");
        assert_eq!(json["height"], 800);
        assert_eq!(json["highlightColor"], "#F7A7A6");
        assert_eq!(json["directed"], false);
        assert_eq!(json["physics"]["enabled"], true);
        assert_eq!(json["physics"]["solver"], "forceAtlas2Based");
        assert_eq!(json["physics"]["gravitationalConstant"], -150.0);
        assert_eq!(json["physics"]["springLength"], 180.0);
        assert_eq!(json["stabilization"]["iterations"], 150);
    }
}
