//! Output formatting for the CLI.

use crate::config::OutputFormat;
use crate::dashboard::{AssistantReply, ConceptDetail};
use crate::error::Result;
use colored::*;
use serde_json::json;
use syllabus_domain::{DataIssue, NodeTier, ProgressReport};
use syllabus_graph::{EdgeKind, GraphPayload};
use tabled::{
    builder::Builder,
    settings::{object::Rows, Alignment, Modify, Style},
};

/// Placeholder for absent text fields.
pub const MISSING: &str = "—";

/// Width of the progress bar in table mode.
const BAR_WIDTH: usize = 20;

/// One row of the `grades` listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GradeSummary {
    /// Grade identifier
    pub id: String,
    /// Concept count (0 when unavailable)
    pub concepts: usize,
    /// Activity count
    pub activities: usize,
    /// Active in this session
    pub active: bool,
    /// Load error, if the grade is unavailable
    pub error: Option<String>,
}

/// Output formatter.
pub struct Formatter {
    format: OutputFormat,
    color_enabled: bool,
}

impl Formatter {
    /// Create a new formatter.
    pub fn new(format: OutputFormat, color_enabled: bool) -> Self {
        Self {
            format,
            color_enabled,
        }
    }

    /// Selected output format.
    pub fn format(&self) -> OutputFormat {
        self.format
    }

    /// Format a progress report.
    pub fn format_progress(&self, report: &ProgressReport) -> Result<String> {
        match self.format {
            OutputFormat::Json => {
                let domains: Vec<serde_json::Value> = report
                    .domains
                    .iter()
                    .map(|d| {
                        json!({
                            "domain": d.domain,
                            "learned": d.learned,
                            "total": d.total,
                            "percent": d.percent,
                        })
                    })
                    .collect();
                Ok(serde_json::to_string_pretty(&json!({
                    "grade": report.grade,
                    "domains": domains,
                    "overall": report.overall(),
                }))?)
            }
            OutputFormat::Quiet => Ok(report
                .domains
                .iter()
                .map(|d| format!("{}\t{:.1}", d.domain, d.percent))
                .collect::<Vec<_>>()
                .join("\n")),
            OutputFormat::Table => {
                if report.domains.is_empty() {
                    return Ok(self.warning(&format!("No concepts in grade {}.", report.grade)));
                }

                let mut builder = Builder::default();
                builder.push_record(["Domain", "Learned", "Progress"]);
                for d in &report.domains {
                    builder.push_record([
                        d.domain.clone(),
                        format!("{}/{}", d.learned, d.total),
                        format!("{} {:>5.1}%", progress_bar(d.percent, BAR_WIDTH), d.percent),
                    ]);
                }
                let mut out = self.table(builder);
                if let Some(overall) = report.overall() {
                    out.push('\n');
                    out.push_str(&format!("Overall: {:.1}%", overall));
                }
                Ok(out)
            }
        }
    }

    /// Format the detail panel of one concept.
    pub fn format_concept(&self, detail: &ConceptDetail) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(detail)?),
            OutputFormat::Quiet => Ok(detail.name.clone()),
            OutputFormat::Table => {
                let mut builder = Builder::default();
                builder.push_record(["Field", "Value"]);
                builder.push_record(["Concept".to_string(), detail.name.clone()]);
                builder.push_record(["Domain".to_string(), detail.domain.clone()]);
                builder.push_record(["Strand".to_string(), detail.strand.clone()]);
                builder.push_record(["Type".to_string(), or_missing(&detail.concept_type)]);
                builder.push_record(["Cognitive level".to_string(), or_missing(&detail.cognitive_level)]);
                builder.push_record(["Explanation".to_string(), or_missing(&detail.explanation)]);
                builder.push_record(["Chapters".to_string(), join_or_missing(&detail.chapters)]);
                builder.push_record(["Related".to_string(), join_or_missing(&detail.related)]);
                builder.push_record(["Activities".to_string(), detail.activities.len().to_string()]);
                builder.push_record([
                    "Learned".to_string(),
                    if detail.learned { "yes" } else { "no" }.to_string(),
                ]);
                let mut out = self.table(builder);

                out.push_str("\n\n");
                if detail.activities.is_empty() {
                    out.push_str(&self.info("No activities linked to this concept."));
                } else {
                    let mut activities = Builder::default();
                    activities.push_record(["Activity", "Type", "Learning goal"]);
                    for a in &detail.activities {
                        activities.push_record([
                            a.name.clone(),
                            or_missing(&a.activity_type),
                            or_missing(&a.learning_goal),
                        ]);
                    }
                    out.push_str(&self.table(activities));
                }
                Ok(out)
            }
        }
    }

    /// Format the data-quality check.
    pub fn format_issues(&self, grade: &str, issues: &[DataIssue]) -> Result<String> {
        match self.format {
            OutputFormat::Json => {
                let items: Vec<serde_json::Value> = issues
                    .iter()
                    .map(|issue| match issue {
                        DataIssue::UnlinkedActivity { activity, parent } => json!({
                            "kind": "unlinked_activity",
                            "activity": activity,
                            "parent": parent,
                        }),
                        DataIssue::DanglingInterconnection { concept, target } => json!({
                            "kind": "dangling_interconnection",
                            "concept": concept,
                            "target": target,
                        }),
                    })
                    .collect();
                Ok(serde_json::to_string_pretty(&json!({
                    "grade": grade,
                    "issues": items,
                }))?)
            }
            OutputFormat::Quiet => Ok(issues
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join("\n")),
            OutputFormat::Table => {
                if issues.is_empty() {
                    return Ok(self.success(&format!(
                        "Grade {}: all activities are properly linked",
                        grade
                    )));
                }
                let mut builder = Builder::default();
                builder.push_record(["Issue", "Source", "Missing target"]);
                for issue in issues {
                    let row = match issue {
                        DataIssue::UnlinkedActivity { activity, parent } => [
                            "Unlinked activity".to_string(),
                            activity.clone(),
                            parent.clone().unwrap_or_else(|| MISSING.to_string()),
                        ],
                        DataIssue::DanglingInterconnection { concept, target } => [
                            "Dangling interconnection".to_string(),
                            concept.clone(),
                            target.clone(),
                        ],
                    };
                    builder.push_record(row);
                }
                Ok(format!(
                    "{}\n{}",
                    self.warning(&format!("Grade {}: {} data issue(s)", grade, issues.len())),
                    self.table(builder)
                ))
            }
        }
    }

    /// Format the list of configured grades.
    pub fn format_grades(&self, grades: &[GradeSummary]) -> Result<String> {
        match self.format {
            OutputFormat::Json => {
                let items: Vec<serde_json::Value> = grades
                    .iter()
                    .map(|g| {
                        json!({
                            "id": g.id,
                            "concepts": g.concepts,
                            "activities": g.activities,
                            "active": g.active,
                            "error": g.error,
                        })
                    })
                    .collect();
                Ok(serde_json::to_string_pretty(&items)?)
            }
            OutputFormat::Quiet => Ok(grades
                .iter()
                .map(|g| g.id.clone())
                .collect::<Vec<_>>()
                .join("\n")),
            OutputFormat::Table => {
                let mut builder = Builder::default();
                builder.push_record(["", "Grade", "Concepts", "Activities", "Status"]);
                for g in grades {
                    let status = match &g.error {
                        Some(e) => self.colorize(e, "red"),
                        None => self.colorize("ok", "green"),
                    };
                    builder.push_record([
                        if g.active { "*" } else { "" }.to_string(),
                        g.id.clone(),
                        g.concepts.to_string(),
                        g.activities.to_string(),
                        status,
                    ]);
                }
                Ok(self.table(builder))
            }
        }
    }

    /// Format a graph payload.
    ///
    /// JSON mode emits the full widget payload; table mode a per-tier summary.
    pub fn format_graph(&self, payload: &GraphPayload) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(payload)?),
            OutputFormat::Quiet => Ok(payload
                .nodes
                .iter()
                .map(|n| n.id.clone())
                .collect::<Vec<_>>()
                .join("\n")),
            OutputFormat::Table => {
                let count_nodes =
                    |tier: NodeTier| payload.nodes.iter().filter(|n| n.tier == tier).count();
                let count_edges =
                    |kind: EdgeKind| payload.edges.iter().filter(|e| e.kind == kind).count();
                let with_activity = payload.nodes.iter().filter(|n| n.has_activity).count();

                let mut builder = Builder::default();
                builder.push_record(["Element", "Count"]);
                builder.push_record(["Domains".to_string(), count_nodes(NodeTier::Domain).to_string()]);
                builder.push_record(["Strands".to_string(), count_nodes(NodeTier::Strand).to_string()]);
                builder.push_record(["Concepts".to_string(), count_nodes(NodeTier::Concept).to_string()]);
                builder.push_record(["  with activities".to_string(), with_activity.to_string()]);
                builder.push_record([
                    "Tree edges".to_string(),
                    (count_edges(EdgeKind::DomainStrand) + count_edges(EdgeKind::StrandConcept))
                        .to_string(),
                ]);
                builder.push_record(["Lateral edges".to_string(), count_edges(EdgeKind::Lateral).to_string()]);
                Ok(format!("Grade {}\n{}", payload.grade, self.table(builder)))
            }
        }
    }

    /// Format an assistant reply.
    pub fn format_reply(&self, reply: &AssistantReply) -> String {
        match reply {
            AssistantReply::Answer(text) => text.clone(),
            AssistantReply::NoSelection => {
                self.info("Select a concept first to ask the assistant about it.")
            }
            AssistantReply::Failed(reason) => self.error(&format!("Assistant unavailable: {}", reason)),
        }
    }

    /// Format a success message.
    pub fn success(&self, message: &str) -> String {
        self.colorize(&format!("✓ {}", message), "green")
    }

    /// Format an error message.
    pub fn error(&self, message: &str) -> String {
        self.colorize(&format!("✗ {}", message), "red")
    }

    /// Format an info message.
    pub fn info(&self, message: &str) -> String {
        self.colorize(&format!("ℹ {}", message), "blue")
    }

    /// Format a warning message.
    pub fn warning(&self, message: &str) -> String {
        self.colorize(&format!("⚠ {}", message), "yellow")
    }

    fn table(&self, builder: Builder) -> String {
        let mut table = builder.build();
        table
            .with(Style::rounded())
            .with(Modify::new(Rows::first()).with(Alignment::center()));
        table.to_string()
    }

    /// Colorize text if color is enabled.
    fn colorize(&self, text: &str, color: &str) -> String {
        if !self.color_enabled {
            return text.to_string();
        }

        match color {
            "red" => text.red().to_string(),
            "green" => text.green().to_string(),
            "blue" => text.blue().to_string(),
            "yellow" => text.yellow().to_string(),
            _ => text.to_string(),
        }
    }
}

fn or_missing(value: &Option<String>) -> String {
    value
        .as_deref()
        .filter(|v| !v.trim().is_empty())
        .unwrap_or(MISSING)
        .to_string()
}

fn join_or_missing(values: &[String]) -> String {
    if values.is_empty() {
        MISSING.to_string()
    } else {
        values.join(", ")
    }
}

/// Text progress bar for `percent` in `[0, 100]`.
pub fn progress_bar(percent: f64, width: usize) -> String {
    let filled = ((percent.clamp(0.0, 100.0) / 100.0) * width as f64).round() as usize;
    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled.min(width)))
}
