//! Rendering of gate outcomes for the terminal.

use console::style;

use crate::application::GateOutcome;

use super::table::list_table;

/// Render a gate outcome as human-readable text.
///
/// A clean pass is a single green line; a blocked contract gets the two
/// error collections as a table so every violation is visible at once.
pub fn render_outcome(outcome: &GateOutcome) -> String {
    if outcome.may_advance() {
        return format!(
            "{} contract may advance ({})",
            style("PASS").green().bold(),
            outcome.contract_type
        );
    }

    let mut table = list_table(&["pass", "field / rule", "problem"]);
    for err in &outcome.report.structural {
        table.add_row(vec![
            "structural".to_string(),
            err.field_path.clone(),
            format!("expected {}, got {}", err.expected, err.actual),
        ]);
    }
    for err in &outcome.report.semantic {
        table.add_row(vec!["semantic".to_string(), String::new(), err.to_string()]);
    }

    format!(
        "{} contract blocked at the gate ({}): {} error(s)\n{table}",
        style("BLOCKED").red().bold(),
        outcome.contract_type,
        outcome.report.error_count()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::{ContractGate, ValidationReport};
    use crate::domain::models::SequenceGraph;
    use crate::services::{SchemaRegistry, SharedRegistry};
    use serde_json::json;

    fn gate() -> ContractGate {
        ContractGate::new(
            SharedRegistry::new(SchemaRegistry::with_builtins()),
            SequenceGraph::canonical(),
        )
    }

    #[test]
    fn test_render_pass() {
        let outcome = gate()
            .validate(&json!({
                "contract_version": "1.0.0",
                "story_id": "STORY-GH-1",
                "source_agent": "github",
                "target_agent": "project_manager",
                "description": "A story",
                "priority_level": "low",
                "time_constraint_minutes": 10
            }))
            .unwrap();
        let rendered = render_outcome(&outcome);
        assert!(rendered.contains("PASS"));
        assert!(rendered.contains("project_manager_input"));
    }

    #[test]
    fn test_render_blocked_lists_every_error() {
        let outcome = gate()
            .validate(&json!({
                "contract_version": "1.0.0",
                "target_agent": "project_manager"
            }))
            .unwrap();
        let rendered = render_outcome(&outcome);
        assert!(rendered.contains("BLOCKED"));
        assert!(rendered.contains("story_id"));
        assert!(rendered.contains("priority_level"));
    }

    #[test]
    fn test_report_serializes_both_collections() {
        let report = ValidationReport::default();
        let json = serde_json::to_value(&report).unwrap();
        assert!(json.get("structural").is_some());
        assert!(json.get("semantic").is_some());
    }
}
