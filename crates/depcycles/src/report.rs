//! Report rendering.
//!
//! Text output is one line per cycle, sorted by entity sequence, each line
//! being the chain's [`formatted_view`](DependencyChain::formatted_view).
//! JSON output carries the same sorted cycles plus search counters.

use serde::Serialize;

use crate::chain::DependencyChain;
use crate::config::ResearchConfig;
use crate::domain::{EntityId, EntityRegistry};
use crate::error::Result;
use crate::research::{CycleSearch, DependencyResearcher, SearchStats};

/// Output mode for the report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    /// Human-readable text format
    #[default]
    Text,
    /// JSON format for programmatic use
    Json,
}

/// JSON shape of a report.
#[derive(Debug, Clone, Serialize)]
pub struct JsonReport {
    /// Cycles as entity ID sequences, closing entity included.
    pub cycles: Vec<Vec<EntityId>>,
    /// Number of distinct cycles.
    pub count: usize,
    /// Whether the length cap cut the search short.
    pub truncated: bool,
    /// Search counters.
    pub stats: SearchStats,
}

/// Sort cycles and render one line per cycle.
///
/// Returns an empty string when there are no cycles.
#[must_use]
pub fn render_cycles(cycles: &[DependencyChain<'_>]) -> String {
    sorted(cycles)
        .into_iter()
        .map(|cycle| cycle.formatted_view() + "\n")
        .collect()
}

/// Build the JSON report for a search.
#[must_use]
pub fn json_report(search: &CycleSearch<'_>) -> JsonReport {
    let cycles: Vec<Vec<EntityId>> = sorted(&search.cycles)
        .into_iter()
        .map(|cycle| cycle.entities().to_vec())
        .collect();

    JsonReport {
        count: cycles.len(),
        cycles,
        truncated: search.is_truncated(),
        stats: search.stats,
    }
}

/// Render a search result in the requested mode.
///
/// # Errors
///
/// Returns [`crate::Error::Json`] if serialization fails.
pub fn render(search: &CycleSearch<'_>, mode: OutputMode) -> Result<String> {
    match mode {
        OutputMode::Text => Ok(render_cycles(&search.cycles)),
        OutputMode::Json => {
            let mut json = serde_json::to_string_pretty(&json_report(search))?;
            json.push('\n');
            Ok(json)
        }
    }
}

/// Parse an edge list, search it, and render the report.
///
/// # Errors
///
/// Returns [`crate::Error::Format`] for malformed input.
pub fn report_from_str(input: &str, config: ResearchConfig, mode: OutputMode) -> Result<String> {
    let edges = depcycles_edges::parse_edges(input)?;
    let registry = EntityRegistry::from_edges(&edges);
    let search = DependencyResearcher::new(&registry, config).find_cycles()?;
    render(&search, mode)
}

fn sorted<'a, 'r>(cycles: &'a [DependencyChain<'r>]) -> Vec<&'a DependencyChain<'r>> {
    let mut sorted: Vec<_> = cycles.iter().collect();
    sorted.sort();
    sorted
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn text(input: &str) -> String {
        report_from_str(input, ResearchConfig::default(), OutputMode::Text).unwrap()
    }

    #[rstest]
    #[case::triangle("1 2\n2 3\n3 1\n", "1 2 3 1 \n")]
    #[case::no_cycle("1 2\n2 3\n", "")]
    #[case::empty("", "")]
    #[case::self_loop("1 1", "1 1 \n")]
    #[case::two_cycle("1 2 2 1", "1 2 1 \n")]
    #[case::rotation_kept("3 1\n1 2\n2 3\n", "3 1 2 3 \n")]
    #[case::sorted_lines("5 6 6 5 1 1", "1 1 \n5 6 5 \n")]
    #[case::chord("1 2 2 3 3 4 4 5 5 1 3 1", "1 2 3 1 \n1 2 3 4 5 1 \n")]
    fn text_reports(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(text(input), expected);
    }

    #[test]
    fn non_elementary_closures_are_reported() {
        assert_eq!(
            text("1 2 2 3 3 1 2 4 4 2"),
            "1 2 3 1 \n1 2 4 2 3 1 \n1 2 4 2 4 2 3 1 \n2 4 2 \n"
        );
    }

    #[test]
    fn malformed_input_is_a_format_error() {
        let err = report_from_str("1 2 3", ResearchConfig::default(), OutputMode::Text).unwrap_err();
        assert!(matches!(err, crate::Error::Format(ref e) if e.is_format_error()));
    }

    #[test]
    fn json_report_lists_sorted_cycles() {
        let json = report_from_str("5 6 6 5 1 1", ResearchConfig::default(), OutputMode::Json)
            .unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["count"], 2);
        assert_eq!(value["cycles"], serde_json::json!([[1, 1], [5, 6, 5]]));
        assert_eq!(value["truncated"], false);
        assert_eq!(value["stats"]["distinct_cycles"], 2);
        assert!(json.ends_with('\n'));
    }

    #[test]
    fn json_report_for_acyclic_input_is_empty() {
        let json = report_from_str("1 2", ResearchConfig::default(), OutputMode::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["count"], 0);
        assert_eq!(value["cycles"], serde_json::json!([]));
    }

    #[test]
    fn render_cycles_does_not_reorder_input() {
        let registry = EntityRegistry::from_edges(&depcycles_edges::parse_edges("2 2 1 1").unwrap());
        let search = DependencyResearcher::new(&registry, ResearchConfig::default())
            .find_cycles()
            .unwrap();

        assert_eq!(search.cycles[0].formatted_view(), "2 2 ");
        assert_eq!(render_cycles(&search.cycles), "1 1 \n2 2 \n");
    }
}
