mod common;

use common::{three_agent_scenario, view};
use scenario_viz::application::{ComparisonReporter, OPTIMAL_RULE};
use scenario_viz::domains::scenario::{Assignment, StaticAssignment};
use scenario_viz::RenderError;

fn candidates() -> Vec<StaticAssignment> {
    vec![
        StaticAssignment::from_choices(&[Some(1), Some(1), Some(2)], 15.0, 0.75),
        StaticAssignment::from_choices(&[None, Some(2), Some(2)], 10.0, 0.5),
        StaticAssignment::from_choices(&[Some(1), None, None], 5.0, 0.25),
    ]
}

fn as_dyn(list: &[StaticAssignment]) -> Vec<&dyn Assignment> {
    list.iter().map(|a| a as &dyn Assignment).collect()
}

#[test]
fn one_row_per_assignment_plus_optimal() {
    let (view, _) = view(None);
    let list = candidates();
    let mut out = Vec::new();
    let report = ComparisonReporter::new(&view)
        .compare(&three_agent_scenario(1), &as_dyn(&list), None, &mut out)
        .unwrap();

    assert_eq!(report.rows.len(), 1 + list.len());
    assert_eq!(report.rows[0].rule, OPTIMAL_RULE);
    assert_eq!(report.rows[0].efficiency, 1.0);
    let rules: Vec<&str> = report.rows[1..].iter().map(|r| r.rule.as_str()).collect();
    assert_eq!(rules, vec!["Assignment #1", "Assignment #2", "Assignment #3"]);
}

#[test]
fn efficiency_is_score_over_optimal() {
    let (view, _) = view(None);
    let list = vec![StaticAssignment::from_choices(&[Some(1), Some(1), Some(1)], 7.0, 0.123)];
    let mut out = Vec::new();
    let report = ComparisonReporter::new(&view)
        .compare(&three_agent_scenario(1), &as_dyn(&list), None, &mut out)
        .unwrap();
    // The assignment's own efficiency getter is ignored.
    assert_eq!(report.rows[1].efficiency, 7.0 / 20.0);
}

#[test]
fn table_layout() {
    let (view, _) = view(None);
    let list = candidates();
    let titles = vec!["Greedy".to_string(), "Lazy".to_string(), "Solo".to_string()];
    let mut out = Vec::new();
    ComparisonReporter::new(&view)
        .compare(&three_agent_scenario(1), &as_dyn(&list), Some(titles.as_slice()), &mut out)
        .unwrap();
    let text = String::from_utf8(out).unwrap();

    assert!(text.contains("Assignment Comparison:"));
    let header = text.lines().find(|l| l.starts_with("Rule")).unwrap();
    let columns: Vec<&str> = header.split_whitespace().collect();
    assert_eq!(columns, vec!["Rule", "x1", "x2", "x3", "f(x)", "γ(x)"]);

    let lazy = text.lines().find(|l| l.starts_with("Lazy")).unwrap();
    let cells: Vec<&str> = lazy.split_whitespace().collect();
    assert_eq!(cells, vec!["Lazy", "-", "t2", "t2", "10", "0.5"]);
    assert!(!text.contains("Visualizations saved to"));
}

#[test]
fn every_view_is_saved() {
    let dir = tempfile::tempdir().unwrap();
    let (view, writer) = view(Some(dir.path()));
    let list = candidates();
    let mut out = Vec::new();
    ComparisonReporter::new(&view)
        .compare(&three_agent_scenario(1), &as_dyn(&list), None, &mut out)
        .unwrap();

    let names: Vec<String> = writer
        .paths()
        .iter()
        .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
        .collect();
    assert_eq!(names, vec!["Optimal.png", "Assignment#1.png", "Assignment#2.png", "Assignment#3.png"]);
    assert!(String::from_utf8(out).unwrap().contains("Visualizations saved to"));
}

#[test]
fn title_count_must_match() {
    let (view, _) = view(None);
    let list = candidates();
    let titles = vec!["Only one".to_string()];
    let mut out = Vec::new();
    let err = ComparisonReporter::new(&view)
        .compare(&three_agent_scenario(1), &as_dyn(&list), Some(titles.as_slice()), &mut out)
        .unwrap_err();
    assert!(matches!(err, RenderError::InvalidInput(_)));
}

#[test]
fn bad_assignment_aborts_batch() {
    let dir = tempfile::tempdir().unwrap();
    let (view, writer) = view(Some(dir.path()));
    let list = vec![
        StaticAssignment::from_choices(&[Some(1), Some(9), Some(2)], 15.0, 0.75),
        StaticAssignment::from_choices(&[Some(1), Some(1), Some(2)], 15.0, 0.75),
    ];
    let mut out = Vec::new();
    let err = ComparisonReporter::new(&view)
        .compare(&three_agent_scenario(1), &as_dyn(&list), None, &mut out)
        .unwrap_err();
    assert!(matches!(err, RenderError::MalformedScenario(_)));
    // Only the optimal view made it out; no table was printed.
    assert_eq!(writer.paths().len(), 1);
    assert!(out.is_empty());
}
