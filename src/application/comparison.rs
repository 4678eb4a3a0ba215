use super::scenario_view::ScenarioView;
use crate::common::{RenderError, RenderResult};
use crate::domains::render::{format_number, round_to, ViewRequest};
use crate::domains::scenario::{Assignment, Metric, Scenario, ScenarioSnapshot, TargetId};
use std::io::Write;
use tracing::info;

pub const OPTIMAL_RULE: &str = "Optimal";

#[derive(Debug, Clone, PartialEq)]
pub struct ComparisonRow {
    pub rule: String,
    /// `t<id>` per agent, `-` for an idle agent.
    pub choices: Vec<String>,
    pub score: f64,
    /// `score / optimal score`, unrounded.
    pub efficiency: f64,
}

impl ComparisonRow {
    fn new(rule: &str, choices: &[Option<TargetId>], score: f64, efficiency: f64) -> Self {
        Self {
            rule: rule.to_string(),
            choices: choices
                .iter()
                .map(|c| c.map_or_else(|| "-".to_string(), |t| format!("t{}", t)))
                .collect(),
            score,
            efficiency,
        }
    }
}

/// Optimal row first, then one row per compared assignment.
#[derive(Debug, Clone)]
pub struct ComparisonReport {
    pub agent_count: usize,
    pub rows: Vec<ComparisonRow>,
}

impl ComparisonReport {
    pub fn headers(&self) -> Vec<String> {
        let mut headers = vec!["Rule".to_string()];
        headers.extend((1..=self.agent_count).map(|i| format!("x{}", i)));
        headers.push("f(x)".to_string());
        headers.push("γ(x)".to_string());
        headers
    }

    /// Plain-text table: header, dashed rule, rows. Numbers are right-aligned
    /// and efficiencies rounded to three decimals.
    pub fn to_table(&self) -> String {
        let headers = self.headers();
        let body: Vec<Vec<String>> = self
            .rows
            .iter()
            .map(|r| {
                let mut cells = vec![r.rule.clone()];
                cells.extend(r.choices.iter().cloned());
                cells.push(format_number(r.score));
                cells.push(format_number(round_to(r.efficiency, 3)));
                cells
            })
            .collect();

        let numeric_from = headers.len() - 2;
        let widths: Vec<usize> = (0..headers.len())
            .map(|c| {
                body.iter()
                    .filter_map(|row| row.get(c))
                    .chain(std::iter::once(&headers[c]))
                    .map(|s| s.chars().count())
                    .max()
                    .unwrap_or(0)
            })
            .collect();

        let line = |cells: &[String]| {
            cells
                .iter()
                .enumerate()
                .map(|(c, s)| pad(s, widths[c], c >= numeric_from))
                .collect::<Vec<_>>()
                .join("  ")
                .trim_end()
                .to_string()
        };

        let mut out = vec![line(headers.as_slice())];
        out.push(widths.iter().map(|w| "-".repeat(*w)).collect::<Vec<_>>().join("  "));
        out.extend(body.iter().map(|row| line(row.as_slice())));
        out.join("\n")
    }
}

fn pad(s: &str, width: usize, right: bool) -> String {
    let fill = " ".repeat(width.saturating_sub(s.chars().count()));
    if right {
        format!("{}{}", fill, s)
    } else {
        format!("{}{}", s, fill)
    }
}

/// Renders the optimal assignment and each candidate, then prints a table of
/// their scores and efficiencies.
pub struct ComparisonReporter<'v> {
    view: &'v ScenarioView,
}

impl<'v> ComparisonReporter<'v> {
    pub fn new(view: &'v ScenarioView) -> Self {
        Self { view }
    }

    /// Titles default to `Assignment #1..=n`. The first failing render aborts
    /// the batch.
    pub fn compare(
        &self,
        scenario: &dyn Scenario,
        assignments: &[&dyn Assignment],
        titles: Option<&[String]>,
        out: &mut dyn Write,
    ) -> RenderResult<ComparisonReport> {
        let titles: Vec<String> = match titles {
            Some(t) if t.len() == assignments.len() => t.to_vec(),
            Some(t) => {
                return Err(RenderError::InvalidInput(format!(
                    "{} titles for {} assignments",
                    t.len(),
                    assignments.len()
                )));
            }
            None => (1..=assignments.len()).map(|i| format!("Assignment #{}", i)).collect(),
        };

        let agent_count = ScenarioSnapshot::capture(scenario)?.agent_count;
        let optimal = scenario.optimal_assignment();
        let opt_value = optimal.value();

        let mut rows = Vec::with_capacity(assignments.len() + 1);
        rows.push(self.row(OPTIMAL_RULE, optimal.as_ref(), agent_count, opt_value, 1.0)?);
        self.view.render(
            scenario,
            &ViewRequest::new(OPTIMAL_RULE)
                .with_assignment(optimal.as_ref())
                .with_metric(Metric::Score, Some(opt_value)),
        )?;

        for (assignment, title) in assignments.iter().zip(&titles) {
            let value = assignment.value();
            self.view.render(
                scenario,
                &ViewRequest::new(title)
                    .with_assignment(*assignment)
                    .with_metric(Metric::Score, Some(value)),
            )?;
            rows.push(self.row(title, *assignment, agent_count, value, value / opt_value)?);
        }

        let report = ComparisonReport { agent_count, rows };
        writeln!(out, "\nAssignment Comparison:\n")?;
        writeln!(out, "{}", report.to_table())?;
        match &self.view.config().output_dir {
            Some(dir) => writeln!(out, "\nVisualizations saved to {}\n", dir.display())?,
            None => self
                .view
                .logger()
                .warn("No output directory configured; comparison views were not saved"),
        }
        info!(rows = report.rows.len(), "comparison report written");
        Ok(report)
    }

    fn row(
        &self,
        rule: &str,
        assignment: &dyn Assignment,
        agent_count: usize,
        score: f64,
        efficiency: f64,
    ) -> RenderResult<ComparisonRow> {
        let choices = assignment.choices();
        if choices.len() != agent_count {
            return Err(RenderError::MalformedScenario(format!(
                "'{}' has {} choices for {} agents",
                rule,
                choices.len(),
                agent_count
            )));
        }
        Ok(ComparisonRow::new(rule, &choices, score, efficiency))
    }
}
