use super::scenario_view::ScenarioView;
use crate::common::{RenderError, RenderResult};
use crate::domains::render::{round_to, save_figure, Figure, ViewRequest};
use crate::domains::scenario::{Assignment, Metric, Scenario};
use std::path::{Path, PathBuf};
use tracing::info;

/// Pairs per grid row.
pub const GRID_COLS: usize = 5;

pub const BEST_TITLES: [&str; GRID_COLS] = ["Best", "2nd Best", "3rd Best", "4th Best", "5th Best"];
pub const WORST_TITLES: [&str; GRID_COLS] = ["Worst", "2nd Worst", "3rd Worst", "4th Worst", "5th Worst"];

/// A scenario and the assignment an algorithm produced for it.
pub type ScoredPair<'a> = (&'a dyn Scenario, &'a dyn Assignment);

/// Two rows of five views (best on top, worst below) under one shared title.
pub struct BestWorstComposer<'v> {
    view: &'v ScenarioView,
}

impl<'v> BestWorstComposer<'v> {
    pub fn new(view: &'v ScenarioView) -> Self {
        Self { view }
    }

    pub fn grid_title(algorithm_title: &str, scenario_type: &str) -> String {
        format!("{} on {}", algorithm_title, scenario_type)
    }

    /// Build the grid without saving it.
    pub fn compose_figure(
        &self,
        best: &[ScoredPair<'_>],
        worst: &[ScoredPair<'_>],
        scenario_type: &str,
        algorithm_title: &str,
    ) -> RenderResult<Figure> {
        for (name, list) in [("best", best), ("worst", worst)] {
            if list.len() != GRID_COLS {
                return Err(RenderError::InvalidInput(format!(
                    "expected exactly {} {} pairs, got {}",
                    GRID_COLS,
                    name,
                    list.len()
                )));
            }
        }

        let config = self.view.config();
        let (w, h) = config.grid_figure_size;
        let mut figure = Figure::new(2, GRID_COLS, w, h, config.dpi);
        figure.suptitle = Some(Self::grid_title(algorithm_title, scenario_type));
        figure.transparent = config.transparent;

        for (row, (list, titles)) in [(best, &BEST_TITLES), (worst, &WORST_TITLES)].into_iter().enumerate() {
            for (col, (scenario, assignment)) in list.iter().enumerate() {
                let title = format!("{}\nScenario {}", titles[col], scenario.nbr());
                let request = ViewRequest::new(&title)
                    .with_assignment(*assignment)
                    .with_metric(Metric::Efficiency, Some(round_to(assignment.efficiency(), 3)));
                let canvas = figure
                    .panel_mut(row, col)
                    .ok_or_else(|| RenderError::InvalidInput(format!("no panel at {},{}", row, col)))?;
                self.view.draw(*scenario, &request, canvas)?;
            }
        }
        Ok(figure)
    }

    /// Build the grid and save it as `bw_<title>.<ext>` under `output_dir`.
    pub fn compose(
        &self,
        best: &[ScoredPair<'_>],
        worst: &[ScoredPair<'_>],
        scenario_type: &str,
        algorithm_title: &str,
        output_dir: &Path,
    ) -> RenderResult<PathBuf> {
        let figure = self.compose_figure(best, worst, scenario_type, algorithm_title)?;
        let title = Self::grid_title(algorithm_title, scenario_type);
        let path = save_figure(self.view.writer(), figure, output_dir, "bw_", &title)?;
        info!(path = %path.display(), "best/worst grid saved");
        self.view.logger().figure_saved(&path);
        Ok(path)
    }
}
