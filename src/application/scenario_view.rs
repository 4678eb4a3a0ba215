use crate::common::{RenderError, RenderResult};
use crate::config::RenderConfig;
use crate::domains::logger::DynLogger;
use crate::domains::render::{save_figure, Canvas, Figure, FigureWriter, SceneRenderer, ViewRequest};
use crate::domains::scenario::{Scenario, ScenarioSnapshot};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

/// Result of rendering one view.
#[derive(Debug)]
pub enum ViewOutcome {
    /// Drawn onto a canvas owned by the caller.
    Drawn,
    /// Written to disk; the figure is gone.
    Saved(PathBuf),
    /// No output directory configured; the caller may display or compose it.
    Unsaved(Figure),
}

/// Draws single scenarios, either onto a caller's canvas or into a new figure.
pub struct ScenarioView {
    config: RenderConfig,
    writer: Arc<dyn FigureWriter>,
    logger: DynLogger,
}

impl ScenarioView {
    pub fn new(config: RenderConfig, writer: Arc<dyn FigureWriter>, logger: DynLogger) -> Self {
        Self { config, writer, logger }
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    pub fn writer(&self) -> &dyn FigureWriter {
        self.writer.as_ref()
    }

    pub fn logger(&self) -> &DynLogger {
        &self.logger
    }

    /// Draw onto `canvas`; it stays owned by the caller.
    pub fn draw(&self, scenario: &dyn Scenario, request: &ViewRequest<'_>, canvas: &mut Canvas) -> RenderResult<()> {
        let snapshot = ScenarioSnapshot::capture(scenario)?;
        SceneRenderer::new(&self.config).draw(&snapshot, request, canvas)
    }

    /// Draw into a fresh single-panel figure, saving it when an output
    /// directory is configured.
    pub fn render(&self, scenario: &dyn Scenario, request: &ViewRequest<'_>) -> RenderResult<ViewOutcome> {
        let (w, h) = self.config.figure_size;
        let mut figure = Figure::single(w, h, self.config.dpi);
        figure.transparent = self.config.transparent;
        let canvas = figure
            .panel_mut(0, 0)
            .ok_or_else(|| RenderError::InvalidInput("figure has no panel".into()))?;
        self.draw(scenario, request, canvas)?;

        match &self.config.output_dir {
            Some(dir) => {
                let path = save_figure(self.writer.as_ref(), figure, dir, "", request.title)?;
                info!(path = %path.display(), "view saved");
                self.logger.figure_saved(&path);
                Ok(ViewOutcome::Saved(path))
            }
            None => Ok(ViewOutcome::Unsaved(figure)),
        }
    }

    /// Draw onto `canvas` when one is supplied, otherwise [`render`](Self::render).
    /// A supplied canvas is never saved here; its owner saves the whole figure.
    pub fn visualize(
        &self,
        scenario: &dyn Scenario,
        request: &ViewRequest<'_>,
        canvas: Option<&mut Canvas>,
    ) -> RenderResult<ViewOutcome> {
        match canvas {
            Some(canvas) => {
                self.draw(scenario, request, canvas)?;
                Ok(ViewOutcome::Drawn)
            }
            None => self.render(scenario, request),
        }
    }
}
