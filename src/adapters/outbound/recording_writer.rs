use crate::common::RenderResult;
use crate::domains::render::{Figure, FigureWriter};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

/// Keeps written figures in memory and leaves a small text manifest at the
/// target path instead of an image. Backs the CLI's `--dry-run` and the tests.
#[derive(Clone, Default)]
pub struct RecordingFigureWriter {
    written: Arc<Mutex<Vec<(PathBuf, Figure)>>>,
}

impl RecordingFigureWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn paths(&self) -> Vec<PathBuf> {
        self.lock().iter().map(|(p, _)| p.clone()).collect()
    }

    pub fn figures(&self) -> Vec<Figure> {
        self.lock().iter().map(|(_, f)| f.clone()).collect()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<(PathBuf, Figure)>> {
        // A poisoned lock only means another test thread panicked mid-push.
        self.written.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl FigureWriter for RecordingFigureWriter {
    fn extension(&self) -> &'static str {
        "png"
    }

    fn write_figure(&self, figure: Figure, path: &Path) -> RenderResult<()> {
        let titles: Vec<String> = figure
            .panels()
            .iter()
            .filter_map(|c| c.title.clone())
            .collect();
        let manifest = format!(
            "{}x{} panels, suptitle: {}\n{}\n",
            figure.rows,
            figure.cols,
            figure.suptitle.as_deref().unwrap_or("-"),
            titles.join("\n")
        );
        fs::write(path, manifest)?;
        self.lock().push((path.to_path_buf(), figure));
        Ok(())
    }
}
