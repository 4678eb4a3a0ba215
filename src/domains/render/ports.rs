use super::canvas::Figure;
use super::title::sanitize_file_stem;
use crate::common::RenderResult;
use std::fs;
use std::path::{Path, PathBuf};

/// Port for turning a finished figure into an image file.
pub trait FigureWriter: Send + Sync {
    /// File extension of the images this writer produces, without the dot.
    fn extension(&self) -> &'static str;

    /// Encode `figure` to `path`. The figure is consumed.
    fn write_figure(&self, figure: Figure, path: &Path) -> RenderResult<()>;
}

/// Save `figure` as `<dir>/<prefix><sanitized title>.<ext>`, creating `dir`
/// when missing. Returns the written path.
pub fn save_figure(
    writer: &dyn FigureWriter,
    figure: Figure,
    dir: &Path,
    prefix: &str,
    title: &str,
) -> RenderResult<PathBuf> {
    if !dir.exists() {
        fs::create_dir_all(dir)?;
    }
    let path = dir.join(format!("{}{}.{}", prefix, sanitize_file_stem(title), writer.extension()));
    writer.write_figure(figure, &path)?;
    Ok(path)
}
