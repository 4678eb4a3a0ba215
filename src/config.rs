use crate::domains::render::Rgb;
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::env;
use std::path::{Path, PathBuf};

/// Overrides `render.output_dir` when set.
pub const OUT_DIR_ENV: &str = "SCENARIO_VIZ_OUT_DIR";

/// Arc strength for non-adjacent agent edges at five agents.
pub const DEFAULT_ARC: f64 = 0.25;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub render: RenderConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Png,
    Svg,
}

impl OutputFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Png => "png",
            OutputFormat::Svg => "svg",
        }
    }
}

/// Styling and output options shared by every view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    pub agent_color: Rgb,
    pub target_color: Rgb,
    pub normal_edge_color: Rgb,
    pub highlight_edge_color: Rgb,
    pub text_color: Rgb,
    pub agent_label_size: f64,
    pub target_label_size: f64,
    /// Size of the `t_j` caption under each target.
    pub caption_size: f64,
    pub title_size: f64,
    pub arc_rads_scale: f64,
    pub show_title: bool,
    pub show_metric_value: bool,
    pub transparent: bool,
    /// Views are saved here when set; otherwise figures are handed back.
    pub output_dir: Option<PathBuf>,
    pub format: OutputFormat,
    /// Single view size in inches.
    pub figure_size: (f64, f64),
    /// Best/worst grid size in inches.
    pub grid_figure_size: (f64, f64),
    pub dpi: f64,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            agent_color: Rgb::LIGHT_BLUE,
            target_color: Rgb::GOLD,
            normal_edge_color: Rgb::GRAY,
            highlight_edge_color: Rgb::RED,
            text_color: Rgb::BLACK,
            agent_label_size: 12.0,
            target_label_size: 12.0,
            caption_size: 10.0,
            title_size: 12.0,
            arc_rads_scale: DEFAULT_ARC,
            show_title: true,
            show_metric_value: true,
            transparent: false,
            output_dir: None,
            format: OutputFormat::Png,
            figure_size: (6.0, 4.0),
            grid_figure_size: (20.0, 10.0),
            dpi: 100.0,
        }
    }
}

impl RenderConfig {
    pub fn with_output_dir<P: Into<PathBuf>>(mut self, dir: P) -> Self {
        self.output_dir = Some(dir.into());
        self
    }

    /// The configured output directory, or `fallback`.
    pub fn output_or(&self, fallback: &str) -> PathBuf {
        self.output_dir.clone().unwrap_or_else(|| PathBuf::from(fallback))
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Domain log file; console only when unset.
    pub file: Option<String>,
}

impl Config {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Read `path` if given, fall back to defaults, then apply env overrides.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(p) => Self::from_file(p)?,
            None => Self::default(),
        };
        if let Ok(dir) = env::var(OUT_DIR_ENV) {
            if !dir.is_empty() {
                config.render.output_dir = Some(PathBuf::from(dir));
            }
        }
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_toml_keeps_defaults() {
        let config: Config = toml::from_str(
            r##"
            [render]
            highlight_edge_color = "#00ff00"
            arc_rads_scale = 0.4
            format = "svg"
            "##,
        )
        .unwrap();
        assert_eq!(config.render.highlight_edge_color, Rgb(0, 255, 0));
        assert_eq!(config.render.arc_rads_scale, 0.4);
        assert_eq!(config.render.format, OutputFormat::Svg);
        assert_eq!(config.render.agent_color, Rgb::LIGHT_BLUE);
        assert_eq!(config.render.figure_size, (6.0, 4.0));
    }

    #[test]
    fn unknown_color_is_a_config_error() {
        let res: Result<Config, _> = toml::from_str("[render]\nagent_color = \"nope\"\n");
        assert!(res.is_err());
    }

    #[test]
    fn from_file_reads_logging_section() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("viz.toml");
        std::fs::write(&path, "[logging]\nfile = \"viz.log\"\n").unwrap();
        let config = Config::from_file(&path).unwrap();
        assert_eq!(config.logging.file.as_deref(), Some("viz.log"));
        assert!(config.render.output_dir.is_none());
    }
}
