use clap::{Parser, Subcommand};
use scenario_viz::adapters::inbound::FilesystemScenarioSource;
use scenario_viz::adapters::outbound::{init_logger, PlottersFigureWriter, RecordingFigureWriter};
use scenario_viz::application::{select_best_worst, BestWorstComposer, ComparisonReporter, ScenarioView};
use scenario_viz::domains::render::FigureWriter;
use scenario_viz::domains::scenario::{Assignment, ScenarioSource};
use scenario_viz::{ApplicationResult, Config, RenderError};
use std::error::Error;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Figures go here when neither `--out` nor the config names a directory.
const DEFAULT_OUTPUT_DIR: &str = "figures";

/// Render agent/target assignment scenarios
#[derive(Parser, Debug)]
#[command(name = "scenario-viz")]
#[command(version)]
#[command(about = "Render assignment scenarios, comparison tables and best/worst grids", long_about = None)]
struct Cli {
    /// TOML config file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Output directory (overrides the config and SCENARIO_VIZ_OUT_DIR)
    #[arg(long, global = true)]
    out: Option<PathBuf>,

    /// Write text manifests instead of images
    #[arg(long, global = true)]
    dry_run: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug, PartialEq)]
enum Command {
    /// Render the optimal and every candidate assignment of a scenario file,
    /// then print the comparison table
    Compare {
        /// Scenario document (JSON)
        file: PathBuf,
    },

    /// Compose the best/worst grid from a directory of result documents
    Grid {
        /// Directory of `*.json` results; each file's first assignment is used
        dir: PathBuf,
        algorithm: String,
        scenario_type: String,
    },
}

fn main() -> Result<(), Box<dyn Error>> {
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let cli = Cli::parse();

    let mut config = Config::load(cli.config.as_deref())?;
    if let Some(dir) = cli.out {
        config.render.output_dir = Some(dir);
    }
    if config.render.output_dir.is_none() {
        config.render.output_dir = Some(PathBuf::from(DEFAULT_OUTPUT_DIR));
    }

    let logger = init_logger(config.logging.file.as_deref());
    let writer: Arc<dyn FigureWriter> = if cli.dry_run {
        Arc::new(RecordingFigureWriter::new())
    } else {
        Arc::new(PlottersFigureWriter::new(config.render.format))
    };
    let view = ScenarioView::new(config.render.clone(), writer, logger.clone());

    let result = match &cli.command {
        Command::Compare { file } => compare(&view, file),
        Command::Grid { dir, algorithm, scenario_type } => grid(&view, dir, algorithm, scenario_type),
    };
    if let Err(e) = &result {
        logger.error(&e.to_string());
    }
    result?;
    Ok(())
}

fn compare(view: &ScenarioView, file: &Path) -> ApplicationResult<()> {
    let base = file.parent().map(Path::to_path_buf);
    let name = file
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| RenderError::InvalidInput(format!("bad scenario path {}", file.display())))?;
    let loaded = FilesystemScenarioSource::new(base).load_scenario(name)?;
    info!(nbr = loaded.scenario.nbr, assignments = loaded.assignments.len(), "scenario loaded");

    let assignments: Vec<&dyn Assignment> = loaded.assignments.iter().map(|a| a as &dyn Assignment).collect();
    let mut stdout = std::io::stdout();
    ComparisonReporter::new(view).compare(&loaded.scenario, &assignments, loaded.titles.as_deref(), &mut stdout)?;
    Ok(())
}

fn grid(view: &ScenarioView, dir: &Path, algorithm: &str, scenario_type: &str) -> ApplicationResult<()> {
    let source = FilesystemScenarioSource::new(Some(dir.to_path_buf()));
    let mut names: Vec<String> = fs::read_dir(dir)
        .map_err(RenderError::from)?
        .filter_map(|e| e.ok())
        .filter(|e| e.path().extension().is_some_and(|x| x == "json"))
        .filter_map(|e| e.file_name().to_str().map(str::to_string))
        .collect();
    names.sort();

    let mut results = Vec::with_capacity(names.len());
    for name in &names {
        let mut loaded = source.load_scenario(name)?;
        if loaded.assignments.is_empty() {
            return Err(RenderError::InvalidInput(format!("{} holds no algorithm result", name)).into());
        }
        let result = loaded.assignments.remove(0);
        results.push((loaded.scenario, result));
    }
    info!(results = results.len(), "simulation results loaded");

    let selected = select_best_worst(&results)?;
    let out = view.config().output_or(DEFAULT_OUTPUT_DIR);
    let path = BestWorstComposer::new(view).compose(&selected.best, &selected.worst, scenario_type, algorithm, &out)?;
    println!("Best/worst grid saved to {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::error::ErrorKind;

    #[test]
    fn parses_compare_with_global_flags() {
        let cli = Cli::try_parse_from(["scenario-viz", "compare", "s.json", "--out", "figs", "--dry-run"]).unwrap();
        assert_eq!(cli.command, Command::Compare { file: PathBuf::from("s.json") });
        assert_eq!(cli.out, Some(PathBuf::from("figs")));
        assert!(cli.dry_run);
        assert!(cli.config.is_none());
    }

    #[test]
    fn parses_grid() {
        let cli = Cli::try_parse_from(["scenario-viz", "--config", "viz.toml", "grid", "runs", "Greedy", "Line Graph"])
            .unwrap();
        assert_eq!(
            cli.command,
            Command::Grid {
                dir: PathBuf::from("runs"),
                algorithm: "Greedy".into(),
                scenario_type: "Line Graph".into(),
            }
        );
        assert_eq!(cli.config, Some(PathBuf::from("viz.toml")));
    }

    #[test]
    fn out_without_value_is_reported() {
        let err = Cli::try_parse_from(["scenario-viz", "compare", "s.json", "--out"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidValue);
    }

    #[test]
    fn grid_needs_all_arguments() {
        let err = Cli::try_parse_from(["scenario-viz", "grid", "runs", "Greedy"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MissingRequiredArgument);
    }
}
