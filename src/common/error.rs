use thiserror::Error;

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Degenerate geometry: {agents} agents, {targets} targets (both must be at least 1)")]
    DegenerateGeometry { agents: usize, targets: usize },

    #[error("Malformed scenario: {0}")]
    MalformedScenario(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Drawing backend error: {0}")]
    Backend(String),

    #[error("Parse error: {0}")]
    Parse(String),
}

impl From<serde_json::Error> for RenderError {
    fn from(e: serde_json::Error) -> Self {
        RenderError::Parse(e.to_string())
    }
}

#[derive(Error, Debug)]
pub enum ApplicationError {
    #[error("Render error: {0}")]
    Render(#[from] RenderError),

    #[error("Configuration error: {0}")]
    Configuration(#[from] anyhow::Error),
}

pub type RenderResult<T> = Result<T, RenderError>;
pub type ApplicationResult<T> = Result<T, ApplicationError>;
