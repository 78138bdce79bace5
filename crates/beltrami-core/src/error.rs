use thiserror::Error;

/// Shader pipeline stage, carried by compile errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum ShaderStage {
    Vertex,
    Fragment,
}

impl std::fmt::Display for ShaderStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ShaderStage::Vertex => write!(f, "vertex"),
            ShaderStage::Fragment => write!(f, "fragment"),
        }
    }
}

#[derive(Debug, Error)]
pub enum ViewerError {
    #[error("Graphics context unavailable: {0}")]
    ContextUnavailable(String),

    #[error("Error in {stage} shader: {log}")]
    ShaderBuild { stage: ShaderStage, log: String },

    #[error("Link error in program: {log}")]
    ProgramLink { log: String },

    #[error("Config error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Export error: {0}")]
    Export(String),

    #[error("Invalid operation: {0}")]
    InvalidOperation(String),
}

impl ViewerError {
    /// True for the failures that can only happen while the viewer starts up.
    pub fn is_init_failure(&self) -> bool {
        matches!(
            self,
            ViewerError::ContextUnavailable(_)
                | ViewerError::ShaderBuild { .. }
                | ViewerError::ProgramLink { .. }
        )
    }

    /// Text shown to the user in place of the canvas.
    pub fn user_message(&self) -> String {
        match self {
            ViewerError::ContextUnavailable(_) => {
                "Sorry, could not get a graphics context.".to_string()
            }
            ViewerError::ShaderBuild { .. } | ViewerError::ProgramLink { .. } => {
                format!("Sorry, could not initialize the graphics context: {}", self)
            }
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ViewerError>;
