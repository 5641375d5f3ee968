use tbs_render::RenderError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TbsError {
    #[error("There is no {kind} with name: '{name}'")]
    NotFound { kind: &'static str, name: String },

    #[error("{0}")]
    Transport(String),

    #[error("{0}")]
    Validation(String),

    #[error("Render error: {0}")]
    Render(#[from] RenderError),

    #[error("Unexpected response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Config error: {0}")]
    Config(String),

    #[error("{failed} operation(s) failed")]
    Incomplete { failed: usize },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl TbsError {
    pub fn not_found(kind: &'static str, name: impl Into<String>) -> Self {
        TbsError::NotFound {
            kind,
            name: name.into(),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        TbsError::Validation(message.into())
    }
}

pub type Result<T> = std::result::Result<T, TbsError>;
