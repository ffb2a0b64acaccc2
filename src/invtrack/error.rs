use crate::validation::ValidationError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum InvError {
    #[error("Item ID {0} already exists")]
    DuplicateKey(String),

    #[error("Failed to save {}: {source}", path.display())]
    Persistence {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Carries the 1-based position.
    #[error("No record at position {0}")]
    NotFound(usize),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config error: {0}")]
    Config(#[from] serde_json::Error),
}

impl InvError {
    /// True when the in-memory collection holds changes the file does not.
    pub fn is_unsaved(&self) -> bool {
        matches!(self, InvError::Persistence { .. })
    }
}

pub type Result<T> = std::result::Result<T, InvError>;
