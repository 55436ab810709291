use std::{io, path::PathBuf};

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum WidgetError {
    #[error("progress value must be between 0 and 100, got {0}")]
    ProgressOutOfRange(f32),
    #[error("invalid color '{0}'; expected #rrggbb")]
    InvalidColor(String),
}

#[derive(Debug, Error)]
pub enum FormError {
    #[error("failed to read form schema '{path}': {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("invalid form schema: {0}")]
    Parse(#[from] serde_json::Error),
}
