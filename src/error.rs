use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DenoiseError {
    #[error("Invalid filter parameter: {0}")]
    InvalidParameter(String),

    #[error("Image dimensions differ: {left:?} vs {right:?}")]
    DimensionMismatch {
        left: (u32, u32),
        right: (u32, u32),
    },

    #[error("Invalid noise assignment: {0}")]
    InvalidAssignment(String),

    #[error("Codec round-trip failed: {0}")]
    Encoding(String),

    #[error("Failed to render figure: {0}")]
    Render(String),

    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
