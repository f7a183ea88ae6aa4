//! Errors raised while drawing a scene.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::style::InvalidStyle;

/// Failure to render a frame or prepare the renderer.
#[derive(Error, Debug)]
pub enum RenderError {
    /// The drawing backend rejected an operation.
    #[error("drawing failed: {0}")]
    Draw(String),

    /// The scene style cannot be drawn.
    #[error(transparent)]
    Style(#[from] InvalidStyle),

    /// A font file could not be read.
    #[error("cannot read font {path}: {source}")]
    FontRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A font file was read but is not a usable font.
    #[error("unsupported font file {path}")]
    FontInvalid { path: PathBuf },
}

impl RenderError {
    pub(crate) fn draw(err: impl std::fmt::Display) -> Self {
        Self::Draw(err.to_string())
    }
}
