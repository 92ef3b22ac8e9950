//! Error types for netdiagram operations.
//!
//! This module provides the main error type [`DiagramError`] which covers
//! every way a render can fail, and [`RendererFailure`] which describes why
//! the external renderer did not produce an image.

use std::{
    io,
    path::{Path, PathBuf},
    process::ExitStatus,
};

use thiserror::Error;

use netdiagram_core::dot::GraphError;

/// The main error type for netdiagram operations.
#[derive(Debug, Error)]
pub enum DiagramError {
    /// A directory or file under the output path could not be created or written.
    #[error("I/O error on {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The requested output format is not one of `dot`, `png`, `jpg`, `svg`, `pdf`.
    #[error("unsupported output format: {0}")]
    UnsupportedFormat(String),

    /// Icon bytes could not be read from the asset store.
    #[error("failed to read asset `{path}`: {source}")]
    Asset {
        path: String,
        #[source]
        source: io::Error,
    },

    /// The graph description is inconsistent, e.g. an edge names an unknown node.
    #[error("Graph error: {0}")]
    Graph(#[from] GraphError),

    /// The external renderer failed. `output` holds its combined stdout and stderr.
    #[error("graphviz rendering failed: {failure}: {output}")]
    Renderer {
        #[source]
        failure: RendererFailure,
        output: String,
    },
}

impl DiagramError {
    pub(crate) fn io(path: impl AsRef<Path>, source: io::Error) -> Self {
        Self::Io {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }
}

/// Why the external renderer did not produce an image.
#[derive(Debug, Error)]
pub enum RendererFailure {
    #[error("failed to run `{program}`: {source}")]
    Spawn {
        program: String,
        #[source]
        source: io::Error,
    },

    #[error("{0}")]
    Exit(ExitStatus),

    #[error("output file {0:?} was not created")]
    MissingOutput(PathBuf),
}
