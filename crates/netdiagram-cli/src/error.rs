//! Errors reported by the CLI.

use std::{io, path::PathBuf};

use thiserror::Error;

use netdiagram::DiagramError;

use crate::{config::ConfigError, manifest::ManifestError};

/// Everything that can stop a CLI run.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Diagram(#[from] DiagramError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    /// A manifest problem, with the manifest text for source snippets.
    #[error("{err}")]
    Manifest {
        err: ManifestError,
        path: String,
        src: String,
    },

    #[error("I/O error on {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl CliError {
    /// Create a new `Manifest` error with the associated source text.
    pub fn new_manifest_error(
        err: ManifestError,
        path: impl Into<String>,
        src: impl Into<String>,
    ) -> Self {
        Self::Manifest {
            err,
            path: path.into(),
            src: src.into(),
        }
    }
}
