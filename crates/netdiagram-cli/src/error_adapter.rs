//! Error adapter for converting CLI errors to miette diagnostics.
//!
//! This module bridges the library's standard error types and miette's
//! diagnostic formatting. Manifest errors that carry a byte span are shown
//! with a snippet of the manifest; every other error gets a code and, where
//! one applies, a help line.

use std::fmt;

use miette::{Diagnostic as MietteDiagnostic, LabeledSpan, SourceSpan};

use netdiagram::{DiagramError, RendererFailure, catalog, dot::GraphError};

use crate::{config::ConfigError, error::CliError, manifest::ManifestError};

/// Adapter for a manifest error with its source text.
pub struct ManifestAdapter<'a> {
    err: &'a ManifestError,
    src: &'a str,
}

impl<'a> ManifestAdapter<'a> {
    pub fn new(err: &'a ManifestError, src: &'a str) -> Self {
        Self { err, src }
    }
}

impl fmt::Debug for ManifestAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ManifestAdapter")
            .field("err", &self.err)
            .finish()
    }
}

impl fmt::Display for ManifestAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self.err, f)
    }
}

impl std::error::Error for ManifestAdapter<'_> {}

impl MietteDiagnostic for ManifestAdapter<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        Some(Box::new("netdiagram::manifest"))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let help = match self.err {
            ManifestError::UnknownKind { .. } => {
                let kinds: Vec<String> = catalog::kinds().collect();
                format!("known kinds: {}", kinds.join(", "))
            }
            ManifestError::GroupCycle(_) => {
                "a group cannot be its own ancestor; check the `parent` keys".to_string()
            }
            ManifestError::UnknownNode { .. } => {
                "declare the node in a [[nodes]] entry before connecting it".to_string()
            }
            _ => return None,
        };
        Some(Box::new(help))
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        self.err
            .span()
            .map(|_| &self.src as &dyn miette::SourceCode)
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        let span = self.err.span()?;
        let span = SourceSpan::new(span.start.into(), span.len());
        Some(Box::new(std::iter::once(LabeledSpan::new_primary_with_span(
            Some("here".to_string()),
            span,
        ))))
    }
}

/// Adapter for every other [`CliError`].
pub struct ErrorAdapter<'a>(pub &'a CliError);

impl fmt::Debug for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.0, f)
    }
}

impl fmt::Display for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl std::error::Error for ErrorAdapter<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        std::error::Error::source(self.0)
    }
}

impl MietteDiagnostic for ErrorAdapter<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let code = match self.0 {
            CliError::Io { .. } => "netdiagram::io",
            CliError::Config(_) => "netdiagram::config",
            CliError::Manifest { .. } => "netdiagram::manifest",
            CliError::Diagram(err) => match err {
                DiagramError::Io { .. } => "netdiagram::io",
                DiagramError::UnsupportedFormat(_) => "netdiagram::format",
                DiagramError::Asset { .. } => "netdiagram::asset",
                DiagramError::Graph(_) => "netdiagram::graph",
                DiagramError::Renderer { .. } => "netdiagram::renderer",
            },
        };
        Some(Box::new(code))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let help = match self.0 {
            CliError::Config(ConfigError::MissingFile(_)) => {
                "pass an existing file to --config, or omit it to use the defaults"
            }
            CliError::Diagram(DiagramError::UnsupportedFormat(_)) => {
                "supported formats are dot, png, jpg, svg and pdf"
            }
            CliError::Diagram(DiagramError::Renderer {
                failure: RendererFailure::Spawn { .. },
                ..
            }) => "install Graphviz or set `renderer` in the [render] configuration section",
            CliError::Diagram(DiagramError::Graph(GraphError::UnknownNode { .. })) => {
                "every edge endpoint must be a declared node"
            }
            CliError::Diagram(DiagramError::Asset { .. }) => {
                "check the [assets] directory in the configuration"
            }
            _ => return None,
        };
        Some(Box::new(help))
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        None
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        None
    }
}

/// A reportable error that can be rendered by miette.
#[derive(Debug)]
pub enum Reportable<'a> {
    /// A manifest error, possibly with a source snippet.
    Manifest(ManifestAdapter<'a>),
    /// Any other error.
    Error(ErrorAdapter<'a>),
}

impl fmt::Display for Reportable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reportable::Manifest(m) => fmt::Display::fmt(m, f),
            Reportable::Error(e) => fmt::Display::fmt(e, f),
        }
    }
}

impl std::error::Error for Reportable<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Reportable::Manifest(_) => None,
            Reportable::Error(e) => std::error::Error::source(e),
        }
    }
}

impl MietteDiagnostic for Reportable<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        match self {
            Reportable::Manifest(m) => m.code(),
            Reportable::Error(e) => e.code(),
        }
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        match self {
            Reportable::Manifest(m) => m.help(),
            Reportable::Error(e) => e.help(),
        }
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        match self {
            Reportable::Manifest(m) => m.source_code(),
            Reportable::Error(e) => e.source_code(),
        }
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        match self {
            Reportable::Manifest(m) => m.labels(),
            Reportable::Error(e) => e.labels(),
        }
    }
}

/// Convert a [`CliError`] into a list of reportable errors.
pub fn to_reportables(err: &CliError) -> Vec<Reportable<'_>> {
    match err {
        CliError::Manifest { err, src, .. } => {
            vec![Reportable::Manifest(ManifestAdapter::new(err, src))]
        }
        _ => vec![Reportable::Error(ErrorAdapter(err))],
    }
}
