//! Connections between nodes.

use netdiagram_core::{attributes::Attributes, dot::DotGraph};

use crate::options::{EdgeOption, EdgeOptions, Resolve};

/// A connection between two node identifiers.
///
/// Endpoints are plain identifiers, resolved against every node in the
/// diagram when the description is printed.
#[derive(Debug, Clone)]
pub struct Edge {
    start: String,
    end: String,
    options: EdgeOptions,
}

impl Edge {
    pub fn new<I>(start: impl Into<String>, end: impl Into<String>, overrides: I) -> Self
    where
        I: IntoIterator<Item = EdgeOption>,
    {
        Self {
            start: start.into(),
            end: end.into(),
            options: EdgeOptions::resolve(overrides),
        }
    }

    pub fn start(&self) -> &str {
        &self.start
    }

    pub fn end(&self) -> &str {
        &self.end
    }

    pub fn options(&self) -> &EdgeOptions {
        &self.options
    }

    pub fn attributes(&self) -> Attributes {
        self.options.to_attributes()
    }

    pub(crate) fn render(&self, graph: &mut DotGraph) {
        graph.add_edge(&self.start, &self.end, &self.attributes());
    }
}
