//! In-memory DOT graph description.
//!
//! [`DotGraph`] is the sink that diagram elements render into. It keeps a
//! flat table of scopes (the root graph plus every subgraph, each pointing
//! at its parent by name), a table of node statements and a list of edge
//! statements. [`DotGraph::to_dot`] validates edge endpoints and prints the
//! whole description.
//!
//! # Output layout
//!
//! ```text
//! digraph root {
//!   rankdir="LR";              <- root graph attributes
//!   fw [label="Firewall"];     <- root nodes
//!   subgraph cluster_dmz {     <- subgraphs, recursively
//!     label="DMZ";
//!     web [label="Web"];
//!   }
//!   fw -> web [dir="forward"]; <- every edge, in insertion order
//! }
//! ```
//!
//! Edges are graph-level statements: emitting them inside a cluster would
//! pull foreign endpoints into that cluster.

use std::{borrow::Cow, fmt::Write};

use indexmap::IndexMap;
use log::trace;
use thiserror::Error;

use crate::attributes::Attributes;

/// Errors raised by the graph sink.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GraphError {
    #[error("unknown graph scope `{0}`")]
    UnknownScope(String),

    #[error("graph scope `{0}` is already defined")]
    DuplicateScope(String),

    #[error("node `{0}` is already defined")]
    DuplicateNode(String),

    #[error("edge `{src}` -> `{dst}` references unknown node `{id}`")]
    UnknownNode {
        id: String,
        src: String,
        dst: String,
    },
}

#[derive(Debug, Clone)]
struct Scope {
    parent: Option<String>,
    attributes: Attributes,
    nodes: Vec<String>,
    children: Vec<String>,
}

impl Scope {
    fn new(parent: Option<String>, attributes: Attributes) -> Self {
        Self {
            parent,
            attributes,
            nodes: Vec::new(),
            children: Vec::new(),
        }
    }
}

#[derive(Debug, Clone)]
struct EdgeStmt {
    src: String,
    dst: String,
    attributes: Attributes,
}

/// A DOT graph under construction.
///
/// Attributes with empty values are dropped on insertion, for every kind of
/// statement.
///
/// # Examples
///
/// ```
/// use netdiagram_core::{attributes::Attributes, dot::DotGraph};
///
/// let mut graph = DotGraph::new("root", true);
/// graph.add_node("root", "a", &Attributes::new().with("label", "A")).unwrap();
/// graph.add_node("root", "b", &Attributes::new()).unwrap();
/// graph.add_edge("a", "b", &Attributes::new().with("style", ""));
///
/// let dot = graph.to_dot().unwrap();
/// assert!(dot.contains("a -> b;"));
/// ```
#[derive(Debug, Clone)]
pub struct DotGraph {
    name: String,
    directed: bool,
    scopes: IndexMap<String, Scope>,
    nodes: IndexMap<String, Attributes>,
    edges: Vec<EdgeStmt>,
}

impl DotGraph {
    /// Creates a graph whose root scope is called `name`.
    pub fn new(name: impl Into<String>, directed: bool) -> Self {
        Self::with_attributes(name, directed, &Attributes::new())
    }

    /// Creates a graph whose root scope starts with `attrs`.
    pub fn with_attributes(name: impl Into<String>, directed: bool, attrs: &Attributes) -> Self {
        let name = name.into();
        let mut scopes = IndexMap::new();
        scopes.insert(name.clone(), Scope::new(None, attrs.trimmed()));

        Self {
            name,
            directed,
            scopes,
            nodes: IndexMap::new(),
            edges: Vec::new(),
        }
    }

    /// Returns the name of the root scope.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns `true` for a `digraph`.
    pub fn is_directed(&self) -> bool {
        self.directed
    }

    /// Sets a graph attribute on `scope`. An empty value removes the attribute.
    pub fn set_graph_attr(
        &mut self,
        scope: &str,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> Result<(), GraphError> {
        let scope = self.scope_mut(scope)?;
        let (key, value) = (key.into(), value.into());
        if value.is_empty() {
            scope.attributes.remove(&key);
        } else {
            scope.attributes.set(key, value);
        }
        Ok(())
    }

    /// Sets every attribute of `attrs` on `scope`, in order.
    pub fn set_graph_attrs(&mut self, scope: &str, attrs: &Attributes) -> Result<(), GraphError> {
        for (key, value) in attrs.iter() {
            self.set_graph_attr(scope, key, value)?;
        }
        Ok(())
    }

    /// Opens a subgraph `name` nested in `parent`.
    pub fn add_subgraph(
        &mut self,
        parent: &str,
        name: &str,
        attrs: &Attributes,
    ) -> Result<(), GraphError> {
        if self.scopes.contains_key(name) {
            return Err(GraphError::DuplicateScope(name.to_string()));
        }
        self.scope_mut(parent)?.children.push(name.to_string());
        self.scopes.insert(
            name.to_string(),
            Scope::new(Some(parent.to_string()), attrs.trimmed()),
        );

        trace!(parent, name; "Subgraph added");
        Ok(())
    }

    /// Declares node `id` inside `scope`.
    pub fn add_node(&mut self, scope: &str, id: &str, attrs: &Attributes) -> Result<(), GraphError> {
        if self.nodes.contains_key(id) {
            return Err(GraphError::DuplicateNode(id.to_string()));
        }
        self.scope_mut(scope)?.nodes.push(id.to_string());
        self.nodes.insert(id.to_string(), attrs.trimmed());

        trace!(scope, id; "Node added");
        Ok(())
    }

    /// Records an edge from `src` to `dst`.
    ///
    /// Endpoints are resolved when the graph is printed, so an edge may be
    /// recorded before the nodes it connects.
    pub fn add_edge(&mut self, src: &str, dst: &str, attrs: &Attributes) {
        self.edges.push(EdgeStmt {
            src: src.to_string(),
            dst: dst.to_string(),
            attributes: attrs.trimmed(),
        });

        trace!(src, dst; "Edge added");
    }

    /// Returns `true` if node `id` has been declared.
    pub fn contains_node(&self, id: &str) -> bool {
        self.nodes.contains_key(id)
    }

    /// Returns `true` if `name` is the root scope or a subgraph.
    pub fn contains_scope(&self, name: &str) -> bool {
        self.scopes.contains_key(name)
    }

    /// Returns the parent of subgraph `name`; `None` for the root or unknown scopes.
    pub fn parent_of(&self, name: &str) -> Option<&str> {
        self.scopes.get(name)?.parent.as_deref()
    }

    /// Returns the attributes of node `id`.
    pub fn node_attributes(&self, id: &str) -> Option<&Attributes> {
        self.nodes.get(id)
    }

    /// Returns the graph attributes of `scope`.
    pub fn scope_attributes(&self, scope: &str) -> Option<&Attributes> {
        self.scopes.get(scope).map(|scope| &scope.attributes)
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Number of subgraphs, not counting the root scope.
    pub fn subgraph_count(&self) -> usize {
        self.scopes.len() - 1
    }

    /// Checks that every edge endpoint is a declared node.
    pub fn validate(&self) -> Result<(), GraphError> {
        for edge in &self.edges {
            for id in [&edge.src, &edge.dst] {
                if !self.nodes.contains_key(id) {
                    return Err(GraphError::UnknownNode {
                        id: id.clone(),
                        src: edge.src.clone(),
                        dst: edge.dst.clone(),
                    });
                }
            }
        }
        Ok(())
    }

    /// Validates the graph and prints it in DOT syntax.
    pub fn to_dot(&self) -> Result<String, GraphError> {
        self.validate()?;

        let keyword = if self.directed { "digraph" } else { "graph" };
        let mut output = String::with_capacity(1024 + 128 * (self.nodes.len() + self.edges.len()));
        let _ = writeln!(output, "{keyword} {} {{", quote_id(&self.name));

        self.write_scope_body(&mut output, &self.name, 1);

        let op = if self.directed { "->" } else { "--" };
        for edge in &self.edges {
            write_indent(&mut output, 1);
            let _ = write!(output, "{} {op} {}", quote_id(&edge.src), quote_id(&edge.dst));
            write_attr_list(&mut output, &edge.attributes);
        }

        output.push_str("}\n");
        Ok(output)
    }

    fn scope_mut(&mut self, name: &str) -> Result<&mut Scope, GraphError> {
        self.scopes
            .get_mut(name)
            .ok_or_else(|| GraphError::UnknownScope(name.to_string()))
    }

    fn write_scope_body(&self, output: &mut String, name: &str, level: usize) {
        let Some(scope) = self.scopes.get(name) else {
            return;
        };

        for (key, value) in scope.attributes.iter() {
            write_indent(output, level);
            let _ = writeln!(output, "{}=\"{}\";", quote_id(key), escape(value));
        }

        for id in &scope.nodes {
            write_indent(output, level);
            output.push_str(&quote_id(id));
            if let Some(attrs) = self.nodes.get(id) {
                write_attr_list(output, attrs);
            } else {
                output.push_str(";\n");
            }
        }

        for child in &scope.children {
            write_indent(output, level);
            let _ = writeln!(output, "subgraph {} {{", quote_id(child));
            self.write_scope_body(output, child, level + 1);
            write_indent(output, level);
            output.push_str("}\n");
        }
    }
}

/// Writes ` [k="v", ...];` or just `;` when there are no attributes.
fn write_attr_list(output: &mut String, attrs: &Attributes) {
    if attrs.is_empty() {
        output.push_str(";\n");
        return;
    }

    output.push_str(" [");
    for (i, (key, value)) in attrs.iter().enumerate() {
        if i > 0 {
            output.push_str(", ");
        }
        let _ = write!(output, "{}=\"{}\"", quote_id(key), escape(value));
    }
    output.push_str("];\n");
}

fn write_indent(output: &mut String, level: usize) {
    for _ in 0..level {
        output.push_str("  ");
    }
}

const KEYWORDS: [&str; 6] = ["node", "edge", "graph", "digraph", "subgraph", "strict"];

/// Returns `id` unchanged if it is a plain DOT identifier, quoted otherwise.
pub fn quote_id(id: &str) -> Cow<'_, str> {
    let mut chars = id.chars();
    let plain = match chars.next() {
        Some(first) => {
            (first.is_ascii_alphabetic() || first == '_')
                && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
                && !KEYWORDS.iter().any(|kw| kw.eq_ignore_ascii_case(id))
        }
        None => false,
    };

    if plain {
        Cow::Borrowed(id)
    } else {
        Cow::Owned(format!("\"{}\"", escape(id)))
    }
}

/// Escapes a value for use inside a double-quoted DOT string.
///
/// Backslashes pass through so Graphviz escapes such as `\l`, `\r` and `\N`
/// keep working. A backslash that would escape the closing quote, a quote
/// or a line break is doubled.
pub fn escape(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    let mut chars = value.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '"' => escaped.push_str("\\\""),
            '\n' => escaped.push_str("\\n"),
            '\\' if matches!(chars.peek(), None | Some('"' | '\n')) => escaped.push_str("\\\\"),
            c => escaped.push(c),
        }
    }
    escaped
}
