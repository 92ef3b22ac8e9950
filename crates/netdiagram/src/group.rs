//! Nested containers of nodes, edges and child groups.

use log::debug;

use netdiagram_core::{attributes::Attributes, dot::DotGraph};

use crate::{
    edge::Edge,
    error::DiagramError,
    node::Node,
    options::{EdgeOption, GroupOption, GroupOptions, Resolve, format_number},
    render::RenderContext,
};

/// Prefix that makes Graphviz draw a subgraph as a cluster.
const CLUSTER_PREFIX: &str = "cluster_";

/// A named container drawn as a cluster.
///
/// A group owns its nodes, the edges recorded on it and its child groups.
/// The parent is kept as an identifier only.
///
/// Endpoints pulled in by [`Group::connect`] are placed here only if no other
/// group in the rendered tree declares them.
///
/// # Examples
///
/// ```
/// use netdiagram::{group::Group, node::Node, options::{edge, node}};
///
/// let web = Node::new("generic", "compute", "rack", [node::id("web")]);
/// let db = Node::new("generic", "database", "sql", [node::id("db")]);
///
/// let mut dmz = Group::new("dmz", []);
/// dmz.connect(&web, &db, [edge::label("5432")]);
///
/// assert_eq!(dmz.nodes().len(), 2);
/// assert_eq!(dmz.edges().len(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct Group {
    id: String,
    depth: usize,
    parent: Option<String>,
    options: GroupOptions,
    nodes: Vec<Node>,
    /// Identifiers in `nodes` that were added by `connect`, not `add`.
    implicit: Vec<String>,
    edges: Vec<Edge>,
    children: Vec<Group>,
}

/// Connect endpoints waiting for the second render pass, with their scope.
type Deferred<'a> = Vec<(String, &'a Node)>;

impl Group {
    /// Creates an empty, detached group.
    ///
    /// `name` is the group identifier and, unless a label override is given,
    /// its caption.
    pub fn new<I>(name: impl Into<String>, overrides: I) -> Self
    where
        I: IntoIterator<Item = GroupOption>,
    {
        Self {
            id: name.into(),
            depth: 1,
            parent: None,
            options: GroupOptions::resolve(overrides),
            nodes: Vec::new(),
            implicit: Vec::new(),
            edges: Vec::new(),
            children: Vec::new(),
        }
    }

    /// The implicit top-level group of a diagram.
    pub(crate) fn root(name: &str) -> Self {
        Self {
            depth: 0,
            ..Self::new(name, [])
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn label(&self) -> &str {
        self.options.label.as_deref().unwrap_or(&self.id)
    }

    /// Nesting depth; 0 for the diagram root, 1 for its children.
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Identifier of the enclosing group, `None` at the top level.
    pub fn parent(&self) -> Option<&str> {
        self.parent.as_deref()
    }

    pub fn options(&self) -> &GroupOptions {
        &self.options
    }

    /// Appends nodes to this group. Nodes already owned by this group are skipped.
    pub fn add(&mut self, nodes: impl IntoIterator<Item = Node>) -> &mut Self {
        for node in nodes {
            if self.nodes.iter().any(|owned| owned.id() == node.id()) {
                self.implicit.retain(|id| id != node.id());
                continue;
            }
            self.nodes.push(node);
        }
        self
    }

    /// Connects two nodes.
    ///
    /// Endpoints not yet present anywhere in this group's subtree are added
    /// to this group. At render time such an endpoint is dropped if another
    /// group of the diagram already declares it.
    pub fn connect<I>(&mut self, start: &Node, end: &Node, overrides: I) -> &mut Self
    where
        I: IntoIterator<Item = EdgeOption>,
    {
        for node in [start, end] {
            if !self.contains_node(node.id()) {
                self.nodes.push(node.clone());
                self.implicit.push(node.id().to_string());
            }
        }
        self.connect_by_id(start.id(), end.id(), overrides)
    }

    /// Connects two node identifiers that may live anywhere in the diagram.
    ///
    /// Unknown identifiers are reported when the diagram is rendered.
    pub fn connect_by_id<I>(&mut self, start: &str, end: &str, overrides: I) -> &mut Self
    where
        I: IntoIterator<Item = EdgeOption>,
    {
        self.edges.push(Edge::new(start, end, overrides));
        self
    }

    /// Attaches `child` one level below this group.
    pub fn group(&mut self, mut child: Group) -> &mut Self {
        child.set_depth(self.depth + 1);
        child.parent = (self.depth > 0).then(|| self.id.clone());
        self.children.push(child);
        self
    }

    /// Attaches an empty child group and returns it.
    pub fn new_group<I>(&mut self, name: impl Into<String>, overrides: I) -> &mut Group
    where
        I: IntoIterator<Item = GroupOption>,
    {
        self.group(Group::new(name, overrides));
        let index = self.children.len() - 1;
        &mut self.children[index]
    }

    /// Every node in this group and its descendants, once per identifier.
    pub fn nodes(&self) -> Vec<&Node> {
        let mut nodes: Vec<&Node> = self.nodes.iter().collect();
        for child in &self.children {
            for node in child.nodes() {
                if !nodes.iter().any(|seen| seen.id() == node.id()) {
                    nodes.push(node);
                }
            }
        }
        nodes
    }

    /// Every edge recorded on this group and its descendants.
    pub fn edges(&self) -> Vec<&Edge> {
        let mut edges: Vec<&Edge> = self.edges.iter().collect();
        for child in &self.children {
            edges.extend(child.edges());
        }
        edges
    }

    /// Every descendant group, depth first.
    pub fn children(&self) -> Vec<&Group> {
        let mut groups = Vec::new();
        for child in &self.children {
            groups.push(child);
            groups.extend(child.children());
        }
        groups
    }

    /// Returns `true` if a node with `id` lives in this group's subtree.
    pub fn contains_node(&self, id: &str) -> bool {
        self.nodes.iter().any(|node| node.id() == id)
            || self.children.iter().any(|child| child.contains_node(id))
    }

    /// Finds a descendant group by identifier.
    pub fn find_group(&self, id: &str) -> Option<&Group> {
        self.children.iter().find_map(|child| {
            if child.id == id {
                Some(child)
            } else {
                child.find_group(id)
            }
        })
    }

    /// Mutable variant of [`Group::find_group`].
    pub fn find_group_mut(&mut self, id: &str) -> Option<&mut Group> {
        self.children.iter_mut().find_map(|child| {
            if child.id == id {
                Some(child)
            } else {
                child.find_group_mut(id)
            }
        })
    }

    /// Name of the subgraph this group renders into.
    pub fn scope_name(&self) -> String {
        format!("{CLUSTER_PREFIX}{}", self.id)
    }

    /// Cluster attributes, extras last.
    pub fn attributes(&self) -> Attributes {
        let options = &self.options;
        let mut attrs = Attributes::new()
            .with("label", self.label())
            .with("labeljust", &options.label_justify)
            .with("pencolor", &options.pen_color)
            .with("bgcolor", options.background_for(self.depth))
            .with("style", &options.style)
            .with("fontname", &options.font.name)
            .with("fontsize", format_number(options.font.size))
            .with("fontcolor", &options.font.color);
        attrs.extend(options.attributes.iter());
        attrs
    }

    /// Renders this group's contents and every descendant into `scope`.
    ///
    /// Nodes added with [`Group::add`] are declared first, across the whole
    /// tree. Endpoints added by [`Group::connect`] follow, skipping those
    /// already declared elsewhere.
    pub(crate) fn render_tree(
        &self,
        scope: &str,
        ctx: &mut RenderContext<'_>,
        graph: &mut DotGraph,
    ) -> Result<(), DiagramError> {
        let mut deferred = Deferred::new();
        self.render_contents(scope, ctx, graph, &mut deferred)?;

        for (scope, node) in deferred {
            if graph.contains_node(node.id()) {
                debug!(id = node.id(), scope = scope.as_str(); "Endpoint declared elsewhere");
                continue;
            }
            node.render(&scope, ctx, graph)?;
        }
        Ok(())
    }

    /// Opens this group's cluster inside `parent_scope` and renders into it.
    fn render<'a>(
        &'a self,
        parent_scope: &str,
        ctx: &mut RenderContext<'_>,
        graph: &mut DotGraph,
        deferred: &mut Deferred<'a>,
    ) -> Result<(), DiagramError> {
        let scope = self.scope_name();
        debug!(id = self.id.as_str(), depth = self.depth, parent_scope; "Rendering group");

        graph.add_subgraph(parent_scope, &scope, &self.attributes())?;
        self.render_contents(&scope, ctx, graph, deferred)
    }

    /// Renders owned nodes, then owned edges, then child groups into `scope`.
    fn render_contents<'a>(
        &'a self,
        scope: &str,
        ctx: &mut RenderContext<'_>,
        graph: &mut DotGraph,
        deferred: &mut Deferred<'a>,
    ) -> Result<(), DiagramError> {
        for node in &self.nodes {
            if self.implicit.iter().any(|id| id == node.id()) {
                deferred.push((scope.to_string(), node));
                continue;
            }
            node.render(scope, ctx, graph)?;
        }
        for edge in &self.edges {
            edge.render(graph);
        }
        for child in &self.children {
            child.render(scope, ctx, graph, deferred)?;
        }
        Ok(())
    }

    fn set_depth(&mut self, depth: usize) {
        self.depth = depth;
        for child in &mut self.children {
            child.set_depth(depth + 1);
        }
    }
}
