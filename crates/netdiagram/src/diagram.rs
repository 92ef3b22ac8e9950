//! The root aggregate and its render pipeline.

use std::{
    fmt, fs,
    path::{Path, PathBuf},
};

use log::{debug, info};

use netdiagram_core::dot::DotGraph;

use crate::{
    assets::{AssetStore, BundledAssets},
    edge::Edge,
    error::DiagramError,
    export::{self, DOT_EXTENSION, Graphviz, ImageRenderer, OutputFormat, RenderRequest},
    group::Group,
    node::Node,
    options::{DiagramOption, DiagramOptions, EdgeOption, GroupOption, Resolve},
    render::RenderContext,
};

/// Name of the root graph scope.
const ROOT_SCOPE: &str = "root";

/// A network diagram under construction.
///
/// The diagram owns a root [`Group`]; the builder methods below delegate to
/// it. Rendering never mutates the diagram, so the same value can be
/// rendered any number of times.
///
/// # Examples
///
/// ```rust,no_run
/// use netdiagram::{Diagram, catalog::generic::network, options::{diagram, edge, node}};
///
/// let mut diagram = Diagram::new([diagram::label("Office"), diagram::format("png")]);
///
/// let fw = network::firewall([node::id("fw")]);
/// let sw = network::switch([node::id("sw")]);
/// diagram.connect(&fw, &sw, [edge::forward()]);
///
/// diagram.render().expect("Failed to render diagram");
/// ```
pub struct Diagram {
    options: DiagramOptions,
    base: DotGraph,
    root: Group,
    assets: Box<dyn AssetStore>,
}

impl Diagram {
    /// Creates an empty diagram.
    ///
    /// Global attributes derived from `overrides` are applied to the root
    /// scope here; icons come from [`BundledAssets`] until
    /// [`Diagram::with_assets`] replaces the store.
    pub fn new<I>(overrides: I) -> Self
    where
        I: IntoIterator<Item = DiagramOption>,
    {
        let options = DiagramOptions::resolve(overrides);
        let base = DotGraph::with_attributes(ROOT_SCOPE, true, &options.graph_attributes());
        debug!(
            out_dir:? = options.out_dir,
            file_name = options.file_name.as_str(),
            format = options.format.as_str();
            "Diagram created"
        );

        Self {
            options,
            base,
            root: Group::root(ROOT_SCOPE),
            assets: Box::new(BundledAssets),
        }
    }

    pub fn options(&self) -> &DiagramOptions {
        &self.options
    }

    /// Changes the directory that receives the output files.
    pub fn set_output_path(&mut self, dir: impl Into<PathBuf>) -> &mut Self {
        self.options.out_dir = dir.into();
        self
    }

    /// Replaces the store icons are read from.
    pub fn with_assets(mut self, store: impl AssetStore + 'static) -> Self {
        self.set_assets(store);
        self
    }

    pub fn set_assets(&mut self, store: impl AssetStore + 'static) -> &mut Self {
        self.assets = Box::new(store);
        self
    }

    /// The implicit top-level group.
    pub fn root(&self) -> &Group {
        &self.root
    }

    pub fn root_mut(&mut self) -> &mut Group {
        &mut self.root
    }

    /// Every node in the diagram.
    pub fn nodes(&self) -> Vec<&Node> {
        self.root.nodes()
    }

    /// Every edge in the diagram.
    pub fn edges(&self) -> Vec<&Edge> {
        self.root.edges()
    }

    /// Every group in the diagram, depth first.
    pub fn groups(&self) -> Vec<&Group> {
        self.root.children()
    }

    /// Finds a group anywhere in the diagram.
    pub fn find_group(&self, id: &str) -> Option<&Group> {
        self.root.find_group(id)
    }

    pub fn find_group_mut(&mut self, id: &str) -> Option<&mut Group> {
        self.root.find_group_mut(id)
    }

    /// Adds nodes at the top level.
    pub fn add(&mut self, nodes: impl IntoIterator<Item = Node>) -> &mut Self {
        self.root.add(nodes);
        self
    }

    /// Connects two nodes, adding endpoints that are not yet in the diagram.
    pub fn connect<I>(&mut self, start: &Node, end: &Node, overrides: I) -> &mut Self
    where
        I: IntoIterator<Item = EdgeOption>,
    {
        self.root.connect(start, end, overrides);
        self
    }

    /// Connects two node identifiers; both must exist when rendering.
    pub fn connect_by_id<I>(&mut self, start: &str, end: &str, overrides: I) -> &mut Self
    where
        I: IntoIterator<Item = EdgeOption>,
    {
        self.root.connect_by_id(start, end, overrides);
        self
    }

    /// Attaches a group at the top level.
    pub fn group(&mut self, group: Group) -> &mut Self {
        self.root.group(group);
        self
    }

    /// Attaches an empty top-level group and returns it.
    pub fn new_group<I>(&mut self, name: impl Into<String>, overrides: I) -> &mut Group
    where
        I: IntoIterator<Item = GroupOption>,
    {
        self.root.new_group(name, overrides)
    }

    /// Path of the graph description written by [`Diagram::render`].
    pub fn dot_path(&self) -> PathBuf {
        self.options
            .out_dir
            .join(format!("{}.{DOT_EXTENSION}", self.options.file_name))
    }

    /// Path of the image for the configured format; the description itself for `dot`.
    pub fn output_path(&self) -> Result<PathBuf, DiagramError> {
        let format: OutputFormat = self.options.format.parse()?;
        Ok(self
            .options
            .out_dir
            .join(format!("{}.{}", self.options.file_name, format.extension())))
    }

    /// Builds the graph description without touching the file system.
    ///
    /// # Errors
    ///
    /// Returns [`DiagramError::Graph`] for duplicate identifiers or edges
    /// naming unknown nodes.
    pub fn to_dot(&self) -> Result<String, DiagramError> {
        let mut ctx = RenderContext::in_memory(self.assets.as_ref());
        let graph = self.build(&mut ctx)?;
        Ok(graph.to_dot()?)
    }

    /// Renders with the Graphviz program named in the options.
    ///
    /// See [`Diagram::render_with`].
    pub fn render(&self) -> Result<(), DiagramError> {
        self.render_with(&Graphviz::new(self.options.renderer.as_str()))
    }

    /// Writes the description, stages icons and, for image formats, runs `renderer`.
    ///
    /// The description file is written before an unsupported format is
    /// reported, so it is left on disk for inspection. Icons are staged only
    /// for a supported format.
    ///
    /// # Errors
    ///
    /// - [`DiagramError::Io`] if the output directory or a file cannot be written.
    /// - [`DiagramError::Asset`] if an icon is missing from the asset store.
    /// - [`DiagramError::Graph`] for dangling edges or duplicate identifiers.
    /// - [`DiagramError::UnsupportedFormat`] for formats other than dot, png, jpg, svg and pdf.
    /// - [`DiagramError::Renderer`] if the renderer fails.
    pub fn render_with(&self, renderer: &dyn ImageRenderer) -> Result<(), DiagramError> {
        let out_dir = self.options.out_dir.as_path();
        info!(out_dir:? = out_dir; "Rendering diagram");

        fs::create_dir_all(out_dir).map_err(|err| DiagramError::io(out_dir, err))?;

        let format = self.options.format.parse::<OutputFormat>();
        let mut ctx = match format {
            Ok(_) => RenderContext::staging(out_dir, self.assets.as_ref()),
            Err(_) => RenderContext::in_memory(self.assets.as_ref()),
        };
        let graph = self.build(&mut ctx)?;
        let description = graph.to_dot()?;
        debug!(
            nodes = graph.node_count(),
            edges = graph.edge_count(),
            groups = graph.subgraph_count(),
            icons = ctx.staged_count();
            "Graph built"
        );

        export::write_description(out_dir, &self.options.file_name, &description)?;

        let format = format?;
        if !format.is_image() {
            return Ok(());
        }

        self.run_renderer(renderer, out_dir, format)
    }

    fn build(&self, ctx: &mut RenderContext<'_>) -> Result<DotGraph, DiagramError> {
        let mut graph = self.base.clone();
        self.root.render_tree(ROOT_SCOPE, ctx, &mut graph)?;
        Ok(graph)
    }

    fn run_renderer(
        &self,
        renderer: &dyn ImageRenderer,
        out_dir: &Path,
        format: OutputFormat,
    ) -> Result<(), DiagramError> {
        let file_name = &self.options.file_name;
        let input = format!("{file_name}.{DOT_EXTENSION}");
        let output = format!("{file_name}.{}", format.extension());

        renderer.render(&RenderRequest {
            format,
            working_dir: out_dir,
            input: &input,
            output: &output,
        })?;

        info!(path:? = out_dir.join(&output); "Image rendered");
        Ok(())
    }
}

impl Default for Diagram {
    fn default() -> Self {
        Self::new([])
    }
}

impl fmt::Debug for Diagram {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Diagram")
            .field("options", &self.options)
            .field("root", &self.root)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::cell::RefCell;

    use crate::{
        assets::MemoryAssets,
        options::{diagram, edge, node},
    };

    /// Records requests and writes a placeholder image.
    #[derive(Default)]
    struct FakeRenderer {
        requests: RefCell<Vec<(OutputFormat, String, String)>>,
    }

    impl ImageRenderer for FakeRenderer {
        fn render(&self, request: &RenderRequest<'_>) -> Result<(), DiagramError> {
            self.requests.borrow_mut().push((
                request.format,
                request.input.to_string(),
                request.output.to_string(),
            ));
            fs::write(request.output_path(), b"image").unwrap();
            Ok(())
        }
    }

    fn router(id: &str) -> Node {
        Node::new("generic", "network", "router", [node::id(id)])
    }

    #[test]
    fn test_global_attributes() {
        let diagram = Diagram::new([diagram::label("Office"), diagram::direction("TB")]);
        let dot = diagram.to_dot().unwrap();

        assert!(dot.starts_with("digraph root {\n"));
        assert!(dot.contains("  label=\"Office\";\n"));
        assert!(dot.contains("  rankdir=\"TB\";\n"));
        assert!(dot.contains("  splines=\"ortho\";\n"));
    }

    #[test]
    fn test_untitled_diagram_has_no_label() {
        let dot = Diagram::default().to_dot().unwrap();
        assert!(!dot.contains("  label="));
    }

    #[test]
    fn test_builder_delegates_to_root() {
        let (a, b) = (router("a"), router("b"));
        let mut diagram = Diagram::default();
        diagram
            .add([a.clone()])
            .connect(&a, &b, [edge::forward()])
            .group(Group::new("lan", []));

        assert_eq!(diagram.nodes().len(), 2);
        assert_eq!(diagram.edges().len(), 1);
        assert_eq!(diagram.groups()[0].depth(), 1);
    }

    #[test]
    fn test_to_dot_does_not_touch_disk() {
        let dir = tempfile::tempdir().unwrap();
        let out_dir = dir.path().join("out");
        let mut diagram = Diagram::new([diagram::out_dir(&out_dir)]);
        diagram.add([router("r")]);

        diagram.to_dot().unwrap();
        assert!(!out_dir.exists());
    }

    #[test]
    fn test_render_with_image_format() {
        let dir = tempfile::tempdir().unwrap();
        let mut diagram = Diagram::new([diagram::format("svg"), diagram::file_name("net")]);
        diagram.set_output_path(dir.path()).add([router("r")]);

        let renderer = FakeRenderer::default();
        diagram.render_with(&renderer).unwrap();

        assert_eq!(
            renderer.requests.borrow().as_slice(),
            [(OutputFormat::Svg, "net.dot".to_string(), "net.svg".to_string())]
        );
        assert!(dir.path().join("net.dot").is_file());
        assert!(dir.path().join("net.svg").is_file());
        assert!(dir.path().join("assets/generic/network/router.png").is_file());
        assert_eq!(diagram.output_path().unwrap(), dir.path().join("net.svg"));
    }

    #[test]
    fn test_dot_format_skips_renderer() {
        let dir = tempfile::tempdir().unwrap();
        let mut diagram = Diagram::default();
        diagram.set_output_path(dir.path());

        let renderer = FakeRenderer::default();
        diagram.render_with(&renderer).unwrap();

        assert!(renderer.requests.borrow().is_empty());
        assert_eq!(diagram.dot_path(), dir.path().join("app.dot"));
        assert!(diagram.dot_path().is_file());
    }

    #[test]
    fn test_custom_asset_store() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = MemoryAssets::new();
        store.insert("custom/net/box.png", b"box".to_vec());

        let mut diagram = Diagram::new([diagram::out_dir(dir.path())]).with_assets(store);
        diagram.add([Node::new("custom", "net", "box", [])]);
        diagram.render().unwrap();

        assert_eq!(
            fs::read(dir.path().join("assets/custom/net/box.png")).unwrap(),
            b"box"
        );
    }

    #[test]
    fn test_duplicate_node_across_groups() {
        let mut diagram = Diagram::default();
        diagram.add([router("r")]);
        diagram.new_group("lan", []).add([router("r")]);

        let err = diagram.to_dot().unwrap_err();
        assert!(matches!(err, DiagramError::Graph(_)));
    }

    #[test]
    fn test_group_connect_to_top_level_node() {
        let (fw, sw) = (router("fw"), router("sw"));
        let mut diagram = Diagram::default();
        diagram.add([fw.clone()]);
        diagram.new_group("lan", []).add([sw.clone()]).connect(&fw, &sw, []);

        let dot = diagram.to_dot().unwrap();
        assert_eq!(dot.matches("fw [").count(), 1);
        assert!(dot.contains("fw -> sw"));
    }

    #[test]
    fn test_unsupported_format_stages_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let mut diagram = Diagram::new([diagram::format("bmp")]);
        diagram.set_output_path(dir.path()).add([router("r")]);

        let renderer = FakeRenderer::default();
        let err = diagram.render_with(&renderer).unwrap_err();

        assert!(matches!(err, DiagramError::UnsupportedFormat(_)));
        assert!(diagram.dot_path().is_file());
        assert!(!dir.path().join("assets").exists());
        assert!(renderer.requests.borrow().is_empty());
    }
}
