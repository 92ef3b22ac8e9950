//! Diagram vertices.

use log::trace;

use netdiagram_core::{attributes::Attributes, dot::DotGraph, identifier};

use crate::{
    error::DiagramError,
    options::{NodeOption, NodeOptions, Resolve, format_number},
    render::{RenderContext, icon_reference},
};

/// A labelled vertex drawn with an icon.
///
/// A node is classified by provider, category and name; the classification
/// selects its default icon `<provider>/<category>/<name>.png`. Cloning a node
/// keeps its identifier, so a clone refers to the same vertex.
///
/// # Examples
///
/// ```
/// use netdiagram::{node::Node, options::node};
///
/// let router = Node::new("generic", "network", "router", [node::id("edge")]);
/// assert_eq!(router.id(), "edge");
/// assert_eq!(router.label(), "Router");
/// assert_eq!(router.icon(), Some("generic/network/router.png"));
/// ```
#[derive(Debug, Clone)]
pub struct Node {
    id: String,
    provider: String,
    category: String,
    name: String,
    options: NodeOptions,
}

impl Node {
    /// Creates a node of kind `provider`/`category`/`name`.
    ///
    /// The label defaults to a readable form of `name` and the icon to
    /// [`default_icon_path`]. Both are seeded before `overrides` run. Without
    /// an [`id`](crate::options::node::id) override the identifier is random.
    pub fn new<I>(provider: &str, category: &str, name: &str, overrides: I) -> Self
    where
        I: IntoIterator<Item = NodeOption>,
    {
        let mut options = NodeOptions {
            label: humanize(name),
            icon: Some(default_icon_path(provider, category, name)),
            ..NodeOptions::default()
        };
        options.apply(overrides);

        let id = options.id.clone().unwrap_or_else(identifier::random_id);
        trace!(id, provider, category, name; "Node created");

        Self {
            id,
            provider: provider.to_string(),
            category: category.to_string(),
            name: name.to_string(),
            options,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn label(&self) -> &str {
        &self.options.label
    }

    pub fn provider(&self) -> &str {
        &self.provider
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Logical asset path of the icon, if the node has one.
    pub fn icon(&self) -> Option<&str> {
        self.options.icon.as_deref()
    }

    pub fn options(&self) -> &NodeOptions {
        &self.options
    }

    /// Attributes of the vertex statement, extras last.
    pub fn attributes(&self) -> Attributes {
        let options = &self.options;
        let mut attrs = Attributes::new()
            .with("label", &options.label)
            .with("labelloc", &options.label_location)
            .with("shape", &options.shape)
            .with("style", &options.style)
            .with("width", format_number(options.width))
            .with("height", format_number(options.effective_height()))
            .with("fixedsize", options.fixed_size.to_string())
            .with("imagescale", options.image_scale.to_string())
            .with("fontname", &options.font.name)
            .with("fontsize", format_number(options.font.size))
            .with("fontcolor", &options.font.color)
            .with("color", &options.color);
        if let Some(icon) = &options.icon {
            attrs.set("image", icon_reference(icon));
        }
        attrs.extend(options.attributes.iter());
        attrs
    }

    /// Stages the icon and declares the vertex inside `scope`.
    pub(crate) fn render(
        &self,
        scope: &str,
        ctx: &mut RenderContext<'_>,
        graph: &mut DotGraph,
    ) -> Result<(), DiagramError> {
        if let Some(icon) = self.icon() {
            ctx.stage_icon(icon)?;
        }
        graph.add_node(scope, &self.id, &self.attributes())?;
        Ok(())
    }
}

/// Default icon of a node kind.
pub fn default_icon_path(provider: &str, category: &str, name: &str) -> String {
    format!("{provider}/{category}/{name}.png")
}

/// Turns `load_balancer` or `load-balancer` into `Load Balancer`.
pub fn humanize(name: &str) -> String {
    name.split(['_', '-'])
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
