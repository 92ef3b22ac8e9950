//! Node-level options.

use netdiagram_core::attributes::Attributes;

use super::{DEFAULT_FONT_COLOR, DEFAULT_FONT_NAME, Font, Override, Resolve};

/// Override for [`NodeOptions`].
pub type NodeOption = Override<NodeOptions>;

/// Extra height added for every label line after the first.
pub const LABEL_LINE_HEIGHT: f64 = 0.4;

/// Visual settings of a node.
///
/// [`Node::new`](crate::node::Node::new) seeds `label` and `icon` from the
/// node's kind before the caller's overrides run, so both can be replaced
/// or cleared.
///
/// | Field | Default |
/// |---|---|
/// | `id` | `None` (random identifier) |
/// | `label` | empty |
/// | `icon` | `None` |
/// | `shape` | `none` |
/// | `width` / `height` | `1.4` / `1.9` |
/// | `fixed_size` / `image_scale` | `true` / `true` |
/// | `label_location` | `b` |
/// | `font` | `Sans-Serif`, 13, `#2D3436` |
#[derive(Debug, Clone, PartialEq)]
pub struct NodeOptions {
    pub id: Option<String>,
    pub label: String,
    /// Logical asset path of the icon, e.g. `generic/network/router.png`.
    pub icon: Option<String>,
    pub shape: String,
    pub style: String,
    pub width: f64,
    pub height: f64,
    pub fixed_size: bool,
    pub image_scale: bool,
    pub label_location: String,
    pub font: Font,
    pub color: String,
    pub attributes: Attributes,
}

impl Default for NodeOptions {
    fn default() -> Self {
        Self {
            id: None,
            label: String::new(),
            icon: None,
            shape: "none".to_string(),
            style: String::new(),
            width: 1.4,
            height: 1.9,
            fixed_size: true,
            image_scale: true,
            label_location: "b".to_string(),
            font: Font::new(DEFAULT_FONT_NAME, 13.0, DEFAULT_FONT_COLOR),
            color: String::new(),
            attributes: Attributes::new(),
        }
    }
}

impl Resolve for NodeOptions {}

impl NodeOptions {
    /// Height including the room taken by multi-line labels.
    pub fn effective_height(&self) -> f64 {
        let extra_lines = self.label.lines().count().saturating_sub(1);
        self.height + LABEL_LINE_HEIGHT * extra_lines as f64
    }
}

/// Uses `id` instead of a random identifier.
pub fn id(id: impl Into<String>) -> NodeOption {
    let id = id.into();
    Box::new(move |o| o.id = Some(id))
}

pub fn label(label: impl Into<String>) -> NodeOption {
    let label = label.into();
    Box::new(move |o| o.label = label)
}

/// Replaces the icon with another asset path.
pub fn icon(path: impl Into<String>) -> NodeOption {
    let path = path.into();
    Box::new(move |o| o.icon = Some(path))
}

/// Renders the node without an image.
pub fn no_icon() -> NodeOption {
    Box::new(|o| o.icon = None)
}

pub fn shape(shape: impl Into<String>) -> NodeOption {
    let shape = shape.into();
    Box::new(move |o| o.shape = shape)
}

pub fn style(style: impl Into<String>) -> NodeOption {
    let style = style.into();
    Box::new(move |o| o.style = style)
}

pub fn width(width: f64) -> NodeOption {
    Box::new(move |o| o.width = width)
}

pub fn height(height: f64) -> NodeOption {
    Box::new(move |o| o.height = height)
}

pub fn color(color: impl Into<String>) -> NodeOption {
    let color = color.into();
    Box::new(move |o| o.color = color)
}

pub fn font_name(name: impl Into<String>) -> NodeOption {
    let name = name.into();
    Box::new(move |o| o.font.name = name)
}

pub fn font_size(size: f64) -> NodeOption {
    Box::new(move |o| o.font.size = size)
}

pub fn font_color(color: impl Into<String>) -> NodeOption {
    let color = color.into();
    Box::new(move |o| o.font.color = color)
}

/// Sets an extra node attribute.
pub fn attribute(key: impl Into<String>, value: impl Into<String>) -> NodeOption {
    let (key, value) = (key.into(), value.into());
    Box::new(move |o| {
        o.attributes.set(key, value);
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = NodeOptions::default();
        assert_eq!(options.id, None);
        assert_eq!(options.shape, "none");
        assert_eq!(options.label_location, "b");
        assert!(options.fixed_size);
        assert_eq!(options.font.size, 13.0);
    }

    #[test]
    fn test_icon_overrides() {
        let options = NodeOptions::resolve([icon("custom/a.png")]);
        assert_eq!(options.icon.as_deref(), Some("custom/a.png"));

        let options = NodeOptions::resolve([icon("custom/a.png"), no_icon()]);
        assert_eq!(options.icon, None);
    }

    #[test]
    fn test_effective_height_grows_with_lines() {
        let single = NodeOptions::resolve([label("Router")]);
        assert_eq!(single.effective_height(), 1.9);

        let triple = NodeOptions::resolve([label("Core\nRouter\nrack 2")]);
        assert!((triple.effective_height() - 2.7).abs() < 1e-9);
    }

    #[test]
    fn test_attribute_override() {
        let options = NodeOptions::resolve([attribute("tooltip", "edge router")]);
        assert_eq!(options.attributes.get("tooltip"), Some("edge router"));
    }
}
