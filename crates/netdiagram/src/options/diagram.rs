//! Diagram-level options.

use std::path::PathBuf;

use netdiagram_core::attributes::Attributes;

use super::{DEFAULT_FONT_COLOR, DEFAULT_FONT_NAME, Font, Override, Resolve, format_number};

/// Override for [`DiagramOptions`].
pub type DiagramOption = Override<DiagramOptions>;

/// Settings for a whole diagram and its output files.
///
/// | Field | Default |
/// |---|---|
/// | `out_dir` | `netdiagram` |
/// | `file_name` | `app` |
/// | `format` | `dot` |
/// | `label` | empty (no title) |
/// | `direction` | `LR` |
/// | `curve_style` | `ortho` |
/// | `font` | `Sans-Serif`, 15, `#2D3436` |
/// | `pad` / `node_sep` / `rank_sep` | `2.0` / `0.60` / `0.75` |
/// | `renderer` | `dot` |
#[derive(Debug, Clone, PartialEq)]
pub struct DiagramOptions {
    /// Directory that receives the description, the image and staged icons.
    pub out_dir: PathBuf,
    /// Base name of the output files, without extension.
    pub file_name: String,
    /// Requested output format.
    pub format: String,
    /// Diagram title.
    pub label: String,
    /// Graphviz `rankdir`: `TB`, `BT`, `LR` or `RL`.
    pub direction: String,
    /// Graphviz `splines`, e.g. `ortho`, `curved`, `spline`.
    pub curve_style: String,
    pub font: Font,
    pub pad: String,
    pub node_sep: String,
    pub rank_sep: String,
    /// Program invoked to produce images.
    pub renderer: String,
    /// Extra graph attributes; they win over the ones derived from the fields above.
    pub attributes: Attributes,
}

impl Default for DiagramOptions {
    fn default() -> Self {
        Self {
            out_dir: PathBuf::from("netdiagram"),
            file_name: "app".to_string(),
            format: "dot".to_string(),
            label: String::new(),
            direction: "LR".to_string(),
            curve_style: "ortho".to_string(),
            font: Font::new(DEFAULT_FONT_NAME, 15.0, DEFAULT_FONT_COLOR),
            pad: "2.0".to_string(),
            node_sep: "0.60".to_string(),
            rank_sep: "0.75".to_string(),
            renderer: "dot".to_string(),
            attributes: Attributes::new(),
        }
    }
}

impl Resolve for DiagramOptions {}

impl DiagramOptions {
    /// Graph attributes applied to the root scope.
    pub fn graph_attributes(&self) -> Attributes {
        let mut attrs = Attributes::new()
            .with("label", &self.label)
            .with("labelloc", "t")
            .with("rankdir", &self.direction)
            .with("splines", &self.curve_style)
            .with("pad", &self.pad)
            .with("nodesep", &self.node_sep)
            .with("ranksep", &self.rank_sep)
            .with("fontname", &self.font.name)
            .with("fontsize", format_number(self.font.size))
            .with("fontcolor", &self.font.color);
        attrs.extend(self.attributes.iter());
        attrs
    }
}

pub fn out_dir(path: impl Into<PathBuf>) -> DiagramOption {
    let path = path.into();
    Box::new(move |o| o.out_dir = path)
}

pub fn file_name(name: impl Into<String>) -> DiagramOption {
    let name = name.into();
    Box::new(move |o| o.file_name = name)
}

pub fn format(format: impl Into<String>) -> DiagramOption {
    let format = format.into();
    Box::new(move |o| o.format = format)
}

pub fn label(label: impl Into<String>) -> DiagramOption {
    let label = label.into();
    Box::new(move |o| o.label = label)
}

pub fn direction(direction: impl Into<String>) -> DiagramOption {
    let direction = direction.into();
    Box::new(move |o| o.direction = direction)
}

pub fn curve_style(style: impl Into<String>) -> DiagramOption {
    let style = style.into();
    Box::new(move |o| o.curve_style = style)
}

pub fn font_name(name: impl Into<String>) -> DiagramOption {
    let name = name.into();
    Box::new(move |o| o.font.name = name)
}

pub fn font_size(size: f64) -> DiagramOption {
    Box::new(move |o| o.font.size = size)
}

pub fn font_color(color: impl Into<String>) -> DiagramOption {
    let color = color.into();
    Box::new(move |o| o.font.color = color)
}

pub fn renderer(program: impl Into<String>) -> DiagramOption {
    let program = program.into();
    Box::new(move |o| o.renderer = program)
}

/// Sets an extra graph attribute.
pub fn attribute(key: impl Into<String>, value: impl Into<String>) -> DiagramOption {
    let (key, value) = (key.into(), value.into());
    Box::new(move |o| {
        o.attributes.set(key, value);
    })
}
