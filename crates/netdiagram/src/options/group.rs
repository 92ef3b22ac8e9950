//! Group-level options.

use netdiagram_core::attributes::Attributes;

use super::{DEFAULT_FONT_COLOR, DEFAULT_FONT_NAME, Font, Override, Resolve};

/// Override for [`GroupOptions`].
pub type GroupOption = Override<GroupOptions>;

/// Background colors cycled by nesting depth when no background is set.
pub const DEPTH_BACKGROUNDS: [&str; 4] = ["#E5F5FD", "#EBF3E7", "#ECE8F6", "#FDF7E3"];

/// Visual settings of a group cluster.
///
/// | Field | Default |
/// |---|---|
/// | `label` | `None` (group name) |
/// | `label_justify` | `l` |
/// | `pen_color` | `#AEB6BE` |
/// | `background` | `None` ([`DEPTH_BACKGROUNDS`] by depth) |
/// | `style` | `rounded` |
/// | `font` | `Sans-Serif`, 12, `#2D3436` |
#[derive(Debug, Clone, PartialEq)]
pub struct GroupOptions {
    pub label: Option<String>,
    pub label_justify: String,
    pub pen_color: String,
    pub background: Option<String>,
    pub style: String,
    pub font: Font,
    pub attributes: Attributes,
}

impl Default for GroupOptions {
    fn default() -> Self {
        Self {
            label: None,
            label_justify: "l".to_string(),
            pen_color: "#AEB6BE".to_string(),
            background: None,
            style: "rounded".to_string(),
            font: Font::new(DEFAULT_FONT_NAME, 12.0, DEFAULT_FONT_COLOR),
            attributes: Attributes::new(),
        }
    }
}

impl Resolve for GroupOptions {}

impl GroupOptions {
    /// Background for a group nested at `depth` (1 for children of the root).
    pub fn background_for(&self, depth: usize) -> &str {
        match &self.background {
            Some(color) => color.as_str(),
            None => DEPTH_BACKGROUNDS[depth.saturating_sub(1) % DEPTH_BACKGROUNDS.len()],
        }
    }
}

pub fn label(label: impl Into<String>) -> GroupOption {
    let label = label.into();
    Box::new(move |o| o.label = Some(label))
}

pub fn background(color: impl Into<String>) -> GroupOption {
    let color = color.into();
    Box::new(move |o| o.background = Some(color))
}

pub fn pen_color(color: impl Into<String>) -> GroupOption {
    let color = color.into();
    Box::new(move |o| o.pen_color = color)
}

pub fn style(style: impl Into<String>) -> GroupOption {
    let style = style.into();
    Box::new(move |o| o.style = style)
}

pub fn font_name(name: impl Into<String>) -> GroupOption {
    let name = name.into();
    Box::new(move |o| o.font.name = name)
}

pub fn font_size(size: f64) -> GroupOption {
    Box::new(move |o| o.font.size = size)
}

pub fn font_color(color: impl Into<String>) -> GroupOption {
    let color = color.into();
    Box::new(move |o| o.font.color = color)
}

/// Sets an extra cluster attribute.
pub fn attribute(key: impl Into<String>, value: impl Into<String>) -> GroupOption {
    let (key, value) = (key.into(), value.into());
    Box::new(move |o| {
        o.attributes.set(key, value);
    })
}
