//! Edge-level options.

use netdiagram_core::attributes::Attributes;

use super::{DEFAULT_FONT_NAME, Font, Override, Resolve, format_number};

/// Override for [`EdgeOptions`].
pub type EdgeOption = Override<EdgeOptions>;

/// Default edge color.
pub const DEFAULT_EDGE_COLOR: &str = "#7B8894";

/// Visual settings of an edge.
///
/// | Field | Default |
/// |---|---|
/// | `label` / `style` | empty |
/// | `color` | `#7B8894` |
/// | `font` | `Sans-Serif`, 13, no color |
///
/// An empty font color leaves `fontcolor` off the edge statement.
/// | `forward` / `reverse` | `false` / `false` (drawn as forward) |
#[derive(Debug, Clone, PartialEq)]
pub struct EdgeOptions {
    pub label: String,
    pub color: String,
    pub style: String,
    pub font: Font,
    pub forward: bool,
    pub reverse: bool,
    pub attributes: Attributes,
}

impl Default for EdgeOptions {
    fn default() -> Self {
        Self {
            label: String::new(),
            color: DEFAULT_EDGE_COLOR.to_string(),
            style: String::new(),
            font: Font::new(DEFAULT_FONT_NAME, 13.0, ""),
            forward: false,
            reverse: false,
            attributes: Attributes::new(),
        }
    }
}

impl Resolve for EdgeOptions {}

impl EdgeOptions {
    /// Graphviz `dir` value for the direction flags.
    ///
    /// Neither flag set is drawn as a forward edge.
    pub fn direction(&self) -> &'static str {
        match (self.forward, self.reverse) {
            (true, true) => "both",
            (false, true) => "back",
            (true, false) | (false, false) => "forward",
        }
    }

    /// Attributes of the edge statement, extras last.
    pub fn to_attributes(&self) -> Attributes {
        let mut attrs = Attributes::new()
            .with("label", &self.label)
            .with("color", &self.color)
            .with("style", &self.style)
            .with("fontcolor", &self.font.color)
            .with("fontname", &self.font.name)
            .with("fontsize", format_number(self.font.size))
            .with("dir", self.direction());
        attrs.extend(self.attributes.iter());
        attrs
    }
}

pub fn label(label: impl Into<String>) -> EdgeOption {
    let label = label.into();
    Box::new(move |o| o.label = label)
}

pub fn color(color: impl Into<String>) -> EdgeOption {
    let color = color.into();
    Box::new(move |o| o.color = color)
}

/// Line style, e.g. `dashed`, `dotted`, `bold`.
pub fn style(style: impl Into<String>) -> EdgeOption {
    let style = style.into();
    Box::new(move |o| o.style = style)
}

pub fn font_color(color: impl Into<String>) -> EdgeOption {
    let color = color.into();
    Box::new(move |o| o.font.color = color)
}

pub fn font_name(name: impl Into<String>) -> EdgeOption {
    let name = name.into();
    Box::new(move |o| o.font.name = name)
}

pub fn font_size(size: f64) -> EdgeOption {
    Box::new(move |o| o.font.size = size)
}

pub fn forward() -> EdgeOption {
    Box::new(|o| o.forward = true)
}

pub fn reverse() -> EdgeOption {
    Box::new(|o| o.reverse = true)
}

pub fn bidirectional() -> EdgeOption {
    Box::new(|o| {
        o.forward = true;
        o.reverse = true;
    })
}

/// Sets an extra edge attribute, e.g. `constraint` or `penwidth`.
pub fn attribute(key: impl Into<String>, value: impl Into<String>) -> EdgeOption {
    let (key, value) = (key.into(), value.into());
    Box::new(move |o| {
        o.attributes.set(key, value);
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_color() {
        assert_eq!(EdgeOptions::default().color, "#7B8894");
        assert_eq!(EdgeOptions::resolve([color("#000000")]).color, "#000000");
    }

    #[test]
    fn test_single_field_overrides() {
        assert_eq!(EdgeOptions::resolve([label("10Gbps")]).label, "10Gbps");
        assert_eq!(EdgeOptions::resolve([style("dashed")]).style, "dashed");
        assert_eq!(
            EdgeOptions::resolve([font_color("#00FF00")]).font.color,
            "#00FF00"
        );
    }

    #[test]
    fn test_combined_overrides() {
        let options = EdgeOptions::resolve([
            label("PoE"),
            color("#333333"),
            style("dotted"),
            forward(),
        ]);
        assert_eq!(options.label, "PoE");
        assert_eq!(options.color, "#333333");
        assert_eq!(options.style, "dotted");
        assert!(options.forward);
        assert!(!options.reverse);
    }

    #[test]
    fn test_direction_flags() {
        let cases = [
            (forward(), true, false, "forward"),
            (reverse(), false, true, "back"),
            (bidirectional(), true, true, "both"),
        ];
        for (option, fwd, rev, dir) in cases {
            let options = EdgeOptions::resolve([option]);
            assert_eq!(options.forward, fwd);
            assert_eq!(options.reverse, rev);
            assert_eq!(options.direction(), dir);
        }
    }

    #[test]
    fn test_no_direction_defaults_to_forward() {
        assert_eq!(EdgeOptions::default().direction(), "forward");
    }

    #[test]
    fn test_multiple_attributes() {
        let options = EdgeOptions::resolve([
            attribute("constraint", "false"),
            attribute("weight", "2"),
            attribute("penwidth", "3.0"),
        ]);
        assert_eq!(options.attributes.get("constraint"), Some("false"));
        assert_eq!(options.attributes.get("weight"), Some("2"));
        assert_eq!(options.attributes.get("penwidth"), Some("3.0"));
    }

    #[test]
    fn test_to_attributes_with_extras() {
        let attrs = EdgeOptions::resolve([reverse(), attribute("color", "red")]).to_attributes();
        assert_eq!(attrs.get("dir"), Some("back"));
        assert_eq!(attrs.get("color"), Some("red"));
        assert_eq!(attrs.get("fontsize"), Some("13"));
    }

    #[test]
    fn test_font_color_unset_by_default() {
        assert!(EdgeOptions::default().font.color.is_empty());
        let attrs = EdgeOptions::default().to_attributes().trimmed();
        assert_eq!(attrs.get("fontcolor"), None);
    }
}
