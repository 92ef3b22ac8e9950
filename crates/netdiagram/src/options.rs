//! Option resolvers for diagrams, nodes, edges and groups.
//!
//! Every option category is a plain struct with documented defaults. Callers
//! customise it with an ordered list of overrides, each a function that
//! mutates the struct. Overrides are applied in order, so the last one wins
//! when two touch the same field.
//!
//! Values are never validated here. A bad color or direction is passed to
//! the renderer as written.
//!
//! # Example
//!
//! ```
//! use netdiagram::options::{EdgeOptions, Resolve, edge};
//!
//! let options = EdgeOptions::resolve([
//!     edge::color("#FF0000"),
//!     edge::label("10Gbps"),
//!     edge::color("#000000"),
//! ]);
//! assert_eq!(options.color, "#000000");
//! assert_eq!(options.label, "10Gbps");
//! ```

pub mod diagram;
pub mod edge;
pub mod group;
pub mod node;

pub use diagram::{DiagramOption, DiagramOptions};
pub use edge::{EdgeOption, EdgeOptions};
pub use group::{GroupOption, GroupOptions};
pub use node::{NodeOption, NodeOptions};

/// A single override applied on top of the defaults of `T`.
pub type Override<T> = Box<dyn FnOnce(&mut T)>;

/// Resolution of overrides onto a default-initialised options value.
pub trait Resolve: Default {
    /// Returns the defaults with `overrides` applied in order.
    fn resolve<I>(overrides: I) -> Self
    where
        I: IntoIterator<Item = Override<Self>>,
    {
        let mut options = Self::default();
        options.apply(overrides);
        options
    }

    /// Applies `overrides` in order on top of the current values.
    fn apply<I>(&mut self, overrides: I)
    where
        I: IntoIterator<Item = Override<Self>>,
    {
        for apply in overrides {
            apply(self);
        }
    }
}

/// Font settings shared by every element kind.
#[derive(Debug, Clone, PartialEq)]
pub struct Font {
    pub name: String,
    pub size: f64,
    pub color: String,
}

impl Font {
    pub fn new(name: impl Into<String>, size: f64, color: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            size,
            color: color.into(),
        }
    }
}

/// Default font family for every element.
pub const DEFAULT_FONT_NAME: &str = "Sans-Serif";

/// Default font color for every element.
pub const DEFAULT_FONT_COLOR: &str = "#2D3436";

/// Formats a size for an attribute value: at most two decimals, no trailing zeros.
pub(crate) fn format_number(value: f64) -> String {
    let formatted = format!("{value:.2}");
    formatted
        .trim_end_matches('0')
        .trim_end_matches('.')
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(13.0), "13");
        assert_eq!(format_number(1.4), "1.4");
        assert_eq!(format_number(1.9 + 0.4), "2.3");
        assert_eq!(format_number(0.75), "0.75");
        assert_eq!(format_number(10.0), "10");
    }

    #[test]
    fn test_resolve_applies_in_order() {
        let options = EdgeOptions::resolve([edge::style("dashed"), edge::style("dotted")]);
        assert_eq!(options.style, "dotted");
    }

    #[test]
    fn test_resolve_without_overrides_is_default() {
        assert_eq!(NodeOptions::resolve([]), NodeOptions::default());
    }

    #[test]
    fn test_apply_on_existing_values() {
        let mut options = EdgeOptions::resolve([edge::label("a")]);
        options.apply([edge::color("#111111")]);
        assert_eq!(options.label, "a");
        assert_eq!(options.color, "#111111");
    }
}
