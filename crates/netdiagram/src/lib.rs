//! netdiagram - declarative network diagrams rendered with Graphviz.
//!
//! Build [`Node`]s, connect them with edges, nest them in [`Group`]s and
//! render the [`Diagram`] to a DOT description and, optionally, an image
//! produced by an external renderer.
//!
//! # Examples
//!
//! ```rust,no_run
//! use netdiagram::{
//!     Diagram,
//!     catalog::generic::{compute, network},
//!     options::{diagram, edge, group, node},
//! };
//!
//! let mut diagram = Diagram::new([
//!     diagram::label("Branch office"),
//!     diagram::file_name("branch"),
//!     diagram::format("png"),
//! ]);
//!
//! let fw = network::firewall([node::id("fw")]);
//! let sw = network::switch([node::id("sw")]);
//! diagram.connect(&fw, &sw, [edge::label("trunk")]);
//!
//! diagram
//!     .new_group("servers", [group::label("Server room")])
//!     .add([compute::rack([node::id("rack1")])]);
//! diagram.connect_by_id("sw", "rack1", [edge::bidirectional()]);
//!
//! diagram.render().expect("Failed to render diagram");
//! ```

pub mod assets;
pub mod catalog;
pub mod config;
pub mod diagram;
pub mod edge;
pub mod export;
pub mod group;
pub mod node;
pub mod options;

mod error;
mod render;

pub use netdiagram_core::{attributes, dot, identifier};

pub use diagram::Diagram;
pub use edge::Edge;
pub use error::{DiagramError, RendererFailure};
pub use export::{Graphviz, ImageRenderer, OutputFormat, RenderRequest};
pub use group::Group;
pub use node::Node;
pub use render::{ICON_DIR, icon_reference};
