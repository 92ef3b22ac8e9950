//! Ready-made node constructors, grouped by provider and category.
//!
//! Every constructor builds a [`Node`] whose icon is bundled with the
//! library, e.g. [`generic::network::router`].
//!
//! ```
//! use netdiagram::{catalog::{self, generic::network}, options::node};
//!
//! let fw = network::firewall([node::label("Edge")]);
//! assert_eq!(fw.icon(), Some("generic/network/firewall.png"));
//!
//! let sw = catalog::find("generic.network.switch", []).unwrap();
//! assert_eq!(sw.label(), "Switch");
//! ```

use crate::{node::Node, options::NodeOption};

macro_rules! node_constructors {
    ($provider:literal, $category:literal: $($name:ident),+ $(,)?) => {
        /// Node kinds of this category.
        pub const KINDS: &[&str] = &[$(stringify!($name)),+];

        $(
            #[doc = concat!("A `", $provider, ".", $category, ".", stringify!($name), "` node.")]
            pub fn $name<I>(overrides: I) -> $crate::node::Node
            where
                I: IntoIterator<Item = $crate::options::NodeOption>,
            {
                $crate::node::Node::new($provider, $category, stringify!($name), overrides)
            }
        )+
    };
}

/// Vendor-neutral infrastructure.
pub mod generic {
    pub mod compute {
        node_constructors!("generic", "compute": rack);
    }

    pub mod database {
        node_constructors!("generic", "database": sql);
    }

    pub mod device {
        node_constructors!("generic", "device": mobile, tablet);
    }

    pub mod network {
        node_constructors!("generic", "network": firewall, router, subnet, switch, vpn);
    }

    pub mod storage {
        node_constructors!("generic", "storage": storage);
    }
}

/// `(provider, category, kinds)` for every catalog category.
const CATEGORIES: &[(&str, &str, &[&str])] = &[
    ("generic", "compute", generic::compute::KINDS),
    ("generic", "database", generic::database::KINDS),
    ("generic", "device", generic::device::KINDS),
    ("generic", "network", generic::network::KINDS),
    ("generic", "storage", generic::storage::KINDS),
];

/// Every known kind as `provider.category.name`.
pub fn kinds() -> impl Iterator<Item = String> {
    CATEGORIES.iter().flat_map(|(provider, category, names)| {
        names
            .iter()
            .map(move |name| format!("{provider}.{category}.{name}"))
    })
}

/// Builds a catalog node, or `None` if the kind is unknown.
pub fn lookup<I>(provider: &str, category: &str, name: &str, overrides: I) -> Option<Node>
where
    I: IntoIterator<Item = NodeOption>,
{
    let known = CATEGORIES.iter().any(|(p, c, names)| {
        *p == provider && *c == category && names.contains(&name)
    });
    known.then(|| Node::new(provider, category, name, overrides))
}

/// Builds a catalog node from a dotted kind such as `generic.network.router`.
pub fn find<I>(kind: &str, overrides: I) -> Option<Node>
where
    I: IntoIterator<Item = NodeOption>,
{
    let mut parts = kind.split('.');
    match (parts.next(), parts.next(), parts.next(), parts.next()) {
        (Some(provider), Some(category), Some(name), None) => {
            lookup(provider, category, name, overrides)
        }
        _ => None,
    }
}
