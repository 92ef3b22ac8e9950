//! TOML diagram manifests.
//!
//! A manifest describes a diagram declaratively:
//!
//! ```toml
//! [diagram]
//! label = "Office"
//! direction = "TB"
//!
//! [[groups]]
//! id = "dmz"
//! label = "DMZ"
//!
//! [[nodes]]
//! id = "fw"
//! kind = "generic.network.firewall"
//! group = "dmz"
//!
//! [[nodes]]
//! id = "sw"
//! kind = "generic.network.switch"
//!
//! [[edges]]
//! from = "fw"
//! to = "sw"
//! label = "trunk"
//! direction = "both"
//! ```
//!
//! Groups may name a `parent` group; nodes may name the `group` they live in.
//! Everything else lands at the top level of the diagram.

use std::{
    collections::{BTreeMap, HashSet},
    ops::Range,
};

use log::{debug, trace};
use serde::Deserialize;
use thiserror::Error;

use netdiagram::{
    Diagram, catalog,
    options::{DiagramOption, EdgeOption, GroupOption, NodeOption, diagram, edge, group, node},
};

/// Errors found while reading or applying a manifest.
#[derive(Debug, Error)]
pub enum ManifestError {
    #[error("invalid manifest: {message}")]
    Parse {
        message: String,
        span: Option<Range<usize>>,
    },

    #[error("node `{node}` has unknown kind `{kind}`")]
    UnknownKind { node: String, kind: String },

    #[error("node `{0}` is declared more than once")]
    DuplicateNode(String),

    #[error("group `{0}` is declared more than once")]
    DuplicateGroup(String),

    #[error("node `{node}` refers to unknown group `{group}`")]
    UnknownGroup { node: String, group: String },

    #[error("group `{group}` refers to unknown parent `{parent}`")]
    UnknownParent { group: String, parent: String },

    #[error("group `{0}` is part of a parent cycle")]
    GroupCycle(String),

    #[error("edge `{from}` -> `{to}` refers to unknown node `{id}`")]
    UnknownNode { id: String, from: String, to: String },
}

impl ManifestError {
    /// Byte range of the offending text, when known.
    pub fn span(&self) -> Option<Range<usize>> {
        match self {
            Self::Parse { span, .. } => span.clone(),
            _ => None,
        }
    }
}

/// Arrowheads drawn on an edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Forward,
    Reverse,
    Both,
}

/// The `[diagram]` section.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DiagramSection {
    pub label: Option<String>,
    pub file_name: Option<String>,
    pub format: Option<String>,
    pub direction: Option<String>,
    pub curve_style: Option<String>,
    #[serde(default)]
    pub attributes: BTreeMap<String, String>,
}

/// A `[[groups]]` entry.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GroupEntry {
    pub id: String,
    pub label: Option<String>,
    pub parent: Option<String>,
    pub background: Option<String>,
    #[serde(default)]
    pub attributes: BTreeMap<String, String>,
}

/// A `[[nodes]]` entry.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NodeEntry {
    pub id: String,
    /// Catalog kind, `provider.category.name`.
    pub kind: String,
    pub label: Option<String>,
    pub group: Option<String>,
    #[serde(default)]
    pub attributes: BTreeMap<String, String>,
}

/// An `[[edges]]` entry.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EdgeEntry {
    pub from: String,
    pub to: String,
    pub label: Option<String>,
    pub color: Option<String>,
    pub style: Option<String>,
    pub font_color: Option<String>,
    pub direction: Option<Direction>,
    #[serde(default)]
    pub attributes: BTreeMap<String, String>,
}

/// A parsed manifest.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Manifest {
    #[serde(default)]
    pub diagram: DiagramSection,
    #[serde(default)]
    pub groups: Vec<GroupEntry>,
    #[serde(default)]
    pub nodes: Vec<NodeEntry>,
    #[serde(default)]
    pub edges: Vec<EdgeEntry>,
}

impl Manifest {
    /// Parses manifest text.
    pub fn parse(source: &str) -> Result<Self, ManifestError> {
        let manifest: Manifest =
            toml::from_str(source).map_err(|err: toml::de::Error| ManifestError::Parse {
                message: err.message().to_string(),
                span: err.span(),
            })?;
        debug!(
            groups = manifest.groups.len(),
            nodes = manifest.nodes.len(),
            edges = manifest.edges.len();
            "Manifest parsed"
        );
        Ok(manifest)
    }

    /// Overrides taken from the `[diagram]` section.
    pub fn diagram_overrides(&self) -> Vec<DiagramOption> {
        let section = &self.diagram;
        let mut overrides = Vec::new();
        if let Some(label) = &section.label {
            overrides.push(diagram::label(label.as_str()));
        }
        if let Some(file_name) = &section.file_name {
            overrides.push(diagram::file_name(file_name.as_str()));
        }
        if let Some(format) = &section.format {
            overrides.push(diagram::format(format.as_str()));
        }
        if let Some(direction) = &section.direction {
            overrides.push(diagram::direction(direction.as_str()));
        }
        if let Some(style) = &section.curve_style {
            overrides.push(diagram::curve_style(style.as_str()));
        }
        for (key, value) in &section.attributes {
            overrides.push(diagram::attribute(key.as_str(), value.as_str()));
        }
        overrides
    }

    /// Adds the manifest's groups, nodes and edges to `diagram`.
    ///
    /// # Errors
    ///
    /// Returns [`ManifestError`] for unknown kinds, groups, parents or
    /// nodes, duplicate identifiers, and parent cycles.
    pub fn populate(&self, diagram: &mut Diagram) -> Result<(), ManifestError> {
        self.add_groups(diagram)?;
        self.add_nodes(diagram)?;
        self.add_edges(diagram)
    }

    /// Attaches groups parents first.
    fn add_groups(&self, diagram: &mut Diagram) -> Result<(), ManifestError> {
        let mut declared = HashSet::new();
        for entry in &self.groups {
            if !declared.insert(entry.id.as_str()) {
                return Err(ManifestError::DuplicateGroup(entry.id.clone()));
            }
        }
        for entry in &self.groups {
            let Some(parent) = &entry.parent else {
                continue;
            };
            if !declared.contains(parent.as_str()) {
                return Err(ManifestError::UnknownParent {
                    group: entry.id.clone(),
                    parent: parent.clone(),
                });
            }
        }

        let mut attached: HashSet<&str> = HashSet::new();
        let mut pending: Vec<&GroupEntry> = self.groups.iter().collect();
        while !pending.is_empty() {
            let (ready, blocked): (Vec<_>, Vec<_>) = pending.into_iter().partition(|entry| {
                entry
                    .parent
                    .as_deref()
                    .is_none_or(|parent| attached.contains(parent))
            });
            if ready.is_empty() {
                let id = blocked.first().map(|entry| entry.id.clone()).unwrap_or_default();
                return Err(ManifestError::GroupCycle(id));
            }

            for entry in ready {
                let overrides = group_overrides(entry);
                match entry.parent.as_deref() {
                    Some(parent) => {
                        let parent = diagram.find_group_mut(parent).ok_or_else(|| {
                            ManifestError::UnknownParent {
                                group: entry.id.clone(),
                                parent: parent.to_string(),
                            }
                        })?;
                        parent.new_group(entry.id.as_str(), overrides);
                    }
                    None => {
                        diagram.new_group(entry.id.as_str(), overrides);
                    }
                }
                trace!(id = entry.id.as_str(), parent:? = entry.parent; "Group attached");
                attached.insert(entry.id.as_str());
            }
            pending = blocked;
        }
        Ok(())
    }

    fn add_nodes(&self, diagram: &mut Diagram) -> Result<(), ManifestError> {
        let mut seen = HashSet::new();
        for entry in &self.nodes {
            if !seen.insert(entry.id.as_str()) {
                return Err(ManifestError::DuplicateNode(entry.id.clone()));
            }

            let node = catalog::find(&entry.kind, node_overrides(entry)).ok_or_else(|| {
                ManifestError::UnknownKind {
                    node: entry.id.clone(),
                    kind: entry.kind.clone(),
                }
            })?;

            match &entry.group {
                Some(id) => {
                    let group = diagram.find_group_mut(id).ok_or_else(|| {
                        ManifestError::UnknownGroup {
                            node: entry.id.clone(),
                            group: id.clone(),
                        }
                    })?;
                    group.add([node]);
                }
                None => {
                    diagram.add([node]);
                }
            }
        }
        Ok(())
    }

    fn add_edges(&self, diagram: &mut Diagram) -> Result<(), ManifestError> {
        let declared: HashSet<&str> = self.nodes.iter().map(|entry| entry.id.as_str()).collect();
        for entry in &self.edges {
            for id in [&entry.from, &entry.to] {
                if !declared.contains(id.as_str()) {
                    return Err(ManifestError::UnknownNode {
                        id: id.clone(),
                        from: entry.from.clone(),
                        to: entry.to.clone(),
                    });
                }
            }
            diagram.connect_by_id(&entry.from, &entry.to, edge_overrides(entry));
        }
        Ok(())
    }
}

fn group_overrides(entry: &GroupEntry) -> Vec<GroupOption> {
    let mut overrides = Vec::new();
    if let Some(label) = &entry.label {
        overrides.push(group::label(label.as_str()));
    }
    if let Some(background) = &entry.background {
        overrides.push(group::background(background.as_str()));
    }
    for (key, value) in &entry.attributes {
        overrides.push(group::attribute(key.as_str(), value.as_str()));
    }
    overrides
}

fn node_overrides(entry: &NodeEntry) -> Vec<NodeOption> {
    let mut overrides = vec![node::id(entry.id.as_str())];
    if let Some(label) = &entry.label {
        overrides.push(node::label(label.as_str()));
    }
    for (key, value) in &entry.attributes {
        overrides.push(node::attribute(key.as_str(), value.as_str()));
    }
    overrides
}

fn edge_overrides(entry: &EdgeEntry) -> Vec<EdgeOption> {
    let mut overrides = Vec::new();
    if let Some(label) = &entry.label {
        overrides.push(edge::label(label.as_str()));
    }
    if let Some(color) = &entry.color {
        overrides.push(edge::color(color.as_str()));
    }
    if let Some(style) = &entry.style {
        overrides.push(edge::style(style.as_str()));
    }
    if let Some(color) = &entry.font_color {
        overrides.push(edge::font_color(color.as_str()));
    }
    match entry.direction {
        Some(Direction::Forward) => overrides.push(edge::forward()),
        Some(Direction::Reverse) => overrides.push(edge::reverse()),
        Some(Direction::Both) => overrides.push(edge::bidirectional()),
        None => {}
    }
    for (key, value) in &entry.attributes {
        overrides.push(edge::attribute(key.as_str(), value.as_str()));
    }
    overrides
}

#[cfg(test)]
mod tests {
    use super::*;

    fn build(source: &str) -> Result<Diagram, ManifestError> {
        let manifest = Manifest::parse(source)?;
        let mut diagram = Diagram::new(manifest.diagram_overrides());
        manifest.populate(&mut diagram)?;
        Ok(diagram)
    }

    #[test]
    fn test_full_manifest() {
        let diagram = build(
            r#"
            [diagram]
            label = "Office"
            direction = "TB"
            attributes = { bgcolor = "white" }

            [[groups]]
            id = "rack_row"
            parent = "hall"

            [[groups]]
            id = "hall"
            label = "Data hall"

            [[nodes]]
            id = "fw"
            kind = "generic.network.firewall"

            [[nodes]]
            id = "r1"
            kind = "generic.compute.rack"
            group = "rack_row"
            label = "Rack 1"

            [[edges]]
            from = "fw"
            to = "r1"
            label = "uplink"
            direction = "both"
            attributes = { constraint = "false" }
            "#,
        )
        .unwrap();

        assert_eq!(diagram.options().label, "Office");
        assert_eq!(diagram.options().attributes.get("bgcolor"), Some("white"));
        assert_eq!(diagram.find_group("rack_row").unwrap().depth(), 2);
        assert_eq!(diagram.find_group("rack_row").unwrap().parent(), Some("hall"));
        assert_eq!(diagram.find_group("hall").unwrap().label(), "Data hall");
        assert_eq!(diagram.nodes().len(), 2);

        let edge = diagram.edges()[0];
        assert_eq!(edge.options().direction(), "both");
        assert_eq!(edge.options().attributes.get("constraint"), Some("false"));

        let dot = diagram.to_dot().unwrap();
        assert!(dot.contains("fw -> r1"));
    }

    #[test]
    fn test_empty_manifest() {
        let diagram = build("").unwrap();
        assert!(diagram.nodes().is_empty());
    }

    #[test]
    fn test_parse_error_has_span() {
        let err = Manifest::parse("[[nodes]\nid = \"a\"\n").unwrap_err();
        assert!(matches!(err, ManifestError::Parse { .. }));
        assert!(err.span().is_some());

        let err = Manifest::parse("[[nodes]]\nid = \"a\"\nkind = 3\n").unwrap_err();
        assert!(matches!(err, ManifestError::Parse { .. }));
    }

    #[test]
    fn test_unknown_field_rejected() {
        let err = Manifest::parse("[[edges]]\nfrom = \"a\"\nto = \"b\"\ncolour = \"red\"\n")
            .unwrap_err();
        assert!(matches!(err, ManifestError::Parse { .. }));
    }

    #[test]
    fn test_unknown_kind() {
        let err = build("[[nodes]]\nid = \"t\"\nkind = \"generic.kitchen.toaster\"\n").unwrap_err();
        assert!(matches!(err, ManifestError::UnknownKind { ref kind, .. } if kind == "generic.kitchen.toaster"));
    }

    #[test]
    fn test_unknown_group() {
        let err = build(
            "[[nodes]]\nid = \"fw\"\nkind = \"generic.network.firewall\"\ngroup = \"dmz\"\n",
        )
        .unwrap_err();
        assert!(matches!(err, ManifestError::UnknownGroup { ref group, .. } if group == "dmz"));
    }

    #[test]
    fn test_unknown_parent() {
        let err = build("[[groups]]\nid = \"a\"\nparent = \"b\"\n").unwrap_err();
        assert!(matches!(err, ManifestError::UnknownParent { ref parent, .. } if parent == "b"));
    }

    #[test]
    fn test_parent_cycle() {
        let err = build(
            "[[groups]]\nid = \"a\"\nparent = \"b\"\n\n[[groups]]\nid = \"b\"\nparent = \"a\"\n",
        )
        .unwrap_err();
        assert!(matches!(err, ManifestError::GroupCycle(_)));
    }

    #[test]
    fn test_duplicates() {
        let err = build("[[groups]]\nid = \"a\"\n\n[[groups]]\nid = \"a\"\n").unwrap_err();
        assert!(matches!(err, ManifestError::DuplicateGroup(ref id) if id == "a"));

        let err = build(
            "[[nodes]]\nid = \"n\"\nkind = \"generic.device.mobile\"\n\n\
             [[nodes]]\nid = \"n\"\nkind = \"generic.device.tablet\"\n",
        )
        .unwrap_err();
        assert!(matches!(err, ManifestError::DuplicateNode(ref id) if id == "n"));
    }

    #[test]
    fn test_edge_to_unknown_node() {
        let err = build(
            "[[nodes]]\nid = \"fw\"\nkind = \"generic.network.firewall\"\n\n\
             [[edges]]\nfrom = \"fw\"\nto = \"ghost\"\n",
        )
        .unwrap_err();
        assert!(matches!(err, ManifestError::UnknownNode { ref id, .. } if id == "ghost"));
    }
}
