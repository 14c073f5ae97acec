// SPDX-License-Identifier: MPL-2.0
//! Collapsible JSON inspector.
//!
//! [`render`] turns a JSON value into a tree of [`JsonNode`]s. Arrays and
//! objects get a random [`NodeId`] so the host can address them when the user
//! clicks a header, and [`JsonTree::toggle`] flips exactly one of them.
//!
//! Whether a container starts collapsed is decided once, when it is rendered:
//! it collapses at depth `collapse_depth + 1`, or at any depth when its key is
//! listed in `collapse_keys`.

use crate::i18n::fluent::I18n;
use serde::Serialize;
use serde_json::Value;
use uuid::Uuid;

/// Keys of a workflow document that are large and rarely interesting.
pub const WORKFLOW_COLLAPSE_KEYS: [&str; 4] = ["nodes", "links", "groups", "definitions"];

/// Identifier of a collapsible node. Never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct NodeId(Uuid);

impl NodeId {
    fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderOptions {
    pub collapse_depth: usize,
    pub collapse_keys: Vec<String>,
}

impl RenderOptions {
    /// Preset of the workflow tab.
    pub fn workflow() -> Self {
        Self {
            collapse_depth: 2,
            collapse_keys: WORKFLOW_COLLAPSE_KEYS.iter().map(|k| k.to_string()).collect(),
        }
    }

    /// Preset of the API tab: every root-level entry starts collapsed.
    pub fn api() -> Self {
        Self {
            collapse_depth: 0,
            collapse_keys: Vec::new(),
        }
    }

    fn collapses(&self, depth: usize, key: Option<&str>) -> bool {
        depth == self.collapse_depth + 1
            || key.is_some_and(|key| self.collapse_keys.iter().any(|k| k == key))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ContainerKind {
    Array,
    Object,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum JsonNode {
    /// A missing value, as opposed to an explicit `null`.
    Absent {
        key: Option<String>,
    },
    Null {
        key: Option<String>,
    },
    Bool {
        key: Option<String>,
        value: bool,
    },
    Number {
        key: Option<String>,
        text: String,
        /// Text put on the clipboard by the copy affordance.
        copy_text: String,
    },
    String {
        key: Option<String>,
        value: String,
        copy_text: String,
    },
    Container {
        key: Option<String>,
        id: NodeId,
        container: ContainerKind,
        len: usize,
        collapsed: bool,
        /// Shown in place of the children while collapsed.
        preview: String,
        children: Vec<JsonNode>,
    },
}

impl JsonNode {
    pub fn key(&self) -> Option<&str> {
        match self {
            JsonNode::Absent { key }
            | JsonNode::Null { key }
            | JsonNode::Bool { key, .. }
            | JsonNode::Number { key, .. }
            | JsonNode::String { key, .. }
            | JsonNode::Container { key, .. } => key.as_deref(),
        }
    }

    pub fn is_collapsed(&self) -> bool {
        matches!(self, JsonNode::Container { collapsed: true, .. })
    }

    /// Flips the container `id` in this subtree. Returns whether it was found.
    fn toggle(&mut self, target: NodeId) -> bool {
        let JsonNode::Container {
            id,
            collapsed,
            children,
            ..
        } = self
        else {
            return false;
        };
        if *id == target {
            *collapsed = !*collapsed;
            return true;
        }
        children.iter_mut().any(|child| child.toggle(target))
    }

    fn find(&self, target: NodeId) -> Option<&JsonNode> {
        match self {
            JsonNode::Container { id, .. } if *id == target => Some(self),
            JsonNode::Container { children, .. } => {
                children.iter().find_map(|child| child.find(target))
            }
            _ => None,
        }
    }

    /// Id of the first container in this subtree with the given key.
    pub fn find_key(&self, wanted: &str) -> Option<NodeId> {
        match self {
            JsonNode::Container { id, key, .. } if key.as_deref() == Some(wanted) => Some(*id),
            JsonNode::Container { children, .. } => {
                children.iter().find_map(|child| child.find_key(wanted))
            }
            _ => None,
        }
    }
}

/// Renders one value at `depth`.
pub fn render(
    value: Option<&Value>,
    depth: usize,
    options: &RenderOptions,
    key: Option<&str>,
    i18n: &I18n,
) -> JsonNode {
    let owned_key = key.map(str::to_string);
    let Some(value) = value else {
        return JsonNode::Absent { key: owned_key };
    };

    match value {
        Value::Null => JsonNode::Null { key: owned_key },
        Value::Bool(value) => JsonNode::Bool {
            key: owned_key,
            value: *value,
        },
        Value::Number(number) => JsonNode::Number {
            key: owned_key,
            text: number.to_string(),
            copy_text: number.to_string(),
        },
        Value::String(text) => JsonNode::String {
            key: owned_key,
            value: text.clone(),
            copy_text: text.clone(),
        },
        Value::Array(items) => JsonNode::Container {
            key: owned_key,
            id: NodeId::new(),
            container: ContainerKind::Array,
            len: items.len(),
            collapsed: options.collapses(depth, key),
            preview: i18n.tr_count("json-items", items.len()),
            children: items
                .iter()
                .map(|item| render(Some(item), depth + 1, options, None, i18n))
                .collect(),
        },
        Value::Object(entries) => JsonNode::Container {
            key: owned_key,
            id: NodeId::new(),
            container: ContainerKind::Object,
            len: entries.len(),
            collapsed: options.collapses(depth, key),
            preview: i18n.tr_count("json-keys", entries.len()),
            children: entries
                .iter()
                .map(|(k, v)| render(Some(v), depth + 1, options, Some(k), i18n))
                .collect(),
        },
    }
}

/// A rendered document whose containers can be toggled.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JsonTree {
    root: JsonNode,
}

impl JsonTree {
    pub fn new(value: Option<&Value>, options: &RenderOptions, i18n: &I18n) -> Self {
        Self {
            root: render(value, 0, options, None, i18n),
        }
    }

    pub fn root(&self) -> &JsonNode {
        &self.root
    }

    /// Flips the collapsed state of `id` only. Unknown ids are ignored.
    pub fn toggle(&mut self, id: NodeId) -> bool {
        self.root.toggle(id)
    }

    pub fn node(&self, id: NodeId) -> Option<&JsonNode> {
        self.root.find(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use serde_json::json;

    fn i18n() -> I18n {
        I18n::new(Some("en-US".to_string()), &Config::default())
    }

    fn options(depth: usize, keys: &[&str]) -> RenderOptions {
        RenderOptions {
            collapse_depth: depth,
            collapse_keys: keys.iter().map(|k| k.to_string()).collect(),
        }
    }

    fn children(node: &JsonNode) -> &[JsonNode] {
        match node {
            JsonNode::Container { children, .. } => children,
            other => panic!("not a container: {other:?}"),
        }
    }

    #[test]
    fn collapse_key_starts_collapsed_and_toggles() {
        let value = json!({"nodes": [1, 2, 3]});
        let mut tree = JsonTree::new(Some(&value), &options(5, &["nodes"]), &i18n());

        let nodes_id = tree.root().find_key("nodes").expect("nodes container");
        let nodes = tree.node(nodes_id).expect("node");
        assert!(nodes.is_collapsed());
        match nodes {
            JsonNode::Container { preview, len, .. } => {
                assert_eq!(preview, "3 items...");
                assert_eq!(*len, 3);
            }
            _ => unreachable!(),
        }

        assert!(tree.toggle(nodes_id));
        let nodes = tree.node(nodes_id).expect("node");
        assert!(!nodes.is_collapsed());
        assert_eq!(children(nodes).len(), 3);
    }

    #[test]
    fn depth_cutoff_collapses_one_level() {
        let value = json!({"a": {"b": {"c": 1}}});
        let tree = JsonTree::new(Some(&value), &options(1, &[]), &i18n());

        let root = tree.root();
        assert!(!root.is_collapsed());
        let a = &children(root)[0];
        assert!(!a.is_collapsed());
        let b = &children(a)[0];
        assert!(b.is_collapsed());
    }

    #[test]
    fn api_preset_collapses_root_entries() {
        let value = json!({"3": {"inputs": {}}, "4": {"inputs": {}}});
        let tree = JsonTree::new(Some(&value), &RenderOptions::api(), &i18n());
        assert!(!tree.root().is_collapsed());
        assert!(children(tree.root()).iter().all(JsonNode::is_collapsed));
    }

    #[test]
    fn workflow_preset_collapses_listed_keys_at_any_depth() {
        let value = json!({"extra": {"groups": []}, "links": [[1, 2]]});
        let tree = JsonTree::new(Some(&value), &RenderOptions::workflow(), &i18n());
        let links = tree.root().find_key("links").expect("links");
        let groups = tree.root().find_key("groups").expect("groups");
        assert!(tree.node(links).expect("links").is_collapsed());
        assert!(tree.node(groups).expect("groups").is_collapsed());
        let extra = tree.root().find_key("extra").expect("extra");
        assert!(!tree.node(extra).expect("extra").is_collapsed());
    }

    #[test]
    fn toggle_does_not_touch_ancestors_or_descendants() {
        let value = json!({"outer": {"inner": [1]}});
        let mut tree = JsonTree::new(Some(&value), &options(10, &[]), &i18n());
        let outer = tree.root().find_key("outer").expect("outer");
        let inner = tree.root().find_key("inner").expect("inner");

        tree.toggle(outer);
        assert!(tree.node(outer).expect("outer").is_collapsed());
        assert!(!tree.node(inner).expect("inner").is_collapsed());
        assert!(!tree.root().is_collapsed());
    }

    #[test]
    fn leaves_are_typed_and_copyable() {
        let value = json!({"n": 1.5, "s": "hi", "b": true, "z": null});
        let tree = JsonTree::new(Some(&value), &RenderOptions::default(), &i18n());
        let kids = children(tree.root());
        assert_eq!(
            kids[0],
            JsonNode::Number {
                key: Some("n".into()),
                text: "1.5".into(),
                copy_text: "1.5".into()
            }
        );
        assert!(matches!(&kids[1], JsonNode::String { copy_text, .. } if copy_text == "hi"));
        assert!(matches!(kids[2], JsonNode::Bool { value: true, .. }));
        assert!(matches!(kids[3], JsonNode::Null { .. }));
    }

    #[test]
    fn absent_value_renders_tag() {
        let tree = JsonTree::new(None, &RenderOptions::default(), &i18n());
        assert_eq!(tree.root(), &JsonNode::Absent { key: None });
    }

    #[test]
    fn ids_are_unique_across_renders() {
        let value = json!({"a": [], "b": {}});
        let first = JsonTree::new(Some(&value), &RenderOptions::default(), &i18n());
        let second = JsonTree::new(Some(&value), &RenderOptions::default(), &i18n());
        let a1 = first.root().find_key("a").expect("a");
        let a2 = second.root().find_key("a").expect("a");
        assert_ne!(a1, a2);
        assert!(second.node(a1).is_none());
    }

    #[test]
    fn object_preview_counts_keys() {
        let value = json!({"x": 1, "y": 2});
        let tree = JsonTree::new(Some(&value), &RenderOptions::default(), &i18n());
        match tree.root() {
            JsonNode::Container { preview, container, .. } => {
                assert_eq!(preview, "2 keys...");
                assert_eq!(*container, ContainerKind::Object);
            }
            other => panic!("unexpected {other:?}"),
        }
    }
}
