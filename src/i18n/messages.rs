//! Message trees: nested locale string tables with dot-path access.
//!
//! A tree maps string keys to either a leaf string or a nested tree,
//! mirroring the shape of the locale JSON bundles and of the structure
//! built from remote translation records. Keys starting with an
//! underscore are comment/metadata entries and are invisible to lookup
//! and leaf enumeration.

use crate::i18n::Locale;
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// A node in a message tree: a translated string or a nested table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MessageNode {
    /// A leaf translation value.
    Text(String),
    /// A nested group of keys.
    Tree(MessageTree),
}

/// A nested mapping from key segments to localized strings.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MessageTree(BTreeMap<String, MessageNode>);

impl MessageTree {
    /// Create an empty tree.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a tree from a JSON bundle.
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    /// Whether the tree has no entries at all.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Resolve a dot-path key to a node.
    ///
    /// Fails (returns `None`) when any segment is absent, when a
    /// non-terminal segment holds a leaf instead of a nested tree, or
    /// when any segment is a reserved comment key (`_` prefix).
    pub fn get(&self, key: &str) -> Option<&MessageNode> {
        let mut segments = key.split('.');
        let first = segments.next()?;
        let mut node = self.child(first)?;

        for segment in segments {
            match node {
                MessageNode::Tree(tree) => node = tree.child(segment)?,
                MessageNode::Text(_) => return None,
            }
        }
        Some(node)
    }

    /// Resolve a dot-path key to a leaf string.
    pub fn text(&self, key: &str) -> Option<&str> {
        match self.get(key)? {
            MessageNode::Text(value) => Some(value),
            MessageNode::Tree(_) => None,
        }
    }

    /// Insert a leaf value at a dot-path, creating intermediate nodes.
    ///
    /// Existing leaves along the path are replaced by trees, and an
    /// existing subtree at the terminal segment is replaced by the
    /// leaf: last write wins on structural divergence.
    pub fn insert(&mut self, key: &str, value: impl Into<String>) {
        let segments: Vec<&str> = key.split('.').collect();
        let mut tree = self;
        for segment in &segments[..segments.len() - 1] {
            let entry = tree
                .0
                .entry((*segment).to_string())
                .or_insert_with(|| MessageNode::Tree(MessageTree::new()));
            if !matches!(entry, MessageNode::Tree(_)) {
                *entry = MessageNode::Tree(MessageTree::new());
            }
            tree = match entry {
                MessageNode::Tree(inner) => inner,
                MessageNode::Text(_) => unreachable!("entry was just made a tree"),
            };
        }
        let last = segments[segments.len() - 1];
        tree.0
            .insert(last.to_string(), MessageNode::Text(value.into()));
    }

    /// All non-comment leaf key paths, in sorted order.
    pub fn leaf_keys(&self) -> Vec<String> {
        self.leaves().into_iter().map(|(key, _)| key).collect()
    }

    /// All non-comment `(leaf key path, value)` pairs, in sorted order.
    pub fn leaves(&self) -> Vec<(String, &str)> {
        let mut out = Vec::new();
        self.collect_leaves("", &mut out);
        out
    }

    fn child(&self, segment: &str) -> Option<&MessageNode> {
        if segment.starts_with('_') {
            return None;
        }
        self.0.get(segment)
    }

    fn collect_leaves<'a>(&'a self, prefix: &str, out: &mut Vec<(String, &'a str)>) {
        for (key, node) in &self.0 {
            if key.starts_with('_') {
                continue;
            }
            let path = if prefix.is_empty() {
                key.clone()
            } else {
                format!("{}.{}", prefix, key)
            };
            match node {
                MessageNode::Text(value) => out.push((path, value.as_str())),
                MessageNode::Tree(tree) => tree.collect_leaves(&path, out),
            }
        }
    }
}

/// One message tree per recognized locale.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct LocaleMessages {
    /// Arabic (primary) tree.
    pub ar: MessageTree,
    /// English (secondary) tree.
    pub en: MessageTree,
}

impl LocaleMessages {
    /// Create empty trees for both locales.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse both trees from their JSON bundles.
    pub fn from_bundles(ar_json: &str, en_json: &str) -> serde_json::Result<Self> {
        Ok(Self {
            ar: MessageTree::from_json(ar_json)?,
            en: MessageTree::from_json(en_json)?,
        })
    }

    /// Load both bundles from a directory holding `ar.json` and
    /// `en.json`.
    pub fn from_dir(dir: &Path) -> anyhow::Result<Self> {
        let ar_path = dir.join("ar.json");
        let en_path = dir.join("en.json");
        let ar = std::fs::read_to_string(&ar_path)
            .with_context(|| format!("failed to read {}", ar_path.display()))?;
        let en = std::fs::read_to_string(&en_path)
            .with_context(|| format!("failed to read {}", en_path.display()))?;
        Self::from_bundles(&ar, &en).context("failed to parse locale bundles")
    }

    /// The tree for a locale.
    pub fn tree(&self, locale: Locale) -> &MessageTree {
        match locale {
            Locale::Ar => &self.ar,
            Locale::En => &self.en,
        }
    }

    /// Whether both trees are empty (nothing loaded yet).
    pub fn is_empty(&self) -> bool {
        self.ar.is_empty() && self.en.is_empty()
    }
}
