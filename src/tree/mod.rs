//! Arena-backed tree of parsed blocks.
//!
//! Every node lives in a single `Vec` owned by [`Tree`]. Children are held
//! as indices in opening order and the parent link is a plain index, so the
//! tree has exactly one owner and no reference cycles.
//!
//! # Usage
//!
//! ```ignore
//! let tree = kvtree::parse_str(source)?;
//! if let Some(root) = tree.root() {
//!     println!("{} has {} children", root.name(), root.children().count());
//! }
//! ```

mod print;

use std::collections::BTreeMap;

use serde::ser::{Serialize, SerializeStruct, Serializer};

pub use print::{render_json, render_table, write_table, TableOptions, DEFAULT_KEY_WIDTH};

/// Index of a node inside its [`Tree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

#[derive(Debug, Clone, PartialEq, Eq)]
struct NodeData {
    name: String,
    attributes: BTreeMap<String, String>,
    children: Vec<NodeId>,
    parent: Option<NodeId>,
    line: usize,
}

/// A key that was assigned more than once inside the same block.
///
/// The later value wins; the record keeps what was replaced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Overwrite {
    pub node: NodeId,
    pub key: String,
    pub previous: String,
    /// Line of the assignment that replaced `previous`
    pub line: usize,
}

/// A root block dropped because another top-level block opened after it
/// closed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplacedRoot {
    pub name: String,
    /// Line of the dropped root's tag
    pub line: usize,
    /// Line of the tag that took its place
    pub replaced_at: usize,
}

/// A parsed document.
///
/// An empty tree is a valid result: input holding only blank lines parses
/// successfully and has no root.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tree {
    nodes: Vec<NodeData>,
    overwrites: Vec<Overwrite>,
    replaced_roots: Vec<ReplacedRoot>,
}

impl Tree {
    pub fn new() -> Self {
        Self::default()
    }

    /// The root block, or `None` for an empty document.
    pub fn root(&self) -> Option<NodeRef<'_>> {
        self.get(NodeId(0))
    }

    pub fn get(&self, id: NodeId) -> Option<NodeRef<'_>> {
        if id.0 < self.nodes.len() {
            Some(NodeRef { tree: self, id })
        } else {
            None
        }
    }

    /// Total number of blocks in the document.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Duplicate key assignments seen while parsing, in input order.
    pub fn overwrites(&self) -> &[Overwrite] {
        &self.overwrites
    }

    /// Earlier top-level blocks that a later one replaced, in input order.
    pub fn replaced_roots(&self) -> &[ReplacedRoot] {
        &self.replaced_roots
    }

    /// Depth-first, pre-order walk yielding each node with its level
    /// (the root is level 0).
    pub fn walk(&self) -> Walk<'_> {
        let stack = if self.is_empty() {
            Vec::new()
        } else {
            vec![(NodeId(0), 0)]
        };
        Walk { tree: self, stack }
    }

    /// Start a new root. An existing root is dropped with everything under
    /// it, along with its overwrite records.
    pub(crate) fn add_root(&mut self, name: &str, line: usize) -> NodeId {
        if let Some(old) = self.nodes.first() {
            self.replaced_roots.push(ReplacedRoot {
                name: old.name.clone(),
                line: old.line,
                replaced_at: line,
            });
            self.nodes.clear();
            self.overwrites.clear();
        }
        self.push_node(name, None, line)
    }

    pub(crate) fn add_child(&mut self, parent: NodeId, name: &str, line: usize) -> NodeId {
        let id = self.push_node(name, Some(parent), line);
        self.nodes[parent.0].children.push(id);
        id
    }

    pub(crate) fn parent_of(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id.0].parent
    }

    pub(crate) fn insert_attribute(&mut self, id: NodeId, key: &str, value: &str, line: usize) {
        let previous = self.nodes[id.0]
            .attributes
            .insert(key.to_string(), value.to_string());

        if let Some(previous) = previous {
            self.overwrites.push(Overwrite {
                node: id,
                key: key.to_string(),
                previous,
                line,
            });
        }
    }

    fn push_node(&mut self, name: &str, parent: Option<NodeId>, line: usize) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(NodeData {
            name: name.to_string(),
            attributes: BTreeMap::new(),
            children: Vec::new(),
            parent,
            line,
        });
        id
    }
}

/// Borrowed handle to one node of a [`Tree`].
#[derive(Debug, Clone, Copy)]
pub struct NodeRef<'a> {
    tree: &'a Tree,
    id: NodeId,
}

impl<'a> NodeRef<'a> {
    fn data(&self) -> &'a NodeData {
        &self.tree.nodes[self.id.0]
    }

    /// The block's tag.
    pub fn name(&self) -> &'a str {
        &self.data().name
    }

    /// Attributes sorted by key.
    pub fn attributes(&self) -> &'a BTreeMap<String, String> {
        &self.data().attributes
    }

    pub fn attribute(&self, key: &str) -> Option<&'a str> {
        self.data().attributes.get(key).map(String::as_str)
    }

    /// Children in the order they were opened.
    pub fn children(&self) -> impl Iterator<Item = NodeRef<'a>> + 'a {
        let tree = self.tree;
        self.data()
            .children
            .iter()
            .map(move |&id| NodeRef { tree, id })
    }

    /// First child with the given tag.
    pub fn child(&self, name: &str) -> Option<NodeRef<'a>> {
        self.children().find(|c| c.name() == name)
    }

    pub fn parent(&self) -> Option<NodeRef<'a>> {
        self.data().parent.map(|id| NodeRef {
            tree: self.tree,
            id,
        })
    }

    /// Line of the tag that opened this block.
    pub fn line(&self) -> usize {
        self.data().line
    }

    /// Nesting level; the root is 0.
    pub fn depth(&self) -> usize {
        let mut depth = 0;
        let mut current = self.data().parent;
        while let Some(id) = current {
            depth += 1;
            current = self.tree.nodes[id.0].parent;
        }
        depth
    }
}

impl PartialEq for NodeRef<'_> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.tree, other.tree) && self.id == other.id
    }
}

impl Eq for NodeRef<'_> {}

/// Iterator returned by [`Tree::walk`].
pub struct Walk<'a> {
    tree: &'a Tree,
    stack: Vec<(NodeId, usize)>,
}

impl<'a> Iterator for Walk<'a> {
    type Item = (usize, NodeRef<'a>);

    fn next(&mut self) -> Option<Self::Item> {
        let (id, level) = self.stack.pop()?;
        let children = &self.tree.nodes[id.0].children;
        self.stack
            .extend(children.iter().rev().map(|&child| (child, level + 1)));
        Some((level, NodeRef { tree: self.tree, id }))
    }
}

impl Serialize for NodeRef<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("Node", 3)?;
        state.serialize_field("name", self.name())?;
        state.serialize_field("attributes", self.attributes())?;
        state.serialize_field("children", &Children(*self))?;
        state.end()
    }
}

struct Children<'a>(NodeRef<'a>);

impl Serialize for Children<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.0.children())
    }
}

impl Serialize for Tree {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.root().serialize(serializer)
    }
}
