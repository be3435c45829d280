//! Tree nodes and the forest state engine.
//!
//! A [`Forest`] is an ordered sequence of root [`TreeNode`]s. Every
//! transform returns a new forest and leaves its input untouched: only the
//! spine of ancestors leading to the edited position is copied, while every
//! other subtree is shared with the input through [`Arc`].
//!
//! Nodes are addressed by [`Path`](crate::path::Path). Transforms given a
//! path that does not resolve return their input unchanged.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::drag::TreeMove;
use crate::id::{NODE_PREFIX, uid};
use crate::path::{Path, adjust_for_removal, is_descendant_path};

/// Opaque, stable identity of a tree node.
pub type NodeId = String;

/// Shared list of child nodes.
pub type Children = Vec<Arc<TreeNode>>;

fn is_false(value: &bool) -> bool {
    !*value
}

/// A node of the tree.
///
/// `children` distinguishes "not loaded yet" (`None`) from "loaded and
/// empty" (`Some(vec![])`). A node with `has_children` set and no children
/// loaded is *lazy*: its children must be fetched before it is first
/// expanded.
///
/// # Examples
///
/// ```
/// use trellis_protocol::TreeNode;
///
/// let leaf = TreeNode::new("Leaf");
/// assert!(!leaf.is_lazy());
/// assert_eq!(leaf.children.as_deref().map(<[_]>::len), Some(0));
///
/// let lazy = TreeNode::lazy("Remote");
/// assert!(lazy.is_lazy());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TreeNode {
    /// Stable identity, preserved by moves and renames.
    pub id: NodeId,
    /// Display label.
    pub name: String,
    /// Optional display hint, e.g. `#2563eb`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    /// Loaded children, or `None` when they have not been fetched yet.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub children: Option<Children>,
    /// Whether the node declares children that may still need loading.
    #[serde(default)]
    pub has_children: bool,
    /// Set while a child fetch for this node is in flight.
    #[serde(default, skip_serializing_if = "is_false")]
    pub is_loading: bool,
}

impl TreeNode {
    /// Creates a loaded leaf with a freshly minted id.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: uid(NODE_PREFIX),
            name: name.into(),
            color: None,
            children: Some(Vec::new()),
            has_children: false,
            is_loading: false,
        }
    }

    /// Creates a lazy node whose children must be fetched on first expansion.
    #[must_use]
    pub fn lazy(name: impl Into<String>) -> Self {
        Self {
            children: None,
            has_children: true,
            ..Self::new(name)
        }
    }

    /// Replaces the generated id.
    #[must_use]
    pub fn with_id(mut self, id: impl Into<NodeId>) -> Self {
        self.id = id.into();
        self
    }

    /// Sets the display color.
    #[must_use]
    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    /// Sets loaded children; `has_children` follows whether any were given.
    #[must_use]
    pub fn with_children(mut self, children: Vec<TreeNode>) -> Self {
        self.has_children = !children.is_empty();
        self.children = Some(children.into_iter().map(Arc::new).collect());
        self
    }

    /// Returns `true` if the node declares children that are not loaded yet.
    #[must_use]
    pub fn is_lazy(&self) -> bool {
        self.has_children && self.children.is_none()
    }

    /// Returns `true` if the node can be expanded, either because children
    /// are loaded or because it declares some.
    #[must_use]
    pub fn is_expandable(&self) -> bool {
        self.has_children || !self.child_nodes().is_empty()
    }

    /// Returns the loaded children, or an empty slice when none are loaded.
    #[must_use]
    pub fn child_nodes(&self) -> &[Arc<TreeNode>] {
        self.children.as_deref().unwrap_or(&[])
    }

    /// Returns a copy flagged as having a fetch in flight.
    #[must_use]
    pub fn start_loading(&self) -> Self {
        Self {
            is_loading: true,
            ..self.clone()
        }
    }

    /// Returns a copy holding the fetched children.
    ///
    /// `has_children` is recomputed from what was fetched, so a lazy node
    /// whose fetch comes back empty turns into a plain leaf.
    #[must_use]
    pub fn finish_loading(&self, fetched: Vec<TreeNode>) -> Self {
        Self {
            has_children: !fetched.is_empty(),
            children: Some(fetched.into_iter().map(Arc::new).collect()),
            is_loading: false,
            ..self.clone()
        }
    }

    /// Returns a copy with the in-flight flag cleared and children untouched.
    #[must_use]
    pub fn abort_loading(&self) -> Self {
        Self {
            is_loading: false,
            ..self.clone()
        }
    }

    fn count(&self) -> usize {
        1 + self.child_nodes().iter().map(|c| c.count()).sum::<usize>()
    }
}

/// An ordered sequence of root nodes.
///
/// Cloning a forest is cheap: it only bumps the reference counts of the
/// roots.
///
/// # Examples
///
/// ```
/// use trellis_protocol::{Forest, TreeNode};
///
/// let forest = Forest::from_nodes(vec![TreeNode::new("A"), TreeNode::new("B")]);
/// let forest = forest.insert_node_as_child(&[0], "A.1");
///
/// assert_eq!(forest.node_at(&[0, 0]).unwrap().name, "A.1");
/// assert!(forest.node_at(&[0]).unwrap().has_children);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Forest {
    roots: Children,
}

impl Forest {
    /// Creates an empty forest.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a forest from owned root nodes.
    #[must_use]
    pub fn from_nodes(nodes: Vec<TreeNode>) -> Self {
        Self {
            roots: nodes.into_iter().map(Arc::new).collect(),
        }
    }

    /// Returns the root nodes.
    #[must_use]
    pub fn roots(&self) -> &[Arc<TreeNode>] {
        &self.roots
    }

    /// Returns the number of root nodes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.roots.len()
    }

    /// Returns `true` if the forest has no roots.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }

    /// Returns the total number of loaded nodes.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.roots.iter().map(|n| n.count()).sum()
    }

    /// Resolves a path to a node.
    ///
    /// Returns `None` for the empty path, for an index past the end of its
    /// sibling list, and for a step into a node whose children are not
    /// loaded.
    #[must_use]
    pub fn node_at(&self, path: &[usize]) -> Option<&TreeNode> {
        self.shared_node_at(path).map(Arc::as_ref)
    }

    /// Returns the shared handle of the node at `path`.
    #[must_use]
    pub fn shared_node_at(&self, path: &[usize]) -> Option<&Arc<TreeNode>> {
        let (&first, rest) = path.split_first()?;
        let mut node = self.roots.get(first)?;
        for &idx in rest {
            node = node.children.as_ref()?.get(idx)?;
        }
        Some(node)
    }

    /// Finds the current path of the node with the given id.
    #[must_use]
    pub fn path_of(&self, id: &str) -> Option<Path> {
        fn search(nodes: &[Arc<TreeNode>], id: &str, prefix: &mut Path) -> bool {
            for (idx, node) in nodes.iter().enumerate() {
                prefix.push(idx);
                if node.id == id || search(node.child_nodes(), id, prefix) {
                    return true;
                }
                prefix.pop();
            }
            false
        }

        let mut path = Path::new();
        search(&self.roots, id, &mut path).then_some(path)
    }

    /// Returns every loaded node with its path, depth first.
    #[must_use]
    pub fn walk(&self) -> Vec<(Path, &TreeNode)> {
        fn visit<'a>(nodes: &'a [Arc<TreeNode>], prefix: &Path, out: &mut Vec<(Path, &'a TreeNode)>) {
            for (idx, node) in nodes.iter().enumerate() {
                let mut path = prefix.clone();
                path.push(idx);
                out.push((path.clone(), node.as_ref()));
                visit(node.child_nodes(), &path, out);
            }
        }

        let mut out = Vec::new();
        visit(&self.roots, &Path::new(), &mut out);
        out
    }

    /// Replaces the node at `path` with `updater(node)`.
    ///
    /// Only the ancestors of the target are copied. The empty path and
    /// unresolvable paths return an unchanged forest.
    ///
    /// # Examples
    ///
    /// ```
    /// use trellis_protocol::{Forest, TreeNode};
    ///
    /// let forest = Forest::from_nodes(vec![TreeNode::new("old")]);
    /// let renamed = forest.update_node_at(&[0], |n| TreeNode {
    ///     name: "new".into(),
    ///     ..n.clone()
    /// });
    ///
    /// assert_eq!(renamed.node_at(&[0]).unwrap().name, "new");
    /// assert_eq!(forest.node_at(&[0]).unwrap().name, "old");
    /// ```
    #[must_use]
    pub fn update_node_at<F>(&self, path: &[usize], updater: F) -> Self
    where
        F: FnOnce(&TreeNode) -> TreeNode,
    {
        if path.is_empty() {
            return self.clone();
        }
        match update_in(&self.roots, path, updater) {
            Some(roots) => Self { roots },
            None => {
                debug!(?path, "update target not found");
                self.clone()
            }
        }
    }

    /// Splices the node at `path` out of its parent.
    ///
    /// Returns the new forest and the removed node, or an unchanged forest
    /// and `None` if the path does not resolve. Paths of later siblings (and
    /// their descendants) shift down by one afterwards.
    #[must_use]
    pub fn remove_node_at(&self, path: &[usize]) -> (Self, Option<Arc<TreeNode>>) {
        let Some((&idx, parent)) = path.split_last() else {
            return (self.clone(), None);
        };

        let mut removed = None;
        let roots = edit_children(&self.roots, parent, false, |siblings| {
            if idx >= siblings.len() {
                return None;
            }
            removed = Some(siblings.remove(idx));
            Some(())
        });

        match roots {
            Some(roots) => (Self { roots }, removed),
            None => {
                debug!(?path, "remove target not found");
                (self.clone(), None)
            }
        }
    }

    /// Appends a new node named `name` under `parent_path`.
    ///
    /// The new node gets a fresh id and an empty child list. Every node on
    /// the way down to (and including) the parent is marked as having
    /// children. An empty `parent_path` appends a new root.
    #[must_use]
    pub fn insert_node_as_child(&self, parent_path: &[usize], name: impl Into<String>) -> Self {
        self.insert_subtree(parent_path, usize::MAX, TreeNode::new(name))
    }

    /// Inserts an existing subtree under `parent_path` at `index`, clamped to
    /// the length of the destination.
    #[must_use]
    pub fn insert_subtree(
        &self,
        parent_path: &[usize],
        index: usize,
        node: impl Into<Arc<TreeNode>>,
    ) -> Self {
        self.try_insert(parent_path, index, node.into())
            .unwrap_or_else(|| {
                debug!(?parent_path, "insert parent not found");
                self.clone()
            })
    }

    /// Moves the node at `from` under `to_parent` at position `to_index`.
    ///
    /// `from` and `to_parent` are both paths into `self`. The destination
    /// is translated past the removal of the moved node, and `to_index` is a
    /// position in the destination list once the node has left it, clamped
    /// to its length. Moving within one parent therefore behaves like a
    /// sortable-list reorder.
    ///
    /// The moved node keeps its id and its entire subtree. The forest is
    /// returned unchanged when `from` does not resolve, when `to_parent` is
    /// `from` itself or lies inside it, or when `to_parent` does not resolve.
    ///
    /// # Examples
    ///
    /// ```
    /// use trellis_protocol::{Forest, TreeNode};
    ///
    /// let forest = Forest::from_nodes(vec![
    ///     TreeNode::new("a"),
    ///     TreeNode::new("b"),
    ///     TreeNode::new("c"),
    /// ]);
    /// let moved = forest.move_node(&[0], &[], 2);
    /// let names: Vec<_> = moved.roots().iter().map(|n| n.name.as_str()).collect();
    /// assert_eq!(names, ["b", "c", "a"]);
    /// ```
    #[must_use]
    pub fn move_node(&self, from: &[usize], to_parent: &[usize], to_index: usize) -> Self {
        if from.is_empty() {
            return self.clone();
        }
        if to_parent == from || is_descendant_path(from, to_parent) {
            debug!(?from, ?to_parent, "refusing to move a node into its own subtree");
            return self.clone();
        }

        let (without, Some(node)) = self.remove_node_at(from) else {
            return self.clone();
        };

        let destination = adjust_for_removal(from, to_parent);
        match without.try_insert(&destination, to_index, node) {
            Some(forest) => forest,
            None => {
                debug!(?from, ?to_parent, "move destination not found");
                self.clone()
            }
        }
    }

    /// Applies a resolved drag-and-drop move.
    #[must_use]
    pub fn apply_move(&self, mv: &TreeMove) -> Self {
        self.move_node(&mv.from, &mv.to_parent, mv.to_index)
    }

    fn try_insert(&self, parent_path: &[usize], index: usize, node: Arc<TreeNode>) -> Option<Self> {
        let roots = edit_children(&self.roots, parent_path, true, |siblings| {
            let at = index.min(siblings.len());
            siblings.insert(at, node);
            Some(())
        })?;
        Some(Self { roots })
    }
}

impl From<Vec<TreeNode>> for Forest {
    fn from(nodes: Vec<TreeNode>) -> Self {
        Self::from_nodes(nodes)
    }
}

/// Rebuilds the spine down to `path`, replacing the target with
/// `updater(target)`.
fn update_in<F>(nodes: &[Arc<TreeNode>], path: &[usize], updater: F) -> Option<Children>
where
    F: FnOnce(&TreeNode) -> TreeNode,
{
    let (&idx, rest) = path.split_first()?;
    let node = nodes.get(idx)?;
    let replacement = if rest.is_empty() {
        updater(node)
    } else {
        let children = update_in(node.children.as_deref()?, rest, updater)?;
        TreeNode {
            children: Some(children),
            ..TreeNode::clone(node)
        }
    };

    let mut next = nodes.to_vec();
    next[idx] = Arc::new(replacement);
    Some(next)
}

/// Rebuilds the spine down to the node at `parent` and lets `edit` change
/// its child list (or the root list when `parent` is empty).
///
/// A parent without loaded children is edited as if its list were empty.
/// With `mark_spine`, every rebuilt node is flagged as having children.
fn edit_children<F>(
    nodes: &[Arc<TreeNode>],
    parent: &[usize],
    mark_spine: bool,
    edit: F,
) -> Option<Children>
where
    F: FnOnce(&mut Children) -> Option<()>,
{
    let Some((&idx, rest)) = parent.split_first() else {
        let mut next = nodes.to_vec();
        edit(&mut next)?;
        return Some(next);
    };

    let node = nodes.get(idx)?;
    let children = edit_children(node.child_nodes(), rest, mark_spine, edit)?;
    let mut copy = TreeNode::clone(node);
    copy.children = Some(children);
    if mark_spine {
        copy.has_children = true;
    }

    let mut next = nodes.to_vec();
    next[idx] = Arc::new(copy);
    Some(next)
}
