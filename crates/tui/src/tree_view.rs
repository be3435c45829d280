//! Tree view controller.
//!
//! [`TreeView`] holds the view-only state of the tree editor (which nodes
//! are expanded, where the cursor is) and drives the [`Forest`] engine in
//! response to user intents: expanding lazy nodes, adding, renaming and
//! deleting nodes, and dropping a dragged node.
//!
//! Expansion is keyed by path key. When a node is removed or moved, the
//! stored keys are translated so expansion stays attached to the same
//! nodes.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use tracing::{debug, info, warn};
use trellis_protocol::path::{Path, adjust_for_insertion, adjust_for_removal, key_to_path};
use trellis_protocol::{DragEnd, Forest, NodeId, TreeDrop, TreeNode, path_to_key, resolve_tree_drop};

use crate::provider::{ChildProvider, Interaction, ProviderError};

/// Prompt shown when adding a child node.
pub const NEW_NODE_PROMPT: &str = "New node name?";

/// Prompt shown when renaming a node.
pub const EDIT_NODE_PROMPT: &str = "Edit node name:";

/// Builds the confirmation shown before deleting a node.
///
/// # Examples
///
/// ```
/// use trellis_tui::tree_view::delete_confirmation;
///
/// assert_eq!(delete_confirmation("Docs"), "Delete \"Docs\" and its subtree?");
/// ```
#[must_use]
pub fn delete_confirmation(name: &str) -> String {
    format!("Delete \"{name}\" and its subtree?")
}

/// One visible line of the tree, in display order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlatRow {
    /// Path of the node.
    pub path: Path,
    /// Path key of the node, also its drag id.
    pub key: String,
    /// Nesting depth; roots are at depth 0.
    pub depth: usize,
    /// Node id.
    pub id: NodeId,
    /// Display label.
    pub name: String,
    /// Display color, if any.
    pub color: Option<String>,
    /// Whether the node can be expanded.
    pub expandable: bool,
    /// Whether the node is currently expanded.
    pub expanded: bool,
    /// Whether a child fetch is in flight.
    pub loading: bool,
}

impl FlatRow {
    /// Returns the chevron shown in front of the row.
    #[must_use]
    pub fn marker(&self) -> char {
        match (self.expandable, self.expanded) {
            (true, true) => '▾',
            (true, false) => '▸',
            (false, _) => ' ',
        }
    }
}

/// A child fetch the host must run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadRequest {
    /// Path of the lazy node when the fetch started.
    pub path: Path,
    /// Id of the lazy node, checked again when the fetch completes.
    pub node_id: NodeId,
}

/// What happened when a fetch completed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    /// The children were stored; holds how many.
    Loaded(usize),
    /// The fetch failed and the node was reverted to not loading.
    Failed(ProviderError),
    /// The node was deleted or got children some other way; nothing was
    /// stored.
    Stale,
}

/// View state of the tree editor.
///
/// # Examples
///
/// ```
/// use trellis_protocol::{Forest, TreeNode};
/// use trellis_tui::TreeView;
///
/// let mut forest = Forest::from_nodes(vec![
///     TreeNode::new("Root").with_children(vec![TreeNode::new("Child")]),
/// ]);
/// let mut view = TreeView::new();
///
/// assert_eq!(view.rows(&forest).len(), 1);
/// assert!(view.toggle_expand(&mut forest, &[0]).is_none());
/// assert_eq!(view.rows(&forest).len(), 2);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TreeView {
    expanded: BTreeSet<String>,
    cursor: usize,
}

impl TreeView {
    /// Creates a view with everything collapsed and the cursor on the first
    /// row.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the index of the selected row.
    #[must_use]
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Returns `true` if the node at `path` is expanded.
    #[must_use]
    pub fn is_expanded(&self, path: &[usize]) -> bool {
        self.expanded.contains(&path_to_key(path))
    }

    /// Flattens the visible part of the forest in display order.
    ///
    /// Children are listed only under expanded nodes that have them loaded.
    #[must_use]
    pub fn rows(&self, forest: &Forest) -> Vec<FlatRow> {
        let mut rows = Vec::new();
        let mut prefix = Vec::new();
        self.flatten(forest.roots(), &mut prefix, &mut rows);
        rows
    }

    fn flatten(&self, nodes: &[Arc<TreeNode>], prefix: &mut Path, rows: &mut Vec<FlatRow>) {
        for (idx, node) in nodes.iter().enumerate() {
            prefix.push(idx);
            let key = path_to_key(prefix);
            let expanded = self.expanded.contains(&key);
            rows.push(FlatRow {
                path: prefix.clone(),
                key,
                depth: prefix.len() - 1,
                id: node.id.clone(),
                name: node.name.clone(),
                color: node.color.clone(),
                expandable: node.is_expandable(),
                expanded,
                loading: node.is_loading,
            });
            if expanded {
                self.flatten(node.child_nodes(), prefix, rows);
            }
            prefix.pop();
        }
    }

    /// Returns the selected row, if the tree has any.
    #[must_use]
    pub fn selected_row(&self, forest: &Forest) -> Option<FlatRow> {
        self.rows(forest).into_iter().nth(self.cursor)
    }

    /// Returns the path of the selected row.
    #[must_use]
    pub fn selected_path(&self, forest: &Forest) -> Option<Path> {
        self.selected_row(forest).map(|row| row.path)
    }

    /// Moves the cursor by `delta` rows, wrapping at both ends.
    pub fn move_cursor(&mut self, forest: &Forest, delta: isize) {
        let len = self.rows(forest).len();
        if len == 0 {
            self.cursor = 0;
            return;
        }
        let len = len as isize;
        let current = (self.cursor as isize).min(len - 1);
        self.cursor = (current + delta).rem_euclid(len) as usize;
    }

    /// Puts the cursor on the row at `path`. Returns `false` if that node is
    /// not visible.
    pub fn select_path(&mut self, forest: &Forest, path: &[usize]) -> bool {
        match self.rows(forest).iter().position(|row| row.path == path) {
            Some(idx) => {
                self.cursor = idx;
                true
            }
            None => false,
        }
    }

    /// Keeps the cursor on an existing row after the tree shrank.
    pub fn clamp_cursor(&mut self, forest: &Forest) {
        let len = self.rows(forest).len();
        self.cursor = self.cursor.min(len.saturating_sub(1));
    }

    /// Expands or collapses the node at `path`.
    ///
    /// Expanding a lazy node marks it as loading and returns the fetch the
    /// host must run; the children are stored later by
    /// [`complete_load`](Self::complete_load). Nodes without children are
    /// left alone.
    pub fn toggle_expand(&mut self, forest: &mut Forest, path: &[usize]) -> Option<LoadRequest> {
        let Some(node) = forest.node_at(path) else {
            debug!(?path, "toggle target not found");
            return None;
        };
        if !node.is_expandable() {
            return None;
        }

        let key = path_to_key(path);
        if self.expanded.remove(&key) {
            self.clamp_cursor(forest);
            return None;
        }
        self.expanded.insert(key);
        Self::begin_load(forest, path)
    }

    /// Marks the lazy node at `path` as loading and returns the fetch to run.
    ///
    /// Returns `None` for loaded nodes and for nodes whose fetch is already
    /// in flight.
    pub fn begin_load(forest: &mut Forest, path: &[usize]) -> Option<LoadRequest> {
        let node = forest.node_at(path)?;
        if !node.is_lazy() || node.is_loading {
            return None;
        }
        let request = LoadRequest {
            path: path.to_vec(),
            node_id: node.id.clone(),
        };
        *forest = forest.update_node_at(path, TreeNode::start_loading);
        debug!(node_id = %request.node_id, ?path, "child fetch started");
        Some(request)
    }

    /// Stores the result of a fetch started by [`begin_load`](Self::begin_load).
    ///
    /// The node is looked up at the request path first, then by id, since
    /// edits made while the fetch was in flight may have moved it. Only a
    /// node that was deleted makes the completion stale.
    pub fn complete_load(
        forest: &mut Forest,
        request: &LoadRequest,
        result: Result<Vec<TreeNode>, ProviderError>,
    ) -> LoadOutcome {
        let path = match forest.node_at(&request.path) {
            Some(node) if node.id == request.node_id => request.path.clone(),
            _ => match forest.path_of(&request.node_id) {
                Some(path) => {
                    debug!(from = ?request.path, to = ?path, node_id = %request.node_id, "fetched node moved");
                    path
                }
                None => {
                    debug!(path = ?request.path, node_id = %request.node_id, "fetched node is gone");
                    return LoadOutcome::Stale;
                }
            },
        };
        let Some(node) = forest.node_at(&path) else {
            return LoadOutcome::Stale;
        };
        if !node.is_lazy() {
            // Children were added locally while the fetch was in flight.
            *forest = forest.update_node_at(&path, TreeNode::abort_loading);
            return LoadOutcome::Stale;
        }

        match result {
            Ok(children) => {
                let count = children.len();
                *forest = forest.update_node_at(&path, |n| n.finish_loading(children));
                debug!(node_id = %request.node_id, count, "child fetch finished");
                LoadOutcome::Loaded(count)
            }
            Err(err) => {
                warn!(node_id = %request.node_id, error = %err, "child fetch failed");
                *forest = forest.update_node_at(&path, TreeNode::abort_loading);
                LoadOutcome::Failed(err)
            }
        }
    }

    /// Fetches and stores the children of the lazy node at `path` in one go.
    ///
    /// Returns `None` when there was nothing to load.
    pub async fn ensure_children_loaded(
        forest: &mut Forest,
        path: &[usize],
        provider: &dyn ChildProvider,
    ) -> Option<LoadOutcome> {
        let request = Self::begin_load(forest, path)?;
        let result = provider.fetch(&request.node_id).await;
        Some(Self::complete_load(forest, &request, result))
    }

    /// Prompts for a name and appends a new child under `path`.
    ///
    /// An empty `path` adds a new root. The parent is expanded so the new
    /// node is visible. Returns the new node's path, or `None` if the user
    /// cancelled, entered only whitespace, or `path` does not resolve.
    pub fn add_child(
        &mut self,
        forest: &mut Forest,
        path: &[usize],
        ui: &mut dyn Interaction,
    ) -> Option<Path> {
        if !path.is_empty() && forest.node_at(path).is_none() {
            return None;
        }
        let answer = ui.prompt(NEW_NODE_PROMPT, None)?;
        let name = answer.trim();
        if name.is_empty() {
            return None;
        }

        let next = forest.insert_node_as_child(path, name);
        let siblings = if path.is_empty() {
            next.len()
        } else {
            next.node_at(path)?.child_nodes().len()
        };
        *forest = next;

        let mut child = path.to_vec();
        child.push(siblings.saturating_sub(1));
        if !path.is_empty() {
            self.expanded.insert(path_to_key(path));
        }
        info!(name, ?child, "node added");
        Some(child)
    }

    /// Prompts for a new name for the node at `path`, offering the current
    /// one as the default. Returns `true` if the node was renamed.
    pub fn edit_node(&mut self, forest: &mut Forest, path: &[usize], ui: &mut dyn Interaction) -> bool {
        let Some(node) = forest.node_at(path) else {
            return false;
        };
        let Some(answer) = ui.prompt(EDIT_NODE_PROMPT, Some(&node.name)) else {
            return false;
        };
        let name = answer.trim();
        if name.is_empty() {
            return false;
        }

        *forest = forest.update_node_at(path, |n| TreeNode {
            name: name.to_string(),
            ..n.clone()
        });
        true
    }

    /// Asks for confirmation, then removes the node at `path` with its
    /// subtree. Returns `true` if the node was removed.
    pub fn delete_node(&mut self, forest: &mut Forest, path: &[usize], ui: &mut dyn Interaction) -> bool {
        let Some(node) = forest.node_at(path) else {
            return false;
        };
        if !ui.confirm(&delete_confirmation(&node.name)) {
            return false;
        }

        let (next, removed) = forest.remove_node_at(path);
        let Some(removed) = removed else {
            return false;
        };
        *forest = next;
        self.remap_expanded(|key| {
            if key.starts_with(path) {
                None
            } else {
                Some(adjust_for_removal(path, key))
            }
        });
        self.clamp_cursor(forest);
        info!(id = %removed.id, name = %removed.name, "node deleted");
        true
    }

    /// Resolves a finished drag and applies it.
    ///
    /// On a successful move the expansion of the moved subtree follows it
    /// and the cursor lands on the moved node.
    pub fn on_drag_end(&mut self, forest: &mut Forest, event: &DragEnd) -> TreeDrop {
        let outcome = resolve_tree_drop(event);
        match &outcome {
            TreeDrop::Move(mv) => {
                let Some(id) = forest.node_at(&mv.from).map(|n| n.id.clone()) else {
                    debug!(from = ?mv.from, "dragged node not found");
                    return TreeDrop::Ignored;
                };
                let next = forest.apply_move(mv);
                if next == *forest {
                    debug!(%id, from = ?mv.from, to_parent = ?mv.to_parent, "tree move changed nothing");
                    return TreeDrop::Ignored;
                }
                if let Some(to) = next.path_of(&id) {
                    self.remap_expanded(|key| Some(relocate(key, &mv.from, &to)));
                    *forest = next;
                    self.select_path(forest, &to);
                    debug!(%id, from = ?mv.from, ?to, "node moved");
                }
            }
            TreeDrop::Rejected(reason) => {
                info!(active = %event.active, over = ?event.over, %reason, "tree drop rejected");
            }
            TreeDrop::Ignored => {
                debug!(active = %event.active, over = ?event.over, "tree drop ignored");
            }
        }
        outcome
    }

    /// Collapses the selected node, or moves to its parent when it is
    /// already collapsed.
    pub fn navigate_left(&mut self, forest: &Forest) {
        let Some(row) = self.selected_row(forest) else {
            return;
        };
        if row.expanded {
            self.expanded.remove(&row.key);
        } else if let Some((_, parent)) = row.path.split_last()
            && !parent.is_empty()
        {
            self.select_path(forest, parent);
        }
    }

    /// Expands the selected node, or steps onto its first child when it is
    /// already expanded.
    pub fn navigate_right(&mut self, forest: &mut Forest) -> Option<LoadRequest> {
        let row = self.selected_row(forest)?;
        if !row.expandable {
            return None;
        }
        if !row.expanded {
            return self.toggle_expand(forest, &row.path);
        }
        let mut first_child = row.path;
        first_child.push(0);
        self.select_path(forest, &first_child);
        None
    }

    fn remap_expanded(&mut self, mut relocate: impl FnMut(&[usize]) -> Option<Path>) {
        self.expanded = std::mem::take(&mut self.expanded)
            .into_iter()
            .filter_map(|key| {
                let path = key_to_path(&key).ok()?;
                relocate(&path).map(|p| path_to_key(&p))
            })
            .collect();
    }
}

/// Groups the keys of visible rows by the key of their parent.
///
/// Roots are grouped under the empty key. Each group lists its rows in
/// display order, which is the order a sortable list needs.
#[must_use]
pub fn sibling_groups(rows: &[FlatRow]) -> BTreeMap<String, Vec<String>> {
    let mut groups: BTreeMap<String, Vec<String>> = BTreeMap::new();
    for row in rows {
        let parent = row.path.split_last().map_or(&[][..], |(_, parent)| parent);
        groups
            .entry(path_to_key(parent))
            .or_default()
            .push(row.key.clone());
    }
    groups
}

/// Translates a path from before a move of `from` to `to` into the
/// equivalent path after it.
fn relocate(path: &[usize], from: &[usize], to: &[usize]) -> Path {
    if path.starts_with(from) {
        let mut moved = to.to_vec();
        moved.extend_from_slice(&path[from.len()..]);
        return moved;
    }
    adjust_for_insertion(to, &adjust_for_removal(from, path))
}
