//! Shared protocol types and state engines for the trellis application.
//!
//! This crate holds everything that does not depend on a terminal: the tree
//! and kanban state engines, path addressing, drag-and-drop resolution, the
//! seed data, and the message enum produced by the input layer.
//!
//! # Overview
//!
//! - [`path`]: path/key codec and ancestry checks
//! - [`tree`]: `TreeNode`, `Forest` and its persistent transforms
//! - [`kanban`]: `KanbanState` and its transforms
//! - [`drag`]: resolution of completed drags into engine moves
//! - [`dummy`]: seed data and mock children
//! - [`message`]: TUI event messages
//! - [`error`]: Error types for protocol operations
//!
//! All transforms borrow the current value and return the next one; the
//! caller owns every snapshot.
//!
//! # Examples
//!
//! Editing a forest and reordering a board:
//!
//! ```
//! use trellis_protocol::drag::{DragEnd, resolve_kanban_drop};
//! use trellis_protocol::dummy::initial_kanban;
//! use trellis_protocol::{Forest, TreeNode};
//!
//! let forest = Forest::from_nodes(vec![TreeNode::new("root")]);
//! let forest = forest.insert_node_as_child(&[0], "child");
//! assert_eq!(forest.node_at(&[0, 0]).unwrap().name, "child");
//!
//! let board = initial_kanban();
//! let card = board.column("todo").unwrap().card_ids[0].clone();
//! let event = DragEnd::new(format!("card:{card}"), "col:done");
//! let mv = resolve_kanban_drop(&board, &event).unwrap();
//! let board = board.apply_move(&mv);
//! assert_eq!(board.column_of(&card).map(String::as_str), Some("done"));
//! ```

pub mod drag;
pub mod dummy;
pub mod error;
pub mod id;
pub mod kanban;
pub mod message;
pub mod path;
pub mod tree;

// Re-export primary types at crate root for convenience
pub use drag::{
    CardMove, DragEnd, DragId, DropRejection, TreeDrop, TreeMove, resolve_kanban_drop,
    resolve_tree_drop,
};
pub use error::{ProtocolError, Result};
pub use kanban::{Card, CardId, Column, ColumnId, KanbanState};
pub use message::Message;
pub use path::{Path, is_descendant_path, key_to_path, path_to_key};
pub use tree::{Children, Forest, NodeId, TreeNode};
