//! Dummy data generation for demonstration and tests.
//!
//! Provides the seed forest and board the application starts with, plus the
//! random children served by the mock child provider.
//!
//! # Examples
//!
//! ```
//! use trellis_protocol::dummy::{initial_forest, initial_kanban};
//!
//! let forest = initial_forest();
//! assert_eq!(forest.len(), 3);
//!
//! let board = initial_kanban();
//! assert_eq!(board.card_count(), 6);
//! ```

use rand::Rng;

use crate::kanban::{Card, Column, KanbanState};
use crate::tree::{Forest, TreeNode};

/// Display colors handed out to generated nodes.
pub const COLORS: [&str; 5] = ["#2563eb", "#16a34a", "#9333ea", "#f97316", "#0f766e"];

/// Default probability that a generated child is itself lazy.
pub const DEFAULT_LAZY_PROBABILITY: f64 = 0.55;

/// Default upper bound on generated children per fetch.
pub const DEFAULT_MAX_CHILDREN: usize = 4;

const LETTERS: [char; 5] = ['A', 'B', 'C', 'D', 'E'];

fn random_color<R: Rng + ?Sized>(rng: &mut R) -> &'static str {
    COLORS[rng.random_range(0..COLORS.len())]
}

fn make_node<R: Rng + ?Sized>(rng: &mut R, name: String, lazy: bool) -> TreeNode {
    let node = if lazy {
        TreeNode::lazy(name)
    } else {
        TreeNode::new(name)
    };
    node.with_color(random_color(rng))
}

/// Builds the starting forest: two lazy roots and one loaded leaf.
#[must_use]
pub fn initial_forest() -> Forest {
    let mut rng = rand::rng();
    Forest::from_nodes(vec![
        make_node(&mut rng, "Level A".to_string(), true),
        make_node(&mut rng, "Level B".to_string(), true),
        make_node(&mut rng, "Level C".to_string(), false),
    ])
}

/// Generates between one and `max` children for a lazy node.
///
/// Each child is named `Level <letter>` and is lazy with probability
/// `lazy_probability`, otherwise a loaded leaf. A `max` of zero is treated
/// as one.
///
/// # Examples
///
/// ```
/// use trellis_protocol::dummy::mock_children;
///
/// let children = mock_children(&mut rand::rng(), 4, 0.0);
/// assert!((1..=4).contains(&children.len()));
/// assert!(children.iter().all(|c| c.name.starts_with("Level ") && !c.is_lazy()));
/// ```
pub fn mock_children<R: Rng + ?Sized>(
    rng: &mut R,
    max: usize,
    lazy_probability: f64,
) -> Vec<TreeNode> {
    let count = rng.random_range(1..=max.max(1));
    let lazy_probability = lazy_probability.clamp(0.0, 1.0);
    (0..count)
        .map(|_| {
            let letter = LETTERS[rng.random_range(0..LETTERS.len())];
            let lazy = rng.random_bool(lazy_probability);
            make_node(rng, format!("Level {letter}"), lazy)
        })
        .collect()
}

/// Builds the starting board: three columns and six cards.
///
/// # Examples
///
/// ```
/// use trellis_protocol::dummy::initial_kanban;
///
/// let board = initial_kanban();
/// let lens: Vec<_> = board.columns_in_order().map(|c| c.len()).collect();
/// assert_eq!(lens, [3, 2, 1]);
/// assert!(board.validate().is_ok());
/// ```
#[must_use]
pub fn initial_kanban() -> KanbanState {
    let lanes: [(&str, &str, &[&str]); 3] = [
        (
            "todo",
            "Todo",
            &[
                "Create initial project plan",
                "Design landing page",
                "Review codebase structure",
            ],
        ),
        (
            "inprogress",
            "In Progress",
            &["Implement authentication", "Set up database schema"],
        ),
        ("done", "Done", &["Write API documentation"]),
    ];

    let mut state = KanbanState::default();
    for (id, title, card_titles) in lanes {
        let mut column = Column::new(id, title);
        for card_title in card_titles {
            let card = Card::new(*card_title);
            column.card_ids.push(card.id.clone());
            state.cards.insert(card.id.clone(), card);
        }
        state.column_order.push(column.id.clone());
        state.columns.insert(column.id.clone(), column);
    }
    state
}
