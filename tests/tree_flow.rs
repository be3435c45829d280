//! End-to-end flows of the tree editor: lazy loading, edits, and drops,
//! driven through the view controller the way the terminal host does.

use trellis_protocol::{DragEnd, DropRejection, Forest, TreeDrop, TreeNode};
use trellis_tui::provider::{PreparedAnswer, ScriptedInteraction, StaticChildProvider};
use trellis_tui::{ChildProvider, LoadOutcome, TreeView};

fn seed() -> Forest {
    Forest::from_nodes(vec![
        TreeNode::lazy("Level A").with_id("a"),
        TreeNode::lazy("Level B").with_id("b"),
        TreeNode::new("Level C").with_id("c"),
    ])
}

fn outline(view: &TreeView, forest: &Forest) -> Vec<String> {
    view.rows(forest)
        .into_iter()
        .map(|row| format!("{}{}{}", "  ".repeat(row.depth), row.marker(), row.name))
        .collect()
}

#[tokio::test]
async fn lazy_node_loads_on_expand() {
    let provider = StaticChildProvider::new().with_children(
        "a",
        vec![TreeNode::new("Leaf").with_id("leaf"), TreeNode::lazy("Deeper").with_id("deeper")],
    );
    let mut forest = seed();
    let mut view = TreeView::new();

    let request = view.toggle_expand(&mut forest, &[0]).unwrap();
    let node = forest.node_at(&[0]).unwrap();
    assert!(node.is_loading);
    assert!(node.is_lazy());

    let result = provider.fetch(&request.node_id).await;
    let outcome = TreeView::complete_load(&mut forest, &request, result);

    assert_eq!(outcome, LoadOutcome::Loaded(2));
    assert!(!forest.node_at(&[0]).unwrap().is_loading);
    assert_eq!(
        outline(&view, &forest),
        ["▾Level A", "   Leaf", "  ▸Deeper", "▸Level B", " Level C"]
    );
}

#[tokio::test]
async fn ensure_children_loaded_runs_the_whole_fetch() {
    let provider = StaticChildProvider::new().with_children("b", vec![TreeNode::new("Only")]);
    let mut forest = seed();

    let outcome = TreeView::ensure_children_loaded(&mut forest, &[1], &provider).await;

    assert_eq!(outcome, Some(LoadOutcome::Loaded(1)));
    assert_eq!(forest.node_at(&[1, 0]).unwrap().name, "Only");
    // Already loaded: nothing left to fetch.
    assert_eq!(TreeView::ensure_children_loaded(&mut forest, &[1], &provider).await, None);
}

#[tokio::test]
async fn failed_fetch_leaves_node_lazy() {
    let provider = StaticChildProvider::new().with_failure("a", "backend down");
    let mut forest = seed();

    let outcome = TreeView::ensure_children_loaded(&mut forest, &[0], &provider).await;

    assert!(matches!(outcome, Some(LoadOutcome::Failed(_))));
    let node = forest.node_at(&[0]).unwrap();
    assert!(node.is_lazy());
    assert!(!node.is_loading);
}

#[tokio::test]
async fn fetch_lands_on_node_after_reorder() {
    let provider = StaticChildProvider::new().with_children("a", vec![TreeNode::new("Leaf")]);
    let mut forest = seed();
    let mut view = TreeView::new();

    let request = view.toggle_expand(&mut forest, &[0]).unwrap();
    // Level A is dragged to the end while its children are on the way.
    assert!(matches!(view.on_drag_end(&mut forest, &DragEnd::new("0", "2")), TreeDrop::Move(_)));

    let result = provider.fetch(&request.node_id).await;
    let outcome = TreeView::complete_load(&mut forest, &request, result);

    assert_eq!(outcome, LoadOutcome::Loaded(1));
    assert!(!forest.node_at(&[2]).unwrap().is_loading);
    assert_eq!(outline(&view, &forest), ["▸Level B", " Level C", "▾Level A", "   Leaf"]);
}

#[test]
fn completion_for_deleted_node_is_dropped() {
    let mut forest = seed();
    let mut view = TreeView::new();
    let request = view.toggle_expand(&mut forest, &[0]).unwrap();

    let mut ui = ScriptedInteraction::new([PreparedAnswer::Confirmed]);
    assert!(view.delete_node(&mut forest, &[0], &mut ui));
    let before = forest.clone();

    // Path [0] now holds Level B.
    let outcome = TreeView::complete_load(&mut forest, &request, Ok(vec![TreeNode::new("Late")]));

    assert_eq!(outcome, LoadOutcome::Stale);
    assert_eq!(forest, before);
}

#[test]
fn add_edit_delete_round() {
    let mut forest = seed();
    let mut view = TreeView::new();
    let mut ui = ScriptedInteraction::new([
        PreparedAnswer::Text("Notes".into()),
        PreparedAnswer::Text("  Release notes ".into()),
        PreparedAnswer::Declined,
        PreparedAnswer::Confirmed,
    ]);

    let child = view.add_child(&mut forest, &[2], &mut ui).unwrap();
    assert_eq!(child, vec![2, 0]);
    assert!(view.edit_node(&mut forest, &child, &mut ui));
    assert_eq!(forest.node_at(&child).unwrap().name, "Release notes");

    assert!(!view.delete_node(&mut forest, &[2], &mut ui));
    assert!(view.delete_node(&mut forest, &[2], &mut ui));
    assert_eq!(forest.len(), 2);

    assert_eq!(
        ui.asked(),
        [
            "New node name?",
            "Edit node name: [Notes]",
            "Delete \"Level C\" and its subtree?",
            "Delete \"Level C\" and its subtree?",
        ]
    );
}

#[test]
fn drops_follow_the_level_rules() {
    let mut forest = Forest::from_nodes(vec![
        TreeNode::new("P").with_id("p").with_children(vec![
            TreeNode::new("P1").with_id("p1"),
            TreeNode::new("P2").with_id("p2"),
        ]),
        TreeNode::new("Q").with_id("q"),
    ]);
    let mut view = TreeView::new();

    // Reorder within P.
    let outcome = view.on_drag_end(&mut forest, &DragEnd::new("0.1", "0.0"));
    assert!(matches!(outcome, TreeDrop::Move(_)));
    assert_eq!(forest.node_at(&[0, 0]).unwrap().id, "p2");

    // Out of P without the modifier.
    let outcome = view.on_drag_end(&mut forest, &DragEnd::new("0.0", "1"));
    assert_eq!(outcome, TreeDrop::Rejected(DropRejection::CrossLevelWithoutModifier));

    // P into its own child list.
    let outcome = view.on_drag_end(&mut forest, &DragEnd::new("0", "0.1").with_cross_level(true));
    assert_eq!(outcome, TreeDrop::Rejected(DropRejection::IntoOwnSubtree));

    // Q under P, with the modifier.
    let outcome = view.on_drag_end(&mut forest, &DragEnd::new("1", "0.1").with_cross_level(true));
    assert!(matches!(outcome, TreeDrop::Move(_)));
    assert_eq!(forest.len(), 1);
    let ids: Vec<_> = forest.node_at(&[0]).unwrap().child_nodes().iter().map(|n| n.id.clone()).collect();
    assert_eq!(ids, ["p2", "q", "p1"]);

    // Cancelled drag.
    let before = forest.clone();
    assert_eq!(view.on_drag_end(&mut forest, &DragEnd::cancelled("0.0")), TreeDrop::Ignored);
    assert_eq!(forest, before);
}
