//! End-to-end flows of the kanban board, through both the view controller
//! and the keyboard-driven app.

use std::sync::Arc;

use trellis_config::Config;
use trellis_protocol::dummy::initial_kanban;
use trellis_protocol::{DragEnd, KanbanState, Message};
use trellis_tui::provider::{PreparedAnswer, ScriptedInteraction, StaticChildProvider};
use trellis_tui::{App, KanbanView, Tab};

fn titles(state: &KanbanState, column: &str) -> Vec<String> {
    state
        .column(column)
        .unwrap()
        .card_ids
        .iter()
        .map(|id| state.card(id).unwrap().title.clone())
        .collect()
}

#[test]
fn seed_card_moves_to_top_of_done() {
    let mut state = initial_kanban();
    let mut view = KanbanView::new();
    let first = state.column("todo").unwrap().card_ids[0].clone();
    let done_top = state.column("done").unwrap().card_ids[0].clone();

    let mv = view
        .on_drag_end(
            &mut state,
            &DragEnd::new(format!("card:{first}"), format!("card:{done_top}")),
        )
        .unwrap();

    assert_eq!(mv.to_index, 0);
    assert_eq!(titles(&state, "todo"), ["Design landing page", "Review codebase structure"]);
    assert_eq!(titles(&state, "done"), ["Create initial project plan", "Write API documentation"]);
    assert_eq!(state.card_count(), 6);
    assert!(state.validate().is_ok());
    assert_eq!(view.selected_card_id(&state), Some(first));
}

#[test]
fn add_rename_delete_through_controller() {
    let mut state = initial_kanban();
    let mut view = KanbanView::new();
    let mut ui = ScriptedInteraction::new([
        PreparedAnswer::Text("Write tests".into()),
        PreparedAnswer::Text("   ".into()),
        PreparedAnswer::Text("Write more tests".into()),
    ]);

    let id = view.add_card(&mut state, "inprogress", &mut ui).unwrap();
    assert_eq!(state.column_of(&id).map(String::as_str), Some("inprogress"));

    // Blank titles are ignored.
    assert!(!view.rename_card(&mut state, &mut ui));
    assert!(view.rename_card(&mut state, &mut ui));
    assert_eq!(state.card(&id).unwrap().title, "Write more tests");

    assert!(view.delete_card(&mut state));
    assert!(state.card(&id).is_none());
    assert_eq!(state.column("inprogress").unwrap().len(), 2);
    assert_eq!(ui.asked(), ["Card title?", "Edit card title: [Write tests]", "Edit card title: [Write tests]"]);
}

#[test]
fn keyboard_drag_reorders_within_column() {
    let mut app = App::new(Config::default(), Arc::new(StaticChildProvider::new()));
    app.update(Message::SwitchTab);
    assert_eq!(app.state().tab, Tab::Kanban);

    // Grab the third Todo card and drop it on the first.
    for _ in 0..3 {
        app.update(Message::NavigateDown);
    }
    app.update(Message::Grab);
    app.update(Message::NavigateUp);
    app.update(Message::NavigateUp);
    app.update(Message::Drop { cross_level: false });

    let kanban = &app.state().kanban;
    assert_eq!(
        titles(kanban, "todo"),
        ["Review codebase structure", "Create initial project plan", "Design landing page"]
    );
    assert_eq!(app.state().status.as_deref(), Some("Moved Review codebase structure"));
}

#[test]
fn dropping_on_itself_changes_nothing() {
    let mut app = App::new(Config::default(), Arc::new(StaticChildProvider::new()));
    app.update(Message::SwitchTab);
    app.update(Message::NavigateDown);
    let before = app.state().kanban.clone();

    app.update(Message::Grab);
    app.update(Message::Drop { cross_level: false });

    assert_eq!(app.state().kanban, before);
    assert!(app.state().grabbed.is_none());
}
