//! Helpers shared by the rendering and controller tests.

use ratatui::buffer::Buffer;

use crate::tree_view::FlatRow;

/// Reduces a buffer to text, one line per row, without trailing blanks.
#[must_use]
pub(crate) fn buffer_to_string(buf: &Buffer) -> String {
    let width = usize::from(buf.area.width);
    buf.content
        .chunks(width.max(1))
        .take(usize::from(buf.area.height))
        .map(|line| {
            let text: String = line.iter().map(|cell| cell.symbol()).collect();
            format!("{}\n", text.trim_end_matches(' '))
        })
        .collect()
}

/// Renders flattened rows as an indented outline.
///
/// `v` marks an expanded node, `>` a collapsed one and `-` a leaf; nodes
/// with a fetch in flight get a `(loading)` suffix.
pub(crate) fn outline(rows: &[FlatRow]) -> String {
    rows.iter()
        .map(|row| {
            let marker = match (row.expandable, row.expanded) {
                (true, true) => "v",
                (true, false) => ">",
                (false, _) => "-",
            };
            let loading = if row.loading { " (loading)" } else { "" };
            format!("{}{marker} {}{loading}", "  ".repeat(row.depth), row.name)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Names of the visible rows, top to bottom.
pub(crate) fn row_names(rows: Vec<FlatRow>) -> Vec<String> {
    rows.into_iter().map(|row| row.name).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::layout::Rect;
    use ratatui::style::Style;
    use trellis_protocol::{Forest, TreeNode};

    use crate::TreeView;

    #[test]
    fn buffer_lines_are_trimmed() {
        let mut buf = Buffer::empty(Rect::new(0, 0, 8, 2));
        buf.set_string(0, 0, "Docs", Style::default());

        assert_eq!(buffer_to_string(&buf), "Docs\n\n");
    }

    #[test]
    fn outline_marks_loading_nodes() {
        let mut forest = Forest::from_nodes(vec![TreeNode::lazy("Remote"), TreeNode::new("Notes")]);
        let mut view = TreeView::new();
        view.toggle_expand(&mut forest, &[0]);

        assert_eq!(outline(&view.rows(&forest)), "v Remote (loading)\n- Notes");
        assert_eq!(row_names(view.rows(&forest)), ["Remote", "Notes"]);
    }
}
