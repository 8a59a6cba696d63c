use ratatui::{prelude::*, widgets::*};

use crate::view::{ColumnGroup, ColumnToggle};
use crate::ui::components::utils::{centered_rect, split_vertical};
use crate::ui::styles::{secondary_line, selection_style, ACCENT};
use crate::ui::UiRoute;

/// Toggles in display order, used to map the cursor back to a column key.
pub fn flatten(groups: &[ColumnGroup]) -> Vec<&ColumnToggle> {
    groups.iter().flat_map(|group| group.columns.iter()).collect()
}

pub fn render_columns(f: &mut Frame<'_>, area: Rect, groups: &[ColumnGroup], selected: usize) {
    let area = centered_rect(60, 80, area);
    f.render_widget(Clear, area);
    let block = Block::default()
        .borders(Borders::ALL)
        .title(UiRoute::Columns.title());
    f.render_widget(block.clone(), area);
    let inner = block.inner(area);
    let sections = split_vertical(inner, &[Constraint::Min(1), Constraint::Length(1)]);

    let mut items = Vec::new();
    let mut cursor_line = 0usize;
    let mut position = 0usize;
    for group in groups {
        items.push(ListItem::new(Line::from(group.title.bold().fg(ACCENT))));
        for toggle in &group.columns {
            let mark = if toggle.visible { "[x]" } else { "[ ]" };
            let mut item = ListItem::new(format!("  {mark} {}", toggle.label));
            if position == selected {
                item = item.style(selection_style());
                cursor_line = items.len();
            }
            items.push(item);
            position += 1;
        }
    }

    let mut state = ListState::default();
    state.select(Some(cursor_line));
    f.render_stateful_widget(List::new(items), sections[0], &mut state);
    f.render_widget(
        Paragraph::new(secondary_line("↑/↓ move • Space/Enter toggle • Esc close")),
        sections[1],
    );
}
