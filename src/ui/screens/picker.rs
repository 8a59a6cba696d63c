use ratatui::{prelude::*, widgets::*};

use crate::app::{FilterKind, FilterOption};
use crate::ui::components::utils::{centered_rect, split_vertical};
use crate::ui::styles::{secondary_line, selection_style};
use crate::ui::UiRoute;

pub fn render_picker(
    f: &mut Frame<'_>,
    area: Rect,
    kind: FilterKind,
    options: &[FilterOption],
    active: Option<&str>,
    selected: usize,
) {
    let area = centered_rect(50, 70, area);
    f.render_widget(Clear, area);
    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!("{} by {}", UiRoute::Picker.title(), kind.label()));
    f.render_widget(block.clone(), area);
    let inner = block.inner(area);
    let sections = split_vertical(inner, &[Constraint::Min(1), Constraint::Length(1)]);

    let items: Vec<ListItem> = options
        .iter()
        .enumerate()
        .map(|(idx, option)| {
            let marker = if option.value.as_deref() == active { "● " } else { "  " };
            let mut item = ListItem::new(format!("{marker}{}", option.label));
            if idx == selected {
                item = item.style(selection_style());
            }
            item
        })
        .collect();

    let mut state = ListState::default();
    state.select(Some(selected));
    f.render_stateful_widget(List::new(items), sections[0], &mut state);
    f.render_widget(
        Paragraph::new(secondary_line("↑/↓ or j/k move • Enter select • Esc cancel")),
        sections[1],
    );
}
