use std::convert::TryFrom;

use ratatui::{prelude::*, widgets::*};

use crate::app::{FilterKind, SessionState};
use crate::present::{summary_line, PageModel};
use crate::records::fields::{drug_label, RULE_TEXT};
use crate::ui::components::{
    body_row, build_table, header_row, highlight_row,
    utils::{column_widths, split_vertical},
};
use crate::ui::styles::{secondary_line, secondary_span, selection_style, ACCENT};
use crate::ui::UiRoute;
use crate::utils::sanitize_display_text;
use crate::view::PageButton;

const COLUMN_SPACING: usize = 2;

/// Scroll position of the table body inside the terminal.
#[derive(Debug, Default, Clone, Copy)]
pub struct Viewport {
    pub row_offset: usize,
    pub col_offset: usize,
}

impl Viewport {
    /// Keep `selected` within `capacity` visible rows.
    pub fn follow_row(&mut self, selected: usize, capacity: usize) {
        let capacity = capacity.max(1);
        if selected < self.row_offset {
            self.row_offset = selected;
        } else if selected >= self.row_offset + capacity {
            self.row_offset = selected + 1 - capacity;
        }
    }

    /// Keep the cursor column visible given the column widths and available width.
    pub fn follow_column(&mut self, cursor: usize, widths: &[usize], available: usize) {
        if cursor < self.col_offset {
            self.col_offset = cursor;
        }
        while self.col_offset < cursor
            && span_width(&widths[self.col_offset..=cursor]) > available
        {
            self.col_offset += 1;
        }
        self.col_offset = self.col_offset.min(widths.len().saturating_sub(1));
    }
}

fn span_width(widths: &[usize]) -> usize {
    widths.iter().sum::<usize>() + COLUMN_SPACING * widths.len().saturating_sub(1)
}

/// Draw the table screen: header, filter bar, page table, pagination and status lines.
pub fn render_browser(
    f: &mut Frame<'_>,
    area: Rect,
    session: &SessionState,
    model: &PageModel,
    viewport: &mut Viewport,
    editing_search: bool,
) {
    let chunks = split_vertical(
        area,
        &[
            Constraint::Length(2),
            Constraint::Length(1),
            Constraint::Min(3),
            Constraint::Length(1),
            Constraint::Length(2),
        ],
    );

    let header = Text::from(vec![
        Line::from(UiRoute::Browser.title().bold().fg(ACCENT)),
        secondary_line(summary_line(&session.dataset().summary())),
    ]);
    f.render_widget(Paragraph::new(header), chunks[0]);

    f.render_widget(Paragraph::new(filter_bar(session, editing_search)), chunks[1]);

    render_table(f, chunks[2], session, model, viewport);

    let mut pager = pagination_spans(&model.buttons);
    pager.insert(0, Span::from(format!("{}  ", model.info)));
    pager.push(secondary_span(format!(
        "  • {} per page",
        session.view_state().page_size
    )));
    f.render_widget(Paragraph::new(Line::from(pager)), chunks[3]);

    let status = match session.status() {
        Some(message) => Line::from(message.to_string().fg(ACCENT)),
        None => match session.selected_rule() {
            Some(rule) => secondary_line(sanitize_display_text(&rule.text(RULE_TEXT))),
            None => Line::default(),
        },
    };
    let hints = secondary_line(
        "↑/↓ row • ←/→ column • s sort • n/p page • / search • 1-4 filters • u unique • x clear • c columns • e export • Enter details • ? help • q quit",
    );
    f.render_widget(
        Paragraph::new(Text::from(vec![status, hints])),
        chunks[4],
    );
}

fn filter_bar(session: &SessionState, editing_search: bool) -> Line<'static> {
    let mut spans = vec![Span::from("Search: ").bold()];
    if editing_search {
        spans.push(Span::styled(
            format!("{}_", session.search_input()),
            selection_style(),
        ));
    } else if session.search_input().is_empty() {
        spans.push(secondary_span("(none)"));
    } else {
        spans.push(Span::from(session.search_input().to_string()));
    }

    for (idx, kind) in FilterKind::ALL.iter().enumerate() {
        spans.push(secondary_span("  │  "));
        spans.push(Span::from(format!("{} {}: ", idx + 1, kind.label())).bold());
        match session.filter_value(*kind) {
            Some(value) => {
                let label = match kind {
                    FilterKind::Drug => drug_label(value).unwrap_or(value),
                    _ => value,
                };
                spans.push(Span::from(label.to_string()).fg(ACCENT));
            }
            None => spans.push(secondary_span("All")),
        }
    }

    spans.push(secondary_span("  │  "));
    spans.push(Span::from("Unique: ").bold());
    if session.view_state().filters.unique_only {
        spans.push(Span::from("on").fg(ACCENT));
    } else {
        spans.push(secondary_span("off"));
    }
    Line::from(spans)
}

fn render_table(
    f: &mut Frame<'_>,
    area: Rect,
    session: &SessionState,
    model: &PageModel,
    viewport: &mut Viewport,
) {
    let title = format!("{} ({} rows)", UiRoute::Browser.title(), model.total);
    if model.rows.is_empty() {
        let empty = Paragraph::new(secondary_line("No rules match the current filters"))
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL).title(title));
        f.render_widget(empty, area);
        return;
    }

    let widths = column_widths(model);
    let capacity = (area.height.saturating_sub(3) as usize).max(1);
    viewport.follow_row(session.selected(), capacity);
    viewport.follow_column(
        session.column_cursor(),
        &widths,
        area.width.saturating_sub(2) as usize,
    );

    let first = viewport.col_offset;
    let header = header_row(&model.headers[first..], session.column_cursor().saturating_sub(first));
    let end = (viewport.row_offset + capacity).min(model.rows.len());
    let rows = model.rows[viewport.row_offset..end]
        .iter()
        .enumerate()
        .map(|(i, row)| {
            let mut visible = row.clone();
            visible.cells.drain(..first.min(visible.cells.len()));
            let widget = body_row(&visible, &widths[first..]);
            if viewport.row_offset + i == session.selected() {
                highlight_row(widget)
            } else {
                widget
            }
        })
        .collect::<Vec<_>>();

    let constraints = widths[first..]
        .iter()
        .map(|w| u16::try_from(*w).unwrap_or(u16::MAX))
        .map(Constraint::Length)
        .collect::<Vec<_>>();

    f.render_widget(build_table(rows, header, constraints, title), area);
}

/// Styled pagination strip: current page highlighted, disabled arrows dimmed.
pub fn pagination_spans(buttons: &[PageButton]) -> Vec<Span<'static>> {
    let mut spans = Vec::with_capacity(buttons.len() * 2);
    for (idx, button) in buttons.iter().enumerate() {
        if idx > 0 {
            spans.push(Span::from(" "));
        }
        spans.push(match button {
            PageButton::Previous { enabled: true, .. } => Span::from("‹"),
            PageButton::Previous { enabled: false, .. } => secondary_span("‹"),
            PageButton::Next { enabled: true, .. } => Span::from("›"),
            PageButton::Next { enabled: false, .. } => secondary_span("›"),
            PageButton::Ellipsis => secondary_span("…"),
            PageButton::Page { number, current: true } => {
                Span::styled(format!("[{number}]"), selection_style())
            }
            PageButton::Page { number, .. } => Span::from(number.to_string()),
        });
    }
    spans
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn viewport_follows_selection() {
        let mut viewport = Viewport::default();
        viewport.follow_row(12, 10);
        assert_eq!(viewport.row_offset, 3);
        viewport.follow_row(1, 10);
        assert_eq!(viewport.row_offset, 1);
    }

    #[test]
    fn viewport_scrolls_columns_into_view() {
        let mut viewport = Viewport::default();
        let widths = [10, 10, 10, 10];
        // 10 + 2 + 10 = 22 fits, a third column does not.
        viewport.follow_column(2, &widths, 25);
        assert_eq!(viewport.col_offset, 1);
        viewport.follow_column(0, &widths, 25);
        assert_eq!(viewport.col_offset, 0);
    }

    #[test]
    fn pagination_highlights_current_page() {
        let spans = pagination_spans(&crate::view::page_buttons(2, 3));
        let text: String = spans.iter().map(|span| span.content.as_ref()).collect();
        assert_eq!(text, "‹ 1 [2] 3 ›");
    }
}
