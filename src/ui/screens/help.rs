use ratatui::{prelude::*, widgets::*};

use crate::records::fields::{column_label, COLUMN_DESCRIPTIONS};
use crate::ui::components::utils::centered_rect;
use crate::ui::styles::{secondary_line, ACCENT};
use crate::ui::UiRoute;

pub const KEY_BINDINGS: &[(&str, &str)] = &[
    ("↑/↓ j/k", "Move the row cursor"),
    ("←/→ h/l", "Move the column cursor"),
    ("s", "Sort by the column under the cursor; again to flip direction"),
    ("n p PgDn PgUp", "Next or previous page"),
    ("Home End", "First or last page"),
    ("g", "Go to a page number"),
    ("z", "Cycle rows per page"),
    ("/", "Search rule text"),
    ("1 2 3 4", "Filter by cancer type, rule type, trial or drug category"),
    ("u", "Show only cluster representatives"),
    ("x", "Clear search and filters"),
    ("c", "Choose visible columns"),
    ("e", "Export the filtered rows to CSV"),
    ("Enter", "Open rule details"),
    ("q Esc", "Quit"),
];

/// Key bindings followed by descriptions of the columns present in the dataset.
pub fn render_help(f: &mut Frame<'_>, area: Rect, schema: &[String], scroll: u16) {
    let area = centered_rect(80, 85, area);
    f.render_widget(Clear, area);

    let mut lines: Vec<Line<'static>> = vec![Line::from("Keys".bold().fg(ACCENT))];
    for (keys, action) in KEY_BINDINGS {
        lines.push(Line::from(vec![
            Span::from(format!("{keys:<16}")).bold(),
            Span::from(*action),
        ]));
    }

    lines.push(Line::default());
    lines.push(Line::from("Columns".bold().fg(ACCENT)));
    for (key, description) in COLUMN_DESCRIPTIONS
        .iter()
        .filter(|(key, _)| schema.iter().any(|column| column == *key))
    {
        lines.push(Line::from(vec![
            Span::from(format!("{:<28}", column_label(key))).bold(),
            Span::from(*description),
        ]));
    }

    lines.push(Line::default());
    lines.push(secondary_line("↑/↓ scroll • Esc/? close"));

    let paragraph = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .scroll((scroll, 0))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(UiRoute::Help.title()),
        );
    f.render_widget(paragraph, area);
}
