use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Cell, Row, Table},
};

use ratatui::prelude::Stylize;

use crate::present::{CellView, HeaderCell, RowModel};
use crate::ui::styles::{badge_style, cluster_center_style, tier_color, ACCENT};
use crate::utils::truncate_chars;

use super::utils::{filled_cells, RATE_BAR_CELLS};

pub fn build_table<'a>(
    rows: Vec<Row<'a>>,
    header: Row<'a>,
    widths: Vec<Constraint>,
    title: impl Into<String>,
) -> Table<'a> {
    Table::new(rows, widths)
        .header(header)
        .block(Block::default().borders(Borders::ALL).title(title.into()))
        .column_spacing(2)
}

pub fn highlight_row<'a>(row: Row<'a>) -> Row<'a> {
    row.reversed()
}

/// Header row with the column under `cursor` underlined and the sorted column in bold.
pub fn header_row(headers: &[HeaderCell], cursor: usize) -> Row<'static> {
    let cells = headers
        .iter()
        .enumerate()
        .map(|(idx, header)| {
            let mut style = Style::default().fg(ACCENT);
            if header.sorted {
                style = style.add_modifier(Modifier::BOLD);
            }
            if idx == cursor {
                style = style.add_modifier(Modifier::UNDERLINED);
            }
            Cell::from(header.title()).style(style)
        })
        .collect::<Vec<_>>();
    Row::new(cells)
}

pub fn body_row(row: &RowModel, widths: &[usize]) -> Row<'static> {
    let cells = row
        .cells
        .iter()
        .zip(widths.iter().copied())
        .map(|(cell, width)| styled_cell(cell, width))
        .collect::<Vec<_>>();
    let row_widget = Row::new(cells);
    if row.cluster_center {
        row_widget.style(cluster_center_style())
    } else {
        row_widget
    }
}

fn styled_cell(cell: &CellView, width: usize) -> Cell<'static> {
    match cell {
        CellView::RuleText { text, .. } => Cell::from(truncate_chars(text, width)),
        CellView::Badge { label, tone } => {
            Cell::from(truncate_chars(label, width)).style(badge_style(*tone))
        }
        CellView::RateBar {
            width: bar, tier, label, ..
        } => Cell::from(Line::from(rate_bar_spans(*bar, tier_color(*tier), label))),
        other if other.is_numeric() => {
            Cell::from(Text::from(other.display().to_string()).alignment(Alignment::Right))
        }
        other => Cell::from(truncate_chars(other.display(), width)),
    }
}

/// `█████░░░ 72.3%` colored by tier.
pub fn rate_bar_spans(bar: f64, color: Color, label: &str) -> Vec<Span<'static>> {
    let filled = filled_cells(bar);
    vec![
        Span::from("█".repeat(filled)).fg(color),
        Span::from("░".repeat(RATE_BAR_CELLS - filled)).dim(),
        Span::from(format!(" {label}")),
    ]
}
