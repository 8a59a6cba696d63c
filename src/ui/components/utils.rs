use ratatui::layout::{Constraint, Direction, Layout, Rect};
use unicode_width::UnicodeWidthStr;

use crate::present::PageModel;
use crate::records::fields::RULE_TEXT;

/// Widest a rule text column may grow before truncation.
pub const RULE_TEXT_MAX_WIDTH: usize = 60;
/// Widest any other column may grow.
pub const CELL_MAX_WIDTH: usize = 24;
/// Character cells used by the inline rate bar.
pub const RATE_BAR_CELLS: usize = 8;

pub fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let vertical = split_vertical(
        r,
        &[
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ],
    );
    let horizontal = split_horizontal(
        vertical[1],
        &[
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ],
    );
    horizontal[1]
}

pub fn split_vertical(area: Rect, constraints: &[Constraint]) -> Vec<Rect> {
    Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints.iter().copied().collect::<Vec<_>>())
        .split(area)
        .to_vec()
}

pub fn split_horizontal(area: Rect, constraints: &[Constraint]) -> Vec<Rect> {
    Layout::default()
        .direction(Direction::Horizontal)
        .constraints(constraints.iter().copied().collect::<Vec<_>>())
        .split(area)
        .to_vec()
}

/// Width of each column of the page: the widest of header and cells, capped per column kind.
pub fn column_widths(model: &PageModel) -> Vec<usize> {
    model
        .headers
        .iter()
        .enumerate()
        .map(|(idx, header)| {
            let cap = if header.key == RULE_TEXT {
                RULE_TEXT_MAX_WIDTH
            } else {
                CELL_MAX_WIDTH
            };
            let content = model
                .rows
                .iter()
                .filter_map(|row| row.cells.get(idx))
                .map(|cell| match cell {
                    crate::present::CellView::RateBar { label, .. } => {
                        RATE_BAR_CELLS + 1 + UnicodeWidthStr::width(label.as_str())
                    }
                    other => UnicodeWidthStr::width(other.display()),
                })
                .max()
                .unwrap_or(0);
            UnicodeWidthStr::width(header.title().as_str())
                .max(content)
                .min(cap)
        })
        .collect()
}

/// Filled cells of the inline bar for a bar width in `0..=100`.
pub fn filled_cells(width: f64) -> usize {
    let cells = (width.clamp(0.0, 100.0) / 100.0 * RATE_BAR_CELLS as f64).round();
    cells as usize
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::records::Dataset;
    use crate::view::{ColumnVisibility, TableView, ViewState};

    #[test]
    fn widths_follow_content_and_caps() {
        let long_rule = "x".repeat(200);
        let dataset = Dataset::from_json_str(&format!(
            r#"[{{"ct":"Lung","r":"{long_rule}","O":12.5}}]"#
        ))
        .expect("fixture parses");
        let state = ViewState::new(50, ColumnVisibility::from_keys(["ct", "r", "O"]));
        let view = TableView::build(&dataset, &state);
        let model = crate::present::present_page(&dataset, &view, &state);

        let widths = column_widths(&model);
        // "Cancer Type ↕" is wider than "Lung"
        assert_eq!(widths[0], 13);
        assert_eq!(widths[1], RULE_TEXT_MAX_WIDTH);
        assert!(widths[2] >= RATE_BAR_CELLS + 1 + "12.5%".len());
    }

    #[test]
    fn filled_cells_scale_to_bar() {
        assert_eq!(filled_cells(0.0), 0);
        assert_eq!(filled_cells(50.0), 4);
        assert_eq!(filled_cells(100.0), RATE_BAR_CELLS);
        assert_eq!(filled_cells(250.0), RATE_BAR_CELLS);
    }
}
