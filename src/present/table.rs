use crate::records::fields::column_label;
use crate::records::{Dataset, DatasetSummary};
use crate::view::{page_buttons, PageButton, TableView, ViewState};

use super::cell::{render_cell, CellView};
use super::format::{group_count, humanize};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HeaderCell {
    pub key: String,
    pub label: String,
    pub indicator: &'static str,
    pub sorted: bool,
}

impl HeaderCell {
    pub fn title(&self) -> String {
        format!("{} {}", self.label, self.indicator)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct RowModel {
    /// Position of the rule in the dataset, used to open its detail view.
    pub index: usize,
    pub cluster_center: bool,
    pub cells: Vec<CellView>,
}

/// Render-ready content for the current page.
#[derive(Clone, Debug, PartialEq)]
pub struct PageModel {
    pub headers: Vec<HeaderCell>,
    pub rows: Vec<RowModel>,
    pub total: usize,
    pub info: String,
    pub buttons: Vec<PageButton>,
}

pub fn present_page(dataset: &Dataset, view: &TableView, state: &ViewState) -> PageModel {
    let columns = state.columns.ordered(dataset.columns());

    let headers = columns
        .iter()
        .map(|key| HeaderCell {
            key: (*key).to_string(),
            label: column_label(key).to_string(),
            indicator: state.sort.indicator(key),
            sorted: state.sort.column.as_deref() == Some(*key),
        })
        .collect();

    let rows = view
        .page_rows()
        .iter()
        .filter_map(|&index| {
            let rule = dataset.get(index)?;
            Some(RowModel {
                index,
                cluster_center: rule.is_cluster_center(),
                cells: columns.iter().map(|key| render_cell(rule, key)).collect(),
            })
        })
        .collect();

    PageModel {
        headers,
        rows,
        total: view.total(),
        info: pagination_info(view),
        buttons: page_buttons(view.page, view.total_pages),
    }
}

/// `Showing 51-100 of 1,234 rows`.
pub fn pagination_info(view: &TableView) -> String {
    let bounds = view.page_bounds();
    let (start, end) = if bounds.is_empty() {
        (0, 0)
    } else {
        (bounds.start + 1, bounds.end)
    };
    format!(
        "Showing {start}-{end} of {} rows",
        group_count(view.total())
    )
}

pub fn summary_line(summary: &DatasetSummary) -> String {
    format!(
        "{} rules • {} cancer types • {} trials",
        group_count(summary.rules),
        group_count(summary.cancer_types),
        group_count(summary.trials)
    )
}

/// Picker label for a cancer type option.
pub fn cancer_option_label(value: &str) -> String {
    humanize(value)
}
