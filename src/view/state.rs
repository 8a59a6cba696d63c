use std::ops::Range;

use log::debug;

use crate::records::Dataset;

use super::columns::ColumnVisibility;
use super::filter::{filter_rules, FilterCriteria};
use super::paginate::{in_range, page_range, total_pages};
use super::sort::{sort_rows, SortState};

pub const DEFAULT_PAGE_SIZE: usize = 50;

/// Immutable snapshot of everything the user can change. Transitions return a new snapshot.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ViewState {
    pub filters: FilterCriteria,
    pub sort: SortState,
    pub page: usize,
    pub page_size: usize,
    pub columns: ColumnVisibility,
}

impl Default for ViewState {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE, ColumnVisibility::default())
    }
}

impl ViewState {
    pub fn new(page_size: usize, columns: ColumnVisibility) -> Self {
        Self {
            filters: FilterCriteria::default(),
            sort: SortState::default(),
            page: 1,
            page_size: page_size.max(1),
            columns,
        }
    }

    /// Replace the filters; always returns to the first page.
    pub fn with_filters(&self, filters: FilterCriteria) -> Self {
        Self {
            filters,
            page: 1,
            ..self.clone()
        }
    }

    pub fn with_search(&self, search: impl Into<String>) -> Self {
        self.with_filters(FilterCriteria {
            search: search.into(),
            ..self.filters.clone()
        })
    }

    /// Apply a header click on `column`.
    pub fn with_sort_click(&self, column: &str) -> Self {
        Self {
            sort: self.sort.clicked(column),
            ..self.clone()
        }
    }

    /// Move to `page` if it exists for `total_rows`; otherwise the snapshot is unchanged.
    pub fn with_page(&self, page: usize, total_rows: usize) -> Self {
        let pages = total_pages(total_rows, self.page_size);
        if in_range(page, pages) {
            Self {
                page,
                ..self.clone()
            }
        } else {
            debug!("Ignoring navigation to page {page} of {pages}");
            self.clone()
        }
    }

    pub fn with_page_size(&self, page_size: usize) -> Self {
        Self {
            page_size: page_size.max(1),
            page: 1,
            ..self.clone()
        }
    }

    pub fn with_column_toggled(&self, key: &str) -> Self {
        Self {
            columns: self.columns.toggled(key),
            ..self.clone()
        }
    }
}

/// Result of running the filter → sort → paginate pipeline for one snapshot.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TableView {
    /// Dataset indices of every filtered row, in display order.
    pub rows: Vec<usize>,
    pub page: usize,
    pub page_size: usize,
    pub total_pages: usize,
}

impl TableView {
    pub fn build(dataset: &Dataset, state: &ViewState) -> Self {
        let filtered = filter_rules(dataset, &state.filters);
        let rows = sort_rows(dataset, &filtered, &state.sort);
        let pages = total_pages(rows.len(), state.page_size);
        debug!(
            "Pipeline produced {} of {} rows across {} pages",
            rows.len(),
            dataset.len(),
            pages
        );
        Self {
            rows,
            page: state.page.clamp(1, pages),
            page_size: state.page_size,
            total_pages: pages,
        }
    }

    pub fn total(&self) -> usize {
        self.rows.len()
    }

    pub fn page_bounds(&self) -> Range<usize> {
        page_range(self.rows.len(), self.page, self.page_size)
    }

    /// Dataset indices of the rows on the current page.
    pub fn page_rows(&self) -> &[usize] {
        &self.rows[self.page_bounds()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::view::sort::SortDirection;

    fn dataset(rows: usize) -> Dataset {
        let items: Vec<String> = (0..rows)
            .map(|i| {
                let ct = if i % 2 == 0 { "Breast" } else { "Lung" };
                format!(r#"{{"ct":"{ct}","nt":"{i}","r":"rule {i}","ccr":"x"}}"#)
            })
            .collect();
        Dataset::from_json_str(&format!("[{}]", items.join(","))).expect("fixture parses")
    }

    #[test]
    fn filter_changes_reset_to_first_page() {
        let state = ViewState::default().with_page(3, 120);
        assert_eq!(state.page, 3);
        let filtered = state.with_search("rule");
        assert_eq!(filtered.page, 1);
        assert_eq!(filtered.filters.search, "rule");
    }

    #[test]
    fn out_of_range_navigation_is_ignored() {
        let state = ViewState::default();
        assert_eq!(state.with_page(0, 120), state);
        assert_eq!(state.with_page(4, 120), state);
        assert_eq!(state.with_page(3, 120).page, 3);
    }

    #[test]
    fn sort_and_column_changes_preserve_page_and_filters() {
        let state = ViewState::default()
            .with_search("rule")
            .with_page(2, 120)
            .with_sort_click("nt")
            .with_column_toggled("ct");
        assert_eq!(state.page, 2);
        assert_eq!(state.filters.search, "rule");
        assert_eq!(state.sort.direction, SortDirection::Ascending);
        assert!(!state.columns.is_visible("ct"));
    }

    #[test]
    fn pipeline_pages_through_sorted_rows() {
        let data = dataset(120);
        let state = ViewState::default()
            .with_sort_click("nt")
            .with_sort_click("nt")
            .with_page(2, data.len());
        let view = TableView::build(&data, &state);

        assert_eq!(view.total_pages, 3);
        assert_eq!(view.page_rows().len(), 50);
        assert_eq!(view.page_rows().first(), Some(&69));
        assert_eq!(view.page_bounds(), 50..100);
    }

    #[test]
    fn shrinking_results_clamp_the_page() {
        let data = dataset(120);
        let mut state = ViewState::default().with_page(3, data.len());
        state.filters.cancer_type = Some("Nowhere".to_string());
        let view = TableView::build(&data, &state);
        assert_eq!(view.page, 1);
        assert!(view.page_rows().is_empty());
    }
}
