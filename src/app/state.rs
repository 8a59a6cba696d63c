use std::path::PathBuf;
use std::time::Instant;

use log::debug;

use crate::config::ViewerConfig;
use crate::error::Result;
use crate::present::{cancer_option_label, present_page, PageModel};
use crate::records::fields::{column_label, DRUG_CATEGORIES, RULE_SECTIONS};
use crate::records::{Dataset, Records, Rule};
use crate::utils::Debouncer;
use crate::view::{FilterCriteria, TableView, ViewState};

/// The categorical selectors offered by the picker overlay.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterKind {
    CancerType,
    RuleType,
    Trial,
    Drug,
}

impl FilterKind {
    pub const ALL: [FilterKind; 4] = [
        FilterKind::CancerType,
        FilterKind::RuleType,
        FilterKind::Trial,
        FilterKind::Drug,
    ];

    pub fn label(self) -> &'static str {
        match self {
            FilterKind::CancerType => "Cancer Type",
            FilterKind::RuleType => "Rule Type",
            FilterKind::Trial => "Trial",
            FilterKind::Drug => "Drug Category",
        }
    }

    /// Label of the "no filter" entry at the top of each picker.
    pub fn all_label(self) -> &'static str {
        match self {
            FilterKind::CancerType => "All Cancer Types",
            FilterKind::RuleType => "All Rule Types",
            FilterKind::Trial => "All Trials",
            FilterKind::Drug => "All Drug Categories",
        }
    }
}

/// One selectable entry in a filter picker. `None` clears the filter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterOption {
    pub value: Option<String>,
    pub label: String,
}

/// Session-scoped viewer state shared by the TUI flows. Nothing here is persisted.
pub struct SessionState {
    config: ViewerConfig,
    records: Records,
    dataset: Dataset,
    view_state: ViewState,
    view: TableView,
    selected: usize,
    column_cursor: usize,
    search_input: String,
    search: Debouncer<String>,
    status: Option<String>,
}

impl SessionState {
    pub fn new(config: ViewerConfig, records: Records, dataset: Dataset) -> Self {
        let view_state = ViewState::new(config.default_page_size, config.column_visibility());
        let view = TableView::build(&dataset, &view_state);
        let search = Debouncer::new(config.search_debounce());
        Self {
            config,
            records,
            dataset,
            view_state,
            view,
            selected: 0,
            column_cursor: 0,
            search_input: String::new(),
            search,
            status: None,
        }
    }

    pub fn config(&self) -> &ViewerConfig {
        &self.config
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    pub fn view_state(&self) -> &ViewState {
        &self.view_state
    }

    pub fn view(&self) -> &TableView {
        &self.view
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn column_cursor(&self) -> usize {
        self.column_cursor
    }

    pub fn search_input(&self) -> &str {
        &self.search_input
    }

    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status = Some(message.into());
    }

    pub fn clear_status(&mut self) {
        self.status = None;
    }

    /// Install a new snapshot and rerun the pipeline.
    pub fn apply(&mut self, next: ViewState) {
        if next == self.view_state {
            return;
        }
        let page_changed = next.page != self.view_state.page;
        self.view_state = next;
        self.view = TableView::build(&self.dataset, &self.view_state);
        if page_changed {
            self.selected = 0;
        }
        self.clamp_cursors();
    }

    pub fn page_model(&self) -> PageModel {
        present_page(&self.dataset, &self.view, &self.view_state)
    }

    /// Visible column keys in display order.
    pub fn visible_columns(&self) -> Vec<&str> {
        self.view_state.columns.ordered(self.dataset.columns())
    }

    pub fn selected_index(&self) -> Option<usize> {
        self.view.page_rows().get(self.selected).copied()
    }

    pub fn selected_rule(&self) -> Option<&Rule> {
        self.selected_index().and_then(|idx| self.dataset.get(idx))
    }

    pub fn move_selection(&mut self, delta: isize) {
        let len = self.view.page_rows().len();
        if len == 0 {
            self.selected = 0;
            return;
        }
        self.selected = self.selected.saturating_add_signed(delta).min(len - 1);
    }

    pub fn move_column_cursor(&mut self, delta: isize) {
        let len = self.visible_columns().len();
        if len == 0 {
            self.column_cursor = 0;
            return;
        }
        self.column_cursor = self.column_cursor.saturating_add_signed(delta).min(len - 1);
    }

    /// Header click on the column under the cursor.
    pub fn sort_by_cursor(&mut self) {
        let Some(column) = self
            .visible_columns()
            .get(self.column_cursor)
            .map(|key| key.to_string())
        else {
            return;
        };
        let next = self.view_state.with_sort_click(&column);
        self.set_status(format!(
            "Sorted by {} {}",
            column_label(&column),
            next.sort.direction.icon()
        ));
        self.apply(next);
    }

    pub fn go_to_page(&mut self, page: usize) {
        let next = self.view_state.with_page(page, self.view.total());
        self.apply(next);
    }

    pub fn next_page(&mut self) {
        self.go_to_page(self.view_state.page + 1);
    }

    pub fn previous_page(&mut self) {
        self.go_to_page(self.view_state.page.saturating_sub(1));
    }

    pub fn last_page(&mut self) {
        self.go_to_page(self.view.total_pages);
    }

    pub fn cycle_page_size(&mut self) {
        let size = self.config.next_page_size(self.view_state.page_size);
        let next = self.view_state.with_page_size(size);
        self.selected = 0;
        self.apply(next);
    }

    /// Record a keystroke in the search box and restart the debounce window.
    pub fn push_search_char(&mut self, ch: char) {
        self.search_input.push(ch);
        self.schedule_search(Instant::now());
    }

    pub fn pop_search_char(&mut self) {
        if self.search_input.pop().is_some() {
            self.schedule_search(Instant::now());
        }
    }

    pub fn clear_search(&mut self) {
        self.search_input.clear();
        self.schedule_search(Instant::now());
        self.commit_search();
    }

    pub fn schedule_search(&mut self, now: Instant) {
        self.search.start_at(now, self.search_input.clone());
    }

    /// Apply the pending search immediately.
    pub fn commit_search(&mut self) {
        if let Some(text) = self.search.flush() {
            self.apply_search(text);
        }
    }

    /// Fire the debounced search once its window has elapsed. Returns true if the view changed.
    pub fn tick(&mut self, now: Instant) -> bool {
        match self.search.poll_at(now) {
            Some(text) => {
                self.apply_search(text);
                true
            }
            None => false,
        }
    }

    pub fn search_debouncer(&self) -> &Debouncer<String> {
        &self.search
    }

    fn apply_search(&mut self, text: String) {
        debug!("Applying search `{text}`");
        let next = self.view_state.with_search(text);
        self.selected = 0;
        self.apply(next);
    }

    pub fn filter_value(&self, kind: FilterKind) -> Option<&str> {
        let filters = &self.view_state.filters;
        match kind {
            FilterKind::CancerType => filters.cancer_type.as_deref(),
            FilterKind::RuleType => filters.rule_section.as_deref(),
            FilterKind::Trial => filters.trial_id.as_deref(),
            FilterKind::Drug => filters.drug.as_deref(),
        }
    }

    pub fn set_filter(&mut self, kind: FilterKind, value: Option<String>) {
        let mut filters = self.view_state.filters.clone();
        match kind {
            FilterKind::CancerType => filters.cancer_type = value,
            FilterKind::RuleType => filters.rule_section = value,
            FilterKind::Trial => filters.trial_id = value,
            FilterKind::Drug => filters.drug = value,
        }
        self.selected = 0;
        let next = self.view_state.with_filters(filters);
        self.apply(next);
    }

    pub fn toggle_unique(&mut self) {
        let filters = FilterCriteria {
            unique_only: !self.view_state.filters.unique_only,
            ..self.view_state.filters.clone()
        };
        self.selected = 0;
        let next = self.view_state.with_filters(filters);
        self.apply(next);
    }

    pub fn clear_filters(&mut self) {
        self.search_input.clear();
        let _ = self.search.flush();
        self.selected = 0;
        let next = self.view_state.with_filters(FilterCriteria::default());
        self.apply(next);
    }

    pub fn toggle_column(&mut self, key: &str) {
        let next = self.view_state.with_column_toggled(key);
        self.apply(next);
    }

    /// Options for a picker, led by the "all" entry.
    pub fn filter_options(&self, kind: FilterKind) -> Vec<FilterOption> {
        let mut options = vec![FilterOption {
            value: None,
            label: kind.all_label().to_string(),
        }];
        let entries: Vec<FilterOption> = match kind {
            FilterKind::CancerType => self
                .dataset
                .cancer_types()
                .into_iter()
                .map(|value| FilterOption {
                    label: cancer_option_label(&value),
                    value: Some(value),
                })
                .collect(),
            FilterKind::RuleType => RULE_SECTIONS
                .iter()
                .map(|section| FilterOption {
                    value: Some((*section).to_string()),
                    label: capitalize(section),
                })
                .collect(),
            FilterKind::Trial => self
                .dataset
                .trial_ids()
                .into_iter()
                .map(|value| FilterOption {
                    label: value.clone(),
                    value: Some(value),
                })
                .collect(),
            FilterKind::Drug => DRUG_CATEGORIES
                .iter()
                .map(|(key, label)| FilterOption {
                    value: Some((*key).to_string()),
                    label: (*label).to_string(),
                })
                .collect(),
        };
        options.extend(entries);
        options
    }

    /// Export the full filtered view (current order) with the visible columns.
    pub fn export(&mut self) -> Result<PathBuf> {
        let columns = self.visible_columns();
        let path = self
            .records
            .save_export(&self.dataset, &self.view.rows, &columns)?;
        self.set_status(format!(
            "Exported {} rows to {}",
            self.view.total(),
            path.display()
        ));
        Ok(path)
    }

    fn clamp_cursors(&mut self) {
        let rows = self.view.page_rows().len();
        self.selected = if rows == 0 { 0 } else { self.selected.min(rows - 1) };
        let columns = self.visible_columns().len();
        self.column_cursor = if columns == 0 {
            0
        } else {
            self.column_cursor.min(columns - 1)
        };
    }
}

fn capitalize(value: &str) -> String {
    let mut chars = value.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
