/// Central routing types for the TUI flows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiRoute {
    Browser,
    Search,
    Picker,
    Columns,
    Detail,
    Help,
}

impl UiRoute {
    /// Human readable label used by headers and logs.
    pub fn title(self) -> &'static str {
        match self {
            UiRoute::Browser => "Eligibility Criteria",
            UiRoute::Search => "Search Rules",
            UiRoute::Picker => "Filter",
            UiRoute::Columns => "Visible Columns",
            UiRoute::Detail => "Rule Details",
            UiRoute::Help => "Help",
        }
    }
}
