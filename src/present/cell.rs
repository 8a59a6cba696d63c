use crate::records::fields::{is_exclusion_rate, CANCER_TYPE, FREQUENCY, RULE_SECTION, RULE_TEXT};
use crate::records::Rule;
use crate::utils::sanitize_display_text;

use super::format::{
    bar_width, fraction_percent, generic_number, humanize, rate_percent, RateTier,
};

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum BadgeTone {
    Inclusion,
    Exclusion,
    Cancer,
}

/// Display-ready content of one table cell.
#[derive(Clone, Debug, PartialEq)]
pub enum CellView {
    /// Rule text plus the untruncated text shown when the row is selected.
    RuleText { text: String, title: String },
    Badge { label: String, tone: BadgeTone },
    Percent(String),
    RateBar {
        rate: f64,
        width: f64,
        tier: RateTier,
        label: String,
    },
    Numeric(String),
    Text(String),
}

impl CellView {
    /// Plain text used for table rendering and width measurement.
    pub fn display(&self) -> &str {
        match self {
            CellView::RuleText { text, .. } => text,
            CellView::Badge { label, .. } => label,
            CellView::Percent(text) | CellView::Numeric(text) | CellView::Text(text) => text,
            CellView::RateBar { label, .. } => label,
        }
    }

    pub fn is_numeric(&self) -> bool {
        matches!(
            self,
            CellView::Percent(_) | CellView::Numeric(_) | CellView::RateBar { .. }
        )
    }
}

/// Format `rule[column]` according to the column's identity.
pub fn render_cell(rule: &Rule, column: &str) -> CellView {
    let raw = rule.text(column);

    match column {
        RULE_TEXT => {
            let text = sanitize_display_text(&raw);
            CellView::RuleText {
                title: text.clone(),
                text,
            }
        }
        RULE_SECTION => CellView::Badge {
            tone: if raw == "inclusion" {
                BadgeTone::Inclusion
            } else {
                BadgeTone::Exclusion
            },
            label: sanitize_display_text(&raw),
        },
        CANCER_TYPE => CellView::Badge {
            label: sanitize_display_text(&humanize(&raw)),
            tone: BadgeTone::Cancer,
        },
        FREQUENCY => CellView::Percent(fraction_percent(rule.number_or_zero(column))),
        key if is_exclusion_rate(key) => rate_bar(rule.number_or_zero(column)),
        _ => match rule.number(column) {
            Some(value) => CellView::Numeric(generic_number(value)),
            None => CellView::Text(sanitize_display_text(&raw)),
        },
    }
}

pub fn rate_bar(rate: f64) -> CellView {
    CellView::RateBar {
        rate,
        width: bar_width(rate),
        tier: RateTier::for_rate(rate),
        label: rate_percent(rate),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn rule() -> Rule {
        serde_json::from_value(json!({
            "ct": "Non_Small_Cell_Lung",
            "tid": "NCT0001",
            "r": "No prior\tchemotherapy",
            "rs": "exclusion",
            "of": 0.256,
            "em": "1250",
            "epm": 0.4567,
            "O": "72.3",
            "W": "bad",
            "sd": null
        }))
        .expect("rule fixture")
    }

    #[test]
    fn frequency_and_rates_render_as_percentages() {
        let r = rule();
        assert_eq!(render_cell(&r, "of"), CellView::Percent("25.6%".to_string()));
        assert_eq!(
            render_cell(&r, "O"),
            CellView::RateBar {
                rate: 72.3,
                width: 72.3,
                tier: RateTier::High,
                label: "72.3%".to_string()
            }
        );
        match render_cell(&r, "W") {
            CellView::RateBar { rate, tier, .. } => {
                assert_eq!(rate, 0.0);
                assert_eq!(tier, RateTier::Low);
            }
            other => panic!("expected rate bar, got {other:?}"),
        }
    }

    #[test]
    fn badges_classify_rule_type_and_humanize_cancer() {
        let r = rule();
        assert_eq!(
            render_cell(&r, "rs"),
            CellView::Badge {
                label: "exclusion".to_string(),
                tone: BadgeTone::Exclusion
            }
        );
        assert_eq!(render_cell(&r, "ct").display(), "Non Small Cell Lung");
    }

    #[test]
    fn generic_columns_fall_back_to_text() {
        let r = rule();
        assert_eq!(render_cell(&r, "em").display(), "1,250");
        assert_eq!(render_cell(&r, "epm").display(), "0.46");
        assert_eq!(render_cell(&r, "tid"), CellView::Text("NCT0001".to_string()));
        assert_eq!(render_cell(&r, "sd"), CellView::Text(String::new()));
    }

    #[test]
    fn rule_text_is_sanitized_and_titled() {
        match render_cell(&rule(), "r") {
            CellView::RuleText { text, title } => {
                assert_eq!(text, "No prior chemotherapy");
                assert_eq!(title, text);
            }
            other => panic!("expected rule text, got {other:?}"),
        }
    }
}
