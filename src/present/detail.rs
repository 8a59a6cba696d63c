use crate::records::fields::{
    CANCER_TYPE, DRUG_CATEGORIES, DURATION_MEAN, DURATION_STD, ENROLLMENT_MEAN, EPSM_MEAN,
    EPSM_STD, EXCLUSION_RATES, FREQUENCY, RULE_SECTION, RULE_TEXT, TRIAL_COUNT, TRIAL_ID,
};
use crate::records::Rule;
use crate::utils::sanitize_display_text;

use super::format::{bar_width, fraction_percent, humanize, rate_percent, RateTier};

pub const NOT_AVAILABLE: &str = "N/A";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DetailField {
    pub label: &'static str,
    pub value: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DrugFlag {
    pub label: &'static str,
    pub enabled: bool,
}

impl DrugFlag {
    pub fn badge(&self) -> &'static str {
        if self.enabled {
            "Yes"
        } else {
            "No"
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct RateBarItem {
    pub label: &'static str,
    pub rate: f64,
    pub width: f64,
    pub tier: RateTier,
    pub value: String,
}

/// Everything the detail overlay shows for one rule.
#[derive(Clone, Debug, PartialEq)]
pub struct RuleDetail {
    pub rule_text: String,
    pub fields: Vec<DetailField>,
    pub drugs: Vec<DrugFlag>,
    pub exclusion_rates: Vec<RateBarItem>,
}

impl RuleDetail {
    pub fn field(&self, label: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|field| field.label == label)
            .map(|field| field.value.as_str())
    }
}

pub fn rule_detail(rule: &Rule) -> RuleDetail {
    let trials = match rule.number(TRIAL_COUNT) {
        Some(count) if count != 0.0 => rule.text(TRIAL_COUNT),
        _ => NOT_AVAILABLE.to_string(),
    };
    let enrollment = rule
        .number(ENROLLMENT_MEAN)
        .map(|mean| format!("{mean:.0}"))
        .unwrap_or_else(|| NOT_AVAILABLE.to_string());

    let fields = vec![
        DetailField {
            label: "Cancer Type",
            value: sanitize_display_text(&humanize(&rule.text(CANCER_TYPE))),
        },
        DetailField {
            label: "Trial ID",
            value: sanitize_display_text(&rule.text(TRIAL_ID)),
        },
        DetailField {
            label: "Rule Type",
            value: sanitize_display_text(&rule.text(RULE_SECTION)),
        },
        DetailField {
            label: "Frequency",
            value: fraction_percent(rule.number_or_zero(FREQUENCY)),
        },
        DetailField {
            label: "# Trials",
            value: trials,
        },
        DetailField {
            label: "Avg Enrollment",
            value: enrollment,
        },
        DetailField {
            label: "Recruitment Duration (months)",
            value: mean_std(rule, DURATION_MEAN, DURATION_STD, 1),
        },
        DetailField {
            label: "EPSM (mean ± std)",
            value: mean_std(rule, EPSM_MEAN, EPSM_STD, 2),
        },
    ];

    let drugs = DRUG_CATEGORIES
        .iter()
        .map(|&(key, label)| DrugFlag {
            label,
            enabled: rule.is_yes(key),
        })
        .collect();

    let exclusion_rates = EXCLUSION_RATES
        .iter()
        .map(|&(key, label)| {
            let rate = rule.number_or_zero(key);
            RateBarItem {
                label,
                rate,
                width: bar_width(rate),
                tier: RateTier::for_rate(rate),
                value: rate_percent(rate),
            }
        })
        .collect();

    RuleDetail {
        rule_text: sanitize_display_text(&rule.text(RULE_TEXT)),
        fields,
        drugs,
        exclusion_rates,
    }
}

/// `mean ± std` with `decimals` places. A missing or zero mean is `N/A` as a whole;
/// a missing std is `N/A` on its own side.
fn mean_std(rule: &Rule, mean_key: &str, std_key: &str, decimals: usize) -> String {
    let Some(mean) = rule.number(mean_key).filter(|mean| *mean != 0.0) else {
        return NOT_AVAILABLE.to_string();
    };
    let std = rule
        .number(std_key)
        .map(|std| format!("{std:.decimals$}"))
        .unwrap_or_else(|| NOT_AVAILABLE.to_string());
    format!("{mean:.decimals$} ± {std}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn rule(value: serde_json::Value) -> Rule {
        serde_json::from_value(value).expect("rule fixture")
    }

    #[test]
    fn detail_formats_mean_std_pairs() {
        let detail = rule_detail(&rule(json!({
            "ct": "Breast_Cancer", "tid": "NCT9", "r": "Age >= 18", "rs": "inclusion",
            "of": 0.5, "nt": 12, "em": 240.6,
            "rm": 18.26, "rms": 4, "epm": 0.3333, "eps": "0.1"
        })));

        assert_eq!(detail.rule_text, "Age >= 18");
        assert_eq!(detail.field("Cancer Type"), Some("Breast Cancer"));
        assert_eq!(detail.field("Frequency"), Some("50.0%"));
        assert_eq!(detail.field("# Trials"), Some("12"));
        assert_eq!(detail.field("Avg Enrollment"), Some("241"));
        assert_eq!(detail.field("Recruitment Duration (months)"), Some("18.3 ± 4.0"));
        assert_eq!(detail.field("EPSM (mean ± std)"), Some("0.33 ± 0.10"));
    }

    #[test]
    fn missing_statistics_render_as_not_available() {
        let detail = rule_detail(&rule(json!({"r": "x", "rm": "", "epm": 1.5})));
        assert_eq!(detail.field("# Trials"), Some("N/A"));
        assert_eq!(detail.field("Avg Enrollment"), Some("N/A"));
        assert_eq!(detail.field("Recruitment Duration (months)"), Some("N/A"));
        assert_eq!(detail.field("EPSM (mean ± std)"), Some("1.50 ± N/A"));
    }

    #[test]
    fn zero_means_render_as_not_available() {
        let detail = rule_detail(&rule(json!({"rm": 0, "rms": 1, "epm": "0", "eps": "0"})));
        assert_eq!(detail.field("Recruitment Duration (months)"), Some("N/A"));
        assert_eq!(detail.field("EPSM (mean ± std)"), Some("N/A"));
    }

    #[test]
    fn drug_grid_and_rate_chart_cover_every_category() {
        let detail = rule_detail(&rule(json!({"dCh": "Yes", "dPl": "no", "O": 65, "a3": "12.5"})));

        assert_eq!(detail.drugs.len(), 7);
        assert_eq!(detail.drugs[0].badge(), "Yes");
        assert!(detail.drugs[1..].iter().all(|flag| !flag.enabled));

        assert_eq!(detail.exclusion_rates.len(), 9);
        assert_eq!(detail.exclusion_rates[0].tier, RateTier::High);
        assert_eq!(detail.exclusion_rates[8].value, "12.5%");
        assert_eq!(detail.exclusion_rates[1].value, "0.0%");
    }
}
