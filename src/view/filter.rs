use crate::records::fields::{CANCER_TYPE, RULE_SECTION, RULE_TEXT, TRIAL_ID};
use crate::records::{Dataset, Rule};

/// Active search text and categorical selectors. Empty values disable a predicate.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterCriteria {
    pub search: String,
    pub cancer_type: Option<String>,
    pub rule_section: Option<String>,
    pub trial_id: Option<String>,
    /// Drug-category field key, e.g. `dCh`.
    pub drug: Option<String>,
    pub unique_only: bool,
}

impl FilterCriteria {
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }

    /// Whether a single rule satisfies every active predicate.
    pub fn matches(&self, rule: &Rule) -> bool {
        let needle = self.search.to_lowercase();
        self.matches_with_needle(rule, &needle)
    }

    fn matches_with_needle(&self, rule: &Rule, needle: &str) -> bool {
        if !needle.is_empty() && !rule.text(RULE_TEXT).to_lowercase().contains(needle) {
            return false;
        }
        if !selector_matches(rule, CANCER_TYPE, self.cancer_type.as_deref()) {
            return false;
        }
        if !selector_matches(rule, RULE_SECTION, self.rule_section.as_deref()) {
            return false;
        }
        if !selector_matches(rule, TRIAL_ID, self.trial_id.as_deref()) {
            return false;
        }
        if let Some(drug) = active(self.drug.as_deref()) {
            if !rule.is_yes(drug) {
                return false;
            }
        }
        if self.unique_only && !rule.is_cluster_center() {
            return false;
        }
        true
    }
}

/// Indices of the rules that pass `criteria`, in dataset order.
pub fn filter_rules(dataset: &Dataset, criteria: &FilterCriteria) -> Vec<usize> {
    let needle = criteria.search.to_lowercase();
    dataset
        .rules()
        .iter()
        .enumerate()
        .filter(|(_, rule)| criteria.matches_with_needle(rule, &needle))
        .map(|(idx, _)| idx)
        .collect()
}

fn active(selection: Option<&str>) -> Option<&str> {
    selection.filter(|value| !value.is_empty())
}

fn selector_matches(rule: &Rule, key: &str, selection: Option<&str>) -> bool {
    match active(selection) {
        Some(expected) => rule.text(key) == expected,
        None => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dataset() -> Dataset {
        Dataset::from_json_str(
            r#"[
                {"ct":"Breast","tid":"NCT1","r":"Age >= 18","rs":"inclusion","ccr":"Age >= 18","dCh":"Yes"},
                {"ct":"Lung","tid":"NCT2","r":"Prior CHEMOTHERAPY allowed","rs":"exclusion","ccr":"Other","dCh":"No"},
                {"ct":"Breast","tid":"NCT3","r":"No prior chemotherapy","rs":"exclusion","ccr":"No prior chemotherapy","dCh":"Yes"}
            ]"#,
        )
        .expect("fixture parses")
    }

    #[test]
    fn cancer_type_filter_keeps_matching_rows_in_order() {
        let criteria = FilterCriteria {
            cancer_type: Some("Breast".to_string()),
            ..FilterCriteria::default()
        };
        assert_eq!(filter_rules(&dataset(), &criteria), vec![0, 2]);
    }

    #[test]
    fn empty_criteria_match_everything() {
        let criteria = FilterCriteria {
            cancer_type: Some(String::new()),
            ..FilterCriteria::default()
        };
        assert_eq!(filter_rules(&dataset(), &criteria), vec![0, 1, 2]);
        assert!(FilterCriteria::default().is_empty());
    }

    #[test]
    fn search_is_case_insensitive_on_rule_text() {
        let criteria = FilterCriteria {
            search: "chemo".to_string(),
            ..FilterCriteria::default()
        };
        assert_eq!(filter_rules(&dataset(), &criteria), vec![1, 2]);
    }

    #[test]
    fn predicates_combine_with_and() {
        let data = dataset();
        let criteria = FilterCriteria {
            search: "chemo".to_string(),
            rule_section: Some("exclusion".to_string()),
            drug: Some("dCh".to_string()),
            unique_only: true,
            ..FilterCriteria::default()
        };
        let hits = filter_rules(&data, &criteria);
        assert_eq!(hits, vec![2]);
        for idx in hits {
            assert!(criteria.matches(&data.rules()[idx]));
        }
    }

    #[test]
    fn unsatisfiable_conjunction_is_empty() {
        let criteria = FilterCriteria {
            cancer_type: Some("Lung".to_string()),
            trial_id: Some("NCT1".to_string()),
            ..FilterCriteria::default()
        };
        assert!(filter_rules(&dataset(), &criteria).is_empty());
    }

    #[test]
    fn unique_toggle_keeps_cluster_centers() {
        let criteria = FilterCriteria {
            unique_only: true,
            ..FilterCriteria::default()
        };
        assert_eq!(filter_rules(&dataset(), &criteria), vec![0, 2]);
    }
}
