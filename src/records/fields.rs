//! Short field keys used by the rules dataset and their display metadata.

pub const CANCER_TYPE: &str = "ct";
pub const TRIAL_ID: &str = "tid";
pub const RULE_TEXT: &str = "r";
pub const RULE_SECTION: &str = "rs";
pub const CLUSTER_ID: &str = "cid";
pub const CLUSTER_CENTER: &str = "ccr";
pub const FREQUENCY: &str = "of";
pub const TRIAL_COUNT: &str = "nt";
pub const ENROLLMENT_MEAN: &str = "em";
pub const DURATION_MEAN: &str = "rm";
pub const DURATION_STD: &str = "rms";
pub const EPSM_MEAN: &str = "epm";
pub const EPSM_STD: &str = "eps";

/// Key/label pairs for every known column, in the order they are documented.
pub const COLUMN_LABELS: &[(&str, &str)] = &[
    ("ct", "Cancer Type"),
    ("tid", "Trial ID"),
    ("r", "Rule Text"),
    ("rs", "Rule Type"),
    ("cid", "Cluster"),
    ("ccr", "Cluster Center"),
    ("of", "Frequency"),
    ("nt", "# Trials"),
    ("em", "Enroll (mean)"),
    ("es", "Enroll (std)"),
    ("sm", "Sites (mean)"),
    ("ss", "Sites (std)"),
    ("rm", "Duration (mean)"),
    ("rms", "Duration (std)"),
    ("epm", "EPSM (mean)"),
    ("eps", "EPSM (std)"),
    ("sd", "Start Date"),
    ("sds", "Start (std)"),
    ("O", "Overall Exclusion%"),
    ("W", "White %"),
    ("A", "Asian %"),
    ("AA", "African-American %"),
    ("F", "Female %"),
    ("M", "Male %"),
    ("a1", "18-50 %"),
    ("a2", "50-65 %"),
    ("a3", ">65 %"),
];

/// Exclusion-rate columns paired with the short group label used in charts.
pub const EXCLUSION_RATES: &[(&str, &str)] = &[
    ("O", "Overall"),
    ("W", "White"),
    ("A", "Asian"),
    ("AA", "African-American"),
    ("F", "Female"),
    ("M", "Male"),
    ("a1", "18-50"),
    ("a2", "50-65"),
    ("a3", ">65"),
];

/// Drug intervention category flags. A flag is set when the field equals `Yes`.
pub const DRUG_CATEGORIES: &[(&str, &str)] = &[
    ("dCh", "Chemotherapy"),
    ("dTa", "Targeted Therapy"),
    ("dIm", "Immunotherapy / Biological Therapy"),
    ("dHo", "Hormonal Therapy"),
    ("dPh", "Photodynamic Therapy"),
    ("dSu", "Supportive Care"),
    ("dPl", "Placebo"),
];

pub const RULE_SECTIONS: &[&str] = &["inclusion", "exclusion"];

/// Semantic groups shown in the column-visibility panel.
pub const COLUMN_GROUPS: &[(&str, &[&str])] = &[
    ("Basic Info", &["ct", "tid", "r", "rs", "cid", "ccr"]),
    (
        "Historical Stats",
        &[
            "of", "nt", "em", "es", "sm", "ss", "rm", "rms", "epm", "eps", "sd", "sds",
        ],
    ),
    (
        "Exclusion Rates",
        &["O", "W", "A", "AA", "F", "M", "a1", "a2", "a3"],
    ),
];

pub const DEFAULT_VISIBLE_COLUMNS: &[&str] = &[
    "ct", "tid", "r", "rs", "of", "em", "epm", "O", "W", "A", "AA", "F", "M", "a1", "a2", "a3",
];

/// One-line descriptions surfaced by the help overlay.
pub const COLUMN_DESCRIPTIONS: &[(&str, &str)] = &[
    ("ct", "Cancer indication associated with the clinical trial."),
    ("tid", "ClinicalTrials.gov identifier (NCT ID) of the trial the rule appears in."),
    ("r", "Normalized eligibility criterion text extracted from trial protocols."),
    ("rs", "Whether the criterion is an inclusion or exclusion rule."),
    ("cid", "Identifier of the semantic cluster grouping highly similar criteria."),
    ("ccr", "Representative rule text for the cluster, chosen by embedding similarity."),
    ("of", "Proportion of historical trials in which this rule appears."),
    ("nt", "Number of unique clinical trials containing this rule."),
    ("em", "Mean patient enrollment across trials that include this rule."),
    ("es", "Standard deviation of patient enrollment across those trials."),
    ("sm", "Mean number of recruiting sites across trials that include this rule."),
    ("ss", "Standard deviation of the number of recruiting sites."),
    ("rm", "Mean recruitment duration in months."),
    ("rms", "Standard deviation of recruitment duration in months."),
    ("epm", "Mean enrollment per site per month (EPSM), a recruitment efficiency metric."),
    ("eps", "Standard deviation of EPSM across trials that include this rule."),
    ("sd", "Mean trial start year."),
    ("sds", "Standard deviation of trial start year."),
    ("O", "Estimated share of the overall real-world cohort excluded by this rule."),
    ("W", "Estimated exclusion rate among White patients."),
    ("A", "Estimated exclusion rate among Asian patients."),
    ("AA", "Estimated exclusion rate among African-American patients."),
    ("F", "Estimated exclusion rate among female patients."),
    ("M", "Estimated exclusion rate among male patients."),
    ("a1", "Estimated exclusion rate among patients aged 18 to 50."),
    ("a2", "Estimated exclusion rate among patients aged 50 to 65."),
    ("a3", "Estimated exclusion rate among patients older than 65."),
];

/// Display label for a column key, falling back to the key itself.
pub fn column_label(key: &str) -> &str {
    COLUMN_LABELS
        .iter()
        .find(|(known, _)| *known == key)
        .map(|(_, label)| *label)
        .unwrap_or(key)
}

pub fn is_exclusion_rate(key: &str) -> bool {
    EXCLUSION_RATES.iter().any(|(known, _)| *known == key)
}

pub fn drug_label(key: &str) -> Option<&'static str> {
    DRUG_CATEGORIES
        .iter()
        .find(|(known, _)| *known == key)
        .map(|(_, label)| *label)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_columns_use_their_key_as_label() {
        assert_eq!(column_label("of"), "Frequency");
        assert_eq!(column_label("custom_field"), "custom_field");
    }

    #[test]
    fn every_grouped_column_has_a_label_and_description() {
        for (_, keys) in COLUMN_GROUPS {
            for key in *keys {
                assert_ne!(column_label(key), *key, "missing label for `{key}`");
                assert!(
                    COLUMN_DESCRIPTIONS.iter().any(|(k, _)| k == key),
                    "missing description for `{key}`"
                );
            }
        }
    }
}
