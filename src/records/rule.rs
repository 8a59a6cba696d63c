use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::fields::{CLUSTER_CENTER, RULE_TEXT};

/// One eligibility-criterion record: a flat, ordered map of short keys to scalars.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Rule {
    fields: Map<String, Value>,
}

impl Rule {
    pub fn new(fields: Map<String, Value>) -> Self {
        Self { fields }
    }

    /// Field keys in record order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    pub fn raw(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    /// String form of a field; missing and null fields become the empty string.
    pub fn text(&self, key: &str) -> String {
        self.raw(key).map(value_to_string).unwrap_or_default()
    }

    /// Parse a field as a finite number, if it is one.
    pub fn number(&self, key: &str) -> Option<f64> {
        self.raw(key).and_then(value_to_number)
    }

    /// Lenient numeric read used for rates and frequencies.
    pub fn number_or_zero(&self, key: &str) -> f64 {
        self.number(key).unwrap_or(0.0)
    }

    pub fn is_yes(&self, key: &str) -> bool {
        self.text(key) == "Yes"
    }

    /// A rule is the representative of its cluster when its text equals the cluster center.
    pub fn is_cluster_center(&self) -> bool {
        self.text(RULE_TEXT) == self.text(CLUSTER_CENTER)
    }
}

pub fn value_to_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

pub fn value_to_number(value: &Value) -> Option<f64> {
    let parsed = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => parse_leading_number(s),
        _ => None,
    };
    parsed.filter(|n| n.is_finite())
}

/// Parse the longest numeric prefix of `text`, so `"12.5 months"` reads as 12.5.
pub fn parse_leading_number(text: &str) -> Option<f64> {
    let trimmed = text.trim_start();
    let bytes = trimmed.as_bytes();
    let mut end = 0;
    let mut seen_digit = false;
    let mut seen_dot = false;
    let mut seen_exp = false;

    while end < bytes.len() {
        let b = bytes[end];
        match b {
            b'0'..=b'9' => seen_digit = true,
            b'+' | b'-' if end == 0 => {}
            b'+' | b'-' if seen_exp && matches!(bytes[end - 1], b'e' | b'E') => {}
            b'.' if !seen_dot && !seen_exp => seen_dot = true,
            b'e' | b'E' if seen_digit && !seen_exp => seen_exp = true,
            _ => break,
        }
        end += 1;
    }

    // Back off a dangling exponent marker or sign, e.g. "3e" or "3e-".
    let mut candidate = &trimmed[..end];
    while let Some(last) = candidate.chars().last() {
        if matches!(last, 'e' | 'E' | '+' | '-') {
            candidate = &candidate[..candidate.len() - 1];
        } else {
            break;
        }
    }

    if !seen_digit {
        return None;
    }
    candidate.parse::<f64>().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn rule(value: Value) -> Rule {
        serde_json::from_value(value).expect("rule object")
    }

    #[test]
    fn reads_numbers_from_strings_and_json_numbers() {
        let r = rule(json!({"of": 0.25, "em": "120", "O": "n/a", "sd": "2015.5 yrs"}));
        assert_eq!(r.number("of"), Some(0.25));
        assert_eq!(r.number("em"), Some(120.0));
        assert_eq!(r.number("O"), None);
        assert_eq!(r.number_or_zero("O"), 0.0);
        assert_eq!(r.number("sd"), Some(2015.5));
        assert_eq!(r.number("missing"), None);
    }

    #[test]
    fn leading_number_parser_rejects_non_numeric_prefixes() {
        assert_eq!(parse_leading_number("-3.5"), Some(-3.5));
        assert_eq!(parse_leading_number("1e3"), Some(1000.0));
        assert_eq!(parse_leading_number("7e"), Some(7.0));
        assert_eq!(parse_leading_number("abc"), None);
        assert_eq!(parse_leading_number(""), None);
        assert_eq!(parse_leading_number("."), None);
    }

    #[test]
    fn cluster_center_compares_rule_text() {
        let center = rule(json!({"r": "Age >= 18", "ccr": "Age >= 18"}));
        let member = rule(json!({"r": "Adults only", "ccr": "Age >= 18"}));
        assert!(center.is_cluster_center());
        assert!(!member.is_cluster_center());
    }

    #[test]
    fn keys_keep_record_order() {
        let r = rule(json!({"tid": "NCT1", "ct": "Breast", "r": "x"}));
        assert_eq!(r.keys().collect::<Vec<_>>(), vec!["tid", "ct", "r"]);
    }
}
