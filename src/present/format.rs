//! Number and text formatting shared by table cells, the detail overlay and the header.

/// Color band for an exclusion rate.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum RateTier {
    Low,
    Medium,
    High,
}

impl RateTier {
    pub fn for_rate(rate: f64) -> Self {
        if rate < 30.0 {
            RateTier::Low
        } else if rate < 60.0 {
            RateTier::Medium
        } else {
            RateTier::High
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            RateTier::Low => "low",
            RateTier::Medium => "medium",
            RateTier::High => "high",
        }
    }
}

/// Render a [0,1] fraction as a one-decimal percentage: `0.256` → `25.6%`.
pub fn fraction_percent(fraction: f64) -> String {
    format!("{:.1}%", fraction * 100.0)
}

/// Render a [0,100] rate with one decimal: `72.3` → `72.3%`.
pub fn rate_percent(rate: f64) -> String {
    format!("{rate:.1}%")
}

/// Width of a percent bar, capped at 100.
pub fn bar_width(rate: f64) -> f64 {
    rate.min(100.0)
}

/// Integer with `,` grouping: `1234567` → `1,234,567`.
pub fn group_thousands(value: i64) -> String {
    group_digits(&value.unsigned_abs().to_string(), value < 0)
}

fn group_digits(digits: &str, negative: bool) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if negative {
        grouped.push('-');
    }
    for (idx, ch) in digits.chars().enumerate() {
        if idx > 0 && (digits.len() - idx) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}

pub fn group_count(count: usize) -> String {
    group_thousands(i64::try_from(count).unwrap_or(i64::MAX))
}

/// Integers get grouping separators, anything else two decimals.
pub fn generic_number(value: f64) -> String {
    if value.fract() == 0.0 {
        group_digits(&format!("{:.0}", value.abs()), value < 0.0)
    } else {
        format!("{value:.2}")
    }
}

/// Underscored identifiers read better with spaces: `Non_Small_Cell` → `Non Small Cell`.
pub fn humanize(value: &str) -> String {
    value.replace('_', " ")
}
