use std::cmp::Ordering;

use icu_normalizer::DecomposingNormalizerBorrowed;

use crate::records::{Dataset, Rule};

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn flipped(self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            SortDirection::Ascending => "↑",
            SortDirection::Descending => "↓",
        }
    }
}

/// Current sort column and direction. No column means dataset order.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct SortState {
    pub column: Option<String>,
    pub direction: SortDirection,
}

impl SortState {
    pub fn by(column: impl Into<String>, direction: SortDirection) -> Self {
        Self {
            column: Some(column.into()),
            direction,
        }
    }

    /// Header click: the same column flips direction, a new column starts ascending.
    pub fn clicked(&self, column: &str) -> Self {
        if self.column.as_deref() == Some(column) {
            Self {
                column: self.column.clone(),
                direction: self.direction.flipped(),
            }
        } else {
            Self::by(column, SortDirection::Ascending)
        }
    }

    /// Indicator shown next to a header label.
    pub fn indicator(&self, column: &str) -> &'static str {
        if self.column.as_deref() == Some(column) {
            self.direction.icon()
        } else {
            "↕"
        }
    }
}

/// Compare two cells numerically when both parse as finite numbers, else as text.
pub fn compare_cells(a: &Rule, b: &Rule, column: &str) -> Ordering {
    match (a.number(column), b.number(column)) {
        (Some(x), Some(y)) => x.partial_cmp(&y).unwrap_or(Ordering::Equal),
        _ => compare_text(&a.text(column), &b.text(column)),
    }
}

/// Case-insensitive ordering with accents ignored at the first level, so `Émile`
/// sorts between `apple` and `zeta`. Strings equal after folding fall back to
/// their lowercase form, which puts unaccented letters first.
pub fn compare_text(a: &str, b: &str) -> Ordering {
    fold_text(a)
        .cmp(&fold_text(b))
        .then_with(|| a.to_lowercase().cmp(&b.to_lowercase()))
}

fn fold_text(text: &str) -> String {
    if text.is_ascii() {
        return text.to_ascii_lowercase();
    }
    DecomposingNormalizerBorrowed::new_nfd()
        .normalize(text)
        .chars()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase)
        .collect()
}

fn is_combining_mark(c: char) -> bool {
    matches!(
        c,
        '\u{0300}'..='\u{036F}'
            | '\u{1AB0}'..='\u{1AFF}'
            | '\u{1DC0}'..='\u{1DFF}'
            | '\u{20D0}'..='\u{20FF}'
            | '\u{FE20}'..='\u{FE2F}'
    )
}

/// Return `indices` reordered by `sort`. Ties keep their input order.
pub fn sort_rows(dataset: &Dataset, indices: &[usize], sort: &SortState) -> Vec<usize> {
    let mut rows = indices.to_vec();
    let Some(column) = sort.column.as_deref() else {
        return rows;
    };

    let rules = dataset.rules();
    rows.sort_by(|&a, &b| {
        let ord = compare_cells(&rules[a], &rules[b], column);
        match sort.direction {
            SortDirection::Ascending => ord,
            SortDirection::Descending => ord.reverse(),
        }
    });
    rows
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dataset(json: &str) -> Dataset {
        Dataset::from_json_str(json).expect("fixture parses")
    }

    fn column(data: &Dataset, rows: &[usize], key: &str) -> Vec<String> {
        rows.iter().map(|&i| data.rules()[i].text(key)).collect()
    }

    #[test]
    fn numeric_strings_sort_numerically() {
        let data = dataset(r#"[{"nt":"10"},{"nt":"2"},{"nt":"33"}]"#);
        let sorted = sort_rows(&data, &[0, 1, 2], &SortState::by("nt", SortDirection::Ascending));
        assert_eq!(column(&data, &sorted, "nt"), ["2", "10", "33"]);
    }

    #[test]
    fn text_sorts_case_insensitively() {
        let data = dataset(r#"[{"ct":"lung"},{"ct":"Breast"},{"ct":"colon"}]"#);
        let sorted = sort_rows(&data, &[0, 1, 2], &SortState::by("ct", SortDirection::Ascending));
        assert_eq!(column(&data, &sorted, "ct"), ["Breast", "colon", "lung"]);
    }

    #[test]
    fn accented_text_sorts_with_its_base_letter() {
        let data = dataset(r#"[{"ct":"zeta"},{"ct":"Émile"},{"ct":"apple"}]"#);
        let sorted = sort_rows(&data, &[0, 1, 2], &SortState::by("ct", SortDirection::Ascending));
        assert_eq!(column(&data, &sorted, "ct"), ["apple", "Émile", "zeta"]);
    }

    #[test]
    fn accent_only_differences_order_plain_first() {
        assert_eq!(compare_text("resume", "résumé"), Ordering::Less);
        assert_eq!(compare_text("Café", "cafe"), Ordering::Greater);
        assert_eq!(compare_text("Lung", "lung"), Ordering::Equal);
    }

    #[test]
    fn descending_reverses_strictly_ordered_keys() {
        let data = dataset(r#"[{"of":0.3},{"of":0.1},{"of":0.9},{"of":0.5}]"#);
        let all = [0, 1, 2, 3];
        let asc = sort_rows(&data, &all, &SortState::by("of", SortDirection::Ascending));
        let mut desc = sort_rows(&data, &all, &SortState::by("of", SortDirection::Descending));
        desc.reverse();
        assert_eq!(asc, desc);
    }

    #[test]
    fn ties_keep_input_order_in_both_directions() {
        let data = dataset(r#"[{"k":"1","id":"a"},{"k":"0","id":"b"},{"k":"1","id":"c"},{"k":"0","id":"d"}]"#);
        let all = [0, 1, 2, 3];
        let asc = sort_rows(&data, &all, &SortState::by("k", SortDirection::Ascending));
        assert_eq!(column(&data, &asc, "id"), ["b", "d", "a", "c"]);
        let desc = sort_rows(&data, &all, &SortState::by("k", SortDirection::Descending));
        assert_eq!(column(&data, &desc, "id"), ["a", "c", "b", "d"]);
    }

    #[test]
    fn no_column_keeps_filtered_order() {
        let data = dataset(r#"[{"k":"3"},{"k":"1"}]"#);
        assert_eq!(sort_rows(&data, &[1, 0], &SortState::default()), vec![1, 0]);
    }

    #[test]
    fn clicking_toggles_or_resets_direction() {
        let sort = SortState::default().clicked("of");
        assert_eq!(sort, SortState::by("of", SortDirection::Ascending));
        let sort = sort.clicked("of");
        assert_eq!(sort.direction, SortDirection::Descending);
        assert_eq!(sort.indicator("of"), "↓");
        assert_eq!(sort.indicator("ct"), "↕");
        let sort = sort.clicked("ct");
        assert_eq!(sort, SortState::by("ct", SortDirection::Ascending));
    }
}
