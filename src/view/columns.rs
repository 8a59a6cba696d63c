use std::collections::BTreeSet;

use crate::records::fields::{column_label, COLUMN_GROUPS, DEFAULT_VISIBLE_COLUMNS};

/// Session-scoped set of visible column keys.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ColumnVisibility {
    visible: BTreeSet<String>,
}

impl Default for ColumnVisibility {
    fn default() -> Self {
        Self::from_keys(DEFAULT_VISIBLE_COLUMNS.iter().copied())
    }
}

impl ColumnVisibility {
    pub fn from_keys<I, S>(keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            visible: keys.into_iter().map(Into::into).collect(),
        }
    }

    pub fn is_visible(&self, key: &str) -> bool {
        self.visible.contains(key)
    }

    /// Copy of the set with `key` flipped.
    pub fn toggled(&self, key: &str) -> Self {
        let mut visible = self.visible.clone();
        if !visible.remove(key) {
            visible.insert(key.to_string());
        }
        Self { visible }
    }

    /// Visible keys in schema order.
    pub fn ordered<'a>(&self, schema: &'a [String]) -> Vec<&'a str> {
        schema
            .iter()
            .map(String::as_str)
            .filter(|key| self.is_visible(key))
            .collect()
    }
}

/// A toggle entry in the column panel.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ColumnToggle {
    pub key: String,
    pub label: String,
    pub visible: bool,
}

/// A titled group of toggles.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ColumnGroup {
    pub title: &'static str,
    pub columns: Vec<ColumnToggle>,
}

/// Build the column panel, skipping columns the dataset does not carry and empty groups.
pub fn column_groups(schema: &[String], visibility: &ColumnVisibility) -> Vec<ColumnGroup> {
    COLUMN_GROUPS
        .iter()
        .filter_map(|&(title, keys)| {
            let columns: Vec<ColumnToggle> = keys
                .iter()
                .copied()
                .filter(|key| schema.iter().any(|column| column == key))
                .map(|key| ColumnToggle {
                    key: (*key).to_string(),
                    label: column_label(key).to_string(),
                    visible: visibility.is_visible(key),
                })
                .collect();
            if columns.is_empty() {
                None
            } else {
                Some(ColumnGroup { title, columns })
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn schema(keys: &[&str]) -> Vec<String> {
        keys.iter().map(|k| k.to_string()).collect()
    }

    #[test]
    fn ordered_follows_schema_not_insertion() {
        let visibility = ColumnVisibility::from_keys(["O", "ct", "r"]);
        let schema = schema(&["ct", "tid", "r", "O"]);
        assert_eq!(visibility.ordered(&schema), vec!["ct", "r", "O"]);
    }

    #[test]
    fn toggling_twice_restores_the_set() {
        let visibility = ColumnVisibility::default();
        let hidden = visibility.toggled("ct");
        assert!(!hidden.is_visible("ct"));
        assert_eq!(hidden.toggled("ct"), visibility);
    }

    #[test]
    fn groups_only_list_present_columns() {
        let schema = schema(&["ct", "r", "O", "W"]);
        let groups = column_groups(&schema, &ColumnVisibility::default());
        let titles: Vec<_> = groups.iter().map(|g| g.title).collect();
        assert_eq!(titles, vec!["Basic Info", "Exclusion Rates"]);
        assert_eq!(groups[0].columns.len(), 2);
        assert!(groups[1].columns.iter().all(|c| c.visible));
    }
}
