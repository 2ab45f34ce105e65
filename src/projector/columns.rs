use crate::projector::project::ProjectedItem;
use std::collections::{BTreeMap, BTreeSet};

/// Deterministic column ordering shared by every tabular renderer in a run.
///
/// Derived once per export from the union of keys across all projected items:
/// configured primary fields come first, in their configured order, restricted
/// to keys actually present; the remainder follows lexicographically. Each key
/// carries a display name from the header remapping table, falling back to
/// the raw path.
#[derive(Debug, Clone)]
pub struct ColumnOrder {
    keys: Vec<String>,
    display: BTreeMap<String, String>,
}

impl ColumnOrder {
    pub fn derive(
        items: &[ProjectedItem],
        primary_fields: &[String],
        headers: &BTreeMap<String, String>,
    ) -> Self {
        let mut remaining: BTreeSet<String> = items
            .iter()
            .flat_map(|item| item.keys().cloned())
            .collect();

        let mut keys = Vec::with_capacity(remaining.len());

        for primary in primary_fields {
            if remaining.remove(primary) {
                keys.push(primary.clone());
            }
        }

        // BTreeSet iteration is already lexicographic.
        keys.extend(remaining);

        let display = keys
            .iter()
            .map(|key| {
                let name = headers.get(key).cloned().unwrap_or_else(|| key.clone());
                (key.clone(), name)
            })
            .collect();

        Self { keys, display }
    }

    pub fn keys(&self) -> &[String] {
        &self.keys
    }

    pub fn display_name<'a>(&'a self, key: &'a str) -> &'a str {
        self.display.get(key).map(String::as_str).unwrap_or(key)
    }

    pub fn display_names(&self) -> Vec<&str> {
        self.keys.iter().map(|key| self.display_name(key)).collect()
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}
