use crate::projector::path::resolve;
use serde_json::Value;
use std::collections::BTreeMap;

/// Flat field-path -> value view of one record, restricted to a selection.
///
/// Keys are the literal dotted paths. A BTreeMap keeps iteration
/// deterministic for any renderer that materializes key order before the
/// shared column order is applied. Never mutated after creation.
pub type ProjectedItem = BTreeMap<String, Value>;

/// Project a record onto the selected field paths.
///
/// Every selected path gets an entry; unresolved paths degrade to the empty
/// string rather than being omitted, so the key set depends only on the
/// selection, not on the record's shape.
pub fn project_record(record: &Value, selected_paths: &[String]) -> ProjectedItem {
    let mut item = ProjectedItem::new();

    for path in selected_paths {
        item.insert(path.clone(), resolve(record, path));
    }

    item
}
