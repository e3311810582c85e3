//! Description resolution and grouping of callout records.

use std::collections::HashMap;

use crate::model::{AbbreviationMap, GroupedItem, ItemRecord};

/// Fill `description` for every record that carries a code.
///
/// Codes missing from `mapping` resolve to an empty description.
pub fn resolve_descriptions(records: &mut [ItemRecord], mapping: &AbbreviationMap) {
    for record in records.iter_mut() {
        if let Some(ref code) = record.code {
            record.description = Some(mapping.get(code).cloned().unwrap_or_default());
        }
    }
}

/// Fold records sharing `(page, callout)` into counted groups.
///
/// Groups keep the field values of their first record and come out in
/// first-seen order. Records with the same key but a different dimension
/// or code are still merged.
pub fn group_and_count(records: Vec<ItemRecord>) -> Vec<GroupedItem> {
    let mut index: HashMap<(u32, String), usize> = HashMap::new();
    let mut groups: Vec<GroupedItem> = Vec::new();

    for record in records {
        let key = (record.page, record.callout.clone());
        let slot = *index.entry(key).or_insert_with(|| {
            groups.push(GroupedItem::start(record.clone()));
            groups.len() - 1
        });
        groups[slot].quantity += 1;
    }

    groups
}

/// Resolve descriptions, then group.
pub fn aggregate(mut records: Vec<ItemRecord>, mapping: &AbbreviationMap) -> Vec<GroupedItem> {
    resolve_descriptions(&mut records, mapping);
    let groups = group_and_count(records);
    log::debug!("Aggregated into {} items", groups.len());
    groups
}
