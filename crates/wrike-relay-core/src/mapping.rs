//! Static lookup tables parsed from `key:value,key:value` configuration text.
//!
//! All three tables share the same text format:
//!
//! - pairs are separated by commas and trimmed;
//! - a pair must split on `:` into exactly two non-empty parts, anything
//!   else is skipped and reported in [`PairList::rejected`];
//! - a later duplicate key overrides an earlier one.

use std::collections::HashMap;

use crate::{FolderId, RoomId};

/// Result of splitting configuration text into pairs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PairList {
    /// Accepted `(key, value)` pairs in input order
    pub pairs: Vec<(String, String)>,

    /// Raw text of every skipped entry
    pub rejected: Vec<String>,
}

/// Split `a:b, c:d` style text into pairs.
///
/// # Examples
///
/// ```
/// use wrike_relay_core::mapping::parse_pairs;
///
/// let parsed = parse_pairs("F1:R1, broken, F2:R2");
/// assert_eq!(parsed.pairs.len(), 2);
/// assert_eq!(parsed.rejected, vec!["broken".to_string()]);
/// ```
pub fn parse_pairs(text: &str) -> PairList {
    let mut list = PairList::default();

    for entry in text.split(',') {
        let entry = entry.trim();
        if entry.is_empty() {
            continue;
        }

        let parts: Vec<&str> = entry.split(':').map(str::trim).collect();
        match parts.as_slice() {
            [key, value] if !key.is_empty() && !value.is_empty() => {
                list.pairs.push((key.to_string(), value.to_string()));
            }
            _ => list.rejected.push(entry.to_string()),
        }
    }

    list
}

/// Folder → Webex room table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FolderRoomMap {
    rooms: HashMap<FolderId, RoomId>,
    rejected: Vec<String>,
}

impl FolderRoomMap {
    /// Parse `folderId:roomId` pairs.
    pub fn parse(text: &str) -> Self {
        let parsed = parse_pairs(text);
        Self {
            rooms: parsed
                .pairs
                .into_iter()
                .map(|(folder, room)| (FolderId::from(folder), RoomId::from(room)))
                .collect(),
            rejected: parsed.rejected,
        }
    }

    pub fn get(&self, folder_id: &FolderId) -> Option<&RoomId> {
        self.rooms.get(folder_id)
    }

    pub fn len(&self) -> usize {
        self.rooms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rooms.is_empty()
    }

    /// Entries skipped while parsing.
    pub fn rejected(&self) -> &[String] {
        &self.rejected
    }
}


/// Folder → item type label table (e.g. `IEAB:Bug`).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FolderItemTypeMap {
    item_types: HashMap<FolderId, String>,
    rejected: Vec<String>,
}

impl FolderItemTypeMap {
    /// Parse `folderId:Item type` pairs.
    pub fn parse(text: &str) -> Self {
        let parsed = parse_pairs(text);
        Self {
            item_types: parsed
                .pairs
                .into_iter()
                .map(|(folder, item_type)| (FolderId::from(folder), item_type))
                .collect(),
            rejected: parsed.rejected,
        }
    }

    pub fn get(&self, folder_id: &FolderId) -> Option<&str> {
        self.item_types.get(folder_id).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.item_types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.item_types.is_empty()
    }

    pub fn rejected(&self) -> &[String] {
        &self.rejected
    }
}

/// Custom field label → field id table (e.g. `Priority:IEAAAAAJJUAAAAA`).
///
/// Labels are matched case-insensitively.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldNameMap {
    field_ids: HashMap<String, String>,
    rejected: Vec<String>,
}

impl FieldNameMap {
    /// Parse `Field name:fieldId` pairs.
    pub fn parse(text: &str) -> Self {
        let parsed = parse_pairs(text);
        Self {
            field_ids: parsed
                .pairs
                .into_iter()
                .map(|(label, id)| (label.to_lowercase(), id))
                .collect(),
            rejected: parsed.rejected,
        }
    }

    /// Field id configured for a label.
    pub fn field_id(&self, label: &str) -> Option<&str> {
        self.field_ids
            .get(&label.to_lowercase())
            .map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.field_ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.field_ids.is_empty()
    }

    pub fn rejected(&self) -> &[String] {
        &self.rejected
    }
}

#[cfg(test)]
#[path = "mapping_tests.rs"]
mod tests;
