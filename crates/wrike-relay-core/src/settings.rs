//! Read-only lookup tables injected into the relay.

use crate::catalog::Catalogs;
use crate::fields::{FieldBindings, PriorityVocabulary};
use crate::mapping::{FolderItemTypeMap, FolderRoomMap};

/// Everything the pipeline needs besides the two platform clients.
///
/// Built once at start-up and shared behind an `Arc`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RelaySettings {
    pub rooms: FolderRoomMap,
    pub item_types: FolderItemTypeMap,
    pub fields: FieldBindings,
    pub vocabulary: PriorityVocabulary,
    pub catalogs: Catalogs,
}

impl RelaySettings {
    pub fn new(rooms: FolderRoomMap) -> Self {
        Self {
            rooms,
            ..Self::default()
        }
    }

    pub fn with_item_types(mut self, item_types: FolderItemTypeMap) -> Self {
        self.item_types = item_types;
        self
    }

    pub fn with_fields(mut self, fields: FieldBindings) -> Self {
        self.fields = fields;
        self
    }

    pub fn with_vocabulary(mut self, vocabulary: PriorityVocabulary) -> Self {
        self.vocabulary = vocabulary;
        self
    }

    pub fn with_catalogs(mut self, catalogs: Catalogs) -> Self {
        self.catalogs = catalogs;
        self
    }
}
