//! Destination room selection.

use crate::mapping::FolderRoomMap;
use crate::{FolderId, RoomId};

/// First parent folder, in the task's order, that maps to a room.
///
/// `None` means the event has no destination.
pub fn route(parent_ids: &[String], rooms: &FolderRoomMap) -> Option<(FolderId, RoomId)> {
    parent_ids.iter().find_map(|parent| {
        let folder = FolderId::from(parent.as_str());
        rooms.get(&folder).cloned().map(|room| (folder, room))
    })
}

#[cfg(test)]
#[path = "routing_tests.rs"]
mod tests;
