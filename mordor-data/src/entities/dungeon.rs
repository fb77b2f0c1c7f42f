//! Automap (MDATA8), dungeon state (MDATA10) and dungeon map (MDATA11)

use serde::{Deserialize, Serialize};

use super::MordorFile;
use crate::schema::FileKind;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AutomapFloor {
    pub level: i16,
    pub squares_mapped: i16,
    pub width: i16,
    pub height: i16,
    pub flags: i16,
}

/// MDATA8: exploration progress per floor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AutomapFile {
    pub version: String,
    pub deepest_level: i16,
    pub floors: Vec<AutomapFloor>,
}

impl MordorFile for AutomapFile {
    const KIND: FileKind = FileKind::Automap;
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AreaSpawn {
    pub level: i16,
    pub area: i16,
    pub x: i16,
    pub y: i16,
    pub monster_id: i16,
    pub monster_count: i16,
    pub group_id: i16,
    pub hostile: i16,
    pub respawn_timer: f32,
    pub flags: i32,
    pub reserved: Vec<u8>,
}

/// MDATA10: live monster spawns
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DungeonStateFile {
    pub level_count: i16,
    /// Spawns in use on each floor
    pub spawn_counts: Vec<i16>,
    pub area_spawns: Vec<AreaSpawn>,
}

impl MordorFile for DungeonStateFile {
    const KIND: FileKind = FileKind::DungeonState;
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DungeonFloor {
    pub level: i16,
    pub width: i16,
    pub height: i16,
    pub area_count: i16,
    pub teleporter_count: i16,
    pub chute_count: i16,
    pub first_square: i32,
    pub square_count: i32,
}

/// MDATA11: floor directory of the dungeon map
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DungeonMapFile {
    pub floor_count: i16,
    pub floor_offsets: Vec<i16>,
    pub floors: Vec<DungeonFloor>,
}

impl MordorFile for DungeonMapFile {
    const KIND: FileKind = FileKind::DungeonMap;
}
