//! Library (MDATA13), hall of records (MDATA14) and confinement (MDATA15)

use serde::{Deserialize, Serialize};

use super::MordorFile;
use crate::schema::FileKind;

/// What the player has learned about one monster or item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LibraryRecord {
    pub id: i16,
    pub knowledge_level: i16,
    pub times_encountered: i32,
    pub times_defeated: i32,
    pub first_seen: f32,
    pub name: String,
    pub attributes: Vec<i16>,
    pub reserved: Vec<u8>,
}

/// MDATA13: the library, one record per catalog monster and item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LibraryFile {
    pub version: String,
    pub total_monsters: i16,
    pub total_items: i16,
    pub monsters_found: i16,
    pub items_found: i16,
    pub monsters: Vec<LibraryRecord>,
    pub items: Vec<LibraryRecord>,
}

impl MordorFile for LibraryFile {
    const KIND: FileKind = FileKind::Library;
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HallRecord {
    pub holder_name: String,
    pub value: i64,
    pub guild: i16,
    pub race: i16,
    pub level: i16,
    pub reserved: Vec<u8>,
}

/// MDATA14: the hall of records; the file has no header
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HallOfRecordsFile {
    pub records: Vec<HallRecord>,
}

impl MordorFile for HallOfRecordsFile {
    const KIND: FileKind = FileKind::HallOfRecords;
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfinedMonster {
    pub monster_id: i16,
    pub quantity: i16,
    pub capture_level: i16,
    pub alignment: i16,
    pub price: i64,
}

/// MDATA15: monsters held for sale in confinement
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfinementFile {
    pub version: String,
    pub unused: i16,
    pub total_records: i16,
    pub monsters: Vec<ConfinedMonster>,
}

impl MordorFile for ConfinementFile {
    const KIND: FileKind = FileKind::Confinement;
}
