//! Item catalog (MDATA3), monster catalog (MDATA5) and general store (MDATA6)

use serde::{Deserialize, Serialize};

use super::MordorFile;
use crate::schema::FileKind;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub name: String,
    pub id: i16,
    pub attack: i16,
    pub defense: i16,
    pub price: i32,
    /// Shallowest floor the item drops on
    pub floor: i16,
    pub rarity: i16,
    pub abilities: i32,
    pub swings: i16,
    pub special_type: i16,
    pub spell_index: i16,
    pub spell_id: i16,
    pub charges: i32,
    /// Guilds allowed to use the item, one bit per guild
    pub guilds: i32,
    pub level_scale: i16,
    pub damage_mod: f32,
    pub alignment_flags: i32,
    pub hands: i16,
    pub item_type: i16,
    pub resistance_flags: i32,
    pub stats_required: Vec<i16>,
    pub stats_modifier: Vec<i16>,
    pub cursed: i16,
    pub spell_level: i16,
    pub class_restricted: i16,
}

/// MDATA3: the item catalog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemsFile {
    pub version: String,
    pub store_code: i16,
    pub count: i16,
    pub items: Vec<Item>,
}

impl MordorFile for ItemsFile {
    const KIND: FileKind = FileKind::Items;
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Monster {
    pub name: String,
    pub attack: i16,
    pub defense: i16,
    pub id: i16,
    pub hits: i16,
    pub num_groups: i16,
    pub picture_id: i16,
    pub locked_chance: i16,
    pub level_found: i16,
    pub resistances: Vec<i16>,
    pub special_properties: i32,
    pub special_attacks: i32,
    pub spell_flags: i32,
    pub chance: i16,
    /// Chest, chest-and-box, box and nothing odds
    pub box_chance: Vec<i16>,
    pub alignment: i16,
    pub in_group: i16,
    pub gold_factor: i32,
    pub trap_flags: i32,
    pub guild_level: i16,
    pub stats: Vec<i16>,
    pub monster_type: i16,
    pub damage_mod: f32,
    pub companion_type: i16,
    pub companion_spawn_mode: i16,
    pub companion_id: i16,
    /// Item ids the monster can carry
    pub items: Vec<i16>,
    pub subtype: i16,
    pub companion_subtype: i16,
    pub deleted: i16,
}

/// MDATA5: the monster catalog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonstersFile {
    pub version: String,
    pub unused: i16,
    pub count: i16,
    pub monsters: Vec<Monster>,
}

impl MordorFile for MonstersFile {
    const KIND: FileKind = FileKind::Monsters;
}

/// Stock of one catalog item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoreItem {
    pub item_id: i16,
    pub stock: i16,
    pub max_stock: i16,
    pub restock_rate: i16,
    pub price: i64,
}

/// MDATA6: the general store, one entry per catalog item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneralStoreFile {
    pub version: String,
    pub unused: i16,
    pub all_items_count: i16,
    pub items: Vec<StoreItem>,
}

impl MordorFile for GeneralStoreFile {
    const KIND: FileKind = FileKind::GeneralStore;
}
