//! Game definitions (MDATA1) and spells (MDATA2)

use serde::{Deserialize, Serialize};

use super::MordorFile;
use crate::schema::FileKind;

/// A playable race
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Race {
    pub name: String,
    pub min_stats: Vec<i16>,
    pub max_stats: Vec<i16>,
    pub resistances: Vec<i16>,
    /// Allowed alignments as a bit mask
    pub alignment: i32,
    pub size: i16,
    pub bonus_points: i16,
    pub max_age: i16,
    pub exp_factor: f32,
}

/// A guild definition
///
/// Several fields are not understood yet and keep their positional names.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Guild {
    pub name: String,
    pub average_hits: i16,
    pub max_level: i16,
    pub max_hits: i16,
    pub exp_factor: f32,
    pub unknown_3: i16,
    pub required_stats: Vec<i16>,
    pub alignment: i32,
    pub ability_rates: Vec<f32>,
    pub unknown_7: i16,
    pub unknown_8: f32,
    pub quest_percentage: i16,
    pub spell_table: Vec<f32>,
    /// Races allowed to join, one bit per race
    pub race_mask: i32,
    pub unknown_12: i16,
    pub level_mod: f32,
    pub unknown_13: f32,
    pub unknown_14: f32,
    pub unknown_15: i16,
    pub unknown_16: f32,
    pub unknown_17: i16,
    pub unknown_18: i16,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemSubtype {
    pub name: String,
    pub item_type: i16,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemType {
    pub name: String,
    pub is_equipable: i16,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonsterSubtype {
    pub name: String,
    pub monster_type: i16,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonsterType {
    pub name: String,
    pub not_used: i16,
}

/// MDATA1: races, guilds and the item/monster type catalogs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameDataFile {
    pub version: String,
    pub num_races: i16,
    pub num_guilds: i16,
    pub num_item_subtypes: i16,
    pub num_item_types: i16,
    pub num_monster_subtypes: i16,
    pub num_monster_types: i16,
    pub races: Vec<Race>,
    pub guilds: Vec<Guild>,
    pub item_subtypes: Vec<ItemSubtype>,
    pub item_types: Vec<ItemType>,
    pub monster_subtypes: Vec<MonsterSubtype>,
    pub monster_types: Vec<MonsterType>,
}

impl MordorFile for GameDataFile {
    const KIND: FileKind = FileKind::GameData;
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Spell {
    pub name: String,
    pub id: i16,
    pub category: i16,
    pub level: i16,
    pub unknown_4: i16,
    pub kill_effect: i16,
    pub affect_monster: i16,
    pub affect_group: i16,
    pub damage_1: i16,
    pub damage_2: i16,
    pub special_effect: i16,
    pub required_stats: Vec<i16>,
    pub resisted_by: i16,
}

/// MDATA2: the spell book
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpellsFile {
    pub version: String,
    pub count: i16,
    pub spells: Vec<Spell>,
}

impl MordorFile for SpellsFile {
    const KIND: FileKind = FileKind::Spells;
}
