//! Characters (MDATA4), guildmasters (MDATA7), guild logs (MDATA9) and parties (MDATA12)

use serde::{Deserialize, Serialize};

use super::MordorFile;
use crate::schema::FileKind;

/// One inventory or bank slot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CharacterItem {
    pub attack: i16,
    pub defense: i16,
    pub item_index: i16,
    pub item_id: i16,
    pub alignment: i16,
    pub charges: i16,
    pub equipped: i16,
    pub id_level: i16,
    pub cursed: i16,
}

/// Progress in one guild
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GuildStatus {
    pub level: i16,
    pub experience: i64,
    pub quest: i16,
    pub quest_id: i16,
    pub quest_completed: i16,
    pub attack: f32,
    pub defense: f32,
}

/// A bound monster following the character
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Companion {
    pub name: String,
    pub monster_id: i16,
    pub slot: i16,
    pub hit_points: i16,
    pub max_hit_points: i16,
    pub alignment: i16,
    pub attack: i16,
    pub defense: i16,
    pub bind_level: i16,
    pub id_level: i16,
}

/// Saved placement of one game window
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WindowState {
    pub left: i32,
    pub top: i32,
    pub height: i32,
    pub width: i32,
    pub window_id: i16,
}

/// A player character, exactly one 2900-byte slot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Character {
    pub name: String,
    pub race: i16,
    pub alignment: i16,
    pub sex: i16,
    pub days_old: f32,
    pub spell_points: i16,
    pub dungeon_level: i16,
    pub x: i16,
    pub y: i16,
    pub attack: f32,
    pub defense: f32,
    pub base_stats: Vec<i16>,
    pub modded_stats: Vec<i16>,
    pub inventory: Vec<CharacterItem>,
    pub bank: Vec<CharacterItem>,
    pub equipped_slots: Vec<i16>,
    pub unused_1: i64,
    pub unused_2: i16,
    pub facing: i16,
    pub unused_3: i16,
    pub total_experience: i64,
    pub gold_on_hand: i64,
    pub hit_points: i16,
    pub max_hit_points: i16,
    pub gold_in_bank: i64,
    pub extra_swings: i16,
    pub active_guild: i16,
    pub guild_status: Vec<GuildStatus>,
    pub companions: Vec<Companion>,
    pub hands_occupied: i16,
    pub resurrect_spell: i16,
    pub raise_chance: i16,
    pub resurrect_name: String,
    pub tallies: Vec<f32>,
    pub reserved_1: Vec<u8>,
    pub options: Vec<i16>,
    pub status_effects: Vec<i16>,
    pub resistances: Vec<i16>,
    pub temp_buffs: i32,
    pub temp_resistances: Vec<i16>,
    pub deadness: i16,
    pub carried_corpse: i16,
    pub password: String,
    pub windows: Vec<WindowState>,
    pub record_line: i16,
    pub experience_to_pin: i32,
    pub item_abilities: i32,
    pub item_resistances: Vec<i16>,
    pub hand_items: Vec<i16>,
    pub attack_defense_placeholder: i16,
    pub buffer_slots: Vec<i16>,
    pub map_area: i16,
    pub unused_4: i16,
    pub unused_5: i16,
    pub sanctuary_x: i16,
    pub sanctuary_y: i16,
    pub sanctuary_level: i16,
    pub location_awareness: Vec<i32>,
    pub reserved_2: Vec<u8>,
}

/// MDATA4: every saved character
///
/// The character count is not stored; it is however many whole slots follow
/// the header.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CharactersFile {
    pub version: String,
    pub partial_character_count: i16,
    pub characters: Vec<Character>,
}

impl MordorFile for CharactersFile {
    const KIND: FileKind = FileKind::Characters;
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Guildmaster {
    pub name: String,
    pub guild: i16,
    pub level: i16,
    pub race: i16,
    pub alignment: i16,
    pub experience: i64,
    pub days_held: f32,
    pub stats: Vec<i16>,
    pub reserved: Vec<u8>,
}

/// MDATA7: current guildmaster of each guild
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GuildmastersFile {
    pub version: String,
    pub guildmasters: Vec<Guildmaster>,
}

impl MordorFile for GuildmastersFile {
    const KIND: FileKind = FileKind::Guildmasters;
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GuildLogEntry {
    pub character_name: String,
    pub guild: i16,
    pub event: i16,
    pub level: i16,
    pub day: f32,
}

/// MDATA9: guild event log; `count` governs `entries`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GuildLogFile {
    pub count: i16,
    pub entries: Vec<GuildLogEntry>,
}

impl MordorFile for GuildLogFile {
    const KIND: FileKind = FileKind::GuildLogs;
}

impl GuildLogFile {
    /// Append an entry, keeping `count` in step
    pub fn push(&mut self, entry: GuildLogEntry) {
        self.entries.push(entry);
        self.count = i16::try_from(self.entries.len()).unwrap_or(i16::MAX);
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Party {
    pub name: String,
    pub member_ids: Vec<i16>,
    pub leader: i16,
    pub dungeon_level: i16,
    pub x: i16,
    pub y: i16,
    pub active: i16,
    pub reserved: Vec<u8>,
}

/// MDATA12: adventuring parties
///
/// `fake_count` is kept as written; the party list runs to the end of the file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PartyGroupsFile {
    pub fake_count: i16,
    pub parties: Vec<Party>,
}

impl MordorFile for PartyGroupsFile {
    const KIND: FileKind = FileKind::PartyGroups;
}
