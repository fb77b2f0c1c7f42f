//! Static field tables for every MDATA file kind
//!
//! Header fields and array elements of slotted files each occupy one record
//! slot; everything inside a sub-record is packed.

use crate::layout::FieldKind::*;
use crate::layout::{FieldDescriptor, FieldKind, Layout};
use crate::record_lengths::*;
use crate::{
    AREA_SPAWN_COUNT, COMPANION_COUNT, DUNGEON_LEVEL_COUNT, EQUIPPED_SLOTS, GUILD_COUNT,
    GUILD_STATUS_COUNT, HALL_RECORD_COUNT, INVENTORY_SLOTS, ITEM_COUNT, ITEM_SUBTYPE_COUNT,
    ITEM_TYPE_COUNT, MONSTER_COUNT, MONSTER_SUBTYPE_COUNT, MONSTER_TYPE_COUNT, RACE_COUNT,
    RESISTANCE_COUNT, SPELL_COUNT, STAT_COUNT, WINDOW_COUNT,
};

const fn field(name: &'static str, kind: FieldKind) -> FieldDescriptor {
    FieldDescriptor::new(name, kind)
}

/// Version header text; the length prefix plus text fill one slot
const fn version(record_length: usize) -> FieldDescriptor {
    field("version", VbText(record_length - 2)).own_slot()
}

// =============================================================================
// MDATA1 - Game Data
// =============================================================================

pub static RACE: Layout = Layout {
    name: "Race",
    fields: &[
        field("name", VbText(20)),
        field("min_stats", Int16Array(STAT_COUNT)),
        field("max_stats", Int16Array(STAT_COUNT)),
        field("resistances", Int16Array(RESISTANCE_COUNT)),
        field("alignment", Int32),
        field("size", Int16),
        field("bonus_points", Int16),
        field("max_age", Int16),
        field("exp_factor", Float32),
    ],
};

pub static GUILD: Layout = Layout {
    name: "Guild",
    fields: &[
        field("name", VbText(12)),
        field("average_hits", Int16),
        field("max_level", Int16),
        field("max_hits", Int16),
        field("exp_factor", Float32),
        field("unknown_3", Int16),
        field("required_stats", Int16Array(STAT_COUNT)),
        field("alignment", Int32),
        field("ability_rates", Float32Array(STAT_COUNT)),
        field("unknown_7", Int16),
        field("unknown_8", Float32),
        field("quest_percentage", Int16),
        field("spell_table", Float32Array(38)),
        field("race_mask", Int32),
        field("unknown_12", Int16),
        field("level_mod", Float32),
        field("unknown_13", Float32),
        field("unknown_14", Float32),
        field("unknown_15", Int16),
        field("unknown_16", Float32),
        field("unknown_17", Int16),
        field("unknown_18", Int16),
    ],
};

pub static ITEM_SUBTYPE: Layout = Layout {
    name: "ItemSubtype",
    fields: &[field("name", VbText(20)), field("item_type", Int16)],
};

pub static ITEM_TYPE: Layout = Layout {
    name: "ItemType",
    fields: &[field("name", VbText(20)), field("is_equipable", Int16)],
};

pub static MONSTER_SUBTYPE: Layout = Layout {
    name: "MonsterSubtype",
    fields: &[field("name", VbText(20)), field("monster_type", Int16)],
};

pub static MONSTER_TYPE: Layout = Layout {
    name: "MonsterType",
    fields: &[field("name", VbText(20)), field("not_used", Int16)],
};

pub static GAME_DATA: Layout = Layout {
    name: "GameData",
    fields: &[
        version(DATA01),
        field("num_races", Int16).own_slot(),
        field("num_guilds", Int16).own_slot(),
        field("num_item_subtypes", Int16).own_slot(),
        field("num_item_types", Int16).own_slot(),
        field("num_monster_subtypes", Int16).own_slot(),
        field("num_monster_types", Int16).own_slot(),
        field("races", SubRecordArray(&RACE, RACE_COUNT)).slot_per_element(),
        field("guilds", SubRecordArray(&GUILD, GUILD_COUNT)).slot_per_element(),
        field(
            "item_subtypes",
            SubRecordArray(&ITEM_SUBTYPE, ITEM_SUBTYPE_COUNT),
        )
        .slot_per_element(),
        field("item_types", SubRecordArray(&ITEM_TYPE, ITEM_TYPE_COUNT)).slot_per_element(),
        field(
            "monster_subtypes",
            SubRecordArray(&MONSTER_SUBTYPE, MONSTER_SUBTYPE_COUNT),
        )
        .slot_per_element(),
        field(
            "monster_types",
            SubRecordArray(&MONSTER_TYPE, MONSTER_TYPE_COUNT),
        )
        .slot_per_element(),
    ],
};

// =============================================================================
// MDATA2 - Spells
// =============================================================================

pub static SPELL: Layout = Layout {
    name: "Spell",
    fields: &[
        field("name", VbText(20)),
        field("id", Int16),
        field("category", Int16),
        field("level", Int16),
        field("unknown_4", Int16),
        field("kill_effect", Int16),
        field("affect_monster", Int16),
        field("affect_group", Int16),
        field("damage_1", Int16),
        field("damage_2", Int16),
        field("special_effect", Int16),
        field("required_stats", Int16Array(STAT_COUNT)),
        field("resisted_by", Int16),
    ],
};

pub static SPELLS: Layout = Layout {
    name: "Spells",
    fields: &[
        version(DATA02),
        field("count", Int16).own_slot(),
        field("spells", SubRecordArray(&SPELL, SPELL_COUNT)).slot_per_element(),
    ],
};

// =============================================================================
// MDATA3 - Items
// =============================================================================

pub static ITEM: Layout = Layout {
    name: "Item",
    fields: &[
        field("name", VbText(20)),
        field("id", Int16),
        field("attack", Int16),
        field("defense", Int16),
        field("price", Int32),
        field("floor", Int16),
        field("rarity", Int16),
        field("abilities", Int32),
        field("swings", Int16),
        field("special_type", Int16),
        field("spell_index", Int16),
        field("spell_id", Int16),
        field("charges", Int32),
        field("guilds", Int32),
        field("level_scale", Int16),
        field("damage_mod", Float32),
        field("alignment_flags", Int32),
        field("hands", Int16),
        field("item_type", Int16),
        field("resistance_flags", Int32),
        field("stats_required", Int16Array(STAT_COUNT)),
        field("stats_modifier", Int16Array(STAT_COUNT)),
        field("cursed", Int16),
        field("spell_level", Int16),
        field("class_restricted", Int16),
    ],
};

pub static ITEMS: Layout = Layout {
    name: "Items",
    fields: &[
        version(DATA03),
        field("store_code", Int16).own_slot(),
        field("count", Int16).own_slot(),
        field("items", SubRecordArray(&ITEM, ITEM_COUNT)).slot_per_element(),
    ],
};

// =============================================================================
// MDATA4 - Characters
// =============================================================================

pub static CHARACTER_ITEM: Layout = Layout {
    name: "CharacterItem",
    fields: &[
        field("attack", Int16),
        field("defense", Int16),
        field("item_index", Int16),
        field("item_id", Int16),
        field("alignment", Int16),
        field("charges", Int16),
        field("equipped", Int16),
        field("id_level", Int16),
        field("cursed", Int16),
    ],
};

pub static GUILD_STATUS: Layout = Layout {
    name: "GuildStatus",
    fields: &[
        field("level", Int16),
        field("experience", Int64),
        field("quest", Int16),
        field("quest_id", Int16),
        field("quest_completed", Int16),
        field("attack", Float32),
        field("defense", Float32),
    ],
};

pub static COMPANION: Layout = Layout {
    name: "Companion",
    fields: &[
        field("name", FixedText(15)),
        field("monster_id", Int16),
        field("slot", Int16),
        field("hit_points", Int16),
        field("max_hit_points", Int16),
        field("alignment", Int16),
        field("attack", Int16),
        field("defense", Int16),
        field("bind_level", Int16),
        field("id_level", Int16),
    ],
};

pub static WINDOW_STATE: Layout = Layout {
    name: "WindowState",
    fields: &[
        field("left", Int32),
        field("top", Int32),
        field("height", Int32),
        field("width", Int32),
        field("window_id", Int16),
    ],
};

pub static CHARACTER: Layout = Layout {
    name: "Character",
    fields: &[
        field("name", FixedText(30)),
        field("race", Int16),
        field("alignment", Int16),
        field("sex", Int16),
        field("days_old", Float32),
        field("spell_points", Int16),
        field("dungeon_level", Int16),
        field("x", Int16),
        field("y", Int16),
        field("attack", Float32),
        field("defense", Float32),
        field("base_stats", Int16Array(STAT_COUNT)),
        field("modded_stats", Int16Array(STAT_COUNT)),
        field("inventory", SubRecordArray(&CHARACTER_ITEM, INVENTORY_SLOTS)),
        field("bank", SubRecordArray(&CHARACTER_ITEM, INVENTORY_SLOTS)),
        field("equipped_slots", Int16Array(EQUIPPED_SLOTS)),
        field("unused_1", Int64),
        field("unused_2", Int16),
        field("facing", Int16),
        field("unused_3", Int16),
        field("total_experience", Int64),
        field("gold_on_hand", Int64),
        field("hit_points", Int16),
        field("max_hit_points", Int16),
        field("gold_in_bank", Int64),
        field("extra_swings", Int16),
        field("active_guild", Int16),
        field("guild_status", SubRecordArray(&GUILD_STATUS, GUILD_STATUS_COUNT)),
        field("companions", SubRecordArray(&COMPANION, COMPANION_COUNT)),
        field("hands_occupied", Int16),
        field("resurrect_spell", Int16),
        field("raise_chance", Int16),
        field("resurrect_name", FixedText(30)),
        field("tallies", Float32Array(9)),
        field("reserved_1", Reserved(36)),
        field("options", Int16Array(6)),
        field("status_effects", Int16Array(8)),
        field("resistances", Int16Array(RESISTANCE_COUNT)),
        field("temp_buffs", Int32),
        field("temp_resistances", Int16Array(RESISTANCE_COUNT)),
        field("deadness", Int16),
        field("carried_corpse", Int16),
        field("password", FixedText(10)),
        field("windows", SubRecordArray(&WINDOW_STATE, WINDOW_COUNT)),
        field("record_line", Int16),
        field("experience_to_pin", Int32),
        field("item_abilities", Int32),
        field("item_resistances", Int16Array(RESISTANCE_COUNT)),
        field("hand_items", Int16Array(2)),
        field("attack_defense_placeholder", Int16),
        field("buffer_slots", Int16Array(11)),
        field("map_area", Int16),
        field("unused_4", Int16),
        field("unused_5", Int16),
        field("sanctuary_x", Int16),
        field("sanctuary_y", Int16),
        field("sanctuary_level", Int16),
        field("location_awareness", Int32Array(3)),
        field("reserved_2", Reserved(7)),
    ],
};

pub static CHARACTERS: Layout = Layout {
    name: "Characters",
    fields: &[
        version(DATA04),
        field("partial_character_count", Int16).own_slot(),
        field("characters", TrailingSubRecordArray(&CHARACTER)).slot_per_element(),
    ],
};

// =============================================================================
// MDATA5 - Monsters
// =============================================================================

pub static MONSTER: Layout = Layout {
    name: "Monster",
    fields: &[
        field("name", VbText(28)),
        field("attack", Int16),
        field("defense", Int16),
        field("id", Int16),
        field("hits", Int16),
        field("num_groups", Int16),
        field("picture_id", Int16),
        field("locked_chance", Int16),
        field("level_found", Int16),
        field("resistances", Int16Array(RESISTANCE_COUNT)),
        field("special_properties", Int32),
        field("special_attacks", Int32),
        field("spell_flags", Int32),
        field("chance", Int16),
        field("box_chance", Int16Array(4)),
        field("alignment", Int16),
        field("in_group", Int16),
        field("gold_factor", Int32),
        field("trap_flags", Int32),
        field("guild_level", Int16),
        field("stats", Int16Array(STAT_COUNT)),
        field("monster_type", Int16),
        field("damage_mod", Float32),
        field("companion_type", Int16),
        field("companion_spawn_mode", Int16),
        field("companion_id", Int16),
        field("items", Int16Array(11)),
        field("subtype", Int16),
        field("companion_subtype", Int16),
        field("deleted", Int16),
    ],
};

pub static MONSTERS: Layout = Layout {
    name: "Monsters",
    fields: &[
        version(DATA05),
        field("unused", Int16).own_slot(),
        field("count", Int16).own_slot(),
        field("monsters", SubRecordArray(&MONSTER, MONSTER_COUNT)).slot_per_element(),
    ],
};

// =============================================================================
// MDATA6 - General Store
// =============================================================================

pub static STORE_ITEM: Layout = Layout {
    name: "StoreItem",
    fields: &[
        field("item_id", Int16),
        field("stock", Int16),
        field("max_stock", Int16),
        field("restock_rate", Int16),
        field("price", Int64),
    ],
};

pub static GENERAL_STORE: Layout = Layout {
    name: "GeneralStore",
    fields: &[
        version(DATA06),
        field("unused", Int16).own_slot(),
        field("all_items_count", Int16).own_slot(),
        field("items", SubRecordArray(&STORE_ITEM, ITEM_COUNT)).slot_per_element(),
    ],
};

// =============================================================================
// MDATA7 - Guildmasters
// =============================================================================

pub static GUILDMASTER: Layout = Layout {
    name: "Guildmaster",
    fields: &[
        field("name", FixedText(30)),
        field("guild", Int16),
        field("level", Int16),
        field("race", Int16),
        field("alignment", Int16),
        field("experience", Int64),
        field("days_held", Float32),
        field("stats", Int16Array(STAT_COUNT)),
        field("reserved", Reserved(64)),
    ],
};

pub static GUILDMASTERS: Layout = Layout {
    name: "Guildmasters",
    fields: &[
        version(DATA07),
        field("guildmasters", SubRecordArray(&GUILDMASTER, GUILD_COUNT)).slot_per_element(),
    ],
};

// =============================================================================
// MDATA8 - Automap
// =============================================================================

pub static AUTOMAP_FLOOR: Layout = Layout {
    name: "AutomapFloor",
    fields: &[
        field("level", Int16),
        field("squares_mapped", Int16),
        field("width", Int16),
        field("height", Int16),
        field("flags", Int16),
    ],
};

pub static AUTOMAP: Layout = Layout {
    name: "Automap",
    fields: &[
        version(DATA08),
        field("deepest_level", Int16).own_slot(),
        field("floors", SubRecordArray(&AUTOMAP_FLOOR, DUNGEON_LEVEL_COUNT)).slot_per_element(),
    ],
};

// =============================================================================
// MDATA9 - Guild Logs
// =============================================================================

pub static GUILD_LOG_ENTRY: Layout = Layout {
    name: "GuildLogEntry",
    fields: &[
        field("character_name", FixedText(30)),
        field("guild", Int16),
        field("event", Int16),
        field("level", Int16),
        field("day", Float32),
    ],
};

pub static GUILD_LOGS: Layout = Layout {
    name: "GuildLogs",
    fields: &[
        field("count", Int16),
        field("entries", CountedSubRecordArray(&GUILD_LOG_ENTRY, "count")),
    ],
};

// =============================================================================
// MDATA10 - Dungeon State
// =============================================================================

pub static AREA_SPAWN: Layout = Layout {
    name: "AreaSpawn",
    fields: &[
        field("level", Int16),
        field("area", Int16),
        field("x", Int16),
        field("y", Int16),
        field("monster_id", Int16),
        field("monster_count", Int16),
        field("group_id", Int16),
        field("hostile", Int16),
        field("respawn_timer", Float32),
        field("flags", Int32),
        field("reserved", Reserved(4)),
    ],
};

pub static DUNGEON_STATE: Layout = Layout {
    name: "DungeonState",
    fields: &[
        field("level_count", Int16).own_slot(),
        field("spawn_counts", Int16Array(DUNGEON_LEVEL_COUNT)).slot_per_element(),
        field("area_spawns", SubRecordArray(&AREA_SPAWN, AREA_SPAWN_COUNT)).slot_per_element(),
    ],
};

// =============================================================================
// MDATA11 - Dungeon Map
// =============================================================================

pub static DUNGEON_FLOOR: Layout = Layout {
    name: "DungeonFloor",
    fields: &[
        field("level", Int16),
        field("width", Int16),
        field("height", Int16),
        field("area_count", Int16),
        field("teleporter_count", Int16),
        field("chute_count", Int16),
        field("first_square", Int32),
        field("square_count", Int32),
    ],
};

pub static DUNGEON_MAP: Layout = Layout {
    name: "DungeonMap",
    fields: &[
        field("floor_count", Int16).own_slot(),
        field("floor_offsets", Int16Array(DUNGEON_LEVEL_COUNT)).slot_per_element(),
        field("floors", SubRecordArray(&DUNGEON_FLOOR, DUNGEON_LEVEL_COUNT)).slot_per_element(),
    ],
};

// =============================================================================
// MDATA12 - Party Groups
// =============================================================================

pub static PARTY: Layout = Layout {
    name: "Party",
    fields: &[
        field("name", FixedText(15)),
        field("member_ids", Int16Array(4)),
        field("leader", Int16),
        field("dungeon_level", Int16),
        field("x", Int16),
        field("y", Int16),
        field("active", Int16),
        field("reserved", Reserved(2)),
    ],
};

pub static PARTY_GROUPS: Layout = Layout {
    name: "PartyGroups",
    fields: &[
        field("fake_count", Int16).own_slot(),
        field("parties", TrailingSubRecordArray(&PARTY)).slot_per_element(),
    ],
};

// =============================================================================
// MDATA13 - Library
// =============================================================================

pub static LIBRARY_RECORD: Layout = Layout {
    name: "LibraryRecord",
    fields: &[
        field("id", Int16),
        field("knowledge_level", Int16),
        field("times_encountered", Int32),
        field("times_defeated", Int32),
        field("first_seen", Float32),
        field("name", FixedText(30)),
        field("attributes", Int16Array(RESISTANCE_COUNT)),
        field("reserved", Reserved(30)),
    ],
};

pub static LIBRARY: Layout = Layout {
    name: "Library",
    fields: &[
        version(DATA13),
        field("total_monsters", Int16).own_slot(),
        field("total_items", Int16).own_slot(),
        field("monsters_found", Int16).own_slot(),
        field("items_found", Int16).own_slot(),
        field("monsters", SubRecordArray(&LIBRARY_RECORD, MONSTER_COUNT)).slot_per_element(),
        field("items", SubRecordArray(&LIBRARY_RECORD, ITEM_COUNT)).slot_per_element(),
    ],
};

// =============================================================================
// MDATA14 - Hall of Records
// =============================================================================

pub static HALL_RECORD: Layout = Layout {
    name: "HallRecord",
    fields: &[
        field("holder_name", FixedText(30)),
        field("value", Int64),
        field("guild", Int16),
        field("race", Int16),
        field("level", Int16),
        field("reserved", Reserved(1)),
    ],
};

pub static HALL_OF_RECORDS: Layout = Layout {
    name: "HallOfRecords",
    fields: &[field("records", SubRecordArray(&HALL_RECORD, HALL_RECORD_COUNT)).slot_per_element()],
};

// =============================================================================
// MDATA15 - Confinement
// =============================================================================

pub static CONFINED_MONSTER: Layout = Layout {
    name: "ConfinedMonster",
    fields: &[
        field("monster_id", Int16),
        field("quantity", Int16),
        field("capture_level", Int16),
        field("alignment", Int16),
        field("price", Int64),
    ],
};

pub static CONFINEMENT: Layout = Layout {
    name: "Confinement",
    fields: &[
        version(DATA15),
        field("unused", Int16).own_slot(),
        field("total_records", Int16).own_slot(),
        field("monsters", SubRecordArray(&CONFINED_MONSTER, MONSTER_COUNT)).slot_per_element(),
    ],
};
