//! Mordor-Data: schema-driven codec for the MDATA files of Mordor: The Depths of Dejenol
//!
//! The legacy game keeps its definitions (races, guilds, spells, item and monster
//! catalogs), its live state (characters, dungeon layout, spawns, parties) and its
//! meta-records (hall of records, library, confinement) in fifteen flat binary
//! files, `MDATA1.MDR` through `MDATA15.MDR`. This crate decodes those files into
//! structured values and encodes them back bit-for-bit.
//!
//! # Key Features
//!
//! - **Declarative layouts**: every file kind is a static table of field
//!   descriptors; no format has hand-written parsing code
//! - **Record slots**: fixed-length kinds are read slot by slot, exactly like the
//!   random-access files the game writes
//! - **Lossless**: unread slot slack is kept as a [`Residue`] so legacy files can
//!   be rewritten byte-for-byte
//! - **Typed entities**: plain serde structs per file kind, bridged from the
//!   dynamic [`Value`] tree
//!
//! # Usage
//!
//! ```ignore
//! use mordor_data::{Codec, MonstersFile};
//!
//! let bytes = std::fs::read("MDATA5.MDR")?;
//! let codec = Codec::default();
//! let monsters: MonstersFile = codec.decode_file(&bytes)?;
//!
//! println!("Version: {}", monsters.version);
//! for monster in monsters.monsters.iter().take(5) {
//!     println!("  {} (level {})", monster.name, monster.level_found);
//! }
//!
//! assert_eq!(codec.encode_file(&monsters)?, bytes);
//! ```

mod bridge;
mod codec;
pub mod config;
pub mod cursor;
mod entities;
mod error;
pub mod layout;
pub mod save_game;
pub mod schema;
mod value;

pub use bridge::{BridgeError, from_value, to_value};
pub use codec::{Codec, DecodedFile, blank};
pub use config::{CodecConfig, MordorConfig, TextPadding};
pub use cursor::{CursorError, ReadCursor, WriteCursor};
pub use entities::*;
pub use error::{Error, ErrorKind, FormatError, Result};
pub use layout::{FieldDescriptor, FieldKind, Layout, Placement};
pub use save_game::{SaveGame, VerifyOutcome, VerifyReport};
pub use schema::{FileKind, RecordLength, RecordSchema};
pub use value::{Record, Residue, Value};

// =============================================================================
// Catalog Cardinalities
// =============================================================================

/// Monster slots in the monster, library and confinement files
pub const MONSTER_COUNT: usize = 401;

/// Item slots in the item, general store and library files
pub const ITEM_COUNT: usize = 366;

/// Race slots in the game definition file
pub const RACE_COUNT: usize = 9;

/// Guild slots in the game definition and guildmaster files
pub const GUILD_COUNT: usize = 12;

/// Item subtype slots in the game definition file
pub const ITEM_SUBTYPE_COUNT: usize = 35;

/// Item type slots in the game definition file
pub const ITEM_TYPE_COUNT: usize = 24;

/// Monster subtype slots in the game definition file
pub const MONSTER_SUBTYPE_COUNT: usize = 18;

/// Monster type slots in the game definition file
pub const MONSTER_TYPE_COUNT: usize = 15;

/// Spell slots in the spell file
pub const SPELL_COUNT: usize = 105;

/// Dungeon floors tracked by the automap, dungeon state and dungeon map files
pub const DUNGEON_LEVEL_COUNT: usize = 15;

/// Area spawn slots in the dungeon state file
pub const AREA_SPAWN_COUNT: usize = 3000;

/// Entries in the hall of records
pub const HALL_RECORD_COUNT: usize = 13;

// =============================================================================
// Character Record Cardinalities
// =============================================================================

/// Primary statistics (Str, Int, Wis, Con, Cha, Dex and one unused)
pub const STAT_COUNT: usize = 7;

/// Resistance classes (Fire through Special, plus one unused)
pub const RESISTANCE_COUNT: usize = 12;

/// Inventory and bank slots per character
pub const INVENTORY_SLOTS: usize = 41;

/// Equipment slot indices per character
pub const EQUIPPED_SLOTS: usize = 36;

/// Guild membership records per character
pub const GUILD_STATUS_COUNT: usize = 16;

/// Bound companions per character
pub const COMPANION_COUNT: usize = 5;

/// Saved window placements per character
pub const WINDOW_COUNT: usize = 21;

// =============================================================================
// Record Lengths
// =============================================================================

/// Slot widths in bytes, indexed by file kind number
pub mod record_lengths {
    /// MDATA1 - game definitions
    pub const DATA01: usize = 260;
    /// MDATA2 - spells
    pub const DATA02: usize = 75;
    /// MDATA3 - items
    pub const DATA03: usize = 125;
    /// MDATA4 - characters
    pub const DATA04: usize = 2900;
    /// MDATA5 - monsters
    pub const DATA05: usize = 160;
    /// MDATA6 - general store
    pub const DATA06: usize = 16;
    /// MDATA7 - guildmasters
    pub const DATA07: usize = 128;
    /// MDATA8 - automap
    pub const DATA08: usize = 10;
    /// MDATA10 - dungeon state
    pub const DATA10: usize = 28;
    /// MDATA11 - dungeon map
    pub const DATA11: usize = 20;
    /// MDATA12 - party groups
    pub const DATA12: usize = 35;
    /// MDATA13 - library
    pub const DATA13: usize = 100;
    /// MDATA14 - hall of records
    pub const DATA14: usize = 45;
    /// MDATA15 - confinement
    pub const DATA15: usize = 16;
}

/// Width of one guild log entry (MDATA9 has no slots)
pub const GUILD_LOG_ENTRY_LEN: usize = 40;
