//! File kinds and the schema registry
//!
//! Every file kind is registered exactly once, together with its record length
//! and root layout. Nothing else in the crate knows a format.

pub mod layouts;


use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::layout::{FieldKind, Layout, Placement};
use crate::record_lengths;

/// The fifteen MDATA file kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum FileKind {
    GameData = 1,
    Spells = 2,
    Items = 3,
    Characters = 4,
    Monsters = 5,
    GeneralStore = 6,
    Guildmasters = 7,
    Automap = 8,
    GuildLogs = 9,
    DungeonState = 10,
    DungeonMap = 11,
    PartyGroups = 12,
    Library = 13,
    HallOfRecords = 14,
    Confinement = 15,
}

impl FileKind {
    pub const ALL: [FileKind; 15] = [
        FileKind::GameData,
        FileKind::Spells,
        FileKind::Items,
        FileKind::Characters,
        FileKind::Monsters,
        FileKind::GeneralStore,
        FileKind::Guildmasters,
        FileKind::Automap,
        FileKind::GuildLogs,
        FileKind::DungeonState,
        FileKind::DungeonMap,
        FileKind::PartyGroups,
        FileKind::Library,
        FileKind::HallOfRecords,
        FileKind::Confinement,
    ];

    /// Numeric id, 1 through 15
    pub const fn id(self) -> u8 {
        self as u8
    }

    pub fn from_id(id: u8) -> Option<Self> {
        Self::ALL.get(usize::from(id).checked_sub(1)?).copied()
    }

    /// On-disk file name, e.g. `MDATA5.MDR`
    pub fn file_name(self) -> String {
        format!("MDATA{}.MDR", self.id())
    }

    /// Recognize `MDATA<n>` file names, ignoring case and extension
    pub fn from_file_name(name: &str) -> Option<Self> {
        let stem = name.split('.').next()?;
        let digits = stem.get(..5)?.eq_ignore_ascii_case("mdata").then(|| &stem[5..])?;
        digits.parse::<u8>().ok().and_then(Self::from_id)
    }

    pub fn description(self) -> &'static str {
        match self {
            FileKind::GameData => "game data",
            FileKind::Spells => "spells",
            FileKind::Items => "items",
            FileKind::Characters => "characters",
            FileKind::Monsters => "monsters",
            FileKind::GeneralStore => "general store",
            FileKind::Guildmasters => "guildmasters",
            FileKind::Automap => "automap",
            FileKind::GuildLogs => "guild logs",
            FileKind::DungeonState => "dungeon state",
            FileKind::DungeonMap => "dungeon map",
            FileKind::PartyGroups => "party groups",
            FileKind::Library => "library",
            FileKind::HallOfRecords => "hall of records",
            FileKind::Confinement => "confinement",
        }
    }
}

impl fmt::Display for FileKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "MDATA{} ({})", self.id(), self.description())
    }
}

impl TryFrom<u8> for FileKind {
    type Error = Error;

    fn try_from(id: u8) -> Result<Self> {
        Self::from_id(id).ok_or(Error::SchemaNotFound(id))
    }
}

/// Slot width of a file kind
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordLength {
    /// Every header field and array element sits in a slot of this many bytes
    Fixed(usize),
    /// No slots; fields are packed back to back
    Variable,
}

/// A registered file format
#[derive(Debug)]
pub struct RecordSchema {
    pub kind: FileKind,
    pub record_length: RecordLength,
    pub layout: &'static Layout,
}

impl RecordSchema {
    pub fn slot_len(&self) -> Option<usize> {
        match self.record_length {
            RecordLength::Fixed(len) => Some(len),
            RecordLength::Variable => None,
        }
    }

    /// Check the layout against the record length
    ///
    /// Returns one message per problem; an empty list means the schema is sound.
    pub fn validate(&self) -> Vec<String> {
        let mut problems = Vec::new();
        let layout = self.layout;

        for (index, field) in layout.fields.iter().enumerate() {
            if let FieldKind::CountedSubRecordArray(_, count_field) = field.kind {
                let governs = layout.fields[..index].iter().find(|f| f.name == count_field);
                if !matches!(
                    governs.map(|f| f.kind),
                    Some(FieldKind::Int16 | FieldKind::Int32 | FieldKind::Int64)
                ) {
                    problems.push(format!(
                        "{}: count field `{}` must be an earlier integer",
                        field.name, count_field
                    ));
                }
            }
            if let Some(nested) = field.kind.nested() {
                check_nested_packed(nested, &mut problems);
            }

            let Some(slot) = self.slot_len() else {
                if field.placement != Placement::Packed {
                    problems.push(format!("{}: slotted field in a slotless file", field.name));
                }
                continue;
            };

            let element_width = match field.placement {
                Placement::Packed => {
                    problems.push(format!("{}: packed field in a slotted file", field.name));
                    continue;
                }
                Placement::OwnSlot => field.max_width(),
                Placement::SlotPerElement => match field.kind {
                    FieldKind::Int16Array(_)
                    | FieldKind::Int32Array(_)
                    | FieldKind::Float32Array(_) => field.kind.scalar_width(),
                    _ => field.kind.nested().and_then(Layout::max_width),
                },
            };
            match element_width {
                Some(width) if width <= slot => {}
                Some(width) => problems.push(format!(
                    "{}: {} bytes do not fit a {} byte slot",
                    field.name, width, slot
                )),
                None => problems.push(format!("{}: unbounded width in a slot", field.name)),
            }
        }
        problems
    }
}

fn check_nested_packed(layout: &'static Layout, problems: &mut Vec<String>) {
    for field in layout.fields {
        if field.placement != Placement::Packed {
            problems.push(format!("{}.{}: nested fields are packed", layout.name, field.name));
        }
        if let Some(nested) = field.kind.nested() {
            check_nested_packed(nested, problems);
        }
    }
}

// =============================================================================
// Registry
// =============================================================================

static SCHEMAS: [RecordSchema; 15] = [
    RecordSchema {
        kind: FileKind::GameData,
        record_length: RecordLength::Fixed(record_lengths::DATA01),
        layout: &layouts::GAME_DATA,
    },
    RecordSchema {
        kind: FileKind::Spells,
        record_length: RecordLength::Fixed(record_lengths::DATA02),
        layout: &layouts::SPELLS,
    },
    RecordSchema {
        kind: FileKind::Items,
        record_length: RecordLength::Fixed(record_lengths::DATA03),
        layout: &layouts::ITEMS,
    },
    RecordSchema {
        kind: FileKind::Characters,
        record_length: RecordLength::Fixed(record_lengths::DATA04),
        layout: &layouts::CHARACTERS,
    },
    RecordSchema {
        kind: FileKind::Monsters,
        record_length: RecordLength::Fixed(record_lengths::DATA05),
        layout: &layouts::MONSTERS,
    },
    RecordSchema {
        kind: FileKind::GeneralStore,
        record_length: RecordLength::Fixed(record_lengths::DATA06),
        layout: &layouts::GENERAL_STORE,
    },
    RecordSchema {
        kind: FileKind::Guildmasters,
        record_length: RecordLength::Fixed(record_lengths::DATA07),
        layout: &layouts::GUILDMASTERS,
    },
    RecordSchema {
        kind: FileKind::Automap,
        record_length: RecordLength::Fixed(record_lengths::DATA08),
        layout: &layouts::AUTOMAP,
    },
    RecordSchema {
        kind: FileKind::GuildLogs,
        record_length: RecordLength::Variable,
        layout: &layouts::GUILD_LOGS,
    },
    RecordSchema {
        kind: FileKind::DungeonState,
        record_length: RecordLength::Fixed(record_lengths::DATA10),
        layout: &layouts::DUNGEON_STATE,
    },
    RecordSchema {
        kind: FileKind::DungeonMap,
        record_length: RecordLength::Fixed(record_lengths::DATA11),
        layout: &layouts::DUNGEON_MAP,
    },
    RecordSchema {
        kind: FileKind::PartyGroups,
        record_length: RecordLength::Fixed(record_lengths::DATA12),
        layout: &layouts::PARTY_GROUPS,
    },
    RecordSchema {
        kind: FileKind::Library,
        record_length: RecordLength::Fixed(record_lengths::DATA13),
        layout: &layouts::LIBRARY,
    },
    RecordSchema {
        kind: FileKind::HallOfRecords,
        record_length: RecordLength::Fixed(record_lengths::DATA14),
        layout: &layouts::HALL_OF_RECORDS,
    },
    RecordSchema {
        kind: FileKind::Confinement,
        record_length: RecordLength::Fixed(record_lengths::DATA15),
        layout: &layouts::CONFINEMENT,
    },
];

/// Schema of a file kind
pub fn schema(kind: FileKind) -> &'static RecordSchema {
    &SCHEMAS[usize::from(kind.id()) - 1]
}

/// Schema of a numeric file kind, failing for ids outside 1..=15
pub fn lookup(id: u8) -> Result<&'static RecordSchema> {
    FileKind::try_from(id).map(schema)
}

/// Every registered schema, in kind order
pub fn schemas() -> &'static [RecordSchema] {
    &SCHEMAS
}
