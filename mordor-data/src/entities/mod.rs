//! Typed entities for every MDATA file kind
//!
//! Each file kind has a plain serde struct whose field names follow its layout.
//! Arrays are `Vec`s; the codec enforces their declared lengths on encode.

mod catalog;
mod characters;
mod dungeon;
mod game;
mod records;

pub use catalog::*;
pub use characters::*;
pub use dungeon::*;
pub use game::*;
pub use records::*;

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::codec::{self, Codec};
use crate::error::Result;
use crate::schema::{self, FileKind, RecordSchema};
use crate::value::{Record, Residue};

/// A typed view of one MDATA file kind
pub trait MordorFile: Serialize + DeserializeOwned {
    const KIND: FileKind;

    fn schema() -> &'static RecordSchema {
        schema::schema(Self::KIND)
    }

    /// Decode with the default codec settings
    fn decode(bytes: &[u8]) -> Result<Self> {
        Codec::default().decode_file(bytes)
    }

    fn decode_with_residue(bytes: &[u8]) -> Result<(Self, Residue)> {
        Codec::default().decode_file_with_residue(bytes)
    }

    /// Encode with the default codec settings
    fn encode(&self) -> Result<Vec<u8>> {
        Codec::default().encode_file(self)
    }

    fn encode_with_residue(&self, residue: &Residue) -> Result<Vec<u8>> {
        Codec::default().encode_file_with_residue(self, residue)
    }

    /// A zero-valued file with every fixed array at its declared length
    fn blank() -> Result<Self> {
        codec::from_record(Self::KIND, codec::blank(Self::KIND))
    }
}

/// Encode a JSON document as the given file kind, validating it against the typed entity
///
/// The document is read against the kind's layout, so non-finite floats written
/// as bit patterns by a dump come back unchanged.
pub fn encode_json(codec: &Codec, kind: FileKind, json: &serde_json::Value) -> Result<Vec<u8>> {
    fn typed<T: MordorFile>(codec: &Codec, root: Record) -> Result<Vec<u8>> {
        let file: T = crate::codec::from_record(T::KIND, root)?;
        codec.encode_file(&file)
    }

    let root = crate::codec::record_from_json(kind, schema::schema(kind).layout, json)?;

    match kind {
        FileKind::GameData => typed::<GameDataFile>(codec, root),
        FileKind::Spells => typed::<SpellsFile>(codec, root),
        FileKind::Items => typed::<ItemsFile>(codec, root),
        FileKind::Characters => typed::<CharactersFile>(codec, root),
        FileKind::Monsters => typed::<MonstersFile>(codec, root),
        FileKind::GeneralStore => typed::<GeneralStoreFile>(codec, root),
        FileKind::Guildmasters => typed::<GuildmastersFile>(codec, root),
        FileKind::Automap => typed::<AutomapFile>(codec, root),
        FileKind::GuildLogs => typed::<GuildLogFile>(codec, root),
        FileKind::DungeonState => typed::<DungeonStateFile>(codec, root),
        FileKind::DungeonMap => typed::<DungeonMapFile>(codec, root),
        FileKind::PartyGroups => typed::<PartyGroupsFile>(codec, root),
        FileKind::Library => typed::<LibraryFile>(codec, root),
        FileKind::HallOfRecords => typed::<HallOfRecordsFile>(codec, root),
        FileKind::Confinement => typed::<ConfinementFile>(codec, root),
    }
}
