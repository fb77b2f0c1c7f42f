//! Codec tests

use super::*;
use crate::config::TextPadding;
use crate::record_lengths::*;

/// Encoded size of a blank file of each kind
fn blank_len(kind: FileKind) -> usize {
    match kind {
        FileKind::GameData => (7 + 9 + 12 + 35 + 24 + 18 + 15) * DATA01,
        FileKind::Spells => (2 + 105) * DATA02,
        FileKind::Items => (3 + 366) * DATA03,
        FileKind::Characters => 2 * DATA04,
        FileKind::Monsters => (3 + 401) * DATA05,
        FileKind::GeneralStore => (3 + 366) * DATA06,
        FileKind::Guildmasters => (1 + 12) * DATA07,
        FileKind::Automap => (2 + 15) * DATA08,
        FileKind::GuildLogs => 2,
        FileKind::DungeonState => (1 + 15 + 3000) * DATA10,
        FileKind::DungeonMap => (1 + 15 + 15) * DATA11,
        FileKind::PartyGroups => DATA12,
        FileKind::Library => (5 + 401 + 366) * DATA13,
        FileKind::HallOfRecords => 13 * DATA14,
        FileKind::Confinement => (3 + 401) * DATA15,
    }
}

fn encode_blank(kind: FileKind) -> Vec<u8> {
    Codec::default()
        .encode(schema::schema(kind), &blank(kind))
        .unwrap()
}

fn decode(kind: FileKind, bytes: &[u8]) -> std::result::Result<DecodedFile, FormatError> {
    let mut cursor = ReadCursor::new(bytes);
    Codec::default().decode(schema::schema(kind), &mut cursor)
}

fn guild_log(count: i16, entries: usize) -> Vec<u8> {
    let mut bytes = count.to_le_bytes().to_vec();
    for i in 0..entries {
        let mut name = [b' '; 30];
        let label = format!("Hero{i}");
        name[..label.len()].copy_from_slice(label.as_bytes());
        bytes.extend_from_slice(&name);
        bytes.extend_from_slice(&(i as i16).to_le_bytes());
        bytes.extend_from_slice(&7i16.to_le_bytes());
        bytes.extend_from_slice(&(10 + i as i16).to_le_bytes());
        bytes.extend_from_slice(&(1.5f32 * i as f32).to_le_bytes());
    }
    bytes
}

// =============================================================================
// Blank files
// =============================================================================

#[test]
fn test_blank_files_have_expected_size() {
    for kind in FileKind::ALL {
        assert_eq!(encode_blank(kind).len(), blank_len(kind), "{kind}");
    }
}

#[test]
fn test_blank_files_round_trip() {
    for kind in FileKind::ALL {
        let bytes = encode_blank(kind);
        let decoded = decode(kind, &bytes).unwrap();
        assert_eq!(decoded.root, blank(kind), "{kind}");
        assert!(decoded.residue.is_empty(), "{kind}");
    }
}

#[test]
fn test_cardinalities() {
    let monsters = decode(FileKind::Monsters, &encode_blank(FileKind::Monsters)).unwrap();
    assert_eq!(monsters.root.get("monsters").and_then(Value::as_list).map(<[_]>::len), Some(401));

    let library = decode(FileKind::Library, &encode_blank(FileKind::Library)).unwrap();
    assert_eq!(library.root.get("monsters").and_then(Value::as_list).map(<[_]>::len), Some(401));
    assert_eq!(library.root.get("items").and_then(Value::as_list).map(<[_]>::len), Some(366));

    let state = decode(FileKind::DungeonState, &encode_blank(FileKind::DungeonState)).unwrap();
    assert_eq!(state.root.get("spawn_counts").and_then(Value::as_list).map(<[_]>::len), Some(15));
    assert_eq!(state.root.get("area_spawns").and_then(Value::as_list).map(<[_]>::len), Some(3000));
}

// =============================================================================
// Counted arrays
// =============================================================================

#[test]
fn test_guild_log_entries() {
    let bytes = guild_log(3, 3);
    assert_eq!(bytes.len(), 2 + 3 * 40);

    let decoded = decode(FileKind::GuildLogs, &bytes).unwrap();
    assert_eq!(decoded.root.get("count"), Some(&Value::Int16(3)));
    let entries = decoded.root.get("entries").and_then(Value::as_list).unwrap();
    assert_eq!(entries.len(), 3);
    let second = entries[1].as_record().unwrap();
    assert_eq!(second.get("character_name"), Some(&Value::Text("Hero1".into())));
    assert_eq!(second.get("level"), Some(&Value::Int16(11)));
    assert_eq!(second.get("day"), Some(&Value::Float32(1.5)));

    let encoded = Codec::default()
        .encode(schema::schema(FileKind::GuildLogs), &decoded.root)
        .unwrap();
    assert_eq!(encoded, bytes);
}

#[test]
fn test_guild_log_empty() {
    let decoded = decode(FileKind::GuildLogs, &[0, 0]).unwrap();
    assert_eq!(decoded.root.get("entries"), Some(&Value::List(Vec::new())));
}

#[test]
fn test_count_exceeds_data() {
    let err = decode(FileKind::GuildLogs, &guild_log(5, 3)).unwrap_err();
    assert_eq!(err.offset, 2);
    assert_eq!(
        err.reason,
        ErrorKind::CountMismatch {
            field: "count",
            count: 5,
            available: 3
        }
    );
}

#[test]
fn test_negative_count() {
    let err = decode(FileKind::GuildLogs, &guild_log(-1, 0)).unwrap_err();
    assert!(matches!(
        err.reason,
        ErrorKind::CountMismatch { count: -1, .. }
    ));
}

#[test]
fn test_encode_count_disagrees_with_entries() {
    let mut root = decode(FileKind::GuildLogs, &guild_log(2, 2)).unwrap().root;
    if let Some(count) = root.get_mut("count") {
        *count = Value::Int16(4);
    }
    let err = Codec::default()
        .encode(schema::schema(FileKind::GuildLogs), &root)
        .unwrap_err();
    assert_eq!(
        err.reason,
        ErrorKind::CountMismatch {
            field: "count",
            count: 4,
            available: 2
        }
    );
}

// =============================================================================
// Truncation and trailing data
// =============================================================================

#[test]
fn test_truncated_slot() {
    let mut bytes = encode_blank(FileKind::Monsters);
    bytes.pop();
    let err = decode(FileKind::Monsters, &bytes).unwrap_err();
    assert_eq!(err.kind, FileKind::Monsters);
    assert_eq!(err.offset, bytes.len() + 1 - DATA05);
    assert_eq!(
        err.reason,
        ErrorKind::TruncatedBuffer {
            needed: DATA05,
            remaining: DATA05 - 1
        }
    );
}

#[test]
fn test_every_kind_reports_truncation_at_slot_start() {
    for kind in FileKind::ALL {
        let mut bytes = encode_blank(kind);
        bytes.pop();
        let err = decode(kind, &bytes).unwrap_err();
        let (offset, needed) = match schema::schema(kind).slot_len() {
            Some(slot) => (bytes.len() + 1 - slot, slot),
            // The count prefix is the only thing in a blank guild log
            None => (0, 2),
        };
        assert_eq!(err.kind, kind);
        assert_eq!(err.offset, offset, "{kind}");
        assert_eq!(
            err.reason,
            ErrorKind::TruncatedBuffer {
                needed,
                remaining: needed - 1
            },
            "{kind}"
        );
    }
}

#[test]
fn test_empty_buffer() {
    let err = decode(FileKind::Spells, &[]).unwrap_err();
    assert_eq!(err.offset, 0);
    assert!(matches!(err.reason, ErrorKind::TruncatedBuffer { .. }));
}

#[test]
fn test_partial_trailing_character() {
    let mut bytes = encode_blank(FileKind::Characters);
    bytes.extend(std::iter::repeat_n(0u8, DATA04 + 100));
    let err = decode(FileKind::Characters, &bytes).unwrap_err();
    assert_eq!(err.offset, 3 * DATA04);
    assert_eq!(
        err.reason,
        ErrorKind::TruncatedBuffer {
            needed: DATA04,
            remaining: 100
        }
    );
}

#[test]
fn test_trailing_characters_counted_by_slots() {
    let mut bytes = encode_blank(FileKind::Characters);
    bytes.extend(std::iter::repeat_n(0u8, 2 * DATA04));
    let decoded = decode(FileKind::Characters, &bytes).unwrap();
    let characters = decoded.root.get("characters").and_then(Value::as_list).unwrap();
    assert_eq!(characters.len(), 2);
}

#[test]
fn test_trailing_bytes() {
    let mut bytes = guild_log(1, 1);
    bytes.extend_from_slice(&[1, 2, 3]);
    let err = decode(FileKind::GuildLogs, &bytes).unwrap_err();
    assert_eq!(err.offset, 42);
    assert_eq!(err.reason, ErrorKind::TrailingBytes { count: 3 });

    let lenient = Codec::new(CodecConfig {
        allow_trailing_bytes: true,
        ..CodecConfig::default()
    });
    let decoded = lenient.decode_bytes(FileKind::GuildLogs, &bytes).unwrap();
    assert_eq!(decoded.root.get("count"), Some(&Value::Int16(1)));
}

// =============================================================================
// Slot residue
// =============================================================================

#[test]
fn test_residue_restores_slot_slack() {
    let mut bytes = encode_blank(FileKind::Spells);
    // Garbage after the count field, inside its slot
    bytes[DATA02 + 10] = 0xCD;
    bytes[DATA02 + 11] = 0xCD;

    let decoded = decode(FileKind::Spells, &bytes).unwrap();
    assert_eq!(decoded.residue.len(), 1);
    assert_eq!(decoded.residue.get(1).map(<[u8]>::len), Some(DATA02 - 2));

    let codec = Codec::default();
    let exact = codec.encode_decoded(&decoded).unwrap();
    assert_eq!(exact, bytes);

    let clean = codec
        .encode(schema::schema(FileKind::Spells), &decoded.root)
        .unwrap();
    assert_eq!(clean, encode_blank(FileKind::Spells));
}

#[test]
fn test_residue_of_wrong_length_is_ignored() {
    let mut residue = Residue::new();
    residue.insert(0, vec![0xEE; 3]);
    let bytes = Codec::default()
        .encode_with_residue(
            schema::schema(FileKind::Spells),
            &blank(FileKind::Spells),
            &residue,
        )
        .unwrap();
    assert_eq!(bytes, encode_blank(FileKind::Spells));
}

// =============================================================================
// Text
// =============================================================================

#[test]
fn test_version_text() {
    let mut root = blank(FileKind::Monsters);
    if let Some(version) = root.get_mut("version") {
        *version = Value::Text("Version 1.1".into());
    }
    let bytes = Codec::default()
        .encode(schema::schema(FileKind::Monsters), &root)
        .unwrap();
    assert_eq!(&bytes[..2], &11u16.to_le_bytes());
    assert_eq!(&bytes[2..13], b"Version 1.1");
    assert!(bytes[13..DATA05].iter().all(|b| *b == 0));

    let decoded = decode(FileKind::Monsters, &bytes).unwrap();
    assert_eq!(decoded.root.get("version"), Some(&Value::Text("Version 1.1".into())));
}

#[test]
fn test_text_length_prefix_over_capacity() {
    let mut bytes = encode_blank(FileKind::Spells);
    bytes[..2].copy_from_slice(&(DATA02 as u16).to_le_bytes());
    let err = decode(FileKind::Spells, &bytes).unwrap_err();
    assert_eq!(err.offset, 0);
    assert_eq!(
        err.reason,
        ErrorKind::TextOverflow {
            field: "version",
            len: DATA02,
            capacity: DATA02 - 2
        }
    );
}

#[test]
fn test_text_too_long_to_encode() {
    let mut root = decode(FileKind::GuildLogs, &guild_log(1, 1)).unwrap().root;
    if let Some(Value::List(entries)) = root.get_mut("entries")
        && let Some(Value::Record(entry)) = entries.first_mut()
        && let Some(name) = entry.get_mut("character_name")
    {
        *name = Value::Text("X".repeat(31));
    }
    let err = Codec::default()
        .encode(schema::schema(FileKind::GuildLogs), &root)
        .unwrap_err();
    assert_eq!(
        err.reason,
        ErrorKind::TextOverflow {
            field: "character_name",
            len: 31,
            capacity: 30
        }
    );
}

#[test]
fn test_unencodable_text() {
    let mut root = blank(FileKind::Spells);
    if let Some(version) = root.get_mut("version") {
        *version = Value::Text("Мордор".into());
    }
    let err = Codec::default()
        .encode(schema::schema(FileKind::Spells), &root)
        .unwrap_err();
    assert_eq!(
        err.reason,
        ErrorKind::UnencodableText {
            field: "version",
            ch: 'М'
        }
    );
}

#[test]
fn test_nul_padding() {
    let root = decode(FileKind::GuildLogs, &guild_log(1, 1)).unwrap().root;
    let codec = Codec::new(CodecConfig {
        text_padding: TextPadding::Nul,
        ..CodecConfig::default()
    });
    let bytes = codec
        .encode(schema::schema(FileKind::GuildLogs), &root)
        .unwrap();
    assert_eq!(&bytes[2..7], b"Hero0");
    assert!(bytes[7..32].iter().all(|b| *b == 0));
}

fn rename_first_entry(root: &mut Record, name: &str) {
    if let Some(Value::List(entries)) = root.get_mut("entries")
        && let Some(Value::Record(entry)) = entries.first_mut()
        && let Some(slot) = entry.get_mut("character_name")
    {
        *slot = Value::Text(name.to_string());
    }
}

#[test]
fn test_trailing_pad_characters_are_not_content() {
    let schema = schema::schema(FileKind::GuildLogs);
    for (padding, name) in [(TextPadding::Space, "Zorn\0"), (TextPadding::Nul, "Zorn ")] {
        let codec = Codec::new(CodecConfig {
            text_padding: padding,
            ..CodecConfig::default()
        });
        let mut root = decode(FileKind::GuildLogs, &guild_log(1, 1)).unwrap().root;
        rename_first_entry(&mut root, name);

        let bytes = codec.encode(schema, &root).unwrap();
        assert_eq!(&bytes[2..6], b"Zorn");
        assert!(bytes[6..32].iter().all(|b| *b == padding.byte()), "{padding:?}");

        let mut cursor = ReadCursor::new(&bytes);
        let decoded = codec.decode(schema, &mut cursor).unwrap();
        assert_eq!(codec.encode(schema, &decoded.root).unwrap(), bytes, "{padding:?}");
    }
}

#[test]
fn test_trailing_pad_characters_do_not_count_against_width() {
    let schema = schema::schema(FileKind::GuildLogs);
    let mut root = decode(FileKind::GuildLogs, &guild_log(1, 1)).unwrap().root;
    let name = format!("{}   ", "A".repeat(30));
    rename_first_entry(&mut root, &name);
    let bytes = Codec::default().encode(schema, &root).unwrap();
    assert_eq!(&bytes[2..32], "A".repeat(30).as_bytes());
}

// =============================================================================
// Shape checks
// =============================================================================

#[test]
fn test_missing_field() {
    let root: Record = blank(FileKind::HallOfRecords)
        .into_iter()
        .filter(|(name, _)| *name != "records")
        .collect();
    let err = Codec::default()
        .encode(schema::schema(FileKind::HallOfRecords), &root)
        .unwrap_err();
    assert!(matches!(err.reason, ErrorKind::LayoutMismatch { ref field, .. } if field == "records"));
}

#[test]
fn test_unknown_field() {
    let mut root = blank(FileKind::GuildLogs);
    root.push("bonus", Value::Int16(1));
    let err = Codec::default()
        .encode(schema::schema(FileKind::GuildLogs), &root)
        .unwrap_err();
    assert!(matches!(err.reason, ErrorKind::LayoutMismatch { ref field, .. } if field == "bonus"));
}

#[test]
fn test_fixed_array_length() {
    let mut root = blank(FileKind::Automap);
    if let Some(Value::List(floors)) = root.get_mut("floors") {
        floors.pop();
    }
    let err = Codec::default()
        .encode(schema::schema(FileKind::Automap), &root)
        .unwrap_err();
    assert_eq!(
        err.reason,
        ErrorKind::ArrayLength {
            field: "floors",
            expected: 15,
            found: 14
        }
    );
}

#[test]
fn test_integer_out_of_range() {
    let mut root = blank(FileKind::GuildLogs);
    if let Some(count) = root.get_mut("count") {
        *count = Value::Int32(40_000);
    }
    let err = Codec::default()
        .encode(schema::schema(FileKind::GuildLogs), &root)
        .unwrap_err();
    assert_eq!(
        err.reason,
        ErrorKind::OutOfRange {
            field: "count",
            value: 40_000,
            width: "Int16"
        }
    );
}

#[test]
fn test_wider_integer_variant_accepted() {
    let mut root = blank(FileKind::Monsters);
    if let Some(count) = root.get_mut("count") {
        *count = Value::Int64(401);
    }
    let bytes = Codec::default()
        .encode(schema::schema(FileKind::Monsters), &root)
        .unwrap();
    assert_eq!(&bytes[2 * DATA05..2 * DATA05 + 2], &401i16.to_le_bytes());
}
