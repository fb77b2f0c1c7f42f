//! A directory of MDATA files
//!
//! Loads every file kind present in a save directory (in parallel), keeps each
//! decoded file with its residue, and writes them back unchanged.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use rayon::prelude::*;

use crate::codec::{self, Codec, DecodedFile};
use crate::entities::MordorFile;
use crate::error::{Error, Result};
use crate::schema::FileKind;

/// Find the file for a kind in `dir`, matching the name case-insensitively
pub fn locate(dir: &Path, kind: FileKind) -> Option<PathBuf> {
    let wanted = kind.file_name();
    let exact = dir.join(&wanted);
    if exact.is_file() {
        return Some(exact);
    }
    std::fs::read_dir(dir)
        .ok()?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .find(|path| {
            path.is_file()
                && path
                    .file_name()
                    .and_then(|name| name.to_str())
                    .is_some_and(|name| name.eq_ignore_ascii_case(&wanted))
        })
}

fn present_kinds(dir: &Path) -> Vec<(FileKind, PathBuf)> {
    FileKind::ALL
        .iter()
        .filter_map(|kind| locate(dir, *kind).map(|path| (*kind, path)))
        .collect()
}

/// Every MDATA file found in one directory
#[derive(Debug, Clone, Default)]
pub struct SaveGame {
    files: BTreeMap<FileKind, DecodedFile>,
}

impl SaveGame {
    /// Decode every file kind present in `dir`; missing kinds are skipped
    pub fn load(dir: &Path, codec: &Codec) -> Result<Self> {
        let found = present_kinds(dir);
        tracing::info!(dir = %dir.display(), files = found.len(), "loading save directory");

        let files = found
            .par_iter()
            .map(|(kind, path)| {
                let bytes = std::fs::read(path).map_err(|e| Error::io(path, e))?;
                let decoded = codec.decode_bytes(*kind, &bytes)?;
                Ok((*kind, decoded))
            })
            .collect::<Result<BTreeMap<_, _>>>()?;

        Ok(Self { files })
    }

    pub fn get(&self, kind: FileKind) -> Option<&DecodedFile> {
        self.files.get(&kind)
    }

    pub fn insert(&mut self, file: DecodedFile) {
        self.files.insert(file.kind, file);
    }

    pub fn kinds(&self) -> impl Iterator<Item = FileKind> + '_ {
        self.files.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Typed view of one loaded file
    pub fn typed<T: MordorFile>(&self) -> Option<Result<T>> {
        self.files
            .get(&T::KIND)
            .map(|file| codec::from_record(T::KIND, file.root.clone()))
    }

    /// Encode every loaded file (with its residue) into `dir`
    pub fn write(&self, dir: &Path, codec: &Codec) -> Result<()> {
        std::fs::create_dir_all(dir).map_err(|e| Error::io(dir, e))?;
        self.files.par_iter().try_for_each(|(kind, file)| {
            let bytes = codec.encode_decoded(file)?;
            let path = dir.join(kind.file_name());
            std::fs::write(&path, &bytes).map_err(|e| Error::io(&path, e))?;
            tracing::debug!(kind = %kind, bytes = bytes.len(), "wrote file");
            Ok(())
        })
    }
}

// =============================================================================
// Verification
// =============================================================================

/// Result of re-encoding one file
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VerifyOutcome {
    /// Re-encoding reproduced the file byte-for-byte
    Identical,
    /// Bytes differ, but decoding the re-encoded file gives the same values
    Normalized { first_difference: usize },
    /// Decoding or re-encoding failed, or the values changed
    Failed(String),
}

/// Verification of one file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifyReport {
    pub kind: FileKind,
    pub path: PathBuf,
    pub len: usize,
    pub outcome: VerifyOutcome,
}

impl VerifyReport {
    pub fn passed(&self) -> bool {
        !matches!(self.outcome, VerifyOutcome::Failed(_))
    }
}

/// Decode and re-encode one buffer, comparing the results
pub fn verify_bytes(codec: &Codec, kind: FileKind, bytes: &[u8]) -> VerifyOutcome {
    let decoded = match codec.decode_bytes(kind, bytes) {
        Ok(decoded) => decoded,
        Err(e) => return VerifyOutcome::Failed(format!("decode: {e}")),
    };
    let encoded = match codec.encode_decoded(&decoded) {
        Ok(encoded) => encoded,
        Err(e) => return VerifyOutcome::Failed(format!("encode: {e}")),
    };
    if encoded == bytes {
        return VerifyOutcome::Identical;
    }

    let first_difference = encoded
        .iter()
        .zip(bytes)
        .position(|(a, b)| a != b)
        .unwrap_or(encoded.len().min(bytes.len()));
    match codec.decode_bytes(kind, &encoded) {
        Ok(again) if again.root == decoded.root => VerifyOutcome::Normalized { first_difference },
        Ok(_) => VerifyOutcome::Failed(format!(
            "values changed after re-encoding (first byte difference at {first_difference})"
        )),
        Err(e) => VerifyOutcome::Failed(format!("re-decode: {e}")),
    }
}

/// Verify every MDATA file present in `dir`
pub fn verify_dir(dir: &Path, codec: &Codec) -> Vec<VerifyReport> {
    present_kinds(dir)
        .into_par_iter()
        .map(|(kind, path)| match std::fs::read(&path) {
            Ok(bytes) => VerifyReport {
                kind,
                len: bytes.len(),
                outcome: verify_bytes(codec, kind, &bytes),
                path,
            },
            Err(e) => VerifyReport {
                kind,
                len: 0,
                outcome: VerifyOutcome::Failed(format!("read: {e}")),
                path,
            },
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{GuildLogEntry, GuildLogFile, SpellsFile};

    fn write_blank<T: MordorFile>(dir: &Path, name: &str) -> Vec<u8> {
        let bytes = T::blank().unwrap().encode().unwrap();
        std::fs::write(dir.join(name), &bytes).unwrap();
        bytes
    }

    #[test]
    fn test_locate_ignores_case() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("mdata2.mdr"), b"").unwrap();
        let found = locate(dir.path(), FileKind::Spells).unwrap();
        assert_eq!(found.file_name().unwrap(), "mdata2.mdr");
        assert!(locate(dir.path(), FileKind::Items).is_none());
    }

    #[test]
    fn test_load_and_write() {
        let source = tempfile::tempdir().unwrap();
        let spells = write_blank::<SpellsFile>(source.path(), "MDATA2.MDR");

        let mut log = GuildLogFile::blank().unwrap();
        log.push(GuildLogEntry {
            character_name: "Elric".into(),
            guild: 3,
            event: 1,
            level: 12,
            day: 40.5,
        });
        let log_bytes = log.encode().unwrap();
        std::fs::write(source.path().join("MDATA9.MDR"), &log_bytes).unwrap();

        let codec = Codec::default();
        let save = SaveGame::load(source.path(), &codec).unwrap();
        assert_eq!(save.len(), 2);
        assert_eq!(
            save.kinds().collect::<Vec<_>>(),
            vec![FileKind::Spells, FileKind::GuildLogs]
        );
        assert_eq!(save.typed::<GuildLogFile>().unwrap().unwrap(), log);
        assert!(save.typed::<SpellsFile>().unwrap().is_ok());

        let target = tempfile::tempdir().unwrap();
        save.write(target.path(), &codec).unwrap();
        assert_eq!(std::fs::read(target.path().join("MDATA2.MDR")).unwrap(), spells);
        assert_eq!(std::fs::read(target.path().join("MDATA9.MDR")).unwrap(), log_bytes);
    }

    #[test]
    fn test_load_reports_broken_file() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("MDATA5.MDR"), [0u8; 10]).unwrap();
        let err = SaveGame::load(dir.path(), &Codec::default()).unwrap_err();
        assert!(err.format_reason().is_some());
    }

    #[test]
    fn test_verify_dir() {
        let dir = tempfile::tempdir().unwrap();
        write_blank::<SpellsFile>(dir.path(), "MDATA2.MDR");
        std::fs::write(dir.path().join("MDATA9.MDR"), [5u8, 0]).unwrap();

        let reports = verify_dir(dir.path(), &Codec::default());
        assert_eq!(reports.len(), 2);
        assert_eq!(reports[0].kind, FileKind::Spells);
        assert_eq!(reports[0].outcome, VerifyOutcome::Identical);
        assert_eq!(reports[1].kind, FileKind::GuildLogs);
        assert!(!reports[1].passed());
    }

    #[test]
    fn test_verify_normalizes_text_padding() {
        // A NUL-padded name decodes fine but re-encodes space-padded
        let mut bytes = vec![1, 0];
        let mut name = [0u8; 30];
        name[..4].copy_from_slice(b"Zorn");
        bytes.extend_from_slice(&name);
        bytes.extend_from_slice(&[0u8; 10]);

        let outcome = verify_bytes(&Codec::default(), FileKind::GuildLogs, &bytes);
        assert_eq!(outcome, VerifyOutcome::Normalized { first_difference: 6 });
    }
}
