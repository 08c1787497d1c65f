//! Key-value persistence backends.
//!
//! Backends never surface errors to the game: failures are logged and a
//! read falls back to the caller's default.

use super::snapshot::SaveError;
use crate::core::constants::SAVE_VERSION_MAGIC;
use serde::de::DeserializeOwned;
use serde::Serialize;
use sha2::{Digest, Sha256};
use std::collections::HashMap;
use std::fs;
use std::io::{self, ErrorKind};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

pub trait Storage {
    /// Raw value for `key`, `None` if absent or unreadable.
    fn read(&self, key: &str) -> Option<String>;

    /// Stores `value` under `key`; failures are logged and dropped.
    fn write(&mut self, key: &str, value: &str);

    /// Decodes `key` as JSON, returning `fallback` on any failure.
    fn load<T: DeserializeOwned>(&self, key: &str, fallback: T) -> T
    where
        Self: Sized,
    {
        let Some(raw) = self.read(key) else {
            return fallback;
        };
        match serde_json::from_str(&raw) {
            Ok(value) => value,
            Err(e) => {
                warn!(key, error = %e, "stored value is not valid JSON, using fallback");
                fallback
            }
        }
    }

    /// Encodes `value` as JSON under `key`.
    fn save<T: Serialize>(&mut self, key: &str, value: &T)
    where
        Self: Sized,
    {
        match serde_json::to_string(value) {
            Ok(json) => self.write(key, &json),
            Err(e) => warn!(key, error = %e, "failed to encode value, not saved"),
        }
    }
}

/// In-process storage for tests and the simulator.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    entries: HashMap<String, String>,
    writes: u64,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of successful writes so far.
    pub fn writes(&self) -> u64 {
        self.writes
    }
}

impl Storage for MemoryStorage {
    fn read(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn write(&mut self, key: &str, value: &str) {
        self.entries.insert(key.to_string(), value.to_string());
        self.writes += 1;
    }
}

/// One checksummed file per key under a directory.
///
/// File format:
/// - Version magic (8 bytes)
/// - Payload length (4 bytes)
/// - UTF-8 payload (variable length)
/// - SHA256 checksum over the three fields above (32 bytes)
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// `~/.luckroll`, if a home directory can be found.
    pub fn default_dir() -> Option<PathBuf> {
        dirs::home_dir().map(|home| home.join(".luckroll"))
    }

    pub fn open_default() -> io::Result<Self> {
        let dir = Self::default_dir().ok_or_else(|| {
            io::Error::new(ErrorKind::NotFound, "Could not determine home directory")
        })?;
        fs::create_dir_all(&dir)?;
        Ok(Self::new(dir))
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.dat"))
    }

    /// Writes a framed payload.
    pub fn write_framed(path: &Path, payload: &[u8]) -> Result<(), SaveError> {
        let len = u32::try_from(payload.len())
            .map_err(|_| SaveError::Framing("payload larger than 4 GiB".to_string()))?;
        let magic = SAVE_VERSION_MAGIC.to_le_bytes();
        let len_bytes = len.to_le_bytes();

        let mut hasher = Sha256::new();
        hasher.update(magic);
        hasher.update(len_bytes);
        hasher.update(payload);
        let checksum = hasher.finalize();

        let mut bytes = Vec::with_capacity(8 + 4 + payload.len() + 32);
        bytes.extend_from_slice(&magic);
        bytes.extend_from_slice(&len_bytes);
        bytes.extend_from_slice(payload);
        bytes.extend_from_slice(&checksum);

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        // Atomic replace via rename.
        let tmp = path.with_extension("tmp");
        fs::write(&tmp, &bytes)?;
        fs::rename(&tmp, path)?;
        Ok(())
    }

    /// Reads and verifies a framed payload.
    pub fn read_framed(path: &Path) -> Result<Vec<u8>, SaveError> {
        let bytes = fs::read(path)?;
        if bytes.len() < 8 + 4 + 32 {
            return Err(SaveError::Framing("file too short".to_string()));
        }
        let (magic, rest) = bytes.split_at(8);
        let (len_bytes, rest) = rest.split_at(4);

        let mut magic_arr = [0u8; 8];
        magic_arr.copy_from_slice(magic);
        let version = u64::from_le_bytes(magic_arr);
        if version != SAVE_VERSION_MAGIC {
            return Err(SaveError::Framing(format!(
                "invalid save version: expected 0x{SAVE_VERSION_MAGIC:016X}, got 0x{version:016X}"
            )));
        }

        let mut len_arr = [0u8; 4];
        len_arr.copy_from_slice(len_bytes);
        let len = u32::from_le_bytes(len_arr) as usize;
        if rest.len() != len + 32 {
            return Err(SaveError::Framing("length mismatch".to_string()));
        }
        let (payload, stored) = rest.split_at(len);

        let mut hasher = Sha256::new();
        hasher.update(magic);
        hasher.update(len_bytes);
        hasher.update(payload);
        if hasher.finalize().as_slice() != stored {
            return Err(SaveError::ChecksumMismatch);
        }
        Ok(payload.to_vec())
    }
}

impl Storage for FileStorage {
    fn read(&self, key: &str) -> Option<String> {
        let path = self.path_for(key);
        match Self::read_framed(&path) {
            Ok(payload) => match String::from_utf8(payload) {
                Ok(text) => Some(text),
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "save payload is not UTF-8");
                    None
                }
            },
            Err(SaveError::Io(e)) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %path.display(), "no save file");
                None
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "failed to read save file");
                None
            }
        }
    }

    fn write(&mut self, key: &str, value: &str) {
        let path = self.path_for(key);
        if let Err(e) = Self::write_framed(&path, value.as_bytes()) {
            warn!(path = %path.display(), error = %e, "failed to write save file");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::game_state::GameState;
    use crate::numeric::Credits;

    #[test]
    fn test_memory_storage_round_trip() {
        let mut storage = MemoryStorage::new();
        let mut state = GameState::new(5);
        state.credits = Credits::from(1234u64);
        storage.save("save", &state);

        let loaded: GameState = storage.load("save", GameState::new(0));
        assert_eq!(loaded.credits, Credits::from(1234u64));
        assert_eq!(storage.writes(), 1);
    }

    #[test]
    fn test_load_missing_key_uses_fallback() {
        let storage = MemoryStorage::new();
        let value: u32 = storage.load("missing", 7);
        assert_eq!(value, 7);
    }

    #[test]
    fn test_load_bad_json_uses_fallback() {
        let mut storage = MemoryStorage::new();
        storage.write("k", "{{{{");
        let value: Vec<u8> = storage.load("k", vec![1]);
        assert_eq!(value, vec![1]);
    }

    #[test]
    fn test_file_storage_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let mut storage = FileStorage::new(dir.path());
        storage.write("save", "{\"credits\":\"42\"}");
        assert_eq!(storage.read("save").as_deref(), Some("{\"credits\":\"42\"}"));
        assert!(storage.read("other").is_none());
    }

    #[test]
    fn test_file_storage_detects_corruption() {
        let dir = tempfile::tempdir().unwrap();
        let mut storage = FileStorage::new(dir.path());
        storage.write("save", "payload");

        let path = dir.path().join("save.dat");
        let mut bytes = fs::read(&path).unwrap();
        bytes[13] ^= 0xFF;
        fs::write(&path, &bytes).unwrap();

        assert!(matches!(
            FileStorage::read_framed(&path),
            Err(SaveError::ChecksumMismatch)
        ));
        assert!(storage.read("save").is_none());
    }

    #[test]
    fn test_file_storage_rejects_wrong_magic() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("save.dat");
        fs::write(&path, vec![0u8; 64]).unwrap();
        assert!(matches!(
            FileStorage::read_framed(&path),
            Err(SaveError::Framing(_))
        ));
    }
}
