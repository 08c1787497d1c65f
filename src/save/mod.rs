//! Persistence: JSON snapshots, share strings and storage backends.

pub mod snapshot;
pub mod storage;

pub use snapshot::{
    export_share_string, import_share_string, load_state, sanitize, to_json, validate, SaveError,
    SHARE_PREFIX,
};
pub use storage::{FileStorage, MemoryStorage, Storage};
