pub mod config;
pub mod mapping;
pub mod oracle;
pub mod sync;

pub use config::{load_config, SyncConfig};
pub use mapping::{to_canonical_json, CharMap, PLACEHOLDER};
pub use oracle::{BlockTransliterator, OracleError, Transliterator};
pub use sync::{FileOutcome, SyncError, SyncReport, Synchronizer};
