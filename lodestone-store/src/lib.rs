//! Store layer for Lodestone.
//!
//! The engine reconciles against a [`ContentStore`]: a narrow view of
//! whatever the host application keeps its content in. Hosts implement the
//! trait over their real storage; two reference implementations ship here
//! so the engine works out of the box:
//!
//! - **MemoryStore**: map-backed, insertion-ordered, for tests and
//!   embedded use
//! - **SqliteStore**: a single SQLite file, for simple standalone hosts
//!
//! Both are deliberately plain. Neither fires save hooks; a host store that
//! does should route them through the engine's edit detector.

mod error;
mod memory;
mod sqlite;
mod store;

pub use error::{StoreError, StoreResult};
pub use memory::MemoryStore;
pub use sqlite::SqliteStore;
pub use store::{ContentStore, RecordFilter};

/// Statuses a default (visitor-facing) query surfaces.
pub const LISTED_STATUSES: &[&str] = &["published"];

/// Status a soft delete parks records in.
pub const TRASHED_STATUS: &str = "trashed";
