//! Shared model for Lodestone.
//!
//! Defines the vocabulary the registry, the engine and the stores all speak:
//! - **Definition / DefinitionSet**: the desired state declared in code
//! - **ReconcileMode**: per-type update policy (none, smart, force)
//! - **RecordFields / StoredRecord**: records as stores hold them
//! - **SaveEvent / SaveOrigin**: administrative saves reported by hosts
//!
//! Everything here is plain serializable data; behavior lives in the engine
//! crate.

mod definition;
mod event;
mod record;
mod set;

pub use definition::Definition;
pub use event::{SaveEvent, SaveOrigin};
pub use record::{RecordFields, StoredRecord};
pub use set::{DefinitionSet, ReconcileMode};
