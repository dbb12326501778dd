//! Declarative content reconciliation engine.
//!
//! Hosts declare the records their code expects to exist and the engine
//! keeps a content store in line with those declarations:
//! - **Registry**: holds every declared definition set, validated on entry
//! - **Reconciler**: runs passes that create missing records, update
//!   drifted ones per the set's mode, and delete withdrawn ones
//! - **EditDetector**: watches save events and flags records a human has
//!   edited, so smart updates leave them alone
//!
//! # Reconciliation Pass
//!
//! 1. **Locate**: find each definition's record by its slug annotation
//! 2. **Create**: insert records for definitions that have none
//! 3. **Update**: rewrite drifted records, honoring mode and edited flags
//! 4. **Prune**: delete withdrawn records where the set allows deletion
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//!
//! use lodestone_engine::{Reconciler, Registry};
//! use lodestone_model::{Definition, DefinitionSet};
//! use lodestone_store::MemoryStore;
//!
//! let mut registry = Registry::new();
//! registry
//!     .register(
//!         DefinitionSet::new("doc")
//!             .definition(Definition::new("welcome", "Welcome").body("Hello.")),
//!     )
//!     .unwrap();
//!
//! let reconciler = Reconciler::new(Arc::new(MemoryStore::new()), registry);
//! let report = reconciler.reconcile();
//! assert_eq!(report.created, 1);
//! ```

mod config;
mod detector;
mod diff;
mod driver;
mod error;
mod executor;
mod guard;
mod locator;
mod prune;
mod registry;
mod report;

pub use config::EngineConfig;
pub use detector::EditDetector;
pub use diff::differs;
pub use driver::Reconciler;
pub use error::{EngineError, EngineResult, RegistrationError};
pub use executor::{WriteExecutor, WriteOutcome};
pub use guard::{SuppressionGuard, SuppressionScope};
pub use locator::RecordLocator;
pub use prune::Pruner;
pub use registry::Registry;
pub use report::RunReport;
