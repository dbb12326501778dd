//! The reconciliation pass driver.

use std::collections::BTreeSet;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use lodestone_model::{Definition, DefinitionSet, ReconcileMode};
use lodestone_store::ContentStore;
use lodestone_types::RecordId;
use tracing::{debug, info, warn};

use crate::config::EngineConfig;
use crate::detector::EditDetector;
use crate::error::{EngineError, EngineResult};
use crate::executor::{WriteExecutor, WriteOutcome};
use crate::guard::SuppressionGuard;
use crate::locator::RecordLocator;
use crate::prune::Pruner;
use crate::registry::Registry;
use crate::report::RunReport;

/// Drives reconciliation passes over every registered definition set.
///
/// A pass walks each set in registration order: locate the record for
/// each definition, create or update it per the set's mode, then sweep
/// withdrawn records if the set allows deletion. One definition failing
/// never stops the rest of the pass.
pub struct Reconciler {
    store: Arc<dyn ContentStore>,
    registry: Registry,
    config: EngineConfig,
    guard: SuppressionGuard,
    running: AtomicBool,
}

impl Reconciler {
    pub fn new(store: Arc<dyn ContentStore>, registry: Registry) -> Self {
        Self::with_config(store, registry, EngineConfig::default())
    }

    pub fn with_config(
        store: Arc<dyn ContentStore>,
        registry: Registry,
        config: EngineConfig,
    ) -> Self {
        Self {
            store,
            registry,
            config,
            guard: SuppressionGuard::new(),
            running: AtomicBool::new(false),
        }
    }

    /// The suppression guard shared with this reconciler's writes.
    #[must_use]
    pub fn guard(&self) -> &SuppressionGuard {
        &self.guard
    }

    /// An edit detector wired to the same store and suppression guard,
    /// for the host to feed save events into.
    #[must_use]
    pub fn detector(&self) -> EditDetector {
        EditDetector::new(self.store.clone(), self.guard.clone())
    }

    /// Runs one full reconciliation pass and reports what happened.
    ///
    /// Re-entrant calls are refused: if a pass is already running on
    /// this reconciler, the nested call logs a warning and returns an
    /// empty report without touching the store.
    pub fn reconcile(&self) -> RunReport {
        let Ok(_pass) = self.begin_pass() else {
            warn!("reconciliation already in progress, skipping nested pass");
            return RunReport::new();
        };

        let mut report = RunReport::new();
        let locator = RecordLocator::new(self.store.clone());
        let executor = WriteExecutor::new(
            self.store.clone(),
            self.guard.clone(),
            self.config.default_status.clone(),
        );
        let pruner = Pruner::new(self.store.clone());

        for set in self.registry.sets() {
            self.reconcile_set(set, &locator, &executor, &pruner, &mut report);
        }

        info!(
            created = report.created,
            updated = report.updated,
            deleted = report.deleted,
            skipped_edited = report.skipped_edited,
            failed = report.failed,
            "reconciliation pass finished"
        );
        report
    }

    fn reconcile_set(
        &self,
        set: &DefinitionSet,
        locator: &RecordLocator,
        executor: &WriteExecutor,
        pruner: &Pruner,
        report: &mut RunReport,
    ) {
        debug!(
            record_type = %set.record_type,
            mode = %set.mode,
            definitions = set.definitions.len(),
            "reconciling definition set"
        );
        let declared: BTreeSet<String> = set.slugs().map(str::to_string).collect();
        let mut processed = BTreeSet::new();

        for definition in &set.definitions {
            match self.reconcile_definition(set, definition, locator, executor, report) {
                Ok(id) => {
                    processed.insert(id);
                }
                Err(err) => {
                    warn!(
                        record_type = %set.record_type,
                        slug = %definition.slug,
                        error = %err,
                        "failed to reconcile definition"
                    );
                    report.failed += 1;
                }
            }
        }

        if set.allow_deletion {
            pruner.prune(&set.record_type, &declared, &processed, report);
        }
    }

    /// Reconciles one definition and returns the id of its record, created
    /// or found. The id feeds the processed set so the pruner never mistakes
    /// a skipped or held record for a withdrawn one.
    fn reconcile_definition(
        &self,
        set: &DefinitionSet,
        definition: &Definition,
        locator: &RecordLocator,
        executor: &WriteExecutor,
        report: &mut RunReport,
    ) -> EngineResult<RecordId> {
        let Some(record) = locator.find(&set.record_type, &definition.slug)? else {
            let id = executor.create(&set.record_type, definition)?;
            report.created += 1;
            return Ok(id);
        };

        match set.mode {
            ReconcileMode::None => {
                report.held += 1;
            }
            ReconcileMode::Smart => match executor.smart_update(&record, definition)? {
                WriteOutcome::Updated => report.updated += 1,
                WriteOutcome::SkippedEdited => report.skipped_edited += 1,
                WriteOutcome::Unchanged => report.unchanged += 1,
            },
            ReconcileMode::Force => {
                executor.force_update(&record, definition)?;
                report.updated += 1;
            }
        }
        Ok(record.id)
    }

    fn begin_pass(&self) -> Result<PassGuard<'_>, EngineError> {
        self.running
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .map_err(|_| EngineError::AlreadyRunning)?;
        Ok(PassGuard {
            running: &self.running,
        })
    }
}

/// Clears the running latch on every exit path out of a pass.
struct PassGuard<'a> {
    running: &'a AtomicBool,
}

impl Drop for PassGuard<'_> {
    fn drop(&mut self) {
        self.running.store(false, Ordering::SeqCst);
    }
}
