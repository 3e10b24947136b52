use std::collections::{HashMap, HashSet};
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

use crate::config::{DeletePolicy, SweepConfig};
use crate::error::Error;
use crate::extractor;
use crate::progress::ProgressReporter;
use crate::report;
use crate::resolver;
use crate::vault::{Vault, VaultFile};

/// Per-candidate lifecycle, kept in a side table keyed by path instead of
/// as mutable flags on the file records. Deletion and undo are the only
/// transitions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Lifecycle {
    Active,
    Deleted {
        /// Path prior to deletion; required for undo because deletion moves
        /// the file while its identity must stay resolvable.
        original_path: String,
    },
}

#[derive(Debug)]
pub enum ScanOutcome {
    Completed(ScanStats),
    /// A scan was already in flight; the request was dropped, not queued.
    AlreadyRunning,
}

#[derive(Debug)]
pub struct ScanStats {
    pub documents_scanned: usize,
    pub references_found: usize,
    pub files_considered: usize,
    pub orphans_found: usize,
    pub scan_duration: Duration,
}

#[derive(Debug, Default)]
pub struct DeleteOutcome {
    pub succeeded: usize,
    /// (path, reason) for every per-file failure; one failure never aborts
    /// the batch.
    pub failed: Vec<(String, String)>,
}

#[derive(Debug, Default)]
pub struct UndoOutcome {
    pub restored: usize,
    pub not_found: usize,
}

/// Orchestrates scan → select → delete → undo over a vault.
///
/// All scan-time state (candidates, selection, lifecycle ledger, last
/// delete batch) is rebuilt on every successful scan and never persisted.
pub struct SweepEngine<V: Vault> {
    vault: V,
    config: SweepConfig,
    scan_in_progress: bool,
    candidates: Vec<VaultFile>,
    ledger: HashMap<String, Lifecycle>,
    selection: HashSet<String>,
    last_batch: Vec<String>,
}

impl<V: Vault> SweepEngine<V> {
    pub fn new(vault: V, config: SweepConfig) -> Self {
        Self {
            vault,
            config,
            scan_in_progress: false,
            candidates: Vec::new(),
            ledger: HashMap::new(),
            selection: HashSet::new(),
            last_batch: Vec::new(),
        }
    }

    pub fn config(&self) -> &SweepConfig {
        &self.config
    }

    /// Rebuild the candidate list from a fresh corpus scan.
    ///
    /// A second request while a scan is in flight is dropped. On failure the
    /// previous candidate list, selection and ledger are left untouched.
    pub fn scan(&mut self, reporter: &dyn ProgressReporter) -> Result<ScanOutcome, Error> {
        if self.scan_in_progress {
            debug!("Scan already in progress, request dropped");
            return Ok(ScanOutcome::AlreadyRunning);
        }
        self.scan_in_progress = true;
        let result = self.run_scan(reporter);
        self.scan_in_progress = false;
        result.map(ScanOutcome::Completed)
    }

    fn run_scan(&mut self, reporter: &dyn ProgressReporter) -> Result<ScanStats, Error> {
        let scan_start = Instant::now();
        reporter.on_scan_start();

        let files = self.vault.list_all_files().map_err(|e| match e {
            Error::ScanAborted(msg) => Error::ScanAborted(msg),
            other => Error::ScanAborted(other.to_string()),
        })?;
        let documents_scanned = files.iter().filter(|f| f.is_markup).count();

        let references = extractor::extract_references(&self.vault, &files, reporter);
        let orphans = resolver::resolve_orphans(&files, &references, &self.config);

        // Prior state is replaced only once the scan has fully succeeded.
        // A fresh scan selects every orphan and discards the delete ledger.
        self.selection = orphans.iter().map(|f| f.path.clone()).collect();
        self.ledger = orphans
            .iter()
            .map(|f| (f.path.clone(), Lifecycle::Active))
            .collect();
        self.last_batch.clear();

        let stats = ScanStats {
            documents_scanned,
            references_found: references.len(),
            files_considered: files.len(),
            orphans_found: orphans.len(),
            scan_duration: scan_start.elapsed(),
        };
        self.candidates = orphans;

        reporter.on_scan_complete(stats.orphans_found, stats.scan_duration.as_secs_f64());
        info!(
            "Scan complete: {} documents, {} references, {} unused files",
            stats.documents_scanned, stats.references_found, stats.orphans_found,
        );
        Ok(stats)
    }

    /// Delete every selected, not-yet-deleted candidate via the given
    /// policy. Exactly one destination is attempted per file; per-file
    /// failures are reported and the batch continues.
    pub fn delete_selected(&mut self, policy: DeletePolicy) -> DeleteOutcome {
        let targets: Vec<VaultFile> = self
            .candidates
            .iter()
            .filter(|f| self.selection.contains(&f.path) && !self.is_deleted(&f.path))
            .cloned()
            .collect();

        let mut outcome = DeleteOutcome::default();
        self.last_batch.clear();

        for file in &targets {
            let result = match policy {
                DeletePolicy::SoftTrash => self.vault.move_to_soft_trash(file),
                DeletePolicy::SystemTrash => self.vault.move_to_system_trash(file),
                DeletePolicy::Permanent => self.vault.permanently_delete(file),
            };
            match result {
                Ok(()) => {
                    self.ledger.insert(
                        file.path.clone(),
                        Lifecycle::Deleted {
                            original_path: file.path.clone(),
                        },
                    );
                    self.selection.remove(&file.path);
                    self.last_batch.push(file.path.clone());
                    outcome.succeeded += 1;
                    debug!("Deleted '{}'", file.path);
                }
                Err(err) => {
                    warn!("Failed to delete '{}': {}", file.path, err);
                    outcome.failed.push((file.path.clone(), err.to_string()));
                }
            }
        }

        info!(
            "Delete batch: {} succeeded, {} failed",
            outcome.succeeded,
            outcome.failed.len(),
        );
        outcome
    }

    /// Restore every selected, deleted candidate from the soft-trash
    /// location keyed by basename. Items absent from the soft trash are
    /// counted as not found; only the soft-trash policy guarantees undo.
    pub fn undo_selected(&mut self) -> UndoOutcome {
        let targets: Vec<(String, String, String)> = self
            .candidates
            .iter()
            .filter(|f| self.selection.contains(&f.path))
            .filter_map(|f| match self.ledger.get(&f.path) {
                Some(Lifecycle::Deleted { original_path }) => {
                    Some((f.path.clone(), f.name.clone(), original_path.clone()))
                }
                _ => None,
            })
            .collect();

        let mut outcome = UndoOutcome::default();
        for (path, name, original_path) in targets {
            self.try_restore(&path, &name, &original_path, &mut outcome);
        }
        outcome
    }

    /// Single-item undo.
    pub fn undo_file(&mut self, path: &str) -> UndoOutcome {
        let mut outcome = UndoOutcome::default();
        let target = self
            .candidates
            .iter()
            .find(|f| f.path == path)
            .and_then(|f| match self.ledger.get(&f.path) {
                Some(Lifecycle::Deleted { original_path }) => {
                    Some((f.name.clone(), original_path.clone()))
                }
                _ => None,
            });
        match target {
            Some((name, original_path)) => {
                self.try_restore(path, &name, &original_path, &mut outcome)
            }
            None => outcome.not_found += 1,
        }
        outcome
    }

    fn try_restore(
        &mut self,
        path: &str,
        name: &str,
        original_path: &str,
        outcome: &mut UndoOutcome,
    ) {
        let trash_path = self.vault.soft_trash_path(name);
        if !self.vault.exists_at_path(&trash_path) {
            debug!("'{}' not found in soft trash, cannot restore", name);
            outcome.not_found += 1;
            return;
        }
        match self.vault.move_file(&trash_path, original_path) {
            Ok(()) => {
                self.ledger.insert(path.to_string(), Lifecycle::Active);
                outcome.restored += 1;
                info!("Restored '{}'", original_path);
            }
            Err(err) => {
                warn!("Undo failed for '{}': {}", name, err);
                outcome.not_found += 1;
            }
        }
    }

    pub fn candidates(&self) -> &[VaultFile] {
        &self.candidates
    }

    pub fn is_selected(&self, path: &str) -> bool {
        self.selection.contains(path)
    }

    pub fn is_deleted(&self, path: &str) -> bool {
        matches!(self.ledger.get(path), Some(Lifecycle::Deleted { .. }))
    }

    pub fn original_path(&self, path: &str) -> Option<&str> {
        match self.ledger.get(path) {
            Some(Lifecycle::Deleted { original_path }) => Some(original_path),
            _ => None,
        }
    }

    /// Paths deleted by the most recent delete batch, in batch order.
    pub fn last_batch(&self) -> &[String] {
        &self.last_batch
    }

    pub fn select_all(&mut self) {
        self.selection = self.candidates.iter().map(|f| f.path.clone()).collect();
    }

    pub fn select_none(&mut self) {
        self.selection.clear();
    }

    pub fn set_selected(&mut self, path: &str, selected: bool) {
        if !self.candidates.iter().any(|f| f.path == path) {
            return;
        }
        if selected {
            self.selection.insert(path.to_string());
        } else {
            self.selection.remove(path);
        }
    }

    /// Additive selection of candidates whose name contains the query,
    /// case-insensitively. Never removes existing selections.
    pub fn select_matching(&mut self, query: &str) {
        let query = query.to_lowercase();
        if query.is_empty() {
            return;
        }
        let matching: Vec<String> = self
            .candidates
            .iter()
            .filter(|f| f.name.to_lowercase().contains(&query))
            .map(|f| f.path.clone())
            .collect();
        self.selection.extend(matching);
    }

    pub fn selected_active_count(&self) -> usize {
        self.candidates
            .iter()
            .filter(|f| self.selection.contains(&f.path) && !self.is_deleted(&f.path))
            .count()
    }

    pub fn selected_deleted_count(&self) -> usize {
        self.candidates
            .iter()
            .filter(|f| self.selection.contains(&f.path) && self.is_deleted(&f.path))
            .count()
    }

    pub fn export_report(&self) -> String {
        report::render_report(&self.candidates)
    }
}
