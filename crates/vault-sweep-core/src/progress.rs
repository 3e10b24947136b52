/// Trait for reporting scan progress.
///
/// CLI implements with tracing/indicatif. All methods have default no-op
/// implementations.
pub trait ProgressReporter: Send + Sync {
    fn on_scan_start(&self) {}
    fn on_document_scanned(&self, _documents_scanned: usize, _current_path: &str) {}
    fn on_scan_complete(&self, _orphans_found: usize, _duration_secs: f64) {}
}

/// No-op progress reporter for silent operation.
pub struct SilentReporter;

impl ProgressReporter for SilentReporter {}
