pub mod config;
pub mod engine;
pub mod error;
pub mod extractor;
pub mod progress;
pub mod report;
pub mod resolver;
pub mod vault;

pub use config::{DeletePolicy, ExtensionMode, SweepConfig};
pub use engine::{DeleteOutcome, ScanOutcome, ScanStats, SweepEngine, UndoOutcome};
pub use error::Error;
pub use progress::{ProgressReporter, SilentReporter};
pub use vault::{FsVault, Vault, VaultFile};
