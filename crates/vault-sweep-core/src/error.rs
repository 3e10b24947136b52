use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Error reading '{path}': {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Scan aborted: {0}")]
    ScanAborted(String),

    #[error("Error deleting '{path}': {reason}")]
    Delete { path: String, reason: String },

    #[error("Error moving '{from}' to '{to}': {reason}")]
    Move {
        from: String,
        to: String,
        reason: String,
    },
}
