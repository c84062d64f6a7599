use std::path::PathBuf;

use thiserror::Error;

/// Failures while loading moddable rules from disk.
///
/// Game-rule denials (not enough gold, no free population, ...) are never
/// reported through this type; those are ordinary outcomes.
#[derive(Debug, Error)]
pub enum RulesError {
    #[error("could not read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid format: {0}")]
    InvalidFormat(#[from] serde_json::Error),

    #[error("constant `{name}` is out of range: {reason}")]
    OutOfRange { name: &'static str, reason: String },
}
