//! Reference-data error types.
//!
//! Structured errors for seed parsing and catalog construction. All
//! file-level errors carry the offending path so operators can diagnose
//! a broken seed without guesswork.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while loading or validating reference data.
#[derive(Debug, Error)]
pub enum ReferenceError {
    /// A required seed file was not found.
    #[error("seed file not found: {}", path.display())]
    FileNotFound {
        /// The missing path.
        path: PathBuf,
    },

    /// YAML parsing failed.
    #[error("failed to parse YAML seed at {}: {}", path.display(), source)]
    YamlParse {
        /// The file that failed to parse.
        path: PathBuf,
        /// The underlying serde_yaml error.
        source: serde_yaml::Error,
    },

    /// Two countries in the seed share an ISO-2 code.
    #[error("duplicate country ISO code {iso2:?} in seed")]
    DuplicateIsoCode {
        /// The duplicated code.
        iso2: String,
    },

    /// An ISO code does not match the expected format.
    #[error("invalid ISO code {code:?} (expected {expected} uppercase ASCII letters)")]
    InvalidIsoCode {
        /// The rejected code.
        code: String,
        /// Expected length (2 or 3).
        expected: usize,
    },

    /// Two data natures in the seed share a name.
    #[error("duplicate data nature {name:?} in seed")]
    DuplicateNature {
        /// The duplicated name.
        name: String,
    },

    /// Two transfer mechanisms in the seed share a name.
    #[error("duplicate transfer mechanism {name:?} in seed")]
    DuplicateMechanism {
        /// The duplicated name.
        name: String,
    },

    /// A seed entry has an empty name.
    #[error("empty name for {entry} entry in seed")]
    EmptyName {
        /// Which entry family carried the empty name.
        entry: &'static str,
    },

    /// A mechanism categorized `none` cannot require documentation.
    #[error("mechanism {name:?} is categorized 'none' but claims to require documentation")]
    ContradictoryMechanism {
        /// The offending mechanism.
        name: String,
    },

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic serde_yaml error (not file-specific).
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// Generic serde_json error (not file-specific).
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for reference-data operations.
pub type ReferenceResult<T> = Result<T, ReferenceError>;
