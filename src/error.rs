//! Error types for lessbuild
//!
//! Uses `thiserror` for library errors. Both error classes are fatal to the
//! generation pass: configuration errors abort before any file is touched,
//! compilation errors abort the remaining batch.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for lessbuild operations
pub type LessbuildResult<T> = Result<T, LessbuildError>;

/// Main error type for lessbuild operations
#[derive(Error, Debug)]
pub enum LessbuildError {
    /// No compiler path configured for the site
    #[error("missing 'lessc' path in site configuration")]
    MissingCompiler,

    /// Compiler exited with a non-zero status
    ///
    /// The exit status is the only signal observed from the compiler; its
    /// own diagnostics already went through to the terminal.
    #[error("LESS compilation error")]
    CompilationFailed,

    /// Compiler executable could not be spawned at all
    #[error("failed to run compiler '{program}': {source}")]
    CompilerSpawn {
        program: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Site configuration file does not exist
    #[error("configuration file not found: {path}")]
    ConfigNotFound { path: PathBuf },

    /// Site configuration file failed to parse
    #[error("invalid configuration in {file}: {message}")]
    InvalidConfig { file: PathBuf, message: String },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
