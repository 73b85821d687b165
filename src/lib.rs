//! Lessbuild - LESS stylesheet build step for static site pipelines
//!
//! Lessbuild sits between a static site generator and an external `lessc`
//! compiler. For every configured LESS source it derives a deterministic
//! output path, delegates compilation to the compiler, and registers the
//! produced CSS file with the host pipeline's static-file registry so the
//! host's stale-output cleanup and write pass leave it alone.

pub mod artifacts;
pub mod build;
pub mod compiler;
pub mod config;
pub mod error;

// Re-exports for convenience
pub use artifacts::{ArtifactSink, CssArtifact, OutputFile, StaticFiles, TrackedFile};
pub use build::{compile_stylesheets, compile_with, derive_tasks, BuildReport, CompileTask};
pub use compiler::{Compiler, LesscCompiler};
pub use config::{ConfigWarning, SiteConfig};
pub use error::{LessbuildError, LessbuildResult};
