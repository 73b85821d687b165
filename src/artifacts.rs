//! Tracked output files and the static-file registry
//!
//! The host pipeline owns a registry of files that make up the final site
//! output. Registry membership is what keeps a file out of the host's
//! stale-output cleanup; on the write pass every entry is asked to
//! materialize itself under the destination root. Compiled stylesheets
//! enter the registry as `AlreadyMaterialized` because `lessc` has already
//! written their bytes into the source tree.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::LessbuildResult;

/// An output file with in-memory content, written on the host's write pass
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputFile {
    /// Path where this file should be written (relative to the destination root)
    path: PathBuf,
    /// Content to write
    content: String,
}

impl OutputFile {
    /// Create a new OutputFile
    pub fn new(path: impl Into<PathBuf>, content: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            content: content.into(),
        }
    }

    /// Get the output path
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Get the content
    pub fn content(&self) -> &str {
        &self.content
    }

    fn write(&self, dest_root: &Path) -> LessbuildResult<()> {
        let target = dest_root.join(&self.path);
        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&target, self.content.as_bytes())?;
        Ok(())
    }
}

/// Placeholder for a stylesheet the external compiler already wrote to disk
///
/// Records just enough identity for the host to resolve the destination
/// path and keep the file out of stale-output cleanup. The file is assumed
/// to exist at construction time; nothing here re-checks it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CssArtifact {
    source_root: PathBuf,
    dir_relative: PathBuf,
    name: String,
}

impl CssArtifact {
    /// Create a new CssArtifact
    pub fn new(
        source_root: impl Into<PathBuf>,
        dir_relative: impl Into<PathBuf>,
        name: impl Into<String>,
    ) -> Self {
        Self {
            source_root: source_root.into(),
            dir_relative: dir_relative.into(),
            name: name.into(),
        }
    }

    /// Compiled file name (`site.css`)
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Output directory relative to the source root
    pub fn dir_relative(&self) -> &Path {
        &self.dir_relative
    }

    /// Absolute path of the compiled file in the source tree
    pub fn source_path(&self) -> PathBuf {
        self.source_root.join(&self.dir_relative).join(&self.name)
    }

    /// Where the host resolves this artifact under a destination root
    pub fn destination(&self, dest_root: &Path) -> PathBuf {
        dest_root.join(&self.dir_relative).join(&self.name)
    }
}

/// A file tracked by the host pipeline's registry
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TrackedFile {
    /// Content still has to be written on the host's write pass
    NeedsWrite(OutputFile),
    /// Bytes are already on disk; the write pass must leave them alone
    AlreadyMaterialized(CssArtifact),
}

impl TrackedFile {
    /// Materialize this entry under `dest_root`.
    ///
    /// `AlreadyMaterialized` entries perform no I/O and always succeed,
    /// whatever the destination argument: their bytes were produced out of
    /// band by the external compiler.
    pub fn write(&self, dest_root: &Path) -> LessbuildResult<()> {
        match self {
            TrackedFile::NeedsWrite(output) => output.write(dest_root),
            TrackedFile::AlreadyMaterialized(_) => Ok(()),
        }
    }
}

/// Sink for newly produced artifacts
///
/// The orchestrator only needs the single `register` capability; the host
/// owns the collection behind it.
pub trait ArtifactSink {
    /// Append a tracked file to the registry
    fn register(&mut self, file: TrackedFile);
}

/// The host pipeline's static-file registry
///
/// Entries are kept in registration order and consulted by the host during
/// output-directory cleanup to decide what to preserve.
#[derive(Debug, Clone, Default)]
pub struct StaticFiles {
    files: Vec<TrackedFile>,
}

impl StaticFiles {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Tracked files in registration order
    pub fn files(&self) -> &[TrackedFile] {
        &self.files
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// The host's write pass: ask every tracked file to materialize itself.
    pub fn write_all(&self, dest_root: &Path) -> LessbuildResult<()> {
        for file in &self.files {
            file.write(dest_root)?;
        }
        Ok(())
    }
}

impl ArtifactSink for StaticFiles {
    fn register(&mut self, file: TrackedFile) {
        self.files.push(file);
    }
}

impl ArtifactSink for Vec<TrackedFile> {
    fn register(&mut self, file: TrackedFile) {
        self.push(file);
    }
}
