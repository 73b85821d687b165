//! External LESS compiler invocation
//!
//! The compiler is an opaque executable taking two positional path
//! arguments, input and output, with exit code zero meaning the output file
//! now holds valid CSS. Its stdout/stderr pass straight through to the
//! terminal; the exit status is the only signal observed here.

use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use crate::error::{LessbuildError, LessbuildResult};

/// Abstract compiler interface
pub trait Compiler {
    fn name(&self) -> &'static str;

    /// Probe whether the executable can be run at all
    fn is_available(&self) -> bool;

    /// Compile `source` into `output`, blocking until the compiler exits.
    ///
    /// There is no timeout: a hung compiler hangs the calling pass.
    fn compile(&self, source: &Path, output: &Path) -> LessbuildResult<()>;
}

/// Compiler backed by an external `lessc` executable
pub struct LesscCompiler {
    program: PathBuf,
}

impl LesscCompiler {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }

    /// Path of the underlying executable
    pub fn program(&self) -> &Path {
        &self.program
    }
}

impl Compiler for LesscCompiler {
    fn name(&self) -> &'static str {
        "lessc"
    }

    fn is_available(&self) -> bool {
        Command::new(&self.program)
            .arg("--version")
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .map(|s| s.success())
            .unwrap_or(false)
    }

    fn compile(&self, source: &Path, output: &Path) -> LessbuildResult<()> {
        // Positional invocation: <lessc> <input> <output>. The arguments go
        // to the process as a list, never through a shell, so paths with
        // whitespace stay intact.
        let status = Command::new(&self.program)
            .arg(source)
            .arg(output)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
            .map_err(|e| LessbuildError::CompilerSpawn {
                program: self.program.clone(),
                source: e,
            })?;

        if !status.success() {
            return Err(LessbuildError::CompilationFailed);
        }

        Ok(())
    }
}

/// Mock compiler for testing
///
/// Uses `Arc<Mutex<>>` internally so it can be cloned and shared. Records
/// every invocation; never touches the file system.
#[cfg(test)]
#[derive(Clone, Default)]
pub struct MockCompiler {
    calls: std::sync::Arc<std::sync::Mutex<Vec<(PathBuf, PathBuf)>>>,
    fail_on: Option<String>,
}

#[cfg(test)]
impl MockCompiler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fail any invocation whose source path contains `needle`
    pub fn failing_on(needle: impl Into<String>) -> Self {
        Self {
            calls: Default::default(),
            fail_on: Some(needle.into()),
        }
    }

    /// Recorded `(source, output)` invocations, in order
    pub fn calls(&self) -> Vec<(PathBuf, PathBuf)> {
        self.calls.lock().unwrap().clone()
    }
}

#[cfg(test)]
impl Compiler for MockCompiler {
    fn name(&self) -> &'static str {
        "mock"
    }

    fn is_available(&self) -> bool {
        true
    }

    fn compile(&self, source: &Path, output: &Path) -> LessbuildResult<()> {
        self.calls
            .lock()
            .unwrap()
            .push((source.to_path_buf(), output.to_path_buf()));

        if let Some(needle) = &self.fail_on {
            if source.to_string_lossy().contains(needle.as_str()) {
                return Err(LessbuildError::CompilationFailed);
            }
        }

        Ok(())
    }
}
