//! Compile orchestration for LESS stylesheets
//!
//! Runs once per generation pass: filters the host-supplied candidate list
//! to `.less` sources, derives each file's output location, shells out to
//! the compiler, and registers every produced stylesheet with the host's
//! static-file registry. Strictly sequential, in candidate order; the
//! first compile failure aborts the rest of the batch.

use std::fs;
use std::path::{Path, PathBuf};

use crate::artifacts::{ArtifactSink, CssArtifact, TrackedFile};
use crate::compiler::{Compiler, LesscCompiler};
use crate::config::SiteConfig;
use crate::error::{LessbuildError, LessbuildResult};

/// Extension of LESS sources, matched case-insensitively
const LESS_EXT: &str = ".less";

/// Everything needed to compile one stylesheet
///
/// Derived purely from the site roots and one candidate path; nothing here
/// touches the file system.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompileTask {
    /// Absolute path of the LESS source
    pub source_file: PathBuf,
    /// Directory the compiled file lands in
    pub output_dir: PathBuf,
    /// Compiled file name (`site.less` becomes `site.css`)
    pub output_file: String,
    /// Full path of the compiled file
    pub output_path: PathBuf,
    /// `output_dir` with the source-root prefix stripped
    pub output_dir_relative: PathBuf,
}

impl CompileTask {
    /// Derive the task for one candidate path.
    ///
    /// Returns `None` unless the candidate carries the `.less` extension in
    /// any case (`site.less`, `site.LESS`; not `site.less.bak`). The output
    /// name keeps only the basename, so candidates with equal basenames in
    /// different directories map to the same output file and the last one
    /// compiled wins.
    pub fn derive(source_root: &Path, less_output: &str, candidate: &str) -> Option<CompileTask> {
        if !is_less_file(candidate) {
            return None;
        }

        let name = Path::new(candidate).file_name().and_then(|n| n.to_str())?;
        let stem = &name[..name.len() - LESS_EXT.len()];
        let output_file = format!("{stem}.css");

        // Candidates and `less_output` come from the host with leading
        // slashes; they are still relative to the source root.
        let source_file = source_root.join(candidate.trim_start_matches('/'));
        let output_dir = source_root.join(less_output.trim_matches('/'));
        let output_path = output_dir.join(&output_file);
        let output_dir_relative = output_dir
            .strip_prefix(source_root)
            .map(Path::to_path_buf)
            .unwrap_or_else(|_| output_dir.clone());

        Some(CompileTask {
            source_file,
            output_dir,
            output_file,
            output_path,
            output_dir_relative,
        })
    }
}

fn is_less_file(candidate: &str) -> bool {
    candidate.to_lowercase().ends_with(LESS_EXT)
}

/// Summary of one orchestration pass
#[derive(Debug, Clone, Default)]
pub struct BuildReport {
    /// Output paths compiled and registered, in candidate order
    pub compiled: Vec<PathBuf>,
    /// Candidates skipped for not being LESS sources
    pub skipped: Vec<String>,
}

/// Derive the tasks a pass over `config` would run, without side effects.
pub fn derive_tasks(config: &SiteConfig) -> Vec<CompileTask> {
    config
        .less_files
        .iter()
        .filter_map(|candidate| CompileTask::derive(&config.source, &config.less_output, candidate))
        .collect()
}

/// Compile every qualifying candidate and register its output.
///
/// Fails with [`LessbuildError::MissingCompiler`] before any file is
/// processed when no compiler path is configured.
pub fn compile_stylesheets(
    config: &SiteConfig,
    sink: &mut dyn ArtifactSink,
    progress: &mut dyn FnMut(&CompileTask),
) -> LessbuildResult<BuildReport> {
    let program = config
        .lessc
        .as_ref()
        .ok_or(LessbuildError::MissingCompiler)?;
    let compiler = LesscCompiler::new(program);
    compile_with(config, &compiler, sink, progress)
}

/// [`compile_stylesheets`] with an explicit compiler implementation.
///
/// Per qualifying file: derive the task, create the output directory
/// (idempotent), invoke the compiler, and on success register an
/// already-materialized entry with the sink. Earlier registrations are
/// kept when a later file fails; there is no rollback.
pub fn compile_with(
    config: &SiteConfig,
    compiler: &dyn Compiler,
    sink: &mut dyn ArtifactSink,
    progress: &mut dyn FnMut(&CompileTask),
) -> LessbuildResult<BuildReport> {
    let mut report = BuildReport::default();

    for candidate in &config.less_files {
        let Some(task) = CompileTask::derive(&config.source, &config.less_output, candidate)
        else {
            report.skipped.push(candidate.clone());
            continue;
        };

        fs::create_dir_all(&task.output_dir)?;

        progress(&task);
        compiler.compile(&task.source_file, &task.output_path)?;

        // Register the output so the host won't clean it up.
        sink.register(TrackedFile::AlreadyMaterialized(CssArtifact::new(
            &config.source,
            &task.output_dir_relative,
            &task.output_file,
        )));
        report.compiled.push(task.output_path.clone());
    }

    Ok(report)
}
