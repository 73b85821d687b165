//! Site configuration for lessbuild
//!
//! Configuration is read from a `lessbuild.toml` file in the site source
//! root. Precedence:
//! 1. CLI flags (highest priority)
//! 2. Environment variables (LESSBUILD_*)
//! 3. Site config file
//! 4. Built-in defaults (lowest priority)

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{LessbuildError, LessbuildResult};

/// Site configuration consumed by the build step
///
/// A missing `lessc` is not a load error: the orchestrator checks it once
/// per pass, so `check` can still inspect an incomplete configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteConfig {
    /// Site source root; candidate paths and `less_output` resolve under it
    #[serde(default = "default_source")]
    pub source: PathBuf,

    /// Destination root the host pipeline writes the finished site into
    #[serde(default = "default_destination")]
    pub destination: PathBuf,

    /// Path to the `lessc` executable (required to build)
    #[serde(default)]
    pub lessc: Option<PathBuf>,

    /// Ordered candidate source files, as supplied by the host
    ///
    /// The host has already applied its exclusion filtering; the only
    /// filtering done here is the `.less` extension match.
    #[serde(default)]
    pub less_files: Vec<String>,

    /// Output subdirectory relative to the source root
    #[serde(default = "default_less_output")]
    pub less_output: String,
}

fn default_source() -> PathBuf {
    PathBuf::from(".")
}

fn default_destination() -> PathBuf {
    PathBuf::from("_site")
}

fn default_less_output() -> String {
    "css".to_string()
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            source: default_source(),
            destination: default_destination(),
            lessc: None,
            less_files: Vec::new(),
            less_output: default_less_output(),
        }
    }
}

/// Non-fatal configuration warning surfaced to CLI users.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigWarning {
    pub key: String,
    pub file: PathBuf,
    pub line: Option<usize>,
    pub suggestion: Option<String>,
}

impl SiteConfig {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> LessbuildResult<Self> {
        let (config, _warnings) = Self::load_with_warnings(path)?;
        Ok(config)
    }

    /// Load configuration and collect non-fatal warnings (e.g. unknown keys).
    pub fn load_with_warnings(path: &Path) -> LessbuildResult<(Self, Vec<ConfigWarning>)> {
        if !path.exists() {
            return Err(LessbuildError::ConfigNotFound {
                path: path.to_path_buf(),
            });
        }

        let content = fs::read_to_string(path)?;

        let mut unknown_paths: Vec<String> = Vec::new();
        let deserializer = toml::de::Deserializer::new(&content);

        let config: Self = serde_ignored::deserialize(deserializer, |path| {
            unknown_paths.push(path.to_string());
        })
        .map_err(|e| LessbuildError::InvalidConfig {
            file: path.to_path_buf(),
            message: e.to_string(),
        })?;

        let warnings = unknown_paths
            .into_iter()
            .map(|path_str| {
                let key = path_str
                    .split('.')
                    .next_back()
                    .unwrap_or(path_str.as_str())
                    .to_string();
                ConfigWarning {
                    key: key.clone(),
                    file: path.to_path_buf(),
                    line: find_line_number(&content, &key),
                    suggestion: suggest_key(&key),
                }
            })
            .collect();

        Ok((config, warnings))
    }

    /// Apply environment variable overrides (LESSBUILD_* prefix)
    pub fn with_env_overrides(mut self) -> Self {
        // LESSBUILD_LESSC
        if let Ok(lessc) = std::env::var("LESSBUILD_LESSC") {
            if !lessc.is_empty() {
                self.lessc = Some(PathBuf::from(lessc));
            }
        }

        self
    }
}

fn find_line_number(content: &str, needle: &str) -> Option<usize> {
    for (i, line) in content.lines().enumerate() {
        if line.contains(needle) {
            return Some(i + 1);
        }
    }
    None
}

fn suggest_key(unknown: &str) -> Option<String> {
    const CANDIDATES: &[&str] = &[
        "source",
        "destination",
        "lessc",
        "less_files",
        "less_output",
    ];

    let mut best: Option<(&str, usize)> = None;
    for candidate in CANDIDATES {
        let dist = levenshtein(unknown, candidate);
        best = match best {
            None => Some((candidate, dist)),
            Some((_, best_dist)) if dist < best_dist => Some((candidate, dist)),
            Some(current) => Some(current),
        };
    }

    match best {
        Some((candidate, dist)) if dist <= 2 => Some(candidate.to_string()),
        _ => None,
    }
}

fn levenshtein(a: &str, b: &str) -> usize {
    if a == b {
        return 0;
    }

    let a_bytes = a.as_bytes();
    let b_bytes = b.as_bytes();

    let mut prev: Vec<usize> = (0..=b_bytes.len()).collect();
    let mut curr = vec![0usize; b_bytes.len() + 1];

    for (i, &ac) in a_bytes.iter().enumerate() {
        curr[0] = i + 1;
        for (j, &bc) in b_bytes.iter().enumerate() {
            let cost = if ac == bc { 0 } else { 1 };
            curr[j + 1] = std::cmp::min(
                std::cmp::min(prev[j + 1] + 1, curr[j] + 1),
                prev[j] + cost,
            );
        }
        prev.clone_from_slice(&curr);
    }

    prev[b_bytes.len()]
}
