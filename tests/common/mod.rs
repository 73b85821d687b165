//! Common test utilities for lessbuild integration tests.
//!
//! Provides `TestEnv` - an isolated site root in a temp directory, helpers
//! to write config and source files, stub `lessc` executables, and a runner
//! for the lessbuild binary.

// Not every test binary uses every helper.
#![allow(dead_code)]

use std::fs;
use std::path::PathBuf;
use std::process::{Command, Output};

use tempfile::TempDir;

/// Result of running a lessbuild CLI command
#[derive(Debug)]
pub struct TestResult {
    pub success: bool,
    pub exit_code: i32,
    pub stdout: String,
    pub stderr: String,
}

impl TestResult {
    /// Combine stdout and stderr
    pub fn combined_output(&self) -> String {
        format!("{}\n{}", self.stdout, self.stderr)
    }
}

/// Isolated test environment: a temp directory acting as the site root.
pub struct TestEnv {
    pub site_root: TempDir,
}

impl TestEnv {
    pub fn new() -> Self {
        Self {
            site_root: TempDir::new().expect("Failed to create temp site root"),
        }
    }

    /// Get path relative to the site root
    pub fn path(&self, relative: &str) -> PathBuf {
        self.site_root.path().join(relative)
    }

    /// Write a file under the site root, creating parent directories
    pub fn write_file(&self, relative: &str, content: &str) -> PathBuf {
        let path = self.path(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&path, content).unwrap();
        path
    }

    /// Write the site configuration file
    pub fn write_config(&self, content: &str) {
        self.write_file("lessbuild.toml", content);
    }

    /// Install a stub `lessc` that copies its input to its output
    /// and answers the `--version` probe.
    pub fn stub_lessc(&self) -> PathBuf {
        self.install_stub(
            "bin/lessc",
            "#!/bin/sh\n\
             if [ \"$1\" = \"--version\" ]; then echo \"lessc 3.13.1 (stub)\"; exit 0; fi\n\
             cat \"$1\" > \"$2\"\n",
        )
    }

    /// Stub `lessc` that also chatters on stdout while compiling.
    pub fn noisy_lessc(&self) -> PathBuf {
        self.install_stub(
            "bin/lessc-noisy",
            "#!/bin/sh\n\
             if [ \"$1\" = \"--version\" ]; then echo \"lessc 3.13.1 (stub)\"; exit 0; fi\n\
             echo \"stub: compiling $1\"\n\
             cat \"$1\" > \"$2\"\n",
        )
    }

    /// Stub `lessc` that always exits non-zero.
    pub fn failing_lessc(&self) -> PathBuf {
        self.install_stub("bin/lessc-fail", "#!/bin/sh\nexit 1\n")
    }

    /// Stub `lessc` that fails only for inputs whose path contains `needle`.
    pub fn selective_lessc(&self, needle: &str) -> PathBuf {
        self.install_stub(
            "bin/lessc-selective",
            &format!(
                "#!/bin/sh\n\
                 case \"$1\" in *{needle}*) exit 1;; esac\n\
                 cat \"$1\" > \"$2\"\n"
            ),
        )
    }

    fn install_stub(&self, relative: &str, script: &str) -> PathBuf {
        let path = self.write_file(relative, script);

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mut perms = fs::metadata(&path).unwrap().permissions();
            perms.set_mode(0o755);
            fs::set_permissions(&path, perms).unwrap();
        }

        path
    }

    /// Run lessbuild in this environment from the site root
    pub fn run(&self, args: &[&str]) -> TestResult {
        self.run_with_env(args, &[])
    }

    /// Run lessbuild with extra environment variables
    pub fn run_with_env(&self, args: &[&str], env_vars: &[(&str, &str)]) -> TestResult {
        let mut cmd = Command::new(env!("CARGO_BIN_EXE_lessbuild"));
        cmd.current_dir(self.site_root.path())
            .args(args)
            .env_remove("LESSBUILD_LESSC");

        for (key, value) in env_vars {
            cmd.env(key, value);
        }

        let output = cmd.output().expect("Failed to execute lessbuild");
        output_to_result(output)
    }
}

impl Default for TestEnv {
    fn default() -> Self {
        Self::new()
    }
}

fn output_to_result(output: Output) -> TestResult {
    TestResult {
        success: output.status.success(),
        exit_code: output.status.code().unwrap_or(-1),
        stdout: String::from_utf8_lossy(&output.stdout).to_string(),
        stderr: String::from_utf8_lossy(&output.stderr).to_string(),
    }
}

/// Read a file under the site root
pub fn read_site_file(env: &TestEnv, relative: &str) -> String {
    fs::read_to_string(env.path(relative)).unwrap_or_else(|e| {
        panic!("failed to read {relative}: {e}");
    })
}

pub fn exists(env: &TestEnv, relative: &str) -> bool {
    env.path(relative).exists()
}
