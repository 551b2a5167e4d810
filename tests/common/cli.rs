//! Black-box runner for the `sigsync` binary with chainable assertions.

use std::collections::HashMap;
use std::path::PathBuf;
use std::process::{Command, Stdio};

use serde_json::Value;
use tempfile::TempDir;

/// Runs the compiled `sigsync` binary.
///
/// Each runner owns an empty config directory and sets `RUST_LOG=off`, so
/// neither the developer's settings nor log lines reach the assertions.
pub struct CliRunner {
    binary_path: PathBuf,
    env_vars: HashMap<String, String>,
    config_home: TempDir,
}

impl Default for CliRunner {
    fn default() -> Self {
        Self::new()
    }
}

impl CliRunner {
    pub fn new() -> Self {
        let config_home = TempDir::new().expect("config home");
        let mut env_vars = HashMap::new();
        env_vars.insert("RUST_LOG".to_string(), "off".to_string());
        env_vars.insert(
            "XDG_CONFIG_HOME".to_string(),
            config_home.path().display().to_string(),
        );
        Self {
            binary_path: PathBuf::from(env!("CARGO_BIN_EXE_sigsync")),
            env_vars,
            config_home,
        }
    }

    pub fn with_env(mut self, key: &str, value: &str) -> Self {
        self.env_vars.insert(key.to_string(), value.to_string());
        self
    }

    /// Runs with `args`; `SIGSYNC_*` from the outer environment are dropped.
    pub fn run(&self, args: &[&str]) -> CliResult {
        let mut cmd = Command::new(&self.binary_path);
        cmd.args(args)
            .env_remove("SIGSYNC_PROFILE")
            .env_remove("SIGSYNC_CONFIG")
            .env_remove("SIGSYNC_FORMAT")
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());
        for (key, value) in &self.env_vars {
            cmd.env(key, value);
        }

        let output = cmd.output().expect("spawn sigsync");
        CliResult {
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            exit_code: output.status.code().unwrap_or(-1),
            args: args.iter().map(ToString::to_string).collect(),
        }
    }

    /// Same as [`run`](Self::run) with `--robot` prepended.
    pub fn run_robot(&self, args: &[&str]) -> CliResult {
        let robot: Vec<&str> = std::iter::once("--robot").chain(args.iter().copied()).collect();
        self.run(&robot)
    }
}

/// Output of one `sigsync` invocation.
#[derive(Debug, Clone)]
pub struct CliResult {
    pub stdout: String,
    pub stderr: String,
    pub exit_code: i32,
    pub args: Vec<String>,
}

impl CliResult {
    fn context(&self) -> String {
        format!(
            "sigsync {:?} exited {}\n--- stdout ---\n{}\n--- stderr ---\n{}",
            self.args, self.exit_code, self.stdout, self.stderr
        )
    }

    pub fn assert_success(&self) -> &Self {
        assert_eq!(self.exit_code, 0, "{}", self.context());
        self
    }

    pub fn assert_exit_code(&self, expected: i32) -> &Self {
        assert_eq!(self.exit_code, expected, "{}", self.context());
        self
    }

    pub fn assert_stdout_contains(&self, needle: &str) -> &Self {
        assert!(self.stdout.contains(needle), "missing {needle:?}\n{}", self.context());
        self
    }

    pub fn assert_stdout_matches(&self, pattern: &str) -> &Self {
        let re = regex::Regex::new(pattern).expect("valid regex");
        assert!(re.is_match(&self.stdout), "no match for /{pattern}/\n{}", self.context());
        self
    }

    pub fn assert_stderr_contains(&self, needle: &str) -> &Self {
        assert!(self.stderr.contains(needle), "missing {needle:?}\n{}", self.context());
        self
    }

    /// Report printed on stdout.
    pub fn json(&self) -> Value {
        parse_json(&self.stdout, &self.context())
    }

    /// Error object printed on stderr in robot mode.
    pub fn stderr_json(&self) -> Value {
        parse_json(&self.stderr, &self.context())
    }

    /// Compares the stdout value at `pointer` (RFC 6901) with `expected`.
    pub fn assert_json_field(&self, pointer: &str, expected: &Value) -> &Self {
        let json = self.json();
        let actual = json
            .pointer(pointer)
            .unwrap_or_else(|| panic!("{pointer} absent from {json}"));
        assert_eq!(actual, expected, "at {pointer}");
        self
    }
}

fn parse_json(text: &str, context: &str) -> Value {
    serde_json::from_str(text.trim()).unwrap_or_else(|e| panic!("not JSON ({e})\n{context}"))
}
