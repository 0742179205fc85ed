use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde_json::Value;

pub const DEFAULT_TERRAFORM_BINARY: &str = "terraform";

/// Everything one terraform invocation needs: target directory, input
/// variables, retry policy, binary override. Built per test, passed to
/// the lifecycle functions, dropped afterwards.
#[derive(Debug, Clone)]
pub struct TerraformOptions {
    pub terraform_dir: PathBuf,
    /// Input variables, rendered to `-var` arguments in insertion order.
    pub vars: Vec<(String, Value)>,
    /// Extra `-var-file` arguments.
    pub var_files: Vec<PathBuf>,
    /// Extra environment variables for the child process.
    pub env: HashMap<String, String>,
    /// How many times apply/destroy may be re-run after a retryable failure.
    pub max_retries: u32,
    pub time_between_retries: Duration,
    /// Substrings of stderr that mark a failure as transient.
    pub retryable_errors: Vec<String>,
    /// Binary to invoke. Overridden in tests to point at a stub script.
    pub terraform_binary: String,
    pub no_color: bool,
}

impl TerraformOptions {
    pub fn new(terraform_dir: impl Into<PathBuf>) -> Self {
        let binary = std::env::var("TFH_TERRAFORM_BIN")
            .unwrap_or_else(|_| DEFAULT_TERRAFORM_BINARY.to_string());
        Self {
            terraform_dir: terraform_dir.into(),
            vars: Vec::new(),
            var_files: Vec::new(),
            env: HashMap::new(),
            max_retries: 0,
            time_between_retries: Duration::from_secs(5),
            retryable_errors: Vec::new(),
            terraform_binary: binary,
            no_color: true,
        }
    }

    pub fn with_var(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.vars.push((name.into(), value.into()));
        self
    }

    pub fn with_var_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.var_files.push(path.into());
        self
    }

    pub fn with_env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env.insert(key.into(), value.into());
        self
    }

    pub fn with_retries(mut self, max_retries: u32, time_between_retries: Duration) -> Self {
        self.max_retries = max_retries;
        self.time_between_retries = time_between_retries;
        self
    }

    pub fn with_retryable_error(mut self, needle: impl Into<String>) -> Self {
        self.retryable_errors.push(needle.into());
        self
    }

    /// NOTE: Primarily used for testing with stub binaries.
    pub fn with_binary(mut self, binary: impl Into<String>) -> Self {
        self.terraform_binary = binary.into();
        self
    }

    /// `-var`/`-var-file` arguments shared by plan, apply and destroy.
    pub(crate) fn var_args(&self) -> Vec<String> {
        let mut args = Vec::new();
        for (name, value) in &self.vars {
            args.push(format!("-var={}={}", name, to_hcl_string(value)));
        }
        for file in &self.var_files {
            args.push(format!("-var-file={}", file.display()));
        }
        args
    }
}

/// Renders a JSON value the way terraform expects it on the command line:
/// top-level strings bare, nested strings quoted, lists as `[...]`,
/// maps as `{"k" = v, ...}`.
pub fn to_hcl_string(value: &Value) -> String {
    hcl_value(value, false)
}

fn hcl_value(value: &Value, nested: bool) -> String {
    match value {
        Value::String(s) if !nested => s.clone(),
        Value::String(_) => value.to_string(),
        Value::Array(items) => {
            let rendered: Vec<String> = items.iter().map(|v| hcl_value(v, true)).collect();
            format!("[{}]", rendered.join(", "))
        }
        Value::Object(map) => {
            let rendered: Vec<String> = map
                .iter()
                .map(|(k, v)| {
                    format!(
                        "{} = {}",
                        Value::String(k.clone()),
                        hcl_value(v, true)
                    )
                })
                .collect();
            format!("{{{}}}", rendered.join(", "))
        }
        // null, bool and number literals are the same in HCL and JSON
        other => other.to_string(),
    }
}

/// Result of `plan -detailed-exitcode`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlanOutcome {
    /// Exit 0: state already matches the configuration
    NoChanges,
    /// Exit 2: the plan contains pending changes
    HasChanges,
}

pub(crate) fn has_config_files(dir: &Path) -> std::io::Result<bool> {
    for entry in std::fs::read_dir(dir)? {
        let name = entry?.file_name();
        let name = name.to_string_lossy();
        if name.ends_with(".tf") || name.ends_with(".tf.json") {
            return Ok(true);
        }
    }
    Ok(false)
}
