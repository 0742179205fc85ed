use std::process::Stdio;

use tokio::process::Command;

use super::error::TerraformError;
use super::options::{PlanOutcome, TerraformOptions, has_config_files};

/// Captured result of one terraform invocation.
#[derive(Debug, Clone)]
pub struct CommandOutput {
    pub status: i32,
    pub stdout: String,
    pub stderr: String,
}

fn command_name(args: &[String]) -> String {
    args.first().cloned().unwrap_or_else(|| "terraform".to_string())
}

/// Rejects directories the external tool would choke on before spawning
/// it, so setup problems surface as typed errors instead of tool noise.
fn check_config_dir(opts: &TerraformOptions) -> Result<(), TerraformError> {
    if !opts.terraform_dir.is_dir() {
        return Err(TerraformError::MissingDir(opts.terraform_dir.clone()));
    }
    if !has_config_files(&opts.terraform_dir)? {
        return Err(TerraformError::NoConfigFiles(opts.terraform_dir.clone()));
    }
    Ok(())
}

async fn exec(opts: &TerraformOptions, args: &[String]) -> Result<CommandOutput, TerraformError> {
    tracing::debug!(
        binary = %opts.terraform_binary,
        dir = %opts.terraform_dir.display(),
        ?args,
        "running terraform"
    );

    let output = Command::new(&opts.terraform_binary)
        .args(args)
        .current_dir(&opts.terraform_dir)
        .envs(&opts.env)
        .env("TF_IN_AUTOMATION", "1")
        .stdin(Stdio::null())
        .output()
        .await
        .map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                TerraformError::BinaryNotFound {
                    binary: opts.terraform_binary.clone(),
                }
            } else {
                TerraformError::Io(e)
            }
        })?;

    Ok(CommandOutput {
        status: output.status.code().unwrap_or(-1),
        stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
        stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
    })
}

pub(crate) async fn run_checked(
    opts: &TerraformOptions,
    args: &[String],
) -> Result<CommandOutput, TerraformError> {
    let out = exec(opts, args).await?;
    if out.status != 0 {
        return Err(TerraformError::CommandFailed {
            command: command_name(args),
            status: out.status,
            stderr: out.stderr,
        });
    }
    Ok(out)
}

fn is_retryable(opts: &TerraformOptions, err: &TerraformError) -> bool {
    let TerraformError::CommandFailed { stderr, .. } = err else {
        return false;
    };
    opts.retryable_errors.iter().any(|needle| stderr.contains(needle))
}

/// Runs a command under the options' retry policy. Failures matching a
/// configured retryable-error substring are re-run up to `max_retries`
/// times with `time_between_retries` sleeps in between; anything else
/// aborts immediately.
async fn run_with_retry(
    opts: &TerraformOptions,
    args: &[String],
) -> Result<CommandOutput, TerraformError> {
    let mut attempt = 0u32;
    loop {
        attempt += 1;
        let err = match run_checked(opts, args).await {
            Ok(out) => return Ok(out),
            Err(e) => e,
        };
        if attempt <= opts.max_retries && is_retryable(opts, &err) {
            tracing::warn!(
                attempt,
                max_retries = opts.max_retries,
                error = %err,
                "retryable terraform failure, backing off"
            );
            tokio::time::sleep(opts.time_between_retries).await;
            continue;
        }
        if attempt > 1 {
            return Err(TerraformError::RetriesExhausted {
                command: command_name(args),
                attempts: attempt,
                last: Box::new(err),
            });
        }
        return Err(err);
    }
}

fn base_args(opts: &TerraformOptions, fixed: &[&str]) -> Vec<String> {
    let mut args: Vec<String> = fixed.iter().map(|s| s.to_string()).collect();
    if opts.no_color {
        args.push("-no-color".to_string());
    }
    args
}

/// `terraform init`. Fails with a setup error when the directory is
/// missing or holds no configuration files.
pub async fn init(opts: &TerraformOptions) -> Result<CommandOutput, TerraformError> {
    check_config_dir(opts)?;
    let args = base_args(opts, &["init", "-input=false"]);
    run_with_retry(opts, &args).await
}

/// `terraform validate`. Assumes the directory is already initialized.
pub async fn validate(opts: &TerraformOptions) -> Result<CommandOutput, TerraformError> {
    check_config_dir(opts)?;
    let args = base_args(opts, &["validate"]);
    run_checked(opts, &args).await
}

pub async fn init_and_validate(opts: &TerraformOptions) -> Result<CommandOutput, TerraformError> {
    init(opts).await?;
    validate(opts).await
}

/// `terraform plan -detailed-exitcode`: exit 0 means no changes, exit 2
/// means pending changes, anything else is the tool's own error
/// (validation failures included) surfaced verbatim.
pub async fn plan(opts: &TerraformOptions) -> Result<PlanOutcome, TerraformError> {
    check_config_dir(opts)?;
    let mut args = base_args(opts, &["plan", "-input=false", "-detailed-exitcode"]);
    args.extend(opts.var_args());
    let out = exec(opts, &args).await?;
    match out.status {
        0 => Ok(PlanOutcome::NoChanges),
        2 => Ok(PlanOutcome::HasChanges),
        status => Err(TerraformError::CommandFailed {
            command: "plan".to_string(),
            status,
            stderr: out.stderr,
        }),
    }
}

pub async fn init_and_plan(opts: &TerraformOptions) -> Result<PlanOutcome, TerraformError> {
    init(opts).await?;
    plan(opts).await
}

/// `terraform plan -out=<file>`, for later inspection via [`show_json`].
pub async fn plan_saved(
    opts: &TerraformOptions,
    out_file: &std::path::Path,
) -> Result<CommandOutput, TerraformError> {
    check_config_dir(opts)?;
    let mut args = base_args(opts, &["plan", "-input=false"]);
    args.push(format!("-out={}", out_file.display()));
    args.extend(opts.var_args());
    run_checked(opts, &args).await
}

/// `terraform show -json <planfile>` decoded into a JSON value.
pub async fn show_json(
    opts: &TerraformOptions,
    plan_file: &std::path::Path,
) -> Result<serde_json::Value, TerraformError> {
    let args = vec![
        "show".to_string(),
        "-json".to_string(),
        plan_file.display().to_string(),
    ];
    let out = run_checked(opts, &args).await?;
    Ok(serde_json::from_str(&out.stdout)?)
}

/// `terraform apply -auto-approve` under the retry policy.
pub async fn apply(opts: &TerraformOptions) -> Result<CommandOutput, TerraformError> {
    check_config_dir(opts)?;
    let mut args = base_args(opts, &["apply", "-input=false", "-auto-approve"]);
    args.extend(opts.var_args());
    run_with_retry(opts, &args).await
}

pub async fn init_and_apply(opts: &TerraformOptions) -> Result<CommandOutput, TerraformError> {
    init(opts).await?;
    apply(opts).await
}

/// `terraform destroy -auto-approve` under the retry policy. Callers
/// run this on every exit path after a successful apply.
pub async fn destroy(opts: &TerraformOptions) -> Result<CommandOutput, TerraformError> {
    check_config_dir(opts)?;
    let mut args = base_args(opts, &["destroy", "-input=false", "-auto-approve"]);
    args.extend(opts.var_args());
    run_with_retry(opts, &args).await
}

/// `terraform fmt -check -recursive`: non-zero exit means files need
/// reformatting.
pub async fn fmt_check(opts: &TerraformOptions) -> Result<CommandOutput, TerraformError> {
    if !opts.terraform_dir.is_dir() {
        return Err(TerraformError::MissingDir(opts.terraform_dir.clone()));
    }
    let args = vec![
        "fmt".to_string(),
        "-check".to_string(),
        "-recursive".to_string(),
    ];
    run_checked(opts, &args).await
}

/// Selects the named workspace, creating it when it does not exist yet.
pub async fn workspace_select_or_new(
    opts: &TerraformOptions,
    name: &str,
) -> Result<CommandOutput, TerraformError> {
    let select = vec![
        "workspace".to_string(),
        "select".to_string(),
        name.to_string(),
    ];
    match run_checked(opts, &select).await {
        Ok(out) => Ok(out),
        Err(TerraformError::CommandFailed { .. }) => {
            tracing::info!(workspace = name, "workspace missing, creating");
            let new = vec![
                "workspace".to_string(),
                "new".to_string(),
                name.to_string(),
            ];
            run_checked(opts, &new).await
        }
        Err(e) => Err(e),
    }
}
