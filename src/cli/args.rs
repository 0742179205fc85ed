use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, Subcommand};
use serde_json::Value;

use tfh::terraform::TerraformOptions;

#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: TfhCommand,
}

#[derive(Subcommand, Debug)]
pub enum TfhCommand {
    /// Init and validate a configuration directory
    Validate(ConfigArgs),
    /// Show whether the configuration has pending changes
    Plan(PlanArgs),
    /// Init and apply, then print the outputs
    Apply(ConfigArgs),
    /// Tear down everything the configuration provisioned
    Destroy(ConfigArgs),
    /// Read one named output, or all of them as a table
    Output(OutputArgs),
    /// Check that configuration files are formatted
    FmtCheck(ConfigArgs),
    /// Look a VPC up via the cloud control API
    Vpc(VpcArgs),
}

#[derive(clap::Args, Debug)]
pub struct ConfigArgs {
    /// Configuration directory
    #[arg(long, default_value = ".")]
    pub dir: PathBuf,

    /// Input variable; VALUE may be JSON for lists and maps
    #[arg(long = "var", value_name = "NAME=VALUE", value_parser = parse_var)]
    pub vars: Vec<(String, Value)>,

    /// Extra tfvars file
    #[arg(long = "var-file", value_name = "FILE")]
    pub var_files: Vec<PathBuf>,

    /// Re-run apply/destroy this many times on retryable failures
    #[arg(long, default_value_t = 0)]
    pub retries: u32,

    /// Seconds to sleep between retries
    #[arg(long, default_value_t = 5)]
    pub retry_sleep_secs: u64,

    /// stderr substring marking a failure as retryable
    #[arg(long = "retry-on", value_name = "SUBSTRING")]
    pub retry_on: Vec<String>,

    /// terraform binary to invoke
    #[arg(long, env = "TFH_TERRAFORM_BIN")]
    pub terraform_bin: Option<String>,
}

impl ConfigArgs {
    pub fn to_options(&self) -> TerraformOptions {
        let mut opts = TerraformOptions::new(self.dir.clone()).with_retries(
            self.retries,
            Duration::from_secs(self.retry_sleep_secs),
        );
        for (name, value) in &self.vars {
            opts = opts.with_var(name.clone(), value.clone());
        }
        for file in &self.var_files {
            opts = opts.with_var_file(file.clone());
        }
        for needle in &self.retry_on {
            opts = opts.with_retryable_error(needle.clone());
        }
        if let Some(binary) = &self.terraform_bin {
            opts = opts.with_binary(binary.clone());
        }
        opts
    }
}

#[derive(clap::Args, Debug)]
pub struct PlanArgs {
    #[command(flatten)]
    pub config: ConfigArgs,

    /// Save the plan file under the cache directory
    #[arg(long)]
    pub save: bool,

    /// Render the planned changes as a resource tree (implies --save)
    #[arg(long)]
    pub tree: bool,
}

#[derive(clap::Args, Debug)]
pub struct OutputArgs {
    #[command(flatten)]
    pub config: ConfigArgs,

    /// Output name; all outputs are printed when omitted
    pub name: Option<String>,
}

#[derive(clap::Args, Debug)]
pub struct VpcArgs {
    /// VPC id to look up
    pub vpc_id: String,

    #[arg(long, env = "AWS_DEFAULT_REGION")]
    pub region: Option<String>,
}

fn parse_var(raw: &str) -> Result<(String, Value), String> {
    let (name, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected NAME=VALUE, got '{raw}'"))?;
    if name.is_empty() {
        return Err(format!("empty variable name in '{raw}'"));
    }
    // JSON syntax for lists/maps/numbers/bools; anything else is a string
    let value = serde_json::from_str(value).unwrap_or_else(|_| Value::String(value.to_string()));
    Ok((name.to_string(), value))
}
