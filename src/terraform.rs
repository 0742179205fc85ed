//! Lifecycle pass-throughs to the external `terraform` binary.
//!
//! Nothing here reimplements terraform semantics: every function builds
//! an argument list, spawns the binary, and interprets exit codes and
//! JSON output. The interesting state all lives in terraform's own
//! state backend.

mod error;
mod exec;
mod options;
mod outputs;

pub use error::TerraformError;
pub use exec::{
    CommandOutput, apply, destroy, fmt_check, init, init_and_apply, init_and_plan,
    init_and_validate, plan, plan_saved, show_json, validate, workspace_select_or_new,
};
pub use options::{DEFAULT_TERRAFORM_BINARY, PlanOutcome, TerraformOptions, to_hcl_string};
pub use outputs::{output, output_all, output_json, output_list, output_map};
