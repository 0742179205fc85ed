//! tfh - Terraform Test Harness
//!
//! A library for driving the external `terraform` binary from tests:
//! option records, lifecycle operations with retries, output readers,
//! per-run unique ids, and control-API corroboration of what apply
//! claims to have built.

pub mod cache;
pub mod http;
pub mod output;
pub mod providers;
pub mod random;
pub mod terraform;

mod error;

pub use error::HarnessError;
pub use providers::{CloudProvider, ProviderError, Vpc};
pub use random::unique_id;
pub use terraform::{PlanOutcome, TerraformError, TerraformOptions};
