mod cli;

use clap::Parser;
use color_eyre::eyre::{Result, bail};
use serde_json::json;
use tracing_subscriber::EnvFilter;

use cli::{Cli, TfhCommand};
use tfh::providers::CloudProvider;
use tfh::terraform::{self, PlanOutcome};
use tfh::{cache, output, providers};

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        TfhCommand::Validate(args) => {
            let opts = args.to_options();
            terraform::init_and_validate(&opts).await?;
            tracing::info!(dir = %opts.terraform_dir.display(), "configuration valid");
        }
        TfhCommand::Plan(args) => {
            let opts = args.config.to_options();
            terraform::init(&opts).await?;
            if args.save || args.tree {
                let plan_file = cache::plan_artifact_path(&opts.terraform_dir)?;
                terraform::plan_saved(&opts, &plan_file).await?;
                tracing::info!(plan = %plan_file.display(), "plan saved");
                if args.tree {
                    let plan = terraform::show_json(&opts, &plan_file).await?;
                    println!("{}", output::plan_tree(&plan));
                }
            } else {
                match terraform::plan(&opts).await? {
                    PlanOutcome::NoChanges => println!("No changes."),
                    PlanOutcome::HasChanges => println!("Changes pending."),
                }
            }
        }
        TfhCommand::Apply(args) => {
            let opts = args.to_options();
            terraform::init_and_apply(&opts).await?;
            let outputs = terraform::output_all(&opts).await?;
            println!("{}", output::outputs_table(&outputs));
        }
        TfhCommand::Destroy(args) => {
            let opts = args.to_options();
            terraform::destroy(&opts).await?;
            tracing::info!(dir = %opts.terraform_dir.display(), "destroy complete");
        }
        TfhCommand::Output(args) => {
            let opts = args.config.to_options();
            match args.name {
                Some(name) => println!("{}", terraform::output(&opts, &name).await?),
                None => {
                    let outputs = terraform::output_all(&opts).await?;
                    println!("{}", output::outputs_table(&outputs));
                }
            }
        }
        TfhCommand::FmtCheck(args) => {
            let opts = args.to_options();
            terraform::fmt_check(&opts).await?;
            tracing::info!(dir = %opts.terraform_dir.display(), "formatting ok");
        }
        TfhCommand::Vpc(args) => {
            let provider = providers::get_provider("aws", args.region.clone())?;
            let Some(vpc) = provider.get_vpc(&args.vpc_id).await? else {
                bail!("vpc not found: {}", args.vpc_id);
            };
            let mut rows = serde_json::Map::new();
            rows.insert("vpc_id".to_string(), json!(vpc.vpc_id));
            rows.insert("cidr_block".to_string(), json!(vpc.cidr_block));
            rows.insert("state".to_string(), json!(vpc.state));
            for (key, value) in &vpc.tags {
                rows.insert(format!("tag:{}", key), json!(value));
            }
            println!("{}", output::outputs_table(&rows));
        }
    }

    Ok(())
}
