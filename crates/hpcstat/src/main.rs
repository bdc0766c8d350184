//! hpcstat - SLURM job status from the command line.

use clap::Parser;
use hpcstat_cli::{Args, Command};
use hpcstat_parsers::Environment;
use hpcstat_slurm::{Allocation, JobId, JobStatus, SlurmClient, SlurmConfig};
use miette::{IntoDiagnostic, Result, miette};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

#[derive(Serialize)]
struct JobReport {
    job_id: JobId,
    status: JobStatus,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Logs go to stderr so stdout stays parseable.
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(args.log_level()));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let config = load_config(&args)?;
    let client = SlurmClient::system();

    match &args.command {
        Command::Status { job_ids } => {
            let statuses = client.job_statuses(job_ids).await.into_diagnostic()?;
            let reports: Vec<JobReport> = job_ids
                .iter()
                .zip(statuses)
                .map(|(&job_id, status)| JobReport { job_id, status })
                .collect();

            if args.json {
                print_json(&reports)?;
            } else {
                for report in &reports {
                    println!("{} {}", report.job_id, report.status);
                }
            }
        }
        Command::Count { partition, user } => {
            let partition = partition
                .clone()
                .or_else(|| config.as_ref().and_then(|c| c.partition.clone()))
                .or_else(|| Some(client.partition()).filter(|p| !p.is_empty()))
                .ok_or_else(|| miette!("No partition given, configured, or set by SLURM"))?;
            let user = user
                .clone()
                .or_else(|| client.env().var("USER"))
                .ok_or_else(|| miette!("No user given and $USER is not set"))?;

            let count = client
                .count_user_jobs(&partition, &user)
                .await
                .into_diagnostic()?;

            if args.json {
                print_json(&serde_json::json!({
                    "partition": partition,
                    "user": user,
                    "count": count,
                }))?;
            } else {
                println!("{}", count);
            }
        }
        Command::Allocation => {
            let allocation = Allocation::from_env(client.env()).into_diagnostic()?;

            if args.json {
                print_json(&allocation)?;
            } else {
                println!("nodes:     {}", allocation.node_count);
                println!("partition: {}", allocation.partition);
                println!("nodelist:  {}", allocation.node_list);
            }
        }
    }

    Ok(())
}

/// Load the configuration file, if one was given, and refuse to query
/// SLURM when it disables SLURM support.
fn load_config(args: &Args) -> Result<Option<SlurmConfig>> {
    let Some(path) = &args.config else {
        return Ok(None);
    };

    let config = SlurmConfig::load(path).into_diagnostic()?;
    tracing::debug!(%path, ?config, "loaded configuration");

    if !config.enabled && args.command != Command::Allocation {
        return Err(miette!("SLURM support is disabled in {}", path));
    }
    Ok(Some(config))
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let text = serde_json::to_string_pretty(value).into_diagnostic()?;
    println!("{}", text);
    Ok(())
}
