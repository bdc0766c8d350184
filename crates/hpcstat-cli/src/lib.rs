//! CLI argument parsing for hpcstat.

use camino::Utf8PathBuf;
use clap::{ArgAction, Parser, Subcommand};
use hpcstat_slurm::JobId;

#[derive(Parser, Debug)]
#[command(name = "hpcstat")]
#[command(about = "Query SLURM job status and allocation details")]
pub struct Args {
    /// Configuration file with `enable_slurm` and `slurm_partition` keys
    #[arg(long, global = true)]
    pub config: Option<Utf8PathBuf>,

    /// Print results as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Command {
    /// Show the status of one or more jobs
    Status {
        /// SLURM job IDs
        #[arg(required = true)]
        job_ids: Vec<JobId>,
    },
    /// Count a user's jobs in a partition
    Count {
        /// Partition (defaults to the configured partition, then SLURM_JOB_PARTITION)
        #[arg(short, long)]
        partition: Option<String>,

        /// User (defaults to $USER)
        #[arg(short, long)]
        user: Option<String>,
    },
    /// Show node count, partition and node list of the current allocation
    Allocation,
}

impl Args {
    /// Log filter directive for the requested verbosity.
    pub fn log_level(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "debug",
            _ => "trace",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_status() {
        let args = Args::try_parse_from(["hpcstat", "status", "12", "34"]).unwrap();
        assert_eq!(
            args.command,
            Command::Status {
                job_ids: vec![JobId::new(12).unwrap(), JobId::new(34).unwrap()]
            }
        );
        assert!(!args.json);
        assert_eq!(args.log_level(), "warn");
    }

    #[test]
    fn test_status_requires_valid_ids() {
        assert!(Args::try_parse_from(["hpcstat", "status"]).is_err());
        assert!(Args::try_parse_from(["hpcstat", "status", "0"]).is_err());
        assert!(Args::try_parse_from(["hpcstat", "status", "abc"]).is_err());
    }

    #[test]
    fn test_parse_count_with_globals() {
        let args = Args::try_parse_from([
            "hpcstat", "count", "-p", "gpu", "--json", "-vv", "--config", "site.conf",
        ])
        .unwrap();
        assert_eq!(
            args.command,
            Command::Count {
                partition: Some("gpu".to_string()),
                user: None
            }
        );
        assert!(args.json);
        assert_eq!(args.log_level(), "trace");
        assert_eq!(args.config.as_deref(), Some(camino::Utf8Path::new("site.conf")));
    }

    #[test]
    fn test_parse_allocation() {
        let args = Args::try_parse_from(["hpcstat", "-v", "allocation"]).unwrap();
        assert_eq!(args.command, Command::Allocation);
        assert_eq!(args.log_level(), "debug");
    }
}
