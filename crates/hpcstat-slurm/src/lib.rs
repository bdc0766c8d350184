//! SLURM integration for hpcstat.
//!
//! Query job status via squeue and sacct, and read the current
//! allocation from the job environment.

pub mod allocation;
pub mod client;
pub mod config;
pub mod error;
pub mod sacct;
pub mod squeue;
pub mod types;

pub use allocation::Allocation;
pub use client::SlurmClient;
pub use config::{ConfigError, SlurmConfig};
pub use error::SlurmError;
pub use types::{InvalidJobId, JobId, JobStatus};
