//! SLURM job types.

use serde::Serialize;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Coarse job status as seen by a caller waiting on a job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum JobStatus {
    /// squeue reported a code we do not track, or nothing at all.
    Unknown,
    /// Pending in the queue (`PD`).
    Queued,
    /// Running (`R`).
    Running,
    /// Stopped (`ST`) and not recorded as completed by sacct.
    Stopping,
    /// Completed, or already purged from the live queue.
    Done,
}

impl JobStatus {
    /// Whether the job will not change state again.
    pub fn is_terminal(self) -> bool {
        matches!(self, JobStatus::Done)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            JobStatus::Unknown => "unknown",
            JobStatus::Queued => "queued",
            JobStatus::Running => "running",
            JobStatus::Stopping => "stopping",
            JobStatus::Done => "done",
        }
    }
}

impl fmt::Display for JobStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Invalid job id {0:?}: expected a positive integer")]
pub struct InvalidJobId(pub String);

/// SLURM job ID. Always positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct JobId(u32);

impl JobId {
    /// Returns `None` for zero.
    pub fn new(id: u32) -> Option<Self> {
        (id > 0).then_some(Self(id))
    }

    pub fn get(self) -> u32 {
        self.0
    }
}

impl fmt::Display for JobId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for JobId {
    type Err = InvalidJobId;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<u32>()
            .ok()
            .and_then(JobId::new)
            .ok_or_else(|| InvalidJobId(s.to_string()))
    }
}
