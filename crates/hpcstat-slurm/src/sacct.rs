//! Check SLURM accounting for jobs squeue reports as stopped.

use crate::types::JobId;

pub const SACCT: &str = "sacct";

/// `sacct -j <id> --format=state`
pub fn state_args(job: JobId) -> Vec<String> {
    vec!["-j".to_string(), job.to_string(), "--format=state".to_string()]
}

/// Whether sacct recorded the job as completed.
///
/// Output is a header, a dashed separator, then one state per job step;
/// only the first data line is consulted. Shorter output counts as not
/// completed.
pub fn reports_completed(stdout: &str) -> bool {
    stdout
        .split('\n')
        .nth(2)
        .is_some_and(|line| line.contains("COMPLETED"))
}
