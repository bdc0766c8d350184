//! Parse squeue output for single-job status and per-user job counts.

use crate::types::JobId;
use hpcstat_parsers::non_empty_lines;

pub const SQUEUE: &str = "squeue";

/// squeue prints this on stderr once a finished job has left the queue.
pub const PURGED_JOB_MESSAGE: &str = "Invalid job id specified";

/// Marker present in the default squeue header line.
const HEADER_TOKEN: &str = "JOBID";

/// Compact state code as printed by `--format=%t`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StateCode {
    Running,
    Pending,
    /// `ST`: stopped. sacct decides whether the job actually completed.
    Stopped,
    Other,
}

/// `squeue -j <id> --format=%t`
pub fn status_args(job: JobId) -> Vec<String> {
    vec!["-j".to_string(), job.to_string(), "--format=%t".to_string()]
}

/// `squeue -p <partition> -u <user>`
pub fn count_args(partition: &str, user: &str) -> Vec<String> {
    vec![
        "-p".to_string(),
        partition.to_string(),
        "-u".to_string(),
        user.to_string(),
    ]
}

/// Whether a failed status query means the job is no longer in the queue.
pub fn is_purged_job_error(stderr: &str) -> bool {
    stderr.trim_end_matches('\n').ends_with(PURGED_JOB_MESSAGE)
}

/// The last non-empty line of status output.
///
/// squeue prints a header and then one code per job; for a single job ID
/// the last line is that job's code.
pub fn last_status_line(stdout: &str) -> Option<&str> {
    non_empty_lines(stdout).last().map(str::trim)
}

pub fn parse_state_code(code: &str) -> StateCode {
    match code {
        "R" => StateCode::Running,
        "PD" => StateCode::Pending,
        "ST" => StateCode::Stopped,
        _ => StateCode::Other,
    }
}

/// Count job lines in default-format squeue output, skipping the header.
pub fn count_job_lines(stdout: &str) -> usize {
    non_empty_lines(stdout)
        .filter(|line| !line.contains(HEADER_TOKEN))
        .count()
}

#[cfg(test)]
mod tests {
    use super::*;

    const COUNT_OUTPUT: &str = "\
             JOBID PARTITION     NAME     USER ST       TIME  NODES NODELIST(REASON)
            123456     short   align1    alice  R       5:02      1 node01
            123457     short   align2    alice PD       0:00      1 (Priority)
";

    #[test]
    fn test_status_args() {
        let job = JobId::new(991).unwrap();
        assert_eq!(status_args(job), vec!["-j", "991", "--format=%t"]);
    }

    #[test]
    fn test_count_args() {
        assert_eq!(count_args("gpu", "bob"), vec!["-p", "gpu", "-u", "bob"]);
    }

    #[test]
    fn test_is_purged_job_error() {
        assert!(is_purged_job_error(
            "slurm_load_jobs error: Invalid job id specified\n"
        ));
        assert!(is_purged_job_error("Invalid job id specified\n\n"));
        assert!(!is_purged_job_error("Invalid job id specified: retry later"));
        assert!(!is_purged_job_error(
            "slurm_load_jobs error: Unable to contact slurm controller"
        ));
    }

    #[test]
    fn test_last_status_line() {
        assert_eq!(last_status_line("ST\nR\n"), Some("R"));
        assert_eq!(last_status_line("ST\n\nPD\n\n"), Some("PD"));
        assert_eq!(last_status_line(""), None);
        assert_eq!(last_status_line("\n\n"), None);
    }

    #[test]
    fn test_parse_state_code() {
        assert_eq!(parse_state_code("R"), StateCode::Running);
        assert_eq!(parse_state_code("PD"), StateCode::Pending);
        assert_eq!(parse_state_code("ST"), StateCode::Stopped);
        assert_eq!(parse_state_code("CG"), StateCode::Other);
        assert_eq!(parse_state_code("r"), StateCode::Other);
    }

    #[test]
    fn test_count_job_lines() {
        assert_eq!(count_job_lines(COUNT_OUTPUT), 2);

        let header_only = COUNT_OUTPUT.lines().next().unwrap();
        assert_eq!(count_job_lines(header_only), 0);
        assert_eq!(count_job_lines(""), 0);
    }
}
