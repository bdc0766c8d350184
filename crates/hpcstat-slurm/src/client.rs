//! Job status queries against squeue and sacct.

use crate::allocation;
use crate::error::SlurmError;
use crate::sacct::{self, SACCT};
use crate::squeue::{self, SQUEUE, StateCode};
use crate::types::{JobId, JobStatus};
use hpcstat_parsers::{
    CommandError, CommandOutput, CommandRunner, Environment, SystemEnv, SystemRunner,
};
use std::path::PathBuf;

/// Queries SLURM through its command-line tools.
///
/// Every call runs its own subprocesses and keeps no state between calls.
#[derive(Debug, Clone, Default)]
pub struct SlurmClient<R = SystemRunner, E = SystemEnv> {
    runner: R,
    env: E,
}

impl SlurmClient {
    /// Client over the host `PATH` and process environment.
    pub fn system() -> Self {
        Self::new(SystemRunner, SystemEnv)
    }
}

impl<R: CommandRunner, E: Environment> SlurmClient<R, E> {
    pub fn new(runner: R, env: E) -> Self {
        Self { runner, env }
    }

    pub fn env(&self) -> &E {
        &self.env
    }

    /// Status of a single job.
    ///
    /// A job squeue no longer knows about is reported as `Done`. A stopped
    /// job is checked against sacct; if sacct cannot tell, it stays
    /// `Stopping`.
    pub async fn job_status(&self, job: JobId) -> Result<JobStatus, SlurmError> {
        let squeue_path = self.locate(SQUEUE)?;
        let output = self
            .invoke(SQUEUE, squeue_path, squeue::status_args(job))
            .await?;

        if !output.success {
            if squeue::is_purged_job_error(&output.stderr) {
                tracing::debug!(%job, "job purged from queue, treating as done");
                return Ok(JobStatus::Done);
            }
            return Err(query_failed(SQUEUE, &output));
        }

        let code = squeue::last_status_line(&output.stdout).unwrap_or_default();
        let status = match squeue::parse_state_code(code) {
            StateCode::Running => JobStatus::Running,
            StateCode::Pending => JobStatus::Queued,
            StateCode::Stopped => self.refine_stopped(job).await?,
            StateCode::Other => JobStatus::Unknown,
        };

        tracing::debug!(%job, code, %status, "job status");
        Ok(status)
    }

    /// Ask sacct whether a stopped job has completed.
    ///
    /// Only a missing sacct is an error; a failed sacct run yields `Stopping`.
    async fn refine_stopped(&self, job: JobId) -> Result<JobStatus, SlurmError> {
        let sacct_path = self.locate(SACCT)?;
        let output = self.invoke(SACCT, sacct_path, sacct::state_args(job)).await;

        match output {
            Ok(out) if out.success && sacct::reports_completed(&out.stdout) => Ok(JobStatus::Done),
            Ok(out) if out.success => Ok(JobStatus::Stopping),
            Ok(out) => {
                tracing::warn!(%job, stderr = out.stderr.trim(), "sacct failed, assuming stopping");
                Ok(JobStatus::Stopping)
            }
            Err(e) => {
                tracing::warn!(%job, error = %e, "sacct failed, assuming stopping");
                Ok(JobStatus::Stopping)
            }
        }
    }

    /// Statuses of several jobs, in input order.
    ///
    /// Stops at the first failing job and returns only that error.
    pub async fn job_statuses(&self, jobs: &[JobId]) -> Result<Vec<JobStatus>, SlurmError> {
        let mut statuses = Vec::with_capacity(jobs.len());
        for &job in jobs {
            statuses.push(self.job_status(job).await?);
        }
        Ok(statuses)
    }

    /// Number of jobs `user` has in `partition`, pending or running.
    pub async fn count_user_jobs(&self, partition: &str, user: &str) -> Result<usize, SlurmError> {
        let squeue_path = self.locate(SQUEUE)?;
        let output = self
            .invoke(SQUEUE, squeue_path, squeue::count_args(partition, user))
            .await?;

        if !output.success {
            return Err(query_failed(SQUEUE, &output));
        }

        let count = squeue::count_job_lines(&output.stdout);
        tracing::debug!(partition, user, count, "counted jobs");
        Ok(count)
    }

    /// Nodes allocated to the current job, from `SLURM_JOB_NUM_NODES`.
    pub fn allocated_node_count(&self) -> Result<u32, SlurmError> {
        allocation::node_count(&self.env)
    }

    /// Partition of the current job, from `SLURM_JOB_PARTITION`.
    pub fn partition(&self) -> String {
        allocation::partition(&self.env)
    }

    /// Node list of the current job, from `SLURM_JOB_NODELIST`.
    pub fn node_list(&self) -> String {
        allocation::node_list(&self.env)
    }

    fn locate(&self, tool: &'static str) -> Result<PathBuf, SlurmError> {
        self.runner.locate(tool).map_err(|e| match e {
            CommandError::NotFound { .. } => SlurmError::ToolNotFound { tool },
            other => SlurmError::QueryFailed {
                tool,
                reason: other.to_string(),
            },
        })
    }

    async fn invoke(
        &self,
        tool: &'static str,
        path: PathBuf,
        args: Vec<String>,
    ) -> Result<CommandOutput, SlurmError> {
        tracing::debug!(tool, path = %path.display(), ?args, "invoking scheduler tool");
        self.runner
            .run(&path, &args)
            .await
            .map_err(|e| SlurmError::QueryFailed {
                tool,
                reason: e.to_string(),
            })
    }
}

fn query_failed(tool: &'static str, output: &CommandOutput) -> SlurmError {
    let stderr = output.stderr.trim();
    let reason = if stderr.is_empty() {
        match output.code {
            Some(code) => format!("exited with status {}", code),
            None => "terminated by signal".to_string(),
        }
    } else {
        stderr.to_string()
    };
    SlurmError::QueryFailed { tool, reason }
}
