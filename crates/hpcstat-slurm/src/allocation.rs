//! Facts about the current allocation, read from SLURM's job environment.

use crate::error::SlurmError;
use hpcstat_parsers::Environment;
use serde::Serialize;

pub const NUM_NODES_VAR: &str = "SLURM_JOB_NUM_NODES";
pub const PARTITION_VAR: &str = "SLURM_JOB_PARTITION";
pub const NODELIST_VAR: &str = "SLURM_JOB_NODELIST";

/// Number of nodes allocated to the current job.
///
/// An unset variable is parsed as an empty string and fails the same way
/// as a malformed one.
pub fn node_count(env: &impl Environment) -> Result<u32, SlurmError> {
    let value = env.var_or_empty(NUM_NODES_VAR);
    value.parse().map_err(|source| SlurmError::ParseError {
        var: NUM_NODES_VAR,
        value,
        source,
    })
}

/// Partition of the current job, or empty when unset.
pub fn partition(env: &impl Environment) -> String {
    env.var_or_empty(PARTITION_VAR)
}

/// Node list of the current job in SLURM's compact host range syntax
/// (e.g. `node[01-04]`), or empty when unset.
pub fn node_list(env: &impl Environment) -> String {
    env.var_or_empty(NODELIST_VAR)
}

/// Snapshot of the current allocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Allocation {
    pub node_count: u32,
    pub partition: String,
    pub node_list: String,
}

impl Allocation {
    pub fn from_env(env: &impl Environment) -> Result<Self, SlurmError> {
        Ok(Self {
            node_count: node_count(env)?,
            partition: partition(env),
            node_list: node_list(env),
        })
    }
}
