// Phase 9: 全ジョブ実行

use crate::pipeline::job_runner::{JobConfig, JobResult, run_job};

/// Run multiple jobs one after another, collecting results.
///
/// Each job's surface and page buffers are released before the next job
/// starts, so peak memory stays at one document. One job failure does NOT
/// prevent other jobs from running.
pub fn run_all_jobs(jobs: &[JobConfig]) -> Vec<crate::error::Result<JobResult>> {
    jobs.iter().map(run_job).collect()
}
