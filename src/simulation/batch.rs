// src/simulation/batch.rs

// Parallel execution of independent runs (sensitivity sweeps). Results come
// back in job order and carry the job id, never completion order.

use crate::error::{ConfigError, SimError};
use crate::model::records::RunSummary;
use crate::simulation::config::SimulationConfig;
use crate::simulation::simulate;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::time::Instant;
use tracing::{info, warn};

/// One configuration to run, tagged with a caller-chosen id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchJob {
    pub id: String,
    pub config: SimulationConfig,
    /// Explicit seed; overrides the seed derived from the batch master seed.
    #[serde(default)]
    pub seed: Option<u64>,
}

/// On-disk batch description.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchFile {
    #[serde(default)]
    pub master_seed: Option<u64>,
    pub jobs: Vec<BatchJob>,
}

impl BatchFile {
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(json).map_err(|e| ConfigError::Parse(e.to_string()))
    }
}

#[derive(Debug, Clone, Default)]
pub struct BatchOptions {
    /// Seed for jobs without their own: job `i` gets `master_seed + i`.
    pub master_seed: Option<u64>,
    /// Worker thread cap (0 = rayon default).
    pub max_threads: usize,
}

#[derive(Debug, Clone)]
pub struct BatchJobResult {
    pub id: String,
    /// Seed the job ran with; `None` means OS entropy.
    pub seed: Option<u64>,
    pub outcome: Result<RunSummary, SimError>,
}

#[derive(Debug, Clone, Default)]
pub struct BatchReport {
    /// One entry per job, in submission order.
    pub results: Vec<BatchJobResult>,
    pub elapsed_ms: u64,
}

impl BatchReport {
    pub fn get(&self, id: &str) -> Option<&BatchJobResult> {
        self.results.iter().find(|r| r.id == id)
    }

    pub fn succeeded(&self) -> usize {
        self.results.iter().filter(|r| r.outcome.is_ok()).count()
    }

    pub fn failed(&self) -> usize {
        self.results.len() - self.succeeded()
    }
}

fn seed_for(job: &BatchJob, index: usize, master_seed: Option<u64>) -> Option<u64> {
    job.seed
        .or_else(|| master_seed.map(|master| master.wrapping_add(index as u64)))
}

fn run_job(job: &BatchJob, seed: Option<u64>) -> BatchJobResult {
    let outcome = simulate(&job.config, seed).map(|result| result.summary());
    if let Err(e) = &outcome {
        warn!(job = %job.id, error = %e, "batch job failed");
    }
    BatchJobResult {
        id: job.id.clone(),
        seed,
        outcome,
    }
}

/// Runs every job; a failing job is reported in its slot and does not stop
/// the others. Duplicate ids and empty batches are rejected up front.
pub fn run_batch(jobs: &[BatchJob], options: &BatchOptions) -> Result<BatchReport, SimError> {
    if jobs.is_empty() {
        return Err(ConfigError::invalid("jobs", "batch contains no jobs").into());
    }
    let mut seen = HashSet::new();
    for job in jobs {
        if !seen.insert(job.id.as_str()) {
            return Err(ConfigError::invalid("id", format!("duplicate job id '{}'", job.id)).into());
        }
    }

    let start = Instant::now();
    let execute = || -> Vec<BatchJobResult> {
        jobs.par_iter()
            .enumerate()
            .map(|(index, job)| run_job(job, seed_for(job, index, options.master_seed)))
            .collect()
    };

    let results = if options.max_threads > 0 {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(options.max_threads.min(jobs.len()))
            .build()
            .map_err(|e| SimError::Runtime(format!("failed to build thread pool: {e}")))?;
        pool.install(execute)
    } else {
        execute()
    };

    let report = BatchReport {
        results,
        elapsed_ms: u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX),
    };
    info!(
        jobs = jobs.len(),
        succeeded = report.succeeded(),
        failed = report.failed(),
        elapsed_ms = report.elapsed_ms,
        "batch finished"
    );
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn job(id: &str, reorder_point: f64, seed: Option<u64>) -> BatchJob {
        BatchJob {
            id: id.to_string(),
            config: SimulationConfig {
                reorder_point,
                ..SimulationConfig::default()
            },
            seed,
        }
    }

    #[test]
    fn results_follow_submission_order() {
        let jobs: Vec<BatchJob> = (0..16u32)
            .map(|i| job(&format!("rop-{i}"), f64::from(i) * 10.0, None))
            .collect();
        let options = BatchOptions {
            master_seed: Some(1000),
            max_threads: 4,
        };
        let report = run_batch(&jobs, &options).unwrap();

        let ids: Vec<&str> = report.results.iter().map(|r| r.id.as_str()).collect();
        let expected: Vec<String> = (0..16).map(|i| format!("rop-{i}")).collect();
        assert_eq!(ids, expected.iter().map(String::as_str).collect::<Vec<_>>());
        assert_eq!(report.get("rop-3").unwrap().seed, Some(1003));
        assert_eq!(report.succeeded(), 16);
    }

    #[test]
    fn batch_is_reproducible_with_master_seed() {
        let jobs = vec![job("a", 80.0, None), job("b", 120.0, Some(5))];
        let options = BatchOptions {
            master_seed: Some(7),
            max_threads: 0,
        };
        let first = run_batch(&jobs, &options).unwrap();
        let second = run_batch(&jobs, &options).unwrap();
        for (x, y) in first.results.iter().zip(&second.results) {
            assert_eq!(x.outcome, y.outcome);
        }
        assert_eq!(first.get("b").unwrap().seed, Some(5));
    }

    #[test]
    fn batch_result_matches_single_run() {
        let jobs = vec![job("only", 90.0, Some(21))];
        let report = run_batch(&jobs, &BatchOptions::default()).unwrap();
        let single = simulate(&jobs[0].config, Some(21)).unwrap().summary();
        assert_eq!(report.results[0].outcome, Ok(single));
    }

    #[test]
    fn failing_job_does_not_stop_others() {
        let mut bad = job("bad", 10.0, Some(1));
        bad.config.days = 0;
        let jobs = vec![job("good", 10.0, Some(1)), bad];
        let report = run_batch(&jobs, &BatchOptions::default()).unwrap();
        assert_eq!(report.succeeded(), 1);
        assert_eq!(report.failed(), 1);
        assert!(report.get("bad").unwrap().outcome.as_ref().unwrap_err().is_config());
    }

    #[test]
    fn oversized_job_fails_alone() {
        let mut huge = job("huge", 10.0, Some(2));
        huge.config.days = usize::MAX / 4;
        let jobs = vec![job("before", 10.0, Some(1)), huge, job("after", 10.0, Some(3))];
        let options = BatchOptions {
            master_seed: None,
            max_threads: 2,
        };
        let report = run_batch(&jobs, &options).unwrap();

        assert_eq!(report.succeeded(), 2);
        assert!(report.get("before").unwrap().outcome.is_ok());
        assert!(report.get("after").unwrap().outcome.is_ok());
        assert!(matches!(
            report.get("huge").unwrap().outcome,
            Err(SimError::Runtime(_))
        ));
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let jobs = vec![job("x", 10.0, None), job("x", 20.0, None)];
        let err = run_batch(&jobs, &BatchOptions::default()).unwrap_err();
        assert_eq!(err, SimError::Config(ConfigError::invalid("id", "duplicate job id 'x'")));
    }

    #[test]
    fn empty_batch_is_rejected() {
        assert!(run_batch(&[], &BatchOptions::default()).unwrap_err().is_config());
    }

    #[test]
    fn parses_batch_file() {
        let json = r#"{
            "master_seed": 3,
            "jobs": [
                {"id": "a", "config": {"mean": 20, "std_dev": 4, "days": 30,
                  "reorder_point": 30, "order_quantity": 80, "lead_time": 2}},
                {"id": "b", "seed": 9, "config": {"distribution": "poisson", "lambda": 5,
                  "mean": 0, "std_dev": 0, "days": 30, "policy": "R_s_S",
                  "reorder_point": 10, "order_quantity": 60, "lead_time": 1}}
            ]
        }"#;
        let file = BatchFile::from_json_str(json).unwrap();
        assert_eq!(file.master_seed, Some(3));
        assert_eq!(file.jobs.len(), 2);
        assert_eq!(file.jobs[1].seed, Some(9));

        let err = BatchFile::from_json_str(r#"{"jobs": [{"id": "a"}]}"#).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }
}
