//! Per-iteration wait-time policies.

use std::time::Duration;

use rand::Rng;

use crate::config::schema::WorkloadConfig;

/// Wait-time policy applied between a user's iterations.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum WaitTime {
    /// Fixed pause (zero means back-to-back iterations).
    Constant(Duration),
    /// Uniformly sampled pause between min and max.
    Between { min: Duration, max: Duration },
}

impl WaitTime {
    pub fn constant(secs: f64) -> Self {
        WaitTime::Constant(Duration::from_secs_f64(secs.max(0.0)))
    }

    pub fn between(min_secs: f64, max_secs: f64) -> Self {
        let min = min_secs.max(0.0);
        let max = max_secs.max(min);
        if max <= min {
            return WaitTime::Constant(Duration::from_secs_f64(min));
        }
        WaitTime::Between {
            min: Duration::from_secs_f64(min),
            max: Duration::from_secs_f64(max),
        }
    }

    pub fn from_config(workload: &WorkloadConfig) -> Self {
        Self::between(workload.wait_min_secs, workload.wait_max_secs)
    }

    /// Sample one pause.
    pub fn sample(&self) -> Duration {
        match self {
            WaitTime::Constant(d) => *d,
            WaitTime::Between { min, max } => {
                let secs = rand::thread_rng().gen_range(min.as_secs_f64()..=max.as_secs_f64());
                Duration::from_secs_f64(secs)
            }
        }
    }
}
