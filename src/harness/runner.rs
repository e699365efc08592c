//! Run supervision: spawning users, enforcing the run bound, draining.

use std::time::Duration;

use tokio::sync::broadcast;
use tokio::task::{JoinError, JoinSet};
use tokio::time::{timeout, Instant};

use crate::config::schema::WorkloadConfig;
use crate::harness::shutdown::Shutdown;
use crate::harness::user::{Behavior, HarnessError, UserReport};
use crate::harness::wait::WaitTime;

/// How long the runner waits for users to wind down after shutdown fires.
const DRAIN_TIMEOUT: Duration = Duration::from_secs(10);

/// Bound on a run: wall-clock duration, per-user iterations, or both.
/// With neither set the run stops only on interrupt.
#[derive(Debug, Clone, Copy)]
pub struct RunBound {
    pub duration: Option<Duration>,
    pub iterations: Option<u64>,
}

impl RunBound {
    pub fn from_config(workload: &WorkloadConfig) -> Self {
        Self {
            duration: workload.duration_secs.map(Duration::from_secs),
            iterations: workload.iterations,
        }
    }
}

/// What the whole run did.
#[derive(Debug)]
pub struct RunReport {
    pub users: Vec<UserReport>,
    pub elapsed: Duration,
}

impl RunReport {
    pub fn total_iterations(&self) -> u64 {
        self.users.iter().map(|u| u.iterations).sum()
    }
}

/// Supervises one load run.
pub struct Runner {
    users: usize,
    wait: WaitTime,
    bound: RunBound,
}

impl Runner {
    pub fn new(users: usize, wait: WaitTime, bound: RunBound) -> Self {
        Self { users, wait, bound }
    }

    pub fn from_config(workload: &WorkloadConfig) -> Self {
        Self::new(
            workload.users,
            WaitTime::from_config(workload),
            RunBound::from_config(workload),
        )
    }

    /// Run the workload to completion.
    ///
    /// `factory` builds one behavior per user id, so every user owns its
    /// own clients and state. Returns once every user has wound down.
    pub async fn run<B, F>(self, factory: F) -> Result<RunReport, HarnessError>
    where
        B: Behavior,
        F: Fn(usize) -> Result<B, HarnessError>,
    {
        let shutdown = Shutdown::new();
        let run_started = Instant::now();
        let mut set: JoinSet<UserReport> = JoinSet::new();

        for user_id in 0..self.users {
            let behavior = factory(user_id)?;
            let rx = shutdown.subscribe();
            set.spawn(drive_user(
                user_id,
                behavior,
                self.wait,
                self.bound.iterations,
                rx,
            ));
        }
        tracing::info!(users = self.users, "Load run started");

        let mut reports = Vec::with_capacity(self.users);
        {
            let all_done = async {
                while let Some(joined) = set.join_next().await {
                    record_join(joined, &mut reports);
                }
            };
            tokio::select! {
                _ = all_done => {
                    tracing::info!("All users completed their iterations");
                }
                _ = bound_elapsed(self.bound.duration) => {
                    tracing::info!("Run duration reached, stopping users");
                }
                _ = tokio::signal::ctrl_c() => {
                    tracing::info!("Interrupt received, stopping users");
                }
            }
        }
        shutdown.trigger();

        let drain = async {
            while let Some(joined) = set.join_next().await {
                record_join(joined, &mut reports);
            }
        };
        if timeout(DRAIN_TIMEOUT, drain).await.is_err() {
            tracing::warn!(remaining = set.len(), "Drain deadline passed, aborting stuck users");
            set.abort_all();
            while set.join_next().await.is_some() {}
        }

        let elapsed = run_started.elapsed();
        tracing::info!(
            elapsed_secs = elapsed.as_secs_f64(),
            users = reports.len(),
            "Load run finished"
        );
        Ok(RunReport {
            users: reports,
            elapsed,
        })
    }
}

async fn bound_elapsed(duration: Option<Duration>) {
    match duration {
        Some(d) => tokio::time::sleep(d).await,
        None => std::future::pending().await,
    }
}

fn record_join(joined: Result<UserReport, JoinError>, reports: &mut Vec<UserReport>) {
    match joined {
        Ok(report) => {
            tracing::debug!(
                user_id = report.user_id,
                iterations = report.iterations,
                "User finished"
            );
            reports.push(report);
        }
        Err(e) if e.is_panic() => tracing::error!(error = %e, "User task panicked"),
        Err(_) => {}
    }
}

/// One user's task: setup, the iteration/wait loop, teardown.
async fn drive_user<B: Behavior>(
    user_id: usize,
    mut behavior: B,
    wait: WaitTime,
    iterations: Option<u64>,
    mut shutdown_rx: broadcast::Receiver<()>,
) -> UserReport {
    tokio::select! {
        result = behavior.on_start() => {
            if let Err(e) = result {
                tracing::error!(user_id, error = %e, "User setup failed");
                return UserReport { user_id, iterations: 0 };
            }
        }
        _ = shutdown_rx.recv() => {
            return UserReport { user_id, iterations: 0 };
        }
    }

    let mut completed = 0u64;
    loop {
        if let Some(cap) = iterations {
            if completed >= cap {
                break;
            }
        }
        // Dropping a mid-flight iteration here is the sanctioned abandon
        // path: its work items are never reported.
        tokio::select! {
            _ = behavior.iteration() => completed += 1,
            _ = shutdown_rx.recv() => break,
        }
        let pause = wait.sample();
        if !pause.is_zero() {
            tokio::select! {
                _ = tokio::time::sleep(pause) => {}
                _ = shutdown_rx.recv() => break,
            }
        }
    }

    behavior.on_stop().await;
    UserReport {
        user_id,
        iterations: completed,
    }
}
