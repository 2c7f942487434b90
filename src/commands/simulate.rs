//! Implementation of the `lobbylock simulate` command.
//!
//! Drives one registry from several worker threads the way request handlers
//! in a lobby server would: try the lock, do a little work, release, and
//! treat contention as an immediate failure of the surrounding operation.

use crate::cli::SimulateArgs;
use crate::commands::load_config;
use lobbylock::error::{LobbyLockError, Result};
use lobbylock::locks::LockRegistry;
use lobbylock::scheduler::ThreadScheduler;
use serde::Serialize;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::thread;
use std::time::Duration;
use tracing::info;

/// Shape of a simulation run.
#[derive(Debug, Clone, Copy)]
pub struct SimulationPlan {
    pub workers: usize,
    pub resources: usize,
    pub iterations: usize,
    pub hold: Duration,
    pub abandon_every: usize,
}

/// Outcome of a simulation run.
#[derive(Debug, Clone, Serialize)]
pub struct SimulationReport {
    pub workers: usize,
    pub resources: usize,
    pub attempts: usize,
    pub acquired: usize,
    pub contended: usize,
    pub abandoned: usize,
    /// Stale holds removed by the final cleanup pass.
    pub reclaimed: usize,
    /// Holds still live when the run finished.
    pub still_locked: Vec<String>,
}

#[derive(Default)]
struct Counters {
    acquired: AtomicUsize,
    contended: AtomicUsize,
    abandoned: AtomicUsize,
}

/// Execute the `lobbylock simulate` command.
pub fn cmd_simulate(args: SimulateArgs) -> Result<()> {
    if args.workers == 0 {
        return Err(LobbyLockError::UserError(
            "--workers must be greater than 0".to_string(),
        ));
    }
    if args.resources == 0 {
        return Err(LobbyLockError::UserError(
            "--resources must be greater than 0".to_string(),
        ));
    }

    let mut config = load_config(args.config.as_deref())?;
    if let Some(timeout_ms) = args.timeout_ms {
        config.default_timeout_ms = timeout_ms;
        config.validate()?;
    }

    let scheduler = Arc::new(ThreadScheduler::new()?);
    let registry = LockRegistry::from_config(&config, scheduler);

    let plan = SimulationPlan {
        workers: args.workers,
        resources: args.resources,
        iterations: args.iterations,
        hold: Duration::from_millis(args.hold_ms),
        abandon_every: args.abandon_every,
    };
    let report = run_simulation(&registry, plan);
    registry.shutdown();

    if args.json {
        let json = serde_json::to_string_pretty(&report).map_err(|e| {
            LobbyLockError::UserError(format!("failed to serialize report: {}", e))
        })?;
        println!("{}", json);
    } else {
        print_report(&report);
    }

    Ok(())
}

/// Run `plan` against `registry` and collect the outcome.
///
/// Worker `w` on iteration `k` targets `game-<(w + k) % resources>`, so the
/// contention pattern is deterministic even though the interleaving is not.
pub fn run_simulation(registry: &LockRegistry, plan: SimulationPlan) -> SimulationReport {
    let counters = Counters::default();

    thread::scope(|s| {
        for worker in 0..plan.workers {
            let counters = &counters;
            s.spawn(move || run_worker(registry, plan, worker, counters));
        }
    });

    let reclaimed = registry.cleanup();
    let still_locked = registry
        .list_locks()
        .iter()
        .map(ToString::to_string)
        .collect();

    let report = SimulationReport {
        workers: plan.workers,
        resources: plan.resources,
        attempts: plan.workers * plan.iterations,
        acquired: counters.acquired.load(Ordering::SeqCst),
        contended: counters.contended.load(Ordering::SeqCst),
        abandoned: counters.abandoned.load(Ordering::SeqCst),
        reclaimed,
        still_locked,
    };
    info!(
        acquired = report.acquired,
        contended = report.contended,
        abandoned = report.abandoned,
        "simulation finished"
    );
    report
}

fn run_worker(registry: &LockRegistry, plan: SimulationPlan, worker: usize, counters: &Counters) {
    let mut held = 0usize;

    for iteration in 0..plan.iterations {
        let resource_id = format!("game-{}", (worker + iteration) % plan.resources);

        let guard = match registry.acquire(&resource_id) {
            Ok(guard) => guard,
            Err(_) => {
                counters.contended.fetch_add(1, Ordering::SeqCst);
                continue;
            }
        };
        counters.acquired.fetch_add(1, Ordering::SeqCst);
        held += 1;

        if plan.abandon_every > 0 && held % plan.abandon_every == 0 {
            counters.abandoned.fetch_add(1, Ordering::SeqCst);
            guard.abandon();
            continue;
        }

        if !plan.hold.is_zero() {
            thread::sleep(plan.hold);
        }
        guard.release();
    }
}

fn print_report(report: &SimulationReport) {
    println!("Simulation Summary");
    println!("==================");
    println!();
    println!("  Workers:    {}", report.workers);
    println!("  Resources:  {}", report.resources);
    println!("  Attempts:   {}", report.attempts);
    println!("  Acquired:   {}", report.acquired);
    println!("  Contended:  {}", report.contended);
    println!("  Abandoned:  {}", report.abandoned);
    println!("  Reclaimed:  {}", report.reclaimed);
    println!();

    if report.still_locked.is_empty() {
        println!("No locks held at exit.");
        return;
    }

    println!("Held at exit ({}):", report.still_locked.len());
    for lock in &report.still_locked {
        println!("  {}", lock);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lobbylock::scheduler::ManualScheduler;
    use serial_test::serial;

    fn plan(workers: usize, resources: usize, iterations: usize) -> SimulationPlan {
        SimulationPlan {
            workers,
            resources,
            iterations,
            hold: Duration::ZERO,
            abandon_every: 0,
        }
    }

    #[test]
    fn single_worker_never_contends() {
        let registry = LockRegistry::new(Arc::new(ManualScheduler::new()));
        let report = run_simulation(&registry, plan(1, 3, 9));

        assert_eq!(report.attempts, 9);
        assert_eq!(report.acquired, 9);
        assert_eq!(report.contended, 0);
        assert!(report.still_locked.is_empty());
    }

    #[test]
    #[serial]
    fn every_attempt_is_acquired_or_contended() {
        let registry = LockRegistry::new(Arc::new(ThreadScheduler::new().unwrap()));
        let report = run_simulation(
            &registry,
            SimulationPlan {
                hold: Duration::from_millis(1),
                ..plan(4, 2, 20)
            },
        );

        assert_eq!(report.attempts, 80);
        assert_eq!(report.acquired + report.contended, report.attempts);
        assert!(report.still_locked.is_empty());
        registry.shutdown();
    }

    #[test]
    fn abandoned_holds_stay_until_timeout() {
        let scheduler = Arc::new(ManualScheduler::new());
        let registry = LockRegistry::new(scheduler.clone());
        let report = run_simulation(
            &registry,
            SimulationPlan {
                abandon_every: 1,
                ..plan(1, 2, 2)
            },
        );

        assert_eq!(report.acquired, 2);
        assert_eq!(report.abandoned, 2);
        assert_eq!(report.reclaimed, 0);
        assert_eq!(report.still_locked.len(), 2);
        assert!(report.still_locked[0].starts_with("game-0"));

        scheduler.advance(registry.default_timeout());
        assert!(registry.is_empty());
    }

    #[test]
    fn rejects_zero_workers() {
        let args = SimulateArgs {
            config: None,
            workers: 0,
            resources: 1,
            iterations: 1,
            hold_ms: 0,
            timeout_ms: None,
            abandon_every: 0,
            json: false,
        };

        let err = cmd_simulate(args).unwrap_err();
        assert_eq!(err.exit_code(), lobbylock::exit_codes::USER_ERROR);
        assert!(err.to_string().contains("--workers"));
    }

    #[test]
    fn rejects_zero_timeout_override() {
        let args = SimulateArgs {
            config: None,
            workers: 1,
            resources: 1,
            iterations: 1,
            hold_ms: 0,
            timeout_ms: Some(0),
            abandon_every: 0,
            json: false,
        };

        let err = cmd_simulate(args).unwrap_err();
        assert_eq!(err.exit_code(), lobbylock::exit_codes::CONFIG_FAILURE);
    }
}
