// Copyright (c) 2026 bad-antics
// Licensed under the MIT License. See LICENSE file in the project root.
// https://github.com/bad-antics/casa-sim

//! Task scheduler for timed operations

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use futures::future::join_all;
use parking_lot::Mutex;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tokio::time::{interval, timeout, MissedTickBehavior};
use tracing::{debug, warn};

use super::engine::{Command, CommandSender};

struct ScheduledTask {
    name: String,
    period: Duration,
    join: JoinHandle<()>,
}

/// Runs periodic producers that post commands to the engine.
///
/// All tasks share one running flag, checked each time a task wakes.
pub struct Scheduler {
    handle: Handle,
    running: Arc<AtomicBool>,
    tasks: Mutex<Vec<ScheduledTask>>,
}

impl Scheduler {
    pub fn new(handle: Handle) -> Self {
        Self {
            handle,
            running: Arc::new(AtomicBool::new(true)),
            tasks: Mutex::new(Vec::new()),
        }
    }

    /// Call `tick` every `period`, starting immediately, and post what it returns
    pub fn spawn_periodic<F>(&self, name: &str, period: Duration, sender: CommandSender, mut tick: F)
    where
        F: FnMut() -> Option<Command> + Send + 'static,
    {
        let running = self.running.clone();
        let task_name = name.to_string();

        let join = self.handle.spawn(async move {
            let mut ticker = interval(period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                ticker.tick().await;
                if !running.load(Ordering::Acquire) {
                    debug!("Task '{}' stopping", task_name);
                    break;
                }

                if let Some(command) = tick() {
                    if sender.post(command).is_err() {
                        warn!("Task '{}' lost its engine, stopping", task_name);
                        break;
                    }
                }
            }
        });

        self.tasks.lock().push(ScheduledTask {
            name: name.to_string(),
            period,
            join,
        });
        debug!("Scheduled task '{}' with interval {:?}", name, period);
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::Acquire)
    }

    pub fn task_names(&self) -> Vec<String> {
        self.tasks.lock().iter().map(|t| t.name.clone()).collect()
    }

    /// Longest period among the scheduled tasks; the upper bound on stop latency
    pub fn longest_period(&self) -> Option<Duration> {
        self.tasks.lock().iter().map(|t| t.period).max()
    }

    /// Ask every task to exit on its next wake
    pub fn stop(&self) {
        if self.running.swap(false, Ordering::AcqRel) {
            debug!("Scheduler stop requested");
        }
    }

    /// Stop and wait up to `grace` for the tasks. Returns how many exited cleanly.
    pub async fn shutdown(&self, grace: Duration) -> usize {
        self.stop();

        let tasks: Vec<ScheduledTask> = self.tasks.lock().drain(..).collect();
        let names: Vec<String> = tasks.iter().map(|t| t.name.clone()).collect();
        let joins = tasks.into_iter().map(|t| t.join);

        match timeout(grace, join_all(joins)).await {
            Ok(results) => {
                let mut clean = 0;
                for (name, result) in names.iter().zip(results) {
                    match result {
                        Ok(()) => clean += 1,
                        Err(e) => warn!("Task '{}' terminated abnormally: {}", name, e),
                    }
                }
                clean
            }
            Err(_) => {
                warn!("Scheduled tasks did not finish within {:?}; leaving them detached", grace);
                0
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::core::Engine;
    use std::time::Instant;

    #[tokio::test]
    async fn test_periodic_task_posts_commands() {
        let mut engine = Engine::new(&Config::default());
        let scheduler = Scheduler::new(Handle::current());
        scheduler.spawn_periodic("tick", Duration::from_millis(10), engine.sender(), || {
            Some(Command::EvaluateAutomation)
        });

        tokio::time::sleep(Duration::from_millis(55)).await;
        let applied = engine.pump();

        assert!(applied >= 3, "only {} ticks arrived", applied);
        assert_eq!(scheduler.task_names(), vec!["tick".to_string()]);
        scheduler.shutdown(Duration::from_millis(100)).await;
    }

    #[tokio::test]
    async fn test_stop_exits_within_one_period() {
        let engine = Engine::new(&Config::default());
        let scheduler = Scheduler::new(Handle::current());
        let period = Duration::from_millis(40);
        scheduler.spawn_periodic("slow", period, engine.sender(), || None);
        scheduler.spawn_periodic("fast", Duration::from_millis(5), engine.sender(), || None);
        assert_eq!(scheduler.longest_period(), Some(period));

        let started = Instant::now();
        let clean = scheduler.shutdown(period * 3).await;

        assert_eq!(clean, 2);
        assert!(!scheduler.is_running());
        assert!(started.elapsed() < period * 3);
        assert!(scheduler.task_names().is_empty());
    }

    #[tokio::test]
    async fn test_task_exits_when_engine_dropped() {
        let engine = Engine::new(&Config::default());
        let scheduler = Scheduler::new(Handle::current());
        scheduler.spawn_periodic("orphan", Duration::from_millis(5), engine.sender(), || {
            Some(Command::EvaluateAutomation)
        });
        drop(engine);

        tokio::time::sleep(Duration::from_millis(30)).await;

        // Still flagged running, but the task already ended on its own
        assert!(scheduler.is_running());
        assert_eq!(scheduler.shutdown(Duration::from_millis(50)).await, 1);
    }
}
