// Fixed-interval runner with graceful Ctrl-C shutdown
use async_trait::async_trait;
use std::time::Duration;
use tokio::time::{MissedTickBehavior, interval};
use tracing::{error, info};

#[async_trait]
pub trait ScheduledTask: Send {
    async fn run(&mut self);
}

pub struct Scheduler {
    period: Duration,
}

impl Scheduler {
    /// A zero period is bumped to one second.
    pub fn every(period: Duration) -> Self {
        Self {
            period: period.max(Duration::from_secs(1)),
        }
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    /// Runs `task` immediately and then once per period until Ctrl-C.
    pub async fn run<T: ScheduledTask + ?Sized>(&self, task: &mut T) {
        self.run_until(task, async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                error!("Failed to listen for Ctrl-C: {}", e);
                std::future::pending::<()>().await;
            }
        })
        .await;
    }

    /// Like `run`, stopping when `shutdown` resolves. A run in progress is
    /// finished before the signal is observed, and runs never overlap.
    pub async fn run_until<T, S>(&self, task: &mut T, shutdown: S)
    where
        T: ScheduledTask + ?Sized,
        S: Future<Output = ()>,
    {
        let mut ticker = interval(self.period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        tokio::pin!(shutdown);

        loop {
            tokio::select! {
                biased;
                _ = &mut shutdown => {
                    info!("Bot stopped by user");
                    break;
                }
                _ = ticker.tick() => {
                    task.run().await;
                    info!("Next check in {}s", self.period.as_secs());
                }
            }
        }
    }
}
