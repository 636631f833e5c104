//! Fixed-period driver for the simulation step.

use crate::{SimulationService, StepReport};
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use tracing::{debug, event, info, Level};

/// How often population gauges are emitted, in ticks
const METRICS_EVERY: u64 = 100;

pub struct Scheduler {
    service: Arc<SimulationService>,
    period: Duration,
}

impl Scheduler {
    pub fn new(service: Arc<SimulationService>, period: Duration) -> Self {
        Self { service, period }
    }

    /// Run on a background task until `shutdown` is cancelled
    pub fn spawn(self, shutdown: CancellationToken) -> JoinHandle<()> {
        tokio::spawn(self.run(shutdown))
    }

    /// Step once per period. A single task drives every tick, so ticks never overlap.
    pub async fn run(self, shutdown: CancellationToken) {
        info!(period_ms = self.period.as_millis() as u64, "Scheduler started");

        let mut interval = interval_at(Instant::now() + self.period, self.period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                _ = shutdown.cancelled() => break,
                _ = interval.tick() => {
                    let report = self.service.step();
                    self.observe(&report);
                }
            }
        }

        info!("Scheduler stopped");
    }

    fn observe(&self, report: &StepReport) {
        if report.deaths > 0 || report.births > 0 {
            debug!(
                tick = report.tick,
                births = report.births,
                deaths = report.deaths,
                foods_eaten = report.foods_eaten,
                "Tick changed population"
            );
        }

        if report.tick % METRICS_EVERY == 0 {
            self.emit_population_metrics();
        }
    }

    fn emit_population_metrics(&self) {
        let metrics = self.service.metrics();
        let events_recorded = self.service.inspect(|world| world.events().total_recorded());

        info!(
            event = "population_metrics",
            tick = metrics.tick,
            total_population = metrics.population.total,
            alive = metrics.population.alive,
            avg_energy = metrics.population.avg_energy(),
            births = metrics.births,
            deaths = metrics.deaths,
            foods = metrics.foods,
            events_recorded,
            "Population metrics snapshot"
        );

        event!(
            Level::INFO,
            gauge_name = "population_alive",
            gauge_value = metrics.population.alive,
            tick = metrics.tick,
            "Population gauge"
        );

        event!(
            Level::INFO,
            gauge_name = "avg_energy",
            gauge_value = metrics.population.avg_energy(),
            tick = metrics.tick,
            "Average energy"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::World;
    use ameba_core::SimulationConfig;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn test_service() -> Arc<SimulationService> {
        let world = World::with_rng(SimulationConfig::default(), ChaCha8Rng::seed_from_u64(1)).unwrap();
        Arc::new(SimulationService::from_world(world))
    }

    #[tokio::test(start_paused = true)]
    async fn test_ticks_at_fixed_period() {
        let service = test_service();
        let shutdown = CancellationToken::new();
        let handle = Scheduler::new(service.clone(), Duration::from_millis(200)).spawn(shutdown.clone());

        // First tick fires one period after start
        tokio::time::sleep(Duration::from_millis(100)).await;
        assert_eq!(service.inspect(|w| w.tick()), 0);

        tokio::time::sleep(Duration::from_millis(1000)).await;
        assert_eq!(service.inspect(|w| w.tick()), 5);

        shutdown.cancel();
        handle.await.unwrap();

        tokio::time::sleep(Duration::from_millis(1000)).await;
        assert_eq!(service.inspect(|w| w.tick()), 5);
    }
}
