//! Fixed-rate simulation tick loop

use std::sync::Arc;
use std::time::Duration;

use fartbox_core::SoundboardService;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use crate::world::ConsoleWorld;

/// Time between simulation steps
pub fn tick_period(rate_hz: u32) -> Duration {
    Duration::from_secs_f64(1.0 / f64::from(rate_hz.max(1)))
}

/// Deliver every spawned player's input to the soundboard once per tick
pub fn spawn_tick_loop(
    service: Arc<SoundboardService>,
    world: Arc<ConsoleWorld>,
    rate_hz: u32,
) -> JoinHandle<()> {
    let period = tick_period(rate_hz);
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
        loop {
            interval.tick().await;
            for (player, input) in world.drain_inputs() {
                service.on_tick(&player, input);
            }
        }
    })
}
