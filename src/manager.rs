use std::sync::Arc;
use std::thread;
use std::time::Duration;

use rand::Rng;
use tokio::task::JoinHandle;

use crate::model::{RATING_MAX, RATING_MIN};
use crate::Leaderboard;

/// Users touched by the simulator per tick.
pub const UPDATES_PER_TICK: usize = 10;

#[derive(Debug, Clone)]
pub struct SystemProfile {
    pub logical_cores: usize,
    pub worker_threads: usize,
}

impl SystemProfile {
    pub fn detect() -> Self {
        let cores = thread::available_parallelism().map(|n| n.get()).unwrap_or(1);

        if cores <= 1 {
            println!("[MANAGER] Single core detected. Reserving 2 workers (1 serve + 1 background).");
            Self {
                logical_cores: cores,
                worker_threads: 2,
            }
        } else {
            Self {
                logical_cores: cores,
                worker_threads: cores,
            }
        }
    }
}

/// Starts the periodic random-update driver: every `interval`, picks
/// UPDATES_PER_TICK random ids and pushes random in-range ratings through the
/// board's public update path. Purely a load-generating client; it holds no
/// leaderboard state and an id roll that misses is skipped silently.
///
/// The returned handle can be aborted to stop the simulation.
pub fn start_simulation(board: Arc<Leaderboard>, interval: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        println!("[SIM] Random Update Driver Started ({}s interval).", interval.as_secs());
        let mut ticker = tokio::time::interval(interval);
        // The first tick fires immediately; swallow it so the seeded board
        // is visible unmodified for one full interval.
        ticker.tick().await;

        loop {
            ticker.tick().await;

            let total = board.count() as u64;
            if total == 0 {
                continue;
            }

            let mut updated = 0;
            for _ in 0..UPDATES_PER_TICK {
                let mut rng = rand::thread_rng();
                let id = rng.gen_range(1..=total);
                let rating = rng.gen_range(RATING_MIN..=RATING_MAX);
                if board.update_rating(id, rating).is_ok() {
                    updated += 1;
                }
            }
            println!("[SIM] Updated {} random user ratings", updated);
        }
    })
}
