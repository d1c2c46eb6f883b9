use clap::Parser;
use std::sync::Arc;
use std::time::Duration;

use podium::manager::{self, SystemProfile};
use podium::seed;
use podium::server;
use podium::Leaderboard;

#[derive(Parser, Clone, Debug)]
#[clap(author, version, about, long_about = None)]
struct Args {
    #[clap(long, default_value = "8080")]
    port: u16,

    /// Users to bulk-load at startup
    #[clap(long, default_value = "10000")]
    seed_count: usize,

    /// Seconds between simulated rating-update batches
    #[clap(long, default_value = "5")]
    update_interval: u64,

    /// Disable the random-update driver
    #[clap(long)]
    no_simulation: bool,
}

fn main() {
    let profile = SystemProfile::detect();

    println!("--- [Podium Resource Manager] ---");
    println!("Detected Cores: {}", profile.logical_cores);
    println!("Worker Threads: {}", profile.worker_threads);
    println!("---------------------------------");

    tokio::runtime::Builder::new_multi_thread()
        .worker_threads(profile.worker_threads)
        .enable_all()
        .build()
        .unwrap()
        .block_on(async_main());
}

async fn async_main() {
    if std::env::var("RUST_LOG").is_err() {
        std::env::set_var("RUST_LOG", "info,podium=info");
    }
    tracing_subscriber::fmt()
        .with_target(false)
        .with_level(true)
        .init();

    let args = Args::parse();
    println!("--- Podium Leaderboard Server ---");

    let board = Arc::new(Leaderboard::new());

    println!("Seeding users...");
    seed::seed_users(&board, args.seed_count);

    let simulation = if args.no_simulation {
        None
    } else {
        Some(manager::start_simulation(
            board.clone(),
            Duration::from_secs(args.update_interval),
        ))
    };

    let port = args.port;
    let server_board = board.clone();
    tokio::spawn(async move {
        server::run_server(server_board, port).await;
    });

    println!("Podium HTTP API listening on port {}", port);
    println!("Endpoints available:");
    println!("  - GET  /api/leaderboard");
    println!("  - GET  /api/search?q=rahul");
    println!("  - POST /api/update");
    println!("  - GET  /health");
    println!("Server is Ready.");

    tokio::signal::ctrl_c().await.unwrap();
    if let Some(handle) = simulation {
        handle.abort();
    }
    println!("Shutting down.");
}
