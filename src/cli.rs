use std::io::{self, Write};

use podium::model::{HealthResponse, LeaderboardResponse, SearchResponse, StatusResponse};
use podium::parser::{self, Command};

const DEFAULT_HOST: &str = "http://127.0.0.1:8080";

fn main() {
    print_banner();

    let host = std::env::args()
        .nth(1)
        .unwrap_or_else(|| DEFAULT_HOST.to_string());
    let client = reqwest::blocking::Client::new();

    match client.get(format!("{}/health", host)).send() {
        Ok(_) => println!("[\u{2713}] Connected to Podium at {}!", host),
        Err(_) => {
            println!("[\u{2717}] Could not reach server at {}.", host);
            println!("    Make sure to run 'cargo run --release --bin podium' in another terminal.");
            return;
        }
    }
    println!("Type 'HELP' for supported commands or 'EXIT' to quit.\n");

    let stdin = io::stdin();
    let mut buffer = String::new();

    loop {
        print!("podium> ");
        io::stdout().flush().unwrap();
        buffer.clear();

        if stdin.read_line(&mut buffer).unwrap() == 0 {
            break;
        }
        if buffer.trim().is_empty() {
            continue;
        }

        match parser::parse_command(&buffer) {
            Ok(cmd) => {
                if let Err(e) = execute_command(&client, &host, cmd) {
                    println!("[\u{26a0}\u{fe0f} Error] {}", e);
                }
            }
            Err(e) => {
                println!("[\u{2717} Syntax Error] {}", e);
                if buffer.to_uppercase().starts_with("SET") {
                    println!("    \u{2139}\u{fe0f}  Hint: Try 'UPDATE 42 SET RATING 3000'");
                } else if buffer.to_uppercase().starts_with("FIND") {
                    println!("    \u{2139}\u{fe0f}  Hint: Try 'SEARCH \"rahul\"'");
                }
            }
        }
    }
}

fn print_banner() {
    println!("\n==================================================");
    println!("   Podium CLI - The Live Leaderboard");
    println!("==================================================\n");
}

fn print_help() {
    println!("\n--- Available Commands ---");
    println!("1. TOP:     TOP 10");
    println!("2. PAGE:    PAGE LIMIT 20 OFFSET 40");
    println!("3. SEARCH:  SEARCH \"rahul\"");
    println!("4. UPDATE:  UPDATE 42 SET RATING 3000");
    println!("5. COUNT:   Total registered users");
    println!("6. HEALTH:  Server health check");
    println!("7. EXIT:    Quit\n");
}

fn execute_command(client: &reqwest::blocking::Client, host: &str, cmd: Command) -> Result<(), String> {
    match cmd {
        Command::Help => {
            print_help();
            Ok(())
        }
        Command::Range { limit, offset } => perform_range(client, host, limit, offset),
        Command::Search { query } => perform_search(client, host, &query),
        Command::Update { id, rating } => perform_update(client, host, id, rating),
        Command::Count => perform_count(client, host),
        Command::Health => perform_health(client, host),
        Command::Exit => std::process::exit(0),
    }
}

// --- NETWORK HANDLERS ---

fn perform_range(
    client: &reqwest::blocking::Client,
    host: &str,
    limit: usize,
    offset: usize,
) -> Result<(), String> {
    let resp: LeaderboardResponse = client
        .get(format!("{}/api/leaderboard", host))
        .query(&[("limit", limit), ("offset", offset)])
        .send()
        .map_err(|e| e.to_string())?
        .json()
        .map_err(|e| e.to_string())?;

    println!("\nShowing {} of {} users (offset {}):", resp.users.len(), resp.total, resp.offset);
    for user in &resp.users {
        println!("  #{:<5} {:<28} {:>5}  (id {})", user.rank, user.username, user.rating, user.id);
    }
    println!();
    Ok(())
}

fn perform_search(client: &reqwest::blocking::Client, host: &str, query: &str) -> Result<(), String> {
    let response = client
        .get(format!("{}/api/search", host))
        .query(&[("q", query)])
        .send()
        .map_err(|e| e.to_string())?;

    if !response.status().is_success() {
        return Err(format!("Server returned {}", response.status()));
    }

    let resp: SearchResponse = response.json().map_err(|e| e.to_string())?;
    println!("\nFound {} matches for \"{}\":", resp.count, resp.query);
    for user in &resp.users {
        println!("  #{:<5} {:<28} {:>5}  (id {})", user.rank, user.username, user.rating, user.id);
    }
    println!();
    Ok(())
}

fn perform_update(
    client: &reqwest::blocking::Client,
    host: &str,
    id: u64,
    rating: i64,
) -> Result<(), String> {
    let response = client
        .post(format!("{}/api/update", host))
        .json(&serde_json::json!({ "user_id": id, "rating": rating }))
        .send()
        .map_err(|e| e.to_string())?;

    let status = response.status();
    let body: StatusResponse = response.json().map_err(|e| e.to_string())?;

    if status.is_success() {
        println!("[\u{2713} OK] {}", body.message);
        Ok(())
    } else {
        Err(body.message)
    }
}

fn perform_count(client: &reqwest::blocking::Client, host: &str) -> Result<(), String> {
    // limit=0 returns no records but still reports the total.
    let resp: LeaderboardResponse = client
        .get(format!("{}/api/leaderboard", host))
        .query(&[("limit", 0usize)])
        .send()
        .map_err(|e| e.to_string())?
        .json()
        .map_err(|e| e.to_string())?;

    println!("Total users: {}", resp.total);
    Ok(())
}

fn perform_health(client: &reqwest::blocking::Client, host: &str) -> Result<(), String> {
    let resp: HealthResponse = client
        .get(format!("{}/health", host))
        .send()
        .map_err(|e| e.to_string())?
        .json()
        .map_err(|e| e.to_string())?;

    println!("Status: {} | Users: {} | Timestamp: {}", resp.status, resp.users, resp.timestamp);
    Ok(())
}
