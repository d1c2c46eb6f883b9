use rand::Rng;

use crate::model::{RATING_MAX, RATING_MIN};
use crate::Leaderboard;

const FIRST_NAMES: &[&str] = &[
    "rahul", "priya", "amit", "sneha", "raj", "pooja", "vikram", "anjali",
    "arjun", "kavya", "rohan", "neha", "aditya", "isha", "karan", "divya",
    "sanjay", "meera", "varun", "riya", "nikhil", "tanya", "ankit", "shreya",
    "harsh", "nisha", "akash", "priyanka", "vishal", "swati", "mohit", "ananya",
    "gaurav", "sakshi", "deepak", "megha", "pankaj", "ritika", "manish", "simran",
    "siddharth", "preeti", "ashish", "komal", "suresh", "aarti", "ramesh", "vandana",
    "mahesh", "jyoti", "rajesh", "sunita", "naveen", "rekha", "dinesh", "usha",
];

const LAST_NAMES: &[&str] = &[
    "kumar", "sharma", "singh", "patel", "gupta", "verma", "yadav", "reddy",
    "mehta", "joshi", "malhotra", "agarwal", "chopra", "iyer", "nair", "pillai",
    "bhat", "menon", "desai", "shah", "kapoor", "bose", "ghosh", "das",
    "burman", "mathur", "saxena", "tiwari", "mishra", "pandey", "chauhan", "rajput",
    "thakur", "sinha", "chowdhury", "banerjee", "mukherjee", "dutta", "roy", "sen",
    "bhatt", "trivedi", "jain", "soni", "mittal", "goel", "arora", "khanna",
];

/// Generates `count` (username, rating) records with usernames of the form
/// `first_lastN` and ratings uniform in [RATING_MIN, RATING_MAX].
pub fn generate(count: usize) -> Vec<(String, i64)> {
    let mut rng = rand::thread_rng();
    (1..=count)
        .map(|i| {
            let first = FIRST_NAMES[rng.gen_range(0..FIRST_NAMES.len())];
            let last = LAST_NAMES[rng.gen_range(0..LAST_NAMES.len())];
            let username = format!("{}_{}{}", first, last, i);
            let rating = rng.gen_range(RATING_MIN..=RATING_MAX);
            (username, rating)
        })
        .collect()
}

/// Bulk-loads `count` generated users into the board.
pub fn seed_users(board: &Leaderboard, count: usize) {
    let loaded = board.bulk_load(generate(count));
    println!("[SEED] Loaded {} users successfully", loaded);
}
