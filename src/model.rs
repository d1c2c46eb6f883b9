use serde::{Deserialize, Serialize};

// Rating bounds enforced at the HTTP write path. The engine itself accepts
// any integer rating; only the API layer rejects out-of-range values.
pub const RATING_MIN: i64 = 100;
pub const RATING_MAX: i64 = 5000;

/// A ranked participant on the leaderboard.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct User {
    /// Unique ID, assigned once by the engine
    pub id: u64,

    /// Display name, immutable after creation (duplicates allowed)
    pub username: String,

    /// Mutable score driving sort order
    pub rating: i64,

    /// 1-based competition rank: ties share a rank, the next distinct
    /// rating resumes at its true position
    pub rank: usize,
}

// --- HTTP PAYLOADS ---

#[derive(Debug, Serialize, Deserialize)]
pub struct LeaderboardResponse {
    pub users: Vec<User>,
    pub total: usize,
    pub limit: usize,
    pub offset: usize,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SearchResponse {
    pub users: Vec<User>,
    pub count: usize,
    pub query: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateRequest {
    pub user_id: u64,
    pub rating: i64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct StatusResponse {
    pub status: String,
    pub message: String,
}

impl StatusResponse {
    pub fn success(message: &str) -> Self {
        Self {
            status: "success".to_string(),
            message: message.to_string(),
        }
    }

    pub fn error(message: &str) -> Self {
        Self {
            status: "error".to_string(),
            message: message.to_string(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub users: usize,
    pub timestamp: u64,
}
