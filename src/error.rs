use std::fmt;

/// The engine's only failure mode. Every other input (out-of-range offsets,
/// empty queries, duplicate usernames) is defined behavior, not an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LeaderboardError {
    UserNotFound(u64),
}

impl fmt::Display for LeaderboardError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LeaderboardError::UserNotFound(id) => write!(f, "user {} not found", id),
        }
    }
}

impl std::error::Error for LeaderboardError {}
