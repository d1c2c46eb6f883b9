pub mod error;
pub mod manager;
pub mod model;
pub mod parser;
pub mod seed;
pub mod server;

use std::collections::HashMap;
use std::fmt;
use std::sync::RwLock;

use crate::error::LeaderboardError;
use crate::model::User;

/// Everything the engine owns, guarded as one unit. The re-rank pass touches
/// the entire ranked index, so partial concurrent mutation would corrupt the
/// sort invariant; one coarse lock keeps every read rank-consistent.
struct State {
    /// Primary store: id -> owned record
    users: HashMap<u64, User>,
    /// Ranked index: the same ids in comparator order (rating desc,
    /// username asc). Set-equal to the primary store's key set.
    ranked: Vec<u64>,
    /// Lowercase username -> ids with that exact lowercased name.
    /// Exact-key lookup only; substring search scans the ranked index.
    username_index: HashMap<String, Vec<u64>>,
    next_id: u64,
}

pub struct Leaderboard {
    state: RwLock<State>,
}

impl fmt::Debug for Leaderboard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Leaderboard")
            .field("user_count", &self.state.read().unwrap().users.len())
            .finish()
    }
}

impl Default for Leaderboard {
    fn default() -> Self {
        Self::new()
    }
}

impl Leaderboard {
    pub fn new() -> Self {
        Self {
            state: RwLock::new(State {
                users: HashMap::new(),
                ranked: Vec::new(),
                username_index: HashMap::new(),
                next_id: 1,
            }),
        }
    }

    /// Loads a batch of (username, rating) records, assigning fresh ids.
    /// Re-ranks once after the whole batch, so the load is O(n log n) total.
    /// Returns the number of records loaded.
    pub fn bulk_load<I>(&self, records: I) -> usize
    where
        I: IntoIterator<Item = (String, i64)>,
    {
        let mut state = self.state.write().unwrap();
        let mut loaded = 0;
        for (username, rating) in records {
            insert_record(&mut state, username, rating);
            loaded += 1;
        }
        recalculate_ranks(&mut state);
        loaded
    }

    /// Adds a single user and re-ranks. Returns a snapshot of the new record
    /// with its rank already assigned.
    pub fn add_user(&self, username: impl Into<String>, rating: i64) -> User {
        let mut state = self.state.write().unwrap();
        let id = insert_record(&mut state, username.into(), rating);
        recalculate_ranks(&mut state);
        state.users[&id].clone()
    }

    /// Sets a user's rating and re-ranks the whole board. Every record's
    /// rank may shift, not just this one's.
    ///
    /// Rating bounds are deliberately not checked here; the engine is a
    /// total function of any integer rating.
    pub fn update_rating(&self, id: u64, new_rating: i64) -> Result<(), LeaderboardError> {
        let mut state = self.state.write().unwrap();
        match state.users.get_mut(&id) {
            Some(user) => user.rating = new_rating,
            None => return Err(LeaderboardError::UserNotFound(id)),
        }
        recalculate_ranks(&mut state);
        Ok(())
    }

    /// Returns snapshot copies of the records at ranked positions
    /// [offset, offset + limit), clamped to the population. An offset past
    /// the end yields an empty Vec, not an error.
    pub fn get_range(&self, limit: usize, offset: usize) -> Vec<User> {
        let state = self.state.read().unwrap();
        if offset >= state.ranked.len() {
            return Vec::new();
        }
        let end = offset.saturating_add(limit).min(state.ranked.len());
        state.ranked[offset..end]
            .iter()
            .map(|id| state.users[id].clone())
            .collect()
    }

    /// Case-insensitive substring match over every username, returned as
    /// copies in current ranked order. The empty query matches everyone.
    pub fn search(&self, query: &str) -> Vec<User> {
        let state = self.state.read().unwrap();
        let needle = query.to_lowercase();
        state
            .ranked
            .iter()
            .map(|id| &state.users[id])
            .filter(|user| user.username.to_lowercase().contains(&needle))
            .cloned()
            .collect()
    }

    /// Exact-match lookup in the username index (lowercased key). Substring
    /// search does not consult this index; it scans the ranked index instead.
    pub fn ids_for_username(&self, username: &str) -> Vec<u64> {
        let state = self.state.read().unwrap();
        state
            .username_index
            .get(&username.to_lowercase())
            .cloned()
            .unwrap_or_default()
    }

    pub fn count(&self) -> usize {
        self.state.read().unwrap().users.len()
    }
}

/// Inserts without re-ranking; callers re-rank once they are done mutating.
fn insert_record(state: &mut State, username: String, rating: i64) -> u64 {
    let id = state.next_id;
    state.next_id += 1;

    state
        .username_index
        .entry(username.to_lowercase())
        .or_default()
        .push(id);

    state.users.insert(
        id,
        User {
            id,
            username,
            rating,
            rank: 0,
        },
    );
    state.ranked.push(id);
    id
}

/// Full re-rank: sort the ranked index by the comparator, then one forward
/// pass assigning competition ranks. O(n log n), independent of prior order.
fn recalculate_ranks(state: &mut State) {
    let State { users, ranked, .. } = state;

    ranked.sort_by(|a, b| {
        let ua = &users[a];
        let ub = &users[b];
        ub.rating
            .cmp(&ua.rating)
            .then_with(|| ua.username.cmp(&ub.username))
    });

    let mut current_rank = 1;
    let mut prev_rating: Option<i64> = None;
    for (pos, id) in ranked.iter().enumerate() {
        let user = users.get_mut(id).expect("ranked index out of sync");
        if prev_rating != Some(user.rating) {
            current_rank = pos + 1;
        }
        prev_rating = Some(user.rating);
        user.rank = current_rank;
    }
}
