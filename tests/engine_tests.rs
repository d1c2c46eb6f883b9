// Ranking engine tests: bulk load, rank assignment, tie handling, updates.

use podium::error::LeaderboardError;
use podium::Leaderboard;

fn load(board: &Leaderboard, records: &[(&str, i64)]) {
    board.bulk_load(
        records
            .iter()
            .map(|(name, rating)| (name.to_string(), *rating)),
    );
}

// =============================================================================
// Test 1: Bulk load assigns dense ids starting at 1
// =============================================================================
#[test]
fn bulk_load_assigns_ids_from_one() {
    let board = Leaderboard::new();
    let loaded = board.bulk_load(vec![
        ("alice".to_string(), 1200),
        ("bob".to_string(), 900),
        ("carol".to_string(), 1500),
    ]);

    assert_eq!(loaded, 3);
    assert_eq!(board.count(), 3);

    let all = board.get_range(10, 0);
    let mut ids: Vec<u64> = all.iter().map(|u| u.id).collect();
    ids.sort_unstable();
    assert_eq!(ids, vec![1, 2, 3]);
}

// =============================================================================
// Test 2: Records come back sorted by rating descending
// =============================================================================
#[test]
fn ranked_order_is_rating_descending() {
    let board = Leaderboard::new();
    load(&board, &[("alice", 1200), ("bob", 900), ("carol", 1500)]);

    let all = board.get_range(10, 0);
    let names: Vec<&str> = all.iter().map(|u| u.username.as_str()).collect();
    assert_eq!(names, vec!["carol", "alice", "bob"]);
    assert_eq!(all[0].rank, 1);
    assert_eq!(all[1].rank, 2);
    assert_eq!(all[2].rank, 3);
}

// =============================================================================
// Test 3: Equal ratings tie-break by username ascending
// =============================================================================
#[test]
fn ties_break_by_username_ascending() {
    let board = Leaderboard::new();
    load(&board, &[("zara", 1000), ("anna", 1000), ("mia", 1000)]);

    let all = board.get_range(10, 0);
    let names: Vec<&str> = all.iter().map(|u| u.username.as_str()).collect();
    assert_eq!(names, vec!["anna", "mia", "zara"]);
}

// =============================================================================
// Test 4: Competition ranking — ties share a rank, next distinct rating
// resumes at its true position
// =============================================================================
#[test]
fn competition_ranking_with_ties() {
    let board = Leaderboard::new();
    load(&board, &[("a", 500), ("b", 500), ("c", 400)]);

    let all = board.get_range(10, 0);
    assert_eq!(all[0].rank, 1); // a
    assert_eq!(all[1].rank, 1); // b shares rank 1
    assert_eq!(all[2].rank, 3); // c resumes at position 3, not 2
}

// =============================================================================
// Test 5: Update re-ranks the entire board, not just the updated record
// =============================================================================
#[test]
fn update_shifts_every_rank() {
    let board = Leaderboard::new();
    load(&board, &[("a", 500), ("b", 500), ("c", 400)]);

    // c was id 3; promote it above the tie
    board.update_rating(3, 600).unwrap();

    let all = board.get_range(10, 0);
    assert_eq!(all[0].username, "c");
    assert_eq!(all[0].rating, 600);
    assert_eq!(all[0].rank, 1);
    assert_eq!(all[1].username, "a");
    assert_eq!(all[1].rank, 2);
    assert_eq!(all[2].username, "b");
    assert_eq!(all[2].rank, 2);
}

// =============================================================================
// Test 6: Updating a missing id fails and mutates nothing
// =============================================================================
#[test]
fn update_unknown_id_is_atomic() {
    let board = Leaderboard::new();
    load(&board, &[("alice", 1200), ("bob", 900)]);

    let before = board.get_range(10, 0);
    let err = board.update_rating(999, 3000).unwrap_err();
    assert_eq!(err, LeaderboardError::UserNotFound(999));

    let after = board.get_range(10, 0);
    assert_eq!(before, after);
    assert_eq!(board.count(), 2);
}

// =============================================================================
// Test 7: Duplicate usernames coexist as distinct ids
// =============================================================================
#[test]
fn duplicate_usernames_are_distinct_records() {
    let board = Leaderboard::new();
    load(&board, &[("twin", 800), ("twin", 600)]);

    assert_eq!(board.count(), 2);
    let ids = board.ids_for_username("twin");
    assert_eq!(ids.len(), 2);

    let all = board.get_range(10, 0);
    assert_eq!(all[0].rating, 800);
    assert_eq!(all[1].rating, 600);
}

// =============================================================================
// Test 8: add_user returns the record with its rank already assigned
// =============================================================================
#[test]
fn add_user_returns_ranked_snapshot() {
    let board = Leaderboard::new();
    load(&board, &[("alice", 1200), ("bob", 900)]);

    let user = board.add_user("carol", 1500);
    assert_eq!(user.id, 3);
    assert_eq!(user.rank, 1);
    assert_eq!(board.count(), 3);
}

// =============================================================================
// Test 9: Exact-match username index is case-insensitive on its key
// =============================================================================
#[test]
fn username_index_lookup_lowercases() {
    let board = Leaderboard::new();
    load(&board, &[("Alice", 1200)]);

    assert_eq!(board.ids_for_username("alice"), vec![1]);
    assert_eq!(board.ids_for_username("ALICE"), vec![1]);
    assert!(board.ids_for_username("bob").is_empty());
}

// =============================================================================
// Test 10: Engine accepts out-of-range ratings (bounds are an API concern)
// =============================================================================
#[test]
fn engine_is_total_over_ratings() {
    let board = Leaderboard::new();
    load(&board, &[("alice", 1200), ("bob", 900)]);

    board.update_rating(2, -50).unwrap();
    board.update_rating(1, 1_000_000).unwrap();

    let all = board.get_range(10, 0);
    assert_eq!(all[0].rating, 1_000_000);
    assert_eq!(all[1].rating, -50);
}

// =============================================================================
// Test 11: Rank invariant holds across a burst of updates
// =============================================================================
#[test]
fn rank_invariant_after_many_updates() {
    let board = Leaderboard::new();
    board.bulk_load((0..200).map(|i| (format!("user{:03}", i), (i * 7 % 50) as i64)));

    for id in 1..=200u64 {
        board.update_rating(id, ((id * 31) % 97) as i64).unwrap();
    }

    let all = board.get_range(200, 0);
    assert_eq!(all.len(), 200);
    for pair in all.windows(2) {
        let (a, b) = (&pair[0], &pair[1]);
        assert!(
            a.rating > b.rating || (a.rating == b.rating && a.username <= b.username),
            "order violated between {} and {}",
            a.username,
            b.username
        );
        if a.rating == b.rating {
            assert_eq!(a.rank, b.rank);
        } else {
            assert!(a.rank < b.rank);
        }
    }
    // First record is always rank 1
    assert_eq!(all[0].rank, 1);
}
