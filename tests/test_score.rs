use street_puncher::prefs::{MemoryStore, PrefStore, Prefs};
use street_puncher::score::*;

fn stored(high_score: u32, master_volume: f32) -> MemoryStore {
    MemoryStore::with_prefs(Prefs {
        high_score,
        master_volume,
    })
}

// ── In-memory behaviour ───────────────────────────────────────────────────────

#[test]
fn add_score_accumulates() {
    let mut board = ScoreBoard::in_memory();
    board.add_score(3);
    board.add_score(4);
    assert_eq!(board.current(), 7);
    assert_eq!(board.high_score(), 7);
}

#[test]
fn add_zero_changes_nothing() {
    let mut board = ScoreBoard::in_memory();
    let change = board.add_score(0);
    assert_eq!(
        change,
        ScoreChange {
            score: 0,
            high_score: 0,
            new_high: false
        }
    );
}

#[test]
fn high_score_is_running_maximum_across_rounds() {
    let mut board = ScoreBoard::in_memory();
    let rounds: &[&[u32]] = &[&[1, 2, 3], &[5], &[1, 1]];
    let mut best = 0;
    for round in rounds {
        board.reset();
        let mut total = 0;
        for &p in *round {
            total += p;
            best = best.max(total);
            let change = board.add_score(p);
            assert_eq!(change.score, total);
            assert_eq!(change.high_score, best);
        }
    }
    assert_eq!(board.high_score(), 6);
}

#[test]
fn reset_keeps_high_score() {
    let mut board = ScoreBoard::in_memory();
    board.add_score(9);
    board.reset();
    assert_eq!(board.current(), 0);
    assert_eq!(board.high_score(), 9);
    assert!(!board.add_score(9).new_high); // ties are not new highs
}

// ── Persistence ───────────────────────────────────────────────────────────────

#[test]
fn load_reads_stored_high_score() {
    let board = ScoreBoard::load(Box::new(stored(42, 1.0)));
    assert_eq!(board.high_score(), 42);
    assert_eq!(board.current(), 0);
}

#[test]
fn persisted_matches_memory_after_each_increase() {
    let store = MemoryStore::new();
    let mut board = ScoreBoard::load(Box::new(store.clone()));
    for p in [1, 2, 5, 1, 3] {
        board.add_score(p);
        assert_eq!(store.snapshot().high_score, board.high_score());
    }
    assert_eq!(store.writes(), 5);
}

#[test]
fn no_write_while_below_stored_high_score() {
    let store = stored(10, 1.0);
    let mut board = ScoreBoard::load(Box::new(store.clone()));
    board.add_score(4);
    board.add_score(6); // ties 10
    assert_eq!(store.writes(), 0);

    assert!(board.add_score(1).new_high);
    assert_eq!(store.writes(), 1);
    assert_eq!(store.snapshot().high_score, 11);
}

#[test]
fn saving_high_score_keeps_volume() {
    let store = stored(0, 0.3);
    let mut board = ScoreBoard::load(Box::new(store.clone()));
    board.add_score(2);
    assert_eq!(store.snapshot().master_volume, 0.3);
}

#[test]
fn failed_save_is_a_warning_not_an_error() {
    let store = MemoryStore::new();
    let mut board = ScoreBoard::load(Box::new(store.clone()));
    store.set_failing(true);

    let change = board.add_score(5);
    assert_eq!(change.score, 5);
    assert_eq!(board.high_score(), 5);
    assert_eq!(board.persist_failures(), 1);

    store.set_failing(false);
    board.add_score(1);
    assert_eq!(board.persist_failures(), 1);
    assert_eq!(store.snapshot().high_score, 6);
}

#[test]
fn unreadable_store_starts_from_zero() {
    let store = stored(50, 1.0);
    store.set_failing(true);
    let board = ScoreBoard::load(Box::new(store.clone()));
    assert_eq!(board.high_score(), 0);
    assert!(store.load().is_err());
}
