use proptest::prelude::*;

use crate::{book::Book, copy::BookCopy, ledger::CopyLedger, tracking_state::TrackingState};

/// Helper function to set up a ledger holding `n` available copies
fn setup_ledger(n: usize) -> (CopyLedger, Vec<BookCopy>) {
    let book = Book::new("Title", ["Author"], 2000).unwrap();
    let mut ledger = CopyLedger::new(book.clone());
    let copies: Vec<BookCopy> = (0..n).map(|_| BookCopy::new(book.clone())).collect();
    for copy in &copies {
        assert!(ledger.acquire(copy.clone()));
    }
    (ledger, copies)
}

#[test]
fn test_acquire_rejects_foreign_and_duplicate_copies() {
    let (mut ledger, copies) = setup_ledger(1);
    let other = Book::new("Other", ["Author"], 2000).unwrap();

    assert!(!ledger.acquire(BookCopy::new(other)));
    assert!(!ledger.acquire(copies[0].clone()));
    assert_eq!(ledger.len(), 1);
}

#[test]
fn test_checkout_checkin_moves_between_sets() {
    let (mut ledger, copies) = setup_ledger(2);
    let copy = &copies[0];

    assert!(ledger.checkout(copy));
    assert_eq!(ledger.state_of(copy), Some(TrackingState::CheckedOut));
    assert!(ledger.checked_out().contains(copy));
    assert!(!ledger.available().contains(copy));

    assert!(ledger.checkin(copy));
    assert_eq!(ledger.state_of(copy), Some(TrackingState::Available));
    assert!(ledger.checked_out().is_empty());
}

#[test]
fn test_invalid_moves_leave_ledger_untouched() {
    let (mut ledger, copies) = setup_ledger(1);
    let copy = &copies[0];

    assert!(!ledger.checkin(copy));
    assert_eq!(ledger.state_of(copy), Some(TrackingState::Available));

    assert!(ledger.checkout(copy));
    assert!(!ledger.checkout(copy));
    assert_eq!(ledger.state_of(copy), Some(TrackingState::CheckedOut));

    let stranger = BookCopy::new(ledger.book().clone());
    assert!(!ledger.lose(&stranger));
    assert_eq!(ledger.len(), 1);
}

#[test]
fn test_lose_from_either_set() {
    let (mut ledger, copies) = setup_ledger(2);
    assert!(ledger.checkout(&copies[1]));

    assert!(ledger.lose(&copies[0]));
    assert!(ledger.lose(&copies[1]));
    assert!(ledger.is_empty());
    assert_eq!(ledger.state_of(&copies[0]), None);
}

#[test]
fn test_returned_sets_are_independent() {
    let (ledger, copies) = setup_ledger(1);
    let mut available = ledger.available();
    available.clear();
    available.insert(BookCopy::new(ledger.book().clone()));

    assert_eq!(ledger.len(), 1);
    assert!(ledger.available().contains(&copies[0]));
}

/// One scripted ledger operation
#[derive(Debug, Clone)]
enum Op {
    /// Check out copy at index
    CheckOut(usize),
    /// Check in copy at index
    CheckIn(usize),
    /// Lose copy at index
    Lose(usize),
}

/// Strategy producing operations on copies `0..4`
fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        (0usize..4).prop_map(Op::CheckOut),
        (0usize..4).prop_map(Op::CheckIn),
        (0usize..4).prop_map(Op::Lose),
    ]
}

proptest! {
    #[test]
    fn prop_sets_stay_disjoint(ops in prop::collection::vec(op_strategy(), 0..40)) {
        let (mut ledger, copies) = setup_ledger(4);
        for op in ops {
            match op {
                Op::CheckOut(i) => { ledger.checkout(&copies[i]); }
                Op::CheckIn(i) => { ledger.checkin(&copies[i]); }
                Op::Lose(i) => { ledger.lose(&copies[i]); }
            }
            let available = ledger.available();
            let checked_out = ledger.checked_out();
            prop_assert!(available.is_disjoint(&checked_out));
            prop_assert_eq!(ledger.all(), &available | &checked_out);
            prop_assert_eq!(ledger.len(), available.len() + checked_out.len());
        }
    }
}
