use arrayvec::ArrayVec;

use crate::rules::MAX_DECKS;

/// Take the top card of deck `from` and put it on deck `to`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Move {
    pub from: u8,
    pub to: u8,
}

impl Move {
    #[must_use]
    pub const fn new(from: u8, to: u8) -> Self {
        debug_assert!(from != to);
        Self { from, to }
    }
}

// every ordered pair of distinct decks
pub const N_MOVES_MAX: usize = MAX_DECKS as usize * (MAX_DECKS as usize - 1);

pub type MoveVec = ArrayVec<Move, N_MOVES_MAX>;
