use static_assertions::const_assert;

use crate::card::{ACE_RANK, MAX_RANK};
use crate::layout::{InvalidLayout, LayoutResult};

pub const MAX_DECKS: u8 = 16;
pub const MAX_DECK_CARDS: u8 = 16;
// dealt cards plus a descending chain below the top one
pub const MAX_HEIGHT: u8 = 2 * MAX_DECK_CARDS - 1;

pub const N_DECKS: u8 = 8;
pub const N_DECK_CARDS: u8 = 9;

const_assert!(N_DECKS <= MAX_DECKS);
const_assert!(N_DECK_CARDS <= MAX_DECK_CARDS);
const_assert!(N_DECK_CARDS <= ACE_RANK);

/// Table configuration. A deck collapses once it holds `deck_size` cards
/// running down by one from `bottom_rank`, so the playable ranks are
/// `bottom_rank - deck_size + 1 ..= bottom_rank`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rules {
    n_decks: u8,
    deck_size: u8,
    bottom_rank: u8,
}

impl Default for Rules {
    fn default() -> Self {
        Self::STANDARD
    }
}

impl Rules {
    pub const STANDARD: Self = Self {
        n_decks: N_DECKS,
        deck_size: N_DECK_CARDS,
        bottom_rank: ACE_RANK,
    };

    /// # Errors
    ///
    /// Returns [`InvalidLayout::Rules`] if the counts do not fit the inline
    /// capacities or the rank range would drop below 1.
    pub const fn new(n_decks: u8, deck_size: u8, bottom_rank: u8) -> LayoutResult<Self> {
        if n_decks == 0 || n_decks > MAX_DECKS {
            return Err(InvalidLayout::Rules("number of decks out of range"));
        }
        if deck_size == 0 || deck_size > MAX_DECK_CARDS {
            return Err(InvalidLayout::Rules("deck size out of range"));
        }
        if bottom_rank > MAX_RANK {
            return Err(InvalidLayout::Rules("bottom rank needs more than two digits"));
        }
        if bottom_rank < deck_size {
            return Err(InvalidLayout::Rules("bottom rank too low for the deck size"));
        }
        Ok(Self {
            n_decks,
            deck_size,
            bottom_rank,
        })
    }

    #[must_use]
    pub const fn n_decks(&self) -> u8 {
        self.n_decks
    }

    #[must_use]
    pub const fn deck_size(&self) -> u8 {
        self.deck_size
    }

    #[must_use]
    pub const fn bottom_rank(&self) -> u8 {
        self.bottom_rank
    }

    #[must_use]
    pub const fn low_rank(&self) -> u8 {
        self.bottom_rank + 1 - self.deck_size
    }

    #[must_use]
    pub const fn contains(&self, rank: u8) -> bool {
        self.low_rank() <= rank && rank <= self.bottom_rank
    }

    #[must_use]
    pub const fn n_cards(&self) -> usize {
        self.n_decks as usize * self.deck_size as usize
    }

    /// Tallest a deck can get: the full deal with a strictly descending
    /// chain of the `deck_size - 1` lower ranks on top.
    #[must_use]
    pub const fn max_height(&self) -> u8 {
        2 * self.deck_size - 1
    }

    #[must_use]
    pub const fn encode_len(&self) -> usize {
        self.n_decks as usize * self.max_height() as usize * 2
    }
}
