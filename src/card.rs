// ranks are kept to two decimal digits so they fit the fixed-width encoding
pub const MAX_RANK: u8 = 99;
pub const ACE_RANK: u8 = 14;

/// Returned by [`crate::state::State::top_rank`] for an empty deck, so an empty
/// destination accepts any card.
pub const EMPTY_TOP: u32 = u32::MAX;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Card(u8);

impl Card {
    #[must_use]
    pub const fn new(rank: u8) -> Self {
        debug_assert!(rank > 0 && rank <= MAX_RANK);
        Self(rank)
    }

    #[must_use]
    pub const fn rank(self) -> u8 {
        self.0
    }

    #[must_use]
    pub const fn is_ace(self) -> bool {
        self.0 == ACE_RANK
    }

    // `other` is the top of the destination deck, `None` when it is empty
    #[must_use]
    pub const fn go_after(self, other: Option<Self>) -> bool {
        if let Some(other) = other {
            self.0 < other.0
        } else {
            true
        }
    }

    #[must_use]
    pub const fn follows(self, prev: Self) -> bool {
        self.0 + 1 == prev.0
    }
}
