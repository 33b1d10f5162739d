use arrayvec::ArrayVec;

use crate::card::{Card, EMPTY_TOP};
use crate::rules::{Rules, MAX_HEIGHT};

pub type CardVec = ArrayVec<Card, { MAX_HEIGHT as usize }>;

/// Cards stacked bottom to top, only the last one can move. A deck starts
/// with at most `deck_size` cards and grows by a strictly descending chain.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Deck(CardVec);

impl Deck {
    #[must_use]
    pub const fn new() -> Self {
        Self(ArrayVec::new_const())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn cards(&self) -> &[Card] {
        &self.0
    }

    #[must_use]
    pub fn peek_last(&self) -> Option<Card> {
        self.0.last().copied()
    }

    #[must_use]
    pub fn top_rank(&self) -> u32 {
        self.peek_last().map_or(EMPTY_TOP, |c| u32::from(c.rank()))
    }

    pub fn push(&mut self, c: Card) {
        self.0.push(c);
    }

    pub fn pop(&mut self) -> Option<Card> {
        self.0.pop()
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }

    /// A deck is removed from play once it holds exactly `deck_size` cards
    /// running down by one from the bottom rank.
    #[must_use]
    pub fn can_collapse(&self, rules: &Rules) -> bool {
        if self.len() != rules.deck_size() as usize {
            return false;
        }
        let Some(bottom) = self.0.first() else {
            return false;
        };
        bottom.rank() == rules.bottom_rank() && self.0.windows(2).all(|w| w[1].follows(w[0]))
    }

    // number of adjacent pairs stored in ascending-by-one order
    #[must_use]
    pub fn ascending_links(&self) -> usize {
        self.0
            .windows(2)
            .filter(|w| w[0].rank() + 1 == w[1].rank())
            .count()
    }
}

impl FromIterator<Card> for Deck {
    fn from_iter<T: IntoIterator<Item = Card>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl From<&[u8]> for Deck {
    fn from(ranks: &[u8]) -> Self {
        ranks.iter().map(|&r| Card::new(r)).collect()
    }
}
