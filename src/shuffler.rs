use alloc::vec::Vec;
use rand::prelude::*;

use crate::card::Card;
use crate::deck::Deck;
use crate::layout::Layout;
use crate::rules::Rules;

/// Every playable rank `n_decks` times, so a won game leaves exactly one run
/// per deck.
#[must_use]
pub fn full_pack(rules: Rules) -> Vec<Card> {
    (rules.low_rank()..=rules.bottom_rank())
        .flat_map(|rank| (0..rules.n_decks()).map(move |_| Card::new(rank)))
        .collect()
}

#[must_use]
pub fn default_shuffle(rules: Rules, seed: u64) -> Layout {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut cards = full_pack(rules);
    cards.shuffle(&mut rng);
    deal(&cards, rules)
}

// cards are dealt one deck at a time, bottom card first
fn deal(cards: &[Card], rules: Rules) -> Layout {
    let decks: Vec<Deck> = cards
        .chunks(rules.deck_size() as usize)
        .map(|chunk| chunk.iter().copied().collect())
        .collect();
    debug_assert_eq!(decks.len(), rules.n_decks() as usize);
    Layout::from_dealt(decks, rules)
}
