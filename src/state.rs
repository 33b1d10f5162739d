use core::cmp::Ordering;

use alloc::string::String;
use alloc::vec::Vec;

use crate::deck::Deck;
use crate::layout::{validate, Layout, LayoutResult};
use crate::moves::{Move, MoveVec};
use crate::rules::Rules;

pub type Encode = String;

/// Priority of a cleared table, above anything a non-final state can score.
pub const FINAL_PRIORITY: i64 = 2_000_000_000;

const LINK_BONUS: i64 = 20;
const EMPTY_BONUS: i64 = 50;
const RECEIVE_BONUS: i64 = 5000;

/// An immutable snapshot of every deck. Full decks are collapsed on
/// construction, then the encoding, the final flag and the priority are
/// computed once.
#[derive(Debug, Clone)]
pub struct State {
    rules: Rules,
    decks: Vec<Deck>,
    encode: Encode,
    is_final: bool,
    priority: i64,
}

impl From<Layout> for State {
    fn from(layout: Layout) -> Self {
        let rules = *layout.rules();
        Self::collapse_from(layout.into_decks(), rules)
    }
}

impl State {
    /// # Errors
    ///
    /// Same checks as [`Layout::new`].
    pub fn new(decks: Vec<Deck>, rules: Rules) -> LayoutResult<Self> {
        validate(&decks, &rules)?;
        Ok(Self::collapse_from(decks, rules))
    }

    // one pass, clearing a deck never re-checks the others
    pub(crate) fn collapse_from(mut decks: Vec<Deck>, rules: Rules) -> Self {
        for d in &mut decks {
            if d.can_collapse(&rules) {
                d.clear();
            }
        }

        let is_final = decks.iter().all(Deck::is_empty);
        let encode = encode_decks(&decks, &rules);
        let priority = if is_final {
            FINAL_PRIORITY
        } else {
            compute_priority(&decks)
        };

        Self {
            rules,
            decks,
            encode,
            is_final,
            priority,
        }
    }

    #[must_use]
    pub const fn rules(&self) -> &Rules {
        &self.rules
    }

    #[must_use]
    pub fn decks(&self) -> &[Deck] {
        &self.decks
    }

    #[must_use]
    pub fn encode(&self) -> &Encode {
        &self.encode
    }

    #[must_use]
    pub const fn is_final(&self) -> bool {
        self.is_final
    }

    #[must_use]
    pub const fn priority(&self) -> i64 {
        self.priority
    }

    #[must_use]
    pub fn top_rank(&self, pos: usize) -> u32 {
        self.decks[pos].top_rank()
    }

    #[must_use]
    pub fn is_deck_empty(&self, pos: usize) -> bool {
        self.decks[pos].is_empty()
    }

    #[must_use]
    pub fn can_collapse(&self, pos: usize) -> bool {
        self.decks[pos].can_collapse(&self.rules)
    }

    /// Ordering used by the frontier. `Equal` only says the two states score
    /// the same, compare [`State::encode`] for the same arrangement.
    #[must_use]
    pub fn priority_cmp(&self, other: &Self) -> Ordering {
        self.priority.cmp(&other.priority)
    }

    #[must_use]
    pub fn is_legal(&self, m: Move) -> bool {
        let (from, to) = (m.from as usize, m.to as usize);
        from != to
            && from < self.decks.len()
            && to < self.decks.len()
            && !self.is_deck_empty(from)
            && self.top_rank(from) < self.top_rank(to)
    }

    #[must_use]
    pub fn gen_moves(&self) -> MoveVec {
        let mut moves = MoveVec::new();
        for (from, src) in self.decks.iter().enumerate() {
            let Some(card) = src.peek_last() else {
                continue;
            };
            for (to, dst) in self.decks.iter().enumerate() {
                if from != to && card.go_after(dst.peek_last()) {
                    #[allow(clippy::cast_possible_truncation)]
                    moves.push(Move::new(from as u8, to as u8));
                }
            }
        }
        moves
    }

    /// Copies the decks, applies `m` and builds the successor, or `None` when
    /// `m` is not legal here.
    #[must_use]
    pub fn do_move(&self, m: Move) -> Option<Self> {
        self.is_legal(m).then(|| self.successor(m))
    }

    // `m` must come from `gen_moves` on this state
    pub(crate) fn successor(&self, m: Move) -> Self {
        debug_assert!(self.is_legal(m));
        let mut decks = self.decks.clone();
        if let Some(card) = decks[m.from as usize].pop() {
            decks[m.to as usize].push(card);
        }
        Self::collapse_from(decks, self.rules)
    }
}

impl PartialEq for State {
    fn eq(&self, other: &Self) -> bool {
        self.encode == other.encode
    }
}

impl Eq for State {}

/// Two digits per slot over `max_height` slots per deck rather than
/// `deck_size`, so decks grown past the deal still get distinct keys.
fn encode_decks(decks: &[Deck], rules: &Rules) -> Encode {
    let mut encode = String::with_capacity(rules.encode_len());
    for d in decks {
        for pos in 0..rules.max_height() as usize {
            let rank = d.cards().get(pos).map_or(0, |c| c.rank());
            encode.push(char::from(b'0' + rank / 10));
            encode.push(char::from(b'0' + rank % 10));
        }
    }
    encode
}

fn compute_priority(decks: &[Deck]) -> i64 {
    let mut potential = 0;

    for d in decks {
        potential += LINK_BONUS * d.ascending_links() as i64;
        if d.is_empty() {
            potential += EMPTY_BONUS;
        }
    }

    // reward any deck that can take another deck's top card right now,
    // more so the closer it is to a full run
    for (i, src) in decks.iter().enumerate() {
        let Some(card) = src.peek_last() else {
            continue;
        };
        for (j, dst) in decks.iter().enumerate() {
            if i == j {
                continue;
            }
            if dst.peek_last().map_or(true, |top| card.follows(top)) {
                potential += RECEIVE_BONUS * (dst.len() as i64 + 1);
            }
        }
    }

    potential
}
