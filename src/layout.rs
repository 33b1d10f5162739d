use core::fmt;

use alloc::vec::Vec;

use crate::card::Card;
use crate::deck::Deck;
use crate::rules::Rules;

pub type LayoutResult<T> = core::result::Result<T, InvalidLayout>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvalidLayout {
    Rules(&'static str),
    DeckCount { expected: usize, found: usize },
    DeckOverflow { deck: usize, len: usize, capacity: usize },
    RankOutOfRange { deck: usize, pos: usize, rank: u32 },
    NotANumber { index: usize },
    MissingCards { expected: usize, found: usize },
    TrailingInput { expected: usize },
    CardAfterGap { deck: usize, pos: usize },
}

impl fmt::Display for InvalidLayout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Rules(reason) => write!(f, "invalid rules: {reason}"),
            Self::DeckCount { expected, found } => {
                write!(f, "expected {expected} decks, found {found}")
            }
            Self::DeckOverflow {
                deck,
                len,
                capacity,
            } => write!(f, "deck {deck} holds {len} cards but only fits {capacity}"),
            Self::RankOutOfRange { deck, pos, rank } => {
                write!(f, "rank {rank} at deck {deck} position {pos} is out of range")
            }
            Self::NotANumber { index } => write!(f, "token {index} is not a rank"),
            Self::MissingCards { expected, found } => {
                write!(f, "expected {expected} ranks, input ended after {found}")
            }
            Self::TrailingInput { expected } => {
                write!(f, "input continues after the expected {expected} ranks")
            }
            Self::CardAfterGap { deck, pos } => {
                write!(f, "deck {deck} has a card at position {pos} above an empty slot")
            }
        }
    }
}

impl core::error::Error for InvalidLayout {}

/// The decks of a table from left to right, before any collapse.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout {
    rules: Rules,
    decks: Vec<Deck>,
}

impl Layout {
    /// # Errors
    ///
    /// Fails when the deck count differs from the rules, a deck is over
    /// capacity or a rank falls outside the playable range.
    pub fn new(decks: Vec<Deck>, rules: Rules) -> LayoutResult<Self> {
        validate(&decks, &rules)?;
        Ok(Self { rules, decks })
    }

    pub(crate) fn from_dealt(decks: Vec<Deck>, rules: Rules) -> Self {
        debug_assert!(validate(&decks, &rules).is_ok());
        Self { rules, decks }
    }

    #[must_use]
    pub fn empty(rules: Rules) -> Self {
        Self {
            rules,
            decks: (0..rules.n_decks()).map(|_| Deck::new()).collect(),
        }
    }

    /// Reads `n_decks` rows of `deck_size` ranks each, bottom card first.
    /// A `0` marks an unused slot and may only appear above the last card of
    /// its deck.
    ///
    /// # Errors
    ///
    /// Fails on non-numeric tokens, a wrong number of ranks, ranks out of
    /// range or a card placed above an unused slot.
    pub fn parse(text: &str, rules: Rules) -> LayoutResult<Self> {
        let expected = rules.n_cards();
        let size = rules.deck_size() as usize;
        let mut decks: Vec<Deck> = Vec::with_capacity(rules.n_decks() as usize);
        let mut tokens = text.split_ascii_whitespace();

        for deck in 0..rules.n_decks() as usize {
            let mut d = Deck::new();
            let mut gap = false;
            for pos in 0..size {
                let index = deck * size + pos;
                let token = tokens.next().ok_or(InvalidLayout::MissingCards {
                    expected,
                    found: index,
                })?;
                let rank: u32 = token
                    .parse()
                    .map_err(|_| InvalidLayout::NotANumber { index })?;

                if rank == 0 {
                    gap = true;
                    continue;
                }
                if gap {
                    return Err(InvalidLayout::CardAfterGap { deck, pos });
                }
                match u8::try_from(rank) {
                    Ok(r) if rules.contains(r) => d.push(Card::new(r)),
                    _ => return Err(InvalidLayout::RankOutOfRange { deck, pos, rank }),
                }
            }
            decks.push(d);
        }

        if tokens.next().is_some() {
            return Err(InvalidLayout::TrailingInput { expected });
        }

        Ok(Self { rules, decks })
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
    pub fn into_decks(self) -> Vec<Deck> {
        self.decks
    }
}

pub(crate) fn validate(decks: &[Deck], rules: &Rules) -> LayoutResult<()> {
    if decks.len() != rules.n_decks() as usize {
        return Err(InvalidLayout::DeckCount {
            expected: rules.n_decks() as usize,
            found: decks.len(),
        });
    }
    for (deck, d) in decks.iter().enumerate() {
        if d.len() > rules.deck_size() as usize {
            return Err(InvalidLayout::DeckOverflow {
                deck,
                len: d.len(),
                capacity: rules.deck_size() as usize,
            });
        }
        if let Some((pos, c)) = d
            .cards()
            .iter()
            .enumerate()
            .find(|(_, c)| !rules.contains(c.rank()))
        {
            return Err(InvalidLayout::RankOutOfRange {
                deck,
                pos,
                rank: u32::from(c.rank()),
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use alloc::string::ToString;
    use alloc::vec;

    use super::*;

    fn tiny() -> Rules {
        Rules::new(2, 2, 7).unwrap()
    }

    #[test]
    fn test_parse() {
        let layout = Layout::parse("6 7\n7 6\n", tiny()).unwrap();
        assert_eq!(layout.decks()[0], Deck::from(&[6u8, 7][..]));
        assert_eq!(layout.decks()[1], Deck::from(&[7u8, 6][..]));
    }

    #[test]
    fn test_parse_gaps() {
        let layout = Layout::parse("7 0 0 0", tiny()).unwrap();
        assert_eq!(layout.decks()[0], Deck::from(&[7u8][..]));
        assert!(layout.decks()[1].is_empty());

        assert_eq!(
            Layout::parse("0 7 6 6", tiny()),
            Err(InvalidLayout::CardAfterGap { deck: 0, pos: 1 })
        );
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(
            Layout::parse("6 7 7", tiny()),
            Err(InvalidLayout::MissingCards {
                expected: 4,
                found: 3
            })
        );
        assert_eq!(
            Layout::parse("6 7 7 6 6", tiny()),
            Err(InvalidLayout::TrailingInput { expected: 4 })
        );
        assert_eq!(
            Layout::parse("6 x 7 6", tiny()),
            Err(InvalidLayout::NotANumber { index: 1 })
        );
        assert_eq!(
            Layout::parse("6 7 8 6", tiny()),
            Err(InvalidLayout::RankOutOfRange {
                deck: 1,
                pos: 0,
                rank: 8
            })
        );
        assert_eq!(
            Layout::parse("6 7 -1 6", tiny()),
            Err(InvalidLayout::NotANumber { index: 2 })
        );
        assert_eq!(
            Layout::parse("6 7 300 6", tiny()),
            Err(InvalidLayout::RankOutOfRange {
                deck: 1,
                pos: 0,
                rank: 300
            })
        );
    }

    #[test]
    fn test_validate() {
        let rules = tiny();
        assert!(Layout::new(vec![Deck::new(), Deck::new()], rules).is_ok());
        assert_eq!(
            Layout::new(vec![Deck::new()], rules),
            Err(InvalidLayout::DeckCount {
                expected: 2,
                found: 1
            })
        );
        assert_eq!(
            Layout::new(vec![Deck::from(&[6u8, 6, 7][..]), Deck::new()], rules),
            Err(InvalidLayout::DeckOverflow {
                deck: 0,
                len: 3,
                capacity: 2
            })
        );
        assert_eq!(
            Layout::new(vec![Deck::new(), Deck::from(&[5u8][..])], rules),
            Err(InvalidLayout::RankOutOfRange {
                deck: 1,
                pos: 0,
                rank: 5
            })
        );
    }

    #[test]
    fn test_error_message() {
        let e = InvalidLayout::MissingCards {
            expected: 72,
            found: 10,
        };
        assert_eq!(e.to_string(), "expected 72 ranks, input ended after 10");
    }
}
