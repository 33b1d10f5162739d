use core::fmt;

use crate::card::{Card, ACE_RANK};
use crate::layout::Layout;
use crate::moves::Move;
use crate::state::State;

pub const FACES: [&str; 4] = ["J", "Q", "K", "A"];

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let rank = self.rank();
        if (11..=ACE_RANK).contains(&rank) {
            write!(f, "{}", FACES[(rank - 11) as usize])
        } else {
            write!(f, "{rank}")
        }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}▸{}", self.from + 1, self.to + 1)
    }
}

// same text `Layout::parse` reads, one deck per line
impl fmt::Display for Layout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let size = self.rules().deck_size() as usize;
        for d in self.decks() {
            for pos in 0..size {
                if pos > 0 {
                    write!(f, " ")?;
                }
                write!(f, "{}", d.cards().get(pos).map_or(0, |c| c.rank()))?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, d) in self.decks().iter().enumerate() {
            write!(f, "{}:", i + 1)?;
            for c in d.cards() {
                write!(f, " {c}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use alloc::string::ToString;

    use crate::rules::Rules;
    use crate::shuffler::default_shuffle;

    use super::*;

    #[test]
    fn test_card_format() {
        assert_eq!(Card::new(6).to_string(), "6");
        assert_eq!(Card::new(10).to_string(), "10");
        assert_eq!(Card::new(11).to_string(), "J");
        assert_eq!(Card::new(ACE_RANK).to_string(), "A");
        assert_eq!(Card::new(20).to_string(), "20");
    }

    #[test]
    fn test_move_format() {
        assert_eq!(Move::new(0, 7).to_string(), "1▸8");
    }

    #[test]
    fn test_layout_format() {
        let rules = Rules::new(2, 3, 8).unwrap();
        let layout = Layout::parse("8 7 0\n6 6 6", rules).unwrap();
        assert_eq!(layout.to_string(), "8 7 0\n6 6 6\n");

        let rules = Rules::STANDARD;
        let deal = default_shuffle(rules, 42);
        assert_eq!(Layout::parse(&deal.to_string(), rules), Ok(deal));
    }

    #[test]
    fn test_state_format() {
        let rules = Rules::new(2, 3, 13).unwrap();
        let layout = Layout::parse("13 11 12 0 0 0", rules).unwrap();
        assert_eq!(State::from(layout).to_string(), "1: K J Q\n2:\n");
    }
}
