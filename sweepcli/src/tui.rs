use core::fmt;

use sweepbot::card::Card;
use sweepbot::rules::Rules;
use sweepbot::state::State;

use colored::{Color, Colorize};

pub(crate) struct ColoredCard(Option<Card>);

impl fmt::Display for ColoredCard {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if let Some(c) = self.0 {
            let color = if c.is_ace() { Color::Red } else { Color::Black };
            write!(f, "{}", format!("{:>2}", c.to_string()).color(color).on_white())
        } else {
            write!(f, "  ")
        }
    }
}

const fn color(c: Option<Card>) -> ColoredCard {
    ColoredCard(c)
}

// a deck one card short of collapsing is highlighted
fn header(pos: usize, state: &State, rules: &Rules) -> String {
    let s = format!("{}", pos + 1);
    let d = &state.decks()[pos];
    let nearly = d.len() + 1 == rules.deck_size() as usize
        && d
            .cards()
            .first()
            .is_some_and(|c| c.rank() == rules.bottom_rank())
        && d.cards().windows(2).all(|w| w[1].follows(w[0]));
    if nearly {
        s.on_blue().to_string()
    } else {
        s
    }
}

pub(crate) fn print_game(state: &State) {
    let rules = state.rules();
    let n_decks = state.decks().len();

    for i in 0..n_decks {
        print!("{}\t", header(i, state, rules));
    }
    println!();

    let height = state.decks().iter().map(|d| d.len()).max().unwrap_or(0);
    for row in 0..height {
        for d in state.decks() {
            print!("{}\t", color(d.cards().get(row).copied()));
        }
        println!();
    }
}
