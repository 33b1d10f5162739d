#![no_std]
extern crate alloc;

pub mod card;
pub mod deck;
pub mod formatter;
pub mod layout;
pub mod moves;
pub mod rules;
pub mod shuffler;
pub mod solver;
pub mod state;
pub mod tracking;
