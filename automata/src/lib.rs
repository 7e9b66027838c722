#![deny(rust_2018_idioms)]
#![deny(future_incompatible)]

pub mod convert;
pub mod dfa;
pub mod export;
pub mod minimize;
pub mod nfa;
pub mod table;

pub use dfa::{Simulation, DFA};
pub use nfa::NFA;
