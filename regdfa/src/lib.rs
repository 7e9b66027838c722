//! Compile regular expressions over alphanumeric symbols into automata.
//!
//! Patterns support literals, implicit concatenation, alternation (`|`), kleene star (`*`) and
//! grouping. A pattern is parsed to postfix, built into a Thompson NFA, determinized by subset
//! construction and optionally minimized by partition refinement:
//!
//! ```
//! let nfa = regdfa::compile("(a|b)*abb").unwrap();
//! let dfa = regdfa::determinize(&nfa);
//! let min = regdfa::minimize(&dfa);
//!
//! let sim = regdfa::simulate(&min, "babb");
//! assert!(sim.accepted);
//! assert_eq!(vec![0, 0, 1, 2, 3], sim.trace);
//! ```
#![deny(rust_2018_idioms)]
#![deny(future_incompatible)]

mod regexp;

pub mod ast;
pub mod parser;
pub mod thompson;

pub use automata;
pub use parser::{ParseError, ParseResult, Span};
pub use regexp::*;
