use crate::parser::ParseResult;
use crate::thompson::NFAParser;

use automata::{Simulation, DFA, NFA};

/// Compile a regular expression into a Thompson NFA.
#[inline]
pub fn compile(expr: &str) -> ParseResult<'_, NFA<char>> {
    NFAParser::new().parse(expr)
}

/// Convert an NFA into an equivalent DFA by subset construction.
#[inline]
pub fn determinize(nfa: &NFA<char>) -> DFA<char> {
    nfa.to_dfa()
}

/// Produce the minimal DFA recognizing the same language.
#[inline]
pub fn minimize(dfa: &DFA<char>) -> DFA<char> {
    dfa.minimize()
}

/// Walk the DFA over the input string, collecting the visited states.
#[inline]
pub fn simulate(dfa: &DFA<char>, input: &str) -> Simulation {
    dfa.simulate(input.chars())
}

/// A compiled regular expression for matching strings. It may be used to determine if given
/// strings are within the language described by the regular expression.
#[derive(Debug, Clone)]
pub struct RegExp<E: Engine> {
    /// The regular expression represented by this structure.
    expr: String,
    /// The compiled backend of the regular expression used to evaluate input strings.
    engine: E,
}

impl<E: Engine> RegExp<E> {
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.expr
    }

    #[inline]
    pub fn engine(&self) -> &E {
        &self.engine
    }

    /// Determine if the whole input string is within the language described by the regular
    /// expression.
    #[inline]
    pub fn is_match(&self, input: &str) -> bool {
        self.engine.is_match(input)
    }
}

impl RegExp<NFA<char>> {
    /// Create a compiled regular expression that uses an NFA to evaluate input strings.
    #[inline]
    pub fn new_nfa(expr: &'_ str) -> ParseResult<'_, Self> {
        Ok(RegExp {
            expr: expr.to_owned(),
            engine: compile(expr)?,
        })
    }

    #[inline]
    pub fn with_dfa(&self) -> RegExp<DFA<char>> {
        RegExp {
            expr: self.expr.clone(),
            engine: determinize(&self.engine),
        }
    }
}

impl RegExp<DFA<char>> {
    /// Create a compiled regular expression that uses a DFA to evaluate input strings.
    #[inline]
    pub fn new(expr: &'_ str) -> ParseResult<'_, Self> {
        Ok(RegExp::new_nfa(expr)?.with_dfa())
    }

    /// Create a compiled regular expression backed by the minimal DFA.
    #[inline]
    pub fn new_minimized(expr: &'_ str) -> ParseResult<'_, Self> {
        Ok(RegExp::new(expr)?.minimized())
    }

    #[inline]
    pub fn minimized(&self) -> Self {
        RegExp {
            expr: self.expr.clone(),
            engine: minimize(&self.engine),
        }
    }

    /// Run the input through the DFA, keeping the trace of visited states.
    #[inline]
    pub fn simulate(&self, input: &str) -> Simulation {
        simulate(&self.engine, input)
    }
}

/// A trait implemented by regular expression backends, used to evaluate input strings.
pub trait Engine {
    fn is_match(&self, input: &str) -> bool;
}

impl Engine for NFA<char> {
    #[inline]
    fn is_match(&self, input: &str) -> bool {
        NFA::is_match(self, input.chars())
    }
}

impl Engine for DFA<char> {
    #[inline]
    fn is_match(&self, input: &str) -> bool {
        DFA::is_match(self, input.chars())
    }
}
