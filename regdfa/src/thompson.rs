use crate::ast::Operator;
use crate::parser::{Parser, ParserEngine};

use automata::nfa::{Builder, Fragment};
use automata::NFA;

pub type NFAParser<T> = Parser<NFAParserEngine<T>>;

/// A regular expression parser engine that produces an NFA describing the same language as the
/// regular expression, by Thompson's construction over a stack of fragments. Each engine owns a
/// fresh [Builder], so state labels start at zero for every parse.
#[derive(Debug)]
pub struct NFAParserEngine<T>
where
    T: Clone + Ord + From<char>,
{
    builder: Builder<T>,
    stack: Vec<Fragment>,
}

impl<T> ParserEngine for NFAParserEngine<T>
where
    T: Clone + Ord + From<char>,
{
    type Output = NFA<T>;

    #[inline]
    fn new() -> Self {
        Self {
            builder: Builder::new(),
            stack: Vec::new(),
        }
    }

    #[inline]
    fn handle_literal(&mut self, c: char) {
        let fragment = self.builder.literal(c.into());
        self.stack.push(fragment);
    }

    #[inline]
    fn handle_operator(&mut self, op: Operator) -> Option<()> {
        let fragment = match op {
            Operator::KleeneStar => {
                let a = self.stack.pop()?;
                self.builder.kleene_star(a)
            }
            Operator::Concatenation => {
                let b = self.stack.pop()?;
                let a = self.stack.pop()?;
                self.builder.concatenation(a, b)
            }
            Operator::Union => {
                let b = self.stack.pop()?;
                let a = self.stack.pop()?;
                self.builder.union(a, b)
            }
        };

        self.stack.push(fragment);
        Some(())
    }

    #[inline]
    fn finish(mut self) -> Option<Self::Output> {
        let fragment = self.stack.pop()?;
        if !self.stack.is_empty() {
            return None;
        }

        Some(self.builder.finish(fragment))
    }
}
