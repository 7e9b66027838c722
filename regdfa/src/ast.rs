use std::fmt;

/// A token of a regular expression. Concatenation never appears in a pattern; it is inserted
/// between adjacent operands before the postfix rewrite.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Token {
    Literal(char),
    Operator(Operator),
    LeftParen,
    RightParen,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum Operator {
    Union,
    Concatenation,
    KleeneStar,
}

impl Operator {
    /// Binding strength: star binds tightest, then concatenation, then union.
    #[inline]
    pub const fn precedence(self) -> u8 {
        match self {
            Operator::Union => 1,
            Operator::Concatenation => 2,
            Operator::KleeneStar => 3,
        }
    }

    /// The number of operands taken from the stack.
    #[inline]
    pub const fn arity(self) -> usize {
        match self {
            Operator::KleeneStar => 1,
            Operator::Union | Operator::Concatenation => 2,
        }
    }

    #[inline]
    pub const fn symbol(self) -> char {
        match self {
            Operator::Union => '|',
            Operator::Concatenation => '.',
            Operator::KleeneStar => '*',
        }
    }
}

impl Token {
    /// Whether an operand may end at this token.
    #[inline]
    pub(crate) const fn ends_operand(self) -> bool {
        matches!(
            self,
            Token::Literal(_) | Token::Operator(Operator::KleeneStar) | Token::RightParen
        )
    }

    /// Whether an operand may begin at this token.
    #[inline]
    pub(crate) const fn starts_operand(self) -> bool {
        matches!(self, Token::Literal(_) | Token::LeftParen)
    }
}

/// A regular expression in postfix order. Only literals and operators remain, each paired with
/// the byte offset in the pattern it came from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Postfix {
    pub(crate) tokens: Vec<(usize, Token)>,
}

impl Postfix {
    #[inline]
    pub fn tokens(&self) -> &[(usize, Token)] {
        &self.tokens
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

impl fmt::Display for Postfix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (_, token) in &self.tokens {
            match token {
                Token::Literal(c) => write!(f, "{}", c)?,
                Token::Operator(op) => write!(f, "{}", op.symbol())?,
                Token::LeftParen => write!(f, "(")?,
                Token::RightParen => write!(f, ")")?,
            }
        }
        Ok(())
    }
}
