use crate::ast::{Operator, Postfix, Token};

use std::marker::PhantomData;

/// Alias for [`Result`] for [`ParseError`].
pub type ParseResult<'r, T> = std::result::Result<T, ParseError<'r>>;

/// Parses a regular expression to postfix, then feeds the postfix tokens to a [ParserEngine].
#[derive(Debug)]
pub struct Parser<E>
where
    E: ParserEngine,
{
    _phantom: PhantomData<E>,
}

impl<E> Parser<E>
where
    E: ParserEngine,
{
    #[allow(clippy::new_without_default)]
    #[inline]
    pub fn new() -> Self {
        Self {
            _phantom: PhantomData,
        }
    }

    #[inline]
    pub fn parse<'r>(&self, expr: &'r str) -> ParseResult<'r, E::Output> {
        let postfix = to_postfix(expr)?;
        evaluate::<E>(expr, &postfix)
    }
}

/// Evaluates postfix tokens in order. The engine keeps its own operand stack; operators that
/// find too few operands report `None`.
pub trait ParserEngine {
    type Output;

    fn new() -> Self;

    fn handle_literal(&mut self, c: char);

    fn handle_operator(&mut self, op: Operator) -> Option<()>;

    /// The single remaining operand, if exactly one is left.
    fn finish(self) -> Option<Self::Output>;
}

#[inline]
fn evaluate<'r, E>(expr: &'r str, postfix: &Postfix) -> ParseResult<'r, E::Output>
where
    E: ParserEngine,
{
    let mut engine = E::new();
    for &(pos, token) in postfix.tokens() {
        let handled = match token {
            Token::Literal(c) => {
                engine.handle_literal(c);
                Some(())
            }
            Token::Operator(op) => engine.handle_operator(op),
            Token::LeftParen | Token::RightParen => None,
        };

        if handled.is_none() {
            return Err(ParseError::UnbalancedOperators {
                span: Span::at(expr, pos),
            });
        }
    }

    engine.finish().ok_or(ParseError::UnbalancedOperators {
        span: Span::eof(expr),
    })
}

/// Rewrite a regular expression into postfix order, making concatenation explicit. The result is
/// checked to describe exactly one automaton: every operator has its operands and at least one
/// literal is present.
pub fn to_postfix(expr: &str) -> ParseResult<'_, Postfix> {
    let tokens = tokenize(expr)?;
    let tokens = insert_concatenation(tokens);
    let tokens = shunting_yard(expr, tokens)?;
    check_operands(expr, &tokens)?;

    Ok(Postfix { tokens })
}

fn tokenize(expr: &str) -> ParseResult<'_, Vec<(usize, Token)>> {
    expr.char_indices()
        .map(|(pos, c)| {
            let token = match c {
                '|' => Token::Operator(Operator::Union),
                '*' => Token::Operator(Operator::KleeneStar),
                '(' => Token::LeftParen,
                ')' => Token::RightParen,
                c if c.is_ascii_alphanumeric() => Token::Literal(c),
                token => {
                    return Err(ParseError::UnexpectedToken {
                        span: Span::at(expr, pos),
                        token,
                    })
                }
            };
            Ok((pos, token))
        })
        .collect()
}

/// Insert an explicit concatenation between every pair of adjacent tokens where an operand ends
/// and the next begins. The inserted operator takes the position of the token following it.
fn insert_concatenation(tokens: Vec<(usize, Token)>) -> Vec<(usize, Token)> {
    let mut result = Vec::with_capacity(tokens.len() * 2);
    let mut last: Option<Token> = None;

    for (pos, token) in tokens {
        if let Some(last) = last {
            if last.ends_operand() && token.starts_operand() {
                result.push((pos, Token::Operator(Operator::Concatenation)));
            }
        }

        result.push((pos, token));
        last = Some(token);
    }

    result
}

fn shunting_yard(
    expr: &str,
    tokens: Vec<(usize, Token)>,
) -> ParseResult<'_, Vec<(usize, Token)>> {
    let mut output = Vec::with_capacity(tokens.len());
    let mut op_stack: Vec<(usize, Token)> = Vec::new();

    for (pos, token) in tokens {
        match token {
            Token::Literal(_) => output.push((pos, token)),
            Token::LeftParen => op_stack.push((pos, token)),
            // Pop down to, and discard, the matching left parenthesis.
            Token::RightParen => loop {
                match op_stack.pop() {
                    Some((_, Token::LeftParen)) => break,
                    Some(op) => output.push(op),
                    None => {
                        return Err(ParseError::UnbalancedParentheses {
                            span: Span::at(expr, pos),
                        })
                    }
                }
            },
            Token::Operator(op) => {
                while let Some(&(_, Token::Operator(top))) = op_stack.last() {
                    if top.precedence() < op.precedence() {
                        break;
                    }
                    output.extend(op_stack.pop());
                }
                op_stack.push((pos, token));
            }
        }
    }

    while let Some((pos, token)) = op_stack.pop() {
        if token == Token::LeftParen {
            return Err(ParseError::UnbalancedParentheses {
                span: Span::at(expr, pos),
            });
        }
        output.push((pos, token));
    }

    Ok(output)
}

/// Track the depth of the operand stack the postfix tokens would build.
fn check_operands<'r>(expr: &'r str, postfix: &[(usize, Token)]) -> ParseResult<'r, ()> {
    let mut depth = 0;

    for &(pos, token) in postfix {
        match token {
            Token::Literal(_) => depth += 1,
            Token::Operator(op) => {
                if depth < op.arity() {
                    return Err(ParseError::UnbalancedOperators {
                        span: Span::at(expr, pos),
                    });
                }
                depth = depth - op.arity() + 1;
            }
            Token::LeftParen | Token::RightParen => {}
        }
    }

    match depth {
        0 => Err(ParseError::EmptyExpression {
            span: Span::eof(expr),
        }),
        1 => Ok(()),
        _ => Err(ParseError::UnbalancedOperators {
            span: Span::eof(expr),
        }),
    }
}

/// Error returned when attempting to parse an invalid regular expression.
#[derive(Debug, thiserror::Error)]
pub enum ParseError<'r> {
    /// There is nothing to match: the pattern is empty or only holds parentheses.
    #[error("empty regular expression")]
    EmptyExpression { span: Span<'r> },

    /// A character outside of the supported alphabet and operators.
    #[error("unexpected token {token:?} at position {}", .span.start())]
    UnexpectedToken { span: Span<'r>, token: char },

    /// There are an invalid number of operators, or operands are missing.
    #[error("unbalanced operators at position {}", .span.start())]
    UnbalancedOperators { span: Span<'r> },
    /// There are one or more sets of unclosed parentheses.
    #[error("unbalanced parentheses at position {}", .span.start())]
    UnbalancedParentheses { span: Span<'r> },
}

impl<'r> ParseError<'r> {
    #[inline]
    pub fn span(&self) -> &Span<'r> {
        match self {
            ParseError::EmptyExpression { span }
            | ParseError::UnexpectedToken { span, .. }
            | ParseError::UnbalancedOperators { span }
            | ParseError::UnbalancedParentheses { span } => span,
        }
    }
}

/// A byte range of the pattern and the text it covers.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Span<'r> {
    start: usize,
    end: usize,

    text: &'r str,
}

impl<'r> Span<'r> {
    #[inline]
    pub fn new(start: usize, end: usize, text: &'r str) -> Self {
        Self { start, end, text }
    }

    /// The span of the character starting at byte `pos`.
    #[inline]
    fn at(expr: &'r str, pos: usize) -> Self {
        let end = expr[pos..]
            .chars()
            .next()
            .map_or(pos, |c| pos + c.len_utf8());
        Self::new(pos, end, &expr[pos..end])
    }

    /// The empty span at the end of the pattern.
    #[inline]
    fn eof(expr: &'r str) -> Self {
        Self::new(expr.len(), expr.len(), "")
    }

    #[inline]
    pub fn start(&self) -> usize {
        self.start
    }

    #[inline]
    pub fn end(&self) -> usize {
        self.end
    }

    #[inline]
    pub fn text(&self) -> &str {
        self.text
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn postfix(expr: &str) -> String {
        to_postfix(expr).unwrap().to_string()
    }

    #[test]
    fn test_insert_concatenation() {
        let tokens = insert_concatenation(tokenize("a*(b)c").unwrap());
        let shown: String = tokens
            .iter()
            .map(|(_, t)| match t {
                Token::Literal(c) => *c,
                Token::Operator(op) => op.symbol(),
                Token::LeftParen => '(',
                Token::RightParen => ')',
            })
            .collect();
        assert_eq!("a*.(b).c", shown);

        let tokens = insert_concatenation(tokenize("a|b").unwrap());
        assert_eq!(3, tokens.len());
    }

    #[test]
    fn test_precedence() {
        assert_eq!("a", postfix("a"));
        assert_eq!("ab.", postfix("ab"));
        assert_eq!("ab|", postfix("a|b"));
        assert_eq!("a*", postfix("a*"));
        assert_eq!("ab*.", postfix("ab*"));
        assert_eq!("ab.c|", postfix("ab|c"));
        assert_eq!("abc.|", postfix("a|bc"));
        assert_eq!("ab|*a.b.b.", postfix("(a|b)*abb"));
        assert_eq!("ab.*", postfix("(ab)*"));
        assert_eq!("a**", postfix("a**"));
    }

    #[test]
    fn test_left_associative() {
        assert_eq!("ab|c|", postfix("a|b|c"));
        assert_eq!("ab.c.", postfix("abc"));
    }

    #[test]
    fn test_errors() {
        assert!(matches!(
            to_postfix(""),
            Err(ParseError::EmptyExpression { .. })
        ));
        assert!(matches!(
            to_postfix("()"),
            Err(ParseError::EmptyExpression { .. })
        ));
        assert!(matches!(
            to_postfix("a|"),
            Err(ParseError::UnbalancedOperators { .. })
        ));
        assert!(matches!(
            to_postfix("*a"),
            Err(ParseError::UnbalancedOperators { .. })
        ));
        assert!(matches!(
            to_postfix("(ab"),
            Err(ParseError::UnbalancedParentheses { .. })
        ));
        assert!(matches!(
            to_postfix("ab)"),
            Err(ParseError::UnbalancedParentheses { .. })
        ));
        assert!(matches!(
            to_postfix("a.b"),
            Err(ParseError::UnexpectedToken { token: '.', .. })
        ));
    }

    #[test]
    fn test_error_span() {
        let err = to_postfix("ab)c").unwrap_err();
        assert_eq!(2, err.span().start());
        assert_eq!(3, err.span().end());
        assert_eq!(")", err.span().text());

        let err = to_postfix("aé").unwrap_err();
        assert_eq!(1, err.span().start());
        assert_eq!(3, err.span().end());
        assert_eq!("é", err.span().text());

        let err = to_postfix("a|").unwrap_err();
        assert_eq!(1, err.span().start());
    }
}
