use std::fmt;

use crate::{
    error::ParseError,
    group::{Element, MathGroup, Symbol},
    lexer::tokenize,
    token::{Span, Token, TokenKind},
    validate::check_locally_valid,
};

/// An expression in postfix order, ready to be evaluated any number of times.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ParsedExpression {
    tokens: Vec<String>,
}

impl ParsedExpression {
    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

impl fmt::Display for ParsedExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.tokens.join(" "))
    }
}

impl FromIterator<String> for ParsedExpression {
    fn from_iter<I: IntoIterator<Item = String>>(iter: I) -> Self {
        Self {
            tokens: iter.into_iter().collect(),
        }
    }
}

impl From<Vec<&str>> for ParsedExpression {
    fn from(tokens: Vec<&str>) -> Self {
        tokens.into_iter().map(str::to_string).collect()
    }
}

enum StackEntry {
    Operator(Symbol),
    Function(Symbol),
    LeftParen(Span),
}

/// Parses `expression` in terms of the single free `variable`, returning its
/// postfix form.
pub fn parse<T: Element>(
    expression: &str,
    variable: &str,
    group: &MathGroup<T>,
) -> Result<ParsedExpression, ParseError> {
    if !is_identifier(variable) || group.classify(variable) != TokenKind::Variable {
        return Err(ParseError::InvalidVariableName(variable.to_string()));
    }

    let tokens = tokenize(expression);
    log::debug!(
        "tokens: {:?}",
        tokens.iter().map(|t| t.text).collect::<Vec<_>>()
    );

    check_variables(&tokens, variable, group)?;
    check_locally_valid(&tokens, group)?;
    let postfix = to_postfix(&tokens, group)?;

    log::debug!("postfix: {postfix}");
    Ok(postfix)
}

fn check_variables<T: Element>(
    tokens: &[Token<'_>],
    variable: &str,
    group: &MathGroup<T>,
) -> Result<(), ParseError> {
    for token in tokens {
        if group.classify(token.text) != TokenKind::Variable {
            continue;
        }

        if !is_identifier(token.text) {
            return Err(ParseError::InvalidToken {
                token: token.text.to_string(),
                span: token.span.into(),
            });
        }

        if token.text != variable {
            return Err(ParseError::UnknownVariable {
                name: token.text.to_string(),
                expected: variable.to_string(),
                span: token.span.into(),
            });
        }
    }

    Ok(())
}

fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_alphanumeric() || c == '_')
}

/// Shunting-yard conversion from infix to postfix order.
///
/// An incoming operator pops every stacked operator of greater or equal
/// precedence, so chains of equal precedence are left associative. Functions
/// outrank every operator and are popped by the next operator or closing
/// parenthesis.
pub fn to_postfix<T: Element>(
    tokens: &[Token<'_>],
    group: &MathGroup<T>,
) -> Result<ParsedExpression, ParseError> {
    let mut output = Vec::with_capacity(tokens.len());
    let mut stack: Vec<StackEntry> = Vec::new();

    let emit = |entry: StackEntry, output: &mut Vec<String>| match entry {
        StackEntry::Operator(symbol) | StackEntry::Function(symbol) => {
            output.push(group.symbol(symbol).to_string());
            Ok(())
        }
        StackEntry::LeftParen(span) => Err(ParseError::UnbalancedParentheses { span: span.into() }),
    };

    for token in tokens {
        match group.classify(token.text) {
            TokenKind::Literal | TokenKind::Variable => output.push(token.text.to_string()),
            TokenKind::Function(symbol) => stack.push(StackEntry::Function(symbol)),
            TokenKind::Operator(symbol) => {
                let precedence = group.precedence(symbol);
                while let Some(top) = stack.last() {
                    let pops = match top {
                        StackEntry::LeftParen(_) => false,
                        StackEntry::Function(_) => true,
                        StackEntry::Operator(other) => group.precedence(*other) >= precedence,
                    };
                    if !pops {
                        break;
                    }
                    if let Some(entry) = stack.pop() {
                        emit(entry, &mut output)?;
                    }
                }
                stack.push(StackEntry::Operator(symbol));
            }
            TokenKind::LeftParen => stack.push(StackEntry::LeftParen(token.span)),
            TokenKind::RightParen => loop {
                match stack.pop() {
                    Some(StackEntry::LeftParen(_)) => break,
                    Some(entry) => emit(entry, &mut output)?,
                    None => {
                        return Err(ParseError::UnbalancedParentheses {
                            span: token.span.into(),
                        })
                    }
                }
            },
        }
    }

    // Any '(' left over here was never closed
    while let Some(entry) = stack.pop() {
        emit(entry, &mut output)?;
    }

    Ok(ParsedExpression { tokens: output })
}
