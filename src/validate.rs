use miette::SourceSpan;

use crate::{
    error::ParseError,
    group::{Element, MathGroup},
    token::{Token, TokenKind},
};

/// Checks that every pair of neighbouring tokens may legally appear next to
/// each other. Parenthesis balance is left to [`crate::parser::to_postfix`].
///
/// An endable token (literal, variable or `)`) must be followed by an
/// operator or `)`, anything else must not be. The sequence must start with
/// something that is not an operator or `)`, and end with an endable token.
pub fn check_locally_valid<T: Element>(
    tokens: &[Token<'_>],
    group: &MathGroup<T>,
) -> Result<(), ParseError> {
    let Some(first) = tokens.first() else {
        return Ok(());
    };

    let mut previous = group.classify(first.text);
    if matches!(previous, TokenKind::Operator(_) | TokenKind::RightParen) {
        return Err(invalid_after(tokens, 0));
    }

    for (i, token) in tokens.iter().enumerate().skip(1) {
        let kind = group.classify(token.text);
        let follows_endable = matches!(kind, TokenKind::Operator(_) | TokenKind::RightParen);
        if previous.is_endable() != follows_endable {
            return Err(invalid_after(tokens, i));
        }
        previous = kind;
    }

    if !previous.is_endable() {
        return Err(invalid_after(tokens, tokens.len() - 1));
    }

    Ok(())
}

/// Error pointing just past the first `consistent` tokens.
fn invalid_after(tokens: &[Token<'_>], consistent: usize) -> ParseError {
    let (offset, end) = match consistent {
        0 => tokens.first().map_or((0, 0), |t| (t.column, t.span.start)),
        n => {
            let last = &tokens[n - 1];
            (last.column + last.text.chars().count(), last.span.end)
        }
    };
    let span: SourceSpan = match tokens.get(consistent) {
        Some(token) => token.span.into(),
        None => (end, 0).into(),
    };

    ParseError::LocallyInvalidExpression { offset, span }
}
