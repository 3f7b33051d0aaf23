use crate::{
    error::EvalError,
    group::{Element, MathGroup},
    parser::ParsedExpression,
    token::TokenKind,
};

/// Evaluates a postfix expression once, substituting `variable` for every
/// variable token.
pub fn evaluate_once<T: Element>(
    expression: &ParsedExpression,
    variable: T,
    group: &MathGroup<T>,
) -> Result<T, EvalError> {
    let mut values: Vec<T> = Vec::with_capacity(expression.len());

    for token in expression.tokens() {
        let value = match group.classify(token) {
            TokenKind::Literal => match group.parse_value(token) {
                Some(value) => value,
                None => return Err(EvalError::UnknownToken(token.clone())),
            },
            TokenKind::Variable => variable.clone(),
            TokenKind::Operator(symbol) => {
                // Right-hand side was pushed last
                let rhs = pop(&mut values)?;
                let lhs = pop(&mut values)?;
                group.apply_operator(symbol, lhs, rhs)?
            }
            TokenKind::Function(symbol) => {
                let value = pop(&mut values)?;
                group.apply_function(symbol, value)?
            }
            TokenKind::LeftParen | TokenKind::RightParen => {
                return Err(EvalError::UnknownToken(token.clone()))
            }
        };
        values.push(value);
    }

    match values.len() {
        1 => Ok(values.remove(0)),
        n => Err(EvalError::MalformedExpression(n)),
    }
}

fn pop<T>(values: &mut Vec<T>) -> Result<T, EvalError> {
    values.pop().ok_or(EvalError::MalformedExpression(0))
}
