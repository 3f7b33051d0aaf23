use miette::SourceSpan;

use crate::group::Symbol;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

impl From<Span> for SourceSpan {
    fn from(span: Span) -> Self {
        (span.start, span.len()).into()
    }
}

/// A raw token as cut out of the expression source. Classification happens
/// later, against a specific [`crate::group::MathGroup`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'source> {
    pub text: &'source str,
    pub span: Span,
    /// Character (not byte) index of the first character of `text`.
    pub column: usize,
}

impl AsRef<str> for Token<'_> {
    fn as_ref(&self) -> &str {
        self.text
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    Literal,
    Variable,
    LeftParen,
    RightParen,
    // Binary
    Operator(Symbol),
    // Unary
    Function(Symbol),
}

impl TokenKind {
    /// Whether a token of this kind can be the last token of a complete
    /// (sub)expression.
    pub fn is_endable(&self) -> bool {
        matches!(
            self,
            TokenKind::Literal | TokenKind::Variable | TokenKind::RightParen
        )
    }
}
