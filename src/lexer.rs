use miette::NamedSource;

use crate::token::{Span, Token};

/// Splits an expression into whitespace separated tokens. Parentheses are
/// always tokens of their own, everything else is a maximal run of
/// non-whitespace, non-parenthesis characters.
pub struct Lexer<'source> {
    source: &'source str,
    rest: &'source str,
    pub position: usize,
    pub column: usize,
}

impl<'source> Lexer<'source> {
    pub fn new(source: &'source str) -> Self {
        Self {
            source,
            rest: source,
            position: 0,
            column: 0,
        }
    }

    pub fn get_source_code(&self) -> NamedSource<String> {
        NamedSource::new("expression", self.source.to_string())
    }

    fn advance(&mut self, width: usize) {
        self.position += width;
        self.column += self.rest[..width].chars().count();
        self.rest = &self.rest[width..];
    }
}

fn is_paren(c: char) -> bool {
    matches!(c, '(' | ')')
}

impl<'source> Iterator for Lexer<'source> {
    type Item = Token<'source>;

    fn next(&mut self) -> Option<Self::Item> {
        let skipped = self
            .rest
            .find(|c: char| !c.is_whitespace())
            .unwrap_or(self.rest.len());
        self.advance(skipped);

        let c = self.rest.chars().next()?;
        let start = self.position;
        let column = self.column;

        let width = if is_paren(c) {
            c.len_utf8()
        } else {
            self.rest
                .find(|c: char| c.is_whitespace() || is_paren(c))
                .unwrap_or(self.rest.len())
        };

        let text = &self.source[start..start + width];
        self.advance(width);

        Some(Token {
            text,
            span: Span {
                start,
                end: self.position,
            },
            column,
        })
    }
}

pub fn tokenize(expression: &str) -> Vec<Token<'_>> {
    Lexer::new(expression).collect()
}
