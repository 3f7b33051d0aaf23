use std::{collections::HashMap, fmt};

use crate::{error::NumericError, token::TokenKind};

/// A value of a numeric system. Each system decides its own literal grammar.
pub trait Element: Clone + fmt::Debug + fmt::Display + Send + Sync + 'static {
    fn parse_literal(literal: &str) -> Option<Self>;
}

/// Identifies a registered operator or function within one [`MathGroup`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Symbol(u16);

pub type UnaryFn<T> = fn(T) -> Result<T, NumericError>;
pub type BinaryFn<T> = fn(T, T) -> Result<T, NumericError>;

pub enum Keyword<T> {
    Operator {
        symbol: &'static str,
        precedence: u8,
        apply: BinaryFn<T>,
    },
    Function {
        symbol: &'static str,
        apply: UnaryFn<T>,
    },
}

impl<T> Keyword<T> {
    pub fn symbol(&self) -> &'static str {
        match self {
            Keyword::Operator { symbol, .. } | Keyword::Function { symbol, .. } => symbol,
        }
    }
}

impl<T> fmt::Debug for Keyword<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Keyword::Operator {
                symbol, precedence, ..
            } => f
                .debug_struct("Operator")
                .field("symbol", symbol)
                .field("precedence", precedence)
                .finish(),
            Keyword::Function { symbol, .. } => {
                f.debug_struct("Function").field("symbol", symbol).finish()
            }
        }
    }
}

/// A numeric system: its operators and functions, their precedence, and the
/// literal grammar of its values. Immutable once built.
#[derive(Debug)]
pub struct MathGroup<T> {
    name: &'static str,
    keywords: Vec<Keyword<T>>,
    lookup: HashMap<&'static str, Symbol>,
}

impl<T: Element> MathGroup<T> {
    pub fn builder(name: &'static str) -> MathGroupBuilder<T> {
        MathGroupBuilder {
            name,
            keywords: Vec::new(),
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn keywords(&self) -> impl Iterator<Item = (Symbol, &Keyword<T>)> {
        self.keywords
            .iter()
            .enumerate()
            .map(|(i, keyword)| (Symbol(i as u16), keyword))
    }

    /// Parentheses first, then registered symbols, then literals. Anything
    /// else is a variable.
    pub fn classify(&self, token: &str) -> TokenKind {
        match token {
            "(" => return TokenKind::LeftParen,
            ")" => return TokenKind::RightParen,
            _ => {}
        }

        if let Some(&symbol) = self.lookup.get(token) {
            return match self.keyword(symbol) {
                Keyword::Operator { .. } => TokenKind::Operator(symbol),
                Keyword::Function { .. } => TokenKind::Function(symbol),
            };
        }

        if self.parse_value(token).is_some() {
            return TokenKind::Literal;
        }

        TokenKind::Variable
    }

    pub fn parse_value(&self, literal: &str) -> Option<T> {
        T::parse_literal(literal)
    }

    pub fn keyword(&self, symbol: Symbol) -> &Keyword<T> {
        &self.keywords[symbol.0 as usize]
    }

    pub fn symbol(&self, symbol: Symbol) -> &'static str {
        self.keyword(symbol).symbol()
    }

    /// `None` for functions, which bind tighter than any operator.
    pub fn precedence(&self, symbol: Symbol) -> Option<u8> {
        match self.keyword(symbol) {
            Keyword::Operator { precedence, .. } => Some(*precedence),
            Keyword::Function { .. } => None,
        }
    }

    pub fn apply_operator(&self, symbol: Symbol, lhs: T, rhs: T) -> Result<T, NumericError> {
        match self.keyword(symbol) {
            Keyword::Operator { apply, .. } => apply(lhs, rhs),
            keyword => panic!("{keyword:?} is not an operator of the {} group", self.name),
        }
    }

    pub fn apply_function(&self, symbol: Symbol, value: T) -> Result<T, NumericError> {
        match self.keyword(symbol) {
            Keyword::Function { apply, .. } => apply(value),
            keyword => panic!("{keyword:?} is not a function of the {} group", self.name),
        }
    }
}

pub struct MathGroupBuilder<T> {
    name: &'static str,
    keywords: Vec<Keyword<T>>,
}

impl<T: Element> MathGroupBuilder<T> {
    pub fn operator(mut self, symbol: &'static str, precedence: u8, apply: BinaryFn<T>) -> Self {
        self.keywords.push(Keyword::Operator {
            symbol,
            precedence,
            apply,
        });
        self
    }

    pub fn function(mut self, symbol: &'static str, apply: UnaryFn<T>) -> Self {
        self.keywords.push(Keyword::Function { symbol, apply });
        self
    }

    /// Panics on symbols the lexer could never produce as a single token, and
    /// on duplicates. Both are mistakes in the group definition itself.
    pub fn build(self) -> MathGroup<T> {
        assert!(
            self.keywords.len() <= u16::MAX as usize,
            "too many keywords in the {} group",
            self.name
        );

        let mut lookup = HashMap::with_capacity(self.keywords.len());
        for (i, keyword) in self.keywords.iter().enumerate() {
            let symbol = keyword.symbol();
            assert!(
                !symbol.is_empty()
                    && !symbol
                        .chars()
                        .any(|c| c.is_whitespace() || c == '(' || c == ')'),
                "invalid symbol {symbol:?} in the {} group",
                self.name
            );
            let previous = lookup.insert(symbol, Symbol(i as u16));
            assert!(
                previous.is_none(),
                "symbol {symbol:?} registered twice in the {} group",
                self.name
            );
        }

        MathGroup {
            name: self.name,
            keywords: self.keywords,
            lookup,
        }
    }
}
