use std::fmt::Debug;

use miette::{Diagnostic, LabeledSpan, SourceCode, SourceSpan};
use thiserror::Error;

#[derive(Debug, Diagnostic, Error, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("'{token}' is not a valid token")]
    #[diagnostic(
        code = "invalid_token",
        help("tokens are literals, operators, functions, parentheses or a variable name")
    )]
    InvalidToken {
        token: String,
        #[label("not recognized")]
        span: SourceSpan,
    },

    #[error("expression is not valid")]
    #[diagnostic(code = "locally_invalid_expression")]
    LocallyInvalidExpression {
        /// Character offset just past the last token that still formed a
        /// valid prefix. `span` is in bytes, like every other span.
        offset: usize,
        #[label("expression stops being valid here")]
        span: SourceSpan,
    },

    #[error("token '{name}' is not recognized, the variable is '{expected}'")]
    #[diagnostic(code = "unknown_variable")]
    UnknownVariable {
        name: String,
        expected: String,
        #[label("unknown variable")]
        span: SourceSpan,
    },

    #[error("expression has unmatched parentheses")]
    #[diagnostic(code = "unbalanced_parentheses")]
    UnbalancedParentheses {
        #[label("unmatched parenthesis")]
        span: SourceSpan,
    },

    #[error("'{0}' cannot be used as a variable name")]
    #[diagnostic(
        code = "invalid_variable_name",
        help("the name is already a literal, operator or function of this group")
    )]
    InvalidVariableName(String),
}

#[derive(Debug, Diagnostic, Error, Clone, PartialEq, Eq)]
pub enum NumericError {
    #[error("division by zero")]
    #[diagnostic(code = "division_by_zero")]
    DivisionByZero,

    #[error("{function} is undefined for {argument}")]
    #[diagnostic(code = "undefined")]
    Undefined {
        function: &'static str,
        argument: String,
    },
}

#[derive(Debug, Diagnostic, Error, Clone, PartialEq, Eq)]
pub enum EvalError {
    #[error("token '{0}' cannot be evaluated")]
    #[diagnostic(code = "unknown_token")]
    UnknownToken(String),

    #[error("expression is malformed, it left {0} values on the stack")]
    #[diagnostic(code = "malformed_expression")]
    MalformedExpression(usize),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Numeric(#[from] NumericError),
}

/// The first failed evaluation of a sampler run, along with everything that
/// was computed before it.
#[derive(Debug, Error)]
#[error("evaluation failed at {point}")]
pub struct DomainError<T: Debug + std::fmt::Display> {
    pub point: T,
    pub partial: Vec<T>,
    #[source]
    pub source: EvalError,
}

impl<T> Diagnostic for DomainError<T>
where
    T: Debug + std::fmt::Display + Send + Sync + 'static,
{
    fn diagnostic_source(&self) -> Option<&dyn Diagnostic> {
        Some(&self.source)
    }
}

#[derive(Debug, Diagnostic, Error, Clone, PartialEq, Eq)]
pub enum IntervalError {
    #[error("interval step must not be zero")]
    #[diagnostic(code = "zero_step")]
    ZeroStep,

    #[error("interval bounds and step must be finite")]
    #[diagnostic(code = "non_finite")]
    NonFinite,

    #[error("interval step never reaches the end")]
    #[diagnostic(code = "direction_mismatch")]
    DirectionMismatch,

    #[error("interval step is too small to advance past its bounds")]
    #[diagnostic(
        code = "step_too_small",
        help("floating point values this large cannot change by so little")
    )]
    StepTooSmall,
}

/// Anything that can go wrong between an expression string and its values.
///
/// A parse failure keeps the expression it came from, so its labels render
/// against the source without the caller attaching it.
#[derive(Debug, Error)]
pub enum MapError<T: Debug + std::fmt::Display> {
    #[error("{error}")]
    Parse { error: ParseError, expression: String },

    #[error(transparent)]
    Domain(#[from] DomainError<T>),
}

impl<T> Diagnostic for MapError<T>
where
    T: Debug + std::fmt::Display + Send + Sync + 'static,
{
    fn code<'a>(&'a self) -> Option<Box<dyn std::fmt::Display + 'a>> {
        match self {
            MapError::Parse { error, .. } => error.code(),
            MapError::Domain(e) => e.code(),
        }
    }

    fn help<'a>(&'a self) -> Option<Box<dyn std::fmt::Display + 'a>> {
        match self {
            MapError::Parse { error, .. } => error.help(),
            MapError::Domain(e) => e.help(),
        }
    }

    fn source_code(&self) -> Option<&dyn SourceCode> {
        match self {
            MapError::Parse { expression, .. } => Some(expression as &dyn SourceCode),
            MapError::Domain(e) => e.source_code(),
        }
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        match self {
            MapError::Parse { error, .. } => error.labels(),
            MapError::Domain(e) => e.labels(),
        }
    }

    fn diagnostic_source(&self) -> Option<&dyn Diagnostic> {
        match self {
            MapError::Parse { .. } => None,
            MapError::Domain(e) => Some(e),
        }
    }
}
