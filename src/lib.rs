pub mod error;
pub mod evaluator;
pub mod group;
pub mod groups;
pub mod interval;
pub mod lexer;
pub mod parser;
pub mod sampler;
pub mod token;
pub mod validate;
