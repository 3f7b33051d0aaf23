//! The numeric systems that ship with the crate. Both register the same
//! operators (`+ - * / ^`) and functions (`sin cos tan log exp`).

pub mod complex;
pub mod real;
