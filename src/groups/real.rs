use std::sync::OnceLock;

use crate::{
    error::NumericError,
    group::{Element, MathGroup},
};

impl Element for f64 {
    fn parse_literal(literal: &str) -> Option<Self> {
        literal.parse().ok()
    }
}

fn divide(lhs: f64, rhs: f64) -> Result<f64, NumericError> {
    if rhs == 0.0 {
        return Err(NumericError::DivisionByZero);
    }
    Ok(lhs / rhs)
}

fn power(lhs: f64, rhs: f64) -> Result<f64, NumericError> {
    let result = lhs.powf(rhs);
    if result.is_nan() && !lhs.is_nan() && !rhs.is_nan() {
        return Err(NumericError::Undefined {
            function: "^",
            argument: format!("{lhs} and {rhs}"),
        });
    }
    Ok(result)
}

fn log(value: f64) -> Result<f64, NumericError> {
    if value <= 0.0 {
        return Err(NumericError::Undefined {
            function: "log",
            argument: value.to_string(),
        });
    }
    Ok(value.ln())
}

/// Real numbers as `f64`.
pub fn real() -> &'static MathGroup<f64> {
    static REAL: OnceLock<MathGroup<f64>> = OnceLock::new();
    REAL.get_or_init(|| {
        MathGroup::<f64>::builder("real")
            .operator("+", 1, |a, b| Ok(a + b))
            .operator("-", 1, |a, b| Ok(a - b))
            .operator("*", 2, |a, b| Ok(a * b))
            .operator("/", 2, divide)
            .operator("^", 3, power)
            .function("sin", |a| Ok(a.sin()))
            .function("cos", |a| Ok(a.cos()))
            .function("tan", |a| Ok(a.tan()))
            .function("log", log)
            .function("exp", |a| Ok(a.exp()))
            .build()
    })
}
