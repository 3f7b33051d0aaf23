use std::sync::OnceLock;

use num_complex::Complex64;

use crate::{
    error::NumericError,
    group::{Element, MathGroup},
};

/// Accepts `a_b` for `a + bi`, plain reals, `i` and `<real>i`.
impl Element for Complex64 {
    fn parse_literal(literal: &str) -> Option<Self> {
        if let Some((re, im)) = literal.split_once('_') {
            return Some(Complex64::new(re.parse().ok()?, im.parse().ok()?));
        }

        if let Ok(re) = literal.parse() {
            return Some(Complex64::new(re, 0.0));
        }

        match literal.strip_suffix('i')? {
            "" => Some(Complex64::i()),
            im => Some(Complex64::new(0.0, im.parse().ok()?)),
        }
    }
}

fn is_zero(z: Complex64) -> bool {
    z.re == 0.0 && z.im == 0.0
}

fn divide(lhs: Complex64, rhs: Complex64) -> Result<Complex64, NumericError> {
    if is_zero(rhs) {
        return Err(NumericError::DivisionByZero);
    }
    Ok(lhs / rhs)
}

fn log(z: Complex64) -> Result<Complex64, NumericError> {
    if is_zero(z) {
        return Err(NumericError::Undefined {
            function: "log",
            argument: z.to_string(),
        });
    }
    Ok(z.ln())
}

// z ^ w = exp(w * log z)
fn power(z: Complex64, w: Complex64) -> Result<Complex64, NumericError> {
    if is_zero(z) {
        if w.re > 0.0 {
            return Ok(Complex64::new(0.0, 0.0));
        }
        return Err(NumericError::Undefined {
            function: "^",
            argument: format!("{z} and {w}"),
        });
    }
    Ok((w * z.ln()).exp())
}

fn tan(z: Complex64) -> Result<Complex64, NumericError> {
    let cos = z.cos();
    if is_zero(cos) {
        return Err(NumericError::Undefined {
            function: "tan",
            argument: z.to_string(),
        });
    }
    Ok(z.sin() / cos)
}

/// Complex numbers as a pair of `f64`.
pub fn complex() -> &'static MathGroup<Complex64> {
    static COMPLEX: OnceLock<MathGroup<Complex64>> = OnceLock::new();
    COMPLEX.get_or_init(|| {
        MathGroup::<Complex64>::builder("complex")
            .operator("+", 1, |a, b| Ok(a + b))
            .operator("-", 1, |a, b| Ok(a - b))
            .operator("*", 2, |a, b| Ok(a * b))
            .operator("/", 2, divide)
            .operator("^", 3, power)
            .function("sin", |z| Ok(z.sin()))
            .function("cos", |z| Ok(z.cos()))
            .function("tan", tan)
            .function("log", log)
            .function("exp", |z| Ok(z.exp()))
            .build()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{evaluator::evaluate_once, parser::parse, token::TokenKind};

    fn close_enough(a: Complex64, b: Complex64) -> bool {
        (a - b).norm() < 1e-10
    }

    #[test]
    fn test_literals() {
        for (input, expected) in [
            ("2_3", Some(Complex64::new(2.0, 3.0))),
            ("-1.5_0.5", Some(Complex64::new(-1.5, 0.5))),
            ("4", Some(Complex64::new(4.0, 0.0))),
            ("i", Some(Complex64::new(0.0, 1.0))),
            ("3i", Some(Complex64::new(0.0, 3.0))),
            ("-2.5i", Some(Complex64::new(0.0, -2.5))),
            ("1_2_3", None),
            ("2_", None),
            ("_3", None),
            ("x", None),
            ("xi", None),
        ] {
            assert_eq!(
                Complex64::parse_literal(input),
                expected,
                "when parsing '{input}'"
            );
        }
    }

    #[test]
    fn test_classify() {
        let group = complex();
        assert_eq!(group.classify("i"), TokenKind::Literal);
        assert_eq!(group.classify("2_3"), TokenKind::Literal);
        assert_eq!(group.classify("z"), TokenKind::Variable);
    }

    #[test]
    fn test_expressions() {
        let x = Complex64::new(5.0, 4.0);
        for (input, expected) in [
            ("x + 2_3", Complex64::new(7.0, 7.0)),
            ("x - 2_3", Complex64::new(3.0, 1.0)),
            ("x * 2_3", Complex64::new(-2.0, 23.0)),
            ("x / 2_3", Complex64::new(22.0 / 13.0, -7.0 / 13.0)),
            ("3 * 2_3", Complex64::new(6.0, 9.0)),
            ("3i * 2_3", Complex64::new(-9.0, 6.0)),
            ("i ^ 2", Complex64::new(-1.0, 0.0)),
            ("exp log x", x),
            ("tan x - sin x / cos x", Complex64::new(0.0, 0.0)),
        ] {
            let expression = parse(input, "x", complex()).unwrap();
            let value = evaluate_once(&expression, x, complex()).unwrap();
            assert!(
                close_enough(value, expected),
                "'{input}': expected {expected}, got {value}"
            );
        }
    }

    #[test]
    fn test_failures() {
        let zero = Complex64::new(0.0, 0.0);
        assert_eq!(divide(Complex64::i(), zero), Err(NumericError::DivisionByZero));
        assert!(log(zero).is_err());
        assert!(power(zero, Complex64::new(-1.0, 0.0)).is_err());
        assert_eq!(power(zero, Complex64::new(2.0, 0.0)), Ok(zero));
    }
}
