use crate::{
    error::{DomainError, EvalError, MapError},
    evaluator::evaluate_once,
    group::{Element, MathGroup},
    interval::{points, Interval},
    parser::{parse, ParsedExpression},
};

/// Lazily evaluates `expression` at every point of `interval`, yielding each
/// point along with its result. Single pass; it does not stop on failures.
pub fn samples<'a, T, I>(
    expression: &'a ParsedExpression,
    interval: &'a I,
    group: &'a MathGroup<T>,
) -> impl Iterator<Item = (T, Result<T, EvalError>)> + 'a
where
    T: Element,
    I: Interval<Value = T>,
{
    points(interval).map(move |point| {
        log::trace!("evaluating '{expression}' at {point}");
        let result = evaluate_once(expression, point.clone(), group);
        (point, result)
    })
}

/// Evaluates `expression` at every point of `interval`, in order. Stops at the
/// first failure, which keeps the values computed so far.
pub fn evaluate_over_domain<T, I>(
    expression: &ParsedExpression,
    interval: &I,
    group: &MathGroup<T>,
) -> Result<Vec<T>, DomainError<T>>
where
    T: Element,
    I: Interval<Value = T>,
{
    let mut values = Vec::new();
    for (point, result) in samples(expression, interval, group) {
        match result {
            Ok(value) => values.push(value),
            Err(source) => {
                log::warn!(
                    "evaluation of '{expression}' failed at {point} after {} values: {source}",
                    values.len()
                );
                return Err(DomainError {
                    point,
                    partial: values,
                    source,
                });
            }
        }
    }

    log::debug!("evaluated '{expression}' at {} points", values.len());
    Ok(values)
}

/// Parses `expression` in terms of `variable` and evaluates it over `interval`.
pub fn map_values<T, I>(
    expression: &str,
    interval: &I,
    variable: &str,
    group: &MathGroup<T>,
) -> Result<Vec<T>, MapError<T>>
where
    T: Element,
    I: Interval<Value = T>,
{
    let parsed = parse(expression, variable, group).map_err(|error| MapError::Parse {
        error,
        expression: expression.to_string(),
    })?;
    Ok(evaluate_over_domain(&parsed, interval, group)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use miette::Diagnostic;

    use crate::{
        error::{NumericError, ParseError},
        groups::real::real,
        interval::RealInterval,
    };

    #[test]
    fn test_evaluate_over_domain() {
        let expression = parse("x * x", "x", real()).unwrap();
        let interval = RealInterval::new(0.0, 1.0, 4.0).unwrap();
        assert_eq!(
            evaluate_over_domain(&expression, &interval, real()).unwrap(),
            vec![0.0, 1.0, 4.0, 9.0, 16.0]
        );
    }

    #[test]
    fn test_partial_results() {
        let expression = parse("1 / x", "x", real()).unwrap();
        let interval = RealInterval::new(-2.0, 1.0, 2.0).unwrap();
        let error = evaluate_over_domain(&expression, &interval, real()).unwrap_err();

        assert_eq!(error.point, 0.0);
        assert_eq!(error.partial, vec![-0.5, -1.0]);
        assert_eq!(error.source, EvalError::Numeric(NumericError::DivisionByZero));
    }

    #[test]
    fn test_samples_keep_going() {
        let expression = parse("log x", "x", real()).unwrap();
        let interval = RealInterval::new(-1.0, 1.0, 1.0).unwrap();
        let results: Vec<_> = samples(&expression, &interval, real()).collect();

        assert_eq!(results.len(), 3);
        assert!(results[0].1.is_err());
        assert!(results[1].1.is_err());
        assert_eq!(results[2], (1.0, Ok(0.0)));
    }

    #[test]
    fn test_map_values() {
        let interval = RealInterval::point(43.2).unwrap();
        let values = map_values("x - 4", &interval, "x", real()).unwrap();
        assert_eq!(values.len(), 1);
        assert!((values[0] - 39.2).abs() < 1e-10);

        assert!(matches!(
            map_values("x -", &interval, "x", real()),
            Err(MapError::Parse { .. })
        ));
        assert!(matches!(
            map_values("x / 0", &interval, "x", real()),
            Err(MapError::Domain(_))
        ));
    }

    #[test]
    fn test_parse_failure_diagnostic() {
        let interval = RealInterval::point(1.0).unwrap();
        let error = map_values("x + * 2", &interval, "x", real()).unwrap_err();

        match &error {
            MapError::Parse { error, expression } => {
                assert_eq!(expression, "x + * 2");
                assert!(matches!(
                    error,
                    ParseError::LocallyInvalidExpression { offset: 3, .. }
                ));
            }
            other => panic!("expected a parse failure, got {other:?}"),
        }
        assert_eq!(
            error.code().map(|code| code.to_string()).as_deref(),
            Some("locally_invalid_expression")
        );
        assert!(error.source_code().is_some());

        let labels: Vec<_> = error.labels().into_iter().flatten().collect();
        assert_eq!(labels.len(), 1);
        assert_eq!((labels[0].offset(), labels[0].len()), (4, 1));
    }
}
