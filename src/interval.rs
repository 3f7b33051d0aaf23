use num_complex::Complex64;

use crate::error::IntervalError;

/// A finite sequence of values to evaluate an expression at.
///
/// `step` must be pure and must eventually return `None` when applied
/// repeatedly from `start`.
pub trait Interval {
    type Value;

    fn start(&self) -> Self::Value;

    /// The value after `current`, or `None` once the interval is exhausted.
    fn step(&self, current: &Self::Value) -> Option<Self::Value>;
}

/// Every value of the interval, in order.
pub fn points<I: Interval>(interval: &I) -> impl Iterator<Item = I::Value> + '_ {
    std::iter::successors(Some(interval.start()), move |current| interval.step(current))
}

/// Whether adding `step` to `value` changes it. Float spacing only grows with
/// magnitude, so checking both bounds covers everything between them.
fn advances(value: f64, step: f64) -> bool {
    value + step != value
}

/// The value after `current` on the axis `start, start + step, ...`, or `None`
/// once it would pass `end`.
///
/// Values are rebuilt from their index as `start + k * step` so rounding does
/// not accumulate. A value within a tiny fraction of a step past `end` is
/// snapped to `end`, which keeps endpoints like `0.3` in `0..0.3 by 0.1`.
fn next_on_axis(start: f64, step: f64, end: f64, current: f64) -> Option<f64> {
    let k = ((current - start) / step).round() + 1.0;
    let mut next = start + k * step;
    // Never go backwards or stall, whatever the rounding of `k`.
    if (next - current) * step <= 0.0 {
        next = current + step;
    }

    let overshoot = (next - end) * step.signum();
    if overshoot <= 0.0 {
        Some(next)
    } else if overshoot <= step.abs() * 1e-9 && (end - current) * step > 0.0 {
        Some(end)
    } else {
        None
    }
}

/// `start, start + step, ...` up to and including `end`. The step may be
/// negative for descending intervals.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RealInterval {
    start: f64,
    step: f64,
    end: f64,
}

impl RealInterval {
    pub fn new(start: f64, step: f64, end: f64) -> Result<Self, IntervalError> {
        if !start.is_finite() || !step.is_finite() || !end.is_finite() {
            return Err(IntervalError::NonFinite);
        }
        if step == 0.0 {
            return Err(IntervalError::ZeroStep);
        }
        if (end - start) * step < 0.0 {
            return Err(IntervalError::DirectionMismatch);
        }
        if !advances(start, step) || !advances(end, step) {
            return Err(IntervalError::StepTooSmall);
        }

        Ok(Self { start, step, end })
    }

    /// The interval holding only `value`.
    pub fn point(value: f64) -> Result<Self, IntervalError> {
        // A step the size of the value always advances it.
        Self::new(value, value.abs().max(1.0), value)
    }

    pub fn end(&self) -> f64 {
        self.end
    }
}

impl Interval for RealInterval {
    type Value = f64;

    fn start(&self) -> f64 {
        self.start
    }

    fn step(&self, current: &f64) -> Option<f64> {
        next_on_axis(self.start, self.step, self.end, *current)
    }
}

/// The rectangle between two corners, scanned row by row: the real part
/// advances first, then the imaginary part.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ComplexInterval {
    start: Complex64,
    step: f64,
    end: Complex64,
}

impl ComplexInterval {
    pub fn new(start: Complex64, step: f64, end: Complex64) -> Result<Self, IntervalError> {
        if !start.is_finite() || !step.is_finite() || !end.is_finite() {
            return Err(IntervalError::NonFinite);
        }
        if step == 0.0 {
            return Err(IntervalError::ZeroStep);
        }
        if step < 0.0 || start.re > end.re || start.im > end.im {
            return Err(IntervalError::DirectionMismatch);
        }
        let corners = [start.re, start.im, end.re, end.im];
        if !corners.iter().all(|&bound| advances(bound, step)) {
            return Err(IntervalError::StepTooSmall);
        }

        Ok(Self { start, step, end })
    }

    pub fn point(value: Complex64) -> Result<Self, IntervalError> {
        Self::new(value, value.re.abs().max(value.im.abs()).max(1.0), value)
    }

    pub fn end(&self) -> Complex64 {
        self.end
    }
}

impl Interval for ComplexInterval {
    type Value = Complex64;

    fn start(&self) -> Complex64 {
        self.start
    }

    fn step(&self, current: &Complex64) -> Option<Complex64> {
        if let Some(re) = next_on_axis(self.start.re, self.step, self.end.re, current.re) {
            return Some(Complex64::new(re, current.im));
        }

        next_on_axis(self.start.im, self.step, self.end.im, current.im)
            .map(|im| Complex64::new(self.start.re, im))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_real_interval() {
        for ((start, step, end), expected) in [
            ((0.0, 0.25, 1.0), vec![0.0, 0.25, 0.5, 0.75, 1.0]),
            ((0.0, 0.4, 1.0), vec![0.0, 0.4, 0.8]),
            ((1.0, -0.5, 0.0), vec![1.0, 0.5, 0.0]),
            ((3.0, 2.0, 3.0), vec![3.0]),
            ((3.0, -2.0, 3.0), vec![3.0]),
            ((0.0, 0.1, 0.3), vec![0.0, 0.1, 0.2, 0.3]),
            ((1e17, 16.0, 1e17), vec![1e17]),
            ((1e16, 4.0, 1e16 + 12.0), vec![1e16, 1e16 + 4.0, 1e16 + 8.0, 1e16 + 12.0]),
        ] {
            let interval = RealInterval::new(start, step, end).unwrap();
            let values: Vec<_> = points(&interval).collect();
            assert_eq!(values, expected, "for {start}..{end} by {step}");
        }
    }

    #[test]
    fn test_real_point() {
        for value in [0.0, -2.5, 1e17, -3e300] {
            let interval = RealInterval::point(value).unwrap();
            assert_eq!(points(&interval).collect::<Vec<_>>(), [value], "for {value}");
        }
    }

    #[test]
    fn test_real_interval_errors() {
        for ((start, step, end), expected) in [
            ((0.0, 0.0, 1.0), IntervalError::ZeroStep),
            ((0.0, -1.0, 1.0), IntervalError::DirectionMismatch),
            ((1.0, 1.0, 0.0), IntervalError::DirectionMismatch),
            ((f64::NAN, 1.0, 0.0), IntervalError::NonFinite),
            ((0.0, 1.0, f64::INFINITY), IntervalError::NonFinite),
            ((1e16, 1.0, 1e17), IntervalError::StepTooSmall),
            ((0.0, 1.0, 1e17), IntervalError::StepTooSmall),
            ((1e17, -1.0, 0.0), IntervalError::StepTooSmall),
            ((1.0, 1e-20, 2.0), IntervalError::StepTooSmall),
        ] {
            assert_eq!(
                RealInterval::new(start, step, end),
                Err(expected),
                "for {start}..{end} by {step}"
            );
        }
    }

    #[test]
    fn test_complex_interval() {
        let interval =
            ComplexInterval::new(Complex64::new(0.0, 0.0), 1.0, Complex64::new(2.0, 1.0)).unwrap();
        let values: Vec<_> = points(&interval).collect();
        assert_eq!(
            values,
            vec![
                Complex64::new(0.0, 0.0),
                Complex64::new(1.0, 0.0),
                Complex64::new(2.0, 0.0),
                Complex64::new(0.0, 1.0),
                Complex64::new(1.0, 1.0),
                Complex64::new(2.0, 1.0),
            ]
        );

        let point = ComplexInterval::point(Complex64::new(5.0, 4.0)).unwrap();
        assert_eq!(points(&point).count(), 1);

        let point = ComplexInterval::point(Complex64::new(-3e20, 1e18)).unwrap();
        assert_eq!(points(&point).collect::<Vec<_>>(), [Complex64::new(-3e20, 1e18)]);
    }

    #[test]
    fn test_complex_interval_errors() {
        let zero = Complex64::new(0.0, 0.0);
        let one = Complex64::new(1.0, 1.0);
        assert_eq!(
            ComplexInterval::new(zero, 0.0, one),
            Err(IntervalError::ZeroStep)
        );
        assert_eq!(
            ComplexInterval::new(zero, -1.0, one),
            Err(IntervalError::DirectionMismatch)
        );
        assert_eq!(
            ComplexInterval::new(one, 1.0, zero),
            Err(IntervalError::DirectionMismatch)
        );
        assert_eq!(
            ComplexInterval::new(zero, f64::NAN, one),
            Err(IntervalError::NonFinite)
        );
        assert_eq!(
            ComplexInterval::new(Complex64::new(1e16, 0.0), 1.0, Complex64::new(1e17, 0.0)),
            Err(IntervalError::StepTooSmall)
        );
        assert_eq!(
            ComplexInterval::new(zero, 1.0, Complex64::new(1.0, 1e17)),
            Err(IntervalError::StepTooSmall)
        );
    }

    #[test]
    fn test_complex_interval_fractional_step() {
        let interval =
            ComplexInterval::new(Complex64::new(0.0, 0.0), 0.1, Complex64::new(0.3, 0.2)).unwrap();
        let values: Vec<_> = points(&interval).collect();
        assert_eq!(values.len(), 12);
        assert_eq!(values[3], Complex64::new(0.3, 0.0));
        assert_eq!(values[11], Complex64::new(0.3, 0.2));
    }
}
