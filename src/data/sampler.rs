//! Function Sampler Module
//! Evaluates an expression across an x range and derives the y range.

use crate::config::PlotConfig;
use crate::expr::{ExprError, Expression};
use thiserror::Error;

/// Bisection steps used to tell a pole from a root between two samples.
const POLE_BISECTION_STEPS: usize = 8;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum PlotError {
    #[error("Please enter a function")]
    EmptyExpression,
    #[error("The X range bounds must be finite numbers")]
    NonFiniteBound,
    #[error("The minimum X value ({min}) must be less than the maximum ({max})")]
    InvalidRange { min: f64, max: f64 },
    #[error("The X range is too large ({width}); please use a range no wider than {max}")]
    RangeTooWide { width: f64, max: f64 },
    #[error("Invalid function: {0}")]
    Parse(#[from] ExprError),
    #[error("Could not evaluate the function in the given range")]
    NoDefinedPoints,
}

/// One successfully evaluated (x, y) pair. Always finite.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SamplePoint {
    pub x: f64,
    pub y: f64,
}

/// Visible y interval after margin (or fallback) is applied.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct YRange {
    pub min: f64,
    pub max: f64,
    /// True when the computed span overflowed and the fallback was used.
    pub clamped: bool,
}

impl YRange {
    pub fn span(&self) -> f64 {
        self.max - self.min
    }
}

/// Everything the renderer needs for one plot.
#[derive(Debug, Clone, PartialEq)]
pub struct PlotData {
    pub expression: Expression,
    pub x_min: f64,
    pub x_max: f64,
    pub points: Vec<SamplePoint>,
    /// Index `i` means a pole lies between `points[i - 1]` and `points[i]`.
    pub pole_breaks: Vec<usize>,
    pub y_range: YRange,
}

/// Turns an expression and an x range into plot data.
pub struct Sampler;

impl Sampler {
    /// Validate, parse, sample and compute the y range in one pass.
    pub fn plot(
        source: &str,
        x_min: f64,
        x_max: f64,
        config: &PlotConfig,
    ) -> Result<PlotData, PlotError> {
        Self::validate_inputs(source, x_min, x_max, config)?;

        let expression = Expression::parse(source).map_err(|e| {
            tracing::debug!(expression = source, error = %e, "Parse failed");
            PlotError::from(e)
        })?;

        let (points, pole_breaks) = Self::sample(&expression, x_min, x_max, config.sample_count);
        if points.is_empty() {
            return Err(PlotError::NoDefinedPoints);
        }

        let y_range = Self::y_range(&points, config);
        tracing::debug!(
            expression = source,
            points = points.len(),
            poles = pole_breaks.len(),
            y_min = y_range.min,
            y_max = y_range.max,
            "Plot ready"
        );

        Ok(PlotData {
            expression,
            x_min,
            x_max,
            points,
            pole_breaks,
            y_range,
        })
    }

    /// Checks done before any evaluation takes place.
    pub fn validate_inputs(
        source: &str,
        x_min: f64,
        x_max: f64,
        config: &PlotConfig,
    ) -> Result<(), PlotError> {
        if !x_min.is_finite() || !x_max.is_finite() {
            return Err(PlotError::NonFiniteBound);
        }
        if x_min >= x_max {
            return Err(PlotError::InvalidRange {
                min: x_min,
                max: x_max,
            });
        }
        if source.trim().is_empty() {
            return Err(PlotError::EmptyExpression);
        }
        let width = x_max - x_min;
        if width > config.max_x_span {
            return Err(PlotError::RangeTooWide {
                width,
                max: config.max_x_span,
            });
        }
        Ok(())
    }

    /// Evaluate at `intervals + 1` evenly spaced x values.
    ///
    /// Undefined points are dropped. Returns the surviving points and the
    /// indices where a pole was found between neighbours.
    pub fn sample(
        expression: &Expression,
        x_min: f64,
        x_max: f64,
        intervals: usize,
    ) -> (Vec<SamplePoint>, Vec<usize>) {
        let step = (x_max - x_min) / intervals as f64;
        let mut points: Vec<SamplePoint> = Vec::with_capacity(intervals + 1);
        let mut pole_breaks = Vec::new();

        for i in 0..=intervals {
            let x = x_min + i as f64 * step;
            let Ok(y) = expression.evaluate(x) else {
                continue;
            };

            if let Some(prev) = points.last() {
                if Self::pole_between(expression, *prev, SamplePoint { x, y }) {
                    pole_breaks.push(points.len());
                }
            }
            points.push(SamplePoint { x, y });
        }

        (points, pole_breaks)
    }

    /// True if a vertical asymptote lies between two neighbouring samples.
    ///
    /// Only sign changes are candidates. The bracket holding the sign change
    /// is bisected: near a root the values shrink toward zero, near a pole
    /// they grow past both original magnitudes.
    pub fn pole_between(expression: &Expression, a: SamplePoint, b: SamplePoint) -> bool {
        if (a.y < 0.0) == (b.y < 0.0) {
            return false;
        }

        let (mut lo, mut hi) = (a, b);
        for _ in 0..POLE_BISECTION_STEPS {
            let x = 0.5 * (lo.x + hi.x);
            let Ok(y) = expression.evaluate(x) else {
                return true;
            };
            let mid = SamplePoint { x, y };
            if (lo.y < 0.0) != (mid.y < 0.0) {
                hi = mid;
            } else {
                lo = mid;
            }
        }

        lo.y.abs().min(hi.y.abs()) > a.y.abs().max(b.y.abs())
    }

    /// Min/max of the samples plus a 10% margin (at least 0.5).
    ///
    /// Spans above `y_overflow_limit` use the fallback range instead.
    pub fn y_range(points: &[SamplePoint], config: &PlotConfig) -> YRange {
        let (min_y, max_y) = points
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), p| {
                (lo.min(p.y), hi.max(p.y))
            });

        let margin = ((max_y - min_y) * 0.1).max(0.5);
        let min = min_y - margin;
        let max = max_y + margin;

        if (max - min).abs() > config.y_overflow_limit || !(max - min).is_finite() {
            tracing::warn!(
                y_min = min,
                y_max = max,
                "Y range too large, using fallback range"
            );
            let (min, max) = config.fallback_y_range;
            return YRange {
                min,
                max,
                clamped: true,
            };
        }

        YRange {
            min,
            max,
            clamped: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn config() -> PlotConfig {
        PlotConfig::default()
    }

    #[test]
    fn samples_every_point_of_a_polynomial() {
        let data = Sampler::plot("x**2 + 3*x - 5", -10.0, 10.0, &config()).unwrap();
        assert_eq!(data.points.len(), 801);
        assert!(data.pole_breaks.is_empty());
        assert_relative_eq!(data.points[0].x, -10.0);
        assert_relative_eq!(data.points[800].x, 10.0, epsilon = 1e-9);
    }

    #[test]
    fn rejects_bad_ranges_before_parsing() {
        let cfg = config();
        assert_eq!(
            Sampler::plot("x +", 1.0, 1.0, &cfg),
            Err(PlotError::InvalidRange { min: 1.0, max: 1.0 })
        );
        assert_eq!(
            Sampler::plot("x", 5.0, -5.0, &cfg),
            Err(PlotError::InvalidRange {
                min: 5.0,
                max: -5.0
            })
        );
        assert_eq!(
            Sampler::plot("x", -600.0, 600.0, &cfg),
            Err(PlotError::RangeTooWide {
                width: 1200.0,
                max: 1000.0
            })
        );
        assert_eq!(
            Sampler::plot("x", f64::NAN, 1.0, &cfg),
            Err(PlotError::NonFiniteBound)
        );
        assert_eq!(
            Sampler::plot("  ", -1.0, 1.0, &cfg),
            Err(PlotError::EmptyExpression)
        );
    }

    #[test]
    fn exactly_max_span_is_accepted() {
        assert!(Sampler::plot("x", -500.0, 500.0, &config()).is_ok());
    }

    #[test]
    fn parse_errors_are_global() {
        assert!(matches!(
            Sampler::plot("x +++ * 2", -10.0, 10.0, &config()),
            Err(PlotError::Parse(_))
        ));
    }

    #[test]
    fn undefined_points_are_dropped() {
        let data = Sampler::plot("sqrt(x)", -10.0, 10.0, &config()).unwrap();
        assert_eq!(data.points.len(), 401);
        assert!(data.points.iter().all(|p| p.x >= 0.0));
    }

    #[test]
    fn nowhere_defined_is_a_global_error() {
        assert_eq!(
            Sampler::plot("sqrt(x)", -10.0, -1.0, &config()),
            Err(PlotError::NoDefinedPoints)
        );
        assert_eq!(
            Sampler::plot("log(0 * x) - log(0)", -1.0, 1.0, &config()),
            Err(PlotError::NoDefinedPoints)
        );
    }

    #[test]
    fn flat_function_gets_minimum_margin() {
        let range = Sampler::y_range(
            &[SamplePoint { x: 0.0, y: 3.0 }, SamplePoint { x: 1.0, y: 3.0 }],
            &config(),
        );
        assert_eq!(
            range,
            YRange {
                min: 2.5,
                max: 3.5,
                clamped: false
            }
        );
    }

    #[test]
    fn margin_is_ten_percent() {
        let range = Sampler::y_range(
            &[SamplePoint { x: 0.0, y: -10.0 }, SamplePoint { x: 1.0, y: 30.0 }],
            &config(),
        );
        assert_relative_eq!(range.min, -14.0);
        assert_relative_eq!(range.max, 34.0);
    }

    #[test]
    fn huge_spans_fall_back_to_default_range() {
        let data = Sampler::plot("exp(x)", -10.0, 20.0, &config()).unwrap();
        assert_eq!(
            data.y_range,
            YRange {
                min: -10.0,
                max: 10.0,
                clamped: true
            }
        );
    }

    #[test]
    fn detects_poles_but_not_roots() {
        let tan = Expression::parse("tan(x)").unwrap();
        let (_, poles) = Sampler::sample(&tan, -10.0, 10.0, 800);
        assert_eq!(poles.len(), 6);

        let sin = Expression::parse("sin(x)").unwrap();
        let (_, poles) = Sampler::sample(&sin, -10.0, 10.0, 800);
        assert!(poles.is_empty());

        let step = Expression::parse("x >= 0 ? 1 : -1").unwrap();
        let (_, poles) = Sampler::sample(&step, -10.0, 10.0, 800);
        assert!(poles.is_empty());
    }

    #[test]
    fn pole_index_points_past_the_asymptote() {
        let expr = Expression::parse("1/(x-5)").unwrap();
        let (points, poles) = Sampler::sample(&expr, 0.0, 10.0, 800);
        // x = 5 itself is infinite and dropped.
        assert_eq!(points.len(), 800);
        assert_eq!(poles.len(), 1);
        let i = poles[0];
        assert!(points[i - 1].x < 5.0 && points[i].x > 5.0);
    }
}
