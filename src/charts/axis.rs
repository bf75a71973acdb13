//! Axis helpers: gridline step selection, tick positions and tick labels.

/// Upper bound on ticks per axis so a degenerate step can't stall a redraw.
const MAX_TICKS: i64 = 1000;

/// Pick a gridline step from {1, 2, 5} x 10^k for the span `max - min`.
///
/// The span's order of magnitude `p` and normalized factor `f = span / 10^p`
/// select the step: `f < 2` gives `10^(p-1)`, `f < 5` gives `2·10^(p-1)`,
/// anything else `5·10^(p-1)`.
pub fn nice_step(min: f64, max: f64) -> f64 {
    let span = max - min;
    if !span.is_finite() || span <= 0.0 {
        return 1.0;
    }

    let power = span.log10().floor();
    let magnitude = 10f64.powf(power);
    let factor = span / magnitude;
    let base = 10f64.powf(power - 1.0);

    if factor < 2.0 {
        base
    } else if factor < 5.0 {
        2.0 * base
    } else {
        5.0 * base
    }
}

/// Multiples of `step` inside `[min, max]`.
///
/// Computed from integer indices so values don't drift the way a running
/// `v += step` sum does.
pub fn tick_values(min: f64, max: f64, step: f64) -> Vec<f64> {
    if !(step > 0.0) || !min.is_finite() || !max.is_finite() || min > max {
        return Vec::new();
    }

    let first = (min / step).ceil() as i64;
    let last = (max / step).floor() as i64;
    if last < first {
        return Vec::new();
    }
    let last = last.min(first + MAX_TICKS - 1);

    (first..=last).map(|i| i as f64 * step).collect()
}

/// Format a tick label.
///
/// Values below 0.001 in magnitude print as `0`. Below 10 they get two
/// decimals with trailing zeros trimmed. Otherwise one decimal with a
/// trailing `.0` trimmed.
pub fn format_tick(value: f64) -> String {
    if value.abs() < 0.001 {
        return "0".to_string();
    }

    if value.abs() < 10.0 {
        let formatted = format!("{:.2}", value);
        formatted
            .trim_end_matches('0')
            .trim_end_matches('.')
            .to_string()
    } else {
        let formatted = format!("{:.1}", value);
        match formatted.strip_suffix(".0") {
            Some(trimmed) => trimmed.to_string(),
            None => formatted,
        }
    }
}
