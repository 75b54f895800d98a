//! # Substituted Equations
//!
//! Renders LaTeX strings that show a formula with the numeric inputs plugged
//! in, e.g. `\sigma_a = \frac{\sigma_{max} - \sigma_{min}}{2} = \frac{300 - 100}{2} = 100\,\text{MPa}`.
//! These strings are display-only; every value they show is also available
//! as a plain number on the result struct.
//!
//! ```rust
//! use mechcalc_core::subst::{fmt_num, substitute};
//!
//! assert_eq!(fmt_num(1234.5678), "1235");
//! assert_eq!(fmt_num(2.5e-7), "2.5 \\times 10^{-7}");
//!
//! let s = substitute("F", "m a", "2 \\cdot 3", 6.0, "N");
//! assert_eq!(s, "F = m a = 2 \\cdot 3 = 6\\,\\text{N}");
//! ```

/// Significant figures shown in substituted strings
const SIG_FIGS: i32 = 4;

/// Plain decimal notation is used for magnitudes in [1e-3, 1e5)
const PLAIN_MIN: f64 = 1e-3;
const PLAIN_MAX: f64 = 1e5;

/// Format a number for LaTeX display with four significant figures.
///
/// Infinity renders as `\infty`, magnitudes outside [1e-3, 1e5) use
/// `a \times 10^{b}` notation.
pub fn fmt_num(x: f64) -> String {
    if x.is_nan() {
        return "\\text{NaN}".to_string();
    }
    if x.is_infinite() {
        return if x > 0.0 { "\\infty".to_string() } else { "-\\infty".to_string() };
    }
    if x == 0.0 {
        return "0".to_string();
    }

    let magnitude = x.abs();
    if (PLAIN_MIN..PLAIN_MAX).contains(&magnitude) {
        return fmt_sig(x);
    }

    let mut exponent = magnitude.log10().floor() as i32;
    let mut mantissa = x / 10f64.powi(exponent);
    // 9.9996e3 rounds to a mantissa of 10.00
    let rounded = round_sig(mantissa);
    if rounded.abs() >= 10.0 {
        exponent += 1;
        mantissa /= 10.0;
    }
    format!("{} \\times 10^{{{}}}", fmt_sig(mantissa), exponent)
}

fn round_sig(x: f64) -> f64 {
    let decimals = (SIG_FIGS - 1 - x.abs().log10().floor() as i32).max(0);
    let scale = 10f64.powi(decimals);
    (x * scale).round() / scale
}

fn fmt_sig(x: f64) -> String {
    let decimals = (SIG_FIGS - 1 - x.abs().log10().floor() as i32).max(0) as usize;
    let text = format!("{:.*}", decimals, x);
    if text.contains('.') {
        text.trim_end_matches('0').trim_end_matches('.').to_string()
    } else {
        text
    }
}

/// Render `lhs = symbolic = substituted = result unit`.
///
/// An empty `unit` leaves the result bare (dimensionless quantities).
pub fn substitute(lhs: &str, symbolic: &str, substituted: &str, result: f64, unit: &str) -> String {
    if unit.is_empty() {
        format!("{} = {} = {} = {}", lhs, symbolic, substituted, fmt_num(result))
    } else {
        format!(
            "{} = {} = {} = {}\\,\\text{{{}}}",
            lhs,
            symbolic,
            substituted,
            fmt_num(result),
            unit
        )
    }
}
