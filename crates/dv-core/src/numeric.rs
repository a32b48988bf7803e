//! Lenient numeric parsing for form input.
//!
//! Form fields accept whatever the user types. A leading numeric prefix is
//! honoured (`"12abc"` → 12) and anything else coerces to zero, so a
//! half-typed value never poisons the invoice totals.

use winnow::ascii::multispace0;
use winnow::error::{ContextError, ErrMode};
use winnow::prelude::*;
use winnow::token::{one_of, take_while};

/// Parse the leading integer of `input`, or 0.
pub fn coerce_int(input: &str) -> i64 {
    let mut rest = input;
    match parse_int_prefix.parse_next(&mut rest) {
        Ok(v) => v,
        Err(_) => {
            log::debug!("non-numeric integer input {input:?}, using 0");
            0
        }
    }
}

/// Parse the leading decimal number of `input`, or 0.0.
pub fn coerce_float(input: &str) -> f64 {
    let mut rest = input;
    match parse_float_prefix.parse_next(&mut rest) {
        Ok(v) if v.is_finite() => v,
        _ => {
            log::debug!("non-numeric decimal input {input:?}, using 0");
            0.0
        }
    }
}

// ─── Low-level parsers ──────────────────────────────────────────────────

fn parse_sign(input: &mut &str) -> ModalResult<()> {
    let _ = winnow::combinator::opt(one_of(['+', '-'])).parse_next(input)?;
    Ok(())
}

fn parse_int_prefix(input: &mut &str) -> ModalResult<i64> {
    let _ = multispace0.parse_next(input)?;
    let start = *input;
    parse_sign(input)?;
    let _ = take_while(1.., |c: char| c.is_ascii_digit()).parse_next(input)?;
    let matched = &start[..start.len() - input.len()];
    // Only overflow can fail here; keep the sign and saturate.
    Ok(matched.parse::<i64>().unwrap_or(if matched.starts_with('-') {
        i64::MIN
    } else {
        i64::MAX
    }))
}

fn parse_float_prefix(input: &mut &str) -> ModalResult<f64> {
    let _ = multispace0.parse_next(input)?;
    let start = *input;
    parse_sign(input)?;
    let int_digits: &str = take_while(0.., |c: char| c.is_ascii_digit()).parse_next(input)?;
    let mut frac_digits = "";
    if input.starts_with('.') {
        let before_dot = *input;
        *input = &input[1..];
        frac_digits = take_while(0.., |c: char| c.is_ascii_digit()).parse_next(input)?;
        if frac_digits.is_empty() && int_digits.is_empty() {
            *input = before_dot;
        }
    }
    if int_digits.is_empty() && frac_digits.is_empty() {
        return Err(ErrMode::Backtrack(ContextError::new()));
    }
    parse_exponent(input);
    let matched = &start[..start.len() - input.len()];
    matched
        .parse::<f64>()
        .map_err(|_| ErrMode::Backtrack(ContextError::new()))
}

/// Consume an exponent suffix (`e-3`, `E+2`) only if it is complete.
fn parse_exponent(input: &mut &str) {
    let checkpoint = *input;
    if exponent.parse_next(input).is_err() {
        *input = checkpoint;
    }
}

fn exponent(input: &mut &str) -> ModalResult<()> {
    let _ = one_of(['e', 'E']).parse_next(input)?;
    parse_sign(input)?;
    let _ = take_while(1.., |c: char| c.is_ascii_digit()).parse_next(input)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integers_take_leading_digits() {
        assert_eq!(coerce_int("3"), 3);
        assert_eq!(coerce_int("  42 boxes"), 42);
        assert_eq!(coerce_int("-7"), -7);
        assert_eq!(coerce_int("2.9"), 2);
    }

    #[test]
    fn oversized_integers_saturate() {
        assert_eq!(coerce_int("99999999999999999999"), i64::MAX);
        assert_eq!(coerce_int("-99999999999999999999 units"), i64::MIN);
    }

    #[test]
    fn integers_default_to_zero() {
        assert_eq!(coerce_int(""), 0);
        assert_eq!(coerce_int("abc"), 0);
        assert_eq!(coerce_int("-"), 0);
    }

    #[test]
    fn floats_take_leading_number() {
        assert!((coerce_float("12.50") - 12.5).abs() < 1e-9);
        assert!((coerce_float(".5") - 0.5).abs() < 1e-9);
        assert!((coerce_float("8%") - 8.0).abs() < 1e-9);
        assert!((coerce_float("1e2x") - 100.0).abs() < 1e-9);
        assert!((coerce_float("3e") - 3.0).abs() < 1e-9);
        assert!((coerce_float("4.") - 4.0).abs() < 1e-9);
    }

    #[test]
    fn floats_default_to_zero() {
        assert_eq!(coerce_float(""), 0.0);
        assert_eq!(coerce_float("."), 0.0);
        assert_eq!(coerce_float("twelve"), 0.0);
    }
}
