//! Conversion between the ledger's smallest unit and the human-readable decimal unit.
//!
//! Parsing scales the whole and fractional digits separately with checked `Uint128`
//! math, so any amount that fits in a `Uint128` of smallest units is accepted. Amounts
//! destined for a write are always produced here from the user's raw string, never
//! from a display float.

use std::str::FromStr;

use cosmwasm_std::Uint128;

use crate::config::MAX_DECIMALS;
use crate::error::ClientError;

/// Lossy conversion for display only.
pub fn to_display_units(amount: Uint128, decimals: u32) -> f64 {
    amount.u128() as f64 / 10f64.powi(decimals as i32)
}

/// Format a display amount with a fixed number of fractional digits.
pub fn format_display(value: f64, precision: usize) -> String {
    format!("{:.*}", precision, value)
}

/// Whether `raw` is acceptable as an in-progress amount edit:
/// digits with at most one `.`, or empty.
pub fn is_amount_edit(raw: &str) -> bool {
    let mut seen_dot = false;
    raw.chars().all(|c| match c {
        '0'..='9' => true,
        '.' if !seen_dot => {
            seen_dot = true;
            true
        }
        _ => false,
    })
}

/// Parse a decimal-unit string into smallest units.
///
/// Rejects empty, signed, non-numeric and exponent input, and anything with more
/// fractional digits than `decimals`. Zero is accepted here; callers that need a
/// positive amount check `is_zero()`.
pub fn parse_units(raw: &str, decimals: u32) -> Result<Uint128, ClientError> {
    if decimals > MAX_DECIMALS {
        return Err(ClientError::InvalidConfig {
            reason: format!("decimals = {} (must be <= {})", decimals, MAX_DECIMALS),
        });
    }

    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ClientError::validation("amount is required"));
    }
    if !is_amount_edit(trimmed) || trimmed == "." {
        return Err(ClientError::validation(format!(
            "'{}' is not a non-negative decimal number",
            trimmed
        )));
    }

    let (whole, fraction) = trimmed.split_once('.').unwrap_or((trimmed, ""));
    // trailing zeros carry no value, so "1.500" is fine with 1 decimal
    let fraction = fraction.trim_end_matches('0');
    if fraction.len() > decimals as usize {
        return Err(ClientError::validation(format!(
            "'{}' has more than {} decimal places",
            trimmed, decimals
        )));
    }

    let too_large = |reason: String| {
        ClientError::validation(format!("'{}' is too large: {}", trimmed, reason))
    };

    let whole = if whole.is_empty() {
        Uint128::zero()
    } else {
        Uint128::from_str(whole).map_err(|e| too_large(e.to_string()))?
    };
    let fraction = if fraction.is_empty() {
        Uint128::zero()
    } else {
        let padded = format!("{:0<width$}", fraction, width = decimals as usize);
        Uint128::from_str(&padded).map_err(|e| too_large(e.to_string()))?
    };

    let scale = Uint128::new(10u128.pow(decimals));
    whole
        .checked_mul(scale)
        .and_then(|scaled| scaled.checked_add(fraction))
        .map_err(|e| too_large(e.to_string()))
}

/// Parse an amount that must be strictly positive.
pub fn parse_positive_units(raw: &str, decimals: u32) -> Result<Uint128, ClientError> {
    let amount = parse_units(raw, decimals)?;
    if amount.is_zero() {
        return Err(ClientError::validation("amount must be greater than zero"));
    }
    Ok(amount)
}
