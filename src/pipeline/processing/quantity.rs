//! Quantity parsing and volume conversion for drink measures.
//!
//! Measures such as `"1 1/2 oz"` arrive as free text. Only the numeric part is
//! handled here; suffix detection lives in the normalizer.

use thiserror::Error;

use crate::constants::ML_PER_FLUID_OUNCE;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum QuantityError {
    #[error("invalid mixed number format: {0}")]
    InvalidFormat(String),

    #[error("division by zero in fraction {0:?}")]
    DivideByZero(String),
}

/// Parse an integer, fraction (`3/4`) or mixed number (`1 1/2`) into a decimal.
///
/// The result is always finite.
pub fn parse_mixed_number(text: &str) -> Result<f64, QuantityError> {
    let value = parse_parts(text)?;
    if !value.is_finite() {
        return Err(QuantityError::InvalidFormat(format!(
            "{:?} does not evaluate to a finite number",
            text.trim()
        )));
    }
    Ok(value)
}

fn parse_parts(text: &str) -> Result<f64, QuantityError> {
    let parts: Vec<&str> = text.split_whitespace().collect();

    match parts.as_slice() {
        [single] if single.contains('/') => parse_fraction(single),
        [single] => parse_decimal(single),
        [whole, fraction] => {
            if !fraction.contains('/') {
                return Err(QuantityError::InvalidFormat(format!(
                    "expected a fraction after {whole:?}, got {fraction:?}"
                )));
            }
            Ok(parse_decimal(whole)? + parse_fraction(fraction)?)
        }
        _ => Err(QuantityError::InvalidFormat(format!(
            "expected one or two tokens, got {} in {:?}",
            parts.len(),
            text.trim()
        ))),
    }
}

fn parse_fraction(token: &str) -> Result<f64, QuantityError> {
    let (numerator, denominator) = match token.split('/').collect::<Vec<_>>().as_slice() {
        [n, d] => (parse_decimal(n)?, parse_decimal(d)?),
        _ => {
            return Err(QuantityError::InvalidFormat(format!(
                "fraction {token:?} must have exactly one '/'"
            )))
        }
    };

    if denominator == 0.0 {
        return Err(QuantityError::DivideByZero(token.to_string()));
    }
    Ok(numerator / denominator)
}

fn parse_decimal(token: &str) -> Result<f64, QuantityError> {
    let value = token
        .parse::<f64>()
        .map_err(|e| QuantityError::InvalidFormat(format!("{token:?} is not a number: {e}")))?;
    // f64 parsing accepts "nan", "inf" and overflowing exponents
    if !value.is_finite() {
        return Err(QuantityError::InvalidFormat(format!("{token:?} is not a finite number")));
    }
    Ok(value)
}

/// Convert fluid ounces to a whole-milliliter string, truncating toward zero.
///
/// Expects a finite input whose product with the ratio is also finite;
/// see [`checked_ounces_to_milliliters`].
pub fn ounces_to_milliliters(oz: f64) -> String {
    // `+ 0.0` folds -0.0 into 0.0 so small negatives render as "0 ml"
    let ml = (oz * ML_PER_FLUID_OUNCE).trunc() + 0.0;
    format!("{ml:.0} ml")
}

/// Like [`ounces_to_milliliters`], but rejects volumes that overflow `f64`.
pub fn checked_ounces_to_milliliters(oz: f64) -> Result<String, QuantityError> {
    if !(oz * ML_PER_FLUID_OUNCE).is_finite() {
        return Err(QuantityError::InvalidFormat(format!(
            "{oz} oz overflows when converted to milliliters"
        )));
    }
    Ok(ounces_to_milliliters(oz))
}
