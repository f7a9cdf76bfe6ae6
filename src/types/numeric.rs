use crate::types::errors::NumericError;
use crate::types::Timestamp;
use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;
use serde::Deserialize;
use std::str::FromStr;

/// A numeric JSON field that may arrive as a number or as a numeric string.
///
/// Transaction exports are inconsistent here: amounts are usually strings of
/// raw token units, prices are sometimes strings and sometimes floats, and
/// timestamps are integers.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum NumericField {
    Integer(i64),
    Float(f64),
    Text(String)
}

impl NumericField {
    /// Converts the field into a decimal.
    ///
    /// # Errors
    /// Returns `NumericError` when the text is empty or not a number, or the
    /// value is not finite.
    pub fn to_decimal(&self) -> Result<Decimal, NumericError> {
        self.to_scaled_decimal(0)
    }

    /// Converts the field into a decimal after moving its decimal point
    /// `decimals` places to the left.
    ///
    /// The shift happens before the value has to fit a `Decimal`, so raw unit
    /// counts wider than 28 digits still convert. Values that stay out of
    /// range saturate at `Decimal::MAX` (or `MIN`); plain decimal text is
    /// converted exactly.
    pub fn to_scaled_decimal(&self, decimals: u32) -> Result<Decimal, NumericError> {
        match self {
            NumericField::Integer(value) => Decimal::try_new(*value, decimals).map_err(|error| {
                NumericError::InvalidFormat(format!("Value cannot be scaled: {error}"))
            }),
            NumericField::Float(value) => scale_float(*value, decimals),
            NumericField::Text(text) => parse_decimal(text, decimals)
        }
    }

    /// Converts the field into a whole-second timestamp.
    ///
    /// Numeric strings follow the same rule as JSON numbers: `"1629178166.0"`
    /// is accepted, `"1.5"` is not.
    pub fn to_timestamp(&self) -> Result<Timestamp, NumericError> {
        match self {
            NumericField::Integer(value) => Ok(*value),
            NumericField::Float(value) => float_timestamp(*value),
            NumericField::Text(text) => {
                let text = text.trim();

                match text.parse::<Timestamp>() {
                    Ok(value) => Ok(value),
                    Err(error) => match text.parse::<f64>() {
                        Ok(value) => float_timestamp(value),
                        Err(_) => Err(error.into())
                    }
                }
            }
        }
    }
}

fn float_timestamp(value: f64) -> Result<Timestamp, NumericError> {
    if !value.is_finite() {
        return Err(NumericError::NonFinite);
    }

    if value.fract() != 0.0 {
        return Err(NumericError::NotInteger);
    }

    if value < Timestamp::MIN as f64 || value >= Timestamp::MAX as f64 {
        return Err(NumericError::Overflow);
    }

    Ok(value as Timestamp)
}

fn parse_decimal(text: &str, decimals: u32) -> Result<Decimal, NumericError> {
    let text = text.trim();

    if text.is_empty() {
        return Err(NumericError::InvalidFormat("Value is an empty string".to_string()));
    }

    // Rust's float grammar accepts "inf" and "nan"; those are caught as non-finite below.
    let approximate = text.parse::<f64>().map_err(|error| {
        NumericError::InvalidFormat(format!("Value is not a decimal number: {error}"))
    })?;

    if !approximate.is_finite() {
        return Err(NumericError::NonFinite);
    }

    let exact = if text.contains(['e', 'E']) {
        Decimal::from_scientific(text).ok().and_then(|value| checked_shift(value, decimals))
    } else {
        Decimal::from_str(&shift_decimal_point(text, decimals as usize)).ok()
    };

    match exact {
        Some(value) => Ok(value),
        None => scale_float(approximate, decimals)
    }
}

fn scale_float(value: f64, decimals: u32) -> Result<Decimal, NumericError> {
    if !value.is_finite() {
        return Err(NumericError::NonFinite);
    }

    let scaled = value / 10f64.powi(decimals as i32);

    if scaled.abs() < 1.0 {
        return Ok(Decimal::from_f64(scaled).unwrap_or(Decimal::ZERO));
    }

    Ok(Decimal::from_f64(scaled).unwrap_or(if scaled > 0.0 { Decimal::MAX } else { Decimal::MIN }))
}

fn checked_shift(value: Decimal, decimals: u32) -> Option<Decimal> {
    (0..decimals).try_fold(value, |value, _| value.checked_div(Decimal::TEN))
}

/// Moves the decimal point of a plain decimal string `places` digits left,
/// dropping trailing fractional zeros so the digit count stays minimal.
fn shift_decimal_point(text: &str, places: usize) -> String {
    if places == 0 {
        return text.to_string();
    }

    let (sign, unsigned) = match text.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", text.strip_prefix('+').unwrap_or(text))
    };

    let (integer, fraction) = unsigned.split_once('.').unwrap_or((unsigned, ""));
    let padded = format!("{integer:0>width$}", width = places + 1);
    let (integer, moved) = padded.split_at(padded.len() - places);
    let fraction = format!("{moved}{fraction}");
    let fraction = fraction.trim_end_matches('0');

    if fraction.is_empty() {
        format!("{sign}{integer}")
    } else {
        format!("{sign}{integer}.{fraction}")
    }
}
