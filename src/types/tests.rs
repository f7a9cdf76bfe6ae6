use super::{NumericError, NumericField};

use std::str::FromStr;

use anyhow::Result;
use rust_decimal::Decimal;

#[test]
fn test_numeric_field_parses_valid_amount_forms() -> Result<()> {
    let test_cases = vec![
        (NumericField::Text("2000000000".to_string()), "2000000000"),
        (NumericField::Text("  1.5  ".to_string()), "1.5"),
        (NumericField::Text("0.0001".to_string()), "0.0001"),
        (NumericField::Text("1e6".to_string()), "1000000"),
        (NumericField::Text("2.5E-3".to_string()), "0.0025"),
        (NumericField::Integer(42), "42"),
        (NumericField::Float(0.99), "0.99")
    ];

    for (field, expected) in test_cases {
        assert_eq!(field.to_decimal()?, Decimal::from_str(expected)?);
    }

    Ok(())
}

#[test]
fn test_numeric_field_rejects_non_numeric_amounts() {
    assert!(NumericField::Text("".to_string()).to_decimal().is_err());
    assert!(NumericField::Text("   ".to_string()).to_decimal().is_err());
    assert!(NumericField::Text("abc".to_string()).to_decimal().is_err());
    assert!(NumericField::Text("1.2.3".to_string()).to_decimal().is_err());
    assert!(NumericField::Text("nan".to_string()).to_decimal().is_err());
    assert!(matches!(NumericField::Float(f64::INFINITY).to_decimal(), Err(NumericError::NonFinite)));
}

#[test]
fn test_numeric_field_scales_raw_units() -> Result<()> {
    let test_cases = vec![
        (NumericField::Text("2000000000".to_string()), "2000"),
        (NumericField::Text("1500000.5".to_string()), "1.5000005"),
        (NumericField::Text(".5".to_string()), "0.0000005"),
        (NumericField::Text("-3000000".to_string()), "-3"),
        (NumericField::Text("1e9".to_string()), "1000"),
        (NumericField::Integer(2_500_000), "2.5"),
        (NumericField::Float(4_000_000.0), "4")
    ];

    for (field, expected) in test_cases {
        assert_eq!(field.to_scaled_decimal(6)?, Decimal::from_str(expected)?);
    }

    Ok(())
}

#[test]
fn test_numeric_field_scales_amounts_wider_than_decimal() -> Result<()> {
    let thirty_digits = NumericField::Text("100000000000000000000000000000".to_string());
    assert_eq!(thirty_digits.to_scaled_decimal(6)?, Decimal::from_str("100000000000000000000000")?);

    let float = NumericField::Float(1e30).to_scaled_decimal(6)?;
    assert!(float > Decimal::from_str("999999999999999000000000")?);

    let beyond_range = NumericField::Text("1e60".to_string()).to_scaled_decimal(6)?;
    assert_eq!(beyond_range, Decimal::MAX);

    Ok(())
}

#[test]
fn test_numeric_field_parses_timestamps() -> Result<()> {
    assert_eq!(NumericField::Integer(1_629_178_166).to_timestamp()?, 1_629_178_166);
    assert_eq!(NumericField::Text(" 1000 ".to_string()).to_timestamp()?, 1000);
    assert_eq!(NumericField::Float(2000.0).to_timestamp()?, 2000);
    assert_eq!(NumericField::Integer(0).to_timestamp()?, 0);
    assert_eq!(NumericField::Text("1629178166.0".to_string()).to_timestamp()?, 1_629_178_166);
    assert_eq!(NumericField::Text("1629178166.0".to_string()).to_timestamp()?, NumericField::Float(1_629_178_166.0).to_timestamp()?);

    Ok(())
}

#[test]
fn test_numeric_field_rejects_fractional_or_textual_timestamps() {
    assert!(matches!(NumericField::Float(1.5).to_timestamp(), Err(NumericError::NotInteger)));
    assert!(matches!(NumericField::Text("yesterday".to_string()).to_timestamp(), Err(NumericError::ParseInt(_))));
    assert!(matches!(NumericField::Text("1.5".to_string()).to_timestamp(), Err(NumericError::NotInteger)));
    assert!(matches!(NumericField::Text("inf".to_string()).to_timestamp(), Err(NumericError::NonFinite)));
    assert!(matches!(NumericField::Float(f64::NAN).to_timestamp(), Err(NumericError::NonFinite)));
}

#[test]
fn test_numeric_field_deserializes_numbers_and_strings() -> Result<()> {
    let integer: NumericField = serde_json::from_str("1000")?;
    let float: NumericField = serde_json::from_str("0.5")?;
    let text: NumericField = serde_json::from_str("\"12.25\"")?;

    assert_eq!(integer, NumericField::Integer(1000));
    assert_eq!(float, NumericField::Float(0.5));
    assert_eq!(text, NumericField::Text("12.25".to_string()));

    Ok(())
}
