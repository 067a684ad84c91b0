//! Per-value schema rules
//!
//! Each rule takes an already type-checked value and either returns the
//! converted value or the [`Rule`] it broke.

use crate::error::Rule;

/// Length of a `0x`-prefixed 32-byte hash.
pub const HASH_LENGTH: usize = 66;

/// Largest integer a counter may carry (2^53 - 1).
///
/// Counters are produced by services that treat them as IEEE-754 doubles, so
/// anything above this bound can no longer be represented exactly.
pub const MAX_SAFE_INTEGER: u64 = 9_007_199_254_740_991;

/// Parses a decimal-string counter into a non-negative integer.
///
/// Surrounding whitespace is ignored and exponent notation is accepted
/// (`"1e3"` is 1000), but the result must be finite, integral, non-negative
/// and no larger than [`MAX_SAFE_INTEGER`]. Empty strings are not numbers.
pub fn parse_counter(raw: &str) -> Result<u64, Rule> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(Rule::NotANumber);
    }

    if trimmed.bytes().all(|b| b.is_ascii_digit()) {
        return match trimmed.parse::<u64>() {
            Ok(value) if value <= MAX_SAFE_INTEGER => Ok(value),
            _ => Err(Rule::OutOfRange),
        };
    }

    // `f64::from_str` also accepts "inf" and "nan" spellings; both are
    // rejected below.
    let value: f64 = trimmed.parse().map_err(|_| Rule::NotANumber)?;
    if value.is_nan() {
        return Err(Rule::NotANumber);
    }
    if value < 0.0 {
        return Err(Rule::Negative);
    }
    if value.is_infinite() {
        return Err(Rule::OutOfRange);
    }
    if value.fract() != 0.0 {
        return Err(Rule::NotAnInteger);
    }
    if value > MAX_SAFE_INTEGER as f64 {
        return Err(Rule::OutOfRange);
    }
    Ok(value as u64)
}

/// Requires a hash-shaped string of exactly [`HASH_LENGTH`] characters.
pub fn check_hash(value: &str) -> Result<(), Rule> {
    let actual = value.chars().count();
    if actual == HASH_LENGTH {
        Ok(())
    } else {
        Err(Rule::WrongLength {
            expected: HASH_LENGTH,
            actual,
        })
    }
}

/// Converts an empty claim hash to `None` before applying the hash rule.
pub fn normalize_claim_hash(value: &str) -> Result<Option<String>, Rule> {
    if value.is_empty() {
        return Ok(None);
    }
    check_hash(value)?;
    Ok(Some(value.to_string()))
}

/// Requires a JSON integer that fits a network identifier.
pub fn network_id(value: &serde_json::Number) -> Result<u32, Rule> {
    if let Some(unsigned) = value.as_u64() {
        return u32::try_from(unsigned).map_err(|_| Rule::OutOfRange);
    }
    if value.as_i64().is_some() {
        return Err(Rule::Negative);
    }
    match value.as_f64() {
        Some(float) if float < 0.0 => Err(Rule::Negative),
        Some(float) if float.fract() != 0.0 => Err(Rule::NotAnInteger),
        Some(float) if float <= u32::MAX as f64 => Ok(float as u32),
        _ => Err(Rule::OutOfRange),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Test that plain decimal counters parse exactly
    /// Why: Deposit counts index on-chain leaves and must not drift
    #[test]
    fn test_parse_counter_decimal() {
        assert_eq!(parse_counter("0"), Ok(0));
        assert_eq!(parse_counter("5"), Ok(5));
        assert_eq!(parse_counter(" 42 "), Ok(42));
        assert_eq!(parse_counter("9007199254740991"), Ok(MAX_SAFE_INTEGER));
    }

    /// Test that numeric notations other than plain digits still have to be integral
    #[test]
    fn test_parse_counter_number_notation() {
        assert_eq!(parse_counter("1e3"), Ok(1000));
        assert_eq!(parse_counter("7.0"), Ok(7));
        assert_eq!(parse_counter("+3"), Ok(3));
        assert_eq!(parse_counter("-0"), Ok(0));
        assert_eq!(parse_counter("7.5"), Err(Rule::NotAnInteger));
    }

    #[test]
    fn test_parse_counter_rejects() {
        assert_eq!(parse_counter(""), Err(Rule::NotANumber));
        assert_eq!(parse_counter("   "), Err(Rule::NotANumber));
        assert_eq!(parse_counter("abc"), Err(Rule::NotANumber));
        assert_eq!(parse_counter("NaN"), Err(Rule::NotANumber));
        assert_eq!(parse_counter("0x10"), Err(Rule::NotANumber));
        assert_eq!(parse_counter("-1"), Err(Rule::Negative));
        assert_eq!(parse_counter("-inf"), Err(Rule::Negative));
        assert_eq!(parse_counter("inf"), Err(Rule::OutOfRange));
        assert_eq!(parse_counter("9007199254740992"), Err(Rule::OutOfRange));
        assert_eq!(parse_counter("1e300"), Err(Rule::OutOfRange));
    }

    #[test]
    fn test_network_id_bounds() {
        assert_eq!(network_id(&serde_json::Number::from(0u64)), Ok(0));
        assert_eq!(network_id(&serde_json::Number::from(u32::MAX as u64)), Ok(u32::MAX));
        assert_eq!(
            network_id(&serde_json::Number::from(u32::MAX as u64 + 1)),
            Err(Rule::OutOfRange)
        );
        assert_eq!(network_id(&serde_json::Number::from(-1i64)), Err(Rule::Negative));
        let fractional = serde_json::Number::from_f64(1.5).unwrap();
        assert_eq!(network_id(&fractional), Err(Rule::NotAnInteger));
        let integral = serde_json::Number::from_f64(2.0).unwrap();
        assert_eq!(network_id(&integral), Ok(2));
    }
}
