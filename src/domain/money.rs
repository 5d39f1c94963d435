use std::fmt;

/// Money is held as integer cents so balances never drift.
/// 10000.00 is stored as 1_000_000.
pub type Cents = i64;

/// Render cents as a plain decimal with two places.
/// Example: 1050000 -> "10500.00", -1 -> "-0.01"
pub fn format_cents(cents: Cents) -> String {
    let sign = if cents < 0 { "-" } else { "" };
    let abs_cents = cents.unsigned_abs();
    format!("{}{}.{:02}", sign, abs_cents / 100, abs_cents % 100)
}

/// Parse user-entered amount text into cents.
/// Accepts plain decimal notation: "500", "+500", "500.5", "500.50", ".50"
/// and "-5". Exponents are not accepted. Trailing zeros past the second
/// decimal place are fine, but any other digit there is rejected rather than
/// silently dropped.
pub fn parse_cents(input: &str) -> Result<Cents, ParseCentsError> {
    let input = input.trim();
    let (negative, digits) = if let Some(rest) = input.strip_prefix('-') {
        (true, rest)
    } else if let Some(rest) = input.strip_prefix('+') {
        (false, rest)
    } else {
        (false, input)
    };

    let (whole, fraction) = match digits.split_once('.') {
        Some((whole, fraction)) => (whole, fraction),
        None => (digits, ""),
    };

    if whole.is_empty() && fraction.is_empty() {
        return Err(ParseCentsError::InvalidFormat);
    }
    if !whole.bytes().all(|b| b.is_ascii_digit()) || !fraction.bytes().all(|b| b.is_ascii_digit())
    {
        return Err(ParseCentsError::InvalidFormat);
    }

    let units: i64 = if whole.is_empty() {
        0
    } else {
        whole.parse().map_err(|_| ParseCentsError::Overflow)?
    };

    if fraction.bytes().skip(2).any(|b| b != b'0') {
        return Err(ParseCentsError::TooPrecise);
    }

    // "5" means 50 cents.
    let fraction_cents: i64 = fraction
        .bytes()
        .chain(std::iter::repeat(b'0'))
        .take(2)
        .fold(0, |acc, b| acc * 10 + i64::from(b - b'0'));

    let cents = units
        .checked_mul(100)
        .and_then(|c| c.checked_add(fraction_cents))
        .ok_or(ParseCentsError::Overflow)?;

    Ok(if negative { -cents } else { cents })
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseCentsError {
    InvalidFormat,
    TooPrecise,
    Overflow,
}

impl fmt::Display for ParseCentsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseCentsError::InvalidFormat => write!(f, "not a decimal number"),
            ParseCentsError::TooPrecise => write!(f, "more than two decimal places"),
            ParseCentsError::Overflow => write!(f, "amount is too large"),
        }
    }
}

impl std::error::Error for ParseCentsError {}
