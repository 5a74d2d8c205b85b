//! Currency amount parsing and formatting.

use rust_decimal::Decimal;
use std::str::FromStr;

use crate::error::ExtractionError;

/// Parse a captured currency token such as "1,766.66" or "$325.65".
///
/// A leading currency symbol and thousands separators are stripped; whatever
/// remains must be a plain decimal number. Malformed tokens are an error,
/// never a silent zero.
pub fn parse_amount(field: &str, raw: &str) -> Result<Decimal, ExtractionError> {
    let trimmed = raw.trim();
    let (negative, unsigned) = match trimmed.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, trimmed),
    };
    let cleaned = unsigned.strip_prefix('$').unwrap_or(unsigned).replace(',', "");

    let value = Decimal::from_str(&cleaned).map_err(|_| ExtractionError::Parse {
        field: field.to_string(),
        value: raw.to_string(),
    })?;

    Ok(if negative { -value } else { value })
}

/// Format an amount in US style with thousands separators ($1,234.56).
pub fn format_amount(amount: Decimal) -> String {
    let s = format!("{:.2}", amount.abs());
    let (integer_part, decimal_part) = s.split_once('.').unwrap_or((s.as_str(), "00"));

    let chars: Vec<char> = integer_part.chars().collect();
    let mut grouped = String::new();
    for (i, c) in chars.iter().enumerate() {
        if i > 0 && (chars.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(*c);
    }

    let sign = if amount.is_sign_negative() && !amount.is_zero() { "-" } else { "" };
    format!("{}${}.{}", sign, grouped, decimal_part)
}
