//! Indian-convention currency rendering.
//!
//! Digit grouping follows the Indian numbering system: the last three digits
//! of the integer part form one group, every group to the left is a pair.
//! Large amounts are additionally scaled to lakh/crore units with floor
//! truncation (never rounding) to two decimal places.

use crate::ValidationError;

const RUPEE: &str = "\u{20B9}";

const LAKH: f64 = 1e5;
const CRORE: f64 = 1e7;

/// Render an amount with the rupee glyph and Indian digit grouping.
///
/// Whole amounts render without a decimal part; any fractional digits are
/// preserved verbatim after the decimal point. Negative and non-finite
/// amounts are out of domain and fail fast.
pub fn format_amount(amount: f64) -> Result<String, ValidationError> {
    validate_amount(amount)?;

    let text = format!("{amount}");
    let (integer, fraction) = match text.split_once('.') {
        Some((integer, fraction)) => (integer, Some(fraction)),
        None => (text.as_str(), None),
    };

    let mut out = String::from(RUPEE);
    out.push_str(&group_indian(integer));
    if let Some(fraction) = fraction {
        out.push('.');
        out.push_str(fraction);
    }

    Ok(out)
}

/// Render an amount scaled to lakh/crore magnitude for compact display.
///
/// Amounts below one lakh pass through [`format_amount`] unchanged. Larger
/// amounts are scaled (`amount / 1e7 * 100` for lakh, `amount / 1e7` for
/// crore), floor-truncated to two decimals, and suffixed with `" L"` or
/// `" Cr"`. Truncated scale values always keep at least one decimal digit.
pub fn format_cash(amount: f64) -> Result<String, ValidationError> {
    validate_amount(amount)?;

    if amount < LAKH {
        return format_amount(amount);
    }

    if amount < CRORE {
        let scaled = truncate_two_places(amount / CRORE * 100.0);
        return Ok(format!("{} L", format_amount_str(&scaled)));
    }

    let scaled = truncate_two_places(amount / CRORE);
    Ok(format!("{} Cr", format_amount_str(&scaled)))
}

fn validate_amount(amount: f64) -> Result<(), ValidationError> {
    if !amount.is_finite() {
        return Err(ValidationError::NonFiniteAmount);
    }
    if amount < 0.0 {
        return Err(ValidationError::NegativeAmount);
    }
    Ok(())
}

/// Floor-truncate to two decimal places and render with minimal decimals,
/// keeping at least one. `15.0 -> "15.0"`, `15.20 -> "15.2"`, `10.04999 ->
/// "10.04"`.
fn truncate_two_places(value: f64) -> String {
    let scaled = (value * 100.0).floor() as i64;
    let integer = scaled / 100;
    let fraction = scaled % 100;

    let mut digits = format!("{fraction:02}");
    if digits.ends_with('0') {
        digits.pop();
    }

    format!("{integer}.{digits}")
}

/// Group and prefix a pre-rendered decimal string.
fn format_amount_str(text: &str) -> String {
    let (integer, fraction) = match text.split_once('.') {
        Some((integer, fraction)) => (integer, Some(fraction)),
        None => (text, None),
    };

    let mut out = String::from(RUPEE);
    out.push_str(&group_indian(integer));
    if let Some(fraction) = fraction {
        out.push('.');
        out.push_str(fraction);
    }
    out
}

/// Indian grouping of an integer digit string: rightmost group of three,
/// then pairs moving left.
fn group_indian(digits: &str) -> String {
    let len = digits.len();
    if len <= 3 {
        return digits.to_owned();
    }

    let (head, tail) = digits.split_at(len - 3);
    let mut groups = Vec::new();
    let bytes = head.as_bytes();
    let mut end = bytes.len();
    while end > 2 {
        groups.push(&head[end - 2..end]);
        end -= 2;
    }
    groups.push(&head[..end]);
    groups.reverse();
    groups.push(tail);
    groups.join(",")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn groups_indian_style() {
        assert_eq!(format_amount(100.0).expect("must format"), "₹100");
        assert_eq!(format_amount(1000.0).expect("must format"), "₹1,000");
        assert_eq!(format_amount(100_000.0).expect("must format"), "₹1,00,000");
        assert_eq!(format_amount(1_234_567.0).expect("must format"), "₹12,34,567");
        assert_eq!(
            format_amount(123_456_789.0).expect("must format"),
            "₹12,34,56,789"
        );
    }

    #[test]
    fn preserves_fractional_digits() {
        assert_eq!(format_amount(1234.5).expect("must format"), "₹1,234.5");
        assert_eq!(format_amount(0.25).expect("must format"), "₹0.25");
    }

    #[test]
    fn zero_is_in_domain() {
        assert_eq!(format_amount(0.0).expect("must format"), "₹0");
    }

    #[test]
    fn rejects_out_of_domain_amounts() {
        assert!(matches!(
            format_amount(-1.0),
            Err(ValidationError::NegativeAmount)
        ));
        assert!(matches!(
            format_amount(f64::NAN),
            Err(ValidationError::NonFiniteAmount)
        ));
        assert!(matches!(
            format_cash(f64::INFINITY),
            Err(ValidationError::NonFiniteAmount)
        ));
    }

    #[test]
    fn cash_below_one_lakh_delegates() {
        assert_eq!(
            format_cash(99_999.0).expect("must format"),
            format_amount(99_999.0).expect("must format")
        );
    }

    #[test]
    fn cash_scales_to_lakh() {
        assert_eq!(format_cash(1_500_000.0).expect("must format"), "₹15.0 L");
        assert_eq!(format_cash(100_000.0).expect("must format"), "₹1.0 L");
        assert_eq!(format_cash(9_999_999.0).expect("must format"), "₹99.99 L");
    }

    #[test]
    fn cash_scales_to_crore() {
        assert_eq!(format_cash(20_000_000.0).expect("must format"), "₹2.0 Cr");
        assert_eq!(format_cash(10_000_000.0).expect("must format"), "₹1.0 Cr");
        assert_eq!(
            format_cash(123_456_789.0).expect("must format"),
            "₹12.34 Cr"
        );
    }

    #[test]
    fn truncates_instead_of_rounding() {
        // 1_004_999 / 1e7 * 100 = 10.04999: floor keeps .04, rounding would
        // give .05.
        assert_eq!(format_cash(1_004_999.0).expect("must format"), "₹10.04 L");
        // 1_499_999 scales to 14.99999 -> 14.99, not 15.0.
        assert_eq!(format_cash(1_499_999.0).expect("must format"), "₹14.99 L");
    }

    #[test]
    fn formatting_is_pure() {
        let first = format_amount(1_234_567.0).expect("must format");
        let second = format_amount(1_234_567.0).expect("must format");
        assert_eq!(first, second);
    }
}
