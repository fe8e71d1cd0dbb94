/// Decimal digits a double carries reliably (C's `DBL_DIG`).
const DOUBLE_DIGITS: usize = 15;

/// Renders `value` with exactly `places` fraction digits, dropping the rest
/// instead of rounding it.
///
/// The value is first printed with 15 fraction digits and then cut, so
/// binary representation noise doesn't leak through: `2.05` stays `2.05`
/// even though the closest double is slightly below it.
pub fn to_trunc_fixed(value: f64, places: usize) -> String {
    if !value.is_finite() {
        return format!("{}", value);
    }

    let full = format!("{:.prec$}", value, prec = DOUBLE_DIGITS);
    match full.find('.') {
        Some(position) => {
            let end = if places == 0 {
                position
            } else {
                position + 1 + places.min(DOUBLE_DIGITS)
            };
            let cut = &full[..end];
            match cut.parse::<f64>() {
                // the 15 digit print rounded up across a digit boundary
                Ok(shown) if shown.abs() > value.abs() => {
                    let scale = 10f64.powi(places.min(DOUBLE_DIGITS) as i32);
                    format!("{:.prec$}", (value * scale).trunc() / scale, prec = places)
                }
                _ => cut.to_string(),
            }
        }
        None => full,
    }
}

/// Inserts `separator` between groups of three digits.
pub fn group_thousands(value: i64, separator: &str) -> String {
    let digits = value.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 * separator.len());
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push_str(separator);
        }
        grouped.push(ch);
    }

    if value < 0 {
        format!("-{}", grouped)
    } else {
        grouped
    }
}
