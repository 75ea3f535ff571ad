//! Pure field coercions applied when a raw extraction becomes a canonical
//! record.
//!
//! None of these functions perform I/O or return errors: text that cannot be
//! interpreted coerces to a default value. Swallowing malformed numeric input
//! into `0.0` is the documented policy for scraped price and rating text, not
//! a bug.

/// Trims `value` and substitutes a per-field placeholder when the result is
/// empty, so no string field is ever stored blank.
#[must_use]
pub fn clean_string(name: &str, value: &str) -> String {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        format!("No {name} provided")
    } else {
        trimmed.to_string()
    }
}

/// Coerces price text like `"$1,299.00"` into a float.
///
/// Every character that is not an ASCII digit or `.` is stripped before
/// parsing, so currency symbols and thousands separators never interfere.
/// Text with no usable numeric content (`"Free"`, `""`) coerces to `0.0`.
/// Idempotent on its own output: re-parsing the decimal form of the result
/// yields the same float.
#[must_use]
pub fn parse_price(raw: &str) -> f64 {
    let cleaned: String = raw
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.')
        .collect();
    cleaned.parse().unwrap_or(0.0)
}

/// Clamps a parsed star rating into the valid `0.0..=5.0` range.
///
/// Non-finite input (possible when rating text parses to `inf`/`NaN`)
/// coerces to `0.0` like any other unusable rating.
#[must_use]
pub fn clamp_rating(raw: f64) -> f64 {
    if raw.is_nan() {
        return 0.0;
    }
    raw.clamp(0.0, 5.0)
}
