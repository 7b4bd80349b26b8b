use crate::config::{LOCAL_PHONE_DIGITS, TUNISIA_DIAL_CODE};

/// Best-effort reformatting of a phone number into international form.
///
/// Keeps a single leading `+` and strips every other non-digit. A number
/// without `+` that has exactly eight digits is treated as a local Tunisian
/// number and gets the `+216` prefix. This is not E.164 validation.
pub fn normalize_phone(input: &str) -> String {
    let trimmed = input.trim();
    let digits: String = trimmed.chars().filter(char::is_ascii_digit).collect();

    if trimmed.starts_with('+') {
        format!("+{}", digits)
    } else if digits.len() == LOCAL_PHONE_DIGITS {
        format!("{}{}", TUNISIA_DIAL_CODE, digits)
    } else {
        digits
    }
}
