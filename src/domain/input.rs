//! Input masks for the card entry fields.
//!
//! The masks silently reformat or truncate malformed input; they never
//! reject it. Strict shape checks live on `PaymentInstrument::validate`.

/// Formats raw card-number keystrokes into blocks of four digits separated
/// by single spaces, capped at 16 digits (19 characters with spaces).
///
/// If fewer than four digits can be extracted the raw input is returned
/// unchanged. That is a defined edge case of the mask, not an error: the
/// field shows whatever was typed until a groupable run of digits exists.
pub fn mask_card_number(raw: &str) -> String {
    let digits: String = raw.chars().filter(char::is_ascii_digit).take(16).collect();
    if digits.len() < 4 {
        return raw.to_string();
    }
    digits
        .as_bytes()
        .chunks(4)
        .map(|chunk| std::str::from_utf8(chunk).unwrap_or_default())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Formats raw expiry keystrokes as an MM/YY mask: digits only, a `/`
/// inserted once a third digit arrives, truncated to four digits total.
/// Month range and expiry-in-future are deliberately not checked here.
pub fn mask_expiry(raw: &str) -> String {
    let digits: String = raw.chars().filter(char::is_ascii_digit).take(4).collect();
    if digits.len() > 2 {
        format!("{}/{}", &digits[..2], &digits[2..])
    } else {
        digits
    }
}

/// Keeps at most four digits of raw CVV keystrokes.
pub fn mask_cvv(raw: &str) -> String {
    raw.chars().filter(char::is_ascii_digit).take(4).collect()
}
