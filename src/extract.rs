use crate::dom::SlotSource;

/// Normalized (trimmed, lower-cased) text of the named region, or an empty
/// string when the card has no such region.
pub fn read_slot<S: SlotSource + ?Sized>(el: &S, name: &str) -> String {
    el.slot_text(name)
        .map(|raw| raw.trim().to_lowercase())
        .unwrap_or_default()
}

/// Like [`read_slot`], with the transform applied to the normalized text
pub fn read_slot_with<S, T, F>(el: &S, name: &str, transform: F) -> T
where
    S: SlotSource + ?Sized,
    F: FnOnce(&str) -> T,
{
    transform(&read_slot(el, name))
}

/// Minutes from free text such as "about 15 min": the first run of digits,
/// or 0 when there is none.
pub fn parse_minutes(text: &str) -> u32 {
    let digits: String = text
        .chars()
        .skip_while(|c| !c.is_ascii_digit())
        .take_while(|c| c.is_ascii_digit())
        .collect();

    if digits.is_empty() {
        return 0;
    }
    // A digit run always parses; it can only overflow
    digits.parse().unwrap_or(u32::MAX)
}

/// Numeric coercion of region text. Blank text is 0, anything that is not a
/// number is NaN.
pub fn parse_number(text: &str) -> f64 {
    let text = text.trim();
    if text.is_empty() {
        return 0.0;
    }

    let radix = [("0x", 16), ("0o", 8), ("0b", 2)]
        .into_iter()
        .find_map(|(prefix, radix)| {
            text.get(..2)
                .filter(|head| head.eq_ignore_ascii_case(prefix))
                .map(|_| (&text[2..], radix))
        });
    if let Some((digits, radix)) = radix {
        // from_str_radix tolerates a sign, a radix literal does not
        if digits.starts_with(['+', '-']) {
            return f64::NAN;
        }
        return u64::from_str_radix(digits, radix)
            .map(|n| n as f64)
            .unwrap_or(f64::NAN);
    }

    // Rust also accepts "inf" and "nan", which are not numbers here
    let unsigned = text.trim_start_matches(['+', '-']);
    if unsigned.starts_with(|c: char| c.is_ascii_alphabetic()) {
        return f64::NAN;
    }
    text.parse().unwrap_or(f64::NAN)
}

/// Comma separated tags, trimmed, empty fragments dropped
pub fn split_tags(text: &str) -> Vec<String> {
    text.split(',')
        .map(str::trim)
        .filter(|tag| !tag.is_empty())
        .map(str::to_string)
        .collect()
}

/// Upper-cases the first character
pub fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
