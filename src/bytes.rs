use crate::exact_decimal;

pub fn to_bytes(text: &str) -> Vec<u8> {
    text.as_bytes().to_vec()
}

/// Invalid utf8 sequences decode to U+FFFD. No bytes decode to no string.
pub fn from_bytes(bytes: Option<&[u8]>) -> Option<String> {
    bytes.map(|bytes| String::from_utf8_lossy(bytes).into_owned())
}

/// Keeps the low eight bits of every character. The caller guarantees that
/// `text` is ascii (the rendering of a number), where those bits are exactly
/// the utf8 encoding; any other character is silently truncated.
pub fn fast_numeric_to_bytes(text: &str) -> Vec<u8> {
    debug_assert!(text.is_ascii(), "non-ascii numeric text {:?}", text);
    text.chars().map(|character| character as u8).collect()
}

pub fn int_to_bytes(value: i32) -> Vec<u8> {
    fast_numeric_to_bytes(&value.to_string())
}

pub fn long_to_bytes(value: i64) -> Vec<u8> {
    fast_numeric_to_bytes(&value.to_string())
}

/// Shortest text that reads back as `value`, with a whole number printed
/// without its fractional part. Very large and very small magnitudes come out
/// in exponent notation.
fn format_double(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        let text = if value > 0.0 { "Infinity" } else { "-Infinity" };
        return text.to_string();
    }
    let text = format!("{:?}", value);
    match text.strip_suffix(".0") {
        Some(whole) => whole.to_string(),
        None => text,
    }
}

/// Exponent notation is never written: such values are expanded exactly.
pub fn double_to_bytes(value: f64) -> Vec<u8> {
    let text = format_double(value);
    let text = if text.contains(['e', 'E']) { exact_decimal::expand(value) } else { text };
    fast_numeric_to_bytes(&text)
}
