fn rotate(character: char) -> char {
    match character {
        'a'..='m' | 'A'..='M' => (character as u8 + 13) as char,
        'n'..='z' | 'N'..='Z' => (character as u8 - 13) as char,
        _ => character,
    }
}

/// Shifts ascii letters 13 places within their case. Applying it twice gives
/// back the input.
pub fn rot13(text: &str) -> String {
    text.chars().map(rotate).collect()
}
