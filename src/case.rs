use unicode_general_category::{get_general_category, GeneralCategory};

/// True when the first character is an uppercase letter (category Lu).
pub fn is_first_char_upper(text: &str) -> bool {
    text.chars()
        .next()
        .map_or(false, |character| get_general_category(character) == GeneralCategory::UppercaseLetter)
}

/// True when the first character is a lowercase letter (category Ll).
pub fn is_first_char_lower(text: &str) -> bool {
    text.chars()
        .next()
        .map_or(false, |character| get_general_category(character) == GeneralCategory::LowercaseLetter)
}

/// The single character `mapping` turns `character` into, if it maps to
/// exactly one character other than itself. `ß` (uppercase `SS`) and `ϒ` (no
/// lowercase) have no such mapping.
fn single_mapping<I: Iterator<Item = char>>(character: char, mapping: impl FnOnce(char) -> I) -> Option<char> {
    let mut mapped = mapping(character);
    match (mapped.next(), mapped.next()) {
        (Some(single), None) if single != character => Some(single),
        _ => None,
    }
}

fn replace_first<I: Iterator<Item = char>>(text: &str, mapping: impl FnOnce(char) -> I) -> Option<String> {
    let mut chars = text.chars();
    let first = single_mapping(chars.next()?, mapping)?;
    let mut output = String::with_capacity(text.len());
    output.push(first);
    output.push_str(chars.as_str());
    Some(output)
}

/// `None` unless the first character is an uppercase letter with a one to one
/// lowercase mapping.
pub fn first_char_to_lower(text: &str) -> Option<String> {
    if !is_first_char_upper(text) {
        return None;
    }
    replace_first(text, char::to_lowercase)
}

/// `None` unless the first character is a lowercase letter with a one to one
/// uppercase mapping.
pub fn first_char_to_upper(text: &str) -> Option<String> {
    if !is_first_char_lower(text) {
        return None;
    }
    replace_first(text, char::to_uppercase)
}

/// `None` when the first character has no case, such as a digit or a symbol.
pub fn toggle_first_char(text: &str) -> Option<String> {
    first_char_to_lower(text).or_else(|| first_char_to_upper(text))
}

#[cfg(test)]
mod tests {
    #[test]
    fn first_char_to_lower() {
        assert_eq!(super::first_char_to_lower("Hello"), Some("hello".to_string()));
        assert_eq!(super::first_char_to_lower("HELLO"), Some("hELLO".to_string()));
        assert_eq!(super::first_char_to_lower("Élan"), Some("élan".to_string()));
        assert_eq!(super::first_char_to_lower("hello"), None);
        assert_eq!(super::first_char_to_lower(""), None);
    }

    #[test]
    fn first_char_to_upper() {
        assert_eq!(super::first_char_to_upper("propertyOne"), Some("PropertyOne".to_string()));
        assert_eq!(super::first_char_to_upper("PropertyOne"), None);
        assert_eq!(super::first_char_to_upper("_x"), None);
    }

    #[test]
    fn first_char_not_a_cased_letter() {
        assert_eq!(super::first_char_to_upper("ªb"), None);
        assert_eq!(super::first_char_to_lower("Ⅷx"), None);
        assert_eq!(super::toggle_first_char("Ⅷx"), None);
        assert_eq!(super::toggle_first_char("ʰa"), None);
        assert_eq!(super::first_char_to_upper("ßig"), None);
        assert_eq!(super::toggle_first_char("ßig"), None);
        assert_eq!(super::first_char_to_lower("ϒx"), None);
        assert!(!super::is_first_char_upper("Ⅷ"));
        assert!(!super::is_first_char_lower("ª"));
    }

    #[test]
    fn toggle_first_char() {
        assert_eq!(super::toggle_first_char("AppleJacks"), Some("appleJacks".to_string()));
        assert_eq!(super::toggle_first_char("appleJacks"), Some("AppleJacks".to_string()));
        assert_eq!(super::toggle_first_char("9abc"), None);
        assert_eq!(super::toggle_first_char(" a"), None);
        assert_eq!(super::toggle_first_char(""), None);
    }

    #[test]
    fn is_first_char_upper() {
        assert!(super::is_first_char_upper("A"));
        assert!(!super::is_first_char_upper("a"));
        assert!(!super::is_first_char_upper(""));
        assert!(super::is_first_char_lower("a"));
        assert!(!super::is_first_char_lower("1"));
    }
}
