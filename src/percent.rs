//! Url-style escaping over a deliberately narrow pass-through class: ascii
//! letters, ascii digits, `-` and `.`. Everything else, `_` and `~` included,
//! is written as `%xy` triplets of its utf8 bytes. This is not RFC 3986.

use crate::escape_common;
use regex::Regex;
use std::{borrow::Cow, error, fmt, sync::OnceLock};

pub use crate::escape_common::Error;

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum FormatError {
    MissingComponent { index: usize },
    UnbalancedBrace { index: usize },
}

impl error::Error for FormatError {}

impl fmt::Display for FormatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormatError::MissingComponent { index } => write!(f, "Missing component {}", index),
            FormatError::UnbalancedBrace { index } => write!(f, "Unbalanced brace at byte {}", index),
        }
    }
}

pub fn is_unreserved(character: char) -> bool {
    matches!(character, 'A'..='Z' | 'a'..='z' | '0'..='9' | '-' | '.')
}

pub fn encode(text: &str) -> Cow<'_, str> {
    if text.chars().all(is_unreserved) {
        return Cow::Borrowed(text);
    }
    let mut output = String::with_capacity(text.len() * 3);
    for character in text.chars() {
        if is_unreserved(character) {
            output.push(character);
        } else {
            escape_common::push_escaped(&mut output, character);
        }
    }
    Cow::Owned(output)
}

/// Empty input has nothing to decode and is reported as `AbsentInput`.
pub fn decode(text: &str) -> Result<String, Error> {
    if text.is_empty() {
        return Err(Error::AbsentInput);
    }
    escape_common::unescape(text, true)
}

const PLACEHOLDER_PATTERN: &str = r"\{\{|\}\}|\{([0-9]{1,9})\}|[\{\}]";

fn placeholder() -> &'static Regex {
    static PLACEHOLDER: OnceLock<Regex> = OnceLock::new();
    // The pattern is a fixed literal, compiled by the `placeholder_pattern`
    // test, so building it cannot fail at run time.
    PLACEHOLDER.get_or_init(|| Regex::new(PLACEHOLDER_PATTERN).expect("placeholder pattern"))
}

/// Substitutes `{0}`, `{1}`, ... in `template` with the encoded component at
/// that position. `{{` and `}}` stand for literal braces.
pub fn format<S: AsRef<str>>(template: &str, components: &[S]) -> Result<String, FormatError> {
    let mut output = String::with_capacity(template.len());
    let mut offset = 0;
    for captures in placeholder().captures_iter(template) {
        let Some(token) = captures.get(0) else { continue };
        output.push_str(&template[offset..token.start()]);
        offset = token.end();
        match (token.as_str(), captures.get(1)) {
            ("{{", _) => output.push('{'),
            ("}}", _) => output.push('}'),
            (_, Some(position)) => {
                let index: usize = position
                    .as_str()
                    .parse()
                    .map_err(|_| FormatError::UnbalancedBrace { index: token.start() })?;
                let component = components.get(index).ok_or(FormatError::MissingComponent { index })?;
                output.push_str(&encode(component.as_ref()));
            }
            _ => return Err(FormatError::UnbalancedBrace { index: token.start() }),
        }
    }
    output.push_str(&template[offset..]);
    Ok(output)
}
