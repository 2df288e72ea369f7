use std::{borrow::Cow, error, fmt};

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Error {
    EmptyPath,
}

impl error::Error for Error {}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::EmptyPath => write!(f, "Empty path"),
        }
    }
}

/// `&` is replaced first so the other entities are not escaped twice.
pub fn encode_xml(text: &str) -> String {
    text.replace('&', "&amp;").replace('<', "&lt;").replace('>', "&gt;")
}

/// Quotes `text`, escaping backslashes and quotes. Carriage returns are
/// dropped and line feeds become `\n`; other control characters are kept.
pub fn encode_json(text: &str) -> String {
    let mut output = String::with_capacity(text.len() + 2);
    output.push('"');
    for character in text.chars() {
        match character {
            '\\' => output.push_str("\\\\"),
            '"' => output.push_str("\\\""),
            '\r' => {}
            '\n' => output.push_str("\\n"),
            _ => output.push(character),
        }
    }
    output.push('"');
    output
}

pub fn split_on_first<'a>(text: &'a str, needle: &str) -> (&'a str, Option<&'a str>) {
    match text.split_once(needle) {
        Some((head, tail)) => (head, Some(tail)),
        None => (text, None),
    }
}

pub fn with_trailing_slash(path: &str) -> Result<Cow<'_, str>, Error> {
    if path.is_empty() {
        return Err(Error::EmptyPath);
    }
    if path.ends_with('/') {
        Ok(Cow::Borrowed(path))
    } else {
        Ok(Cow::Owned(format!("{}/", path)))
    }
}
