use crate::escape_common;
use std::{borrow::Cow, collections::HashSet};

pub use crate::escape_common::Error;

const INTRODUCER: char = '%';

/// Characters chosen for escaping by one call. The escape introducer `%` is
/// always a member once any other character is, so that `unescape`, which
/// decodes every triplet, inverts `escape`.
#[derive(Clone, Debug, Default)]
pub struct Charset {
    characters: HashSet<char>,
}

impl Charset {
    pub fn new(characters: &[char]) -> Self {
        let mut characters: HashSet<char> = characters.iter().copied().collect();
        if !characters.is_empty() {
            characters.insert(INTRODUCER);
        }
        Self { characters }
    }

    pub fn contains(&self, character: char) -> bool {
        self.characters.contains(&character)
    }

    pub fn is_empty(&self) -> bool {
        self.characters.is_empty()
    }
}

pub fn escape<'a>(text: &'a str, charset: &[char]) -> Cow<'a, str> {
    let charset = Charset::new(charset);
    if charset.is_empty() || !text.chars().any(|character| charset.contains(character)) {
        return Cow::Borrowed(text);
    }
    let mut output = String::with_capacity(text.len() * 2);
    for character in text.chars() {
        if charset.contains(character) {
            escape_common::push_escaped(&mut output, character);
        } else {
            output.push(character);
        }
    }
    Cow::Owned(output)
}

/// Decodes every `%xy` triplet, whether or not the character it spells is in
/// `charset`. An empty `charset` leaves `text` untouched.
pub fn unescape<'a>(text: &'a str, charset: &[char]) -> Result<Cow<'a, str>, Error> {
    if charset.is_empty() || !text.contains(INTRODUCER) {
        return Ok(Cow::Borrowed(text));
    }
    escape_common::unescape(text, false).map(Cow::Owned)
}
