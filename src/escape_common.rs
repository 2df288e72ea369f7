use crate::hex;
use std::{error, fmt};

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Error {
    MalformedEscape { index: usize },
    AbsentInput,
    InvalidUtf8 { index: usize },
}

impl error::Error for Error {}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::MalformedEscape { index } => write!(f, "Expecting two hex digits after '%' at byte {}", index),
            Error::AbsentInput => write!(f, "No input"),
            Error::InvalidUtf8 { index } => write!(f, "Invalid utf8 sequence starting at byte {}", index),
        }
    }
}

/// Writes every utf8 byte of `character` as a `%xy` triplet.
pub fn push_escaped(output: &mut String, character: char) {
    let mut buffer = [0u8; 4];
    for &byte in character.encode_utf8(&mut buffer).as_bytes() {
        output.push('%');
        hex::push_byte(output, byte);
    }
}

/// Replaces every `%xy` triplet in `input` by the byte it spells, and `+` by a
/// space when `plus_as_space` is set. The resulting bytes must be utf8; an
/// invalid sequence is reported at the input byte that produced its first byte.
pub fn unescape(input: &str, plus_as_space: bool) -> Result<String, Error> {
    let input = input.as_bytes();
    let mut output = Vec::with_capacity(input.len());
    // Input byte index behind every output byte.
    let mut sources = Vec::with_capacity(input.len());
    let mut index = 0;
    while index < input.len() {
        match input[index] {
            b'+' if plus_as_space => {
                output.push(b' ');
                sources.push(index);
                index += 1;
            }
            b'%' => {
                let byte = match input.get(index + 1..index + 3) {
                    Some(&[high, low]) => hex::decode_pair(high, low, index + 1).map_err(|_| Error::MalformedEscape { index })?,
                    _ => return Err(Error::MalformedEscape { index }),
                };
                output.push(byte);
                sources.push(index);
                index += 3;
            }
            byte => {
                output.push(byte);
                sources.push(index);
                index += 1;
            }
        }
    }
    String::from_utf8(output).map_err(|error| Error::InvalidUtf8 {
        index: sources[error.utf8_error().valid_up_to()],
    })
}

#[cfg(test)]
mod tests {
    use super::Error;

    #[test]
    fn push_escaped() {
        let mut output = String::new();
        super::push_escaped(&mut output, '\n');
        super::push_escaped(&mut output, 'é');
        super::push_escaped(&mut output, '€');
        assert_eq!(output, "%0a%c3%a9%e2%82%ac");
    }

    #[test]
    fn unescape() {
        assert_eq!(super::unescape("a%20b+c", true), Ok("a b c".to_string()));
        assert_eq!(super::unescape("a%20b+c", false), Ok("a b+c".to_string()));
        assert_eq!(super::unescape("%C3%A9t%c3%a9", false), Ok("été".to_string()));
        assert_eq!(super::unescape("naïve%21", false), Ok("naïve!".to_string()));
        assert_eq!(super::unescape("%", false), Err(Error::MalformedEscape { index: 0 }));
        assert_eq!(super::unescape("ab%2", false), Err(Error::MalformedEscape { index: 2 }));
        assert_eq!(super::unescape("%zz", false), Err(Error::MalformedEscape { index: 0 }));
        assert_eq!(super::unescape("%2%41", false), Err(Error::MalformedEscape { index: 0 }));
        assert_eq!(super::unescape("ok%e9", false), Err(Error::InvalidUtf8 { index: 2 }));
        assert_eq!(super::unescape("%41%41%e9", false), Err(Error::InvalidUtf8 { index: 6 }));
        assert_eq!(super::unescape("é%c3+x", true), Err(Error::InvalidUtf8 { index: 2 }));
    }
}
