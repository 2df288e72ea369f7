use std::{error, fmt};

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Error {
    InvalidHexCharacter { character: char, index: usize },
    OddLength,
}

impl error::Error for Error {}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Error::InvalidHexCharacter { character, index } => {
                write!(f, "Invalid character {:?} at position {}", character, index)
            }
            Error::OddLength => write!(f, "Odd number of digits"),
        }
    }
}

const TABLE: &[u8; 16] = b"0123456789abcdef";

pub const fn value(character: u8, index: usize) -> Result<u8, Error> {
    match character {
        b'A'..=b'F' => Ok(character - b'A' + 10),
        b'a'..=b'f' => Ok(character - b'a' + 10),
        b'0'..=b'9' => Ok(character - b'0'),
        _ => Err(Error::InvalidHexCharacter {
            character: character as char,
            index,
        }),
    }
}

/// Reads the byte spelled by the two hex digits `high` and `low`, where `high`
/// sits at `index` in the surrounding input.
pub const fn decode_pair(high: u8, low: u8, index: usize) -> Result<u8, Error> {
    let high = match value(high, index) {
        Ok(high) => high,
        Err(error) => return Err(error),
    };
    let low = match value(low, index + 1) {
        Ok(low) => low,
        Err(error) => return Err(error),
    };
    Ok(high << 4 | low)
}

/// Appends `byte` as exactly two lowercase hex digits.
pub fn push_byte(output: &mut String, byte: u8) {
    output.push(TABLE[(byte >> 4) as usize] as char);
    output.push(TABLE[(byte & 0x0F) as usize] as char);
}

pub fn decode(input: impl AsRef<[u8]>) -> Result<Vec<u8>, Error> {
    let input = input.as_ref();
    if input.len() % 2 != 0 {
        return Err(Error::OddLength);
    }
    input
        .chunks(2)
        .enumerate()
        .map(|(i, pair)| decode_pair(pair[0], pair[1], 2 * i))
        .collect()
}

pub fn encode(input: impl AsRef<[u8]>) -> String {
    let input = input.as_ref();
    let mut output = String::with_capacity(input.len() * 2);
    for &byte in input {
        push_byte(&mut output, byte);
    }
    output
}

#[cfg(test)]
mod tests {
    use super::Error;

    #[test]
    fn encode() {
        let output = super::encode(b"Hello world");
        assert_eq!(output, "48656c6c6f20776f726c64");
        assert_eq!(super::encode([0x00, 0x0f, 0xff]), "000fff");
    }

    #[test]
    fn decode() {
        let output = super::decode("48656C6c6f20776f726c64");
        assert_eq!(output, Ok(vec![0x48, 0x65, 0x6c, 0x6c, 0x6f, 0x20, 0x77, 0x6f, 0x72, 0x6c, 0x64]));
        assert_eq!(super::decode("abc"), Err(Error::OddLength));
        assert_eq!(
            super::decode("0g"),
            Err(Error::InvalidHexCharacter { character: 'g', index: 1 })
        );
    }

    #[test]
    fn push_byte() {
        let mut output = String::from("%");
        super::push_byte(&mut output, 0x0a);
        assert_eq!(output, "%0a");
    }
}
