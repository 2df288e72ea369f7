use std::{error, fmt};

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Error {
    DuplicateCharacter { character: char, first: usize, second: usize },
    NonAsciiCharacter { character: u8, index: usize },
    TooLarge { len: usize },
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum DecodeError {
    InvalidCharacter { character: char, index: usize },
}

impl error::Error for Error {}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DuplicateCharacter { character, first, second } => {
                write!(f, "Duplicate character '{}' at indexes {} and {}", character, first, second)
            }
            Self::NonAsciiCharacter { character, index } => write!(f, "Non-ascii character {:#04x} at index {}", character, index),
            Self::TooLarge { len } => write!(f, "Alphabet of {} characters exceeds 128", len),
        }
    }
}

impl error::Error for DecodeError {}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidCharacter { character, index } => write!(f, "Invalid character '{}' at index {}", character, index),
        }
    }
}

/// Ordered ASCII symbol table. A symbol's position is its value; the reverse
/// table is built alongside it and never changes afterwards.
pub struct Alphabet<const N: usize> {
    encode: [u8; N],
    decode: [Option<u8>; 128],
}

impl<const N: usize> Alphabet<N> {
    pub const fn new(characters: &[u8; N]) -> Result<Self, Error> {
        if N > 128 {
            return Err(Error::TooLarge { len: N });
        }
        let mut encode = [0u8; N];
        let mut decode: [Option<u8>; 128] = [None; 128];

        let mut index = 0;
        while index < N {
            let character = characters[index];
            if character >= 128 {
                return Err(Error::NonAsciiCharacter { index, character });
            }
            if let Some(first) = decode[character as usize] {
                return Err(Error::DuplicateCharacter {
                    character: character as char,
                    first: first as usize,
                    second: index,
                });
            }
            encode[index] = character;
            decode[character as usize] = Some(index as u8);
            index += 1;
        }

        Ok(Self { encode, decode })
    }

    pub fn encode(&self, value: usize) -> char {
        self.encode[value] as char
    }

    pub fn decode(&self, character: char, index: usize) -> Result<u8, DecodeError> {
        let value = if character.is_ascii() { self.decode[character as usize] } else { None };
        value.ok_or(DecodeError::InvalidCharacter { character, index })
    }

    pub const fn len(&self) -> usize {
        N
    }
}

#[cfg(test)]
mod tests {
    use super::{Alphabet, DecodeError, Error};

    #[test]
    fn new() {
        assert!(Alphabet::new(b"abc").is_ok());
        assert_eq!(
            Alphabet::new(b"abca").err(),
            Some(Error::DuplicateCharacter {
                character: 'a',
                first: 0,
                second: 3
            })
        );
        assert_eq!(
            Alphabet::new(&[b'a', 0xc3]).err(),
            Some(Error::NonAsciiCharacter { character: 0xc3, index: 1 })
        );
    }

    #[test]
    fn decode() {
        let alphabet = match Alphabet::new(b"xyz") {
            Ok(alphabet) => alphabet,
            Err(error) => panic!("{}", error),
        };
        assert_eq!(alphabet.decode('z', 0), Ok(2));
        assert_eq!(alphabet.decode('a', 4), Err(DecodeError::InvalidCharacter { character: 'a', index: 4 }));
        assert_eq!(alphabet.decode('é', 1), Err(DecodeError::InvalidCharacter { character: 'é', index: 1 }));
        assert_eq!(alphabet.encode(1), 'y');
        assert_eq!(alphabet.len(), 3);
    }
}
