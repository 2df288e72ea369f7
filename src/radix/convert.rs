use super::{Alphabet, DIGITS, MAX_BASE, MIN_BASE};
use crate::base_common::alphabet;
use std::{error, fmt};

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Error {
    InvalidBase { base: u32 },
    InvalidDigit { character: char, index: usize },
}

impl error::Error for Error {}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidBase { base } => write!(f, "Invalid base {} (expecting {} to {})", base, MIN_BASE, MAX_BASE),
            Error::InvalidDigit { character, index } => write!(f, "Invalid digit '{}' at index {}", character, index),
        }
    }
}

impl From<alphabet::DecodeError> for Error {
    fn from(error: alphabet::DecodeError) -> Self {
        match error {
            alphabet::DecodeError::InvalidCharacter { character, index } => Error::InvalidDigit { character, index },
        }
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct Base(u32);

impl Base {
    pub const fn new(base: u32) -> Result<Self, Error> {
        if base < MIN_BASE || base > MAX_BASE {
            return Err(Error::InvalidBase { base });
        }
        Ok(Self(base))
    }

    pub const fn value(&self) -> u32 {
        self.0
    }
}

pub struct Converter<'a> {
    alphabet: &'a Alphabet<62>,
}

impl<'a> Converter<'a> {
    pub const fn new(alphabet: &'a Alphabet<62>) -> Self {
        Self { alphabet }
    }

    fn digit(&self, character: char, index: usize, base: Base) -> Result<u8, Error> {
        let value = self.alphabet.decode(character, index)?;
        if u32::from(value) >= base.value() {
            return Err(Error::InvalidDigit { character, index });
        }
        Ok(value)
    }

    /// Rewrites `source`, a big-endian numeral in base `from`, as a numeral in
    /// base `to`. Leading zeros are dropped and an empty numeral reads as zero.
    pub fn convert(&self, source: &str, from: Base, to: Base) -> Result<String, Error> {
        let mut number = source
            .chars()
            .enumerate()
            .map(|(index, character)| self.digit(character, index, from))
            .collect::<Result<Vec<u8>, Error>>()?;

        let from = from.value() as usize;
        let to = to.value() as usize;
        let mut output = Vec::new();
        let mut length = number.len();

        // Each pass divides the numeral by `to` in place; the quotient is
        // written over the front of `number` and the remainder is the next
        // output digit, least significant first.
        loop {
            let mut remainder = 0;
            let mut quotient_length = 0;
            for index in 0..length {
                remainder = remainder * from + number[index] as usize;
                if remainder >= to {
                    number[quotient_length] = (remainder / to) as u8;
                    quotient_length += 1;
                    remainder %= to;
                } else if quotient_length > 0 {
                    number[quotient_length] = 0;
                    quotient_length += 1;
                }
            }
            output.push(self.alphabet.encode(remainder));
            length = quotient_length;
            if length == 0 {
                break;
            }
        }

        Ok(output.into_iter().rev().collect())
    }

    pub fn default() -> &'static Self {
        &CONVERTER
    }
}

const CONVERTER: Converter = Converter::new(&DIGITS);

pub fn convert(source: &str, from: u32, to: u32) -> Result<String, Error> {
    Converter::default().convert(source, Base::new(from)?, Base::new(to)?)
}
