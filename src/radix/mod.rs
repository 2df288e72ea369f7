pub mod convert;

pub use crate::base_common::Alphabet;
pub use convert::{convert, Base, Converter, Error};

pub const MIN_BASE: u32 = 2;
pub const MAX_BASE: u32 = 62;

pub const DIGITS: Alphabet<62> = match Alphabet::new(b"0123456789abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ") {
    Ok(alphabet) => alphabet,
    Err(_) => panic!("Could not build alphabet"),
};
