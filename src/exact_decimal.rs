//! Exact decimal expansion of a binary double, without exponent notation.
//!
//! A finite double is `mantissa * 2^exponent`. For negative exponents this is
//! `mantissa * 5^-exponent / 10^-exponent`, so the digits come from repeated
//! multiplication of a decimal digit array and the point is placed by counting.

const MANTISSA_BITS: u32 = 52;
const EXPONENT_BIAS: i32 = 1075;

// Largest powers that keep `digit * factor + carry` within a u64.
const TWO_CHUNK: (u32, u32) = (1 << 30, 30);
const FIVE_CHUNK: (u32, u32) = (1_220_703_125, 13);

/// Little-endian decimal digits.
struct Digits(Vec<u8>);

impl Digits {
    fn new(mut value: u64) -> Self {
        let mut digits = Vec::new();
        while value > 0 {
            digits.push((value % 10) as u8);
            value /= 10;
        }
        Self(digits)
    }

    fn multiply(&mut self, factor: u32) {
        let mut carry = 0u64;
        for digit in &mut self.0 {
            carry += u64::from(*digit) * u64::from(factor);
            *digit = (carry % 10) as u8;
            carry /= 10;
        }
        while carry > 0 {
            self.0.push((carry % 10) as u8);
            carry /= 10;
        }
    }

    fn multiply_power(&mut self, base: u32, mut power: u32, (chunk, chunk_power): (u32, u32)) {
        while power >= chunk_power {
            self.multiply(chunk);
            power -= chunk_power;
        }
        if power > 0 {
            self.multiply(base.pow(power));
        }
    }

    fn into_string(self) -> String {
        self.0.iter().rev().map(|&digit| char::from(b'0' + digit)).collect()
    }
}

pub fn expand(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        let text = if value > 0.0 { "Infinity" } else { "-Infinity" };
        return text.to_string();
    }

    let bits = value.to_bits();
    let negative = bits >> 63 == 1;
    let biased_exponent = ((bits >> MANTISSA_BITS) & 0x7ff) as i32;
    let mut mantissa = bits & ((1 << MANTISSA_BITS) - 1);
    let mut exponent = if biased_exponent == 0 {
        1 - EXPONENT_BIAS
    } else {
        mantissa |= 1 << MANTISSA_BITS;
        biased_exponent - EXPONENT_BIAS
    };

    if mantissa == 0 {
        return "0".to_string();
    }
    while mantissa % 2 == 0 && exponent < 0 {
        mantissa >>= 1;
        exponent += 1;
    }

    let mut digits = Digits::new(mantissa);
    let scale = if exponent >= 0 {
        digits.multiply_power(2, exponent as u32, TWO_CHUNK);
        0
    } else {
        digits.multiply_power(5, exponent.unsigned_abs(), FIVE_CHUNK);
        exponent.unsigned_abs() as usize
    };

    let mut text = digits.into_string();
    if scale > 0 {
        if text.len() <= scale {
            text.insert_str(0, &"0".repeat(scale + 1 - text.len()));
        }
        text.insert(text.len() - scale, '.');
    }
    if negative {
        text.insert(0, '-');
    }
    text
}
