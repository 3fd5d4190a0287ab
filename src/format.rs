//! Canonical hex float text from a float bit pattern.

use std::fmt::{self, Write};

use crate::{UnpackedFloat, Width};

const HEX_DIGITS: &[u8] = b"0123456789abcdef";

/// Formats the low `width.total_bits()` bits of `bits` as a canonical hex float.
///
/// ```
/// use hexfloat::{format_bits, Width};
///
/// assert_eq!(format_bits(6.125_f64.to_bits(), Width::F64), "0x1.88p+2");
/// assert_eq!(format_bits(0x8000_0000, Width::F32), "-0x0p+0");
/// ```
#[must_use]
pub fn format_bits(bits: u64, width: Width) -> String {
    let mut buffer = String::new();
    // Writing into a String cannot fail.
    let _ = write_bits(&mut buffer, bits, width);
    buffer
}

/// Streaming form of [`format_bits`]: writes the canonical text to `sink`.
///
/// The only error returned is one raised by `sink` itself.
pub fn write_bits<W: Write + ?Sized>(sink: &mut W, bits: u64, width: Width) -> fmt::Result {
    let parts = UnpackedFloat::from_bits(bits, width);

    if parts.is_special(width) {
        return write_infinity_or_nan(sink, &parts);
    }

    if parts.negative {
        sink.write_char('-')?;
    }
    if parts.is_zero() {
        return sink.write_str("0x0p+0");
    }

    let (exponent, fraction) = normalize(&parts, width);
    sink.write_str("0x1")?;
    write_fraction(sink, fraction, width)?;
    write_exponent(sink, exponent)
}

fn write_infinity_or_nan<W: Write + ?Sized>(sink: &mut W, parts: &UnpackedFloat) -> fmt::Result {
    match (parts.mantissa, parts.negative) {
        (0, false) => sink.write_str("Infinity"),
        (0, true) => sink.write_str("-Infinity"),
        _ => sink.write_str("NaN"),
    }
}

/// Returns the unbiased exponent and the fraction below an explicit leading one.
///
/// Subnormals have no implicit one; their highest set bit is shifted up to
/// take its place and the exponent lowered to match.
fn normalize(parts: &UnpackedFloat, width: Width) -> (i64, u64) {
    if parts.exponent != 0 {
        return (i64::from(parts.exponent) - width.bias(), parts.mantissa);
    }

    // Leading zeroes within the mantissa field, then one more to shift out
    // the bit that becomes the leading one.
    let leading_zeroes = parts.mantissa.leading_zeros() - (64 - width.mantissa_bits());
    let shift = leading_zeroes + 1;
    let fraction = (parts.mantissa << shift) & width.mantissa_mask();
    (width.min_exponent() - i64::from(shift), fraction)
}

fn write_fraction<W: Write + ?Sized>(sink: &mut W, fraction: u64, width: Width) -> fmt::Result {
    if fraction == 0 {
        return Ok(());
    }

    // Left-align the fraction on a nibble boundary so the top 4 bits are the
    // first hex digit.
    let field_bits = width.fraction_digits() * 4;
    let field_mask = (1_u64 << field_bits) - 1;
    let top_nybble_shift = field_bits - 4;
    let mut fraction = fraction << (field_bits - width.mantissa_bits());

    sink.write_char('.')?;
    while fraction != 0 {
        let nybble = (fraction >> top_nybble_shift) & 0xf;
        sink.write_char(HEX_DIGITS[nybble as usize] as char)?;
        fraction = (fraction << 4) & field_mask;
    }
    Ok(())
}

/// Write the exponent part of a hex float (e.g., "p+10", "p-1074").
///
/// Exponents of normalized f64 subnormals go down to -1074, so at most four
/// digits are ever needed.
fn write_exponent<W: Write + ?Sized>(sink: &mut W, exponent: i64) -> fmt::Result {
    sink.write_char('p')?;
    sink.write_char(if exponent < 0 { '-' } else { '+' })?;

    let magnitude = exponent.unsigned_abs();
    let mut started = false;
    for place in [1000, 100, 10] {
        let digit = (magnitude / place) % 10;
        started |= digit != 0;
        if started {
            sink.write_char((b'0' + digit as u8) as char)?;
        }
    }
    sink.write_char((b'0' + (magnitude % 10) as u8) as char)
}
