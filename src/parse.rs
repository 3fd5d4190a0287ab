//! Hex float literal parsing.
//!
//! Parsing happens in three steps: [`HexLiteral::lex`] checks the whole input
//! against the literal grammar, [`Significand::accumulate`] gathers the
//! significant bits into a left-aligned `u64` plus a sticky bit, and
//! [`Significand::round`] rounds to the target width (ties to even) and
//! produces the IEEE 754 fields.

use tracing::trace;

use crate::{FormatError, UnpackedFloat, Width};

/// Parses a hex float literal into the native bit pattern of `width`.
///
/// The input must match `-?0x[0-9A-Fa-f]+(\.[0-9A-Fa-f]+)?p[+-]?[0-9]+` with
/// an optional `f32`/`f64` suffix (optionally preceded by `_`) naming `width`.
/// Values that do not fit the width exactly are rounded to nearest, ties to
/// even. Values too small for the smallest subnormal become a signed zero;
/// values too large for the largest finite value are an error.
///
/// ```
/// use hexfloat::{parse_bits, FormatError, Width};
///
/// assert_eq!(parse_bits("0x1.8p+1", Width::F64), Ok(3.0_f64.to_bits()));
/// assert_eq!(parse_bits("-0x1p-149_f32", Width::F32), Ok(0x8000_0001));
/// assert_eq!(
///     parse_bits("0x1p+128", Width::F32),
///     Err(FormatError::Overflow(Width::F32))
/// );
/// ```
pub fn parse_bits(text: &str, width: Width) -> Result<u64, FormatError> {
    parse_unpacked(text, width)
        .map(|parts| parts.to_bits(width))
        .inspect_err(|err| trace!(input = text, %err, "rejected hex float literal"))
}

fn parse_unpacked(text: &str, width: Width) -> Result<UnpackedFloat, FormatError> {
    let literal = HexLiteral::lex(text)?;
    if let Some(found) = literal.suffix {
        if found != width {
            return Err(FormatError::WidthMismatch {
                expected: width,
                found,
            });
        }
    }

    match Significand::accumulate(&literal) {
        Some(significand) => significand.round(literal.negative, width),
        None => Ok(UnpackedFloat::zero(literal.negative)),
    }
}

/// The syntactic parts of a literal, borrowed from the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct HexLiteral<'a> {
    negative: bool,
    /// Hex digits before the radix point; never empty.
    integer: &'a [u8],
    /// Hex digits after the radix point; empty when there is no point.
    fraction: &'a [u8],
    /// The decimal `p` exponent, saturated to the `i64` range.
    exponent: i64,
    suffix: Option<Width>,
}

impl<'a> HexLiteral<'a> {
    fn lex(text: &'a str) -> Result<Self, FormatError> {
        let mut cursor = Cursor::new(text.as_bytes());

        let negative = cursor.eat(b'-');
        cursor.expect(b'0')?;
        cursor.expect(b'x')?;

        let integer = cursor.take_nonempty(u8::is_ascii_hexdigit)?;
        let fraction = if cursor.eat(b'.') {
            cursor.take_nonempty(u8::is_ascii_hexdigit)?
        } else {
            &[]
        };

        cursor.expect(b'p')?;
        let exponent_negative = if cursor.eat(b'-') {
            true
        } else {
            cursor.eat(b'+');
            false
        };
        let magnitude = cursor
            .take_nonempty(u8::is_ascii_digit)?
            .iter()
            .fold(0_i64, |acc, &d| {
                acc.saturating_mul(10).saturating_add(i64::from(d - b'0'))
            });
        let exponent = if exponent_negative {
            -magnitude
        } else {
            magnitude
        };

        let suffix = match cursor.rest() {
            b"" => None,
            b"f32" | b"_f32" => Some(Width::F32),
            b"f64" | b"_f64" => Some(Width::F64),
            _ => return Err(cursor.error()),
        };

        Ok(Self {
            negative,
            integer,
            fraction,
            exponent,
            suffix,
        })
    }
}

struct Cursor<'a> {
    bytes: &'a [u8],
    position: usize,
}

impl<'a> Cursor<'a> {
    fn new(bytes: &'a [u8]) -> Self {
        Self { bytes, position: 0 }
    }

    fn error(&self) -> FormatError {
        FormatError::Syntax {
            position: self.position,
        }
    }

    fn eat(&mut self, byte: u8) -> bool {
        if self.bytes.get(self.position) == Some(&byte) {
            self.position += 1;
            true
        } else {
            false
        }
    }

    fn expect(&mut self, byte: u8) -> Result<(), FormatError> {
        if self.eat(byte) {
            Ok(())
        } else {
            Err(self.error())
        }
    }

    /// Consumes the longest run of bytes matching `pred`, which must not be empty.
    fn take_nonempty(&mut self, pred: impl Fn(&u8) -> bool) -> Result<&'a [u8], FormatError> {
        let rest = self.rest();
        let len = rest.iter().take_while(|&b| pred(b)).count();
        if len == 0 {
            return Err(self.error());
        }
        self.position += len;
        Ok(&rest[..len])
    }

    fn rest(&self) -> &'a [u8] {
        &self.bytes[self.position..]
    }
}

/// The significant bits of a nonzero literal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Significand {
    /// Left-aligned: the leading one is bit 63.
    bits: u64,
    /// Some set bit fell below bit 0 of `bits`.
    sticky: bool,
    /// Unbiased binary exponent of the leading one.
    exponent: i64,
}

impl Significand {
    /// Returns `None` when every digit of the literal is zero.
    fn accumulate(literal: &HexLiteral<'_>) -> Option<Self> {
        let mut digits = literal
            .integer
            .iter()
            .chain(literal.fraction)
            .map(|&b| hex_value(b))
            .enumerate()
            .skip_while(|&(_, digit)| digit == 0);

        let (index, leading) = digits.next()?;
        // Zero bits above the leading one within its nibble, 0..=3.
        let leading_zeroes = u32::from(leading).leading_zeros() - 28;

        // The nibble at `index` is worth 16^position.
        let position = (literal.integer.len() as i64).saturating_sub(1 + index as i64);
        let exponent = position
            .saturating_mul(4)
            .saturating_add(3 - i64::from(leading_zeroes))
            .saturating_add(literal.exponent);

        let mut bits = u64::from(leading) << (60 + leading_zeroes);
        let mut sticky = false;
        // Bit position of the low bit of the next nibble.
        let mut shift = 56 + leading_zeroes as i32;
        for (_, digit) in digits {
            let digit = u64::from(digit);
            if shift >= 0 {
                bits |= digit << shift;
            } else if shift > -4 {
                bits |= digit >> -shift;
                sticky |= digit & ((1 << -shift) - 1) != 0;
            } else if digit != 0 {
                sticky = true;
                break;
            }
            shift = shift.saturating_sub(4);
        }

        Some(Self {
            bits,
            sticky,
            exponent,
        })
    }

    /// Rounds to the precision of `width`, denormalizing below the normal range.
    fn round(self, negative: bool, width: Width) -> Result<UnpackedFloat, FormatError> {
        let mantissa_bits = width.mantissa_bits();
        let special = i64::from(width.special_exponent());
        let biased = self.exponent.saturating_add(width.bias());

        if biased >= special {
            return Err(FormatError::Overflow(width));
        }

        if biased >= 1 {
            let precision = mantissa_bits + 1;
            let (mut kept, exact) = round_shift(self.bits, self.sticky, 64 - precision);
            let mut biased = biased;
            if kept >> precision != 0 {
                // Rounded up to the next power of two.
                kept >>= 1;
                biased += 1;
                if biased >= special {
                    return Err(FormatError::Overflow(width));
                }
            }
            if !exact {
                trace!(exponent = self.exponent, %width, "rounded inexact hex float literal");
            }
            return Ok(UnpackedFloat {
                negative,
                exponent: biased as u32,
                mantissa: kept & width.mantissa_mask(),
            });
        }

        // Subnormal: the value is `kept` units of 2^(1 - bias - mantissa_bits),
        // and only `mantissa_bits + biased` of the significant bits survive.
        let kept_bits = i64::from(mantissa_bits).saturating_add(biased);
        let shift = 64_i64.saturating_sub(kept_bits).min(128) as u32;
        let (kept, exact) = round_shift(self.bits, self.sticky, shift);
        if !exact {
            trace!(exponent = self.exponent, %width, "rounded inexact subnormal hex float literal");
        }

        // Rounding the largest subnormal up carries into the exponent field,
        // which is exactly the encoding of the smallest normal.
        Ok(UnpackedFloat {
            negative,
            exponent: (kept >> mantissa_bits) as u32,
            mantissa: kept & width.mantissa_mask(),
        })
    }
}

/// Shifts `bits` right by `shift`, rounding to nearest with ties to even.
///
/// `sticky` marks set bits below bit 0 of `bits`. Returns the rounded value
/// and whether no set bit was discarded.
fn round_shift(bits: u64, sticky: bool, shift: u32) -> (u64, bool) {
    if shift == 0 {
        return (bits, !sticky);
    }
    if shift > 64 {
        // Everything is below half of the last retained unit.
        return (0, bits == 0 && !sticky);
    }

    let wide = u128::from(bits);
    let kept = (wide >> shift) as u64;
    let rest = wide & ((1_u128 << shift) - 1);
    let half = 1_u128 << (shift - 1);

    let round_up = rest > half || (rest == half && (sticky || kept & 1 == 1));
    (kept + u64::from(round_up), rest == 0 && !sticky)
}

const fn hex_value(byte: u8) -> u8 {
    match byte {
        b'0'..=b'9' => byte - b'0',
        b'a'..=b'f' => byte - b'a' + 10,
        b'A'..=b'F' => byte - b'A' + 10,
        _ => 0,
    }
}
