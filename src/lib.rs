//! Exact conversion between `f32`/`f64` and hexadecimal float literals.
//!
//! This crate provides two traits:
//! - [`ToHex`] for formatting floats as hex float literals (`0x1.8p+1`)
//! - [`FromHex`] for parsing hex float literals back to floats
//!
//! The literal syntax is the one used by C99 and C++17 (`%a`,
//! `std::hexfloat`). Unlike decimal text, a hex float carries the exact bits
//! of the value, so formatting then parsing always returns the original
//! float, independent of locale.
//!
//! # Examples
//!
//! ```
//! use hexfloat::{FromHex, ToHex};
//!
//! // Formatting
//! let hex = 6.125_f64.to_hex();
//! assert_eq!(hex, "0x1.88p+2");
//!
//! // Parsing
//! let value = f64::from_hex("0x12.34p+5").unwrap();
//! assert_eq!(value, 582.5);
//!
//! // Round-trip
//! let original = std::f64::consts::PI;
//! let roundtrip = f64::from_hex(&original.to_hex()).unwrap();
//! assert_eq!(original.to_bits(), roundtrip.to_bits());
//! ```
//!
//! # Format
//!
//! Formatted values are always in canonical form, `-0xh.hhhp±d`, where:
//! - `-` is the sign (omitted for positive values)
//! - `0x` is the hex prefix
//! - `h.hhh` is the significand: a leading `1` (or `0` for zero) followed by
//!   the fraction with trailing zeroes removed, and no `.` if nothing is left
//! - `p±d` is the power of two, in decimal, without leading zeroes
//!
//! Subnormals are normalized (`0x1p-149`, not `0x0.000002p-126`). Infinities
//! and NaN format as `Infinity`, `-Infinity` and `NaN`.
//!
//! # Parsing
//!
//! The parser accepts exactly
//! `-?0x[0-9A-Fa-f]+(\.[0-9A-Fa-f]+)?p[+-]?[0-9]+`, followed by an optional
//! width suffix (`f32`, `_f32`, `f64`, `_f64`) that must name the target
//! type. Literals need not be canonical (`0x2.0p-21` and `0x0.0008p-7` both
//! denote 2^-20), and extra precision is rounded to nearest, ties to even.
//! Infinity and NaN are not accepted, and a value that rounds past the
//! largest finite float is an error rather than infinity.
//!
//! # Panics
//!
//! Neither [`ToHex::to_hex`] nor [`FromHex::from_hex`] will panic. All inputs
//! are handled gracefully.

use std::{
    fmt::{self, Display, Write},
    ops::{Deref, DerefMut},
    str::FromStr,
};

mod error;
mod format;
mod parse;
mod unpacked;
mod width;

pub use error::FormatError;
pub use format::{format_bits, write_bits};
pub use parse::parse_bits;
pub use unpacked::UnpackedFloat;
pub use width::Width;

/// Trait for converting floating-point numbers to hex float literals.
///
/// # Examples
///
/// ```
/// use hexfloat::ToHex;
///
/// assert_eq!(1.0_f32.to_hex(), "0x1p+0");
/// assert_eq!((-1.0_f32 / 3.0).to_hex(), "-0x1.555556p-2");
/// assert_eq!((-3.5_f64).to_hex(), "-0x1.cp+1");
/// assert_eq!(f64::INFINITY.to_hex(), "Infinity");
/// assert_eq!(f64::NAN.to_hex(), "NaN");
/// ```
pub trait ToHex {
    /// The width whose layout `self` uses.
    const WIDTH: Width;

    /// Converts the floating-point number to its canonical hex float literal.
    #[must_use]
    fn to_hex(self) -> String
    where
        Self: Sized,
    {
        let mut buffer = String::new();
        // Writing into a String cannot fail.
        let _ = self.write_hex(&mut buffer);
        buffer
    }

    /// Writes the canonical hex float literal to `sink` without allocating.
    ///
    /// ```
    /// use hexfloat::ToHex;
    ///
    /// let mut out = String::from("let x = ");
    /// 0.75_f32.write_hex(&mut out).unwrap();
    /// assert_eq!(out, "let x = 0x1.8p-1");
    /// ```
    fn write_hex<W: Write + ?Sized>(self, sink: &mut W) -> fmt::Result;
}

/// Trait for parsing hex float literals to floating-point numbers.
///
/// # Examples
///
/// ```
/// use hexfloat::{FormatError, FromHex, Width};
///
/// assert_eq!(f64::from_hex("0x1p+0"), Ok(1.0));
/// assert_eq!(f64::from_hex("0x1.8p+1"), Ok(3.0));
/// assert_eq!(f64::from_hex("-0x1.4p+3_f64"), Ok(-10.0));
/// assert_eq!(f32::from_hex("0x3.333334p+1"), Ok(6.4));
/// assert!(f64::from_hex("1.5").is_err());
/// assert_eq!(
///     f64::from_hex("0x1p+0_f32"),
///     Err(FormatError::WidthMismatch { expected: Width::F64, found: Width::F32 })
/// );
/// ```
///
/// # Returns `Err` When
///
/// - The string does not match the grammar exactly, including missing `0x`,
///   missing `p` exponent, surrounding whitespace, or `inf`/`nan`
/// - The width suffix names the other type
/// - The value rounds to a magnitude larger than the type's largest finite value
pub trait FromHex: Sized {
    /// Parses a hex float literal to a floating-point number.
    fn from_hex(s: &str) -> Result<Self, FormatError>;
}

impl ToHex for f32 {
    const WIDTH: Width = Width::F32;

    fn write_hex<W: Write + ?Sized>(self, sink: &mut W) -> fmt::Result {
        write_bits(sink, u64::from(self.to_bits()), Self::WIDTH)
    }
}

impl ToHex for f64 {
    const WIDTH: Width = Width::F64;

    fn write_hex<W: Write + ?Sized>(self, sink: &mut W) -> fmt::Result {
        write_bits(sink, self.to_bits(), Self::WIDTH)
    }
}

impl FromHex for f32 {
    fn from_hex(s: &str) -> Result<Self, FormatError> {
        // The parser only sets bits below `Width::F32.total_bits()`.
        parse_bits(s, Width::F32).map(|bits| f32::from_bits(bits as u32))
    }
}

impl FromHex for f64 {
    fn from_hex(s: &str) -> Result<Self, FormatError> {
        parse_bits(s, Width::F64).map(f64::from_bits)
    }
}

/// A float that displays and parses as a hex float literal.
///
/// There are type aliases available:
/// - `HexFloat32` is equivalent to `HexFloat<f32>`
/// - `HexFloat64` is equivalent to `HexFloat<f64>`
///
/// # Examples
///
/// ```
/// use hexfloat::HexFloat32;
///
/// const EXPECTED: f32 = 1.0 / 1048576.0;
///
/// let x: HexFloat32 = "0x2.0p-21".parse().unwrap();
/// assert_eq!(*x, EXPECTED);
/// assert_eq!(format!("{x}"), "0x1p-20");
/// ```
#[derive(Debug, Default, Clone, Copy, PartialEq, PartialOrd)]
pub struct HexFloat<T>(pub T);

pub type HexFloat32 = HexFloat<f32>;
pub type HexFloat64 = HexFloat<f64>;

impl<T> HexFloat<T> {
    pub const fn new(value: T) -> Self {
        Self(value)
    }

    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T> From<T> for HexFloat<T> {
    fn from(value: T) -> Self {
        Self(value)
    }
}

impl<T> Deref for HexFloat<T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.0
    }
}

impl<T> DerefMut for HexFloat<T> {
    fn deref_mut(&mut self) -> &mut T {
        &mut self.0
    }
}

impl<T: ToHex + Copy> Display for HexFloat<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.write_hex(f)
    }
}

impl<T: FromHex> FromStr for HexFloat<T> {
    type Err = FormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        T::from_hex(s).map(Self)
    }
}

// =============================================================================
// Tests
// =============================================================================


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn is_canonical(hex: &str) -> bool {
        let Some((significand, _)) = hex.split_once('p') else {
            return false;
        };
        !significand.ends_with('0') || significand.ends_with("0x0")
    }

    proptest! {
        /// Round-trip property: to_hex -> from_hex should preserve the bits.
        #[test]
        fn f64_roundtrip(v in any::<f64>().prop_filter("finite", |v| v.is_finite())) {
            let hex = v.to_hex();
            let parsed = f64::from_hex(&hex);
            prop_assert_eq!(parsed.map(f64::to_bits), Ok(v.to_bits()), "{}", hex);
        }

        #[test]
        fn f32_roundtrip(v in any::<f32>().prop_filter("finite", |v| v.is_finite())) {
            let hex = v.to_hex();
            let parsed = f32::from_hex(&hex);
            prop_assert_eq!(parsed.map(f32::to_bits), Ok(v.to_bits()), "{}", hex);
        }

        /// Any bit pattern formats, and finite output has no trailing zero digit.
        #[test]
        fn f64_canonical(bits in any::<u64>()) {
            let v = f64::from_bits(bits);
            let hex = v.to_hex();
            if v.is_finite() {
                prop_assert!(is_canonical(&hex), "{}", hex);
            }
        }

        #[test]
        fn f32_canonical(bits in any::<u32>()) {
            let v = f32::from_bits(bits);
            let hex = v.to_hex();
            if v.is_finite() {
                prop_assert!(is_canonical(&hex), "{}", hex);
            }
        }

        /// Padding a literal with zero digits does not change the value.
        #[test]
        fn padded_literal_is_same_value(
            v in any::<f64>().prop_filter("finite", |v| v.is_finite()),
            lead in 0_usize..4,
            trail in 0_usize..4,
        ) {
            let hex = v.to_hex();
            let (sign, rest) = match hex.strip_prefix('-') {
                Some(rest) => ("-", rest),
                None => ("", hex.as_str()),
            };
            let (significand, exponent) = rest
                .strip_prefix("0x")
                .and_then(|r| r.split_once('p'))
                .unwrap();
            let fraction = if significand.contains('.') { "" } else { "." };
            let padded = format!(
                "{sign}0x{}{significand}{fraction}{}p{exponent}",
                "0".repeat(lead),
                "0".repeat(trail + 1),
            );
            let parsed = f64::from_hex(&padded);
            prop_assert_eq!(parsed.map(f64::to_bits), Ok(v.to_bits()), "{}", padded);
        }

        /// Text that is not a literal never panics the parser.
        #[test]
        fn arbitrary_text_does_not_panic(s in "\\PC*") {
            let _ = f64::from_hex(&s);
            let _ = f32::from_hex(&s);
        }
    }
}
