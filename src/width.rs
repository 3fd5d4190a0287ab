//! Bit layout of the supported IEEE 754 binary formats.

use std::fmt;

/// IEEE 754 binary format parameters.
///
/// Every conversion in this crate is driven by one of these descriptors; f32
/// and f64 differ only in the values held here. Designed for const
/// construction so both [`Width::F32`] and [`Width::F64`] are compile-time
/// constants.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Width {
    /// Total bits in the format (32 or 64)
    total_bits: u32,
    /// Stored fraction bits, excluding the implicit leading one (23 or 52)
    mantissa_bits: u32,
    /// Bits in the biased exponent field (8 or 11)
    exponent_bits: u32,
    /// Exponent bias (127 or 1023)
    bias: i64,
}

impl Width {
    /// `binary32`, Rust's `f32`.
    pub const F32: Width = Width::new(32, 23);
    /// `binary64`, Rust's `f64`.
    pub const F64: Width = Width::new(64, 52);

    const fn new(total_bits: u32, mantissa_bits: u32) -> Self {
        let exponent_bits = total_bits - mantissa_bits - 1;
        let bias = (1_i64 << (exponent_bits - 1)) - 1;
        Self {
            total_bits,
            mantissa_bits,
            exponent_bits,
            bias,
        }
    }

    /// Looks up the descriptor for a total bit width.
    ///
    /// ```
    /// use hexfloat::Width;
    ///
    /// assert_eq!(Width::from_bits(64), Some(Width::F64));
    /// assert_eq!(Width::from_bits(16), None);
    /// ```
    pub const fn from_bits(total_bits: u32) -> Option<Self> {
        match total_bits {
            32 => Some(Self::F32),
            64 => Some(Self::F64),
            _ => None,
        }
    }

    pub const fn total_bits(&self) -> u32 {
        self.total_bits
    }

    pub const fn mantissa_bits(&self) -> u32 {
        self.mantissa_bits
    }

    pub const fn exponent_bits(&self) -> u32 {
        self.exponent_bits
    }

    pub const fn bias(&self) -> i64 {
        self.bias
    }

    /// The literal suffix that names this width, without the optional `_`.
    pub const fn suffix(&self) -> &'static str {
        if self.total_bits == 32 {
            "f32"
        } else {
            "f64"
        }
    }

    pub(crate) const fn mantissa_mask(&self) -> u64 {
        (1_u64 << self.mantissa_bits) - 1
    }

    /// All-ones biased exponent, reserved for infinity and NaN.
    pub(crate) const fn special_exponent(&self) -> u32 {
        (1_u32 << self.exponent_bits) - 1
    }

    pub(crate) const fn sign_shift(&self) -> u32 {
        self.total_bits - 1
    }

    /// Smallest unbiased exponent of a normal number, shared by subnormals.
    pub(crate) const fn min_exponent(&self) -> i64 {
        1 - self.bias
    }

    /// Hex digits needed to hold the mantissa left-aligned on a nibble.
    pub(crate) const fn fraction_digits(&self) -> u32 {
        (self.mantissa_bits + 3) / 4
    }
}

impl fmt::Display for Width {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.suffix())
    }
}
