use crate::Width;

/// A float bit pattern split into its three IEEE 754 fields.
///
/// `exponent` is the biased exponent field and `mantissa` the stored fraction
/// without the implicit leading one. Both always fit the fields of the width
/// they were built for.
///
/// ```
/// use hexfloat::{UnpackedFloat, Width};
///
/// let parts = UnpackedFloat::from_bits((-1.5_f32).to_bits() as u64, Width::F32);
/// assert!(parts.negative);
/// assert_eq!(parts.exponent, 127);
/// assert_eq!(parts.mantissa, 0x40_0000);
/// assert_eq!(parts.to_bits(Width::F32), (-1.5_f32).to_bits() as u64);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct UnpackedFloat {
    pub negative: bool,
    pub exponent: u32,
    pub mantissa: u64,
}

impl UnpackedFloat {
    /// Extracts the fields of `bits`, ignoring anything above `width.total_bits()`.
    pub fn from_bits(bits: u64, width: Width) -> Self {
        let mantissa_bits = width.mantissa_bits();
        Self {
            negative: (bits >> width.sign_shift()) & 1 != 0,
            exponent: ((bits >> mantissa_bits) as u32) & width.special_exponent(),
            mantissa: bits & width.mantissa_mask(),
        }
    }

    /// Packs the fields into the native bit layout of `width`.
    ///
    /// Out of range fields are masked to their declared widths.
    pub fn to_bits(self, width: Width) -> u64 {
        let sign = u64::from(self.negative) << width.sign_shift();
        let exponent = u64::from(self.exponent & width.special_exponent()) << width.mantissa_bits();
        sign | exponent | (self.mantissa & width.mantissa_mask())
    }

    pub(crate) fn zero(negative: bool) -> Self {
        Self {
            negative,
            exponent: 0,
            mantissa: 0,
        }
    }

    pub fn is_zero(&self) -> bool {
        self.exponent == 0 && self.mantissa == 0
    }

    pub fn is_subnormal(&self) -> bool {
        self.exponent == 0 && self.mantissa != 0
    }

    /// Infinity or NaN.
    pub fn is_special(&self, width: Width) -> bool {
        self.exponent == width.special_exponent()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use rstest::rstest;

    #[rstest]
    #[case(0.0, false, 0, 0)]
    #[case(-0.0, true, 0, 0)]
    #[case(1.0, false, 1023, 0)]
    #[case(-3.0, true, 1024, 1 << 51)]
    #[case(f64::MAX, false, 2046, 0xf_ffff_ffff_ffff)]
    #[case(f64::from_bits(1), false, 0, 1)]
    #[case(f64::NEG_INFINITY, true, 2047, 0)]
    fn unpack_f64(
        #[case] value: f64,
        #[case] negative: bool,
        #[case] exponent: u32,
        #[case] mantissa: u64,
    ) {
        let parts = UnpackedFloat::from_bits(value.to_bits(), Width::F64);
        assert_eq!(
            parts,
            UnpackedFloat {
                negative,
                exponent,
                mantissa
            }
        );
        assert_eq!(parts.to_bits(Width::F64), value.to_bits());
    }

    #[rstest]
    #[case(0.0, false, 0, 0)]
    #[case(1.0, false, 127, 0)]
    #[case(-6.4, true, 129, 0x4c_cccd)]
    #[case(f32::MIN_POSITIVE, false, 1, 0)]
    #[case(f32::INFINITY, false, 255, 0)]
    fn unpack_f32(
        #[case] value: f32,
        #[case] negative: bool,
        #[case] exponent: u32,
        #[case] mantissa: u64,
    ) {
        let bits = u64::from(value.to_bits());
        let parts = UnpackedFloat::from_bits(bits, Width::F32);
        assert_eq!(
            parts,
            UnpackedFloat {
                negative,
                exponent,
                mantissa
            }
        );
        assert_eq!(parts.to_bits(Width::F32), bits);
    }

    #[test]
    fn test_classification() {
        let w = Width::F32;
        assert!(UnpackedFloat::from_bits(0x8000_0000, w).is_zero());
        assert!(UnpackedFloat::from_bits(0x0000_0001, w).is_subnormal());
        assert!(!UnpackedFloat::from_bits(0x0080_0000, w).is_subnormal());
        assert!(UnpackedFloat::from_bits(0x7fc0_0000, w).is_special(w));
        assert!(!UnpackedFloat::from_bits(0x7f7f_ffff, w).is_special(w));
    }

    #[test]
    fn test_to_bits_masks_fields() {
        let parts = UnpackedFloat {
            negative: false,
            exponent: 0x1ff,
            mantissa: u64::MAX,
        };
        assert_eq!(parts.to_bits(Width::F32), 0x7fff_ffff);
    }
}
