use thiserror::Error as ThisError;

use crate::Width;

/// The error returned when a string is not a valid hex float literal for the
/// requested width.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ThisError)]
pub enum FormatError {
    /// The input does not match `-?0x<hex>[.<hex>]p[+-]<dec>[_f32|_f64]`.
    #[error("invalid hex float literal at byte {position}")]
    Syntax { position: usize },
    /// The literal carries a suffix naming another width.
    #[error("literal suffix `{found}` does not match requested width `{expected}`")]
    WidthMismatch { expected: Width, found: Width },
    /// After rounding, the magnitude exceeds the largest finite value.
    #[error("hex float literal out of range for {0}")]
    Overflow(Width),
}
