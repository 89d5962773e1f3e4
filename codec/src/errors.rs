//! Error types for the limb and byte codecs.

use thiserror::Error;

/// Errors raised while encoding or decoding integers.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CodecError {
    /// The value needs more bits than the target representation holds.
    ///
    /// Raised when `x >= 2^(n*k)` for a limb encoding, when `x >= 2^(8L)` for
    /// a byte encoding, or when a single limb is not below `2^n` on decode.
    #[error("value needs {bits} bits but the target width is {width} bits")]
    Overflow { bits: u64, width: u64 },

    /// A stride or length parameter is unusable (zero stride, zero byte length).
    #[error("invalid argument: {0}")]
    InvalidArgument(&'static str),
}
