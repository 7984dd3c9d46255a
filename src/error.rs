//! Error types.
//!
//! [`ColorError`] covers user-facing failures (parsing, strict-mode
//! rejection, invalid arguments). [`SpecError`] is returned when a
//! [`PixelFormatSpec`](crate::PixelFormatSpec) is malformed; built-in specs
//! are checked at compile time so it only surfaces for custom layouts.
//! [`BufferError`] is returned by the slice codecs.

use crate::spec::Channel;

/// Failure of a color operation.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
#[non_exhaustive]
pub enum ColorError {
    /// The string matches no hex literal shape and no named color.
    #[error("unrecognized color literal {0:?}")]
    Format(String),
    /// A channel value fell outside `[0, 1]` under [`ChannelMode::Strict`](crate::ChannelMode::Strict).
    #[error("{channel} channel value {value} is outside [0, 1]")]
    OutOfRange {
        /// Channel that was rejected.
        channel: Channel,
        /// Offending value.
        value: f32,
    },
    /// [`Color::blend_all`](crate::Color::blend_all) was given no colors.
    #[error("cannot blend an empty collection of colors")]
    EmptyInput,
    /// [`Color::are_close`](crate::Color::are_close) threshold outside `[0, 1]`.
    #[error("closeness threshold {0} is outside [0, 1]")]
    InvalidThreshold(f32),
    /// No built-in pixel format has this name.
    #[error("unknown pixel format {0:?}")]
    UnknownFormat(String),
}

impl ColorError {
    /// Whether this error reports an out-of-domain argument to a pure
    /// function (as opposed to unparseable text or a strict-mode rejection).
    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, Self::EmptyInput | Self::InvalidThreshold(_))
    }
}

/// A [`PixelFormatSpec`](crate::PixelFormatSpec) describes an impossible layout.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum SpecError {
    /// Packed width must be between 1 and 32 bits.
    #[error("total width of {0} bits is outside 1..=32")]
    TotalBits(u8),
    /// A linear layout needs at least one channel field.
    #[error("layout has no channel fields")]
    NoFields,
    /// Channel fields hold between 1 and 8 bits.
    #[error("{channel} field width {width} is outside 1..=8")]
    FieldWidth {
        /// Channel of the offending field.
        channel: Channel,
        /// Declared width.
        width: u8,
    },
    /// Field extends past the packed word.
    #[error("{channel} field at bit {offset} with width {width} exceeds {total_bits} bits")]
    FieldOutOfBounds {
        /// Channel of the offending field.
        channel: Channel,
        /// Declared offset.
        offset: u8,
        /// Declared width.
        width: u8,
        /// Packed width of the layout.
        total_bits: u8,
    },
    /// Two fields share bits.
    #[error("{0} field overlaps an earlier field")]
    Overlap(Channel),
    /// The same channel is declared twice.
    #[error("{0} channel is declared more than once")]
    DuplicateChannel(Channel),
}

/// Byte buffer does not match the slice being encoded or decoded.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum BufferError {
    /// Output or input buffer has the wrong length for the pixel count.
    #[error("buffer holds {actual} bytes, expected {expected}")]
    LengthMismatch {
        /// Required length in bytes.
        expected: usize,
        /// Provided length in bytes.
        actual: usize,
    },
    /// Input length is not a whole number of packed pixels.
    #[error("buffer length {len} is not a multiple of the {unit}-byte pixel size")]
    PartialPixel {
        /// Provided length in bytes.
        len: usize,
        /// Storage width of one packed pixel.
        unit: usize,
    },
}
