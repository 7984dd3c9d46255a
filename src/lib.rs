//! Canonical RGBA color value and fixed-width legacy pixel-format codecs.
//!
//! - [`Color`]: four normalized `f32` channels with an 8-bit view,
//!   blending, similarity, parsing and formatting
//! - [`PixelFormatSpec`]: declarative bit layout of a packed pixel
//! - [`PixelFormat`]: the built-in formats (ABGR32 down to 1-bit
//!   monochrome) as a compiled-in spec table
//! - [`LiteralShape`]: hex literal / color name dispatch
//! - [`transfer`]: the sRGB curve used by the colorimetric grayscale codec
//!
//! Encoding goes `Color` → spec → packed integer; decoding is the reverse.
//! Every operation is a pure function on `Copy` values, so everything here
//! is `Send + Sync` and needs no locking.
//!
//! ```
//! use packed_color::{Color, PixelFormat};
//!
//! let red = Color::from_rgb8(255, 0, 0);
//! assert_eq!(red.encode(PixelFormat::Abgr32), 0xFF00_00FF);
//! assert_eq!(red.encode(PixelFormat::Bgr565), 0x001F);
//!
//! let c: Color = "#80FF0000".parse().unwrap();
//! assert_eq!(c.a(), 0x80);
//! assert_eq!(c.format("rr,gg,bb"), "ff,00,00");
//! ```
//!
//! # Feature flags
//!
//! - `strict`: the `try_*` constructors reject channel values outside
//!   `[0, 1]` instead of clamping (see [`ChannelMode`]).

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod buffer;
mod codec;
mod color;
mod error;
mod format;
mod literal;
pub mod named;
mod spec;
pub mod transfer;

pub use color::{ChannelMode, Color};
pub use error::{BufferError, ColorError, SpecError};
pub use format::PixelFormat;
pub use literal::LiteralShape;
pub use spec::{Channel, ChannelField, Encoding, PixelFormatSpec, Rounding, Storage};
