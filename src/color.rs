//! The canonical color value.
//!
//! [`Color`] stores four `f32` channels normalized to `[0, 1]` (scRGB) and
//! exposes an 8-bit view derived by `round(channel * 255)`. Every codec
//! converts to and from this type.
//!
//! [`ChannelMode`] decides what happens to out-of-range float input: clamp
//! (the default) or reject (`strict` feature). Under strict mode the plain
//! constructors and setters panic on a rejected value, and the `try_*`
//! variants return the error instead.

use core::cmp::Ordering;
use core::hash::{Hash, Hasher};

use crate::error::ColorError;
use crate::format::PixelFormat;
use crate::spec::Channel;

#[inline]
const fn byte_to_unit(v: u8) -> f32 {
    v as f32 / 255.0
}

#[inline]
fn unit_to_byte(v: f32) -> u8 {
    (v * 255.0).round() as u8
}

/// Clamp to `[0, 1]`, sending NaN and `-0.0` to `+0.0`.
#[inline]
fn clamp_unit(v: f32) -> f32 {
    if v.is_nan() || v <= 0.0 {
        0.0
    } else if v >= 1.0 {
        1.0
    } else {
        v
    }
}

/// Admit `value` under [`ChannelMode::ACTIVE`], panicking on rejection.
#[inline]
#[track_caller]
fn admit_active(channel: Channel, value: f32) -> f32 {
    match ChannelMode::ACTIVE.admit(channel, value) {
        Ok(v) => v,
        Err(err) => panic!("{err}"),
    }
}

// ---------------------------------------------------------------------------
// ChannelMode
// ---------------------------------------------------------------------------

/// Treatment of channel values outside `[0, 1]`.
///
/// The build picks one mode as [`ChannelMode::ACTIVE`] (the `strict` cargo
/// feature selects [`Strict`](Self::Strict)). The float constructors and
/// setters on [`Color`] apply it: the `try_*` variants return the error, the
/// others panic with it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ChannelMode {
    /// Out-of-range values are clamped; NaN becomes 0.
    Clamping,
    /// Out-of-range values and NaN are an [`OutOfRange`](ColorError::OutOfRange) error.
    Strict,
}

impl ChannelMode {
    /// Mode selected for this build.
    #[cfg(not(feature = "strict"))]
    pub const ACTIVE: Self = Self::Clamping;
    /// Mode selected for this build.
    #[cfg(feature = "strict")]
    pub const ACTIVE: Self = Self::Strict;

    /// Admit one channel value under this mode.
    pub fn admit(self, channel: Channel, value: f32) -> Result<f32, ColorError> {
        match self {
            Self::Clamping => Ok(clamp_unit(value)),
            Self::Strict if (0.0..=1.0).contains(&value) => Ok(clamp_unit(value)),
            Self::Strict => {
                log::debug!("strict mode rejected {channel} = {value}");
                Err(ColorError::OutOfRange { channel, value })
            }
        }
    }

    /// Build a color from normalized channels under this mode.
    pub fn color(self, r: f32, g: f32, b: f32, a: f32) -> Result<Color, ColorError> {
        Ok(Color {
            r: self.admit(Channel::Red, r)?,
            g: self.admit(Channel::Green, g)?,
            b: self.admit(Channel::Blue, b)?,
            a: self.admit(Channel::Alpha, a)?,
        })
    }
}

// ---------------------------------------------------------------------------
// Color
// ---------------------------------------------------------------------------

/// An RGBA color with normalized `f32` channels.
///
/// Channels are always in `[0, 1]`. Values are immutable: the `with_*`
/// methods return a new color.
///
/// Equality is bit equality of the four channels, with no tolerance.
/// Ordering follows the packed [`PixelFormat::Abgr32`] value; see
/// [`cmp_packed`](Self::cmp_packed).
#[derive(Clone, Copy, Debug, Default)]
pub struct Color {
    r: f32,
    g: f32,
    b: f32,
    a: f32,
}

impl Color {
    /// Fully transparent black.
    pub const TRANSPARENT: Color = Color::from_rgba8(0, 0, 0, 0);
    /// Opaque black.
    pub const BLACK: Color = Color::from_rgb8(0, 0, 0);
    /// Opaque white.
    pub const WHITE: Color = Color::from_rgb8(255, 255, 255);

    /// Color from 8-bit channels; each is divided by 255.
    pub const fn from_rgba8(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self {
            r: byte_to_unit(r),
            g: byte_to_unit(g),
            b: byte_to_unit(b),
            a: byte_to_unit(a),
        }
    }

    /// Opaque color from 8-bit channels.
    pub const fn from_rgb8(r: u8, g: u8, b: u8) -> Self {
        Self::from_rgba8(r, g, b, 255)
    }

    /// Color from normalized channels under [`ChannelMode::ACTIVE`].
    ///
    /// # Panics
    ///
    /// With the `strict` feature, if a channel is NaN or outside `[0, 1]`.
    /// Without it, such channels are clamped.
    #[track_caller]
    pub fn from_sc_rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self {
            r: admit_active(Channel::Red, r),
            g: admit_active(Channel::Green, g),
            b: admit_active(Channel::Blue, b),
            a: admit_active(Channel::Alpha, a),
        }
    }

    /// Opaque color from normalized channels; see [`from_sc_rgba`](Self::from_sc_rgba).
    #[track_caller]
    pub fn from_sc_rgb(r: f32, g: f32, b: f32) -> Self {
        Self::from_sc_rgba(r, g, b, 1.0)
    }

    /// Color from normalized channels under [`ChannelMode::ACTIVE`].
    pub fn try_from_sc_rgba(r: f32, g: f32, b: f32, a: f32) -> Result<Self, ColorError> {
        ChannelMode::ACTIVE.color(r, g, b, a)
    }

    /// Clamps regardless of mode; for values computed from valid channels.
    pub(crate) fn clamped(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self {
            r: clamp_unit(r),
            g: clamp_unit(g),
            b: clamp_unit(b),
            a: clamp_unit(a),
        }
    }

    /// Red as a byte.
    #[inline]
    pub fn r(self) -> u8 {
        unit_to_byte(self.r)
    }

    /// Green as a byte.
    #[inline]
    pub fn g(self) -> u8 {
        unit_to_byte(self.g)
    }

    /// Blue as a byte.
    #[inline]
    pub fn b(self) -> u8 {
        unit_to_byte(self.b)
    }

    /// Alpha as a byte.
    #[inline]
    pub fn a(self) -> u8 {
        unit_to_byte(self.a)
    }

    /// Normalized red.
    #[inline]
    pub const fn sc_r(self) -> f32 {
        self.r
    }

    /// Normalized green.
    #[inline]
    pub const fn sc_g(self) -> f32 {
        self.g
    }

    /// Normalized blue.
    #[inline]
    pub const fn sc_b(self) -> f32 {
        self.b
    }

    /// Normalized alpha.
    #[inline]
    pub const fn sc_a(self) -> f32 {
        self.a
    }

    /// Byte view of one channel.
    #[inline]
    pub fn channel(self, channel: Channel) -> u8 {
        unit_to_byte(self.sc_channel(channel))
    }

    /// Normalized value of one channel.
    #[inline]
    pub const fn sc_channel(self, channel: Channel) -> f32 {
        match channel {
            Channel::Red => self.r,
            Channel::Green => self.g,
            Channel::Blue => self.b,
            Channel::Alpha => self.a,
        }
    }

    /// `[r, g, b, a]` bytes.
    pub fn to_rgba8(self) -> [u8; 4] {
        [self.r(), self.g(), self.b(), self.a()]
    }

    /// `[r, g, b, a]` normalized.
    pub const fn to_sc_rgba(self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a]
    }

    /// Copy with one channel replaced by a byte value.
    pub fn with_channel(self, channel: Channel, value: u8) -> Self {
        self.set(channel, byte_to_unit(value))
    }

    /// Copy with one channel replaced by a normalized value under
    /// [`ChannelMode::ACTIVE`].
    ///
    /// # Panics
    ///
    /// With the `strict` feature, if `value` is NaN or outside `[0, 1]`.
    #[track_caller]
    pub fn with_sc_channel(self, channel: Channel, value: f32) -> Self {
        self.set(channel, admit_active(channel, value))
    }

    /// Copy with one channel replaced under [`ChannelMode::ACTIVE`].
    pub fn try_with_sc_channel(self, channel: Channel, value: f32) -> Result<Self, ColorError> {
        Ok(self.set(channel, ChannelMode::ACTIVE.admit(channel, value)?))
    }

    /// Copy with alpha replaced.
    pub fn with_alpha(self, a: u8) -> Self {
        self.with_channel(Channel::Alpha, a)
    }

    fn set(mut self, channel: Channel, value: f32) -> Self {
        match channel {
            Channel::Red => self.r = value,
            Channel::Green => self.g = value,
            Channel::Blue => self.b = value,
            Channel::Alpha => self.a = value,
        }
        self
    }

    /// Component-wise average of two colors.
    pub fn blend(self, other: Color) -> Self {
        Self::clamped(
            (self.r + other.r) / 2.0,
            (self.g + other.g) / 2.0,
            (self.b + other.b) / 2.0,
            (self.a + other.a) / 2.0,
        )
    }

    /// Arithmetic mean of every color in `colors`.
    ///
    /// Returns [`ColorError::EmptyInput`] when there is nothing to average.
    pub fn blend_all<I>(colors: I) -> Result<Self, ColorError>
    where
        I: IntoIterator<Item = Color>,
    {
        let mut sum = [0.0f64; 4];
        let mut count = 0usize;
        for color in colors {
            for (acc, v) in sum.iter_mut().zip(color.to_sc_rgba()) {
                *acc += f64::from(v);
            }
            count += 1;
        }
        if count == 0 {
            return Err(ColorError::EmptyInput);
        }
        let n = count as f64;
        Ok(Self::clamped(
            (sum[0] / n) as f32,
            (sum[1] / n) as f32,
            (sum[2] / n) as f32,
            (sum[3] / n) as f32,
        ))
    }

    /// `1 - min(1, |Δa| + |Δr| + |Δg| + |Δb|)`: 1 for identical colors,
    /// 0 for colors at least one full channel apart.
    pub fn similarity(self, other: Color) -> f32 {
        let distance = (self.a - other.a).abs()
            + (self.r - other.r).abs()
            + (self.g - other.g).abs()
            + (self.b - other.b).abs();
        1.0 - distance.clamp(0.0, 1.0)
    }

    /// Whether [`similarity`](Self::similarity) reaches `threshold`.
    ///
    /// `threshold` must lie in `[0, 1]`.
    pub fn are_close(self, other: Color, threshold: f32) -> Result<bool, ColorError> {
        if !(0.0..=1.0).contains(&threshold) {
            return Err(ColorError::InvalidThreshold(threshold));
        }
        Ok(self.similarity(other) >= threshold)
    }

    /// Pack with a named format.
    #[inline]
    pub fn encode(self, format: PixelFormat) -> u32 {
        format.encode(self)
    }

    /// Unpack a value written by a named format.
    #[inline]
    pub fn decode(raw: u32, format: PixelFormat) -> Self {
        format.decode(raw)
    }

    /// Order by packed [`PixelFormat::Abgr32`] value.
    ///
    /// Colors whose channels round to the same bytes compare equal here
    /// even when [`Eq`] tells them apart.
    pub fn cmp_packed(&self, other: &Self) -> Ordering {
        self.encode(PixelFormat::Abgr32)
            .cmp(&other.encode(PixelFormat::Abgr32))
    }

    fn bits(&self) -> [u32; 4] {
        [
            self.r.to_bits(),
            self.g.to_bits(),
            self.b.to_bits(),
            self.a.to_bits(),
        ]
    }
}

impl PartialEq for Color {
    fn eq(&self, other: &Self) -> bool {
        self.bits() == other.bits()
    }
}

impl Eq for Color {}

impl Hash for Color {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.bits().hash(state);
    }
}

impl PartialOrd for Color {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Color {
    /// [`cmp_packed`](Color::cmp_packed), then channel bits to stay
    /// consistent with [`Eq`].
    fn cmp(&self, other: &Self) -> Ordering {
        self.cmp_packed(other)
            .then_with(|| self.bits().cmp(&other.bits()))
    }
}

impl From<[u8; 4]> for Color {
    fn from([r, g, b, a]: [u8; 4]) -> Self {
        Self::from_rgba8(r, g, b, a)
    }
}

impl From<Color> for [u8; 4] {
    fn from(color: Color) -> Self {
        color.to_rgba8()
    }
}
