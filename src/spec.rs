//! Declarative packed-pixel layouts.
//!
//! A [`PixelFormatSpec`] says where each channel lives inside a packed
//! integer and how values are quantized. The generic engine in
//! [`codec`](crate::codec) interprets it; every named format in
//! [`PixelFormat`](crate::PixelFormat) is one constant entry.

use core::fmt;

use crate::error::SpecError;

// ---------------------------------------------------------------------------
// Descriptor enums
// ---------------------------------------------------------------------------

/// One of the four color channels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum Channel {
    /// Red.
    Red = 0,
    /// Green.
    Green = 1,
    /// Blue.
    Blue = 2,
    /// Alpha (opacity).
    Alpha = 3,
}

impl Channel {
    /// All channels in storage order.
    pub const ALL: [Channel; 4] = [Self::Red, Self::Green, Self::Blue, Self::Alpha];

    /// Position of the channel in `[r, g, b, a]` arrays.
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Single-letter label (`R`, `G`, `B`, `A`).
    pub const fn label(self) -> &'static str {
        match self {
            Self::Red => "R",
            Self::Green => "G",
            Self::Blue => "B",
            Self::Alpha => "A",
        }
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Placement of one channel inside the packed word.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ChannelField {
    /// Which channel the bits hold.
    pub channel: Channel,
    /// Field width in bits (1..=8).
    pub width: u8,
    /// Position of the field's least significant bit.
    pub offset: u8,
}

impl ChannelField {
    /// Describe a field. Checked when the field is placed in a spec.
    pub const fn new(channel: Channel, width: u8, offset: u8) -> Self {
        Self {
            channel,
            width,
            offset,
        }
    }

    /// Largest value the field can hold, `2^width - 1`.
    #[inline]
    pub const fn max(self) -> u32 {
        (1u32 << self.width) - 1
    }

    /// Field bits in place within the packed word.
    #[inline]
    pub const fn mask(self) -> u32 {
        self.max() << self.offset
    }
}

/// How an 8-bit channel is requantized to and from a narrower field.
///
/// Legacy formats disagree here, and packed data written by them depends
/// on the exact rule, so each spec carries its own.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Rounding {
    /// Pack keeps the high bits (`byte * 2^w / 256`); unpack is
    /// `field * 255 / (2^w - 1)` with integer division.
    Truncate,
    /// Pack and unpack both round to the nearest representable value.
    ///
    /// The ratio `(2^w - 1) / 255` never produces an exact half, so
    /// half-even and half-away-from-zero agree.
    Nearest,
}

/// Interpretation of the packed bits.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum Encoding {
    /// Independent channel fields described by [`ChannelField`]s.
    Linear,
    /// One bit: set when any of R, G, B has its high bit set.
    Monochrome,
    /// 8-bit Rec. 601 luma computed on the gamma-encoded bytes.
    Luma,
    /// 8-bit linear-light luminance (Rec. 709 weights) of the sRGB-decoded
    /// channels; unpacking re-applies the sRGB curve.
    SrgbLuma,
    /// 4-bit VGA text attribute foreground: B, G, R bits plus intensity.
    VgaAttribute,
}

impl Encoding {
    /// Packed width of the non-linear encodings.
    const fn fixed_bits(self) -> u8 {
        match self {
            Self::Monochrome => 1,
            Self::VgaAttribute => 4,
            Self::Linear | Self::Luma | Self::SrgbLuma => 8,
        }
    }
}

/// Smallest unsigned integer that contains a packed value.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Storage {
    /// `u8`.
    U8 = 1,
    /// `u16`.
    U16 = 2,
    /// `u32`.
    U32 = 4,
}

impl Storage {
    /// Byte size of one stored value.
    #[inline]
    pub const fn bytes(self) -> usize {
        self as usize
    }

    const fn for_bits(bits: u8) -> Self {
        if bits <= 8 {
            Self::U8
        } else if bits <= 16 {
            Self::U16
        } else {
            Self::U32
        }
    }
}

// ---------------------------------------------------------------------------
// PixelFormatSpec
// ---------------------------------------------------------------------------

/// Bit layout of a packed pixel format.
///
/// Constructed once (usually in `const` context) and shared read-only.
/// A spec that passed construction can never make
/// [`encode`](Self::encode) or [`decode`](Self::decode) fail.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct PixelFormatSpec {
    name: &'static str,
    total_bits: u8,
    fields: &'static [ChannelField],
    rounding: Rounding,
    encoding: Encoding,
}

impl PixelFormatSpec {
    /// Build a linear layout, rejecting impossible field configurations.
    ///
    /// Fields must be 1..=8 bits wide, fit inside `total_bits`, not
    /// overlap, and name each channel at most once. Omitting
    /// [`Channel::Alpha`] makes the format opaque.
    pub fn new(
        name: &'static str,
        total_bits: u8,
        fields: &'static [ChannelField],
        rounding: Rounding,
    ) -> Result<Self, SpecError> {
        Self::checked(name, total_bits, fields, rounding).inspect_err(|e| {
            log::warn!("rejected pixel format spec {name:?}: {e}");
        })
    }

    /// `const` form of [`new`](Self::new) without logging.
    pub const fn checked(
        name: &'static str,
        total_bits: u8,
        fields: &'static [ChannelField],
        rounding: Rounding,
    ) -> Result<Self, SpecError> {
        match check_fields(total_bits, fields) {
            Ok(()) => Ok(Self {
                name,
                total_bits,
                fields,
                rounding,
                encoding: Encoding::Linear,
            }),
            Err(e) => Err(e),
        }
    }

    /// Layout for one of the non-linear encodings. Its width is fixed by
    /// the encoding and it has no channel fields.
    pub(crate) const fn fixed(name: &'static str, encoding: Encoding) -> Self {
        Self {
            name,
            total_bits: encoding.fixed_bits(),
            fields: &[],
            rounding: Rounding::Truncate,
            encoding,
        }
    }

    /// Display name.
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Number of meaningful bits in a packed value.
    pub const fn total_bits(&self) -> u8 {
        self.total_bits
    }

    /// Channel fields; empty for non-linear encodings.
    pub const fn fields(&self) -> &'static [ChannelField] {
        self.fields
    }

    /// Quantization rule for linear fields.
    pub const fn rounding(&self) -> Rounding {
        self.rounding
    }

    /// How the bits are interpreted.
    pub const fn encoding(&self) -> Encoding {
        self.encoding
    }

    /// Containing integer type.
    pub const fn storage(&self) -> Storage {
        Storage::for_bits(self.total_bits)
    }

    /// Mask of the meaningful bits.
    pub const fn mask(&self) -> u32 {
        if self.total_bits >= 32 {
            u32::MAX
        } else {
            (1u32 << self.total_bits) - 1
        }
    }

    /// Whether alpha survives packing.
    pub const fn has_alpha(&self) -> bool {
        let mut i = 0;
        while i < self.fields.len() {
            if matches!(self.fields[i].channel, Channel::Alpha) {
                return true;
            }
            i += 1;
        }
        false
    }

    /// Field holding `channel`, if the layout stores it.
    pub fn field(&self, channel: Channel) -> Option<ChannelField> {
        self.fields.iter().copied().find(|f| f.channel == channel)
    }
}

impl fmt::Display for PixelFormatSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

const fn check_fields(total_bits: u8, fields: &[ChannelField]) -> Result<(), SpecError> {
    if total_bits == 0 || total_bits > 32 {
        return Err(SpecError::TotalBits(total_bits));
    }
    if fields.is_empty() {
        return Err(SpecError::NoFields);
    }
    let mut used: u64 = 0;
    let mut seen = [false; 4];
    let mut i = 0;
    while i < fields.len() {
        let field = fields[i];
        if field.width == 0 || field.width > 8 {
            return Err(SpecError::FieldWidth {
                channel: field.channel,
                width: field.width,
            });
        }
        if field.offset as u16 + field.width as u16 > total_bits as u16 {
            return Err(SpecError::FieldOutOfBounds {
                channel: field.channel,
                offset: field.offset,
                width: field.width,
                total_bits,
            });
        }
        if seen[field.channel.index()] {
            return Err(SpecError::DuplicateChannel(field.channel));
        }
        seen[field.channel.index()] = true;
        let mask = ((1u64 << field.width) - 1) << field.offset;
        if used & mask != 0 {
            return Err(SpecError::Overlap(field.channel));
        }
        used |= mask;
        i += 1;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    static RGB565: [ChannelField; 3] = [
        ChannelField::new(Channel::Blue, 5, 0),
        ChannelField::new(Channel::Green, 6, 5),
        ChannelField::new(Channel::Red, 5, 11),
    ];

    #[test]
    fn valid_layout() {
        let spec = PixelFormatSpec::new("RGB565", 16, &RGB565, Rounding::Nearest).unwrap();
        assert_eq!(spec.total_bits(), 16);
        assert_eq!(spec.storage(), Storage::U16);
        assert_eq!(spec.mask(), 0xFFFF);
        assert!(!spec.has_alpha());
        assert_eq!(spec.field(Channel::Green).unwrap().mask(), 0x07E0);
        assert!(spec.field(Channel::Alpha).is_none());
        assert_eq!(spec.encoding(), Encoding::Linear);
    }

    #[test]
    fn rejects_total_bits() {
        assert_eq!(
            PixelFormatSpec::new("x", 0, &RGB565, Rounding::Truncate),
            Err(SpecError::TotalBits(0))
        );
        assert_eq!(
            PixelFormatSpec::new("x", 33, &RGB565, Rounding::Truncate),
            Err(SpecError::TotalBits(33))
        );
    }

    #[test]
    fn rejects_empty_layout() {
        assert_eq!(
            PixelFormatSpec::new("x", 8, &[], Rounding::Truncate),
            Err(SpecError::NoFields)
        );
    }

    #[test]
    fn rejects_bad_width() {
        static WIDE: [ChannelField; 1] = [ChannelField::new(Channel::Red, 9, 0)];
        static EMPTY: [ChannelField; 1] = [ChannelField::new(Channel::Red, 0, 0)];
        assert_eq!(
            PixelFormatSpec::new("x", 16, &WIDE, Rounding::Truncate),
            Err(SpecError::FieldWidth {
                channel: Channel::Red,
                width: 9
            })
        );
        assert!(matches!(
            PixelFormatSpec::new("x", 16, &EMPTY, Rounding::Truncate),
            Err(SpecError::FieldWidth { width: 0, .. })
        ));
    }

    #[test]
    fn rejects_field_past_end() {
        assert_eq!(
            PixelFormatSpec::new("x", 15, &RGB565, Rounding::Truncate),
            Err(SpecError::FieldOutOfBounds {
                channel: Channel::Red,
                offset: 11,
                width: 5,
                total_bits: 15
            })
        );
    }

    #[test]
    fn rejects_overlap_and_duplicates() {
        static OVERLAP: [ChannelField; 2] = [
            ChannelField::new(Channel::Red, 4, 0),
            ChannelField::new(Channel::Green, 4, 3),
        ];
        static TWICE: [ChannelField; 2] = [
            ChannelField::new(Channel::Alpha, 1, 0),
            ChannelField::new(Channel::Alpha, 1, 1),
        ];
        assert_eq!(
            PixelFormatSpec::new("x", 8, &OVERLAP, Rounding::Truncate),
            Err(SpecError::Overlap(Channel::Green))
        );
        assert_eq!(
            PixelFormatSpec::new("x", 8, &TWICE, Rounding::Truncate),
            Err(SpecError::DuplicateChannel(Channel::Alpha))
        );
    }

    #[test]
    fn full_width_mask() {
        static WORD: [ChannelField; 4] = [
            ChannelField::new(Channel::Red, 8, 0),
            ChannelField::new(Channel::Green, 8, 8),
            ChannelField::new(Channel::Blue, 8, 16),
            ChannelField::new(Channel::Alpha, 8, 24),
        ];
        let spec = PixelFormatSpec::checked("w", 32, &WORD, Rounding::Truncate).unwrap();
        assert_eq!(spec.mask(), u32::MAX);
        assert_eq!(spec.storage(), Storage::U32);
        assert!(spec.has_alpha());
    }

    #[test]
    fn fixed_encodings_have_no_fields() {
        let mono = PixelFormatSpec::fixed("mono", Encoding::Monochrome);
        assert_eq!(mono.total_bits(), 1);
        assert!(mono.fields().is_empty());
        assert_eq!(mono.storage(), Storage::U8);
        let vga = PixelFormatSpec::fixed("vga", Encoding::VgaAttribute);
        assert_eq!(vga.mask(), 0x0F);
    }

    #[test]
    fn channel_labels() {
        let labels: Vec<_> = Channel::ALL.iter().map(|c| c.to_string()).collect();
        assert_eq!(labels, ["R", "G", "B", "A"]);
        assert_eq!(Channel::Alpha.index(), 3);
    }
}
