//! Named legacy pixel formats.
//!
//! Each [`PixelFormat`] is an entry in a compiled-in table of
//! [`PixelFormatSpec`]s. Linear names list channels from the most to the
//! least significant bits: in `BGR565`, red sits in bits 0-4 and blue in
//! bits 11-15.

use core::fmt;
use core::str::FromStr;

use crate::color::Color;
use crate::error::ColorError;
use crate::spec::{Channel, ChannelField, Encoding, PixelFormatSpec, Rounding, Storage};

/// Built-in pixel formats.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum PixelFormat {
    /// 32-bit, 8 bits per channel, alpha in the top byte. Lossless.
    Abgr32 = 0,
    /// 24-bit, 8 bits per channel, no alpha.
    Bgr24 = 1,
    /// 16-bit, 4 bits per channel including alpha.
    Abgr4444 = 2,
    /// 12-bit, 4 bits per channel, no alpha.
    Bgr12 = 3,
    /// 16-bit, 5 bits per color channel and a 1-bit alpha.
    Abgr1555 = 4,
    /// 15-bit, 5 bits per channel, no alpha.
    Bgr555 = 5,
    /// 16-bit, 5-6-5 bits, no alpha.
    Bgr565 = 6,
    /// 8-bit, 2 bits per channel including alpha.
    Abgr2222 = 7,
    /// 6-bit, 2 bits per channel, no alpha.
    Bgr222 = 8,
    /// 8-bit, 2 bits of red over 3 of green over 3 of blue.
    Rgb233 = 9,
    /// 1-bit black or white.
    Monochrome = 10,
    /// 8-bit luma of the gamma-encoded channels.
    Grayscale = 11,
    /// 8-bit linear-light luminance through the sRGB curve.
    ColorimetricGrayscale = 12,
    /// 4-bit VGA text attribute foreground (BGRI).
    VgaAttribute = 13,
}

const fn field(channel: Channel, width: u8, offset: u8) -> ChannelField {
    ChannelField::new(channel, width, offset)
}

const fn abgr(width: u8) -> [ChannelField; 4] {
    [
        field(Channel::Red, width, 0),
        field(Channel::Green, width, width),
        field(Channel::Blue, width, 2 * width),
        field(Channel::Alpha, width, 3 * width),
    ]
}

const fn bgr(width: u8) -> [ChannelField; 3] {
    [
        field(Channel::Red, width, 0),
        field(Channel::Green, width, width),
        field(Channel::Blue, width, 2 * width),
    ]
}

const ABGR8: [ChannelField; 4] = abgr(8);
const BGR8: [ChannelField; 3] = bgr(8);
const ABGR4: [ChannelField; 4] = abgr(4);
const BGR4: [ChannelField; 3] = bgr(4);
const ABGR1555: [ChannelField; 4] = [
    field(Channel::Red, 5, 0),
    field(Channel::Green, 5, 5),
    field(Channel::Blue, 5, 10),
    field(Channel::Alpha, 1, 15),
];
const BGR5: [ChannelField; 3] = bgr(5);
const BGR565: [ChannelField; 3] = [
    field(Channel::Red, 5, 0),
    field(Channel::Green, 6, 5),
    field(Channel::Blue, 5, 11),
];
const ABGR2: [ChannelField; 4] = abgr(2);
const BGR2: [ChannelField; 3] = bgr(2);
const RGB233: [ChannelField; 3] = [
    field(Channel::Blue, 3, 0),
    field(Channel::Green, 3, 3),
    field(Channel::Red, 2, 6),
];

/// Compile-time validation: an invalid entry fails the build.
const fn linear(
    name: &'static str,
    total_bits: u8,
    fields: &'static [ChannelField],
    rounding: Rounding,
) -> PixelFormatSpec {
    match PixelFormatSpec::checked(name, total_bits, fields, rounding) {
        Ok(spec) => spec,
        Err(_) => panic!("invalid built-in pixel format"),
    }
}

/// Indexed by `PixelFormat as usize`.
static SPECS: [PixelFormatSpec; 14] = [
    linear("ABGR32", 32, &ABGR8, Rounding::Truncate),
    linear("BGR24", 24, &BGR8, Rounding::Truncate),
    linear("ABGR4444", 16, &ABGR4, Rounding::Truncate),
    linear("BGR12", 12, &BGR4, Rounding::Truncate),
    linear("ABGR1555", 16, &ABGR1555, Rounding::Nearest),
    linear("BGR555", 15, &BGR5, Rounding::Nearest),
    linear("BGR565", 16, &BGR565, Rounding::Nearest),
    linear("ABGR2222", 8, &ABGR2, Rounding::Truncate),
    linear("BGR222", 6, &BGR2, Rounding::Truncate),
    linear("RGB233", 8, &RGB233, Rounding::Truncate),
    PixelFormatSpec::fixed("Monochrome", Encoding::Monochrome),
    PixelFormatSpec::fixed("Grayscale", Encoding::Luma),
    PixelFormatSpec::fixed("ColorimetricGrayscale", Encoding::SrgbLuma),
    PixelFormatSpec::fixed("VgaAttribute", Encoding::VgaAttribute),
];

impl PixelFormat {
    /// Every built-in format, in table order.
    pub const ALL: [PixelFormat; 14] = [
        Self::Abgr32,
        Self::Bgr24,
        Self::Abgr4444,
        Self::Bgr12,
        Self::Abgr1555,
        Self::Bgr555,
        Self::Bgr565,
        Self::Abgr2222,
        Self::Bgr222,
        Self::Rgb233,
        Self::Monochrome,
        Self::Grayscale,
        Self::ColorimetricGrayscale,
        Self::VgaAttribute,
    ];

    /// Bit layout.
    #[inline]
    pub fn spec(self) -> &'static PixelFormatSpec {
        &SPECS[self as usize]
    }

    /// Canonical name, e.g. `"BGR565"`.
    pub fn name(self) -> &'static str {
        self.spec().name()
    }

    /// Look up a format by name, ignoring ASCII case.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|f| f.name().eq_ignore_ascii_case(name))
    }

    /// Meaningful bits per packed value.
    pub fn total_bits(self) -> u8 {
        self.spec().total_bits()
    }

    /// Containing integer type.
    pub fn storage(self) -> Storage {
        self.spec().storage()
    }

    /// Whether alpha survives a round trip.
    pub fn has_alpha(self) -> bool {
        self.spec().has_alpha()
    }

    /// Whether decoding an encoded byte-valued color restores it exactly.
    pub fn is_lossless(self) -> bool {
        matches!(self, Self::Abgr32)
    }

    /// Pack `color`.
    #[inline]
    pub fn encode(self, color: Color) -> u32 {
        self.spec().encode(color)
    }

    /// Unpack `raw`; bits above [`total_bits`](Self::total_bits) are ignored.
    #[inline]
    pub fn decode(self, raw: u32) -> Color {
        self.spec().decode(raw)
    }
}

impl fmt::Display for PixelFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for PixelFormat {
    type Err = ColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s.trim()).ok_or_else(|| {
            log::debug!("unknown pixel format name {s:?}");
            ColorError::UnknownFormat(s.to_owned())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_is_indexed_by_discriminant() {
        for (i, format) in PixelFormat::ALL.into_iter().enumerate() {
            assert_eq!(format as usize, i);
            assert_eq!(PixelFormat::from_name(format.name()), Some(format));
        }
    }

    #[test]
    fn names_are_unique() {
        for a in PixelFormat::ALL {
            for b in PixelFormat::ALL {
                if a != b {
                    assert!(!a.name().eq_ignore_ascii_case(b.name()));
                }
            }
        }
    }

    #[test]
    fn from_name_case_insensitive() {
        assert_eq!(PixelFormat::from_name("bgr565"), Some(PixelFormat::Bgr565));
        assert_eq!(PixelFormat::from_name("Abgr32"), Some(PixelFormat::Abgr32));
        assert_eq!(
            PixelFormat::from_name("colorimetricgrayscale"),
            Some(PixelFormat::ColorimetricGrayscale)
        );
        assert_eq!(PixelFormat::from_name("RGB565"), None);
        assert_eq!(PixelFormat::from_name(""), None);
    }

    #[test]
    fn from_str() {
        assert_eq!(" BGR24 ".parse::<PixelFormat>(), Ok(PixelFormat::Bgr24));
        assert_eq!(
            "png".parse::<PixelFormat>(),
            Err(ColorError::UnknownFormat("png".into()))
        );
    }

    #[test]
    fn display_format() {
        assert_eq!(PixelFormat::Abgr1555.to_string(), "ABGR1555");
        assert_eq!(PixelFormat::VgaAttribute.to_string(), "VgaAttribute");
    }

    #[test]
    fn widths_and_storage() {
        let expected = [
            (PixelFormat::Abgr32, 32, Storage::U32),
            (PixelFormat::Bgr24, 24, Storage::U32),
            (PixelFormat::Abgr4444, 16, Storage::U16),
            (PixelFormat::Bgr12, 12, Storage::U16),
            (PixelFormat::Abgr1555, 16, Storage::U16),
            (PixelFormat::Bgr555, 15, Storage::U16),
            (PixelFormat::Bgr565, 16, Storage::U16),
            (PixelFormat::Abgr2222, 8, Storage::U8),
            (PixelFormat::Bgr222, 6, Storage::U8),
            (PixelFormat::Rgb233, 8, Storage::U8),
            (PixelFormat::Monochrome, 1, Storage::U8),
            (PixelFormat::Grayscale, 8, Storage::U8),
            (PixelFormat::ColorimetricGrayscale, 8, Storage::U8),
            (PixelFormat::VgaAttribute, 4, Storage::U8),
        ];
        for (format, bits, storage) in expected {
            assert_eq!(format.total_bits(), bits, "{format}");
            assert_eq!(format.storage(), storage, "{format}");
        }
    }

    #[test]
    fn alpha_presence() {
        let with_alpha: Vec<_> = PixelFormat::ALL
            .into_iter()
            .filter(|f| f.has_alpha())
            .collect();
        assert_eq!(
            with_alpha,
            [
                PixelFormat::Abgr32,
                PixelFormat::Abgr4444,
                PixelFormat::Abgr1555,
                PixelFormat::Abgr2222
            ]
        );
    }

    #[test]
    fn rounding_policies() {
        assert_eq!(PixelFormat::Bgr555.spec().rounding(), Rounding::Nearest);
        assert_eq!(PixelFormat::Abgr1555.spec().rounding(), Rounding::Nearest);
        assert_eq!(PixelFormat::Bgr565.spec().rounding(), Rounding::Nearest);
        assert_eq!(PixelFormat::Abgr4444.spec().rounding(), Rounding::Truncate);
        assert_eq!(PixelFormat::Rgb233.spec().rounding(), Rounding::Truncate);
    }

    #[test]
    fn only_abgr32_is_lossless() {
        let lossless: Vec<_> = PixelFormat::ALL
            .into_iter()
            .filter(|f| f.is_lossless())
            .collect();
        assert_eq!(lossless, [PixelFormat::Abgr32]);
    }
}
