//! Generic pack/unpack engine.
//!
//! Linear layouts run the same shift-and-mask loop for every format; the
//! per-format differences are the field table and the [`Rounding`] rule.
//! The non-linear encodings get one small function each. Nothing here can
//! fail: every input color and every raw value has a defined result.

use crate::color::Color;
use crate::spec::{Channel, Encoding, PixelFormatSpec, Rounding};
use crate::transfer::{linear_to_srgb, srgb_to_linear};

// Rec. 601 luma weights, in thousandths so they sum to exactly 1000.
const LUMA_R: u32 = 299;
const LUMA_G: u32 = 587;
const LUMA_B: u32 = 114;

// Rec. 709 luminance weights applied to linear light.
const LUMINANCE_R: f64 = 0.2126;
const LUMINANCE_G: f64 = 0.7152;
const LUMINANCE_B: f64 = 0.0722;

const MONO_THRESHOLD: u8 = 0x80;

const VGA_BLUE: u32 = 1 << 0;
const VGA_GREEN: u32 = 1 << 1;
const VGA_RED: u32 = 1 << 2;
const VGA_INTENSE: u32 = 1 << 3;
// A channel lights its color bit at 50%.
const VGA_COLOR_THRESHOLD: u8 = 128;
// Intensity needs the brightest channel strictly above 75%.
const VGA_INTENSE_THRESHOLD: u8 = 192;
const VGA_HIGH: u8 = 0xFF;
const VGA_LOW: u8 = 0xAA;

impl PixelFormatSpec {
    /// Pack `color` into the low [`total_bits`](Self::total_bits) of a `u32`.
    ///
    /// Channels the layout does not store (alpha, for opaque formats) are
    /// dropped.
    pub fn encode(&self, color: Color) -> u32 {
        match self.encoding() {
            Encoding::Linear => self.pack_fields(color),
            Encoding::Monochrome => pack_monochrome(color),
            Encoding::Luma => pack_luma(color),
            Encoding::SrgbLuma => pack_srgb_luma(color),
            Encoding::VgaAttribute => pack_vga(color),
        }
    }

    /// Unpack `raw`, ignoring bits outside [`mask`](Self::mask).
    ///
    /// Alpha is opaque unless the layout stores it; any other channel the
    /// layout does not store is 0.
    pub fn decode(&self, raw: u32) -> Color {
        let raw = raw & self.mask();
        match self.encoding() {
            Encoding::Linear => self.unpack_fields(raw),
            Encoding::Monochrome => unpack_monochrome(raw),
            Encoding::Luma => unpack_luma(raw),
            Encoding::SrgbLuma => unpack_srgb_luma(raw),
            Encoding::VgaAttribute => unpack_vga(raw),
        }
    }

    fn pack_fields(&self, color: Color) -> u32 {
        let rounding = self.rounding();
        self.fields().iter().fold(0, |packed, field| {
            let value = quantize(color.channel(field.channel), field.width, rounding);
            packed | (value << field.offset)
        })
    }

    fn unpack_fields(&self, raw: u32) -> Color {
        let mut rgba = [0, 0, 0, u8::MAX];
        for field in self.fields() {
            let value = (raw >> field.offset) & field.max();
            rgba[field.channel.index()] = expand(value, field.width, self.rounding());
        }
        Color::from(rgba)
    }
}

/// 8-bit channel to a `width`-bit field.
#[inline]
fn quantize(byte: u8, width: u8, rounding: Rounding) -> u32 {
    let byte = u32::from(byte);
    let max = (1u32 << width) - 1;
    match rounding {
        Rounding::Truncate => byte >> (8 - width),
        Rounding::Nearest => (byte * max + 127) / 255,
    }
}

/// `width`-bit field to an 8-bit channel.
#[inline]
fn expand(value: u32, width: u8, rounding: Rounding) -> u8 {
    let max = (1u32 << width) - 1;
    let byte = match rounding {
        Rounding::Truncate => value * 255 / max,
        Rounding::Nearest => (value * 255 + max / 2) / max,
    };
    byte as u8
}

fn pack_monochrome(color: Color) -> u32 {
    u32::from((color.r() | color.g() | color.b()) >= MONO_THRESHOLD)
}

fn unpack_monochrome(raw: u32) -> Color {
    if raw & 1 == 1 {
        Color::WHITE
    } else {
        Color::BLACK
    }
}

fn pack_luma(color: Color) -> u32 {
    let weighted = LUMA_R * u32::from(color.r())
        + LUMA_G * u32::from(color.g())
        + LUMA_B * u32::from(color.b());
    (weighted + 500) / 1000
}

fn unpack_luma(raw: u32) -> Color {
    let y = raw as u8;
    Color::from_rgb8(y, y, y)
}

// Works on the float channels: a decoded gray is stored at f32 precision,
// so re-encoding it reproduces the packed byte.
fn pack_srgb_luma(color: Color) -> u32 {
    let linear = |channel| srgb_to_linear(f64::from(color.sc_channel(channel)));
    let y = LUMINANCE_R * linear(Channel::Red)
        + LUMINANCE_G * linear(Channel::Green)
        + LUMINANCE_B * linear(Channel::Blue);
    (y * 255.0).round().clamp(0.0, 255.0) as u32
}

fn unpack_srgb_luma(raw: u32) -> Color {
    let v = linear_to_srgb(f64::from(raw) / 255.0) as f32;
    Color::clamped(v, v, v, 1.0)
}

fn pack_vga(color: Color) -> u32 {
    let [r, g, b, _] = color.to_rgba8();
    let mut attr = 0;
    if b >= VGA_COLOR_THRESHOLD {
        attr |= VGA_BLUE;
    }
    if g >= VGA_COLOR_THRESHOLD {
        attr |= VGA_GREEN;
    }
    if r >= VGA_COLOR_THRESHOLD {
        attr |= VGA_RED;
    }
    if r.max(g).max(b) > VGA_INTENSE_THRESHOLD {
        attr |= VGA_INTENSE;
    }
    attr
}

fn unpack_vga(raw: u32) -> Color {
    let level = if raw & VGA_INTENSE != 0 {
        VGA_HIGH
    } else {
        VGA_LOW
    };
    let lit = |bit: u32| if raw & bit != 0 { level } else { 0 };
    Color::from_rgb8(lit(VGA_RED), lit(VGA_GREEN), lit(VGA_BLUE))
}
