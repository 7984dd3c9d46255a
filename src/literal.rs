//! Color literals: parsing and formatting.
//!
//! A literal's shape alone picks the codec that decodes it:
//!
//! | Literal      | Digit order | Codec                        |
//! |--------------|-------------|------------------------------|
//! | `#AARRGGBB`  | A R G B     | [`PixelFormat::Abgr32`]      |
//! | `#RRGGBB`    | R G B       | [`PixelFormat::Bgr24`]       |
//! | `#ARGB`      | A R G B     | [`PixelFormat::Abgr4444`]    |
//! | `#RGB`       | R G B       | [`PixelFormat::Bgr12`]       |
//! | name         |             | [`named`](crate::named) table |
//!
//! Alpha always leads, matching the `H` output format.

use core::fmt;
use core::str::FromStr;

use crate::color::Color;
use crate::error::ColorError;
use crate::format::PixelFormat;
use crate::named;
use crate::spec::Channel;

const WITH_ALPHA: [Channel; 4] = [Channel::Alpha, Channel::Red, Channel::Green, Channel::Blue];
const OPAQUE: [Channel; 3] = [Channel::Red, Channel::Green, Channel::Blue];

/// Syntactic class of a color literal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum LiteralShape {
    /// `#AARRGGBB`.
    Hex8,
    /// `#RRGGBB`.
    Hex6,
    /// `#ARGB`.
    Hex4,
    /// `#RGB`.
    Hex3,
    /// A name from the [`named`](crate::named) table.
    Named,
}

impl LiteralShape {
    /// Classify `literal` without decoding it. Surrounding whitespace is
    /// ignored. Returns `None` if no shape matches.
    pub fn detect(literal: &str) -> Option<Self> {
        let literal = literal.trim();
        match literal.strip_prefix('#') {
            Some(digits) => Self::from_digits(digits),
            None => named::lookup(literal).map(|_| Self::Named),
        }
    }

    fn from_digits(digits: &str) -> Option<Self> {
        if !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return None;
        }
        match digits.len() {
            8 => Some(Self::Hex8),
            6 => Some(Self::Hex6),
            4 => Some(Self::Hex4),
            3 => Some(Self::Hex3),
            _ => None,
        }
    }

    /// Codec that decodes this shape; `None` for names.
    pub fn format(self) -> Option<PixelFormat> {
        match self {
            Self::Hex8 => Some(PixelFormat::Abgr32),
            Self::Hex6 => Some(PixelFormat::Bgr24),
            Self::Hex4 => Some(PixelFormat::Abgr4444),
            Self::Hex3 => Some(PixelFormat::Bgr12),
            Self::Named => None,
        }
    }
}

/// Reorder literal digits (alpha first, red before blue) into the codec's
/// field layout.
fn literal_to_packed(format: PixelFormat, digits: &str, value: u32) -> u32 {
    let spec = format.spec();
    let order: &[Channel] = if spec.has_alpha() {
        &WITH_ALPHA
    } else {
        &OPAQUE
    };
    let width = digits.len() / order.len() * 4;
    let mask = (1u32 << width) - 1;
    let mut packed = 0;
    for (i, &channel) in order.iter().enumerate() {
        let shift = width * (order.len() - 1 - i);
        if let Some(field) = spec.field(channel) {
            packed |= ((value >> shift) & mask) << field.offset;
        }
    }
    packed
}

fn parse_literal(literal: &str) -> Option<Color> {
    let literal = literal.trim();
    let Some(digits) = literal.strip_prefix('#') else {
        return named::lookup(literal);
    };
    let format = LiteralShape::from_digits(digits)?.format()?;
    let value = u32::from_str_radix(digits, 16).ok()?;
    Some(format.decode(literal_to_packed(format, digits, value)))
}

impl Color {
    /// Parse a hex literal or color name, returning `None` on failure.
    pub fn try_parse(literal: &str) -> Option<Self> {
        parse_literal(literal)
    }

    /// Parse a hex literal or color name.
    pub fn parse(literal: &str) -> Result<Self, ColorError> {
        parse_literal(literal).ok_or_else(|| {
            log::debug!("rejected color literal {literal:?}");
            ColorError::Format(literal.to_owned())
        })
    }

    /// Render with a format token.
    ///
    /// - `H` / `h` (or empty): `#AARRGGBB` in upper / lower case hex
    /// - `B` / `b`: `A:255 R:0 G:0 B:0`, byte channels
    /// - `F` / `f`: the same with normalized float channels
    ///
    /// Anything else is a template in which `AA`, `RR`, `GG`, `BB` are
    /// replaced by upper case two-digit hex and `aa`, `rr`, `gg`, `bb` by
    /// lower case; other text is copied.
    pub fn format(&self, token: &str) -> String {
        let [r, g, b, a] = self.to_rgba8();
        let [sr, sg, sb, sa] = self.to_sc_rgba();
        match token {
            "" | "H" => format!("#{a:02X}{r:02X}{g:02X}{b:02X}"),
            "h" => format!("#{a:02x}{r:02x}{g:02x}{b:02x}"),
            "B" | "b" => format!("A:{a} R:{r} G:{g} B:{b}"),
            "F" | "f" => format!("A:{sa} R:{sr} G:{sg} B:{sb}"),
            template => self.fill_template(template),
        }
    }

    fn fill_template(&self, template: &str) -> String {
        let mut out = String::with_capacity(template.len());
        let mut rest = template;
        while let Some(ch) = rest.chars().next() {
            if let Some(pair) = rest.get(..2)
                && let Some((channel, upper)) = hex_token(pair)
            {
                let v = self.channel(channel);
                if upper {
                    out.push_str(&format!("{v:02X}"));
                } else {
                    out.push_str(&format!("{v:02x}"));
                }
                rest = &rest[2..];
            } else {
                out.push(ch);
                rest = &rest[ch.len_utf8()..];
            }
        }
        out
    }
}

fn hex_token(pair: &str) -> Option<(Channel, bool)> {
    match pair {
        "AA" => Some((Channel::Alpha, true)),
        "aa" => Some((Channel::Alpha, false)),
        "RR" => Some((Channel::Red, true)),
        "rr" => Some((Channel::Red, false)),
        "GG" => Some((Channel::Green, true)),
        "gg" => Some((Channel::Green, false)),
        "BB" => Some((Channel::Blue, true)),
        "bb" => Some((Channel::Blue, false)),
        _ => None,
    }
}

impl fmt::Display for Color {
    /// `#AARRGGBB`, upper case.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [r, g, b, a] = self.to_rgba8();
        write!(f, "#{a:02X}{r:02X}{g:02X}{b:02X}")
    }
}

impl FromStr for Color {
    type Err = ColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
