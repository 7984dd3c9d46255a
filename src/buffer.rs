//! Slice codecs.
//!
//! Packed values are stored little-endian in their [`Storage`] width, one
//! after another with no padding: a BGR24 pixel occupies four bytes with
//! the top byte zero.

use crate::color::Color;
use crate::error::BufferError;
use crate::spec::{PixelFormatSpec, Storage};

impl PixelFormatSpec {
    /// Bytes needed to store `pixels` packed values.
    pub const fn buffer_len(&self, pixels: usize) -> usize {
        pixels * self.storage().bytes()
    }

    /// Pack every color into `out`, which must be exactly
    /// [`buffer_len(colors.len())`](Self::buffer_len) bytes.
    pub fn encode_slice(&self, colors: &[Color], out: &mut [u8]) -> Result<(), BufferError> {
        let unit = self.storage().bytes();
        let expected = self.buffer_len(colors.len());
        if out.len() != expected {
            return Err(BufferError::LengthMismatch {
                expected,
                actual: out.len(),
            });
        }
        for (color, chunk) in colors.iter().zip(out.chunks_exact_mut(unit)) {
            write_packed(self.storage(), self.encode(*color), chunk);
        }
        Ok(())
    }

    /// Unpack `data` into `out`, which must hold exactly one color per
    /// stored value.
    pub fn decode_slice(&self, data: &[u8], out: &mut [Color]) -> Result<(), BufferError> {
        let unit = self.check_whole_pixels(data)?;
        let expected = self.buffer_len(out.len());
        if data.len() != expected {
            return Err(BufferError::LengthMismatch {
                expected,
                actual: data.len(),
            });
        }
        for (chunk, color) in data.chunks_exact(unit).zip(out.iter_mut()) {
            *color = self.decode(read_packed(chunk));
        }
        Ok(())
    }

    /// Unpack `data` into a new vector.
    pub fn decode_vec(&self, data: &[u8]) -> Result<Vec<Color>, BufferError> {
        let unit = self.check_whole_pixels(data)?;
        Ok(data
            .chunks_exact(unit)
            .map(|chunk| self.decode(read_packed(chunk)))
            .collect())
    }

    fn check_whole_pixels(&self, data: &[u8]) -> Result<usize, BufferError> {
        let unit = self.storage().bytes();
        if data.len() % unit != 0 {
            return Err(BufferError::PartialPixel {
                len: data.len(),
                unit,
            });
        }
        Ok(unit)
    }
}

fn write_packed(storage: Storage, value: u32, out: &mut [u8]) {
    match storage {
        Storage::U8 => out[0] = value as u8,
        Storage::U16 => out.copy_from_slice(&(value as u16).to_le_bytes()),
        Storage::U32 => out.copy_from_slice(&value.to_le_bytes()),
    }
}

fn read_packed(chunk: &[u8]) -> u32 {
    chunk
        .iter()
        .rev()
        .fold(0, |acc, &byte| (acc << 8) | u32::from(byte))
}
