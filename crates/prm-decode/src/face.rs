//! Face record decoding.

use glam::Vec2;

use crate::cursor::{ByteCursor, ByteSource};
use crate::error::DecodeResult;

/// Size of one face record in the stream, whatever its corner count.
pub const FACE_RECORD_SIZE: usize = 2 + 2 + 4 * 2 + 4 * 4 + 4 * 8;

/// Flag bit marking a quad.
pub const FLAG_QUAD: u16 = 0x0001;

/// Texture index meaning "untextured".
pub const NO_TEXTURE: i16 = -1;

/// One face as stored in the stream.
///
/// Four index, colour and UV slots are always present. Only the first
/// [`corner_count`](Self::corner_count) of them carry meaning.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FaceRecord {
    pub flags: u16,
    pub texture_index: i16,
    pub original_indices: [u16; 4],
    /// RGBA8 colour per corner.
    pub colors: [[u8; 4]; 4],
    pub uv: [Vec2; 4],
}

impl FaceRecord {
    /// 4 for quads, 3 for triangles.
    #[must_use]
    pub fn corner_count(&self) -> usize {
        3 + usize::from(self.flags & FLAG_QUAD)
    }

    #[must_use]
    pub fn is_quad(&self) -> bool {
        self.flags & FLAG_QUAD != 0
    }

    /// Relative texture file name, e.g. `carb.bmp` for texture 1 of `car`.
    ///
    /// Resolving the name to an actual file is left to the caller.
    #[must_use]
    pub fn texture_name(&self, base_name: &str) -> Option<String> {
        let offset = u32::try_from(self.texture_index).ok()?;
        let letter = char::from_u32(u32::from('a') + offset)?;
        Some(format!("{base_name}{letter}.bmp"))
    }
}

/// Read one face record, consuming exactly [`FACE_RECORD_SIZE`] bytes.
pub fn decode_face<S: ByteSource>(cursor: &mut ByteCursor<S>) -> DecodeResult<FaceRecord> {
    let flags = cursor.read_u16()?;
    let texture_index = cursor.read_i16()?;

    let mut original_indices = [0u16; 4];
    for index in &mut original_indices {
        *index = cursor.read_u16()?;
    }

    let mut colors = [[0u8; 4]; 4];
    for color in &mut colors {
        for channel in color.iter_mut() {
            *channel = cursor.read_u8()?;
        }
    }

    let mut uv = [Vec2::ZERO; 4];
    for coord in &mut uv {
        let u = cursor.read_f32()?;
        let v = cursor.read_f32()?;
        *coord = Vec2::new(u, v);
    }

    Ok(FaceRecord {
        flags,
        texture_index,
        original_indices,
        colors,
        uv,
    })
}
