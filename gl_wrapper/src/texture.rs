use std::ffi::c_void;

use gl::types::{GLenum, GLint, GLuint};
use thiserror::Error;

pub struct Texture2D {
    pub(crate) id: GLuint,
    width: u32,
    height: u32,
    filter: TextureFilter,
}

impl Texture2D {
    /// Creates a texture, `data` of `None` only allocates storage.
    pub fn new(
        width: u32,
        height: u32,
        data: Option<&[u8]>,
        format: TextureFormats,
        filter: TextureFilter,
    ) -> Result<Self, TextureError> {
        check_len(width, height, data, format)?;

        let mut id = 0;

        unsafe {
            gl::GenTextures(1, &mut id);
            gl::BindTexture(gl::TEXTURE_2D, id);

            let wrap = match format {
                TextureFormats::Depth24 => gl::CLAMP_TO_EDGE,
                _ => gl::REPEAT,
            };

            gl::TexParameteri(gl::TEXTURE_2D, gl::TEXTURE_WRAP_S, wrap as i32);
            gl::TexParameteri(gl::TEXTURE_2D, gl::TEXTURE_WRAP_T, wrap as i32);
            gl::TexParameteri(gl::TEXTURE_2D, gl::TEXTURE_MIN_FILTER, filter.min() as i32);
            gl::TexParameteri(gl::TEXTURE_2D, gl::TEXTURE_MAG_FILTER, filter.mag() as i32);

            upload(gl::TEXTURE_2D, width, height, data, format);

            if filter.has_mipmaps() {
                gl::GenerateMipmap(gl::TEXTURE_2D);
            }
        }

        Ok(Self {
            id,
            width,
            height,
            filter,
        })
    }

    pub fn update(
        &mut self,
        width: u32,
        height: u32,
        data: Option<&[u8]>,
        format: TextureFormats,
    ) -> Result<(), TextureError> {
        check_len(width, height, data, format)?;

        unsafe {
            gl::BindTexture(gl::TEXTURE_2D, self.id);
            upload(gl::TEXTURE_2D, width, height, data, format);

            // level 0 changed, the rest of the chain is stale
            if self.filter.has_mipmaps() {
                gl::GenerateMipmap(gl::TEXTURE_2D);
            }
        }

        self.width = width;
        self.height = height;

        Ok(())
    }

    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn bind(&self, unit: u8) {
        unsafe {
            gl::ActiveTexture(gl::TEXTURE0 + unit as u32);
            gl::BindTexture(gl::TEXTURE_2D, self.id)
        }
    }
}

impl Drop for Texture2D {
    fn drop(&mut self) {
        unsafe {
            gl::DeleteTextures(1, &self.id);
        }
    }
}

/// One face of a cube map.
pub struct CubeFace<'a> {
    pub width: u32,
    pub height: u32,
    pub format: TextureFormats,
    pub data: &'a [u8],
}

pub struct CubeMap {
    id: GLuint,
}

impl CubeMap {
    /// Faces in GL order: +X, -X, +Y, -Y, +Z, -Z.
    pub fn new(faces: &[CubeFace<'_>; 6]) -> Result<Self, TextureError> {
        for face in faces {
            if face.format == TextureFormats::Depth24 {
                return Err(TextureError::UnsupportedFormat);
            }
            check_len(face.width, face.height, Some(face.data), face.format)?;
        }

        let mut id = 0;

        unsafe {
            gl::GenTextures(1, &mut id);
            gl::BindTexture(gl::TEXTURE_CUBE_MAP, id);

            for (i, face) in faces.iter().enumerate() {
                upload(
                    gl::TEXTURE_CUBE_MAP_POSITIVE_X + i as u32,
                    face.width,
                    face.height,
                    Some(face.data),
                    face.format,
                );
            }

            let target = gl::TEXTURE_CUBE_MAP;
            gl::TexParameteri(target, gl::TEXTURE_MIN_FILTER, gl::LINEAR as i32);
            gl::TexParameteri(target, gl::TEXTURE_MAG_FILTER, gl::LINEAR as i32);
            gl::TexParameteri(target, gl::TEXTURE_WRAP_S, gl::CLAMP_TO_EDGE as i32);
            gl::TexParameteri(target, gl::TEXTURE_WRAP_T, gl::CLAMP_TO_EDGE as i32);
            gl::TexParameteri(target, gl::TEXTURE_WRAP_R, gl::CLAMP_TO_EDGE as i32);
        }

        Ok(Self { id })
    }

    pub fn bind(&self, unit: u8) {
        unsafe {
            gl::ActiveTexture(gl::TEXTURE0 + unit as u32);
            gl::BindTexture(gl::TEXTURE_CUBE_MAP, self.id)
        }
    }
}

impl Drop for CubeMap {
    fn drop(&mut self) {
        unsafe {
            gl::DeleteTextures(1, &self.id);
        }
    }
}

unsafe fn upload(
    target: GLenum,
    width: u32,
    height: u32,
    data: Option<&[u8]>,
    format: TextureFormats,
) {
    // rgb rows are not 4 byte aligned
    gl::PixelStorei(gl::UNPACK_ALIGNMENT, 1);

    gl::TexImage2D(
        target,
        0,
        format.internal_format(),
        width as i32,
        height as i32,
        0,
        format.format(),
        format.data_type(),
        data.map_or(std::ptr::null(), |d| d.as_ptr() as *const c_void),
    );
}

fn check_len(
    width: u32,
    height: u32,
    data: Option<&[u8]>,
    format: TextureFormats,
) -> Result<(), TextureError> {
    match data {
        Some(d) if d.len() != expected_len(width, height, format) => {
            Err(TextureError::InvalidSrcLength)
        }
        _ => Ok(()),
    }
}

pub fn expected_len(width: u32, height: u32, format: TextureFormats) -> usize {
    width as usize * height as usize * format.bytes_per_pixel()
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TextureError {
    #[error("Invalid source data length")]
    InvalidSrcLength,
    #[error("Format cannot be used for this texture type")]
    UnsupportedFormat,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum TextureFormats {
    Red,
    Rgb,
    Rgba,
    Depth24,
}

impl TextureFormats {
    /// Matches an 8-bit channel count, as decoded from image files.
    pub fn from_channels(channels: usize) -> Option<Self> {
        match channels {
            1 => Some(TextureFormats::Red),
            3 => Some(TextureFormats::Rgb),
            4 => Some(TextureFormats::Rgba),
            _ => None,
        }
    }

    pub fn bytes_per_pixel(&self) -> usize {
        match self {
            TextureFormats::Red => 1,
            TextureFormats::Rgb => 3,
            TextureFormats::Rgba => 4,
            TextureFormats::Depth24 => 4,
        }
    }

    fn internal_format(&self) -> GLint {
        let f = match self {
            TextureFormats::Red => gl::R8,
            TextureFormats::Rgb => gl::RGB8,
            TextureFormats::Rgba => gl::RGBA8,
            TextureFormats::Depth24 => gl::DEPTH_COMPONENT24,
        };
        f as GLint
    }

    fn format(&self) -> GLenum {
        match self {
            TextureFormats::Red => gl::RED,
            TextureFormats::Rgb => gl::RGB,
            TextureFormats::Rgba => gl::RGBA,
            TextureFormats::Depth24 => gl::DEPTH_COMPONENT,
        }
    }

    fn data_type(&self) -> GLenum {
        match self {
            TextureFormats::Depth24 => gl::UNSIGNED_INT,
            _ => gl::UNSIGNED_BYTE,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum TextureFilter {
    Nearest,
    Linear,
    /// Trilinear filtering, mipmaps are generated on upload.
    Mipmap,
}

impl TextureFilter {
    pub fn has_mipmaps(&self) -> bool {
        matches!(self, TextureFilter::Mipmap)
    }

    fn min(&self) -> GLenum {
        match self {
            TextureFilter::Nearest => gl::NEAREST,
            TextureFilter::Linear => gl::LINEAR,
            TextureFilter::Mipmap => gl::LINEAR_MIPMAP_LINEAR,
        }
    }

    fn mag(&self) -> GLenum {
        match self {
            TextureFilter::Nearest => gl::NEAREST,
            TextureFilter::Linear | TextureFilter::Mipmap => gl::LINEAR,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lengths_per_format() {
        assert_eq!(expected_len(3, 2, TextureFormats::Red), 6);
        assert_eq!(expected_len(3, 2, TextureFormats::Rgb), 18);
        assert_eq!(expected_len(3, 2, TextureFormats::Rgba), 24);
        assert_eq!(expected_len(3, 2, TextureFormats::Depth24), 24);
    }

    #[test]
    fn length_check() {
        assert_eq!(check_len(2, 2, Some(&[0; 12]), TextureFormats::Rgb), Ok(()));
        assert_eq!(
            check_len(2, 2, Some(&[0; 11]), TextureFormats::Rgb),
            Err(TextureError::InvalidSrcLength)
        );
        assert_eq!(check_len(2, 2, None, TextureFormats::Rgba), Ok(()));
    }

    #[test]
    fn channel_mapping() {
        assert_eq!(TextureFormats::from_channels(1), Some(TextureFormats::Red));
        assert_eq!(TextureFormats::from_channels(3), Some(TextureFormats::Rgb));
        assert_eq!(TextureFormats::from_channels(4), Some(TextureFormats::Rgba));
        assert_eq!(TextureFormats::from_channels(2), None);
    }

    #[test]
    fn only_trilinear_keeps_mipmaps() {
        assert!(TextureFilter::Mipmap.has_mipmaps());
        assert!(!TextureFilter::Linear.has_mipmaps());
        assert!(!TextureFilter::Nearest.has_mipmaps());
        assert_eq!(TextureFilter::Mipmap.min(), gl::LINEAR_MIPMAP_LINEAR);
    }
}
