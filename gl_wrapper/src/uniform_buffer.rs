use std::ffi::c_void;

use gl::types::GLuint;
use thiserror::Error;

/// Fills a uniform block's backing bytes at driver-reported member offsets.
pub struct BlockWriter {
    data: Vec<u8>,
}

impl BlockWriter {
    pub fn new(size: usize) -> Self {
        Self {
            data: vec![0; size],
        }
    }

    fn write(&mut self, offset: usize, values: &[f32]) -> Result<(), BlockError> {
        let len = std::mem::size_of_val(values);
        let end = offset
            .checked_add(len)
            .filter(|end| *end <= self.data.len())
            .ok_or(BlockError::OutOfBounds {
                offset,
                len,
                size: self.data.len(),
            })?;

        let bytes = values.iter().flat_map(|v| v.to_ne_bytes());
        for (dst, src) in self.data[offset..end].iter_mut().zip(bytes) {
            *dst = src;
        }

        Ok(())
    }

    pub fn write_f32(&mut self, offset: usize, value: f32) -> Result<(), BlockError> {
        self.write(offset, &[value])
    }

    pub fn write_vec4(&mut self, offset: usize, value: [f32; 4]) -> Result<(), BlockError> {
        self.write(offset, &value)
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum BlockError {
    #[error("Write of {len} bytes at offset {offset} exceeds block of {size} bytes")]
    OutOfBounds { offset: usize, len: usize, size: usize },
}

pub struct UniformBuffer {
    id: GLuint,
    size: usize,
}

impl UniformBuffer {
    pub fn new(data: &[u8]) -> Self {
        let mut id = 0;

        unsafe {
            gl::GenBuffers(1, &mut id);
            gl::BindBuffer(gl::UNIFORM_BUFFER, id);
            gl::BufferData(
                gl::UNIFORM_BUFFER,
                data.len() as isize,
                data.as_ptr() as *const c_void,
                gl::DYNAMIC_DRAW,
            );
            gl::BindBuffer(gl::UNIFORM_BUFFER, 0);
        }

        Self {
            id,
            size: data.len(),
        }
    }

    pub fn update(&self, data: &[u8]) -> Result<(), BlockError> {
        if data.len() > self.size {
            return Err(BlockError::OutOfBounds {
                offset: 0,
                len: data.len(),
                size: self.size,
            });
        }

        unsafe {
            gl::BindBuffer(gl::UNIFORM_BUFFER, self.id);
            gl::BufferSubData(
                gl::UNIFORM_BUFFER,
                0,
                data.len() as isize,
                data.as_ptr() as *const c_void,
            );
            gl::BindBuffer(gl::UNIFORM_BUFFER, 0);
        }

        Ok(())
    }

    /// Attaches the buffer to an indexed uniform binding point.
    pub fn bind_base(&self, binding: GLuint) {
        unsafe { gl::BindBufferBase(gl::UNIFORM_BUFFER, binding, self.id) }
    }
}

impl Drop for UniformBuffer {
    fn drop(&mut self) {
        unsafe {
            gl::DeleteBuffers(1, &self.id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writes_at_offsets() {
        let mut writer = BlockWriter::new(40);

        writer.write_vec4(0, [1.0, 1.0, 0.75, 1.0]).unwrap();
        writer.write_f32(32, 0.25).unwrap();
        writer.write_f32(36, 0.45).unwrap();

        let bytes = writer.as_bytes();
        assert_eq!(bytes.len(), 40);
        assert_eq!(&bytes[8..12], &0.75_f32.to_ne_bytes());
        assert_eq!(&bytes[16..32], &[0; 16]);
        assert_eq!(&bytes[36..40], &0.45_f32.to_ne_bytes());
    }

    #[test]
    fn rejects_overflowing_writes() {
        let mut writer = BlockWriter::new(16);

        assert_eq!(
            writer.write_vec4(4, [0.0; 4]),
            Err(BlockError::OutOfBounds {
                offset: 4,
                len: 16,
                size: 16
            })
        );
        assert!(writer.write_f32(usize::MAX, 1.0).is_err());
        assert_eq!(writer.as_bytes(), &[0; 16]);
    }
}
