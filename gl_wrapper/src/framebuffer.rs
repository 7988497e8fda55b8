use std::ffi::c_void;

use gl::types::GLuint;
use thiserror::Error;

use crate::texture::{Texture2D, TextureError, TextureFilter, TextureFormats};

/// Off-screen render target with RGBA color and depth attachments.
pub struct FrameBuffer {
    id: GLuint,
    color: Texture2D,
    depth: Texture2D,
}

impl FrameBuffer {
    pub fn new(width: u32, height: u32) -> Result<Self, FrameBufferError> {
        let color = Texture2D::new(
            width,
            height,
            None,
            TextureFormats::Rgba,
            TextureFilter::Linear,
        )?;
        let depth = Texture2D::new(
            width,
            height,
            None,
            TextureFormats::Depth24,
            TextureFilter::Nearest,
        )?;

        let mut id = 0;

        let status = unsafe {
            gl::GenFramebuffers(1, &mut id);
            gl::BindFramebuffer(gl::FRAMEBUFFER, id);

            gl::FramebufferTexture2D(
                gl::FRAMEBUFFER,
                gl::COLOR_ATTACHMENT0,
                gl::TEXTURE_2D,
                color.id,
                0,
            );
            gl::FramebufferTexture2D(
                gl::FRAMEBUFFER,
                gl::DEPTH_ATTACHMENT,
                gl::TEXTURE_2D,
                depth.id,
                0,
            );

            let status = gl::CheckFramebufferStatus(gl::FRAMEBUFFER);
            gl::BindFramebuffer(gl::FRAMEBUFFER, 0);
            status
        };

        let fb = Self { id, color, depth };

        if status != gl::FRAMEBUFFER_COMPLETE {
            log::error!("Framebuffer {id} is not complete: 0x{status:x}");
            return Err(FrameBufferError::Incomplete(status));
        }

        Ok(fb)
    }

    pub fn size(&self) -> (u32, u32) {
        self.color.size()
    }

    /// Reallocates both attachments.
    pub fn resize(&mut self, width: u32, height: u32) -> Result<(), FrameBufferError> {
        self.color.update(width, height, None, TextureFormats::Rgba)?;
        self.depth.update(width, height, None, TextureFormats::Depth24)?;

        Ok(())
    }

    /// Binds for drawing and sets the viewport to cover the attachments.
    pub fn bind(&self) {
        let (width, height) = self.size();

        unsafe {
            gl::BindFramebuffer(gl::FRAMEBUFFER, self.id);
            gl::Viewport(0, 0, width as i32, height as i32);
        }
    }

    pub fn bind_default() {
        unsafe {
            gl::BindFramebuffer(gl::FRAMEBUFFER, 0);
        }
    }

    /// Tightly packed RGBA rows, bottom row first.
    pub fn read_pixels(&self) -> Vec<u8> {
        let (width, height) = self.size();
        let mut pixels = vec![0_u8; width as usize * height as usize * 4];

        unsafe {
            gl::BindFramebuffer(gl::READ_FRAMEBUFFER, self.id);
            gl::PixelStorei(gl::PACK_ALIGNMENT, 1);
            gl::ReadPixels(
                0,
                0,
                width as i32,
                height as i32,
                gl::RGBA,
                gl::UNSIGNED_BYTE,
                pixels.as_mut_ptr() as *mut c_void,
            );
            gl::BindFramebuffer(gl::READ_FRAMEBUFFER, 0);
        }

        pixels
    }
}

impl Drop for FrameBuffer {
    fn drop(&mut self) {
        unsafe {
            gl::DeleteFramebuffers(1, &self.id);
        }
    }
}

#[derive(Debug, Error)]
pub enum FrameBufferError {
    #[error("Framebuffer incomplete (status 0x{0:x})")]
    Incomplete(u32),
    #[error(transparent)]
    Texture(#[from] TextureError),
}
