use std::ffi::c_void;

use gl::types::{GLenum, GLuint};
use thiserror::Error;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Primitive {
    Points,
    Triangles,
    TriangleStrip,
}

impl Primitive {
    pub(crate) fn gl_enum(&self) -> GLenum {
        match self {
            Primitive::Points => gl::POINTS,
            Primitive::Triangles => gl::TRIANGLES,
            Primitive::TriangleStrip => gl::TRIANGLE_STRIP,
        }
    }
}

pub struct GeometryBuilder<'a> {
    attributes: Vec<VertexAttribute>,
    data: &'a [f32],
    indices: Option<&'a [u32]>,
    primitive: Primitive,
    vertices: Option<usize>,
}

impl<'a> GeometryBuilder<'a> {
    pub fn new(data: &'a [f32]) -> Self {
        Self {
            data,
            attributes: Vec::new(),
            indices: None,
            primitive: Primitive::Triangles,
            vertices: None,
        }
    }

    /// Geometry without vertex buffers; the vertex shader derives positions from `gl_VertexID`.
    pub fn attributeless(vertices: usize) -> Self {
        Self {
            vertices: Some(vertices),
            ..Self::new(&[])
        }
    }

    pub fn with_attribute(mut self, attr: VertexAttribute) -> Self {
        self.attributes.push(attr);
        self
    }

    pub fn with_indices(mut self, indices: &'a [u32]) -> Self {
        self.indices = Some(indices);
        self
    }

    pub fn with_primitive(mut self, primitive: Primitive) -> Self {
        self.primitive = primitive;
        self
    }

    fn vertex_count(&self) -> Result<usize, GBError> {
        if let Some(vertices) = self.vertices {
            return Ok(vertices);
        }

        let stride = stride(&self.attributes);

        if stride == 0 || self.data.len() % stride != 0 {
            return Err(GBError::InvalidDataLength);
        }

        Ok(self.data.len() / stride)
    }

    pub fn build(self) -> Result<Geometry, GBError> {
        let vertices = self.vertex_count()?;

        if let Some(indices) = self.indices {
            check_indices(indices, vertices)?;
        }

        let total_len = stride(&self.attributes);

        let mut vao = 0;
        let mut vbo = 0;
        let mut ebo = 0;

        unsafe {
            gl::GenVertexArrays(1, &mut vao);
            gl::BindVertexArray(vao);

            if self.vertices.is_none() {
                gl::GenBuffers(1, &mut vbo);
                gl::BindBuffer(gl::ARRAY_BUFFER, vbo);

                gl::BufferData(
                    gl::ARRAY_BUFFER,
                    std::mem::size_of_val(self.data) as isize,
                    self.data.as_ptr() as *const c_void,
                    gl::STATIC_DRAW,
                );

                let mut offset = 0;

                for (i, attr) in self.attributes.iter().enumerate() {
                    gl::VertexAttribPointer(
                        i as u32,
                        attr.size() as i32,
                        gl::FLOAT,
                        gl::FALSE,
                        (total_len * std::mem::size_of::<f32>()) as i32,
                        (offset * std::mem::size_of::<f32>()) as *const c_void,
                    );
                    offset += attr.size();
                    gl::EnableVertexAttribArray(i as u32);
                }
            }

            if let Some(indices) = self.indices {
                gl::GenBuffers(1, &mut ebo);
                gl::BindBuffer(gl::ELEMENT_ARRAY_BUFFER, ebo);
                gl::BufferData(
                    gl::ELEMENT_ARRAY_BUFFER,
                    std::mem::size_of_val(indices) as isize,
                    indices.as_ptr() as *const c_void,
                    gl::STATIC_DRAW,
                );
            }

            gl::BindVertexArray(0);
            gl::BindBuffer(gl::ARRAY_BUFFER, 0);
        }

        log::debug!(
            "Created geometry vao {vao} with {vertices} vertices, stride {}",
            total_len
        );

        Ok(Geometry {
            vao,
            vbo,
            ebo,
            vertices,
            indices: self.indices.map_or(0, |i| i.len()),
            primitive: self.primitive,
        })
    }
}

fn stride(attributes: &[VertexAttribute]) -> usize {
    attributes.iter().map(|a| a.size()).sum()
}

fn check_indices(indices: &[u32], vertices: usize) -> Result<(), GBError> {
    match indices.iter().find(|i| **i as usize >= vertices) {
        Some(i) => Err(GBError::IndexOutOfRange(*i, vertices)),
        None => Ok(()),
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum GBError {
    #[error("Invalid data length for given attributes")]
    InvalidDataLength,
    #[error("Index {0} out of range for {1} vertices")]
    IndexOutOfRange(u32, usize),
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum VertexAttribute {
    Float,
    Vec2,
    Vec3,
    Vec4,
}

impl VertexAttribute {
    pub fn size(&self) -> usize {
        match self {
            VertexAttribute::Float => 1,
            VertexAttribute::Vec2 => 2,
            VertexAttribute::Vec3 => 3,
            VertexAttribute::Vec4 => 4,
        }
    }
}

pub struct Geometry {
    vao: GLuint,
    vbo: GLuint,
    ebo: GLuint,
    vertices: usize,
    indices: usize,
    primitive: Primitive,
}

impl Geometry {
    pub fn vao(&self) -> GLuint {
        self.vao
    }

    pub fn vertices(&self) -> usize {
        self.vertices
    }

    pub fn indices(&self) -> usize {
        self.indices
    }

    pub fn primitive(&self) -> Primitive {
        self.primitive
    }
}

impl Drop for Geometry {
    fn drop(&mut self) {
        unsafe {
            if self.ebo != 0 {
                gl::DeleteBuffers(1, &self.ebo);
            }
            if self.vbo != 0 {
                gl::DeleteBuffers(1, &self.vbo);
            }
            gl::DeleteVertexArrays(1, &self.vao);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vertex_count_from_stride() {
        let data = [0.0; 30];
        let builder = GeometryBuilder::new(&data)
            .with_attribute(VertexAttribute::Vec3)
            .with_attribute(VertexAttribute::Vec2);

        assert_eq!(builder.vertex_count(), Ok(6));
    }

    #[test]
    fn mismatched_length_is_rejected() {
        let data = [0.0; 10];
        let builder = GeometryBuilder::new(&data).with_attribute(VertexAttribute::Vec3);

        assert_eq!(builder.vertex_count(), Err(GBError::InvalidDataLength));
    }

    #[test]
    fn missing_attributes_are_rejected() {
        let data = [0.0; 3];

        assert_eq!(
            GeometryBuilder::new(&data).vertex_count(),
            Err(GBError::InvalidDataLength)
        );
    }

    #[test]
    fn indices_must_address_vertices() {
        assert_eq!(check_indices(&[0, 1, 2, 2, 3, 0], 4), Ok(()));
        assert_eq!(
            check_indices(&[0, 1, 4], 4),
            Err(GBError::IndexOutOfRange(4, 4))
        );
    }

    #[test]
    fn attributeless_uses_given_count() {
        assert_eq!(GeometryBuilder::attributeless(1).vertex_count(), Ok(1));
    }

    #[test]
    fn attribute_sizes() {
        let sizes: Vec<_> = [
            VertexAttribute::Float,
            VertexAttribute::Vec2,
            VertexAttribute::Vec3,
            VertexAttribute::Vec4,
        ]
        .iter()
        .map(|a| a.size())
        .collect();

        assert_eq!(sizes, vec![1, 2, 3, 4]);
    }
}
