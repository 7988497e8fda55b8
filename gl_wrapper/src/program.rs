use std::cell::RefCell;
use std::collections::HashMap;
use std::ffi::{c_char, CStr, CString};
use std::fmt::{Display, Formatter};

use cgmath::{Matrix, Matrix3, Matrix4, Vector2, Vector3, Vector4};
use gl::types::{GLenum, GLint, GLuint};
use thiserror::Error;

use crate::{as_c_ptr, log_to_string};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ShaderStage {
    Vertex,
    Geometry,
    Fragment,
}

impl ShaderStage {
    fn gl_enum(&self) -> GLenum {
        match self {
            ShaderStage::Vertex => gl::VERTEX_SHADER,
            ShaderStage::Geometry => gl::GEOMETRY_SHADER,
            ShaderStage::Fragment => gl::FRAGMENT_SHADER,
        }
    }
}

impl Display for ShaderStage {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ShaderStage::Vertex => "vertex",
            ShaderStage::Geometry => "geometry",
            ShaderStage::Fragment => "fragment",
        };
        f.write_str(name)
    }
}

pub struct ProgramBuilder<'a> {
    stages: Vec<(ShaderStage, &'a str)>,
}

impl<'a> ProgramBuilder<'a> {
    pub fn new(vert_src: &'a str, frag_src: &'a str) -> Self {
        Self {
            stages: vec![
                (ShaderStage::Vertex, vert_src),
                (ShaderStage::Fragment, frag_src),
            ],
        }
    }

    pub fn with_geometry(mut self, geom_src: &'a str) -> Self {
        self.stages.insert(1, (ShaderStage::Geometry, geom_src));
        self
    }

    pub fn build(self) -> Result<Program, PBError> {
        let sources = self
            .stages
            .iter()
            .map(|(stage, src)| {
                CString::new(*src)
                    .map(|c| (*stage, c))
                    .map_err(|_| PBError::InvalidSource(*stage))
            })
            .collect::<Result<Vec<_>, _>>()?;

        let mut shaders = Vec::with_capacity(sources.len());

        for (stage, src) in &sources {
            match unsafe { compile(*stage, src) } {
                Ok(id) => shaders.push(id),
                Err(e) => {
                    unsafe { shaders.iter().for_each(|s| gl::DeleteShader(*s)) };
                    return Err(e);
                }
            }
        }

        let mut success: GLint = 0;

        unsafe {
            let program = gl::CreateProgram();
            for shader in &shaders {
                gl::AttachShader(program, *shader);
            }

            gl::LinkProgram(program);
            gl::GetProgramiv(program, gl::LINK_STATUS, &mut success);

            for shader in &shaders {
                gl::DetachShader(program, *shader);
                gl::DeleteShader(*shader);
            }

            if success != gl::TRUE as GLint {
                let mut len: GLint = 0;
                gl::GetProgramiv(program, gl::INFO_LOG_LENGTH, &mut len);

                let mut buf = vec![0_u8; len.max(1) as usize];
                gl::GetProgramInfoLog(
                    program,
                    buf.len() as i32,
                    std::ptr::null_mut(),
                    as_c_ptr(&mut buf),
                );
                gl::DeleteProgram(program);

                let log = log_to_string(&buf);
                log::error!("Linking failed: {log}");
                return Err(PBError::Linking(log));
            }

            log::debug!("Linked program {program} from {} stages", shaders.len());

            Ok(Program {
                id: program,
                uniforms: RefCell::new(HashMap::new()),
            })
        }
    }
}

unsafe fn compile(stage: ShaderStage, src: &CStr) -> Result<GLuint, PBError> {
    let shader = gl::CreateShader(stage.gl_enum());

    gl::ShaderSource(
        shader,
        1,
        (&src.as_ptr()) as *const *const c_char,
        std::ptr::null(),
    );
    gl::CompileShader(shader);

    let mut success: GLint = 0;
    gl::GetShaderiv(shader, gl::COMPILE_STATUS, &mut success);

    if success != gl::TRUE as GLint {
        let mut len: GLint = 0;
        gl::GetShaderiv(shader, gl::INFO_LOG_LENGTH, &mut len);

        let mut buf = vec![0_u8; len.max(1) as usize];
        gl::GetShaderInfoLog(
            shader,
            buf.len() as i32,
            std::ptr::null_mut(),
            as_c_ptr(&mut buf),
        );
        gl::DeleteShader(shader);

        let log = log_to_string(&buf);
        log::error!("Compilation of {stage} shader failed: {log}");
        return Err(PBError::Compilation { stage, log });
    }

    Ok(shader)
}

#[derive(Debug, Error)]
pub enum PBError {
    #[error("{stage} shader: {log}")]
    Compilation { stage: ShaderStage, log: String },
    #[error("{0}")]
    Linking(String),
    #[error("{0} shader source contains a NUL byte")]
    InvalidSource(ShaderStage),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum UniformError {
    #[error("Uniform '{0}' not found")]
    NotFound(String),
    #[error("Uniform block '{0}' not found")]
    BlockNotFound(String),
    #[error("Uniform name '{0}' contains a NUL byte")]
    InvalidName(String),
}

/// A value that can be written to the uniform at `location` of `program`.
pub trait UniformValue {
    fn upload(&self, program: GLuint, location: GLint);
}

impl UniformValue for i32 {
    fn upload(&self, program: GLuint, location: GLint) {
        unsafe { gl::ProgramUniform1i(program, location, *self) }
    }
}

impl UniformValue for u32 {
    fn upload(&self, program: GLuint, location: GLint) {
        unsafe { gl::ProgramUniform1ui(program, location, *self) }
    }
}

impl UniformValue for bool {
    fn upload(&self, program: GLuint, location: GLint) {
        unsafe { gl::ProgramUniform1i(program, location, *self as i32) }
    }
}

impl UniformValue for f32 {
    fn upload(&self, program: GLuint, location: GLint) {
        unsafe { gl::ProgramUniform1f(program, location, *self) }
    }
}

impl UniformValue for Vector2<f32> {
    fn upload(&self, program: GLuint, location: GLint) {
        unsafe { gl::ProgramUniform2f(program, location, self.x, self.y) }
    }
}

impl UniformValue for Vector3<f32> {
    fn upload(&self, program: GLuint, location: GLint) {
        unsafe { gl::ProgramUniform3f(program, location, self.x, self.y, self.z) }
    }
}

impl UniformValue for Vector4<f32> {
    fn upload(&self, program: GLuint, location: GLint) {
        unsafe { gl::ProgramUniform4f(program, location, self.x, self.y, self.z, self.w) }
    }
}

impl UniformValue for Matrix3<f32> {
    fn upload(&self, program: GLuint, location: GLint) {
        unsafe { gl::ProgramUniformMatrix3fv(program, location, 1, gl::FALSE, self.as_ptr()) }
    }
}

impl UniformValue for Matrix4<f32> {
    fn upload(&self, program: GLuint, location: GLint) {
        unsafe { gl::ProgramUniformMatrix4fv(program, location, 1, gl::FALSE, self.as_ptr()) }
    }
}

#[derive(Copy, Clone, Debug)]
pub struct UniformBlock {
    pub index: GLuint,
    pub size: usize,
}

pub struct Program {
    id: GLuint,
    // misses are cached as -1 so each missing name is reported once
    uniforms: RefCell<HashMap<String, GLint>>,
}

impl Program {
    pub fn get_id(&self) -> GLuint {
        self.id
    }

    pub fn uniform_location(&self, name: &str) -> Option<GLint> {
        if let Some(location) = self.uniforms.borrow().get(name) {
            return (*location >= 0).then_some(*location);
        }

        let location = match CString::new(name) {
            Ok(c_name) => unsafe { gl::GetUniformLocation(self.id, c_name.as_ptr()) },
            Err(_) => -1,
        };

        if location < 0 {
            log::warn!("Uniform '{name}' not found in program {}", self.id);
        }

        self.uniforms.borrow_mut().insert(name.to_owned(), location);

        (location >= 0).then_some(location)
    }

    /// Uploads `value` to the named uniform without binding the program.
    pub fn set_uniform<T: UniformValue>(&self, name: &str, value: T) -> Result<(), UniformError> {
        let location = self
            .uniform_location(name)
            .ok_or_else(|| UniformError::NotFound(name.to_owned()))?;

        value.upload(self.id, location);

        Ok(())
    }

    pub fn uniform_block(&self, name: &str) -> Result<UniformBlock, UniformError> {
        let c_name = CString::new(name).map_err(|_| UniformError::InvalidName(name.into()))?;

        let index = unsafe { gl::GetUniformBlockIndex(self.id, c_name.as_ptr()) };
        if index == gl::INVALID_INDEX {
            return Err(UniformError::BlockNotFound(name.to_owned()));
        }

        let mut size: GLint = 0;
        unsafe {
            gl::GetActiveUniformBlockiv(self.id, index, gl::UNIFORM_BLOCK_DATA_SIZE, &mut size);
        }

        Ok(UniformBlock {
            index,
            size: size.max(0) as usize,
        })
    }

    /// Byte offsets of block members, in the order of `names`.
    pub fn uniform_offsets(&self, names: &[&str]) -> Result<Vec<usize>, UniformError> {
        let c_names = names
            .iter()
            .map(|n| CString::new(*n).map_err(|_| UniformError::InvalidName((*n).to_owned())))
            .collect::<Result<Vec<_>, _>>()?;
        let ptrs: Vec<*const c_char> = c_names.iter().map(|n| n.as_ptr()).collect();

        let mut indices = vec![0 as GLuint; names.len()];
        unsafe {
            gl::GetUniformIndices(
                self.id,
                names.len() as i32,
                ptrs.as_ptr(),
                indices.as_mut_ptr(),
            );
        }

        if let Some(pos) = indices.iter().position(|i| *i == gl::INVALID_INDEX) {
            return Err(UniformError::NotFound(names[pos].to_owned()));
        }

        let mut offsets = vec![0 as GLint; names.len()];
        unsafe {
            gl::GetActiveUniformsiv(
                self.id,
                names.len() as i32,
                indices.as_ptr(),
                gl::UNIFORM_OFFSET,
                offsets.as_mut_ptr(),
            );
        }

        Ok(offsets.into_iter().map(|o| o.max(0) as usize).collect())
    }

    pub fn bind_uniform_block(&self, block: &UniformBlock, binding: GLuint) {
        unsafe { gl::UniformBlockBinding(self.id, block.index, binding) }
    }
}

impl Drop for Program {
    fn drop(&mut self) {
        unsafe { gl::DeleteProgram(self.id) }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn geometry_stage_sits_between() {
        let builder = ProgramBuilder::new("v", "f").with_geometry("g");
        let stages: Vec<_> = builder.stages.iter().map(|(s, _)| *s).collect();

        assert_eq!(
            stages,
            vec![ShaderStage::Vertex, ShaderStage::Geometry, ShaderStage::Fragment]
        );
    }

    #[test]
    fn nul_in_source_fails_before_compiling() {
        let res = ProgramBuilder::new("void main() {}", "void\0main() {}").build();

        assert!(matches!(
            res,
            Err(PBError::InvalidSource(ShaderStage::Fragment))
        ));
    }
}
