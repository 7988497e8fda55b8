use crate::geometry::Geometry;
use crate::program::Program;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum DepthFunc {
    Less,
    LessEqual,
}

pub struct GlRenderer {
    current_program: u32,
}

impl GlRenderer {
    pub fn new() -> Self {
        Self { current_program: 0 }
    }

    fn use_program(&mut self, program: &Program) {
        let p_id = program.get_id();
        if self.current_program != p_id {
            unsafe { gl::UseProgram(p_id) }
            self.current_program = p_id;
        }
    }

    pub fn draw(&mut self, geometry: &Geometry, program: &Program) {
        self.use_program(program);

        unsafe {
            gl::BindVertexArray(geometry.vao());
            if geometry.indices() > 0 {
                gl::DrawElements(
                    geometry.primitive().gl_enum(),
                    geometry.indices() as i32,
                    gl::UNSIGNED_INT,
                    std::ptr::null(),
                );
            } else {
                gl::DrawArrays(
                    geometry.primitive().gl_enum(),
                    0,
                    geometry.vertices() as i32,
                );
            }
        }
    }

    /// Draws `count` vertices starting at `first`, ignoring indices.
    pub fn draw_range(&mut self, geometry: &Geometry, program: &Program, first: usize, count: usize) {
        self.use_program(program);

        let first = first.min(geometry.vertices());
        let count = count.min(geometry.vertices() - first);

        unsafe {
            gl::BindVertexArray(geometry.vao());
            gl::DrawArrays(geometry.primitive().gl_enum(), first as i32, count as i32);
        }
    }

    pub fn resize(&self, width: u32, height: u32) {
        unsafe {
            gl::Viewport(0, 0, width as i32, height as i32);
        }
    }

    pub fn clear_color(&self, r: f32, g: f32, b: f32) {
        unsafe {
            gl::ClearColor(r, g, b, 1.0);
            gl::Clear(gl::COLOR_BUFFER_BIT | gl::DEPTH_BUFFER_BIT);
        }
    }

    /// `None` disables depth testing.
    pub fn set_depth_test(&self, func: Option<DepthFunc>) {
        unsafe {
            match func {
                Some(f) => {
                    gl::Enable(gl::DEPTH_TEST);
                    gl::DepthFunc(match f {
                        DepthFunc::Less => gl::LESS,
                        DepthFunc::LessEqual => gl::LEQUAL,
                    });
                }
                None => gl::Disable(gl::DEPTH_TEST),
            }
        }
    }

    /// Standard alpha blending.
    pub fn set_blending(&self, enabled: bool) {
        unsafe {
            if enabled {
                gl::Enable(gl::BLEND);
                gl::BlendFunc(gl::SRC_ALPHA, gl::ONE_MINUS_SRC_ALPHA);
            } else {
                gl::Disable(gl::BLEND);
            }
        }
    }

    pub fn set_face_culling(&self, enabled: bool) {
        unsafe {
            if enabled {
                gl::Enable(gl::CULL_FACE);
            } else {
                gl::Disable(gl::CULL_FACE);
            }
        }
    }

    /// Lets the vertex shader write `gl_PointSize`.
    pub fn set_program_point_size(&self, enabled: bool) {
        unsafe {
            if enabled {
                gl::Enable(gl::PROGRAM_POINT_SIZE);
            } else {
                gl::Disable(gl::PROGRAM_POINT_SIZE);
            }
        }
    }
}

impl Default for GlRenderer {
    fn default() -> Self {
        Self::new()
    }
}
