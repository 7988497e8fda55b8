use gl_wrapper::renderer::GlRenderer;

use crate::scene::{Demo, SceneError, Viewport};

/// Fills the window with red.
pub struct Clear;

impl Demo for Clear {
    fn render(&mut self, renderer: &mut GlRenderer, _viewport: Viewport) -> Result<(), SceneError> {
        renderer.clear_color(1.0, 0.0, 0.0);
        Ok(())
    }
}
