use eyre::{eyre, Result};
use sdl2::render::{Canvas, Texture};
use sdl2::video::Window;

use crate::frame::FrameBuffer;
use crate::harness::Present;

// Field order is drop order: the texture goes before its renderer.
pub struct Screen<'t> {
    texture: Texture<'t>,
    canvas: Canvas<Window>,
}

impl<'t> Screen<'t> {
    pub fn new(canvas: Canvas<Window>, texture: Texture<'t>) -> Self {
        Self { texture, canvas }
    }
}

impl Present for Screen<'_> {
    fn present(&mut self, frame: &FrameBuffer) -> Result<()> {
        self.texture
            .update(None, frame.as_bytes(), frame.pitch())
            .map_err(|e| eyre!("Texture update failed: {}", e))?;
        self.canvas.clear();
        self.canvas
            .copy(&self.texture, None, None)
            .map_err(|e| eyre!("Render copy failed: {}", e))?;
        self.canvas.present();
        Ok(())
    }
}
