use eyre::{eyre, Result};
use log::{trace, warn};

use crate::config::Resolution;
use crate::model::Rgb;
use crate::signal::{PixelGroup, Sample};

/// One framebuffer cell, in memory order. Matches SDL's `RGBA8888` on a
/// little-endian host.
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq)]
pub struct Pixel {
    pub a: u8,
    pub b: u8,
    pub g: u8,
    pub r: u8,
}

impl Pixel {
    pub const fn opaque(color: Rgb) -> Self {
        Pixel {
            a: 0xFF,
            b: color.b,
            g: color.g,
            r: color.r,
        }
    }
}

pub struct FrameBuffer {
    data: Vec<u8>,
    res: Resolution,
}

impl FrameBuffer {
    pub const BYTES_PER_PIXEL: usize = 4;

    pub fn new(res: Resolution) -> Self {
        FrameBuffer {
            data: vec![0; res.cells() * Self::BYTES_PER_PIXEL],
            res,
        }
    }

    #[cfg(test)]
    pub fn resolution(&self) -> Resolution {
        self.res
    }

    /// Bytes per row, as the texture upload expects it.
    pub fn pitch(&self) -> usize {
        self.res.width * Self::BYTES_PER_PIXEL
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    #[cfg(test)]
    pub fn pixel(&self, idx: usize) -> Pixel {
        let base = idx * Self::BYTES_PER_PIXEL;
        Pixel {
            a: self.data[base],
            b: self.data[base + 1],
            g: self.data[base + 2],
            r: self.data[base + 3],
        }
    }

    fn set_pixel(&mut self, idx: usize, pixel: Pixel) {
        let base = idx * Self::BYTES_PER_PIXEL;
        self.data[base..base + Self::BYTES_PER_PIXEL]
            .copy_from_slice(&[pixel.a, pixel.b, pixel.g, pixel.r]);
    }
}

/// Writes decoded pixel groups into the framebuffer it owns.
pub struct FrameAssembler<const N: usize> {
    frame: FrameBuffer,
    rejected: u64,
}

impl<const N: usize> FrameAssembler<N> {
    pub fn new(res: Resolution) -> Result<Self> {
        if N == 0 || res.cells() == 0 {
            return Err(eyre!("Empty display geometry {}x{}", res.width, res.height));
        }
        if res.width % N != 0 {
            return Err(eyre!(
                "Width {} is not a multiple of {} pixels per clock",
                res.width,
                N
            ));
        }

        Ok(Self {
            frame: FrameBuffer::new(res),
            rejected: 0,
        })
    }

    /// Fills the group's `N` adjacent cells. Returns false, leaving the buffer
    /// untouched, when the coordinate is off-screen.
    pub fn write_sample(&mut self, pixels: &PixelGroup<N>) -> bool {
        let Some(base) = pixels.coord.cell_offset::<N>(0, self.frame.res) else {
            self.rejected += 1;
            if self.rejected == 1 {
                warn!(
                    "Rejected off-screen write at group {}, line {}",
                    pixels.coord.group, pixels.coord.line
                );
            } else {
                trace!("Rejected off-screen write at {:?}", pixels.coord);
            }
            return false;
        };

        for (lane, color) in pixels.colors.iter().enumerate() {
            self.frame.set_pixel(base + lane, Pixel::opaque(*color));
        }
        true
    }

    pub fn is_frame_complete(sample: &Sample<N>) -> bool {
        sample.frame_end
    }

    pub fn frame(&self) -> &FrameBuffer {
        &self.frame
    }

    pub fn rejected(&self) -> u64 {
        self.rejected
    }
}
