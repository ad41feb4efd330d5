use crate::config::Resolution;
use crate::model::{Outputs, Rgb};

/// Raster position of one pixel group: `group` counts groups of `N` pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Coord {
    pub group: i32,
    pub line: i32,
}

impl Coord {
    /// Linear framebuffer index of `lane` within this group, or `None` when the
    /// position lies outside `res`.
    pub fn cell_offset<const N: usize>(&self, lane: usize, res: Resolution) -> Option<usize> {
        let group = usize::try_from(self.group).ok()?;
        let line = usize::try_from(self.line).ok()?;
        if lane >= N || line >= res.height || group >= res.width / N {
            return None;
        }
        Some(line * res.width + group * N + lane)
    }
}

#[derive(Clone, Copy, Debug)]
pub struct PixelGroup<const N: usize> {
    pub coord: Coord,
    pub colors: [Rgb; N],
}

/// One decoded clock's worth of video.
#[derive(Clone, Copy, Debug)]
pub struct Sample<const N: usize> {
    /// Present only while display-enable is asserted.
    pub pixels: Option<PixelGroup<N>>,
    pub frame_end: bool,
}

pub fn decode<const N: usize>(out: &Outputs<N>) -> Sample<N> {
    let pixels = out.de.then(|| PixelGroup {
        coord: Coord {
            group: out.sx,
            line: out.sy,
        },
        colors: out.colors,
    });

    Sample {
        pixels,
        frame_end: out.frame,
    }
}
