use sdl2::keyboard::Scancode;

/// Pixels the hardware model emits per clock edge.
pub const PIXELS_PER_CLOCK: usize = 4;

pub const H_RES: usize = 640;
pub const V_RES: usize = 480;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Resolution {
    pub width: usize,
    pub height: usize,
}

impl Resolution {
    pub const fn new(width: usize, height: usize) -> Self {
        Self { width, height }
    }

    pub const fn cells(&self) -> usize {
        self.width * self.height
    }
}

pub struct Config {
    pub title: &'static str,
    pub resolution: Resolution,
    pub quit_key: Scancode,
    pub vsync: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            title: "simview",
            resolution: Resolution::new(H_RES, V_RES),
            quit_key: Scancode::Q,
            vsync: true,
        }
    }
}
