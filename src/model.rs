pub mod clock;
pub mod pattern;

/// One colour sample as driven on the model's output port, 8 bits per channel.
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// Signals readable from the model after an evaluation.
///
/// `sx` counts groups of `N` pixels, not pixels. Both coordinates are signed
/// since some timing generators run negative through the blanking interval.
#[derive(Clone, Copy, Debug)]
pub struct Outputs<const N: usize> {
    pub sx: i32,
    pub sy: i32,
    pub de: bool,
    pub frame: bool,
    pub colors: [Rgb; N],
}

impl<const N: usize> Default for Outputs<N> {
    fn default() -> Self {
        Self {
            sx: 0,
            sy: 0,
            de: false,
            frame: false,
            colors: [Rgb::default(); N],
        }
    }
}

/// A synchronous design with a reset and a clock input.
pub trait Clocked {
    fn set_reset(&mut self, active: bool);
    fn set_clock(&mut self, level: bool);
    /// Settle the design after an input change.
    fn eval(&mut self);
    /// End-of-simulation hook.
    fn finish(&mut self) {}
}

/// A clocked design driving `N` pixels per clock onto a video port.
pub trait VideoModel<const N: usize>: Clocked {
    fn outputs(&self) -> Outputs<N>;
}
