use std::str::FromStr;

use bitbash::bitfield;
use eyre::{eyre, Result};
use log::{debug, info};
use rand::{rngs::StdRng, Rng, SeedableRng};

use super::{Clocked, Outputs, Rgb, VideoModel};
use crate::config::{Resolution, PIXELS_PER_CLOCK};

bitfield! {
    #[derive(Copy, Clone)]
    pub struct Color12(pub u16);
    pub new();

    pub field r: u8 = [8..12];
    pub field g: u8 = [4..8];
    pub field b: u8 = [0..4];
}

impl From<Color12> for Rgb {
    // Nibble replication, so 0xF widens to 0xFF and 0x0 stays 0x00
    fn from(color: Color12) -> Self {
        let widen = |n: u8| (n << 4) | n;
        Rgb::new(widen(color.r()), widen(color.g()), widen(color.b()))
    }
}

/// Raster timing in clock units: horizontal values count pixel groups.
#[derive(Clone, Copy, Debug)]
pub struct Timing {
    pub h_active: u16,
    pub h_fp: u16,
    pub h_sync: u16,
    pub h_bp: u16,

    pub v_active: u16,
    pub v_fp: u16,
    pub v_sync: u16,
    pub v_bp: u16,
}

impl Timing {
    /// 640x480 at 60Hz, four pixels per clock.
    pub const VGA_480P_4X: Timing = Timing {
        h_active: 160,
        h_fp: 4,
        h_sync: 24,
        h_bp: 12,
        v_active: 480,
        v_fp: 10,
        v_sync: 2,
        v_bp: 33,
    };

    pub fn htot(&self) -> u16 {
        self.h_active + self.h_fp + self.h_sync + self.h_bp
    }

    pub fn vtot(&self) -> u16 {
        self.v_active + self.v_fp + self.v_sync + self.v_bp
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Pattern {
    Bars,
    Gradient,
    Checker,
    Noise,
}

impl FromStr for Pattern {
    type Err = eyre::Report;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "bars" => Ok(Pattern::Bars),
            "gradient" => Ok(Pattern::Gradient),
            "checker" => Ok(Pattern::Checker),
            "noise" => Ok(Pattern::Noise),
            _ => Err(eyre!(
                "Unknown pattern '{}' (expected bars, gradient, checker or noise)",
                s
            )),
        }
    }
}

/// Software stand-in for a Verilated video top: a 480p sync generator painting
/// a test pattern, four pixels per clock.
pub struct TestPattern {
    timing: Timing,
    pattern: Pattern,
    rng: StdRng,

    clk: bool,
    rst: bool,
    prev_clk: bool,

    x: u16,
    y: u16,
    frames: u64,
    cycles: u64,

    out: Outputs<PIXELS_PER_CLOCK>,
}

impl TestPattern {
    const BARS: [u16; 8] = [0xFFF, 0xFF0, 0x0FF, 0x0F0, 0xF0F, 0xF00, 0x00F, 0x000];
    const CHECKER_SIZE: usize = 32;

    pub fn new(timing: Timing, pattern: Pattern, seed: u64) -> Self {
        Self {
            timing,
            pattern,
            rng: StdRng::seed_from_u64(seed),
            clk: false,
            rst: false,
            prev_clk: false,
            x: 0,
            y: 0,
            frames: 0,
            cycles: 0,
            out: Outputs::default(),
        }
    }

    /// Builds the model from simulator plusargs (`+pattern=checker`, `+seed=7`).
    /// Anything that is not a known plusarg is left for other consumers.
    pub fn from_args<S: AsRef<str>>(args: &[S]) -> Result<Self> {
        let mut pattern = Pattern::Bars;
        let mut seed = 0;

        for arg in args {
            let Some(plusarg) = arg.as_ref().strip_prefix('+') else {
                continue;
            };
            match plusarg.split_once('=') {
                Some(("pattern", value)) => pattern = value.parse()?,
                Some(("seed", value)) => {
                    seed = value
                        .parse()
                        .map_err(|e| eyre!("Invalid +seed value '{}': {}", value, e))?;
                }
                _ => debug!("Ignoring plusarg +{}", plusarg),
            }
        }

        info!("Test pattern model: {:?}, seed {}", pattern, seed);
        Ok(Self::new(Timing::VGA_480P_4X, pattern, seed))
    }

    pub fn resolution(&self) -> Resolution {
        Resolution::new(
            self.timing.h_active as usize * PIXELS_PER_CLOCK,
            self.timing.v_active as usize,
        )
    }

    fn rising_edge(&mut self) {
        if self.rst {
            self.x = 0;
            self.y = 0;
            self.frames = 0;
            self.cycles = 0;
            self.out = Outputs::default();
            return;
        }

        self.out = self.sample();
        self.cycles += 1;

        self.x += 1;
        if self.x == self.timing.htot() {
            self.x = 0;
            self.y += 1;
            if self.y == self.timing.vtot() {
                self.y = 0;
                self.frames += 1;
            }
        }
    }

    fn sample(&mut self) -> Outputs<PIXELS_PER_CLOCK> {
        let de = self.x < self.timing.h_active && self.y < self.timing.v_active;
        let frame = self.y == self.timing.v_active && self.x == 0;

        let mut colors = [Rgb::default(); PIXELS_PER_CLOCK];
        if de {
            let py = self.y as usize;
            for (lane, color) in colors.iter_mut().enumerate() {
                let px = self.x as usize * PIXELS_PER_CLOCK + lane;
                *color = self.paint(px, py).into();
            }
        }

        Outputs {
            sx: self.x as i32,
            sy: self.y as i32,
            de,
            frame,
            colors,
        }
    }

    fn paint(&mut self, px: usize, py: usize) -> Color12 {
        let Resolution { width, height } = self.resolution();
        match self.pattern {
            Pattern::Bars => Color12(Self::BARS[px * Self::BARS.len() / width]),
            Pattern::Gradient => {
                let mut color = Color12::new();
                color.set_r((px * 16 / width) as u8);
                color.set_g((py * 16 / height) as u8);
                color.set_b(0xF - (px * 16 / width) as u8);
                color
            }
            Pattern::Checker => {
                let cx = (px + self.frames as usize) / Self::CHECKER_SIZE;
                let cy = py / Self::CHECKER_SIZE;
                if (cx + cy) % 2 == 0 {
                    Color12(0xFFF)
                } else {
                    Color12(0x226)
                }
            }
            Pattern::Noise => Color12(self.rng.gen::<u16>() & 0xFFF),
        }
    }
}

impl Clocked for TestPattern {
    fn set_reset(&mut self, active: bool) {
        self.rst = active;
    }

    fn set_clock(&mut self, level: bool) {
        self.clk = level;
    }

    fn eval(&mut self) {
        if self.clk && !self.prev_clk {
            self.rising_edge();
        }
        self.prev_clk = self.clk;
    }

    fn finish(&mut self) {
        info!(
            "Test pattern finished after {} cycles, {} frames",
            self.cycles, self.frames
        );
    }
}

impl VideoModel<PIXELS_PER_CLOCK> for TestPattern {
    fn outputs(&self) -> Outputs<PIXELS_PER_CLOCK> {
        self.out
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::model::clock::ClockDriver;

    fn driver(pattern: Pattern) -> ClockDriver<TestPattern> {
        let mut driver = ClockDriver::new(TestPattern::new(Timing::VGA_480P_4X, pattern, 0));
        driver.reset();
        driver
    }

    fn cycles_per_frame() -> u64 {
        let t = Timing::VGA_480P_4X;
        t.htot() as u64 * t.vtot() as u64
    }

    #[test]
    fn test_480p_totals() {
        let t = Timing::VGA_480P_4X;
        assert_eq!(t.htot() as usize * PIXELS_PER_CLOCK, 800);
        assert_eq!(t.vtot(), 525);
    }

    #[test]
    fn test_color_widening() {
        let rgb: Rgb = Color12(0xF80).into();
        assert_eq!(rgb, Rgb::new(0xFF, 0x88, 0x00));

        let mut color = Color12::new();
        color.set_b(0x3);
        assert_eq!(Rgb::from(color), Rgb::new(0, 0, 0x33));
    }

    #[test]
    fn test_reset_clears_outputs() {
        let driver = driver(Pattern::Bars);
        let out = driver.model().outputs();
        assert_eq!((out.sx, out.sy), (0, 0));
        assert!(!out.de);
        assert!(!out.frame);
    }

    #[test]
    fn test_first_sample_is_origin() {
        let mut driver = driver(Pattern::Bars);
        driver.cycle();
        let out = driver.model().outputs();
        assert_eq!((out.sx, out.sy), (0, 0));
        assert!(out.de);
        assert_eq!(out.colors, [Rgb::new(0xFF, 0xFF, 0xFF); PIXELS_PER_CLOCK]);
    }

    #[test]
    fn test_one_frame_flag_per_frame() {
        let mut driver = driver(Pattern::Bars);
        let mut flags = 0;
        let mut enabled = 0;
        for _ in 0..cycles_per_frame() {
            driver.cycle();
            let out = driver.model().outputs();
            if out.frame {
                flags += 1;
                assert_eq!((out.sx, out.sy), (0, 480));
                assert!(!out.de);
            }
            if out.de {
                enabled += 1;
            }
        }
        assert_eq!(flags, 1);
        assert_eq!(enabled, 160 * 480);
    }

    #[test]
    fn test_blanking_is_black() {
        let mut driver = driver(Pattern::Bars);
        for _ in 0..161 {
            driver.cycle();
        }
        let out = driver.model().outputs();
        assert_eq!(out.sx, 160);
        assert!(!out.de);
        assert_eq!(out.colors, [Rgb::default(); PIXELS_PER_CLOCK]);
    }

    #[test]
    fn test_checker_scrolls() {
        let mut model = TestPattern::new(Timing::VGA_480P_4X, Pattern::Checker, 0);
        let before = Rgb::from(model.paint(31, 0));
        model.frames = 1;
        let after = Rgb::from(model.paint(31, 0));
        assert_ne!(before, after);
    }

    #[test]
    fn test_noise_is_seeded() {
        let mut a = TestPattern::new(Timing::VGA_480P_4X, Pattern::Noise, 7);
        let mut b = TestPattern::new(Timing::VGA_480P_4X, Pattern::Noise, 7);
        for px in 0..16 {
            assert_eq!(Rgb::from(a.paint(px, 0)), Rgb::from(b.paint(px, 0)));
        }
    }

    #[test]
    fn test_plusargs() {
        let model = TestPattern::from_args(&["simview", "+pattern=checker", "+seed=3", "+foo=bar"])
            .unwrap();
        assert_eq!(model.pattern, Pattern::Checker);
        assert_eq!(model.resolution(), Resolution::new(640, 480));

        assert!(TestPattern::from_args(&["+pattern=plaid"]).is_err());
        assert!(TestPattern::from_args(&["+seed=x"]).is_err());
    }
}
