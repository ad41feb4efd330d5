pub mod stats;

use eyre::Result;
use log::{debug, error, warn};

use crate::config::Resolution;
use crate::frame::{FrameAssembler, FrameBuffer};
use crate::model::clock::ClockDriver;
use crate::model::VideoModel;
use crate::signal::decode;
use stats::{RunStats, Throughput};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Resetting,
    Running,
    Draining,
    Stopped,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Control {
    Continue,
    Stop,
}

/// Receives each completed frame. Expected to block until the display's
/// vertical sync lets the frame through.
pub trait Present {
    fn present(&mut self, frame: &FrameBuffer) -> Result<()>;
}

/// Polled once per completed frame; must not block.
pub trait QuitCheck {
    fn poll(&mut self) -> Control;
}

/// Clocks a video model and collects its output into frames.
pub struct Harness<M, const N: usize> {
    driver: ClockDriver<M>,
    assembler: FrameAssembler<N>,
    phase: Phase,
}

impl<M: VideoModel<N>, const N: usize> Harness<M, N> {
    pub fn new(model: M, res: Resolution) -> Result<Self> {
        Ok(Self {
            driver: ClockDriver::new(model),
            assembler: FrameAssembler::new(res)?,
            phase: Phase::Resetting,
        })
    }

    fn enter(&mut self, phase: Phase) {
        debug!("{:?} -> {:?}", self.phase, phase);
        self.phase = phase;
    }

    pub fn reset(&mut self) {
        self.driver.reset();
        self.enter(Phase::Running);
    }

    /// Runs one clock cycle and captures its pixels. Returns true when the
    /// cycle marks the end of a frame.
    pub fn clock(&mut self) -> bool {
        self.driver.cycle();
        let sample = decode(&self.driver.model().outputs());
        if let Some(pixels) = &sample.pixels {
            self.assembler.write_sample(pixels);
        }
        FrameAssembler::is_frame_complete(&sample)
    }

    /// Clocks the model until `quit` asks to stop, presenting every finished
    /// frame. A presentation failure ends the run with that error.
    pub fn run<S, Q>(&mut self, sink: &mut S, quit: &mut Q) -> Result<RunStats>
    where
        S: Present,
        Q: QuitCheck,
    {
        if self.phase == Phase::Resetting {
            self.reset();
        }

        let mut throughput = Throughput::new();
        throughput.start();

        let result = loop {
            if !self.clock() {
                continue;
            }
            if quit.poll() == Control::Stop {
                break Ok(());
            }
            if let Err(e) = sink.present(self.assembler.frame()) {
                error!("Presentation failed after {} frames", throughput.frames());
                break Err(e);
            }
            throughput.tick();
        };

        let stats = throughput.finish();
        self.enter(Phase::Draining);
        debug!("Simulated {} clock cycles", self.driver.cycles());
        if self.assembler.rejected() > 0 {
            warn!(
                "{} off-screen writes rejected during the run",
                self.assembler.rejected()
            );
        }

        result.map(|()| stats)
    }

    /// Hands control back to the model for its end-of-simulation work.
    pub fn finish(&mut self) {
        self.driver.finish();
        self.enter(Phase::Stopped);
    }
}
