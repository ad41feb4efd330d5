use std::time::{Duration, Instant};

/// Frame count over wall-clock time for one run.
#[derive(Clone, Copy, Debug)]
pub struct RunStats {
    pub frames: u64,
    pub elapsed: Duration,
}

impl RunStats {
    pub fn fps(&self) -> f64 {
        let secs = self.elapsed.as_secs_f64();
        if self.frames == 0 || secs <= 0.0 {
            return 0.0;
        }
        self.frames as f64 / secs
    }
}

#[derive(Default)]
pub struct Throughput {
    frames: u64,
    start: Option<Instant>,
}

impl Throughput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn start(&mut self) {
        self.frames = 0;
        self.start = Some(Instant::now());
    }

    pub fn tick(&mut self) {
        self.frames += 1;
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn finish(&self) -> RunStats {
        let elapsed = self
            .start
            .map(|start| start.elapsed())
            .unwrap_or_default();
        RunStats {
            frames: self.frames,
            elapsed,
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_fps() {
        let stats = RunStats {
            frames: 120,
            elapsed: Duration::from_secs(2),
        };
        assert!((stats.fps() - 60.0).abs() < f64::EPSILON);
        assert_eq!(format!("{:.1}", stats.fps()), "60.0");
    }

    #[test]
    fn test_fps_degenerate() {
        let no_frames = RunStats {
            frames: 0,
            elapsed: Duration::from_secs(1),
        };
        assert_eq!(no_frames.fps(), 0.0);

        let no_time = RunStats {
            frames: 3,
            elapsed: Duration::ZERO,
        };
        assert_eq!(no_time.fps(), 0.0);
    }

    #[test]
    fn test_tick_counts() {
        let mut throughput = Throughput::new();
        throughput.start();
        throughput.tick();
        throughput.tick();
        assert_eq!(throughput.frames(), 2);

        let stats = throughput.finish();
        assert_eq!(stats.frames, 2);
    }

    #[test]
    fn test_finish_without_start() {
        let mut throughput = Throughput::new();
        throughput.tick();
        let stats = throughput.finish();
        assert_eq!(stats.elapsed, Duration::ZERO);
        assert_eq!(stats.fps(), 0.0);
    }

    #[test]
    fn test_start_resets_count() {
        let mut throughput = Throughput::new();
        throughput.tick();
        throughput.start();
        assert_eq!(throughput.frames(), 0);
    }
}
