use super::Clocked;

/// Owns the model and toggles its clock input.
pub struct ClockDriver<M> {
    model: M,
    level: bool,
    cycles: u64,
}

impl<M: Clocked> ClockDriver<M> {
    pub fn new(model: M) -> Self {
        Self {
            model,
            level: false,
            cycles: 0,
        }
    }

    /// Hold reset through one rising edge, then release it on the falling edge.
    pub fn reset(&mut self) {
        self.model.set_reset(true);
        self.level = false;
        self.model.set_clock(false);
        self.model.eval();
        self.step();
        self.model.set_reset(false);
        self.step();
        self.cycles = 0;
    }

    /// Advance by one half-cycle.
    pub fn step(&mut self) {
        self.level = !self.level;
        self.model.set_clock(self.level);
        self.model.eval();
    }

    /// Rising edge then falling edge.
    pub fn cycle(&mut self) {
        self.step();
        self.step();
        self.cycles += 1;
    }

    pub fn cycles(&self) -> u64 {
        self.cycles
    }

    pub fn model(&self) -> &M {
        &self.model
    }

    pub fn finish(&mut self) {
        self.model.finish();
    }
}
