use log::debug;
use sdl2::event::Event;
use sdl2::keyboard::Scancode;
use sdl2::EventPump;

use crate::harness::{Control, QuitCheck};

pub struct QuitMonitor {
    event_pump: EventPump,
    quit_key: Scancode,
}

impl QuitMonitor {
    pub fn new(event_pump: EventPump, quit_key: Scancode) -> Self {
        Self {
            event_pump,
            quit_key,
        }
    }
}

impl QuitCheck for QuitMonitor {
    fn poll(&mut self) -> Control {
        for event in self.event_pump.poll_iter() {
            if let Event::Quit { .. } = event {
                debug!("Window closed");
                return Control::Stop;
            }
        }

        // Keyboard state is refreshed by the poll above
        if self
            .event_pump
            .keyboard_state()
            .is_scancode_pressed(self.quit_key)
        {
            debug!("Quit key {} pressed", self.quit_key.name());
            return Control::Stop;
        }

        Control::Continue
    }
}
