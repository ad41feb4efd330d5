mod input;
mod screen;

use eyre::Result;
use log::{debug, info};
use sdl2::pixels::PixelFormatEnum;

use crate::config::Config;
use crate::harness::stats::RunStats;
use crate::harness::Harness;
use crate::macros::sdl_error;
use crate::model::VideoModel;
use input::QuitMonitor;
use screen::Screen;

/// Opens the window, runs the harness against it and tears everything down
/// again, in reverse order, on every exit path.
pub fn run<M, const N: usize>(config: &Config, harness: &mut Harness<M, N>) -> Result<RunStats>
where
    M: VideoModel<N>,
{
    let width = config.resolution.width as u32;
    let height = config.resolution.height as u32;

    let sdl = sdl_error!(sdl2::init(), "SDL init")?;
    let video = sdl_error!(sdl.video(), "Video subsystem init")?;

    let window = sdl_error!(
        video
            .window(config.title, width, height)
            .position_centered()
            .build(),
        "Window creation"
    )?;
    debug!("Window {}x{} created", width, height);

    let mut canvas_builder = window.into_canvas().accelerated();
    if config.vsync {
        canvas_builder = canvas_builder.present_vsync();
    }
    let canvas = sdl_error!(canvas_builder.build(), "Renderer creation")?;

    let tex_creator = canvas.texture_creator();
    let texture = sdl_error!(
        tex_creator.create_texture_target(PixelFormatEnum::RGBA8888, width, height),
        "Texture creation"
    )?;
    let mut screen = Screen::new(canvas, texture);

    let event_pump = sdl_error!(sdl.event_pump(), "Event pump creation")?;
    let mut quit = QuitMonitor::new(event_pump, config.quit_key);

    println!(
        "Simulation running. Press '{}' in simulation window to quit.\n",
        config.quit_key.name()
    );
    info!("Presenting at {}x{}, vsync {}", width, height, config.vsync);

    harness.run(&mut screen, &mut quit)
}
