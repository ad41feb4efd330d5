#![warn(trivial_numeric_casts)]

mod config;
mod frame;
mod frontend;
mod harness;
mod macros;
mod model;
mod signal;

use std::{env, process};

use eyre::{eyre, Result};

use config::{Config, PIXELS_PER_CLOCK};
use harness::Harness;
use model::pattern::TestPattern;

fn run() -> Result<()> {
    let args: Vec<String> = env::args().collect();
    let config = Config::default();

    let model = TestPattern::from_args(&args[..])?;
    if model.resolution() != config.resolution {
        return Err(eyre!(
            "Model drives {:?} but the display is configured for {:?}",
            model.resolution(),
            config.resolution
        ));
    }

    let mut harness = Harness::<_, PIXELS_PER_CLOCK>::new(model, config.resolution)?;
    let result = frontend::run(&config, &mut harness);
    harness.finish();

    let stats = result?;
    println!("Frames per second: {:.1}", stats.fps());
    Ok(())
}

fn main() {
    env_logger::init();

    if let Err(e) = run() {
        eprintln!("{:#}", e);
        process::exit(1);
    }
}
