// What you SEE:
// • The display under your mouse, frozen as a screenshot, fills the screen.
// • Hold Left Mouse to draw. Ctrl+Z / Backspace undo, C clears.
// • R G B Y K W pick a color; + - [ ] or the wheel change brush size.
// • ESC or Q quits.

mod canvas;
mod capture;
mod config;
mod controller;
mod draw;
mod error;
mod history;
mod input;
mod sampler;
mod stroke;
mod types;

use std::process::ExitCode;
use std::thread;
use std::time::Duration;

use clap::Parser;
use log::{error, info};

use capture::capture_display_under_cursor;
use config::Config;
use controller::Controller;
use draw::{Drawer, compose_frame};
use error::Error;
use types::FrameBuffer;

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let config = Config::parse();

    match run(&config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn run(config: &Config) -> Result<(), Error> {
    /* --- Screenshot + window setup ---
       Grab the display first so the window itself is not in the picture. */
    let shot = capture_display_under_cursor()?;
    let (w, h) = (shot.background.width, shot.background.height);
    let mut drawer = Drawer::new("scribble-shot", w, h, shot.display.x, shot.display.y)?;
    info!("window {}x{} open", w, h);

    let mut controller = Controller::new(w, h, config.brush(), config.stroke_limits());
    let mut screen = FrameBuffer::new(w, h);
    let frame_delay = Duration::from_millis(config.frame_delay_ms);

    /* ------------------------------ Main loop ------------------------------ */
    while controller.is_running() {
        for event in drawer.poll_events() {
            controller.handle(event);
        }
        if !controller.is_running() {
            break;
        }

        compose_frame(&mut screen, &shot.background, &controller);
        drawer.present(&screen)?;

        thread::sleep(frame_delay);
    }

    info!("exiting with {} strokes drawn", controller.history().len());
    Ok(())
}
