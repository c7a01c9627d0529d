use std::collections::VecDeque;
use std::time::Instant;

use voxelmarch::{
    HarnessError,
    abs::App,
    frame::ViewportSize,
    host::{self, FrameEvent, GraphicsHost},
    settings::WindowSettings,
};

fn setup_logger() -> Result<(), fern::InitError> {
    let level = if cfg!(debug_assertions) {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };

    fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!(
                "[{} {} {}] {}",
                chrono::Local::now().format("%H:%M:%S%.3f"),
                record.level(),
                record.target(),
                message
            ))
        })
        .level(log::LevelFilter::Warn)
        .level_for("voxelmarch", level)
        .chain(std::io::stdout())
        .apply()?;
    Ok(())
}

/// Turns pending SDL events into [`FrameEvent`]s, ending each batch with one
/// frame tick measured since the previous one.
fn sdl_events(event_pump: &mut sdl2::EventPump) -> impl Iterator<Item = FrameEvent> + '_ {
    let mut pending = VecDeque::new();
    let mut last_frame_time = Instant::now();

    std::iter::from_fn(move || {
        if pending.is_empty() {
            for event in event_pump.poll_iter() {
                match event {
                    sdl2::event::Event::Quit { .. } => pending.push_back(FrameEvent::Quit),
                    sdl2::event::Event::Window {
                        win_event: sdl2::event::WindowEvent::Resized(width, height),
                        ..
                    } => pending.push_back(FrameEvent::Resize(ViewportSize::from_signed(
                        width, height,
                    ))),
                    _ => {}
                }
            }

            let now = Instant::now();
            pending.push_back(FrameEvent::Frame {
                delta_time: now.duration_since(last_frame_time).as_secs_f64(),
            });
            last_frame_time = now;
        }
        pending.pop_front()
    })
}

fn run() -> Result<(), HarnessError> {
    let settings = WindowSettings::default();
    let mut app = App::new(&settings)?;
    let mut host = GraphicsHost::new(&app.gl, settings);

    let (width, height) = app.window.drawable_size();
    host::drive(
        &mut host,
        &mut app.window,
        ViewportSize::new(width, height),
        sdl_events(&mut app.event_pump),
    )
}

fn main() {
    if let Err(e) = setup_logger() {
        eprintln!("Failed to set up logging: {e}");
    }

    if let Err(e) = run() {
        log::error!("{e}");
        std::process::exit(1);
    }
}
