use anyhow::{Context, Result, anyhow};
use clap::Parser;
use env_logger::{Builder, Target};
use log::LevelFilter;
use raylib::prelude::*;

mod carousel;
mod cli;
mod committee;
mod config;
mod constants;
mod ffmpeg;
mod geometry;
mod particles;
mod render;
mod splash;
mod spring;
mod task;
mod text;
mod texture_loader;
mod theme;
mod view;
mod viewport;

use crate::cli::Args;
use crate::config::Settings;
use crate::constants::FRAME_TIME;
use crate::ffmpeg::Ffmpeg;
use crate::render::draw_view;
use crate::text::RaylibMeasure;
use crate::texture_loader::Assets;
use crate::view::{FrameInput, ShowcaseView, ViewAction};

fn init_logger() {
    Builder::new()
        .target(Target::Stdout)
        .filter_level(LevelFilter::Warn)
        .filter_module("gsl_showcase", LevelFilter::Info)
        .init();
}

fn main() -> Result<()> {
    if std::env::var("RUST_LOG").is_err() {
        init_logger();
    } else {
        env_logger::init();
    }

    let args = Args::parse();
    let mut settings = match &args.config {
        Some(path) => config::load_from_file(path)?,
        None => Settings::default(),
    };
    args.apply(&mut settings);
    config::validate(&settings).map_err(|errors| {
        let issues: Vec<String> = errors.iter().map(|e| e.to_string()).collect();
        anyhow!("invalid settings:\n{}", issues.join("\n"))
    })?;
    let committees = settings.committees()?;

    let (mut rl, thread) = raylib::init()
        .size(settings.window.width, settings.window.height)
        .title(&settings.window.title)
        .vsync()
        .resizable()
        .build();
    rl.set_target_fps(settings.window.fps);
    rl.set_trace_log(TraceLogLevel::LOG_ERROR);

    let assets = Assets::load(&mut rl, &thread, &settings.assets_dir);

    let measure = RaylibMeasure::new(&thread);
    let view = ShowcaseView::mount(
        committees,
        &settings,
        settings.window.width,
        settings.window.height,
        &measure,
    )
    .context("failed to start the particle engine")?;

    match &args.record {
        Some(output) => record(&mut rl, &thread, view, &assets, &settings, output),
        None => {
            let view = match args.autoplay {
                Some(interval) => view.with_autoplay(interval),
                None => view,
            };
            run(&mut rl, &thread, view, &assets);
            Ok(())
        }
    }
}

/// Interactive loop driven by the real frame time.
fn run(rl: &mut RaylibHandle, thread: &RaylibThread, mut view: ShowcaseView, assets: &Assets) {
    let measure = RaylibMeasure::new(thread);

    while !rl.window_should_close() {
        let pointer = rl.is_cursor_on_screen().then(|| rl.get_mouse_position());
        let input = FrameInput {
            width: rl.get_screen_width(),
            height: rl.get_screen_height(),
            pointer,
            click: pointer.filter(|_| rl.is_mouse_button_pressed(MouseButton::MOUSE_BUTTON_LEFT)),
        };

        // Stalls such as window drags count as at most six frames
        let dt = rl.get_frame_time().min(6.0 * FRAME_TIME);
        for action in view.update(dt, &input, &measure) {
            match action {
                ViewAction::OpenLink(url) => open_link(&url),
            }
        }

        let mut d = rl.begin_drawing(thread);
        draw_view(&mut d, &view, assets, &measure);
    }

    view.unmount();
}

/// Fixed-step offscreen render piped to ffmpeg, with a scaled preview on screen.
fn record(
    rl: &mut RaylibHandle,
    thread: &RaylibThread,
    view: ShowcaseView,
    assets: &Assets,
    settings: &Settings,
    output: &std::path::Path,
) -> Result<()> {
    let measure = RaylibMeasure::new(thread);
    let (width, height) = (settings.window.width, settings.window.height);
    let fps = settings.window.fps;
    let dt = 1.0 / fps as f32;
    let frames = (settings.export.duration * fps as f32).round() as u32;

    let mut view = view.with_autoplay(settings.export.autoplay);
    let mut framebuffer = rl
        .load_render_texture(thread, width as u32, height as u32)
        .map_err(|e| anyhow!("failed to create render texture: {e}"))?;
    let mut ffmpeg = Ffmpeg::spawn(width, height, fps, output)?;

    let input = FrameInput { width, height, ..FrameInput::default() };
    // Every exported frame shows the background
    view.wait_for_background();

    for frame in 0..frames {
        if rl.window_should_close() {
            log::warn!("window closed, stopping after {frame} of {frames} frames");
            break;
        }

        view.update(dt, &input, &measure);

        rl.draw_texture_mode(thread, &mut framebuffer, |mut tmd| {
            let mut d = tmd.begin_drawing(thread);
            draw_view(&mut d, &view, assets, &measure);
        });

        let mut d = rl.begin_drawing(thread);
        let sw = d.get_screen_width() as f32;
        let sh = d.get_screen_height() as f32;
        d.clear_background(Color::BLACK);
        d.draw_texture_pro(
            &framebuffer,
            Rectangle::new(0.0, 0.0, framebuffer.width() as f32, -(framebuffer.height() as f32)),
            Rectangle::new(0.0, 0.0, sw, sh),
            Vector2::new(0.0, 0.0),
            0.0,
            Color::WHITE,
        );
        drop(d);

        let image = framebuffer
            .load_image()
            .map_err(|e| anyhow!("failed to read back frame {frame}: {e}"))?;
        ffmpeg.write(&image)?;
    }

    view.unmount();
    ffmpeg.finish()?;
    log::info!("wrote {}", output.display());
    Ok(())
}

fn open_link(url: &str) {
    log::info!("opening {url}");
    raylib::core::misc::open_url(url);
}
