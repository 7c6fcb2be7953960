use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Instant;

use prism::config::{ConfigError, RenderConfig};
use prism::scene::{load_scene, LoadError};
use prism::window::{Window, WindowEvent};
use prism::Engine;
use thiserror::Error;

#[derive(Debug, Error)]
enum AppError {
    #[error("usage: prism <scene.obj> [config.ron]")]
    Usage,

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Load(#[from] LoadError),

    #[error("display error: {0}")]
    Display(String),
}

impl AppError {
    fn exit_code(&self) -> u8 {
        match self {
            AppError::Usage => 64,
            AppError::Config(_) => 78,
            AppError::Load(err) => err.exit_code() as u8,
            AppError::Display(_) => 70,
        }
    }
}

fn run() -> Result<(), AppError> {
    let mut args = std::env::args_os().skip(1);
    let scene_path = PathBuf::from(args.next().ok_or(AppError::Usage)?);
    let config = match args.next() {
        Some(path) => {
            log::info!("Loading config {}", PathBuf::from(&path).display());
            RenderConfig::from_file(path)?
        }
        None => RenderConfig::default(),
    };

    let scene = load_scene(&scene_path, config.scale)?;
    let mut engine = Engine::new(scene, &config);
    let mut window =
        Window::new("prism", config.width, config.height).map_err(AppError::Display)?;

    log::info!("Starting in {} mode", engine.render_mode());
    loop {
        match window.poll_event() {
            WindowEvent::Quit => break,
            WindowEvent::Command(command) => engine.apply(command),
            WindowEvent::None => {}
        }

        let start = Instant::now();
        engine.render();
        log::debug!(
            "{} frame in {:.1} ms",
            engine.render_mode(),
            start.elapsed().as_secs_f64() * 1000.0
        );

        window
            .present(engine.frame_buffer())
            .map_err(AppError::Display)?;
    }

    Ok(())
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log::error!("{err}");
            ExitCode::from(err.exit_code())
        }
    }
}
