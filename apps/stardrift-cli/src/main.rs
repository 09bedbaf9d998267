use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use stardrift_common::ObjectId;
use stardrift_driver::{HostCommand, Session, SessionConfig};
use stardrift_input::{InputEvent, Viewport};
use stardrift_kernel::Scene;
use stardrift_render::HeadlessRenderer;
use stardrift_tools::{ReadoutBoard, ReadoutKey, SceneInspector};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "stardrift-cli", about = "Generate, inspect and drive the stardrift scene")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// JSON session config; defaults apply to anything it omits
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// RNG seed, overrides the config file
    #[arg(short, long, global = true)]
    seed: Option<u64>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print version and crate info
    Info,
    /// Drive a headless session and print the readouts
    Run {
        /// Number of frames to run
        #[arg(short, long, default_value = "180")]
        frames: u32,
        /// Frames per second of the simulated clock
        #[arg(long, default_value = "60")]
        fps: u32,
        /// Scroll progress to apply on the first frame, 0 to 1
        #[arg(long)]
        scroll: Option<f32>,
        /// Pointer position in client pixels, as X,Y
        #[arg(long, value_parser = parse_point)]
        pointer: Option<(f32, f32)>,
        /// Wheel delta to apply halfway through
        #[arg(long)]
        wheel: Option<f32>,
        #[arg(long, default_value = "1280")]
        width: u32,
        #[arg(long, default_value = "720")]
        height: u32,
        /// Print readouts every N frames
        #[arg(long, default_value = "30")]
        every: u32,
    },
    /// Generate a scene and summarize it
    Inspect {
        /// Show one object in detail
        #[arg(short, long)]
        object: Option<u32>,
    },
}

fn parse_point(s: &str) -> Result<(f32, f32), String> {
    let (x, y) = s
        .split_once(',')
        .ok_or_else(|| format!("expected X,Y, got `{s}`"))?;
    let parse = |v: &str| v.trim().parse::<f32>().map_err(|e| e.to_string());
    Ok((parse(x)?, parse(y)?))
}

fn load_config(path: Option<&PathBuf>, seed: Option<u64>) -> anyhow::Result<SessionConfig> {
    let mut config = match path {
        Some(path) => SessionConfig::from_json_file(path)
            .with_context(|| format!("loading config from {}", path.display()))?,
        None => SessionConfig::default(),
    };
    if seed.is_some() {
        config.seed = seed;
    }
    Ok(config)
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    let config = load_config(cli.config.as_ref(), cli.seed)?;
    let verbose = cli.verbose;

    match cli.command {
        Commands::Info => {
            println!("stardrift-cli v{}", env!("CARGO_PKG_VERSION"));
            println!("common: {}", stardrift_common::crate_info());
            println!("kernel: {}", stardrift_kernel::crate_info());
            println!("input: {}", stardrift_input::crate_info());
            println!("render: {}", stardrift_render::crate_info());
            println!("tools: {}", stardrift_tools::crate_info());
            println!("driver: {}", stardrift_driver::crate_info());
        }
        Commands::Run {
            frames,
            fps,
            scroll,
            pointer,
            wheel,
            width,
            height,
            every,
        } => {
            let viewport = Viewport::new(width, height);
            let renderer = HeadlessRenderer::new(viewport.width, viewport.height);
            let mut session = Session::new(config, renderer, viewport)?;
            let mut board = ReadoutBoard::new();
            let fps = f64::from(fps.max(1));
            let every = every.max(1);

            if let Some(progress) = scroll {
                // Synthesize a page three viewports tall
                let viewport_height = height as f32;
                let document_height = viewport_height * 3.0;
                session.push_event(InputEvent::Scrolled {
                    offset: progress.clamp(0.0, 1.0) * (document_height - viewport_height),
                    document_height,
                    viewport_height,
                });
            }
            if let Some((x, y)) = pointer {
                session.push_event(InputEvent::PointerMoved { x, y });
            }

            for i in 0..frames {
                if i == frames / 2 {
                    if let Some(delta_y) = wheel {
                        session.push_event(InputEvent::Wheel { delta_y });
                    }
                }
                let out = session.frame(f64::from(i) / fps, &mut board);
                for command in &out.commands {
                    match command {
                        HostCommand::ScrollToTop => println!("[host] scroll to top"),
                        HostCommand::FadeOutOverlay => println!("[host] fade out overlay"),
                    }
                }
                if (i + 1) % every == 0 || i + 1 == frames {
                    print!("{}", out.frame);
                    for key in ReadoutKey::ALL {
                        print!("  {}={}", key.element_id(), board.get(key).unwrap_or("-"));
                    }
                    println!();
                }
            }

            let phase = session.camera().phase();
            println!("camera: {:?} at {}", phase, session.camera().camera().position);
            if verbose {
                print!("{}", session.renderer().describe());
            }
            let renderer = session.teardown();
            println!("frames submitted: {}", renderer.frames_submitted());
        }
        Commands::Inspect { object } => {
            config.validate()?;
            let scene = Scene::generate(
                &config.starfield,
                &config.objects,
                config.motion.clone(),
                config.seed,
            );
            println!("{}", SceneInspector::summary(&scene));
            if let Some(id) = object {
                let info = SceneInspector::inspect_object(&scene, ObjectId(id))
                    .with_context(|| format!("no object with id {id}"))?;
                println!("{info}");
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_points() {
        assert_eq!(parse_point("640,360"), Ok((640.0, 360.0)));
        assert_eq!(parse_point(" 1.5 , 2 "), Ok((1.5, 2.0)));
        assert!(parse_point("640").is_err());
        assert!(parse_point("a,b").is_err());
    }

    #[test]
    fn seed_overrides_defaults() {
        let config = load_config(None, Some(3)).unwrap();
        assert_eq!(config.seed, Some(3));
        let config = load_config(None, None).unwrap();
        assert_eq!(config.seed, None);
    }

    #[test]
    fn cli_parses_run() {
        let cli = Cli::try_parse_from(["stardrift-cli", "--seed", "9", "run", "--frames", "5", "--pointer", "10,20"])
            .unwrap();
        assert_eq!(cli.seed, Some(9));
        match cli.command {
            Commands::Run { frames, pointer, .. } => {
                assert_eq!(frames, 5);
                assert_eq!(pointer, Some((10.0, 20.0)));
            }
            _ => panic!("expected run"),
        }
    }
}
