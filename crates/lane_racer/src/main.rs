//! Command line entry point for the driving game

use std::path::PathBuf;

use clap::Parser;
use lane_racer::{GameConfig, GameError, LaneRacer};
use road_engine::config::Config;
use road_engine::foundation::logging;
use road_engine::render::window::{HeadlessSurface, Surface, TerminalSurface};
use road_engine::{Engine, EngineConfig};

/// Dodge the cones, grab the coins, reach the finish
#[derive(Parser, Debug)]
#[command(name = "lane_racer", version, about)]
struct Args {
    /// Configuration file (.toml or .ron)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Seed for the course layout
    #[arg(short, long)]
    seed: Option<u64>,

    /// Directory containing the OBJ models
    #[arg(short, long)]
    models: Option<PathBuf>,

    /// Log file (the terminal is used for drawing)
    #[arg(long, default_value = "lane_racer.log")]
    log_file: PathBuf,

    /// Stop after this many frames
    #[arg(short, long)]
    frames: Option<u64>,

    /// Run without a terminal on a simulated clock
    #[arg(long)]
    headless: bool,
}

fn main() -> Result<(), GameError> {
    let args = Args::parse();
    logging::init_to_file(&args.log_file)?;

    let mut config = GameConfig::load_or_default(args.config.as_deref())?;
    if let Some(seed) = args.seed {
        config.gameplay.seed = Some(seed);
    }
    if let Some(models) = args.models {
        config.assets.model_dir = models;
    }

    let engine_config = EngineConfig {
        title: "Driving Game".to_string(),
        frame_interval_ms: config.render.frame_interval_ms,
        max_frames: args.frames,
        simulated_clock: args.headless,
    };

    let mut game = LaneRacer::new(config)?;
    let surface: Box<dyn Surface> = if args.headless {
        Box::new(HeadlessSurface::new(160, 96))
    } else {
        Box::new(TerminalSurface::new()?)
    };

    let mut engine = Engine::new(engine_config, surface)?;
    engine.run(&mut game)?;

    match game.outcome() {
        Some(outcome) => println!("{}", outcome.message()),
        None => println!("Race abandoned"),
    }
    Ok(())
}
