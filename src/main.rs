#![allow(dead_code)]

mod ascii;
mod carving;
mod components;
mod config;
mod constants;
mod dungeon;
mod engine;
mod errors;
mod events;
mod geometry;
mod input;
mod placement;
mod rng;
mod room;
mod scene;
mod spawning;
mod systems;

use std::path::PathBuf;

use clap::Parser;

use config::GameConfig;
use engine::GameEngine;

#[derive(Debug, Parser)]
#[command(name = "rogue-souls")]
#[command(about = "Grow a dungeon of connected rooms, carve it, and walk it", long_about = None)]
struct Args {
    /// Seed for the run; overrides the config file
    #[arg(short, long)]
    seed: Option<u64>,

    /// Number of rooms to grow, root included; overrides the config file
    #[arg(short, long)]
    rooms: Option<usize>,

    /// JSON config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Give up generating after this many ticks
    #[arg(long, default_value = "10000")]
    max_ticks: u64,

    /// Keys to press once the dungeon is carved (w/a/s/d move, p pause, r reset)
    #[arg(short, long, default_value = "")]
    moves: String,

    /// Ticks to simulate after each scripted key
    #[arg(long, default_value = "1")]
    ticks_per_move: u32,

    /// Serve profiling data to puffin_viewer
    #[arg(long)]
    profile: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let args = Args::parse();

    let _profiler = if args.profile {
        let addr = format!("127.0.0.1:{}", puffin_http::DEFAULT_PORT);
        let server = puffin_http::Server::new(&addr)?;
        puffin::set_scopes_on(true);
        log::info!("serving profile data on {addr}");
        Some(server)
    } else {
        None
    };

    let mut config = match &args.config {
        Some(path) => GameConfig::load(path)?,
        None => GameConfig::default(),
    };
    if let Some(seed) = args.seed {
        config.seed = Some(seed);
    }
    if let Some(rooms) = args.rooms {
        config.generator.target_rooms = rooms;
    }

    let mut engine = GameEngine::new(config)?;
    let spent = run_generation(&mut engine, args.max_ticks);
    if !engine.dungeon().is_complete() {
        log::warn!(
            "generation did not finish within {} ticks ({}/{} rooms)",
            args.max_ticks,
            engine.dungeon().len(),
            engine.dungeon().target()
        );
    }

    for key in input::parse_script(&args.moves) {
        engine.handle_key(key);
        engine.release_key(key);
        for _ in 0..args.ticks_per_move {
            engine.tick();
            puffin::GlobalProfiler::lock().new_frame();
        }
    }

    let grid_size = engine.config().grid_size;
    print!("{}", ascii::render(engine.scene(), grid_size));
    println!(
        "seed {} | {} rooms | phase {:?} | {} generation ticks ({:.2}s at {} fps)",
        engine.seed(),
        engine.dungeon().len(),
        engine.dungeon().phase(),
        spent,
        spent as f64 / engine.config().fps as f64,
        engine.config().fps,
    );
    Ok(())
}

fn run_generation(engine: &mut GameEngine, max_ticks: u64) -> u64 {
    let mut spent = 0;
    while spent < max_ticks && !engine.dungeon().is_complete() {
        engine.tick();
        puffin::GlobalProfiler::lock().new_frame();
        spent += 1;
    }
    spent
}
