//! Planetglide Headless
//!
//! Drives a [`Game`] for a fixed number of ticks with a scripted pilot and
//! logs every event. Useful for soak runs and for checking a world file
//! without a window.

use std::error::Error;
use std::path::PathBuf;
use std::sync::mpsc;

use clap::Parser;
use planetglide_core::GameEvent;
use planetglide_sim::{ControlEvent, Game, WorldConfig};
use tracing::info;

/// Planetglide - headless flight over a small planet
#[derive(Parser, Debug)]
#[command(name = "planetglide-headless")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to a JSON world file (waypoints plus tuning)
    #[arg(short, long)]
    world: Option<PathBuf>,

    /// Number of fixed ticks to run
    #[arg(short, long, default_value_t = 3600)]
    ticks: u64,

    /// Override the random seed from the world file
    #[arg(short, long)]
    seed: Option<u64>,

    /// Ticks between heading changes of the scripted pilot
    #[arg(long, default_value_t = 240)]
    leg: u64,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let args = Args::parse();

    if let Err(e) = run(&args) {
        eprintln!("Headless run failed: {}", e);
        std::process::exit(1);
    }
}

fn run(args: &Args) -> Result<(), Box<dyn Error>> {
    let mut world = match &args.world {
        Some(path) => WorldConfig::from_path(path)?,
        None => WorldConfig::default(),
    };
    if args.seed.is_some() {
        world.sim.seed = args.seed;
    }

    let (tx, rx) = mpsc::channel();
    let mut game = Game::from_world_config(world)?.with_event_sender(tx);

    game.handle_control(ControlEvent::ThrustBegin);
    let mut projects = 0u32;
    let mut dispersals = 0u32;

    for tick in 0..args.ticks {
        for event in pilot_inputs(tick, args.leg.max(1)) {
            game.handle_control(event);
        }

        game.tick();

        for event in rx.try_iter() {
            info!("tick {}: {:?}", tick, event);
            match event {
                GameEvent::WaypointEntered { .. } => game.handle_control(ControlEvent::Interact),
                GameEvent::ProjectOpened { .. } => {
                    projects += 1;
                    // Nothing to read headless; close right away.
                    game.handle_control(ControlEvent::CloseProject);
                }
                GameEvent::CloudDispersed { .. } => dispersals += 1,
                GameEvent::ProjectClosed => {}
            }
        }
    }

    let nav = game.navigator();
    info!(
        "finished {} ticks at {:?}: {} projects opened, {} clouds dispersed, {} particle spawns dropped",
        game.tick_count(),
        nav.position(),
        projects,
        dispersals,
        game.particles().dropped_spawns()
    );
    Ok(())
}

/// Alternate straight legs with left and right banks.
fn pilot_inputs(tick: u64, leg: u64) -> Vec<ControlEvent> {
    if tick % leg != 0 {
        return Vec::new();
    }
    match (tick / leg) % 4 {
        0 => vec![ControlEvent::TurnRightEnd, ControlEvent::TurnLeftEnd],
        1 => vec![ControlEvent::TurnLeftBegin],
        2 => vec![ControlEvent::TurnLeftEnd],
        _ => vec![ControlEvent::TurnRightBegin],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pilot_only_acts_on_leg_boundaries() {
        assert!(pilot_inputs(1, 10).is_empty());
        assert_eq!(pilot_inputs(10, 10), vec![ControlEvent::TurnLeftBegin]);
        assert_eq!(pilot_inputs(30, 10), vec![ControlEvent::TurnRightBegin]);
    }

    #[test]
    fn test_args_defaults() {
        let args = Args::parse_from(["planetglide-headless"]);
        assert_eq!(args.ticks, 3600);
        assert!(args.world.is_none());
        assert!(args.seed.is_none());
    }
}
