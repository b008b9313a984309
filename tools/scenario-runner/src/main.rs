//! scenario-runner: headless driver for FLARE sectors.
//!
//! Usage:
//!   scenario-runner run --scenario skirmish --ticks 900 --seed 7
//!   scenario-runner run --file convoy.json --events
//!   scenario-runner list

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::process::ExitCode;

use tracing_subscriber::EnvFilter;

use flare_core::events::PilotEvent;
use flare_sim::scenario::{ScenarioDef, BUILTIN_SCENARIOS};
use flare_sim::{ScenarioError, SectorEngine, SimConfig};

const DEFAULT_TICKS: u64 = 900;

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_usage();
        return ExitCode::FAILURE;
    }

    match args[1].as_str() {
        "run" => match cmd_run(&args[2..]) {
            Ok(()) => ExitCode::SUCCESS,
            Err(err) => {
                eprintln!("Error: {err}");
                ExitCode::FAILURE
            }
        },
        "list" => {
            for name in BUILTIN_SCENARIOS {
                println!("{name}");
            }
            ExitCode::SUCCESS
        }
        "help" | "--help" | "-h" => {
            print_usage();
            ExitCode::SUCCESS
        }
        other => {
            eprintln!("Unknown command: {other}");
            print_usage();
            ExitCode::FAILURE
        }
    }
}

fn print_usage() {
    eprintln!(
        "scenario-runner: FLARE headless sector driver\n\
         \n\
         Commands:\n\
         \n\
         run       Load a scenario and tick it\n\
         \n\
           --scenario <name>  Built-in scenario (default: skirmish)\n\
           --file <path>      Scenario JSON file (overrides --scenario)\n\
           --ticks <N>        Ticks to run (default: 900, 30 ticks = 1s)\n\
           --seed <S>         RNG seed (default: 42)\n\
           --events           Print every event as a JSON line on stdout\n\
         \n\
         list      Print the built-in scenario names\n\
         \n\
         Logging is controlled with RUST_LOG (default: info).\n"
    );
}

fn parse_value<'a>(args: &'a [String], flag: &str) -> Option<&'a str> {
    for i in 0..args.len() {
        if args[i] == flag && i + 1 < args.len() {
            return Some(args[i + 1].as_str());
        }
    }
    None
}

fn parse_number<T: std::str::FromStr>(args: &[String], flag: &str, default: T) -> T {
    parse_value(args, flag)
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

// --- Run command ---

fn cmd_run(args: &[String]) -> Result<(), ScenarioError> {
    let scenario = match parse_value(args, "--file") {
        Some(path) => ScenarioDef::load(PathBuf::from(path))?,
        None => ScenarioDef::builtin(parse_value(args, "--scenario").unwrap_or("skirmish"))?,
    };
    let ticks = parse_number(args, "--ticks", DEFAULT_TICKS);
    let config = SimConfig {
        seed: parse_number(args, "--seed", SimConfig::default().seed),
        ..Default::default()
    };
    let print_events = args.iter().any(|a| a == "--events");

    let mut engine = SectorEngine::new(config);
    engine.load_scenario(&scenario)?;

    let mut tally: BTreeMap<&'static str, usize> = BTreeMap::new();
    for _ in 0..ticks {
        let report = engine.tick();
        for event in &report.events {
            *tally.entry(event_name(event)).or_default() += 1;
            if print_events {
                println!("{}", serde_json::to_string(event)?);
            }
        }
    }

    let snapshot = engine.snapshot();
    tracing::info!(
        scenario = %scenario.name,
        ticks,
        elapsed_secs = engine.time().elapsed_secs,
        ships = snapshot.ships.len(),
        munitions = snapshot.munitions.len(),
        "run complete"
    );

    eprintln!("Scenario '{}' after {} ticks:", scenario.name, ticks);
    for ship in &snapshot.ships {
        eprintln!(
            "  ship {} ({})  pos ({:>9.1}, {:>9.1}, {:>9.1})  speed {:>6.1}  target {}",
            ship.id,
            ship.faction,
            ship.location.x,
            ship.location.y,
            ship.location.z,
            ship.velocity.length(),
            ship.pilot_target
                .map_or_else(|| "-".to_string(), |t| t.to_string()),
        );
    }
    for (name, count) in &tally {
        eprintln!("  {name:<20} {count}");
    }

    Ok(())
}

fn event_name(event: &PilotEvent) -> &'static str {
    match event {
        PilotEvent::TargetAcquired { .. } => "TargetAcquired",
        PilotEvent::TargetLost { .. } => "TargetLost",
        PilotEvent::CollisionAvoidance { .. } => "CollisionAvoidance",
        PilotEvent::SectorExitWarning { .. } => "SectorExitWarning",
        PilotEvent::MunitionLaunched { .. } => "MunitionLaunched",
        PilotEvent::HoldFire { .. } => "HoldFire",
        PilotEvent::ComponentDestroyed { .. } => "ComponentDestroyed",
        PilotEvent::ShipDestroyed { .. } => "ShipDestroyed",
    }
}
