use std::time::Duration;

use bevy::app::ScheduleRunnerPlugin;
use bevy::log::LogPlugin;
use bevy::prelude::*;
use bevy::state::app::StatesPlugin;
use clap::Parser;

use simulation::config::FIXED_HZ;
use simulation::game_params::GameParams;
use simulation::sim_rng::{SimRng, DEFAULT_SEED};
use simulation::ConfigFault;

mod autopilot;
mod collision_probe;
mod driver;
mod presenter;
mod stdin;

use driver::{HostMode, HostPlugin};

/// Environment variable naming a JSON params file.
const PARAMS_PATH_ENV: &str = "LANEHOP_PARAMS";

/// Exit status for unusable configuration.
const CONFIG_EXIT_CODE: i32 = 2;

#[derive(Parser, Debug)]
#[command(name = "lanehop")]
#[command(about = "Headless endless lane-crossing game")]
struct Cli {
    /// Read commands from stdin and print events as JSON lines.
    #[arg(long, conflicts_with = "autopilot")]
    stdin: bool,

    /// Let the built-in bot play (the default).
    #[arg(long)]
    autopilot: bool,

    /// Exit after this many completed runs.
    #[arg(long, default_value_t = 1)]
    runs: u32,

    /// Seed for lane generation, traffic and start tiles.
    #[arg(long, env = "LANEHOP_SEED")]
    seed: Option<u64>,
}

impl Cli {
    fn mode(&self) -> HostMode {
        if self.stdin && !self.autopilot {
            HostMode::Stdin
        } else {
            HostMode::Autopilot
        }
    }
}

fn load_params() -> Result<GameParams, String> {
    let Some(path) = std::env::var_os(PARAMS_PATH_ENV) else {
        return Ok(GameParams::default());
    };
    let json = std::fs::read_to_string(&path)
        .map_err(|e| format!("Could not read {}: {e}", path.to_string_lossy()))?;
    GameParams::from_json_str(&json).map_err(|e| e.to_string())
}

fn main() {
    let cli = Cli::parse();

    let mut app = App::new();
    app.add_plugins((
        MinimalPlugins.set(ScheduleRunnerPlugin::run_loop(Duration::from_secs_f64(
            1.0 / FIXED_HZ,
        ))),
        LogPlugin::default(),
        StatesPlugin,
    ));

    let params = match load_params() {
        Ok(params) => params,
        Err(e) => {
            error!("Invalid game params: {e}");
            std::process::exit(CONFIG_EXIT_CODE);
        }
    };
    let seed = cli.seed.unwrap_or(DEFAULT_SEED);
    info!("Starting lanehop ({:?}, seed {seed}, {} run(s))", cli.mode(), cli.runs);

    app.insert_resource(Time::<Fixed>::from_hz(FIXED_HZ))
        .insert_resource(params)
        .insert_resource(SimRng::from_seed_u64(seed))
        .add_plugins(simulation::SimulationPlugin);

    if let Some(fault) = app.world().get_resource::<ConfigFault>() {
        error!("Refusing to start: {}", fault.0);
        std::process::exit(CONFIG_EXIT_CODE);
    }

    app.add_plugins((
        save::SavePlugin,
        HostPlugin {
            mode: cli.mode(),
            runs: cli.runs,
        },
    ));

    app.run();
}
