use ants_ca::{Simulation, SimulationConfig};
use std::env;
use std::path::Path;
use std::thread;
use std::time::Duration;

const MAX_STEPS: usize = 2000;

/// Usage: `cargo run --example render [preset] [config.toml]`
///
/// Without arguments the bundled example preset is used with the default config.
fn main() -> ants_ca::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter("ants_ca=info")
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = env::args().skip(1).collect();

    let config = match args.get(1) {
        Some(path) => SimulationConfig::from_file(path)?,
        None => SimulationConfig::default(),
    };

    let mut simulation = match args.first() {
        Some(path) => Simulation::from_preset_file(path, config)?,
        None => {
            let preset =
                Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/test_data/trail.preset");
            Simulation::from_preset_file(preset, config)?
        }
    };

    simulation.draw()?;
    while !simulation.is_complete() && simulation.iteration() < MAX_STEPS {
        simulation.evolve();
        simulation.draw()?;
        thread::sleep(Duration::from_millis(50));
    }

    tracing::info!(
        steps = simulation.iteration(),
        food_at_nest = simulation.food_at_nest(),
        total_food = simulation.total_food(),
        "finished"
    );
    simulation.save_counters()
}
