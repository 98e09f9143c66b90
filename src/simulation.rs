use crate::config::SimulationConfig;
use crate::counters::{create_counter_logger, CounterLogger, Sample};
use crate::error::Result;
use crate::grid::Grid;
use crate::neighborhood::Neighborhood;
use crate::sense::sense;
use crate::walk::walk;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::fs;
use std::path::Path;
use tracing::{debug, info};

/// A simulation of ants foraging between a nest and food sources.
/// Main entry point for running the model.
///
/// Each call to [`Simulation::evolve`] runs a Sense phase and then a Walk phase, each one
/// reading the grid as it stood when the phase began and writing into a second buffer
/// that is swapped in at the end of the phase.
pub struct Simulation {
    config: SimulationConfig,
    grid: Grid,
    buffer: Grid,
    neighbors: Vec<Vec<(usize, usize)>>,
    total_food: u32,
    iteration: usize,
    counters: Vec<Sample>,
    counter_logger: Box<dyn CounterLogger>,
    rng: StdRng,
}

impl Simulation {
    /// Creates a simulation on a randomly initialised grid.
    ///
    /// # Arguments
    /// * `config` - The tunables, including grid size, population and seed.
    pub fn new(config: SimulationConfig) -> Result<Simulation> {
        config.validate_population()?;

        let mut rng = StdRng::seed_from_u64(config.seed);
        let grid = Grid::random(&config, &mut rng);

        Ok(Simulation::with_rng(grid, config, rng))
    }

    /// Creates a simulation from the string representation of a preset grid.
    ///
    /// # Arguments
    /// * `preset` - One line per row, one of `B`, `E`, `N`, `A`, `F` per cell.
    /// * `config` - The tunables. The grid size comes from the preset instead.
    pub fn from_preset(preset: &str, config: SimulationConfig) -> Result<Simulation> {
        config.validate()?;

        let mut rng = StdRng::seed_from_u64(config.seed);
        let grid = Grid::parse(preset, &config, &mut rng)?;

        Ok(Simulation::with_rng(grid, config, rng))
    }

    /// Creates a simulation from a preset file.
    pub fn from_preset_file(path: impl AsRef<Path>, config: SimulationConfig) -> Result<Simulation> {
        let preset = fs::read_to_string(path)?;
        Simulation::from_preset(&preset, config)
    }

    /// Creates a simulation from an already built grid.
    pub fn from_grid(grid: Grid, config: SimulationConfig) -> Result<Simulation> {
        config.validate()?;

        let rng = StdRng::seed_from_u64(config.seed);
        Ok(Simulation::with_rng(grid, config, rng))
    }

    /// Advances the simulation by one step: Sense, then Walk, then a new counters sample.
    pub fn evolve(&mut self) {
        self.buffer.copy_from(&self.grid);
        sense(
            &self.grid,
            &mut self.buffer,
            &self.neighbors,
            &self.config,
            &mut self.rng,
        );
        std::mem::swap(&mut self.grid, &mut self.buffer);

        self.buffer.copy_from(&self.grid);
        walk(&self.grid, &mut self.buffer, &self.config);
        std::mem::swap(&mut self.grid, &mut self.buffer);

        self.iteration += 1;
        let sample = Sample {
            iteration: self.iteration,
            food_at_nest: self.grid.food_at_nest(),
            ants_on_pheromone: self.grid.ants_on_pheromone(),
        };
        self.counters.push(sample);

        debug!(
            iteration = sample.iteration,
            food_at_nest = sample.food_at_nest,
            ants_on_pheromone = sample.ants_on_pheromone,
            "evolved"
        );
    }

    /// The current grid.
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// One sample per call to `evolve`, oldest first.
    pub fn counters(&self) -> &[Sample] {
        &self.counters
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Number of steps taken so far.
    pub fn iteration(&self) -> usize {
        self.iteration
    }

    /// Food that was on the grid when the simulation was created.
    pub fn total_food(&self) -> u32 {
        self.total_food
    }

    pub fn food_at_nest(&self) -> u32 {
        self.grid.food_at_nest()
    }

    /// Whether all food has been brought to the nest.
    pub fn is_complete(&self) -> bool {
        self.grid.food_at_nest() == self.total_food
    }

    /// Writes the counters to `counters_path`, if one was configured.
    pub fn save_counters(&self) -> Result<()> {
        self.counter_logger.save(&self.counters)
    }

    /// Draws the grid to the console.
    pub fn draw(&self) -> Result<()> {
        self.grid
            .draw(self.iteration, self.grid.food_at_nest(), self.total_food)?;
        Ok(())
    }

    fn with_rng(grid: Grid, config: SimulationConfig, rng: StdRng) -> Simulation {
        let size = grid.size();
        let neighbors = Neighborhood::new(config.neighborhood, config.radius).table(size);
        let total_food = grid.food_at_sources() + grid.food_carried() + grid.food_at_nest();
        let counter_logger = create_counter_logger(config.counters_path.clone(), size, total_food);

        info!(
            size,
            ants = grid.ants().len(),
            food_sources = grid.food().len(),
            total_food,
            seed = config.seed,
            "created simulation"
        );

        Simulation {
            buffer: grid.clone(),
            grid,
            config,
            neighbors,
            total_food,
            iteration: 0,
            counters: Vec::new(),
            counter_logger,
            rng,
        }
    }
}
