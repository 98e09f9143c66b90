use crate::error::{ConfigError, Result};
use crate::neighborhood::NeighborhoodKind;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Tunables for a single simulation run.
///
/// Every field has a default, so a TOML file only needs the values it changes.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Cells per side of a randomly initialised grid, borders included.
    pub grid_size: usize,
    /// Ants placed on a randomly initialised grid.
    pub ant_count: usize,
    /// Food cells placed on a randomly initialised grid.
    pub food_sources: usize,
    /// Units of food on each food cell, for random grids and `F` preset cells.
    pub food_per_source: u32,
    /// Freshness an ant gets when it picks up food. Pheromone dropped on the way back
    /// is `freshness / initial_freshness`.
    pub initial_freshness: u32,
    /// Pheromone removed from every empty cell per step.
    pub evaporation_rate: f64,
    /// Pheromone held by border cells. Must be negative so ants never pick a border.
    pub border_pheromone: f64,
    /// Pheromone held by food cells.
    pub food_pheromone: f64,
    /// Upper bound of the uniform pheromone seeded on empty cells at start.
    pub initial_pheromone: f64,
    pub neighborhood: NeighborhoodKind,
    pub radius: usize,
    pub seed: u64,
    /// Where to write the collected counters as JSON, if anywhere.
    pub counters_path: Option<String>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        SimulationConfig {
            grid_size: 50,
            ant_count: 230,
            food_sources: 4,
            food_per_source: 3,
            initial_freshness: 30,
            evaporation_rate: 0.01,
            border_pheromone: -1.0,
            food_pheromone: -2.0,
            initial_pheromone: 0.5,
            neighborhood: NeighborhoodKind::VonNeumann,
            radius: 1,
            seed: 0,
            counters_path: None,
        }
    }
}

impl SimulationConfig {
    pub fn from_toml_str(contents: &str) -> std::result::Result<SimulationConfig, ConfigError> {
        let config: SimulationConfig = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<SimulationConfig> {
        let contents = fs::read_to_string(path)?;
        Ok(SimulationConfig::from_toml_str(&contents)?)
    }

    /// Checks the settings every grid depends on.
    pub fn validate(&self) -> std::result::Result<(), ConfigError> {
        if self.initial_freshness == 0 {
            return Err(ConfigError::ZeroFreshness);
        }

        if !self.evaporation_rate.is_finite() || self.evaporation_rate < 0.0 {
            return Err(ConfigError::InvalidEvaporation(self.evaporation_rate));
        }

        if !self.initial_pheromone.is_finite() || self.initial_pheromone < 0.0 {
            return Err(ConfigError::InvalidInitialPheromone(self.initial_pheromone));
        }

        if self.border_pheromone.is_nan() || self.border_pheromone >= 0.0 {
            return Err(ConfigError::BorderNotExcluded(self.border_pheromone));
        }

        if self.radius == 0 {
            return Err(ConfigError::ZeroRadius);
        }

        Ok(())
    }

    /// Checks that a random grid of `grid_size` can hold the nest, the food and the ants.
    pub fn validate_population(&self) -> std::result::Result<(), ConfigError> {
        self.validate()?;

        if self.grid_size < 3 {
            return Err(ConfigError::GridTooSmall(self.grid_size));
        }

        let available = (self.grid_size - 2)
            .checked_pow(2)
            .ok_or(ConfigError::Overflow("grid size"))?;
        let needed = self
            .food_sources
            .checked_add(self.ant_count)
            .and_then(|placed| placed.checked_add(1))
            .ok_or(ConfigError::Overflow("population"))?;
        if needed > available {
            return Err(ConfigError::Overcrowded { needed, available });
        }

        if self.total_food().is_none() {
            return Err(ConfigError::Overflow("total food"));
        }

        Ok(())
    }

    /// Total food a random grid starts with, or `None` if it does not fit in a `u32`.
    pub fn total_food(&self) -> Option<u32> {
        u32::try_from(self.food_sources)
            .ok()?
            .checked_mul(self.food_per_source)
    }
}
