//! # ants_ca
//!
//! A cellular automaton of ants foraging on a square grid.
//!
//! Every cell holds a state (empty, border, nest, food or an ant), a pheromone level and
//! a food signal. Each step ants first sense their neighborhood and pick a direction,
//! then walk one cell, leaving pheromone behind when they carry food back to the nest.

pub mod cell;
pub mod config;
pub mod counters;
pub mod error;
pub mod grid;
pub mod neighborhood;
pub mod simulation;

mod sense;
mod walk;

#[cfg(feature = "python")]
mod python;

pub use cell::{Cell, CellState, Direction};
pub use config::SimulationConfig;
pub use counters::Sample;
pub use error::{ConfigError, PresetError, Result, SimulationError};
pub use grid::Grid;
pub use neighborhood::{Neighborhood, NeighborhoodKind};
pub use simulation::Simulation;
