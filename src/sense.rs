//! The Sense phase: every ant decides where to go next without moving.
//!
//! Decisions are made against the pre-Sense grid only. The successor grid is written
//! but never read, and food picked up or delivered is tallied in a ledger that is
//! applied to the successor once every ant has decided.

use crate::cell::{Cell, CellState, Direction};
use crate::config::SimulationConfig;
use crate::grid::Grid;
use rand::seq::SliceRandom;
use rand::Rng;
use std::collections::HashMap;
use tracing::trace;

/// Score of a neighbor that must not be chosen.
const EXCLUDED: f64 = -2.0;

/// Food taken from sources and delivered to the nest during one Sense phase.
#[derive(Debug, Default)]
struct FoodLedger {
    taken: HashMap<(usize, usize), u32>,
    delivered: u32,
}

impl FoodLedger {
    /// Takes one unit from the source at `coords` if it still has any left this phase.
    fn take(&mut self, coords: (usize, usize), available: u32) -> bool {
        let taken = self.taken.entry(coords).or_default();
        if *taken >= available {
            return false;
        }

        *taken += 1;
        true
    }

    fn deliver(&mut self) {
        self.delivered += 1;
    }

    fn apply(self, next: &mut Grid) {
        for ((row, col), taken) in self.taken {
            let source = next.get_mut(row, col);
            let remaining = source.food_signal() - taken;

            if remaining == 0 {
                *source = Cell::empty(0.0);
            } else {
                source.set_food_signal(remaining);
            }
        }

        let (row, col) = next.nest();
        let nest = next.get_mut(row, col);
        nest.set_food_signal(nest.food_signal() + self.delivered);
    }
}

/// Runs the Sense phase over every interior cell of `current`.
///
/// `next` must start as a copy of `current`. `neighbors` holds the neighbor list of
/// every cell, indexed row-major.
pub fn sense<R: Rng + ?Sized>(
    current: &Grid,
    next: &mut Grid,
    neighbors: &[Vec<(usize, usize)>],
    config: &SimulationConfig,
    rng: &mut R,
) {
    let size = current.size();
    let mut ledger = FoodLedger::default();

    for row in 1..size - 1 {
        for col in 1..size - 1 {
            let cell = current.get(row, col);
            if !cell.is_ant() {
                continue;
            }

            let decided = sense_cell(
                current,
                (row, col),
                &neighbors[row * size + col],
                config,
                &mut ledger,
                rng,
            );
            next.set(row, col, decided);
        }
    }

    ledger.apply(next);
}

fn sense_cell<R: Rng + ?Sized>(
    current: &Grid,
    position: (usize, usize),
    neighbors: &[(usize, usize)],
    config: &SimulationConfig,
    ledger: &mut FoodLedger,
    rng: &mut R,
) -> Cell {
    let size = current.size();
    let cell = current.get(position.0, position.1);
    // The facing points back to where the ant came from
    let facing = cell.state().facing();
    let prev = facing.and_then(|direction| direction.step(position, size));
    let mut food_signal = cell.food_signal();
    let mut options = Vec::new();

    if food_signal > 0 {
        options = delivery_directions(current, position);

        if options.is_empty() {
            options = return_directions(current, position, prev);
        } else {
            ledger.deliver();
            food_signal = 0;
            trace!(row = position.0, col = position.1, "ant delivered food");
        }
    }

    let direction = match options.choose(rng) {
        Some(direction) => Some(*direction),
        None => forage(
            current,
            position,
            facing,
            neighbors,
            config,
            ledger,
            &mut food_signal,
            rng,
        ),
    };

    Cell::ant(direction, cell.pheromone(), food_signal)
}

/// Directions that hand food over to the nest.
///
/// An ant right next to the nest points at it. Otherwise any empty orthogonal neighbor
/// that touches the nest is a way in.
fn delivery_directions(current: &Grid, position: (usize, usize)) -> Vec<Direction> {
    let size = current.size();
    let nest = current.nest();

    let direct: Vec<Direction> = Direction::ALL
        .into_iter()
        .filter(|direction| direction.step(position, size) == Some(nest))
        .collect();
    if !direct.is_empty() {
        return direct;
    }

    Direction::ALL
        .into_iter()
        .filter(|direction| match direction.step(position, size) {
            Some((row, col)) => current.get(row, col).is_empty() && touches((row, col), nest),
            None => false,
        })
        .collect()
}

/// Directions that bring a carrying ant closer to the nest through empty cells,
/// never stepping back to where it came from.
fn return_directions(
    current: &Grid,
    position: (usize, usize),
    prev: Option<(usize, usize)>,
) -> Vec<Direction> {
    let size = current.size();
    let nest = current.nest();
    let d_row = nest.0 as isize - position.0 as isize;
    let d_col = nest.1 as isize - position.1 as isize;

    Direction::towards(d_row, d_col)
        .into_iter()
        .filter(|direction| match direction.step(position, size) {
            Some(target) => Some(target) != prev && current.get(target.0, target.1).is_empty(),
            None => false,
        })
        .collect()
}

/// Scores the neighborhood and heads for the strongest pheromone, picking up food on the way.
///
/// Returns `None` when the ant stays. A moving ant stops as soon as no neighbor has
/// positive pheromone. A stopped ant only stays while every neighbor is excluded, and
/// otherwise wanders off to a random neighbor among the best ones, bare ground included.
#[allow(clippy::too_many_arguments)]
fn forage<R: Rng + ?Sized>(
    current: &Grid,
    position: (usize, usize),
    facing: Option<Direction>,
    neighbors: &[(usize, usize)],
    config: &SimulationConfig,
    ledger: &mut FoodLedger,
    food_signal: &mut u32,
    rng: &mut R,
) -> Option<Direction> {
    let prev = facing.and_then(|direction| direction.step(position, current.size()));
    let mut best = f64::NEG_INFINITY;
    let mut best_cells = Vec::new();

    for &(row, col) in neighbors {
        let neighbor = current.get(row, col);

        let score = match neighbor.state() {
            _ if Some((row, col)) == prev => EXCLUDED,
            CellState::AntFacing(_) | CellState::AntStay | CellState::Nest => EXCLUDED,
            CellState::Food => {
                if *food_signal == 0 && ledger.take((row, col), neighbor.food_signal()) {
                    *food_signal = config.initial_freshness;
                    trace!(row = position.0, col = position.1, "ant picked up food");
                }
                EXCLUDED
            }
            CellState::Empty | CellState::Border => neighbor.pheromone(),
        };

        if score > best {
            best = score;
            best_cells.clear();
            best_cells.push((row, col));
        } else if score == best {
            best_cells.push((row, col));
        }
    }

    let stays = match facing {
        Some(_) => best <= 0.0,
        None => best < 0.0,
    };
    if stays {
        return None;
    }

    let target = best_cells.choose(rng)?;
    let d_row = target.0 as isize - position.0 as isize;
    let d_col = target.1 as isize - position.1 as isize;

    Direction::towards(d_row, d_col).choose(rng).copied()
}

fn touches(a: (usize, usize), b: (usize, usize)) -> bool {
    a.0.abs_diff(b.0) + a.1.abs_diff(b.1) == 1
}
