//! The Walk phase: ants move one cell in the direction chosen during Sense.
//!
//! Cells are visited row by row, top to bottom and left to right. Each move is checked
//! against the successor grid as it stands at that point, so an ant scanned earlier
//! claims a contested cell and every later ant aiming for it stays put until the next step.

use crate::cell::{Cell, CellState, Direction};
use crate::config::SimulationConfig;
use crate::grid::Grid;
use tracing::trace;

/// Runs the Walk phase over every interior cell of `current`.
///
/// `next` must start as a copy of `current`.
pub fn walk(current: &Grid, next: &mut Grid, config: &SimulationConfig) {
    let size = current.size();

    for row in 1..size - 1 {
        for col in 1..size - 1 {
            let cell = current.get(row, col);

            match cell.state() {
                CellState::Empty => evaporate(cell, next.get_mut(row, col), config),
                CellState::AntFacing(direction) => {
                    move_ant(cell, (row, col), direction, next, config)
                }
                CellState::AntStay | CellState::Nest | CellState::Food | CellState::Border => {}
            }
        }
    }
}

fn evaporate(before: &Cell, after: &mut Cell, config: &SimulationConfig) {
    after.set_pheromone((before.pheromone() - config.evaporation_rate).max(0.0));

    // An ant may have walked in already
    if after.is_empty() {
        after.set_food_signal(0);
    }
}

fn move_ant(
    ant: &Cell,
    from: (usize, usize),
    direction: Direction,
    next: &mut Grid,
    config: &SimulationConfig,
) {
    let target = direction
        .step(from, next.size())
        .filter(|&(row, col)| next.get(row, col).is_empty());

    let Some(to) = target else {
        next.get_mut(from.0, from.1).set_state(CellState::AntStay);
        return;
    };

    let freshness = ant.food_signal();
    let left_behind = if freshness > 0 {
        let deposit = freshness as f64 / config.initial_freshness as f64;
        ant.pheromone().max(deposit)
    } else {
        ant.pheromone()
    };
    next.set(from.0, from.1, Cell::empty(left_behind));

    let destination = next.get_mut(to.0, to.1);
    destination.set_state(CellState::AntFacing(direction.reverse()));
    destination.set_food_signal(match freshness {
        0 => 0,
        _ => (freshness - 1).max(1),
    });

    trace!(?from, ?to, freshness, "ant moved");
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn config() -> SimulationConfig {
        SimulationConfig {
            initial_pheromone: 0.0,
            initial_freshness: 10,
            evaporation_rate: 0.1,
            ..Default::default()
        }
    }

    fn grid(preset: &str) -> Grid {
        Grid::parse(preset, &config(), &mut StdRng::seed_from_u64(0)).unwrap()
    }

    fn run_walk(current: &Grid) -> Grid {
        let mut next = current.clone();
        walk(current, &mut next, &config());
        next
    }

    #[test]
    fn when_an_ant_faces_an_empty_cell_it_moves_there_and_faces_back() {
        let mut current = grid("BBBBB\nBNEEB\nBEAEB\nBEEEB\nBBBBB");
        current.set(2, 2, Cell::ant(Some(Direction::East), 0.3, 0));
        current.set(2, 3, Cell::empty(0.5));

        let next = run_walk(&current);

        assert_eq!(next.get(2, 2).state(), CellState::Empty);
        assert_eq!(next.get(2, 2).pheromone(), 0.3);
        assert_eq!(
            next.get(2, 3).state(),
            CellState::AntFacing(Direction::West)
        );
        // The destination keeps its own pheromone, evaporated like any empty cell
        assert!((next.get(2, 3).pheromone() - 0.4).abs() < 1e-9);
    }

    #[test]
    fn when_an_ant_faces_a_border_it_stays() {
        let mut current = grid("BBBBB\nBNEEB\nBEEAB\nBEEEB\nBBBBB");
        current.set(2, 3, Cell::ant(Some(Direction::East), 0.0, 0));

        let next = run_walk(&current);

        assert_eq!(next.get(2, 3).state(), CellState::AntStay);
        assert_eq!(next.get(2, 4).state(), CellState::Border);
    }

    #[test]
    fn when_an_ant_faces_the_nest_it_stays() {
        let mut current = grid("BBBBB\nBENEB\nBEAEB\nBEEEB\nBBBBB");
        current.set(2, 2, Cell::ant(Some(Direction::North), 0.2, 0));

        let next = run_walk(&current);

        assert_eq!(next.get(2, 2).state(), CellState::AntStay);
        assert_eq!(next.get(2, 2).pheromone(), 0.2);
        assert_eq!(next.get(1, 2).state(), CellState::Nest);
    }

    #[test]
    fn when_two_ants_aim_for_the_same_cell_the_one_scanned_first_wins() {
        let mut current = grid("BBBBB\nBEAEB\nBAEEB\nBEENB\nBBBBB");
        current.set(1, 2, Cell::ant(Some(Direction::South), 0.0, 0));
        current.set(2, 1, Cell::ant(Some(Direction::East), 0.0, 0));

        let next = run_walk(&current);

        assert_eq!(
            next.get(2, 2).state(),
            CellState::AntFacing(Direction::North)
        );
        assert_eq!(next.get(1, 2).state(), CellState::Empty);
        assert_eq!(next.get(2, 1).state(), CellState::AntStay);
    }

    #[test]
    fn when_an_ant_moves_out_of_a_cell_a_later_ant_can_move_in() {
        let mut current = grid("BBBBB\nBEAEB\nBEAEB\nBEENB\nBBBBB");
        current.set(1, 2, Cell::ant(Some(Direction::West), 0.0, 0));
        current.set(2, 2, Cell::ant(Some(Direction::North), 0.0, 0));

        let next = run_walk(&current);

        assert_eq!(next.get(1, 1).state(), CellState::AntFacing(Direction::East));
        assert_eq!(
            next.get(1, 2).state(),
            CellState::AntFacing(Direction::South)
        );
        assert_eq!(next.get(2, 2).state(), CellState::Empty);
    }

    #[test]
    fn when_an_ant_would_move_into_a_cell_vacated_later_in_the_scan_it_stays() {
        let mut current = grid("BBBBB\nBEAEB\nBEAEB\nBEENB\nBBBBB");
        current.set(1, 2, Cell::ant(Some(Direction::South), 0.0, 0));
        current.set(2, 2, Cell::ant(Some(Direction::West), 0.0, 0));

        let next = run_walk(&current);

        assert_eq!(next.get(1, 2).state(), CellState::AntStay);
        assert_eq!(next.get(2, 1).state(), CellState::AntFacing(Direction::East));
        assert_eq!(next.get(2, 2).state(), CellState::Empty);
    }

    #[test]
    fn when_a_carrying_ant_moves_it_leaves_a_fresh_trail_and_loses_freshness() {
        let mut current = grid("BBBBB\nBNEEB\nBEAEB\nBEEEB\nBBBBB");
        current.set(2, 2, Cell::ant(Some(Direction::South), 0.0, 8));

        let next = run_walk(&current);

        assert!((next.get(2, 2).pheromone() - 0.8).abs() < 1e-9);
        assert_eq!(next.get(2, 2).food_signal(), 0);
        assert_eq!(next.get(3, 2).food_signal(), 7);
    }

    #[test]
    fn when_a_carrying_ant_walks_over_a_stronger_trail_the_trail_is_kept() {
        let mut current = grid("BBBBB\nBNEEB\nBEAEB\nBEEEB\nBBBBB");
        current.set(2, 2, Cell::ant(Some(Direction::South), 0.95, 3));

        let next = run_walk(&current);

        assert_eq!(next.get(2, 2).pheromone(), 0.95);
    }

    #[test]
    fn when_freshness_runs_low_it_stops_at_one_so_the_ant_keeps_its_food() {
        let mut current = grid("BBBBB\nBNEEB\nBEAEB\nBEEEB\nBBBBB");
        current.set(2, 2, Cell::ant(Some(Direction::East), 0.0, 1));

        let next = run_walk(&current);

        assert_eq!(next.get(2, 3).food_signal(), 1);
        assert!((next.get(2, 2).pheromone() - 0.1).abs() < 1e-9);
    }

    #[test]
    fn when_an_ant_stays_its_cell_is_not_evaporated() {
        let mut current = grid("BBBBB\nBNEEB\nBEAEB\nBEEEB\nBBBBB");
        current.set(2, 2, Cell::ant(None, 0.5, 0));

        let next = run_walk(&current);

        assert_eq!(next.get(2, 2), current.get(2, 2));
    }

    #[test]
    fn when_walking_empty_cells_evaporate_down_to_zero() {
        let mut current = grid("BBBBB\nBNEEB\nBEEEB\nBEEEB\nBBBBB");
        current.set(2, 2, Cell::empty(0.5));
        current.set(2, 3, Cell::empty(0.05));

        let next = run_walk(&current);

        assert!((next.get(2, 2).pheromone() - 0.4).abs() < 1e-9);
        assert_eq!(next.get(2, 3).pheromone(), 0.0);
        assert_eq!(next.get(3, 3).pheromone(), 0.0);
    }

    #[test]
    fn when_walking_empty_cells_lose_any_stray_food_signal() {
        let mut current = grid("BBBBB\nBNEEB\nBEEEB\nBEEEB\nBBBBB");
        current.set(2, 2, Cell::new(CellState::Empty, 0.0, 3));

        let next = run_walk(&current);

        assert_eq!(next.get(2, 2).food_signal(), 0);
    }

    #[test]
    fn when_walking_borders_nest_and_food_are_left_alone() {
        let current = grid("BBBBB\nBNEEB\nBEEFB\nBEEEB\nBBBBB");

        let next = run_walk(&current);

        for (row, col, cell) in current.iter() {
            if !cell.is_empty() {
                assert_eq!(next.get(row, col), cell);
            }
        }
    }
}
