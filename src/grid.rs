use crate::cell::{Cell, CellState, Direction};
use crate::config::SimulationConfig;
use crate::error::PresetError;
use crossterm::{
    cursor::Hide,
    execute,
    style::{Color, Print, SetForegroundColor},
    terminal::{Clear, ClearType},
};
use rand::seq::SliceRandom;
use rand::Rng;
use std::fmt;
use std::io::{stdout, Write};

/// A square grid of cells stored row-major, with a border around the edge and a single nest.
#[derive(Clone, Debug, PartialEq)]
pub struct Grid {
    size: usize,
    cells: Vec<Cell>,
    nest: (usize, usize),
}

impl Grid {
    /// Parses a preset: one line per row, one character per cell.
    ///
    /// `B` is a border, `E` an empty cell, `N` the nest, `A` an ant with a random facing
    /// and `F` a food source holding `food_per_source` units.
    pub fn parse<R: Rng + ?Sized>(
        preset: &str,
        config: &SimulationConfig,
        rng: &mut R,
    ) -> Result<Grid, PresetError> {
        let rows: Vec<&str> = preset
            .lines()
            .map(|line| line.trim_end_matches('\r'))
            .filter(|line| !line.trim().is_empty())
            .collect();

        let size = match rows.first() {
            Some(first) => first.chars().count(),
            None => return Err(PresetError::Empty),
        };

        for (row, line) in rows.iter().enumerate() {
            let found = line.chars().count();
            if found != size {
                return Err(PresetError::RaggedRow {
                    row,
                    found,
                    expected: size,
                });
            }
        }

        if rows.len() != size {
            return Err(PresetError::NotSquare {
                rows: rows.len(),
                width: size,
            });
        }

        let mut cells = Vec::with_capacity(size * size);
        let mut nest = None;
        let mut food: u32 = 0;

        for (row, line) in rows.iter().enumerate() {
            for (col, value) in line.chars().enumerate() {
                let on_edge = row == 0 || col == 0 || row == size - 1 || col == size - 1;
                if on_edge && value != 'B' {
                    return Err(PresetError::OpenBorder { row, col });
                }

                let cell = match value {
                    'B' => Cell::border(config.border_pheromone),
                    'E' => Cell::empty(seed_pheromone(config, rng)),
                    'N' => {
                        if nest.is_some() {
                            return Err(PresetError::DuplicateNest { row, col });
                        }
                        nest = Some((row, col));
                        Cell::nest()
                    }
                    'A' => Cell::ant(Some(rng.gen::<Direction>()), 0.0, 0),
                    'F' => {
                        food = food
                            .checked_add(config.food_per_source)
                            .ok_or(PresetError::TooMuchFood)?;
                        Cell::food(config.food_per_source, config.food_pheromone)
                    }
                    _ => return Err(PresetError::UnknownCell { value, row, col }),
                };
                cells.push(cell);
            }
        }

        match nest {
            Some(nest) => Ok(Grid { size, cells, nest }),
            None => Err(PresetError::MissingNest),
        }
    }

    /// Builds a grid of `config.grid_size` with the nest in the middle and the food and ants
    /// scattered over distinct interior cells.
    ///
    /// Expects a config that passed `validate_population`.
    pub fn random<R: Rng + ?Sized>(config: &SimulationConfig, rng: &mut R) -> Grid {
        let size = config.grid_size;
        let nest = (size / 2, size / 2);

        let mut grid = Grid {
            size,
            cells: Vec::with_capacity(size * size),
            nest,
        };
        for row in 0..size {
            for col in 0..size {
                let cell = if grid.is_edge(row, col) {
                    Cell::border(config.border_pheromone)
                } else if (row, col) == nest {
                    Cell::nest()
                } else {
                    Cell::empty(seed_pheromone(config, rng))
                };
                grid.cells.push(cell);
            }
        }

        let free: Vec<(usize, usize)> = (1..size - 1)
            .flat_map(|row| (1..size - 1).map(move |col| (row, col)))
            .filter(|&coords| coords != nest)
            .collect();
        let picked: Vec<(usize, usize)> = free
            .choose_multiple(rng, config.food_sources + config.ant_count)
            .cloned()
            .collect();

        let (food, ants) = picked.split_at(config.food_sources.min(picked.len()));
        for &(row, col) in food {
            grid.set(
                row,
                col,
                Cell::food(config.food_per_source, config.food_pheromone),
            );
        }
        for &(row, col) in ants {
            let pheromone = grid.get(row, col).pheromone();
            grid.set(row, col, Cell::ant(Some(rng.gen()), pheromone, 0));
        }

        grid
    }

    pub fn get(&self, row: usize, col: usize) -> &Cell {
        &self.cells[self.index(row, col)]
    }

    pub fn get_mut(&mut self, row: usize, col: usize) -> &mut Cell {
        let index = self.index(row, col);
        &mut self.cells[index]
    }

    pub fn set(&mut self, row: usize, col: usize, value: Cell) {
        let index = self.index(row, col);
        self.cells[index] = value;
    }

    pub fn size(&self) -> usize {
        self.size
    }

    /// Coordinates of the nest.
    pub fn nest(&self) -> (usize, usize) {
        self.nest
    }

    /// Overwrites this grid with `other` without reallocating.
    pub fn copy_from(&mut self, other: &Grid) {
        self.size = other.size;
        self.nest = other.nest;
        self.cells.clone_from(&other.cells);
    }

    pub fn is_edge(&self, row: usize, col: usize) -> bool {
        row == 0 || col == 0 || row == self.size - 1 || col == self.size - 1
    }

    /// All cells with their coordinates, row-major.
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize, &Cell)> {
        self.cells
            .iter()
            .enumerate()
            .map(move |(index, cell)| (index / self.size, index % self.size, cell))
    }

    pub fn ants(&self) -> Vec<(usize, usize)> {
        self.all(|cell| cell.is_ant())
    }

    pub fn food(&self) -> Vec<(usize, usize)> {
        self.all(|cell| cell.state() == CellState::Food)
    }

    /// Units of food delivered to the nest.
    pub fn food_at_nest(&self) -> u32 {
        self.get(self.nest.0, self.nest.1).food_signal()
    }

    /// Units of food still lying at food sources.
    pub fn food_at_sources(&self) -> u32 {
        self.cells
            .iter()
            .filter(|cell| cell.state() == CellState::Food)
            .map(|cell| cell.food_signal())
            .sum()
    }

    /// Units of food on the way to the nest, one per carrying ant.
    pub fn food_carried(&self) -> u32 {
        self.cells.iter().filter(|cell| cell.is_carrying()).count() as u32
    }

    /// Ants standing on a cell with residual pheromone.
    pub fn ants_on_pheromone(&self) -> usize {
        self.cells
            .iter()
            .filter(|cell| cell.is_ant() && cell.pheromone() > 0.0)
            .count()
    }

    pub fn draw(&self, iteration: usize, food_at_nest: u32, total_food: u32) -> std::io::Result<()> {
        let mut stdout = stdout();

        execute!(
            stdout,
            Clear(ClearType::All),
            Hide,
            Print("Iteration: "),
            Print(iteration.to_string()),
            Print("\nFood at nest: "),
            Print(food_at_nest.to_string()),
            Print(" / "),
            Print(total_food.to_string()),
            Print("\nAnts on a trail: "),
            Print(self.ants_on_pheromone().to_string()),
            Print("\n\n")
        )?;

        for row in 0..self.size {
            for col in 0..self.size {
                let cell = self.get(row, col);
                execute!(
                    stdout,
                    SetForegroundColor(cell.color()),
                    Print(cell.char()),
                    SetForegroundColor(Color::Reset)
                )?;
            }
            execute!(stdout, Print("\n"))?;
        }

        stdout.flush()
    }

    fn index(&self, row: usize, col: usize) -> usize {
        assert!(
            row < self.size && col < self.size,
            "Cell ({}, {}) is outside of a {}x{} grid",
            row,
            col,
            self.size,
            self.size
        );
        row * self.size + col
    }

    fn all(&self, filter: fn(&Cell) -> bool) -> Vec<(usize, usize)> {
        self.iter()
            .filter(|(_, _, cell)| filter(cell))
            .map(|(row, col, _)| (row, col))
            .collect()
    }
}

/// Writes the grid in the preset format.
impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..self.size {
            for col in 0..self.size {
                write!(f, "{}", self.get(row, col).preset_char())?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

fn seed_pheromone<R: Rng + ?Sized>(config: &SimulationConfig, rng: &mut R) -> f64 {
    if config.initial_pheromone > 0.0 {
        rng.gen_range(0.0..config.initial_pheromone)
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn config() -> SimulationConfig {
        SimulationConfig {
            initial_pheromone: 0.0,
            ..Default::default()
        }
    }

    fn parse(preset: &str) -> Result<Grid, PresetError> {
        Grid::parse(preset, &config(), &mut StdRng::seed_from_u64(0))
    }

    #[test]
    fn when_parsing_a_preset_the_grid_has_the_width_of_the_first_row() {
        let grid = parse("BBBB\nBNEB\nBAFB\nBBBB\n").unwrap();

        assert_eq!(grid.size(), 4);
        assert_eq!(grid.nest(), (1, 1));
    }

    #[test]
    fn when_parsing_a_preset_each_cell_gets_the_correct_state() {
        let grid = parse("BBBB\nBNEB\nBAFB\nBBBB").unwrap();

        assert_eq!(grid.get(0, 0).state(), CellState::Border);
        assert_eq!(grid.get(0, 0).pheromone(), -1.0);
        assert_eq!(grid.get(1, 1).state(), CellState::Nest);
        assert_eq!(grid.get(1, 2).state(), CellState::Empty);
        assert_eq!(grid.get(1, 2).pheromone(), 0.0);
        assert!(matches!(grid.get(2, 1).state(), CellState::AntFacing(_)));
        assert_eq!(grid.get(2, 1).food_signal(), 0);
        assert_eq!(grid.get(2, 2).state(), CellState::Food);
        assert_eq!(grid.get(2, 2).food_signal(), 3);
        assert_eq!(grid.get(2, 2).pheromone(), -2.0);
    }

    #[test]
    fn when_parsing_a_preset_with_windows_line_endings_the_terminators_are_ignored() {
        let grid = parse("BBB\r\nBNB\r\nBBB\r\n").unwrap();

        assert_eq!(grid.size(), 3);
    }

    #[test]
    fn when_parsing_an_empty_preset_an_error_is_returned() {
        assert_eq!(parse("\n\n"), Err(PresetError::Empty));
    }

    #[test]
    fn when_parsing_a_ragged_preset_an_error_is_returned() {
        assert_eq!(
            parse("BBBB\nBNB\nBEEB\nBBBB"),
            Err(PresetError::RaggedRow {
                row: 1,
                found: 3,
                expected: 4
            })
        );
    }

    #[test]
    fn when_parsing_a_non_square_preset_an_error_is_returned() {
        assert_eq!(
            parse("BBBB\nBNEB\nBBBB"),
            Err(PresetError::NotSquare { rows: 3, width: 4 })
        );
    }

    #[test]
    fn when_parsing_a_preset_with_an_unknown_character_an_error_is_returned() {
        assert_eq!(
            parse("BBBB\nBNXB\nBEEB\nBBBB"),
            Err(PresetError::UnknownCell {
                value: 'X',
                row: 1,
                col: 2
            })
        );
    }

    #[test]
    fn when_parsing_a_preset_without_a_nest_an_error_is_returned() {
        assert_eq!(parse("BBBB\nBEEB\nBAEB\nBBBB"), Err(PresetError::MissingNest));
    }

    #[test]
    fn when_parsing_a_preset_with_two_nests_an_error_is_returned() {
        assert_eq!(
            parse("BBBB\nBNEB\nBENB\nBBBB"),
            Err(PresetError::DuplicateNest { row: 2, col: 2 })
        );
    }

    #[test]
    fn when_parsing_a_preset_with_an_open_edge_an_error_is_returned() {
        assert_eq!(
            parse("BBBB\nBNEE\nBEEB\nBBBB"),
            Err(PresetError::OpenBorder { row: 1, col: 3 })
        );
    }

    #[test]
    fn when_the_preset_food_does_not_fit_a_counter_an_error_is_returned() {
        let config = SimulationConfig {
            food_per_source: u32::MAX,
            ..config()
        };

        let result = Grid::parse(
            "BBBBB\nBNEFB\nBEEFB\nBEEEB\nBBBBB",
            &config,
            &mut StdRng::seed_from_u64(0),
        );

        assert_eq!(result, Err(PresetError::TooMuchFood));
    }

    #[test]
    fn when_parsing_with_initial_pheromone_empty_cells_are_seeded_below_the_bound() {
        let config = SimulationConfig {
            initial_pheromone: 0.25,
            ..Default::default()
        };
        let grid = Grid::parse(
            "BBBBB\nBEEEB\nBENEB\nBEEEB\nBBBBB",
            &config,
            &mut StdRng::seed_from_u64(3),
        )
        .unwrap();

        assert!(grid
            .iter()
            .filter(|(_, _, cell)| cell.is_empty())
            .all(|(_, _, cell)| (0.0..0.25).contains(&cell.pheromone())));
    }

    #[test]
    fn when_displaying_a_grid_it_is_written_in_the_preset_format() {
        let preset = "BBBBB\nBNEEB\nBEAEB\nBEEFB\nBBBBB\n";
        let grid = parse(preset).unwrap();

        assert_eq!(grid.to_string(), preset);
    }

    #[test]
    fn when_creating_a_random_grid_the_population_matches_the_config() {
        let config = SimulationConfig {
            grid_size: 12,
            ant_count: 15,
            food_sources: 3,
            food_per_source: 4,
            ..Default::default()
        };
        let grid = Grid::random(&config, &mut StdRng::seed_from_u64(11));

        assert_eq!(grid.size(), 12);
        assert_eq!(grid.nest(), (6, 6));
        assert_eq!(grid.get(6, 6).state(), CellState::Nest);
        assert_eq!(grid.ants().len(), 15);
        assert_eq!(grid.food().len(), 3);
        assert_eq!(grid.food_at_sources(), 12);
        assert_eq!(grid.food_at_nest(), 0);
        assert_eq!(grid.food_carried(), 0);
    }

    #[test]
    fn when_creating_a_random_grid_the_edges_are_borders() {
        let config = SimulationConfig {
            grid_size: 8,
            ant_count: 10,
            ..Default::default()
        };
        let grid = Grid::random(&config, &mut StdRng::seed_from_u64(5));

        for (row, col, cell) in grid.iter() {
            assert_eq!(
                cell.state() == CellState::Border,
                grid.is_edge(row, col),
                "unexpected state at ({}, {})",
                row,
                col
            );
        }
    }

    #[test]
    fn when_creating_random_grids_with_the_same_seed_they_are_identical() {
        let config = SimulationConfig::default();
        let first = Grid::random(&config, &mut StdRng::seed_from_u64(42));
        let second = Grid::random(&config, &mut StdRng::seed_from_u64(42));

        assert_eq!(first, second);
    }

    #[test]
    fn when_copying_a_grid_the_copy_is_identical() {
        let source = parse("BBBBB\nBNEEB\nBEAEB\nBEEFB\nBBBBB").unwrap();
        let mut target = parse("BBBBB\nBEEEB\nBEEEB\nBEENB\nBBBBB").unwrap();

        target.copy_from(&source);

        assert_eq!(target, source);
    }

    #[test]
    #[should_panic(expected = "is outside of a 3x3 grid")]
    fn when_getting_a_cell_outside_the_grid_a_panic_occurs() {
        let grid = parse("BBB\nBNB\nBBB").unwrap();
        grid.get(3, 0);
    }

    #[test]
    fn when_counting_ants_on_pheromone_only_ants_on_positive_cells_are_counted() {
        let mut grid = parse("BBBBB\nBNEEB\nBEAEB\nBEEAB\nBBBBB").unwrap();
        grid.set(2, 2, Cell::ant(None, 0.4, 0));
        grid.set(3, 3, Cell::ant(None, 0.0, 0));
        grid.set(1, 3, Cell::empty(0.9));

        assert_eq!(grid.ants_on_pheromone(), 1);
    }
}
