use crossterm::style::Color;
use rand::distributions::{Distribution, Standard};
use rand::Rng;

/// Represents the direction an ant can face or move.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Direction {
    North,
    East,
    South,
    West,
}

impl Distribution<Direction> for Standard {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Direction {
        match rng.gen_range(0..4) {
            0 => Direction::North,
            1 => Direction::East,
            2 => Direction::South,
            _ => Direction::West,
        }
    }
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::North,
        Direction::East,
        Direction::South,
        Direction::West,
    ];

    /// The `(row, col)` offset of a single step in this direction.
    pub fn offset(self) -> (isize, isize) {
        match self {
            Direction::North => (-1, 0),
            Direction::East => (0, 1),
            Direction::South => (1, 0),
            Direction::West => (0, -1),
        }
    }

    pub fn reverse(self) -> Direction {
        match self {
            Direction::North => Direction::South,
            Direction::East => Direction::West,
            Direction::South => Direction::North,
            Direction::West => Direction::East,
        }
    }

    /// The cell one step away from `from`, or `None` if it falls off a grid of `size` cells per side.
    pub fn step(self, from: (usize, usize), size: usize) -> Option<(usize, usize)> {
        let (d_row, d_col) = self.offset();
        let row = from.0.checked_add_signed(d_row)?;
        let col = from.1.checked_add_signed(d_col)?;

        if row >= size || col >= size {
            return None;
        }

        Some((row, col))
    }

    /// The compass directions that reduce the given displacement.
    ///
    /// North/South come from the row delta and East/West from the column delta,
    /// so a diagonal displacement yields two candidates and a zero one yields none.
    pub fn towards(d_row: isize, d_col: isize) -> Vec<Direction> {
        let mut directions = Vec::with_capacity(2);

        match d_row.signum() {
            -1 => directions.push(Direction::North),
            1 => directions.push(Direction::South),
            _ => {}
        }

        match d_col.signum() {
            1 => directions.push(Direction::East),
            -1 => directions.push(Direction::West),
            _ => {}
        }

        directions
    }
}

/// What occupies a cell.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum CellState {
    Empty,
    Border,
    Nest,
    Food,
    /// An ant with a facing. Between phases it points back to where the ant came from,
    /// after Sense it holds the direction the ant wants to move in.
    AntFacing(Direction),
    /// An ant that holds its position this step.
    AntStay,
}

impl CellState {
    pub fn is_ant(self) -> bool {
        matches!(self, CellState::AntFacing(_) | CellState::AntStay)
    }

    pub fn facing(self) -> Option<Direction> {
        match self {
            CellState::AntFacing(direction) => Some(direction),
            _ => None,
        }
    }
}

/// A single grid cell: what is on it, the pheromone it holds and its food signal.
///
/// The food signal is the remaining amount for food cells, the delivered amount for
/// the nest and the carried-food freshness for ants (0 when not carrying).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Cell {
    state: CellState,
    pheromone: f64,
    food_signal: u32,
}

impl Cell {
    pub fn new(state: CellState, pheromone: f64, food_signal: u32) -> Cell {
        Cell {
            state,
            pheromone,
            food_signal,
        }
    }

    pub fn empty(pheromone: f64) -> Cell {
        Cell::new(CellState::Empty, pheromone, 0)
    }

    pub fn border(pheromone: f64) -> Cell {
        Cell::new(CellState::Border, pheromone, 0)
    }

    pub fn nest() -> Cell {
        Cell::new(CellState::Nest, 0.0, 0)
    }

    pub fn food(amount: u32, pheromone: f64) -> Cell {
        Cell::new(CellState::Food, pheromone, amount)
    }

    pub fn ant(facing: Option<Direction>, pheromone: f64, food_signal: u32) -> Cell {
        let state = match facing {
            Some(direction) => CellState::AntFacing(direction),
            None => CellState::AntStay,
        };
        Cell::new(state, pheromone, food_signal)
    }

    pub fn state(&self) -> CellState {
        self.state
    }

    pub fn pheromone(&self) -> f64 {
        self.pheromone
    }

    pub fn food_signal(&self) -> u32 {
        self.food_signal
    }

    pub fn is_ant(&self) -> bool {
        self.state.is_ant()
    }

    pub fn is_empty(&self) -> bool {
        self.state == CellState::Empty
    }

    /// Whether this cell holds an ant carrying food.
    pub fn is_carrying(&self) -> bool {
        self.is_ant() && self.food_signal > 0
    }

    pub fn set_state(&mut self, state: CellState) {
        self.state = state;
    }

    pub fn set_pheromone(&mut self, pheromone: f64) {
        self.pheromone = pheromone;
    }

    pub fn set_food_signal(&mut self, food_signal: u32) {
        self.food_signal = food_signal;
    }

    /// The character used for this cell in the preset format.
    pub fn preset_char(&self) -> char {
        match self.state {
            CellState::Empty => 'E',
            CellState::Border => 'B',
            CellState::Nest => 'N',
            CellState::Food => 'F',
            CellState::AntFacing(_) | CellState::AntStay => 'A',
        }
    }

    /// The character used when drawing this cell to the terminal.
    pub fn char(&self) -> char {
        match self.state {
            CellState::Empty => match self.pheromone > 0.0 {
                true => ':',
                false => '.',
            },
            CellState::Border => '#',
            CellState::Nest => 'N',
            CellState::Food => '*',
            CellState::AntFacing(Direction::North) => '^',
            CellState::AntFacing(Direction::East) => '>',
            CellState::AntFacing(Direction::South) => 'v',
            CellState::AntFacing(Direction::West) => '<',
            CellState::AntStay => 'o',
        }
    }

    pub fn color(&self) -> Color {
        match self.state {
            CellState::Empty => match self.pheromone > 0.0 {
                true => Color::DarkGreen,
                false => Color::Reset,
            },
            CellState::Border => Color::DarkGrey,
            CellState::Nest => Color::Yellow,
            CellState::Food => Color::Green,
            CellState::AntFacing(_) | CellState::AntStay => match self.food_signal > 0 {
                true => Color::Red,
                false => Color::DarkYellow,
            },
        }
    }
}
