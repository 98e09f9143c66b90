use thiserror::Error;

/// Structural problems in a preset grid. No grid is produced when one of these occurs.
#[derive(Debug, Error, PartialEq)]
pub enum PresetError {
    #[error("preset contains no rows")]
    Empty,

    #[error("row {row} has {found} cells but the first row has {expected}")]
    RaggedRow {
        row: usize,
        found: usize,
        expected: usize,
    },

    #[error("preset has {rows} rows but is {width} cells wide")]
    NotSquare { rows: usize, width: usize },

    #[error("unrecognized cell '{value}' at row {row}, column {col}")]
    UnknownCell { value: char, row: usize, col: usize },

    #[error("preset has no nest")]
    MissingNest,

    #[error("preset has a second nest at row {row}, column {col}")]
    DuplicateNest { row: usize, col: usize },

    #[error("edge cell at row {row}, column {col} must be a border")]
    OpenBorder { row: usize, col: usize },

    #[error("preset holds more food than fits in a counter")]
    TooMuchFood,
}

/// Invalid simulation settings.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("grid size {0} is too small, at least 3 is required")]
    GridTooSmall(usize),

    #[error("{needed} interior cells are needed for the nest, food and ants but only {available} exist")]
    Overcrowded { needed: usize, available: usize },

    #[error("initial freshness must be at least 1")]
    ZeroFreshness,

    #[error("evaporation rate must be a non-negative number, got {0}")]
    InvalidEvaporation(f64),

    #[error("initial pheromone must be a non-negative number, got {0}")]
    InvalidInitialPheromone(f64),

    #[error("border pheromone must be negative, got {0}")]
    BorderNotExcluded(f64),

    #[error("neighborhood radius must be at least 1")]
    ZeroRadius,

    #[error("{0} is too large")]
    Overflow(&'static str),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),
}

#[derive(Debug, Error)]
pub enum SimulationError {
    #[error("Preset error: {0}")]
    Preset(#[from] PresetError),

    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, SimulationError>;
