use crate::error::Result;
use serde::Serialize;
use serde_json::json;
use std::fs::File;
use std::io::{BufWriter, Write};
use tracing::{info, warn};

/// One measurement taken after an evolve step.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Sample {
    /// The step this sample was taken after, starting at 1.
    pub iteration: usize,
    /// Units of food delivered to the nest so far.
    pub food_at_nest: u32,
    /// Ants standing on a cell with positive pheromone.
    pub ants_on_pheromone: usize,
}

pub fn create_counter_logger(
    filename: Option<String>,
    grid_size: usize,
    total_food: u32,
) -> Box<dyn CounterLogger> {
    match filename {
        None => Box::new(NoOpCounterLogger {}),
        Some(filename) => Box::new(JsonCounterLogger::new(filename, grid_size, total_food)),
    }
}

pub trait CounterLogger: Send + Sync {
    #[allow(unused_variables)]
    fn save(&self, samples: &[Sample]) -> Result<()> {
        Ok(())
    }
}

struct NoOpCounterLogger;
impl CounterLogger for NoOpCounterLogger {}

struct JsonCounterLogger {
    filename: String,
    grid_size: usize,
    total_food: u32,
}

impl JsonCounterLogger {
    pub fn new(filename: String, grid_size: usize, total_food: u32) -> Self {
        JsonCounterLogger {
            filename,
            grid_size,
            total_food,
        }
    }
}

impl CounterLogger for JsonCounterLogger {
    fn save(&self, samples: &[Sample]) -> Result<()> {
        if samples.is_empty() {
            warn!(filename = %self.filename, "saving counters before any step was taken");
        }

        let data = json!({
            "grid_size": self.grid_size,
            "total_food": self.total_food,
            "samples": samples,
        });

        let file = File::create(&self.filename)?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, &data)?;
        writer.flush()?;
        info!(filename = %self.filename, samples = samples.len(), "saved counters");

        Ok(())
    }
}
