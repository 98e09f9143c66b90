use crate::config::SimulationConfig;
use crate::simulation::Simulation;
use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;

/// The simulation as seen from Python.
///
/// Built from an optional preset string and an optional TOML config string.
#[pyclass(name = "Simulation", module = "ants_ca")]
pub struct PySimulation {
    inner: Simulation,
}

#[pymethods]
impl PySimulation {
    #[new]
    #[pyo3(signature = (preset=None, config=None))]
    fn new(preset: Option<&str>, config: Option<&str>) -> PyResult<PySimulation> {
        let config = match config {
            Some(contents) => SimulationConfig::from_toml_str(contents).map_err(value_error)?,
            None => SimulationConfig::default(),
        };

        let inner = match preset {
            Some(preset) => Simulation::from_preset(preset, config),
            None => Simulation::new(config),
        }
        .map_err(value_error)?;

        Ok(PySimulation { inner })
    }

    /// Advances the simulation by one step.
    fn evolve(&mut self) {
        self.inner.evolve();
    }

    /// Advances the simulation until all food is at the nest or `max_steps` steps were taken.
    /// Returns whether all food was collected.
    fn run(&mut self, max_steps: usize) -> bool {
        for _ in 0..max_steps {
            if self.inner.is_complete() {
                break;
            }
            self.inner.evolve();
        }
        self.inner.is_complete()
    }

    /// The grid as rows of `(symbol, pheromone, food_signal)` tuples.
    fn grid(&self) -> Vec<Vec<(char, f64, u32)>> {
        let grid = self.inner.grid();
        (0..grid.size())
            .map(|row| {
                (0..grid.size())
                    .map(|col| {
                        let cell = grid.get(row, col);
                        (cell.char(), cell.pheromone(), cell.food_signal())
                    })
                    .collect()
            })
            .collect()
    }

    /// The counters as `(iteration, food_at_nest, ants_on_pheromone)` tuples.
    fn counters(&self) -> Vec<(usize, u32, usize)> {
        self.inner
            .counters()
            .iter()
            .map(|sample| {
                (
                    sample.iteration,
                    sample.food_at_nest,
                    sample.ants_on_pheromone,
                )
            })
            .collect()
    }

    fn nest(&self) -> (usize, usize) {
        self.inner.grid().nest()
    }

    #[getter]
    fn iteration(&self) -> usize {
        self.inner.iteration()
    }

    #[getter]
    fn food_at_nest(&self) -> u32 {
        self.inner.food_at_nest()
    }

    #[getter]
    fn total_food(&self) -> u32 {
        self.inner.total_food()
    }

    fn is_complete(&self) -> bool {
        self.inner.is_complete()
    }

    fn to_preset(&self) -> String {
        self.inner.grid().to_string()
    }

    fn save_counters(&self) -> PyResult<()> {
        self.inner.save_counters().map_err(value_error)
    }
}

fn value_error(error: impl std::fmt::Display) -> PyErr {
    PyValueError::new_err(error.to_string())
}

#[pymodule]
fn ants_ca(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<PySimulation>()?;
    Ok(())
}
