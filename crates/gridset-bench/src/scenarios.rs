//! Micro-benchmark scenarios for [`Grid`] operations.
//!
//! Every scenario except the insert ones runs against a [`Fixture`]: a grid
//! with every row but the last filled, so the last row serves lookups that
//! miss.

use std::hint::black_box;
use std::time::{Duration, Instant};

use anyhow::Context;
use gridset_core::{coords, Grid};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::config::Config;

/// Value written by the insert scenarios
const ELEMENT: i32 = 0xf;

/// Timing result of one scenario
#[derive(Debug, Clone)]
pub struct ScenarioReport {
    pub name: &'static str,
    pub iterations: u64,
    pub elapsed: Duration,
}

impl ScenarioReport {
    /// Average cost of one iteration in nanoseconds
    pub fn nanos_per_op(&self) -> f64 {
        if self.iterations == 0 {
            return 0.0;
        }
        self.elapsed.as_nanos() as f64 / self.iterations as f64
    }
}

/// Grid with all rows but the last populated with `row * cols + col`
pub struct Fixture {
    pub grid: Grid<i32>,
    rng: StdRng,
}

impl Fixture {
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        config.validate()?;

        let mut grid = Grid::with_dimensions(config.rows, config.cols);
        let cols = config.cols as i32;

        for coord in coords(config.rows - 1, config.cols) {
            grid.emplace(coord.row, coord.col, || coord.row * cols + coord.col)?;
        }

        Ok(Self {
            grid,
            rng: StdRng::seed_from_u64(config.seed),
        })
    }

    /// Row that holds no values
    pub fn empty_row(&self) -> i32 {
        self.grid.rows() as i32 - 1
    }

    /// A random coordinate inside the populated rows
    pub fn occupied_coord(&mut self) -> (i32, i32) {
        let row = self.rng.gen_range(0..self.empty_row());
        let col = self.rng.gen_range(0..self.grid.cols() as i32);
        (row, col)
    }

    /// A random coordinate anywhere in the grid
    pub fn any_coord(&mut self) -> (i32, i32) {
        let row = self.rng.gen_range(0..self.grid.rows() as i32);
        let col = self.rng.gen_range(0..self.grid.cols() as i32);
        (row, col)
    }
}

fn measure<F>(name: &'static str, iterations: u64, mut op: F) -> anyhow::Result<ScenarioReport>
where
    F: FnMut() -> gridset_core::Result<()>,
{
    let start = Instant::now();
    for _ in 0..iterations {
        op().with_context(|| format!("scenario {} failed", name))?;
    }
    let elapsed = start.elapsed();

    Ok(ScenarioReport {
        name,
        iterations,
        elapsed,
    })
}

pub fn bench_at(config: &Config) -> anyhow::Result<ScenarioReport> {
    let mut fixture = Fixture::new(config)?;
    let (row, col) = fixture.occupied_coord();

    measure("at", config.iterations, || {
        black_box(fixture.grid.at(row, col)?);
        Ok(())
    })
}

pub fn bench_at_else_hit(config: &Config) -> anyhow::Result<ScenarioReport> {
    let mut fixture = Fixture::new(config)?;
    let (row, col) = fixture.occupied_coord();
    let fallback = 0;

    measure("at_else/hit", config.iterations, || {
        black_box(fixture.grid.at_else(row, col, &fallback)?);
        Ok(())
    })
}

pub fn bench_at_else_miss(config: &Config) -> anyhow::Result<ScenarioReport> {
    let mut fixture = Fixture::new(config)?;
    let row = fixture.empty_row();
    let (_, col) = fixture.occupied_coord();
    let fallback = 0;

    measure("at_else/miss", config.iterations, || {
        black_box(fixture.grid.at_else(row, col, &fallback)?);
        Ok(())
    })
}

pub fn bench_get(config: &Config) -> anyhow::Result<ScenarioReport> {
    let mut fixture = Fixture::new(config)?;
    let (row, col) = fixture.any_coord();

    measure("get", config.iterations, || {
        black_box(fixture.grid.get(row, col)?);
        Ok(())
    })
}

pub fn bench_set(config: &Config) -> anyhow::Result<ScenarioReport> {
    let mut fixture = Fixture::new(config)?;
    let (row, col) = fixture.any_coord();
    let mut grid = Grid::with_dimensions(config.rows, config.cols);

    measure("set", config.iterations, || {
        grid.set(row, col, ELEMENT)?;
        Ok(())
    })
}

pub fn bench_emplace(config: &Config) -> anyhow::Result<ScenarioReport> {
    let mut fixture = Fixture::new(config)?;
    let (row, col) = fixture.any_coord();
    let mut grid = Grid::with_dimensions(config.rows, config.cols);

    measure("emplace", config.iterations, || {
        grid.emplace(row, col, || ELEMENT)?;
        Ok(())
    })
}

pub fn bench_erase_and_emplace(config: &Config) -> anyhow::Result<ScenarioReport> {
    let mut fixture = Fixture::new(config)?;
    let (row, col) = fixture.occupied_coord();

    measure("erase+emplace", config.iterations, || {
        fixture.grid.erase(row, col)?;
        fixture.grid.emplace(row, col, || ELEMENT)?;
        Ok(())
    })
}

pub fn bench_reset(config: &Config) -> anyhow::Result<ScenarioReport> {
    let mut fixture = Fixture::new(config)?;

    measure("reset", config.iterations, || {
        fixture.grid.reset();
        Ok(())
    })
}

pub fn bench_set_size(config: &Config) -> anyhow::Result<ScenarioReport> {
    let mut fixture = Fixture::new(config)?;
    let mut rng = StdRng::seed_from_u64(config.seed);
    let low = config.rows;
    let high = config.rows << 6;

    measure("set_size", config.resize_iterations, || {
        let rows = rng.gen_range(low..=high);
        let cols = rng.gen_range(low..=high);
        fixture.grid.set_size(rows, cols);
        Ok(())
    })
}

/// Run every scenario in order
pub fn run_all(config: &Config) -> anyhow::Result<Vec<ScenarioReport>> {
    let scenarios: [fn(&Config) -> anyhow::Result<ScenarioReport>; 9] = [
        bench_at,
        bench_at_else_hit,
        bench_at_else_miss,
        bench_get,
        bench_set,
        bench_emplace,
        bench_erase_and_emplace,
        bench_reset,
        bench_set_size,
    ];

    scenarios.iter().map(|scenario| scenario(config)).collect()
}
