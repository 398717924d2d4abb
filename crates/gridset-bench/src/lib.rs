pub mod config;
pub mod scenarios;

use crate::config::Config;
use crate::scenarios::ScenarioReport;

/// Run all benchmark scenarios with the given configuration
pub fn run_benchmarks(config: &Config) -> anyhow::Result<Vec<ScenarioReport>> {
    config.validate()?;

    tracing::info!(
        "Benchmarking {}x{} grid ({} iterations, {} resize iterations, seed {})",
        config.rows,
        config.cols,
        config.iterations,
        config.resize_iterations,
        config.seed
    );

    let reports = scenarios::run_all(config)?;

    for report in &reports {
        tracing::info!(
            "{:<16} {:>10} iters {:.2?} total {:>10.1} ns/op",
            report.name,
            report.iterations,
            report.elapsed,
            report.nanos_per_op()
        );
    }

    Ok(reports)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_benchmarks_small_grid() {
        let config = Config {
            rows: 3,
            cols: 3,
            iterations: 10,
            resize_iterations: 2,
            seed: 9,
        };

        let reports = run_benchmarks(&config).unwrap();
        assert_eq!(reports.len(), 9);
    }

    #[test]
    fn test_run_benchmarks_rejects_invalid_config() {
        let config = Config {
            rows: 1,
            ..Config::default()
        };
        assert!(run_benchmarks(&config).is_err());
    }
}
