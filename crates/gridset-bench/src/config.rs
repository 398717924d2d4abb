use std::env;
use std::str::FromStr;

use anyhow::Context;

/// Benchmark configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Rows of the fixture grid (the last row is left empty)
    pub rows: u32,
    /// Columns of the fixture grid
    pub cols: u32,
    /// Iterations per scenario
    pub iterations: u64,
    /// Iterations for the resize scenario, which reallocates the grid every time
    pub resize_iterations: u64,
    /// Seed for the coordinate generator
    pub seed: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            rows: 10,
            cols: 10,
            iterations: 100_000,
            resize_iterations: 1_000,
            seed: 42,
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Load configuration through `lookup`, falling back to defaults for
    /// unset variables.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let defaults = Self::default();

        let config = Self {
            rows: parse_var(&lookup, "BENCH_ROWS", defaults.rows)?,
            cols: parse_var(&lookup, "BENCH_COLS", defaults.cols)?,
            iterations: parse_var(&lookup, "BENCH_ITERATIONS", defaults.iterations)?,
            resize_iterations: parse_var(
                &lookup,
                "BENCH_RESIZE_ITERATIONS",
                defaults.resize_iterations,
            )?,
            seed: parse_var(&lookup, "BENCH_SEED", defaults.seed)?,
        };

        config.validate()?;
        Ok(config)
    }

    /// Reject dimensions the fixture cannot be built from
    pub fn validate(&self) -> anyhow::Result<()> {
        anyhow::ensure!(
            self.rows >= 2,
            "BENCH_ROWS must be at least 2, got {}",
            self.rows
        );
        anyhow::ensure!(
            self.cols >= 1,
            "BENCH_COLS must be at least 1, got {}",
            self.cols
        );
        anyhow::ensure!(
            i32::try_from(u64::from(self.rows) << 6).is_ok()
                && i32::try_from(self.cols).is_ok(),
            "grid dimensions {}x{} are too large",
            self.rows,
            self.cols
        );
        Ok(())
    }
}

fn parse_var<T>(lookup: impl Fn(&str) -> Option<String>, name: &str, default: T) -> anyhow::Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match lookup(name) {
        Some(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("invalid value for {}: {:?}", name, raw)),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name: &str| vars.get(name).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = Config::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.rows, 10);
        assert_eq!(config.cols, 10);
    }

    #[test]
    fn test_overrides() {
        let config = Config::from_lookup(lookup_from(&[
            ("BENCH_ROWS", "32"),
            ("BENCH_COLS", " 16 "),
            ("BENCH_ITERATIONS", "500"),
            ("BENCH_SEED", "7"),
        ]))
        .unwrap();

        assert_eq!(config.rows, 32);
        assert_eq!(config.cols, 16);
        assert_eq!(config.iterations, 500);
        assert_eq!(config.resize_iterations, 1_000);
        assert_eq!(config.seed, 7);
    }

    #[test]
    fn test_invalid_number() {
        let err = Config::from_lookup(lookup_from(&[("BENCH_COLS", "wide")])).unwrap_err();
        assert!(err.to_string().contains("BENCH_COLS"));
    }

    #[test]
    fn test_too_few_rows() {
        let err = Config::from_lookup(lookup_from(&[("BENCH_ROWS", "1")])).unwrap_err();
        assert!(err.to_string().contains("at least 2"));
    }
}
