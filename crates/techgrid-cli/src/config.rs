use crate::cli::SolveArgs;
use crate::error::{CliError, Result};
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;
use techgrid::core::scoring::policy::ScoringPolicy;
use techgrid::engine::config::SolverParams;
use tracing::debug;

/// A solver configuration file: an optional `[solver]` table with parameter
/// overrides and an optional `[policy]` table with scoring constants.
///
/// Every field is optional; CLI flags take precedence over file values, and
/// anything left unset falls back to the built-in defaults.
#[derive(Deserialize, Debug, Default, Clone)]
#[serde(default, deny_unknown_fields)]
pub struct SolverFileConfig {
    pub solver: PartialSolverParams,
    pub policy: Option<ScoringPolicy>,
}

#[derive(Deserialize, Debug, Default, Clone)]
#[serde(default, deny_unknown_fields)]
pub struct PartialSolverParams {
    pub initial_temperature: Option<f64>,
    pub cooling_rate: Option<f64>,
    pub stopping_temperature: Option<f64>,
    pub iterations_per_temperature: Option<usize>,
    pub initial_swap_probability: Option<f64>,
    pub final_swap_probability: Option<f64>,
    pub seed_from_current_grid: Option<bool>,
    pub max_processing_time_ms: Option<u64>,
    pub max_steps_without_improvement: Option<usize>,
    pub reheat_factor: Option<f64>,
    pub max_iterations: Option<usize>,
    pub seed: Option<u64>,
}

impl SolverFileConfig {
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| {
            CliError::Config(format!("failed to parse '{}': {}", path.display(), e))
        })
    }

    /// Merges file values with CLI overrides into a validated parameter set.
    /// CLI flags win over the file; unset fields keep their defaults.
    pub fn merge_with_cli(&self, args: &SolveArgs) -> Result<SolverParams> {
        let file = &self.solver;
        let mut builder = SolverParams::builder();

        if let Some(t) = args.initial_temperature.or(file.initial_temperature) {
            builder = builder.initial_temperature(t);
        }
        if let Some(rate) = args.cooling_rate.or(file.cooling_rate) {
            builder = builder.cooling_rate(rate);
        }
        if let Some(t) = args.stopping_temperature.or(file.stopping_temperature) {
            builder = builder.stopping_temperature(t);
        }
        if let Some(n) = args
            .iterations_per_temperature
            .or(file.iterations_per_temperature)
        {
            builder = builder.iterations_per_temperature(n);
        }
        if let Some(p) = file.initial_swap_probability {
            builder = builder.initial_swap_probability(p);
        }
        if let Some(p) = file.final_swap_probability {
            builder = builder.final_swap_probability(p);
        }
        if args.seed_from_current || file.seed_from_current_grid.unwrap_or(false) {
            builder = builder.seed_from_current_grid(true);
        }
        if let Some(ms) = args.max_time_ms.or(file.max_processing_time_ms) {
            builder = builder.max_processing_time(Duration::from_millis(ms));
        }
        if let Some(steps) = file.max_steps_without_improvement {
            builder = builder.max_steps_without_improvement(steps);
        }
        if let Some(factor) = file.reheat_factor {
            builder = builder.reheat_factor(factor);
        }
        if let Some(n) = args.max_iterations.or(file.max_iterations) {
            builder = builder.max_iterations(n);
        }
        if let Some(seed) = args.seed.or(file.seed) {
            builder = builder.seed(seed);
        }

        let params = builder.build()?;
        debug!("Merged solver parameters: {:?}", params);
        Ok(params)
    }
}

/// Resolves the scoring policy: an explicit `--policy` file wins, then the
/// `[policy]` table of the solver configuration, then the defaults.
pub fn resolve_policy(
    path: Option<&Path>,
    file_policy: Option<&ScoringPolicy>,
) -> Result<ScoringPolicy> {
    let policy = match path {
        Some(p) => ScoringPolicy::load(p)?,
        None => file_policy.cloned().unwrap_or_default(),
    };
    policy.validate()?;
    Ok(policy)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::{Cli, Commands};
    use clap::Parser;
    use std::io::Write;

    fn solve_args(extra: &[&str]) -> SolveArgs {
        let mut argv = vec!["techgrid", "solve", "--input", "layout.toml"];
        argv.extend_from_slice(extra);
        match Cli::parse_from(argv).command {
            Commands::Solve(args) => args,
            _ => panic!("expected solve subcommand"),
        }
    }

    #[test]
    fn defaults_apply_when_file_and_cli_are_empty() {
        let params = SolverFileConfig::default()
            .merge_with_cli(&solve_args(&[]))
            .unwrap();
        assert_eq!(params, SolverParams::default());
    }

    #[test]
    fn cli_overrides_win_over_file_values() {
        let config = SolverFileConfig {
            solver: PartialSolverParams {
                initial_temperature: Some(500.0),
                seed: Some(1),
                ..Default::default()
            },
            policy: None,
        };
        let params = config
            .merge_with_cli(&solve_args(&["--initial-temperature", "800", "--seed", "42"]))
            .unwrap();
        assert_eq!(params.initial_temperature, 800.0);
        assert_eq!(params.seed, Some(42));
    }

    #[test]
    fn file_values_apply_without_cli_overrides() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(
            b"[solver]\ncooling_rate = 0.9\nmax_processing_time_ms = 250\n\n[policy]\nsupercharge_multiplier = 2.0\n",
        )
        .unwrap();

        let config = SolverFileConfig::from_file(file.path()).unwrap();
        let params = config.merge_with_cli(&solve_args(&[])).unwrap();
        assert_eq!(params.cooling_rate, 0.9);
        assert_eq!(params.max_processing_time, Duration::from_millis(250));

        let policy = resolve_policy(None, config.policy.as_ref()).unwrap();
        assert_eq!(policy.supercharge_multiplier, 2.0);
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"[solver]\ntemprature = 10.0\n").unwrap();
        assert!(matches!(
            SolverFileConfig::from_file(file.path()),
            Err(CliError::Config(_))
        ));
    }

    #[test]
    fn invalid_merged_parameters_fail_validation() {
        let result = SolverFileConfig::default()
            .merge_with_cli(&solve_args(&["--cooling-rate", "1.5"]));
        assert!(matches!(result, Err(CliError::Params(_))));
    }
}
