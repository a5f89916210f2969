use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Clone)]
pub enum ConfigError {
    #[error("Invalid parameter '{name}': {reason}")]
    InvalidParameter { name: &'static str, reason: String },
}

fn invalid(name: &'static str, reason: impl Into<String>) -> ConfigError {
    ConfigError::InvalidParameter {
        name,
        reason: reason.into(),
    }
}

/// Immutable configuration for one annealing run.
///
/// Built once per solve call and never mutated during the run; only the
/// controller's derived runtime state (current temperature, counters)
/// changes. All fields are overridable through [`SolverParamsBuilder`];
/// the defaults are tuned for small inventory grids.
#[derive(Debug, Clone, PartialEq)]
pub struct SolverParams {
    /// Starting temperature of the Metropolis chain.
    pub initial_temperature: f64,
    /// Geometric cooling factor applied after each temperature step, in (0, 1).
    pub cooling_rate: f64,
    /// The run converges once the temperature drops to this value.
    pub stopping_temperature: f64,
    /// Move trials per temperature step.
    pub iterations_per_temperature: usize,
    /// Probability of proposing a swap (vs. a relocate) at the start of the run.
    pub initial_swap_probability: f64,
    /// Probability of proposing a swap at the end of the cooling schedule.
    pub final_swap_probability: f64,
    /// Seed the chain from the host grid's current placement instead of a
    /// fresh randomized one.
    pub seed_from_current_grid: bool,
    /// Wall-clock budget. A zero budget still returns the scored initial
    /// placement.
    pub max_processing_time: Duration,
    /// Consecutive temperature steps without a best-score improvement before
    /// one reheat fires. Zero disables reheating.
    pub max_steps_without_improvement: usize,
    /// Temperature multiplier applied on reheat, > 1.
    pub reheat_factor: f64,
    /// Hard cap on total move trials. Zero means unlimited.
    pub max_iterations: usize,
    /// Random seed. `None` draws entropy from the OS, forfeiting
    /// reproducibility.
    pub seed: Option<u64>,
}

impl Default for SolverParams {
    fn default() -> Self {
        Self {
            initial_temperature: 2500.0,
            cooling_rate: 0.97,
            stopping_temperature: 1.0,
            iterations_per_temperature: 40,
            initial_swap_probability: 0.55,
            final_swap_probability: 0.25,
            seed_from_current_grid: false,
            max_processing_time: Duration::from_secs(20),
            max_steps_without_improvement: 25,
            reheat_factor: 1.8,
            max_iterations: 0,
            seed: None,
        }
    }
}

impl SolverParams {
    pub fn builder() -> SolverParamsBuilder {
        SolverParamsBuilder::default()
    }

    /// Validates the parameter set, failing fast before any annealing work.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.initial_temperature.is_finite() || self.initial_temperature <= 0.0 {
            return Err(invalid(
                "initial_temperature",
                format!("must be positive, got {}", self.initial_temperature),
            ));
        }
        if !self.stopping_temperature.is_finite() || self.stopping_temperature <= 0.0 {
            return Err(invalid(
                "stopping_temperature",
                format!("must be positive, got {}", self.stopping_temperature),
            ));
        }
        if self.stopping_temperature >= self.initial_temperature {
            return Err(invalid(
                "stopping_temperature",
                "must be less than initial_temperature",
            ));
        }
        if !(self.cooling_rate > 0.0 && self.cooling_rate < 1.0) {
            return Err(invalid(
                "cooling_rate",
                format!("must be in (0, 1), got {}", self.cooling_rate),
            ));
        }
        if self.iterations_per_temperature == 0 {
            return Err(invalid("iterations_per_temperature", "must be at least 1"));
        }
        for (name, p) in [
            ("initial_swap_probability", self.initial_swap_probability),
            ("final_swap_probability", self.final_swap_probability),
        ] {
            if !(0.0..=1.0).contains(&p) {
                return Err(invalid(name, format!("must be in [0, 1], got {p}")));
            }
        }
        if self.max_steps_without_improvement > 0 && self.reheat_factor <= 1.0 {
            return Err(invalid(
                "reheat_factor",
                format!("must be greater than 1, got {}", self.reheat_factor),
            ));
        }
        Ok(())
    }

    /// Expected number of temperature steps under geometric cooling, ignoring
    /// reheats. Used to interpolate the swap/relocate move mix over the run.
    pub fn expected_temperature_steps(&self) -> usize {
        let ratio = self.stopping_temperature / self.initial_temperature;
        let steps = (ratio.ln() / self.cooling_rate.ln()).ceil();
        (steps as usize).max(1)
    }
}

/// Builder for [`SolverParams`], starting from the documented defaults.
#[derive(Debug, Default, Clone)]
pub struct SolverParamsBuilder {
    params: SolverParams,
}

impl SolverParamsBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn initial_temperature(mut self, t: f64) -> Self {
        self.params.initial_temperature = t;
        self
    }
    pub fn cooling_rate(mut self, rate: f64) -> Self {
        self.params.cooling_rate = rate;
        self
    }
    pub fn stopping_temperature(mut self, t: f64) -> Self {
        self.params.stopping_temperature = t;
        self
    }
    pub fn iterations_per_temperature(mut self, n: usize) -> Self {
        self.params.iterations_per_temperature = n;
        self
    }
    pub fn initial_swap_probability(mut self, p: f64) -> Self {
        self.params.initial_swap_probability = p;
        self
    }
    pub fn final_swap_probability(mut self, p: f64) -> Self {
        self.params.final_swap_probability = p;
        self
    }
    pub fn seed_from_current_grid(mut self, seed: bool) -> Self {
        self.params.seed_from_current_grid = seed;
        self
    }
    pub fn max_processing_time(mut self, budget: Duration) -> Self {
        self.params.max_processing_time = budget;
        self
    }
    pub fn max_steps_without_improvement(mut self, steps: usize) -> Self {
        self.params.max_steps_without_improvement = steps;
        self
    }
    pub fn reheat_factor(mut self, factor: f64) -> Self {
        self.params.reheat_factor = factor;
        self
    }
    pub fn max_iterations(mut self, n: usize) -> Self {
        self.params.max_iterations = n;
        self
    }
    pub fn seed(mut self, seed: u64) -> Self {
        self.params.seed = Some(seed);
        self
    }

    pub fn build(self) -> Result<SolverParams, ConfigError> {
        self.params.validate()?;
        Ok(self.params)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_params_are_valid() {
        assert!(SolverParams::default().validate().is_ok());
    }

    #[test]
    fn builder_applies_overrides() {
        let params = SolverParams::builder()
            .initial_temperature(100.0)
            .stopping_temperature(0.5)
            .cooling_rate(0.9)
            .seed(7)
            .build()
            .unwrap();
        assert_eq!(params.initial_temperature, 100.0);
        assert_eq!(params.seed, Some(7));
    }

    #[test]
    fn validate_rejects_nonpositive_temperatures() {
        let result = SolverParams::builder().initial_temperature(0.0).build();
        assert!(matches!(
            result,
            Err(ConfigError::InvalidParameter {
                name: "initial_temperature",
                ..
            })
        ));
    }

    #[test]
    fn validate_rejects_stopping_above_initial() {
        let result = SolverParams::builder()
            .initial_temperature(1.0)
            .stopping_temperature(2.0)
            .build();
        assert!(result.is_err());
    }

    #[test]
    fn validate_rejects_out_of_range_cooling_and_probabilities() {
        assert!(SolverParams::builder().cooling_rate(1.0).build().is_err());
        assert!(
            SolverParams::builder()
                .initial_swap_probability(1.5)
                .build()
                .is_err()
        );
    }

    #[test]
    fn validate_rejects_unit_reheat_when_reheating_enabled() {
        assert!(SolverParams::builder().reheat_factor(1.0).build().is_err());
        // Disabling reheat makes the factor irrelevant.
        assert!(
            SolverParams::builder()
                .max_steps_without_improvement(0)
                .reheat_factor(1.0)
                .build()
                .is_ok()
        );
    }

    #[test]
    fn expected_temperature_steps_covers_the_schedule() {
        let params = SolverParams::builder()
            .initial_temperature(1000.0)
            .stopping_temperature(1.0)
            .cooling_rate(0.5)
            .build()
            .unwrap();
        // 1000 * 0.5^10 < 1.0, so 10 steps reach the stopping temperature.
        assert_eq!(params.expected_temperature_steps(), 10);
    }
}
