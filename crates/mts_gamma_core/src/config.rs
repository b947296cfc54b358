use mts_gamma_derive::{KvDisplay, With};

use crate::{Error, Result};

pub const DEFAULT_GRID: usize = 512;
pub const DEFAULT_GAMMA: f64 = 0.16;
pub const DEFAULT_ITER_GAMMA: usize = 400;
pub const DEFAULT_SMOOTH: f64 = 1.6;
pub const DEFAULT_FINAL_SMOOTH: f64 = 1.0;
pub const DEFAULT_FLOW_STEPS: usize = 450;
pub const DEFAULT_STEP_SIZE: f64 = 1.2;

/// Smallest grid for which the flow clamp range `[1, grid - 2]` is non-empty.
pub(crate) const MIN_GRID: usize = 3;

/// Parameters for one run of the pipeline. Every field is independent; the
/// defaults are the fastest published configuration.
#[derive(Clone, Debug, PartialEq, With, KvDisplay)]
pub struct SolverConfig {
    /// Side length of the square density grid, in cells.
    pub grid: usize,
    /// Diffusion coefficient applied to the discrete Laplacian.
    pub gamma: f64,
    /// Number of diffusion iterations.
    pub iter_gamma: usize,
    /// Gaussian sigma applied before diffusion.
    pub smooth: f64,
    /// Gaussian sigma applied after diffusion.
    pub final_smooth: f64,
    /// Maximum gradient-ascent steps per city.
    pub flow_steps: usize,
    /// Distance moved per gradient-ascent step, in cells.
    pub step_size: f64,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            grid: DEFAULT_GRID,
            gamma: DEFAULT_GAMMA,
            iter_gamma: DEFAULT_ITER_GAMMA,
            smooth: DEFAULT_SMOOTH,
            final_smooth: DEFAULT_FINAL_SMOOTH,
            flow_steps: DEFAULT_FLOW_STEPS,
            step_size: DEFAULT_STEP_SIZE,
        }
    }
}

impl SolverConfig {
    pub fn validate(&self) -> Result<()> {
        self.validate_field()?;
        self.validate_flow()
    }

    pub(crate) fn validate_field(&self) -> Result<()> {
        if self.grid < MIN_GRID {
            return Err(Error::invalid_config(format!(
                "grid must be >= {MIN_GRID}, got {}",
                self.grid
            )));
        }
        if !self.gamma.is_finite() {
            return Err(Error::invalid_config(format!(
                "gamma must be finite, got {}",
                self.gamma
            )));
        }
        validate_sigma("smooth", self.smooth)?;
        validate_sigma("final_smooth", self.final_smooth)
    }

    pub(crate) fn validate_flow(&self) -> Result<()> {
        if self.grid < MIN_GRID {
            return Err(Error::invalid_config(format!(
                "grid must be >= {MIN_GRID}, got {}",
                self.grid
            )));
        }
        if self.flow_steps == 0 {
            return Err(Error::invalid_config("flow_steps must be > 0"));
        }
        if !(self.step_size.is_finite() && self.step_size > 0.0) {
            return Err(Error::invalid_config(format!(
                "step_size must be > 0, got {}",
                self.step_size
            )));
        }
        Ok(())
    }
}

pub(crate) fn validate_sigma(name: &str, sigma: f64) -> Result<()> {
    if sigma.is_finite() && sigma > 0.0 {
        Ok(())
    } else {
        Err(Error::invalid_config(format!(
            "{name} must be > 0, got {sigma}"
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::SolverConfig;
    use crate::Error;

    #[test]
    fn defaults_match_published_configuration() {
        let config = SolverConfig::default();
        assert_eq!(config.grid, 512);
        assert_eq!(config.gamma, 0.16);
        assert_eq!(config.iter_gamma, 400);
        assert_eq!(config.smooth, 1.6);
        assert_eq!(config.final_smooth, 1.0);
        assert_eq!(config.flow_steps, 450);
        assert_eq!(config.step_size, 1.2);
        config.validate().expect("defaults are valid");
    }

    #[test]
    fn with_setters_override_single_fields() {
        let config = SolverConfig::default()
            .with_grid(64)
            .with_gamma(0.2)
            .with_iter_gamma(5)
            .with_smooth(1.0)
            .with_final_smooth(0.5)
            .with_flow_steps(30)
            .with_step_size(0.8);

        assert_eq!(config.grid, 64);
        assert_eq!(config.gamma, 0.2);
        assert_eq!(config.iter_gamma, 5);
        assert_eq!(config.smooth, 1.0);
        assert_eq!(config.final_smooth, 0.5);
        assert_eq!(config.flow_steps, 30);
        assert_eq!(config.step_size, 0.8);
    }

    #[test]
    fn validate_rejects_small_grid() {
        let err = SolverConfig::default()
            .with_grid(2)
            .validate()
            .expect_err("grid 2 is too small");
        assert!(matches!(err, Error::InvalidConfig(_)));
        assert!(err.to_string().contains("grid must be >= 3"));
    }

    #[test]
    fn validate_rejects_non_positive_sigmas() {
        for config in [
            SolverConfig::default().with_smooth(0.0),
            SolverConfig::default().with_smooth(-1.0),
            SolverConfig::default().with_final_smooth(f64::NAN),
        ] {
            let err = config.validate().expect_err("bad sigma");
            assert!(matches!(err, Error::InvalidConfig(_)));
        }
    }

    #[test]
    fn validate_rejects_bad_flow_settings() {
        let err = SolverConfig::default()
            .with_flow_steps(0)
            .validate()
            .expect_err("zero flow steps");
        assert!(err.to_string().contains("flow_steps"));

        let err = SolverConfig::default()
            .with_step_size(0.0)
            .validate()
            .expect_err("zero step size");
        assert!(err.to_string().contains("step_size"));
    }

    #[test]
    fn validate_rejects_non_finite_gamma() {
        let err = SolverConfig::default()
            .with_gamma(f64::INFINITY)
            .validate()
            .expect_err("infinite gamma");
        assert!(err.to_string().contains("gamma"));
    }

    #[test]
    fn display_lists_every_field() {
        let rendered = SolverConfig::default().to_string();
        for key in [
            "grid",
            "gamma",
            "iter_gamma",
            "smooth",
            "final_smooth",
            "flow_steps",
            "step_size",
        ] {
            assert!(rendered.contains(key), "missing {key} in {rendered}");
        }
        assert!(rendered.contains("= 512"));
    }
}
