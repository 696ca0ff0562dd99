//! # Run configuration
//!
//! Plain-value inputs of a simulation run. Reading these from a
//! parameter file is the caller's business; the crate only validates
//! them before the loop starts.
use crate::error::{ActiveFlowError, Result};

/// Complete set of run parameters.
///
/// # Example
/// ```
/// use activeflow::Parameters;
///
/// let params = Parameters {
///     domain_length: std::f64::consts::PI,
///     collocation_points: 128,
///     time_stepping_scheme: "IMEX Runge-Kutta".to_string(),
///     courant: 0.1,
///     tau: 1e-4,
///     iterations: 1_000_000,
///     k_min: 5.0,
///     k_max: 10.0,
///     v_0: 1.0,
///     v_ratio: 2.0,
///     seed: Some(42),
/// };
/// assert!(params.validate().is_ok());
/// ```
#[derive(Debug, Clone)]
pub struct Parameters {
    /// Side length of the square domain
    pub domain_length: f64,
    /// Collocation points per axis (even, at least 4)
    pub collocation_points: usize,
    /// Time stepping scheme identifier, see [`crate::scheme::Scheme`]
    pub time_stepping_scheme: String,
    /// Courant number in (0, 1]
    pub courant: f64,
    /// Initial time step size, held until the controller takes over
    pub tau: f64,
    /// Number of iterations to march
    pub iterations: usize,
    /// Lower edge of the negative viscosity band
    pub k_min: f64,
    /// Upper edge of the negative viscosity band
    pub k_max: f64,
    /// Base viscosity
    pub v_0: f64,
    /// Ratio of injected to base viscosity
    pub v_ratio: f64,
    /// Seed of the random initial condition; entropy seeded when absent
    pub seed: Option<u64>,
}

impl Parameters {
    /// Check discretization and time stepping parameters.
    ///
    /// The forcing band and the scheme identifier are validated by
    /// [`crate::forcing::PvcModel`] and [`crate::scheme::Scheme`] when
    /// the solver is built.
    pub fn validate(&self) -> Result<()> {
        if !self.domain_length.is_finite() || self.domain_length <= 0.0 {
            return Err(ActiveFlowError::Config(format!(
                "domain length must be positive, got {}",
                self.domain_length
            )));
        }
        if self.collocation_points < 4 || self.collocation_points % 2 != 0 {
            return Err(ActiveFlowError::Config(format!(
                "collocation points must be even and at least 4, got {}",
                self.collocation_points
            )));
        }
        if !self.courant.is_finite() || self.courant <= 0.0 || self.courant > 1.0 {
            return Err(ActiveFlowError::Config(format!(
                "Courant number must lie in (0, 1], got {}",
                self.courant
            )));
        }
        if !self.tau.is_finite() || self.tau <= 0.0 {
            return Err(ActiveFlowError::Config(format!(
                "initial time step must be positive, got {}",
                self.tau
            )));
        }
        Ok(())
    }
}
