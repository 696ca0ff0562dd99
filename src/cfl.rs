//! # Adaptive time step control
//!
//! Recomputes the step size from the CFL condition once the random
//! initial condition has relaxed.
use crate::error::{ActiveFlowError, Result};
use log::debug;

/// Iterations to hold the configured step size before the controller
/// takes over; stepping on the raw initial condition with an adapted
/// step is unstable.
pub const WARMUP_ITERATIONS: usize = 2500;

/// Velocity magnitudes below this floor leave the step size untouched
const VELOCITY_FLOOR: f64 = 1e-12;

/// Stability driven step size controller, tau = C dx / max|u|.
#[derive(Debug, Clone, Copy)]
pub struct CflController {
    courant: f64,
    dx: f64,
    warmup: usize,
}

impl CflController {
    /// Controller with a Courant number in (0, 1]
    pub fn new(courant: f64, dx: f64) -> Result<CflController> {
        if !courant.is_finite() || courant <= 0.0 || courant > 1.0 {
            return Err(ActiveFlowError::Config(format!(
                "Courant number must lie in (0, 1], got {}",
                courant
            )));
        }
        Ok(CflController {
            courant,
            dx,
            warmup: WARMUP_ITERATIONS,
        })
    }

    /// True once the warm up phase has passed
    pub fn active(&self, iteration: usize) -> bool {
        iteration > self.warmup
    }

    /// New step size from the current maximum velocity magnitude.
    ///
    /// A vanishing velocity would give an unbounded step; the current
    /// step size is kept in that case.
    pub fn tau(&self, max_velocity: f64, current: f64) -> f64 {
        if max_velocity <= VELOCITY_FLOOR {
            debug!(
                "max velocity {} below floor, keeping tau = {}",
                max_velocity, current
            );
            return current;
        }
        self.courant * self.dx / max_velocity
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cfl_condition() {
        let cfl = CflController::new(0.5, 0.1).unwrap();
        assert_eq!(cfl.tau(2.0, 1.0), 0.5 * 0.1 / 2.0);
        // linear in the Courant number
        let double = CflController::new(1.0, 0.1).unwrap();
        assert_eq!(double.tau(2.0, 1.0), 2.0 * cfl.tau(2.0, 1.0));
        // linear in dx
        let wide = CflController::new(0.5, 0.2).unwrap();
        assert_eq!(wide.tau(2.0, 1.0), 2.0 * cfl.tau(2.0, 1.0));
        // inverse in the velocity
        assert_eq!(cfl.tau(4.0, 1.0), cfl.tau(2.0, 1.0) / 2.0);
    }

    #[test]
    fn test_warmup_gate() {
        let cfl = CflController::new(0.5, 0.1).unwrap();
        assert!(!cfl.active(0));
        assert!(!cfl.active(WARMUP_ITERATIONS));
        assert!(cfl.active(WARMUP_ITERATIONS + 1));
    }

    #[test]
    fn test_degenerate_velocity_keeps_tau() {
        let cfl = CflController::new(0.5, 0.1).unwrap();
        assert_eq!(cfl.tau(0.0, 1e-3), 1e-3);
        assert_eq!(cfl.tau(1e-300, 1e-3), 1e-3);
    }

    #[test]
    fn test_invalid_courant() {
        assert!(CflController::new(0.0, 0.1).is_err());
        assert!(CflController::new(-0.5, 0.1).is_err());
        assert!(CflController::new(1.5, 0.1).is_err());
    }
}
