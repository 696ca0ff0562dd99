//! # Error types
use thiserror::Error;

/// Errors raised during solver construction and time marching.
///
/// Configuration problems are caught before the marching loop starts;
/// the only runtime failure is a diverged vorticity field.
#[derive(Error, Debug)]
pub enum ActiveFlowError {
    /// Invalid run configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// Scheme identifier does not name an implemented integrator
    #[error("Unknown time stepping scheme '{0}'")]
    UnknownScheme(String),

    /// Non-finite spectral coefficients detected after a step
    #[error("Vorticity field diverged at iteration {iteration}")]
    Diverged {
        /// Iteration at which the blow-up was detected
        iteration: usize,
    },

    /// Caller provided result sink failed
    #[error("Result sink error: {0}")]
    Sink(String),
}

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, ActiveFlowError>;
