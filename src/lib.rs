#![warn(missing_docs)]
//! # activeflow: pseudo-spectral active turbulence in two dimensions
//!
//! Solver for a generalized incompressible vorticity-transport equation
//! on a doubly periodic square. Turbulence is sustained by a scale
//! selective negative viscosity band (the PVC model) instead of
//! boundary driven energy input.
//!
//! The crate implements spectral differentiation, 2/3-rule
//! anti-aliasing, three interchangeable time integrators (semi-implicit
//! Euler, explicit SSP-RK3 and an L-stable IMEX-RK3), an adaptive
//! CFL driven time step and running diagnostics. Results are handed to
//! a caller provided [`ResultSink`]; persistence and postprocessing
//! live outside this crate.
//!
//! # Example
//! Short seeded run, results collected in memory:
//! ```
//! use activeflow::{ActiveFlow2D, MemorySink, Parameters};
//!
//! let params = Parameters {
//!     domain_length: std::f64::consts::PI,
//!     collocation_points: 16,
//!     time_stepping_scheme: "RK3".to_string(),
//!     courant: 0.1,
//!     tau: 1e-3,
//!     iterations: 10,
//!     k_min: 2.0,
//!     k_max: 4.0,
//!     v_0: 0.01,
//!     v_ratio: 2.0,
//!     seed: Some(42),
//! };
//! let mut flow = ActiveFlow2D::new(&params).unwrap();
//! flow.run().unwrap();
//!
//! let mut sink = MemorySink::new();
//! flow.publish(&mut sink).unwrap();
//! assert!(sink.arrays.contains_key("coordinates_x"));
//! assert_eq!(sink.monitoring.len(), 1);
//! ```
pub mod cfl;
pub mod config;
pub mod diagnostics;
pub mod error;
pub mod forcing;
pub mod fourier;
pub mod grid;
pub mod operators;
pub mod scheme;
pub mod sink;
pub mod solver;

pub use config::Parameters;
pub use error::{ActiveFlowError, Result};
pub use fourier::Fourier2;
pub use grid::Grid2;
pub use scheme::{Scheme, TimeStep};
pub use sink::{MemorySink, ResultSink};
pub use solver::{ActiveFlow2D, MonitorRecord, Snapshot};

/// Real type
pub type Real = f64;
