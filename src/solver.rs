//! # Simulation driver
//!
//! Owns the marching loop of the active turbulence run: advances the
//! spectral vorticity with the selected scheme, adapts the step size
//! past warm up, and accumulates monitoring records and snapshots.
//!
//! # Example
//! Short seeded run with the IMEX integrator:
//! ```
//! use activeflow::{ActiveFlow2D, Parameters};
//!
//! let params = Parameters {
//!     domain_length: std::f64::consts::PI,
//!     collocation_points: 16,
//!     time_stepping_scheme: "IMEX Runge-Kutta".to_string(),
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
//! assert_eq!(flow.monitor.len(), 1);
//! assert_eq!(flow.snapshots.len(), 1);
//! ```
use crate::cfl::CflController;
use crate::config::Parameters;
use crate::diagnostics::{max_velocity, ShellEnergy};
use crate::error::{ActiveFlowError, Result};
use crate::forcing::PvcModel;
use crate::fourier::Fourier2;
use crate::grid::Grid2;
use crate::operators::velocity;
use crate::scheme::{Scheme, TimeStep};
use crate::sink::ResultSink;
use log::info;
use ndarray::Array2;
use ndarray_rand::rand::rngs::StdRng;
use ndarray_rand::rand::SeedableRng;
use ndarray_rand::rand_distr::StandardNormal;
use ndarray_rand::RandomExt;
use num_complex::Complex64;

/// Append a monitoring record every this many iterations
const MONITOR_INTERVALL: usize = 100;
/// Append a full field snapshot every this many iterations
const SNAPSHOT_INTERVALL: usize = 1000;

/// Scalar diagnostics appended every monitoring intervall.
#[derive(Debug, Clone, Copy)]
pub struct MonitorRecord {
    /// Iteration index
    pub iteration: usize,
    /// Accumulated simulation time
    pub time: f64,
    /// Step size in use at this iteration
    pub tau: f64,
    /// Largest velocity magnitude on the grid
    pub max_velocity: f64,
    /// Shell energy at the first wavenumber shell
    pub energy_k1: f64,
}

/// Spectral vorticity copy taken every snapshot intervall.
///
/// Never mutated after creation; the iteration is its identity.
#[derive(Debug, Clone)]
pub struct Snapshot {
    /// Iteration the copy was taken at
    pub iteration: usize,
    /// Spectral vorticity field
    pub w_hat: Array2<Complex64>,
}

/// Time marching driver.
///
/// Struct must be mutable; every [`ActiveFlow2D::step`] advances the
/// solution by one iteration. The grid, the forcing and the transform
/// plans are built once and never change afterwards.
pub struct ActiveFlow2D {
    /// Spectral vorticity, the evolving state
    pub w_hat: Array2<Complex64>,
    /// Step size, adapted by the CFL controller past warm up
    pub tau: f64,
    /// Accumulated simulation time
    pub time: f64,
    /// Monitoring table
    pub monitor: Vec<MonitorRecord>,
    /// Field snapshots
    pub snapshots: Vec<Snapshot>,
    grid: Grid2,
    nu_eff: Array2<f64>,
    scheme: Scheme,
    fourier: Fourier2,
    energy: ShellEnergy,
    cfl: CflController,
    iterations: usize,
    iteration: usize,
}

impl ActiveFlow2D {
    /// Build all immutable operators and the initial condition.
    ///
    /// The initial vorticity is a random normal field transformed to
    /// spectral space, seeded from the parameters for reproducible
    /// runs, entropy seeded otherwise.
    pub fn new(params: &Parameters) -> Result<ActiveFlow2D> {
        params.validate()?;
        let scheme: Scheme = params.time_stepping_scheme.parse()?;
        let grid = Grid2::new(params.domain_length, params.collocation_points)?;
        let pvc = PvcModel::new(params.k_min, params.k_max, params.v_0, params.v_ratio)?;
        let nu_eff = pvc.evaluate(&grid.k_norm);
        let energy = ShellEnergy::new(&grid);
        let cfl = CflController::new(params.courant, grid.dx)?;
        let mut fourier = Fourier2::new(grid.n);
        let w_hat = initial_vorticity(grid.n, params.seed, &mut fourier);
        Ok(ActiveFlow2D {
            w_hat,
            tau: params.tau,
            time: 0.0,
            monitor: Vec::new(),
            snapshots: Vec::new(),
            grid,
            nu_eff,
            scheme,
            fourier,
            energy,
            cfl,
            iterations: params.iterations,
            iteration: 0,
        })
    }

    /// Advance the state by one iteration.
    ///
    /// Steps the vorticity, recomputes the velocity, adapts the step
    /// size past warm up and appends monitoring/snapshot records on
    /// their intervalls.
    pub fn step(&mut self) -> Result<()> {
        self.w_hat =
            self.scheme
                .step(&self.w_hat, self.tau, &self.nu_eff, &self.grid, &mut self.fourier);
        if !self
            .w_hat
            .iter()
            .all(|w| w.re.is_finite() && w.im.is_finite())
        {
            return Err(ActiveFlowError::Diverged {
                iteration: self.iteration,
            });
        }

        let vel = velocity(&self.w_hat, &self.grid, &mut self.fourier);
        let max_u = max_velocity(&vel.u, &vel.v);
        if self.cfl.active(self.iteration) {
            self.tau = self.cfl.tau(max_u, self.tau);
        }

        if self.iteration % MONITOR_INTERVALL == 0 {
            let energy_k1 = self.energy.evaluate(&vel.u_hat, &vel.v_hat);
            self.monitor.push(MonitorRecord {
                iteration: self.iteration,
                time: self.time,
                tau: self.tau,
                max_velocity: max_u,
                energy_k1,
            });
            info!(
                "iteration = {:07}\ttau = {:.4}\tE(k=1) = {:.12e}\tU_max = {:.12e}",
                self.iteration, self.tau, energy_k1, max_u
            );
        }
        if self.iteration % SNAPSHOT_INTERVALL == 0 {
            self.snapshots.push(Snapshot {
                iteration: self.iteration,
                w_hat: self.w_hat.clone(),
            });
        }

        self.time += self.tau;
        self.iteration += 1;
        Ok(())
    }

    /// March until the configured iteration count is reached.
    ///
    /// The loop is inclusive, so monitoring and snapshot markers land
    /// on round iteration numbers.
    pub fn run(&mut self) -> Result<()> {
        while self.iteration <= self.iterations {
            self.step()?;
        }
        Ok(())
    }

    /// Hand the operator grids, all snapshots and the monitoring table
    /// to a caller provided sink.
    pub fn publish<S: ResultSink>(&self, sink: &mut S) -> Result<()> {
        sink.put_array("coordinates_x", &self.grid.x)?;
        sink.put_array("coordinates_y", &self.grid.y)?;
        sink.put_array("wavenumbers_x", &self.grid.kx)?;
        sink.put_array("wavenumbers_y", &self.grid.ky)?;
        for snapshot in &self.snapshots {
            let name = format!("snapshot_{:07}", snapshot.iteration);
            sink.put_spectral(&name, &snapshot.w_hat)?;
        }
        sink.put_monitoring(&self.monitor)
    }

    /// Read-only view of the discretization
    pub fn grid(&self) -> &Grid2 {
        &self.grid
    }
}

/// Random normal vorticity field transformed to spectral space
fn initial_vorticity(n: usize, seed: Option<u64>, fourier: &mut Fourier2) -> Array2<Complex64> {
    let mut rng = match seed {
        Some(s) => StdRng::seed_from_u64(s),
        None => StdRng::from_entropy(),
    };
    let w: Array2<f64> = Array2::random_using((n, n), StandardNormal, &mut rng);
    fourier.forward_re(&w)
}
