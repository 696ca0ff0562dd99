//! # Time stepping schemes
//!
//! Three interchangeable integrators advancing the spectral vorticity
//! by one step. The nonlinear advection term is always explicit; the
//! schemes differ in how they treat the stiff linear term, whose
//! viscosity is negative inside the injection band. Every scheme
//! re-applies the dealiasing mask as its final operation, so no state
//! ever carries energy above the resolved band.
use crate::error::ActiveFlowError;
use crate::fourier::Fourier2;
use crate::grid::Grid2;
use crate::operators::{advection, diffusion};
use enum_dispatch::enum_dispatch;
use ndarray::{Array2, Zip};
use num_complex::Complex64;
use std::str::FromStr;

/// Advance the spectral vorticity field by one time step.
#[enum_dispatch]
pub trait TimeStep {
    /// Returns the updated field; the input is left untouched.
    fn step(
        &self,
        w_hat: &Array2<Complex64>,
        tau: f64,
        nu_eff: &Array2<f64>,
        grid: &Grid2,
        fourier: &mut Fourier2,
    ) -> Array2<Complex64>;
}

/// Enum of all implemented time stepping schemes.
///
/// Dispatch is closed; adding a scheme means adding a variant here and
/// an arm to the name lookup below.
#[enum_dispatch(TimeStep)]
#[derive(Debug, Clone, Copy)]
pub enum Scheme {
    /// Explicit nonlinear, implicit linear term. First order, cheapest,
    /// least stable for strongly negative viscosity.
    SemiImplicitEuler(SemiImplicitEuler),
    /// Three stage strong-stability-preserving Runge-Kutta, both terms
    /// explicit. Third order; the step size is constrained by the
    /// linear term as well.
    Rk3(Rk3),
    /// Four substage implicit-explicit Runge-Kutta. The implicit
    /// treatment absorbs the stiff linear term, the only scheme that
    /// stays stable with large negative viscosity at a reasonable step.
    ImexRk3(ImexRk3),
}

impl FromStr for Scheme {
    type Err = ActiveFlowError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        match name {
            "Euler Semi-Implicit" => Ok(SemiImplicitEuler.into()),
            "RK3" => Ok(Rk3.into()),
            "IMEX Runge-Kutta" => Ok(ImexRk3.into()),
            _ => Err(ActiveFlowError::UnknownScheme(name.to_string())),
        }
    }
}

/// Implicit division factor 1 / (1 + tau a nu_eff k^2)
fn implicit_factor(
    tau: f64,
    a: f64,
    nu_eff: &Array2<f64>,
    k_square: &Array2<f64>,
) -> Array2<f64> {
    Zip::from(nu_eff)
        .and(k_square)
        .map_collect(|&nu, &k2| 1.0 / (1.0 + tau * a * nu * k2))
}

/// Combined explicit right hand side -C(w) - A(w)
fn explicit_rhs(
    w_hat: &Array2<Complex64>,
    nu_eff: &Array2<f64>,
    grid: &Grid2,
    fourier: &mut Fourier2,
) -> Array2<Complex64> {
    let c = advection(w_hat, grid, fourier);
    let a = diffusion(w_hat, nu_eff, grid);
    -(c + a)
}

/// w <- (w - tau C(w)) / (1 + tau nu_eff k^2)
#[derive(Debug, Clone, Copy)]
pub struct SemiImplicitEuler;

impl TimeStep for SemiImplicitEuler {
    fn step(
        &self,
        w_hat: &Array2<Complex64>,
        tau: f64,
        nu_eff: &Array2<f64>,
        grid: &Grid2,
        fourier: &mut Fourier2,
    ) -> Array2<Complex64> {
        let c = advection(w_hat, grid, fourier);
        let mu = implicit_factor(tau, 1.0, nu_eff, &grid.k_square);
        let mut w = (w_hat - &(c * tau)) * &mu;
        grid.apply_dealias(&mut w);
        w
    }
}

/// Three stage SSP Runge-Kutta on the fully explicit right hand side
#[derive(Debug, Clone, Copy)]
pub struct Rk3;

impl TimeStep for Rk3 {
    fn step(
        &self,
        w_hat: &Array2<Complex64>,
        tau: f64,
        nu_eff: &Array2<f64>,
        grid: &Grid2,
        fourier: &mut Fourier2,
    ) -> Array2<Complex64> {
        let w1 = w_hat + &(explicit_rhs(w_hat, nu_eff, grid, fourier) * tau);
        let w2 = w_hat * 0.75
            + &(&w1 * 0.25)
            + &(explicit_rhs(&w1, nu_eff, grid, fourier) * (0.25 * tau));
        let mut w = w_hat * (1. / 3.)
            + &(&w2 * (2. / 3.))
            + &(explicit_rhs(&w2, nu_eff, grid, fourier) * (2. / 3. * tau));
        grid.apply_dealias(&mut w);
        w
    }
}

/// Four substage IMEX Runge-Kutta, linear term implicit per substage
#[derive(Debug, Clone, Copy)]
pub struct ImexRk3;

impl TimeStep for ImexRk3 {
    #[allow(clippy::many_single_char_names)]
    fn step(
        &self,
        w_hat: &Array2<Complex64>,
        tau: f64,
        nu_eff: &Array2<f64>,
        grid: &Grid2,
        fourier: &mut Fourier2,
    ) -> Array2<Complex64> {
        let mu = implicit_factor(tau, 0.5, nu_eff, &grid.k_square);

        let c0 = advection(w_hat, grid, fourier);
        let w1 = (w_hat - &(&c0 * (0.5 * tau))) * &mu;

        let c1 = advection(&w1, grid, fourier);
        let a1 = diffusion(&w1, nu_eff, grid);
        let rhs = &c0 * (-11. / 18.) + &(&c1 * (-1. / 18.)) + &(&a1 * (-1. / 6.));
        let w2 = (w_hat + &(rhs * tau)) * &mu;

        let c2 = advection(&w2, grid, fourier);
        let a2 = diffusion(&w2, nu_eff, grid);
        let rhs = &c0 * (-5. / 6.)
            + &(&c1 * (5. / 6.))
            + &(&c2 * (-1. / 2.))
            + &(&a1 * (1. / 2.))
            + &(&a2 * (-1. / 2.));
        let w3 = (w_hat + &(rhs * tau)) * &mu;

        let c3 = advection(&w3, grid, fourier);
        let a3 = diffusion(&w3, nu_eff, grid);
        let rhs = &c0 * (-1. / 4.)
            + &(&c1 * (-7. / 4.))
            + &(&c2 * (-3. / 4.))
            + &(&c3 * (7. / 4.))
            + &(&a1 * (-3. / 2.))
            + &(&a2 * (3. / 2.))
            + &(&a3 * (-1. / 2.));
        let mut w = (w_hat + &(rhs * tau)) * &mu;
        grid.apply_dealias(&mut w);
        w
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray_rand::rand::rngs::StdRng;
    use ndarray_rand::rand::SeedableRng;
    use ndarray_rand::rand_distr::StandardNormal;
    use ndarray_rand::RandomExt;
    use std::f64::consts::PI;

    const SCHEME_NAMES: [&str; 3] = ["Euler Semi-Implicit", "RK3", "IMEX Runge-Kutta"];

    /// Uniform viscosity, the band pushed out of the resolved range
    fn uniform_nu(grid: &Grid2, nu: f64) -> Array2<f64> {
        Array2::from_elem((grid.n, grid.n), nu)
    }

    fn single_mode_field(grid: &Grid2, fourier: &mut Fourier2) -> Array2<Complex64> {
        let w = grid.x.mapv(|x| (2. * x).sin());
        fourier.forward_re(&w)
    }

    fn random_field(n: usize, seed: u64, fourier: &mut Fourier2) -> Array2<Complex64> {
        let mut rng = StdRng::seed_from_u64(seed);
        let w: Array2<f64> = Array2::random_using((n, n), StandardNormal, &mut rng);
        fourier.forward_re(&w)
    }

    fn max_diff(a: &Array2<Complex64>, b: &Array2<Complex64>) -> f64 {
        a.iter()
            .zip(b.iter())
            .map(|(x, y)| (x - y).norm())
            .fold(0., f64::max)
    }

    #[test]
    fn test_unknown_scheme_name() {
        assert!("Leapfrog".parse::<Scheme>().is_err());
        for name in SCHEME_NAMES.iter() {
            assert!(name.parse::<Scheme>().is_ok());
        }
    }

    #[test]
    fn test_zero_field_stays_zero() {
        let n = 16;
        let grid = Grid2::new(2. * PI, n).unwrap();
        let mut fourier = Fourier2::new(n);
        let nu_eff = uniform_nu(&grid, 1.0);
        let zero = Array2::zeros((n, n));
        for name in SCHEME_NAMES.iter() {
            let scheme: Scheme = name.parse().unwrap();
            let w = scheme.step(&zero, 1e-2, &nu_eff, &grid, &mut fourier);
            for v in w.iter() {
                assert_eq!(v.norm(), 0., "{} produced energy from nothing", name);
            }
        }
    }

    #[test]
    fn test_euler_single_mode_decay() {
        // One mode along x has no self advection, the step is purely
        // the implicit division
        let n = 16;
        let tau = 1e-2;
        let grid = Grid2::new(2. * PI, n).unwrap();
        let mut fourier = Fourier2::new(n);
        let nu_eff = uniform_nu(&grid, 0.5);
        let w_hat = single_mode_field(&grid, &mut fourier);

        let scheme: Scheme = "Euler Semi-Implicit".parse().unwrap();
        let stepped = scheme.step(&w_hat, tau, &nu_eff, &grid, &mut fourier);

        let mut expected = Zip::from(&w_hat)
            .and(&grid.k_square)
            .map_collect(|&w, &k2| w * (1.0 / (1.0 + tau * 0.5 * k2)));
        grid.apply_dealias(&mut expected);
        assert!(max_diff(&stepped, &expected) < 1e-8);
    }

    #[test]
    fn test_rk3_single_mode_matches_expansion() {
        // For a linear problem SSP-RK3 reduces to the third order
        // truncation of exp(-lambda tau)
        let n = 16;
        let tau = 1e-2;
        let grid = Grid2::new(2. * PI, n).unwrap();
        let mut fourier = Fourier2::new(n);
        let nu_eff = uniform_nu(&grid, 0.5);
        let w_hat = single_mode_field(&grid, &mut fourier);

        let scheme: Scheme = "RK3".parse().unwrap();
        let stepped = scheme.step(&w_hat, tau, &nu_eff, &grid, &mut fourier);

        let mut expected = Zip::from(&w_hat)
            .and(&grid.k_square)
            .map_collect(|&w, &k2| {
                let x = tau * 0.5 * k2;
                w * (1.0 - x + x * x / 2.0 - x * x * x / 6.0)
            });
        grid.apply_dealias(&mut expected);
        assert!(max_diff(&stepped, &expected) < 1e-8);
    }

    #[test]
    fn test_imex_single_mode_response() {
        // Substage recursion for the pure linear problem, evaluated in
        // scalar arithmetic
        let n = 16;
        let tau = 1e-2;
        let grid = Grid2::new(2. * PI, n).unwrap();
        let mut fourier = Fourier2::new(n);
        let nu_eff = uniform_nu(&grid, 0.5);
        let w_hat = single_mode_field(&grid, &mut fourier);

        let scheme: Scheme = "IMEX Runge-Kutta".parse().unwrap();
        let stepped = scheme.step(&w_hat, tau, &nu_eff, &grid, &mut fourier);

        let mut expected = Zip::from(&w_hat)
            .and(&grid.k_square)
            .map_collect(|&w, &k2| {
                let z = tau * 0.5 * k2;
                let mu = 1.0 / (1.0 + z / 2.0);
                let r1 = mu;
                let r2 = (1.0 - z * r1 / 6.0) * mu;
                let r3 = (1.0 + z / 2.0 * (r1 - r2)) * mu;
                let r4 = (1.0 + z * (-1.5 * r1 + 1.5 * r2 - 0.5 * r3)) * mu;
                w * r4
            });
        grid.apply_dealias(&mut expected);
        assert!(max_diff(&stepped, &expected) < 1e-8);
    }

    #[test]
    fn test_step_is_masked_and_real() {
        let n = 16;
        let grid = Grid2::new(PI, n).unwrap();
        let mut fourier = Fourier2::new(n);
        let nu_eff = uniform_nu(&grid, 1.0);
        let w_hat = random_field(n, 7, &mut fourier);
        for name in SCHEME_NAMES.iter() {
            let scheme: Scheme = name.parse().unwrap();
            let stepped = scheme.step(&w_hat, 1e-4, &nu_eff, &grid, &mut fourier);
            // nothing above the resolved band
            for ((i, j), v) in stepped.indexed_iter() {
                if !grid.dealias[[i, j]] {
                    assert_eq!(v.norm(), 0., "{} left unresolved energy", name);
                }
            }
            // inverse transform is real
            let back = fourier.backward(&stepped);
            for v in back.iter() {
                assert!(v.im.abs() < 1e-10, "{} broke realness: {}", name, v.im);
            }
        }
    }

    #[test]
    fn test_schemes_generally_differ() {
        let n = 8;
        let grid = Grid2::new(PI, n).unwrap();
        let mut fourier = Fourier2::new(n);
        let nu_eff = uniform_nu(&grid, 1.0);
        let w_hat = random_field(n, 42, &mut fourier);
        let tau = 1e-2;
        let results: Vec<Array2<Complex64>> = SCHEME_NAMES
            .iter()
            .map(|name| {
                let scheme: Scheme = name.parse().unwrap();
                scheme.step(&w_hat, tau, &nu_eff, &grid, &mut fourier)
            })
            .collect();
        assert!(max_diff(&results[0], &results[1]) > 1e-12);
        assert!(max_diff(&results[0], &results[2]) > 1e-12);
        assert!(max_diff(&results[1], &results[2]) > 1e-12);
    }
}
