// Copyright Peter Bower 2025. All Rights Reserved.
// Licensed under Mozilla Public License (MPL) 2.0.

// These parameters should rarely need adjustment.

//! # **Configuration Constants** - *Convergence and Dispatch Parameters*
//!
//! Compile-time constants steering the iterative gamma evaluators.
//! Coefficient tables for the approximations themselves live next to the
//! code that uses them in `kernels::scientific::special::constants`.

/// Relative tolerance at which the incomplete gamma series and continued
/// fraction stop iterating.
///
/// Sits a few ulps above `f64::EPSILON` so that the last term added is
/// below the rounding noise of the running sum.
pub const CONVERGENCE_EPSILON: f64 = 1.0e-15;

/// Upper bound on power-series terms for the lower regularised gamma.
///
/// The series needs on the order of `sqrt(a)` terms near `x = a + 1`, so it
/// would exhaust this cap from shapes around `1e9`. Those transition-region
/// arguments are routed to the uniform asymptotic expansion instead
/// (see [`ASYMPTOTIC_MIN_SHAPE`]), leaving the series only regions where it
/// converges geometrically. On exhaustion the partial sum is returned.
pub const MAX_SERIES_ITERATIONS: usize = 100_000;

/// Upper bound on continued fraction convergents for the upper regularised gamma.
///
/// Bounded by the same argument as [`MAX_SERIES_ITERATIONS`].
/// On exhaustion the last convergent is returned.
pub const MAX_FRACTION_ITERATIONS: usize = 100_000;

/// Upper bound on Newton/Halley refinements in the regularised gamma inverses.
///
/// Typical calls settle in under ten steps; the bracketed bisection fallback
/// needs a few dozen more in the worst underflow regimes.
pub const MAX_INVERSE_ITERATIONS: usize = 100;

/// Relative step size, in multiples of `f64::EPSILON`, below which the
/// inverse solver considers an abscissa converged.
pub const INVERSE_STEP_TOLERANCE: f64 = 4.0;

/// Log-residual, in multiples of `f64::EPSILON`, below which the inverse solver
/// stops. This is the evaluation noise floor of the forward tail.
pub const INVERSE_RESIDUAL_TOLERANCE: f64 = 64.0;

/// Shape at and above which the log prefix `ln(x^a e^-x / Γ(a))` is
/// evaluated in Stirling-split form rather than via `ln Γ(a)` directly.
///
/// Below this the direct form loses nothing; above it the difference
/// `a ln x - x - ln Γ(a)` cancels catastrophically near `x = a`.
pub const STIRLING_SPLIT_MIN_SHAPE: f64 = 10.0;

/// Shape above which the regularised incomplete gamma is evaluated with
/// Temme's uniform asymptotic expansion when `x` is close to `a`.
pub const ASYMPTOTIC_MIN_SHAPE: f64 = 200.0;

/// Largest relative distance `|x - a| / a` handled by the asymptotic
/// expansion. Outside it the series and continued fraction converge
/// in a few hundred steps, or the result saturates.
pub const ASYMPTOTIC_MAX_DISTANCE: f64 = 0.3;

/// Number of `1/a` orders summed in the asymptotic expansion.
pub const TEMME_ORDERS: usize = 8;

/// Number of `η` powers kept per order in the asymptotic expansion.
pub const TEMME_TERMS: usize = 25;
