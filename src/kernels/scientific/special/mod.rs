// Copyright Peter Bower 2025. All Rights Reserved.
// Licensed under Mozilla Public License (MPL) 2.0.

//! # **Gamma Special Functions** - *Γ, ln Γ, Incomplete Gamma and its Inverse*
//!
//! Scalar functions and null-aware bulk kernels for the gamma family:
//!
//! | Function | Definition |
//! |----------|------------|
//! | [`gamma`] | Γ(x) = ∫₀^∞ t^(x-1) e^(-t) dt, extended to negative non-integers |
//! | [`gamma_ln`] | ln Γ(x) for x > 0 |
//! | [`gamma_lower_incomplete`] | γ(a, x) = ∫₀ˣ t^(a-1) e^(-t) dt |
//! | [`gamma_upper_incomplete`] | Γ(a, x) = ∫ₓ^∞ t^(a-1) e^(-t) dt |
//! | [`gamma_lower_regularized`] | P(a, x) = γ(a, x) / Γ(a) |
//! | [`gamma_upper_regularized`] | Q(a, x) = Γ(a, x) / Γ(a) = 1 - P(a, x) |
//! | [`gamma_lower_regularized_inv`] | x such that P(a, x) = y |
//! | [`gamma_upper_regularized_inv`] | x such that Q(a, x) = q |
//!
//! ## Error semantics
//! Scalar functions never fail: out-of-domain input and poles return `NaN`,
//! overflow returns `+∞`. Bulk kernels return a `KernelError` only for an
//! invalid shape parameter or inconsistent buffers; element values follow the
//! scalar functions exactly.
//!
//! ## Bulk kernels
//! Each `*_array` kernel takes a slice plus an optional Arrow validity mask and
//! returns a `FloatArray<f64>` carrying the same mask. The `*_array_to`
//! variants write into a caller-provided buffer. Null lanes are written as
//! `NaN`.

mod common;
mod constants;
mod erf;
mod gamma;
mod incomplete;
mod inverse;
#[cfg(feature = "simd")]
mod simd;
mod std;

use minarrow::{Bitmask, FloatArray};

use crate::errors::KernelError;

pub use gamma::{factorial, factorial_ln, gamma, gamma_ln};
pub use incomplete::{
    gamma_lower_incomplete, gamma_lower_regularized, gamma_lower_upper_regularized,
    gamma_upper_incomplete, gamma_upper_regularized,
};
pub use inverse::{gamma_lower_regularized_inv, gamma_upper_regularized_inv};

/// Evaluates Γ(x) for each element of `x`.
///
/// Poles and `-∞` give `NaN`; arguments above ≈ 171.62 give `+∞`.
///
/// # Example
/// ```rust,ignore
/// use gamma_kernels::kernels::scientific::special::gamma_array;
/// use minarrow::vec64;
///
/// let x = vec64![1.0, 4.0, 0.5];
/// let arr = gamma_array(&x, None, None).unwrap();
/// // [1.0, 6.0, √π]
/// ```
#[inline(always)]
pub fn gamma_array(
    x: &[f64],
    null_mask: Option<&Bitmask>,
    null_count: Option<usize>,
) -> Result<FloatArray<f64>, KernelError> {
    std::gamma_std(x, null_mask, null_count)
}

/// Zero-allocation variant of [`gamma_array`].
#[inline(always)]
pub fn gamma_array_to(
    x: &[f64],
    output: &mut [f64],
    null_mask: Option<&Bitmask>,
    null_count: Option<usize>,
) -> Result<(), KernelError> {
    std::gamma_std_to(x, output, null_mask, null_count)
}

/// Evaluates ln Γ(x) for each element of `x`.
///
/// Vectorised when the `simd` feature is enabled. `x ≤ 0` gives `NaN`.
#[inline(always)]
pub fn gamma_ln_array(
    x: &[f64],
    null_mask: Option<&Bitmask>,
    null_count: Option<usize>,
) -> Result<FloatArray<f64>, KernelError> {
    #[cfg(feature = "simd")]
    {
        simd::gamma_ln_simd(x, null_mask, null_count)
    }

    #[cfg(not(feature = "simd"))]
    {
        std::gamma_ln_std(x, null_mask, null_count)
    }
}

/// Zero-allocation variant of [`gamma_ln_array`].
#[inline(always)]
pub fn gamma_ln_array_to(
    x: &[f64],
    output: &mut [f64],
    null_mask: Option<&Bitmask>,
    null_count: Option<usize>,
) -> Result<(), KernelError> {
    #[cfg(feature = "simd")]
    {
        simd::gamma_ln_simd_to(x, output, null_mask, null_count)
    }

    #[cfg(not(feature = "simd"))]
    {
        std::gamma_ln_std_to(x, output, null_mask, null_count)
    }
}

/// Evaluates P(a, x) for each element of `x` at a fixed shape `a`.
///
/// # Errors
/// `KernelError::InvalidArguments` when `a` is negative, NaN or infinite.
///
/// # Example
/// ```rust,ignore
/// use gamma_kernels::kernels::scientific::special::gamma_lower_regularized_array;
/// use minarrow::vec64;
///
/// let x = vec64![0.0, 1.0, 10.0];
/// let arr = gamma_lower_regularized_array(&x, 1.0, None, None).unwrap();
/// // P(1, x) = 1 - e^(-x)
/// ```
#[inline(always)]
pub fn gamma_lower_regularized_array(
    x: &[f64],
    a: f64,
    null_mask: Option<&Bitmask>,
    null_count: Option<usize>,
) -> Result<FloatArray<f64>, KernelError> {
    std::gamma_lower_regularized_std(x, a, null_mask, null_count)
}

/// Zero-allocation variant of [`gamma_lower_regularized_array`].
#[inline(always)]
pub fn gamma_lower_regularized_array_to(
    x: &[f64],
    a: f64,
    output: &mut [f64],
    null_mask: Option<&Bitmask>,
    null_count: Option<usize>,
) -> Result<(), KernelError> {
    std::gamma_lower_regularized_std_to(x, a, output, null_mask, null_count)
}

/// Evaluates Q(a, x) for each element of `x` at a fixed shape `a`.
///
/// # Errors
/// `KernelError::InvalidArguments` when `a` is negative, NaN or infinite.
#[inline(always)]
pub fn gamma_upper_regularized_array(
    x: &[f64],
    a: f64,
    null_mask: Option<&Bitmask>,
    null_count: Option<usize>,
) -> Result<FloatArray<f64>, KernelError> {
    std::gamma_upper_regularized_std(x, a, null_mask, null_count)
}

/// Zero-allocation variant of [`gamma_upper_regularized_array`].
#[inline(always)]
pub fn gamma_upper_regularized_array_to(
    x: &[f64],
    a: f64,
    output: &mut [f64],
    null_mask: Option<&Bitmask>,
    null_count: Option<usize>,
) -> Result<(), KernelError> {
    std::gamma_upper_regularized_std_to(x, a, output, null_mask, null_count)
}

/// Evaluates γ(a, x) for each element of `x` at a fixed shape `a`.
///
/// Γ(a) is computed once per call.
///
/// # Errors
/// `KernelError::InvalidArguments` when `a` is negative, NaN or infinite.
#[inline(always)]
pub fn gamma_lower_incomplete_array(
    x: &[f64],
    a: f64,
    null_mask: Option<&Bitmask>,
    null_count: Option<usize>,
) -> Result<FloatArray<f64>, KernelError> {
    std::gamma_lower_incomplete_std(x, a, null_mask, null_count)
}

/// Zero-allocation variant of [`gamma_lower_incomplete_array`].
#[inline(always)]
pub fn gamma_lower_incomplete_array_to(
    x: &[f64],
    a: f64,
    output: &mut [f64],
    null_mask: Option<&Bitmask>,
    null_count: Option<usize>,
) -> Result<(), KernelError> {
    std::gamma_lower_incomplete_std_to(x, a, output, null_mask, null_count)
}

/// Evaluates Γ(a, x) for each element of `x` at a fixed shape `a`.
///
/// At `a = 0` every element is the exponential integral E₁(x).
///
/// # Errors
/// `KernelError::InvalidArguments` when `a` is negative, NaN or infinite.
#[inline(always)]
pub fn gamma_upper_incomplete_array(
    x: &[f64],
    a: f64,
    null_mask: Option<&Bitmask>,
    null_count: Option<usize>,
) -> Result<FloatArray<f64>, KernelError> {
    std::gamma_upper_incomplete_std(x, a, null_mask, null_count)
}

/// Zero-allocation variant of [`gamma_upper_incomplete_array`].
#[inline(always)]
pub fn gamma_upper_incomplete_array_to(
    x: &[f64],
    a: f64,
    output: &mut [f64],
    null_mask: Option<&Bitmask>,
    null_count: Option<usize>,
) -> Result<(), KernelError> {
    std::gamma_upper_incomplete_std_to(x, a, output, null_mask, null_count)
}

/// Solves P(a, x) = y for each probability in `y` at a fixed shape `a`.
///
/// `y = 0` gives 0, `y = 1` gives `+∞`, `y` outside [0, 1] gives `NaN`.
///
/// # Errors
/// `KernelError::InvalidArguments` when `a` is not strictly positive and finite.
///
/// # Example
/// ```rust,ignore
/// use gamma_kernels::kernels::scientific::special::gamma_lower_regularized_inv_array;
/// use minarrow::vec64;
///
/// let y = vec64![0.1, 0.5, 0.9];
/// let arr = gamma_lower_regularized_inv_array(&y, 3.0, None, None).unwrap();
/// ```
#[inline(always)]
pub fn gamma_lower_regularized_inv_array(
    y: &[f64],
    a: f64,
    null_mask: Option<&Bitmask>,
    null_count: Option<usize>,
) -> Result<FloatArray<f64>, KernelError> {
    std::gamma_lower_regularized_inv_std(y, a, null_mask, null_count)
}

/// Zero-allocation variant of [`gamma_lower_regularized_inv_array`].
#[inline(always)]
pub fn gamma_lower_regularized_inv_array_to(
    y: &[f64],
    a: f64,
    output: &mut [f64],
    null_mask: Option<&Bitmask>,
    null_count: Option<usize>,
) -> Result<(), KernelError> {
    std::gamma_lower_regularized_inv_std_to(y, a, output, null_mask, null_count)
}

/// Solves Q(a, x) = q for each probability in `q` at a fixed shape `a`.
///
/// Accurate far into the upper tail, where `1 - q` rounds to 1.
///
/// # Errors
/// `KernelError::InvalidArguments` when `a` is not strictly positive and finite.
#[inline(always)]
pub fn gamma_upper_regularized_inv_array(
    q: &[f64],
    a: f64,
    null_mask: Option<&Bitmask>,
    null_count: Option<usize>,
) -> Result<FloatArray<f64>, KernelError> {
    std::gamma_upper_regularized_inv_std(q, a, null_mask, null_count)
}

/// Zero-allocation variant of [`gamma_upper_regularized_inv_array`].
#[inline(always)]
pub fn gamma_upper_regularized_inv_array_to(
    q: &[f64],
    a: f64,
    output: &mut [f64],
    null_mask: Option<&Bitmask>,
    null_count: Option<usize>,
) -> Result<(), KernelError> {
    std::gamma_upper_regularized_inv_std_to(q, a, output, null_mask, null_count)
}
