// Copyright Peter Bower 2025. All Rights Reserved.
// Licensed under Mozilla Public License (MPL) 2.0.

//! Standard (scalar) bulk kernels for the gamma family.
//!
//! Each kernel validates its shape parameter once, hoists every shape-only
//! term out of the loop, and then lifts the scalar function over the buffer
//! through the common dense/masked drivers. These serve every kernel without
//! a vectorised body, and all kernels when the `simd` feature is off.

use minarrow::{Bitmask, FloatArray};

use crate::errors::KernelError;
use crate::kernels::scientific::special::common::std::{
    univariate_kernel_f64_std, univariate_kernel_f64_std_to,
};
use crate::kernels::scientific::special::gamma::{gamma, gamma_ln};
use crate::kernels::scientific::special::incomplete::{
    IncompleteGamma, exp_integral_e1, unregularize,
};
use crate::kernels::scientific::special::inverse::{
    gamma_lower_regularized_inv_with, gamma_upper_regularized_inv_with,
};

/// Rejects a shape parameter outside `[0, ∞)`, or outside `(0, ∞)` when
/// `strictly_positive` is set.
#[inline(always)]
pub(crate) fn confirm_shape(label: &str, a: f64, strictly_positive: bool) -> Result<(), KernelError> {
    let ok = a.is_finite() && if strictly_positive { a > 0.0 } else { a >= 0.0 };
    if !ok {
        return Err(KernelError::InvalidArguments(format!(
            "{}: invalid shape a = {}",
            label, a
        )));
    }
    Ok(())
}

// ---------------- Γ and ln Γ -----------------------------------------

#[inline(always)]
pub fn gamma_std_to(
    x: &[f64],
    output: &mut [f64],
    null_mask: Option<&Bitmask>,
    null_count: Option<usize>,
) -> Result<(), KernelError> {
    univariate_kernel_f64_std_to("gamma", x, output, null_mask, null_count, gamma)
}

#[inline(always)]
pub fn gamma_std(
    x: &[f64],
    null_mask: Option<&Bitmask>,
    null_count: Option<usize>,
) -> Result<FloatArray<f64>, KernelError> {
    univariate_kernel_f64_std("gamma", x, null_mask, null_count, gamma)
}

#[cfg(not(feature = "simd"))]
#[inline(always)]
pub fn gamma_ln_std_to(
    x: &[f64],
    output: &mut [f64],
    null_mask: Option<&Bitmask>,
    null_count: Option<usize>,
) -> Result<(), KernelError> {
    univariate_kernel_f64_std_to("gamma_ln", x, output, null_mask, null_count, gamma_ln)
}

#[cfg(not(feature = "simd"))]
#[inline(always)]
pub fn gamma_ln_std(
    x: &[f64],
    null_mask: Option<&Bitmask>,
    null_count: Option<usize>,
) -> Result<FloatArray<f64>, KernelError> {
    univariate_kernel_f64_std("gamma_ln", x, null_mask, null_count, gamma_ln)
}

// ---------------- Regularised P and Q --------------------------------

/// Scalar implementation of the regularised lower incomplete gamma over `x`
/// (zero-allocation variant).
#[inline(always)]
pub fn gamma_lower_regularized_std_to(
    x: &[f64],
    a: f64,
    output: &mut [f64],
    null_mask: Option<&Bitmask>,
    null_count: Option<usize>,
) -> Result<(), KernelError> {
    const LABEL: &str = "gamma_lower_regularized";
    confirm_shape(LABEL, a, false)?;
    let shape = IncompleteGamma::new(a);
    univariate_kernel_f64_std_to(LABEL, x, output, null_mask, null_count, |xi| {
        shape.regularized(xi).0
    })
}

#[inline(always)]
pub fn gamma_lower_regularized_std(
    x: &[f64],
    a: f64,
    null_mask: Option<&Bitmask>,
    null_count: Option<usize>,
) -> Result<FloatArray<f64>, KernelError> {
    const LABEL: &str = "gamma_lower_regularized";
    confirm_shape(LABEL, a, false)?;
    let shape = IncompleteGamma::new(a);
    univariate_kernel_f64_std(LABEL, x, null_mask, null_count, |xi| {
        shape.regularized(xi).0
    })
}

/// Scalar implementation of the regularised upper incomplete gamma over `x`
/// (zero-allocation variant).
#[inline(always)]
pub fn gamma_upper_regularized_std_to(
    x: &[f64],
    a: f64,
    output: &mut [f64],
    null_mask: Option<&Bitmask>,
    null_count: Option<usize>,
) -> Result<(), KernelError> {
    const LABEL: &str = "gamma_upper_regularized";
    confirm_shape(LABEL, a, false)?;
    let shape = IncompleteGamma::new(a);
    univariate_kernel_f64_std_to(LABEL, x, output, null_mask, null_count, |xi| {
        shape.regularized(xi).1
    })
}

#[inline(always)]
pub fn gamma_upper_regularized_std(
    x: &[f64],
    a: f64,
    null_mask: Option<&Bitmask>,
    null_count: Option<usize>,
) -> Result<FloatArray<f64>, KernelError> {
    const LABEL: &str = "gamma_upper_regularized";
    confirm_shape(LABEL, a, false)?;
    let shape = IncompleteGamma::new(a);
    univariate_kernel_f64_std(LABEL, x, null_mask, null_count, |xi| {
        shape.regularized(xi).1
    })
}

// ---------------- Unregularised γ and Γ ------------------------------

/// Per-element body of the lower incomplete gamma with Γ(a) hoisted.
#[inline(always)]
fn lower_incomplete_body(a: f64) -> impl Fn(f64) -> f64 {
    let shape = IncompleteGamma::new(a);
    let gamma_a = gamma(a);
    move |xi| {
        if a == 0.0 {
            return if xi >= 0.0 { 0.0 } else { f64::NAN };
        }
        unregularize(shape.regularized(xi).0, a, gamma_a)
    }
}

/// Per-element body of the upper incomplete gamma with Γ(a) hoisted.
#[inline(always)]
fn upper_incomplete_body(a: f64) -> impl Fn(f64) -> f64 {
    let shape = IncompleteGamma::new(a);
    let gamma_a = gamma(a);
    move |xi| {
        if a == 0.0 {
            return exp_integral_e1(xi);
        }
        unregularize(shape.regularized(xi).1, a, gamma_a)
    }
}

#[inline(always)]
pub fn gamma_lower_incomplete_std_to(
    x: &[f64],
    a: f64,
    output: &mut [f64],
    null_mask: Option<&Bitmask>,
    null_count: Option<usize>,
) -> Result<(), KernelError> {
    const LABEL: &str = "gamma_lower_incomplete";
    confirm_shape(LABEL, a, false)?;
    univariate_kernel_f64_std_to(LABEL, x, output, null_mask, null_count, lower_incomplete_body(a))
}

#[inline(always)]
pub fn gamma_lower_incomplete_std(
    x: &[f64],
    a: f64,
    null_mask: Option<&Bitmask>,
    null_count: Option<usize>,
) -> Result<FloatArray<f64>, KernelError> {
    const LABEL: &str = "gamma_lower_incomplete";
    confirm_shape(LABEL, a, false)?;
    univariate_kernel_f64_std(LABEL, x, null_mask, null_count, lower_incomplete_body(a))
}

#[inline(always)]
pub fn gamma_upper_incomplete_std_to(
    x: &[f64],
    a: f64,
    output: &mut [f64],
    null_mask: Option<&Bitmask>,
    null_count: Option<usize>,
) -> Result<(), KernelError> {
    const LABEL: &str = "gamma_upper_incomplete";
    confirm_shape(LABEL, a, false)?;
    univariate_kernel_f64_std_to(LABEL, x, output, null_mask, null_count, upper_incomplete_body(a))
}

#[inline(always)]
pub fn gamma_upper_incomplete_std(
    x: &[f64],
    a: f64,
    null_mask: Option<&Bitmask>,
    null_count: Option<usize>,
) -> Result<FloatArray<f64>, KernelError> {
    const LABEL: &str = "gamma_upper_incomplete";
    confirm_shape(LABEL, a, false)?;
    univariate_kernel_f64_std(LABEL, x, null_mask, null_count, upper_incomplete_body(a))
}

// ---------------- Inverses -------------------------------------------

#[inline(always)]
pub fn gamma_lower_regularized_inv_std_to(
    y: &[f64],
    a: f64,
    output: &mut [f64],
    null_mask: Option<&Bitmask>,
    null_count: Option<usize>,
) -> Result<(), KernelError> {
    const LABEL: &str = "gamma_lower_regularized_inv";
    confirm_shape(LABEL, a, true)?;
    let shape = IncompleteGamma::new(a);
    univariate_kernel_f64_std_to(LABEL, y, output, null_mask, null_count, |yi| {
        gamma_lower_regularized_inv_with(&shape, yi)
    })
}

#[inline(always)]
pub fn gamma_lower_regularized_inv_std(
    y: &[f64],
    a: f64,
    null_mask: Option<&Bitmask>,
    null_count: Option<usize>,
) -> Result<FloatArray<f64>, KernelError> {
    const LABEL: &str = "gamma_lower_regularized_inv";
    confirm_shape(LABEL, a, true)?;
    let shape = IncompleteGamma::new(a);
    univariate_kernel_f64_std(LABEL, y, null_mask, null_count, |yi| {
        gamma_lower_regularized_inv_with(&shape, yi)
    })
}

#[inline(always)]
pub fn gamma_upper_regularized_inv_std_to(
    q: &[f64],
    a: f64,
    output: &mut [f64],
    null_mask: Option<&Bitmask>,
    null_count: Option<usize>,
) -> Result<(), KernelError> {
    const LABEL: &str = "gamma_upper_regularized_inv";
    confirm_shape(LABEL, a, true)?;
    let shape = IncompleteGamma::new(a);
    univariate_kernel_f64_std_to(LABEL, q, output, null_mask, null_count, |qi| {
        gamma_upper_regularized_inv_with(&shape, qi)
    })
}

#[inline(always)]
pub fn gamma_upper_regularized_inv_std(
    q: &[f64],
    a: f64,
    null_mask: Option<&Bitmask>,
    null_count: Option<usize>,
) -> Result<FloatArray<f64>, KernelError> {
    const LABEL: &str = "gamma_upper_regularized_inv";
    confirm_shape(LABEL, a, true)?;
    let shape = IncompleteGamma::new(a);
    univariate_kernel_f64_std(LABEL, q, null_mask, null_count, |qi| {
        gamma_upper_regularized_inv_with(&shape, qi)
    })
}
