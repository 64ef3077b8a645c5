// Copyright Peter Bower 2025. All Rights Reserved.
// Licensed under Mozilla Public License (MPL) 2.0.

use minarrow::{Bitmask, FloatArray, Vec64};

use crate::errors::KernelError;
use crate::utils::{confirm_equal_len, resolve_null_mask};

/// Dense kernel helper (zero-allocation variant).
///
/// Any `NaN` or `inf` values generated in the kernel function are kept
/// verbatim, without `nulling` them in the (optional) mask.
#[inline(always)]
pub fn dense_univariate_kernel_f64_std_to<FScalar>(x: &[f64], out: &mut [f64], scalar_body: FScalar)
where
    FScalar: Fn(f64) -> f64,
{
    debug_assert_eq!(x.len(), out.len());
    for (o, &xi) in out.iter_mut().zip(x) {
        *o = scalar_body(xi);
    }
}

/// Null-aware masked kernel helper (zero-allocation variant).
///
/// Null lanes are written as `NaN`; valid lanes go through `scalar_body`.
///
/// # Safety
/// Uses unchecked mask access; the caller has confirmed the mask covers `x`.
#[inline(always)]
pub fn masked_univariate_kernel_f64_std_to<FScalar>(
    x: &[f64],
    mask: &Bitmask,
    out: &mut [f64],
    scalar_body: FScalar,
) where
    FScalar: Fn(f64) -> f64,
{
    debug_assert_eq!(x.len(), out.len());
    debug_assert!(mask.len() >= x.len());
    for (idx, (o, &xi)) in out.iter_mut().zip(x).enumerate() {
        *o = if unsafe { mask.get_unchecked(idx) } {
            scalar_body(xi)
        } else {
            f64::NAN
        };
    }
}

/// Validates buffers and dispatches a scalar body to the dense or masked loop,
/// writing into `output`.
#[inline(always)]
pub fn univariate_kernel_f64_std_to<FScalar>(
    label: &str,
    x: &[f64],
    output: &mut [f64],
    null_mask: Option<&Bitmask>,
    null_count: Option<usize>,
    scalar_body: FScalar,
) -> Result<(), KernelError>
where
    FScalar: Fn(f64) -> f64,
{
    confirm_equal_len(label, x.len(), output.len())?;
    match resolve_null_mask(label, x.len(), null_mask, null_count)? {
        None => dense_univariate_kernel_f64_std_to(x, output, scalar_body),
        Some(mask) => masked_univariate_kernel_f64_std_to(x, mask, output, scalar_body),
    }
    Ok(())
}

/// Allocating counterpart of [`univariate_kernel_f64_std_to`].
///
/// The returned array carries `null_mask` through unchanged.
#[inline(always)]
pub fn univariate_kernel_f64_std<FScalar>(
    label: &str,
    x: &[f64],
    null_mask: Option<&Bitmask>,
    null_count: Option<usize>,
    scalar_body: FScalar,
) -> Result<FloatArray<f64>, KernelError>
where
    FScalar: Fn(f64) -> f64,
{
    let len = x.len();
    let mut out = Vec64::with_capacity(len);
    out.resize(len, 0.0);

    univariate_kernel_f64_std_to(
        label,
        x,
        out.as_mut_slice(),
        null_mask,
        null_count,
        scalar_body,
    )?;

    Ok(FloatArray::from_vec64(out, null_mask.cloned()))
}
