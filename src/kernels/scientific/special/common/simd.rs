// Copyright Peter Bower 2025. All Rights Reserved.
// Licensed under Mozilla Public License (MPL) 2.0.

//! SIMD loop drivers: vectorised body over aligned full chunks, scalar body
//! over the tail and over unaligned input.

use std::simd::{LaneCount, Mask, Simd, SupportedLaneCount};

use minarrow::{Bitmask, FloatArray, Vec64};

use crate::errors::KernelError;
use crate::utils::{bitmask_to_simd_mask, confirm_equal_len, is_simd_aligned, resolve_null_mask};

/// Dense f64->f64 SIMD kernel (zero-allocation variant).
///
/// ## Parameters
/// - `x`: Input array slice (requires 64-byte alignment for SIMD activation)
/// - `out`: Output buffer (must match input length)
/// - `simd_body`: Vectorised computation function: `Simd<f64, N> -> Simd<f64, N>`
/// - `scalar_body`: Scalar computation function for tail elements: `f64 -> f64`
#[inline(always)]
pub fn dense_univariate_kernel_f64_simd_to<const N: usize, FSimd, FScalar>(
    x: &[f64],
    out: &mut [f64],
    simd_body: FSimd,
    scalar_body: FScalar,
) where
    LaneCount<N>: SupportedLaneCount,
    FSimd: Fn(Simd<f64, N>) -> Simd<f64, N>,
    FScalar: Fn(f64) -> f64,
{
    let len = x.len();
    debug_assert_eq!(len, out.len());

    let mut i = 0;
    if is_simd_aligned(x) {
        while i + N <= len {
            let x_v = Simd::<f64, N>::from_slice(&x[i..i + N]);
            let y_v = simd_body(x_v);
            out[i..i + N].copy_from_slice(y_v.as_array());
            i += N;
        }
    }
    // Scalar tail, or the whole slice when the alignment check failed
    for j in i..len {
        out[j] = scalar_body(x[j]);
    }
}

/// Null-aware f64->f64 SIMD kernel (zero-allocation variant).
///
/// Null lanes are replaced by `NaN` before the SIMD body runs, so the body
/// only needs to propagate `NaN` for them to come out as `NaN`.
#[inline(always)]
pub fn masked_univariate_kernel_f64_simd_to<const N: usize, FSimd, FScalar>(
    x: &[f64],
    mask: &Bitmask,
    out: &mut [f64],
    simd_body: FSimd,
    scalar_body: FScalar,
) where
    LaneCount<N>: SupportedLaneCount,
    FSimd: Fn(Simd<f64, N>) -> Simd<f64, N>,
    FScalar: Fn(f64) -> f64,
{
    let len = x.len();
    debug_assert_eq!(len, out.len());
    let mask_bytes = mask.as_bytes();
    let nan_v = Simd::<f64, N>::splat(f64::NAN);

    let mut i = 0;
    if is_simd_aligned(x) {
        while i + N <= len {
            let lane_mask: Mask<i64, N> = bitmask_to_simd_mask::<N, i64>(mask_bytes, i, len);
            let x_v = lane_mask.select(Simd::<f64, N>::from_slice(&x[i..i + N]), nan_v);
            let y_v = simd_body(x_v);
            out[i..i + N].copy_from_slice(y_v.as_array());
            i += N;
        }
    }
    for idx in i..len {
        out[idx] = if unsafe { mask.get_unchecked(idx) } {
            scalar_body(x[idx])
        } else {
            f64::NAN
        };
    }
}

/// Validates buffers and dispatches to the dense or masked SIMD loop, writing into `output`.
#[inline(always)]
pub fn univariate_kernel_f64_simd_to<const N: usize, FSimd, FScalar>(
    label: &str,
    x: &[f64],
    output: &mut [f64],
    null_mask: Option<&Bitmask>,
    null_count: Option<usize>,
    simd_body: FSimd,
    scalar_body: FScalar,
) -> Result<(), KernelError>
where
    LaneCount<N>: SupportedLaneCount,
    FSimd: Fn(Simd<f64, N>) -> Simd<f64, N>,
    FScalar: Fn(f64) -> f64,
{
    confirm_equal_len(label, x.len(), output.len())?;
    match resolve_null_mask(label, x.len(), null_mask, null_count)? {
        None => dense_univariate_kernel_f64_simd_to::<N, _, _>(x, output, simd_body, scalar_body),
        Some(mask) => masked_univariate_kernel_f64_simd_to::<N, _, _>(
            x,
            mask,
            output,
            simd_body,
            scalar_body,
        ),
    }
    Ok(())
}

/// Allocating counterpart of [`univariate_kernel_f64_simd_to`].
#[inline(always)]
pub fn univariate_kernel_f64_simd<const N: usize, FSimd, FScalar>(
    label: &str,
    x: &[f64],
    null_mask: Option<&Bitmask>,
    null_count: Option<usize>,
    simd_body: FSimd,
    scalar_body: FScalar,
) -> Result<FloatArray<f64>, KernelError>
where
    LaneCount<N>: SupportedLaneCount,
    FSimd: Fn(Simd<f64, N>) -> Simd<f64, N>,
    FScalar: Fn(f64) -> f64,
{
    let len = x.len();
    let mut out = Vec64::with_capacity(len);
    out.resize(len, 0.0);

    univariate_kernel_f64_simd_to::<N, _, _>(
        label,
        x,
        out.as_mut_slice(),
        null_mask,
        null_count,
        simd_body,
        scalar_body,
    )?;

    Ok(FloatArray::from_vec64(out, null_mask.cloned()))
}
