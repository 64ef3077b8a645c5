// Copyright Peter Bower 2025. All Rights Reserved.
// Licensed under Mozilla Public License (MPL) 2.0.

//! # **Utility Functions** - *Null Handling and Buffer Validation Utilities*
//!
//! Helpers shared by the bulk kernels: null detection, mask and buffer
//! validation, alignment checks, and bitmask to SIMD mask conversion.

#[cfg(feature = "simd")]
use std::simd::{LaneCount, Mask, MaskElement, SimdElement, SupportedLaneCount};

use minarrow::Bitmask;

use crate::errors::{KernelError, log_length_mismatch};

/// Extracts a core::SIMD `Mask<M, N>` for a batch of N lanes from a Minarrow `Bitmask`.
///
/// - `mask_bytes`: packed Arrow validity bits (LSB=index 0, bit=1 means valid)
/// - `offset`: starting index (bit offset into the mask)
/// - `logical_len`: number of logical bits in the mask
/// - `M`: SIMD mask type (e.g., i64 for f64)
///
/// Bits outside the logical length are treated as valid.
#[cfg(feature = "simd")]
#[inline(always)]
pub fn bitmask_to_simd_mask<const N: usize, M>(
    mask_bytes: &[u8],
    offset: usize,
    logical_len: usize,
) -> Mask<M, N>
where
    LaneCount<N>: SupportedLaneCount,
    M: MaskElement + SimdElement,
{
    let lane_limit = (offset + N).min(logical_len);
    let n_lanes = lane_limit - offset;
    let mut bits: u64 = 0;
    for j in 0..n_lanes {
        let idx = offset + j;
        let byte = mask_bytes[idx >> 3];
        if ((byte >> (idx & 7)) & 1) != 0 {
            bits |= 1u64 << j;
        }
    }
    if n_lanes < N {
        bits |= !0u64 << n_lanes;
    }
    Mask::<M, N>::from_bitmask(bits)
}

/// Determines whether nulls are present given an optional null count and mask reference.
/// Avoids computing mask cardinality to preserve performance guarantees.
#[inline(always)]
pub fn has_nulls(null_count: Option<usize>, mask: Option<&Bitmask>) -> bool {
    match null_count {
        Some(n) => n > 0,
        None => mask.is_some(),
    }
}

/// Checks the mask covers at least `cmp_len` elements, so the hot loop can
/// read it without bounds checks.
#[inline(always)]
pub fn confirm_mask_capacity(cmp_len: usize, mask: Option<&Bitmask>) -> Result<(), KernelError> {
    if let Some(m) = mask {
        if m.len() < cmp_len {
            return Err(KernelError::InvalidArguments(format!(
                "mask (Bitmask): capacity mismatch (expected {}, got {})",
                cmp_len,
                m.len()
            )));
        }
    }
    Ok(())
}

/// Resolves the mask a kernel should read nulls from.
///
/// Returns `Ok(None)` for the dense path and `Ok(Some(mask))` for the masked path.
/// A positive `null_count` without a mask is a malformed call.
#[inline(always)]
pub fn resolve_null_mask<'a>(
    label: &str,
    len: usize,
    null_mask: Option<&'a Bitmask>,
    null_count: Option<usize>,
) -> Result<Option<&'a Bitmask>, KernelError> {
    confirm_mask_capacity(len, null_mask)?;
    if !has_nulls(null_count, null_mask) {
        return Ok(None);
    }
    match null_mask {
        Some(m) => Ok(Some(m)),
        None => Err(KernelError::InvalidArguments(format!(
            "{}: null_count > 0 requires null_mask",
            label
        ))),
    }
}

/// Validates that input and output lengths agree for the zero-allocation kernels.
///
/// # Returns
/// `Ok(())` if lengths are equal, otherwise `KernelError::LengthMismatch`.
#[inline(always)]
pub fn confirm_equal_len(label: &str, a: usize, b: usize) -> Result<(), KernelError> {
    if a != b {
        return Err(KernelError::LengthMismatch(log_length_mismatch(label, a, b)));
    }
    Ok(())
}

/// SIMD Alignment check. Returns true if the slice is properly
/// 64-byte aligned for SIMD operations, false otherwise.
#[inline(always)]
pub fn is_simd_aligned<T>(slice: &[T]) -> bool {
    if slice.is_empty() {
        true
    } else {
        (slice.as_ptr() as usize) % 64 == 0
    }
}
