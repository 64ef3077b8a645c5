// Copyright Peter Bower 2025. All Rights Reserved.
// Licensed under Mozilla Public License (MPL) 2.0.

//! # **Common Kernel Drivers** - *Shared Bulk Loop Infrastructure*
//!
//! Dense and null-aware loop drivers that lift a scalar `f64 -> f64` body
//! (and optionally a `Simd<f64, N>` body) over a Minarrow buffer.
//!
//! ## Null handling
//! - Null lanes are written as `NaN` and stay null: the output array carries the
//!   input mask unchanged.
//! - `NaN` or `inf` produced by the body on a valid lane is kept verbatim
//!   rather than nulled, as it carries signal (a pole, an out-of-domain shape).

#[cfg(feature = "simd")]
pub mod simd;
/// Scalar loop drivers.
pub mod std;

#[cfg(test)]
pub(crate) mod test_helpers {
    use minarrow::{Bitmask, Buffer, FloatArray};

    /// Test Helper: unwrap `FloatArray`, assert *no* null mask, return data.
    pub fn dense_data(arr: FloatArray<f64>) -> Buffer<f64> {
        assert!(arr.null_mask.is_none(), "unexpected mask on dense path");
        arr.data
    }

    /// Create a mask of given length with exactly the lane `idx` null.
    pub fn single_null_mask(len: usize, idx: usize) -> Bitmask {
        let mut m = Bitmask::new_set_all(len, true);
        unsafe { m.set_unchecked(idx, false) };
        m
    }

    pub fn mask_vec(m: &Bitmask) -> Vec<bool> {
        (0..m.len()).map(|i| m.get(i)).collect()
    }

    /// Assert relative difference ≤ `tol`, treating NaN == NaN and equal infinities as equal.
    pub fn assert_close(a: f64, b: f64, tol: f64) {
        if b.is_nan() {
            assert!(a.is_nan(), "assert_close failed: expected NaN, got {}", a);
            return;
        }
        if a == b {
            return;
        }
        let scale = 1.0_f64.max(b.abs());
        assert!(
            (a - b).abs() <= tol * scale,
            "assert_close failed: {} vs {} (tol={})",
            a,
            b,
            tol
        );
    }
}
