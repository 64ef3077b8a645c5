// Copyright Peter Bower 2025. All Rights Reserved.
// Licensed under the Mozilla Public License (MPL) 2.0.
// See LICENSE for details.

// Requires a nightly toolchain: `minarrow` enables `allocator_api`, and the
// SIMD bulk paths additionally sit on `std::simd`.
#![cfg_attr(feature = "simd", feature(portable_simd))]

// compile with RUSTFLAGS="-C target-cpu=native" cargo +nightly build --features simd

pub mod kernels {
    pub mod scientific {
        pub mod special;
    }
}

pub mod config;
pub mod errors;
pub mod utils;

pub use kernels::scientific::special::{
    factorial, factorial_ln, gamma, gamma_ln, gamma_lower_incomplete, gamma_lower_regularized,
    gamma_lower_regularized_inv, gamma_lower_upper_regularized, gamma_upper_incomplete,
    gamma_upper_regularized, gamma_upper_regularized_inv,
};
