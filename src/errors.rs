// Copyright Peter Bower 2025. All Rights Reserved.
// Licensed under Mozilla Public License (MPL) 2.0.

//! # **Error Types** - *Bulk Kernel Error Handling*
//!
//! Error type returned at the bulk-kernel boundary.
//!
//! The scalar gamma functions are total over the extended reals and signal an
//! undefined result with `NaN`, so they never produce a `KernelError`. Errors only
//! arise when the *call* itself is malformed:
//!
//! ## Error Categories
//! - **Argument Errors**: a shape parameter outside its domain, or a null count
//!   supplied without the mask it describes
//! - **Dimension Errors**: output buffers or masks that do not cover the input

use core::fmt;
use std::error::Error;

/// Error type for bulk kernel calls.
///
/// Each variant carries a contextual message naming the kernel and the
/// offending value, so the error reads well when bubbled up through a pipeline.
#[derive(Debug, Clone, PartialEq)]
pub enum KernelError {
    /// Input and output lengths differ.
    LengthMismatch(String),

    /// Invalid arguments provided to kernel function.
    InvalidArguments(String),
}

impl fmt::Display for KernelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KernelError::LengthMismatch(msg) => write!(f, "Length mismatch: {}", msg),
            KernelError::InvalidArguments(msg) => write!(f, "Invalid arguments: {}", msg),
        }
    }
}

impl Error for KernelError {}

/// Creates a formatted error message for length mismatches between input and output buffers.
///
/// # Arguments
/// * `fname` - Function name where the mismatch occurred
/// * `lhs` - Length of the input
/// * `rhs` - Length of the output
pub fn log_length_mismatch(fname: &str, lhs: usize, rhs: usize) -> String {
    format!("{} => Length mismatch: LHS {} RHS {}", fname, lhs, rhs)
}
