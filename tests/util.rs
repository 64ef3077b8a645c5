#![allow(unused)]

pub fn assert_close(a: f64, e: f64, tol: f64) {
    if e.is_nan() {
        assert!(a.is_nan(), "expected NaN, got {a}");
        return;
    }
    if e.is_infinite() {
        assert!(
            a.is_infinite() && a.is_sign_positive() == e.is_sign_positive(),
            "expected {e}, got {a}"
        );
        return;
    }
    let scale = 1.0_f64.max(e.abs());
    let ok = (a - e).abs() <= tol * scale;
    assert!(ok, "mismatch: got {a}, expect {e} (tol={tol})");
}

pub fn assert_slice_close(a: &[f64], e: &[f64], tol: f64) {
    assert_eq!(a.len(), e.len(), "len mismatch");
    for (i, (&ai, &ei)) in a.iter().zip(e.iter()).enumerate() {
        if ei.is_nan() {
            assert!(ai.is_nan(), "idx {i}: expected NaN, got {ai}");
            continue;
        }
        if ei.is_infinite() {
            assert!(
                ai.is_infinite() && ai.is_sign_positive() == ei.is_sign_positive(),
                "idx {i}: expected {ei}, got {ai}"
            );
            continue;
        }
        let scale = 1.0_f64.max(ei.abs());
        let ok = (ai - ei).abs() <= tol * scale;
        assert!(ok, "idx {i}: got {ai}, expect {ei} (tol={tol})");
    }
}

/// Asserts `actual` agrees with `expected` to `digits` significant decimal digits.
///
/// Relative error is bounded by `10^-digits`, floored at four ulps so that
/// 16-digit reference values do not demand better than f64 can hold. A zero
/// expectation is compared absolutely. NaN matches NaN only.
pub fn assert_almost_equal_relative(expected: f64, actual: f64, digits: i32) {
    if expected.is_nan() {
        assert!(actual.is_nan(), "expected NaN, got {actual}");
        return;
    }
    if expected.is_infinite() {
        assert_eq!(actual, expected, "expected {expected}, got {actual}");
        return;
    }
    let tol = 10f64.powi(-digits).max(4.0 * f64::EPSILON);
    let err = if expected == 0.0 {
        actual.abs()
    } else {
        ((actual - expected) / expected).abs()
    };
    assert!(
        err <= tol,
        "mismatch: got {actual}, expect {expected} ({digits} digits, err={err:e})"
    );
}

/// Relative error, with equal values (including matching infinities) at zero.
pub fn rel_err(actual: f64, expected: f64) -> f64 {
    if actual == expected {
        return 0.0;
    }
    ((actual - expected) / expected).abs()
}
