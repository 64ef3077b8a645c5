// Bulk kernel behaviour over Minarrow buffers: agreement with the scalar
// functions on dense and masked input, mask pass-through, and argument
// validation.

mod util;
mod array_kernel_tests {
    use super::util::{assert_close, assert_slice_close};
    use gamma_kernels::errors::KernelError;
    use gamma_kernels::kernels::scientific::special::*;
    use minarrow::{Bitmask, FloatArray, Vec64, vec64};

    type ShapeKernel =
        fn(&[f64], f64, Option<&Bitmask>, Option<usize>) -> Result<FloatArray<f64>, KernelError>;

    fn sample(len: usize) -> Vec64<f64> {
        let mut v = Vec64::with_capacity(len);
        for i in 0..len {
            v.push(0.05 + 0.37 * i as f64);
        }
        v
    }

    fn alternating_mask(len: usize) -> Bitmask {
        let mut m = Bitmask::new_set_all(len, true);
        for i in (0..len).step_by(3) {
            unsafe { m.set_unchecked(i, false) };
        }
        m
    }

    #[test]
    fn gamma_ln_dense_matches_scalar() {
        // long enough to cover full vector chunks plus a tail
        let x = sample(37);
        let got = gamma_ln_array(&x, None, None).unwrap();
        assert!(got.null_mask.is_none());
        let expect: Vec<f64> = x.iter().map(|&xi| gamma_ln(xi)).collect();
        assert_slice_close(&got, &expect, 1e-14);
    }

    #[test]
    fn gamma_ln_masked_matches_scalar() {
        let x = sample(29);
        let mask = alternating_mask(29);
        let got = gamma_ln_array(&x, Some(&mask), Some(10)).unwrap();
        let out_mask = got.null_mask.as_ref().unwrap();
        for i in 0..x.len() {
            assert_eq!(out_mask.get(i), mask.get(i));
            if mask.get(i) {
                assert_close(got.data[i], gamma_ln(x[i]), 1e-14);
            } else {
                assert!(got.data[i].is_nan(), "null lane {i} should be NaN");
            }
        }
    }

    #[test]
    fn gamma_ln_special_lanes() {
        let x = vec64![
            0.0, -1.0, 0.25, 1.0, 2.0, f64::NAN, f64::INFINITY, 171.0, 172.0, 0.5, 3.5, 1e300
        ];
        let got = gamma_ln_array(&x, None, None).unwrap();
        let expect: Vec<f64> = x.iter().map(|&xi| gamma_ln(xi)).collect();
        assert_slice_close(&got, &expect, 1e-14);
    }

    #[test]
    fn shape_kernels_match_scalar() {
        let x = sample(24);
        let a = 4.75;
        let checks: [(ShapeKernel, fn(f64, f64) -> f64); 4] = [
            (gamma_lower_regularized_array, gamma_lower_regularized),
            (gamma_upper_regularized_array, gamma_upper_regularized),
            (gamma_lower_incomplete_array, gamma_lower_incomplete),
            (gamma_upper_incomplete_array, gamma_upper_incomplete),
        ];
        for (kernel, scalar) in checks {
            let got = kernel(&x, a, None, None).unwrap();
            let expect: Vec<f64> = x.iter().map(|&xi| scalar(a, xi)).collect();
            assert_slice_close(&got, &expect, 0.0);
        }
    }

    #[test]
    fn to_variants_fill_output() {
        let x = vec64![0.5, 1.0, 2.0, 5.0];
        let mut out = vec![0.0; 4];
        gamma_upper_regularized_array_to(&x, 2.0, &mut out, None, None).unwrap();
        for i in 0..4 {
            assert_eq!(out[i], gamma_upper_regularized(2.0, x[i]));
        }
        gamma_array_to(&x, &mut out, None, None).unwrap();
        assert_eq!(out[1], 1.0);
        gamma_ln_array_to(&x, &mut out, None, None).unwrap();
        assert_eq!(out[2], 0.0);
        let y = vec64![0.1, 0.2, 0.3, 0.4];
        gamma_upper_regularized_inv_array_to(&y, 2.0, &mut out, None, None).unwrap();
        assert_close(gamma_upper_regularized(2.0, out[3]), 0.4, 1e-13);
    }

    #[test]
    fn mask_is_passed_through_unchanged() {
        let x = vec64![1.0, 2.0, 3.0, 4.0, 5.0];
        let mut mask = Bitmask::new_set_all(5, true);
        unsafe { mask.set_unchecked(4, false) };
        let got = gamma_lower_incomplete_array(&x, 1.5, Some(&mask), Some(1)).unwrap();
        let out_mask = got.null_mask.as_ref().unwrap();
        assert_eq!(out_mask.len(), mask.len());
        for i in 0..5 {
            assert_eq!(out_mask.get(i), mask.get(i));
        }
        assert!(got.data[4].is_nan());
        // a valid NaN-producing lane is not nulled
        let y = vec64![0.5, 2.0];
        let got = gamma_lower_regularized_inv_array(&y, 1.0, None, None).unwrap();
        assert!(got.null_mask.is_none());
        assert!(got.data[1].is_nan());
    }

    #[test]
    fn mask_without_nulls_takes_dense_path() {
        let x = vec64![1.5, 2.5];
        let mask = Bitmask::new_set_all(2, true);
        let got = gamma_array(&x, Some(&mask), Some(0)).unwrap();
        assert_close(got.data[0], 0.886226925452758, 1e-14);
        assert_close(got.data[1], 1.329340388179137, 1e-14);
    }

    #[test]
    fn invalid_arguments() {
        let x = vec64![1.0, 2.0, 3.0];
        let mut short = vec![0.0; 2];
        assert!(matches!(
            gamma_ln_array_to(&x, &mut short, None, None),
            Err(KernelError::LengthMismatch(_))
        ));
        assert!(matches!(
            gamma_upper_regularized_array(&x, -0.5, None, None),
            Err(KernelError::InvalidArguments(_))
        ));
        assert!(matches!(
            gamma_upper_regularized_inv_array(&x, 0.0, None, None),
            Err(KernelError::InvalidArguments(_))
        ));
        assert!(gamma_array(&x, None, Some(2)).is_err());
        let short_mask = Bitmask::new_set_all(1, true);
        assert!(gamma_lower_regularized_array(&x, 1.0, Some(&short_mask), None).is_err());
    }
}
