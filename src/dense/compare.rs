//! Approximate comparison.
//!
//! Exact equality is `==` (`PartialEq`). Approximate equality compares
//! element pairs with a mixed absolute/relative bound:
//!
//! ```text
//! |a - b| <= tol * max(1, |a|, |b|)
//! ```
//!
//! so small values are compared absolutely and large values relatively.
//! Mismatched shapes compare unequal instead of failing. NaN is never
//! approximately equal to anything.

use crate::traits::FloatScalar;

use super::vector::VectorX;
use super::MatrixX;

#[inline]
fn close<T: FloatScalar>(a: T, b: T, tol: T) -> bool {
    let scale = T::one().max(a.abs()).max(b.abs());
    (a - b).abs() <= tol * scale
}

fn all_close<T: FloatScalar>(a: &[T], b: &[T], tol: T) -> bool {
    a.len() == b.len() && a.iter().zip(b).all(|(&x, &y)| close(x, y, tol))
}

impl<T: FloatScalar> MatrixX<T> {
    /// Whether `other` has the same shape and every element pair is within
    /// `tol` (see the module docs for the bound).
    ///
    /// ```
    /// use matrixx::MatrixXd;
    /// let a = MatrixXd::identity(2, 2);
    /// let mut b = a.clone();
    /// b[(0, 1)] = 1e-9;
    /// assert!(a.approx_eq(&b, 1e-6));
    /// assert!(!a.approx_eq(&b, 1e-12));
    /// assert!(!a.approx_eq(&MatrixXd::identity(2, 3), 1.0));
    /// ```
    pub fn approx_eq(&self, other: &Self, tol: T) -> bool {
        self.shape() == other.shape() && all_close(&self.data, &other.data, tol)
    }

    /// [`approx_eq`](Self::approx_eq) with [`FloatScalar::default_epsilon`].
    pub fn approx_eq_default(&self, other: &Self) -> bool {
        self.approx_eq(other, T::default_epsilon())
    }
}

impl<T: FloatScalar> VectorX<T> {
    /// Whether `other` has the same length and every element pair is within
    /// `tol` (see the module docs for the bound).
    ///
    /// ```
    /// use matrixx::VectorXd;
    /// let a = VectorXd::from_slice(&[1.0, 4.0, 9.0, 16.0]);
    /// let b = VectorXd::from_slice(&[1.0, 4.0, 9.0, 16.0001]);
    /// assert!(a.approx_eq(&b, 1e-3));
    /// assert!(!a.approx_eq(&VectorXd::zeros(3), 1.0));
    /// ```
    pub fn approx_eq(&self, other: &Self, tol: T) -> bool {
        all_close(self.as_slice(), other.as_slice(), tol)
    }

    /// [`approx_eq`](Self::approx_eq) with [`FloatScalar::default_epsilon`].
    pub fn approx_eq_default(&self, other: &Self) -> bool {
        self.approx_eq(other, T::default_epsilon())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dense::{MatrixXd, VectorXd};

    #[test]
    fn close_mixed_bound() {
        assert!(close(0.0_f64, 1e-13, 1e-12));
        assert!(!close(0.0_f64, 1e-11, 1e-12));
        // relative for large magnitudes
        assert!(close(1e6_f64, 1e6 + 1e-7, 1e-12));
        assert!(!close(1e6_f64, 1e6 + 1e-5, 1e-12));
        assert!(!close(f64::NAN, f64::NAN, 1.0));
    }

    #[test]
    fn vector_length_mismatch_is_false() {
        let a = VectorXd::zeros(2);
        let b = VectorXd::zeros(3);
        assert!(!a.approx_eq(&b, 1e3));
        assert!(!a.approx_eq_default(&b));
        assert!(a != b);
    }

    #[test]
    fn matrix_shape_mismatch_is_false() {
        // same element count, different shape
        let a = MatrixXd::zeros(2, 3);
        let b = MatrixXd::zeros(3, 2);
        assert!(!a.approx_eq(&b, 1.0));
        assert!(a != b);
    }

    #[test]
    fn exact_vs_approx() {
        let a = VectorXd::from_slice(&[0.1 + 0.2, 1.0]);
        let b = VectorXd::from_slice(&[0.3, 1.0]);
        assert_ne!(a, b);
        assert!(a.approx_eq_default(&b));
    }

    #[test]
    fn dup_is_approx_equal() {
        let mut m = MatrixXd::new(9, 7);
        for i in 0..63 {
            m[(i % 9, i / 9)] = (i + 1) as f64;
        }
        assert!(m.approx_eq_default(&m.duplicate()));
    }
}
