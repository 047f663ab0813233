use num_traits::Zero;

use crate::traits::{FloatScalar, Scalar};

use super::vector::VectorX;
use super::MatrixX;

// ── Vector norms ────────────────────────────────────────────────────

impl<T: Scalar> VectorX<T> {
    /// Squared L2 norm (dot product with self).
    ///
    /// ```
    /// use matrixx::VectorXd;
    /// let v = VectorXd::from_slice(&[3.0, 4.0]);
    /// assert_eq!(v.norm_squared(), 25.0);
    /// ```
    pub fn norm_squared(&self) -> T {
        self.dot(self)
    }
}

impl<T: FloatScalar> VectorX<T> {
    /// L2 (Euclidean) norm.
    ///
    /// ```
    /// use matrixx::VectorXd;
    /// let v = VectorXd::from_slice(&[3.0, 4.0]);
    /// assert!((v.norm() - 5.0).abs() < 1e-12);
    /// ```
    pub fn norm(&self) -> T {
        self.norm_squared().sqrt()
    }

    /// L1 norm (sum of absolute values).
    pub fn norm_l1(&self) -> T {
        self.iter().fold(T::zero(), |acc, &x| acc + x.abs())
    }

    /// Infinity norm (largest absolute value). Zero for an empty vector.
    pub fn norm_inf(&self) -> T {
        self.iter().fold(T::zero(), |acc, &x| acc.max(x.abs()))
    }
}

// ── Matrix norms ────────────────────────────────────────────────────

impl<T: FloatScalar> MatrixX<T> {
    /// Frobenius norm: square root of the sum of squared elements.
    ///
    /// ```
    /// use matrixx::MatrixXd;
    /// let m = MatrixXd::from_rows(2, 2, &[1.0, 2.0, 2.0, 4.0]);
    /// assert!((m.frobenius_norm() - 5.0).abs() < 1e-12);
    /// ```
    pub fn frobenius_norm(&self) -> T {
        let mut sum = <T as Zero>::zero();
        for &x in &self.data {
            sum = sum + x * x;
        }
        sum.sqrt()
    }

    /// Largest absolute element. Zero for an empty matrix.
    pub fn max_abs(&self) -> T {
        self.data.iter().fold(T::zero(), |acc, &x| acc.max(x.abs()))
    }

    /// Whether every element is finite (no NaN or infinity).
    pub fn is_finite(&self) -> bool {
        self.data.iter().all(|x| x.is_finite())
    }
}
