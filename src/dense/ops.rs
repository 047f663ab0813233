use alloc::vec::Vec;
use core::ops::{Add, AddAssign, Mul, MulAssign, Neg, Sub, SubAssign};

use crate::error::{Error, Result};
use crate::traits::Scalar;

use super::vector::VectorX;
use super::MatrixX;

// ── Checked arithmetic ──────────────────────────────────────────────

impl<T: Scalar> MatrixX<T> {
    /// Matrix-vector product `A·v`.
    ///
    /// Fails with [`Error::DimensionMismatch`] unless `v.len() == ncols`.
    ///
    /// ```
    /// use matrixx::{MatrixXd, VectorXd};
    /// let a = MatrixXd::from_rows(2, 3, &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
    /// let v = VectorXd::from_slice(&[1.0, 0.0, -1.0]);
    /// let y = a.dot_v(&v).unwrap();
    /// assert_eq!(y.as_slice(), &[-2.0, -2.0]);
    /// ```
    pub fn dot_v(&self, v: &VectorX<T>) -> Result<VectorX<T>> {
        if v.len() != self.ncols {
            return Err(Error::DimensionMismatch {
                expected: (self.ncols, 1),
                got: (v.len(), 1),
            });
        }
        let mut out = alloc::vec![T::zero(); self.nrows];
        // Column sweep: contiguous reads of each column.
        for j in 0..self.ncols {
            let vj = v[j];
            let col = &self.data[j * self.nrows..(j + 1) * self.nrows];
            for (o, &a) in out.iter_mut().zip(col) {
                *o = *o + a * vj;
            }
        }
        Ok(VectorX::from_vec(out))
    }

    /// Matrix-matrix product `A·B`.
    ///
    /// Fails with [`Error::DimensionMismatch`] unless `rhs.nrows() == ncols`.
    pub fn try_mul(&self, rhs: &MatrixX<T>) -> Result<MatrixX<T>> {
        if rhs.nrows != self.ncols {
            return Err(Error::DimensionMismatch {
                expected: (self.ncols, rhs.ncols),
                got: (rhs.nrows, rhs.ncols),
            });
        }
        let (m, n, p) = (self.nrows, self.ncols, rhs.ncols);
        let mut data = alloc::vec![T::zero(); m * p];
        for j in 0..p {
            let out = &mut data[j * m..(j + 1) * m];
            for k in 0..n {
                let b = rhs.data[j * n + k];
                let col = &self.data[k * m..(k + 1) * m];
                for (o, &a) in out.iter_mut().zip(col) {
                    *o = *o + a * b;
                }
            }
        }
        Ok(MatrixX::from_col_major(m, p, data))
    }

    /// Element-wise sum. Fails with [`Error::DimensionMismatch`] on shape mismatch.
    pub fn try_add(&self, rhs: &MatrixX<T>) -> Result<MatrixX<T>> {
        self.zip_with(rhs, |a, b| a + b)
    }

    /// Element-wise difference. Fails with [`Error::DimensionMismatch`] on shape mismatch.
    pub fn try_sub(&self, rhs: &MatrixX<T>) -> Result<MatrixX<T>> {
        self.zip_with(rhs, |a, b| a - b)
    }

    /// Multiply every element by `s`.
    pub fn scale(&self, s: T) -> MatrixX<T> {
        self.map(|x| x * s)
    }

    fn zip_with(&self, rhs: &MatrixX<T>, f: impl Fn(T, T) -> T) -> Result<MatrixX<T>> {
        if self.shape() != rhs.shape() {
            return Err(Error::DimensionMismatch {
                expected: self.shape(),
                got: rhs.shape(),
            });
        }
        let data: Vec<T> = self
            .data
            .iter()
            .zip(rhs.data.iter())
            .map(|(&a, &b)| f(a, b))
            .collect();
        Ok(MatrixX::from_col_major(self.nrows, self.ncols, data))
    }
}

impl<T: Scalar> VectorX<T> {
    /// Element-wise sum.
    ///
    /// Fails with [`Error::DimensionMismatch`] unless the lengths are equal.
    ///
    /// ```
    /// use matrixx::VectorXd;
    /// let a = VectorXd::from_slice(&[1.0, 0.0]);
    /// let b = VectorXd::from_slice(&[10.0, 20.0]);
    /// assert_eq!(a.try_add(&b).unwrap(), VectorXd::from_slice(&[11.0, 20.0]));
    /// assert!(a.try_add(&VectorXd::zeros(3)).is_err());
    /// ```
    pub fn try_add(&self, rhs: &VectorX<T>) -> Result<VectorX<T>> {
        Ok(VectorX {
            inner: self.inner.try_add(&rhs.inner)?,
        })
    }

    /// Element-wise difference.
    pub fn try_sub(&self, rhs: &VectorX<T>) -> Result<VectorX<T>> {
        Ok(VectorX {
            inner: self.inner.try_sub(&rhs.inner)?,
        })
    }

    /// Multiply every element by `s`.
    pub fn scale(&self, s: T) -> VectorX<T> {
        VectorX {
            inner: self.inner.scale(s),
        }
    }

    /// Dot product.
    ///
    /// Panics if the lengths differ.
    ///
    /// ```
    /// use matrixx::VectorXd;
    /// let a = VectorXd::from_slice(&[1.0, 2.0, 3.0]);
    /// let b = VectorXd::from_slice(&[4.0, 5.0, 6.0]);
    /// assert_eq!(a.dot(&b), 32.0);
    /// ```
    pub fn dot(&self, rhs: &Self) -> T {
        assert_eq!(self.len(), rhs.len(), "vector length mismatch");
        let mut sum = T::zero();
        for (&a, &b) in self.iter().zip(rhs.iter()) {
            sum = sum + a * b;
        }
        sum
    }
}

// ── Operators: MatrixX ──────────────────────────────────────────────
//
// Operators panic on shape mismatch; the `try_*` methods are the checked form.

fn expect_ok<T>(r: Result<T>) -> T {
    match r {
        Ok(v) => v,
        Err(e) => panic!("{}", e),
    }
}

impl<T: Scalar> Add<&MatrixX<T>> for &MatrixX<T> {
    type Output = MatrixX<T>;
    fn add(self, rhs: &MatrixX<T>) -> MatrixX<T> {
        expect_ok(self.try_add(rhs))
    }
}

impl<T: Scalar> Add for MatrixX<T> {
    type Output = MatrixX<T>;
    fn add(self, rhs: MatrixX<T>) -> MatrixX<T> {
        &self + &rhs
    }
}

impl<T: Scalar> AddAssign<&MatrixX<T>> for MatrixX<T> {
    fn add_assign(&mut self, rhs: &MatrixX<T>) {
        assert_eq!(
            self.shape(),
            rhs.shape(),
            "dimension mismatch: {}x{} += {}x{}",
            self.nrows, self.ncols, rhs.nrows, rhs.ncols,
        );
        for (a, &b) in self.data.iter_mut().zip(rhs.data.iter()) {
            *a = *a + b;
        }
    }
}

impl<T: Scalar> Sub<&MatrixX<T>> for &MatrixX<T> {
    type Output = MatrixX<T>;
    fn sub(self, rhs: &MatrixX<T>) -> MatrixX<T> {
        expect_ok(self.try_sub(rhs))
    }
}

impl<T: Scalar> Sub for MatrixX<T> {
    type Output = MatrixX<T>;
    fn sub(self, rhs: MatrixX<T>) -> MatrixX<T> {
        &self - &rhs
    }
}

impl<T: Scalar> SubAssign<&MatrixX<T>> for MatrixX<T> {
    fn sub_assign(&mut self, rhs: &MatrixX<T>) {
        assert_eq!(
            self.shape(),
            rhs.shape(),
            "dimension mismatch: {}x{} -= {}x{}",
            self.nrows, self.ncols, rhs.nrows, rhs.ncols,
        );
        for (a, &b) in self.data.iter_mut().zip(rhs.data.iter()) {
            *a = *a - b;
        }
    }
}

impl<T: Scalar + Neg<Output = T>> Neg for MatrixX<T> {
    type Output = MatrixX<T>;
    fn neg(self) -> MatrixX<T> {
        self.map(|x| -x)
    }
}

impl<T: Scalar> Mul<T> for &MatrixX<T> {
    type Output = MatrixX<T>;
    fn mul(self, s: T) -> MatrixX<T> {
        self.scale(s)
    }
}

impl<T: Scalar> MulAssign<T> for MatrixX<T> {
    fn mul_assign(&mut self, s: T) {
        for a in self.data.iter_mut() {
            *a = *a * s;
        }
    }
}

impl<T: Scalar> Mul<&MatrixX<T>> for &MatrixX<T> {
    type Output = MatrixX<T>;
    fn mul(self, rhs: &MatrixX<T>) -> MatrixX<T> {
        expect_ok(self.try_mul(rhs))
    }
}

impl<T: Scalar> Mul<&VectorX<T>> for &MatrixX<T> {
    type Output = VectorX<T>;
    fn mul(self, rhs: &VectorX<T>) -> VectorX<T> {
        expect_ok(self.dot_v(rhs))
    }
}

// ── Operators: VectorX ──────────────────────────────────────────────

impl<T: Scalar> Add<&VectorX<T>> for &VectorX<T> {
    type Output = VectorX<T>;
    fn add(self, rhs: &VectorX<T>) -> VectorX<T> {
        expect_ok(self.try_add(rhs))
    }
}

impl<T: Scalar> Add for VectorX<T> {
    type Output = VectorX<T>;
    fn add(self, rhs: VectorX<T>) -> VectorX<T> {
        &self + &rhs
    }
}

impl<T: Scalar> Sub<&VectorX<T>> for &VectorX<T> {
    type Output = VectorX<T>;
    fn sub(self, rhs: &VectorX<T>) -> VectorX<T> {
        expect_ok(self.try_sub(rhs))
    }
}

impl<T: Scalar> Sub for VectorX<T> {
    type Output = VectorX<T>;
    fn sub(self, rhs: VectorX<T>) -> VectorX<T> {
        &self - &rhs
    }
}

impl<T: Scalar + Neg<Output = T>> Neg for VectorX<T> {
    type Output = VectorX<T>;
    fn neg(self) -> VectorX<T> {
        VectorX { inner: -self.inner }
    }
}

impl<T: Scalar> Mul<T> for &VectorX<T> {
    type Output = VectorX<T>;
    fn mul(self, s: T) -> VectorX<T> {
        self.scale(s)
    }
}

#[cfg(test)]
mod tests {
    use crate::dense::{MatrixXd, VectorXd};
    use crate::error::Error;

    #[test]
    fn dot_v_diagonal() {
        let mut m = MatrixXd::zeros(4, 4);
        for i in 0..4 {
            m[(i, i)] = (i + 1) as f64;
        }
        let a = VectorXd::from_slice(&[1.0, 2.0, 3.0, 4.0]);
        let b = m.dot_v(&a).unwrap();
        assert_eq!(b, VectorXd::from_slice(&[1.0, 4.0, 9.0, 16.0]));
    }

    #[test]
    fn dot_v_rectangular() {
        let m = MatrixXd::from_rows(3, 2, &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
        let v = VectorXd::from_slice(&[1.0, 1.0]);
        assert_eq!(m.dot_v(&v).unwrap().as_slice(), &[3.0, 7.0, 11.0]);
    }

    #[test]
    fn dot_v_mismatch() {
        let m = MatrixXd::zeros(3, 2);
        let v = VectorXd::zeros(3);
        assert_eq!(
            m.dot_v(&v).unwrap_err(),
            Error::DimensionMismatch {
                expected: (2, 1),
                got: (3, 1)
            }
        );
    }

    #[test]
    fn matmul() {
        let a = MatrixXd::from_rows(2, 3, &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
        let b = MatrixXd::from_rows(3, 2, &[7.0, 8.0, 9.0, 10.0, 11.0, 12.0]);
        let c = &a * &b;
        assert_eq!(c, MatrixXd::from_rows(2, 2, &[58.0, 64.0, 139.0, 154.0]));
        assert!(b.try_mul(&b).is_err());
    }

    #[test]
    fn matrix_add_sub() {
        let a = MatrixXd::from_rows(2, 2, &[1.0, 2.0, 3.0, 4.0]);
        let b = MatrixXd::fill(2, 2, 1.0);
        assert_eq!(&a + &b, MatrixXd::from_rows(2, 2, &[2.0, 3.0, 4.0, 5.0]));
        assert_eq!(&a - &b, MatrixXd::from_rows(2, 2, &[0.0, 1.0, 2.0, 3.0]));
        assert!(a.try_add(&MatrixXd::zeros(2, 3)).is_err());

        let mut c = a.clone();
        c += &b;
        c -= &b;
        assert_eq!(c, a);
    }

    #[test]
    #[should_panic(expected = "dimension mismatch")]
    fn matrix_add_operator_panics_on_mismatch() {
        let _ = &MatrixXd::zeros(2, 2) + &MatrixXd::zeros(3, 2);
    }

    #[test]
    fn matrix_scale_and_neg() {
        let a = MatrixXd::from_rows(1, 2, &[1.0, -2.0]);
        assert_eq!(&a * 3.0, MatrixXd::from_rows(1, 2, &[3.0, -6.0]));
        assert_eq!(-a.clone(), MatrixXd::from_rows(1, 2, &[-1.0, 2.0]));
        let mut b = a;
        b *= 2.0;
        assert_eq!(b[(0, 1)], -4.0);
    }

    #[test]
    fn vector_add() {
        let v = VectorXd::from_slice(&[1.0, 0.0]);
        let v2 = VectorXd::from_slice(&[10.0, 20.0]);
        let mut v3 = VectorXd::zeros(2);
        v3[0] = 11.0;
        v3[1] = 20.0;
        assert_eq!(v3, &v + &v2);
        assert_eq!(v3, v.clone() + v2.clone());
    }

    #[test]
    fn vector_add_mismatch() {
        let a = VectorXd::zeros(2);
        let b = VectorXd::zeros(3);
        assert_eq!(
            a.try_add(&b).unwrap_err(),
            Error::DimensionMismatch {
                expected: (2, 1),
                got: (3, 1)
            }
        );
    }

    #[test]
    fn vector_sub_scale_neg() {
        let a = VectorXd::from_slice(&[3.0, 4.0]);
        let b = VectorXd::from_slice(&[1.0, 1.0]);
        assert_eq!((&a - &b).as_slice(), &[2.0, 3.0]);
        assert_eq!((&a * 0.5).as_slice(), &[1.5, 2.0]);
        assert_eq!((-a).as_slice(), &[-3.0, -4.0]);
    }

    #[test]
    fn mat_vec_operator() {
        let a = MatrixXd::identity(3, 3);
        let v = VectorXd::from_slice(&[1.0, 2.0, 3.0]);
        assert_eq!(&a * &v, v);
    }
}
