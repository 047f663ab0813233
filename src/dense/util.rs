use alloc::vec::Vec;
use core::fmt;

use crate::error::{Error, Result};
use crate::storage::{reorder, Order};
use crate::traits::Scalar;

use super::vector::VectorX;
use super::MatrixX;

// ── Map ─────────────────────────────────────────────────────────────

impl<T> MatrixX<T> {
    /// Apply a function to every element, producing a new matrix.
    ///
    /// ```
    /// use matrixx::MatrixXd;
    /// let m = MatrixXd::from_rows(2, 2, &[1.0, 4.0, 9.0, 16.0]);
    /// let r = m.map(|x: f64| x.sqrt());
    /// assert_eq!(r[(0, 0)], 1.0);
    /// assert_eq!(r[(1, 1)], 4.0);
    /// ```
    pub fn map<U>(&self, f: impl Fn(T) -> U) -> MatrixX<U>
    where
        T: Copy,
    {
        let data: Vec<U> = self.data.iter().map(|&x| f(x)).collect();
        MatrixX {
            data,
            nrows: self.nrows,
            ncols: self.ncols,
        }
    }
}

// ── Export ──────────────────────────────────────────────────────────

impl<T: Scalar> MatrixX<T> {
    /// Flatten in row-major order, the canonical export order.
    ///
    /// ```
    /// use matrixx::MatrixXd;
    /// let m = MatrixXd::from_rows(2, 2, &[2.0, -1.0, 1.0, -2.0]);
    /// assert_eq!(m.to_vec(), vec![2.0, -1.0, 1.0, -2.0]);
    /// ```
    pub fn to_vec(&self) -> Vec<T> {
        self.to_vec_ordered(Order::RowMajor)
    }

    /// Flatten in the given order.
    ///
    /// `from_slice_ordered(&m.to_vec_ordered(o), rows, cols, o)` reproduces `m`.
    pub fn to_vec_ordered(&self, order: Order) -> Vec<T> {
        reorder(&self.data, self.nrows, self.ncols, Order::ColMajor, order)
    }

    /// Transpose.
    ///
    /// ```
    /// use matrixx::MatrixXd;
    /// let m = MatrixXd::from_rows(2, 3, &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
    /// let t = m.transpose();
    /// assert_eq!(t.shape(), (3, 2));
    /// assert_eq!(t[(2, 1)], 6.0);
    /// ```
    pub fn transpose(&self) -> Self {
        MatrixX {
            data: reorder(&self.data, self.nrows, self.ncols, Order::ColMajor, Order::RowMajor),
            nrows: self.ncols,
            ncols: self.nrows,
        }
    }
}

// ── Row / column access ─────────────────────────────────────────────

impl<T: Scalar> MatrixX<T> {
    /// Copy row `i` into a vector of length `ncols`.
    ///
    /// ```
    /// use matrixx::MatrixXd;
    /// let m = MatrixXd::from_rows(2, 3, &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
    /// assert_eq!(m.row(1).unwrap().as_slice(), &[4.0, 5.0, 6.0]);
    /// assert!(m.row(2).is_err());
    /// ```
    pub fn row(&self, i: usize) -> Result<VectorX<T>> {
        if i >= self.nrows {
            return Err(Error::IndexOutOfRange {
                index: (i, 0),
                shape: self.shape(),
            });
        }
        Ok((0..self.ncols).map(|j| self.data[j * self.nrows + i]).collect())
    }

    /// Copy column `j` into a vector of length `nrows`.
    pub fn col(&self, j: usize) -> Result<VectorX<T>> {
        if j >= self.ncols {
            return Err(Error::IndexOutOfRange {
                index: (0, j),
                shape: self.shape(),
            });
        }
        Ok(VectorX::from_slice(&self.data[j * self.nrows..(j + 1) * self.nrows]))
    }

    /// Overwrite row `i` with `v`.
    ///
    /// Fails with [`Error::IndexOutOfRange`] if `i >= nrows`, or
    /// [`Error::DimensionMismatch`] if `v.len() != ncols`.
    ///
    /// ```
    /// use matrixx::{MatrixXd, VectorXd};
    /// let mut m = MatrixXd::zeros(3, 4);
    /// let v = VectorXd::from_slice(&[-3.1, -4.2, 5.3, 6.4]);
    /// m.set_row(2, &v).unwrap();
    /// assert_eq!(m.row(2).unwrap(), v);
    /// ```
    pub fn set_row(&mut self, i: usize, v: &VectorX<T>) -> Result<()> {
        if i >= self.nrows {
            return Err(Error::IndexOutOfRange {
                index: (i, 0),
                shape: self.shape(),
            });
        }
        if v.len() != self.ncols {
            return Err(Error::DimensionMismatch {
                expected: (self.ncols, 1),
                got: (v.len(), 1),
            });
        }
        for (j, &x) in v.iter().enumerate() {
            self.data[j * self.nrows + i] = x;
        }
        Ok(())
    }

    /// Overwrite column `j` with `v`.
    ///
    /// Fails with [`Error::IndexOutOfRange`] if `j >= ncols`, or
    /// [`Error::DimensionMismatch`] if `v.len() != nrows`.
    pub fn set_col(&mut self, j: usize, v: &VectorX<T>) -> Result<()> {
        if j >= self.ncols {
            return Err(Error::IndexOutOfRange {
                index: (0, j),
                shape: self.shape(),
            });
        }
        if v.len() != self.nrows {
            return Err(Error::DimensionMismatch {
                expected: (self.nrows, 1),
                got: (v.len(), 1),
            });
        }
        self.data[j * self.nrows..(j + 1) * self.nrows].copy_from_slice(v.as_slice());
        Ok(())
    }

    /// Swap two rows in place.
    pub fn swap_rows(&mut self, a: usize, b: usize) {
        if a != b {
            for j in 0..self.ncols {
                self.data.swap(j * self.nrows + a, j * self.nrows + b);
            }
        }
    }

    /// Swap two columns in place.
    pub fn swap_cols(&mut self, a: usize, b: usize) {
        if a != b {
            for i in 0..self.nrows {
                self.data.swap(a * self.nrows + i, b * self.nrows + i);
            }
        }
    }
}

// ── Display ─────────────────────────────────────────────────────────

impl<T: fmt::Display> fmt::Display for MatrixX<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for i in 0..self.nrows {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "[")?;
            for j in 0..self.ncols {
                if j > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{}", self.data[j * self.nrows + i])?;
            }
            write!(f, "]")?;
        }
        Ok(())
    }
}

impl<T: fmt::Display> fmt::Display for VectorX<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, x) in self.as_slice().iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", x)?;
        }
        write!(f, "]")
    }
}
