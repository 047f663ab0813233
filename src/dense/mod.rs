mod compare;
mod linalg;
mod norm;
mod ops;
#[cfg(feature = "serde")]
mod serde_impl;
mod util;
mod vector;

pub use linalg::{Svd, SvdMode, SvdSettings};
pub use vector::VectorX;

use alloc::vec;
use alloc::vec::Vec;
use core::ops::{Index, IndexMut};

use crate::error::{Error, Result};
use crate::storage::{reorder, Order};
use crate::traits::{MatrixMut, MatrixRef, Scalar};

/// `MatrixX<f64>`.
pub type MatrixXd = MatrixX<f64>;
/// `MatrixX<f32>`.
pub type MatrixXf = MatrixX<f32>;
/// `VectorX<f64>`.
pub type VectorXd = VectorX<f64>;
/// `VectorX<f32>`.
pub type VectorXf = VectorX<f32>;

/// Dynamically-sized dense matrix.
///
/// One contiguous column-major `Vec<T>` of length `nrows * ncols`.
/// Dimensions are fixed at construction; `(i, j)` always means row `i`,
/// column `j`. Row- or column-major interpretation only applies to
/// [`from_slice_ordered`](Self::from_slice_ordered) and
/// [`to_vec_ordered`](Self::to_vec_ordered).
///
/// `Clone` is a deep copy: a clone never shares storage with its source.
///
/// # Examples
///
/// ```
/// use matrixx::{MatrixXd, Order};
///
/// let a = MatrixXd::from_slice_ordered(&[1.0, 2.0, 3.0, 4.0], 2, 2, Order::RowMajor).unwrap();
/// assert_eq!(a[(0, 1)], 2.0);
/// assert_eq!(a.nrows(), 2);
/// assert_eq!(a.ncols(), 2);
///
/// let b = MatrixXd::identity(3, 3);
/// assert_eq!(b[(0, 0)], 1.0);
/// assert_eq!(b[(0, 1)], 0.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct MatrixX<T> {
    data: Vec<T>,
    nrows: usize,
    ncols: usize,
}

// ── Constructors ────────────────────────────────────────────────────

impl<T: Scalar> MatrixX<T> {
    /// Create an `nrows x ncols` matrix.
    ///
    /// Elements start at zero; there is no uninitialized state.
    ///
    /// ```
    /// use matrixx::MatrixXd;
    /// let m = MatrixXd::new(2, 3);
    /// assert_eq!(m.nrows(), 2);
    /// assert_eq!(m.ncols(), 3);
    /// assert_eq!(m.size(), 6);
    /// ```
    pub fn new(nrows: usize, ncols: usize) -> Self {
        Self::zeros(nrows, ncols)
    }

    /// Create an `nrows x ncols` matrix filled with zeros.
    ///
    /// ```
    /// use matrixx::MatrixXd;
    /// let m = MatrixXd::zeros(2, 3);
    /// assert_eq!(m[(1, 2)], 0.0);
    /// ```
    pub fn zeros(nrows: usize, ncols: usize) -> Self {
        Self::fill(nrows, ncols, T::zero())
    }

    /// Create a matrix filled with a given value.
    ///
    /// ```
    /// use matrixx::MatrixXd;
    /// let m = MatrixXd::fill(2, 3, 7.0);
    /// assert_eq!(m[(0, 0)], 7.0);
    /// assert_eq!(m[(1, 2)], 7.0);
    /// ```
    pub fn fill(nrows: usize, ncols: usize, value: T) -> Self {
        Self {
            data: vec![value; nrows * ncols],
            nrows,
            ncols,
        }
    }

    /// Create a matrix with ones on the main diagonal (`i == j`) and zeros
    /// elsewhere. Non-square shapes carry `min(nrows, ncols)` ones.
    ///
    /// ```
    /// use matrixx::MatrixXd;
    /// let id = MatrixXd::identity(2, 3);
    /// assert_eq!(id[(0, 0)], 1.0);
    /// assert_eq!(id[(1, 1)], 1.0);
    /// assert_eq!(id[(0, 2)], 0.0);
    /// ```
    pub fn identity(nrows: usize, ncols: usize) -> Self {
        let mut m = Self::zeros(nrows, ncols);
        for i in 0..nrows.min(ncols) {
            m[(i, i)] = T::one();
        }
        m
    }

    /// Create a matrix from a flat sequence interpreted in `order`.
    ///
    /// Fails with [`Error::DimensionMismatch`] unless
    /// `values.len() == nrows * ncols`.
    ///
    /// ```
    /// use matrixx::{MatrixXd, Order};
    /// let values = [0.0, 1.0, 2.0, 3.0];
    ///
    /// let r = MatrixXd::from_slice_ordered(&values, 2, 2, Order::RowMajor).unwrap();
    /// assert_eq!(r[(0, 1)], 1.0);
    /// assert_eq!(r[(1, 0)], 2.0);
    ///
    /// let c = MatrixXd::from_slice_ordered(&values, 2, 2, Order::ColMajor).unwrap();
    /// assert_eq!(c[(1, 0)], 1.0);
    /// assert_eq!(c[(0, 1)], 2.0);
    /// ```
    pub fn from_slice_ordered(values: &[T], nrows: usize, ncols: usize, order: Order) -> Result<Self> {
        if values.len() != nrows * ncols {
            return Err(Error::DimensionMismatch {
                expected: (nrows * ncols, 1),
                got: (values.len(), 1),
            });
        }
        Ok(Self {
            data: reorder(values, nrows, ncols, order, Order::ColMajor),
            nrows,
            ncols,
        })
    }

    /// Create a matrix from a flat row-major slice.
    ///
    /// Panics if `values.len() != nrows * ncols`; see
    /// [`from_slice_ordered`](Self::from_slice_ordered) for the checked form.
    ///
    /// ```
    /// use matrixx::MatrixXd;
    /// let m = MatrixXd::from_rows(2, 3, &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
    /// assert_eq!(m[(0, 2)], 3.0);
    /// assert_eq!(m[(1, 0)], 4.0);
    /// ```
    pub fn from_rows(nrows: usize, ncols: usize, row_major: &[T]) -> Self {
        assert_eq!(
            row_major.len(),
            nrows * ncols,
            "slice length {} does not match {}x{} matrix",
            row_major.len(),
            nrows,
            ncols,
        );
        Self {
            data: reorder(row_major, nrows, ncols, Order::RowMajor, Order::ColMajor),
            nrows,
            ncols,
        }
    }

    /// Overwrite this matrix from a flat sequence interpreted in `order`.
    ///
    /// The matrix takes the shape `nrows x ncols`. On error the matrix is
    /// left unchanged.
    ///
    /// ```
    /// use matrixx::{MatrixXd, Order};
    /// let mut m = MatrixXd::new(2, 3);
    /// m.set_from_slice(&[0.0, 1.0, 2.0, 3.0, 4.0, 5.0], 2, 3, Order::ColMajor).unwrap();
    /// assert_eq!(m[(1, 0)], 1.0);
    /// assert_eq!(m[(0, 1)], 2.0);
    /// assert_eq!(m[(1, 2)], 5.0);
    /// ```
    pub fn set_from_slice(&mut self, values: &[T], nrows: usize, ncols: usize, order: Order) -> Result<()> {
        *self = Self::from_slice_ordered(values, nrows, ncols, order)?;
        Ok(())
    }

    /// Reset every element to zero, keeping the shape.
    pub fn set_zero(&mut self) {
        for x in self.data.iter_mut() {
            *x = T::zero();
        }
    }

    /// Reset to the identity pattern, keeping the shape.
    ///
    /// ```
    /// use matrixx::MatrixXd;
    /// let mut m = MatrixXd::fill(2, 2, 5.0);
    /// m.set_identity();
    /// assert_eq!(m, MatrixXd::identity(2, 2));
    /// ```
    pub fn set_identity(&mut self) {
        self.set_zero();
        for i in 0..self.nrows.min(self.ncols) {
            self[(i, i)] = T::one();
        }
    }

    /// Checked element read.
    ///
    /// ```
    /// use matrixx::MatrixXd;
    /// let m = MatrixXd::identity(2, 2);
    /// assert_eq!(m.get(1, 1).unwrap(), 1.0);
    /// assert!(m.get(0, 2).is_err());
    /// ```
    pub fn get(&self, row: usize, col: usize) -> Result<T> {
        self.check_index(row, col)?;
        Ok(self[(row, col)])
    }

    /// Checked element write.
    pub fn set(&mut self, row: usize, col: usize, value: T) -> Result<()> {
        self.check_index(row, col)?;
        self[(row, col)] = value;
        Ok(())
    }

    /// Independent deep copy. Equivalent to `clone()`.
    pub fn duplicate(&self) -> Self {
        self.clone()
    }

    /// Create a matrix from an owned column-major buffer.
    pub(crate) fn from_col_major(nrows: usize, ncols: usize, data: Vec<T>) -> Self {
        debug_assert_eq!(data.len(), nrows * ncols);
        Self { data, nrows, ncols }
    }

    fn check_index(&self, row: usize, col: usize) -> Result<()> {
        if row >= self.nrows || col >= self.ncols {
            return Err(Error::IndexOutOfRange {
                index: (row, col),
                shape: (self.nrows, self.ncols),
            });
        }
        Ok(())
    }
}

impl<T> MatrixX<T> {
    /// Number of rows.
    #[inline]
    pub fn nrows(&self) -> usize {
        self.nrows
    }

    /// Number of columns.
    #[inline]
    pub fn ncols(&self) -> usize {
        self.ncols
    }

    /// Total number of elements, `nrows * ncols`.
    #[inline]
    pub fn size(&self) -> usize {
        self.data.len()
    }

    /// `(nrows, ncols)`.
    #[inline]
    pub fn shape(&self) -> (usize, usize) {
        (self.nrows, self.ncols)
    }

    /// Whether the matrix is square.
    #[inline]
    pub fn is_square(&self) -> bool {
        self.nrows == self.ncols
    }

    /// The backing buffer in column-major order.
    #[inline]
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    /// The backing buffer in column-major order, mutable.
    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.data
    }

    /// Create a matrix by calling `f(row, col)` for each element.
    ///
    /// ```
    /// use matrixx::MatrixXd;
    /// let m = MatrixXd::from_fn(3, 3, |i, j| if i == j { 1.0 } else { 0.0 });
    /// assert_eq!(m[(0, 0)], 1.0);
    /// assert_eq!(m[(0, 1)], 0.0);
    /// ```
    pub fn from_fn(nrows: usize, ncols: usize, f: impl Fn(usize, usize) -> T) -> Self {
        let mut data = Vec::with_capacity(nrows * ncols);
        for j in 0..ncols {
            for i in 0..nrows {
                data.push(f(i, j));
            }
        }
        Self { data, nrows, ncols }
    }
}

// ── MatrixRef / MatrixMut ───────────────────────────────────────────

impl<T> MatrixRef<T> for MatrixX<T> {
    #[inline]
    fn nrows(&self) -> usize {
        self.nrows
    }

    #[inline]
    fn ncols(&self) -> usize {
        self.ncols
    }

    #[inline]
    fn get(&self, row: usize, col: usize) -> &T {
        &self.data[col * self.nrows + row]
    }
}

impl<T> MatrixMut<T> for MatrixX<T> {
    #[inline]
    fn get_mut(&mut self, row: usize, col: usize) -> &mut T {
        &mut self.data[col * self.nrows + row]
    }
}

// ── Index ───────────────────────────────────────────────────────────

impl<T> Index<(usize, usize)> for MatrixX<T> {
    type Output = T;

    #[inline]
    fn index(&self, (row, col): (usize, usize)) -> &T {
        assert!(
            row < self.nrows && col < self.ncols,
            "index ({}, {}) out of range for {}x{} matrix",
            row, col, self.nrows, self.ncols,
        );
        &self.data[col * self.nrows + row]
    }
}

impl<T> IndexMut<(usize, usize)> for MatrixX<T> {
    #[inline]
    fn index_mut(&mut self, (row, col): (usize, usize)) -> &mut T {
        assert!(
            row < self.nrows && col < self.ncols,
            "index ({}, {}) out of range for {}x{} matrix",
            row, col, self.nrows, self.ncols,
        );
        &mut self.data[col * self.nrows + row]
    }
}
