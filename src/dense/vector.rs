use alloc::vec::Vec;
use core::ops::{Index, IndexMut};

use crate::error::{Error, Result};
use crate::traits::{MatrixMut, MatrixRef, Scalar};

use super::MatrixX;

/// Dynamically-sized column vector (wraps an N×1 `MatrixX`).
///
/// The length is fixed at construction. Mutation changes element values
/// only; [`resize`](Self::resize) replaces the whole value.
///
/// # Examples
///
/// ```
/// use matrixx::VectorXd;
///
/// let v = VectorXd::from_slice(&[1.0, 2.0, 3.0]);
/// assert_eq!(v[0], 1.0);
/// assert_eq!(v.len(), 3);
/// assert!((v.dot(&v) - 14.0).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct VectorX<T> {
    pub(crate) inner: MatrixX<T>,
}

impl<T: Scalar> VectorX<T> {
    /// Create a vector of length `n`, zero-filled.
    pub fn new(n: usize) -> Self {
        Self::zeros(n)
    }

    /// Create a zero vector of length `n`.
    ///
    /// ```
    /// use matrixx::VectorXd;
    /// let v = VectorXd::zeros(4);
    /// assert_eq!(v.len(), 4);
    /// assert_eq!(v[3], 0.0);
    /// ```
    pub fn zeros(n: usize) -> Self {
        Self {
            inner: MatrixX::zeros(n, 1),
        }
    }

    /// Create a vector filled with a value.
    pub fn fill(n: usize, value: T) -> Self {
        Self {
            inner: MatrixX::fill(n, 1, value),
        }
    }

    /// Create a vector from a flat slice.
    ///
    /// ```
    /// use matrixx::VectorXd;
    /// let v = VectorXd::from_slice(&[1.0, 2.0, 3.0]);
    /// assert_eq!(v[2], 3.0);
    /// ```
    pub fn from_slice(data: &[T]) -> Self {
        Self::from_vec(data.to_vec())
    }

    /// Create a vector from an owned `Vec`.
    pub fn from_vec(data: Vec<T>) -> Self {
        let n = data.len();
        Self {
            inner: MatrixX::from_col_major(n, 1, data),
        }
    }

    /// Checked element read.
    ///
    /// ```
    /// use matrixx::VectorXd;
    /// let v = VectorXd::from_slice(&[1.0, 2.0]);
    /// assert_eq!(v.get(1).unwrap(), 2.0);
    /// assert!(v.get(2).is_err());
    /// ```
    pub fn get(&self, i: usize) -> Result<T> {
        self.check_index(i)?;
        Ok(self.inner.as_slice()[i])
    }

    /// Checked element write.
    pub fn set(&mut self, i: usize, value: T) -> Result<()> {
        self.check_index(i)?;
        self.inner.as_mut_slice()[i] = value;
        Ok(())
    }

    /// Replace this vector with a zero vector of length `n`.
    pub fn resize(&mut self, n: usize) {
        *self = Self::zeros(n);
    }

    /// Copy the elements out in index order.
    pub fn to_vec(&self) -> Vec<T> {
        self.as_slice().to_vec()
    }

    /// The vector as an N×1 matrix.
    pub fn to_matrix(&self) -> MatrixX<T> {
        self.inner.clone()
    }

    fn check_index(&self, i: usize) -> Result<()> {
        if i >= self.len() {
            return Err(Error::IndexOutOfRange {
                index: (i, 0),
                shape: (self.len(), 1),
            });
        }
        Ok(())
    }
}

impl<T> VectorX<T> {
    /// Number of elements.
    #[inline]
    pub fn len(&self) -> usize {
        self.inner.nrows()
    }

    /// Whether the vector is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// View the vector data as a slice.
    #[inline]
    pub fn as_slice(&self) -> &[T] {
        self.inner.as_slice()
    }

    /// View the vector data as a mutable slice.
    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        self.inner.as_mut_slice()
    }

    /// Iterate over the elements in index order.
    ///
    /// Each call starts a fresh iterator.
    #[inline]
    pub fn iter(&self) -> core::slice::Iter<'_, T> {
        self.as_slice().iter()
    }

    /// Iterate mutably over the elements in index order.
    #[inline]
    pub fn iter_mut(&mut self) -> core::slice::IterMut<'_, T> {
        self.as_mut_slice().iter_mut()
    }
}

// ── Index ───────────────────────────────────────────────────────────

impl<T> Index<usize> for VectorX<T> {
    type Output = T;

    #[inline]
    fn index(&self, i: usize) -> &T {
        &self.inner[(i, 0)]
    }
}

impl<T> IndexMut<usize> for VectorX<T> {
    #[inline]
    fn index_mut(&mut self, i: usize) -> &mut T {
        &mut self.inner[(i, 0)]
    }
}

// ── MatrixRef / MatrixMut ───────────────────────────────────────────

impl<T> MatrixRef<T> for VectorX<T> {
    #[inline]
    fn nrows(&self) -> usize {
        self.inner.nrows()
    }

    #[inline]
    fn ncols(&self) -> usize {
        1
    }

    #[inline]
    fn get(&self, row: usize, col: usize) -> &T {
        MatrixRef::get(&self.inner, row, col)
    }
}

impl<T> MatrixMut<T> for VectorX<T> {
    #[inline]
    fn get_mut(&mut self, row: usize, col: usize) -> &mut T {
        self.inner.get_mut(row, col)
    }
}

// ── Conversions ─────────────────────────────────────────────────────

impl<T: Scalar> FromIterator<T> for VectorX<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::from_vec(iter.into_iter().collect())
    }
}

impl<'a, T> IntoIterator for &'a VectorX<T> {
    type Item = &'a T;
    type IntoIter = core::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T: Scalar> From<Vec<T>> for VectorX<T> {
    fn from(data: Vec<T>) -> Self {
        Self::from_vec(data)
    }
}

impl<T: Scalar> From<VectorX<T>> for MatrixX<T> {
    fn from(v: VectorX<T>) -> Self {
        v.inner
    }
}
