//! Flat-buffer layout.
//!
//! Every matrix is a single contiguous buffer. Internally `MatrixX` is always
//! column-major; [`Order`] only matters when a flat sequence crosses the
//! import/export boundary.

use alloc::vec::Vec;

/// Interpretation of a flat element sequence.
///
/// ```
/// use matrixx::Order;
///
/// // 2x3 matrix, element (1, 2)
/// assert_eq!(Order::RowMajor.offset(2, 3, 1, 2), 5);
/// assert_eq!(Order::ColMajor.offset(2, 3, 1, 2), 5);
/// assert_eq!(Order::RowMajor.offset(2, 3, 1, 0), 3);
/// assert_eq!(Order::ColMajor.offset(2, 3, 1, 0), 1);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Order {
    /// Consecutive positions walk along a row: `(i, j)` at `i * ncols + j`.
    #[default]
    RowMajor,
    /// Consecutive positions walk down a column: `(i, j)` at `j * nrows + i`.
    ColMajor,
}

impl Order {
    /// Offset of element `(row, col)` in an `nrows x ncols` buffer.
    #[inline]
    pub fn offset(self, nrows: usize, ncols: usize, row: usize, col: usize) -> usize {
        match self {
            Order::RowMajor => row * ncols + col,
            Order::ColMajor => col * nrows + row,
        }
    }

    /// The other order.
    #[inline]
    pub fn flipped(self) -> Self {
        match self {
            Order::RowMajor => Order::ColMajor,
            Order::ColMajor => Order::RowMajor,
        }
    }
}

/// Copy an `nrows x ncols` buffer laid out in `from` order into `to` order.
///
/// Panics if `src.len() != nrows * ncols`.
///
/// ```
/// use matrixx::storage::reorder;
/// use matrixx::Order;
///
/// // [[1, 2, 3], [4, 5, 6]]
/// let row_major = [1, 2, 3, 4, 5, 6];
/// let col_major = reorder(&row_major, 2, 3, Order::RowMajor, Order::ColMajor);
/// assert_eq!(col_major, vec![1, 4, 2, 5, 3, 6]);
/// ```
pub fn reorder<T: Copy>(src: &[T], nrows: usize, ncols: usize, from: Order, to: Order) -> Vec<T> {
    assert_eq!(
        src.len(),
        nrows * ncols,
        "slice length {} does not match {}x{} buffer",
        src.len(),
        nrows,
        ncols,
    );
    if from == to {
        return src.to_vec();
    }
    let mut out = Vec::with_capacity(src.len());
    match to {
        Order::RowMajor => {
            for i in 0..nrows {
                for j in 0..ncols {
                    out.push(src[from.offset(nrows, ncols, i, j)]);
                }
            }
        }
        Order::ColMajor => {
            for j in 0..ncols {
                for i in 0..nrows {
                    out.push(src[from.offset(nrows, ncols, i, j)]);
                }
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    #[test]
    fn default_is_row_major() {
        assert_eq!(Order::default(), Order::RowMajor);
    }

    #[test]
    fn flipped() {
        assert_eq!(Order::RowMajor.flipped(), Order::ColMajor);
        assert_eq!(Order::ColMajor.flipped(), Order::RowMajor);
    }

    #[test]
    fn reorder_identity() {
        let src = [1.0, 2.0, 3.0, 4.0];
        assert_eq!(reorder(&src, 2, 2, Order::ColMajor, Order::ColMajor), src.to_vec());
    }

    #[test]
    fn reorder_col_to_row() {
        // col-major [[1, 3, 5], [2, 4, 6]]
        let src = [1, 2, 3, 4, 5, 6];
        let out = reorder(&src, 2, 3, Order::ColMajor, Order::RowMajor);
        assert_eq!(out, vec![1, 3, 5, 2, 4, 6]);
        let back = reorder(&out, 2, 3, Order::RowMajor, Order::ColMajor);
        assert_eq!(back, src.to_vec());
    }

    #[test]
    fn reorder_single_row() {
        let src = [7, 8, 9];
        assert_eq!(reorder(&src, 1, 3, Order::RowMajor, Order::ColMajor), vec![7, 8, 9]);
    }

    #[test]
    #[should_panic(expected = "slice length")]
    fn reorder_wrong_length() {
        let _ = reorder(&[1, 2, 3], 2, 2, Order::RowMajor, Order::ColMajor);
    }
}
