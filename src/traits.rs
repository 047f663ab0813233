use core::fmt::Debug;
use num_traits::{Float, Num, One, Zero};

/// Trait for types that can be used as matrix elements.
///
/// Blanket-implemented for all types satisfying the bounds.
/// Covers `f32`, `f64`, and all integer types.
pub trait Scalar: Copy + PartialEq + Debug + Zero + One + Num {}

impl<T: Copy + PartialEq + Debug + Zero + One + Num> Scalar for T {}

/// Trait for floating-point matrix elements.
///
/// Required by operations that need `sqrt`, `abs`, or a notion of
/// closeness: decompositions, norms, and approximate comparison.
pub trait FloatScalar: Scalar + Float {
    /// Tolerance used by `approx_eq_default`.
    ///
    /// `1e-12` for `f64`, `1e-5` for `f32`.
    fn default_epsilon() -> Self;

    /// Convert a dimension into the element type.
    fn from_usize(n: usize) -> Self;
}

macro_rules! impl_float_scalar {
    ($($t:ty => $eps:expr),*) => {
        $(
            impl FloatScalar for $t {
                #[inline] fn default_epsilon() -> $t { $eps }
                #[inline] fn from_usize(n: usize) -> $t { n as $t }
            }
        )*
    };
}

impl_float_scalar!(f32 => 1e-5, f64 => 1e-12);

/// Read-only access to a matrix-like type.
///
/// Decomposition kernels are written against this trait so they can run on
/// any column-major container.
pub trait MatrixRef<T> {
    fn nrows(&self) -> usize;
    fn ncols(&self) -> usize;
    fn get(&self, row: usize, col: usize) -> &T;
}

/// Mutable access to a matrix-like type.
///
/// Extends `MatrixRef` with mutable element access, enabling
/// in-place algorithms (bidiagonalization, QR sweeps) to work generically.
pub trait MatrixMut<T>: MatrixRef<T> {
    fn get_mut(&mut self, row: usize, col: usize) -> &mut T;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_epsilon() {
        assert_eq!(f64::default_epsilon(), 1e-12);
        assert_eq!(f32::default_epsilon(), 1e-5);
    }

    #[test]
    fn from_usize() {
        assert_eq!(f64::from_usize(7), 7.0);
        assert_eq!(f32::from_usize(3), 3.0);
    }
}
