//! Decompositions.
//!
//! [`Svd`] is the public handle; the kernels in `svd` operate in place on
//! any [`MatrixMut`](crate::traits::MatrixMut) container.

pub(crate) mod svd;

pub use crate::dense::{Svd, SvdMode, SvdSettings};
