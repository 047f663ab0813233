//! # matrixx
//!
//! Dense, heap-allocated matrices and vectors with runtime dimensions, plus a
//! singular value decomposition that solves `A·x = b` in the least-squares
//! sense. `no_std` compatible (requires an allocator).
//!
//! ## Quick start
//!
//! ```
//! use matrixx::{MatrixXd, SvdMode, VectorXd};
//!
//! let mut a = MatrixXd::zeros(3, 3);
//! for i in 0..3 {
//!     a[(i, i)] = (i + 1) as f64;
//! }
//! let b = VectorXd::from_slice(&[1.0, 2.0, 3.0]);
//!
//! let svd = a.svd(SvdMode::COMPUTE_THIN_U | SvdMode::COMPUTE_THIN_V).unwrap();
//! let x = svd.solve(&b).unwrap();
//! assert!(a.dot_v(&x).unwrap().approx_eq_default(&b));
//! ```
//!
//! ## Modules
//!
//! - [`dense`] — [`MatrixX<T>`] and [`VectorX<T>`]. A single contiguous
//!   column-major `Vec<T>` backs every matrix; [`Order`] selects row- or
//!   column-major interpretation only when importing or exporting flat
//!   sequences. Element access, row/column extraction and injection,
//!   arithmetic, norms, exact (`==`) and approximate comparison.
//!
//! - [`linalg`] — [`Svd`]: Householder bidiagonalization followed by
//!   Golub-Kahan implicit-shift QR. Thin or full singular vectors are chosen
//!   once with [`SvdMode`]; the factorization is immutable and exposes
//!   `solve`, `pseudo_inverse`, `rank`, and `condition_number`.
//!
//! - [`storage`] — [`Order`] and flat-buffer offset/reorder helpers.
//!
//! - [`traits`] — Element trait hierarchy:
//!   - [`Scalar`] — all matrix elements (`Copy + PartialEq + Debug + Num`)
//!   - [`FloatScalar`] — real floats, used by decompositions, norms and
//!     approximate comparison
//!   - [`MatrixRef`] / [`MatrixMut`] — generic read/write access for kernels
//!
//! ## Cargo features
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `std`   | yes     | Hardware FPU via system libm, `std::error::Error` impl |
//! | `libm`  | no      | Pure-Rust software float fallback for `no_std` |
//! | `serde` | no      | `Serialize`/`Deserialize` and `to_bytes`/`from_bytes` via `bincode` |
//! | `all`   | no      | `std` + `serde` |

#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

pub mod dense;
pub mod error;
pub mod linalg;
pub mod storage;
pub mod traits;

pub use dense::{MatrixX, MatrixXd, MatrixXf, VectorX, VectorXd, VectorXf};
pub use error::{Error, Result};
pub use linalg::{Svd, SvdMode, SvdSettings};
pub use storage::Order;
pub use traits::{FloatScalar, MatrixMut, MatrixRef, Scalar};
