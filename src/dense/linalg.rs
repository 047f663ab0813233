use alloc::vec;
use alloc::vec::Vec;
use core::ops::BitOr;

use crate::error::{Error, Result};
use crate::linalg::svd::{accumulate_left, accumulate_right, bidiagonal_qr, bidiagonalize};
use crate::traits::FloatScalar;

use super::vector::VectorX;
use super::MatrixX;

// ── Mode flags ──────────────────────────────────────────────────────

/// Which singular vectors to compute.
///
/// Thin factors keep `min(rows, cols)` columns, full factors are square.
/// Flags combine with `|`; asking for thin and full on the same side is
/// rejected with [`Error::InvalidMode`].
///
/// ```
/// use matrixx::SvdMode;
/// let mode = SvdMode::COMPUTE_THIN_U | SvdMode::COMPUTE_FULL_V;
/// assert!(mode.contains(SvdMode::COMPUTE_THIN_U));
/// assert!(!mode.contains(SvdMode::COMPUTE_FULL_U));
/// assert_eq!(SvdMode::default(), SvdMode::COMPUTE_THIN_U | SvdMode::COMPUTE_THIN_V);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SvdMode(u8);

impl SvdMode {
    /// Singular values only.
    pub const NONE: Self = Self(0);
    /// Left singular vectors, M×min(M,N).
    pub const COMPUTE_THIN_U: Self = Self(1);
    /// Left singular vectors, M×M.
    pub const COMPUTE_FULL_U: Self = Self(1 << 1);
    /// Right singular vectors, N×min(M,N).
    pub const COMPUTE_THIN_V: Self = Self(1 << 2);
    /// Right singular vectors, N×N.
    pub const COMPUTE_FULL_V: Self = Self(1 << 3);

    /// Whether every flag in `other` is set.
    #[inline]
    pub fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    /// Whether U is computed, thin or full.
    #[inline]
    pub fn wants_u(self) -> bool {
        self.0 & (Self::COMPUTE_THIN_U.0 | Self::COMPUTE_FULL_U.0) != 0
    }

    /// Whether V is computed, thin or full.
    #[inline]
    pub fn wants_v(self) -> bool {
        self.0 & (Self::COMPUTE_THIN_V.0 | Self::COMPUTE_FULL_V.0) != 0
    }

    fn validate(self) -> Result<()> {
        if self.contains(Self::COMPUTE_THIN_U | Self::COMPUTE_FULL_U)
            || self.contains(Self::COMPUTE_THIN_V | Self::COMPUTE_FULL_V)
        {
            return Err(Error::InvalidMode);
        }
        Ok(())
    }
}

impl Default for SvdMode {
    fn default() -> Self {
        Self::COMPUTE_THIN_U | Self::COMPUTE_THIN_V
    }
}

impl BitOr for SvdMode {
    type Output = Self;
    #[inline]
    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

// ── Settings ────────────────────────────────────────────────────────

/// Tuning knobs for [`Svd::with_settings`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SvdSettings<T> {
    /// Relative singular-value cutoff: `σᵢ <= threshold · σ_max` counts as
    /// zero in `solve`, `rank` and `pseudo_inverse`
    /// (default: `None`, meaning `ε · max(rows, cols)`).
    pub threshold: Option<T>,
    /// QR sweep budget per dimension; the budget is
    /// `max_iter_factor · max(rows, cols)` (default: 30).
    pub max_iter_factor: usize,
}

impl Default for SvdSettings<f64> {
    fn default() -> Self {
        Self {
            threshold: None,
            max_iter_factor: 30,
        }
    }
}

impl Default for SvdSettings<f32> {
    fn default() -> Self {
        Self {
            threshold: None,
            max_iter_factor: 30,
        }
    }
}

// ── Svd ─────────────────────────────────────────────────────────────

/// Singular value decomposition `A = U · Σ · Vᵀ` of an M×N matrix.
///
/// The handle owns its factors and never changes after construction; a
/// changed matrix needs a new factorization. Tall and wide inputs are both
/// supported (wide matrices are factored through their transpose).
///
/// # Example
///
/// ```
/// use matrixx::{MatrixXd, SvdMode, VectorXd};
///
/// let a = MatrixXd::from_rows(3, 2, &[
///     1.0, 0.0,
///     0.0, 1.0,
///     1.0, 1.0,
/// ]);
/// let svd = a.svd(SvdMode::COMPUTE_THIN_U | SvdMode::COMPUTE_THIN_V).unwrap();
/// assert_eq!(svd.rank(), 2);
///
/// // Least-squares fit of an inconsistent system
/// let b = VectorXd::from_slice(&[1.0, 1.0, 1.0]);
/// let x = svd.solve(&b).unwrap();
/// assert!((x[0] - 2.0 / 3.0).abs() < 1e-12);
/// assert!((x[1] - 2.0 / 3.0).abs() < 1e-12);
/// ```
#[derive(Debug, Clone)]
pub struct Svd<T> {
    u: Option<MatrixX<T>>,
    singular_values: Vec<T>,
    v: Option<MatrixX<T>>,
    nrows: usize,
    ncols: usize,
    mode: SvdMode,
    threshold: T,
}

/// Tall-matrix factorization result: `(U, σ, V, sweeps)`.
type TallFactors<T> = (Option<MatrixX<T>>, Vec<T>, Option<MatrixX<T>>, usize);

/// Factor a tall (M ≥ N) matrix in place.
///
/// `left_cols` is the number of U columns to form (`None` skips U).
fn factor_tall<T: FloatScalar>(
    mut work: MatrixX<T>,
    left_cols: Option<usize>,
    right: bool,
    max_iter: usize,
) -> Result<TallFactors<T>> {
    let (m, n) = work.shape();
    let mut diag = vec![T::zero(); n];
    let mut off_diag = vec![T::zero(); n.saturating_sub(1)];
    let mut tau_left = vec![T::zero(); n];
    let mut tau_right = vec![T::zero(); n];

    bidiagonalize(&mut work, &mut diag, &mut off_diag, &mut tau_left, &mut tau_right);

    let mut u = match left_cols {
        Some(p) => {
            let mut u = MatrixX::zeros(m, p);
            accumulate_left(&work, &tau_left, &mut u);
            u
        }
        None => MatrixX::zeros(0, 0),
    };
    let mut v = if right {
        let mut v = MatrixX::zeros(n, n);
        accumulate_right(&work, &tau_right, &mut v);
        v
    } else {
        MatrixX::zeros(0, 0)
    };

    let sweeps = bidiagonal_qr(
        &mut diag,
        &mut off_diag,
        &mut u,
        &mut v,
        left_cols.is_some(),
        right,
        max_iter,
    )?;

    Ok((left_cols.map(|_| u), diag, right.then_some(v), sweeps))
}

impl<T: FloatScalar> Svd<T> {
    /// Factor `a` with default settings.
    ///
    /// Fails with [`Error::InvalidMode`] for contradictory flags and
    /// [`Error::NumericalFailure`] if `a` holds NaN/inf or the iteration
    /// does not converge.
    pub fn new(a: &MatrixX<T>, mode: SvdMode) -> Result<Self>
    where
        SvdSettings<T>: Default,
    {
        Self::with_settings(a, mode, &SvdSettings::default())
    }

    /// Factor `a` with explicit settings.
    pub fn with_settings(a: &MatrixX<T>, mode: SvdMode, settings: &SvdSettings<T>) -> Result<Self> {
        mode.validate()?;
        if !a.is_finite() {
            return Err(Error::NumericalFailure);
        }

        let (m, n) = a.shape();
        let max_dim = m.max(n);
        let max_iter = settings.max_iter_factor * max_dim.max(1);

        // Work on A / max|aᵢⱼ| so the reflector norms neither underflow nor
        // overflow; U and V are unaffected and σ is scaled back below.
        let scale = a.max_abs();
        let work = if scale > T::zero() {
            a.map(|x| x / scale)
        } else {
            a.clone()
        };

        let (u, mut singular_values, v, sweeps) = if m >= n {
            let left_cols = if mode.contains(SvdMode::COMPUTE_FULL_U) {
                Some(m)
            } else if mode.contains(SvdMode::COMPUTE_THIN_U) {
                Some(n)
            } else {
                None
            };
            factor_tall(work, left_cols, mode.wants_v(), max_iter)?
        } else {
            // Aᵀ = U' Σ V'ᵀ  ⇒  A = V' Σ U'ᵀ
            let left_cols = if mode.contains(SvdMode::COMPUTE_FULL_V) {
                Some(n)
            } else if mode.contains(SvdMode::COMPUTE_THIN_V) {
                Some(m)
            } else {
                None
            };
            let (ut, s, vt, sweeps) = factor_tall(work.transpose(), left_cols, mode.wants_u(), max_iter)?;
            (vt, s, ut, sweeps)
        };
        if scale > T::zero() {
            for s in singular_values.iter_mut() {
                *s = *s * scale;
            }
        }

        log::debug!(
            "svd of {}x{} matrix ({:?}): {} QR sweeps",
            m,
            n,
            mode,
            sweeps
        );

        let threshold = settings
            .threshold
            .unwrap_or_else(|| T::epsilon() * T::from_usize(max_dim));

        Ok(Self {
            u,
            singular_values,
            v,
            nrows: m,
            ncols: n,
            mode,
            threshold,
        })
    }

    /// Singular values in descending order, `min(rows, cols)` of them.
    #[inline]
    pub fn singular_values(&self) -> &[T] {
        &self.singular_values
    }

    /// Left singular vectors, if the mode asked for them.
    ///
    /// M×min(M,N) when thin, M×M when full.
    #[inline]
    pub fn u(&self) -> Option<&MatrixX<T>> {
        self.u.as_ref()
    }

    /// Right singular vectors (columns), if the mode asked for them.
    ///
    /// N×min(M,N) when thin, N×N when full.
    #[inline]
    pub fn v(&self) -> Option<&MatrixX<T>> {
        self.v.as_ref()
    }

    /// Rows of the factored matrix.
    #[inline]
    pub fn nrows(&self) -> usize {
        self.nrows
    }

    /// Columns of the factored matrix.
    #[inline]
    pub fn ncols(&self) -> usize {
        self.ncols
    }

    /// Mode the factorization was computed with.
    #[inline]
    pub fn mode(&self) -> SvdMode {
        self.mode
    }

    /// Relative cutoff used by `solve`, `rank` and `pseudo_inverse`.
    #[inline]
    pub fn threshold(&self) -> T {
        self.threshold
    }

    /// Absolute cutoff: `threshold · σ_max`.
    fn cutoff(&self) -> T {
        self.threshold * self.singular_values.first().copied().unwrap_or_else(T::zero)
    }

    /// Number of singular values above the cutoff.
    pub fn rank(&self) -> usize {
        let cutoff = self.cutoff();
        self.singular_values.iter().filter(|&&s| s > cutoff).count()
    }

    /// Number of singular values above `tol · σ_max`.
    pub fn rank_with(&self, tol: T) -> usize {
        let cutoff = tol * self.singular_values.first().copied().unwrap_or_else(T::zero);
        self.singular_values.iter().filter(|&&s| s > cutoff).count()
    }

    /// 2-norm condition number `σ_max / σ_min`.
    ///
    /// Infinite when the smallest singular value is zero or the matrix is
    /// empty.
    pub fn condition_number(&self) -> T {
        match (self.singular_values.first(), self.singular_values.last()) {
            (Some(&hi), Some(&lo)) if lo > T::zero() => hi / lo,
            _ => T::infinity(),
        }
    }

    fn factors(&self) -> Result<(&MatrixX<T>, &MatrixX<T>)> {
        match (&self.u, &self.v) {
            (Some(u), Some(v)) => Ok((u, v)),
            _ => Err(Error::MissingSingularVectors),
        }
    }

    /// Least-squares solution of `A·x = b`.
    ///
    /// Computes `x = V · Σ⁺ · Uᵀ · b`, where `Σ⁺` inverts singular values
    /// above the cutoff and zeroes the rest. For rank-deficient or wide
    /// systems this is the minimum-norm least-squares solution.
    ///
    /// Fails with [`Error::DimensionMismatch`] unless `b.len() == nrows`, and
    /// [`Error::MissingSingularVectors`] if U or V was not computed.
    ///
    /// ```
    /// use matrixx::{MatrixXd, SvdMode, VectorXd};
    ///
    /// let a = MatrixXd::from_rows(2, 2, &[2.0, 0.0, 0.0, 4.0]);
    /// let svd = a.svd(SvdMode::COMPUTE_FULL_U | SvdMode::COMPUTE_FULL_V).unwrap();
    /// let x = svd.solve(&VectorXd::from_slice(&[2.0, 2.0])).unwrap();
    /// assert!(x.approx_eq_default(&VectorXd::from_slice(&[1.0, 0.5])));
    ///
    /// let values_only = a.svd(SvdMode::NONE).unwrap();
    /// assert!(values_only.solve(&VectorXd::zeros(2)).is_err());
    /// ```
    pub fn solve(&self, b: &VectorX<T>) -> Result<VectorX<T>> {
        if b.len() != self.nrows {
            return Err(Error::DimensionMismatch {
                expected: (self.nrows, 1),
                got: (b.len(), 1),
            });
        }
        let (u, v) = self.factors()?;
        let cutoff = self.cutoff();

        let mut x = vec![T::zero(); self.ncols];
        let mut used = 0usize;
        for (k, &sigma) in self.singular_values.iter().enumerate() {
            if sigma <= cutoff {
                continue;
            }
            used += 1;
            let mut coeff = T::zero();
            for r in 0..self.nrows {
                coeff = coeff + u[(r, k)] * b[r];
            }
            coeff = coeff / sigma;
            for (c, xc) in x.iter_mut().enumerate() {
                *xc = *xc + coeff * v[(c, k)];
            }
        }

        if used < self.singular_values.len() {
            log::trace!(
                "svd solve truncated {} of {} singular values (effective rank {})",
                self.singular_values.len() - used,
                self.singular_values.len(),
                used
            );
        }

        Ok(VectorX::from_vec(x))
    }

    /// Solve `A·X = B` column by column.
    ///
    /// Fails with [`Error::DimensionMismatch`] unless `b.nrows() == nrows`.
    pub fn solve_matrix(&self, b: &MatrixX<T>) -> Result<MatrixX<T>> {
        if b.nrows() != self.nrows {
            return Err(Error::DimensionMismatch {
                expected: (self.nrows, b.ncols()),
                got: b.shape(),
            });
        }
        let mut x = MatrixX::zeros(self.ncols, b.ncols());
        for j in 0..b.ncols() {
            let col = self.solve(&b.col(j)?)?;
            x.set_col(j, &col)?;
        }
        Ok(x)
    }

    /// Moore-Penrose pseudo-inverse `A⁺ = V · Σ⁺ · Uᵀ` (N×M).
    ///
    /// ```
    /// use matrixx::{MatrixXd, SvdMode};
    ///
    /// let a = MatrixXd::from_rows(2, 3, &[1.0, 0.0, 0.0, 0.0, 2.0, 0.0]);
    /// let pinv = a.svd(SvdMode::default()).unwrap().pseudo_inverse().unwrap();
    /// assert_eq!(pinv.shape(), (3, 2));
    /// assert!((pinv[(1, 1)] - 0.5).abs() < 1e-12);
    /// assert!((&(&a * &pinv) * &a).approx_eq_default(&a));
    /// ```
    pub fn pseudo_inverse(&self) -> Result<MatrixX<T>> {
        let (u, v) = self.factors()?;
        let cutoff = self.cutoff();
        let mut out = MatrixX::zeros(self.ncols, self.nrows);
        for (k, &sigma) in self.singular_values.iter().enumerate() {
            if sigma <= cutoff {
                continue;
            }
            let inv = T::one() / sigma;
            for j in 0..self.nrows {
                let ujk = u[(j, k)] * inv;
                for i in 0..self.ncols {
                    out[(i, j)] = out[(i, j)] + v[(i, k)] * ujk;
                }
            }
        }
        Ok(out)
    }
}

impl<T: FloatScalar> MatrixX<T> {
    /// Singular value decomposition with default settings.
    ///
    /// ```
    /// use matrixx::{MatrixXd, SvdMode};
    ///
    /// let a = MatrixXd::from_rows(2, 2, &[3.0, 2.0, 2.0, 3.0]);
    /// let svd = a.svd(SvdMode::COMPUTE_THIN_U | SvdMode::COMPUTE_THIN_V).unwrap();
    /// let sv = svd.singular_values();
    /// assert!((sv[0] - 5.0).abs() < 1e-12);
    /// assert!((sv[1] - 1.0).abs() < 1e-12);
    /// ```
    pub fn svd(&self, mode: SvdMode) -> Result<Svd<T>>
    where
        SvdSettings<T>: Default,
    {
        Svd::new(self, mode)
    }

    /// Singular values only, in descending order. Neither U nor V is formed.
    pub fn singular_values_only(&self) -> Result<Vec<T>>
    where
        SvdSettings<T>: Default,
    {
        Ok(Svd::new(self, SvdMode::NONE)?.singular_values)
    }
}
