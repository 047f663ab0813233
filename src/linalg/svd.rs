use crate::error::Error;
use crate::traits::{FloatScalar, MatrixMut, MatrixRef};

/// Givens rotation `(c, s)` with `c·a + s·b = ±r` and `-s·a + c·b = 0`,
/// where `r = hypot(a, b)`.
#[inline]
pub(crate) fn givens<T: FloatScalar>(a: T, b: T) -> (T, T) {
    if b == T::zero() {
        (T::one(), T::zero())
    } else if b.abs() > a.abs() {
        let t = a / b;
        let s = T::one() / (T::one() + t * t).sqrt();
        (s * t, s)
    } else {
        let t = b / a;
        let c = T::one() / (T::one() + t * t).sqrt();
        (c, c * t)
    }
}

// ── Householder bidiagonalization ───────────────────────────────────

/// Householder bidiagonalization: reduce an M×N matrix (M ≥ N) to upper
/// bidiagonal form `A = U · B · Vᵀ`.
///
/// On return:
/// - `diag[0..n]` contains the bidiagonal diagonal
/// - `off_diag[0..n-1]` contains the bidiagonal superdiagonal
/// - column `k` of `a` below the diagonal holds the tail of the `k`-th left
///   reflector (leading 1 implicit), with scale `tau_left[k]`
/// - row `k` of `a` right of `k+1` holds the tail of the `k`-th right
///   reflector (acting on coordinates `k+1..n`), with scale `tau_right[k]`
///
/// A zero scale means the reflector is the identity. The orthogonal factors
/// are formed afterwards by [`accumulate_left`] and [`accumulate_right`],
/// so callers that only need singular values never build them.
pub(crate) fn bidiagonalize<T: FloatScalar>(
    a: &mut impl MatrixMut<T>,
    diag: &mut [T],
    off_diag: &mut [T],
    tau_left: &mut [T],
    tau_right: &mut [T],
) {
    let m = a.nrows();
    let n = a.ncols();
    assert!(m >= n, "bidiagonalize requires M >= N");
    assert!(diag.len() >= n && tau_left.len() >= n && tau_right.len() >= n);
    assert!(off_diag.len() + 1 >= n);

    for k in 0..n {
        // ── Left reflector: zero out a[k+1:m, k] ──
        let mut tail_sq = T::zero();
        for i in (k + 1)..m {
            let val = *a.get(i, k);
            tail_sq = tail_sq + val * val;
        }

        if tail_sq > T::zero() {
            let akk = *a.get(k, k);
            let norm = (akk * akk + tail_sq).sqrt();
            let sigma = if akk < T::zero() { -norm } else { norm };

            let v0 = akk + sigma;
            *a.get_mut(k, k) = v0;
            for i in (k + 1)..m {
                let val = *a.get(i, k) / v0;
                *a.get_mut(i, k) = val;
            }

            let tau = v0 / sigma;

            // A[k:m, k+1:n] -= tau * v * (vᵀ * A)
            for j in (k + 1)..n {
                let mut dot = *a.get(k, j);
                for i in (k + 1)..m {
                    dot = dot + *a.get(i, k) * *a.get(i, j);
                }
                dot = dot * tau;

                *a.get_mut(k, j) = *a.get(k, j) - dot;
                for i in (k + 1)..m {
                    let vi = *a.get(i, k);
                    *a.get_mut(i, j) = *a.get(i, j) - dot * vi;
                }
            }

            tau_left[k] = tau;
            diag[k] = -sigma;
        } else {
            tau_left[k] = T::zero();
            diag[k] = *a.get(k, k);
        }

        // ── Right reflector: zero out a[k, k+2:n] ──
        if k + 2 < n {
            let mut tail_sq = T::zero();
            for j in (k + 2)..n {
                let val = *a.get(k, j);
                tail_sq = tail_sq + val * val;
            }

            if tail_sq > T::zero() {
                let ak1 = *a.get(k, k + 1);
                let norm = (ak1 * ak1 + tail_sq).sqrt();
                let sigma = if ak1 < T::zero() { -norm } else { norm };

                let v0 = ak1 + sigma;
                *a.get_mut(k, k + 1) = v0;
                for j in (k + 2)..n {
                    let val = *a.get(k, j) / v0;
                    *a.get_mut(k, j) = val;
                }

                let tau = v0 / sigma;

                // Apply from the right to rows k+1..m
                for i in (k + 1)..m {
                    let mut dot = *a.get(i, k + 1);
                    for j in (k + 2)..n {
                        dot = dot + *a.get(i, j) * *a.get(k, j);
                    }
                    dot = dot * tau;

                    *a.get_mut(i, k + 1) = *a.get(i, k + 1) - dot;
                    for j in (k + 2)..n {
                        let vj = *a.get(k, j);
                        *a.get_mut(i, j) = *a.get(i, j) - dot * vj;
                    }
                }

                tau_right[k] = tau;
                off_diag[k] = -sigma;
            } else {
                tau_right[k] = T::zero();
                off_diag[k] = *a.get(k, k + 1);
            }
        } else {
            tau_right[k] = T::zero();
            if k + 1 < n {
                off_diag[k] = *a.get(k, k + 1);
            }
        }
    }
}

/// Form the left factor `U = H₀·H₁·…·Hₙ₋₁` restricted to its first
/// `u.ncols()` columns (`n ≤ u.ncols() ≤ m`).
///
/// `u.ncols() == n` gives the thin factor, `u.ncols() == m` the full one.
/// Reflectors are applied back to front, so each only touches the columns it
/// can change.
pub(crate) fn accumulate_left<T: FloatScalar>(
    a: &impl MatrixRef<T>,
    tau_left: &[T],
    u: &mut impl MatrixMut<T>,
) {
    let m = a.nrows();
    let n = a.ncols();
    let p = u.ncols();
    assert_eq!(u.nrows(), m, "left factor must have M rows");
    assert!(p >= n && p <= m, "left factor needs between N and M columns");

    for i in 0..m {
        for j in 0..p {
            *u.get_mut(i, j) = if i == j { T::one() } else { T::zero() };
        }
    }

    for k in (0..n).rev() {
        let tau = tau_left[k];
        if tau == T::zero() {
            continue;
        }
        for j in k..p {
            let mut dot = *u.get(k, j);
            for i in (k + 1)..m {
                dot = dot + *a.get(i, k) * *u.get(i, j);
            }
            dot = dot * tau;

            *u.get_mut(k, j) = *u.get(k, j) - dot;
            for i in (k + 1)..m {
                let vi = *a.get(i, k);
                *u.get_mut(i, j) = *u.get(i, j) - dot * vi;
            }
        }
    }
}

/// Form the right factor `V = G₀·G₁·…` (N×N).
pub(crate) fn accumulate_right<T: FloatScalar>(
    a: &impl MatrixRef<T>,
    tau_right: &[T],
    v: &mut impl MatrixMut<T>,
) {
    let n = a.ncols();
    assert!(v.nrows() == n && v.ncols() == n, "right factor must be N×N");

    for i in 0..n {
        for j in 0..n {
            *v.get_mut(i, j) = if i == j { T::one() } else { T::zero() };
        }
    }

    for k in (0..n.saturating_sub(2)).rev() {
        let tau = tau_right[k];
        if tau == T::zero() {
            continue;
        }
        for j in (k + 1)..n {
            let mut dot = *v.get(k + 1, j);
            for r in (k + 2)..n {
                dot = dot + *a.get(k, r) * *v.get(r, j);
            }
            dot = dot * tau;

            *v.get_mut(k + 1, j) = *v.get(k + 1, j) - dot;
            for r in (k + 2)..n {
                let wr = *a.get(k, r);
                *v.get_mut(r, j) = *v.get(r, j) - dot * wr;
            }
        }
    }
}

// ── Golub-Kahan bidiagonal QR ───────────────────────────────────────

/// Golub-Kahan implicit-shift QR iteration on an N×N upper bidiagonal matrix.
///
/// On entry:
/// - `diag[0..n]`: bidiagonal diagonal entries
/// - `off_diag[0..n-1]`: bidiagonal superdiagonal entries
/// - `u`, `v`: factors to accumulate rotations into; only columns `0..n`
///   are touched, so `u` may be thin (M×N) or full (M×M)
/// - `compute_u`, `compute_v`: whether to actually accumulate
///
/// On return:
/// - `diag` contains non-negative singular values sorted descending
/// - `off_diag` is zeroed
///
/// Returns the number of QR sweeps, or [`Error::NumericalFailure`] once
/// `max_iter` sweeps have not deflated the matrix.
pub(crate) fn bidiagonal_qr<T: FloatScalar>(
    diag: &mut [T],
    off_diag: &mut [T],
    u: &mut impl MatrixMut<T>,
    v: &mut impl MatrixMut<T>,
    compute_u: bool,
    compute_v: bool,
    max_iter: usize,
) -> Result<usize, Error> {
    let n = diag.len();
    if n == 0 {
        return Ok(0);
    }

    let eps = T::epsilon();
    let mut bnorm = T::zero();
    for i in 0..n {
        let e = if i + 1 < n { off_diag[i].abs() } else { T::zero() };
        bnorm = bnorm.max(diag[i].abs() + e);
    }
    let zero_tol = eps * bnorm;

    let mut iter = 0usize;
    let mut hi = n - 1;

    while hi > 0 {
        // Deflation: check if trailing off_diag is negligible
        {
            let threshold = eps * (diag[hi - 1].abs() + diag[hi].abs());
            if off_diag[hi - 1].abs() <= threshold {
                off_diag[hi - 1] = T::zero();
                hi -= 1;
                continue;
            }
        }

        // Find lo: start of unreduced block
        let mut lo = hi - 1;
        while lo > 0 {
            let threshold = eps * (diag[lo - 1].abs() + diag[lo].abs());
            if off_diag[lo - 1].abs() <= threshold {
                off_diag[lo - 1] = T::zero();
                break;
            }
            lo -= 1;
        }

        iter += 1;
        if iter > max_iter {
            log::warn!("bidiagonal QR did not converge after {} sweeps", max_iter);
            return Err(Error::NumericalFailure);
        }

        // A zero on the diagonal breaks the shift. Chase the off-diagonal
        // entry in that row off the bottom with left rotations, which splits
        // the block.
        {
            let mut found_zero = false;
            for idx in lo..hi {
                if diag[idx].abs() <= zero_tol {
                    diag[idx] = T::zero();
                    let mut z = off_diag[idx];
                    off_diag[idx] = T::zero();
                    for j in (idx + 1)..=hi {
                        let (c, s) = givens(diag[j], z);
                        diag[j] = c * diag[j] + s * z;
                        if j < hi {
                            z = -(s * off_diag[j]);
                            off_diag[j] = c * off_diag[j];
                        }
                        if compute_u {
                            for row in 0..u.nrows() {
                                let uj = *u.get(row, j);
                                let ui = *u.get(row, idx);
                                *u.get_mut(row, j) = c * uj + s * ui;
                                *u.get_mut(row, idx) = c * ui - s * uj;
                            }
                        }
                    }
                    found_zero = true;
                    break;
                }
            }
            if found_zero {
                continue;
            }
        }

        // Wilkinson shift from trailing 2×2 of BᵀB
        let d_hi = diag[hi];
        let d_hi1 = diag[hi - 1];
        let e_hi1 = off_diag[hi - 1];
        let e_hi2 = if hi >= 2 && hi - 2 >= lo {
            off_diag[hi - 2]
        } else {
            T::zero()
        };

        let t11 = d_hi1 * d_hi1 + e_hi2 * e_hi2;
        let t12 = d_hi1 * e_hi1;
        let t22 = d_hi * d_hi + e_hi1 * e_hi1;

        let two = T::one() + T::one();
        let d = (t11 - t22) / two;
        let sign_d = if d >= T::zero() { T::one() } else { -T::one() };
        let mu = t22 - t12 * t12 / (d + sign_d * (d * d + t12 * t12).sqrt());

        // Implicit QR chase
        let mut x = diag[lo] * diag[lo] - mu;
        let mut z = diag[lo] * off_diag[lo];

        for k in lo..hi {
            // Right rotation on columns k, k+1
            let (c, s) = givens(x, z);

            if k > lo {
                off_diag[k - 1] = c * x + s * z;
            }

            let dk = diag[k];
            let ek = off_diag[k];
            let dk1 = diag[k + 1];

            diag[k] = c * dk + s * ek;
            off_diag[k] = c * ek - s * dk;
            let bulge = s * dk1;
            diag[k + 1] = c * dk1;

            if compute_v {
                for row in 0..v.nrows() {
                    let vk = *v.get(row, k);
                    let vk1 = *v.get(row, k + 1);
                    *v.get_mut(row, k) = c * vk + s * vk1;
                    *v.get_mut(row, k + 1) = c * vk1 - s * vk;
                }
            }

            // Left rotation on rows k, k+1: zero the bulge at B[k+1, k]
            let (c2, s2) = givens(diag[k], bulge);

            diag[k] = c2 * diag[k] + s2 * bulge;
            let old_ek = off_diag[k];
            let old_dk1 = diag[k + 1];
            off_diag[k] = c2 * old_ek + s2 * old_dk1;
            diag[k + 1] = c2 * old_dk1 - s2 * old_ek;

            if k + 1 < hi {
                // Fill-in at B[k, k+2] drives the next right rotation
                let old_ek1 = off_diag[k + 1];
                x = off_diag[k];
                z = s2 * old_ek1;
                off_diag[k + 1] = c2 * old_ek1;
            }

            if compute_u {
                for row in 0..u.nrows() {
                    let uk = *u.get(row, k);
                    let uk1 = *u.get(row, k + 1);
                    *u.get_mut(row, k) = c2 * uk + s2 * uk1;
                    *u.get_mut(row, k + 1) = c2 * uk1 - s2 * uk;
                }
            }
        }
    }

    // Make all singular values non-negative
    for i in 0..n {
        if diag[i] < T::zero() {
            diag[i] = -diag[i];
            if compute_u {
                for row in 0..u.nrows() {
                    let val = *u.get(row, i);
                    *u.get_mut(row, i) = -val;
                }
            }
        }
    }

    // Sort singular values descending, permute U and V columns
    for i in 0..n {
        let mut max_idx = i;
        for j in (i + 1)..n {
            if diag[j] > diag[max_idx] {
                max_idx = j;
            }
        }
        if max_idx != i {
            diag.swap(i, max_idx);
            if compute_u {
                swap_cols(u, i, max_idx);
            }
            if compute_v {
                swap_cols(v, i, max_idx);
            }
        }
    }

    Ok(iter)
}

fn swap_cols<T: Copy>(m: &mut impl MatrixMut<T>, a: usize, b: usize) {
    for row in 0..m.nrows() {
        let tmp = *m.get(row, a);
        *m.get_mut(row, a) = *m.get(row, b);
        *m.get_mut(row, b) = tmp;
    }
}

// ── Tests ───────────────────────────────────────────────────────────
