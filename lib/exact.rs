//! Exact diagonalization of [`Operator`]s.
//!
//! Two solvers are provided: [`lanczos_ed`], which only needs matrix-vector
//! products and finds the lowest few eigenpairs, and [`full_ed`], which
//! diagonalizes the dense matrix.
//!
//! All returned eigenvectors are normalized and carry a fixed sign: the
//! component with the largest magnitude (lowest index among ties) is positive.

use ndarray::{ self as nd, s };
use ndarray_linalg::{ EighInto, UPLO };
use rand::{ rngs::StdRng, Rng, SeedableRng };
use tracing::debug;
use crate::{ error::EdError, operator::Operator };

/// Ritz values are compared for convergence every this many iterations.
const CHECK_EVERY: usize = 10;

/// Residual norm below which the Krylov space is taken to be invariant.
const BREAKDOWN_TOL: f64 = 1e-12;

/// Output of an exact diagonalization.
#[derive(Clone, Debug, PartialEq)]
pub struct EdResult {
    /// Lowest eigenvalues in ascending order.
    pub eigenvalues: nd::Array1<f64>,
    /// Eigenvectors matching `eigenvalues`, indexed by basis index, if
    /// requested.
    pub eigenvectors: Option<Vec<nd::Array1<f64>>>,
}

impl EdResult {
    /// Number of computed eigenpairs.
    pub fn n_eigenpairs(&self) -> usize { self.eigenvalues.len() }

    /// Lowest eigenvalue.
    pub fn ground_energy(&self) -> f64 { self.eigenvalues[0] }

    /// Eigenvector of the lowest eigenvalue, if eigenvectors were computed.
    pub fn ground_state(&self) -> Option<&nd::Array1<f64>> {
        self.eigenvectors.as_ref().and_then(|vecs| vecs.first())
    }

    /// Difference between the two lowest eigenvalues, if both were computed.
    pub fn gap(&self) -> Option<f64> {
        (self.eigenvalues.len() >= 2)
            .then(|| self.eigenvalues[1] - self.eigenvalues[0])
    }
}

/// Parameters for [`lanczos_ed`].
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct LanczosParams {
    /// Maximum number of iterations; capped at the Hilbert space dimension.
    pub max_iter: usize,
    /// Relative change in the requested Ritz values below which iteration
    /// stops.
    pub precision: f64,
    /// Seed for a random start vector. `None` uses a fixed deterministic
    /// start vector.
    pub seed: Option<u64>,
    /// Apply the operator through [`Operator::apply`] instead of storing it
    /// as a sparse matrix.
    pub matrix_free: bool,
}

impl Default for LanczosParams {
    fn default() -> Self {
        Self {
            max_iter: 1000,
            precision: 1e-12,
            seed: None,
            matrix_free: false,
        }
    }
}

/// Find the `first_n` lowest eigenpairs of an operator with the Lanczos
/// algorithm.
///
/// Fewer than `first_n` pairs are returned if the Krylov space is exhausted
/// first. A single Lanczos sequence resolves only one vector of each
/// degenerate eigenspace, so excited levels may be missing copies.
pub fn lanczos_ed<O>(
    op: &O,
    first_n: usize,
    compute_eigenvectors: bool,
    params: &LanczosParams,
) -> Result<EdResult, EdError>
where O: Operator + ?Sized
{
    let dim = op.hilbert().n_states()?;
    if params.matrix_free {
        lanczos(|v| op.apply(v), dim, first_n, compute_eigenvectors, params)
    } else {
        let A = op.to_sparse()?;
        debug!(dim, nnz = A.nnz(), "built sparse operator");
        lanczos(|v| Ok(A.matvec(v)), dim, first_n, compute_eigenvectors, params)
    }
}

/// Lanczos iteration with full reorthogonalization over a generic real
/// symmetric matrix-vector product.
pub fn lanczos<F>(
    mut matvec: F,
    dim: usize,
    first_n: usize,
    compute_eigenvectors: bool,
    params: &LanczosParams,
) -> Result<EdResult, EdError>
where F: FnMut(&nd::ArrayView1<f64>) -> Result<nd::Array1<f64>, EdError>
{
    if dim == 0 || first_n == 0 { return Err(EdError::NoEigenpairs); }
    let m = params.max_iter.min(dim).max(1);
    debug!(dim, first_n, max_iter = m, "starting Lanczos");

    let mut q_vecs: Vec<nd::Array1<f64>> = Vec::with_capacity(m);
    let mut alpha: Vec<f64> = Vec::with_capacity(m);
    let mut beta: Vec<f64> = Vec::with_capacity(m);
    q_vecs.push(start_vector(dim, params.seed));

    let mut prev_ritz: Option<nd::Array1<f64>> = None;
    for j in 0..m {
        let mut w: nd::Array1<f64> = matvec(&q_vecs[j].view())?;
        let a = q_vecs[j].dot(&w);
        alpha.push(a);
        w.scaled_add(-a, &q_vecs[j]);
        if j > 0 { w.scaled_add(-beta[j - 1], &q_vecs[j - 1]); }
        for q in q_vecs.iter() {
            let overlap = q.dot(&w);
            w.scaled_add(-overlap, q);
        }
        let b = w.dot(&w).sqrt();

        let invariant = b < BREAKDOWN_TOL;
        let exhausted = j + 1 == m;
        if invariant || exhausted || (j + 1) % CHECK_EVERY == 0 {
            let (ritz, _) = tridiagonal_eigh(&alpha, &beta)?;
            let ritz = ritz.slice(s![..first_n.min(ritz.len())]).to_owned();
            let converged
                = prev_ritz.as_ref()
                .is_some_and(|prev| {
                    prev.len() == ritz.len()
                        && ritz.iter().zip(prev)
                        .all(|(e, ep)| {
                            (e - ep).abs() < params.precision * e.abs().max(1.0)
                        })
                });
            if converged || invariant || exhausted {
                debug!(
                    iterations = j + 1,
                    converged,
                    invariant,
                    ground_energy = ritz[0],
                    "finished Lanczos"
                );
                break;
            }
            prev_ritz = Some(ritz);
        }

        beta.push(b);
        w /= b;
        q_vecs.push(w);
    }

    let (E, S) = tridiagonal_eigh(&alpha, &beta)?;
    let n = first_n.min(E.len());
    let eigenvalues: nd::Array1<f64> = E.slice(s![..n]).to_owned();
    let eigenvectors: Option<Vec<nd::Array1<f64>>>
        = compute_eigenvectors.then(|| {
            (0..n)
                .map(|k| {
                    let mut v: nd::Array1<f64> = nd::Array1::zeros(dim);
                    q_vecs.iter().zip(S.column(k))
                        .for_each(|(q, &c)| { v.scaled_add(c, q); });
                    normalize_fix_sign(&mut v);
                    v
                })
                .collect()
        });
    Ok(EdResult { eigenvalues, eigenvectors })
}

/// Find the `first_n` lowest eigenpairs of an operator by diagonalizing its
/// dense matrix.
pub fn full_ed<O>(op: &O, first_n: usize, compute_eigenvectors: bool)
    -> Result<EdResult, EdError>
where O: Operator + ?Sized
{
    if first_n == 0 { return Err(EdError::NoEigenpairs); }
    let H: nd::Array2<f64> = op.to_dense()?;
    debug!(dim = H.nrows(), "starting dense diagonalization");
    let (E, V): (nd::Array1<f64>, nd::Array2<f64>)
        = H.eigh_into(UPLO::Lower)?;
    let n = first_n.min(E.len());
    let eigenvalues: nd::Array1<f64> = E.slice(s![..n]).to_owned();
    let eigenvectors: Option<Vec<nd::Array1<f64>>>
        = compute_eigenvectors.then(|| {
            (0..n)
                .map(|k| {
                    let mut v: nd::Array1<f64> = V.column(k).to_owned();
                    normalize_fix_sign(&mut v);
                    v
                })
                .collect()
        });
    Ok(EdResult { eigenvalues, eigenvectors })
}

fn start_vector(dim: usize, seed: Option<u64>) -> nd::Array1<f64> {
    let mut q: nd::Array1<f64>
        = if let Some(seed) = seed {
            let mut rng = StdRng::seed_from_u64(seed);
            (0..dim).map(|_| rng.gen_range(-1.0..1.0)).collect()
        } else {
            (0..dim)
                .map(|i| ((i as f64 + 1.0) * 0.618033988749895).fract() - 0.5)
                .collect()
        };
    normalize_fix_sign(&mut q);
    q
}

fn tridiagonal_eigh(alpha: &[f64], beta: &[f64])
    -> Result<(nd::Array1<f64>, nd::Array2<f64>), EdError>
{
    let k = alpha.len();
    let mut T: nd::Array2<f64> = nd::Array2::zeros((k, k));
    for (i, &a) in alpha.iter().enumerate() {
        T[[i, i]] = a;
        if i > 0 {
            T[[i, i - 1]] = beta[i - 1];
            T[[i - 1, i]] = beta[i - 1];
        }
    }
    Ok(T.eigh_into(UPLO::Lower)?)
}

/// Normalize `v` and flip its sign so that its largest-magnitude component is
/// positive.
pub fn normalize_fix_sign(v: &mut nd::Array1<f64>) {
    let norm = v.dot(&*v).sqrt();
    if norm > 0.0 { *v /= norm; }
    let (pivot, _)
        = v.iter().enumerate()
        .fold((0, 0.0_f64), |(imax, amax), (i, x)| {
            if x.abs() > amax { (i, x.abs()) } else { (imax, amax) }
        });
    if v.get(pivot).is_some_and(|&x| x < 0.0) {
        v.mapv_inplace(|x| -x);
    }
}
