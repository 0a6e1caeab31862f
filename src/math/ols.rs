//! Multivariate least squares with coefficient significance.
//!
//! Backward elimination only needs a p-value per design column, so the solver
//! sits behind the small `LeastSquares` trait. The default implementation
//! solves
//!
//! ```text
//! minimize Σ (y_i - x_i^T β)^2
//! ```
//!
//! with an SVD of the design matrix, then derives
//!
//! - `σ̂² = SSE / (n - p)`
//! - `SE(β_j) = sqrt(σ̂² · [(XᵀX)⁻¹]_jj)`, with `(XᵀX)⁻¹ = V Σ⁻² Vᵀ`
//! - two-sided Student-t p-values with `n - p` degrees of freedom.
//!
//! Rank deficiency (duplicate or collinear columns) is reported as
//! `SingularMatrix` rather than solved through a pseudo-inverse.

use nalgebra::{DMatrix, DVector};

use crate::error::ModelError;
use crate::math::special::student_t_two_sided;

/// Smallest accepted ratio between the smallest and largest singular value.
const RANK_TOL: f64 = 1e-10;

/// Per-column results of one least-squares solve, in design column order.
#[derive(Debug, Clone, PartialEq)]
pub struct OlsFit {
    pub coefficients: Vec<f64>,
    pub std_errors: Vec<f64>,
    pub t_values: Vec<f64>,
    pub p_values: Vec<f64>,
    pub df_resid: usize,
    pub sse: f64,
}

/// A least-squares routine producing per-column significance.
pub trait LeastSquares {
    /// Solve `y ≈ Xβ` for the given design (`n × p`) and target (`n`).
    ///
    /// On `SingularMatrix` the column list may be left empty; callers that know
    /// the column names fill it in.
    fn solve(&self, x: &DMatrix<f64>, y: &DVector<f64>) -> Result<OlsFit, ModelError>;
}

/// SVD-backed OLS.
#[derive(Debug, Clone, Copy, Default)]
pub struct SvdSolver;

impl LeastSquares for SvdSolver {
    fn solve(&self, x: &DMatrix<f64>, y: &DVector<f64>) -> Result<OlsFit, ModelError> {
        let (n, p) = x.shape();
        if y.len() != n {
            return Err(ModelError::LengthMismatch {
                left: n,
                right: y.len(),
            });
        }
        if p == 0 || n <= p {
            return Err(ModelError::InsufficientData { rows: n, columns: p });
        }

        let svd = x.clone().svd(true, true);
        let s_max = svd.singular_values.iter().copied().fold(0.0, f64::max);
        let s_min = svd.singular_values.iter().copied().fold(f64::INFINITY, f64::min);
        if !(s_max > 0.0 && s_min > RANK_TOL * s_max) {
            return Err(ModelError::SingularMatrix { columns: Vec::new() });
        }

        let beta = svd
            .solve(y, RANK_TOL * s_max)
            .map_err(|_| ModelError::SingularMatrix { columns: Vec::new() })?;
        if !beta.iter().all(|v| v.is_finite()) {
            return Err(ModelError::SingularMatrix { columns: Vec::new() });
        }
        let v_t = svd
            .v_t
            .as_ref()
            .ok_or_else(|| ModelError::SingularMatrix { columns: Vec::new() })?;

        let resid = y - x * &beta;
        let sse = resid.norm_squared();
        let df_resid = n - p;
        let sigma2 = sse / df_resid as f64;

        let mut std_errors = Vec::with_capacity(p);
        let mut t_values = Vec::with_capacity(p);
        let mut p_values = Vec::with_capacity(p);
        for j in 0..p {
            let cov_jj: f64 = svd
                .singular_values
                .iter()
                .enumerate()
                .map(|(k, s)| v_t[(k, j)] * v_t[(k, j)] / (s * s))
                .sum();
            let se = (sigma2 * cov_jj).sqrt();
            let t = match (beta[j] == 0.0, se > 0.0) {
                (true, _) => 0.0,
                (false, true) => beta[j] / se,
                (false, false) => beta[j].signum() * f64::INFINITY,
            };
            std_errors.push(se);
            t_values.push(t);
            p_values.push(student_t_two_sided(t, df_resid as f64));
        }

        Ok(OlsFit {
            coefficients: beta.iter().copied().collect(),
            std_errors,
            t_values,
            p_values,
            df_resid,
            sse,
        })
    }
}
