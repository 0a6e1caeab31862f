//! Backward elimination driven by coefficient p-values.
//!
//! The procedure is a small state machine:
//!
//! ```text
//! Fitting -> Evaluating -> (Pruning -> Fitting) | Done
//! ```
//!
//! - `Fitting`: least-squares solve over the live columns (intercept first)
//! - `Evaluating`: find the non-intercept column with the largest p-value
//! - `Pruning`: if that p-value exceeds the threshold, mark the column dead
//! - `Done`: every remaining feature passes, or only the intercept is left
//!
//! Selection rules:
//! 1. The intercept (`const`) is never a pruning candidate.
//! 2. Ties on the largest p-value remove the column that comes first in
//!    definition order.
//! 3. Significance is recomputed from scratch after every removal.
//!
//! Each prune kills one column, so the number of fits is bounded by the
//! initial feature count plus one.

use nalgebra::{DMatrix, DVector};
use serde::Serialize;

use crate::domain::{DEFAULT_THRESHOLD, FeatureMatrix, INTERCEPT, ensure_finite};
use crate::error::ModelError;
use crate::math::{LeastSquares, SvdSolver};

/// Options for backward elimination.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SelectionOptions {
    /// Columns whose p-value is strictly above this are pruned.
    pub threshold: f64,
}

impl Default for SelectionOptions {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
        }
    }
}

/// Fit statistics for one design column.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColumnScore {
    pub name: String,
    pub coefficient: f64,
    pub std_error: f64,
    pub p_value: f64,
}

/// Per-column significance from a single fit, in design column order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Significance {
    pub columns: Vec<ColumnScore>,
    pub df_resid: usize,
}

impl Significance {
    pub fn p_value(&self, name: &str) -> Option<f64> {
        self.columns.iter().find(|c| c.name == name).map(|c| c.p_value)
    }

    /// First feature (never the intercept) holding the largest p-value.
    fn least_significant(&self) -> Option<&ColumnScore> {
        let mut worst: Option<&ColumnScore> = None;
        for score in self.columns.iter().filter(|c| c.name != INTERCEPT) {
            // Strict comparison keeps the earliest column on ties.
            if worst.is_none_or(|w| score.p_value > w.p_value) {
                worst = Some(score);
            }
        }
        worst
    }
}

/// One pruning decision.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EliminationStep {
    /// 1-based index of the fit that triggered the removal.
    pub fit: usize,
    pub removed: String,
    pub p_value: f64,
}

/// The surviving design: intercept first, then kept features in original order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReducedDesign {
    pub names: Vec<String>,
    #[serde(skip_serializing)]
    pub columns: Vec<Vec<f64>>,
}

impl ReducedDesign {
    pub fn features(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str).filter(|n| *n != INTERCEPT)
    }
}

/// Outcome of backward elimination.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Elimination {
    pub design: ReducedDesign,
    /// Significance of the final fit over `design`.
    pub significance: Significance,
    pub steps: Vec<EliminationStep>,
    pub fits: usize,
    pub threshold: f64,
}

#[derive(Debug)]
struct ColumnSlot {
    name: String,
    values: Vec<f64>,
    live: bool,
}

/// Column arena with liveness flags; slot 0 is the intercept.
#[derive(Debug)]
struct ColumnArena {
    slots: Vec<ColumnSlot>,
    n_rows: usize,
}

impl ColumnArena {
    fn new(features: &FeatureMatrix, n_rows: usize) -> Self {
        let mut slots = Vec::with_capacity(features.n_features() + 1);
        slots.push(ColumnSlot {
            name: INTERCEPT.to_string(),
            values: vec![1.0; n_rows],
            live: true,
        });
        for (name, col) in features.names().iter().zip(features.columns()) {
            slots.push(ColumnSlot {
                name: name.clone(),
                values: col.clone(),
                live: true,
            });
        }
        Self { slots, n_rows }
    }

    fn live(&self) -> impl Iterator<Item = &ColumnSlot> {
        self.slots.iter().filter(|s| s.live)
    }

    fn live_names(&self) -> Vec<String> {
        self.live().map(|s| s.name.clone()).collect()
    }

    fn design_matrix(&self) -> DMatrix<f64> {
        let live: Vec<&ColumnSlot> = self.live().collect();
        DMatrix::from_fn(self.n_rows, live.len(), |i, j| live[j].values[i])
    }

    fn kill(&mut self, name: &str) {
        if let Some(slot) = self.slots.iter_mut().find(|s| s.live && s.name == name) {
            slot.live = false;
        }
    }

    fn into_design(self) -> ReducedDesign {
        let (names, columns) = self
            .slots
            .into_iter()
            .filter(|s| s.live)
            .map(|s| (s.name, s.values))
            .unzip();
        ReducedDesign { names, columns }
    }
}

enum State {
    Fitting,
    Evaluating(Significance),
    Done(Significance),
}

/// Backward elimination with the default SVD solver.
pub fn backward_elimination(
    features: &FeatureMatrix,
    target: &[f64],
    opts: SelectionOptions,
) -> Result<Elimination, ModelError> {
    backward_elimination_with(&SvdSolver, features, target, opts)
}

/// Backward elimination with a caller-supplied least-squares routine.
pub fn backward_elimination_with<S: LeastSquares>(
    solver: &S,
    features: &FeatureMatrix,
    target: &[f64],
    opts: SelectionOptions,
) -> Result<Elimination, ModelError> {
    validate(features, target, opts)?;
    let y = DVector::from_column_slice(target);
    let mut arena = ColumnArena::new(features, target.len());
    let mut steps = Vec::new();
    let mut fits = 0;
    let mut state = State::Fitting;

    loop {
        state = match state {
            State::Fitting => {
                fits += 1;
                State::Evaluating(refit(solver, &arena, &y)?)
            }
            State::Evaluating(significance) => {
                let prune = significance
                    .least_significant()
                    .filter(|worst| worst.p_value > opts.threshold)
                    .map(|worst| (worst.name.clone(), worst.p_value));
                match prune {
                    Some((removed, p_value)) => {
                        arena.kill(&removed);
                        steps.push(EliminationStep {
                            fit: fits,
                            removed,
                            p_value,
                        });
                        State::Fitting
                    }
                    None => State::Done(significance),
                }
            }
            State::Done(significance) => {
                return Ok(Elimination {
                    design: arena.into_design(),
                    significance,
                    steps,
                    fits,
                    threshold: opts.threshold,
                });
            }
        };
    }
}

/// Significance of every feature (plus intercept) from one full fit.
pub fn p_values(features: &FeatureMatrix, target: &[f64]) -> Result<Significance, ModelError> {
    validate(features, target, SelectionOptions::default())?;
    let arena = ColumnArena::new(features, target.len());
    refit(&SvdSolver, &arena, &DVector::from_column_slice(target))
}

fn validate(features: &FeatureMatrix, target: &[f64], opts: SelectionOptions) -> Result<(), ModelError> {
    if !(0.0..=1.0).contains(&opts.threshold) {
        return Err(ModelError::invalid_input(format!(
            "threshold {} outside [0, 1]",
            opts.threshold
        )));
    }
    if target.is_empty() {
        return Err(ModelError::EmptyInput);
    }
    if features.n_features() > 0 && features.n_rows() != target.len() {
        return Err(ModelError::LengthMismatch {
            left: features.n_rows(),
            right: target.len(),
        });
    }
    ensure_finite(target)
}

fn refit<S: LeastSquares>(
    solver: &S,
    arena: &ColumnArena,
    y: &DVector<f64>,
) -> Result<Significance, ModelError> {
    let names = arena.live_names();
    let x = arena.design_matrix();

    let fit = solver.solve(&x, y).map_err(|e| match e {
        ModelError::SingularMatrix { .. } => ModelError::SingularMatrix {
            columns: names.clone(),
        },
        other => other,
    })?;

    if fit.p_values.len() != names.len() || fit.coefficients.len() != names.len() {
        return Err(ModelError::invalid_input(format!(
            "solver returned {} p-values for {} columns",
            fit.p_values.len(),
            names.len()
        )));
    }

    if let Some(j) = fit.p_values.iter().position(|p| !(0.0..=1.0).contains(p)) {
        return Err(ModelError::invalid_input(format!(
            "solver returned p-value {} for column '{}'",
            fit.p_values[j], names[j]
        )));
    }

    let columns = names
        .into_iter()
        .enumerate()
        .map(|(j, name)| ColumnScore {
            name,
            coefficient: fit.coefficients[j],
            std_error: fit.std_errors.get(j).copied().unwrap_or(f64::NAN),
            p_value: fit.p_values[j],
        })
        .collect();

    Ok(Significance {
        columns,
        df_resid: fit.df_resid,
    })
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::collections::VecDeque;

    use super::*;
    use crate::data::sample::{SampleSpec, generate_dataset};
    use crate::math::OlsFit;

    /// Returns pre-scripted p-values, one vector per fit.
    struct ScriptedSolver {
        script: RefCell<VecDeque<Vec<f64>>>,
        widths: RefCell<Vec<usize>>,
    }

    impl ScriptedSolver {
        fn new(script: Vec<Vec<f64>>) -> Self {
            Self {
                script: RefCell::new(script.into()),
                widths: RefCell::new(Vec::new()),
            }
        }
    }

    impl LeastSquares for ScriptedSolver {
        fn solve(&self, x: &DMatrix<f64>, _y: &DVector<f64>) -> Result<OlsFit, ModelError> {
            self.widths.borrow_mut().push(x.ncols());
            let p_values = self.script.borrow_mut().pop_front().expect("script exhausted");
            assert_eq!(p_values.len(), x.ncols());
            Ok(OlsFit {
                coefficients: vec![1.0; p_values.len()],
                std_errors: vec![1.0; p_values.len()],
                t_values: vec![1.0; p_values.len()],
                p_values,
                df_resid: x.nrows() - x.ncols(),
                sse: 0.0,
            })
        }
    }

    fn features(names: &[&str], n_rows: usize) -> FeatureMatrix {
        let columns = (0..names.len())
            .map(|j| (0..n_rows).map(|i| ((i * (j + 2)) % 7) as f64).collect())
            .collect();
        FeatureMatrix::new(names.iter().map(|s| s.to_string()).collect(), columns).unwrap()
    }

    #[test]
    fn ties_remove_first_column_in_definition_order() {
        let x = features(&["a", "b", "c"], 10);
        let solver = ScriptedSolver::new(vec![
            vec![0.01, 0.20, 0.70, 0.70],
            vec![0.01, 0.01, 0.01],
        ]);

        let out = backward_elimination_with(&solver, &x, &[0.0; 10], SelectionOptions::default()).unwrap();
        assert_eq!(out.steps.len(), 1);
        assert_eq!(out.steps[0].removed, "b");
        assert_eq!(out.design.names, vec!["const", "a", "c"]);
        assert_eq!(*solver.widths.borrow(), vec![4, 3]);
    }

    #[test]
    fn intercept_is_never_pruned() {
        let x = features(&["a", "b"], 10);
        let solver = ScriptedSolver::new(vec![vec![0.95, 0.01, 0.02]]);

        let out = backward_elimination_with(&solver, &x, &[0.0; 10], SelectionOptions::default()).unwrap();
        assert!(out.steps.is_empty());
        assert_eq!(out.fits, 1);
        assert_eq!(out.design.names, vec!["const", "a", "b"]);
    }

    #[test]
    fn prunes_down_to_intercept_when_nothing_passes() {
        let x = features(&["a", "b"], 10);
        let solver = ScriptedSolver::new(vec![vec![0.9, 0.5, 0.6], vec![0.9, 0.5], vec![0.9]]);

        let out = backward_elimination_with(&solver, &x, &[0.0; 10], SelectionOptions::default()).unwrap();
        let removed: Vec<&str> = out.steps.iter().map(|s| s.removed.as_str()).collect();
        assert_eq!(removed, vec!["b", "a"]);
        assert_eq!(out.design.names, vec!["const"]);
        assert_eq!(out.design.columns, vec![vec![1.0; 10]]);
        assert_eq!(out.fits, 3);
    }

    #[test]
    fn threshold_is_exclusive() {
        let x = features(&["a"], 10);
        let solver = ScriptedSolver::new(vec![vec![0.01, 0.05]]);

        let out = backward_elimination_with(&solver, &x, &[0.0; 10], SelectionOptions::default()).unwrap();
        assert!(out.steps.is_empty());
    }

    #[test]
    fn out_of_range_p_values_are_rejected() {
        let x = features(&["a", "b"], 10);
        for bad in [f64::NAN, -0.1, 1.5] {
            let solver = ScriptedSolver::new(vec![vec![0.01, bad, 0.9]]);
            let err = backward_elimination_with(&solver, &x, &[0.0; 10], SelectionOptions::default())
                .unwrap_err();
            match err {
                ModelError::InvalidInput { reason } => assert!(reason.contains("'a'"), "{reason}"),
                other => panic!("unexpected error {other:?}"),
            }
        }
    }

    #[test]
    fn noise_features_are_eliminated() {
        let spec = SampleSpec {
            rows: 200,
            noise_features: 4,
            slope: 2.0,
            intercept: 3.0,
            noise_sd: 0.1,
            seed: 7,
        };
        let data = generate_dataset(&spec).unwrap();
        let opts = SelectionOptions { threshold: 1e-6 };

        let out = backward_elimination(&data.features, &data.target, opts).unwrap();
        assert_eq!(out.design.names, vec!["const", "signal"]);
        assert!(out.fits <= data.features.n_features() + 1);
        assert_eq!(out.steps.len(), 4);
        assert!(out.significance.p_value("signal").unwrap() < 1e-6);
    }

    #[test]
    fn intercept_survives_real_fit_without_offset() {
        let spec = SampleSpec {
            rows: 60,
            noise_features: 2,
            slope: 5.0,
            intercept: 0.0,
            noise_sd: 0.5,
            seed: 11,
        };
        let data = generate_dataset(&spec).unwrap();

        let out = backward_elimination(&data.features, &data.target, SelectionOptions::default()).unwrap();
        assert_eq!(out.design.names[0], INTERCEPT);
        assert!(out.design.features().any(|n| n == "signal"));
        for score in out.significance.columns.iter().filter(|c| c.name != INTERCEPT) {
            assert!(score.p_value <= 0.05);
        }
    }

    #[test]
    fn collinear_columns_are_singular() {
        let a: Vec<f64> = (0..12).map(|i| i as f64).collect();
        let b: Vec<f64> = a.iter().map(|v| 2.0 * v).collect();
        let y: Vec<f64> = a.iter().map(|v| v + ((*v as usize) % 3) as f64).collect();
        let x = FeatureMatrix::new(vec!["a".into(), "b".into()], vec![a, b]).unwrap();

        let err = backward_elimination(&x, &y, SelectionOptions::default()).unwrap_err();
        assert_eq!(
            err,
            ModelError::SingularMatrix {
                columns: vec!["const".into(), "a".into(), "b".into()]
            }
        );
    }

    #[test]
    fn rejects_bad_inputs() {
        let x = features(&["a"], 5);
        assert!(matches!(
            backward_elimination(&x, &[1.0; 4], SelectionOptions::default()),
            Err(ModelError::LengthMismatch { left: 5, right: 4 })
        ));
        assert!(matches!(
            backward_elimination(&x, &[1.0; 5], SelectionOptions { threshold: 1.5 }),
            Err(ModelError::InvalidInput { .. })
        ));
        assert_eq!(
            backward_elimination(&x, &[], SelectionOptions::default()),
            Err(ModelError::EmptyInput)
        );
    }

    #[test]
    fn p_values_cover_every_column() {
        let x = features(&["a", "b"], 20);
        let y: Vec<f64> = (0..20).map(|i| i as f64 * 0.5 + (i % 3) as f64).collect();
        let sig = p_values(&x, &y).unwrap();
        let names: Vec<&str> = sig.columns.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["const", "a", "b"]);
        assert!(sig.columns.iter().all(|c| (0.0..=1.0).contains(&c.p_value)));
        assert_eq!(sig.df_resid, 17);
    }
}
