//! Backward-induction driver of the Longstaff-Schwartz recursion.

use lsm_models::instruments::VanillaOption;

use super::cashflow::CashFlowState;
use super::error::LsmError;
use super::paths::SamplePaths;
use super::regression::{fit_continuation, ContinuationFit};

/// Regression diagnostics for one exercise date.
#[derive(Clone, Copy, Debug)]
pub struct StepRegression {
    /// Zero-based exercise date (payoff-matrix column).
    pub step: usize,
    /// Number of in-the-money paths at that date.
    pub n_itm: usize,
    /// The fitted continuation function, or `None` if no path was in the
    /// money and the date was skipped.
    pub fit: Option<ContinuationFit>,
}

/// Result of a completed backward induction.
#[derive(Clone, Debug)]
pub struct LsmOutcome {
    /// Final cash-flow and exercise state.
    pub cash_flows: CashFlowState,
    /// Per-date regression diagnostics in chronological order, covering
    /// every date before expiry.
    pub regressions: Vec<StepRegression>,
}

/// Runs the Longstaff-Schwartz backward induction over a path matrix.
///
/// Starting from intrinsic value at expiry, walks the exercise dates from
/// second-to-last back to first. At each date the realised discounted future
/// cash flows of the in-the-money paths are regressed on the asset price,
/// and each in-the-money path exercises if intrinsic value strictly exceeds
/// the fitted continuation value. Exercising zeroes the path's later cash
/// flows, so every path pays out at most once.
///
/// The date recursion is inherently sequential: each regression consumes
/// cash flows settled by later dates. Parallelism belongs one level up,
/// across independent batches.
///
/// Column `t` of the cash-flow matrices corresponds to asset-price column
/// `t + 1`, the spot column never being an exercise date.
///
/// # Errors
///
/// Returns [`LsmError::EmptyPaths`] if the matrix has no paths or no steps.
pub fn run_backward_induction(
    paths: &SamplePaths,
    option: &VanillaOption,
    rate: f64,
) -> Result<LsmOutcome, LsmError> {
    let n_paths = paths.n_paths();
    let n_steps = paths.n_steps();
    if n_paths == 0 || n_steps == 0 {
        return Err(LsmError::EmptyPaths);
    }

    let dt = option.expiry() / n_steps as f64;
    let mut state = CashFlowState::new(n_paths, n_steps);

    for p in 0..n_paths {
        state.set_terminal(p, option.intrinsic(paths.price(p, n_steps)));
    }

    let mut regressions: Vec<StepRegression> = Vec::with_capacity(n_steps - 1);
    let mut itm = Vec::with_capacity(n_paths);
    let mut x = Vec::with_capacity(n_paths);
    let mut y = Vec::with_capacity(n_paths);

    for t in (0..n_steps - 1).rev() {
        state.push_discount((-rate * dt * (n_steps - t - 1) as f64).exp());

        itm.clear();
        x.clear();
        y.clear();
        for p in 0..n_paths {
            let price = paths.price(p, t + 1);
            if option.intrinsic(price) > 0.0 {
                itm.push(p);
                x.push(price);
            }
        }

        if itm.is_empty() {
            // Nothing to regress on; cash flows carry forward unchanged.
            regressions.push(StepRegression {
                step: t,
                n_itm: 0,
                fit: None,
            });
            continue;
        }

        for &p in &itm {
            y.push(state.discounted_future_value(p, t));
        }

        let fit = fit_continuation(&x, &y);
        for (&p, &price) in itm.iter().zip(&x) {
            let intrinsic = option.intrinsic(price);
            if intrinsic > fit.evaluate(price) {
                state.exercise(p, t, intrinsic);
            } else {
                state.decline(p, t);
            }
        }

        regressions.push(StepRegression {
            step: t,
            n_itm: itm.len(),
            fit: Some(fit),
        });
    }

    // The loop visits dates backwards; report them chronologically.
    regressions.reverse();

    Ok(LsmOutcome {
        cash_flows: state,
        regressions,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn single_step_paths() -> SamplePaths {
        SamplePaths::from_rows(&[vec![1.0, 0.9], vec![1.0, 1.2]]).unwrap()
    }

    #[test]
    fn test_single_step_reduces_to_terminal_payoff() {
        let paths = single_step_paths();
        let put = VanillaOption::put(1.0, 1.0).unwrap();

        let outcome = run_backward_induction(&paths, &put, 0.05).unwrap();

        // One exercise date means no regression at all.
        assert!(outcome.regressions.is_empty());
        assert_relative_eq!(outcome.cash_flows.payoff(0, 0), 0.1, epsilon = 1e-12);
        assert_eq!(outcome.cash_flows.payoff(1, 0), 0.0);
        assert!(outcome.cash_flows.is_exercised(0, 0));
        assert!(!outcome.cash_flows.is_exercised(1, 0));
    }

    #[test]
    fn test_all_paths_out_of_the_money() {
        // Deep out-of-the-money put: no date has any in-the-money path.
        let rows = vec![vec![10.0, 11.0, 12.0, 13.0], vec![10.0, 10.5, 11.5, 12.5]];
        let paths = SamplePaths::from_rows(&rows).unwrap();
        let put = VanillaOption::put(1.0, 3.0).unwrap();

        let outcome = run_backward_induction(&paths, &put, 0.05).unwrap();

        for reg in &outcome.regressions {
            assert_eq!(reg.n_itm, 0);
            assert!(reg.fit.is_none());
        }
        assert_eq!(outcome.cash_flows.max_exercises_per_path(), 0);
        let values = outcome.cash_flows.discounted_path_values(0.05, 1.0);
        assert!(values.iter().all(|&v| v == 0.0));
    }

    #[test]
    fn test_exercise_once_invariant() {
        // A path deep in the money at every date must still pay out once.
        let rows = vec![
            vec![1.0, 0.5, 0.4, 0.3],
            vec![1.0, 0.6, 0.5, 0.4],
            vec![1.0, 0.7, 0.6, 0.5],
            vec![1.0, 1.5, 1.6, 1.7],
        ];
        let paths = SamplePaths::from_rows(&rows).unwrap();
        let put = VanillaOption::put(1.0, 3.0).unwrap();

        let outcome = run_backward_induction(&paths, &put, 0.05).unwrap();
        assert_eq!(outcome.cash_flows.max_exercises_per_path(), 1);
    }

    #[test]
    fn test_two_itm_paths_use_constant_fallback() {
        // Only two in-the-money paths at the middle date: the regression
        // degenerates to the mean of the discounted future cash flows.
        let rows = vec![
            vec![1.0, 0.90, 0.95],
            vec![1.0, 0.80, 1.30],
            vec![1.0, 1.20, 1.25],
        ];
        let paths = SamplePaths::from_rows(&rows).unwrap();
        let put = VanillaOption::put(1.0, 2.0).unwrap();

        let outcome = run_backward_induction(&paths, &put, 0.05).unwrap();
        let reg = &outcome.regressions[0];
        assert_eq!(reg.n_itm, 2);
        let fit = reg.fit.unwrap();
        assert_eq!(fit.linear, 0.0);
        assert_eq!(fit.quadratic, 0.0);
    }

    #[test]
    fn test_empty_matrix_rejected() {
        let paths = SamplePaths::from_rows(&[vec![1.0, 1.1]]).unwrap();
        let put = VanillaOption::put(1.0, 1.0).unwrap();
        assert!(run_backward_induction(&paths, &put, 0.05).is_ok());

        // Emptiness is caught at construction; from_rows refuses the shapes
        // the driver would reject.
        assert!(matches!(
            SamplePaths::from_rows(&[]),
            Err(LsmError::EmptyPaths)
        ));
    }
}
