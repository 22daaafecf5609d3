//! Cash-flow bookkeeping for the backward induction.

/// Cash-flow and exercise state of a Longstaff-Schwartz run.
///
/// Holds two `n_paths x n_steps` row-major matrices: realised payoffs and
/// exercise indicators, where column `t` corresponds to the `(t + 1)`-th
/// time step of the path matrix. The invariant maintained throughout the
/// recursion is that each row carries at most one exercise: deciding to
/// exercise at step `t` zeroes every later column of that row in the same
/// update.
///
/// A discount sequence grows alongside the recursion: element `j` holds the
/// factor for a cash flow `j + 1` steps ahead of the current date.
#[derive(Clone, Debug)]
pub struct CashFlowState {
    payoffs: Vec<f64>,
    exercised: Vec<u8>,
    discounts: Vec<f64>,
    n_paths: usize,
    n_steps: usize,
}

impl CashFlowState {
    /// Creates an all-zero state for `n_paths` paths and `n_steps` exercise
    /// dates.
    pub fn new(n_paths: usize, n_steps: usize) -> Self {
        Self {
            payoffs: vec![0.0; n_paths * n_steps],
            exercised: vec![0; n_paths * n_steps],
            discounts: Vec::with_capacity(n_steps.saturating_sub(1)),
            n_paths,
            n_steps,
        }
    }

    /// Returns the number of paths.
    #[inline]
    pub fn n_paths(&self) -> usize {
        self.n_paths
    }

    /// Returns the number of exercise dates.
    #[inline]
    pub fn n_steps(&self) -> usize {
        self.n_steps
    }

    #[inline]
    fn idx(&self, p: usize, t: usize) -> usize {
        p * self.n_steps + t
    }

    /// Records the terminal payoff of path `p`.
    ///
    /// The terminal column holds the intrinsic value at expiry; the exercise
    /// indicator is set only where that value is strictly positive.
    #[inline]
    pub fn set_terminal(&mut self, p: usize, intrinsic: f64) {
        let idx = self.idx(p, self.n_steps - 1);
        self.payoffs[idx] = intrinsic;
        self.exercised[idx] = u8::from(intrinsic > 0.0);
    }

    /// Appends the next one-step-further discount factor.
    ///
    /// Called once per backward step, before the regression at that step, so
    /// that `discounts[j]` always equals the factor for a cash flow `j + 1`
    /// steps ahead of the step under consideration.
    #[inline]
    pub fn push_discount(&mut self, factor: f64) {
        self.discounts.push(factor);
    }

    /// Returns the discount sequence accumulated so far.
    #[inline]
    pub fn discounts(&self) -> &[f64] {
        &self.discounts
    }

    /// Discounted value, as seen from step `t`, of the future cash flow on
    /// path `p`.
    ///
    /// Sums `payoff[p][s] * discounts[s - t - 1]` over the columns after `t`.
    /// At most one term is non-zero under the single-exercise invariant.
    pub fn discounted_future_value(&self, p: usize, t: usize) -> f64 {
        let mut value = 0.0;
        for s in (t + 1)..self.n_steps {
            let payoff = self.payoffs[self.idx(p, s)];
            if payoff != 0.0 {
                value += payoff * self.discounts[s - t - 1];
            }
        }
        value
    }

    /// Exercises path `p` at step `t` for the given intrinsic value.
    ///
    /// Zeroes every later payoff and exercise flag on the row so the path
    /// carries exactly this one cash flow.
    pub fn exercise(&mut self, p: usize, t: usize, intrinsic: f64) {
        let idx = self.idx(p, t);
        self.payoffs[idx] = intrinsic;
        self.exercised[idx] = 1;
        for s in (t + 1)..self.n_steps {
            let later = self.idx(p, s);
            self.payoffs[later] = 0.0;
            self.exercised[later] = 0;
        }
    }

    /// Declines exercise of path `p` at step `t`, leaving any later cash
    /// flow on the row untouched.
    #[inline]
    pub fn decline(&mut self, p: usize, t: usize) {
        let idx = self.idx(p, t);
        self.payoffs[idx] = 0.0;
        self.exercised[idx] = 0;
    }

    /// Returns the payoff recorded for path `p` at step `t`.
    #[inline]
    pub fn payoff(&self, p: usize, t: usize) -> f64 {
        self.payoffs[self.idx(p, t)]
    }

    /// Returns `true` if path `p` is marked exercised at step `t`.
    #[inline]
    pub fn is_exercised(&self, p: usize, t: usize) -> bool {
        self.exercised[self.idx(p, t)] == 1
    }

    /// Present value of each path's cash flow.
    ///
    /// Column `t` is discounted by `exp(-rate * dt * (t + 1))`, since column
    /// `t` of the payoff matrix corresponds to `t + 1` time steps after
    /// valuation.
    pub fn discounted_path_values(&self, rate: f64, dt: f64) -> Vec<f64> {
        let factors: Vec<f64> = (0..self.n_steps)
            .map(|t| (-rate * dt * (t + 1) as f64).exp())
            .collect();

        (0..self.n_paths)
            .map(|p| {
                let mut value = 0.0;
                for (t, factor) in factors.iter().enumerate() {
                    let payoff = self.payoffs[self.idx(p, t)];
                    if payoff != 0.0 {
                        value += payoff * factor;
                    }
                }
                value
            })
            .collect()
    }

    /// Largest number of exercise flags on any single path.
    ///
    /// Always 0 or 1 after a completed recursion; exposed so tests can
    /// assert the invariant directly.
    pub fn max_exercises_per_path(&self) -> usize {
        (0..self.n_paths)
            .map(|p| {
                (0..self.n_steps)
                    .filter(|&t| self.exercised[self.idx(p, t)] == 1)
                    .count()
            })
            .max()
            .unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_new_is_zeroed() {
        let state = CashFlowState::new(3, 4);
        assert_eq!(state.n_paths(), 3);
        assert_eq!(state.n_steps(), 4);
        for p in 0..3 {
            for t in 0..4 {
                assert_eq!(state.payoff(p, t), 0.0);
                assert!(!state.is_exercised(p, t));
            }
        }
        assert_eq!(state.max_exercises_per_path(), 0);
    }

    #[test]
    fn test_set_terminal_flags_only_positive() {
        let mut state = CashFlowState::new(2, 3);
        state.set_terminal(0, 0.18);
        state.set_terminal(1, 0.0);

        assert_relative_eq!(state.payoff(0, 2), 0.18);
        assert!(state.is_exercised(0, 2));
        assert_eq!(state.payoff(1, 2), 0.0);
        assert!(!state.is_exercised(1, 2));
    }

    #[test]
    fn test_exercise_zeroes_later_columns() {
        let mut state = CashFlowState::new(1, 4);
        state.set_terminal(0, 0.25);
        state.exercise(0, 1, 0.4);

        assert_relative_eq!(state.payoff(0, 1), 0.4);
        assert!(state.is_exercised(0, 1));
        assert_eq!(state.payoff(0, 3), 0.0);
        assert!(!state.is_exercised(0, 3));
        assert_eq!(state.max_exercises_per_path(), 1);
    }

    #[test]
    fn test_decline_preserves_later_cash_flow() {
        let mut state = CashFlowState::new(1, 3);
        state.set_terminal(0, 0.07);
        state.decline(0, 0);

        assert_relative_eq!(state.payoff(0, 2), 0.07);
        assert!(state.is_exercised(0, 2));
        assert_eq!(state.max_exercises_per_path(), 1);
    }

    #[test]
    fn test_discounted_future_value_uses_step_offset() {
        let rate: f64 = 0.06;
        let dt: f64 = 1.0;
        let mut state = CashFlowState::new(1, 3);
        state.set_terminal(0, 0.18);

        // Two backward steps accumulate factors for 1 and 2 steps ahead.
        state.push_discount((-rate * dt).exp());
        state.push_discount((-rate * dt * 2.0).exp());

        // Seen from step 0, the terminal column is two steps ahead.
        assert_relative_eq!(
            state.discounted_future_value(0, 0),
            0.18 * (-0.12f64).exp(),
            epsilon = 1e-12
        );
        assert_relative_eq!(
            state.discounted_future_value(0, 1),
            0.18 * (-0.06f64).exp(),
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_discounted_path_values() {
        let mut state = CashFlowState::new(2, 3);
        state.set_terminal(0, 0.18);
        state.exercise(1, 0, 0.17);

        let values = state.discounted_path_values(0.06, 1.0);
        assert_relative_eq!(values[0], 0.18 * (-0.18f64).exp(), epsilon = 1e-12);
        assert_relative_eq!(values[1], 0.17 * (-0.06f64).exp(), epsilon = 1e-12);
    }
}
