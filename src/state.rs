use num_traits::Float;

use crate::model::ScoreInfo;
use crate::result::OptimStatus;

/// The mutable record the optimiser owns across `optimize` calls.
///
/// `scores[0]` always matches `score_info.score()`; the counters are
/// cumulative and never decrease.
#[derive(Debug, Clone)]
pub struct OptimState<F> {
    num_iterations: usize,
    num_sub_iterations: usize,
    scores: Vec<F>,
    score_info: ScoreInfo<F>,
    status: OptimStatus,
}

impl<F: Float> OptimState<F> {
    pub(crate) fn new(score_info: ScoreInfo<F>, validation_scores: Vec<F>) -> Self {
        let mut scores = Vec::with_capacity(validation_scores.len() + 1);
        scores.push(score_info.score());
        scores.extend(validation_scores);
        OptimState {
            num_iterations: 0,
            num_sub_iterations: 0,
            scores,
            score_info,
            status: OptimStatus::Running,
        }
    }

    /// Cumulative iteration count across all calls.
    pub fn num_iterations(&self) -> usize {
        self.num_iterations
    }

    /// Cumulative line-search sub-iteration count across all calls.
    pub fn num_sub_iterations(&self) -> usize {
        self.num_sub_iterations
    }

    /// Current scores, optimisation scorer first.
    pub fn scores(&self) -> &[F] {
        &self.scores
    }

    /// Current bundle of the optimisation scorer.
    pub fn score_info(&self) -> &ScoreInfo<F> {
        &self.score_info
    }

    /// Current lifecycle status.
    pub fn status(&self) -> OptimStatus {
        self.status
    }

    pub(crate) fn set_status(&mut self, status: OptimStatus) {
        self.status = status;
    }

    pub(crate) fn add_iteration(&mut self) {
        self.num_iterations += 1;
    }

    pub(crate) fn add_sub_iterations(&mut self, count: usize) {
        self.num_sub_iterations += count;
    }

    /// Install a new optimisation-scorer bundle, keeping `scores[0]` in
    /// sync with it.
    pub(crate) fn set_score_info(&mut self, info: ScoreInfo<F>) {
        self.scores[0] = info.score();
        self.score_info = info;
    }

    pub(crate) fn set_validation_score(&mut self, index: usize, score: F) {
        debug_assert!(index >= 1);
        self.scores[index] = score;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn score_zero_tracks_bundle() {
        let mut state = OptimState::new(ScoreInfo::new(1.0), vec![9.0]);
        assert_eq!(state.scores(), &[1.0, 9.0]);

        state.set_score_info(ScoreInfo::with_gradient(2.5, vec![0.1]));
        assert_eq!(state.scores()[0], state.score_info().score());
    }

    #[test]
    fn counters_accumulate() {
        let mut state = OptimState::<f64>::new(ScoreInfo::new(0.0), vec![]);
        state.add_iteration();
        state.add_sub_iterations(3);
        state.add_iteration();
        assert_eq!(state.num_iterations(), 2);
        assert_eq!(state.num_sub_iterations(), 3);
    }
}
