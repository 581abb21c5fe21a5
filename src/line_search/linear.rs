use num_traits::Float;

use crate::model::{Model, ScoreInfo, Scorer};
use crate::params::OptimParams;

use super::{half, search_with, LineSearchOutcome, LineSearcher, StepSchedule, StepTrial};

/// Pure backtracking: start at a unit step, halve after every failed
/// trial.
#[derive(Debug, Default)]
pub struct LinearSearch;

impl LinearSearch {
    pub fn new() -> Self {
        LinearSearch
    }
}

impl<F: Float> StepSchedule<F> for LinearSearch {
    fn next_step(&mut self, trial: &StepTrial<'_, F>) -> F {
        trial.step * half()
    }
}

impl<F: Float> LineSearcher<F> for LinearSearch {
    fn search<M, S>(
        &mut self,
        model: &mut M,
        scorer: &mut S,
        info: &ScoreInfo<F>,
        direction: &[F],
        params: &OptimParams<F>,
    ) -> LineSearchOutcome<F>
    where
        M: Model<F>,
        S: Scorer<F, M>,
    {
        search_with(self, model, scorer, info, direction, params)
    }
}

#[cfg(test)]
mod tests {
    use crate::line_search::LineSearchStatus;
    use crate::model::VecModel;

    use super::*;

    /// Concave bowl `-(x - 3)^2`, maximised.
    struct Bowl;

    impl Scorer<f64, VecModel<f64>> for Bowl {
        fn score(&mut self, model: &VecModel<f64>, want_gradient: bool) -> ScoreInfo<f64> {
            let x = model.parameters()[0];
            let score = -(x - 3.0) * (x - 3.0);
            if want_gradient {
                ScoreInfo::with_gradient(score, vec![-2.0 * (x - 3.0)])
            } else {
                ScoreInfo::new(score)
            }
        }
    }

    #[test]
    fn halving_lands_on_an_improving_step() {
        let mut model = VecModel::new(vec![0.0]);
        let mut scorer = Bowl;
        let info = scorer.score(&model, true);
        let direction = info.gradient().unwrap().to_vec();
        let params = OptimParams::default();

        let outcome = LinearSearch::new().search(&mut model, &mut scorer, &info, &direction, &params);

        assert_eq!(outcome.status, LineSearchStatus::Successful);
        let accepted = outcome.info.unwrap();
        assert!(accepted.score() > info.score());
        assert!(accepted.has_gradient());
        // Unit step overshoots to the mirror point, the first halving
        // lands exactly on the optimum.
        assert_eq!(outcome.sub_iterations, 2);
        assert!((model.parameters()[0] - 3.0).abs() < 1e-12);
    }

    #[test]
    fn constant_score_exhausts_the_budget() {
        struct Flat;

        impl Scorer<f64, VecModel<f64>> for Flat {
            fn score(&mut self, _model: &VecModel<f64>, want_gradient: bool) -> ScoreInfo<f64> {
                if want_gradient {
                    ScoreInfo::with_gradient(0.0, vec![1.0])
                } else {
                    ScoreInfo::new(0.0)
                }
            }
        }

        let mut model = VecModel::new(vec![0.0]);
        let mut scorer = Flat;
        let info = scorer.score(&model, true);
        let params = OptimParams {
            max_line_search_iterations: 7,
            ..OptimParams::default()
        };

        let outcome = LinearSearch::new().search(&mut model, &mut scorer, &info, &[1.0], &params);

        assert_eq!(outcome.status, LineSearchStatus::MaxIterationsExceeded);
        assert_eq!(outcome.sub_iterations, 7);
        assert!(outcome.info.is_none());
    }

    #[test]
    fn overlarge_movement_is_rejected_before_scoring() {
        let mut model = VecModel::new(vec![0.0]);
        let mut scorer = Bowl;
        let info = scorer.score(&model, true);
        let direction = info.gradient().unwrap().to_vec();
        let params = OptimParams {
            max_direction_step: 0.5,
            ..OptimParams::default()
        };

        let outcome = LinearSearch::new().search(&mut model, &mut scorer, &info, &direction, &params);

        assert_eq!(outcome.status, LineSearchStatus::DirectionStepTooLarge);
        assert_eq!(outcome.sub_iterations, 0);
        assert_eq!(model.parameters(), &[0.0]);
    }
}
