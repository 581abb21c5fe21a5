use num_traits::Float;

use crate::linalg::dot;
use crate::model::{Model, ScoreInfo, Scorer};
use crate::params::OptimParams;

use super::{half, interpolate, search_with, LineSearchOutcome, LineSearcher, StepSchedule, StepTrial};

/// Quadratic step acceleration.
///
/// After a failed trial, fits a quadratic through the directional
/// derivatives at the search start and the trial point and jumps to its
/// stationary point when that lands strictly inside the trial interval.
/// Falls back to halving outside the interval or when the trial bundle
/// carries no gradient.
#[derive(Debug, Default)]
pub struct QuadraticSearch;

impl QuadraticSearch {
    pub fn new() -> Self {
        QuadraticSearch
    }
}

impl<F: Float> StepSchedule<F> for QuadraticSearch {
    fn next_step(&mut self, trial: &StepTrial<'_, F>) -> F {
        let fallback = trial.step * half();
        let Some(gradient) = trial.trial_info.gradient() else {
            return fallback;
        };
        let trial_slope = dot(gradient, trial.direction);
        match interpolate::quadratic_scaling(trial.start_slope, trial_slope) {
            Some(scale) if scale > F::zero() && scale < F::one() => trial.step * scale,
            _ => fallback,
        }
    }
}

impl<F: Float> LineSearcher<F> for QuadraticSearch {
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

    /// Concave bowl `-1.5 (x - 2)^2`, maximised; the unit step overshoots
    /// badly so the secant has to rescue the search.
    struct SteepBowl;

    impl Scorer<f64, VecModel<f64>> for SteepBowl {
        fn score(&mut self, model: &VecModel<f64>, want_gradient: bool) -> ScoreInfo<f64> {
            let x = model.parameters()[0];
            let score = -1.5 * (x - 2.0) * (x - 2.0);
            if want_gradient {
                ScoreInfo::with_gradient(score, vec![-3.0 * (x - 2.0)])
            } else {
                ScoreInfo::new(score)
            }
        }
    }

    #[test]
    fn secant_step_lands_on_the_optimum() {
        let mut model = VecModel::new(vec![0.0]);
        let mut scorer = SteepBowl;
        let info = scorer.score(&model, true);
        let direction = info.gradient().unwrap().to_vec();
        let params = OptimParams::default();

        let outcome =
            QuadraticSearch::new().search(&mut model, &mut scorer, &info, &direction, &params);

        assert_eq!(outcome.status, LineSearchStatus::Successful);
        // One failed unit step, then the interpolated step.
        assert_eq!(outcome.sub_iterations, 2);
        assert!(
            (model.parameters()[0] - 2.0).abs() < 1e-12,
            "x = {}, expected 2.0",
            model.parameters()[0]
        );
    }

    #[test]
    fn gradient_free_trials_degrade_to_halving() {
        /// Scores carry no gradient after the initial bundle.
        struct Opaque;

        impl Scorer<f64, VecModel<f64>> for Opaque {
            fn score(&mut self, model: &VecModel<f64>, _want_gradient: bool) -> ScoreInfo<f64> {
                let x = model.parameters()[0];
                ScoreInfo::new(-1.5 * (x - 2.0) * (x - 2.0))
            }
        }

        let mut model = VecModel::new(vec![0.0]);
        let mut scorer = Opaque;
        // Hand the search a start bundle that still has a gradient.
        let info = ScoreInfo::with_gradient(-6.0, vec![6.0]);
        let direction = vec![6.0];
        let params = OptimParams::default();

        let outcome =
            QuadraticSearch::new().search(&mut model, &mut scorer, &info, &direction, &params);

        assert_eq!(outcome.status, LineSearchStatus::Successful);
        // Unit step to x = 6 fails, halving to x = 3 improves.
        assert_eq!(outcome.sub_iterations, 2);
        assert!((model.parameters()[0] - 3.0).abs() < 1e-12);
    }
}
