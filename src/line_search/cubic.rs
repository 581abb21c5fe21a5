use num_traits::Float;

use crate::linalg::dot;
use crate::model::{Model, ScoreInfo, Scorer};
use crate::params::OptimParams;

use super::{half, interpolate, search_with, LineSearchOutcome, LineSearcher, StepSchedule, StepTrial};

/// Cubic step acceleration.
///
/// After a failed trial, fits a cubic through the scores and directional
/// derivatives at the search start and the trial point and jumps to its
/// optimum — the cubic's maximum when maximising, its minimum when
/// minimising — when that lands strictly inside the trial interval.
/// Falls back to halving outside the interval or when the trial bundle
/// carries no gradient.
#[derive(Debug, Default)]
pub struct CubicSearch;

impl CubicSearch {
    pub fn new() -> Self {
        CubicSearch
    }
}

impl<F: Float> StepSchedule<F> for CubicSearch {
    fn next_step(&mut self, trial: &StepTrial<'_, F>) -> F {
        let fallback = trial.step * half();
        let Some(gradient) = trial.trial_info.gradient() else {
            return fallback;
        };
        // Derivatives in movement coordinates: d/dt of the score along
        // x(t) = x0 + sign * t * step * direction, t in [0, 1].
        let scale = trial.sign * trial.step;
        let d0 = scale * trial.start_slope;
        let d1 = scale * dot(gradient, trial.direction);
        let maximum = trial.sign > F::zero();
        match interpolate::cubic_scaling(
            trial.start_score,
            d0,
            trial.trial_info.score(),
            d1,
            maximum,
        ) {
            Some(t) if t > F::zero() && t < F::one() => trial.step * t,
            _ => fallback,
        }
    }
}

impl<F: Float> LineSearcher<F> for CubicSearch {
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
