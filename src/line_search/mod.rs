use num_traits::Float;

use crate::linalg::{add_scaled, dot, norm};
use crate::model::{Model, ScoreInfo, Scorer};
use crate::params::{LineSearchMethod, OptimParams};
use crate::result::OptimStatus;

mod cubic;
mod interpolate;
mod linear;
mod quadratic;

pub use cubic::CubicSearch;
pub use linear::LinearSearch;
pub use quadratic::QuadraticSearch;

/// How a line search ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineSearchStatus {
    /// A step improving the score was accepted.
    Successful,
    /// The trial step moved the parameters by less than the minimum.
    DirectionStepTooSmall,
    /// The trial step moved the parameters by more than the maximum.
    DirectionStepTooLarge,
    /// The model rejected a trial parameter vector.
    ParameterUpdateFailed,
    /// The attempt budget was exhausted without improvement.
    MaxIterationsExceeded,
}

impl LineSearchStatus {
    /// The optimiser-level status this outcome surfaces as.
    pub fn into_status(self) -> OptimStatus {
        match self {
            LineSearchStatus::Successful => OptimStatus::Running,
            LineSearchStatus::DirectionStepTooSmall => OptimStatus::DirectionStepTooSmall,
            LineSearchStatus::DirectionStepTooLarge => OptimStatus::DirectionStepTooLarge,
            LineSearchStatus::ParameterUpdateFailed => OptimStatus::ParameterUpdateFailed,
            LineSearchStatus::MaxIterationsExceeded => OptimStatus::MaxIterationsExceeded,
        }
    }
}

/// Result of one line search.
#[derive(Debug)]
pub struct LineSearchOutcome<F> {
    pub status: LineSearchStatus,
    /// Bundle scored at the accepted point; present only on success.
    pub info: Option<ScoreInfo<F>>,
    /// Scoring attempts consumed.
    pub sub_iterations: usize,
}

/// Finds how far to move along a given direction while improving the
/// score.
///
/// On success the model's parameters have been mutated to the accepted
/// point and the outcome carries the bundle scored there. On failure the
/// model is left at the last trial point; the caller decides whether to
/// restore.
pub trait LineSearcher<F: Float> {
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
        S: Scorer<F, M>;
}

/// Everything known about the latest failed trial, handed to the step
/// policy for recomputation.
pub(crate) struct StepTrial<'a, F> {
    /// The failed trial's step size.
    pub step: F,
    /// Score at the search's start point.
    pub start_score: F,
    /// Directional derivative `g0 . direction` at the start point.
    pub start_slope: F,
    /// Bundle scored at the failed trial point.
    pub trial_info: &'a ScoreInfo<F>,
    /// Search direction.
    pub direction: &'a [F],
    /// Optimisation sign (+1 maximise, -1 minimise).
    pub sign: F,
}

/// Variant-specific step-size policy plugged into the shared backtracking
/// loop.
pub(crate) trait StepSchedule<F: Float> {
    /// First step to try.
    fn initial_step(&self) -> F {
        F::one()
    }

    /// Step to try after a failed trial.
    fn next_step(&mut self, trial: &StepTrial<'_, F>) -> F;
}

pub(crate) fn half<F: Float>() -> F {
    F::one() / (F::one() + F::one())
}

/// Backtracking skeleton shared by every variant: validate the step, move
/// incrementally from the last trial point, rescore, accept on a plain
/// sign-of-improvement test. Curvature (Wolfe) conditions are
/// deliberately not part of the acceptance contract.
pub(crate) fn search_with<F, M, S, P>(
    schedule: &mut P,
    model: &mut M,
    scorer: &mut S,
    info: &ScoreInfo<F>,
    direction: &[F],
    params: &OptimParams<F>,
) -> LineSearchOutcome<F>
where
    F: Float,
    M: Model<F>,
    S: Scorer<F, M>,
    P: StepSchedule<F>,
{
    let sign: F = params.direction.sign();
    let direction_norm = norm(direction);
    let start_score = info.score();
    let start_slope = info
        .gradient()
        .map(|g| dot(g, direction))
        .unwrap_or_else(F::zero);

    let mut step = schedule.initial_step();
    let mut prev_step = F::zero();
    let mut sub_iterations = 0usize;
    let mut trial = Vec::with_capacity(direction.len());

    loop {
        if let Some(status) = check_step_size(step, direction_norm, params) {
            return LineSearchOutcome {
                status,
                info: None,
                sub_iterations,
            };
        }

        // Move incrementally from the last tried point instead of
        // resetting to the search start.
        trial.clear();
        trial.extend_from_slice(model.parameters());
        add_scaled(&mut trial, sign * (step - prev_step), direction);
        if !model.set_parameters(&trial) {
            return LineSearchOutcome {
                status: LineSearchStatus::ParameterUpdateFailed,
                info: None,
                sub_iterations,
            };
        }
        prev_step = step;

        let trial_info = scorer.score(model, true);
        sub_iterations += 1;

        if sign * (trial_info.score() - start_score) > F::zero() {
            return LineSearchOutcome {
                status: LineSearchStatus::Successful,
                info: Some(trial_info),
                sub_iterations,
            };
        }

        if params.max_line_search_iterations > 0
            && sub_iterations >= params.max_line_search_iterations
        {
            return LineSearchOutcome {
                status: LineSearchStatus::MaxIterationsExceeded,
                info: None,
                sub_iterations,
            };
        }

        step = schedule.next_step(&StepTrial {
            step,
            start_score,
            start_slope,
            trial_info: &trial_info,
            direction,
            sign,
        });
    }
}

/// Reject steps whose parameter movement falls outside the configured
/// bounds; a bound of zero disables its check.
fn check_step_size<F: Float>(
    step: F,
    direction_norm: F,
    params: &OptimParams<F>,
) -> Option<LineSearchStatus> {
    let movement = step * direction_norm;
    if params.min_direction_step > F::zero() && movement < params.min_direction_step {
        return Some(LineSearchStatus::DirectionStepTooSmall);
    }
    if params.max_direction_step > F::zero() && movement > params.max_direction_step {
        return Some(LineSearchStatus::DirectionStepTooLarge);
    }
    None
}

/// Concrete searcher built fresh for one `optimize` call.
pub(crate) enum AnyLineSearcher {
    Linear(LinearSearch),
    Quadratic(QuadraticSearch),
    Cubic(CubicSearch),
}

impl AnyLineSearcher {
    pub(crate) fn from_params<F: Float>(params: &OptimParams<F>) -> Self {
        match params.line_search_method {
            LineSearchMethod::Linear => AnyLineSearcher::Linear(LinearSearch::new()),
            LineSearchMethod::Quadratic => AnyLineSearcher::Quadratic(QuadraticSearch::new()),
            LineSearchMethod::Cubic => AnyLineSearcher::Cubic(CubicSearch::new()),
        }
    }
}

impl<F: Float> LineSearcher<F> for AnyLineSearcher {
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
        match self {
            AnyLineSearcher::Linear(searcher) => {
                searcher.search(model, scorer, info, direction, params)
            }
            AnyLineSearcher::Quadratic(searcher) => {
                searcher.search(model, scorer, info, direction, params)
            }
            AnyLineSearcher::Cubic(searcher) => {
                searcher.search(model, scorer, info, direction, params)
            }
        }
    }
}
