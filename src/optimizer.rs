use log::{debug, trace};
use num_traits::Float;

use crate::direction::{AnyDirectionSearcher, DirectionSearcher};
use crate::error::OptimError;
use crate::line_search::{AnyLineSearcher, LineSearchStatus, LineSearcher};
use crate::model::{Model, ScoreInfo, Scorer};
use crate::params::{DirectionMethod, OptimParams};
use crate::result::{OptimResults, OptimStatus};
use crate::state::OptimState;

/// Drives repeated direction-search and line-search rounds against a
/// model until a termination condition fires.
///
/// The first scorer is the optimisation scorer: its score and gradient
/// steer the search. Any further scorers are validation scorers, rescored
/// after every accepted step but never optimised against.
///
/// The optimiser owns the model for its lifetime and is reusable across
/// calls: a run stopped on an iteration budget picks up from the last
/// accepted parameters on the next [`optimize`](Self::optimize) call.
pub struct IterativeOptimizer<F, M, S> {
    model: M,
    scorers: Vec<S>,
    state: OptimState<F>,
}

impl<F, M, S> IterativeOptimizer<F, M, S>
where
    F: Float,
    M: Model<F>,
    S: Scorer<F, M>,
{
    /// Bind an optimiser to a model and its scorers.
    ///
    /// Scores everything once up front. Fails fast when no scorer is
    /// supplied, or when the optimisation scorer cannot produce the
    /// gradient every direction strategy consumes.
    pub fn new(model: M, mut scorers: Vec<S>) -> Result<Self, OptimError> {
        if scorers.is_empty() {
            return Err(OptimError::NoScorers);
        }
        let info = scorers[0].score(&model, true);
        if !info.has_gradient() {
            return Err(OptimError::MissingGradient);
        }
        let validation: Vec<F> = scorers[1..]
            .iter_mut()
            .map(|scorer| scorer.score(&model, false).score())
            .collect();
        let state = OptimState::new(info, validation);
        Ok(IterativeOptimizer {
            model,
            scorers,
            state,
        })
    }

    /// The model in its current state.
    pub fn model(&self) -> &M {
        &self.model
    }

    /// Consume the optimiser, releasing the model.
    pub fn into_model(self) -> M {
        self.model
    }

    /// Cumulative iteration count across all calls.
    pub fn iterations(&self) -> usize {
        self.state.num_iterations()
    }

    /// Cumulative line-search sub-iteration count across all calls.
    pub fn sub_iterations(&self) -> usize {
        self.state.num_sub_iterations()
    }

    /// Current scores, optimisation scorer first.
    pub fn scores(&self) -> &[F] {
        self.state.scores()
    }

    /// Current bundle of the optimisation scorer.
    pub fn score_info(&self) -> &ScoreInfo<F> {
        self.state.score_info()
    }

    /// Current lifecycle status.
    pub fn status(&self) -> OptimStatus {
        self.state.status()
    }

    /// Run direction-search plus line-search rounds until a termination
    /// condition fires, and report what happened.
    ///
    /// A run previously stopped on an iteration or sub-iteration budget
    /// resumes automatically; any other terminal status returns
    /// immediately with zero work done. Strategy objects are built fresh
    /// for every call, so the L-BFGS history never outlives the call that
    /// filled it.
    pub fn optimize(&mut self, params: &OptimParams<F>) -> Result<OptimResults<F>, OptimError> {
        validate(params)?;

        if self.state.status().is_resumable() {
            self.state.set_status(OptimStatus::Running);
        }

        let initial_scores = self.state.scores().to_vec();
        let base_iterations = self.state.num_iterations();
        let base_sub_iterations = self.state.num_sub_iterations();

        let mut direction_searcher = AnyDirectionSearcher::from_params(params);
        let mut line_searcher = AnyLineSearcher::from_params(params);

        debug!(
            "optimize: starting at cumulative iteration {}",
            base_iterations
        );

        while self.state.status() == OptimStatus::Running {
            let status = self.pre_update(params, base_iterations, base_sub_iterations);
            if status != OptimStatus::Running {
                self.state.set_status(status);
                break;
            }

            let prev_scores = self.state.scores().to_vec();
            let status = self.update(params, &mut direction_searcher, &mut line_searcher);
            self.state.set_status(status);
            if status != OptimStatus::Running {
                break;
            }

            self.state.add_iteration();
            self.rescore_validation();
            trace!(
                "optimize: iteration {} accepted",
                self.state.num_iterations()
            );

            let status = self.post_update(params, &prev_scores);
            self.state.set_status(status);
        }

        debug!(
            "optimize: stopped ({}) after {} iterations",
            self.state.status(),
            self.state.num_iterations() - base_iterations
        );

        Ok(OptimResults {
            iterations: self.state.num_iterations() - base_iterations,
            sub_iterations: self.state.num_sub_iterations() - base_sub_iterations,
            initial_scores,
            final_scores: self.state.scores().to_vec(),
            score_info: self.state.score_info().clone(),
            status: self.state.status(),
        })
    }

    /// Budget guards, checked before each update against this call's
    /// baseline counters.
    fn pre_update(
        &self,
        params: &OptimParams<F>,
        base_iterations: usize,
        base_sub_iterations: usize,
    ) -> OptimStatus {
        if params.max_iterations > 0
            && self.state.num_iterations() - base_iterations >= params.max_iterations
        {
            return OptimStatus::MaxIterationsExceeded;
        }
        if params.max_sub_iterations > 0
            && self.state.num_sub_iterations() - base_sub_iterations >= params.max_sub_iterations
        {
            return OptimStatus::MaxSubIterationsExceeded;
        }
        OptimStatus::Running
    }

    /// One direction-search plus line-search round.
    fn update(
        &mut self,
        params: &OptimParams<F>,
        direction_searcher: &mut AnyDirectionSearcher<F>,
        line_searcher: &mut AnyLineSearcher,
    ) -> OptimStatus {
        let Self {
            model,
            scorers,
            state,
        } = self;

        let direction = match direction_searcher.search(state.score_info(), model.parameters()) {
            Ok(direction) => direction,
            Err(status) => return status,
        };

        let saved = model.parameters().to_vec();
        let outcome = line_searcher.search(model, &mut scorers[0], state.score_info(), &direction, params);
        state.add_sub_iterations(outcome.sub_iterations);

        match outcome.status {
            LineSearchStatus::Successful => {
                debug_assert!(outcome.info.is_some());
                if let Some(info) = outcome.info {
                    state.set_score_info(info);
                }
                OptimStatus::Running
            }
            failure => {
                // Walk the model back to the last accepted parameters.
                if !model.set_parameters(&saved) {
                    return OptimStatus::UpdateFailed;
                }
                failure.into_status()
            }
        }
    }

    fn rescore_validation(&mut self) {
        let Self {
            model,
            scorers,
            state,
        } = self;
        for (index, scorer) in scorers.iter_mut().enumerate().skip(1) {
            state.set_validation_score(index, scorer.score(model, false).score());
        }
    }

    /// Improvement and convergence guards, checked after each accepted
    /// update.
    fn post_update(&self, params: &OptimParams<F>, prev_scores: &[F]) -> OptimStatus {
        let sign: F = params.direction.sign();
        let old = prev_scores[0];
        let diff = sign * (self.state.scores()[0] - old);

        if diff <= F::zero() {
            return OptimStatus::ScoreNotImproved;
        }
        if params.score_tolerance > F::zero() && diff < params.score_tolerance {
            return OptimStatus::ScoreConverged;
        }
        if params.relative_score_tolerance > F::zero()
            && diff < old.abs() * params.relative_score_tolerance
        {
            return OptimStatus::RelativeScoreConverged;
        }
        OptimStatus::Running
    }
}

/// Per-call configuration checks; anything caught here never starts a run.
fn validate<F: Float>(params: &OptimParams<F>) -> Result<(), OptimError> {
    if params.direction_method == DirectionMethod::Lbfgs && params.memory_size == 0 {
        return Err(OptimError::ZeroMemory);
    }
    if params.min_direction_step > F::zero()
        && params.max_direction_step > F::zero()
        && params.min_direction_step > params.max_direction_step
    {
        return Err(OptimError::InvalidStepBounds);
    }
    Ok(())
}
