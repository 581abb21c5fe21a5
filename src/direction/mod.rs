use num_traits::Float;

use crate::model::ScoreInfo;
use crate::params::{DirectionMethod, OptimParams};
use crate::result::OptimStatus;

mod gradient;
mod history;
mod lbfgs;

pub use gradient::GradientSearcher;
pub use lbfgs::LbfgsSearcher;

/// Chooses which direction in parameter space to move along.
///
/// A searcher receives the current score-gradient bundle and the current
/// parameters and returns either a direction vector or the status
/// explaining why none is available; it holds no reference back into the
/// optimiser.
pub trait DirectionSearcher<F: Float> {
    fn search(&mut self, info: &ScoreInfo<F>, parameters: &[F]) -> Result<Vec<F>, OptimStatus>;
}

/// Concrete searcher built fresh for one `optimize` call.
pub(crate) enum AnyDirectionSearcher<F> {
    Gradient(GradientSearcher),
    Lbfgs(LbfgsSearcher<F>),
}

impl<F: Float> AnyDirectionSearcher<F> {
    pub(crate) fn from_params(params: &OptimParams<F>) -> Self {
        match params.direction_method {
            DirectionMethod::Gradient => AnyDirectionSearcher::Gradient(GradientSearcher::new()),
            DirectionMethod::Lbfgs => AnyDirectionSearcher::Lbfgs(LbfgsSearcher::new(
                params.memory_size,
                params.min_curvature,
                params.direction.sign(),
            )),
        }
    }
}

impl<F: Float> DirectionSearcher<F> for AnyDirectionSearcher<F> {
    fn search(&mut self, info: &ScoreInfo<F>, parameters: &[F]) -> Result<Vec<F>, OptimStatus> {
        match self {
            AnyDirectionSearcher::Gradient(searcher) => searcher.search(info, parameters),
            AnyDirectionSearcher::Lbfgs(searcher) => searcher.search(info, parameters),
        }
    }
}
