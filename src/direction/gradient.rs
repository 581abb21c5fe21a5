use num_traits::Float;

use crate::linalg::norm;
use crate::model::ScoreInfo;
use crate::result::OptimStatus;

use super::DirectionSearcher;

/// Steepest direction: the raw gradient of the optimisation score.
///
/// The line search applies the optimisation sign, so the same direction
/// serves ascent and descent.
#[derive(Debug, Default)]
pub struct GradientSearcher;

impl GradientSearcher {
    pub fn new() -> Self {
        GradientSearcher
    }
}

impl<F: Float> DirectionSearcher<F> for GradientSearcher {
    fn search(&mut self, info: &ScoreInfo<F>, _parameters: &[F]) -> Result<Vec<F>, OptimStatus> {
        let gradient = info.gradient().ok_or(OptimStatus::GradientUnavailable)?;
        if norm(gradient) == F::zero() {
            return Err(OptimStatus::GradientTooSmall);
        }
        Ok(gradient.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn returns_gradient_verbatim() {
        let info = ScoreInfo::with_gradient(3.0, vec![1.0, -2.0, 0.5]);
        let mut searcher = GradientSearcher::new();
        let direction = searcher.search(&info, &[0.0, 0.0, 0.0]).unwrap();
        assert_eq!(direction, vec![1.0, -2.0, 0.5]);
    }

    #[test]
    fn missing_gradient_is_reported() {
        let info = ScoreInfo::new(3.0);
        let mut searcher = GradientSearcher::new();
        let result: Result<Vec<f64>, _> = searcher.search(&info, &[0.0]);
        assert_eq!(result.unwrap_err(), OptimStatus::GradientUnavailable);
    }

    #[test]
    fn zero_gradient_is_too_small() {
        let info = ScoreInfo::with_gradient(3.0, vec![0.0, 0.0]);
        let mut searcher = GradientSearcher::new();
        let result = searcher.search(&info, &[0.0, 0.0]);
        assert_eq!(result.unwrap_err(), OptimStatus::GradientTooSmall);
    }
}
