use log::warn;
use num_traits::Float;

use crate::linalg::{dot, norm};
use crate::model::ScoreInfo;
use crate::result::OptimStatus;

use super::history::{CurvaturePair, History};
use super::DirectionSearcher;

/// Limited-memory quasi-Newton direction search.
///
/// Approximates the inverse-Hessian action on the gradient with the
/// two-loop recursion over a bounded history of curvature pairs, in
/// O(m*n) time and memory for history length `m` and parameter count `n`;
/// no matrix is ever formed. With an empty history the searcher reduces
/// to the raw gradient direction.
///
/// The history belongs to this instance alone; a searcher built for a new
/// `optimize` call starts from an empty one.
#[derive(Debug)]
pub struct LbfgsSearcher<F> {
    history: History<F>,
    min_curvature: F,
    sign: F,
    previous: Option<Snapshot<F>>,
}

#[derive(Debug)]
struct Snapshot<F> {
    parameters: Vec<F>,
    gradient: Vec<F>,
}

impl<F: Float> LbfgsSearcher<F> {
    /// `sign` is the optimisation direction (+1 maximise, -1 minimise);
    /// `min_curvature` is the smallest `y . s` a pair may carry before it
    /// is skipped instead of stored.
    pub fn new(memory_size: usize, min_curvature: F, sign: F) -> Self {
        LbfgsSearcher {
            history: History::new(memory_size),
            min_curvature,
            sign,
            previous: None,
        }
    }

    /// Record the move from the previous point, unless its curvature is
    /// too flat to be usable.
    fn push_pair(&mut self, parameters: &[F], gradient: &[F]) {
        let Some(prev) = &self.previous else {
            return;
        };
        let n = parameters.len();
        let mut s = vec![F::zero(); n];
        let mut y = vec![F::zero(); n];
        for i in 0..n {
            s[i] = parameters[i] - prev.parameters[i];
            // The gradient delta is taken against the optimisation sign so
            // that y . s is positive on a well-behaved score surface
            // whether the run maximises or minimises.
            y[i] = -self.sign * (gradient[i] - prev.gradient[i]);
        }
        let sy = dot(&y, &s);
        if sy < self.min_curvature {
            warn!("skipping L-BFGS curvature pair below the minimum-curvature guard");
            return;
        }
        self.history.push(CurvaturePair {
            s,
            y,
            rho: F::one() / sy,
        });
    }

    /// Two-loop recursion: walk the history newest to oldest accumulating
    /// the alpha corrections, scale by the newest pair's curvature ratio,
    /// then walk oldest to newest applying the betas.
    fn two_loop(&self, gradient: &[F]) -> Vec<F> {
        let k = self.history.len();
        let n = gradient.len();

        let mut q: Vec<F> = gradient.to_vec();
        let mut alpha = vec![F::zero(); k];
        for i in (0..k).rev() {
            let pair = self.history.oldest_first(i);
            alpha[i] = pair.rho * dot(&pair.s, &q);
            for j in 0..n {
                q[j] = q[j] - alpha[i] * pair.y[j];
            }
        }

        // Initial inverse-Hessian scale H0 = (s . y) / (y . y) from the
        // most recent pair.
        if let Some(newest) = self.history.newest() {
            let yy = dot(&newest.y, &newest.y);
            if yy > F::zero() {
                let gamma = dot(&newest.s, &newest.y) / yy;
                for v in q.iter_mut() {
                    *v = *v * gamma;
                }
            }
        }

        for i in 0..k {
            let pair = self.history.oldest_first(i);
            let beta = pair.rho * dot(&pair.y, &q);
            for j in 0..n {
                q[j] = q[j] + (alpha[i] - beta) * pair.s[j];
            }
        }

        q
    }
}

impl<F: Float> DirectionSearcher<F> for LbfgsSearcher<F> {
    fn search(&mut self, info: &ScoreInfo<F>, parameters: &[F]) -> Result<Vec<F>, OptimStatus> {
        let gradient = info.gradient().ok_or(OptimStatus::GradientUnavailable)?;
        debug_assert_eq!(gradient.len(), parameters.len());
        if norm(gradient) == F::zero() {
            return Err(OptimStatus::GradientTooSmall);
        }

        self.push_pair(parameters, gradient);
        let direction = if self.history.is_empty() {
            gradient.to_vec()
        } else {
            self.two_loop(gradient)
        };

        self.previous = Some(Snapshot {
            parameters: parameters.to_vec(),
            gradient: gradient.to_vec(),
        });
        Ok(direction)
    }
}
