use num_traits::Float;

/// Whether the optimiser drives the score up or down.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptimDirection {
    Maximize,
    Minimize,
}

impl OptimDirection {
    /// The sign applied to score differences and parameter steps:
    /// `+1` when maximising, `-1` when minimising.
    pub fn sign<F: Float>(self) -> F {
        match self {
            OptimDirection::Maximize => F::one(),
            OptimDirection::Minimize => -F::one(),
        }
    }
}

/// Search-direction strategy for a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DirectionMethod {
    /// Move along the raw gradient.
    Gradient,
    /// Limited-memory quasi-Newton direction from the two-loop recursion.
    Lbfgs,
}

/// Step-size strategy for a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineSearchMethod {
    /// Pure backtracking: halve the step after each failed trial.
    Linear,
    /// Quadratic step acceleration from the directional derivatives at the
    /// two most recent points.
    Quadratic,
    /// Cubic step acceleration from scores and directional derivatives at
    /// the two most recent points.
    Cubic,
}

/// Parameters controlling one `optimize` call.
#[derive(Debug, Clone)]
pub struct OptimParams<F> {
    /// Iterations allowed this call; 0 means unbounded (default: 100).
    pub max_iterations: usize,
    /// Line-search sub-iterations allowed this call; 0 means unbounded
    /// (default: 0).
    pub max_sub_iterations: usize,
    /// Stop when the score improves by less than this; 0 disables
    /// (default: 1e-8).
    pub score_tolerance: F,
    /// Stop when the improvement falls below `|old score|` times this;
    /// 0 disables (default: 0).
    pub relative_score_tolerance: F,
    /// Maximise or minimise the optimisation score (default: maximise).
    pub direction: OptimDirection,
    /// Reject trial steps moving the parameters by less than this;
    /// 0 disables (default: 1e-16).
    pub min_direction_step: F,
    /// Reject trial steps moving the parameters by more than this;
    /// 0 disables (default: 0).
    pub max_direction_step: F,
    /// Scoring attempts allowed per line search; 0 means unbounded
    /// (default: 50).
    pub max_line_search_iterations: usize,
    /// Search-direction strategy (default: gradient).
    pub direction_method: DirectionMethod,
    /// Step-size strategy (default: linear).
    pub line_search_method: LineSearchMethod,
    /// L-BFGS history length `m` (default: 10).
    pub memory_size: usize,
    /// Minimum curvature `y . s` an L-BFGS pair must carry to enter the
    /// history; pairs below it are skipped (default: 1e-12).
    pub min_curvature: F,
}

impl Default for OptimParams<f64> {
    fn default() -> Self {
        OptimParams {
            max_iterations: 100,
            max_sub_iterations: 0,
            score_tolerance: 1e-8,
            relative_score_tolerance: 0.0,
            direction: OptimDirection::Maximize,
            min_direction_step: 1e-16,
            max_direction_step: 0.0,
            max_line_search_iterations: 50,
            direction_method: DirectionMethod::Gradient,
            line_search_method: LineSearchMethod::Linear,
            memory_size: 10,
            min_curvature: 1e-12,
        }
    }
}

impl Default for OptimParams<f32> {
    fn default() -> Self {
        OptimParams {
            max_iterations: 100,
            max_sub_iterations: 0,
            score_tolerance: 1e-5,
            relative_score_tolerance: 0.0,
            direction: OptimDirection::Maximize,
            min_direction_step: 1e-8,
            max_direction_step: 0.0,
            max_line_search_iterations: 50,
            direction_method: DirectionMethod::Gradient,
            line_search_method: LineSearchMethod::Linear,
            memory_size: 10,
            min_curvature: 1e-6,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sign_matches_direction() {
        assert_eq!(OptimDirection::Maximize.sign::<f64>(), 1.0);
        assert_eq!(OptimDirection::Minimize.sign::<f64>(), -1.0);
    }
}
